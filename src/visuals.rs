//! Urgency score to visual tier mapping.
//!
//! Taskwarrior computes a floating-point urgency per task; the launcher
//! renders it as a direction symbol plus a coloured icon tier.

/// Icon tiers used across result items and notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Default,
    Blue,
    Cyan,
    Green,
    Yellow,
    Red,
}

impl Icon {
    /// Freedesktop icon name used when handing the tier to `notify-send`.
    pub fn theme_name(self) -> &'static str {
        match self {
            Icon::Red => "dialog-error",
            _ => "dialog-information",
        }
    }
}

/// Map an urgency score to its display symbol and icon tier.
///
/// Thresholds are half-open on the upper side, first match wins; a missing
/// score renders with no symbol and the default icon.
pub fn urgency_to_visuals(urgency: Option<f64>) -> (Option<&'static str>, Icon) {
    match urgency {
        None => (None, Icon::Default),
        Some(u) if u < 4.0 => (Some("↓"), Icon::Blue),
        Some(u) if u < 8.0 => (Some("↘"), Icon::Cyan),
        Some(u) if u < 11.0 => (Some("-"), Icon::Green),
        Some(u) if u < 15.0 => (Some("↗"), Icon::Yellow),
        Some(_) => (Some("↑"), Icon::Red),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(urgency_to_visuals(None), (None, Icon::Default));
        assert_eq!(urgency_to_visuals(Some(3.999)), (Some("↓"), Icon::Blue));
        assert_eq!(urgency_to_visuals(Some(4.0)), (Some("↘"), Icon::Cyan));
        assert_eq!(urgency_to_visuals(Some(7.999)), (Some("↘"), Icon::Cyan));
        assert_eq!(urgency_to_visuals(Some(8.0)), (Some("-"), Icon::Green));
        assert_eq!(urgency_to_visuals(Some(10.999)), (Some("-"), Icon::Green));
        assert_eq!(urgency_to_visuals(Some(11.0)), (Some("↗"), Icon::Yellow));
        assert_eq!(urgency_to_visuals(Some(14.999)), (Some("↗"), Icon::Yellow));
        assert_eq!(urgency_to_visuals(Some(15.0)), (Some("↑"), Icon::Red));
    }

    #[test]
    fn test_total_over_extremes() {
        assert_eq!(urgency_to_visuals(Some(-3.0)), (Some("↓"), Icon::Blue));
        assert_eq!(urgency_to_visuals(Some(1e9)), (Some("↑"), Icon::Red));
    }
}
