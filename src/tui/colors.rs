//! Color constants for the terminal user interface.

use ratatui::style::Color;

use crate::visuals::Icon;

// These mirror the icon tiers used in notifications,
// so a row reads the same in every surface

/// Used for the ↗ urgency tier
pub const GOLD: Color = Color::Rgb(255, 215, 0);
/// Used for the ↑ urgency tier
pub const URGENT_RED: Color = Color::Rgb(200, 30, 30);

/// Terminal colour for an icon tier.
pub fn icon_color(icon: Icon) -> Color {
    match icon {
        Icon::Default => Color::Gray,
        Icon::Blue => Color::Blue,
        Icon::Cyan => Color::Cyan,
        Icon::Green => Color::Green,
        Icon::Yellow => GOLD,
        Icon::Red => URGENT_RED,
    }
}
