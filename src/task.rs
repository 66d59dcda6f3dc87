//! Task record adapter for the Taskwarrior export payload.
//!
//! This module defines the `Task` struct as produced by `task export`,
//! tolerating the optional fields that Taskwarrior omits per-task
//! (tags, due date, urgency, annotations).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single Taskwarrior task as observed through `task export`.
///
/// The store owns the full lifecycle; this side only reads snapshots and
/// addresses tasks by `uuid` when requesting mutations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub uuid: String,
    pub description: String,
    pub status: TaskStatus,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, with = "tw_timestamp")]
    pub due: Option<DateTime<Utc>>,
    #[serde(default)]
    pub urgency: Option<f64>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

/// A free-text note attached to a task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Annotation {
    #[serde(default, with = "tw_timestamp")]
    pub entry: Option<DateTime<Utc>>,
    pub description: String,
}

/// Task lifecycle status as reported by the store.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Completed,
    Deleted,
    Waiting,
    Recurring,
}

impl Task {
    /// Leading slice of the UUID used in compact displays.
    pub fn short_id(&self) -> String {
        self.uuid.chars().take(8).collect()
    }

    /// Annotation texts joined with single spaces, in annotation order.
    pub fn annotation_text(&self) -> String {
        self.annotations
            .iter()
            .map(|a| a.description.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Format a task status for display.
pub fn format_status(s: TaskStatus) -> &'static str {
    match s {
        TaskStatus::Pending => "pending",
        TaskStatus::Completed => "completed",
        TaskStatus::Deleted => "deleted",
        TaskStatus::Waiting => "waiting",
        TaskStatus::Recurring => "recurring",
    }
}

/// Serde adapter for Taskwarrior's compact UTC timestamps (`20240310T230000Z`).
mod tw_timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y%m%dT%H%M%SZ";

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.serialize_str(&dt.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw {
            None => Ok(None),
            Some(s) => NaiveDateTime::parse_from_str(&s, FORMAT)
                .map(|naive| Some(naive.and_utc()))
                .map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_export_record() {
        let raw = r#"{
            "id": 3,
            "uuid": "3f0a9c2e-7b1d-4e5f-9a8b-0c1d2e3f4a5b",
            "description": "buy milk",
            "status": "pending",
            "urgency": 2.4,
            "due": "20240310T230000Z",
            "tags": ["home"],
            "annotations": [{"entry": "20240301T120000Z", "description": "see http://a.com"}]
        }"#;
        let task: Task = serde_json::from_str(raw).unwrap();
        assert_eq!(task.short_id(), "3f0a9c2e");
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.urgency, Some(2.4));
        assert_eq!(
            task.due,
            Some(Utc.with_ymd_and_hms(2024, 3, 10, 23, 0, 0).unwrap())
        );
        assert_eq!(task.annotation_text(), "see http://a.com");
    }

    #[test]
    fn test_parse_minimal_record() {
        // Optional fields absent entirely.
        let raw = r#"{"uuid": "abc", "description": "bare", "status": "waiting"}"#;
        let task: Task = serde_json::from_str(raw).unwrap();
        assert!(task.due.is_none());
        assert!(task.urgency.is_none());
        assert!(task.tags.is_empty());
        assert!(task.annotations.is_empty());
        assert_eq!(task.annotation_text(), "");
    }
}
