//! Result items and their attached actions.
//!
//! A `ResultItem` is one row in the launcher: display text, a pipe-delimited
//! subtext of the task's optional fields, an icon tier and an ordered action
//! list. Mutation actions close over their full argument vector at build
//! time; the task UUID is resolved here, never re-looked-up on invocation.

use std::path::Path;

use crate::config;
use crate::task::{format_status, Task};
use crate::urls::task_urls;
use crate::visuals::{urgency_to_visuals, Icon};

/// One launcher row.
#[derive(Debug, Clone)]
pub struct ResultItem {
    pub text: String,
    pub subtext: String,
    pub icon: Icon,
    pub actions: Vec<Action>,
}

impl ResultItem {
    /// A plain, action-free entry used to surface a message.
    pub fn advisory(text: impl Into<String>) -> Self {
        ResultItem {
            text: text.into(),
            subtext: String::new(),
            icon: Icon::Default,
            actions: Vec::new(),
        }
    }
}

/// An invocable effect attached to a result item.
#[derive(Debug, Clone)]
pub struct Action {
    pub label: String,
    pub kind: ActionKind,
}

#[derive(Debug, Clone)]
pub enum ActionKind {
    OpenUrl(String),
    CopyText(String),
    /// Run the store executable with these arguments. `interactive` routes
    /// the call through a visible terminal window.
    Store {
        args: Vec<String>,
        interactive: bool,
    },
}

impl Action {
    pub fn open_url(url: &str) -> Self {
        Action {
            label: format!("Open {url}"),
            kind: ActionKind::OpenUrl(url.to_string()),
        }
    }

    pub fn copy(label: impl Into<String>, text: impl Into<String>) -> Self {
        Action {
            label: label.into(),
            kind: ActionKind::CopyText(text.into()),
        }
    }

    pub fn store(label: impl Into<String>, args: Vec<String>) -> Self {
        Action {
            label: label.into(),
            kind: ActionKind::Store {
                args,
                interactive: false,
            },
        }
    }

    pub fn store_interactive(label: impl Into<String>, args: Vec<String>) -> Self {
        Action {
            label: label.into(),
            kind: ActionKind::Store {
                args,
                interactive: true,
            },
        }
    }
}

/// Render a task as a launcher row, assembling its action list.
///
/// Reads the reminders tag from `reminders_tag_file` on every call so an
/// edit to the config file shows up on the next render.
pub fn task_item(task: &Task, reminders_tag_file: &Path) -> ResultItem {
    build_task_item(task, config::load_value(reminders_tag_file).as_deref())
}

/// Action order: open-URL actions first (first-discovered URL first), then
/// complete, delete, start, stop, interactive edit, copy UUID, and last the
/// optional reminders-tag action.
pub fn build_task_item(task: &Task, reminders_tag: Option<&str>) -> ResultItem {
    let id = task.uuid.clone();
    let mut actions = vec![
        Action::store("Complete task", vec!["done".into(), id.clone()]),
        Action::store("Delete task", vec!["delete".into(), id.clone()]),
        Action::store("Start task", vec!["start".into(), id.clone()]),
        Action::store("Stop task", vec!["stop".into(), id.clone()]),
        Action::store_interactive("Edit task interactively", vec!["edit".into(), id.clone()]),
        Action::copy("Copy task UUID", id.clone()),
    ];

    for url in task_urls(task).iter().rev() {
        actions.insert(0, Action::open_url(url));
    }

    if let Some(tag) = reminders_tag {
        actions.push(Action::store(
            format!("Add to Reminders (+{tag})"),
            vec!["modify".into(), id, format!("+{tag}")],
        ));
    }

    let (urgency_str, icon) = urgency_to_visuals(task.urgency);
    ResultItem {
        text: task.description.clone(),
        subtext: task_subtext(task, urgency_str),
        icon,
        actions,
    }
}

/// Pipe-delimited subtext; absent fields are dropped entirely so no stray
/// separators remain.
fn task_subtext(task: &Task, urgency_str: Option<&str>) -> String {
    let mut parts: Vec<String> = Vec::new();
    if let Some(sym) = urgency_str {
        parts.push(sym.to_string());
    }
    parts.push(format!("ID: {}...", task.short_id()));
    parts.push(format_status(task.status).to_string());
    if !task.tags.is_empty() {
        parts.push(format!("tags:{}", task.tags.join(",")));
    }
    if let Some(due) = task.due {
        parts.push(format!("due:{}", due.format("%Y-%m-%d %H:%M")));
    }
    parts.join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskStatus;
    use chrono::{TimeZone, Utc};

    fn task(description: &str) -> Task {
        Task {
            uuid: "3f0a9c2e-7b1d-4e5f-9a8b-0c1d2e3f4a5b".into(),
            description: description.into(),
            status: TaskStatus::Pending,
            tags: Vec::new(),
            due: None,
            urgency: None,
            annotations: Vec::new(),
        }
    }

    #[test]
    fn test_action_order_with_urls() {
        let item = build_task_item(&task("see http://a.com and http://b.com"), None);
        let labels: Vec<&str> = item.actions.iter().map(|a| a.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Open http://a.com",
                "Open http://b.com",
                "Complete task",
                "Delete task",
                "Start task",
                "Stop task",
                "Edit task interactively",
                "Copy task UUID",
            ]
        );
    }

    #[test]
    fn test_reminders_action_appended_last() {
        let item = build_task_item(&task("plain"), Some("remindme"));
        let last = item.actions.last().unwrap();
        assert_eq!(last.label, "Add to Reminders (+remindme)");
        match &last.kind {
            ActionKind::Store { args, interactive } => {
                assert_eq!(
                    args,
                    &vec![
                        "modify".to_string(),
                        "3f0a9c2e-7b1d-4e5f-9a8b-0c1d2e3f4a5b".to_string(),
                        "+remindme".to_string()
                    ]
                );
                assert!(!*interactive);
            }
            other => panic!("unexpected action kind: {other:?}"),
        }
    }

    #[test]
    fn test_edit_action_is_interactive() {
        let item = build_task_item(&task("plain"), None);
        let edit = item
            .actions
            .iter()
            .find(|a| a.label == "Edit task interactively")
            .unwrap();
        assert!(matches!(
            edit.kind,
            ActionKind::Store { interactive: true, .. }
        ));
    }

    #[test]
    fn test_subtext_drops_absent_fields() {
        let item = build_task_item(&task("plain"), None);
        assert_eq!(item.subtext, "ID: 3f0a9c2e... | pending");
    }

    #[test]
    fn test_subtext_full_composition() {
        let mut t = task("rich");
        t.urgency = Some(16.0);
        t.tags = vec!["home".into(), "errands".into()];
        t.due = Some(Utc.with_ymd_and_hms(2024, 3, 10, 23, 0, 0).unwrap());
        let item = build_task_item(&t, None);
        assert_eq!(
            item.subtext,
            "↑ | ID: 3f0a9c2e... | pending | tags:home,errands | due:2024-03-10 23:00"
        );
        assert_eq!(item.icon, Icon::Red);
    }
}
