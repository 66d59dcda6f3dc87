//! Built-in query subcommands.
//!
//! A fixed set of named query modes sits in front of free-text search:
//! `add` plus the three date views. The first whitespace-delimited token of
//! a query is matched case-insensitively against these names; everything
//! after it is the subcommand's argument text.

use std::path::Path;

use chrono::{Duration, Local, NaiveDate};

use crate::dates::tasks_due_on;
use crate::items::{task_item, Action, ResultItem};
use crate::task::Task;

/// The built-in subcommands, dispatched as a tagged variant rather than
/// through virtual calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subcommand {
    Add,
    Today,
    Yesterday,
    Tomorrow,
}

/// A matched subcommand paired with its argument text.
#[derive(Debug, Clone)]
pub struct SubcommandQuery {
    pub command: Subcommand,
    pub args: String,
}

impl Subcommand {
    pub const ALL: [Subcommand; 4] = [
        Subcommand::Add,
        Subcommand::Today,
        Subcommand::Yesterday,
        Subcommand::Tomorrow,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Subcommand::Add => "add",
            Subcommand::Today => "today",
            Subcommand::Yesterday => "yesterday",
            Subcommand::Tomorrow => "tomorrow",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Subcommand::Add => "Add a new task",
            Subcommand::Today => "Today's tasks",
            Subcommand::Yesterday => "Yesterday's tasks",
            Subcommand::Tomorrow => "Tomorrow's tasks",
        }
    }

    /// Single-line listing entry shown on short queries; the subtext hints
    /// at the full trigger text to type.
    pub fn listing_item(self, trigger: &str) -> ResultItem {
        let mut item = ResultItem::advisory(self.description());
        item.subtext = format!("{}{} ", trigger, self.name());
        item
    }

    /// Full result set for this subcommand given its argument text,
    /// evaluated against `today`.
    pub fn full_results(
        self,
        args: &str,
        tasks: &[Task],
        reminders_tag_file: &Path,
        today: NaiveDate,
    ) -> Vec<ResultItem> {
        match self {
            Subcommand::Add => {
                let mut item = ResultItem::advisory(self.description());
                item.subtext = args.to_string();
                let mut store_args = vec!["add".to_string()];
                store_args.extend(args.split_whitespace().map(|s| s.to_string()));
                item.actions.push(Action::store("Add task", store_args));
                vec![item]
            }
            Subcommand::Today => date_results(today, tasks, reminders_tag_file),
            Subcommand::Yesterday => {
                date_results(today - Duration::days(1), tasks, reminders_tag_file)
            }
            Subcommand::Tomorrow => {
                date_results(today + Duration::days(1), tasks, reminders_tag_file)
            }
        }
    }

    /// As `full_results`, with `today` taken from the local clock.
    pub fn full_results_now(
        self,
        args: &str,
        tasks: &[Task],
        reminders_tag_file: &Path,
    ) -> Vec<ResultItem> {
        self.full_results(args, tasks, reminders_tag_file, Local::now().date_naive())
    }
}

fn date_results(date: NaiveDate, tasks: &[Task], reminders_tag_file: &Path) -> Vec<ResultItem> {
    tasks_due_on(date, tasks)
        .iter()
        .map(|t| task_item(t, reminders_tag_file))
        .collect()
}

/// Match the leading token of `query` against the registered subcommand
/// names, case-insensitively. No match (or an empty query) falls through to
/// free-text search.
pub fn resolve_subcommand(query: &str) -> Option<SubcommandQuery> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut parts = trimmed.splitn(2, char::is_whitespace);
    let head = parts.next()?;
    let args = parts.next().unwrap_or("").trim_start();

    Subcommand::ALL
        .iter()
        .find(|s| s.name().eq_ignore_ascii_case(head))
        .map(|&command| SubcommandQuery {
            command,
            args: args.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::ActionKind;
    use crate::task::TaskStatus;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_matching_is_case_insensitive() {
        for q in ["TODAY", "today", "ToDay"] {
            let sq = resolve_subcommand(q).unwrap();
            assert_eq!(sq.command, Subcommand::Today);
            assert_eq!(sq.args, "");
        }
    }

    #[test]
    fn test_partial_names_do_not_match() {
        assert!(resolve_subcommand("todayx").is_none());
        assert!(resolve_subcommand("").is_none());
        assert!(resolve_subcommand("   ").is_none());
    }

    #[test]
    fn test_argument_text_split() {
        let sq = resolve_subcommand("add buy  milk tomorrow").unwrap();
        assert_eq!(sq.command, Subcommand::Add);
        assert_eq!(sq.args, "buy  milk tomorrow");
    }

    #[test]
    fn test_add_builds_tokenised_store_action() {
        let items = Subcommand::Add.full_results(
            "buy milk due:tomorrow",
            &[],
            Path::new("/nonexistent"),
            NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
        );
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].subtext, "buy milk due:tomorrow");
        match &items[0].actions[0].kind {
            ActionKind::Store { args, .. } => {
                assert_eq!(args, &["add", "buy", "milk", "due:tomorrow"]);
            }
            other => panic!("unexpected action kind: {other:?}"),
        }
    }

    #[test]
    fn test_date_views_select_their_window() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let mk = |uuid: &str, y: i32, m: u32, d: u32| Task {
            uuid: uuid.into(),
            description: uuid.into(),
            status: TaskStatus::Pending,
            tags: Vec::new(),
            due: Some(Utc.with_ymd_and_hms(y, m, d, 9, 0, 0).unwrap()),
            urgency: None,
            annotations: Vec::new(),
        };
        let tasks = vec![
            mk("yday", 2024, 3, 9),
            mk("today", 2024, 3, 10),
            mk("tmrw", 2024, 3, 11),
        ];
        let p = Path::new("/nonexistent");

        let names = |items: Vec<ResultItem>| -> Vec<String> {
            items.into_iter().map(|i| i.text).collect()
        };
        assert_eq!(
            names(Subcommand::Today.full_results("", &tasks, p, today)),
            vec!["today"]
        );
        assert_eq!(
            names(Subcommand::Yesterday.full_results("", &tasks, p, today)),
            vec!["yday"]
        );
        assert_eq!(
            names(Subcommand::Tomorrow.full_results("", &tasks, p, today)),
            vec!["tmrw"]
        );
    }
}
