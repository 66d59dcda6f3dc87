//! Query resolution engine.
//!
//! One entry point per query event: decide between the short-query listing,
//! a built-in subcommand, and ranked free-text search, then render each hit
//! as an actionable result item. Unexpected failures are caught here and
//! either surfaced as a reportable result or re-raised, depending on the
//! configured policy.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Result;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use tracing::{debug, error, warn};

use crate::config;
use crate::items::{task_item, Action, ActionKind, ResultItem};
use crate::store::TaskStore;
use crate::subcommands::{resolve_subcommand, Subcommand};
use crate::task::Task;

/// What to do with a failure inside query resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Swallow the failure and surface a single result offering to copy the
    /// detail for reporting.
    Report,
    /// Log the failure and re-raise it to the caller.
    Propagate,
}

/// Engine configuration threaded into every resolution call.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Activation prefix; queries without it produce no results.
    pub trigger: String,
    pub error_policy: ErrorPolicy,
    /// File holding the configured reminders tag, read per task render.
    pub reminders_tag_file: PathBuf,
    /// Cap on fuzzy-search results.
    pub match_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            trigger: "t ".to_string(),
            error_policy: ErrorPolicy::Report,
            reminders_tag_file: config::reminders_tag_file(),
            match_limit: 30,
        }
    }
}

/// Resolve one raw query string against the live task set.
///
/// Only `ErrorPolicy::Propagate` lets an error cross this boundary; under
/// `ErrorPolicy::Report` the returned list carries the failure instead.
pub fn resolve_query(
    raw: &str,
    store: &mut TaskStore,
    cfg: &EngineConfig,
) -> Result<Vec<ResultItem>> {
    let Some(query_str) = raw.strip_prefix(cfg.trigger.as_str()) else {
        return Ok(Vec::new());
    };

    match resolve_stripped(query_str, store, cfg) {
        Ok(items) => Ok(items),
        Err(err) => match cfg.error_policy {
            ErrorPolicy::Propagate => {
                error!("query resolution failed: {err:#}");
                Err(err)
            }
            ErrorPolicy::Report => {
                warn!("query resolution failed, reporting to user: {err:#}");
                Ok(vec![failure_item(&err)])
            }
        },
    }
}

fn resolve_stripped(
    query_str: &str,
    store: &mut TaskStore,
    cfg: &EngineConfig,
) -> Result<Vec<ResultItem>> {
    if !store.available() {
        return Ok(vec![store_missing_item()]);
    }

    let tasks: Vec<Task> = store.get()?.to_vec();
    debug!(query = query_str, tasks = tasks.len(), "resolving query");

    if query_str.chars().count() < 2 {
        // Idle trigger: refresh the snapshot on the next resolution so
        // external store changes show up without a mutation.
        store.invalidate();

        let mut results: Vec<ResultItem> = Subcommand::ALL
            .iter()
            .map(|s| s.listing_item(&cfg.trigger))
            .collect();

        let mut sorted = tasks;
        sorted.sort_by(|a, b| {
            sort_key(b.urgency).total_cmp(&sort_key(a.urgency))
        });
        results.extend(
            sorted
                .iter()
                .map(|t| task_item(t, &cfg.reminders_tag_file)),
        );
        return Ok(results);
    }

    if let Some(sq) = resolve_subcommand(query_str) {
        let mut results = sq
            .command
            .full_results_now(&sq.args, &tasks, &cfg.reminders_tag_file);
        if results.is_empty() {
            results.push(ResultItem::advisory("No results"));
        }
        return Ok(results);
    }

    Ok(fuzzy_results(query_str, &tasks, cfg))
}

/// Absent urgency sorts below every real score.
fn sort_key(urgency: Option<f64>) -> f64 {
    urgency.unwrap_or(f64::NEG_INFINITY)
}

/// Rank tasks by description similarity and keep the top matches.
///
/// Descriptions are deduplicated: candidate order is first appearance, and
/// of several tasks sharing a description only the last one is reachable.
/// That is a known limitation of description-keyed lookup.
fn fuzzy_results(query_str: &str, tasks: &[Task], cfg: &EngineConfig) -> Vec<ResultItem> {
    let matcher = SkimMatcherV2::default();

    let mut order: Vec<&str> = Vec::new();
    let mut by_description: HashMap<&str, &Task> = HashMap::new();
    for task in tasks {
        if !by_description.contains_key(task.description.as_str()) {
            order.push(&task.description);
        }
        by_description.insert(&task.description, task);
    }

    let mut scored: Vec<(i64, &str)> = order
        .iter()
        .filter_map(|desc| {
            matcher
                .fuzzy_match(desc, query_str)
                .map(|score| (score, *desc))
        })
        .collect();
    // Stable sort: equal scores keep store-provided order.
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.truncate(cfg.match_limit);

    scored
        .into_iter()
        .map(|(_, desc)| task_item(by_description[desc], &cfg.reminders_tag_file))
        .collect()
}

fn store_missing_item() -> ResultItem {
    let mut item = ResultItem::advisory("\"taskwarrior\" is not installed.");
    item.subtext = "Please install and configure \"taskwarrior\" accordingly.".to_string();
    item.actions.push(Action {
        label: "Open the Taskwarrior website".to_string(),
        kind: ActionKind::OpenUrl("https://taskwarrior.org/download/".to_string()),
    });
    item
}

fn failure_item(err: &anyhow::Error) -> ResultItem {
    let mut item =
        ResultItem::advisory("Something went wrong! Press [ENTER] to copy error and report it");
    item.actions
        .push(Action::copy("Copy error for reporting", format!("{err:?}")));
    item
}
