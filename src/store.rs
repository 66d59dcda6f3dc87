//! Task-store client boundary.
//!
//! Wraps the `task` command line as the system of record: a cached snapshot
//! of the live task set plus a staleness flag that any mutation sets. The
//! single-threaded query loop means no locking is needed around the cache.

use std::process::Command;

use anyhow::{bail, Context, Result};
use tracing::debug;

use crate::task::{Task, TaskStatus};

/// Cached view of the external task store.
pub struct TaskStore {
    bin: String,
    snapshot: Option<Vec<Task>>,
    stale: bool,
}

impl TaskStore {
    /// Store backed by a specific executable name or path, usually `task`.
    pub fn with_bin(bin: impl Into<String>) -> Self {
        TaskStore {
            bin: bin.into(),
            snapshot: None,
            stale: true,
        }
    }

    /// Store primed with an in-memory snapshot; no subprocess runs until
    /// the snapshot is invalidated.
    pub fn preloaded(tasks: Vec<Task>) -> Self {
        TaskStore {
            bin: "task".to_string(),
            snapshot: Some(tasks),
            stale: false,
        }
    }

    pub fn bin(&self) -> &str {
        &self.bin
    }

    /// Point the store at a different executable.
    pub fn set_bin(&mut self, bin: impl Into<String>) {
        self.bin = bin.into();
    }

    /// Pre-flight check: a store is usable when it already holds a fresh
    /// snapshot, or when the binary resolves on PATH.
    pub fn available(&self) -> bool {
        (self.snapshot.is_some() && !self.stale) || which::which(&self.bin).is_ok()
    }

    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Mark the cached snapshot stale; the next `get` fetches fresh data.
    pub fn invalidate(&mut self) {
        self.stale = true;
    }

    /// Current live (non-completed) task snapshot, refreshed if stale.
    pub fn get(&mut self) -> Result<&[Task]> {
        if self.stale || self.snapshot.is_none() {
            let tasks = self.get_all_items(false)?;
            debug!(count = tasks.len(), "refreshed task snapshot");
            self.snapshot = Some(tasks);
            self.stale = false;
        }
        Ok(self.snapshot.as_deref().unwrap_or_default())
    }

    /// Fetch every task from the store via `task export`, optionally
    /// retaining completed ones.
    pub fn get_all_items(&self, include_completed: bool) -> Result<Vec<Task>> {
        let output = Command::new(&self.bin)
            .args(["rc.confirmation=off", "export"])
            .output()
            .with_context(|| format!("failed to run `{} export`", self.bin))?;

        if !output.status.success() {
            bail!(
                "`{} export` exited with {}: {}",
                self.bin,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        let mut tasks: Vec<Task> =
            serde_json::from_slice(&output.stdout).context("failed to parse task export")?;
        if !include_completed {
            tasks.retain(|t| matches!(t.status, TaskStatus::Pending | TaskStatus::Waiting));
        }
        Ok(tasks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending(uuid: &str) -> Task {
        Task {
            uuid: uuid.into(),
            description: format!("task {uuid}"),
            status: TaskStatus::Pending,
            tags: Vec::new(),
            due: None,
            urgency: None,
            annotations: Vec::new(),
        }
    }

    #[test]
    fn test_preloaded_snapshot_serves_without_subprocess() {
        let mut store = TaskStore::preloaded(vec![pending("a"), pending("b")]);
        assert!(store.available());
        assert!(!store.is_stale());
        assert_eq!(store.get().unwrap().len(), 2);
    }

    #[test]
    fn test_invalidate_marks_stale() {
        let mut store = TaskStore::preloaded(vec![pending("a")]);
        store.invalidate();
        assert!(store.is_stale());
    }

    #[test]
    fn test_missing_binary_is_unavailable() {
        let store = TaskStore::with_bin("twl-no-such-binary");
        assert!(!store.available());
    }
}
