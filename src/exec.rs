//! Mutation execution against the task store, and action invocation.
//!
//! Store mutations run synchronously: the command blocks until the store
//! returns, the combined output feeds a desktop notification, and the cached
//! snapshot is marked stale whatever the outcome. Interactive mutations
//! (`task edit`) run inside a visible terminal window instead of capturing
//! output silently.

use std::process::Command;

use anyhow::{anyhow, Result};
use clipboard_rs::{Clipboard, ClipboardContext};
use tracing::{debug, info, warn};

use crate::items::{Action, ActionKind};
use crate::store::TaskStore;
use crate::visuals::Icon;

/// Flags prepended to every mutating call so the store never stalls on a
/// confirmation prompt.
pub const SAFETY_FLAGS: [&str; 2] = ["rc.recurrence.confirmation=no", "rc.confirmation=off"];

/// Terminal wrapper for mutations that need an interactive surface.
const TERMINAL_WRAPPER: [&str; 2] = ["x-terminal-emulator", "-e"];

/// Run a mutating store command.
///
/// Failures are reported through the notification channel, never returned;
/// the snapshot is invalidated regardless of exit status.
pub fn run_store_action(store: &mut TaskStore, args: &[String], interactive: bool) {
    let mut argv: Vec<String> = Vec::with_capacity(args.len() + 5);
    if interactive {
        argv.extend(TERMINAL_WRAPPER.iter().map(|s| s.to_string()));
    }
    argv.push(store.bin().to_string());
    argv.extend(SAFETY_FLAGS.iter().map(|s| s.to_string()));
    argv.extend(args.iter().cloned());

    debug!(?argv, "running store mutation");
    match Command::new(&argv[0]).args(&argv[1..]).output() {
        Ok(out) if out.status.success() => {
            notify(String::from_utf8_lossy(&out.stdout).trim(), Icon::Default);
        }
        Ok(out) => {
            let msg = format!(
                "stdout: {} | stderr: {}",
                String::from_utf8_lossy(&out.stdout).trim(),
                String::from_utf8_lossy(&out.stderr).trim()
            );
            notify(&msg, Icon::Red);
        }
        Err(err) => {
            notify(&format!("failed to run the task store: {err}"), Icon::Red);
        }
    }

    store.invalidate();
}

/// Invoke a single result-item action.
pub fn invoke_action(action: &Action, store: &mut TaskStore) -> Result<()> {
    match &action.kind {
        ActionKind::OpenUrl(url) => {
            open::that(url).map_err(|e| anyhow!("failed to open {url}: {e}"))
        }
        ActionKind::CopyText(text) => copy_to_clipboard(text),
        ActionKind::Store { args, interactive } => {
            run_store_action(store, args, *interactive);
            Ok(())
        }
    }
}

fn copy_to_clipboard(text: &str) -> Result<()> {
    let ctx =
        ClipboardContext::new().map_err(|e| anyhow!("failed to access clipboard: {e}"))?;
    ctx.set_text(text.to_string())
        .map_err(|e| anyhow!("failed to copy to clipboard: {e}"))?;
    Ok(())
}

/// Deliver a desktop notification, falling back to the log when no
/// notification daemon is reachable.
pub fn notify(message: &str, icon: Icon) {
    if which::which("notify-send").is_ok() {
        let status = Command::new("notify-send")
            .args(["--app-name", "Taskwarrior", "--icon", icon.theme_name()])
            .arg("Taskwarrior")
            .arg(message)
            .status();
        if let Err(err) = status {
            warn!("notify-send failed: {err}");
        }
    } else {
        info!(target: "notify", "{message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh_store(bin: &str) -> TaskStore {
        let mut store = TaskStore::preloaded(Vec::new());
        store.set_bin(bin);
        assert!(!store.is_stale());
        store
    }

    #[test]
    fn test_mutation_invalidates_on_success() {
        let mut store = fresh_store("true");
        run_store_action(&mut store, &["version".to_string()], false);
        assert!(store.is_stale());
    }

    #[test]
    fn test_mutation_invalidates_on_failure() {
        let mut store = fresh_store("false");
        run_store_action(&mut store, &["done".to_string(), "abc".to_string()], false);
        assert!(store.is_stale());
    }

    #[test]
    fn test_mutation_invalidates_on_spawn_error() {
        let mut store = fresh_store("twl-no-such-binary");
        run_store_action(&mut store, &["done".to_string()], false);
        assert!(store.is_stale());
    }
}
