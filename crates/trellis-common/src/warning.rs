//! Generator warnings with colored terminal output.
//!
//! Provides deduplication so a tree rendered many times does not repeat the
//! same diagnostic. Used by the renderer to report node fields it ignores.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Most distinct messages remembered at once.
///
/// Messages name tags taken from the input, so a long-running process could
/// otherwise remember without limit. When full the set starts over, and a
/// message seen before may be printed once more.
pub const MAX_RECORDED_WARNINGS: usize = 1024;

fn warned() -> MutexGuard<'static, Option<HashSet<String>>> {
    // A panic while holding the lock cannot leave the set half-updated.
    WARNED.lock().unwrap_or_else(PoisonError::into_inner)
}

fn key(component: &str, message: &str) -> String {
    format!("[{component}] {message}")
}

/// Warn about ignored or unsupported input (prints once per unique message)
///
/// # Example
/// ```
/// trellis_common::warning::warn_once("Render", "text ignored on void element <br>");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let entry = key(component, message);
    let mut guard = warned();
    let set = guard.get_or_insert_with(HashSet::new);
    let should_print = !set.contains(&entry);
    if should_print {
        if set.len() >= MAX_RECORDED_WARNINGS {
            set.clear();
        }
        let _ = set.insert(entry);
    }
    drop(guard);

    if should_print {
        eprintln!("{}", format!("[Trellis {component}] ⚠ {message}").yellow());
    }
}

/// Whether `warn_once` has already reported this message.
#[must_use]
pub fn has_warned(component: &str, message: &str) -> bool {
    warned()
        .as_ref()
        .is_some_and(|set| set.contains(&key(component, message)))
}

/// Number of distinct messages currently remembered.
#[must_use]
pub fn recorded_warnings() -> usize {
    warned().as_ref().map_or(0, HashSet::len)
}

/// Clear all recorded warnings
pub fn clear_warnings() {
    let mut guard = warned();
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}
