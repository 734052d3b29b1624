//! Builder warnings with colored terminal output.
//!
//! Provides deduplication so a loop that keeps feeding a void element only
//! reports once. Used by the DOM and the builders to flag content that is
//! accepted but never rendered.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Record a warning and report whether it is new.
///
/// Returns `true` the first time a given `component`/`message` pair is seen.
fn record(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key)
}

/// Warn about accepted-but-unrendered content (prints once per unique message)
///
/// # Example
/// ```ignore
/// warn_once("DOM", "<img> is a void element; appended children are not rendered");
/// ```
pub fn warn_once(component: &str, message: &str) {
    if record(component, message) {
        let line = format!("[Trellis {component}] ⚠ {message}");
        eprintln!("{}", line.yellow());
    }
}

/// Clear all recorded warnings (call between independent renders)
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test: the warning set is process-global and tests run in parallel.
    #[test]
    fn test_record_deduplicates_until_cleared() {
        assert!(record("TEST-A", "first"));
        assert!(!record("TEST-A", "first"));
        assert!(record("TEST-B", "first"));

        clear_warnings();
        assert!(record("TEST-A", "first"));
    }
}
