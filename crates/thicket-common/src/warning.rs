//! Parser warnings with colored terminal output.
//!
//! Provides deduplication to avoid spamming the same warning multiple times.
//! Used by the tree builder to report markup it had to repair.
//!
//! Output can be silenced with [`set_warnings_enabled`] or by setting the
//! `THICKET_QUIET` environment variable to anything other than `0`.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, OnceLock, PoisonError};

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Explicit override set through [`set_warnings_enabled`].
static OVERRIDE: OnceLock<AtomicBool> = OnceLock::new();

/// Name of the environment variable that silences warnings.
pub const QUIET_ENV_VAR: &str = "THICKET_QUIET";

fn enabled_flag() -> &'static AtomicBool {
    OVERRIDE.get_or_init(|| {
        let quiet = std::env::var(QUIET_ENV_VAR).is_ok_and(|v| v != "0");
        AtomicBool::new(!quiet)
    })
}

/// Returns true if warnings are currently printed.
#[must_use]
pub fn warnings_enabled() -> bool {
    enabled_flag().load(Ordering::Relaxed)
}

/// Turn warning output on or off for the whole process.
pub fn set_warnings_enabled(enabled: bool) {
    enabled_flag().store(enabled, Ordering::Relaxed);
}

/// Warn about repaired or dropped markup (prints once per unique message).
///
/// # Example
/// ```ignore
/// warn_once("Tree Builder", "ignoring unmatched close tag </span>");
/// ```
pub fn warn_once(component: &str, message: &str) {
    if record(component, message) && warnings_enabled() {
        let line = format!("[Thicket {component}] ⚠ {message}");
        eprintln!("{}", line.yellow());
    }
}

/// Remember a warning. Returns true if it had not been seen before.
fn record(component: &str, message: &str) -> bool {
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(format!("[{component}] {message}"))
}

/// Clear all recorded warnings (call before parsing an unrelated document)
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}
