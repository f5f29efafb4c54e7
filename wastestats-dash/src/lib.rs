//! Dashboard state for the WasteStats frontend
//!
//! Presentation-free view models for the waste-statistics dashboard: the
//! sortable results table, the page state machines (landing, comparison,
//! similarity), the transient error banner, and the stale-response guard for
//! overlapping loads. The host environment supplies rendering and wires user
//! input back into these types; nothing here knows about markup or terminals.

pub mod banner;
pub mod loader;
pub mod pages;
pub mod table;

/// Locks a mutex, recovering the guard if a panicking thread poisoned it.
pub(crate) fn lock<T>(mutex: &std::sync::Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}
