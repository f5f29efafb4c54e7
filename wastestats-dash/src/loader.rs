//! Stale-response guard for overlapping loads
//!
//! Fetches are asynchronous and may race: when a second load is issued while
//! the first is in flight, only the most recently issued load may apply its
//! result. Pages take a [`LoadTicket`] before fetching and check it is still
//! current before touching state, so a slow stale response can never
//! overwrite a fresh one.

use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

/// Monotonic sequence of issued loads for one piece of state.
#[derive(Debug, Default)]
pub struct LoadSequence {
    issued: AtomicU64,
}

/// Proof of which load a fetch belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    seq: u64,
}

impl LoadSequence {
    /// Creates a sequence with no loads issued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues the next load, invalidating every earlier ticket.
    pub fn issue(&self) -> LoadTicket {
        let seq = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        LoadTicket { seq }
    }

    /// Whether the ticket still belongs to the latest issued load.
    pub fn is_current(&self, ticket: &LoadTicket) -> bool {
        self.issued.load(Ordering::SeqCst) == ticket.seq
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_ticket_stays_current() {
        let loads = LoadSequence::new();
        let ticket = loads.issue();
        assert!(loads.is_current(&ticket));
    }

    #[test]
    fn test_newer_issue_invalidates_older_tickets() {
        let loads = LoadSequence::new();
        let first = loads.issue();
        let second = loads.issue();

        assert!(!loads.is_current(&first));
        assert!(loads.is_current(&second));

        let third = loads.issue();
        assert!(!loads.is_current(&second));
        assert!(loads.is_current(&third));
    }
}
