//! Request sequencing for fetch-and-replace views.
//!
//! Changing a filter issues a new request while older ones may still be in
//! flight. Each request takes a [`Ticket`]; only the response for the most
//! recently issued ticket is applied.

use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Issues monotonically increasing tickets.
#[derive(Debug, Default)]
pub struct Sequencer {
    latest: AtomicU64,
}

impl Sequencer {
    /// Creates a sequencer with no tickets issued.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            latest: AtomicU64::new(0),
        }
    }

    /// Issues a new ticket, superseding all earlier ones.
    pub fn issue(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `ticket` is the most recently issued one.
    #[must_use]
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// Passes `value` through if `ticket` is still current, otherwise
    /// drops it.
    pub fn accept<T>(&self, ticket: Ticket, value: T) -> Option<T> {
        if self.is_current(ticket) {
            Some(value)
        } else {
            log::debug!(
                "Dropping stale response for request #{} (latest #{})",
                ticket.0,
                self.latest.load(Ordering::SeqCst)
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_latest_ticket_is_accepted() {
        let seq = Sequencer::new();
        let first = seq.issue();
        let second = seq.issue();
        assert!(first < second);

        // The older response arrives last and must not overwrite.
        assert_eq!(seq.accept(second, "district 2"), Some("district 2"));
        assert_eq!(seq.accept(first, "district 1"), None);
    }

    #[test]
    fn single_request_is_current() {
        let seq = Sequencer::new();
        let t = seq.issue();
        assert!(seq.is_current(t));
        assert_eq!(seq.accept(t, 7), Some(7));
    }
}
