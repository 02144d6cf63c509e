use std::sync::atomic::{AtomicU64, Ordering};

use crate::models::{QueryCategory, Ticket};

/// Monotonic sequence numbers per query category
///
/// Each issued request takes a ticket; a response is only current while its
/// ticket is the latest one issued for its category.
#[derive(Debug, Default)]
pub struct SequenceTracker {
    latest: [AtomicU64; QueryCategory::COUNT],
}

impl SequenceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self, category: QueryCategory) -> Ticket {
        let seq = self.latest[category.index()].fetch_add(1, Ordering::SeqCst) + 1;
        Ticket { category, seq }
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest[ticket.category.index()].load(Ordering::SeqCst) == ticket.seq
    }
}
