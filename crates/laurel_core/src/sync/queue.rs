//! Pending-sync queue model.
//!
//! # Responsibility
//! - Order the (kind, refId) references still awaiting remote delivery,
//!   independent of the drafts' own content.
//!
//! # Invariants
//! - At most one entry per (kind, refId) pair; re-queuing replaces.
//! - Replacement appends, so the most recently modified pair sits last
//!   (last-write-wins by recency rather than strict FIFO).

use serde::{Deserialize, Serialize};

/// Queue reference used for the single global conflict-declaration slot.
pub const CONFLICT_REF_ID: &str = "conflict_declaration";

/// Which draft family a queue entry refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncKind {
    Score,
    Conflict,
}

/// One pending-sync reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncQueueEntry {
    pub kind: SyncKind,
    /// Application id for score entries, [`CONFLICT_REF_ID`] for conflict
    /// entries.
    pub ref_id: String,
    /// Unix epoch milliseconds when the pair was (re-)queued.
    pub queued_at: i64,
}

/// Ordered pending-sync set, serialized wholesale as one JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SyncQueue {
    entries: Vec<SyncQueueEntry>,
}

impl SyncQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry for a (kind, refId) pair.
    ///
    /// Any existing entry with the same pair is removed first, then the new
    /// entry is appended.
    pub fn enqueue(&mut self, kind: SyncKind, ref_id: impl Into<String>, queued_at: i64) {
        let ref_id = ref_id.into();
        self.entries
            .retain(|entry| !(entry.kind == kind && entry.ref_id == ref_id));
        self.entries.push(SyncQueueEntry {
            kind,
            ref_id,
            queued_at,
        });
    }

    /// Removes the entry for a (kind, refId) pair.
    ///
    /// Returns whether an entry was present. Removing an absent pair is a
    /// no-op, matching the idempotent mark-synced contract.
    pub fn dequeue(&mut self, kind: SyncKind, ref_id: &str) -> bool {
        let before = self.entries.len();
        self.entries
            .retain(|entry| !(entry.kind == kind && entry.ref_id == ref_id));
        self.entries.len() != before
    }

    pub fn contains(&self, kind: SyncKind, ref_id: &str) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.kind == kind && entry.ref_id == ref_id)
    }

    /// Entries in stored order.
    pub fn entries(&self) -> &[SyncQueueEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of queued score entries.
    pub fn score_count(&self) -> u32 {
        self.entries
            .iter()
            .filter(|entry| entry.kind == SyncKind::Score)
            .count() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::{SyncKind, SyncQueue, CONFLICT_REF_ID};

    #[test]
    fn enqueue_replaces_pair_and_moves_it_to_tail() {
        let mut queue = SyncQueue::new();
        queue.enqueue(SyncKind::Score, "A1", 100);
        queue.enqueue(SyncKind::Score, "A2", 200);
        queue.enqueue(SyncKind::Score, "A1", 300);

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.entries()[0].ref_id, "A2");
        assert_eq!(queue.entries()[1].ref_id, "A1");
        assert_eq!(queue.entries()[1].queued_at, 300);
    }

    #[test]
    fn score_and_conflict_pairs_do_not_collide() {
        let mut queue = SyncQueue::new();
        queue.enqueue(SyncKind::Score, CONFLICT_REF_ID, 100);
        queue.enqueue(SyncKind::Conflict, CONFLICT_REF_ID, 200);

        assert_eq!(queue.len(), 2);
        assert!(queue.contains(SyncKind::Score, CONFLICT_REF_ID));
        assert!(queue.contains(SyncKind::Conflict, CONFLICT_REF_ID));
    }

    #[test]
    fn dequeue_removes_only_the_named_pair_and_is_idempotent() {
        let mut queue = SyncQueue::new();
        queue.enqueue(SyncKind::Score, "A1", 100);
        queue.enqueue(SyncKind::Conflict, CONFLICT_REF_ID, 200);

        assert!(queue.dequeue(SyncKind::Score, "A1"));
        assert!(!queue.dequeue(SyncKind::Score, "A1"));
        assert_eq!(queue.len(), 1);
        assert!(queue.contains(SyncKind::Conflict, CONFLICT_REF_ID));
    }

    #[test]
    fn score_count_ignores_conflict_entries() {
        let mut queue = SyncQueue::new();
        queue.enqueue(SyncKind::Score, "A1", 100);
        queue.enqueue(SyncKind::Score, "A2", 100);
        queue.enqueue(SyncKind::Conflict, CONFLICT_REF_ID, 100);

        assert_eq!(queue.score_count(), 2);
    }
}
