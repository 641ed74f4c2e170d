//! Pending-sync tracking and opportunistic remote flushing.
//!
//! # Responsibility
//! - Track which drafts still need to reach the remote service.
//! - Flush the queue when connectivity is present, one attempt per entry.
//!
//! # Invariants
//! - Queue entries are removed only by acknowledged sync success or an
//!   explicit store wipe, never by TTL or count limits.

pub mod queue;
pub mod synchronizer;
pub mod transport;
