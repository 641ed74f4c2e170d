//! Domain models for the judging flow.
//!
//! # Responsibility
//! - Define the persisted/wire shapes for drafts, declarations and the
//!   application records a judge reviews.
//!
//! # Invariants
//! - Wire field naming is camelCase to match the external portal schema.

pub mod application;
pub mod conflict;
pub mod draft;
pub mod rubric;
