//! Conflict-of-interest declaration model.
//!
//! # Responsibility
//! - Define a judge's disclosure that they should not review a business.
//!
//! # Invariants
//! - One global declaration slot per judge session; a new declaration
//!   overwrites the prior one.
//! - `conflict_type` is absent when no conflict is declared.

use serde::{Deserialize, Serialize};

/// Closed set of declarable conflict relationships.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictType {
    Personal,
    Business,
    Financial,
    Family,
    Other,
}

/// A judge's conflict-of-interest disclosure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictDeclaration {
    /// Whether the judge declares any conflict at all.
    pub has_conflict: bool,
    /// Relationship category; `None` when no conflict is declared.
    pub conflict_type: Option<ConflictType>,
    /// Free-text explanation provided by the judge.
    pub details: String,
    /// Unix epoch milliseconds of the declaration.
    pub declared_at: i64,
    /// True once the remote service has accepted this declaration.
    pub synced: bool,
}

impl ConflictDeclaration {
    /// Creates an unsynced declaration stamped with the provided time.
    pub fn new(
        has_conflict: bool,
        conflict_type: Option<ConflictType>,
        details: impl Into<String>,
        declared_at: i64,
    ) -> Self {
        Self {
            has_conflict,
            conflict_type,
            details: details.into(),
            declared_at,
            synced: false,
        }
    }

    /// Creates the explicit "no conflict" declaration.
    pub fn none(declared_at: i64) -> Self {
        Self::new(false, None, "", declared_at)
    }

    /// Marks this declaration as accepted by the remote service.
    pub fn mark_synced(&mut self) {
        self.synced = true;
    }
}
