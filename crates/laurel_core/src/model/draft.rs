//! Score draft domain model.
//!
//! # Responsibility
//! - Define the locally persisted, not-yet-confirmed-synced unit of judge
//!   scoring work.
//!
//! # Invariants
//! - At most one draft exists per application id; a new save overwrites the
//!   prior draft (last-write-wins, no merge).
//! - `synced` flips to true only on acknowledged remote acceptance.

use crate::model::rubric::RubricScores;
use serde::{Deserialize, Serialize};

/// Locally persisted rubric scores for one application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreDraft {
    /// Identifier of the application being scored.
    pub application_id: String,
    /// The six rubric values as last edited.
    pub scores: RubricScores,
    /// Unix epoch milliseconds of the last local write.
    pub saved_at: i64,
    /// True once the remote service has accepted this draft.
    pub synced: bool,
}

impl ScoreDraft {
    /// Creates an unsynced draft stamped with the provided write time.
    pub fn new(application_id: impl Into<String>, scores: RubricScores, saved_at: i64) -> Self {
        Self {
            application_id: application_id.into(),
            scores,
            saved_at,
            synced: false,
        }
    }

    /// Marks this draft as accepted by the remote service.
    pub fn mark_synced(&mut self) {
        self.synced = true;
    }

    /// Returns whether this draft still needs to reach the remote service.
    pub fn is_pending(&self) -> bool {
        !self.synced
    }
}
