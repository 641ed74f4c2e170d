//! Core domain logic for Laurel, the regional small-business awards portal.
//! This crate is the single source of truth for judging-flow invariants.

pub mod db;
pub mod flow;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod sync;

pub use flow::review::{FlowError, ReviewFlow, ReviewStage, ScoreSubmission};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::application::{ApplicationStatus, ApplicationSummary};
pub use model::conflict::{ConflictDeclaration, ConflictType};
pub use model::draft::ScoreDraft;
pub use model::rubric::{RubricDimension, RubricScores, RUBRIC_TOTAL_MAX};
pub use repo::offline_repo::{
    now_epoch_ms, OfflineRepository, SqliteOfflineRepository, StorageInfo, StoreError,
    StoreResult, OFFLINE_CAPACITY_BYTES,
};
pub use service::judging_service::{JudgingService, JudgingServiceError};
pub use sync::queue::{SyncKind, SyncQueue, SyncQueueEntry, CONFLICT_REF_ID};
pub use sync::synchronizer::{SyncReport, Synchronizer};
pub use sync::transport::{ConnectivityProbe, SyncTransport, TransportError, TransportResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
