//! Judging use-case service.
//!
//! # Responsibility
//! - Provide the judge-facing entry points over the offline store: draft
//!   persistence, conflict declaration, scoring-flow glue and teardown.
//!
//! # Invariants
//! - Service APIs never bypass repository persistence contracts.
//! - Service layer remains storage-agnostic (generic over the repository).
//! - Conflict details are summarized before they reach log output.

use crate::flow::review::{FlowError, ReviewFlow, ScoreSubmission};
use crate::model::conflict::{ConflictDeclaration, ConflictType};
use crate::model::draft::ScoreDraft;
use crate::repo::offline_repo::{
    now_epoch_ms, OfflineRepository, StorageInfo, StoreError, StoreResult,
};
use crate::sync::queue::SyncQueueEntry;
use log::info;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

const MAX_DETAILS_SUMMARY_CHARS: usize = 120;

/// Service error for judging use-cases.
#[derive(Debug)]
pub enum JudgingServiceError {
    /// Rejected flow transition or edit.
    Flow(FlowError),
    /// Persistence-layer failure.
    Store(StoreError),
}

impl Display for JudgingServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Flow(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for JudgingServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Flow(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<FlowError> for JudgingServiceError {
    fn from(value: FlowError) -> Self {
        Self::Flow(value)
    }
}

impl From<StoreError> for JudgingServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Judging service facade over repository implementations.
pub struct JudgingService<R: OfflineRepository> {
    repo: R,
}

impl<R: OfflineRepository> JudgingService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Persists the current scoring buffer as the draft for the selected
    /// application. This is the explicit mid-scoring save action; slider
    /// edits themselves never touch storage.
    pub fn record_scores(&self, flow: &ReviewFlow) -> Result<ScoreDraft, JudgingServiceError> {
        let application = flow.selected().ok_or(FlowError::InvalidStage {
            action: "save a draft",
            stage: flow.stage(),
        })?;
        Ok(self.repo.save_score_draft(&application.id, *flow.scores())?)
    }

    /// `review → scoring` with the rubric buffer initialized from any
    /// existing draft for the selected application.
    pub fn begin_scoring(&self, flow: &mut ReviewFlow) -> Result<(), JudgingServiceError> {
        let existing = match flow.selected() {
            Some(application) => self.repo.get_score_draft(&application.id)?,
            None => None,
        };
        flow.begin_scoring(existing.as_ref())?;
        Ok(())
    }

    /// Submits the scoring buffer: transitions the flow back to review and
    /// persists the submitted values so they are durably queued for sync.
    pub fn submit_score(
        &self,
        flow: &mut ReviewFlow,
    ) -> Result<ScoreSubmission, JudgingServiceError> {
        let submission = flow.submit()?;
        self.repo
            .save_score_draft(&submission.application_id, submission.scores)?;
        info!(
            "event=score_submit module=service status=ok application_id={} total={}",
            submission.application_id, submission.total
        );
        Ok(submission)
    }

    /// Records a conflict-of-interest declaration stamped with the current
    /// time, overwriting the single global slot.
    pub fn declare_conflict(
        &self,
        has_conflict: bool,
        conflict_type: Option<ConflictType>,
        details: &str,
    ) -> StoreResult<ConflictDeclaration> {
        let declaration =
            ConflictDeclaration::new(has_conflict, conflict_type, details, now_epoch_ms());
        info!(
            "event=conflict_declare module=service status=ok has_conflict={has_conflict} details={}",
            summarize_details(details)
        );
        self.repo.save_conflict_declaration(&declaration)
    }

    pub fn draft_for(&self, application_id: &str) -> StoreResult<Option<ScoreDraft>> {
        self.repo.get_score_draft(application_id)
    }

    pub fn conflict_declaration(&self) -> StoreResult<Option<ConflictDeclaration>> {
        self.repo.get_conflict_declaration()
    }

    /// Logout teardown: wipes drafts, declaration and queue atomically.
    pub fn clear_offline_data(&self) -> StoreResult<()> {
        self.repo.clear_all_offline_data()
    }

    pub fn storage_info(&self) -> StoreResult<StorageInfo> {
        self.repo.storage_info()
    }

    pub fn has_unsynced_items(&self) -> StoreResult<bool> {
        self.repo.has_unsynced_items()
    }

    pub fn unsynced_scores_count(&self) -> StoreResult<u32> {
        self.repo.unsynced_scores_count()
    }

    pub fn pending_entries(&self) -> StoreResult<Vec<SyncQueueEntry>> {
        self.repo.pending_entries()
    }

    /// Borrow of the underlying repository, for the synchronizer.
    pub fn repo(&self) -> &R {
        &self.repo
    }
}

/// Collapses whitespace and caps length so free text stays log-safe.
pub(crate) fn summarize_details(details: &str) -> String {
    let collapsed = WHITESPACE_RE.replace_all(details.trim(), " ");
    let mut summary = collapsed.chars().take(MAX_DETAILS_SUMMARY_CHARS).collect::<String>();
    if collapsed.chars().count() > MAX_DETAILS_SUMMARY_CHARS {
        summary.push_str("...");
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::summarize_details;

    #[test]
    fn summarize_details_collapses_whitespace() {
        assert_eq!(
            summarize_details("  co-owned   a\nbusiness\twith applicant "),
            "co-owned a business with applicant"
        );
    }

    #[test]
    fn summarize_details_truncates_long_text() {
        let long = "x".repeat(400);
        let summary = summarize_details(&long);
        assert_eq!(summary.chars().count(), 123);
        assert!(summary.ends_with("..."));
    }
}
