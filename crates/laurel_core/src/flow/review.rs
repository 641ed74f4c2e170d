//! Review/scoring flow state machine.
//!
//! # Responsibility
//! - Track which application a judge is looking at and the stage they are
//!   in (`list` → `review` → `scoring` → back to `review` on submit).
//! - Hold the in-progress rubric values and free-text comments while
//!   scoring.
//!
//! # Invariants
//! - Rubric edits clamp to the per-dimension cap (slider min/max only; no
//!   cross-field validation).
//! - Submit computes the six-dimension total and returns to `review`; no
//!   terminal locked state exists for a submitted score.

use crate::model::application::ApplicationSummary;
use crate::model::draft::ScoreDraft;
use crate::model::rubric::{RubricDimension, RubricScores};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Navigation stage of the judge flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReviewStage {
    #[default]
    List,
    Review,
    Scoring,
}

impl ReviewStage {
    fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Review => "review",
            Self::Scoring => "scoring",
        }
    }
}

/// Rejected flow transition or edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    /// The action requires a different stage than the current one.
    InvalidStage {
        action: &'static str,
        stage: ReviewStage,
    },
}

impl Display for FlowError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidStage { action, stage } => {
                write!(f, "cannot {action} while in `{}` stage", stage.as_str())
            }
        }
    }
}

impl Error for FlowError {}

/// Confirmation summary produced by a submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreSubmission {
    pub application_id: String,
    pub scores: RubricScores,
    /// Sum of the six rubric values at submit time.
    pub total: u32,
    pub comments: String,
}

/// In-memory state machine for one judge's review session.
#[derive(Debug, Default)]
pub struct ReviewFlow {
    stage: ReviewStage,
    selected: Option<ApplicationSummary>,
    scores: RubricScores,
    comments: String,
}

impl ReviewFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> ReviewStage {
        self.stage
    }

    /// The application currently under review, if any.
    pub fn selected(&self) -> Option<&ApplicationSummary> {
        self.selected.as_ref()
    }

    /// Current scoring buffer.
    pub fn scores(&self) -> &RubricScores {
        &self.scores
    }

    pub fn comments(&self) -> &str {
        &self.comments
    }

    /// `list → review`: loads the selected application into flow state.
    ///
    /// Does not touch the draft store.
    pub fn select_application(
        &mut self,
        application: ApplicationSummary,
    ) -> Result<(), FlowError> {
        if self.stage != ReviewStage::List {
            return Err(FlowError::InvalidStage {
                action: "select an application",
                stage: self.stage,
            });
        }
        self.selected = Some(application);
        self.stage = ReviewStage::Review;
        Ok(())
    }

    /// `review → scoring`: initializes the rubric buffer from an existing
    /// draft when one is provided, else zeros. Clears the comments buffer.
    pub fn begin_scoring(&mut self, existing: Option<&ScoreDraft>) -> Result<(), FlowError> {
        if self.stage != ReviewStage::Review {
            return Err(FlowError::InvalidStage {
                action: "begin scoring",
                stage: self.stage,
            });
        }
        self.scores = existing.map(|draft| draft.scores).unwrap_or_default();
        self.comments.clear();
        self.stage = ReviewStage::Scoring;
        Ok(())
    }

    /// Immediate in-memory rubric edit, clamped to the dimension cap.
    ///
    /// Returns the applied value.
    pub fn set_score(&mut self, dimension: RubricDimension, value: u8) -> Result<u8, FlowError> {
        if self.stage != ReviewStage::Scoring {
            return Err(FlowError::InvalidStage {
                action: "edit a rubric value",
                stage: self.stage,
            });
        }
        Ok(self.scores.set_clamped(dimension, value))
    }

    /// Immediate in-memory comments edit.
    pub fn set_comments(&mut self, text: impl Into<String>) -> Result<(), FlowError> {
        if self.stage != ReviewStage::Scoring {
            return Err(FlowError::InvalidStage {
                action: "edit comments",
                stage: self.stage,
            });
        }
        self.comments = text.into();
        Ok(())
    }

    /// `scoring → review`: computes the total for confirmation display and
    /// returns to review. The buffer is left intact for re-entry.
    pub fn submit(&mut self) -> Result<ScoreSubmission, FlowError> {
        if self.stage != ReviewStage::Scoring {
            return Err(FlowError::InvalidStage {
                action: "submit a score",
                stage: self.stage,
            });
        }
        let application_id = match &self.selected {
            Some(application) => application.id.clone(),
            // Scoring is only reachable through a selection; treat a missing
            // one as a stage violation rather than panicking.
            None => {
                return Err(FlowError::InvalidStage {
                    action: "submit a score",
                    stage: self.stage,
                })
            }
        };

        let submission = ScoreSubmission {
            application_id,
            scores: self.scores,
            total: self.scores.total(),
            comments: self.comments.clone(),
        };
        self.stage = ReviewStage::Review;
        Ok(submission)
    }

    /// Returns to the list, clearing the selection and buffers.
    pub fn back_to_list(&mut self) {
        self.selected = None;
        self.scores = RubricScores::default();
        self.comments.clear();
        self.stage = ReviewStage::List;
    }
}
