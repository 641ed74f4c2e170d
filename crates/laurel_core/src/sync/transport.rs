//! Remote submission seam for the synchronizer.
//!
//! # Responsibility
//! - Abstract the remote award service behind a per-item push contract.
//! - Abstract connectivity detection behind a probe the caller controls.
//!
//! # Invariants
//! - Transport implementations report failure as data, never panic.

use crate::model::conflict::ConflictDeclaration;
use crate::model::draft::ScoreDraft;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type TransportResult<T> = Result<T, TransportError>;

/// Structured per-item failure reported by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError {
    /// Stable machine-readable code (`http_502`, `rejected`, ...).
    pub code: String,
    /// Human-readable message for the sync report.
    pub message: String,
    /// Whether a later retry of the same item can reasonably succeed.
    pub retryable: bool,
}

impl TransportError {
    pub fn new(code: impl Into<String>, message: impl Into<String>, retryable: bool) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            retryable,
        }
    }
}

impl Display for TransportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl Error for TransportError {}

/// Connectivity signal checked before any remote call is attempted.
pub trait ConnectivityProbe {
    fn is_online(&self) -> bool;
}

/// Per-item push contract against the remote award service.
///
/// The synchronizer treats each call as an opaque success/failure; request
/// shaping and authentication live behind this seam.
pub trait SyncTransport {
    /// Stable identifier used in sync report messages and log events.
    fn transport_id(&self) -> &str;

    fn push_score(&self, draft: &ScoreDraft) -> TransportResult<()>;

    fn push_conflict(&self, declaration: &ConflictDeclaration) -> TransportResult<()>;
}
