//! Consumed application record shapes.
//!
//! The application-listing and detail API is an external collaborator; core
//! only consumes its already-shaped records for the review flow.

use serde::{Deserialize, Serialize};

/// Upstream review status of an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Submitted,
    UnderReview,
    Scored,
}

/// One application row as supplied by the listing API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSummary {
    /// Upstream application identifier.
    pub id: String,
    pub business_name: String,
    pub category: String,
    pub sector: String,
    pub status: ApplicationStatus,
    /// Present once at least one score has been recorded upstream.
    pub score: Option<u32>,
}
