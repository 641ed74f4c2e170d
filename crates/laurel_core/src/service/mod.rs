//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository and flow calls into use-case level APIs.
//! - Keep UI layers decoupled from storage details.

pub mod judging_service;
