//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Confidence must be between 0 and 100, got {0}")]
    InvalidConfidence(i64),

    #[error("Consultation text cannot be empty")]
    EmptyText,

    #[error("Invalid consultation transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },
}
