//! Grader Error Types
//!
//! This module defines the [`GraderError`] enum, which covers every failure the grading
//! pipeline can surface to its caller.
//!
//! Only [`GraderError::Read`] and [`GraderError::Decode`] abort a run. Classification misses
//! are never errors, and [`GraderError::Transmit`] is only produced on the strict submission
//! path; the best-effort dispatch turns it into a logged outcome instead.
//!
//! # Example
//!
//! ```rust
//! use grader::error::GraderError;
//!
//! fn require_totals(tests: Option<u32>) -> Result<u32, GraderError> {
//!     tests.ok_or_else(|| GraderError::Decode("missing 'tests' attribute".to_string()))
//! }
//! ```

use thiserror::Error;

/// Represents all error types that can occur in the grading pipeline.
#[derive(Debug, Error)]
pub enum GraderError {
    /// The report artifact is missing, not a regular file, too large or unreadable.
    #[error("failed to read test report: {0}")]
    Read(String),
    /// The report artifact is not well-formed or lacks the run-level totals.
    #[error("failed to decode test report: {0}")]
    Decode(String),
    /// The score catalog could not be loaded or violates its invariants.
    #[error("invalid score catalog: {0}")]
    Catalog(String),
    /// The grading report could not be serialized.
    #[error("failed to serialize grading report: {0}")]
    Serialize(#[from] serde_json::Error),
    /// The grading service could not be reached or rejected the payload.
    #[error("failed to transmit grading report: {0}")]
    Transmit(String),
}

impl GraderError {
    /// Whether this error ends the run before a report is built.
    pub fn is_fatal(&self) -> bool {
        matches!(self, GraderError::Read(_) | GraderError::Decode(_) | GraderError::Catalog(_))
    }
}
