//! Candidate error types.

use thiserror::Error;
use uuid::Uuid;

use crate::attachment::AttachmentError;

/// Candidate operation errors.
#[derive(Debug, Error)]
pub enum CandidateError {
    /// Candidate not found.
    #[error("candidate not found: {0}")]
    NotFound(Uuid),

    /// Full name missing or blank.
    #[error("full_name must not be empty")]
    MissingFullName,

    /// Graduation year before the accepted minimum.
    #[error("graduation_year must be 1900 or later, got {0}")]
    GraduationYearTooEarly(i32),

    /// Negative years of experience.
    #[error("experience_years must be zero or greater, got {0}")]
    NegativeExperience(i32),

    /// Resume storage failed.
    #[error("attachment error: {0}")]
    Attachment(#[from] AttachmentError),
}

impl CandidateError {
    /// Create a not found error.
    #[must_use]
    pub fn not_found(id: Uuid) -> Self {
        Self::NotFound(id)
    }

    /// True if this error is a validation failure on client input.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingFullName | Self::GraduationYearTooEarly(_) | Self::NegativeExperience(_)
        )
    }
}
