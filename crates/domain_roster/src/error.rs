//! Roster domain errors

use core_kernel::ParticipantId;
use thiserror::Error;

/// Errors that can occur in the roster domain
#[derive(Debug, Error)]
pub enum RosterError {
    /// Participant not found
    #[error("Participant not found: {0}")]
    NotFound(ParticipantId),

    /// Participant id already registered
    #[error("Participant already registered: {0}")]
    DuplicateId(ParticipantId),

    /// Participant data failed validation
    #[error("Invalid participant: {0}")]
    Validation(String),
}

impl From<validator::ValidationErrors> for RosterError {
    fn from(errors: validator::ValidationErrors) -> Self {
        RosterError::Validation(errors.to_string())
    }
}
