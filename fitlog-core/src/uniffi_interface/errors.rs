use thiserror::Error as ThisError;
use uniffi::Error;

use crate::session::SessionError;

#[derive(Debug, ThisError, Error)]
#[uniffi(flat_error)]
#[non_exhaustive]
pub enum FitlogError {
    #[error("invalid workout definition: {0}")]
    InvalidDefinition(String),
    #[error("no set {set_index} for exercise {exercise_id}")]
    InvalidSet { exercise_id: i64, set_index: u32 },
    #[error("workout is not ready to complete")]
    NotReady,
    #[error("operation not allowed while the session is {0}")]
    InvalidPhase(String),
    #[error("error: {0}")]
    Common(String),
}

impl From<SessionError> for FitlogError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::InvalidDefinition(msg) => FitlogError::InvalidDefinition(msg),
            SessionError::InvalidSet {
                exercise_id,
                set_index,
            } => FitlogError::InvalidSet {
                exercise_id,
                set_index: u32::try_from(set_index).unwrap_or(u32::MAX),
            },
            SessionError::NotReady => FitlogError::NotReady,
            SessionError::InvalidPhase(phase) => FitlogError::InvalidPhase(phase.to_string()),
        }
    }
}

impl From<anyhow::Error> for FitlogError {
    fn from(e: anyhow::Error) -> Self {
        FitlogError::Common(e.to_string())
    }
}

impl From<&str> for FitlogError {
    fn from(s: &str) -> Self {
        FitlogError::Common(s.to_string())
    }
}
