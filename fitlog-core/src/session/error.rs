use thiserror::Error;

use super::SessionPhase;
use crate::catalog::ExerciseId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("invalid workout definition: {0}")]
    InvalidDefinition(String),
    #[error("no set {set_index} for exercise {exercise_id}")]
    InvalidSet {
        exercise_id: ExerciseId,
        set_index: usize,
    },
    #[error("workout is not ready to complete, some sets are not logged")]
    NotReady,
    #[error("operation not allowed while the session is {0}")]
    InvalidPhase(SessionPhase),
}
