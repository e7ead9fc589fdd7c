//! Session module for running a single workout.
//!
//! This module provides the `WorkoutSession` state machine that tracks the
//! exercise/set cursor, logged set values, the rest timer and the overall
//! session clock for one workout definition.

mod error;
mod progress;
mod session;
mod sets;
mod summary;
mod timer;

pub use error::SessionError;
pub use progress::{ExerciseProgress, SetEntry};
pub use session::{SessionPhase, WorkoutSession};
pub use summary::{ExerciseSummary, LoggedSet, SessionSummary, format_clock};
pub use timer::RestTimer;
