//! Foreign-language bindings for mobile clients.

pub mod errors;
pub mod logging;
pub mod objects;
pub mod session;

use crate::catalog::{InMemoryCatalog, WorkoutCatalog};
use objects::WorkoutRecord;

#[uniffi::export]
pub fn builtin_workouts() -> Vec<WorkoutRecord> {
    InMemoryCatalog::builtin()
        .workouts()
        .iter()
        .map(WorkoutRecord::from)
        .collect()
}
