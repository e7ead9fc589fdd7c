//! Workout catalog: the static workout definitions a session runs against.
//!
//! Definitions are read-only once loaded. The engine only looks at exercise
//! ids, target set counts and rest durations; everything else is carried
//! along for display.

mod builtin;

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::session::SessionError;

pub type ExerciseId = i64;
pub type WorkoutId = i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseDefinition {
    pub id: ExerciseId,
    pub name: String,
    pub target_sets: u32,
    pub rest_seconds: u32,
    #[serde(default)]
    pub target_reps: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub modifications: Option<String>,
    #[serde(default)]
    pub equipment: Option<String>,
    #[serde(default)]
    pub muscle_group: Option<String>,
}

impl ExerciseDefinition {
    pub fn new(id: ExerciseId, name: &str, target_sets: u32, rest_seconds: u32) -> Self {
        Self {
            id,
            name: name.to_string(),
            target_sets,
            rest_seconds,
            target_reps: None,
            instructions: None,
            modifications: None,
            equipment: None,
            muscle_group: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutDefinition {
    pub id: WorkoutId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub exercises: Vec<ExerciseDefinition>,
}

impl WorkoutDefinition {
    pub fn new(id: WorkoutId, name: &str, exercises: Vec<ExerciseDefinition>) -> Self {
        Self {
            id,
            name: name.to_string(),
            description: None,
            exercises,
        }
    }

    /// Checks that a session can be run against this definition.
    ///
    /// A definition needs at least one exercise, every exercise needs at
    /// least one target set, and exercise ids must be unique since session
    /// progress is keyed by them.
    pub fn validate(&self) -> Result<(), SessionError> {
        if self.exercises.is_empty() {
            return Err(SessionError::InvalidDefinition(format!(
                "workout {} has no exercises",
                self.id
            )));
        }

        let mut seen = HashSet::with_capacity(self.exercises.len());
        for exercise in &self.exercises {
            if exercise.target_sets == 0 {
                return Err(SessionError::InvalidDefinition(format!(
                    "exercise {} ({}) has no target sets",
                    exercise.id, exercise.name
                )));
            }
            if !seen.insert(exercise.id) {
                return Err(SessionError::InvalidDefinition(format!(
                    "exercise id {} appears more than once",
                    exercise.id
                )));
            }
        }

        Ok(())
    }

    pub fn exercise(&self, exercise_id: ExerciseId) -> Option<&ExerciseDefinition> {
        self.exercises.iter().find(|e| e.id == exercise_id)
    }

    pub fn total_sets(&self) -> u32 {
        self.exercises.iter().map(|e| e.target_sets).sum()
    }
}

pub trait WorkoutCatalog {
    fn workout(&self, workout_id: WorkoutId) -> Option<&WorkoutDefinition>;
    fn workouts(&self) -> &[WorkoutDefinition];
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    workouts: Vec<WorkoutDefinition>,
}

impl InMemoryCatalog {
    pub fn new(workouts: Vec<WorkoutDefinition>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(workouts.len());
        for workout in &workouts {
            workout
                .validate()
                .with_context(|| format!("Invalid workout definition '{}'", workout.name))?;
            if !seen.insert(workout.id) {
                return Err(anyhow!("Duplicate workout id {} in catalog", workout.id));
            }
        }
        debug!("Catalog created with {} workouts", workouts.len());
        Ok(Self { workouts })
    }

    /// The three seated dumbbell workouts shipped with the app.
    pub fn builtin() -> Self {
        Self {
            workouts: builtin::workouts(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let workouts: Vec<WorkoutDefinition> =
            serde_json::from_str(json).context("Failed to parse workout catalog JSON")?;
        Self::new(workouts)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog {}", path.display()))?;
        let catalog = Self::from_json_str(&json)?;
        info!(
            "Loaded {} workouts from {}",
            catalog.workouts.len(),
            path.display()
        );
        Ok(catalog)
    }
}

impl WorkoutCatalog for InMemoryCatalog {
    fn workout(&self, workout_id: WorkoutId) -> Option<&WorkoutDefinition> {
        self.workouts.iter().find(|w| w.id == workout_id)
    }

    fn workouts(&self) -> &[WorkoutDefinition] {
        &self.workouts
    }
}
