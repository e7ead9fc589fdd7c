use crate::catalog::{ExerciseDefinition, WorkoutDefinition};
use crate::db::StoredSummary;
use crate::session::{SessionPhase, SessionSummary, SetEntry, WorkoutSession};

#[derive(Debug, Clone, uniffi::Record)]
pub struct ExerciseRecord {
    pub id: i64,
    pub name: String,
    pub target_sets: u32,
    pub rest_seconds: u32,
    pub target_reps: Option<String>,
    pub instructions: Option<String>,
    pub modifications: Option<String>,
    pub equipment: Option<String>,
    pub muscle_group: Option<String>,
}

impl From<&ExerciseDefinition> for ExerciseRecord {
    fn from(e: &ExerciseDefinition) -> Self {
        ExerciseRecord {
            id: e.id,
            name: e.name.clone(),
            target_sets: e.target_sets,
            rest_seconds: e.rest_seconds,
            target_reps: e.target_reps.clone(),
            instructions: e.instructions.clone(),
            modifications: e.modifications.clone(),
            equipment: e.equipment.clone(),
            muscle_group: e.muscle_group.clone(),
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct WorkoutRecord {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub exercises: Vec<ExerciseRecord>,
}

impl From<&WorkoutDefinition> for WorkoutRecord {
    fn from(w: &WorkoutDefinition) -> Self {
        WorkoutRecord {
            id: w.id,
            name: w.name.clone(),
            description: w.description.clone(),
            exercises: w.exercises.iter().map(ExerciseRecord::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum Phase {
    NotStarted,
    InProgress,
    Completed,
}

impl From<SessionPhase> for Phase {
    fn from(p: SessionPhase) -> Self {
        match p {
            SessionPhase::NotStarted => Phase::NotStarted,
            SessionPhase::InProgress => Phase::InProgress,
            SessionPhase::Completed => Phase::Completed,
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct SetRecord {
    pub weight: Option<f64>,
    pub reps: Option<u32>,
    pub completed: bool,
}

impl From<&SetEntry> for SetRecord {
    fn from(s: &SetEntry) -> Self {
        SetRecord {
            weight: s.weight,
            reps: s.reps,
            completed: s.completed,
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct ExerciseProgressRecord {
    pub exercise_id: i64,
    pub completed: bool,
    pub sets: Vec<SetRecord>,
}

/// Everything a client needs to draw the session screen.
#[derive(Debug, Clone, uniffi::Record)]
pub struct SessionSnapshot {
    pub session_id: String,
    pub workout_id: i64,
    pub phase: Phase,
    pub exercise_index: u32,
    pub set_number: u32,
    pub elapsed_seconds: u64,
    pub rest_seconds_remaining: u32,
    pub is_resting: bool,
    pub is_complete: bool,
    pub progress: Vec<ExerciseProgressRecord>,
}

impl From<&WorkoutSession> for SessionSnapshot {
    fn from(s: &WorkoutSession) -> Self {
        let progress = s
            .definition()
            .exercises
            .iter()
            .filter_map(|e| {
                s.progress(e.id).map(|p| ExerciseProgressRecord {
                    exercise_id: e.id,
                    completed: p.completed,
                    sets: p.sets.iter().map(SetRecord::from).collect(),
                })
            })
            .collect();

        SessionSnapshot {
            session_id: s.id().to_string(),
            workout_id: s.definition().id,
            phase: s.phase().into(),
            exercise_index: u32::try_from(s.exercise_index()).unwrap_or(u32::MAX),
            set_number: s.set_number(),
            elapsed_seconds: s.elapsed_seconds(),
            rest_seconds_remaining: s.timer().active_rest_seconds(),
            is_resting: s.timer().is_resting(),
            is_complete: s.is_session_complete(),
            progress,
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct LoggedSetRecord {
    pub weight: Option<f64>,
    pub reps: Option<u32>,
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct ExerciseSummaryRecord {
    pub exercise_id: i64,
    pub exercise_name: String,
    pub sets: Vec<LoggedSetRecord>,
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct SummaryRecord {
    pub stored_id: Option<i64>,
    pub session_id: String,
    pub workout_id: i64,
    pub workout_name: String,
    pub started_at: Option<String>,
    pub total_duration_seconds: u64,
    pub duration_display: String,
    pub total_volume: f64,
    pub per_exercise: Vec<ExerciseSummaryRecord>,
    pub notes: String,
}

impl From<&SessionSummary> for SummaryRecord {
    fn from(s: &SessionSummary) -> Self {
        SummaryRecord {
            stored_id: None,
            session_id: s.session_id.to_string(),
            workout_id: s.workout_id,
            workout_name: s.workout_name.clone(),
            started_at: s
                .started_at
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string()),
            total_duration_seconds: s.total_duration_seconds,
            duration_display: s.duration_display(),
            total_volume: s.total_volume(),
            per_exercise: s
                .per_exercise
                .iter()
                .map(|e| ExerciseSummaryRecord {
                    exercise_id: e.exercise_id,
                    exercise_name: e.exercise_name.clone(),
                    sets: e
                        .sets
                        .iter()
                        .map(|set| LoggedSetRecord {
                            weight: set.weight,
                            reps: set.reps,
                        })
                        .collect(),
                })
                .collect(),
            notes: s.notes.clone(),
        }
    }
}

impl From<&StoredSummary> for SummaryRecord {
    fn from(s: &StoredSummary) -> Self {
        SummaryRecord {
            stored_id: Some(s.id),
            ..SummaryRecord::from(&s.summary)
        }
    }
}
