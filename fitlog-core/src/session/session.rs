use std::collections::HashMap;
use std::fmt;

use chrono::{Local, NaiveDateTime};
use log::{debug, info};
use uuid::Uuid;

use crate::catalog::{ExerciseDefinition, ExerciseId, WorkoutDefinition};
use crate::session::{ExerciseProgress, RestTimer, SessionError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    NotStarted,
    InProgress,
    Completed,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionPhase::NotStarted => write!(f, "not started"),
            SessionPhase::InProgress => write!(f, "in progress"),
            SessionPhase::Completed => write!(f, "completed"),
        }
    }
}

/// State of one attempt at a workout definition.
///
/// The session owns its definition and progress outright; callers hold it
/// by `&mut` and serialize every call. Nothing here blocks or schedules:
/// the caller's clock drives `tick` once per second.
#[derive(Debug, Clone)]
pub struct WorkoutSession {
    pub(super) id: Uuid,
    pub(super) definition: WorkoutDefinition,
    pub(super) exercise_index: usize,
    pub(super) set_number: u32,
    pub(super) progress: HashMap<ExerciseId, ExerciseProgress>,
    pub(super) timer: RestTimer,
    pub(super) elapsed_seconds: u64,
    pub(super) phase: SessionPhase,
    pub(super) started_at: Option<NaiveDateTime>,
}

impl WorkoutSession {
    /// Validate a definition and build a session that has not begun yet.
    pub fn prepare(definition: WorkoutDefinition) -> Result<Self, SessionError> {
        definition.validate()?;

        let progress = definition
            .exercises
            .iter()
            .map(|e| (e.id, ExerciseProgress::new(e.target_sets)))
            .collect();

        let session = Self {
            id: Uuid::new_v4(),
            definition,
            exercise_index: 0,
            set_number: 1,
            progress,
            timer: RestTimer::default(),
            elapsed_seconds: 0,
            phase: SessionPhase::NotStarted,
            started_at: None,
        };
        debug!(
            "Prepared session {} for workout {} ({} exercises)",
            session.id,
            session.definition.id,
            session.definition.exercises.len()
        );
        Ok(session)
    }

    /// Prepare and immediately begin a session.
    pub fn start(definition: WorkoutDefinition) -> Result<Self, SessionError> {
        Self::start_at(definition, Local::now().naive_local())
    }

    pub fn start_at(
        definition: WorkoutDefinition,
        started_at: NaiveDateTime,
    ) -> Result<Self, SessionError> {
        let mut session = Self::prepare(definition)?;
        session.begin_at(started_at)?;
        Ok(session)
    }

    pub fn begin(&mut self) -> Result<(), SessionError> {
        self.begin_at(Local::now().naive_local())
    }

    pub fn begin_at(&mut self, started_at: NaiveDateTime) -> Result<(), SessionError> {
        if self.phase != SessionPhase::NotStarted {
            return Err(SessionError::InvalidPhase(self.phase));
        }
        self.phase = SessionPhase::InProgress;
        self.started_at = Some(started_at);
        info!(
            "Session {} started workout '{}'",
            self.id, self.definition.name
        );
        Ok(())
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn definition(&self) -> &WorkoutDefinition {
        &self.definition
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn started_at(&self) -> Option<NaiveDateTime> {
        self.started_at
    }

    pub fn exercise_index(&self) -> usize {
        self.exercise_index
    }

    /// 1-based set number within the current exercise.
    pub fn set_number(&self) -> u32 {
        self.set_number
    }

    pub fn current_exercise(&self) -> &ExerciseDefinition {
        &self.definition.exercises[self.exercise_index]
    }

    pub fn progress(&self, exercise_id: ExerciseId) -> Option<&ExerciseProgress> {
        self.progress.get(&exercise_id)
    }

    pub fn timer(&self) -> &RestTimer {
        &self.timer
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    pub fn tick_elapsed(&mut self) {
        if self.phase == SessionPhase::InProgress {
            self.elapsed_seconds += 1;
        }
    }

    /// One wall-clock second: session clock first, then the rest countdown.
    pub fn tick(&mut self) {
        self.tick_elapsed();
        self.tick_rest();
    }

    pub(super) fn ensure_in_progress(&self) -> Result<(), SessionError> {
        match self.phase {
            SessionPhase::InProgress => Ok(()),
            phase => Err(SessionError::InvalidPhase(phase)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::fixtures::{definition, fixed_start};

    #[test]
    fn start_initializes_empty_progress() {
        let session = WorkoutSession::start_at(definition(&[(1, 3, 90), (2, 2, 60)]), fixed_start())
            .unwrap();

        assert_eq!(session.phase(), SessionPhase::InProgress);
        assert_eq!(session.exercise_index(), 0);
        assert_eq!(session.set_number(), 1);
        assert_eq!(session.elapsed_seconds(), 0);
        assert!(!session.timer().is_resting());
        assert_eq!(session.started_at(), Some(fixed_start()));

        assert_eq!(session.progress.len(), 2);
        for exercise in &session.definition().exercises {
            let progress = session.progress(exercise.id).unwrap();
            assert!(!progress.completed);
            assert_eq!(progress.sets.len(), exercise.target_sets as usize);
            assert!(progress.sets.iter().all(|s| !s.completed));
        }
    }

    #[test]
    fn start_rejects_invalid_definitions() {
        let err = WorkoutSession::start(definition(&[])).unwrap_err();
        assert!(matches!(err, SessionError::InvalidDefinition(_)));

        let err = WorkoutSession::start(definition(&[(1, 3, 90), (2, 0, 90)])).unwrap_err();
        assert!(matches!(err, SessionError::InvalidDefinition(_)));
    }

    #[test]
    fn prepared_session_waits_for_begin() {
        let mut session = WorkoutSession::prepare(definition(&[(1, 1, 30)])).unwrap();
        assert_eq!(session.phase(), SessionPhase::NotStarted);
        assert_eq!(session.started_at(), None);

        session.tick();
        assert_eq!(session.elapsed_seconds(), 0);

        session.begin_at(fixed_start()).unwrap();
        assert_eq!(session.phase(), SessionPhase::InProgress);
        session.tick();
        assert_eq!(session.elapsed_seconds(), 1);

        let err = session.begin().unwrap_err();
        assert_eq!(err, SessionError::InvalidPhase(SessionPhase::InProgress));
    }

    #[test]
    fn each_session_gets_its_own_id() {
        let a = WorkoutSession::prepare(definition(&[(1, 1, 30)])).unwrap();
        let b = WorkoutSession::prepare(definition(&[(1, 1, 30)])).unwrap();
        assert_ne!(a.id(), b.id());
    }
}
