//! Session completion and the summary handed to persistence.

use std::fmt;

use chrono::NaiveDateTime;
use log::info;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::{ExerciseId, WorkoutId};
use crate::session::{SessionError, SessionPhase, WorkoutSession};

/// `mm:ss`, minutes are not wrapped into hours.
pub fn format_clock(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoggedSet {
    pub weight: Option<f64>,
    pub reps: Option<u32>,
}

impl LoggedSet {
    pub fn volume(&self) -> f64 {
        match (self.weight, self.reps) {
            (Some(weight), Some(reps)) => weight * f64::from(reps),
            _ => 0.0,
        }
    }
}

impl fmt::Display for LoggedSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let weight = self
            .weight
            .map(|w| format!("{:.1}lbs", w))
            .unwrap_or_else(|| "-".to_string());
        let reps = self
            .reps
            .map(|r| r.to_string())
            .unwrap_or_else(|| "-".to_string());
        write!(f, "{} x {}", weight, reps)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseSummary {
    pub exercise_id: ExerciseId,
    pub exercise_name: String,
    pub sets: Vec<LoggedSet>,
}

/// Immutable record of a finished session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: Uuid,
    pub workout_id: WorkoutId,
    pub workout_name: String,
    pub started_at: Option<NaiveDateTime>,
    pub total_duration_seconds: u64,
    pub per_exercise: Vec<ExerciseSummary>,
    pub notes: String,
}

impl SessionSummary {
    pub fn total_sets(&self) -> usize {
        self.per_exercise.iter().map(|e| e.sets.len()).sum()
    }

    pub fn total_volume(&self) -> f64 {
        self.per_exercise
            .iter()
            .flat_map(|e| e.sets.iter())
            .map(LoggedSet::volume)
            .sum()
    }

    pub fn duration_display(&self) -> String {
        format_clock(self.total_duration_seconds)
    }
}

impl WorkoutSession {
    /// True once every exercise has all of its sets logged.
    pub fn is_session_complete(&self) -> bool {
        self.definition
            .exercises
            .iter()
            .all(|e| self.progress.get(&e.id).is_some_and(|p| p.completed))
    }

    pub fn complete_session(
        &mut self,
        notes: impl Into<String>,
    ) -> Result<SessionSummary, SessionError> {
        if !self.is_session_complete() {
            return Err(SessionError::NotReady);
        }
        self.ensure_in_progress()?;

        self.phase = SessionPhase::Completed;
        self.timer.stop();

        let per_exercise = self
            .definition
            .exercises
            .iter()
            .map(|exercise| ExerciseSummary {
                exercise_id: exercise.id,
                exercise_name: exercise.name.clone(),
                sets: self
                    .progress
                    .get(&exercise.id)
                    .map(|p| {
                        p.sets
                            .iter()
                            .map(|s| LoggedSet {
                                weight: s.weight,
                                reps: s.reps,
                            })
                            .collect()
                    })
                    .unwrap_or_default(),
            })
            .collect();

        let summary = SessionSummary {
            session_id: self.id,
            workout_id: self.definition.id,
            workout_name: self.definition.name.clone(),
            started_at: self.started_at,
            total_duration_seconds: self.elapsed_seconds,
            per_exercise,
            notes: notes.into(),
        };
        info!(
            "Session {} completed in {} with {} sets",
            self.id,
            summary.duration_display(),
            summary.total_sets()
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::fixtures::{definition, fixed_start};

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(90), "01:30");
        assert_eq!(format_clock(3725), "62:05");
    }

    #[test]
    fn two_exercise_scenario() {
        let mut session =
            WorkoutSession::start_at(definition(&[(1, 2, 90), (2, 1, 60)]), fixed_start())
                .unwrap();

        for _ in 0..30 {
            session.tick();
        }
        session.record_set(1, 0, Some(20.0), Some(10)).unwrap();
        session.record_set(1, 1, Some(20.0), Some(8)).unwrap();
        assert!(session.progress(1).unwrap().completed);
        assert_eq!((session.exercise_index(), session.set_number()), (1, 1));
        assert!(!session.is_session_complete());

        for _ in 0..45 {
            session.tick();
        }
        session.record_set(2, 0, Some(12.5), Some(12)).unwrap();
        assert!(session.progress(2).unwrap().completed);
        assert!(session.is_session_complete());
        assert!(session.is_session_complete());
        assert_eq!(session.phase(), SessionPhase::InProgress);

        let summary = session.complete_session("felt good").unwrap();
        assert_eq!(session.phase(), SessionPhase::Completed);
        assert!(!session.timer().is_resting());
        assert_eq!(summary.total_duration_seconds, 75);
        assert_eq!(summary.notes, "felt good");
        assert_eq!(summary.started_at, Some(fixed_start()));
        assert_eq!(summary.workout_id, 42);
        assert_eq!(summary.session_id, session.id());

        let ids: Vec<_> = summary.per_exercise.iter().map(|e| e.exercise_id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(
            summary.per_exercise[0].sets,
            vec![
                LoggedSet {
                    weight: Some(20.0),
                    reps: Some(10)
                },
                LoggedSet {
                    weight: Some(20.0),
                    reps: Some(8)
                },
            ]
        );
        assert_eq!(summary.total_sets(), 3);
        assert_eq!(summary.total_volume(), 20.0 * 18.0 + 12.5 * 12.0);
    }

    #[test]
    fn completion_requires_every_set() {
        let mut session =
            WorkoutSession::start_at(definition(&[(1, 2, 90)]), fixed_start()).unwrap();
        session.record_set(1, 0, Some(20.0), Some(10)).unwrap();

        assert_eq!(
            session.complete_session("too soon").unwrap_err(),
            SessionError::NotReady
        );
        assert_eq!(session.phase(), SessionPhase::InProgress);

        session.record_set(1, 1, Some(20.0), Some(10)).unwrap();
        session.complete_session("").unwrap();
        assert_eq!(
            session.complete_session("again").unwrap_err(),
            SessionError::InvalidPhase(SessionPhase::Completed)
        );
    }

    #[test]
    fn completed_session_stops_clock_and_rejects_sets() {
        let mut session =
            WorkoutSession::start_at(definition(&[(1, 1, 90)]), fixed_start()).unwrap();
        session.record_set(1, 0, None, Some(15)).unwrap();
        session.tick();
        session.complete_session("done").unwrap();

        session.tick();
        assert_eq!(session.elapsed_seconds(), 1);
        assert!(session.record_set(1, 0, None, Some(1)).is_err());
        assert!(session.is_session_complete());
    }

    #[test]
    fn not_started_session_is_not_ready() {
        let mut session = WorkoutSession::prepare(definition(&[(1, 1, 90)])).unwrap();
        assert_eq!(
            session.complete_session("").unwrap_err(),
            SessionError::NotReady
        );
    }

    #[test]
    fn logged_set_display() {
        let set = LoggedSet {
            weight: Some(25.0),
            reps: Some(8),
        };
        assert_eq!(set.to_string(), "25.0lbs x 8");
        assert_eq!(
            LoggedSet {
                weight: None,
                reps: None
            }
            .to_string(),
            "- x -"
        );
    }
}
