use log::debug;

use crate::catalog::ExerciseId;
use crate::session::{ExerciseProgress, SessionError, SetEntry, WorkoutSession};

impl WorkoutSession {
    /// Log a finished set and move the cursor on.
    ///
    /// The rest timer is started with the rest duration of the exercise that
    /// was current when the call was made, even when the cursor has moved on
    /// to the next exercise.
    pub fn record_set(
        &mut self,
        exercise_id: ExerciseId,
        set_index: usize,
        weight: Option<f64>,
        reps: Option<u32>,
    ) -> Result<(), SessionError> {
        let progress = self.writable_progress(exercise_id, set_index)?;
        progress.sets[set_index] = SetEntry::logged(weight, reps);
        progress.refresh_completed();
        let exercise_done = progress.completed;

        let rest_seconds = self.current_exercise().rest_seconds;
        self.advance_cursor();
        self.timer.start(rest_seconds);

        debug!(
            "Recorded set {} of exercise {} ({:?} x {:?}), exercise complete: {}",
            set_index + 1,
            exercise_id,
            weight,
            reps,
            exercise_done
        );
        Ok(())
    }

    /// Update the entered values of a set without completing it.
    pub fn edit_set(
        &mut self,
        exercise_id: ExerciseId,
        set_index: usize,
        weight: Option<f64>,
        reps: Option<u32>,
    ) -> Result<(), SessionError> {
        let entry = &mut self.writable_progress(exercise_id, set_index)?.sets[set_index];
        entry.weight = weight;
        entry.reps = reps;
        Ok(())
    }

    /// Bad indices are reported as `InvalidSet` whatever the phase.
    fn writable_progress(
        &mut self,
        exercise_id: ExerciseId,
        set_index: usize,
    ) -> Result<&mut ExerciseProgress, SessionError> {
        let in_range = self
            .progress
            .get(&exercise_id)
            .is_some_and(|progress| set_index < progress.sets.len());
        if !in_range {
            return Err(SessionError::InvalidSet {
                exercise_id,
                set_index,
            });
        }
        self.ensure_in_progress()?;
        self.progress
            .get_mut(&exercise_id)
            .ok_or(SessionError::InvalidSet {
                exercise_id,
                set_index,
            })
    }

    fn advance_cursor(&mut self) {
        if self.set_number >= self.current_exercise().target_sets {
            if self.exercise_index + 1 < self.definition.exercises.len() {
                self.exercise_index += 1;
                self.set_number = 1;
            }
        } else {
            self.set_number += 1;
        }
    }
}
