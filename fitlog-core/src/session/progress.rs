use serde::{Deserialize, Serialize};

/// One set slot of an exercise. Values stay `None` until entered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SetEntry {
    pub weight: Option<f64>,
    pub reps: Option<u32>,
    pub completed: bool,
}

impl SetEntry {
    pub fn logged(weight: Option<f64>, reps: Option<u32>) -> Self {
        Self {
            weight,
            reps,
            completed: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseProgress {
    pub completed: bool,
    pub sets: Vec<SetEntry>,
}

impl ExerciseProgress {
    pub fn new(target_sets: u32) -> Self {
        Self {
            completed: false,
            sets: vec![SetEntry::default(); target_sets as usize],
        }
    }

    pub fn completed_sets(&self) -> usize {
        self.sets.iter().filter(|s| s.completed).count()
    }

    // completed iff every slot is completed
    pub(super) fn refresh_completed(&mut self) {
        self.completed = self.sets.iter().all(|s| s.completed);
    }
}
