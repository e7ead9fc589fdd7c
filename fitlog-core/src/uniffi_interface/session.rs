use std::sync::{Arc, Mutex, MutexGuard};

use log::debug;

use crate::catalog::{InMemoryCatalog, WorkoutCatalog, WorkoutDefinition};
use crate::db::{SqliteSummaryStore, SummaryStore};
use crate::session::{SessionSummary, WorkoutSession};
use crate::uniffi_interface::errors::FitlogError;
use crate::uniffi_interface::objects::{SessionSnapshot, SummaryRecord};

struct ActiveState {
    session: WorkoutSession,
    summary: Option<SessionSummary>,
}

/// A running session shared with the host app.
///
/// The host owns the one-second timer and calls `tick`.
#[derive(uniffi::Object)]
pub struct ActiveSession {
    inner: Mutex<ActiveState>,
}

impl ActiveSession {
    fn wrap(session: WorkoutSession) -> Arc<Self> {
        Arc::new(Self {
            inner: Mutex::new(ActiveState {
                session,
                summary: None,
            }),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, ActiveState>, FitlogError> {
        self.inner
            .lock()
            .map_err(|_| FitlogError::from("session lock poisoned"))
    }

    /// Owned copy of the summary so the lock is free during database work.
    fn completed_summary(&self) -> Result<SessionSummary, FitlogError> {
        self.lock()?.summary.clone().ok_or(FitlogError::NotReady)
    }
}

#[uniffi::export]
impl ActiveSession {
    /// Prepare one of the built-in workouts; call `begin` to start it.
    #[uniffi::constructor]
    pub fn prepare_builtin(workout_id: i64) -> Result<Arc<Self>, FitlogError> {
        let catalog = InMemoryCatalog::builtin();
        let definition = catalog
            .workout(workout_id)
            .cloned()
            .ok_or_else(|| FitlogError::Common(format!("No workout with id {}", workout_id)))?;
        Ok(Self::wrap(WorkoutSession::prepare(definition)?))
    }

    #[uniffi::constructor]
    pub fn prepare_from_json(definition_json: String) -> Result<Arc<Self>, FitlogError> {
        let definition: WorkoutDefinition = serde_json::from_str(&definition_json)
            .map_err(|e| FitlogError::InvalidDefinition(e.to_string()))?;
        Ok(Self::wrap(WorkoutSession::prepare(definition)?))
    }

    pub fn begin(&self) -> Result<SessionSnapshot, FitlogError> {
        let mut state = self.lock()?;
        state.session.begin()?;
        Ok(SessionSnapshot::from(&state.session))
    }

    pub fn snapshot(&self) -> Result<SessionSnapshot, FitlogError> {
        let state = self.lock()?;
        Ok(SessionSnapshot::from(&state.session))
    }

    pub fn record_set(
        &self,
        exercise_id: i64,
        set_index: u32,
        weight: Option<f64>,
        reps: Option<u32>,
    ) -> Result<SessionSnapshot, FitlogError> {
        let mut state = self.lock()?;
        state
            .session
            .record_set(exercise_id, set_index as usize, weight, reps)?;
        Ok(SessionSnapshot::from(&state.session))
    }

    pub fn edit_set(
        &self,
        exercise_id: i64,
        set_index: u32,
        weight: Option<f64>,
        reps: Option<u32>,
    ) -> Result<SessionSnapshot, FitlogError> {
        let mut state = self.lock()?;
        state
            .session
            .edit_set(exercise_id, set_index as usize, weight, reps)?;
        Ok(SessionSnapshot::from(&state.session))
    }

    pub fn start_rest(&self) -> Result<SessionSnapshot, FitlogError> {
        let mut state = self.lock()?;
        state.session.start_rest()?;
        Ok(SessionSnapshot::from(&state.session))
    }

    pub fn stop_rest(&self) -> Result<SessionSnapshot, FitlogError> {
        let mut state = self.lock()?;
        state.session.stop_rest();
        Ok(SessionSnapshot::from(&state.session))
    }

    pub fn tick(&self) -> Result<SessionSnapshot, FitlogError> {
        let mut state = self.lock()?;
        state.session.tick();
        Ok(SessionSnapshot::from(&state.session))
    }

    pub fn is_complete(&self) -> Result<bool, FitlogError> {
        Ok(self.lock()?.session.is_session_complete())
    }

    pub fn complete(&self, notes: String) -> Result<SummaryRecord, FitlogError> {
        let mut state = self.lock()?;
        let summary = state.session.complete_session(notes)?;
        let record = SummaryRecord::from(&summary);
        state.summary = Some(summary);
        Ok(record)
    }

    /// Persist the summary of a completed session.
    pub fn save(&self, database_path: String) -> Result<SummaryRecord, FitlogError> {
        let summary = self.completed_summary()?;
        let store = SqliteSummaryStore::open(&database_path)?;
        let id = store.save(&summary)?;
        debug!("Saved session {} as {}", summary.session_id, id);
        Ok(SummaryRecord {
            stored_id: Some(id),
            ..SummaryRecord::from(&summary)
        })
    }
}

#[uniffi::export]
pub fn workout_history(database_path: String) -> Result<Vec<SummaryRecord>, FitlogError> {
    let store = SqliteSummaryStore::open(&database_path)?;
    Ok(store.list()?.iter().map(SummaryRecord::from).collect())
}
