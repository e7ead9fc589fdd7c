use crossterm::event::KeyCode;
use fitlog::catalog::WorkoutDefinition;
use fitlog::session::{SessionPhase, SessionSummary, WorkoutSession};
use log::warn;

pub const NOT_STARTED_HELP: &str = "s: start workout | q: quit";
pub const IN_PROGRESS_HELP: &str =
    "w: weight | r: reps | enter: complete set | x: skip rest | n: notes | c: finish | q: quit";
pub const COMPLETED_HELP: &str = "Workout complete! q: save and exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Weight,
    Reps,
    Notes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    Quit,
}

pub struct SessionApp {
    pub session: WorkoutSession,
    pub input_mode: InputMode,
    pub input_buffer: String,
    pub notes: String,
    pub status_message: String,
    pub summary: Option<SessionSummary>,
}

impl SessionApp {
    pub fn new(definition: WorkoutDefinition) -> anyhow::Result<Self> {
        Ok(Self {
            session: WorkoutSession::prepare(definition)?,
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            notes: String::new(),
            status_message: NOT_STARTED_HELP.to_string(),
            summary: None,
        })
    }

    pub fn on_tick(&mut self) {
        let was_resting = self.session.timer().is_resting();
        self.session.tick();
        if was_resting && !self.session.timer().is_resting() {
            self.status_message = "Rest over, next set!".to_string();
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Action {
        match self.input_mode {
            InputMode::Normal => self.handle_normal_key(code),
            _ => {
                self.handle_input_key(code);
                Action::Continue
            }
        }
    }

    fn handle_normal_key(&mut self, code: KeyCode) -> Action {
        if let KeyCode::Char('q') | KeyCode::Char('Q') = code {
            return Action::Quit;
        }

        match self.session.phase() {
            SessionPhase::NotStarted => {
                if let KeyCode::Char('s') | KeyCode::Char('S') = code {
                    self.begin();
                }
            }
            SessionPhase::InProgress => match code {
                KeyCode::Char('w') | KeyCode::Char('W') => self.enter_input(InputMode::Weight),
                KeyCode::Char('r') | KeyCode::Char('R') => self.enter_input(InputMode::Reps),
                KeyCode::Char('n') | KeyCode::Char('N') => self.enter_input(InputMode::Notes),
                KeyCode::Enter => self.complete_current_set(),
                KeyCode::Char('x') | KeyCode::Char('X') => {
                    self.session.stop_rest();
                    self.status_message = IN_PROGRESS_HELP.to_string();
                }
                KeyCode::Char('c') | KeyCode::Char('C') => self.finish(),
                _ => {}
            },
            SessionPhase::Completed => {}
        }
        Action::Continue
    }

    fn handle_input_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Enter => {
                let error = self.commit_input().err();
                self.leave_input();
                if let Some(error) = error {
                    self.status_message = error;
                }
            }
            KeyCode::Esc => self.leave_input(),
            KeyCode::Backspace => {
                self.input_buffer.pop();
            }
            KeyCode::Char(c) => {
                let accepted = match self.input_mode {
                    InputMode::Weight => c.is_ascii_digit() || c == '.',
                    InputMode::Reps => c.is_ascii_digit(),
                    _ => true,
                };
                if accepted {
                    self.input_buffer.push(c);
                }
            }
            _ => {}
        }
    }

    fn begin(&mut self) {
        match self.session.begin() {
            Ok(()) => self.status_message = IN_PROGRESS_HELP.to_string(),
            Err(e) => self.status_message = format!("Cannot start: {}", e),
        }
    }

    fn enter_input(&mut self, mode: InputMode) {
        self.input_buffer = match mode {
            InputMode::Weight => self
                .current_entry()
                .and_then(|(weight, _)| weight)
                .map(|w| w.to_string())
                .unwrap_or_default(),
            InputMode::Reps => self
                .current_entry()
                .and_then(|(_, reps)| reps)
                .map(|r| r.to_string())
                .unwrap_or_default(),
            InputMode::Notes => self.notes.clone(),
            InputMode::Normal => String::new(),
        };
        self.input_mode = mode;
        self.status_message = "enter: save | esc: cancel".to_string();
    }

    fn leave_input(&mut self) {
        self.input_mode = InputMode::Normal;
        self.input_buffer.clear();
        self.status_message = IN_PROGRESS_HELP.to_string();
    }

    /// Empty input clears the value; input that does not parse keeps it.
    fn commit_input(&mut self) -> Result<(), String> {
        let (exercise_id, set_index) = self.cursor();
        let (weight, reps) = self.current_entry().unwrap_or((None, None));
        let input = self.input_buffer.trim();

        let result = match self.input_mode {
            InputMode::Weight => {
                let weight = parse_field(input, "weight")?;
                self.session.edit_set(exercise_id, set_index, weight, reps)
            }
            InputMode::Reps => {
                let reps = parse_field(input, "reps")?;
                self.session.edit_set(exercise_id, set_index, weight, reps)
            }
            InputMode::Notes => {
                self.notes = input.to_string();
                Ok(())
            }
            InputMode::Normal => Ok(()),
        };
        result.map_err(|e| {
            warn!("Failed to update set: {}", e);
            format!("Error updating set: {}", e)
        })
    }

    fn complete_current_set(&mut self) {
        let (exercise_id, set_index) = self.cursor();
        let (weight, reps) = self.current_entry().unwrap_or((None, None));
        match self.session.record_set(exercise_id, set_index, weight, reps) {
            Ok(()) if self.session.is_session_complete() => {
                self.status_message = "All sets logged! c: finish workout".to_string();
            }
            Ok(()) => {
                self.status_message = format!(
                    "Set logged. Resting {}s (x: skip)",
                    self.session.timer().active_rest_seconds()
                );
            }
            Err(e) => self.status_message = format!("Error logging set: {}", e),
        }
    }

    fn finish(&mut self) {
        match self.session.complete_session(self.notes.clone()) {
            Ok(summary) => {
                self.summary = Some(summary);
                self.status_message = COMPLETED_HELP.to_string();
            }
            Err(e) => self.status_message = format!("Cannot finish yet: {}", e),
        }
    }

    /// Exercise id and 0-based set index under the cursor.
    pub fn cursor(&self) -> (i64, usize) {
        (
            self.session.current_exercise().id,
            self.session.set_number() as usize - 1,
        )
    }

    fn current_entry(&self) -> Option<(Option<f64>, Option<u32>)> {
        let (exercise_id, set_index) = self.cursor();
        self.session
            .progress(exercise_id)
            .and_then(|p| p.sets.get(set_index))
            .map(|s| (s.weight, s.reps))
    }
}

fn parse_field<T: std::str::FromStr>(input: &str, field: &str) -> Result<Option<T>, String> {
    if input.is_empty() {
        return Ok(None);
    }
    input
        .parse()
        .map(Some)
        .map_err(|_| format!("'{}' is not a valid {}, value kept", input, field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitlog::catalog::{ExerciseDefinition, WorkoutDefinition};

    fn app() -> SessionApp {
        SessionApp::new(WorkoutDefinition::new(
            1,
            "Mini",
            vec![
                ExerciseDefinition::new(10, "Curl", 2, 30),
                ExerciseDefinition::new(20, "Row", 1, 45),
            ],
        ))
        .unwrap()
    }

    fn type_str(app: &mut SessionApp, s: &str) {
        for c in s.chars() {
            app.handle_key(KeyCode::Char(c));
        }
    }

    #[test]
    fn keys_do_nothing_before_start() {
        let mut app = app();
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.session.phase(), SessionPhase::NotStarted);
        app.handle_key(KeyCode::Char('s'));
        assert_eq!(app.session.phase(), SessionPhase::InProgress);
    }

    #[test]
    fn typed_values_are_recorded() {
        let mut app = app();
        app.handle_key(KeyCode::Char('s'));

        app.handle_key(KeyCode::Char('w'));
        assert_eq!(app.input_mode, InputMode::Weight);
        type_str(&mut app, "2x2.5");
        app.handle_key(KeyCode::Enter);
        app.handle_key(KeyCode::Char('r'));
        type_str(&mut app, "10");
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.input_mode, InputMode::Normal);

        app.handle_key(KeyCode::Enter);
        let entry = app.session.progress(10).unwrap().sets[0];
        assert!(entry.completed);
        assert_eq!(entry.weight, Some(22.5));
        assert_eq!(entry.reps, Some(10));
        assert_eq!(app.cursor(), (10, 1));
        assert!(app.session.timer().is_resting());
    }

    #[test]
    fn rest_end_updates_status() {
        let mut app = app();
        app.handle_key(KeyCode::Char('s'));
        app.handle_key(KeyCode::Enter);
        for _ in 0..30 {
            app.on_tick();
        }
        assert!(!app.session.timer().is_resting());
        assert_eq!(app.status_message, "Rest over, next set!");
        assert_eq!(app.session.elapsed_seconds(), 30);
    }

    #[test]
    fn finish_needs_all_sets_and_keeps_notes() {
        let mut app = app();
        app.handle_key(KeyCode::Char('s'));
        app.handle_key(KeyCode::Char('c'));
        assert!(app.summary.is_none());

        app.handle_key(KeyCode::Char('n'));
        type_str(&mut app, "felt good");
        app.handle_key(KeyCode::Enter);

        for _ in 0..3 {
            app.handle_key(KeyCode::Enter);
            app.handle_key(KeyCode::Char('x'));
        }
        assert!(app.session.is_session_complete());
        app.handle_key(KeyCode::Char('c'));

        let summary = app.summary.as_ref().unwrap();
        assert_eq!(summary.notes, "felt good");
        assert_eq!(summary.total_sets(), 3);
        assert_eq!(app.handle_key(KeyCode::Char('q')), Action::Quit);
    }

    #[test]
    fn unparsable_input_keeps_previous_value() {
        let mut app = app();
        app.handle_key(KeyCode::Char('s'));
        app.handle_key(KeyCode::Char('w'));
        type_str(&mut app, "40");
        app.handle_key(KeyCode::Enter);

        app.handle_key(KeyCode::Char('w'));
        app.input_buffer = ".".to_string();
        app.handle_key(KeyCode::Enter);

        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.session.progress(10).unwrap().sets[0].weight, Some(40.0));
        assert_eq!(app.status_message, "'.' is not a valid weight, value kept");

        app.handle_key(KeyCode::Char('w'));
        app.input_buffer.clear();
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.session.progress(10).unwrap().sets[0].weight, None);
        assert_eq!(app.status_message, IN_PROGRESS_HELP);
    }

    #[test]
    fn escape_discards_input() {
        let mut app = app();
        app.handle_key(KeyCode::Char('s'));
        app.handle_key(KeyCode::Char('r'));
        type_str(&mut app, "8");
        app.handle_key(KeyCode::Esc);
        assert_eq!(app.session.progress(10).unwrap().sets[0].reps, None);
    }
}
