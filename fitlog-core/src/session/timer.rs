use std::fmt;

use log::debug;

use crate::session::{SessionError, WorkoutSession, format_clock};

/// Countdown between sets, independent of the session clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RestTimer {
    active_rest_seconds: u32,
    is_resting: bool,
}

impl RestTimer {
    pub fn active_rest_seconds(&self) -> u32 {
        self.active_rest_seconds
    }

    pub fn is_resting(&self) -> bool {
        self.is_resting
    }

    // A zero-length rest still counts as resting until the next tick.
    pub(super) fn start(&mut self, seconds: u32) {
        self.active_rest_seconds = seconds;
        self.is_resting = true;
    }

    pub(super) fn stop(&mut self) {
        self.active_rest_seconds = 0;
        self.is_resting = false;
    }

    pub(super) fn tick(&mut self) {
        if !self.is_resting {
            return;
        }
        self.active_rest_seconds = self.active_rest_seconds.saturating_sub(1);
        if self.active_rest_seconds == 0 {
            self.is_resting = false;
        }
    }
}

impl fmt::Display for RestTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_clock(u64::from(self.active_rest_seconds)))
    }
}

impl WorkoutSession {
    /// Start resting for the current exercise's rest duration.
    pub fn start_rest(&mut self) -> Result<(), SessionError> {
        self.ensure_in_progress()?;
        let rest_seconds = self.current_exercise().rest_seconds;
        self.timer.start(rest_seconds);
        debug!("Rest started for {}s", rest_seconds);
        Ok(())
    }

    pub fn stop_rest(&mut self) {
        self.timer.stop();
    }

    pub fn tick_rest(&mut self) {
        self.timer.tick();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::fixtures::{definition, fixed_start};

    #[test]
    fn rest_counts_down_to_zero() {
        let mut session = WorkoutSession::start_at(definition(&[(1, 3, 90)]), fixed_start())
            .unwrap();
        session.start_rest().unwrap();
        assert_eq!(session.timer().active_rest_seconds(), 90);
        assert!(session.timer().is_resting());
        assert_eq!(session.timer().to_string(), "01:30");

        for _ in 0..89 {
            session.tick_rest();
        }
        assert!(session.timer().is_resting());
        assert_eq!(session.timer().active_rest_seconds(), 1);

        session.tick_rest();
        assert!(!session.timer().is_resting());
        assert_eq!(session.timer().active_rest_seconds(), 0);

        session.tick_rest();
        assert_eq!(session.timer().active_rest_seconds(), 0);
    }

    #[test]
    fn stop_rest_zeroes_timer() {
        let mut session = WorkoutSession::start_at(definition(&[(1, 3, 90)]), fixed_start())
            .unwrap();
        session.start_rest().unwrap();
        for _ in 0..10 {
            session.tick_rest();
        }
        assert_eq!(session.timer().active_rest_seconds(), 80);

        session.stop_rest();
        assert_eq!(*session.timer(), RestTimer::default());
        session.stop_rest();
        assert_eq!(*session.timer(), RestTimer::default());
    }

    #[test]
    fn zero_rest_ends_on_next_tick() {
        let mut session = WorkoutSession::start_at(definition(&[(1, 2, 0)]), fixed_start())
            .unwrap();
        session.start_rest().unwrap();
        assert_eq!(session.timer().active_rest_seconds(), 0);
        assert!(session.timer().is_resting());

        session.tick_rest();
        assert!(!session.timer().is_resting());
        assert_eq!(session.timer().active_rest_seconds(), 0);

        session.record_set(1, 0, None, Some(10)).unwrap();
        assert!(session.timer().is_resting());
        session.tick();
        assert!(!session.timer().is_resting());
    }

    #[test]
    fn session_tick_drives_both_clocks() {
        let mut session = WorkoutSession::start_at(definition(&[(1, 2, 5)]), fixed_start())
            .unwrap();
        session.start_rest().unwrap();
        for _ in 0..7 {
            session.tick();
        }
        assert_eq!(session.elapsed_seconds(), 7);
        assert!(!session.timer().is_resting());
    }

    #[test]
    fn rest_needs_running_session() {
        let mut session = WorkoutSession::prepare(definition(&[(1, 2, 5)])).unwrap();
        assert!(session.start_rest().is_err());
        assert!(!session.timer().is_resting());
    }
}
