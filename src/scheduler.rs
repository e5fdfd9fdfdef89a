use std::time::{Duration, Instant};

use thiserror::Error;

use crate::azkar::AzkarList;
use crate::settings::Settings;
use crate::storage::{SettingsStore, StorageError};

#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("interval must be a positive whole number of minutes")]
    InvalidInterval,
    #[error("display time must be a positive whole number of seconds")]
    InvalidDisplay,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Stopped,
    Running,
}

/// Repeating reminder timer. Owns the cursor into the reminder list and the
/// next-fire deadline; the UI loop polls it every frame.
pub struct Scheduler {
    state: SchedulerState,
    cursor: usize,
    interval: Duration,
    next_fire: Option<Instant>,
}

fn parse_positive(text: &str) -> Option<u32> {
    match text.trim().parse::<u32>() {
        Ok(n) if n > 0 => Some(n),
        _ => None,
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            state: SchedulerState::Stopped,
            cursor: 0,
            interval: Duration::ZERO,
            next_fire: None,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SchedulerState::Running
    }

    /// Validate the raw interval/display inputs, persist them into the
    /// settings, and arm the repeating timer.
    ///
    /// Inputs that do not parse as positive integers are rejected without
    /// touching the state or the settings; a failed persist also leaves the
    /// scheduler stopped.
    pub fn start(
        &mut self,
        interval_text: &str,
        display_text: &str,
        settings: &mut Settings,
        store: &SettingsStore,
        now: Instant,
    ) -> Result<(), SchedulerError> {
        let minutes = parse_positive(interval_text).ok_or(SchedulerError::InvalidInterval)?;
        let seconds = parse_positive(display_text).ok_or(SchedulerError::InvalidDisplay)?;

        let mut updated = settings.clone();
        updated.interval_minutes = minutes;
        updated.display_seconds = seconds;
        store.save(&updated)?;
        *settings = updated;

        self.interval = Duration::from_secs(u64::from(minutes) * 60);
        self.next_fire = Some(now + self.interval);
        self.state = SchedulerState::Running;
        Ok(())
    }

    /// Disarm the timer. Popups already on screen run to their own dismissal.
    pub fn stop(&mut self) {
        self.state = SchedulerState::Stopped;
        self.next_fire = None;
    }

    /// Check the deadline and yield the reminder text to display, advancing
    /// the cursor modulo the list length. An empty list re-arms the timer
    /// but yields nothing; so does a deadline still in the future.
    pub fn poll(&mut self, now: Instant, azkar: &AzkarList) -> Option<String> {
        if self.state != SchedulerState::Running {
            return None;
        }
        let next = self.next_fire?;
        if now < next {
            return None;
        }
        self.next_fire = Some(now + self.interval);

        let zikr = azkar.entry_at(self.cursor)?;
        let text = zikr.text.clone();
        self.cursor = (self.cursor + 1) % azkar.len();
        Some(text)
    }

    /// The next deadline, for driving the repaint cadence.
    pub fn next_fire(&self) -> Option<Instant> {
        self.next_fire
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}
