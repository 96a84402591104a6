//! Application state.

use std::time::Duration;

use crate::metrics::{PollResult, ProcessSnapshot};

/// Row limit applied by the first `+` when the table is fitting the screen.
const DEFAULT_STEP_BASE: usize = 10;

/// UI state between polls.
#[derive(Debug, Default)]
pub struct AppState {
    /// Most recent successful poll.
    pub latest: Option<PollResult>,
    /// Wall time of the most recent poll.
    pub poll_duration: Option<Duration>,
    /// Last poll error, cleared by the next successful poll.
    pub last_error: Option<String>,
    /// Paused state stops polling on ticks.
    pub paused: bool,
    /// Maximum number of process rows; `None` fits the table height.
    pub row_limit: Option<usize>,
    /// Successful polls so far.
    pub polls: u64,
}

impl AppState {
    pub fn new(row_limit: Option<usize>) -> Self {
        Self {
            row_limit,
            ..Self::default()
        }
    }

    /// Stores a successful poll.
    pub fn apply(&mut self, result: PollResult, duration: Option<Duration>) {
        self.latest = Some(result);
        self.poll_duration = duration;
        self.last_error = None;
        self.polls += 1;
    }

    /// Records a failed poll; the previous result stays on screen.
    pub fn apply_error(&mut self, message: impl Into<String>) {
        self.last_error = Some(message.into());
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn grow_limit(&mut self) {
        self.row_limit = Some(match self.row_limit {
            Some(n) => n.saturating_add(1),
            None => DEFAULT_STEP_BASE,
        });
    }

    pub fn shrink_limit(&mut self) {
        self.row_limit = Some(match self.row_limit {
            Some(n) => n.saturating_sub(1).max(1),
            None => DEFAULT_STEP_BASE,
        });
    }

    pub fn reset_limit(&mut self) {
        self.row_limit = None;
    }

    /// Busiest processes to draw in a table with room for `available` rows.
    pub fn visible_processes(&self, available: usize) -> &[ProcessSnapshot] {
        let Some(result) = &self.latest else {
            return &[];
        };
        let limit = self.row_limit.map_or(available, |n| n.min(available));
        &result.processes[..limit.min(result.processes.len())]
    }
}
