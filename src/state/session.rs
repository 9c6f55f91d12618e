//! Persisted snapshot of a workout in progress

use serde::{Deserialize, Serialize};

use super::{LifecycleState, TimerConfig};

/// Everything needed to pick a workout back up after a restart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSession {
    pub timers: Vec<TimerConfig>,
    pub current_timer_index: Option<usize>,
    /// Elapsed time of the active timer in milliseconds
    pub elapsed_time: u64,
    /// Elapsed time across the whole workout in milliseconds
    pub total_elapsed_time: u64,
    /// Epoch milliseconds of the last write
    pub last_updated: i64,
    pub is_workout_editable: bool,
    pub is_workout_paused: bool,
    /// Bumped on every write
    #[serde(default)]
    pub revision: u64,
}

impl WorkoutSession {
    /// Whether the active entry is paused according to its own state
    pub fn active_is_paused(&self) -> bool {
        self.current_timer_index
            .and_then(|index| self.timers.get(index))
            .map_or(false, |timer| timer.lifecycle_state == LifecycleState::Paused)
    }

    /// Apply the stored paused flag to the active entry.
    ///
    /// The flag only overrides the active entry; every other entry keeps
    /// whatever state it was stored with.
    pub fn reconcile_paused(&mut self) {
        if !self.is_workout_paused {
            return;
        }
        if let Some(timer) = self
            .current_timer_index
            .and_then(|index| self.timers.get_mut(index))
        {
            timer.lifecycle_state = LifecycleState::Paused;
        }
    }
}
