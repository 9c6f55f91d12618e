//! Read-only progress view of a workout

use serde::{Deserialize, Serialize};

use super::{LifecycleState, TimerKind, TimerMode};

/// Progress snapshot handed to observers after every tick or action
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WorkoutStatus {
    pub current_index: Option<usize>,
    pub timer_count: usize,
    pub active: Option<ActiveTimerStatus>,
    pub elapsed_ms: u64,
    pub total_elapsed_ms: u64,
    pub total_workout_ms: u64,
    pub remaining_ms: u64,
    pub editable: bool,
    pub finished: bool,
}

/// What the active timer's engine is showing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveTimerStatus {
    pub kind: TimerKind,
    pub state: LifecycleState,
    /// Remaining time, or elapsed time for count-up timers
    pub counter_ms: u64,
    pub round: u32,
    pub total_rounds: u32,
    pub mode: TimerMode,
    pub description: Option<String>,
}

impl WorkoutStatus {
    /// Whether the active entry is counting
    pub fn is_running(&self) -> bool {
        self.active
            .as_ref()
            .map_or(false, |active| active.state == LifecycleState::Running)
    }

    pub fn is_paused(&self) -> bool {
        self.active
            .as_ref()
            .map_or(false, |active| active.state == LifecycleState::Paused)
    }
}
