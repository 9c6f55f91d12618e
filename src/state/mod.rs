//! State management module
//!
//! Timer configuration, the persisted session, history records and the
//! workout orchestrator that owns them.

pub mod history;
pub mod session;
pub mod status;
pub mod timer_config;
pub mod workout;

// Re-export main types
pub use history::HistoryEntry;
pub use session::WorkoutSession;
pub use status::{ActiveTimerStatus, WorkoutStatus};
pub use timer_config::{LifecycleState, TimeSpec, TimerConfig, TimerKind, TimerMode, TimerUpdate};
pub use workout::{TickOutcome, Workout, WORKOUT_TICK_MS};
