//! Background tasks module
//!
//! Periodic tick tasks that drive the workout and standalone timers.

pub mod standalone;
pub mod ticker;
pub mod workout_runner;

// Re-export main types
pub use standalone::StandaloneTimer;
pub use ticker::{spawn_ticker, TickHandle};
pub use workout_runner::WorkoutRunner;
