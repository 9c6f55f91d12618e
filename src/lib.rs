//! Workout Timer - an interval workout timer engine
//!
//! Builds workouts from stopwatch, countdown, interval and fixed-round timers,
//! plays them on a 100 ms tick and keeps the list in a shareable location and
//! the session in a key-value store.

pub mod codec;
pub mod config;
pub mod engine;
pub mod error;
pub mod services;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use engine::{ClockSource, TimerEngine};
pub use error::{DecodeError, StoreError};
pub use state::{TimerConfig, TimerKind, Workout, WorkoutStatus};
pub use tasks::{StandaloneTimer, WorkoutRunner};
pub use utils::signals::shutdown_signal;
