//! Utility functions module
//!
//! Time arithmetic, clocks and signal handling shared across the crate.

pub mod clock;
pub mod signals;
pub mod time;

// Re-export main functions
pub use clock::{Clock, ManualClock, SystemClock};
pub use signals::shutdown_signal;
pub use time::{format_ms, format_ms_hundredths, TimeDisplay};
