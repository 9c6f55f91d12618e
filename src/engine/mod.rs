//! Per-timer engines
//!
//! A [`TimerEngine`] is the tick and round state machine behind a single
//! timer. How it is clocked is a [`ClockSource`]: a standalone engine advances
//! itself on a 10 ms tick, a workout-driven engine is handed the workout's
//! elapsed time and lifecycle and projects them into its own display state.

pub mod timer_engine;

pub use timer_engine::{ClockSource, EngineChange, TimerEngine, TimerSettings, ENGINE_TICK_MS};
