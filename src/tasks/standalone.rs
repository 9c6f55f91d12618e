//! Self-ticking single timer

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use super::ticker::{spawn_ticker, TickHandle};
use crate::{
    engine::{EngineChange, TimerEngine, TimerSettings, ENGINE_TICK_MS},
    state::{LifecycleState, TimerConfig},
};

/// A standalone engine with its own 10 ms tick.
///
/// At most one tick task is live, and only while the engine runs.
pub struct StandaloneTimer {
    engine: Arc<Mutex<TimerEngine>>,
    ticker: Option<TickHandle>,
}

impl StandaloneTimer {
    pub fn new(config: &TimerConfig) -> Self {
        Self {
            engine: Arc::new(Mutex::new(TimerEngine::standalone(config))),
            ticker: None,
        }
    }

    /// Copy of the engine as it stands
    pub fn engine(&self) -> Result<TimerEngine, String> {
        self.engine
            .lock()
            .map(|engine| engine.clone())
            .map_err(|e| format!("Failed to lock timer engine: {}", e))
    }

    pub fn has_live_ticker(&self) -> bool {
        self.ticker.as_ref().map_or(false, TickHandle::is_live)
    }

    fn apply<R, F>(&mut self, action: F) -> Result<R, String>
    where
        F: FnOnce(&mut TimerEngine) -> R,
    {
        let mut engine = self.engine.lock()
            .map_err(|e| format!("Failed to lock timer engine: {}", e))?;
        let result = action(&mut engine);
        let running = engine.state() == LifecycleState::Running;
        drop(engine);

        if running {
            self.arm();
        } else if let Some(ticker) = self.ticker.take() {
            ticker.cancel();
        }
        Ok(result)
    }

    pub fn start(&mut self) -> Result<bool, String> {
        self.apply(TimerEngine::start)
    }

    pub fn pause(&mut self) -> Result<bool, String> {
        self.apply(TimerEngine::pause)
    }

    pub fn resume(&mut self) -> Result<bool, String> {
        self.apply(TimerEngine::resume)
    }

    pub fn reset(&mut self) -> Result<(), String> {
        self.apply(TimerEngine::reset)
    }

    pub fn fast_forward(&mut self) -> Result<(), String> {
        self.apply(TimerEngine::fast_forward)
    }

    /// Form input for an idle timer
    pub fn edit(&mut self, settings: TimerSettings) -> Result<Option<EngineChange>, String> {
        self.apply(|engine| engine.edit(settings))
    }

    fn arm(&mut self) {
        if self.has_live_ticker() {
            return;
        }
        let engine = Arc::clone(&self.engine);
        self.ticker = Some(spawn_ticker(
            "engine",
            Duration::from_millis(ENGINE_TICK_MS),
            move || match engine.lock() {
                Ok(mut engine) => engine.tick() == LifecycleState::Running,
                Err(_) => false,
            },
        ));
    }
}
