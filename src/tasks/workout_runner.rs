//! Drives a workout on the 100 ms tick

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use tokio::sync::watch;
use tracing::{error, info, warn};

use super::ticker::{spawn_ticker, TickHandle};
use crate::state::{TickOutcome, Workout, WorkoutStatus, WORKOUT_TICK_MS};

/// Owns the workout and at most one live tick task for it.
///
/// Every control action is applied under the lock before the next tick can
/// observe the workout. The ticker runs only while the active timer runs.
pub struct WorkoutRunner {
    workout: Arc<Mutex<Workout>>,
    ticker: Option<TickHandle>,
    /// Channel for status updates
    status_tx: Arc<watch::Sender<WorkoutStatus>>,
    /// Keep the receiver alive to prevent channel closure
    _status_rx: watch::Receiver<WorkoutStatus>,
}

impl WorkoutRunner {
    /// Wrap a workout, resuming the tick if it was restored mid-run.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(workout: Workout) -> Self {
        let (status_tx, status_rx) = watch::channel(workout.status());
        let mut runner = Self {
            workout: Arc::new(Mutex::new(workout)),
            ticker: None,
            status_tx: Arc::new(status_tx),
            _status_rx: status_rx,
        };
        if let Err(e) = runner.reconcile_ticker() {
            error!("Failed to arm workout ticker: {}", e);
        }
        runner
    }

    /// Receive a status after every tick and action
    pub fn subscribe(&self) -> watch::Receiver<WorkoutStatus> {
        self.status_tx.subscribe()
    }

    /// Read from the workout
    pub fn with_workout<R, F>(&self, reader: F) -> Result<R, String>
    where
        F: FnOnce(&Workout) -> R,
    {
        self.workout
            .lock()
            .map(|workout| reader(&workout))
            .map_err(|e| format!("Failed to lock workout: {}", e))
    }

    pub fn status(&self) -> Result<WorkoutStatus, String> {
        self.with_workout(Workout::status)
    }

    pub fn has_live_ticker(&self) -> bool {
        self.ticker.as_ref().map_or(false, TickHandle::is_live)
    }

    /// Apply an action, publish the new status and arm or cancel the ticker
    pub fn update<F>(&mut self, action: &str, updater: F) -> Result<bool, String>
    where
        F: FnOnce(&mut Workout) -> bool,
    {
        let mut workout = self.workout.lock()
            .map_err(|e| format!("Failed to lock workout: {}", e))?;

        let changed = updater(&mut workout);
        let status = workout.status();
        drop(workout); // Release the lock early

        if changed {
            info!("Workout action: {}", action);
        }
        if let Err(e) = self.status_tx.send(status) {
            warn!("Failed to send status update: {}", e);
        }

        self.reconcile_ticker()?;
        Ok(changed)
    }

    pub fn start(&mut self) -> Result<bool, String> {
        self.update("start", Workout::start)
    }

    pub fn pause(&mut self) -> Result<bool, String> {
        self.update("pause", Workout::pause)
    }

    pub fn resume(&mut self) -> Result<bool, String> {
        self.update("resume", Workout::resume)
    }

    pub fn skip(&mut self) -> Result<bool, String> {
        self.update("skip", |workout| workout.advance(true))
    }

    pub fn reset(&mut self) -> Result<bool, String> {
        self.update("reset", Workout::reset)
    }

    /// Stop ticking and persist where the workout stands
    pub fn shutdown(&mut self) -> Result<(), String> {
        if let Some(ticker) = self.ticker.take() {
            ticker.cancel();
        }
        let mut workout = self.workout.lock()
            .map_err(|e| format!("Failed to lock workout: {}", e))?;
        if !workout.pause() {
            workout.persist_now();
        }
        info!("Workout runner shut down");
        Ok(())
    }

    fn reconcile_ticker(&mut self) -> Result<(), String> {
        let running = self.with_workout(Workout::is_running)?;

        if !running {
            if let Some(ticker) = self.ticker.take() {
                ticker.cancel();
            }
            return Ok(());
        }
        if self.has_live_ticker() {
            return Ok(());
        }

        let workout = Arc::clone(&self.workout);
        let status_tx = Arc::clone(&self.status_tx);
        self.ticker = Some(spawn_ticker(
            "workout",
            Duration::from_millis(WORKOUT_TICK_MS),
            move || {
                let mut workout = match workout.lock() {
                    Ok(workout) => workout,
                    Err(e) => {
                        error!("Failed to lock workout for tick: {}", e);
                        return false;
                    }
                };
                let outcome = workout.tick();
                let status = workout.status();
                drop(workout);

                if let Err(e) = status_tx.send(status) {
                    warn!("Failed to send status update: {}", e);
                }
                matches!(outcome, TickOutcome::Counted | TickOutcome::Advanced)
            },
        ));
        Ok(())
    }
}
