//! Workout Timer - headless interval workout player
//!
//! Opens a workout from a share link or an encoded timer list, plays it on the
//! workout tick and pauses it on shutdown so a later run picks it up again.

use std::{sync::Arc, time::Duration};

use anyhow::Context;
use tokio::sync::watch;
use tracing::{info, warn};

use workout_timer::{
    config::Config,
    services::{FileStore, KeyValueStore, LocationState, SessionManager, UrlLocation},
    state::{Workout, WorkoutStatus},
    tasks::WorkoutRunner,
    utils::{format_ms, shutdown_signal, Clock, SystemClock},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("workout_timer={}", config.log_level()))
        .init();

    info!("Starting workout-timer v{}", env!("CARGO_PKG_VERSION"));

    let file_store = FileStore::new(config.state_dir());
    info!(
        "Configuration: state_dir={}, status_interval={}s",
        file_store.dir().display(),
        config.status_interval
    );

    let store: Arc<dyn KeyValueStore> = Arc::new(file_store);
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    if config.fresh {
        SessionManager::new(Arc::clone(&store), Arc::clone(&clock)).clear();
        info!("Discarded saved session");
    }

    let location = UrlLocation::parse(&config.link()).context("Invalid share link")?;
    let workout = Workout::open(Box::new(location), store, clock)
        .context("Failed to read the timer list")?;

    if workout.timers().is_empty() {
        warn!("Nothing to play, pass --workout or --url");
        return Ok(());
    }

    info!("Workout of {} timers, {} total:", workout.timers().len(), format_ms(workout.total_workout_ms()));
    for (index, timer) in workout.timers().iter().enumerate() {
        info!(
            "  {}. {} {}{}",
            index + 1,
            timer.kind,
            format_ms(timer.nominal_ms()),
            timer.description.as_deref().map(|d| format!(" ({})", d)).unwrap_or_default()
        );
    }
    if let Some(href) = workout.location().href() {
        info!("Share link: {}", href);
    }

    let restored = workout.current_index().is_some();
    let mut runner = WorkoutRunner::new(workout);

    let began = if restored {
        info!("Picking up the saved session");
        if runner.with_workout(Workout::is_paused).map_err(anyhow::Error::msg)? {
            runner.resume()
        } else {
            Ok(true)
        }
    } else {
        runner.start()
    }
    .map_err(anyhow::Error::msg)?;

    if !began {
        warn!("Workout could not be started");
        return Ok(());
    }

    let progress = report_progress(runner.subscribe(), config.status_period());

    tokio::select! {
        _ = progress => {
            let history = runner.with_workout(Workout::history).map_err(anyhow::Error::msg)?;
            if let Some(entry) = history.last() {
                info!(
                    "Workout finished in {} with {} skipped",
                    format_ms(entry.total_elapsed_ms),
                    entry.skipped_count()
                );
            }
        }
        _ = shutdown_signal() => {
            runner.shutdown().map_err(anyhow::Error::msg)?;
            info!("Workout paused, run again to continue");
        }
    }

    info!("Shutdown complete");
    Ok(())
}

/// Log progress every `period` until the workout finishes
async fn report_progress(status_rx: watch::Receiver<WorkoutStatus>, period: Duration) {
    let mut interval = tokio::time::interval(period);

    loop {
        interval.tick().await;
        let status = status_rx.borrow().clone();
        if status.finished {
            break;
        }
        log_status(&status);
    }
}

fn log_status(status: &WorkoutStatus) {
    let Some(active) = &status.active else {
        return;
    };
    let position = status.current_index.map_or(0, |index| index + 1);
    let state = if status.is_paused() {
        "paused"
    } else if status.is_running() {
        "running"
    } else {
        "idle"
    };

    if active.kind.has_rounds() {
        info!(
            "[{}/{}] {} {} {} round {}/{} {:?} | done {} | left {}",
            position,
            status.timer_count,
            state,
            active.kind,
            format_ms(active.counter_ms),
            active.round,
            active.total_rounds,
            active.mode,
            format_ms(status.total_elapsed_ms),
            format_ms(status.remaining_ms)
        );
    } else {
        info!(
            "[{}/{}] {} {} {} | done {} | left {}",
            position,
            status.timer_count,
            state,
            active.kind,
            format_ms(active.counter_ms),
            format_ms(status.total_elapsed_ms),
            format_ms(status.remaining_ms)
        );
    }
}
