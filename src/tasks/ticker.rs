//! Cancellable periodic tick task

use std::time::Duration;

use tokio::{
    sync::oneshot,
    task::JoinHandle,
    time::{interval_at, Instant},
};
use tracing::debug;

/// Handle to a running tick task. Dropping it cancels the task.
#[derive(Debug)]
pub struct TickHandle {
    name: &'static str,
    stop_tx: Option<oneshot::Sender<()>>,
    join: JoinHandle<()>,
}

impl TickHandle {
    /// Whether the task is still ticking
    pub fn is_live(&self) -> bool {
        !self.join.is_finished()
    }

    /// Stop the task before its next tick
    pub fn cancel(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
            debug!("Cancelling {} ticker", self.name);
        }
        self.join.abort();
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Call `on_tick` every `period` until it returns `false` or the handle goes away.
///
/// The first call happens one full period after spawning. Must be called from
/// within a Tokio runtime.
pub fn spawn_ticker<F>(name: &'static str, period: Duration, mut on_tick: F) -> TickHandle
where
    F: FnMut() -> bool + Send + 'static,
{
    let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

    let join = tokio::spawn(async move {
        debug!("Starting {} ticker every {:?}", name, period);
        let mut interval = interval_at(Instant::now() + period, period);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if !on_tick() {
                        debug!("{} ticker finished", name);
                        break;
                    }
                }
                _ = &mut stop_rx => {
                    debug!("{} ticker stopped", name);
                    break;
                }
            }
        }
    });

    TickHandle {
        name,
        stop_tx: Some(stop_tx),
        join,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        atomic::{AtomicU32, Ordering},
        Arc,
    };
    use tokio::time::sleep;

    #[tokio::test(start_paused = true)]
    async fn ticks_until_callback_declines() {
        let count = Arc::new(AtomicU32::new(0));
        let seen = Arc::clone(&count);
        let handle = spawn_ticker("test", Duration::from_millis(10), move || {
            seen.fetch_add(1, Ordering::SeqCst) + 1 < 5
        });

        sleep(Duration::from_millis(25)).await;
        assert_eq!(count.load(Ordering::SeqCst), 2);
        assert!(handle.is_live());

        sleep(Duration::from_millis(100)).await;
        assert_eq!(count.load(Ordering::SeqCst), 5);
        assert!(!handle.is_live());
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_ticker_stops_counting() {
        let count = Arc::new(AtomicU32::new(0));
        let seen = Arc::clone(&count);
        let handle = spawn_ticker("test", Duration::from_millis(10), move || {
            seen.fetch_add(1, Ordering::SeqCst);
            true
        });

        sleep(Duration::from_millis(35)).await;
        handle.cancel();
        sleep(Duration::from_millis(100)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }
}
