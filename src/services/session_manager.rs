//! Throttled persistence of the workout in progress
//!
//! Writes are best-effort: store failures are logged and swallowed, and a
//! session that cannot be read is treated as absent.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::{
    services::KeyValueStore,
    state::WorkoutSession,
    utils::Clock,
};

/// Storage key of the session snapshot
pub const SESSION_KEY: &str = "workout_state";
/// Minimum spacing of throttled writes
pub const WRITE_INTERVAL_MS: i64 = 1000;
/// Sessions older than this are discarded on load
pub const STATE_EXPIRY_MS: i64 = 3_600_000;

pub struct SessionManager {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    last_write_ms: Option<i64>,
    /// Latest snapshot held back by the throttle
    pending: Option<WorkoutSession>,
    revision: u64,
}

impl SessionManager {
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            last_write_ms: None,
            pending: None,
            revision: 0,
        }
    }

    /// Throttled save.
    ///
    /// Writes at once if the window is open, otherwise keeps the snapshot as
    /// the single trailing write for [`SessionManager::flush_pending`].
    pub fn save(&mut self, snapshot: WorkoutSession) {
        let now = self.clock.now_ms();
        if self.window_open(now) {
            self.pending = None;
            self.write(snapshot, now);
            self.last_write_ms = Some(now);
        } else {
            self.pending = Some(snapshot);
        }
    }

    /// Write the held-back snapshot once its window has elapsed
    pub fn flush_pending(&mut self) -> bool {
        let now = self.clock.now_ms();
        if self.pending.is_none() || !self.window_open(now) {
            return false;
        }
        if let Some(snapshot) = self.pending.take() {
            self.write(snapshot, now);
            self.last_write_ms = Some(now);
        }
        true
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Bypass the throttle for transitions that must not be lost
    pub fn save_immediate(&mut self, snapshot: WorkoutSession) {
        // A trailing write would otherwise land later with older state
        self.pending = None;
        let now = self.clock.now_ms();
        self.write(snapshot, now);
        self.last_write_ms = Some(now);
    }

    /// Read the saved session, dropping it if stale.
    ///
    /// The stored paused flag wins over the active entry's own state.
    pub fn load(&mut self) -> Option<WorkoutSession> {
        let raw = match self.store.get(SESSION_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("Failed to read workout session: {}", e);
                return None;
            }
        };

        let mut session: WorkoutSession = match serde_json::from_str(&raw) {
            Ok(session) => session,
            Err(e) => {
                warn!("Discarding unreadable workout session: {}", e);
                return None;
            }
        };

        let age = self.clock.now_ms() - session.last_updated;
        if age > STATE_EXPIRY_MS {
            info!("Saved workout session is {}s old, discarding", age / 1000);
            self.clear();
            return None;
        }

        session.reconcile_paused();
        self.revision = self.revision.max(session.revision);
        debug!(
            "Loaded workout session revision {} at timer {:?}",
            session.revision, session.current_timer_index
        );
        Some(session)
    }

    /// Remove the saved session
    pub fn clear(&mut self) {
        self.pending = None;
        if let Err(e) = self.store.delete(SESSION_KEY) {
            error!("Failed to clear workout session: {}", e);
        } else {
            debug!("Workout session cleared");
        }
    }

    fn window_open(&self, now: i64) -> bool {
        self.last_write_ms
            .map_or(true, |last| now - last >= WRITE_INTERVAL_MS)
    }

    fn write(&mut self, mut snapshot: WorkoutSession, now: i64) {
        self.revision += 1;
        snapshot.last_updated = now;
        snapshot.is_workout_paused = snapshot.active_is_paused();
        snapshot.revision = self.revision;

        let result = serde_json::to_string(&snapshot)
            .map_err(Into::into)
            .and_then(|json| self.store.set(SESSION_KEY, &json));

        match result {
            Ok(()) => debug!("Saved workout session revision {}", snapshot.revision),
            Err(e) => error!("Error saving workout state: {}", e),
        }
    }
}
