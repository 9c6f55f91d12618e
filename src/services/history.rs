//! Log of finished workouts

use std::sync::Arc;

use tracing::{info, warn};

use crate::{services::KeyValueStore, state::HistoryEntry};

/// Storage key of the history list
pub const HISTORY_KEY: &str = "workout_history";
/// Oldest entries are dropped past this many
pub const MAX_HISTORY: usize = 50;

#[derive(Clone)]
pub struct HistoryLog {
    store: Arc<dyn KeyValueStore>,
}

impl HistoryLog {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Finished workouts, oldest first
    pub fn entries(&self) -> Vec<HistoryEntry> {
        match self.store.get(HISTORY_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!("Discarding unreadable workout history: {}", e);
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Failed to read workout history: {}", e);
                Vec::new()
            }
        }
    }

    /// Append a finished workout
    pub fn record(&self, entry: HistoryEntry) {
        let mut entries = self.entries();
        entries.push(entry);
        if entries.len() > MAX_HISTORY {
            let excess = entries.len() - MAX_HISTORY;
            entries.drain(..excess);
        }

        let result = serde_json::to_string(&entries)
            .map_err(Into::into)
            .and_then(|json| self.store.set(HISTORY_KEY, &json));
        match result {
            Ok(()) => info!("Recorded finished workout ({} in history)", entries.len()),
            Err(e) => warn!("Failed to record workout history: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::MemoryStore;
    use chrono::Utc;

    fn entry(n: u64) -> HistoryEntry {
        HistoryEntry {
            id: format!("w{}", n),
            completed_at: Utc::now(),
            timers: Vec::new(),
            total_elapsed_ms: n,
        }
    }

    #[test]
    fn keeps_the_newest_entries() {
        let log = HistoryLog::new(Arc::new(MemoryStore::new()));
        for n in 0..(MAX_HISTORY as u64 + 5) {
            log.record(entry(n));
        }
        let entries = log.entries();
        assert_eq!(entries.len(), MAX_HISTORY);
        assert_eq!(entries[0].id, "w5");
    }
}
