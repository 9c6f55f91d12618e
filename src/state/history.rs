//! Finished workout records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::TimerConfig;

/// A workout that ran to its last timer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub completed_at: DateTime<Utc>,
    pub timers: Vec<TimerConfig>,
    pub total_elapsed_ms: u64,
}

impl HistoryEntry {
    /// Number of entries that were skipped rather than played out
    pub fn skipped_count(&self) -> usize {
        self.timers.iter().filter(|timer| timer.skipped).count()
    }
}
