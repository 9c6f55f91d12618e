//! Workout orchestration
//!
//! [`Workout`] owns the ordered timer list and the playback counters. Every
//! list edit is re-encoded into the location, and every tick or transition is
//! handed to the session manager. One workout-driven engine per entry follows
//! the list so callers can show per-timer remaining time, round and mode.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{
    ActiveTimerStatus, HistoryEntry, LifecycleState, TimerConfig, TimerKind, TimerUpdate,
    WorkoutSession, WorkoutStatus,
};
use crate::{
    codec,
    engine::TimerEngine,
    error::DecodeError,
    services::{HistoryLog, KeyValueStore, LocationState, SessionManager, CONFIG_PARAM},
    utils::Clock,
};

/// Period of the workout tick
pub const WORKOUT_TICK_MS: u64 = 100;

/// What a tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing is running
    Idle,
    /// Counters moved forward
    Counted,
    /// The active timer finished and the next one started
    Advanced,
    /// The last timer finished
    Finished,
}

pub struct Workout {
    timers: Vec<TimerConfig>,
    engines: Vec<TimerEngine>,
    current_index: Option<usize>,
    elapsed_ms: u64,
    total_elapsed_ms: u64,
    location: Box<dyn LocationState>,
    sessions: SessionManager,
    history: HistoryLog,
    clock: Arc<dyn Clock>,
}

impl Workout {
    /// Open the workout from its collaborators.
    ///
    /// An unexpired saved session wins. Otherwise the list is decoded from the
    /// location, and a malformed list is returned as an error.
    pub fn open(
        location: Box<dyn LocationState>,
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, DecodeError> {
        let mut workout = Self {
            timers: Vec::new(),
            engines: Vec::new(),
            current_index: None,
            elapsed_ms: 0,
            total_elapsed_ms: 0,
            location,
            sessions: SessionManager::new(Arc::clone(&store), Arc::clone(&clock)),
            history: HistoryLog::new(store),
            clock,
        };

        if let Some(session) = workout.sessions.load() {
            workout.restore(session);
        } else if let Some(encoded) = workout.location.get(CONFIG_PARAM) {
            let (valid, invalid): (Vec<_>, Vec<_>) = codec::decode(&encoded)?
                .into_iter()
                .partition(TimerConfig::is_valid);
            for timer in &invalid {
                warn!(
                    "Dropping {} timer with unusable settings: {}",
                    timer.kind,
                    codec::encode(std::slice::from_ref(timer))
                );
            }
            workout.timers = valid;
            info!("Loaded {} timers from location", workout.timers.len());
        }

        workout.rebuild_engines();
        workout.sync_location();
        Ok(workout)
    }

    fn restore(&mut self, session: WorkoutSession) {
        self.timers = session.timers;
        self.current_index = session
            .current_timer_index
            .filter(|index| *index < self.timers.len());
        if self.current_index.is_some() {
            self.elapsed_ms = session.elapsed_time;
            self.total_elapsed_ms = session.total_elapsed_time;
        } else {
            self.timers.iter_mut().for_each(TimerConfig::reset_playback);
        }
        info!(
            "Restored workout session: {} timers, active {:?}, {}ms elapsed",
            self.timers.len(),
            self.current_index,
            self.total_elapsed_ms
        );
    }

    // ---- queries ----

    pub fn timers(&self) -> &[TimerConfig] {
        &self.timers
    }

    pub fn timer(&self, id: &str) -> Option<&TimerConfig> {
        self.timers.iter().find(|timer| timer.id == id)
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    /// Elapsed time of the active timer
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn total_elapsed_ms(&self) -> u64 {
        self.total_elapsed_ms
    }

    /// Sum of every entry's nominal duration
    pub fn total_workout_ms(&self) -> u64 {
        self.timers
            .iter()
            .map(TimerConfig::nominal_ms)
            .fold(0, u64::saturating_add)
    }

    pub fn remaining_ms(&self) -> u64 {
        self.total_workout_ms().saturating_sub(self.total_elapsed_ms)
    }

    /// Editable exactly when every entry is idle
    pub fn is_editable(&self) -> bool {
        self.timers
            .iter()
            .all(|timer| timer.lifecycle_state == LifecycleState::Idle)
    }

    fn active_state(&self) -> Option<LifecycleState> {
        self.current_index
            .and_then(|index| self.timers.get(index))
            .map(|timer| timer.lifecycle_state)
    }

    pub fn is_running(&self) -> bool {
        self.active_state() == Some(LifecycleState::Running)
    }

    pub fn is_paused(&self) -> bool {
        self.active_state() == Some(LifecycleState::Paused)
    }

    /// Every entry played or skipped
    pub fn is_completed(&self) -> bool {
        !self.timers.is_empty()
            && self
                .timers
                .iter()
                .all(|timer| timer.lifecycle_state == LifecycleState::Completed)
    }

    pub fn engine(&self, index: usize) -> Option<&TimerEngine> {
        self.engines.get(index)
    }

    pub fn active_engine(&self) -> Option<&TimerEngine> {
        self.current_index.and_then(|index| self.engines.get(index))
    }

    /// Current list in its share-link encoding
    pub fn encoded(&self) -> String {
        codec::encode(&self.timers)
    }

    pub fn location(&self) -> &dyn LocationState {
        self.location.as_ref()
    }

    /// Finished workouts, oldest first
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.history.entries()
    }

    pub fn status(&self) -> WorkoutStatus {
        let active = self.current_index.and_then(|index| {
            let timer = self.timers.get(index)?;
            let engine = self.engines.get(index)?;
            Some(ActiveTimerStatus {
                kind: timer.kind,
                state: timer.lifecycle_state,
                counter_ms: engine.counter_ms(),
                round: engine.round(),
                total_rounds: engine.total_rounds(),
                mode: engine.mode(),
                description: timer.description.clone(),
            })
        });

        WorkoutStatus {
            current_index: self.current_index,
            timer_count: self.timers.len(),
            active,
            elapsed_ms: self.elapsed_ms,
            total_elapsed_ms: self.total_elapsed_ms,
            total_workout_ms: self.total_workout_ms(),
            remaining_ms: self.remaining_ms(),
            editable: self.is_editable(),
            finished: self.is_completed(),
        }
    }

    /// Snapshot in its persisted form
    pub fn snapshot(&self) -> WorkoutSession {
        WorkoutSession {
            timers: self.timers.clone(),
            current_timer_index: self.current_index,
            elapsed_time: self.elapsed_ms,
            total_elapsed_time: self.total_elapsed_ms,
            last_updated: self.clock.now_ms(),
            is_workout_editable: self.is_editable(),
            is_workout_paused: self.is_paused(),
            revision: 0,
        }
    }

    // ---- list edits ----

    fn ensure_editable(&self, action: &str) -> bool {
        if !self.is_editable() {
            warn!("Refusing to {} while the workout is in progress", action);
            return false;
        }
        true
    }

    /// Append a timer
    pub fn add_timer(&mut self, mut timer: TimerConfig) -> bool {
        if !self.ensure_editable("add a timer") {
            return false;
        }
        if !timer.is_valid() {
            warn!("Refusing to add invalid {} timer", timer.kind);
            return false;
        }
        if timer.id.is_empty() || self.timer(&timer.id).is_some() {
            timer.id = Uuid::new_v4().to_string();
        }
        timer.reset_playback();
        debug!("Adding {} timer {}", timer.kind, timer.id);
        self.timers.push(timer);
        self.after_edit();
        true
    }

    pub fn remove_timer(&mut self, id: &str) -> bool {
        if !self.ensure_editable("remove a timer") {
            return false;
        }
        let before = self.timers.len();
        self.timers.retain(|timer| timer.id != id);
        if self.timers.len() == before {
            return false;
        }
        debug!("Removed timer {}", id);
        self.after_edit();
        true
    }

    /// Merge a partial update into the timer with `id`
    pub fn update_timer(&mut self, id: &str, update: TimerUpdate) -> bool {
        if !self.ensure_editable("edit a timer") {
            return false;
        }
        let Some(position) = self.timers.iter().position(|timer| timer.id == id) else {
            return false;
        };
        let mut updated = self.timers[position].clone();
        update.apply_to(&mut updated);
        if !updated.is_valid() {
            warn!("Refusing update that makes timer {} invalid", id);
            return false;
        }
        self.timers[position] = updated;
        debug!("Updated timer {}", id);
        self.after_edit();
        true
    }

    /// Replace the order with `ids`, which must be a permutation of the list
    pub fn reorder(&mut self, ids: &[String]) -> bool {
        if !self.ensure_editable("reorder timers") {
            return false;
        }
        if ids.len() != self.timers.len() {
            warn!("Reorder with {} ids for {} timers", ids.len(), self.timers.len());
            return false;
        }

        let mut remaining: Vec<Option<TimerConfig>> = self.timers.iter().cloned().map(Some).collect();
        let mut reordered = Vec::with_capacity(ids.len());
        for id in ids {
            let found = remaining
                .iter_mut()
                .find(|slot| matches!(slot, Some(timer) if &timer.id == id))
                .and_then(Option::take);
            match found {
                Some(timer) => reordered.push(timer),
                None => {
                    warn!("Reorder names unknown or repeated timer {}", id);
                    return false;
                }
            }
        }

        self.timers = reordered;
        self.after_edit();
        true
    }

    fn after_edit(&mut self) {
        self.rebuild_engines();
        self.sync_location();
    }

    fn sync_location(&mut self) {
        if self.timers.is_empty() {
            self.location.delete(CONFIG_PARAM);
        } else {
            let encoded = codec::encode(&self.timers);
            self.location.set(CONFIG_PARAM, &encoded);
        }
    }

    fn rebuild_engines(&mut self) {
        self.engines = self.timers.iter().map(TimerEngine::workout_driven).collect();
        self.sync_engines();
    }

    /// Project counters and lifecycle into every engine
    fn sync_engines(&mut self) {
        let current = self.current_index;
        let elapsed = self.elapsed_ms;
        for (index, (timer, engine)) in self.timers.iter_mut().zip(self.engines.iter_mut()).enumerate() {
            let active = current == Some(index);
            engine.sync(if active { elapsed } else { 0 }, timer.lifecycle_state, active);
            if timer.kind == TimerKind::Interval {
                timer.mode = timer.lifecycle_state.is_active().then(|| engine.mode());
            }
        }
    }

    // ---- playback ----

    /// Start from the first timer. Refused on an empty list.
    pub fn start(&mut self) -> bool {
        if self.timers.is_empty() {
            debug!("Ignoring start on an empty workout");
            return false;
        }

        for (index, timer) in self.timers.iter_mut().enumerate() {
            timer.reset_playback();
            if index == 0 {
                timer.lifecycle_state = LifecycleState::Running;
            }
        }
        self.current_index = Some(0);
        self.elapsed_ms = 0;
        self.total_elapsed_ms = 0;
        self.rebuild_engines();

        info!(
            "Workout started: {} timers, {}ms total",
            self.timers.len(),
            self.total_workout_ms()
        );
        true
    }

    /// Pause the active timer and persist right away
    pub fn pause(&mut self) -> bool {
        let Some(index) = self.current_index else {
            return false;
        };
        if self.timers[index].lifecycle_state != LifecycleState::Running {
            return false;
        }
        self.timers[index].lifecycle_state = LifecycleState::Paused;
        self.sync_engines();
        let snapshot = self.snapshot();
        self.sessions.save_immediate(snapshot);
        info!("Workout paused at timer {} ({}ms)", index + 1, self.elapsed_ms);
        true
    }

    pub fn resume(&mut self) -> bool {
        let Some(index) = self.current_index else {
            return false;
        };
        if self.timers[index].lifecycle_state != LifecycleState::Paused {
            return false;
        }
        self.timers[index].lifecycle_state = LifecycleState::Running;
        self.sync_engines();
        info!("Workout resumed at timer {}", index + 1);
        true
    }

    /// Complete the active timer and move on.
    ///
    /// A skipped timer still counts its full nominal duration towards the
    /// workout's elapsed total.
    pub fn advance(&mut self, skip: bool) -> bool {
        let Some(index) = self.current_index else {
            return false;
        };

        let nominal = self.timers[index].nominal_ms();
        {
            let timer = &mut self.timers[index];
            timer.lifecycle_state = LifecycleState::Completed;
            if skip {
                timer.skipped = true;
            }
        }
        if skip {
            let unplayed = nominal.saturating_sub(self.elapsed_ms);
            self.total_elapsed_ms += unplayed;
            info!("Skipped timer {} with {}ms left", index + 1, unplayed);
        }

        let next = index + 1;
        self.elapsed_ms = 0;
        if next < self.timers.len() {
            self.timers[next].lifecycle_state = LifecycleState::Running;
            self.current_index = Some(next);
            self.sync_engines();
            let snapshot = self.snapshot();
            self.sessions.save_immediate(snapshot);
            info!("Advanced to timer {} of {}", next + 1, self.timers.len());
        } else {
            self.current_index = None;
            self.sync_engines();
            self.finish();
        }
        true
    }

    fn finish(&mut self) {
        info!("Workout completed in {}ms", self.total_elapsed_ms);
        let completed_at = DateTime::<Utc>::from_timestamp_millis(self.clock.now_ms())
            .unwrap_or_else(Utc::now);
        self.history.record(HistoryEntry {
            id: Uuid::new_v4().to_string(),
            completed_at,
            timers: self.timers.clone(),
            total_elapsed_ms: self.total_elapsed_ms,
        });
        self.sessions.clear();
    }

    /// Back to an idle, editable list. No-op when already there.
    pub fn reset(&mut self) -> bool {
        let pristine = self.current_index.is_none()
            && self.elapsed_ms == 0
            && self.total_elapsed_ms == 0
            && self
                .timers
                .iter()
                .all(|timer| timer.lifecycle_state == LifecycleState::Idle && !timer.skipped);
        if pristine {
            return false;
        }

        self.timers.iter_mut().for_each(TimerConfig::reset_playback);
        self.current_index = None;
        self.elapsed_ms = 0;
        self.total_elapsed_ms = 0;
        self.sync_engines();
        self.sessions.clear();
        info!("Workout reset");
        true
    }

    /// One workout tick: count, auto-advance and persist
    pub fn tick(&mut self) -> TickOutcome {
        if !self.is_running() {
            return TickOutcome::Idle;
        }
        let Some(index) = self.current_index else {
            return TickOutcome::Idle;
        };

        self.elapsed_ms += WORKOUT_TICK_MS;
        self.total_elapsed_ms += WORKOUT_TICK_MS;

        let outcome = if self.elapsed_ms >= self.timers[index].nominal_ms() {
            self.advance(false);
            if self.current_index.is_some() {
                TickOutcome::Advanced
            } else {
                TickOutcome::Finished
            }
        } else {
            self.sync_engines();
            let snapshot = self.snapshot();
            self.sessions.save(snapshot);
            TickOutcome::Counted
        };

        self.sessions.flush_pending();
        outcome
    }

    /// Write the current state now, e.g. before shutting down
    pub fn persist_now(&mut self) {
        if self.current_index.is_some() {
            let snapshot = self.snapshot();
            self.sessions.save_immediate(snapshot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        services::{session_manager::SESSION_KEY, MemoryLocation, MemoryStore},
        state::{TimeSpec, TimerMode},
        utils::ManualClock,
    };

    struct Fixture {
        workout: Workout,
        store: MemoryStore,
        clock: ManualClock,
    }

    fn fixture() -> Fixture {
        let store = MemoryStore::new();
        let clock = ManualClock::new(1_000_000);
        let workout = Workout::open(
            Box::new(MemoryLocation::new()),
            Arc::new(store.clone()),
            Arc::new(clock.clone()),
        )
        .unwrap();
        Fixture { workout, store, clock }
    }

    fn two_timers() -> Fixture {
        let mut f = fixture();
        assert!(f.workout.add_timer(TimerConfig::count_down(TimeSpec::new(0, 20))));
        assert!(f.workout.add_timer(TimerConfig::count_up(TimeSpec::new(0, 15))));
        f
    }

    fn ticks(f: &mut Fixture, n: u64) {
        for _ in 0..n {
            f.clock.advance(WORKOUT_TICK_MS as i64);
            f.workout.tick();
        }
    }

    fn saved(store: &MemoryStore) -> Option<WorkoutSession> {
        store
            .get(SESSION_KEY)
            .unwrap()
            .map(|raw| serde_json::from_str(&raw).unwrap())
    }

    #[test]
    fn edits_are_encoded_into_location() {
        let mut f = two_timers();
        assert_eq!(
            f.workout.location().get(CONFIG_PARAM).as_deref(),
            Some("countdown|0,20|||;stopwatch|0,15|||")
        );

        let ids: Vec<String> = f.workout.timers().iter().rev().map(|t| t.id.clone()).collect();
        assert!(f.workout.reorder(&ids));
        assert_eq!(f.workout.encoded(), "stopwatch|0,15|||;countdown|0,20|||");

        let first = f.workout.timers()[0].id.clone();
        assert!(f.workout.update_timer(
            &first,
            TimerUpdate {
                description: Some(Some("jog".into())),
                ..Default::default()
            }
        ));
        assert_eq!(f.workout.encoded(), "stopwatch|0,15|||jog;countdown|0,20|||");

        assert!(f.workout.remove_timer(&first));
        assert!(!f.workout.remove_timer(&first));
        assert_eq!(f.workout.encoded(), "countdown|0,20|||");

        let last = f.workout.timers()[0].id.clone();
        f.workout.remove_timer(&last);
        assert_eq!(f.workout.location().get(CONFIG_PARAM), None);
    }

    #[test]
    fn reorder_requires_a_permutation() {
        let mut f = two_timers();
        let first = f.workout.timers()[0].id.clone();
        assert!(!f.workout.reorder(&[first.clone()]));
        assert!(!f.workout.reorder(&[first.clone(), first]));
        assert!(!f.workout.reorder(&["a".to_string(), "b".to_string()]));
    }

    #[test]
    fn invalid_timers_are_refused() {
        let mut f = fixture();
        assert!(!f.workout.add_timer(TimerConfig::count_down(TimeSpec::new(0, 0))));
        assert!(f.workout.timers().is_empty());
    }

    #[test]
    fn start_requires_timers() {
        let mut f = fixture();
        assert!(!f.workout.start());
        assert_eq!(f.workout.current_index(), None);
    }

    #[test]
    fn start_runs_first_and_locks_edits() {
        let mut f = two_timers();
        assert!(f.workout.start());
        assert_eq!(f.workout.current_index(), Some(0));
        assert_eq!(f.workout.timers()[0].lifecycle_state, LifecycleState::Running);
        assert_eq!(f.workout.timers()[1].lifecycle_state, LifecycleState::Idle);
        assert_eq!(f.workout.total_workout_ms(), 35_000);
        assert!(!f.workout.is_editable());
        assert!(!f.workout.add_timer(TimerConfig::count_down(TimeSpec::new(1, 0))));
        assert_eq!(f.workout.timers().len(), 2);
    }

    #[test]
    fn skip_counts_full_nominal_duration() {
        let mut f = two_timers();
        f.workout.start();
        ticks(&mut f, 50);
        assert_eq!(f.workout.elapsed_ms(), 5_000);

        assert!(f.workout.advance(true));
        let timers = f.workout.timers();
        assert_eq!(timers[0].lifecycle_state, LifecycleState::Completed);
        assert!(timers[0].skipped);
        assert_eq!(timers[1].lifecycle_state, LifecycleState::Running);
        assert_eq!(f.workout.current_index(), Some(1));
        assert_eq!(f.workout.elapsed_ms(), 0);
        assert_eq!(f.workout.total_elapsed_ms(), 20_000);
        assert_eq!(f.workout.remaining_ms(), 15_000);

        let stored = saved(&f.store).unwrap();
        assert_eq!(stored.current_timer_index, Some(1));
    }

    #[test]
    fn ticks_auto_advance_and_finish() {
        let mut f = two_timers();
        f.workout.start();
        ticks(&mut f, 199);
        assert_eq!(f.workout.current_index(), Some(0));
        assert_eq!(f.workout.active_engine().unwrap().counter_ms(), 100);

        f.clock.advance(100);
        assert_eq!(f.workout.tick(), TickOutcome::Advanced);
        assert_eq!(f.workout.current_index(), Some(1));
        assert!(!f.workout.timers()[0].skipped);

        ticks(&mut f, 149);
        f.clock.advance(100);
        assert_eq!(f.workout.tick(), TickOutcome::Finished);
        assert_eq!(f.workout.current_index(), None);
        assert!(f.workout.is_completed());
        assert_eq!(f.workout.total_elapsed_ms(), 35_000);
        assert_eq!(f.workout.tick(), TickOutcome::Idle);

        // Finishing clears the session and records history
        assert!(saved(&f.store).is_none());
        let history = f.workout.history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].total_elapsed_ms, 35_000);
        assert_eq!(history[0].skipped_count(), 0);
    }

    #[test]
    fn pause_is_idempotent_and_persisted() {
        let mut f = two_timers();
        f.workout.start();
        ticks(&mut f, 30);

        assert!(f.workout.pause());
        let after_first = f.workout.snapshot();
        assert!(!f.workout.pause());
        assert_eq!(f.workout.snapshot(), after_first);

        let stored = saved(&f.store).unwrap();
        assert!(stored.is_workout_paused);
        assert_eq!(stored.elapsed_time, 3_000);

        // Paused workouts do not count
        assert_eq!(f.workout.tick(), TickOutcome::Idle);
        assert_eq!(f.workout.elapsed_ms(), 3_000);

        assert!(f.workout.resume());
        assert!(!f.workout.resume());
        assert!(f.workout.is_running());
    }

    #[test]
    fn reset_restores_editability_and_clears_session() {
        let mut f = two_timers();
        assert!(!f.workout.reset());

        f.workout.start();
        ticks(&mut f, 20);
        f.workout.advance(true);
        assert!(saved(&f.store).is_some());

        assert!(f.workout.reset());
        assert!(f.workout.is_editable());
        assert_eq!(f.workout.current_index(), None);
        assert_eq!(f.workout.total_elapsed_ms(), 0);
        assert!(f.workout.timers().iter().all(|t| !t.skipped));
        assert!(saved(&f.store).is_none());
        assert!(!f.workout.reset());
    }

    #[test]
    fn advance_without_active_timer_is_noop() {
        let mut f = two_timers();
        assert!(!f.workout.advance(false));
        assert!(!f.workout.pause());
        assert!(!f.workout.resume());
    }

    #[test]
    fn interval_mode_follows_engine() {
        let mut f = fixture();
        f.workout.add_timer(TimerConfig::interval(TimeSpec::new(0, 20), TimeSpec::new(0, 10), 8));
        f.workout.start();
        ticks(&mut f, 250);
        let timer = &f.workout.timers()[0];
        assert_eq!(timer.mode, Some(TimerMode::Rest));
        let status = f.workout.status();
        let active = status.active.unwrap();
        assert_eq!(active.counter_ms, 5_000);
        assert_eq!(active.round, 1);
        assert_eq!(active.total_rounds, 8);
    }

    #[test]
    fn reopening_restores_a_paused_session() {
        let mut f = two_timers();
        f.workout.start();
        ticks(&mut f, 42);
        f.workout.pause();

        f.clock.advance(60_000);
        let reopened = Workout::open(
            Box::new(MemoryLocation::new()),
            Arc::new(f.store.clone()),
            Arc::new(f.clock.clone()),
        )
        .unwrap();
        assert_eq!(reopened.current_index(), Some(0));
        assert!(reopened.is_paused());
        assert_eq!(reopened.elapsed_ms(), 4_200);
        assert_eq!(reopened.active_engine().unwrap().counter_ms(), 15_800);
        assert_eq!(
            reopened.location().get(CONFIG_PARAM).as_deref(),
            Some("countdown|0,20|||;stopwatch|0,15|||")
        );
    }

    #[test]
    fn opening_decodes_location_and_surfaces_errors() {
        let location = MemoryLocation::new().with_param(CONFIG_PARAM, "tabata|0,20|0,10|8|;xy|1,0||3|");
        let workout = Workout::open(
            Box::new(location),
            Arc::new(MemoryStore::new()),
            Arc::new(ManualClock::new(0)),
        )
        .unwrap();
        assert_eq!(workout.timers().len(), 2);
        assert_eq!(workout.total_workout_ms(), 240_000 + 180_000);

        let broken = MemoryLocation::new().with_param(CONFIG_PARAM, "bogus|1,2|||");
        let result = Workout::open(
            Box::new(broken),
            Arc::new(MemoryStore::new()),
            Arc::new(ManualClock::new(0)),
        );
        assert!(matches!(result, Err(DecodeError::InvalidTimerKind { .. })));
    }
}
