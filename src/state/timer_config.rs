//! Timer configuration and its per-entry lifecycle

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of timer. The serialized names are the ones used in share links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerKind {
    /// Count-up stopwatch that stops at its target
    #[serde(rename = "stopwatch")]
    CountUp,
    /// Single countdown
    #[serde(rename = "countdown")]
    CountDown,
    /// Work/rest intervals repeated for a number of rounds
    #[serde(rename = "tabata")]
    Interval,
    /// The same countdown repeated for a number of rounds
    #[serde(rename = "xy")]
    FixedRounds,
}

impl TimerKind {
    pub const ALL: [TimerKind; 4] = [
        TimerKind::CountUp,
        TimerKind::CountDown,
        TimerKind::Interval,
        TimerKind::FixedRounds,
    ];

    /// Name used in the encoded list format
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerKind::CountUp => "stopwatch",
            TimerKind::CountDown => "countdown",
            TimerKind::Interval => "tabata",
            TimerKind::FixedRounds => "xy",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }

    /// Whether the counter runs towards zero
    pub fn counts_down(&self) -> bool {
        !matches!(self, TimerKind::CountUp)
    }

    /// Whether the kind repeats over rounds
    pub fn has_rounds(&self) -> bool {
        matches!(self, TimerKind::Interval | TimerKind::FixedRounds)
    }
}

impl fmt::Display for TimerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A minutes/seconds pair as entered by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimeSpec {
    pub minutes: u32,
    pub seconds: u32,
}

impl TimeSpec {
    pub const MAX_MINUTES: u32 = 60;
    pub const MAX_SECONDS: u32 = 59;

    pub fn new(minutes: u32, seconds: u32) -> Self {
        Self { minutes, seconds }
    }

    pub fn from_secs(secs: u32) -> Self {
        Self::new(secs / 60, secs % 60)
    }

    pub fn as_ms(&self) -> u64 {
        u64::from(self.minutes) * 60_000 + u64::from(self.seconds) * 1000
    }

    /// Minutes in [0, 60] and seconds in [0, 59]
    pub fn in_range(&self) -> bool {
        self.minutes <= Self::MAX_MINUTES && self.seconds <= Self::MAX_SECONDS
    }
}

/// Sub-phase of an interval timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerMode {
    #[default]
    Work,
    Rest,
}

/// Lifecycle of a single timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleState {
    #[default]
    Idle,
    Running,
    Paused,
    Completed,
}

impl LifecycleState {
    /// Running or paused
    pub fn is_active(&self) -> bool {
        matches!(self, LifecycleState::Running | LifecycleState::Paused)
    }
}

/// One configured timer in a workout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerConfig {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TimerKind,
    pub work_duration: TimeSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest_duration: Option<TimeSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_rounds: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<TimerMode>,
    #[serde(default, rename = "state")]
    pub lifecycle_state: LifecycleState,
    #[serde(default)]
    pub skipped: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TimerConfig {
    /// A fresh idle timer with a new id
    pub fn new(kind: TimerKind, work_duration: TimeSpec) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            work_duration,
            rest_duration: None,
            total_rounds: None,
            mode: None,
            lifecycle_state: LifecycleState::Idle,
            skipped: false,
            description: None,
        }
    }

    pub fn count_up(work: TimeSpec) -> Self {
        Self::new(TimerKind::CountUp, work)
    }

    pub fn count_down(work: TimeSpec) -> Self {
        Self::new(TimerKind::CountDown, work)
    }

    pub fn interval(work: TimeSpec, rest: TimeSpec, rounds: u32) -> Self {
        Self::new(TimerKind::Interval, work)
            .with_rest(rest)
            .with_rounds(rounds)
    }

    pub fn fixed_rounds(work: TimeSpec, rounds: u32) -> Self {
        Self::new(TimerKind::FixedRounds, work).with_rounds(rounds)
    }

    pub fn with_rest(mut self, rest: TimeSpec) -> Self {
        self.rest_duration = Some(rest);
        self
    }

    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.total_rounds = Some(rounds);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn work_ms(&self) -> u64 {
        self.work_duration.as_ms()
    }

    pub fn rest_ms(&self) -> u64 {
        self.rest_duration.map(|rest| rest.as_ms()).unwrap_or(0)
    }

    /// Rounds with the "absent means one" rule applied
    pub fn rounds(&self) -> u32 {
        self.total_rounds.unwrap_or(1).max(1)
    }

    /// Configured time for one full pass over all rounds
    pub fn nominal_ms(&self) -> u64 {
        self.work_ms()
            .saturating_add(self.rest_ms())
            .saturating_mul(u64::from(self.rounds()))
    }

    /// Whether the entry could be started as configured
    pub fn is_valid(&self) -> bool {
        if !self.work_duration.in_range() || self.work_ms() == 0 {
            return false;
        }
        match self.kind {
            TimerKind::CountUp | TimerKind::CountDown => true,
            TimerKind::FixedRounds => self.total_rounds.map_or(true, |r| r > 0),
            TimerKind::Interval => {
                let rest_ok = self.rest_duration.map_or(false, |rest| rest.in_range() && rest.as_ms() > 0);
                rest_ok && self.total_rounds.map_or(true, |r| r > 0)
            }
        }
    }

    /// Clear session-local playback fields
    pub fn reset_playback(&mut self) {
        self.lifecycle_state = LifecycleState::Idle;
        self.skipped = false;
        self.mode = None;
    }
}

/// Partial update merged into an existing entry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimerUpdate {
    pub kind: Option<TimerKind>,
    pub work_duration: Option<TimeSpec>,
    pub rest_duration: Option<Option<TimeSpec>>,
    pub total_rounds: Option<Option<u32>>,
    pub description: Option<Option<String>>,
}

impl TimerUpdate {
    pub fn apply_to(self, timer: &mut TimerConfig) {
        if let Some(kind) = self.kind {
            timer.kind = kind;
        }
        if let Some(work) = self.work_duration {
            timer.work_duration = work;
        }
        if let Some(rest) = self.rest_duration {
            timer.rest_duration = rest;
        }
        if let Some(rounds) = self.total_rounds {
            timer.total_rounds = rounds;
        }
        if let Some(description) = self.description {
            timer.description = description;
        }
    }
}
