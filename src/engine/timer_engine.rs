//! Tick/round state machine shared by all timer kinds

use tracing::debug;

use crate::{
    state::{LifecycleState, TimeSpec, TimerConfig, TimerKind, TimerMode},
    utils::time::{self, TimeDisplay},
};

/// Period of a standalone engine tick
pub const ENGINE_TICK_MS: u64 = 10;

/// Who moves the engine forward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockSource {
    /// The engine counts on its own tick and accepts local controls
    Standalone,
    /// Elapsed time and lifecycle are pushed in by the workout
    WorkoutDriven,
}

/// User-editable settings of one timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimerSettings {
    pub work: TimeSpec,
    pub rest: Option<TimeSpec>,
    pub rounds: Option<u32>,
}

impl TimerSettings {
    pub fn from_config(config: &TimerConfig) -> Self {
        Self {
            work: config.work_duration,
            rest: config.rest_duration,
            rounds: config.total_rounds,
        }
    }
}

/// Result of a form edit: the new settings and whether they can start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineChange {
    pub settings: TimerSettings,
    pub is_valid: bool,
}

#[derive(Debug, Clone)]
pub struct TimerEngine {
    kind: TimerKind,
    clock: ClockSource,
    settings: TimerSettings,
    state: LifecycleState,
    /// Remaining time for countdown kinds, elapsed time for count-up
    counter_ms: u64,
    round: u32,
    mode: TimerMode,
}

impl TimerEngine {
    pub fn new(kind: TimerKind, settings: TimerSettings, clock: ClockSource) -> Self {
        let mut engine = Self {
            kind,
            clock,
            settings,
            state: LifecycleState::Idle,
            counter_ms: 0,
            round: 1,
            mode: TimerMode::Work,
        };
        engine.counter_ms = engine.start_value();
        engine
    }

    pub fn standalone(config: &TimerConfig) -> Self {
        Self::new(config.kind, TimerSettings::from_config(config), ClockSource::Standalone)
    }

    pub fn workout_driven(config: &TimerConfig) -> Self {
        Self::new(config.kind, TimerSettings::from_config(config), ClockSource::WorkoutDriven)
    }

    pub fn kind(&self) -> TimerKind {
        self.kind
    }

    pub fn clock_source(&self) -> ClockSource {
        self.clock
    }

    pub fn settings(&self) -> TimerSettings {
        self.settings
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn counter_ms(&self) -> u64 {
        self.counter_ms
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn total_rounds(&self) -> u32 {
        self.settings.rounds.unwrap_or(1).max(1)
    }

    fn work_ms(&self) -> u64 {
        self.settings.work.as_ms()
    }

    fn rest_ms(&self) -> u64 {
        self.settings.rest.map(|rest| rest.as_ms()).unwrap_or(0)
    }

    /// Duration of the phase currently counting
    pub fn target_ms(&self) -> u64 {
        match (self.kind, self.mode) {
            (TimerKind::Interval, TimerMode::Rest) => self.rest_ms(),
            _ => self.work_ms(),
        }
    }

    fn start_value(&self) -> u64 {
        if self.kind.counts_down() {
            self.work_ms()
        } else {
            0
        }
    }

    fn terminal_value(&self) -> u64 {
        if self.kind.counts_down() {
            0
        } else {
            self.work_ms()
        }
    }

    /// Whether the start control should be offered
    pub fn is_startable(&self) -> bool {
        let rounds_ok = self.settings.rounds.map_or(true, |rounds| rounds > 0);
        match self.kind {
            TimerKind::CountUp | TimerKind::CountDown => self.work_ms() > 0,
            TimerKind::FixedRounds => self.work_ms() > 0 && rounds_ok,
            TimerKind::Interval => self.work_ms() > 0 && self.rest_ms() > 0 && rounds_ok,
        }
    }

    /// Counter split into display components.
    ///
    /// Only an idle engine falls back to its configured work duration.
    pub fn display(&self) -> TimeDisplay {
        let (minutes, seconds) = if self.state == LifecycleState::Idle {
            (self.settings.work.minutes, self.settings.work.seconds)
        } else {
            (0, 0)
        };
        time::display(
            self.counter_ms,
            self.state == LifecycleState::Running,
            u64::from(minutes),
            u64::from(seconds),
        )
    }

    /// Apply form input to an idle standalone engine
    pub fn edit(&mut self, settings: TimerSettings) -> Option<EngineChange> {
        if self.clock != ClockSource::Standalone || self.state != LifecycleState::Idle {
            return None;
        }
        self.settings = settings;
        self.counter_ms = self.start_value();
        Some(EngineChange {
            settings,
            is_valid: self.is_startable(),
        })
    }

    /// Start counting. Refused unless standalone, idle and startable.
    pub fn start(&mut self) -> bool {
        if self.clock != ClockSource::Standalone {
            debug!("Ignoring local start on a workout-driven {} timer", self.kind);
            return false;
        }
        self.begin()
    }

    pub fn pause(&mut self) -> bool {
        self.clock == ClockSource::Standalone && self.halt()
    }

    pub fn resume(&mut self) -> bool {
        self.clock == ClockSource::Standalone && self.proceed()
    }

    fn begin(&mut self) -> bool {
        if self.state != LifecycleState::Idle || !self.is_startable() {
            return false;
        }
        self.round = 1;
        self.mode = TimerMode::Work;
        self.counter_ms = self.start_value();
        self.state = LifecycleState::Running;
        debug!("{} timer started at {}ms", self.kind, self.counter_ms);
        true
    }

    fn halt(&mut self) -> bool {
        if self.state != LifecycleState::Running {
            return false;
        }
        self.state = LifecycleState::Paused;
        true
    }

    fn proceed(&mut self) -> bool {
        if self.state != LifecycleState::Paused {
            return false;
        }
        self.state = LifecycleState::Running;
        true
    }

    /// Back to idle with the counter at its start value
    pub fn reset(&mut self) {
        self.state = LifecycleState::Idle;
        self.round = 1;
        self.mode = TimerMode::Work;
        self.counter_ms = self.start_value();
    }

    /// Jump straight to completion
    pub fn fast_forward(&mut self) {
        self.counter_ms = self.terminal_value();
        if self.kind.has_rounds() {
            self.round = self.total_rounds();
        }
        self.state = LifecycleState::Completed;
        debug!("{} timer completed", self.kind);
    }

    /// Advance a running standalone engine by one tick
    pub fn tick(&mut self) -> LifecycleState {
        if self.clock != ClockSource::Standalone || self.state != LifecycleState::Running {
            return self.state;
        }

        match self.kind {
            TimerKind::CountUp => {
                let target = self.work_ms();
                self.counter_ms = (self.counter_ms + ENGINE_TICK_MS).min(target);
                if self.counter_ms >= target {
                    self.fast_forward();
                }
            }
            TimerKind::CountDown => {
                self.counter_ms = self.counter_ms.saturating_sub(ENGINE_TICK_MS);
                if self.counter_ms == 0 {
                    self.fast_forward();
                }
            }
            TimerKind::Interval => {
                self.counter_ms = self.counter_ms.saturating_sub(ENGINE_TICK_MS);
                if self.counter_ms == 0 {
                    match self.mode {
                        TimerMode::Work => {
                            self.mode = TimerMode::Rest;
                            self.counter_ms = self.rest_ms();
                        }
                        TimerMode::Rest if self.round < self.total_rounds() => {
                            self.round += 1;
                            self.mode = TimerMode::Work;
                            self.counter_ms = self.work_ms();
                        }
                        TimerMode::Rest => self.fast_forward(),
                    }
                }
            }
            TimerKind::FixedRounds => {
                self.counter_ms = self.counter_ms.saturating_sub(ENGINE_TICK_MS);
                if self.counter_ms == 0 {
                    if self.round < self.total_rounds() {
                        self.round += 1;
                        self.counter_ms = self.work_ms();
                    } else {
                        self.fast_forward();
                    }
                }
            }
        }

        self.state
    }

    /// Follow the workout: apply its lifecycle, then project its elapsed time.
    ///
    /// `active` tells whether this engine's entry is the one being played.
    pub fn sync(&mut self, elapsed_ms: u64, external: LifecycleState, active: bool) {
        if self.clock != ClockSource::WorkoutDriven {
            return;
        }

        match external {
            LifecycleState::Idle => {
                if self.state != LifecycleState::Idle || self.counter_ms != self.start_value() {
                    self.reset();
                }
            }
            LifecycleState::Completed => {
                if self.state != LifecycleState::Completed {
                    self.fast_forward();
                }
            }
            LifecycleState::Running if active => match self.state {
                LifecycleState::Paused => {
                    self.proceed();
                }
                LifecycleState::Idle => {
                    self.begin();
                }
                _ => {}
            },
            LifecycleState::Paused if active => match self.state {
                LifecycleState::Running => {
                    self.halt();
                }
                LifecycleState::Idle => {
                    // Restored straight into a paused session
                    if self.begin() {
                        self.halt();
                    }
                }
                _ => {}
            },
            _ => {}
        }

        if active && self.state.is_active() {
            self.project(elapsed_ms);
        }
    }

    fn project(&mut self, elapsed_ms: u64) {
        let work = self.work_ms();
        let total_rounds = u64::from(self.total_rounds());

        match self.kind {
            TimerKind::CountUp => {
                self.counter_ms = elapsed_ms.min(work);
            }
            TimerKind::CountDown => {
                self.counter_ms = work.saturating_sub(elapsed_ms);
            }
            TimerKind::Interval => {
                let round_ms = work + self.rest_ms();
                if round_ms == 0 {
                    return;
                }
                let within_round = elapsed_ms % round_ms;
                let rounds_elapsed = elapsed_ms / round_ms;
                self.round = (rounds_elapsed + 1).min(total_rounds) as u32;
                if within_round < work {
                    self.mode = TimerMode::Work;
                    self.counter_ms = work - within_round;
                } else {
                    self.mode = TimerMode::Rest;
                    self.counter_ms = round_ms - within_round;
                }
            }
            TimerKind::FixedRounds => {
                if work == 0 {
                    return;
                }
                let within_round = elapsed_ms % work;
                self.round = (elapsed_ms / work + 1).min(total_rounds) as u32;
                self.counter_ms = work - within_round;
            }
        }
    }
}
