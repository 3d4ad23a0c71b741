use serde::Serialize;
use std::time::Duration;

use crate::config::{SessionConfig, BIG_BREAK_EVERY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Studying,
    OnBreak,
    OnBigBreak,
}

impl Phase {
    pub fn is_break(self) -> bool {
        matches!(self, Phase::OnBreak | Phase::OnBigBreak)
    }
}

/// Immutable snapshot of a session.
///
/// The engine never mutates a snapshot it has handed out; every event
/// produces a new value. Fields are read through accessors so that the
/// invariants below hold for every observable state:
///
/// - `remaining` never exceeds the active phase's duration, and a running
///   study or break phase always has time left
/// - `elapsed` and `cycle` never decrease
/// - `percent_complete` stays within `0.0..=1.0`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimerState {
    pub(crate) phase: Phase,
    pub(crate) config: SessionConfig,
    pub(crate) remaining: Duration,
    pub(crate) elapsed: Duration,
    pub(crate) cycle: u32,
    pub(crate) round: u32,
    pub(crate) percent_complete: f64,
    pub(crate) running: bool,
    pub(crate) finished: bool,
}

impl TimerState {
    /// Fresh idle state with a full study interval ready.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            phase: Phase::Idle,
            config,
            remaining: config.study(),
            elapsed: Duration::ZERO,
            cycle: 0,
            round: 0,
            percent_complete: 0.0,
            running: false,
            finished: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    /// Banked time of all completed phases.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Completed study intervals.
    pub fn cycle(&self) -> u32 {
        self.cycle
    }

    /// 1-based ordinal of the current study interval, 0 before the start.
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn percent_complete(&self) -> f64 {
        self.percent_complete
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Full duration of the active phase. Idle counts as the upcoming study.
    pub fn phase_duration(&self) -> Duration {
        duration_of(&self.config, self.phase)
    }

    /// Completed phases plus the consumed part of the current one.
    pub fn total_elapsed(&self) -> Duration {
        if self.phase == Phase::Idle {
            return self.elapsed;
        }
        self.elapsed + self.phase_duration().saturating_sub(self.remaining)
    }

    /// Whether the current cycle count earns a big break.
    pub fn is_big_break_due(&self) -> bool {
        self.cycle > 0 && self.cycle % BIG_BREAK_EVERY == 0
    }
}

pub(crate) fn duration_of(config: &SessionConfig, phase: Phase) -> Duration {
    match phase {
        Phase::Idle | Phase::Studying => config.study(),
        Phase::OnBreak => config.short_break(),
        Phase::OnBigBreak => config.big_break(),
    }
}
