//! Cycle engine.
//!
//! The engine is a pure state machine: `transition(state, event)` returns a
//! new [`TimerState`] and an optional [`Directive`] telling the scheduler
//! whether to keep ticking. It owns no threads and no timers.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Studying -> OnBreak -> Studying -> ... -> OnBigBreak -> Studying
//!            (every 4th completed study goes to OnBigBreak)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = CycleEngine::new(config);
//! engine.apply(Event::Start);   // Some(Directive::ScheduleTick(1s))
//! engine.apply(Event::Tick);    // counts down, switches phases
//! ```

use serde::Serialize;
use std::time::Duration;

use super::state::{duration_of, Phase, TimerState};
use crate::config::{SessionConfig, BIG_BREAK_EVERY};
use crate::events::Event;

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    Quit,
    BudgetExhausted,
}

/// Control signal for the tick scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// Arm one more tick after this period.
    ScheduleTick(Duration),
    /// Stop ticking and end the session.
    Terminate(Termination),
}

/// Result of feeding one event to the engine.
///
/// `directive` is `None` when the event was ignored and `state` is
/// unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: TimerState,
    pub directive: Option<Directive>,
}

impl Transition {
    fn ignored(state: &TimerState) -> Self {
        Self {
            state: state.clone(),
            directive: None,
        }
    }
}

/// Compute the successor of `state` under `event`.
pub fn transition(state: &TimerState, event: Event) -> Transition {
    match event {
        Event::Start => start(state),
        Event::Quit => quit(state),
        Event::Tick => tick(state),
        Event::Resize { .. } => Transition::ignored(state),
    }
}

fn start(state: &TimerState) -> Transition {
    if state.running || state.finished || state.phase != Phase::Idle {
        return Transition::ignored(state);
    }
    let next = TimerState {
        phase: Phase::Studying,
        remaining: state.config.study(),
        round: state.round + 1,
        percent_complete: 0.0,
        running: true,
        ..state.clone()
    };
    Transition {
        directive: Some(Directive::ScheduleTick(next.config.tick_period())),
        state: next,
    }
}

fn quit(state: &TimerState) -> Transition {
    Transition {
        state: TimerState {
            running: false,
            finished: true,
            ..state.clone()
        },
        directive: Some(Directive::Terminate(Termination::Quit)),
    }
}

fn tick(state: &TimerState) -> Transition {
    if !state.running || state.finished {
        return Transition::ignored(state);
    }

    // Budget is checked before any phase handling.
    if state.total_elapsed() >= state.config.total_budget() {
        return Transition {
            state: TimerState {
                running: false,
                finished: true,
                ..state.clone()
            },
            directive: Some(Directive::Terminate(Termination::BudgetExhausted)),
        };
    }

    let period = state.config.tick_period();
    let mut next = state.clone();
    next.remaining = state.remaining.saturating_sub(period);
    if next.remaining.is_zero() {
        complete_phase(&mut next);
    } else {
        next.percent_complete = percent(next.remaining, next.phase_duration());
    }
    Transition {
        state: next,
        directive: Some(Directive::ScheduleTick(period)),
    }
}

/// Bank the finished phase and move to the next one.
fn complete_phase(next: &mut TimerState) {
    let finished = next.phase;
    next.elapsed += duration_of(&next.config, finished);
    next.phase = match finished {
        Phase::Studying => {
            next.cycle += 1;
            if next.cycle % BIG_BREAK_EVERY == 0 {
                Phase::OnBigBreak
            } else {
                Phase::OnBreak
            }
        }
        Phase::OnBreak | Phase::OnBigBreak => {
            next.round += 1;
            Phase::Studying
        }
        Phase::Idle => Phase::Idle,
    };
    next.remaining = duration_of(&next.config, next.phase);
    next.percent_complete = 0.0;
    tracing::debug!(
        from = ?finished,
        to = ?next.phase,
        cycle = next.cycle,
        elapsed_secs = next.elapsed.as_secs(),
        "phase completed"
    );
}

fn percent(remaining: Duration, phase_duration: Duration) -> f64 {
    if phase_duration.is_zero() {
        return 0.0;
    }
    (1.0 - remaining.as_secs_f64() / phase_duration.as_secs_f64()).clamp(0.0, 1.0)
}

/// Engine instance owned by a session.
///
/// Holds the current snapshot and replaces it wholesale on every event.
#[derive(Debug, Clone)]
pub struct CycleEngine {
    state: TimerState,
}

impl CycleEngine {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            state: TimerState::new(config),
        }
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    /// Feed one event and keep the resulting state.
    pub fn apply(&mut self, event: Event) -> Option<Directive> {
        let Transition { state, directive } = transition(&self.state, event);
        self.state = state;
        directive
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    /// study 3s, break 2s, big break 10s, tick 1s
    fn demo_config(budget: Duration) -> SessionConfig {
        SessionConfig::new(secs(3), secs(2), secs(10), budget, secs(1)).unwrap()
    }

    fn started(budget: Duration) -> CycleEngine {
        let mut engine = CycleEngine::new(demo_config(budget));
        assert_eq!(
            engine.apply(Event::Start),
            Some(Directive::ScheduleTick(secs(1)))
        );
        engine
    }

    fn ticks(engine: &mut CycleEngine, n: usize) {
        for _ in 0..n {
            engine.apply(Event::Tick);
        }
    }

    #[test]
    fn start_enters_study() {
        let engine = started(secs(60));
        let state = engine.state();
        assert_eq!(state.phase(), Phase::Studying);
        assert_eq!(state.remaining(), secs(3));
        assert_eq!(state.round(), 1);
        assert_eq!(state.cycle(), 0);
        assert!(state.is_running());
    }

    #[test]
    fn start_while_running_is_ignored() {
        let mut engine = started(secs(60));
        engine.apply(Event::Tick);
        let before = engine.state().clone();
        assert_eq!(engine.apply(Event::Start), None);
        assert_eq!(engine.state(), &before);
    }

    #[test]
    fn tick_while_idle_is_ignored() {
        let mut engine = CycleEngine::new(demo_config(secs(60)));
        let before = engine.state().clone();
        assert_eq!(engine.apply(Event::Tick), None);
        assert_eq!(engine.state(), &before);
    }

    #[test]
    fn study_completes_into_break() {
        let mut engine = started(secs(60));
        ticks(&mut engine, 3);
        let state = engine.state();
        assert_eq!(state.phase(), Phase::OnBreak);
        assert_eq!(state.cycle(), 1);
        assert_eq!(state.remaining(), secs(2));
        assert_eq!(state.elapsed(), secs(3));
    }

    #[test]
    fn percent_tracks_active_phase() {
        let mut engine = started(secs(60));
        engine.apply(Event::Tick);
        assert!((engine.state().percent_complete() - 1.0 / 3.0).abs() < 1e-9);
        ticks(&mut engine, 3);
        // one tick into a 2s break
        assert_eq!(engine.state().phase(), Phase::OnBreak);
        assert!((engine.state().percent_complete() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn break_completes_into_study_without_counting() {
        let mut engine = started(secs(60));
        ticks(&mut engine, 5);
        let state = engine.state();
        assert_eq!(state.phase(), Phase::Studying);
        assert_eq!(state.cycle(), 1);
        assert_eq!(state.round(), 2);
        assert_eq!(state.remaining(), secs(3));
        assert_eq!(state.elapsed(), secs(5));
    }

    #[test]
    fn fourth_study_earns_big_break() {
        let mut engine = started(secs(600));
        // three study+break rounds, then the fourth study
        ticks(&mut engine, 3 * 5 + 3);
        let state = engine.state();
        assert_eq!(state.cycle(), 4);
        assert_eq!(state.phase(), Phase::OnBigBreak);
        assert_eq!(state.remaining(), secs(10));
        assert_eq!(state.elapsed(), secs(4 * 3 + 3 * 2));

        ticks(&mut engine, 10);
        assert_eq!(engine.state().phase(), Phase::Studying);
        ticks(&mut engine, 3);
        assert_eq!(engine.state().phase(), Phase::OnBreak);
        assert_eq!(engine.state().cycle(), 5);
    }

    #[test]
    fn budget_exhaustion_terminates_mid_phase() {
        let mut engine = started(secs(5));
        ticks(&mut engine, 5);
        assert_eq!(engine.state().phase(), Phase::Studying);
        assert_eq!(engine.state().remaining(), secs(3));

        let directive = engine.apply(Event::Tick);
        assert_eq!(
            directive,
            Some(Directive::Terminate(Termination::BudgetExhausted))
        );
        assert!(!engine.state().is_running());
        assert!(engine.state().is_finished());
        assert_eq!(engine.state().remaining(), secs(3));
    }

    #[test]
    fn budget_counts_in_progress_time() {
        let mut engine = started(secs(2));
        ticks(&mut engine, 2);
        assert_eq!(engine.state().phase(), Phase::Studying);
        assert_eq!(
            engine.apply(Event::Tick),
            Some(Directive::Terminate(Termination::BudgetExhausted))
        );
    }

    #[test]
    fn quit_stops_and_is_idempotent() {
        let mut engine = started(secs(60));
        engine.apply(Event::Tick);
        assert_eq!(
            engine.apply(Event::Quit),
            Some(Directive::Terminate(Termination::Quit))
        );
        let after_quit = engine.state().clone();
        assert!(!after_quit.is_running());

        assert_eq!(
            engine.apply(Event::Quit),
            Some(Directive::Terminate(Termination::Quit))
        );
        assert_eq!(engine.state(), &after_quit);
        assert_eq!(engine.apply(Event::Tick), None);
        assert_eq!(engine.apply(Event::Start), None);
        assert_eq!(engine.state(), &after_quit);
    }

    #[test]
    fn quit_from_idle() {
        let mut engine = CycleEngine::new(demo_config(secs(60)));
        assert_eq!(
            engine.apply(Event::Quit),
            Some(Directive::Terminate(Termination::Quit))
        );
        assert_eq!(engine.apply(Event::Start), None);
        assert_eq!(engine.state().phase(), Phase::Idle);
    }

    #[test]
    fn resize_does_not_change_state() {
        let mut engine = started(secs(60));
        let before = engine.state().clone();
        assert_eq!(engine.apply(Event::Resize { cols: 80, rows: 24 }), None);
        assert_eq!(engine.state(), &before);
    }

    #[test]
    fn uneven_tick_period_banks_full_phase() {
        let config = SessionConfig::new(
            Duration::from_millis(2500),
            secs(2),
            secs(10),
            secs(60),
            secs(1),
        )
        .unwrap();
        let mut engine = CycleEngine::new(config);
        engine.apply(Event::Start);
        ticks(&mut engine, 3);
        assert_eq!(engine.state().phase(), Phase::OnBreak);
        assert_eq!(engine.state().elapsed(), Duration::from_millis(2500));
    }

    #[test]
    fn transition_does_not_touch_input() {
        let state = TimerState::new(demo_config(secs(60)));
        let copy = state.clone();
        let result = transition(&state, Event::Start);
        assert_eq!(state, copy);
        assert_eq!(result.state.phase(), Phase::Studying);
    }
}
