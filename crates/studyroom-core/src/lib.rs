//! # Studyroom Core Library
//!
//! Core logic for the studyroom terminal Pomodoro timer. The CLI binary is a
//! thin terminal layer over this crate.
//!
//! ## Architecture
//!
//! - **Cycle Engine**: a pure state machine, `(TimerState, Event) ->
//!   (TimerState, Directive)`, that counts down study and break phases and
//!   escalates every fourth break into a big break
//! - **Tick Scheduler**: one-shot timers that feed `Event::Tick` back into
//!   the session's event queue
//! - **Session**: owns the engine, merges input and ticks into one ordered
//!   stream and hands snapshots to a [`Renderer`]
//!
//! ## Key Components
//!
//! - [`CycleEngine`]: engine instance owned by a session
//! - [`TimerState`]: immutable status snapshot
//! - [`SessionConfig`]: validated interval lengths and study budget
//! - [`Session`]: event loop driving engine, scheduler and renderer

pub mod config;
pub mod error;
pub mod events;
pub mod session;
pub mod timer;
pub mod view;

pub use config::{parse_total_minutes, SessionConfig};
pub use error::{ConfigError, CoreError, SchedulerError};
pub use events::Event;
pub use session::{Renderer, Session, SessionOutcome};
pub use timer::{
    transition, CycleEngine, Directive, Phase, Termination, TickScheduler, TimerState,
    TokioTickScheduler, Transition,
};
pub use view::render_status;
