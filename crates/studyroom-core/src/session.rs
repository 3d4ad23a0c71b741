//! Session controller.
//!
//! Wires the cycle engine to its collaborators: one ordered event queue in,
//! a tick scheduler and a renderer out. Events are processed one at a time
//! to completion.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::config::SessionConfig;
use crate::error::Result;
use crate::events::Event;
use crate::timer::{CycleEngine, Directive, Termination, TickScheduler, TimerState};
use crate::view::format_duration;

/// Displays snapshots. Implemented by the terminal front end.
pub trait Renderer {
    fn render(&mut self, state: &TimerState) -> Result<()>;

    /// Called before the redraw that follows a terminal resize.
    fn resize(&mut self, _cols: u16, _rows: u16) {}
}

/// How a session ended.
#[derive(Debug, Clone, Serialize)]
pub struct SessionOutcome {
    pub reason: Termination,
    pub final_state: TimerState,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl SessionOutcome {
    pub fn summary(&self) -> String {
        let headline = match self.reason {
            Termination::Quit => "Session stopped",
            Termination::BudgetExhausted => "Study time complete",
        };
        format!(
            "{headline}: {} study cycles completed, {} elapsed.",
            self.final_state.cycle(),
            format_duration(self.final_state.total_elapsed())
        )
    }
}

pub struct Session<S: TickScheduler, R: Renderer> {
    engine: CycleEngine,
    scheduler: S,
    renderer: R,
    events: mpsc::Receiver<Event>,
    pending: Option<S::Handle>,
}

impl<S: TickScheduler, R: Renderer> Session<S, R> {
    pub fn new(
        config: SessionConfig,
        scheduler: S,
        renderer: R,
        events: mpsc::Receiver<Event>,
    ) -> Self {
        Self {
            engine: CycleEngine::new(config),
            scheduler,
            renderer,
            events,
            pending: None,
        }
    }

    pub fn state(&self) -> &TimerState {
        self.engine.state()
    }

    /// Process events until the engine says to terminate.
    ///
    /// A closed event queue counts as Quit.
    ///
    /// # Errors
    /// Scheduler and renderer failures end the session immediately.
    pub async fn run(mut self) -> Result<SessionOutcome> {
        let started_at = Utc::now();
        info!(
            budget_secs = self.engine.state().config().total_budget().as_secs(),
            "session ready"
        );
        self.renderer.render(self.engine.state())?;

        loop {
            let event = match self.events.recv().await {
                Some(event) => event,
                None => {
                    debug!("event queue closed, quitting");
                    Event::Quit
                }
            };

            match event {
                // The outstanding tick has fired.
                Event::Tick => self.pending = None,
                Event::Resize { cols, rows } => self.renderer.resize(cols, rows),
                Event::Start | Event::Quit => debug!(?event, "command received"),
            }

            match self.engine.apply(event) {
                Some(Directive::ScheduleTick(period)) => {
                    if self.pending.is_none() {
                        self.pending = Some(self.scheduler.arm(period)?);
                    }
                    self.renderer.render(self.engine.state())?;
                }
                Some(Directive::Terminate(reason)) => {
                    self.cancel_pending();
                    let final_state = self.engine.state().clone();
                    info!(
                        ?reason,
                        cycles = final_state.cycle(),
                        elapsed_secs = final_state.total_elapsed().as_secs(),
                        "session over"
                    );
                    return Ok(SessionOutcome {
                        reason,
                        final_state,
                        started_at,
                        finished_at: Utc::now(),
                    });
                }
                None => {
                    if matches!(event, Event::Resize { .. }) {
                        self.renderer.render(self.engine.state())?;
                    }
                }
            }
        }
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.disarm(handle);
        }
    }
}

impl<S: TickScheduler, R: Renderer> Drop for Session<S, R> {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
