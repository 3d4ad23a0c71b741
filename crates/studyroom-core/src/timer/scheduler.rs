//! One-shot tick timers.
//!
//! The session re-arms the scheduler after every tick it wants to continue,
//! so at most one tick is ever in flight.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::error::SchedulerError;
use crate::events::Event;

/// Source of `Event::Tick` notifications.
pub trait TickScheduler {
    type Handle;

    /// Deliver exactly one `Event::Tick` after `period`.
    fn arm(&mut self, period: Duration) -> Result<Self::Handle, SchedulerError>;

    /// Cancel a pending tick. No-op if it already fired.
    fn disarm(&mut self, handle: Self::Handle);
}

/// Scheduler backed by `tokio::time::sleep` on the current runtime.
#[derive(Debug, Clone)]
pub struct TokioTickScheduler {
    events: mpsc::Sender<Event>,
}

/// A pending tick armed by [`TokioTickScheduler`].
#[derive(Debug)]
pub struct TickHandle(JoinHandle<()>);

impl TokioTickScheduler {
    pub fn new(events: mpsc::Sender<Event>) -> Self {
        Self { events }
    }
}

impl TickScheduler for TokioTickScheduler {
    type Handle = TickHandle;

    fn arm(&mut self, period: Duration) -> Result<TickHandle, SchedulerError> {
        if self.events.is_closed() {
            return Err(SchedulerError::QueueClosed);
        }
        let runtime =
            tokio::runtime::Handle::try_current().map_err(|_| SchedulerError::NoRuntime)?;
        let events = self.events.clone();
        let task = runtime.spawn(async move {
            tokio::time::sleep(period).await;
            if events.send(Event::Tick).await.is_err() {
                tracing::warn!("tick dropped, event queue closed");
            }
        });
        tracing::trace!(period_ms = period.as_millis() as u64, "tick armed");
        Ok(TickHandle(task))
    }

    fn disarm(&mut self, handle: TickHandle) {
        handle.0.abort();
    }
}
