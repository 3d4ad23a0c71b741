mod engine;
mod scheduler;
mod state;

pub use engine::{transition, CycleEngine, Directive, Termination, Transition};
pub use scheduler::{TickHandle, TickScheduler, TokioTickScheduler};
pub use state::{Phase, TimerState};
