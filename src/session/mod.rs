//! Editing session: the single owner of buffer, offsets, finalized set and
//! history, plus the async driver that feeds it.
//!
//! * [`EditSession`] — synchronous state machine; all methods take `now`.
//! * [`SessionDriver`] / [`SessionHandle`] — tokio task that ticks the
//!   session, runs jobs and publishes a [`SessionView`](crate::pipeline::SessionView).
//! * [`SessionState`] — JSON persistence.
//! * [`NamedTimers`] — typing-checkpoint / error-clear / done-clear deadlines.

pub mod driver;
pub mod editor;
pub mod persist;
pub mod timers;

pub use driver::{SessionCommand, SessionDriver, SessionHandle};
pub use editor::{EditSession, ResetMode, TickOutcome};
pub use persist::SessionState;
pub use timers::{NamedTimers, TimerKind};
