//! Scheduling of reconciliation passes
//!
//! A scheduler owns the cadence and lifecycle of one [`Job`]:
//!
//! - [`OneshotScheduler`]: run the job synchronously exactly once
//! - [`RepeatingScheduler`]: self-re-arming fixed-interval timer
//! - [`EventDrivenScheduler`]: repeating timer plus a lifecycle-event
//!   listener that triggers out-of-band runs
//!
//! ## Contract
//!
//! A scheduler holds at most one job; registering a new one replaces
//! the pending reference (last-writer-wins, no queue). The state
//! machine is `not started → running → cancelled`, with cancellation
//! terminal: once `cancel()` returns, the job is never invoked again,
//! even by a timer or event that was racing the cancellation. The
//! cancelled flag, the job reference, and the job invocation itself are
//! all guarded by one mutex, so no two executions ever overlap and a
//! late-firing timer observes cancellation before running anything.
//!
//! A job error during a timer- or event-triggered execution is logged
//! and does not cancel the schedule; the next timer is still armed.

pub mod event_driven;
pub mod oneshot;
pub mod repeating;

pub use event_driven::EventDrivenScheduler;
pub use oneshot::OneshotScheduler;
pub use repeating::RepeatingScheduler;

use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// An opaque unit of scheduled work
///
/// In production this is a [`ReconcilePass`](crate::ReconcilePass); the
/// job must not spawn further concurrent executions of itself.
#[async_trait]
pub trait Job: Send + Sync {
    /// Execute the job once
    async fn run(&self) -> Result<()>;
}

/// Common scheduler contract
#[async_trait]
pub trait Scheduler: Send + Sync {
    /// Register the job and start the schedule
    ///
    /// For the run-once variant this executes the job before returning.
    /// Repeating variants return once the timer (and listener, where
    /// applicable) is armed.
    async fn schedule(&self, job: Arc<dyn Job>) -> Result<()>;

    /// Request termination; terminal and idempotent
    ///
    /// Safe to call before any job was scheduled and safe to call
    /// repeatedly. For the run-once variant, cancelling before the
    /// single run is a startup failure and returns
    /// [`Error::Cancelled`](crate::Error::Cancelled); the caller is
    /// expected to exit non-zero.
    async fn cancel(&self) -> Result<()>;

    /// Force an immediate out-of-band execution
    ///
    /// Repeating variants run the job under the same lock and error
    /// isolation as the timer path, without resetting or duplicating
    /// the pending timer. The run-once variant ignores this.
    async fn run_now(&self);
}
