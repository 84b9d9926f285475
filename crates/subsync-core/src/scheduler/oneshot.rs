//! Run-once scheduler
//!
//! Executes the job synchronously exactly once, then goes inert. The
//! only reason to cancel this variant before the run is an external
//! shutdown signal arriving before the single pass started; that is
//! treated as a startup failure.

use super::{Job, Scheduler};
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    Completed,
    Cancelled,
}

/// Scheduler that runs the job exactly once
pub struct OneshotScheduler {
    state: Mutex<State>,
}

impl OneshotScheduler {
    /// Create a scheduler that has not run yet
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::Idle),
        }
    }
}

impl Default for OneshotScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Scheduler for OneshotScheduler {
    async fn schedule(&self, job: Arc<dyn Job>) -> Result<()> {
        let mut state = self.state.lock().await;
        match *state {
            State::Cancelled => Err(Error::cancelled(
                "run-once scheduler was cancelled before the pass started",
            )),
            State::Completed => Ok(()),
            State::Idle => {
                // Mark first so a repeated schedule() stays a no-op
                // even if the job fails.
                *state = State::Completed;
                job.run().await
            }
        }
    }

    async fn cancel(&self) -> Result<()> {
        let mut state = self.state.lock().await;
        match *state {
            State::Idle => {
                *state = State::Cancelled;
                Err(Error::cancelled("cancelled before the single pass ran"))
            }
            State::Completed | State::Cancelled => Ok(()),
        }
    }

    async fn run_now(&self) {
        debug!("run-once scheduler has no timer; ignoring run_now");
    }
}
