//! Fixed-interval repeating scheduler
//!
//! The timer is an explicit loop re-arming a one-shot sleep after each
//! run completes, not a periodic timer: execution duration can never
//! cause overlapping runs, and there is no recursion to grow over long
//! uptimes. One `tokio::sync::Mutex` guards the job reference, the
//! cancelled flag, and the job invocation itself; `cancel()`,
//! `run_now()` and the timer all serialize on it.

use super::{Job, Scheduler};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::Mutex as StdMutex;
use std::time::Duration;
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tokio::time;
use tracing::error;

struct Inner {
    job: Option<Arc<dyn Job>>,
    cancelled: bool,
}

/// Scheduler that re-runs the job at a fixed interval
pub struct RepeatingScheduler {
    interval: Duration,
    immediate_start: bool,
    inner: Arc<Mutex<Inner>>,
    // Wakes the timer loop promptly on cancellation instead of letting
    // it sleep out the rest of the interval.
    stop_tx: watch::Sender<bool>,
    timer: StdMutex<Option<JoinHandle<()>>>,
}

impl RepeatingScheduler {
    /// Create a scheduler with the given interval
    ///
    /// With `immediate_start`, `schedule()` executes the job once
    /// before arming the timer; otherwise the first run happens one
    /// interval after scheduling.
    pub fn new(interval: Duration, immediate_start: bool) -> Self {
        let (stop_tx, _) = watch::channel(false);

        Self {
            interval,
            immediate_start,
            inner: Arc::new(Mutex::new(Inner {
                job: None,
                cancelled: false,
            })),
            stop_tx,
            timer: StdMutex::new(None),
        }
    }

    /// Whether `cancel()` has been observed
    pub async fn is_cancelled(&self) -> bool {
        self.inner.lock().await.cancelled
    }

    /// A receiver that flips to `true` once the scheduler is cancelled
    pub(crate) fn stop_receiver(&self) -> watch::Receiver<bool> {
        self.stop_tx.subscribe()
    }

    fn arm(&self) -> JoinHandle<()> {
        let inner = Arc::clone(&self.inner);
        let mut stop_rx = self.stop_tx.subscribe();
        let interval = self.interval;

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = time::sleep(interval) => {}
                    _ = stop_rx.changed() => return,
                }

                // The flag is read under the same lock that guards the
                // run: a tick racing cancel() never invokes the job.
                let guard = inner.lock().await;
                if guard.cancelled {
                    return;
                }
                let Some(job) = guard.job.clone() else {
                    continue;
                };
                if let Err(e) = job.run().await {
                    error!(error = %e, "scheduled pass failed; keeping the schedule");
                }
            }
        })
    }
}

#[async_trait]
impl Scheduler for RepeatingScheduler {
    async fn schedule(&self, job: Arc<dyn Job>) -> Result<()> {
        {
            let mut guard = self.inner.lock().await;
            // Last-writer-wins; there is no queue of pending jobs.
            guard.job = Some(Arc::clone(&job));

            if guard.cancelled {
                return Ok(());
            }

            if self.immediate_start {
                if let Err(e) = job.run().await {
                    error!(error = %e, "immediate pass failed; keeping the schedule");
                }
            }
        }

        let mut timer = self.timer.lock().expect("timer handle lock poisoned");
        if timer.is_none() {
            *timer = Some(self.arm());
        }

        Ok(())
    }

    async fn cancel(&self) -> Result<()> {
        // Taking the lock first means an in-flight run finishes before
        // the flag is set, and no run starts afterwards.
        let mut guard = self.inner.lock().await;
        guard.cancelled = true;
        drop(guard);

        let _ = self.stop_tx.send(true);
        Ok(())
    }

    async fn run_now(&self) {
        let guard = self.inner.lock().await;
        if guard.cancelled {
            return;
        }
        let Some(job) = guard.job.clone() else {
            return;
        };
        // Deliberately leaves the pending timer alone: the interval
        // cadence is unaffected by forced runs.
        if let Err(e) = job.run().await {
            error!(error = %e, "forced pass failed; keeping the schedule");
        }
    }
}

impl Drop for RepeatingScheduler {
    fn drop(&mut self) {
        if let Ok(mut timer) = self.timer.lock()
            && let Some(handle) = timer.take()
        {
            handle.abort();
        }
    }
}
