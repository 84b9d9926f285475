//! Event-driven scheduler
//!
//! Extends the repeating scheduler with a background listener on an
//! external lifecycle-event stream. A creation event for a
//! service-scoped resource triggers an out-of-band run of the same job,
//! with the same lock and error isolation as the timer path.
//!
//! The listener polls the source in bounded time windows and re-issues
//! the subscription each window, so `cancel()` never waits on an
//! unbounded stream: it stops the timer, signals the listener, joins it
//! with a bounded timeout, and releases the source connection.

use super::{Job, RepeatingScheduler, Scheduler};
use crate::error::Result;
use crate::notify::NotificationHub;
use crate::traits::EventSource;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use std::sync::Mutex as StdMutex;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time;
use tracing::warn;

const LISTENER_JOIN_TIMEOUT: Duration = Duration::from_secs(10);

/// Repeating scheduler that also reacts to lifecycle events
pub struct EventDrivenScheduler {
    repeating: Arc<RepeatingScheduler>,
    source: Arc<dyn EventSource>,
    hub: Arc<NotificationHub>,
    window: Duration,
    listener: StdMutex<Option<JoinHandle<()>>>,
}

impl EventDrivenScheduler {
    /// Create a scheduler polling `source` in windows of `window`
    pub fn new(
        interval: Duration,
        immediate_start: bool,
        window: Duration,
        source: Arc<dyn EventSource>,
        hub: Arc<NotificationHub>,
    ) -> Self {
        Self {
            repeating: Arc::new(RepeatingScheduler::new(interval, immediate_start)),
            source,
            hub,
            window,
            listener: StdMutex::new(None),
        }
    }

    fn spawn_listener(&self) -> JoinHandle<()> {
        let repeating = Arc::clone(&self.repeating);
        let source = Arc::clone(&self.source);
        let hub = Arc::clone(&self.hub);
        let window = self.window;
        let mut stop_rx = self.repeating.stop_receiver();

        tokio::spawn(async move {
            let window_delta =
                chrono::Duration::from_std(window).unwrap_or_else(|_| chrono::Duration::seconds(5));
            let mut since = Utc::now();

            loop {
                if *stop_rx.borrow() {
                    return;
                }

                let until = since + window_delta;

                let events = tokio::select! {
                    events = source.events(since, until) => events,
                    _ = stop_rx.changed() => return,
                };

                match events {
                    Ok(events) => {
                        for event in events {
                            if *stop_rx.borrow() {
                                return;
                            }
                            if !event.is_service_created() {
                                continue;
                            }
                            hub.message(&format!(
                                "Service created: {}",
                                event.actor_name_or_unknown()
                            ))
                            .await;
                            repeating.run_now().await;
                        }
                    }
                    // A stream hiccup never ends the schedule; the next
                    // window re-subscribes.
                    Err(e) => warn!(error = %e, "event poll failed; continuing"),
                }

                // Sources that return early would otherwise let the
                // windows run ahead of the wall clock.
                let now = Utc::now();
                if now < until {
                    let wait = (until - now).to_std().unwrap_or_default();
                    tokio::select! {
                        _ = time::sleep(wait) => {}
                        _ = stop_rx.changed() => return,
                    }
                }

                since = until;
            }
        })
    }
}

#[async_trait]
impl Scheduler for EventDrivenScheduler {
    async fn schedule(&self, job: Arc<dyn Job>) -> Result<()> {
        self.repeating.schedule(job).await?;

        let mut listener = self.listener.lock().expect("listener handle lock poisoned");
        if listener.is_none() {
            *listener = Some(self.spawn_listener());
        }

        Ok(())
    }

    async fn cancel(&self) -> Result<()> {
        self.repeating.cancel().await?;

        let handle = self
            .listener
            .lock()
            .expect("listener handle lock poisoned")
            .take();

        if let Some(mut handle) = handle {
            if time::timeout(LISTENER_JOIN_TIMEOUT, &mut handle).await.is_err() {
                warn!(
                    "event listener did not stop within {:?}; aborting it",
                    LISTENER_JOIN_TIMEOUT
                );
                handle.abort();
            }
        }

        self.source.close().await;
        Ok(())
    }

    async fn run_now(&self) {
        self.repeating.run_now().await;
    }
}
