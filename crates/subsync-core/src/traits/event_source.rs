// # Event Source Trait
//
// Defines the interface for the external lifecycle-event stream
// consumed by the event-driven scheduler.
//
// ## Implementations
//
// - Docker Engine API: `subsync-events-docker` crate
//
// The source is polled in bounded time windows so cancellation never
// blocks on an unbounded stream.

use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// A service/container lifecycle event
///
/// All fields are optional: the listener must tolerate empty or partial
/// events and simply skip them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LifecycleEvent {
    /// Event scope (for example "swarm" or "local")
    pub scope: Option<String>,
    /// The action performed (for example "create")
    pub action: Option<String>,
    /// The kind of resource the event concerns (for example "service")
    pub kind: Option<String>,
    /// Name of the resource the event concerns
    pub actor_name: Option<String>,
}

impl LifecycleEvent {
    /// Whether this is a creation event for a service-scoped resource
    ///
    /// This is the predicate that triggers an out-of-band
    /// reconciliation run.
    pub fn is_service_created(&self) -> bool {
        self.scope.as_deref() == Some("swarm")
            && self.kind.as_deref() == Some("service")
            && self.action.as_deref() == Some("create")
    }

    /// The actor name, or "unknown" when the event did not carry one
    pub fn actor_name_or_unknown(&self) -> &str {
        self.actor_name.as_deref().unwrap_or("unknown")
    }
}

/// Trait for lifecycle event source implementations
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Collect the events observed between `since` and `until`
    ///
    /// Implementations may block until `until` passes, but never
    /// longer; the listener re-issues the subscription per window.
    async fn events(
        &self,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<LifecycleEvent>>;

    /// Release any held connection to the event source
    async fn close(&self) {}
}

/// Helper trait for constructing event sources from configuration
pub trait EventSourceFactory: Send + Sync {
    /// Create an EventSource instance from configuration
    fn create(&self, config: &crate::config::EventSourceConfig) -> Result<Arc<dyn EventSource>>;
}
