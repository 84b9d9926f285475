// # Notifier Trait
//
// Defines the interface for a single notification delegate.
//
// ## Implementations
//
// - Log: `LogNotifier` (built in)
// - Noop: `NoopNotifier` (built in)
// - Slack: `subsync-notify-slack` crate
//
// Delegates are always driven through the fan-out
// [`NotificationHub`](crate::notify::NotificationHub), which isolates
// each delegate's failures; a delegate may still choose to swallow its
// own delivery errors (best-effort sinks do).

use crate::error::Result;
use crate::subdomain::Subdomain;
use async_trait::async_trait;
use std::sync::Arc;

/// Trait for notification delegate implementations
#[async_trait]
pub trait Notifier: Send + Sync {
    /// A DNS record was updated (or the update failed)
    async fn dns_updated(&self, subdomain: &Subdomain, result: &str) -> Result<()>;

    /// A certificate was updated (or the update failed)
    async fn ssl_updated(&self, subdomain: &Subdomain, result: &str) -> Result<()>;

    /// A free-form service message (startup, shutdown, events)
    async fn message(&self, text: &str) -> Result<()>;
}

/// Helper trait for constructing notifiers from configuration
pub trait NotifierFactory: Send + Sync {
    /// Create a Notifier instance from configuration
    fn create(&self, config: &crate::config::NotifierConfig) -> Result<Arc<dyn Notifier>>;
}
