// # Discovery Trait
//
// Defines the interface for enumerating candidate subdomains.
//
// ## Implementations
//
// - Static list: `StaticDiscovery` (built in, configuration-driven)
// - Noop: `NoopDiscovery` (built in)
// - Future: docker labels, kubernetes annotations, zone transfers
//
// The core deduplicates whatever the raw source yields, so
// implementations do not have to guarantee distinct names.

use crate::error::Result;
use crate::subdomain::Subdomain;
use std::pin::Pin;
use std::sync::Arc;
use tokio_stream::Stream;

/// A finite, per-pass stream of discovered subdomains
pub type SubdomainStream = Pin<Box<dyn Stream<Item = Subdomain> + Send + 'static>>;

/// Trait for subdomain source implementations
///
/// Each call to [`Discovery::stream`] produces a fresh, finite sequence
/// for one reconciliation pass; streams are not cached or restartable
/// across passes.
///
/// # Failure contract
///
/// An individual malformed entry must be skipped by the implementation,
/// never surfaced as a stream error.
pub trait Discovery: Send + Sync {
    /// Produce the subdomains for one reconciliation pass
    fn stream(&self) -> SubdomainStream;
}

impl<D: Discovery + ?Sized> Discovery for Arc<D> {
    fn stream(&self) -> SubdomainStream {
        (**self).stream()
    }
}

/// Helper trait for constructing discovery sources from configuration
pub trait DiscoveryFactory: Send + Sync {
    /// Create a Discovery instance from configuration
    fn create(&self, config: &crate::config::DiscoveryConfig) -> Result<Arc<dyn Discovery>>;
}
