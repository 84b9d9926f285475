// # DNS Manager Trait
//
// Defines the interface for inspecting and correcting DNS records for
// a single subdomain.
//
// ## Implementations
//
// - Noop: `NoopDnsManager` (built in)
// - Future: Cloudflare, Route53, RFC 2136 updates
//
// ## Usage
//
// ```rust,ignore
// use subsync_core::DnsManager;
//
// let manager = /* DnsManager implementation */;
//
// let public_ip = manager.current_public_ip().await;
// if manager.needs_update(&subdomain, public_ip).await {
//     let result = manager.update(&subdomain, public_ip).await?;
//     println!("{result}");
// }
// ```

use crate::error::Result;
use crate::subdomain::Subdomain;
use async_trait::async_trait;
use std::net::IpAddr;
use std::sync::Arc;

/// Trait for DNS backend implementations
///
/// # Thread Safety
///
/// Implementations must be thread-safe and usable across async tasks.
/// If an implementation caches backend state (for example a zone
/// cache), that cache's consistency is its own responsibility.
///
/// # Failure contract
///
/// Only [`DnsManager::update`] returns an error; the reconciler
/// converts it into a failed outcome and keeps going. The lookup
/// methods report "unknown" as `None`.
#[async_trait]
pub trait DnsManager: Send + Sync {
    /// The host's current public IP, if it can be determined
    ///
    /// Queried once per reconciliation pass, not once per subdomain.
    async fn current_public_ip(&self) -> Option<IpAddr>;

    /// The IP currently recorded for the subdomain, if any
    async fn current_ip(&self, subdomain: &Subdomain) -> Option<IpAddr>;

    /// Whether the subdomain's record is out of sync with `public_ip`
    ///
    /// The default compares the recorded IP against the pass-level
    /// snapshot; backends with cheaper drift checks may override it.
    async fn needs_update(&self, subdomain: &Subdomain, public_ip: Option<IpAddr>) -> bool {
        public_ip != self.current_ip(subdomain).await
    }

    /// Point the subdomain's record at `public_ip`
    ///
    /// Returns a short human-readable result text on success.
    async fn update(&self, subdomain: &Subdomain, public_ip: Option<IpAddr>) -> Result<String>;
}

/// Helper trait for constructing DNS managers from configuration
pub trait DnsManagerFactory: Send + Sync {
    /// Create a DnsManager instance from configuration
    fn create(&self, config: &crate::config::DnsManagerConfig) -> Result<Arc<dyn DnsManager>>;
}
