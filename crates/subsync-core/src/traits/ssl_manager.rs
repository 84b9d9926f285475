// # SSL Manager Trait
//
// Defines the interface for inspecting and renewing the TLS
// certificate of a single subdomain.
//
// ## Implementations
//
// - Noop: `NoopSslManager` (built in)
// - Future: certbot, ACME clients

use crate::error::Result;
use crate::subdomain::Subdomain;
use async_trait::async_trait;
use std::sync::Arc;

/// Trait for certificate backend implementations
///
/// Certificate drift is orthogonal to DNS drift: a certificate can need
/// renewal even when the record is current, and vice versa. The
/// reconciler never gates one check on the other.
///
/// # Failure contract
///
/// [`SslManager::update`] may return an error; the reconciler converts
/// it into a failed outcome and keeps going.
#[async_trait]
pub trait SslManager: Send + Sync {
    /// Whether the subdomain's certificate needs to be (re)issued
    async fn needs_update(&self, subdomain: &Subdomain) -> bool;

    /// Issue or renew the subdomain's certificate
    ///
    /// Returns a short human-readable result text on success.
    async fn update(&self, subdomain: &Subdomain) -> Result<String>;
}

/// Helper trait for constructing SSL managers from configuration
pub trait SslManagerFactory: Send + Sync {
    /// Create an SslManager instance from configuration
    fn create(&self, config: &crate::config::SslManagerConfig) -> Result<Arc<dyn SslManager>>;
}
