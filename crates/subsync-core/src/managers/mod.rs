//! Built-in no-op resource managers
//!
//! Useful as registry defaults and in tests; real backends live in
//! adapter crates.

use crate::error::Result;
use crate::subdomain::Subdomain;
use crate::traits::{DnsManager, SslManager};
use async_trait::async_trait;
use std::net::IpAddr;

/// A DNS manager with no backend; nothing ever needs an update
pub struct NoopDnsManager;

#[async_trait]
impl DnsManager for NoopDnsManager {
    async fn current_public_ip(&self) -> Option<IpAddr> {
        None
    }

    async fn current_ip(&self, _subdomain: &Subdomain) -> Option<IpAddr> {
        None
    }

    async fn needs_update(&self, _subdomain: &Subdomain, _public_ip: Option<IpAddr>) -> bool {
        false
    }

    async fn update(&self, _subdomain: &Subdomain, _public_ip: Option<IpAddr>) -> Result<String> {
        Ok("OK, noop".to_string())
    }
}

/// A certificate manager with no backend; nothing ever needs an update
pub struct NoopSslManager;

#[async_trait]
impl SslManager for NoopSslManager {
    async fn needs_update(&self, _subdomain: &Subdomain) -> bool {
        false
    }

    async fn update(&self, _subdomain: &Subdomain) -> Result<String> {
        Ok("OK, noop".to_string())
    }
}
