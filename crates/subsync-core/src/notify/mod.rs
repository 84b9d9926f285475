//! Notification fan-out with per-delegate failure isolation
//!
//! The [`NotificationHub`] forwards every notification to each delegate
//! in registration order. Each delegate call is wrapped individually:
//! a failing delegate is logged and skipped, and the remaining
//! delegates still receive the same notification. Nothing propagates
//! back into the reconciliation pass.

use crate::error::Result;
use crate::subdomain::Subdomain;
use crate::traits::Notifier;
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Fan-out dispatcher over an ordered list of delegates
pub struct NotificationHub {
    delegates: Vec<Arc<dyn Notifier>>,
}

impl NotificationHub {
    /// Create a hub over the given delegates; order is delivery order
    pub fn new(delegates: Vec<Arc<dyn Notifier>>) -> Self {
        Self { delegates }
    }

    /// Report a DNS outcome to every delegate
    pub async fn dns_updated(&self, subdomain: &Subdomain, result: &str) {
        for delegate in &self.delegates {
            isolated("dns_updated", delegate.dns_updated(subdomain, result)).await;
        }
    }

    /// Report a certificate outcome to every delegate
    pub async fn ssl_updated(&self, subdomain: &Subdomain, result: &str) {
        for delegate in &self.delegates {
            isolated("ssl_updated", delegate.ssl_updated(subdomain, result)).await;
        }
    }

    /// Send a free-form message to every delegate
    pub async fn message(&self, text: &str) {
        for delegate in &self.delegates {
            isolated("message", delegate.message(text)).await;
        }
    }
}

/// Run one delegate call, logging and swallowing its failure
///
/// Wraps each call individually so delegate N failing never blocks
/// delegate N+1.
async fn isolated(operation: &str, call: impl Future<Output = Result<()>>) {
    if let Err(e) = call.await {
        warn!(operation, error = %e, "notification delegate failed, continuing");
    }
}

/// Delegate that writes notifications to the structured log
///
/// The level is chosen from the result text: DNS results are expected
/// to start with "OK" on success, SSL results to contain "failed" on
/// failure.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn dns_updated(&self, subdomain: &Subdomain, result: &str) -> Result<()> {
        if result.starts_with("OK") {
            info!("[DNS] {subdomain} : {result}");
        } else {
            error!("[DNS] {subdomain} : {result}");
        }
        Ok(())
    }

    async fn ssl_updated(&self, subdomain: &Subdomain, result: &str) -> Result<()> {
        if result.to_lowercase().contains("failed") {
            error!("[SSL] {subdomain} : {result}");
        } else {
            info!("[SSL] {subdomain} : {result}");
        }
        Ok(())
    }

    async fn message(&self, text: &str) -> Result<()> {
        info!("{text}");
        Ok(())
    }
}

/// Delegate that discards all notifications
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn dns_updated(&self, _subdomain: &Subdomain, _result: &str) -> Result<()> {
        Ok(())
    }

    async fn ssl_updated(&self, _subdomain: &Subdomain, _result: &str) -> Result<()> {
        Ok(())
    }

    async fn message(&self, _text: &str) -> Result<()> {
        Ok(())
    }
}
