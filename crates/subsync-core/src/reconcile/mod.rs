//! Per-subdomain reconciliation and the pass orchestrator
//!
//! ## Flow
//!
//! ```text
//! ┌────────────┐     ┌──────────────┐     ┌─────────────────┐
//! │ Discovery  │───▶│ ReconcilePass │───▶│ NotificationHub │
//! └────────────┘     └──────┬───────┘     └─────────────────┘
//!                           │
//!                 ┌─────────┴─────────┐
//!                 ▼                   ▼
//!          ┌────────────┐      ┌────────────┐
//!          │ DnsManager │      │ SslManager │
//!          └────────────┘      └────────────┘
//! ```
//!
//! One pass queries the public IP once, walks the deduplicated
//! subdomain stream in source order, reconciles DNS and certificate
//! state independently for each subdomain, and reports every
//! non-skipped outcome to the hub. A failure for one subdomain or one
//! resource kind never stops the rest of the pass.

use crate::discovery::Deduplicated;
use crate::error::Result;
use crate::notify::NotificationHub;
use crate::scheduler::Job;
use crate::subdomain::Subdomain;
use crate::traits::{Discovery, DnsManager, SslManager};
use async_trait::async_trait;
use std::net::IpAddr;
use std::sync::Arc;
use tokio_stream::StreamExt;
use tracing::debug;

/// The result of reconciling one resource kind for one subdomain
///
/// Produced once per pass per subdomain and consumed immediately; not
/// retained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Already in the desired state; never reported to the sink
    Skipped,
    /// The manager applied an update; carries its result text
    Updated(String),
    /// The manager's update call failed; carries the rendered cause
    Failed(String),
}

impl Outcome {
    /// The text to report to the sink, or `None` for a skip
    pub fn report_text(&self) -> Option<&str> {
        match self {
            Outcome::Skipped => None,
            Outcome::Updated(text) | Outcome::Failed(text) => Some(text),
        }
    }
}

/// Check and correct DNS and certificate drift for one subdomain
///
/// DNS first, then certificate; the checks are sequential but
/// independent, so a DNS failure never prevents the certificate check.
/// Manager errors are converted into [`Outcome::Failed`] here and never
/// escape this function.
pub async fn reconcile(
    subdomain: &Subdomain,
    public_ip: Option<IpAddr>,
    dns: &dyn DnsManager,
    ssl: &dyn SslManager,
) -> (Outcome, Outcome) {
    let dns_outcome = if dns.needs_update(subdomain, public_ip).await {
        match dns.update(subdomain, public_ip).await {
            Ok(text) => Outcome::Updated(text),
            Err(e) => Outcome::Failed(format!("Failed: {e}")),
        }
    } else {
        Outcome::Skipped
    };

    let ssl_outcome = if ssl.needs_update(subdomain).await {
        match ssl.update(subdomain).await {
            Ok(text) => Outcome::Updated(text),
            Err(e) => Outcome::Failed(format!("Failed: {e}")),
        }
    } else {
        Outcome::Skipped
    };

    (dns_outcome, ssl_outcome)
}

/// One reconciliation pass over the full discovered set
///
/// This is the [`Job`] handed to a scheduler. The raw source is wrapped
/// in [`Deduplicated`] at construction, so the pass always sees each
/// full name at most once per run.
pub struct ReconcilePass {
    discovery: Deduplicated<Arc<dyn Discovery>>,
    dns: Arc<dyn DnsManager>,
    ssl: Arc<dyn SslManager>,
    hub: Arc<NotificationHub>,
}

impl ReconcilePass {
    /// Assemble a pass from its collaborators
    pub fn new(
        discovery: Arc<dyn Discovery>,
        dns: Arc<dyn DnsManager>,
        ssl: Arc<dyn SslManager>,
        hub: Arc<NotificationHub>,
    ) -> Self {
        Self {
            discovery: Deduplicated::new(discovery),
            dns,
            ssl,
            hub,
        }
    }
}

#[async_trait]
impl Job for ReconcilePass {
    async fn run(&self) -> Result<()> {
        // One snapshot per pass: every subdomain is compared against
        // the same public IP.
        let public_ip = self.dns.current_public_ip().await;
        debug!(?public_ip, "starting reconciliation pass");

        let mut stream = self.discovery.stream();
        while let Some(subdomain) = stream.next().await {
            let (dns_outcome, ssl_outcome) =
                reconcile(&subdomain, public_ip, self.dns.as_ref(), self.ssl.as_ref()).await;

            if let Some(text) = dns_outcome.report_text() {
                self.hub.dns_updated(&subdomain, text).await;
            }

            if let Some(text) = ssl_outcome.report_text() {
                self.hub.ssl_updated(&subdomain, text).await;
            }
        }

        Ok(())
    }
}
