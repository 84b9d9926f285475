//! Built-in subdomain sources and the dedup boundary wrapper
//!
//! [`Deduplicated`] is the wrapper the core puts around every raw
//! source: whatever the underlying source guarantees, the sequence the
//! pass sees contains each full name once, in first-seen order.

use crate::subdomain::Subdomain;
use crate::traits::{Discovery, SubdomainStream};
use std::collections::HashSet;
use tokio_stream::StreamExt;

/// Dedup wrapper around a raw subdomain source
///
/// Keyed on the full name, case-sensitive. Each call to `stream()`
/// starts with an empty seen-set; deduplication is per pass, never
/// across passes.
pub struct Deduplicated<D: Discovery> {
    inner: D,
}

impl<D: Discovery> Deduplicated<D> {
    /// Wrap a raw source
    pub fn new(inner: D) -> Self {
        Self { inner }
    }
}

impl<D: Discovery> Discovery for Deduplicated<D> {
    fn stream(&self) -> SubdomainStream {
        let mut seen = HashSet::new();
        Box::pin(
            self.inner
                .stream()
                .filter(move |subdomain| seen.insert(subdomain.full_name())),
        )
    }
}

/// A source that yields nothing
pub struct NoopDiscovery;

impl Discovery for NoopDiscovery {
    fn stream(&self) -> SubdomainStream {
        Box::pin(tokio_stream::empty())
    }
}

/// A source backed by a fixed, configured list of names
///
/// Raw names are resolved against the default domain at construction;
/// empty entries are skipped rather than reported as errors.
pub struct StaticDiscovery {
    subdomains: Vec<Subdomain>,
}

impl StaticDiscovery {
    /// Build the source from raw names and a default domain
    pub fn new<I, S>(names: I, default_domain: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let subdomains = names
            .into_iter()
            .filter_map(|raw| {
                let raw = raw.as_ref().trim();
                if raw.is_empty() {
                    None
                } else {
                    Some(Subdomain::parse(raw, default_domain))
                }
            })
            .collect();

        Self { subdomains }
    }
}

impl Discovery for StaticDiscovery {
    fn stream(&self) -> SubdomainStream {
        Box::pin(tokio_stream::iter(self.subdomains.clone()))
    }
}
