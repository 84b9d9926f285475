//! Subdomain identity
//!
//! A subdomain is a `(name, base)` pair; its full name is the dedup key
//! used everywhere in the core. Instances are owned by the pass that
//! discovered them and are not kept across passes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A DNS name under a base domain
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Subdomain {
    /// The leading label(s), empty for the apex
    name: String,
    /// The base domain
    base: String,
}

impl Subdomain {
    /// Create a subdomain from its parts
    pub fn new(name: impl Into<String>, base: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base: base.into(),
        }
    }

    /// Map a raw discovered name onto a subdomain under `default_domain`
    ///
    /// - the default domain itself becomes the apex (empty name)
    /// - a name ending in the default domain keeps only the leading labels
    /// - anything else is treated as a name directly under the default domain
    pub fn parse(raw: &str, default_domain: &str) -> Self {
        if raw == default_domain {
            Self::new("", default_domain)
        } else if let Some(prefix) = raw.strip_suffix(&format!(".{default_domain}")) {
            Self::new(prefix, default_domain)
        } else {
            Self::new(raw, default_domain)
        }
    }

    /// The leading label(s), empty for the apex
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The base domain
    pub fn base(&self) -> &str {
        &self.base
    }

    /// The fully qualified name, which is also the dedup key
    ///
    /// Comparison is case-sensitive; the source owns any normalization.
    pub fn full_name(&self) -> String {
        if self.name.is_empty() {
            self.base.clone()
        } else {
            format!("{}.{}", self.name, self.base)
        }
    }
}

impl fmt::Display for Subdomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full_name())
    }
}
