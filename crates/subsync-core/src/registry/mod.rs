//! Factory-based component registry
//!
//! The registry maps a configuration type name to a factory for each
//! component kind, so concrete collaborators are resolved exactly once
//! at startup into interface-typed instances; the core never
//! re-resolves, it only holds the trait objects.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use subsync_core::registry::ComponentRegistry;
//!
//! let registry = ComponentRegistry::new();
//! subsync_core::registry::register_builtins(&registry);
//! // Adapter crates add their own:
//! // subsync_notify_slack::register(&registry);
//!
//! let discovery = registry.create_discovery(&config.discovery)?;
//! ```

use crate::config::{
    DiscoveryConfig, DnsManagerConfig, EventSourceConfig, NotifierConfig, SslManagerConfig,
};
use crate::discovery::{NoopDiscovery, StaticDiscovery};
use crate::error::{Error, Result};
use crate::managers::{NoopDnsManager, NoopSslManager};
use crate::notify::{LogNotifier, NoopNotifier};
use crate::traits::{
    Discovery, DiscoveryFactory, DnsManager, DnsManagerFactory, EventSource, EventSourceFactory,
    Notifier, NotifierFactory, SslManager, SslManagerFactory,
};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Registry of component factories, keyed by configuration type name
///
/// ## Thread Safety
///
/// Uses interior mutability with RwLock, allowing concurrent reads and
/// exclusive writes.
#[derive(Default)]
pub struct ComponentRegistry {
    discoveries: RwLock<HashMap<String, Box<dyn DiscoveryFactory>>>,
    dns_managers: RwLock<HashMap<String, Box<dyn DnsManagerFactory>>>,
    ssl_managers: RwLock<HashMap<String, Box<dyn SslManagerFactory>>>,
    notifiers: RwLock<HashMap<String, Box<dyn NotifierFactory>>>,
    event_sources: RwLock<HashMap<String, Box<dyn EventSourceFactory>>>,
}

impl ComponentRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a discovery factory
    pub fn register_discovery(&self, name: impl Into<String>, factory: Box<dyn DiscoveryFactory>) {
        self.discoveries
            .write()
            .unwrap()
            .insert(name.into(), factory);
    }

    /// Register a DNS manager factory
    pub fn register_dns_manager(
        &self,
        name: impl Into<String>,
        factory: Box<dyn DnsManagerFactory>,
    ) {
        self.dns_managers
            .write()
            .unwrap()
            .insert(name.into(), factory);
    }

    /// Register an SSL manager factory
    pub fn register_ssl_manager(
        &self,
        name: impl Into<String>,
        factory: Box<dyn SslManagerFactory>,
    ) {
        self.ssl_managers
            .write()
            .unwrap()
            .insert(name.into(), factory);
    }

    /// Register a notifier factory
    pub fn register_notifier(&self, name: impl Into<String>, factory: Box<dyn NotifierFactory>) {
        self.notifiers.write().unwrap().insert(name.into(), factory);
    }

    /// Register an event source factory
    pub fn register_event_source(
        &self,
        name: impl Into<String>,
        factory: Box<dyn EventSourceFactory>,
    ) {
        self.event_sources
            .write()
            .unwrap()
            .insert(name.into(), factory);
    }

    /// Create a discovery source from configuration
    pub fn create_discovery(&self, config: &DiscoveryConfig) -> Result<Arc<dyn Discovery>> {
        let factories = self.discoveries.read().unwrap();
        let factory = factories.get(config.type_name()).ok_or_else(|| {
            Error::config(format!("Unknown discovery type: {}", config.type_name()))
        })?;
        factory.create(config)
    }

    /// Create a DNS manager from configuration
    pub fn create_dns_manager(&self, config: &DnsManagerConfig) -> Result<Arc<dyn DnsManager>> {
        let factories = self.dns_managers.read().unwrap();
        let factory = factories.get(config.type_name()).ok_or_else(|| {
            Error::config(format!("Unknown DNS manager type: {}", config.type_name()))
        })?;
        factory.create(config)
    }

    /// Create an SSL manager from configuration
    pub fn create_ssl_manager(&self, config: &SslManagerConfig) -> Result<Arc<dyn SslManager>> {
        let factories = self.ssl_managers.read().unwrap();
        let factory = factories.get(config.type_name()).ok_or_else(|| {
            Error::config(format!("Unknown SSL manager type: {}", config.type_name()))
        })?;
        factory.create(config)
    }

    /// Create a notifier from configuration
    pub fn create_notifier(&self, config: &NotifierConfig) -> Result<Arc<dyn Notifier>> {
        let factories = self.notifiers.read().unwrap();
        let factory = factories.get(config.type_name()).ok_or_else(|| {
            Error::config(format!("Unknown notifier type: {}", config.type_name()))
        })?;
        factory.create(config)
    }

    /// Create an event source from configuration
    pub fn create_event_source(&self, config: &EventSourceConfig) -> Result<Arc<dyn EventSource>> {
        let factories = self.event_sources.read().unwrap();
        let factory = factories.get(config.type_name()).ok_or_else(|| {
            Error::config(format!("Unknown event source type: {}", config.type_name()))
        })?;
        factory.create(config)
    }

    /// Check if a notifier type is registered
    pub fn has_notifier(&self, name: &str) -> bool {
        self.notifiers.read().unwrap().contains_key(name)
    }
}

/// Register the factories for all built-in components
pub fn register_builtins(registry: &ComponentRegistry) {
    registry.register_discovery("noop", Box::new(NoopDiscoveryFactory));
    registry.register_discovery("static", Box::new(StaticDiscoveryFactory));
    registry.register_dns_manager("noop", Box::new(NoopDnsManagerFactory));
    registry.register_ssl_manager("noop", Box::new(NoopSslManagerFactory));
    registry.register_notifier("log", Box::new(LogNotifierFactory));
    registry.register_notifier("noop", Box::new(NoopNotifierFactory));
}

struct NoopDiscoveryFactory;

impl DiscoveryFactory for NoopDiscoveryFactory {
    fn create(&self, _config: &DiscoveryConfig) -> Result<Arc<dyn Discovery>> {
        Ok(Arc::new(NoopDiscovery))
    }
}

struct StaticDiscoveryFactory;

impl DiscoveryFactory for StaticDiscoveryFactory {
    fn create(&self, config: &DiscoveryConfig) -> Result<Arc<dyn Discovery>> {
        match config {
            DiscoveryConfig::Static {
                subdomains,
                default_domain,
            } => Ok(Arc::new(StaticDiscovery::new(subdomains, default_domain))),
            other => Err(Error::config(format!(
                "static discovery factory got a '{}' configuration",
                other.type_name()
            ))),
        }
    }
}

struct NoopDnsManagerFactory;

impl DnsManagerFactory for NoopDnsManagerFactory {
    fn create(&self, _config: &DnsManagerConfig) -> Result<Arc<dyn DnsManager>> {
        Ok(Arc::new(NoopDnsManager))
    }
}

struct NoopSslManagerFactory;

impl SslManagerFactory for NoopSslManagerFactory {
    fn create(&self, _config: &SslManagerConfig) -> Result<Arc<dyn SslManager>> {
        Ok(Arc::new(NoopSslManager))
    }
}

struct LogNotifierFactory;

impl NotifierFactory for LogNotifierFactory {
    fn create(&self, _config: &NotifierConfig) -> Result<Arc<dyn Notifier>> {
        Ok(Arc::new(LogNotifier))
    }
}

struct NoopNotifierFactory;

impl NotifierFactory for NoopNotifierFactory {
    fn create(&self, _config: &NotifierConfig) -> Result<Arc<dyn Notifier>> {
        Ok(Arc::new(NoopNotifier))
    }
}
