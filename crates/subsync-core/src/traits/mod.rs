//! Abstract interfaces to the core's external collaborators
//!
//! Concrete implementations live in sibling modules (noop/static
//! built-ins) or in adapter crates.

pub mod discovery;
pub mod dns_manager;
pub mod event_source;
pub mod notifier;
pub mod ssl_manager;

pub use discovery::{Discovery, DiscoveryFactory, SubdomainStream};
pub use dns_manager::{DnsManager, DnsManagerFactory};
pub use event_source::{EventSource, EventSourceFactory, LifecycleEvent};
pub use notifier::{Notifier, NotifierFactory};
pub use ssl_manager::{SslManager, SslManagerFactory};
