// # subsync-core
//
// Core library for the subdomain reconciliation service.
//
// ## Architecture Overview
//
// This library keeps discovered subdomains' DNS records and TLS
// certificates synchronized with the host's public IP:
//
// - **Discovery**: trait for enumerating candidate subdomains
// - **DnsManager / SslManager**: traits for the resource backends
// - **ReconcilePass**: the idempotent per-pass orchestrator
// - **NotificationHub**: fan-out sink with per-delegate isolation
// - **Scheduler**: run-once, fixed-interval and event-driven cadences
// - **ComponentRegistry**: factory registry for concrete collaborators
//
// ## Design Principles
//
// 1. **Separation of Concerns**: the engine never knows which backend
//    it drives; collaborators are trait objects resolved at startup
// 2. **Failure Isolation**: a subdomain, a resource kind, a
//    notification delegate and a scheduled run are each their own
//    failure boundary, and none can stop the others
// 3. **Library-First**: all core functionality is usable without the
//    daemon

pub mod config;
pub mod discovery;
pub mod error;
pub mod managers;
pub mod notify;
pub mod reconcile;
pub mod registry;
pub mod scheduler;
pub mod subdomain;
pub mod traits;

// Re-export core types for convenience
pub use config::{SchedulerConfig, SubsyncConfig};
pub use discovery::{Deduplicated, NoopDiscovery, StaticDiscovery};
pub use error::{Error, Result};
pub use managers::{NoopDnsManager, NoopSslManager};
pub use notify::{LogNotifier, NoopNotifier, NotificationHub};
pub use reconcile::{Outcome, ReconcilePass, reconcile};
pub use registry::ComponentRegistry;
pub use scheduler::{
    EventDrivenScheduler, Job, OneshotScheduler, RepeatingScheduler, Scheduler,
};
pub use subdomain::Subdomain;
pub use traits::{Discovery, DnsManager, EventSource, LifecycleEvent, Notifier, SslManager};
