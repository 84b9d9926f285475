//! Configuration types for the subsync system
//!
//! This module defines all configuration structures used throughout the
//! crate. Component choices are tagged enums resolved once at startup
//! through the [`ComponentRegistry`](crate::registry::ComponentRegistry).

use serde::{Deserialize, Serialize};

/// Main subsync configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubsyncConfig {
    /// Scheduler configuration
    pub scheduler: SchedulerConfig,

    /// Subdomain discovery configuration
    #[serde(default)]
    pub discovery: DiscoveryConfig,

    /// DNS manager configuration
    #[serde(default)]
    pub dns: DnsManagerConfig,

    /// SSL manager configuration
    #[serde(default)]
    pub ssl: SslManagerConfig,

    /// Notification delegates, notified in this order
    #[serde(default)]
    pub notifiers: Vec<NotifierConfig>,

    /// Base domain for discovered names without one
    #[serde(default = "default_domain")]
    pub default_domain: String,
}

impl SubsyncConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self {
            scheduler: SchedulerConfig::default(),
            discovery: DiscoveryConfig::default(),
            dns: DnsManagerConfig::default(),
            ssl: SslManagerConfig::default(),
            notifiers: Vec::new(),
            default_domain: default_domain(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.default_domain.is_empty() {
            return Err(crate::Error::config("Default domain cannot be empty"));
        }

        self.scheduler.validate()?;

        for notifier in &self.notifiers {
            notifier.validate()?;
        }

        Ok(())
    }
}

impl Default for SubsyncConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Scheduler configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SchedulerConfig {
    /// Run one pass and stop
    Oneshot,

    /// Fixed-interval repeating scheduler
    Interval {
        /// Seconds between passes
        #[serde(default = "default_interval_secs")]
        interval_secs: u64,
        /// Run the first pass right away instead of waiting an interval
        #[serde(default)]
        immediate_start: bool,
    },

    /// Repeating scheduler that also reacts to lifecycle events
    Events {
        /// Seconds between passes
        #[serde(default = "default_interval_secs")]
        interval_secs: u64,
        /// Run the first pass right away instead of waiting an interval
        #[serde(default)]
        immediate_start: bool,
        /// Length of each event-polling window, in seconds
        #[serde(default = "default_window_secs")]
        window_secs: u64,
        /// The event source to listen on
        source: EventSourceConfig,
    },
}

impl SchedulerConfig {
    /// Validate the scheduler configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            SchedulerConfig::Oneshot => Ok(()),
            SchedulerConfig::Interval { interval_secs, .. } => {
                if *interval_secs == 0 {
                    return Err(crate::Error::config("Scheduler interval must be > 0"));
                }
                Ok(())
            }
            SchedulerConfig::Events {
                interval_secs,
                window_secs,
                ..
            } => {
                if *interval_secs == 0 {
                    return Err(crate::Error::config("Scheduler interval must be > 0"));
                }
                if *window_secs == 0 {
                    return Err(crate::Error::config("Event polling window must be > 0"));
                }
                Ok(())
            }
        }
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        SchedulerConfig::Oneshot
    }
}

/// Subdomain discovery configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiscoveryConfig {
    /// No discovery (yields nothing)
    #[default]
    Noop,

    /// Fixed list of subdomain names
    Static {
        /// Raw names, resolved against the default domain
        subdomains: Vec<String>,
        /// Base domain for names without one
        default_domain: String,
    },

    /// Custom discovery source
    Custom {
        /// Factory name to use
        factory: String,
        /// Custom configuration data
        config: serde_json::Value,
    },
}

impl DiscoveryConfig {
    /// Get the discovery type name
    pub fn type_name(&self) -> &str {
        match self {
            DiscoveryConfig::Noop => "noop",
            DiscoveryConfig::Static { .. } => "static",
            DiscoveryConfig::Custom { factory, .. } => factory,
        }
    }
}

/// DNS manager configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DnsManagerConfig {
    /// No DNS backend (nothing ever needs an update)
    #[default]
    Noop,

    /// Custom DNS backend
    Custom {
        /// Factory name to use
        factory: String,
        /// Custom configuration data
        config: serde_json::Value,
    },
}

impl DnsManagerConfig {
    /// Get the DNS manager type name
    pub fn type_name(&self) -> &str {
        match self {
            DnsManagerConfig::Noop => "noop",
            DnsManagerConfig::Custom { factory, .. } => factory,
        }
    }
}

/// SSL manager configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SslManagerConfig {
    /// No certificate backend (nothing ever needs an update)
    #[default]
    Noop,

    /// Custom certificate backend
    Custom {
        /// Factory name to use
        factory: String,
        /// Custom configuration data
        config: serde_json::Value,
    },
}

impl SslManagerConfig {
    /// Get the SSL manager type name
    pub fn type_name(&self) -> &str {
        match self {
            SslManagerConfig::Noop => "noop",
            SslManagerConfig::Custom { factory, .. } => factory,
        }
    }
}

/// Notification delegate configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NotifierConfig {
    /// Structured-log notifier
    Log,

    /// Discard all notifications
    Noop,

    /// Slack chat notifier (`subsync-notify-slack` crate)
    Slack {
        /// Bot token used for chat.postMessage
        token: String,
        /// Channel to post into
        #[serde(default = "default_slack_channel")]
        channel: String,
        /// Name the bot posts under
        #[serde(default = "default_slack_bot_name")]
        bot_name: String,
        /// Optional icon URL for the bot
        #[serde(default)]
        bot_icon: Option<String>,
    },

    /// Custom notification delegate
    Custom {
        /// Factory name to use
        factory: String,
        /// Custom configuration data
        config: serde_json::Value,
    },
}

impl NotifierConfig {
    /// Validate the notifier configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            NotifierConfig::Slack { token, channel, .. } => {
                if token.is_empty() {
                    return Err(crate::Error::config("Slack token cannot be empty"));
                }
                if channel.is_empty() {
                    return Err(crate::Error::config("Slack channel cannot be empty"));
                }
                Ok(())
            }
            NotifierConfig::Custom { factory, .. } => {
                if factory.is_empty() {
                    return Err(crate::Error::config(
                        "Custom notifier factory cannot be empty",
                    ));
                }
                Ok(())
            }
            NotifierConfig::Log | NotifierConfig::Noop => Ok(()),
        }
    }

    /// Get the notifier type name
    pub fn type_name(&self) -> &str {
        match self {
            NotifierConfig::Log => "log",
            NotifierConfig::Noop => "noop",
            NotifierConfig::Slack { .. } => "slack",
            NotifierConfig::Custom { factory, .. } => factory,
        }
    }
}

/// Lifecycle event source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventSourceConfig {
    /// Docker Engine API events (`subsync-events-docker` crate)
    Docker {
        /// Engine API endpoint
        #[serde(default = "default_docker_endpoint")]
        endpoint: String,
    },

    /// Custom event source
    Custom {
        /// Factory name to use
        factory: String,
        /// Custom configuration data
        config: serde_json::Value,
    },
}

impl EventSourceConfig {
    /// Get the event source type name
    pub fn type_name(&self) -> &str {
        match self {
            EventSourceConfig::Docker { .. } => "docker",
            EventSourceConfig::Custom { factory, .. } => factory,
        }
    }
}

fn default_domain() -> String {
    "localhost.local".to_string()
}

fn default_interval_secs() -> u64 {
    300
}

fn default_window_secs() -> u64 {
    5
}

fn default_slack_channel() -> String {
    "general".to_string()
}

fn default_slack_bot_name() -> String {
    "subsync-bot".to_string()
}

fn default_docker_endpoint() -> String {
    "http://localhost:2375".to_string()
}
