//! Error types for the subsync system
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Result type alias for subsync operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the subsync system
#[derive(Error, Debug)]
pub enum Error {
    /// Subdomain discovery errors
    #[error("Discovery error: {0}")]
    Discovery(String),

    /// DNS manager errors
    #[error("DNS manager error: {0}")]
    DnsManager(String),

    /// SSL manager errors
    #[error("SSL manager error: {0}")]
    SslManager(String),

    /// Notification delivery errors
    #[error("Notification error: {0}")]
    Notification(String),

    /// Lifecycle event source errors
    #[error("Event source error: {0}")]
    EventSource(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The scheduler was cancelled
    #[error("Cancelled: {0}")]
    Cancelled(String),

    /// Network-related errors
    #[error("Network error: {0}")]
    Network(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a discovery error
    pub fn discovery(msg: impl Into<String>) -> Self {
        Self::Discovery(msg.into())
    }

    /// Create a DNS manager error
    pub fn dns_manager(msg: impl Into<String>) -> Self {
        Self::DnsManager(msg.into())
    }

    /// Create an SSL manager error
    pub fn ssl_manager(msg: impl Into<String>) -> Self {
        Self::SslManager(msg.into())
    }

    /// Create a notification error
    pub fn notification(msg: impl Into<String>) -> Self {
        Self::Notification(msg.into())
    }

    /// Create an event source error
    pub fn event_source(msg: impl Into<String>) -> Self {
        Self::EventSource(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a cancellation error
    pub fn cancelled(msg: impl Into<String>) -> Self {
        Self::Cancelled(msg.into())
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}
