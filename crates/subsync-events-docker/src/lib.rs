// # Docker Engine Event Source
//
// This crate feeds Docker Engine lifecycle events into the
// event-driven scheduler.
//
// The Engine `/events` endpoint is queried with explicit `since` and
// `until` bounds, so every call returns once the window closes and
// cancellation never waits on an open-ended stream. The response is a
// newline-delimited JSON sequence; blank or malformed lines are
// skipped.
//
// ## API Reference
//
// - System events: https://docs.docker.com/engine/api/v1.47/#tag/System/operation/SystemEvents

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use subsync_core::config::EventSourceConfig;
use subsync_core::traits::{EventSource, EventSourceFactory, LifecycleEvent};
use subsync_core::{ComponentRegistry, Error, Result};
use tracing::debug;

/// Default HTTP timeout for Engine API requests
///
/// Must stay comfortably above the polling window, since the Engine
/// holds the request open until `until` passes.
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(60);

/// One event line as the Engine API serializes it
#[derive(Debug, Deserialize)]
struct RawEvent {
    #[serde(default)]
    scope: Option<String>,
    #[serde(rename = "Action", default)]
    action: Option<String>,
    #[serde(rename = "Type", default)]
    kind: Option<String>,
    #[serde(rename = "Actor", default)]
    actor: Option<RawActor>,
}

#[derive(Debug, Default, Deserialize)]
struct RawActor {
    #[serde(rename = "Attributes", default)]
    attributes: HashMap<String, String>,
}

impl From<RawEvent> for LifecycleEvent {
    fn from(raw: RawEvent) -> Self {
        LifecycleEvent {
            scope: raw.scope,
            action: raw.action,
            kind: raw.kind,
            actor_name: raw
                .actor
                .and_then(|actor| actor.attributes.get("name").cloned()),
        }
    }
}

/// Event source polling the Docker Engine API
#[derive(Debug)]
pub struct DockerEventSource {
    endpoint: String,
    client: reqwest::Client,
}

impl DockerEventSource {
    /// Create a source against one Engine API endpoint
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let endpoint = endpoint.into();
        if endpoint.is_empty() {
            return Err(Error::config("Docker endpoint cannot be empty"));
        }

        let client = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::event_source(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn parse_events(body: &str) -> Vec<LifecycleEvent> {
        body.lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| match serde_json::from_str::<RawEvent>(line) {
                Ok(raw) => Some(raw.into()),
                Err(e) => {
                    debug!(error = %e, "skipping malformed event line");
                    None
                }
            })
            .collect()
    }
}

#[async_trait]
impl EventSource for DockerEventSource {
    async fn events(
        &self,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<LifecycleEvent>> {
        let url = format!(
            "{}/events?since={}&until={}",
            self.endpoint,
            since.timestamp(),
            until.timestamp()
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::event_source(format!("HTTP request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::event_source(format!(
                "events request returned {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::event_source(format!("failed to read event stream: {e}")))?;

        Ok(Self::parse_events(&body))
    }

    async fn close(&self) {
        // Requests are window-bounded, so there is no held connection;
        // the pooled client is dropped with the source.
        debug!(endpoint = %self.endpoint, "docker event source closed");
    }
}

/// Factory for creating Docker event sources
pub struct DockerEventSourceFactory;

impl EventSourceFactory for DockerEventSourceFactory {
    fn create(&self, config: &EventSourceConfig) -> Result<std::sync::Arc<dyn EventSource>> {
        match config {
            EventSourceConfig::Docker { endpoint } => {
                Ok(std::sync::Arc::new(DockerEventSource::new(endpoint)?))
            }
            other => Err(Error::config(format!(
                "docker event source factory got a '{}' configuration",
                other.type_name()
            ))),
        }
    }
}

/// Register the Docker event source factory
pub fn register(registry: &ComponentRegistry) {
    registry.register_event_source("docker", Box::new(DockerEventSourceFactory));
}

#[cfg(test)]
mod tests {
    use super::*;

    const SERVICE_CREATE: &str = r#"{"Type":"service","Action":"create","Actor":{"ID":"r1w3","Attributes":{"name":"sample"}},"scope":"swarm","time":1699999999}"#;
    const CONTAINER_START: &str = r#"{"Type":"container","Action":"start","Actor":{"ID":"abc","Attributes":{"image":"nginx","name":"web.1"}},"scope":"local","time":1699999999}"#;

    #[test]
    fn a_service_create_line_maps_to_a_matching_event() {
        let events = DockerEventSource::parse_events(SERVICE_CREATE);

        assert_eq!(events.len(), 1);
        assert!(events[0].is_service_created());
        assert_eq!(events[0].actor_name_or_unknown(), "sample");
    }

    #[test]
    fn a_container_event_maps_but_does_not_match() {
        let events = DockerEventSource::parse_events(CONTAINER_START);

        assert_eq!(events.len(), 1);
        assert!(!events[0].is_service_created());
        assert_eq!(events[0].actor_name_or_unknown(), "web.1");
    }

    #[test]
    fn blank_and_malformed_lines_are_skipped() {
        let body = format!("\n{}\nnot json\n{{\"Type\":17}}\n{}\n", SERVICE_CREATE, CONTAINER_START);

        let events = DockerEventSource::parse_events(&body);

        assert_eq!(events.len(), 2);
    }

    #[test]
    fn an_event_without_an_actor_name_reads_unknown() {
        let body = r#"{"Type":"service","Action":"create","scope":"swarm"}"#;

        let events = DockerEventSource::parse_events(body);

        assert_eq!(events.len(), 1);
        assert!(events[0].is_service_created());
        assert_eq!(events[0].actor_name_or_unknown(), "unknown");
    }

    #[test]
    fn the_factory_builds_from_a_docker_configuration() {
        let factory = DockerEventSourceFactory;

        let config = EventSourceConfig::Docker {
            endpoint: "http://localhost:2375".to_string(),
        };

        assert!(factory.create(&config).is_ok());
    }

    #[test]
    fn an_empty_endpoint_is_a_configuration_error() {
        assert!(DockerEventSource::new("").is_err());
    }
}
