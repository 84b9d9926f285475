//! Test doubles and common utilities for the contract tests
//!
//! These doubles record every call through shared handles so the tests
//! can assert on ordering and counts without real backends.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{HashMap, VecDeque};
use std::net::IpAddr;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use subsync_core::error::{Error, Result};
use subsync_core::scheduler::Job;
use subsync_core::subdomain::Subdomain;
use subsync_core::traits::{DnsManager, EventSource, LifecycleEvent, Notifier, SslManager};

/// A recorded notification: (kind, subject, text)
pub type RecordedEvent = (String, String, String);

/// Notifier that records everything it receives
#[derive(Default)]
pub struct RecordingNotifier {
    events: Mutex<Vec<RecordedEvent>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<RecordedEvent> {
        self.events.lock().unwrap().clone()
    }

    fn record(&self, kind: &str, subject: &str, text: &str) {
        self.events
            .lock()
            .unwrap()
            .push((kind.to_string(), subject.to_string(), text.to_string()));
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn dns_updated(&self, subdomain: &Subdomain, result: &str) -> Result<()> {
        self.record("DNS", subdomain.name(), result);
        Ok(())
    }

    async fn ssl_updated(&self, subdomain: &Subdomain, result: &str) -> Result<()> {
        self.record("SSL", subdomain.name(), result);
        Ok(())
    }

    async fn message(&self, text: &str) -> Result<()> {
        self.record("Message", "", text);
        Ok(())
    }
}

/// Notifier that fails every call, counting the attempts
#[derive(Default)]
pub struct FailingNotifier {
    attempts: AtomicUsize,
}

impl FailingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Notifier for FailingNotifier {
    async fn dns_updated(&self, _subdomain: &Subdomain, _result: &str) -> Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(Error::notification("delegate is broken"))
    }

    async fn ssl_updated(&self, _subdomain: &Subdomain, _result: &str) -> Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(Error::notification("delegate is broken"))
    }

    async fn message(&self, _text: &str) -> Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(Error::notification("delegate is broken"))
    }
}

/// DNS manager with scripted public/recorded IPs
///
/// Every subdomain starts at `recorded_ip`; `update` moves it to the
/// given IP and answers "OK", except for full names listed in
/// `fail_for`, whose updates error out.
pub struct ScriptedDnsManager {
    public_ip: Option<IpAddr>,
    recorded_ip: Option<IpAddr>,
    overrides: Mutex<HashMap<String, IpAddr>>,
    fail_for: Vec<String>,
    public_ip_calls: AtomicUsize,
    updates: Mutex<Vec<String>>,
}

impl ScriptedDnsManager {
    pub fn new(public_ip: IpAddr, recorded_ip: IpAddr) -> Self {
        Self {
            public_ip: Some(public_ip),
            recorded_ip: Some(recorded_ip),
            overrides: Mutex::new(HashMap::new()),
            fail_for: Vec::new(),
            public_ip_calls: AtomicUsize::new(0),
            updates: Mutex::new(Vec::new()),
        }
    }

    /// Pin one subdomain's recorded IP, overriding the default
    pub fn with_recorded(self, full_name: &str, ip: IpAddr) -> Self {
        self.overrides
            .lock()
            .unwrap()
            .insert(full_name.to_string(), ip);
        self
    }

    /// Make updates for this full name fail
    pub fn failing_for(mut self, full_name: &str) -> Self {
        self.fail_for.push(full_name.to_string());
        self
    }

    pub fn public_ip_calls(&self) -> usize {
        self.public_ip_calls.load(Ordering::SeqCst)
    }

    /// Full names whose records were updated, in order
    pub fn updates(&self) -> Vec<String> {
        self.updates.lock().unwrap().clone()
    }
}

#[async_trait]
impl DnsManager for ScriptedDnsManager {
    async fn current_public_ip(&self) -> Option<IpAddr> {
        self.public_ip_calls.fetch_add(1, Ordering::SeqCst);
        self.public_ip
    }

    async fn current_ip(&self, subdomain: &Subdomain) -> Option<IpAddr> {
        let overrides = self.overrides.lock().unwrap();
        overrides
            .get(&subdomain.full_name())
            .copied()
            .or(self.recorded_ip)
    }

    async fn update(&self, subdomain: &Subdomain, public_ip: Option<IpAddr>) -> Result<String> {
        let full_name = subdomain.full_name();
        if self.fail_for.contains(&full_name) {
            return Err(Error::dns_manager("record update rejected"));
        }

        if let Some(ip) = public_ip {
            self.overrides.lock().unwrap().insert(full_name.clone(), ip);
        }
        self.updates.lock().unwrap().push(full_name);
        Ok("OK".to_string())
    }
}

/// SSL manager that always (or never) wants an update
pub struct ScriptedSslManager {
    needs_update: bool,
    fail_for: Vec<String>,
    updates: Mutex<Vec<String>>,
}

impl ScriptedSslManager {
    pub fn new(needs_update: bool) -> Self {
        Self {
            needs_update,
            fail_for: Vec::new(),
            updates: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_for(mut self, full_name: &str) -> Self {
        self.fail_for.push(full_name.to_string());
        self
    }

    pub fn updates(&self) -> Vec<String> {
        self.updates.lock().unwrap().clone()
    }
}

#[async_trait]
impl SslManager for ScriptedSslManager {
    async fn needs_update(&self, _subdomain: &Subdomain) -> bool {
        self.needs_update
    }

    async fn update(&self, subdomain: &Subdomain) -> Result<String> {
        let full_name = subdomain.full_name();
        if self.fail_for.contains(&full_name) {
            return Err(Error::ssl_manager("issuance rejected"));
        }
        self.updates.lock().unwrap().push(full_name);
        Ok("Updated".to_string())
    }
}

/// Job that counts its runs and optionally fails every time
pub struct CountingJob {
    runs: AtomicUsize,
    fail: bool,
}

impl CountingJob {
    pub fn new() -> Self {
        Self {
            runs: AtomicUsize::new(0),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            runs: AtomicUsize::new(0),
            fail: true,
        }
    }

    pub fn runs(&self) -> usize {
        self.runs.load(Ordering::SeqCst)
    }
}

impl Default for CountingJob {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Job for CountingJob {
    async fn run(&self) -> Result<()> {
        self.runs.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(Error::Other("pass failed on purpose".to_string()))
        } else {
            Ok(())
        }
    }
}

/// Event source that serves scripted poll results, then empty windows
pub struct ScriptedEventSource {
    batches: Mutex<VecDeque<Result<Vec<LifecycleEvent>>>>,
    polls: AtomicUsize,
    closed: AtomicUsize,
}

impl ScriptedEventSource {
    pub fn new(batches: Vec<Result<Vec<LifecycleEvent>>>) -> Self {
        Self {
            batches: Mutex::new(batches.into_iter().collect()),
            polls: AtomicUsize::new(0),
            closed: AtomicUsize::new(0),
        }
    }

    pub fn polls(&self) -> usize {
        self.polls.load(Ordering::SeqCst)
    }

    pub fn close_calls(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EventSource for ScriptedEventSource {
    async fn events(
        &self,
        _since: DateTime<Utc>,
        _until: DateTime<Utc>,
    ) -> Result<Vec<LifecycleEvent>> {
        self.polls.fetch_add(1, Ordering::SeqCst);
        self.batches
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn close(&self) {
        self.closed.fetch_add(1, Ordering::SeqCst);
    }
}

/// A service-creation lifecycle event named `name`
pub fn service_created(name: &str) -> LifecycleEvent {
    LifecycleEvent {
        scope: Some("swarm".to_string()),
        action: Some("create".to_string()),
        kind: Some("service".to_string()),
        actor_name: Some(name.to_string()),
    }
}
