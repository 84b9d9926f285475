//! Contract tests for the reconciliation pass
//!
//! Constraints verified:
//! - one public IP snapshot per pass, shared by all subdomains
//! - duplicate full names produce at most one outcome per pass
//! - skips are silent; updates and failures are reported
//! - per-subdomain and per-resource failure isolation

mod common;

use common::*;
use std::net::IpAddr;
use std::sync::Arc;
use subsync_core::scheduler::Job;
use subsync_core::{NotificationHub, ReconcilePass, StaticDiscovery};

const PUBLIC_IP: IpAddr = IpAddr::V4(std::net::Ipv4Addr::new(1, 2, 3, 4));
const STALE_IP: IpAddr = IpAddr::V4(std::net::Ipv4Addr::new(1, 1, 1, 1));

struct Fixture {
    dns: Arc<ScriptedDnsManager>,
    ssl: Arc<ScriptedSslManager>,
    recorder: Arc<RecordingNotifier>,
    pass: ReconcilePass,
}

fn fixture(names: &[&str], dns: ScriptedDnsManager, ssl: ScriptedSslManager) -> Fixture {
    let discovery = Arc::new(StaticDiscovery::new(names.iter().copied(), "unit.test"));
    let dns = Arc::new(dns);
    let ssl = Arc::new(ssl);
    let recorder = Arc::new(RecordingNotifier::new());
    let hub = Arc::new(NotificationHub::new(vec![recorder.clone()]));

    let pass = ReconcilePass::new(discovery, dns.clone(), ssl.clone(), hub);
    Fixture {
        dns,
        ssl,
        recorder,
        pass,
    }
}

#[tokio::test]
async fn a_full_pass_reports_dns_then_ssl_per_subdomain() {
    let f = fixture(
        &["www", "test"],
        ScriptedDnsManager::new(PUBLIC_IP, STALE_IP),
        ScriptedSslManager::new(true),
    );

    f.pass.run().await.unwrap();

    let events = f.recorder.events();
    assert_eq!(
        events,
        vec![
            ("DNS".to_string(), "www".to_string(), "OK".to_string()),
            ("SSL".to_string(), "www".to_string(), "Updated".to_string()),
            ("DNS".to_string(), "test".to_string(), "OK".to_string()),
            ("SSL".to_string(), "test".to_string(), "Updated".to_string()),
        ]
    );
}

#[tokio::test]
async fn the_public_ip_is_queried_once_per_pass() {
    let f = fixture(
        &["www", "test", "api", "mail"],
        ScriptedDnsManager::new(PUBLIC_IP, STALE_IP),
        ScriptedSslManager::new(true),
    );

    f.pass.run().await.unwrap();

    assert_eq!(f.dns.public_ip_calls(), 1);
}

#[tokio::test]
async fn duplicate_full_names_are_reconciled_once() {
    let f = fixture(
        &["www", "test", "www", "www.unit.test"],
        ScriptedDnsManager::new(PUBLIC_IP, STALE_IP),
        ScriptedSslManager::new(true),
    );

    f.pass.run().await.unwrap();

    assert_eq!(f.dns.updates(), vec!["www.unit.test", "test.unit.test"]);
    assert_eq!(f.ssl.updates(), vec!["www.unit.test", "test.unit.test"]);
}

#[tokio::test]
async fn in_sync_records_produce_no_notifications() {
    // Recorded IP already matches the public IP and certificates are
    // current: steady state is silent.
    let f = fixture(
        &["www", "test"],
        ScriptedDnsManager::new(PUBLIC_IP, PUBLIC_IP),
        ScriptedSslManager::new(false),
    );

    f.pass.run().await.unwrap();

    assert!(f.recorder.events().is_empty());
    assert!(f.dns.updates().is_empty());
}

#[tokio::test]
async fn only_the_drifted_subdomain_is_reported() {
    let dns = ScriptedDnsManager::new(PUBLIC_IP, PUBLIC_IP).with_recorded("www.unit.test", STALE_IP);
    let f = fixture(&["www", "test"], dns, ScriptedSslManager::new(false));

    f.pass.run().await.unwrap();

    assert_eq!(
        f.recorder.events(),
        vec![("DNS".to_string(), "www".to_string(), "OK".to_string())]
    );
}

#[tokio::test]
async fn a_dns_failure_does_not_stop_ssl_or_later_subdomains() {
    let dns = ScriptedDnsManager::new(PUBLIC_IP, STALE_IP).failing_for("www.unit.test");
    let f = fixture(&["www", "test"], dns, ScriptedSslManager::new(true));

    f.pass.run().await.unwrap();

    let events = f.recorder.events();
    assert_eq!(
        events[0],
        (
            "DNS".to_string(),
            "www".to_string(),
            "Failed: DNS manager error: record update rejected".to_string()
        )
    );
    // www still got its certificate, and test was fully processed.
    assert_eq!(
        events[1],
        ("SSL".to_string(), "www".to_string(), "Updated".to_string())
    );
    assert_eq!(
        events[2],
        ("DNS".to_string(), "test".to_string(), "OK".to_string())
    );
    assert_eq!(f.ssl.updates(), vec!["www.unit.test", "test.unit.test"]);
}

#[tokio::test]
async fn an_ssl_failure_is_reported_and_the_pass_continues() {
    let ssl = ScriptedSslManager::new(true).failing_for("www.unit.test");
    let f = fixture(
        &["www", "test"],
        ScriptedDnsManager::new(PUBLIC_IP, PUBLIC_IP),
        ssl,
    );

    f.pass.run().await.unwrap();

    assert_eq!(
        f.recorder.events(),
        vec![
            (
                "SSL".to_string(),
                "www".to_string(),
                "Failed: SSL manager error: issuance rejected".to_string()
            ),
            ("SSL".to_string(), "test".to_string(), "Updated".to_string()),
        ]
    );
}
