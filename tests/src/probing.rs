use std::net::Ipv4Addr;
use std::time::{Duration, Instant};

use cfscout_common::config::{Pacing, ProbeSettings, RankSettings};
use cfscout_common::models::{Candidate, ProbeErrorKind};
use cfscout_core::prober::{HttpProber, Prober};
use cfscout_core::ranker::Ranker;

use crate::util;

fn local_prober(port: u16, timeout: Duration) -> HttpProber {
    HttpProber::new(ProbeSettings {
        timeout,
        scheme: "http".into(),
        port: Some(port),
        ..Default::default()
    })
    .unwrap()
}

#[tokio::test]
async fn responsive_endpoint_is_reached() {
    let server = util::serve_fixed("200 OK", "fl=1\nip=127.0.0.1\n").await;
    let prober = local_prober(server.port(), Duration::from_secs(5));

    let outcome = prober.probe(Ipv4Addr::LOCALHOST).await;

    assert!(outcome.success, "probe failed: {:?}", outcome.error);
    assert!(outcome.delay.is_some());
    assert_eq!(outcome.error_kind, None);
}

#[tokio::test]
async fn error_status_still_counts_as_a_response() {
    let server = util::serve_fixed("403 Forbidden", "denied").await;
    let prober = local_prober(server.port(), Duration::from_secs(5));

    let outcome = prober.probe(Ipv4Addr::LOCALHOST).await;

    assert!(outcome.success);
}

#[tokio::test]
async fn silent_endpoint_times_out() {
    let server = util::serve_silent().await;
    let prober = local_prober(server.port(), Duration::from_millis(300));

    let started = Instant::now();
    let outcome = prober.probe(Ipv4Addr::LOCALHOST).await;

    assert!(!outcome.success);
    assert_eq!(outcome.delay, None);
    assert_eq!(outcome.error_kind, Some(ProbeErrorKind::Timeout));
    assert!(started.elapsed() < Duration::from_secs(3));
}

#[tokio::test]
async fn refused_connection_is_a_network_error() {
    let closed = util::closed_port().await;
    let prober = local_prober(closed.port(), Duration::from_secs(5));

    let outcome = prober.probe(Ipv4Addr::LOCALHOST).await;

    assert!(!outcome.success);
    assert_eq!(outcome.error_kind, Some(ProbeErrorKind::NetworkError));
    assert!(outcome.error.is_some());
}

/// 127.0.0.2 routes to loopback on Linux but nothing listens there.
#[tokio::test]
#[cfg(target_os = "linux")]
async fn ranking_keeps_failures_out_of_top_n() {
    let server = util::serve_fixed("200 OK", "ok").await;
    let prober = local_prober(server.port(), Duration::from_secs(2));
    let settings = RankSettings {
        limit: 25,
        concurrency: 10,
        pacing: Pacing::None,
    };
    let ranker = Ranker::new(Box::new(prober), settings).unwrap();
    let candidates = [
        Candidate::new(Ipv4Addr::new(127, 0, 0, 2)),
        Candidate::new(Ipv4Addr::LOCALHOST),
    ];

    let batch = ranker.rank(&candidates).await;

    assert_eq!(batch.all.len(), 2);
    assert_eq!(batch.all[0].address, Ipv4Addr::new(127, 0, 0, 2));
    assert!(!batch.all[0].success);
    assert_eq!(batch.top_n.len(), 1);
    assert_eq!(batch.top_n[0].address, Ipv4Addr::LOCALHOST);
}
