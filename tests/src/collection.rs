use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use url::Url;

use cfscout_common::config::CollectSettings;
use cfscout_core::collector::Collector;

use crate::util;

fn collector(fetch_timeout: Duration) -> Collector {
    Collector::http(&CollectSettings {
        fetch_timeout,
        use_env_proxy: false,
        ..Default::default()
    })
    .unwrap()
}

fn source(addr: SocketAddr) -> Url {
    Url::parse(&format!("http://{addr}/")).unwrap()
}

#[tokio::test]
async fn healthy_sources_survive_failing_neighbours() {
    let first = util::serve_fixed("200 OK", "<li>104.16.1.1</li><li>999.9.9.9</li>").await;
    let broken = util::serve_fixed("500 Internal Server Error", "1.1.1.1").await;
    let closed = util::closed_port().await;
    let last = util::serve_fixed("200 OK", "104.16.1.1 172.64.2.2 172.64.2.2").await;

    let sources = [source(first), source(broken), source(closed), source(last)];
    let result = collector(Duration::from_secs(5)).collect(&sources).await;

    let flags: Vec<bool> = result.sources.iter().map(|s| s.success).collect();
    assert_eq!(flags, vec![true, false, false, true]);
    assert!(result.sources[1].error.as_deref().unwrap().contains("500"));

    assert_eq!(result.sources[0].raw_count, 2);
    assert_eq!(result.sources[0].valid_count, 1);
    assert_eq!(result.sources[3].raw_count, 3);
    assert_eq!(result.sources[3].valid_count, 3);

    let addresses: Vec<Ipv4Addr> = result.candidates.iter().map(|c| c.address).collect();
    assert_eq!(
        addresses,
        vec![Ipv4Addr::new(104, 16, 1, 1), Ipv4Addr::new(172, 64, 2, 2)]
    );
    assert_eq!(result.count, 2);
}

#[tokio::test]
async fn stalled_source_is_cut_off_by_its_deadline() {
    let stalled = util::serve_silent().await;
    let healthy = util::serve_fixed("200 OK", "162.159.0.1").await;

    let sources = [source(stalled), source(healthy)];
    let result = collector(Duration::from_millis(300)).collect(&sources).await;

    assert!(!result.sources[0].success);
    assert_eq!(
        result.sources[0].error.as_deref(),
        Some("timed out after 300ms")
    );
    assert_eq!(result.count, 1);
}

#[tokio::test]
async fn all_sources_down_is_empty_not_an_error() {
    let closed = util::closed_port().await;
    let result = collector(Duration::from_secs(1)).collect(&[source(closed)]).await;

    assert!(result.is_empty());
    assert_eq!(result.sources.len(), 1);
    assert!(!result.sources[0].success);
}
