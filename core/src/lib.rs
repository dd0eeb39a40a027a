//! # cfscout core
//!
//! The acquisition, probing and ranking pipeline.
//!
//! * [`collector`]: fetches sources, extracts and deduplicates candidates.
//! * [`prober`]: times one HTTP request against a candidate.
//! * [`ranker`]: probes candidates in paced groups and ranks the survivors.
//! * [`pipeline`]: chains the three stages.
//!
//! Network unreliability never surfaces as an `Err`; it is recorded inside
//! the returned values. Errors are reserved for invalid settings and client
//! construction.

use std::error::Error;
use std::net::Ipv4Addr;
use std::time::Duration;

use url::Url;

use cfscout_common::config::{CollectSettings, ProbeSettings, RankSettings};
use cfscout_common::models::{BatchResult, Candidate, CollectionResult, ProbeOutcome};

pub mod collector;
pub mod deadline;
pub mod pipeline;
pub mod prober;
pub mod ranker;
pub mod sources;

use collector::Collector;
use prober::{HttpProber, Prober};
use ranker::Ranker;

/// Aggregates candidates from `sources` with default settings.
pub async fn collect(sources: &[Url]) -> anyhow::Result<CollectionResult> {
    let collector = Collector::http(&CollectSettings::default())?;
    Ok(collector.collect(sources).await)
}

/// Probes a single address with the default endpoint and the given budget.
pub async fn probe(address: Ipv4Addr, timeout: Duration) -> anyhow::Result<ProbeOutcome> {
    let prober = HttpProber::new(ProbeSettings {
        timeout,
        ..Default::default()
    })?;
    Ok(prober.probe(address).await)
}

/// Ranks `candidates` with default probing and pacing, keeping at most `limit`.
pub async fn rank(candidates: &[Candidate], limit: usize) -> anyhow::Result<BatchResult> {
    let settings = RankSettings {
        limit,
        ..Default::default()
    };
    let prober = HttpProber::new(ProbeSettings::default())?;
    let ranker = Ranker::new(Box::new(prober), settings)?;
    Ok(ranker.rank(candidates).await)
}

/// Flattens an error and its sources into one line.
pub(crate) fn describe_error(err: &dyn Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !message.contains(&cause_text) {
            message.push_str(": ");
            message.push_str(&cause_text);
        }
        source = cause.source();
    }
    message
}
