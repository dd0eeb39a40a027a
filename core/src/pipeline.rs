//! Collect-then-rank in one call.

use serde::Serialize;
use url::Url;

use cfscout_common::config::Settings;
use cfscout_common::models::{BatchResult, CollectionResult};

use crate::collector::Collector;
use crate::prober::HttpProber;
use crate::ranker::{ProgressFn, Ranker};

/// The final artifact handed to whatever persists or serves the results.
#[derive(Debug, Clone, Serialize)]
pub struct Scan {
    pub collection: CollectionResult,
    pub batch: BatchResult,
}

pub struct Pipeline {
    collector: Collector,
    ranker: Ranker,
}

impl Pipeline {
    pub fn new(collector: Collector, ranker: Ranker) -> Self {
        Self { collector, ranker }
    }

    /// Builds the HTTP-backed pipeline after validating `settings`.
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        settings.validate()?;
        let collector = Collector::http(&settings.collect)?;
        let prober = HttpProber::new(settings.probe.clone())?;
        let ranker = Ranker::new(Box::new(prober), settings.rank)?;
        Ok(Self::new(collector, ranker))
    }

    pub fn with_progress(mut self, on_outcome: ProgressFn) -> Self {
        self.ranker = self.ranker.with_progress(on_outcome);
        self
    }

    pub async fn collect(&self, sources: &[Url]) -> CollectionResult {
        self.collector.collect(sources).await
    }

    pub async fn rank(&self, collection: &CollectionResult) -> BatchResult {
        self.ranker.rank(&collection.candidates).await
    }

    pub async fn run(&self, sources: &[Url]) -> Scan {
        let collection = self.collect(sources).await;
        let batch = self.rank(&collection).await;
        Scan { collection, batch }
    }
}

/// Runs the whole pipeline with HTTP-backed stages.
pub async fn run(sources: &[Url], settings: &Settings) -> anyhow::Result<Scan> {
    Ok(Pipeline::from_settings(settings)?.run(sources).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;
    use std::sync::{Arc, Mutex};

    use cfscout_common::config::{Pacing, RankSettings};
    use cfscout_common::models::ProbeOutcome;

    use crate::collector::tests::{Reply, StubFetcher};
    use crate::ranker::tests::ScriptedProber;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    fn addr(s: &str) -> Ipv4Addr {
        s.parse().unwrap()
    }

    fn pipeline(replies: Vec<(Url, Reply)>, delays: &[(Ipv4Addr, u64)], limit: usize) -> Pipeline {
        let collector = Collector::new(Box::new(StubFetcher::new(replies)));
        let settings = RankSettings {
            limit,
            concurrency: 2,
            pacing: Pacing::None,
        };
        let ranker = Ranker::new(Box::new(ScriptedProber::with(delays)), settings).unwrap();
        Pipeline::new(collector, ranker)
    }

    #[tokio::test(start_paused = true)]
    async fn collected_candidates_flow_into_the_ranking() {
        let a = url("https://a.example/list");
        let b = url("https://b.example/list");
        let c = url("https://c.example/list");
        let replies = vec![
            (a.clone(), Reply::Body("104.16.1.1 162.159.1.1")),
            (b.clone(), Reply::Status(503)),
            (c.clone(), Reply::Body("162.159.1.1 172.64.9.9 999.1.1.1")),
        ];
        let delays = [(addr("104.16.1.1"), 180), (addr("172.64.9.9"), 40)];

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let scan = pipeline(replies, &delays, 5)
            .with_progress(Box::new(move |o: &ProbeOutcome| {
                sink.lock().unwrap().push(o.address);
            }))
            .run(&[a, b, c])
            .await;

        assert_eq!(scan.collection.count, 3);
        assert_eq!(scan.collection.failed_sources().count(), 1);

        let probed = seen.lock().unwrap().clone();
        assert_eq!(
            probed,
            vec![addr("104.16.1.1"), addr("162.159.1.1"), addr("172.64.9.9")]
        );

        assert_eq!(scan.batch.all.len(), 3);
        let ranked: Vec<_> = scan.batch.top_n.iter().map(|o| o.address).collect();
        assert_eq!(ranked, vec![addr("172.64.9.9"), addr("104.16.1.1")]);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_collection_yields_an_empty_batch() {
        let a = url("https://a.example/list");
        let scan = pipeline(vec![(a.clone(), Reply::Down)], &[], 5).run(&[a]).await;

        assert!(scan.collection.is_empty());
        assert!(scan.batch.all.is_empty());
        assert!(scan.batch.top_n.is_empty());
    }
}
