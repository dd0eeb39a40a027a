//! # Source Aggregator
//!
//! Fetches raw text from every configured source in order, extracts strictly
//! validated IPv4 addresses and folds them into one deduplicated set.
//!
//! A failing source is recorded and skipped; it never aborts the run. When
//! every source fails the result is simply empty.

use std::collections::BTreeSet;
use std::net::Ipv4Addr;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use url::Url;

use cfscout_common::config::CollectSettings;
use cfscout_common::models::{CollectionResult, SourceOutcome};
use cfscout_common::utils::ip;
use cfscout_common::{debug, info, warn};

use crate::deadline::{self, Expired};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("timed out after {}ms", .0.as_millis())]
    Timeout(Duration),
    #[error("HTTP {0}")]
    Status(StatusCode),
    #[error("{0}")]
    Transport(String),
}

impl From<Expired> for FetchError {
    fn from(expired: Expired) -> Self {
        FetchError::Timeout(expired.0)
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Transport(crate::describe_error(&err))
    }
}

/// Retrieves the text body of a source.
#[async_trait]
pub trait SourceFetcher: Send + Sync {
    async fn fetch_text(&self, source: &Url) -> Result<String, FetchError>;
}

/// [`SourceFetcher`] backed by `reqwest`, bounded by an explicit [`deadline`].
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new(settings: &CollectSettings) -> anyhow::Result<Self> {
        settings.validate()?;

        let mut builder = Client::builder().user_agent(settings.user_agent.as_str());
        if !settings.use_env_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build().context("building source fetch client")?;

        Ok(Self {
            client,
            timeout: settings.fetch_timeout,
        })
    }

    async fn get_text(&self, source: &Url) -> Result<String, FetchError> {
        let response = self.client.get(source.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        Ok(response.text().await?)
    }
}

#[async_trait]
impl SourceFetcher for HttpFetcher {
    async fn fetch_text(&self, source: &Url) -> Result<String, FetchError> {
        deadline::within(self.timeout, self.get_text(source)).await?
    }
}

/// Runs the aggregation over an ordered list of sources.
pub struct Collector {
    fetcher: Box<dyn SourceFetcher>,
}

impl Collector {
    pub fn new(fetcher: Box<dyn SourceFetcher>) -> Self {
        Self { fetcher }
    }

    pub fn http(settings: &CollectSettings) -> anyhow::Result<Self> {
        Ok(Self::new(Box::new(HttpFetcher::new(settings)?)))
    }

    /// Visits `sources` sequentially. Telemetry keeps source order.
    pub async fn collect(&self, sources: &[Url]) -> CollectionResult {
        let mut outcomes: Vec<SourceOutcome> = Vec::with_capacity(sources.len());
        let mut unique: BTreeSet<Ipv4Addr> = BTreeSet::new();

        for source in sources {
            let (merged, outcome) = self.visit(source, unique).await;
            unique = merged;
            outcomes.push(outcome);
        }

        let result = CollectionResult::new(unique, outcomes);
        info!(
            "Collected {} unique candidates from {} sources ({} failed)",
            result.count,
            sources.len(),
            result.failed_sources().count()
        );
        result
    }

    /// One fold step: takes the accumulated set and hands back the updated one.
    async fn visit(
        &self,
        source: &Url,
        mut seen: BTreeSet<Ipv4Addr>,
    ) -> (BTreeSet<Ipv4Addr>, SourceOutcome) {
        match self.fetcher.fetch_text(source).await {
            Ok(body) => {
                let extraction = ip::extract(&body);
                let valid_count = extraction.valid.len();
                seen.extend(extraction.valid);
                debug!(%source, raw = extraction.raw, valid = valid_count, "source fetched");
                (
                    seen,
                    SourceOutcome::fetched(source.clone(), extraction.raw, valid_count),
                )
            }
            Err(e) => {
                warn!("Source {source} failed: {e}");
                (seen, SourceOutcome::failed(source.clone(), e))
            }
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
