use std::collections::BTreeSet;
use std::fmt::Display;
use std::net::Ipv4Addr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::models::Candidate;

/// Telemetry for one configured source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceOutcome {
    pub source: Url,
    /// Tokens matching the loose dotted-quad pattern.
    pub raw_count: usize,
    /// Raw tokens that passed validation, independent of cross-source dedup.
    pub valid_count: usize,
    pub success: bool,
    pub error: Option<String>,
}

impl SourceOutcome {
    pub fn fetched(source: Url, raw_count: usize, valid_count: usize) -> Self {
        Self {
            source,
            raw_count,
            valid_count,
            success: true,
            error: None,
        }
    }

    pub fn failed(source: Url, error: impl Display) -> Self {
        Self {
            source,
            raw_count: 0,
            valid_count: 0,
            success: false,
            error: Some(error.to_string()),
        }
    }
}

/// Everything the aggregator learned in a single run.
///
/// `count` always equals `candidates.len()`; candidates are unique and
/// ordered by address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionResult {
    pub candidates: Vec<Candidate>,
    pub count: usize,
    pub sources: Vec<SourceOutcome>,
    pub timestamp: DateTime<Utc>,
}

impl CollectionResult {
    pub fn new(unique: BTreeSet<Ipv4Addr>, sources: Vec<SourceOutcome>) -> Self {
        let candidates: Vec<Candidate> = unique.into_iter().map(Candidate::new).collect();
        Self {
            count: candidates.len(),
            candidates,
            sources,
            timestamp: Utc::now(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn failed_sources(&self) -> impl Iterator<Item = &SourceOutcome> {
        self.sources.iter().filter(|outcome| !outcome.success)
    }
}
