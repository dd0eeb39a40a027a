//! # Batch Ranker
//!
//! Drives a [`Prober`] over a list of candidates in fixed-size groups.
//!
//! Probes inside a group run concurrently and the group is joined before the
//! next one starts. Groups are separated by a pacing pause so upstream edges
//! never see one large burst. Failed probes stay in the full log and are
//! left out of the ranking.

use std::time::Duration;

use futures::future::join_all;

use cfscout_common::config::{Pacing, RankSettings, SettingsError};
use cfscout_common::debug;
use cfscout_common::models::{BatchResult, Candidate, ProbeOutcome};

use crate::prober::Prober;

/// Called once per outcome, in input order, as each group completes.
pub type ProgressFn = Box<dyn Fn(&ProbeOutcome) + Send + Sync>;

pub struct Ranker {
    prober: Box<dyn Prober>,
    settings: RankSettings,
    on_outcome: Option<ProgressFn>,
}

impl Ranker {
    pub fn new(prober: Box<dyn Prober>, settings: RankSettings) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self {
            prober,
            settings,
            on_outcome: None,
        })
    }

    pub fn with_progress(mut self, on_outcome: ProgressFn) -> Self {
        self.on_outcome = Some(on_outcome);
        self
    }

    pub fn settings(&self) -> &RankSettings {
        &self.settings
    }

    pub async fn rank(&self, candidates: &[Candidate]) -> BatchResult {
        if candidates.is_empty() {
            return BatchResult::empty();
        }

        let group_size = self.settings.concurrency;
        let group_count = candidates.len().div_ceil(group_size);
        let mut all: Vec<ProbeOutcome> = Vec::with_capacity(candidates.len());

        for (idx, group) in candidates.chunks(group_size).enumerate() {
            if idx > 0 {
                self.pause().await;
            }

            let outcomes: Vec<ProbeOutcome> =
                join_all(group.iter().map(|c| self.prober.probe(c.address))).await;

            debug!(
                group = idx + 1,
                of = group_count,
                reached = outcomes.iter().filter(|o| o.success).count(),
                "probe group finished"
            );

            if let Some(on_outcome) = &self.on_outcome {
                outcomes.iter().for_each(|outcome| on_outcome(outcome));
            }
            all.extend(outcomes);
        }

        let top_n = fastest(&all, self.settings.limit);
        BatchResult::new(top_n, all)
    }

    async fn pause(&self) {
        if let Some(pause) = pause_for(self.settings.pacing) {
            tokio::time::sleep(pause).await;
        }
    }
}

fn pause_for(pacing: Pacing) -> Option<Duration> {
    match pacing {
        Pacing::None => None,
        Pacing::Fixed(pause) => Some(pause),
        Pacing::Jittered { base, jitter } => {
            let extra_ms = u64::try_from(jitter.as_millis()).unwrap_or(u64::MAX);
            Some(base + Duration::from_millis(rand::random_range(0..=extra_ms)))
        }
    }
}

/// Successful outcomes sorted ascending by delay, truncated to `limit`.
///
/// The sort is stable, so equal delays keep their input order.
pub fn fastest(outcomes: &[ProbeOutcome], limit: usize) -> Vec<ProbeOutcome> {
    let mut reached: Vec<ProbeOutcome> = outcomes
        .iter()
        .filter(|outcome| outcome.success)
        .cloned()
        .collect();

    reached.sort_by_key(|outcome| outcome.delay);
    reached.truncate(limit);
    reached
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
