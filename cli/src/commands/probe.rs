use std::net::Ipv4Addr;

use cfscout_common::config::{Config, Pacing, RankSettings};
use cfscout_common::models::{BatchResult, Candidate};
use cfscout_common::success;
use cfscout_core::prober::HttpProber;
use cfscout_core::ranker::Ranker;

use crate::commands::ProbeArgs;
use crate::mprint;
use crate::terminal::{format, print};

/// Probes every address once, without pacing, and lists outcomes in input order.
pub async fn probe(addresses: Vec<Ipv4Addr>, args: ProbeArgs, cfg: &Config) -> anyhow::Result<()> {
    let prober = HttpProber::new(args.settings())?;
    let settings = RankSettings {
        limit: addresses.len().max(1),
        pacing: Pacing::None,
        ..Default::default()
    };
    let ranker = Ranker::new(Box::new(prober), settings)?;

    let candidates: Vec<Candidate> = addresses.into_iter().map(Candidate::new).collect();
    let batch = ranker.rank(&candidates).await;

    if cfg.json {
        println!("{}", serde_json::to_string_pretty(&batch.all)?);
        return Ok(());
    }

    print_outcomes(&batch, cfg);
    Ok(())
}

fn print_outcomes(batch: &BatchResult, cfg: &Config) {
    if cfg.quiet < 2 {
        print::header("probe results", cfg.quiet);
        for (idx, outcome) in batch.all.iter().enumerate() {
            print::tree_head(idx, &outcome.address.to_string());
            print::as_tree_one_level(format::probe_to_details(outcome));
            if idx + 1 != batch.all.len() {
                mprint!();
            }
        }
    }

    success!(
        "{} of {} addresses answered",
        batch.success_count(),
        batch.all.len()
    );
}
