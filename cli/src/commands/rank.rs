use std::time::{Duration, Instant};

use colored::*;
use tracing::{Instrument, Span, info_span};
use tracing_indicatif::span_ext::IndicatifSpanExt;

use cfscout_common::config::Config;
use cfscout_common::models::{BatchResult, ProbeOutcome};
use cfscout_common::{info, success};
use cfscout_core::pipeline::{Pipeline, Scan};

use crate::commands::{ProbeArgs, RankArgs, SourceArgs, collect};
use crate::mprint;
use crate::terminal::{colors, format, print, progress};

pub async fn rank(
    sources: SourceArgs,
    probe: ProbeArgs,
    rank: RankArgs,
    cfg: &Config,
) -> anyhow::Result<()> {
    let settings = super::settings(&sources, &probe, &rank);
    let started = Instant::now();

    let span = info_span!("rank", indicatif.pb_show = true);
    let progress_span: Span = span.clone();
    let pipeline = Pipeline::from_settings(&settings)?
        .with_progress(Box::new(move |_: &ProbeOutcome| progress_span.pb_inc(1)));

    let urls = sources.urls();
    let collection = pipeline
        .collect(&urls)
        .instrument(collect::scrape_span(urls.len()))
        .await;
    if !cfg.json {
        collect::print_sources(&collection, cfg);
        mprint!();
    }

    info!(
        "Probing {} candidates, {} at a time",
        collection.count, settings.rank.concurrency
    );
    span.pb_set_style(&progress::probe_style());
    span.pb_set_length(collection.count as u64);
    span.pb_set_message("Probing");
    let batch = pipeline.rank(&collection).instrument(span).await;

    let scan = Scan { collection, batch };
    if cfg.json {
        println!("{}", serde_json::to_string_pretty(&scan)?);
        return Ok(());
    }

    ranking_ends(&scan.batch, started.elapsed(), cfg);
    Ok(())
}

fn ranking_ends(batch: &BatchResult, total_time: Duration, cfg: &Config) {
    if batch.top_n.is_empty() {
        print::header("no reachable candidates", cfg.quiet);
        print::no_results();
    } else if cfg.quiet < 2 {
        print::header("fastest addresses", cfg.quiet);
        print_ranking(batch);
    }
    print_summary(batch, total_time, cfg);
}

fn print_ranking(batch: &BatchResult) {
    let labels: Vec<String> = (1..=batch.top_n.len()).map(|rank| format!("#{rank}")).collect();
    print::set_key_width(labels.iter().map(String::as_str));

    for (label, outcome) in labels.iter().zip(&batch.top_n) {
        let delay: ColoredString = outcome
            .delay
            .map(format::delay_to_colored)
            .unwrap_or_else(|| "-".normal());
        let address: ColoredString = format!("{:<16}", outcome.address).color(colors::IPV4_ADDR);
        print::aligned_line(label, format!("{address} {delay}").normal());
    }
}

fn print_summary(batch: &BatchResult, total_time: Duration, cfg: &Config) {
    let reached: ColoredString = format!("{} reachable", batch.success_count()).bold().green();
    let timeouts: ColoredString = format!("{} timed out", batch.timeout_count()).yellow();
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let output: ColoredString = format!(
        "Ranking Complete: {reached} of {} tested, {timeouts}, in {total_time}",
        batch.all.len()
    )
    .color(colors::TEXT_DEFAULT);

    match cfg.quiet {
        0 => {
            print::fat_separator();
            print::centerln(&output.to_string());
        }
        _ => {
            mprint!();
            success!("{}", output)
        }
    }
}
