use std::time::Instant;

use colored::*;
use tracing::{Instrument, Span, info_span};
use tracing_indicatif::span_ext::IndicatifSpanExt;

use cfscout_common::config::Config;
use cfscout_common::models::CollectionResult;
use cfscout_common::success;
use cfscout_core::collector::Collector;

use crate::commands::SourceArgs;
use crate::mprint;
use crate::terminal::{colors, format, print, progress};

pub async fn collect(args: SourceArgs, cfg: &Config) -> anyhow::Result<()> {
    let collector = Collector::http(&args.settings())?;
    let started = Instant::now();
    let result = fetch_with_spinner(&collector, &args).await;

    if cfg.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    print_sources(&result, cfg);
    print_summary(&result, started, cfg);
    Ok(())
}

async fn fetch_with_spinner(collector: &Collector, args: &SourceArgs) -> CollectionResult {
    let sources = args.urls();
    collector
        .collect(&sources)
        .instrument(scrape_span(sources.len()))
        .await
}

/// Spinner span shown while sources are scraped.
pub fn scrape_span(source_count: usize) -> Span {
    let span = info_span!("collect", indicatif.pb_show = true);
    span.pb_set_style(&progress::spinner_style());
    span.pb_set_message(&format!("Scraping {source_count} sources..."));
    span
}

pub fn print_sources(result: &CollectionResult, cfg: &Config) {
    if cfg.quiet > 1 {
        return;
    }

    print::header("sources", cfg.quiet);
    for (idx, outcome) in result.sources.iter().enumerate() {
        print::tree_head(idx, outcome.source.as_str());
        print::as_tree_one_level(format::source_to_details(outcome));
        if idx + 1 != result.sources.len() {
            mprint!();
        }
    }
}

fn print_summary(result: &CollectionResult, started: Instant, cfg: &Config) {
    let failed = result.failed_sources().count();
    let unique: ColoredString = format!("{} unique candidates", result.count).bold().green();
    let elapsed: ColoredString = format!("{:.2}s", started.elapsed().as_secs_f64())
        .bold()
        .yellow();

    if result.is_empty() {
        print::header("nothing collected", cfg.quiet);
        print::no_results();
    }

    let output = format!(
        "Collection Complete: {unique} from {} sources ({failed} failed) in {elapsed}",
        result.sources.len()
    )
    .color(colors::TEXT_DEFAULT);

    match cfg.quiet {
        0 => {
            print::fat_separator();
            print::centerln(&output.to_string());
        }
        _ => success!("{}", output),
    }
}
