mod commands;
mod terminal;

use cfscout_common::warn;
use commands::{CommandLine, Commands, collect, probe, rank};
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init(commands.log_level());

    let cfg = commands.config();
    if !cfg.json {
        print::banner(cfg.no_banner, cfg.quiet);
    }

    let run = async move {
        match commands.command {
            Commands::Collect { sources } => {
                print::header("collecting candidates", cfg.quiet);
                collect::collect(sources, &cfg).await
            }
            Commands::Probe {
                addresses,
                probe: probe_args,
            } => {
                print::header("probing addresses", cfg.quiet);
                probe::probe(addresses, probe_args, &cfg).await
            }
            Commands::Rank {
                sources,
                probe: probe_args,
                rank: rank_args,
            } => {
                print::header("getting ready for ranking", cfg.quiet);
                rank::rank(sources, probe_args, rank_args, &cfg).await
            }
        }
    };

    tokio::select! {
        result = run => result,
        _ = tokio::signal::ctrl_c() => {
            warn!("Interrupted, discarding partial results");
            Ok(())
        }
    }
}
