pub mod collect;
pub mod probe;
pub mod rank;

use std::net::Ipv4Addr;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use tracing::Level;
use url::Url;

use cfscout_common::config::{
    CollectSettings, Config, DEFAULT_PROBE_PATH, Pacing, ProbeSettings, RankSettings, Settings,
};
use cfscout_core::sources;

#[derive(Parser)]
#[command(name = "cfscout")]
#[command(version, about = "Finds the fastest CDN edge addresses.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Reduce output (-q hides headers, -qq prints only the summary)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Show debug events
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Do not print the banner
    #[arg(long, global = true)]
    pub no_banner: bool,

    /// Print results as JSON on stdout
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Gather candidate addresses from the configured sources
    #[command(alias = "c")]
    Collect {
        #[command(flatten)]
        sources: SourceArgs,
    },
    /// Measure latency to one or more addresses
    #[command(alias = "p")]
    Probe {
        #[arg(required = true)]
        addresses: Vec<Ipv4Addr>,
        #[command(flatten)]
        probe: ProbeArgs,
    },
    /// Gather candidates, probe them and rank the fastest
    #[command(alias = "r")]
    Rank {
        #[command(flatten)]
        sources: SourceArgs,
        #[command(flatten)]
        probe: ProbeArgs,
        #[command(flatten)]
        rank: RankArgs,
    },
}

#[derive(Args, Clone)]
pub struct SourceArgs {
    /// Source URL to scrape; repeat to add more (defaults to the built-in list)
    #[arg(long = "source", value_name = "URL")]
    pub sources: Vec<Url>,

    /// Per-source fetch deadline in milliseconds
    #[arg(long, default_value_t = 10_000)]
    pub fetch_timeout_ms: u64,
}

#[derive(Args, Clone)]
pub struct ProbeArgs {
    /// Per-probe deadline in milliseconds
    #[arg(long, default_value_t = 5_000)]
    pub timeout_ms: u64,

    /// Probe scheme
    #[arg(long, default_value = "https")]
    pub scheme: String,

    /// Probe port (defaults to the scheme's port)
    #[arg(long)]
    pub port: Option<u16>,

    /// Diagnostic path requested on each candidate
    #[arg(long, default_value = DEFAULT_PROBE_PATH)]
    pub path: String,

    /// Verify TLS certificates of probed addresses
    #[arg(long)]
    pub verify_tls: bool,
}

#[derive(Args, Clone)]
pub struct RankArgs {
    /// Maximum number of addresses in the ranking
    #[arg(short, long, default_value_t = 25)]
    pub limit: usize,

    /// Probes in flight per group
    #[arg(short, long, default_value_t = 10)]
    pub concurrency: usize,

    /// Pause between groups in milliseconds
    #[arg(long, default_value_t = 1_000)]
    pub pacing_ms: u64,

    /// Random extra pause between groups, up to this many milliseconds
    #[arg(long, default_value_t = 0)]
    pub jitter_ms: u64,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn config(&self) -> Config {
        Config {
            quiet: self.quiet,
            no_banner: self.no_banner,
            json: self.json,
        }
    }

    pub fn log_level(&self) -> Level {
        match (self.verbose, self.quiet) {
            (true, _) => Level::DEBUG,
            (false, 0) => Level::INFO,
            (false, _) => Level::WARN,
        }
    }
}

impl SourceArgs {
    pub fn urls(&self) -> Vec<Url> {
        if self.sources.is_empty() {
            sources::default_sources()
        } else {
            self.sources.clone()
        }
    }

    pub fn settings(&self) -> CollectSettings {
        CollectSettings {
            fetch_timeout: Duration::from_millis(self.fetch_timeout_ms),
            ..Default::default()
        }
    }
}

impl ProbeArgs {
    pub fn settings(&self) -> ProbeSettings {
        ProbeSettings {
            timeout: Duration::from_millis(self.timeout_ms),
            scheme: self.scheme.to_ascii_lowercase(),
            port: self.port,
            path: self.path.clone(),
            accept_invalid_certs: !self.verify_tls,
            ..Default::default()
        }
    }
}

impl RankArgs {
    pub fn settings(&self) -> RankSettings {
        let base = Duration::from_millis(self.pacing_ms);
        let pacing = match (self.pacing_ms, self.jitter_ms) {
            (0, 0) => Pacing::None,
            (_, 0) => Pacing::Fixed(base),
            (_, jitter) => Pacing::Jittered {
                base,
                jitter: Duration::from_millis(jitter),
            },
        };

        RankSettings {
            limit: self.limit,
            concurrency: self.concurrency,
            pacing,
        }
    }
}

pub fn settings(sources: &SourceArgs, probe: &ProbeArgs, rank: &RankArgs) -> Settings {
    Settings {
        collect: sources.settings(),
        probe: probe.settings(),
        rank: rank.settings(),
    }
}
