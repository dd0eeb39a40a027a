//! # Settings
//!
//! Tunables for each pipeline stage. Every struct has a [`Default`] matching
//! the production behaviour and a `validate` that rejects contract
//! violations before any network activity starts.

use std::time::Duration;

use thiserror::Error;

/// User agent sent by both sources and probes. Many CDN edges reject
/// requests without a browser-like agent.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

pub const DEFAULT_PROBE_PATH: &str = "/cdn-cgi/trace";

/// Presentation options for the command line front end.
#[derive(Debug, Clone, Copy, Default)]
pub struct Config {
    /// `0` prints everything, `1` hides headers, `2` prints only the summary.
    pub quiet: u8,
    pub no_banner: bool,
    /// Print machine-readable JSON to stdout instead of the tree view.
    pub json: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("concurrency must be at least 1")]
    ZeroConcurrency,
    #[error("limit must be at least 1")]
    ZeroLimit,
    #[error("{0} timeout must be greater than zero")]
    ZeroTimeout(&'static str),
    #[error("unsupported probe scheme '{0}', expected 'http' or 'https'")]
    UnsupportedScheme(String),
    #[error("probe path must start with '/', got '{0}'")]
    RelativePath(String),
}

/// Source aggregator settings.
#[derive(Debug, Clone)]
pub struct CollectSettings {
    /// Deadline covering one source's headers and body.
    pub fetch_timeout: Duration,
    pub user_agent: String,
    /// Honour `HTTP_PROXY`-style environment variables.
    pub use_env_proxy: bool,
}

impl Default for CollectSettings {
    fn default() -> Self {
        Self {
            fetch_timeout: Duration::from_secs(10),
            user_agent: BROWSER_USER_AGENT.to_string(),
            use_env_proxy: true,
        }
    }
}

impl CollectSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.fetch_timeout.is_zero() {
            return Err(SettingsError::ZeroTimeout("fetch"));
        }
        Ok(())
    }
}

/// Latency prober settings.
#[derive(Debug, Clone)]
pub struct ProbeSettings {
    pub timeout: Duration,
    pub scheme: String,
    /// `None` uses the scheme's default port.
    pub port: Option<u16>,
    pub path: String,
    pub user_agent: String,
    /// Candidates are addressed by IP, so certificate names never match.
    pub accept_invalid_certs: bool,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            scheme: "https".to_string(),
            port: None,
            path: DEFAULT_PROBE_PATH.to_string(),
            user_agent: BROWSER_USER_AGENT.to_string(),
            accept_invalid_certs: true,
        }
    }
}

impl ProbeSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.timeout.is_zero() {
            return Err(SettingsError::ZeroTimeout("probe"));
        }
        if !matches!(self.scheme.as_str(), "http" | "https") {
            return Err(SettingsError::UnsupportedScheme(self.scheme.clone()));
        }
        if !self.path.starts_with('/') {
            return Err(SettingsError::RelativePath(self.path.clone()));
        }
        Ok(())
    }
}

/// Pause inserted between consecutive probe groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    None,
    Fixed(Duration),
    /// `base` plus a uniformly random extra delay in `0..=jitter`.
    Jittered { base: Duration, jitter: Duration },
}

impl Default for Pacing {
    fn default() -> Self {
        Pacing::Fixed(Duration::from_secs(1))
    }
}

/// Batch ranker settings.
#[derive(Debug, Clone, Copy)]
pub struct RankSettings {
    /// Upper bound on the length of the ranked list.
    pub limit: usize,
    /// Group size; also the number of probes in flight at once.
    pub concurrency: usize,
    pub pacing: Pacing,
}

impl Default for RankSettings {
    fn default() -> Self {
        Self {
            limit: 25,
            concurrency: 10,
            pacing: Pacing::default(),
        }
    }
}

impl RankSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.concurrency == 0 {
            return Err(SettingsError::ZeroConcurrency);
        }
        if self.limit == 0 {
            return Err(SettingsError::ZeroLimit);
        }
        Ok(())
    }
}

/// Settings for a full collect-then-rank run.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub collect: CollectSettings,
    pub probe: ProbeSettings,
    pub rank: RankSettings,
}

impl Settings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.collect.validate()?;
        self.probe.validate()?;
        self.rank.validate()
    }
}
