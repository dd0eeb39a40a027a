use std::fmt;
use std::net::Ipv4Addr;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Why a probe failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeErrorKind {
    /// The deadline fired before a response arrived.
    Timeout,
    /// DNS, connect, TLS or any other transport-level failure.
    NetworkError,
}

impl fmt::Display for ProbeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeErrorKind::Timeout => f.write_str("timeout"),
            ProbeErrorKind::NetworkError => f.write_str("network error"),
        }
    }
}

/// The result of exactly one probe attempt.
///
/// Built only through [`reached`](Self::reached), [`timed_out`](Self::timed_out)
/// and [`unreachable`](Self::unreachable), so `delay` is present iff `success`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeOutcome {
    pub address: Ipv4Addr,
    #[serde(rename = "delay_ms", with = "crate::utils::millis::option")]
    pub delay: Option<Duration>,
    pub success: bool,
    pub error_kind: Option<ProbeErrorKind>,
    pub error: Option<String>,
}

impl ProbeOutcome {
    pub fn reached(address: Ipv4Addr, delay: Duration) -> Self {
        Self {
            address,
            delay: Some(delay),
            success: true,
            error_kind: None,
            error: None,
        }
    }

    pub fn timed_out(address: Ipv4Addr, after: Duration) -> Self {
        Self {
            address,
            delay: None,
            success: false,
            error_kind: Some(ProbeErrorKind::Timeout),
            error: Some(format!("no response within {}ms", after.as_millis())),
        }
    }

    pub fn unreachable(address: Ipv4Addr, detail: impl Into<String>) -> Self {
        Self {
            address,
            delay: None,
            success: false,
            error_kind: Some(ProbeErrorKind::NetworkError),
            error: Some(detail.into()),
        }
    }
}

/// The ranked output of a batch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResult {
    /// Successful outcomes, ascending by delay, ties in input order.
    pub top_n: Vec<ProbeOutcome>,
    /// One outcome per input candidate, in input order.
    pub all: Vec<ProbeOutcome>,
    pub tested_at: DateTime<Utc>,
}

impl BatchResult {
    pub fn new(top_n: Vec<ProbeOutcome>, all: Vec<ProbeOutcome>) -> Self {
        Self {
            top_n,
            all,
            tested_at: Utc::now(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    pub fn success_count(&self) -> usize {
        self.all.iter().filter(|o| o.success).count()
    }

    pub fn failure_count(&self) -> usize {
        self.all.len() - self.success_count()
    }

    pub fn timeout_count(&self) -> usize {
        self.all
            .iter()
            .filter(|o| o.error_kind == Some(ProbeErrorKind::Timeout))
            .count()
    }
}
