use std::net::Ipv4Addr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::models::ProbeOutcome;

/// An IPv4 address considered for latency testing.
///
/// The aggregator emits candidates with no delay; a delay only appears once
/// a probe outcome has been folded back into a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Candidate {
    pub address: Ipv4Addr,
    #[serde(rename = "delay_ms", with = "crate::utils::millis::option")]
    pub delay: Option<Duration>,
}

impl Candidate {
    pub fn new(address: Ipv4Addr) -> Self {
        Self {
            address,
            delay: None,
        }
    }
}

impl From<Ipv4Addr> for Candidate {
    fn from(address: Ipv4Addr) -> Self {
        Self::new(address)
    }
}

impl From<&ProbeOutcome> for Candidate {
    fn from(outcome: &ProbeOutcome) -> Self {
        Self {
            address: outcome.address,
            delay: outcome.delay,
        }
    }
}
