//! # Latency Prober
//!
//! Times a single HTTP GET against a candidate's diagnostic endpoint.
//!
//! The request is raced against an explicit [`Deadline`]; the client itself
//! carries no timeout. Every path resolves to a [`ProbeOutcome`], a probe
//! never returns an error.

use std::net::Ipv4Addr;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, redirect};
use tokio::time::Instant;

use cfscout_common::config::ProbeSettings;
use cfscout_common::debug;
use cfscout_common::models::ProbeOutcome;

use crate::deadline::{Deadline, Expired};

/// Measures the latency of one candidate.
#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, address: Ipv4Addr) -> ProbeOutcome;
}

pub struct HttpProber {
    client: Client,
    settings: ProbeSettings,
}

impl HttpProber {
    pub fn new(settings: ProbeSettings) -> anyhow::Result<Self> {
        settings.validate()?;

        let client = Client::builder()
            .user_agent(settings.user_agent.as_str())
            .danger_accept_invalid_certs(settings.accept_invalid_certs)
            .redirect(redirect::Policy::none())
            .no_proxy()
            .build()
            .context("building probe client")?;

        Ok(Self { client, settings })
    }

    pub fn settings(&self) -> &ProbeSettings {
        &self.settings
    }

    /// The diagnostic URL probed for `address`.
    pub fn target_url(&self, address: Ipv4Addr) -> String {
        let ProbeSettings {
            scheme, port, path, ..
        } = &self.settings;

        match port {
            Some(port) => format!("{scheme}://{address}:{port}{path}"),
            None => format!("{scheme}://{address}{path}"),
        }
    }
}

#[async_trait]
impl Prober for HttpProber {
    async fn probe(&self, address: Ipv4Addr) -> ProbeOutcome {
        let url = self.target_url(address);
        let deadline = Deadline::arm(self.settings.timeout);
        let request = self.client.get(&url).send();

        // Headers are enough; the body is never read.
        let started = Instant::now();
        let outcome = match deadline.run(request).await {
            Ok(Ok(_response)) => ProbeOutcome::reached(address, started.elapsed()),
            Ok(Err(e)) => ProbeOutcome::unreachable(address, crate::describe_error(&e)),
            Err(Expired(budget)) => ProbeOutcome::timed_out(address, budget),
        };

        debug!(%address, success = outcome.success, delay = ?outcome.delay, "probe finished");
        outcome
    }
}
