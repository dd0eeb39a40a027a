use std::time::Duration;

use colored::*;

use cfscout_common::models::{ProbeOutcome, SourceOutcome};

use crate::terminal::colors;

const FAST_MS: u128 = 150;
const MODERATE_MS: u128 = 400;

pub type Detail = (String, ColoredString);

pub fn delay_to_colored(delay: Duration) -> ColoredString {
    let ms = delay.as_millis();
    let color = match ms {
        0..FAST_MS => colors::FAST,
        FAST_MS..MODERATE_MS => colors::MODERATE,
        _ => colors::SLOW,
    };
    format!("{ms}ms").color(color).bold()
}

pub fn probe_to_details(outcome: &ProbeOutcome) -> Vec<Detail> {
    let mut details: Vec<Detail> = vec![(
        "IPv4".to_string(),
        outcome.address.to_string().color(colors::IPV4_ADDR),
    )];

    match (outcome.delay, outcome.error_kind) {
        (Some(delay), _) => details.push(("Delay".to_string(), delay_to_colored(delay))),
        (None, Some(kind)) => {
            details.push(("Status".to_string(), kind.to_string().color(colors::FAILURE)));
            if let Some(error) = &outcome.error {
                details.push(("Reason".to_string(), error.as_str().normal()));
            }
        }
        (None, None) => {}
    }

    details
}

pub fn source_to_details(outcome: &SourceOutcome) -> Vec<Detail> {
    if outcome.success {
        vec![
            ("Status".to_string(), "ok".green()),
            ("Matched".to_string(), outcome.raw_count.to_string().normal()),
            ("Valid".to_string(), outcome.valid_count.to_string().bold()),
        ]
    } else {
        let reason = outcome.error.as_deref().unwrap_or("unknown error");
        vec![
            ("Status".to_string(), "failed".color(colors::FAILURE).bold()),
            ("Reason".to_string(), reason.normal()),
        ]
    }
}
