//! # Address Extraction
//!
//! Pulls IPv4 dotted-quad addresses out of arbitrary scraped text.
//!
//! Extraction is two-phase: a loose lexical match finds every token shaped
//! like `d.d.d.d`, then each token goes through the standard `Ipv4Addr`
//! parser. Tokens that fail validation are dropped silently; garbage text is
//! the expected input.
//!
//! Word boundaries are ASCII-only so that digits glued to CJK text, as in
//! `电信104.16.1.1`, still match.

use std::net::Ipv4Addr;
use std::sync::LazyLock;

use regex::Regex;

static DOTTED_QUAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?-u:\b)(?:[0-9]{1,3}\.){3}[0-9]{1,3}(?-u:\b)")
        .expect("dotted-quad pattern is valid")
});

/// The result of scanning one body of text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Number of tokens matching the loose lexical pattern.
    pub raw: usize,
    /// Tokens that passed strict validation, in text order, duplicates kept.
    pub valid: Vec<Ipv4Addr>,
}

/// Scans `text` for IPv4 addresses.
pub fn extract(text: &str) -> Extraction {
    let mut extraction = Extraction::default();

    for token in DOTTED_QUAD.find_iter(text) {
        extraction.raw += 1;
        if let Some(addr) = parse_strict(token.as_str()) {
            extraction.valid.push(addr);
        }
    }

    extraction
}

/// Parses a dotted-quad token without reinterpreting it.
///
/// Octets above 255 and leading zeros are rejected, so `010.0.0.1` is
/// dropped instead of being read as `10.0.0.1`.
pub fn parse_strict(token: &str) -> Option<Ipv4Addr> {
    token.parse().ok()
}
