//! Built-in list of public address feeds.

use url::Url;

/// Feeds that publish CDN edge addresses as plain text or HTML tables.
pub const DEFAULT_SOURCES: &[&str] = &[
    "https://ip.164746.xyz",
    "https://ip.haogege.xyz",
    "https://stock.hostmonit.com/CloudFlareYes",
    "https://api.uouin.com/cloudflare.html",
    "https://addressesapi.090227.xyz",
    "https://www.wetest.vip",
];

pub fn default_sources() -> Vec<Url> {
    DEFAULT_SOURCES
        .iter()
        .filter_map(|source| Url::parse(source).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_default_source_parses() {
        assert_eq!(default_sources().len(), DEFAULT_SOURCES.len());
    }
}
