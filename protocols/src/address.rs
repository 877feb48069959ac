//! Address Extractor: public dotted-quads in discovery order.

use std::collections::HashSet;
use std::sync::LazyLock;

use netlens_common::network::address::NetworkAddress;
use regex::Regex;

static DOTTED_QUAD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:[0-9]{1,3}\.){3}[0-9]{1,3}\b").unwrap());

/// Scans `text` for dotted-quad tokens.
///
/// Keeps the first occurrence of each token, in order, and drops loopback,
/// unspecified and private addresses.
pub fn extract_addresses(text: &str) -> Vec<NetworkAddress> {
    let mut seen: HashSet<&str> = HashSet::new();

    DOTTED_QUAD
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|token| seen.insert(*token))
        .filter_map(NetworkAddress::parse)
        .filter(NetworkAddress::is_public)
        .collect()
}
