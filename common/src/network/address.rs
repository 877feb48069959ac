//! Dotted-quad addresses as they appear in diagnostic output.
//!
//! Addresses are kept in their textual form. Only the shape is checked
//! (four dot-separated groups of one to three digits), so a token such as
//! `999.999.999.999` is a valid [`NetworkAddress`].

use std::fmt;

use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NetworkAddress(String);

impl NetworkAddress {
    /// Accepts `s` when it is exactly four dot-separated groups of 1-3 ASCII digits.
    pub fn parse(s: &str) -> Option<Self> {
        let groups: Vec<&str> = s.split('.').collect();
        let well_formed: bool = groups.len() == 4
            && groups
                .iter()
                .all(|g| (1..=3).contains(&g.len()) && g.bytes().all(|b| b.is_ascii_digit()));

        well_formed.then(|| Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the address may be handed to a public lookup service.
    ///
    /// Excludes loopback (127.0.0.0/8), the unspecified address and the
    /// private ranges 10.0.0.0/8, 172.16.0.0/12 and 192.168.0.0/16.
    pub fn is_public(&self) -> bool {
        !(self.is_loopback() || self.is_unspecified() || self.is_private())
    }

    fn octet(&self, idx: usize) -> u16 {
        self.0
            .split('.')
            .nth(idx)
            .and_then(|g| g.parse::<u16>().ok())
            .unwrap_or(u16::MAX)
    }

    fn is_loopback(&self) -> bool {
        self.octet(0) == 127
    }

    fn is_unspecified(&self) -> bool {
        (0..4).all(|i| self.octet(i) == 0)
    }

    fn is_private(&self) -> bool {
        match (self.octet(0), self.octet(1)) {
            (10, _) => true,
            (172, second) => (16..=31).contains(&second),
            (192, 168) => true,
            _ => false,
        }
    }
}

impl fmt::Display for NetworkAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<NetworkAddress> for String {
    fn from(address: NetworkAddress) -> Self {
        address.0
    }
}

impl AsRef<str> for NetworkAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
