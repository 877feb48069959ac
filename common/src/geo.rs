//! Geolocation annotations and the lookup port.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

pub const UNKNOWN: &str = "Unknown";
pub const LOCATION_NOT_FOUND: &str = "Location not found";
pub const ISP_NOT_FOUND: &str = "ISP not found";
pub const LOCATION_LOOKUP_FAILED: &str = "Location lookup failed";
pub const ISP_LOOKUP_FAILED: &str = "ISP lookup failed";

/// The three fields consumed from a lookup service. Each may be absent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GeoDetails {
    pub city: Option<String>,
    pub country: Option<String>,
    pub isp: Option<String>,
}

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("lookup request failed: {0}")]
    Transport(String),

    #[error("lookup timed out")]
    Timeout,

    #[error("lookup service rejected the address: {0}")]
    Rejected(String),

    #[error("malformed lookup response: {0}")]
    Malformed(String),
}

/// Resolves an address to approximate location and provider data.
///
/// `query` is usually a dotted-quad but may be the probe target itself when
/// no address could be read from the probe output.
/// The service is best-effort: callers must tolerate every error.
#[async_trait]
pub trait GeoLocator: Send + Sync {
    async fn locate(&self, query: &str) -> Result<GeoDetails, LookupError>;
}

/// Annotation attached to every requested address, successful or not.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GeoRecord {
    #[serde(rename = "ip")]
    pub address: String,
    #[serde(rename = "location")]
    pub location_label: String,
    #[serde(rename = "isp")]
    pub provider_label: String,
}

impl GeoRecord {
    pub fn from_details(address: impl Into<String>, details: GeoDetails) -> Self {
        let city: String = details.city.unwrap_or_else(|| UNKNOWN.to_string());
        let country: String = details.country.unwrap_or_else(|| UNKNOWN.to_string());
        Self {
            address: address.into(),
            location_label: format!("{city}, {country}"),
            provider_label: details.isp.unwrap_or_else(|| UNKNOWN.to_string()),
        }
    }

    /// Sentinel for a lookup that answered with an error.
    pub fn not_found(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            location_label: LOCATION_NOT_FOUND.to_string(),
            provider_label: ISP_NOT_FOUND.to_string(),
        }
    }

    /// Sentinel for a lookup task that never produced an answer.
    pub fn lookup_failed(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            location_label: LOCATION_LOOKUP_FAILED.to_string(),
            provider_label: ISP_LOOKUP_FAILED.to_string(),
        }
    }

    pub fn is_sentinel(&self) -> bool {
        matches!(
            self.location_label.as_str(),
            LOCATION_NOT_FOUND | LOCATION_LOOKUP_FAILED
        )
    }
}
