use std::time::Duration;

use crate::network::target::Platform;

pub const DEFAULT_REACHABILITY_DEADLINE: Duration = Duration::from_secs(30);
pub const DEFAULT_TRACE_DEADLINE: Duration = Duration::from_secs(60);
pub const DEFAULT_GEO_ENDPOINT: &str = "http://ip-api.com/json";
pub const DEFAULT_GEO_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct Config {
    /// Upper bound for a reachability probe (`ping`).
    ///
    /// The external process is killed once it is exceeded.
    pub reachability_deadline: Duration,
    /// Upper bound for a path trace. Tracing legitimately takes longer.
    pub trace_deadline: Duration,
    /// Base URL of the geolocation lookup service. The address is appended
    /// as the last path segment.
    pub geo_endpoint: String,
    /// Bound for a single geolocation lookup.
    pub geo_timeout: Duration,
    /// Output grammar and command family used for probes.
    pub platform: Platform,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reachability_deadline: DEFAULT_REACHABILITY_DEADLINE,
            trace_deadline: DEFAULT_TRACE_DEADLINE,
            geo_endpoint: DEFAULT_GEO_ENDPOINT.to_string(),
            geo_timeout: DEFAULT_GEO_TIMEOUT,
            platform: Platform::host(),
        }
    }
}
