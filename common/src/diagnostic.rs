//! Outward-facing result of one diagnostic run.
//!
//! Serialises to the JSON shape consumed by the browser front end:
//! `output`, `rttValues` (reachability only) and `geoData`.

use serde::Serialize;

use crate::geo::GeoRecord;
use crate::measurement::MeasurementSummary;
use crate::network::address::NetworkAddress;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReachabilityReport {
    /// Human-readable report with a trailing summary block.
    #[serde(rename = "output")]
    pub formatted_output: String,
    /// Every round-trip time in encounter order.
    pub rtt_values: Vec<f64>,
    pub summary: MeasurementSummary,
    /// Address the probed target resolved to, or the target itself.
    pub resolved_target: String,
    /// Exactly one record, for `resolved_target`.
    pub geo_data: Vec<GeoRecord>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathTraceReport {
    /// Captured utility output, unmodified.
    pub output: String,
    /// Public hop addresses in discovery order.
    #[serde(skip)]
    pub hops: Vec<NetworkAddress>,
    /// One record per hop, same order as `hops`.
    pub geo_data: Vec<GeoRecord>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DiagnosticResult {
    Reachability(ReachabilityReport),
    PathTrace(PathTraceReport),
}

impl DiagnosticResult {
    pub fn geo_data(&self) -> &[GeoRecord] {
        match self {
            Self::Reachability(report) => &report.geo_data,
            Self::PathTrace(report) => &report.geo_data,
        }
    }

    pub fn output(&self) -> &str {
        match self {
            Self::Reachability(report) => &report.formatted_output,
            Self::PathTrace(report) => &report.output,
        }
    }
}
