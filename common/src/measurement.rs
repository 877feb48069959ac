//! Round-trip samples and the loss statistics derived from a reachability probe.

use serde::Serialize;

/// One round-trip-time observation in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Sample {
    pub millis: f64,
    /// Reported as an upper bound (`time<1ms`) rather than a measurement.
    pub ceiling: bool,
}

impl Sample {
    pub fn exact(millis: f64) -> Self {
        Self {
            millis,
            ceiling: false,
        }
    }

    pub fn ceiling(millis: f64) -> Self {
        Self {
            millis,
            ceiling: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RttStats {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

impl RttStats {
    /// `None` for an empty set; statistics over no samples are meaningless.
    pub fn from_samples(samples: &[Sample]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let (min, max, sum) = samples.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY, 0.0),
            |(min, max, sum), s| (min.min(s.millis), max.max(s.millis), sum + s.millis),
        );

        Some(Self {
            min,
            max,
            avg: sum / samples.len() as f64,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementSummary {
    pub sent: u32,
    pub received: u32,
    pub lost: u32,
    pub loss_percent: f64,
    pub rtt: Option<RttStats>,
}

impl MeasurementSummary {
    /// Round-trip statistics are kept only when `received > 0`.
    pub fn new(sent: u32, received: u32, lost: u32, samples: &[Sample]) -> Self {
        Self {
            sent,
            received,
            lost,
            loss_percent: loss_percent(sent, lost),
            rtt: RttStats::from_samples(samples).filter(|_| received > 0),
        }
    }
}

/// `lost / sent * 100`, or `0.0` when nothing was sent.
pub fn loss_percent(sent: u32, lost: u32) -> f64 {
    if sent == 0 {
        return 0.0;
    }
    f64::from(lost) / f64::from(sent) * 100.0
}
