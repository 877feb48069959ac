use std::time::Duration;

use netlens_common::config::Config;
use netlens_common::network::target::{Platform, ProbeMode, ProbeRequest};
use netlens_common::probe::ProbeCommand;

const PING_COUNT: &str = "4";
const MAX_HOPS: &str = "30";

/// Builds the native command line for `request` on `platform`.
///
/// The target is passed as one argv element and never reaches a shell.
pub fn probe_command(request: &ProbeRequest, platform: Platform) -> ProbeCommand {
    let target: &str = request.target();
    match (request.mode, platform) {
        (ProbeMode::Reachability, Platform::Windows) => {
            ProbeCommand::new("ping", ["-n", PING_COUNT, target])
        }
        (ProbeMode::Reachability, Platform::Unix) => {
            ProbeCommand::new("ping", ["-c", PING_COUNT, target])
        }
        (ProbeMode::PathTrace, Platform::Windows) => {
            ProbeCommand::new("tracert", ["-h", MAX_HOPS, "-w", "1000", target])
        }
        (ProbeMode::PathTrace, Platform::Unix) => {
            ProbeCommand::new("traceroute", ["-m", MAX_HOPS, "-w", "1", target])
        }
    }
}

pub fn deadline_for(mode: ProbeMode, cfg: &Config) -> Duration {
    match mode {
        ProbeMode::Reachability => cfg.reachability_deadline,
        ProbeMode::PathTrace => cfg.trace_deadline,
    }
}
