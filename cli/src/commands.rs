pub mod diagnose;
pub mod serve;

use std::net::SocketAddr;
use std::time::Duration;

use clap::{ArgAction, Parser, Subcommand};
use netlens_common::config::{Config, DEFAULT_GEO_ENDPOINT};
use netlens_common::network::target::Platform;

#[derive(Parser)]
#[command(name = "netlens")]
#[command(about = "Ping and traceroute with geolocated results.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Deadline for a reachability probe, in seconds
    #[arg(long, value_name = "SECS", default_value_t = 30, global = true)]
    pub ping_timeout: u64,

    /// Deadline for a path trace, in seconds
    #[arg(long, value_name = "SECS", default_value_t = 60, global = true)]
    pub trace_timeout: u64,

    /// Base URL of the geolocation service
    #[arg(long, value_name = "URL", default_value = DEFAULT_GEO_ENDPOINT, global = true)]
    pub geo_endpoint: String,

    /// Deadline for a single geolocation lookup, in seconds
    #[arg(long, value_name = "SECS", default_value_t = 10, global = true)]
    pub geo_timeout: u64,

    /// Command family and output grammar (windows, unix). Defaults to the host
    #[arg(long, global = true)]
    pub platform: Option<Platform>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the diagnostics over HTTP
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "0.0.0.0:5000")]
        addr: SocketAddr,
    },
    /// Probe reachability of a host
    #[command(alias = "p")]
    Ping { target: String },
    /// Trace the network path to a host
    #[command(alias = "t", alias = "traceroute")]
    Trace { target: String },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn config(&self) -> Config {
        Config {
            reachability_deadline: Duration::from_secs(self.ping_timeout),
            trace_deadline: Duration::from_secs(self.trace_timeout),
            geo_endpoint: self.geo_endpoint.clone(),
            geo_timeout: Duration::from_secs(self.geo_timeout),
            platform: self.platform.unwrap_or_else(Platform::host),
        }
    }
}
