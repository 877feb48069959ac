//! # Probe Target Model
//!
//! Defines the inputs of a diagnostic run.
//!
//! A request pairs a target, which can be:
//! * A hostname (e.g., `example.com`).
//! * A literal address (e.g., `8.8.8.8`).
//!
//! with a [`ProbeMode`]. The target is not resolved here; the external
//! utility performs its own name resolution.

use std::fmt;
use std::str::FromStr;

use crate::error::DiagnosticError;

/// Which diagnostic to run against a target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProbeMode {
    /// Send-and-await-reply probing (`ping`).
    Reachability,
    /// Enumerate the intermediate hops towards the target.
    PathTrace,
}

impl FromStr for ProbeMode {
    type Err = DiagnosticError;

    /// Parses a mode name.
    ///
    /// Supported formats (case-insensitive):
    /// * **Reachability**: "ping", "reachability".
    /// * **Path trace**: "trace", "traceroute", "tracert", "path-trace".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ping" | "reachability" => Ok(Self::Reachability),
            "trace" | "traceroute" | "tracert" | "path-trace" => Ok(Self::PathTrace),
            _ => Err(DiagnosticError::InvalidMode(s.trim().to_string())),
        }
    }
}

impl fmt::Display for ProbeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reachability => write!(f, "ping"),
            Self::PathTrace => write!(f, "traceroute"),
        }
    }
}

/// Operating system family whose diagnostic utilities are invoked and
/// whose output grammar is recognised.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Platform {
    Windows,
    Unix,
}

impl Platform {
    /// The family of the host this binary was built for.
    pub fn host() -> Self {
        if cfg!(windows) { Self::Windows } else { Self::Unix }
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "windows" | "win" | "win32" => Ok(Self::Windows),
            "unix" | "linux" | "macos" | "darwin" => Ok(Self::Unix),
            _ => Err(format!("invalid platform: {s}")),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Windows => write!(f, "Windows"),
            Self::Unix => write!(f, "Unix-like"),
        }
    }
}

/// A single diagnostic request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProbeRequest {
    target: String,
    pub mode: ProbeMode,
}

impl ProbeRequest {
    /// Builds a request, rejecting a missing or blank target before any
    /// probe is attempted.
    pub fn new(target: impl Into<String>, mode: ProbeMode) -> Result<Self, DiagnosticError> {
        let target: String = target.into().trim().to_string();
        if target.is_empty() {
            return Err(DiagnosticError::MissingTarget);
        }
        Ok(Self { target, mode })
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}
