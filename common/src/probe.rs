//! Raw output of an external diagnostic utility and the port that produces it.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;

/// A command line, kept as program plus argv so no shell is involved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProbeCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ProbeCommand {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for ProbeCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Why a probe did not complete successfully.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProbeFailure {
    /// The process could not be started or awaited (not found, permission denied).
    Spawn(String),
    /// The process ran but exited unsuccessfully. `None` when killed by a signal.
    Exit(Option<i32>),
}

impl fmt::Display for ProbeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spawn(reason) => write!(f, "failed to run command: {reason}"),
            Self::Exit(Some(code)) => write!(f, "command exited with status {code}"),
            Self::Exit(None) => write!(f, "command terminated by signal"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProbeOutcome {
    Success,
    /// The deadline expired and the process was killed. No text is kept.
    TimedOut,
    Failed(ProbeFailure),
}

/// Text captured from one probe run. Consumed right away by the parsers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawProbeOutput {
    pub text: String,
    pub outcome: ProbeOutcome,
}

impl RawProbeOutput {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            outcome: ProbeOutcome::Success,
        }
    }

    pub fn timed_out() -> Self {
        Self {
            text: String::new(),
            outcome: ProbeOutcome::TimedOut,
        }
    }

    pub fn failed(text: impl Into<String>, failure: ProbeFailure) -> Self {
        Self {
            text: text.into(),
            outcome: ProbeOutcome::Failed(failure),
        }
    }
}

/// Runs an external diagnostic command with a bounded deadline.
///
/// Implementations make a single attempt and never retry. Expiry of the
/// deadline must terminate the process and yield [`ProbeOutcome::TimedOut`].
#[async_trait]
pub trait ProbeExecutor: Send + Sync {
    async fn execute(&self, command: &ProbeCommand, deadline: Duration) -> RawProbeOutput;
}
