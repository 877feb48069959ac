//! Request-level failures of the diagnostic pipeline.
//!
//! Lookup failures are deliberately absent: they are absorbed into sentinel
//! [`crate::geo::GeoRecord`]s and never terminate a request.

use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticError {
    #[error("Target is required")]
    MissingTarget,

    #[error("Invalid mode: {0}")]
    InvalidMode(String),

    #[error("Command timed out after {}s", deadline.as_secs())]
    ProbeTimeout { deadline: Duration },

    #[error("{reason}")]
    ProbeExecution { reason: String },
}

impl DiagnosticError {
    /// True for caller mistakes that were rejected before any probe ran.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::MissingTarget | Self::InvalidMode(_))
    }
}
