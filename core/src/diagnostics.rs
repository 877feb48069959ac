//! # Diagnostic Service
//!
//! Implements the two diagnostic use cases, reachability probing and path
//! tracing.
//!
//! The service runs the probe through the [`ProbeExecutor`] port, hands the
//! captured text to the grammars in `netlens-protocols`, enriches the
//! discovered addresses through the [`GeoEnricher`] and assembles the
//! [`DiagnosticResult`].

use std::sync::Arc;
use std::time::Duration;

use netlens_common::config::Config;
use netlens_common::diagnostic::{DiagnosticResult, PathTraceReport, ReachabilityReport};
use netlens_common::error::DiagnosticError;
use netlens_common::geo::{GeoLocator, GeoRecord};
use netlens_common::network::address::NetworkAddress;
use netlens_common::network::target::{ProbeMode, ProbeRequest};
use netlens_common::probe::{
    ProbeCommand, ProbeExecutor, ProbeFailure, ProbeOutcome, RawProbeOutput,
};
use netlens_protocols::{address, grammar, ping};
use tracing::{info, warn};

use crate::command;
use crate::enricher::GeoEnricher;

/// Application Service for network diagnostics.
///
/// Orchestrates a request by:
/// 1. delegating the probe run to the [`ProbeExecutor`] trait.
/// 2. interpreting the output for the requested mode.
/// 3. enriching addresses through the [`GeoLocator`] trait.
pub struct DiagnosticService {
    executor: Box<dyn ProbeExecutor>,
    enricher: GeoEnricher,
    cfg: Config,
}

impl DiagnosticService {
    pub fn new(
        executor: Box<dyn ProbeExecutor>,
        locator: Arc<dyn GeoLocator>,
        cfg: Config,
    ) -> Self {
        let enricher = GeoEnricher::new(locator, cfg.geo_timeout);
        Self {
            executor,
            enricher,
            cfg,
        }
    }

    /// Runs the diagnostic selected by `request.mode`.
    pub async fn run(&self, request: &ProbeRequest) -> Result<DiagnosticResult, DiagnosticError> {
        match request.mode {
            ProbeMode::Reachability => self
                .reachability(request)
                .await
                .map(DiagnosticResult::Reachability),
            ProbeMode::PathTrace => self
                .path_trace(request)
                .await
                .map(DiagnosticResult::PathTrace),
        }
    }

    /// Pings the target, formats the report and locates the resolved address.
    ///
    /// Timeouts and unsuccessful exits are both request failures here.
    pub async fn reachability(
        &self,
        request: &ProbeRequest,
    ) -> Result<ReachabilityReport, DiagnosticError> {
        let (command, deadline, raw) = self.probe(request).await;
        let text: String = match raw.outcome {
            ProbeOutcome::Success => raw.text,
            ProbeOutcome::TimedOut => return Err(DiagnosticError::ProbeTimeout { deadline }),
            ProbeOutcome::Failed(failure) => return Err(execution_error(&command, &failure)),
        };

        let report = ping::parse(&text, grammar::grammar_for(self.cfg.platform));
        let rtt_values: Vec<f64> = ping::rtt_values(&text);
        let resolved_target: String = ping::resolved_address(&text)
            .map(String::from)
            .unwrap_or_else(|| request.target().to_string());

        let geo_data: Vec<GeoRecord> = vec![self.enricher.enrich(&resolved_target).await];

        Ok(ReachabilityReport {
            formatted_output: report.formatted,
            rtt_values,
            summary: report.summary,
            resolved_target,
            geo_data,
        })
    }

    /// Traces the path to the target and locates every public hop.
    ///
    /// An unsuccessful exit is tolerated and its captured text used; a
    /// timeout or a failure to run the utility is not.
    pub async fn path_trace(
        &self,
        request: &ProbeRequest,
    ) -> Result<PathTraceReport, DiagnosticError> {
        let (command, deadline, raw) = self.probe(request).await;
        let output: String = match raw.outcome {
            ProbeOutcome::Success => raw.text,
            ProbeOutcome::TimedOut => return Err(DiagnosticError::ProbeTimeout { deadline }),
            ProbeOutcome::Failed(failure @ ProbeFailure::Spawn(_)) => {
                return Err(execution_error(&command, &failure));
            }
            ProbeOutcome::Failed(failure @ ProbeFailure::Exit(_)) => {
                warn!("Continuing with output of '{command}' despite: {failure}");
                raw.text
            }
        };

        let hops: Vec<NetworkAddress> = address::extract_addresses(&output);
        info!(
            "Found {} public addresses on the path to {}",
            hops.len(),
            request.target()
        );

        let geo_data: Vec<GeoRecord> = self.enricher.enrich_all(hops.clone()).await;

        Ok(PathTraceReport {
            output,
            hops,
            geo_data,
        })
    }

    async fn probe(&self, request: &ProbeRequest) -> (ProbeCommand, Duration, RawProbeOutput) {
        let command: ProbeCommand = command::probe_command(request, self.cfg.platform);
        let deadline: Duration = command::deadline_for(request.mode, &self.cfg);
        info!("Executing {} command: {command}", request.mode);
        let raw: RawProbeOutput = self.executor.execute(&command, deadline).await;
        (command, deadline, raw)
    }
}

fn execution_error(command: &ProbeCommand, failure: &ProbeFailure) -> DiagnosticError {
    DiagnosticError::ProbeExecution {
        reason: format!("Command failed: {command} ({failure})"),
    }
}
