//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderValue, StatusCode, header},
    middleware,
    response::Response,
    routing::get,
};
use netlens_common::diagnostic::DiagnosticResult;
use netlens_common::error::DiagnosticError;
use netlens_common::network::target::{ProbeMode, ProbeRequest};
use netlens_core::diagnostics::DiagnosticService;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use super::PRIVILEGE_HINT;

/// Query parameters shared by the diagnostic endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct TargetQuery {
    /// Hostname or IPv4 address to probe.
    #[serde(default)]
    pub target: Option<String>,
    /// `ping` or `traceroute`. Only read by `/diagnose`, defaults to `ping`.
    #[serde(default)]
    pub mode: Option<String>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Creates the Axum router with all endpoints.
pub fn create_router(service: Arc<DiagnosticService>) -> Router {
    Router::new()
        .route("/diagnose", get(handle_diagnose))
        .route("/ping", get(handle_ping))
        .route("/traceroute", get(handle_traceroute))
        .route("/health", get(handle_health))
        .layer(middleware::map_response(allow_any_origin))
        .with_state(service)
}

async fn handle_health() -> &'static str {
    "ok"
}

/// Handles the GET /diagnose endpoint, which takes the mode as a parameter.
async fn handle_diagnose(
    State(service): State<Arc<DiagnosticService>>,
    Query(params): Query<TargetQuery>,
) -> Result<Json<DiagnosticResult>, ApiError> {
    let mode: ProbeMode = match params.mode.as_deref().map(str::trim) {
        Some(mode) if !mode.is_empty() => mode
            .parse::<ProbeMode>()
            .map_err(|e| error_response(ProbeMode::Reachability, &e))?,
        _ => ProbeMode::Reachability,
    };
    let request: ProbeRequest = request_for(params.target, mode)?;
    run_detached(service, request).await.map(Json)
}

/// Handles the GET /ping endpoint.
async fn handle_ping(
    State(service): State<Arc<DiagnosticService>>,
    Query(params): Query<TargetQuery>,
) -> Result<Json<DiagnosticResult>, ApiError> {
    let request: ProbeRequest = request_for(params.target, ProbeMode::Reachability)?;
    run_detached(service, request).await.map(Json)
}

/// Handles the GET /traceroute endpoint.
async fn handle_traceroute(
    State(service): State<Arc<DiagnosticService>>,
    Query(params): Query<TargetQuery>,
) -> Result<Json<DiagnosticResult>, ApiError> {
    let request: ProbeRequest = request_for(params.target, ProbeMode::PathTrace)?;
    run_detached(service, request).await.map(Json)
}

fn request_for(target: Option<String>, mode: ProbeMode) -> Result<ProbeRequest, ApiError> {
    let request: ProbeRequest = ProbeRequest::new(target.unwrap_or_default(), mode)
        .map_err(|e| error_response(mode, &e))?;
    info!("Received {mode} request for target: {}", request.target());
    Ok(request)
}

/// Runs the diagnostic on its own task. A dropped connection does not stop
/// the probe; it still completes or hits its deadline.
async fn run_detached(
    service: Arc<DiagnosticService>,
    request: ProbeRequest,
) -> Result<DiagnosticResult, ApiError> {
    let mode: ProbeMode = request.mode;
    let target: String = request.target().to_string();

    let handle = tokio::spawn(async move { service.run(&request).await });
    let outcome = handle.await.unwrap_or_else(|e| {
        Err(DiagnosticError::ProbeExecution {
            reason: format!("Diagnostic task failed: {e}"),
        })
    });

    outcome.map_err(|e| {
        error!("{mode} error for {target}: {e}");
        error_response(mode, &e)
    })
}

/// Maps a request failure to its status and JSON body.
pub(crate) fn error_response(mode: ProbeMode, err: &DiagnosticError) -> ApiError {
    if err.is_input_error() {
        let body = ErrorResponse {
            error: err.to_string(),
            details: None,
        };
        return (StatusCode::BAD_REQUEST, Json(body));
    }

    let body = match mode {
        ProbeMode::Reachability => ErrorResponse {
            error: err.to_string(),
            details: None,
        },
        ProbeMode::PathTrace => ErrorResponse {
            error: format!("Traceroute failed: {err}"),
            details: Some(PRIVILEGE_HINT.to_string()),
        },
    };
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body))
}

async fn allow_any_origin(mut response: Response) -> Response {
    response
        .headers_mut()
        .insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    response
}
