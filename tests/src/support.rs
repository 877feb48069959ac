//! Scripted adapters shared by the integration tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{Json, Router, extract::Path, routing::get};
use netlens_common::config::Config;
use netlens_common::geo::{GeoDetails, GeoLocator, LookupError};
use netlens_common::network::target::Platform;
use netlens_common::probe::{ProbeCommand, ProbeExecutor, RawProbeOutput};
use netlens_core::diagnostics::DiagnosticService;
use serde_json::{Value, json};

pub const UNIX_PING: &str = "PING 8.8.8.8 (8.8.8.8) 56(84) bytes of data.
64 bytes from 8.8.8.8: icmp_seq=1 ttl=117 time=10 ms
64 bytes from 8.8.8.8: icmp_seq=2 ttl=117 time=20 ms

--- 8.8.8.8 ping statistics ---
4 packets transmitted, 2 received, 50% packet loss, time 3004ms
";

pub const UNIX_TRACE: &str = "traceroute to 8.8.8.8 (8.8.8.8), 30 hops max, 60 byte packets
 1  192.168.1.1 (192.168.1.1)  0.512 ms  0.488 ms  0.470 ms
 2  10.10.0.1 (10.10.0.1)  5.101 ms  5.002 ms  4.987 ms
 3  2.2.2.2 (2.2.2.2)  9.844 ms  9.700 ms  9.650 ms
 4  1.1.1.1 (1.1.1.1)  11.204 ms  11.180 ms  11.002 ms
 5  * * *
 6  8.8.8.8 (8.8.8.8)  12.410 ms  12.398 ms  12.377 ms
";

/// `(command line, deadline)` of every executed probe.
pub type CallLog = Arc<Mutex<Vec<(String, Duration)>>>;

/// Answers each program name with a fixed output.
pub struct ScriptedExecutor {
    outputs: HashMap<String, RawProbeOutput>,
    pub calls: CallLog,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self {
            outputs: HashMap::new(),
            calls: CallLog::default(),
        }
    }

    pub fn on(mut self, program: &str, output: RawProbeOutput) -> Self {
        self.outputs.insert(program.to_string(), output);
        self
    }
}

#[async_trait]
impl ProbeExecutor for ScriptedExecutor {
    async fn execute(&self, command: &ProbeCommand, deadline: Duration) -> RawProbeOutput {
        self.calls.lock().unwrap().push((command.to_string(), deadline));
        self.outputs
            .get(&command.program)
            .cloned()
            .unwrap_or_else(RawProbeOutput::timed_out)
    }
}

/// Takes `delay` to answer and raises `finished` once it has.
pub struct SlowExecutor {
    pub delay: Duration,
    pub output: RawProbeOutput,
    pub finished: Arc<AtomicBool>,
}

#[async_trait]
impl ProbeExecutor for SlowExecutor {
    async fn execute(&self, _command: &ProbeCommand, _deadline: Duration) -> RawProbeOutput {
        tokio::time::sleep(self.delay).await;
        self.finished.store(true, Ordering::SeqCst);
        self.output.clone()
    }
}

/// In-memory lookup service. `2.2.2.2` always errors.
pub struct TableLocator;

#[async_trait]
impl GeoLocator for TableLocator {
    async fn locate(&self, query: &str) -> Result<GeoDetails, LookupError> {
        match query {
            "8.8.8.8" => Ok(GeoDetails {
                city: Some("Mountain View".into()),
                country: Some("United States".into()),
                isp: Some("Google LLC".into()),
            }),
            "1.1.1.1" => Ok(GeoDetails {
                city: None,
                country: Some("Australia".into()),
                isp: Some("Cloudflare, Inc".into()),
            }),
            "2.2.2.2" => Err(LookupError::Transport("connection reset".into())),
            other => Err(LookupError::Rejected(format!("no data for {other}"))),
        }
    }
}

pub fn unix_config() -> Config {
    Config {
        platform: Platform::Unix,
        ..Config::default()
    }
}

pub fn scripted_service(executor: impl ProbeExecutor + 'static) -> DiagnosticService {
    DiagnosticService::new(Box::new(executor), Arc::new(TableLocator), unix_config())
}

async fn fake_ip_api(Path(ip): Path<String>) -> Json<Value> {
    match ip.as_str() {
        "8.8.8.8" => Json(json!({
            "status": "success",
            "country": "United States",
            "city": "Mountain View",
            "isp": "Google LLC",
            "query": "8.8.8.8"
        })),
        _ => Json(json!({ "status": "fail", "message": "private range", "query": ip })),
    }
}

/// Serves `router` on an ephemeral loopback port and returns its base URL.
pub async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// A local stand-in for ip-api.com; lookups go to `{base}/json/{ip}`.
pub async fn spawn_fake_ip_api() -> String {
    spawn(Router::new().route("/json/{ip}", get(fake_ip_api))).await
}
