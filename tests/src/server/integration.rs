use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use netlens_cli::server::{self, PRIVILEGE_HINT};
use netlens_common::probe::{ProbeExecutor, ProbeFailure, RawProbeOutput};
use reqwest::StatusCode;
use serde_json::{Value, json};

use crate::support::{
    ScriptedExecutor, SlowExecutor, UNIX_PING, UNIX_TRACE, scripted_service, spawn,
};

async fn spawn_server(executor: impl ProbeExecutor + 'static) -> String {
    let service = Arc::new(scripted_service(executor));
    spawn(server::create_router(service)).await
}

fn healthy_executor() -> ScriptedExecutor {
    ScriptedExecutor::new()
        .on("ping", RawProbeOutput::success(UNIX_PING))
        .on("traceroute", RawProbeOutput::success(UNIX_TRACE))
}

#[tokio::test]
async fn missing_target_is_rejected() {
    let base = spawn_server(healthy_executor()).await;

    for path in ["/ping", "/ping?target=", "/traceroute?target=%20%20"] {
        let response = reqwest::get(format!("{base}{path}")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{path}");
        let body: Value = response.json().await.unwrap();
        assert_eq!(body, json!({ "error": "Target is required" }));
    }
}

#[tokio::test]
async fn ping_returns_report_json() {
    let base = spawn_server(healthy_executor()).await;

    let response = reqwest::get(format!("{base}/ping?target=8.8.8.8")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "*"
    );

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["rttValues"], json!([10.0, 20.0]));
    assert!(body["output"].as_str().unwrap().contains("PING SUMMARY:"));
    assert_eq!(
        body["geoData"],
        json!([{
            "ip": "8.8.8.8",
            "location": "Mountain View, United States",
            "isp": "Google LLC"
        }])
    );
}

#[tokio::test]
async fn traceroute_returns_raw_output_and_hops() {
    let base = spawn_server(healthy_executor()).await;

    let body: Value = reqwest::get(format!("{base}/traceroute?target=8.8.8.8"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["output"], UNIX_TRACE);
    assert!(body.get("rttValues").is_none());
    let ips: Vec<&str> = body["geoData"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["ip"].as_str().unwrap())
        .collect();
    assert_eq!(ips, ["8.8.8.8", "2.2.2.2", "1.1.1.1"]);
    assert_eq!(body["geoData"][1]["isp"], "ISP not found");
}

#[tokio::test]
async fn traceroute_failure_carries_hint() {
    let executor = ScriptedExecutor::new().on(
        "traceroute",
        RawProbeOutput::failed("", ProbeFailure::Spawn("permission denied".into())),
    );
    let base = spawn_server(executor).await;

    let response = reqwest::get(format!("{base}/traceroute?target=8.8.8.8")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");

    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().starts_with("Traceroute failed: "));
    assert_eq!(body["details"], PRIVILEGE_HINT);
}

#[tokio::test]
async fn ping_timeout_is_server_error() {
    let executor = ScriptedExecutor::new().on("ping", RawProbeOutput::timed_out());
    let base = spawn_server(executor).await;

    let response = reqwest::get(format!("{base}/ping?target=192.0.2.1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Command timed out after 30s" }));
}

#[tokio::test]
async fn health_check() {
    let base = spawn_server(ScriptedExecutor::new()).await;
    let text = reqwest::get(format!("{base}/health")).await.unwrap().text().await.unwrap();
    assert_eq!(text, "ok");
}

#[tokio::test]
async fn diagnose_selects_mode_from_query() {
    let base = spawn_server(healthy_executor()).await;

    let ping: Value = reqwest::get(format!("{base}/diagnose?target=8.8.8.8"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(ping["rttValues"], json!([10.0, 20.0]));

    let trace: Value = reqwest::get(format!("{base}/diagnose?target=8.8.8.8&mode=traceroute"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(trace["output"], UNIX_TRACE);
    assert!(trace.get("rttValues").is_none());
}

#[tokio::test]
async fn diagnose_rejects_unknown_mode() {
    let base = spawn_server(healthy_executor()).await;

    let response = reqwest::get(format!("{base}/diagnose?target=8.8.8.8&mode=scan"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Invalid mode: scan" }));
}

#[tokio::test]
async fn disconnected_client_leaves_probe_running() {
    let finished = Arc::new(AtomicBool::new(false));
    let executor = SlowExecutor {
        delay: Duration::from_millis(300),
        output: RawProbeOutput::success(UNIX_PING),
        finished: finished.clone(),
    };
    let base = spawn_server(executor).await;

    let client = reqwest::Client::builder()
        .timeout(Duration::from_millis(50))
        .build()
        .unwrap();
    let sent = client.get(format!("{base}/ping?target=8.8.8.8")).send().await;
    assert!(sent.is_err());

    tokio::time::sleep(Duration::from_millis(800)).await;
    assert!(finished.load(Ordering::SeqCst));
}
