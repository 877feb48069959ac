use std::sync::Arc;
use std::time::Duration;

use netlens_common::config::Config;
use netlens_common::error::DiagnosticError;
use netlens_common::geo::{GeoRecord, LOCATION_NOT_FOUND};
use netlens_common::network::target::{Platform, ProbeMode, ProbeRequest};
use netlens_common::probe::{ProbeFailure, RawProbeOutput};
use netlens_core::diagnostics::DiagnosticService;
use netlens_core::locator::IpApiLocator;

use crate::support::{
    ScriptedExecutor, TableLocator, UNIX_PING, UNIX_TRACE, scripted_service, spawn_fake_ip_api,
    unix_config,
};

fn request(target: &str, mode: ProbeMode) -> ProbeRequest {
    ProbeRequest::new(target, mode).unwrap()
}

#[tokio::test]
async fn ping_reports_rtt_values_and_loss() {
    let executor = ScriptedExecutor::new().on("ping", RawProbeOutput::success(UNIX_PING));
    let calls = executor.calls.clone();
    let service = scripted_service(executor);

    let report = service
        .reachability(&request("8.8.8.8", ProbeMode::Reachability))
        .await
        .unwrap();

    assert_eq!(report.rtt_values, vec![10.0, 20.0]);
    assert_eq!(report.summary.sent, 4);
    assert_eq!(report.summary.received, 2);
    assert_eq!(report.summary.lost, 2);
    assert_eq!(report.summary.loss_percent, 50.0);
    assert_eq!(report.summary.rtt.unwrap().avg, 15.0);
    assert!(
        report
            .formatted_output
            .contains("Packets: Sent = 4, Received = 2, Lost = 2 (50.0% loss)")
    );
    assert!(report.formatted_output.contains("Average = 15.0ms"));

    assert_eq!(report.resolved_target, "8.8.8.8");
    assert_eq!(report.geo_data.len(), 1);
    assert_eq!(report.geo_data[0].location_label, "Mountain View, United States");

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "ping -c 4 8.8.8.8");
    assert_eq!(calls[0].1, Duration::from_secs(30));
}

#[tokio::test]
async fn windows_ping_with_ceiling_replies() {
    let output = "Pinging 8.8.8.8 with 32 bytes of data:
Reply from 8.8.8.8: bytes=32 time<1ms TTL=117
Reply from 8.8.8.8: bytes=32 time=3ms TTL=117

Ping statistics for 8.8.8.8:
    Packets: Sent = 2, Received = 2, Lost = 0 (0% loss),
";
    let executor = ScriptedExecutor::new().on("ping", RawProbeOutput::success(output));
    let cfg = Config {
        platform: Platform::Windows,
        ..Config::default()
    };
    let service = DiagnosticService::new(Box::new(executor), Arc::new(TableLocator), cfg);

    let report = service
        .reachability(&request("8.8.8.8", ProbeMode::Reachability))
        .await
        .unwrap();

    assert_eq!(report.rtt_values, vec![1.0, 3.0]);
    assert_eq!(report.summary.sent, 2);
    assert_eq!(report.summary.lost, 0);
    assert!(report.formatted_output.contains("(0.0% loss)"));
}

#[tokio::test]
async fn ping_timeout_fails_the_request() {
    let executor = ScriptedExecutor::new().on("ping", RawProbeOutput::timed_out());
    let service = scripted_service(executor);

    let err = service
        .reachability(&request("192.0.2.1", ProbeMode::Reachability))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        DiagnosticError::ProbeTimeout {
            deadline: Duration::from_secs(30)
        }
    );
}

#[tokio::test]
async fn ping_without_address_locates_the_target() {
    let output = "ping: unknown host nowhere.invalid\n";
    let executor = ScriptedExecutor::new().on("ping", RawProbeOutput::success(output));
    let service = scripted_service(executor);

    let report = service
        .reachability(&request("nowhere.invalid", ProbeMode::Reachability))
        .await
        .unwrap();

    assert_eq!(report.resolved_target, "nowhere.invalid");
    assert!(report.rtt_values.is_empty());
    assert_eq!(report.geo_data[0].location_label, LOCATION_NOT_FOUND);
}

#[tokio::test]
async fn trace_locates_public_hops_in_order() {
    let executor = ScriptedExecutor::new().on("traceroute", RawProbeOutput::success(UNIX_TRACE));
    let calls = executor.calls.clone();
    let service = scripted_service(executor);

    let report = service
        .path_trace(&request("8.8.8.8", ProbeMode::PathTrace))
        .await
        .unwrap();

    let ips: Vec<&str> = report.geo_data.iter().map(|r| r.address.as_str()).collect();
    assert_eq!(ips, ["8.8.8.8", "2.2.2.2", "1.1.1.1"]);
    assert_eq!(report.output, UNIX_TRACE);

    assert_eq!(report.geo_data[1], GeoRecord::not_found("2.2.2.2"));
    assert_eq!(report.geo_data[2].location_label, "Unknown, Australia");
    assert_eq!(report.geo_data[0].provider_label, "Google LLC");

    let calls = calls.lock().unwrap();
    assert_eq!(calls[0].0, "traceroute -m 30 -w 1 8.8.8.8");
    assert_eq!(calls[0].1, Duration::from_secs(60));
}

#[tokio::test]
async fn trace_tolerates_unsuccessful_exit() {
    let executor = ScriptedExecutor::new().on(
        "traceroute",
        RawProbeOutput::failed(UNIX_TRACE, ProbeFailure::Exit(Some(1))),
    );
    let service = scripted_service(executor);

    let report = service
        .path_trace(&request("8.8.8.8", ProbeMode::PathTrace))
        .await
        .unwrap();

    assert_eq!(report.geo_data.len(), 3);
}

#[tokio::test]
async fn trace_fails_when_utility_is_missing() {
    let executor = ScriptedExecutor::new().on(
        "traceroute",
        RawProbeOutput::failed("", ProbeFailure::Spawn("No such file or directory".into())),
    );
    let service = scripted_service(executor);

    let err = service
        .path_trace(&request("8.8.8.8", ProbeMode::PathTrace))
        .await
        .unwrap_err();

    assert!(matches!(err, DiagnosticError::ProbeExecution { .. }));
    assert!(err.to_string().contains("traceroute -m 30 -w 1 8.8.8.8"));
}

#[tokio::test]
async fn pipeline_against_local_lookup_service() {
    let base = spawn_fake_ip_api().await;
    let cfg = unix_config();
    let locator = IpApiLocator::new(&format!("{base}/json"), Duration::from_secs(5)).unwrap();
    let executor = ScriptedExecutor::new().on("traceroute", RawProbeOutput::success(UNIX_TRACE));
    let service = DiagnosticService::new(Box::new(executor), Arc::new(locator), cfg);

    let result = service
        .run(&request("8.8.8.8", ProbeMode::PathTrace))
        .await
        .unwrap();

    let records = result.geo_data();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].location_label, "Mountain View, United States");
    assert!(records[1].is_sentinel());
    assert!(records[2].is_sentinel());
}
