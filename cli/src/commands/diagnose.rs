use std::time::{Duration, Instant};

use colored::*;
use netlens_common::config::Config;
use netlens_common::diagnostic::DiagnosticResult;
use netlens_common::geo::GeoRecord;
use netlens_common::network::target::{ProbeMode, ProbeRequest};
use netlens_core::diagnostics::DiagnosticService;

use crate::commands::serve::build_service;
use crate::nprint;
use crate::terminal::{colors, format, print, spinner};

pub async fn run(target: &str, mode: ProbeMode, cfg: Config) -> anyhow::Result<()> {
    let service: DiagnosticService = build_service(cfg)?;
    let request: ProbeRequest = ProbeRequest::new(target, mode)?;

    let start_time: Instant = Instant::now();
    spinner::get_spinner().set_message(spinner_message(&request));
    let result = service.run(&request).await;
    spinner::get_spinner().finish_and_clear();

    let result: DiagnosticResult = result?;
    print::block(result.output());

    let what: String = match &result {
        DiagnosticResult::Reachability(report) => {
            print::header("statistics");
            print::as_tree_one_level(format::summary_to_key_value_pair(&report.summary));
            format!("{} replies received", report.summary.received)
        }
        DiagnosticResult::PathTrace(report) => {
            format!("{} public hops located", report.geo_data.len())
        }
    };

    print_geo_records(result.geo_data());
    print_summary(&what, start_time.elapsed());
    Ok(())
}

fn spinner_message(request: &ProbeRequest) -> String {
    match request.mode {
        ProbeMode::Reachability => format!("Pinging {}...", request.target()),
        ProbeMode::PathTrace => format!("Tracing route to {}...", request.target()),
    }
}

fn print_geo_records(records: &[GeoRecord]) {
    if records.is_empty() {
        print::header("zero public hops");
        print::no_results();
        return;
    }

    print::header("geolocation");
    for (idx, record) in records.iter().enumerate() {
        print::tree_head(idx, &record.address);
        print::as_tree_one_level(format::geo_to_key_value_pair(record));
        if idx + 1 != records.len() {
            nprint!();
        }
    }
}

fn print_summary(what: &str, total_time: Duration) {
    let what: ColoredString = what.bold().green();
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let output: ColoredString =
        format!("Diagnostic Complete: {what} in {total_time}").color(colors::TEXT_DEFAULT);

    print::fat_separator();
    print::centerln(&output.to_string());
    print::end_of_program();
}
