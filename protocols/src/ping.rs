//! Reachability report parsing.
//!
//! [`parse`] walks the captured text once, classifying every non-blank line
//! with the platform grammar, and produces both the formatted report and the
//! measurement summary. [`rtt_values`] and [`resolved_address`] are looser,
//! platform-agnostic scans used for chart data and geolocation.

use std::sync::LazyLock;

use netlens_common::measurement::{MeasurementSummary, Sample};
use netlens_common::network::address::NetworkAddress;
use regex::Regex;
use tracing::debug;

use crate::grammar::{LineGrammar, ProbeLineKind};

pub const REPORT_WIDTH: usize = 80;

static LOOSE_RTT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)time[=<](\d+\.?\d*)").unwrap());
static ANY_ADDRESS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[?(\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3})\]?").unwrap());

#[derive(Clone, Debug, PartialEq)]
pub struct PingReport {
    pub formatted: String,
    pub summary: MeasurementSummary,
    pub samples: Vec<Sample>,
}

#[derive(Default)]
struct Tally {
    sent: u32,
    received: u32,
    lost: u32,
    samples: Vec<Sample>,
}

impl Tally {
    fn record(&mut self, kind: &ProbeLineKind) {
        match kind {
            ProbeLineKind::Reply(Some(sample)) => {
                self.samples.push(*sample);
                self.received += 1;
            }
            ProbeLineKind::Summary { sent, received } => {
                self.sent = *sent;
                self.received = *received;
                self.lost = sent.saturating_sub(*received);
            }
            ProbeLineKind::Reply(None) | ProbeLineKind::Header | ProbeLineKind::Other => {}
        }
    }
}

/// Parses reachability output into a formatted report and its statistics.
///
/// Deterministic: the same text and grammar always yield the same report.
pub fn parse(text: &str, grammar: &dyn LineGrammar) -> PingReport {
    let mut formatted: String = String::new();
    let mut tally: Tally = Tally::default();

    for line in text.lines() {
        let line: &str = line.trim();
        if line.is_empty() {
            continue;
        }

        let kind: ProbeLineKind = grammar.classify(line);
        match kind {
            ProbeLineKind::Header => push_banner(&mut formatted, line),
            _ => push_line(&mut formatted, line),
        }
        tally.record(&kind);
    }

    let summary =
        MeasurementSummary::new(tally.sent, tally.received, tally.lost, &tally.samples);
    debug!(
        sent = summary.sent,
        received = summary.received,
        samples = tally.samples.len(),
        "parsed reachability output"
    );

    push_summary(&mut formatted, &summary);

    PingReport {
        formatted,
        summary,
        samples: tally.samples,
    }
}

/// Every round-trip time in encounter order, at most one per line.
///
/// Matches both `time=` and `time<`; a ceiling contributes its bound.
pub fn rtt_values(text: &str) -> Vec<f64> {
    text.lines()
        .filter_map(|line| LOOSE_RTT.captures(line))
        .filter_map(|caps| caps[1].parse::<f64>().ok())
        .collect()
}

/// The first dotted-quad in the text, bracketed or bare.
pub fn resolved_address(text: &str) -> Option<NetworkAddress> {
    ANY_ADDRESS
        .captures(text)
        .and_then(|caps| NetworkAddress::parse(&caps[1]))
}

fn rule(ch: char) -> String {
    ch.to_string().repeat(REPORT_WIDTH)
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

fn push_banner(out: &mut String, line: &str) {
    let dashes: String = rule('-');
    out.push_str(&format!("{dashes}\n{line}\n{dashes}\n"));
}

fn push_summary(out: &mut String, summary: &MeasurementSummary) {
    let thick: String = rule('=');
    let thin: String = rule('-');

    out.push_str(&format!("\n{thick}\nPING SUMMARY:\n{thin}\n"));
    push_line(
        out,
        &format!(
            "Packets: Sent = {}, Received = {}, Lost = {} ({:.1}% loss)",
            summary.sent, summary.received, summary.lost, summary.loss_percent
        ),
    );
    if let Some(rtt) = &summary.rtt {
        push_line(
            out,
            &format!(
                "Round Trip Times: Min = {:.1}ms, Max = {:.1}ms, Average = {:.1}ms",
                rtt.min, rtt.max, rtt.avg
            ),
        );
    }
    push_line(out, &thick);
}
