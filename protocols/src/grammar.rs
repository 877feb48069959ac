//! Line recognizers for reachability output.
//!
//! Each platform family prints `ping` output differently. A [`LineGrammar`]
//! is selected once per request and classifies every line into a
//! [`ProbeLineKind`].

use std::sync::LazyLock;

use netlens_common::measurement::Sample;
use netlens_common::network::target::Platform;
use regex::{Captures, Regex};

static WINDOWS_SAMPLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"time([=<])(\d+)ms").unwrap());
static UNIX_SAMPLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"time([=<])(\d+(?:\.\d+)?) ?ms").unwrap());
static TRANSMITTED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+) packets transmitted, (\d+) (?:packets )?received").unwrap()
});
static WINDOWS_PACKETS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Packets: Sent = (\d+), Received = (\d+)").unwrap());

#[derive(Clone, Debug, PartialEq)]
pub enum ProbeLineKind {
    /// Start-of-run or statistics banner.
    Header,
    /// A reply line. Carries the sample when a round-trip time was printed.
    Reply(Option<Sample>),
    /// Transmitted/received totals. Authoritative for the final counts.
    Summary { sent: u32, received: u32 },
    /// Anything else, passed through verbatim.
    Other,
}

pub trait LineGrammar: Send + Sync {
    fn classify(&self, line: &str) -> ProbeLineKind;
}

/// `ping -n` output: `Pinging ...`, `Reply from ...: time=12ms`, `Packets: Sent = 4, ...`.
pub struct WindowsGrammar;

/// `ping -c` output: `PING ...`, `64 bytes from ...: time=11.2 ms`, `4 packets transmitted, ...`.
pub struct UnixGrammar;

impl LineGrammar for WindowsGrammar {
    fn classify(&self, line: &str) -> ProbeLineKind {
        if line.contains("Pinging") || line.contains("Ping statistics") {
            return ProbeLineKind::Header;
        }
        if line.contains("Reply from") {
            return ProbeLineKind::Reply(sample_from(&WINDOWS_SAMPLE, line));
        }
        summary_from(&TRANSMITTED, line)
            .or_else(|| summary_from(&WINDOWS_PACKETS, line))
            .unwrap_or(ProbeLineKind::Other)
    }
}

impl LineGrammar for UnixGrammar {
    fn classify(&self, line: &str) -> ProbeLineKind {
        if line.trim_start().starts_with("PING ") || line.contains("ping statistics") {
            return ProbeLineKind::Header;
        }
        if line.contains("bytes from") || line.contains("Reply from") {
            return ProbeLineKind::Reply(sample_from(&UNIX_SAMPLE, line));
        }
        summary_from(&TRANSMITTED, line).unwrap_or(ProbeLineKind::Other)
    }
}

pub fn grammar_for(platform: Platform) -> &'static dyn LineGrammar {
    match platform {
        Platform::Windows => &WindowsGrammar,
        Platform::Unix => &UnixGrammar,
    }
}

fn sample_from(re: &Regex, line: &str) -> Option<Sample> {
    let caps: Captures = re.captures(line)?;
    let millis: f64 = caps[2].parse().ok()?;
    match &caps[1] {
        "<" => Some(Sample::ceiling(millis)),
        _ => Some(Sample::exact(millis)),
    }
}

fn summary_from(re: &Regex, line: &str) -> Option<ProbeLineKind> {
    let caps: Captures = re.captures(line)?;
    Some(ProbeLineKind::Summary {
        sent: caps[1].parse().ok()?,
        received: caps[2].parse().ok()?,
    })
}
