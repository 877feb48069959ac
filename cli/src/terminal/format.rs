use crate::terminal::colors;
use colored::*;
use netlens_common::geo::GeoRecord;
use netlens_common::measurement::MeasurementSummary;

pub fn geo_to_key_value_pair(record: &GeoRecord) -> Vec<(String, ColoredString)> {
    let (location, provider) = if record.is_sentinel() {
        (
            record.location_label.color(colors::SENTINEL),
            record.provider_label.color(colors::SENTINEL),
        )
    } else {
        (
            record.location_label.color(colors::LOCATION),
            record.provider_label.color(colors::PROVIDER),
        )
    };

    vec![
        (String::from("IPv4"), record.address.color(colors::IPV4_ADDR)),
        (String::from("Location"), location),
        (String::from("ISP"), provider),
    ]
}

pub fn summary_to_key_value_pair(summary: &MeasurementSummary) -> Vec<(String, ColoredString)> {
    let loss: String = format!("{:.1}%", summary.loss_percent);
    let loss: ColoredString = if summary.lost == 0 {
        loss.color(colors::PRIMARY)
    } else {
        loss.color(colors::SENTINEL)
    };

    let mut pairs: Vec<(String, ColoredString)> = vec![
        (String::from("Sent"), summary.sent.to_string().color(colors::TEXT_DEFAULT)),
        (String::from("Received"), summary.received.to_string().color(colors::TEXT_DEFAULT)),
        (String::from("Loss"), loss),
    ];

    if let Some(rtt) = &summary.rtt {
        let rtt_line: String = format!("{:.1} / {:.1} / {:.1} ms", rtt.min, rtt.avg, rtt.max);
        pairs.push((String::from("RTT min/avg/max"), rtt_line.color(colors::ACCENT)));
    }

    pairs
}
