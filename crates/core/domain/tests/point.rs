use chrono::{TimeZone, Utc};
use domain::{OutputPoint, RawMessage};
use std::collections::BTreeMap;

fn sample_point(tags: &[(&str, &str)], field: &str, value: f64) -> OutputPoint {
    let tags = tags
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect::<BTreeMap<_, _>>();
    OutputPoint::new(
        "meas",
        tags,
        field,
        value,
        Utc.with_ymd_and_hms(2010, 6, 6, 18, 1, 16).unwrap(),
    )
}

#[test]
fn point_exposes_single_field() {
    let point = sample_point(&[("unit", "V"), ("ow", "10e2073a0108006")], "voltage", 120.1);

    assert_eq!(point.measurement(), "meas");
    assert_eq!(point.tags().len(), 2);
    assert_eq!(point.tags().get("ow").map(String::as_str), Some("10e2073a0108006"));
    let fields = point.fields();
    assert_eq!(fields.len(), 1);
    assert_eq!(fields.get("voltage"), Some(&120.1));
    assert_eq!(point.time().timestamp(), 1_276_020_076);
}

#[test]
fn line_protocol_sorts_tags_and_uses_nanoseconds() {
    let point = sample_point(&[("unit", "V"), ("ow", "10e2073a0108006")], "voltage", 120.1);

    assert_eq!(
        point.to_line_protocol().as_deref(),
        Some("meas,ow=10e2073a0108006,unit=V voltage=120.1 1276020076000000000")
    );
}

#[test]
fn line_protocol_skips_empty_tag_values() {
    let point = sample_point(&[("unit", ""), ("ow", "abc")], "current", 1.7);

    assert_eq!(
        point.to_line_protocol().as_deref(),
        Some("meas,ow=abc current=1.7 1276020076000000000")
    );
}

#[test]
fn line_protocol_escapes_tag_values() {
    let point = sample_point(&[("site", "north hall,2")], "temp", 21.5);

    assert_eq!(
        point.to_line_protocol().as_deref(),
        Some("meas,site=north\\ hall\\,2 temp=21.5 1276020076000000000")
    );
}

#[test]
fn line_protocol_refuses_non_finite_values() {
    assert!(sample_point(&[], "x", f64::INFINITY).to_line_protocol().is_none());
    assert!(sample_point(&[], "x", f64::NEG_INFINITY).to_line_protocol().is_none());
    assert!(sample_point(&[], "x", f64::NAN).to_line_protocol().is_none());
}

#[test]
fn raw_message_keeps_explicit_received_at() {
    let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let message = RawMessage::new("a/b", b"[]".to_vec()).with_received_at(at);

    assert_eq!(message.topic, "a/b");
    assert_eq!(message.payload, b"[]");
    assert_eq!(message.received_at, at);
}
