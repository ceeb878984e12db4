use m2i_telemetry::{
    ConversionMetrics, init_tracing, metrics, new_message_id, record_message_converted,
    record_message_received, record_message_rejected, record_points_emitted,
    record_record_skipped,
};

#[test]
fn message_ids_are_unique() {
    let first = new_message_id();
    let second = new_message_id();
    assert!(!first.is_empty());
    assert_ne!(first, second);
}

#[test]
fn init_tracing_is_repeatable() {
    init_tracing();
    init_tracing();
}

#[test]
fn fresh_metrics_start_at_zero() {
    let metrics = ConversionMetrics::new();
    assert_eq!(metrics.snapshot().points_emitted, 0);
}

#[test]
fn global_counters_increase() {
    // 全局计数器被其他测试共享，只断言增量下界。
    let before = metrics().snapshot();
    record_message_received();
    record_message_converted();
    record_message_rejected();
    record_points_emitted(2);
    record_record_skipped();
    let after = metrics().snapshot();

    assert!(after.messages_received >= before.messages_received + 1);
    assert!(after.messages_converted >= before.messages_converted + 1);
    assert!(after.messages_rejected >= before.messages_rejected + 1);
    assert!(after.points_emitted >= before.points_emitted + 2);
    assert!(after.records_skipped >= before.records_skipped + 1);
}
