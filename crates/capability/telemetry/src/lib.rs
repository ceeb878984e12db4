//! 日志初始化、报文 ID 与转换指标。

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::{EnvFilter, fmt};

/// 转换指标快照。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub messages_received: u64,
    pub messages_converted: u64,
    pub messages_rejected: u64,
    pub points_emitted: u64,
    pub records_skipped: u64,
}

/// 转换指标（进程级计数器）。
pub struct ConversionMetrics {
    messages_received: AtomicU64,
    messages_converted: AtomicU64,
    messages_rejected: AtomicU64,
    points_emitted: AtomicU64,
    records_skipped: AtomicU64,
}

impl ConversionMetrics {
    pub fn new() -> Self {
        Self {
            messages_received: AtomicU64::new(0),
            messages_converted: AtomicU64::new(0),
            messages_rejected: AtomicU64::new(0),
            points_emitted: AtomicU64::new(0),
            records_skipped: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            messages_received: self.messages_received.load(Ordering::Relaxed),
            messages_converted: self.messages_converted.load(Ordering::Relaxed),
            messages_rejected: self.messages_rejected.load(Ordering::Relaxed),
            points_emitted: self.points_emitted.load(Ordering::Relaxed),
            records_skipped: self.records_skipped.load(Ordering::Relaxed),
        }
    }
}

impl Default for ConversionMetrics {
    fn default() -> Self {
        Self::new()
    }
}

static METRICS: OnceLock<ConversionMetrics> = OnceLock::new();

/// 获取全局指标实例。
pub fn metrics() -> &'static ConversionMetrics {
    METRICS.get_or_init(ConversionMetrics::new)
}

/// 初始化 tracing（默认 info）。
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}

/// 生成新的 message_id，用于关联同一报文的日志。
pub fn new_message_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// 记录收到的报文数。
pub fn record_message_received() {
    metrics().messages_received.fetch_add(1, Ordering::Relaxed);
}

/// 记录完整转换的报文数。
pub fn record_message_converted() {
    metrics().messages_converted.fetch_add(1, Ordering::Relaxed);
}

/// 记录被中止的报文数（topic/解码/规整/设备子类型错误）。
pub fn record_message_rejected() {
    metrics().messages_rejected.fetch_add(1, Ordering::Relaxed);
}

/// 记录输出点数。
pub fn record_points_emitted(count: u64) {
    metrics().points_emitted.fetch_add(count, Ordering::Relaxed);
}

/// 记录被跳过的记录数。
pub fn record_record_skipped() {
    metrics().records_skipped.fetch_add(1, Ordering::Relaxed);
}
