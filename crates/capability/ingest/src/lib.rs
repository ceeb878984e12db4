//! 接入适配
//!
//! 外部分发器把收到的报文交给 `RawMessageHandler`；`ConverterHandler` 按配置选择转换器，
//! 同步完成转换后把输出点整批交给 `PointWriter`。

use async_trait::async_trait;
use domain::{OutputPoint, RawMessage};
use m2i_config::ConverterConfig;
use m2i_convert::{Handler, handler_for};
use m2i_telemetry::{
    new_message_id, record_message_converted, record_message_received, record_message_rejected,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// 接入错误。
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("config error: {0}")]
    Config(String),
    #[error("conversion error: {0}")]
    Conversion(String),
    #[error("writer error: {0}")]
    Writer(String),
}

/// 写入错误。
#[derive(Debug, thiserror::Error)]
pub enum WriterError {
    #[error("writer error: {0}")]
    Writer(String),
    #[error("encode error: {0}")]
    Encode(String),
}

/// RawMessage 处理器。
#[async_trait]
pub trait RawMessageHandler: Send + Sync {
    async fn handle(&self, message: RawMessage) -> Result<(), IngestError>;
}

/// 输出点写入器抽象。
#[async_trait]
pub trait PointWriter: Send + Sync {
    async fn write(&self, point: OutputPoint) -> Result<(), WriterError>;

    /// 返回写入的点数。
    async fn write_batch(&self, points: &[OutputPoint]) -> Result<usize, WriterError> {
        for point in points {
            self.write(point.clone()).await?;
        }
        Ok(points.len())
    }
}

/// 空写入器（用于接线与测试）。
#[derive(Debug, Default)]
pub struct NoopWriter;

#[async_trait]
impl PointWriter for NoopWriter {
    async fn write(&self, _point: OutputPoint) -> Result<(), WriterError> {
        Ok(())
    }
}

/// 把输出点渲染为 line protocol 并缓存在内存中，由调用方取走后发送。
#[derive(Debug, Default)]
pub struct LineProtocolBuffer {
    lines: Mutex<Vec<String>>,
}

impl LineProtocolBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 取走当前缓存的全部行。
    pub async fn take(&self) -> Vec<String> {
        let mut lines = self.lines.lock().await;
        std::mem::take(&mut *lines)
    }
}

#[async_trait]
impl PointWriter for LineProtocolBuffer {
    async fn write(&self, point: OutputPoint) -> Result<(), WriterError> {
        self.write_batch(std::slice::from_ref(&point)).await.map(|_| ())
    }

    // 先整批编码，任一点失败则整批不写入
    async fn write_batch(&self, points: &[OutputPoint]) -> Result<usize, WriterError> {
        let mut encoded = Vec::with_capacity(points.len());
        for point in points {
            let line = point.to_line_protocol().ok_or_else(|| {
                WriterError::Encode(format!(
                    "cannot encode {}={} at {}",
                    point.field(),
                    point.value(),
                    point.time()
                ))
            })?;
            encoded.push(line);
        }
        let mut lines = self.lines.lock().await;
        lines.extend(encoded);
        Ok(points.len())
    }
}

/// 转换处理器：报文 -> 转换器 -> 写入器。
pub struct ConverterHandler {
    config: ConverterConfig,
    handler: Handler,
    writer: Arc<dyn PointWriter>,
}

impl ConverterHandler {
    pub fn new(config: ConverterConfig, writer: Arc<dyn PointWriter>) -> Result<Self, IngestError> {
        let handler = handler_for(&config.implementation)
            .map_err(|err| IngestError::Config(err.to_string()))?;
        Ok(Self {
            config,
            handler,
            writer,
        })
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }
}

#[async_trait]
impl RawMessageHandler for ConverterHandler {
    async fn handle(&self, message: RawMessage) -> Result<(), IngestError> {
        record_message_received();
        let message_id = new_message_id();
        info!(
            target: "m2i.ingest",
            message_id = %message_id,
            converter = %self.config.name,
            topic = %message.topic,
            payload_size = message.payload.len(),
            "raw_message_received"
        );

        let mut points = Vec::new();
        let result = (self.handler)(&self.config, &message, &mut |point: OutputPoint| {
            points.push(point)
        });

        // 报文中止前已输出的点照常写入
        let mut write_result = Ok(());
        if !points.is_empty() {
            match self.writer.write_batch(&points).await {
                Ok(written) => info!(
                    target: "m2i.ingest",
                    message_id = %message_id,
                    converter = %self.config.name,
                    written = written,
                    "points_written"
                ),
                Err(err) => {
                    warn!(
                        target: "m2i.ingest",
                        message_id = %message_id,
                        converter = %self.config.name,
                        points = points.len(),
                        error = %err,
                        "points_write_failed"
                    );
                    write_result = Err(IngestError::Writer(err.to_string()));
                }
            }
        }

        // 转换结果总是计入指标；转换错误优先于写入错误返回
        match result {
            Ok(report) => {
                record_message_converted();
                info!(
                    target: "m2i.ingest",
                    message_id = %message_id,
                    converter = %self.config.name,
                    measurement = %report.measurement,
                    emitted = report.emitted,
                    skipped = report.skipped.len(),
                    "message_handled"
                );
                write_result
            }
            Err(err) => {
                record_message_rejected();
                // 转换器已按 warn 记录错误详情
                debug!(
                    target: "m2i.ingest",
                    message_id = %message_id,
                    converter = %self.config.name,
                    topic = %message.topic,
                    error = %err,
                    "message_rejected"
                );
                Err(IngestError::Conversion(err.to_string()))
            }
        }
    }
}
