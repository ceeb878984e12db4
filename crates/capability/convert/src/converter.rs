use crate::identifier::parse_identifier;
use crate::timestamp::resolve_timestamp;
use crate::topic::parse_topic;
use crate::{ConvertError, RecordError};
use chrono::{DateTime, Utc};
use domain::{OutputPoint, RawMessage};
use m2i_config::ConverterConfig;
use m2i_senml::{Format, ResolvedRecord, SenmlValue, decode, normalize};
use m2i_telemetry::{record_points_emitted, record_record_skipped};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// 被跳过的记录。
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRecord {
    /// 记录在规整结果中的下标
    pub index: usize,
    pub name: String,
    pub error: RecordError,
}

/// 单条报文的转换结果。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversionReport {
    pub measurement: String,
    pub emitted: usize,
    pub skipped: Vec<SkippedRecord>,
}

/// SenML 报文转换器：每条记录输出一个点。
///
/// 无状态；同一实例可在多个线程上并发转换不同报文。
#[derive(Debug, Clone)]
pub struct SenmlConverter {
    name: String,
}

impl SenmlConverter {
    pub fn new(config: &ConverterConfig) -> Self {
        Self {
            name: config.name.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 以报文接收时刻作为相对时间的参考点进行转换。
    pub fn convert<F>(&self, message: &RawMessage, sink: F) -> Result<ConversionReport, ConvertError>
    where
        F: FnMut(OutputPoint),
    {
        self.convert_at(&message.topic, &message.payload, message.received_at, sink)
    }

    /// 以给定参考时刻转换；参考时刻相同则输出相同。
    ///
    /// 每个有效记录同步调用一次 `sink`，顺序与报文中的记录顺序一致。
    /// 返回 `Err` 时，中止前已输出的点不会撤回。
    pub fn convert_at<F>(
        &self,
        topic: &str,
        payload: &[u8],
        reference: DateTime<Utc>,
        mut sink: F,
    ) -> Result<ConversionReport, ConvertError>
    where
        F: FnMut(OutputPoint),
    {
        let result = self.run(topic, payload, reference, &mut sink);
        match &result {
            Ok(report) => debug!(
                target: "m2i.convert",
                converter = %self.name,
                topic = %topic,
                measurement = %report.measurement,
                emitted = report.emitted,
                skipped = report.skipped.len(),
                "message_converted"
            ),
            Err(err) => warn!(
                target: "m2i.convert",
                converter = %self.name,
                topic = %topic,
                error = %err,
                "conversion_aborted"
            ),
        }
        result
    }

    fn run<F>(
        &self,
        topic: &str,
        payload: &[u8],
        reference: DateTime<Utc>,
        sink: &mut F,
    ) -> Result<ConversionReport, ConvertError>
    where
        F: FnMut(OutputPoint),
    {
        let measurement = parse_topic(topic)?.measurement;
        let normalized = normalize(decode(payload, Format::Json)?)?;

        let mut report = ConversionReport {
            measurement: measurement.to_string(),
            ..ConversionReport::default()
        };
        for (index, record) in normalized.records.into_iter().enumerate() {
            match assemble(measurement, &record, reference) {
                Ok(point) => {
                    sink(point);
                    report.emitted += 1;
                    record_points_emitted(1);
                }
                Err(RecordError::Identifier(error)) if error.is_fatal() => {
                    return Err(ConvertError::Identifier {
                        error,
                        emitted: report.emitted,
                    });
                }
                Err(error) => {
                    warn!(
                        target: "m2i.convert",
                        converter = %self.name,
                        index = index,
                        name = %record.name,
                        error = %error,
                        "record_skipped"
                    );
                    record_record_skipped();
                    report.skipped.push(SkippedRecord {
                        index,
                        name: record.name,
                        error,
                    });
                }
            }
        }
        Ok(report)
    }
}

fn assemble(
    measurement: &str,
    record: &ResolvedRecord,
    reference: DateTime<Utc>,
) -> Result<OutputPoint, RecordError> {
    let device = parse_identifier(&record.name)?;
    let value = match &record.value {
        Some(SenmlValue::Float(value)) => *value,
        _ => return Err(RecordError::NonNumericValue),
    };
    if !value.is_finite() {
        return Err(RecordError::NonFiniteValue(value));
    }
    let time = resolve_timestamp(record.time, reference)
        .ok_or(RecordError::TimestampOutOfRange(record.time))?;

    // 设备标签后插入，key 冲突时覆盖 unit
    let mut tags = BTreeMap::new();
    tags.insert("unit".to_string(), record.unit.clone());
    tags.insert(device.tag_type, device.tag_value);

    Ok(OutputPoint::new(measurement, tags, device.field, value, time))
}
