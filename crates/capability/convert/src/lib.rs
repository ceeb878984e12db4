//! SenML 报文 -> 时序数据点转换
//!
//! 处理流程：
//! 1. topic 最后一段作为 measurement
//! 2. SenML 解码并展开 base 字段
//! 3. 每条记录：解析 URN 得到设备标签与字段名，解析绝对时间戳
//! 4. 每条有效记录输出一个点给调用方的 sink
//!
//! 报文级错误通过 `ConvertError` 返回，记录级错误记入 `ConversionReport::skipped`。

mod converter;
mod error;
pub mod identifier;
mod registry;
pub mod timestamp;
pub mod topic;

pub use converter::{ConversionReport, SenmlConverter, SkippedRecord};
pub use error::{ConvertError, RecordError};
pub use identifier::{DeviceIdentifier, IdentifierError, parse_identifier};
pub use registry::{Handler, handler_for};
pub use timestamp::{RELATIVE_TIME_THRESHOLD, resolve_timestamp};
pub use topic::{TopicParts, parse_topic};
