//! 转换错误类型
//!
//! 分两层：
//! - `ConvertError`：整条报文中止（topic 格式、SenML 解码/规整、设备子类型缺失）
//! - `RecordError`：仅跳过当前记录，继续处理后续记录

use crate::identifier::IdentifierError;
use m2i_senml::SenmlError;

/// 报文级错误，返回时不再处理剩余记录。
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("cannot extract measurement from topic='{0}'")]
    TopicFormat(String),
    #[error(transparent)]
    Senml(#[from] SenmlError),
    #[error("{error} (aborted after {emitted} points)")]
    Identifier {
        error: IdentifierError,
        emitted: usize,
    },
    #[error("unknown handler: {0}")]
    UnknownHandler(String),
}

/// 记录级错误。
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordError {
    #[error(transparent)]
    Identifier(#[from] IdentifierError),
    #[error("value is not numeric")]
    NonNumericValue,
    #[error("value is not finite: {0}")]
    NonFiniteValue(f64),
    #[error("timestamp out of range: {0}")]
    TimestampOutOfRange(f64),
}
