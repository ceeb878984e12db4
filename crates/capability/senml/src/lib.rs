//! SenML（RFC 8428）报文解码与规整。
//!
//! 两步处理：
//! - `decode`：按声明的编码把原始字节解码为记录包（记录中的字段可能是相对的）
//! - `normalize`：沿记录顺序展开 base 字段（bn/bt/bu/bv/bs），得到名称、时间、单位、值
//!   均已解析的记录序列
//!
//! 解码失败与规整失败是两种不同的错误，调用方据此区分报文格式问题和语义问题。

mod normalize;
mod pack;

pub use normalize::{Normalized, ResolvedRecord, SenmlValue, normalize};
pub use pack::{Format, Pack, Record, decode};

/// SenML 处理错误。
#[derive(Debug, thiserror::Error)]
pub enum SenmlError {
    #[error("unsupported format: {0}")]
    UnsupportedFormat(Format),
    #[error("decode error: {0}")]
    Decode(String),
    #[error("normalize error: record {index}: {reason}")]
    Normalize { index: usize, reason: String },
}

impl SenmlError {
    pub(crate) fn normalize(index: usize, reason: impl Into<String>) -> Self {
        Self::Normalize {
            index,
            reason: reason.into(),
        }
    }
}
