//! 转换链路共享的数据模型。

pub mod data;

pub use data::{OutputPoint, RawMessage};
