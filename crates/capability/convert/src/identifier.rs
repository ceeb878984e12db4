//! 记录名（URN）解析
//!
//! 记录名形如 `urn:dev:ow:10e2073a0108006/voltage`：
//! - `dev`：命名空间（当前仅支持设备命名空间）
//! - `ow:10e2073a0108006`：设备路径，拆成标签 key 与标签值
//! - `voltage`：字段名
//!
//! 每条记录独立解析，不在记录之间共享任何状态。

use std::fmt;

/// 唯一支持的命名空间。
pub const DEVICE_NAMESPACE: &str = "dev";

/// URN 解析错误。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentifierError {
    #[error("invalid urn: {0}")]
    InvalidUrn(String),
    #[error("'/' not found for field: {0}")]
    MissingFieldSeparator(String),
    #[error("urn namespace not supported: {0}, supported namespaces: [dev]")]
    UnsupportedNamespace(String),
    #[error("dev urn subtype not found: {0}")]
    MissingDeviceSubtype(String),
    #[error("empty field name: {0}")]
    EmptyFieldName(String),
}

impl IdentifierError {
    /// 是否中止整条报文。
    ///
    /// 缺少 `/` 只跳过当前记录，而设备子类型缺失会中止报文；两者的处理刻意不同。
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            IdentifierError::InvalidUrn(_) | IdentifierError::MissingDeviceSubtype(_)
        )
    }
}

/// 已拆分的 URN。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Urn<'a> {
    pub namespace_id: &'a str,
    pub namespace_specific: &'a str,
}

impl fmt::Display for Urn<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "urn:{}:{}", self.namespace_id, self.namespace_specific)
    }
}

/// 设备命名空间下解析出的标签与字段。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceIdentifier {
    pub tag_type: String,
    pub tag_value: String,
    pub field: String,
}

/// 解析 `urn:<NID>:<NSS>`。
///
/// `urn` 前缀不区分大小写；NID 为 1-32 个字母、数字或 `-`，且不以 `-` 开头；NSS 非空。
pub fn parse_urn(name: &str) -> Result<Urn<'_>, IdentifierError> {
    let invalid = || IdentifierError::InvalidUrn(name.to_string());
    let (scheme, rest) = name.split_once(':').ok_or_else(invalid)?;
    if !scheme.eq_ignore_ascii_case("urn") {
        return Err(invalid());
    }
    let (namespace_id, namespace_specific) = rest.split_once(':').ok_or_else(invalid)?;
    let nid_valid = !namespace_id.is_empty()
        && namespace_id.len() <= 32
        && !namespace_id.starts_with('-')
        && namespace_id
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-');
    if !nid_valid || namespace_specific.is_empty() {
        return Err(invalid());
    }
    Ok(Urn {
        namespace_id,
        namespace_specific,
    })
}

/// 从 URN 中解析设备标签与字段名。
pub fn parse_device(urn: &Urn<'_>) -> Result<DeviceIdentifier, IdentifierError> {
    let (device_path, field) = urn
        .namespace_specific
        .split_once('/')
        .ok_or_else(|| IdentifierError::MissingFieldSeparator(urn.namespace_specific.to_string()))?;

    if !urn.namespace_id.eq_ignore_ascii_case(DEVICE_NAMESPACE) {
        return Err(IdentifierError::UnsupportedNamespace(urn.to_string()));
    }

    // 仅取前两段，多余的段忽略
    let mut parts = device_path.split(':');
    let (tag_type, tag_value) = match (parts.next(), parts.next()) {
        (Some(tag_type), Some(tag_value)) => (tag_type, tag_value),
        _ => return Err(IdentifierError::MissingDeviceSubtype(urn.to_string())),
    };

    if field.is_empty() {
        return Err(IdentifierError::EmptyFieldName(urn.to_string()));
    }

    Ok(DeviceIdentifier {
        tag_type: tag_type.to_string(),
        tag_value: tag_value.to_string(),
        field: field.to_string(),
    })
}

/// `parse_urn` + `parse_device`。
pub fn parse_identifier(name: &str) -> Result<DeviceIdentifier, IdentifierError> {
    let urn = parse_urn(name)?;
    parse_device(&urn)
}
