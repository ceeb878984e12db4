//! 转换器配置加载。

use std::env;

/// 默认的转换器实现名。
pub const DEFAULT_IMPLEMENTATION: &str = "senml";

/// 配置加载错误。
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {0}: {1}")]
    Invalid(String, String),
}

/// 转换器配置。
///
/// `name` 仅用于日志；`implementation` 用于在注册表中选择转换器。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterConfig {
    pub name: String,
    pub implementation: String,
}

impl ConverterConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            implementation: DEFAULT_IMPLEMENTATION.to_string(),
        }
    }

    pub fn with_implementation(mut self, implementation: impl Into<String>) -> Self {
        self.implementation = implementation.into();
        self
    }

    /// 从环境变量读取配置。
    pub fn from_env() -> Result<Self, ConfigError> {
        let name = read_non_empty_with_default("M2I_CONVERTER_NAME", DEFAULT_IMPLEMENTATION)?;
        let implementation =
            read_non_empty_with_default("M2I_CONVERTER_IMPLEMENTATION", DEFAULT_IMPLEMENTATION)?;
        Ok(Self {
            name,
            implementation,
        })
    }
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self::new(DEFAULT_IMPLEMENTATION)
    }
}

fn read_non_empty_with_default(key: &str, default: &str) -> Result<String, ConfigError> {
    match env::var(key) {
        Ok(value) if value.trim().is_empty() => Err(ConfigError::Invalid(key.to_string(), value)),
        Ok(value) => Ok(value.trim().to_string()),
        Err(_) => Ok(default.to_string()),
    }
}
