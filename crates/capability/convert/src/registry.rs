use crate::{ConversionReport, ConvertError, SenmlConverter};
use domain::{OutputPoint, RawMessage};
use m2i_config::ConverterConfig;

/// 转换处理函数：报文 -> 0..n 个输出点。
pub type Handler = fn(
    &ConverterConfig,
    &RawMessage,
    &mut dyn FnMut(OutputPoint),
) -> Result<ConversionReport, ConvertError>;

/// 按实现名查找转换处理函数。
pub fn handler_for(implementation: &str) -> Result<Handler, ConvertError> {
    match implementation {
        "senml" => Ok(senml_handler),
        other => Err(ConvertError::UnknownHandler(other.to_string())),
    }
}

fn senml_handler(
    config: &ConverterConfig,
    message: &RawMessage,
    sink: &mut dyn FnMut(OutputPoint),
) -> Result<ConversionReport, ConvertError> {
    SenmlConverter::new(config).convert(message, sink)
}
