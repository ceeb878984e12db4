use crate::SenmlError;
use serde::Deserialize;
use std::fmt;

/// 报文声明的编码。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Cbor,
    Xml,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Format::Json => "json",
            Format::Cbor => "cbor",
            Format::Xml => "xml",
        };
        f.write_str(name)
    }
}

/// 未规整的 SenML 记录，字段名与 JSON 标签一致。
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Record {
    pub bn: Option<String>,
    pub bt: Option<f64>,
    pub bu: Option<String>,
    pub bv: Option<f64>,
    pub bs: Option<f64>,
    pub bver: Option<i64>,
    pub n: Option<String>,
    pub u: Option<String>,
    pub v: Option<f64>,
    pub vs: Option<String>,
    pub vb: Option<bool>,
    pub vd: Option<String>,
    pub s: Option<f64>,
    pub t: Option<f64>,
    pub ut: Option<f64>,
}

/// 记录包（保持报文中的原始顺序）。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pack {
    pub records: Vec<Record>,
}

/// 按声明编码解码记录包。
///
/// 当前仅支持 JSON；未知字段忽略。
pub fn decode(payload: &[u8], format: Format) -> Result<Pack, SenmlError> {
    match format {
        Format::Json => {
            let records: Vec<Record> = serde_json::from_slice(payload)
                .map_err(|err| SenmlError::Decode(err.to_string()))?;
            Ok(Pack { records })
        }
        other => Err(SenmlError::UnsupportedFormat(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_reads_json_labels() {
        let pack = decode(
            br#"[{"bn":"urn:dev:ow:1/","bt":10.5,"n":"temp","u":"Cel","v":21.5,"extra":1}]"#,
            Format::Json,
        )
        .expect("decode");
        assert_eq!(pack.records.len(), 1);
        let record = &pack.records[0];
        assert_eq!(record.bn.as_deref(), Some("urn:dev:ow:1/"));
        assert_eq!(record.bt, Some(10.5));
        assert_eq!(record.n.as_deref(), Some("temp"));
        assert_eq!(record.v, Some(21.5));
        assert!(record.t.is_none());
    }

    #[test]
    fn decode_rejects_non_array() {
        let err = decode(br#"{"n":"temp","v":1}"#, Format::Json).expect_err("object");
        assert!(matches!(err, SenmlError::Decode(_)));
    }

    #[test]
    fn decode_rejects_cbor() {
        let err = decode(&[0x80], Format::Cbor).expect_err("cbor");
        assert_eq!(err.to_string(), "unsupported format: cbor");
    }
}
