use crate::{Pack, SenmlError};

/// 规整后的记录值。
#[derive(Debug, Clone, PartialEq)]
pub enum SenmlValue {
    Float(f64),
    String(String),
    Bool(bool),
    Data(String),
}

/// base 字段全部展开后的记录。
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRecord {
    /// bn + n
    pub name: String,
    /// bt + t（秒），可能是相对时间也可能是绝对时间
    pub time: f64,
    /// u，缺省或为空时取 bu
    pub unit: String,
    pub value: Option<SenmlValue>,
    /// bs + s
    pub sum: Option<f64>,
    pub update_time: Option<f64>,
}

/// 规整结果。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Normalized {
    pub records: Vec<ResolvedRecord>,
}

#[derive(Default)]
struct BaseFields {
    name: String,
    time: f64,
    unit: String,
    value: f64,
    sum: f64,
    version: Option<i64>,
}

/// 沿记录顺序展开 base 字段。
///
/// 记录上出现的 base 字段覆盖当前值并作用于该记录及其后续记录；输出顺序与输入一致。
pub fn normalize(pack: Pack) -> Result<Normalized, SenmlError> {
    let mut base = BaseFields::default();
    let mut records = Vec::with_capacity(pack.records.len());

    for (index, record) in pack.records.into_iter().enumerate() {
        if let Some(bn) = record.bn {
            base.name = bn;
        }
        if let Some(bt) = record.bt {
            base.time = bt;
        }
        if let Some(bu) = record.bu {
            base.unit = bu;
        }
        if let Some(bv) = record.bv {
            base.value = bv;
        }
        if let Some(bs) = record.bs {
            base.sum = bs;
        }
        if let Some(bver) = record.bver {
            if bver < 0 {
                return Err(SenmlError::normalize(index, "negative base version"));
            }
            if base.version.is_some_and(|current| current != bver) {
                return Err(SenmlError::normalize(index, "base version changed"));
            }
            base.version = Some(bver);
        }

        let name = format!("{}{}", base.name, record.n.unwrap_or_default());
        validate_name(&name).map_err(|reason| SenmlError::normalize(index, reason))?;

        let mut values = Vec::with_capacity(1);
        if let Some(v) = record.v {
            values.push(SenmlValue::Float(base.value + v));
        }
        if let Some(vs) = record.vs {
            values.push(SenmlValue::String(vs));
        }
        if let Some(vb) = record.vb {
            values.push(SenmlValue::Bool(vb));
        }
        if let Some(vd) = record.vd {
            values.push(SenmlValue::Data(vd));
        }
        if values.len() > 1 {
            return Err(SenmlError::normalize(index, "more than one value"));
        }
        let value = values.pop();
        let sum = record.s.map(|s| base.sum + s);
        if value.is_none() && sum.is_none() {
            return Err(SenmlError::normalize(index, "no value or sum"));
        }

        records.push(ResolvedRecord {
            name,
            time: base.time + record.t.unwrap_or_default(),
            unit: record
                .u
                .filter(|unit| !unit.is_empty())
                .unwrap_or_else(|| base.unit.clone()),
            value,
            sum,
            update_time: record.ut,
        });
    }

    Ok(Normalized { records })
}

fn validate_name(name: &str) -> Result<(), String> {
    let mut chars = name.chars();
    let first = match chars.next() {
        Some(first) => first,
        None => return Err("empty name".to_string()),
    };
    if !first.is_ascii_alphanumeric() {
        return Err(format!("invalid name: {}", name));
    }
    if chars.any(|ch| !(ch.is_ascii_alphanumeric() || matches!(ch, '-' | ':' | '.' | '/' | '_'))) {
        return Err(format!("invalid name: {}", name));
    }
    Ok(())
}
