use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// 协议输入原始报文。
#[derive(Debug, Clone)]
pub struct RawMessage {
    pub topic: String,
    pub payload: Vec<u8>,
    pub received_at: DateTime<Utc>,
}

impl RawMessage {
    pub fn new(topic: impl Into<String>, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            topic: topic.into(),
            payload: payload.into(),
            received_at: Utc::now(),
        }
    }

    /// 指定接收时刻（测试或回放场景）。
    pub fn with_received_at(mut self, received_at: DateTime<Utc>) -> Self {
        self.received_at = received_at;
        self
    }
}

/// 转换后的时序数据点：一个 measurement、一组标签、单个字段与绝对时间戳。
///
/// 每条记录构造一次，交给下游 sink 后即丢弃，构造后不可变。
#[derive(Debug, Clone, PartialEq)]
pub struct OutputPoint {
    measurement: String,
    tags: BTreeMap<String, String>,
    field: String,
    value: f64,
    time: DateTime<Utc>,
}

impl OutputPoint {
    pub fn new(
        measurement: impl Into<String>,
        tags: BTreeMap<String, String>,
        field: impl Into<String>,
        value: f64,
        time: DateTime<Utc>,
    ) -> Self {
        Self {
            measurement: measurement.into(),
            tags,
            field: field.into(),
            value,
            time,
        }
    }

    pub fn measurement(&self) -> &str {
        &self.measurement
    }

    pub fn tags(&self) -> &BTreeMap<String, String> {
        &self.tags
    }

    /// 字段集合，恰好一个条目。
    pub fn fields(&self) -> BTreeMap<String, f64> {
        BTreeMap::from([(self.field.clone(), self.value)])
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn time(&self) -> DateTime<Utc> {
        self.time
    }

    /// 渲染为 InfluxDB line protocol。
    ///
    /// 标签按 key 排序；空值标签省略（line protocol 不允许空标签值）。
    /// 时间戳为纳秒，超出 i64 纳秒范围或值不是有限数时返回 `None`。
    pub fn to_line_protocol(&self) -> Option<String> {
        if !self.value.is_finite() {
            return None;
        }
        let ts_ns = self.time.timestamp_nanos_opt()?;
        let mut line = escape(&self.measurement, &[',', ' ']);
        for (key, value) in &self.tags {
            if value.is_empty() {
                continue;
            }
            line.push(',');
            line.push_str(&escape(key, &[',', '=', ' ']));
            line.push('=');
            line.push_str(&escape(value, &[',', '=', ' ']));
        }
        line.push(' ');
        line.push_str(&escape(&self.field, &[',', '=', ' ']));
        line.push('=');
        line.push_str(&self.value.to_string());
        line.push(' ');
        line.push_str(&ts_ns.to_string());
        Some(line)
    }
}

fn escape(input: &str, special: &[char]) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        if special.contains(&ch) {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::escape;

    #[test]
    fn escape_marks_separators() {
        assert_eq!(escape("a b,c=d", &[',', '=', ' ']), "a\\ b\\,c\\=d");
        assert_eq!(escape("plain", &[',', ' ']), "plain");
    }
}
