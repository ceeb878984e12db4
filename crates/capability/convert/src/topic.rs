use crate::ConvertError;

/// topic 拆分结果：最后一段作为 measurement，前缀保留但暂未使用。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopicParts<'a> {
    pub prefix: &'a str,
    pub measurement: &'a str,
}

/// 从 topic 的最后一段提取 measurement。
///
/// 例：`piegn/tele/senml/24v-bmv/meas` -> `meas`。
pub fn parse_topic(topic: &str) -> Result<TopicParts<'_>, ConvertError> {
    match topic.rsplit_once('/') {
        Some((prefix, measurement)) if !measurement.is_empty() => Ok(TopicParts {
            prefix,
            measurement,
        }),
        _ => Err(ConvertError::TopicFormat(topic.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_segment_is_measurement() {
        let parts = parse_topic("piegn/tele/senml/24v-bmv/meas").expect("topic");
        assert_eq!(parts.measurement, "meas");
        assert_eq!(parts.prefix, "piegn/tele/senml/24v-bmv");
    }

    #[test]
    fn single_separator_is_enough() {
        let parts = parse_topic("/meas").expect("topic");
        assert_eq!(parts.prefix, "");
        assert_eq!(parts.measurement, "meas");
    }

    #[test]
    fn rejects_missing_or_empty_segment() {
        for topic in ["", "meas", "piegn/tele/"] {
            let err = parse_topic(topic).expect_err("invalid topic");
            assert!(matches!(err, ConvertError::TopicFormat(ref t) if t == topic));
        }
    }
}
