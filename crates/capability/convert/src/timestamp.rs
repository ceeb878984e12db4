use chrono::{DateTime, TimeDelta, Utc};

/// 绝对值小于 2^28 的时间按相对毫秒解释，否则按 Unix 秒解释。
pub const RELATIVE_TIME_THRESHOLD: f64 = (1u64 << 28) as f64;

/// 把规整后的时间值解析为绝对时间。
///
/// - `|time| < 2^28`：`reference + time` 毫秒
/// - 否则：`UNIX_EPOCH + time` 整秒（小数部分舍弃）
///
/// 结果超出可表示范围时返回 `None`。
pub fn resolve_timestamp(time: f64, reference: DateTime<Utc>) -> Option<DateTime<Utc>> {
    if time.abs() < RELATIVE_TIME_THRESHOLD {
        reference.checked_add_signed(TimeDelta::milliseconds(time as i64))
    } else {
        DateTime::from_timestamp(time as i64, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn reference() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn absolute_time_drops_fraction() {
        let ts = resolve_timestamp(1.276020076001e9, reference()).expect("ts");
        assert_eq!(ts, Utc.with_ymd_and_hms(2010, 6, 6, 18, 1, 16).unwrap());
    }

    #[test]
    fn small_values_are_relative_milliseconds() {
        let ts = resolve_timestamp(-5.0, reference()).expect("ts");
        assert_eq!(ts, reference() - TimeDelta::milliseconds(5));

        let ts = resolve_timestamp(0.0, reference()).expect("ts");
        assert_eq!(ts, reference());
    }

    #[test]
    fn threshold_boundary() {
        let below = resolve_timestamp(RELATIVE_TIME_THRESHOLD - 1.0, reference()).expect("ts");
        assert_eq!(below, reference() + TimeDelta::milliseconds(268_435_455));

        let at = resolve_timestamp(RELATIVE_TIME_THRESHOLD, reference()).expect("ts");
        assert_eq!(at.timestamp(), 268_435_456);

        let negative = resolve_timestamp(-RELATIVE_TIME_THRESHOLD, reference()).expect("ts");
        assert_eq!(negative.timestamp(), -268_435_456);
    }

    #[test]
    fn out_of_range_is_none() {
        assert!(resolve_timestamp(f64::MAX, reference()).is_none());
    }
}
