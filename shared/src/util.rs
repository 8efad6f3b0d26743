use chrono::{DateTime, Utc};

/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Convert stored epoch milliseconds back to a UTC datetime.
///
/// Out-of-range values clamp to the Unix epoch.
pub fn millis_to_datetime(millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_millis_roundtrip() {
        let dt = Utc.with_ymd_and_hms(2025, 6, 7, 10, 0, 0).unwrap();
        assert_eq!(millis_to_datetime(dt.timestamp_millis()), dt);
    }

    #[test]
    fn test_now_millis_is_recent() {
        let before = Utc::now().timestamp_millis();
        let now = now_millis();
        assert!(now >= before);
    }
}
