//! 时间工具函数: 时区偏移转换
//!
//! 所有日期→时间戳转换统一在 API handler 层完成，
//! repository 层只接收 `i64` Unix millis。

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Naive inputs are read as local time in the configured offset
const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// 解析日期字符串 (YYYY-MM-DD)
pub fn parse_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()
}

/// ISO-8601 datetime; offset-less values use `offset`
pub fn parse_datetime(value: &str, offset: FixedOffset) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    // 无秒数的带时区格式: 2025-06-07T10:00Z / 2025-06-07T10:00+02:00
    let zoned = match value.strip_suffix(['Z', 'z']) {
        Some(rest) => format!("{rest}+00:00"),
        None => value.to_string(),
    };
    if let Ok(dt) = DateTime::parse_from_str(&zoned, "%Y-%m-%dT%H:%M%:z") {
        return Some(dt.with_timezone(&Utc));
    }

    NAIVE_DATETIME_FORMATS.iter().find_map(|fmt| {
        let naive = NaiveDateTime::parse_from_str(value, fmt).ok()?;
        offset
            .from_local_datetime(&naive)
            .single()
            .map(|dt| dt.with_timezone(&Utc))
    })
}

/// 日期开始 (00:00:00) → Unix millis
pub fn day_start_millis(date: NaiveDate, offset: FixedOffset) -> i64 {
    let naive = date.and_time(chrono::NaiveTime::MIN);
    offset
        .from_local_datetime(&naive)
        .single()
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(|| naive.and_utc().timestamp_millis())
}

/// 日期结束 → 当日最后一毫秒的 Unix millis (含)
pub fn day_end_millis(date: NaiveDate, offset: FixedOffset) -> i64 {
    match date.succ_opt() {
        Some(next_day) => day_start_millis(next_day, offset) - 1,
        None => day_start_millis(date, offset) + 86_400_000 - 1,
    }
}

/// `[start, end]` of a local calendar day
pub fn day_window(date: NaiveDate, offset: FixedOffset) -> (i64, i64) {
    (day_start_millis(date, offset), day_end_millis(date, offset))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2025-06-07"),
            NaiveDate::from_ymd_opt(2025, 6, 7)
        );
        assert!(parse_date("2025-13-01").is_none());
        assert!(parse_date("07/06/2025").is_none());
    }

    #[test]
    fn test_parse_datetime_formats() {
        let expected = Utc.with_ymd_and_hms(2025, 6, 7, 10, 0, 0).unwrap();
        assert_eq!(parse_datetime("2025-06-07T10:00:00Z", utc()), Some(expected));
        assert_eq!(parse_datetime("2025-06-07T12:00:00+02:00", utc()), Some(expected));
        assert_eq!(parse_datetime("2025-06-07T10:00Z", utc()), Some(expected));
        assert_eq!(parse_datetime("2025-06-07T10:00", utc()), Some(expected));
        assert_eq!(parse_datetime("2025-06-07 10:00:00", utc()), Some(expected));

        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(parse_datetime("2025-06-07T12:00", plus_two), Some(expected));

        assert!(parse_datetime("tomorrow", utc()).is_none());
        assert!(parse_datetime("2025-06-07", utc()).is_none());
    }

    #[test]
    fn test_day_window() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 7).unwrap();
        let (start, end) = day_window(date, utc());
        assert_eq!(start, Utc.with_ymd_and_hms(2025, 6, 7, 0, 0, 0).unwrap().timestamp_millis());
        assert_eq!(end - start, 86_400_000 - 1);

        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        let (start, _) = day_window(date, plus_two);
        assert_eq!(start, Utc.with_ymd_and_hms(2025, 6, 6, 22, 0, 0).unwrap().timestamp_millis());
    }
}
