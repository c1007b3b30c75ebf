//! 时间工具函数
//!
//! 所有时间戳转换统一在 API handler 层完成，
//! repository 层只接收 `i64` Unix millis。

use chrono::{DateTime, SecondsFormat, Utc};

use super::{AppError, AppResult};

/// 解析 RFC 3339 时间字符串 → Unix millis
pub fn parse_rfc3339(value: &str) -> AppResult<i64> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.timestamp_millis())
        .map_err(|_| AppError::validation(format!("Invalid timestamp: {value}")))
}

/// Unix millis → RFC 3339 字符串 (UTC, millisecond precision)
pub fn millis_to_rfc3339(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_default()
}

/// Unix millis → 邮件正文日期 ("March 20, 2024 at 18:00 UTC")
pub fn format_email_date(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|dt| dt.format("%B %-d, %Y at %H:%M UTC").to_string())
        .unwrap_or_default()
}

/// 当前时间的 Unix millis
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rfc3339_round_trip() {
        let millis = parse_rfc3339("2024-03-20T18:00:00.000Z").unwrap();
        assert_eq!(millis_to_rfc3339(millis), "2024-03-20T18:00:00.000Z");
    }

    #[test]
    fn parse_accepts_offsets() {
        let a = parse_rfc3339("2024-03-20T18:00:00+02:00").unwrap();
        let b = parse_rfc3339("2024-03-20T16:00:00Z").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(parse_rfc3339("tomorrow evening").is_err());
        assert!(parse_rfc3339("2024-03-20").is_err());
    }

    #[test]
    fn email_date_is_readable() {
        let millis = parse_rfc3339("2024-03-20T18:00:00.000Z").unwrap();
        assert_eq!(format_email_date(millis), "March 20, 2024 at 18:00 UTC");
    }
}
