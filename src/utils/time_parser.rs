use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::errors::{LinkregError, Result};

pub struct TimeParser;

impl TimeParser {
    /// 解析过期时间，支持：
    /// - RFC3339：2023-10-01T12:00:00Z
    /// - 日期：2023-10-01（UTC 零点）
    /// - 相对时间：1d, 2w, 3M, 1y, 1h30m, 2d12h
    pub fn parse_expire_time(input: &str) -> Result<DateTime<Utc>> {
        Self::parse_expire_time_at(input, Utc::now())
    }

    /// Same as [`TimeParser::parse_expire_time`], relative times counted from `now`.
    pub fn parse_expire_time_at(input: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
        let input = input.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
            return Ok(dt.with_timezone(&Utc));
        }

        if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d")
            && let Some(midnight) = date.and_hms_opt(0, 0, 0)
        {
            return Ok(midnight.and_utc());
        }

        let duration = Self::parse_relative_duration(input).map_err(|reason| {
            LinkregError::invalid_input(format!(
                "Invalid expiry '{}': {}. Use RFC3339 (2025-01-01T12:00:00Z), a date (2025-01-01) or a duration (1d, 2w, 1h30m)",
                input, reason
            ))
        })?;

        now.checked_add_signed(duration).ok_or_else(|| {
            LinkregError::invalid_input(format!("Expiry '{}' is out of range", input))
        })
    }

    fn parse_relative_duration(input: &str) -> std::result::Result<Duration, String> {
        if input.is_empty() {
            return Err("empty value".to_string());
        }

        let mut total = Duration::zero();
        let mut remaining = input;

        while !remaining.is_empty() {
            let digits = remaining
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(remaining.len());
            if digits == 0 {
                return Err(format!("expected a number at '{}'", remaining));
            }
            let num: i64 = remaining[..digits]
                .parse()
                .map_err(|_| format!("invalid number '{}'", &remaining[..digits]))?;
            remaining = &remaining[digits..];

            let unit_len = remaining
                .find(|c: char| !c.is_alphabetic())
                .unwrap_or(remaining.len());
            if unit_len == 0 {
                return Err(format!("missing unit after '{}'", num));
            }
            let unit = &remaining[..unit_len];
            remaining = &remaining[unit_len..];

            // "M" 是月，"m" 是分钟，所以先按原样匹配
            let duration = match unit {
                "M" => num.checked_mul(30).and_then(Duration::try_days),
                _ => match unit.to_lowercase().as_str() {
                    "s" | "sec" | "second" | "seconds" => Duration::try_seconds(num),
                    "m" | "min" | "minute" | "minutes" => Duration::try_minutes(num),
                    "h" | "hour" | "hours" => Duration::try_hours(num),
                    "d" | "day" | "days" => Duration::try_days(num),
                    "w" | "week" | "weeks" => Duration::try_weeks(num),
                    "month" | "months" => num.checked_mul(30).and_then(Duration::try_days),
                    "y" | "year" | "years" => num.checked_mul(365).and_then(Duration::try_days),
                    _ => return Err(format!("unsupported unit '{}'", unit)),
                },
            };
            total = duration
                .and_then(|d| total.checked_add(&d))
                .ok_or_else(|| format!("'{}{}' is out of range", num, unit))?;
        }

        if total == Duration::zero() {
            return Err("duration must not be zero".to_string());
        }
        Ok(total)
    }

    /// 格式化剩余时间
    pub fn format_remaining(from: DateTime<Utc>, to: DateTime<Utc>) -> String {
        let duration = to.signed_duration_since(from);

        if duration.num_seconds() <= 0 {
            return "expired".to_string();
        }

        let days = duration.num_days();
        let hours = (duration.num_seconds() % 86400) / 3600;
        let minutes = (duration.num_seconds() % 3600) / 60;

        if days > 0 {
            if hours > 0 {
                format!("in {}d {}h", days, hours)
            } else {
                format!("in {}d", days)
            }
        } else if hours > 0 {
            format!("in {}h {}m", hours, minutes)
        } else if minutes > 0 {
            format!("in {}m", minutes)
        } else {
            format!("in {}s", duration.num_seconds())
        }
    }
}
