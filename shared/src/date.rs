//! 时间处理模块
//!
//! 后端以 RFC 3339 字符串传输时间，这里负责：
//! - 展示格式化（`MMM d, yyyy h:mm a`）
//! - `<input type="datetime-local">` 的值与 UTC 时间之间的转换

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, TimeZone, Utc};

/// datetime-local 输入框使用的格式（精确到分钟）
const INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";
const DISPLAY_FORMAT: &str = "%b %-d, %Y %-I:%M %p";
const DATE_FORMAT: &str = "%b %-d, %Y";

/// 解析后端返回的时间字符串
///
/// 返回 None 如果解析失败
pub fn parse(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// 按指定时区格式化为 `May 1, 2024 2:30 PM`
pub fn format_datetime_in<Tz: TimeZone>(s: &str, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match parse(s) {
        Some(dt) => dt.with_timezone(tz).format(DISPLAY_FORMAT).to_string(),
        None => s.to_string(),
    }
}

/// 按浏览器本地时区格式化
pub fn format_datetime(s: &str) -> String {
    format_datetime_in(s, &Local)
}

/// 仅日期部分，用于账户创建时间等
pub fn format_date_in<Tz: TimeZone>(s: &str, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match parse(s) {
        Some(dt) => dt.with_timezone(tz).format(DATE_FORMAT).to_string(),
        None => String::new(),
    }
}

pub fn format_date(s: &str) -> String {
    format_date_in(s, &Local)
}

/// 将 datetime-local 的值（按给定时区理解）转换为 RFC 3339 UTC 字符串
pub fn input_to_rfc3339_in<Tz: TimeZone>(value: &str, tz: &Tz) -> Option<String> {
    let naive = NaiveDateTime::parse_from_str(value, INPUT_FORMAT).ok()?;
    let local = tz.from_local_datetime(&naive).earliest()?;
    Some(
        local
            .with_timezone(&Utc)
            .to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
    )
}

pub fn input_to_rfc3339(value: &str) -> Option<String> {
    input_to_rfc3339_in(value, &Local)
}

/// 新建活动表单的默认时间：当前时刻，截断到分钟
pub fn input_default(now: DateTime<FixedOffset>) -> String {
    now.format(INPUT_FORMAT).to_string()
}

pub fn input_now() -> String {
    input_default(Local::now().fixed_offset())
}
