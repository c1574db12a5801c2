use std::ops::Index;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;

fn to_int<T: std::str::FromStr>(num_str: &str, date_str: &str) -> Result<T, String> {
    match num_str.parse::<T>() {
        Ok(x) => Ok(x),
        Err(_) => Err(format!("Error parsing {} from the date {}", num_str, date_str)),
    }
}

/// Parses a frontmatter date value into a UTC timestamp. Accepts RFC 3339
/// ("2024-01-02T03:04:05Z"), "2024-01-02 03:04:05" with optional
/// milliseconds, and a bare "2024-01-02" (midnight). Values without an
/// offset are taken as UTC.
pub fn parse_date_time(buf: &str) -> Result<DateTime<Utc>, String> {
    let buf = buf.trim();

    if let Ok(date_time) = DateTime::parse_from_rfc3339(buf) {
        return Ok(date_time.with_timezone(&Utc));
    }

    lazy_static! {
        static ref DATE_TIME_REGEX: Regex = Regex::new(
            r"^(\d{4})-(\d{1,2})-(\d{1,2})(?:[ T](\d{1,2}):(\d{1,2}):(\d{1,2})(\.\d{1,3})?)?$"
        ).unwrap();
    }

    let Some(caps) = DATE_TIME_REGEX.captures(buf) else {
        return Err(format!("Unable to parse date time {}", buf));
    };

    let to_i32 = |num_str: &str| to_int::<i32>(num_str, buf);
    let to_u32 = |num_str: &str| to_int::<u32>(num_str, buf);

    let y: i32 = to_i32(caps.index(1))?;
    let m: u32 = to_u32(caps.index(2))?;
    let d: u32 = to_u32(caps.index(3))?;

    // The time part is optional, midnight when absent. Fractional seconds
    // are accepted and dropped.
    let (h, mn, s) = match caps.get(4) {
        Some(hour) => (
            to_u32(hour.as_str())?,
            to_u32(caps.index(5))?,
            to_u32(caps.index(6))?,
        ),
        None => (0, 0, 0),
    };

    let Some(date) = NaiveDate::from_ymd_opt(y, m, d) else {
        return Err(format!("Date {} is out of range", buf));
    };
    let Some(time) = NaiveTime::from_hms_opt(h, mn, s) else {
        return Err(format!("Time in {} is out of range", buf));
    };

    Ok(NaiveDateTime::new(date, time).and_utc())
}

pub fn format_date_time(date_time: &DateTime<Utc>) -> (String, String) {
    let date = date_time.format("%Y-%m-%d").to_string();
    let time = date_time.format("%H:%M:%S").to_string();
    (date, time)
}
