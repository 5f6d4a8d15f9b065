//! Date parsing for exported sheet values
//!
//! Exports mix `DD/MM/YYYY` (optionally followed by a time) with ISO and
//! free-form dates. Day-first is tried first so `01/02/2024` is 1 February.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use contracts::domain::a001_sale_record::Record;
use once_cell::sync::Lazy;
use regex::Regex;

// Year must be followed by end of input or a time separator.
static DAY_FIRST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\d{1,2})/(\d{1,2})/(\d{4})(?:$|[\s,T])").expect("valid day-first regex")
});

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%b %d %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%d %B %Y",
    "%a %b %d %Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

/// Parse a record date, `None` when no known format matches.
///
/// A string that looks day-first but names an impossible day (`31/02/2024`)
/// is rejected rather than handed to the fallback formats.
pub fn parse_record_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(caps) = DAY_FIRST.captures(trimmed) {
        let day: u32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let year: i32 = caps[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    parse_fallback(trimmed)
}

fn parse_fallback(s: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date);
        }
    }
    None
}

/// `YYYY-MM` key of the month containing `date`
pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// Parsed payment date of a record
pub fn record_date(record: &Record) -> Option<NaiveDate> {
    record.payment_date.as_deref().and_then(parse_record_date)
}

/// `YYYY-MM` key of the record's payment month
pub fn record_month_key(record: &Record) -> Option<String> {
    record_date(record).map(month_key)
}
