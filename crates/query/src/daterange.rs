//! Report date ranges
//!
//! A range is a pair of naive date-times (the reporting API interprets them in
//! the report suite's time zone) rendered as an ISO interval `start/end`.
//!
//! Besides explicit bounds, ranges can be parsed from short text:
//! - Predefined: `today`, `yesterday`, `wtd`, `mtd`, `qtd`, `ytd`
//! - Relative: `24h`, `7d`, `2w`, `3m`, `1y`
//! - Custom: `2024-01-01,2024-01-31`

use std::fmt;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};

use crate::error::{QueryError, Result};

/// Inclusive date-time range of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// Start of the range (inclusive)
    pub start: NaiveDateTime,
    /// End of the range (inclusive)
    pub end: NaiveDateTime,
}

impl DateRange {
    /// Create a new date range
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self> {
        if start > end {
            return Err(QueryError::InvalidRange(format!(
                "start {} is after end {}",
                iso(start),
                iso(end)
            )));
        }
        Ok(Self { start, end })
    }

    /// Parse a date range string relative to the current UTC time
    pub fn parse(s: &str) -> Result<Self> {
        Self::parse_at(s, Utc::now().naive_utc())
    }

    /// Parse a date range string relative to `now`
    pub fn parse_at(s: &str, now: NaiveDateTime) -> Result<Self> {
        let s = s.trim().to_lowercase();

        if let Some(range) = Self::parse_predefined(&s, now) {
            return Ok(range);
        }

        if let Some(range) = Self::parse_relative(&s, now)? {
            return Ok(range);
        }

        if let Some(range) = Self::parse_custom(&s)? {
            return Ok(range);
        }

        Err(QueryError::InvalidRange(format!(
            "unknown date range format: {}",
            s
        )))
    }

    /// Render as `<ISO start>/<ISO end>`
    pub fn to_interval(&self) -> String {
        format!("{}/{}", iso(self.start), iso(self.end))
    }

    /// Number of calendar days touched by the range (inclusive)
    pub fn days(&self) -> i64 {
        (self.end.date() - self.start.date()).num_days() + 1
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_interval())
    }
}

impl DateRange {
    fn parse_predefined(s: &str, now: NaiveDateTime) -> Option<Self> {
        let today = now.date();
        let start = match s {
            "today" => today,
            "yesterday" => {
                let yesterday = today - Duration::days(1);
                return Some(Self {
                    start: start_of_day(yesterday),
                    end: end_of_day(yesterday),
                });
            }
            "wtd" => today - Duration::days(today.weekday().num_days_from_monday() as i64),
            "mtd" => today.with_day(1)?,
            "qtd" => {
                let quarter_start_month = ((today.month() - 1) / 3) * 3 + 1;
                NaiveDate::from_ymd_opt(today.year(), quarter_start_month, 1)?
            }
            "ytd" => NaiveDate::from_ymd_opt(today.year(), 1, 1)?,
            _ => return None,
        };

        Some(Self {
            start: start_of_day(start),
            end: end_of_day(today),
        })
    }

    fn parse_relative(s: &str, now: NaiveDateTime) -> Result<Option<Self>> {
        let Some((num, unit)) = extract_num_unit(s) else {
            return Ok(None);
        };

        // 7d means today + 6 previous days
        let days_back = match unit {
            'h' => {
                let start = Duration::try_hours(num)
                    .and_then(|span| now.checked_sub_signed(span))
                    .ok_or_else(|| out_of_range(s))?;
                let end = now.with_nanosecond(0).unwrap_or(now);
                return Ok(Some(Self { start, end }));
            }
            'd' => Some(num - 1),
            'w' => num.checked_mul(7).map(|days| days - 1),
            'm' => num.checked_mul(30).map(|days| days - 1),
            'y' => num.checked_mul(365).map(|days| days - 1),
            _ => return Ok(None),
        };

        let start = days_back
            .and_then(Duration::try_days)
            .and_then(|span| now.date().checked_sub_signed(span))
            .ok_or_else(|| out_of_range(s))?;

        Ok(Some(Self {
            start: start_of_day(start),
            end: end_of_day(now.date()),
        }))
    }

    fn parse_custom(s: &str) -> Result<Option<Self>> {
        // Format: 2024-01-01,2024-01-31
        let Some((start, end)) = s.split_once(',') else {
            return Ok(None);
        };

        let start = parse_date(start.trim())?;
        let end = parse_date(end.trim())?;

        Self::new(start_of_day(start), end_of_day(end)).map(Some)
    }
}

/// ISO 8601 without offset; microseconds only when non-zero
fn iso(dt: NaiveDateTime) -> String {
    if dt.nanosecond() == 0 {
        dt.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        dt.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }
}

fn extract_num_unit(s: &str) -> Option<(i64, char)> {
    let unit = s.chars().last()?;
    if !unit.is_ascii_alphabetic() {
        return None;
    }

    let num: i64 = s[..s.len() - 1].parse().ok()?;
    if num <= 0 {
        return None;
    }

    Some((num, unit))
}

fn out_of_range(s: &str) -> QueryError {
    QueryError::InvalidRange(format!("date range reaches too far back: {}", s))
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
        QueryError::InvalidRange(format!("invalid date format: {} (use YYYY-MM-DD)", s))
    })
}

fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_opt(23, 59, 59)
        .unwrap_or_else(|| date.and_time(NaiveTime::MIN))
}
