//! Tests for date range parsing and rendering

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::daterange::DateRange;
use crate::error::QueryError;

fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, s)
        .unwrap()
}

// Wednesday, 2024-05-15 14:30:00
fn now() -> NaiveDateTime {
    at(2024, 5, 15, 14, 30, 0)
}

#[test]
fn test_interval_without_fraction() {
    let range = DateRange::new(at(2017, 1, 1, 0, 0, 0), at(2017, 1, 31, 23, 59, 59)).unwrap();
    assert_eq!(
        range.to_interval(),
        "2017-01-01T00:00:00/2017-01-31T23:59:59"
    );
}

#[test]
fn test_interval_with_microseconds() {
    let end = NaiveDate::from_ymd_opt(2018, 12, 31)
        .unwrap()
        .and_hms_micro_opt(23, 59, 59, 999_000)
        .unwrap();
    let range = DateRange::new(at(2017, 1, 1, 0, 0, 0), end).unwrap();

    assert_eq!(
        range.to_interval(),
        "2017-01-01T00:00:00/2018-12-31T23:59:59.999000"
    );
    assert_eq!(range.to_string(), range.to_interval());
}

#[test]
fn test_start_after_end_is_rejected() {
    let result = DateRange::new(at(2018, 1, 1, 0, 0, 0), at(2017, 1, 1, 0, 0, 0));
    assert!(matches!(result, Err(QueryError::InvalidRange(_))));
}

#[test]
fn test_single_instant_is_valid() {
    let t = at(2020, 2, 29, 12, 0, 0);
    let range = DateRange::new(t, t).unwrap();
    assert_eq!(range.days(), 1);
}

#[test]
fn test_parse_today() {
    let range = DateRange::parse_at("today", now()).unwrap();
    assert_eq!(range.start, at(2024, 5, 15, 0, 0, 0));
    assert_eq!(range.end, at(2024, 5, 15, 23, 59, 59));
}

#[test]
fn test_parse_yesterday() {
    let range = DateRange::parse_at("yesterday", now()).unwrap();
    assert_eq!(range.start, at(2024, 5, 14, 0, 0, 0));
    assert_eq!(range.end, at(2024, 5, 14, 23, 59, 59));
}

#[test]
fn test_parse_to_date_ranges() {
    let wtd = DateRange::parse_at("wtd", now()).unwrap();
    assert_eq!(wtd.start, at(2024, 5, 13, 0, 0, 0));

    let mtd = DateRange::parse_at("mtd", now()).unwrap();
    assert_eq!(mtd.start, at(2024, 5, 1, 0, 0, 0));

    let qtd = DateRange::parse_at("qtd", now()).unwrap();
    assert_eq!(qtd.start, at(2024, 4, 1, 0, 0, 0));

    let ytd = DateRange::parse_at("ytd", now()).unwrap();
    assert_eq!(ytd.start, at(2024, 1, 1, 0, 0, 0));
    assert_eq!(ytd.end, at(2024, 5, 15, 23, 59, 59));
}

#[test]
fn test_parse_relative_days() {
    let range = DateRange::parse_at("7d", now()).unwrap();
    assert_eq!(range.days(), 7);
    assert_eq!(range.start, at(2024, 5, 9, 0, 0, 0));

    let range = DateRange::parse_at("30d", now()).unwrap();
    assert_eq!(range.days(), 30);
}

#[test]
fn test_parse_relative_weeks() {
    let range = DateRange::parse_at("2w", now()).unwrap();
    assert_eq!(range.days(), 14);
}

#[test]
fn test_parse_relative_months_and_years() {
    assert_eq!(DateRange::parse_at("3m", now()).unwrap().days(), 90);
    assert_eq!(DateRange::parse_at("1y", now()).unwrap().days(), 365);
}

#[test]
fn test_parse_relative_hours() {
    let range = DateRange::parse_at("24h", now()).unwrap();
    assert_eq!(range.end, now());
    assert_eq!(range.end - range.start, Duration::hours(24));
}

#[test]
fn test_parse_custom_range() {
    let range = DateRange::parse_at("2024-01-01,2024-01-31", now()).unwrap();
    assert_eq!(range.start, at(2024, 1, 1, 0, 0, 0));
    assert_eq!(range.end, at(2024, 1, 31, 23, 59, 59));
    assert_eq!(range.days(), 31);
}

#[test]
fn test_parse_custom_range_with_spaces() {
    let range = DateRange::parse_at(" 2024-01-01 , 2024-01-02 ", now()).unwrap();
    assert_eq!(range.days(), 2);
}

#[test]
fn test_parse_is_case_insensitive() {
    assert_eq!(
        DateRange::parse_at("TODAY", now()).unwrap(),
        DateRange::parse_at("today", now()).unwrap()
    );
}

#[test]
fn test_parse_invalid() {
    assert!(DateRange::parse_at("invalid", now()).is_err());
    assert!(DateRange::parse_at("0d", now()).is_err());
    assert!(DateRange::parse_at("-3d", now()).is_err());
    assert!(DateRange::parse_at("7x", now()).is_err());
    assert!(DateRange::parse_at("2024-13-01,2024-12-31", now()).is_err());
}

#[test]
fn test_parse_relative_too_large_is_invalid_range() {
    for input in [
        "999999999d",
        "99999999999999d",
        "9223372036854775807h",
        "99999999999999999y",
        "9223372036854775807w",
        "9999999999999m",
    ] {
        let result = DateRange::parse_at(input, now());
        assert!(
            matches!(result, Err(QueryError::InvalidRange(_))),
            "{input}: {result:?}"
        );
    }
}

#[test]
fn test_parse_custom_reversed_is_invalid_range() {
    let result = DateRange::parse_at("2024-02-01,2024-01-01", now());
    assert!(matches!(result, Err(QueryError::InvalidRange(_))));
}

#[test]
fn test_parse_uses_current_time() {
    let range = DateRange::parse("today").unwrap();
    assert_eq!(range.days(), 1);
}
