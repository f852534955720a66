//! Tolerant parsing of free-form `date_added` text.
//!
//! Values are matched against an ordered list of known formats; the first
//! format that consumes the whole value wins. A value no format accepts is
//! reported as `None` and never raises.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

/// Days between 0001-01-01 (CE day 1) and the Unix epoch.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Full calendar-date formats, tried in order.
pub const DATE_FORMATS: [&str; 9] = [
    "%B %d, %Y", // September 9, 2019
    "%b %d, %Y", // Sep 9, 2019
    "%d %B %Y",  // 9 September 2019
    "%d %b %Y",  // 9 Sep 2019
    "%Y-%m-%d",  // 2019-09-09
    "%Y/%m/%d",  // 2019/09/09
    "%m/%d/%Y",  // 09/09/2019 (month first)
    "%m-%d-%Y",  // 09-09-2019
    "%d.%m.%Y",  // 09.09.2019
];

/// Timestamp formats; only the date part is kept.
pub const DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
];

/// Month-and-year formats, resolved to the first day of the month.
pub const MONTH_YEAR_FORMATS: [&str; 2] = ["%B %Y", "%b %Y"];

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("Invalid regex: whitespace"));

static ORDINAL_DAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{1,2})(?:st|nd|rd|th)\b").expect("Invalid regex: ordinal"));

static BARE_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}$").expect("Invalid regex: year"));

/// Parse one `date_added` value.
///
/// Leading/trailing whitespace is ignored, inner whitespace runs are
/// collapsed and ordinal day suffixes ("9th") are accepted.
pub fn parse_date_added(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let collapsed = WHITESPACE_RUN.replace_all(trimmed, " ");
    let value = ORDINAL_DAY.replace_all(&collapsed, "$1");
    let value = value.as_ref();

    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
    {
        return Some(date);
    }

    if let Some(date) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
    {
        return Some(date.date());
    }

    let first_of_month = format!("1 {value}");
    if let Some(date) = MONTH_YEAR_FORMATS.iter().find_map(|fmt| {
        NaiveDate::parse_from_str(&first_of_month, &format!("%d {fmt}")).ok()
    }) {
        return Some(date);
    }

    if BARE_YEAR.is_match(value) {
        return value
            .parse::<i32>()
            .ok()
            .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1));
    }

    None
}

/// Days since the Unix epoch, the physical representation of a polars `Date`.
pub fn days_since_epoch(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_long_month_format() {
        assert_eq!(parse_date_added("September 9, 2019"), Some(ymd(2019, 9, 9)));
        assert_eq!(parse_date_added("December 31, 2020"), Some(ymd(2020, 12, 31)));
    }

    #[test]
    fn test_abbreviated_month_format() {
        assert_eq!(parse_date_added("Sep 9, 2019"), Some(ymd(2019, 9, 9)));
    }

    #[test]
    fn test_day_first_formats() {
        assert_eq!(parse_date_added("9 September 2019"), Some(ymd(2019, 9, 9)));
        assert_eq!(parse_date_added("09.09.2019"), Some(ymd(2019, 9, 9)));
    }

    #[test]
    fn test_iso_format() {
        assert_eq!(parse_date_added("2021-01-15"), Some(ymd(2021, 1, 15)));
        assert_eq!(parse_date_added("2021/01/15"), Some(ymd(2021, 1, 15)));
    }

    #[test]
    fn test_us_numeric_format() {
        assert_eq!(parse_date_added("01/15/2021"), Some(ymd(2021, 1, 15)));
        assert_eq!(parse_date_added("01-15-2021"), Some(ymd(2021, 1, 15)));
    }

    #[test]
    fn test_datetime_keeps_date_part() {
        assert_eq!(parse_date_added("2021-01-15T08:30:00"), Some(ymd(2021, 1, 15)));
        assert_eq!(parse_date_added("2021-01-15 23:59:59"), Some(ymd(2021, 1, 15)));
    }

    #[test]
    fn test_surrounding_and_inner_whitespace() {
        assert_eq!(parse_date_added("  August 4, 2017 "), Some(ymd(2017, 8, 4)));
        assert_eq!(parse_date_added("August  4,   2017"), Some(ymd(2017, 8, 4)));
    }

    #[test]
    fn test_ordinal_day_suffix() {
        assert_eq!(parse_date_added("March 1st, 2018"), Some(ymd(2018, 3, 1)));
        assert_eq!(parse_date_added("June 22nd, 2016"), Some(ymd(2016, 6, 22)));
    }

    #[test]
    fn test_month_year_resolves_to_first_day() {
        assert_eq!(parse_date_added("September 2019"), Some(ymd(2019, 9, 1)));
        assert_eq!(parse_date_added("Sep 2019"), Some(ymd(2019, 9, 1)));
    }

    #[test]
    fn test_bare_year() {
        assert_eq!(parse_date_added("2018"), Some(ymd(2018, 1, 1)));
    }

    #[test]
    fn test_unparseable_values() {
        assert_eq!(parse_date_added("bad-date"), None);
        assert_eq!(parse_date_added(""), None);
        assert_eq!(parse_date_added("   "), None);
        assert_eq!(parse_date_added("February 30, 2019"), None);
        assert_eq!(parse_date_added("13/45/2019"), None);
        assert_eq!(parse_date_added("20190909"), None);
    }

    #[test]
    fn test_days_since_epoch() {
        assert_eq!(days_since_epoch(ymd(1970, 1, 1)), 0);
        assert_eq!(days_since_epoch(ymd(1970, 1, 2)), 1);
        assert_eq!(days_since_epoch(ymd(1969, 12, 31)), -1);
        assert_eq!(days_since_epoch(ymd(2000, 1, 1)), 10_957);
    }
}
