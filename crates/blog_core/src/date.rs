use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Locale used for long-form calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DateLocale {
    /// `2024년 1월 15일`
    #[default]
    Korean,
    /// `January 15, 2024`
    English,
}

/// Parse a record date into a UTC instant.
///
/// Accepts RFC 3339 timestamps, naive ISO date-times and plain calendar dates.
pub fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    if let Some(dt) = parse_naive_date_time(raw) {
        return Some(dt);
    }
    parse_naive_date(raw).map(|date| date.and_time(NaiveTime::MIN))
}

/// Ordering key for a possibly missing or malformed date.
///
/// Anything that fails to parse sorts as the epoch so repeated runs agree.
pub fn sort_key(raw: Option<&str>) -> NaiveDateTime {
    raw.and_then(parse_date).unwrap_or_default()
}

/// Long calendar form of a record date in the given locale.
///
/// The calendar day is taken as written, so `2024-01-15T23:30:00+09:00`
/// formats as the 15th. Unparseable input is returned unchanged.
pub fn format_long(raw: Option<&str>, locale: DateLocale) -> String {
    let Some(raw) = raw else {
        return String::new();
    };
    match calendar_date(raw) {
        Some(date) => match locale {
            DateLocale::Korean => {
                format!("{}년 {}월 {}일", date.year(), date.month(), date.day())
            }
            DateLocale::English => date.format("%B %-d, %Y").to_string(),
        },
        None => raw.to_string(),
    }
}

fn calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if let Some(dt) = parse_naive_date_time(raw) {
        return Some(dt.date());
    }
    parse_naive_date(raw)
}

fn parse_naive_date_time(raw: &str) -> Option<NaiveDateTime> {
    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

fn parse_naive_date(raw: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_shapes() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(parse_date("2024-01-15"), Some(day.and_time(NaiveTime::MIN)));
        assert_eq!(
            parse_date("2024-01-15T10:30:00.000Z"),
            day.and_hms_opt(10, 30, 0)
        );
        assert_eq!(
            parse_date("2024-01-15T10:30:00+09:00"),
            day.and_hms_opt(1, 30, 0)
        );
        assert_eq!(parse_date("2024-01-15T10:30"), day.and_hms_opt(10, 30, 0));
        assert_eq!(parse_date("2024/01/15"), Some(day.and_time(NaiveTime::MIN)));
    }

    #[test]
    fn malformed_dates_are_none_and_sort_as_epoch() {
        assert_eq!(parse_date("bad"), None);
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("2024-13-45"), None);
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1)
            .unwrap()
            .and_time(NaiveTime::MIN);
        assert_eq!(sort_key(Some("bad")), epoch);
        assert_eq!(sort_key(None), epoch);
    }

    #[test]
    fn formats_long_dates_per_locale() {
        assert_eq!(
            format_long(Some("2024-01-05"), DateLocale::Korean),
            "2024년 1월 5일"
        );
        assert_eq!(
            format_long(Some("2024-01-05"), DateLocale::English),
            "January 5, 2024"
        );
        assert_eq!(
            format_long(Some("2024-01-15T23:30:00+09:00"), DateLocale::English),
            "January 15, 2024"
        );
    }

    #[test]
    fn unformattable_dates_degrade_to_raw_text() {
        assert_eq!(format_long(Some("someday"), DateLocale::Korean), "someday");
        assert_eq!(format_long(None, DateLocale::English), "");
    }
}
