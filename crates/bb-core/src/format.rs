//! # Formatters
//!
//! Pure conversions between wire timestamps, `/blocks/:day` segments, and
//! display strings. Every day-level computation happens in UTC.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use thiserror::Error;

/// Returned by [`parse_day_str`] for anything that is not `DD-MM-YYYY`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid day string {0:?}, expected DD-MM-YYYY")]
pub struct DayParseError(pub String);

/// Renders the `DD-MM-YYYY` segment used by `/blocks/:day`.
pub fn format_day_str<D: Datelike>(date: &D) -> String {
    format!("{:02}-{:02}-{:04}", date.day(), date.month(), date.year())
}

/// Parses a `DD-MM-YYYY` segment into midnight UTC of that day.
///
/// Day and month may be one or two digits; the year must be four. Dates
/// that do not exist on the calendar (`31-02-2024`) are rejected.
pub fn parse_day_str(s: &str) -> Result<DateTime<Utc>, DayParseError> {
    let err = || DayParseError(s.to_string());

    let mut parts = s.split('-');
    let (Some(day), Some(month), Some(year), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(err());
    };

    let digits = |p: &str, min: usize, max: usize| {
        (min..=max).contains(&p.len()) && p.bytes().all(|b| b.is_ascii_digit())
    };
    if !digits(day, 1, 2) || !digits(month, 1, 2) || !digits(year, 4, 4) {
        return Err(err());
    }

    // All three are short ASCII digit runs, so parsing cannot overflow.
    let (day, month, year) = (
        day.parse::<u32>().map_err(|_| err())?,
        month.parse::<u32>().map_err(|_| err())?,
        year.parse::<i32>().map_err(|_| err())?,
    );

    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|d| d.and_utc())
        .ok_or_else(err)
}

/// Seconds since the epoch to a UTC date-time.
/// Out-of-range values clamp to the epoch itself.
pub fn epoch_date(seconds: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(seconds, 0)
        .single()
        .unwrap_or(DateTime::UNIX_EPOCH)
}

/// `Feb 13, 2024`
pub fn nice_date<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%b %-d, %Y").to_string()
}

/// `02/13/24`
pub fn short_date<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%m/%d/%y").to_string()
}

/// `02/13/24, 3:04 PM` for an epoch timestamp, rendered in UTC.
pub fn nice_datetime(seconds: i64) -> String {
    epoch_date(seconds).format("%m/%d/%y, %-I:%M %p").to_string()
}

/// `13 Feb 2024, 15:04` for an epoch timestamp, rendered in UTC.
pub fn precise_date(seconds: i64) -> String {
    epoch_date(seconds).format("%-d %b %Y, %H:%M").to_string()
}

/// `plural(1, "bulletins") == "1 bulletin"`.
///
/// Singularizing just drops the final character, so only regular `-s`
/// plurals come out right.
pub fn plural(n: i64, word: &str) -> String {
    if n == 1 {
        let mut chars = word.chars();
        chars.next_back();
        format!("{n} {}", chars.as_str())
    } else {
        format!("{n} {word}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn midnight(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn format_pads_day_and_month() {
        assert_eq!(format_day_str(&midnight(2024, 2, 3)), "03-02-2024");
        assert_eq!(format_day_str(&midnight(2024, 11, 13)), "13-11-2024");
        assert_eq!(format_day_str(&midnight(2024, 12, 31)), "31-12-2024");
    }

    #[test]
    fn parse_reads_known_day() {
        assert_eq!(parse_day_str("13-02-2024"), Ok(midnight(2024, 2, 13)));
        assert_eq!(parse_day_str("3-2-2024"), Ok(midnight(2024, 2, 3)));
    }

    #[test]
    fn parse_rejects_malformed_input() {
        for bad in [
            "not-a-date",
            "",
            "13-02-24",
            "13/02/2024",
            "131-02-2024",
            "13-02-2024-01",
            "31-02-2024",
            "00-01-2024",
            "+1-02-2024",
        ] {
            assert_eq!(parse_day_str(bad), Err(DayParseError(bad.to_string())), "{bad}");
        }
    }

    #[test]
    fn format_and_parse_are_inverse() {
        let mut day = midnight(1999, 12, 25);
        for _ in 0..800 {
            assert_eq!(parse_day_str(&format_day_str(&day)), Ok(day));
            day += Duration::days(1);
        }
    }

    #[test]
    fn epoch_date_is_utc() {
        assert_eq!(epoch_date(0), DateTime::UNIX_EPOCH);
        assert_eq!(epoch_date(1_707_782_400), midnight(2024, 2, 13));
    }

    #[test]
    fn display_renderers() {
        let ts = 1_707_836_640; // 2024-02-13 15:04:00 UTC
        assert_eq!(nice_date(&epoch_date(ts)), "Feb 13, 2024");
        assert_eq!(short_date(&epoch_date(ts)), "02/13/24");
        assert_eq!(nice_datetime(ts), "02/13/24, 3:04 PM");
        assert_eq!(precise_date(ts), "13 Feb 2024, 15:04");
    }

    #[test]
    fn plural_singularizes_one() {
        assert_eq!(plural(1, "bulletins"), "1 bulletin");
        assert_eq!(plural(0, "bulletins"), "0 bulletins");
        assert_eq!(plural(5, "bulletins"), "5 bulletins");
    }
}
