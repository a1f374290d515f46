//! HTTP date parsing and formatting.
//!
//! Dates are always written in the RFC 1123 form
//! (`Sun, 06 Nov 1994 08:49:37 GMT`). Reading is tolerant and accepts the
//! obsolete RFC 850 and ANSI C `asctime()` forms, the RFC 1036 / RFC 2822
//! variants seen in the wild (two-digit years, numeric zones, missing
//! weekday or seconds) and ISO 8601 timestamps.

use crate::error::{HeaderError, Result};
use chrono::{DateTime, Datelike, FixedOffset, NaiveDateTime, TimeZone, Utc};

/// Format used when writing dates.
pub const RFC_1123_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Formats tried in order, after the weekday and zone have been removed.
///
/// A four-digit-year format also accepts a two-digit year; such a match is
/// only used when no two-digit-year format matches.
const DATE_FORMATS: &[&str] = &[
    // RFC 1123 / RFC 2822
    "%d %b %Y %H:%M:%S",
    // RFC 850
    "%d-%b-%y %H:%M:%S",
    "%d-%b-%Y %H:%M:%S",
    // RFC 1036
    "%d %b %y %H:%M:%S",
    // RFC 2822 without seconds
    "%d %b %Y %H:%M",
    "%d %b %y %H:%M",
    // ANSI C asctime()
    "%b %e %H:%M:%S %Y",
];

const ISO_8601_ZONED: &str = "%Y-%m-%dT%H:%M:%S%.f%z";
const ISO_8601_LOCAL: &str = "%Y-%m-%dT%H:%M:%S%.f";

const WEEKDAYS: &[&str] = &[
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

const HOUR: i32 = 3600;

/// Parse an HTTP date. Dates without a zone are read as UTC.
pub fn read_date(value: &str) -> Result<DateTime<Utc>> {
    let trimmed = value.trim();
    let parsed = if looks_like_iso_8601(trimmed) {
        read_iso_8601(trimmed)
    } else {
        read_http_date(trimmed)
    };
    parsed.ok_or_else(|| HeaderError::InvalidDate(value.to_string()))
}

/// Format a date in the RFC 1123 form, always in GMT.
#[must_use]
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format(RFC_1123_DATE_FORMAT).to_string()
}

fn read_http_date(value: &str) -> Option<DateTime<Utc>> {
    let body = strip_weekday(value);
    let (body, offset) = match body.rsplit_once(' ') {
        Some((rest, zone)) => match zone_offset(zone) {
            Some(offset) => (rest.trim_end(), offset),
            None => (body, 0),
        },
        None => (body, 0),
    };
    let offset = FixedOffset::east_opt(offset)?;

    let mut short_year = None;
    for format in DATE_FORMATS {
        match NaiveDateTime::parse_from_str(body, format) {
            Ok(local) if local.year() < 100 && format.contains("%Y") => {
                tracing::trace!(date = value, format, "two-digit year, trying further formats");
                short_year.get_or_insert(local);
            }
            Ok(local) => return in_zone(local, offset),
            Err(e) => tracing::trace!(date = value, format, error = %e, "date format did not match"),
        }
    }
    short_year.and_then(|local| in_zone(local, offset))
}

fn in_zone(local: NaiveDateTime, offset: FixedOffset) -> Option<DateTime<Utc>> {
    offset
        .from_local_datetime(&local)
        .single()
        .map(|date| date.with_timezone(&Utc))
}

fn looks_like_iso_8601(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() > 10
        && bytes[..4].iter().all(u8::is_ascii_digit)
        && bytes[4] == b'-'
        && bytes[10] == b'T'
}

fn read_iso_8601(value: &str) -> Option<DateTime<Utc>> {
    if let Some(utc) = value.strip_suffix('Z') {
        return NaiveDateTime::parse_from_str(utc, ISO_8601_LOCAL)
            .ok()
            .map(|local| local.and_utc());
    }
    DateTime::parse_from_str(value, ISO_8601_ZONED)
        .map(|date| date.with_timezone(&Utc))
        .or_else(|_| NaiveDateTime::parse_from_str(value, ISO_8601_LOCAL).map(|local| local.and_utc()))
        .ok()
}

/// Drop a leading day name (`Sun,`, `Sunday,`, `Sun `) without checking it
/// against the date.
fn strip_weekday(value: &str) -> &str {
    let end = value
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(value.len());
    let word = value[..end].to_ascii_lowercase();
    let is_weekday = word.len() >= 3
        && WEEKDAYS
            .iter()
            .any(|day| *day == word || (word.len() == 3 && day.starts_with(&word)));
    if is_weekday {
        value[end..].trim_start_matches(|c: char| c == ',' || c.is_whitespace())
    } else {
        value
    }
}

/// Offset east of UTC in seconds for a zone designator.
fn zone_offset(zone: &str) -> Option<i32> {
    let hours = match zone.to_ascii_uppercase().as_str() {
        "GMT" | "UTC" | "UT" | "Z" => 0,
        "EDT" => -4,
        "EST" | "CDT" => -5,
        "CST" | "MDT" => -6,
        "MST" | "PDT" => -7,
        "PST" => -8,
        _ => return numeric_zone_offset(zone),
    };
    Some(hours * HOUR)
}

/// `+hhmm` or `+hh:mm`.
fn numeric_zone_offset(zone: &str) -> Option<i32> {
    let sign = match zone.as_bytes().first()? {
        b'+' => 1,
        b'-' => -1,
        _ => return None,
    };
    let digits: String = zone[1..].chars().filter(|c| *c != ':').collect();
    if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hours: i32 = digits[..2].parse().ok()?;
    let minutes: i32 = digits[2..].parse().ok()?;
    if minutes >= 60 {
        return None;
    }
    Some(sign * (hours * HOUR + minutes * 60))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn test_rfc_1123() {
        assert_eq!(
            read_date("Sun, 06 Nov 1994 08:49:37 GMT").unwrap(),
            utc(1994, 11, 6, 8, 49, 37)
        );
        assert_eq!(
            read_date("Wed, 9 Jun 2010 22:20:00 UTC").unwrap(),
            utc(2010, 6, 9, 22, 20, 0)
        );
        assert_eq!(
            read_date("Mon, 15 Aug 2005 15:52:01 +0000").unwrap(),
            utc(2005, 8, 15, 15, 52, 1)
        );
    }

    #[test]
    fn test_four_digit_early_year() {
        let date = read_date("Tue, 19 Nov 0082 16:14:55 GMT").unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (82, 11, 19));
    }

    #[test]
    fn test_rfc_850() {
        assert_eq!(
            read_date("Sunday, 06-Nov-94 08:49:37 GMT").unwrap(),
            utc(1994, 11, 6, 8, 49, 37)
        );
        assert_eq!(
            read_date("Monday, 15-Aug-2005 15:52:01 UTC").unwrap(),
            utc(2005, 8, 15, 15, 52, 1)
        );
        assert_eq!(
            read_date("Friday, 19-Nov-82 16:14:55 EST").unwrap(),
            utc(1982, 11, 19, 21, 14, 55)
        );
    }

    #[test]
    fn test_rfc_1036() {
        assert_eq!(
            read_date("Fri, 19 Nov 82 16:14:55 GMT").unwrap(),
            utc(1982, 11, 19, 16, 14, 55)
        );
        assert_eq!(
            read_date("Sat, 1 Jan 83 00:00:00 -0500").unwrap(),
            utc(1983, 1, 1, 5, 0, 0)
        );
        assert_eq!(
            read_date("Mon, 3 Jan 83 00:59:15 MST").unwrap(),
            utc(1983, 1, 3, 7, 59, 15)
        );
        assert_eq!(
            read_date("1 Oct 86 11:26:15 GMT").unwrap(),
            utc(1986, 10, 1, 11, 26, 15)
        );
    }

    #[test]
    fn test_ansi_c() {
        assert_eq!(
            read_date("Sun Nov  6 08:49:37 1994").unwrap(),
            utc(1994, 11, 6, 8, 49, 37)
        );
        assert_eq!(
            read_date("Mon Jan 1 00:00:00 1990").unwrap(),
            utc(1990, 1, 1, 0, 0, 0)
        );
    }

    #[test]
    fn test_rfc_2822_variants() {
        let expected = utc(2005, 9, 9, 20, 51, 39);
        assert_eq!(read_date("Fri, 09 Sep 2005 13:51:39 -0700").unwrap(), expected);
        assert_eq!(read_date("9 Sep 2005 13:51:39 -0700").unwrap(), expected);
        assert_eq!(
            read_date("Fri, 9 Sep 2005 13:51 -0700").unwrap(),
            utc(2005, 9, 9, 20, 51, 0)
        );
    }

    #[test]
    fn test_iso_8601() {
        assert_eq!(
            read_date("2011-10-05T14:48:00.000Z").unwrap(),
            utc(2011, 10, 5, 14, 48, 0)
        );
        assert_eq!(
            read_date("1996-12-19T16:39:57-08:00").unwrap(),
            utc(1996, 12, 20, 0, 39, 57)
        );
        assert_eq!(
            read_date("2005-08-15T15:52:01+0000").unwrap(),
            utc(2005, 8, 15, 15, 52, 1)
        );
        let fractional = read_date("1985-04-12T23:20:50.52Z").unwrap();
        assert_eq!(fractional.nanosecond(), 520_000_000);
        assert_eq!(
            read_date("0001-01-01T00:00:00").unwrap(),
            utc(1, 1, 1, 0, 0, 0)
        );
    }

    #[test]
    fn test_invalid_dates() {
        for bad in ["not-a-date", "", "Sun, 32 Nov 1994 08:49:37 GMT", "06 Nov 1994"] {
            assert!(matches!(read_date(bad), Err(HeaderError::InvalidDate(_))), "{bad}");
        }
    }

    #[test]
    fn test_format_date() {
        assert_eq!(
            format_date(&utc(1994, 11, 6, 8, 49, 37)),
            "Sun, 06 Nov 1994 08:49:37 GMT"
        );
        let now = Utc::now().with_nanosecond(0).unwrap();
        assert_eq!(read_date(&format_date(&now)).unwrap(), now);
    }
}
