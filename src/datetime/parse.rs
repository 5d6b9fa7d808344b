use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;

use super::error::{DateError, DateResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputNotation {
    /// ISO-8601 / RFC 3339.
    #[default]
    Iso,
    /// `DD/MM/YYYY`, midnight in the display zone.
    Short,
    /// Whole seconds since the Unix epoch.
    Unix,
    /// Anything one of the known layouts accepts.
    Free,
}

impl InputNotation {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Iso => "iso",
            Self::Short => "short",
            Self::Unix => "unix",
            Self::Free => "free",
        }
    }

    /// Sample input shown when parsing fails.
    pub const fn placeholder(self) -> &'static str {
        match self {
            Self::Iso => "2023-04-15T12:30:45.000Z",
            Self::Short => "15/04/2023",
            Self::Unix => "1681561845",
            Self::Free => "15 April 2023 12:30",
        }
    }
}

impl fmt::Display for InputNotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InputNotation {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "iso" => Ok(Self::Iso),
            "short" => Ok(Self::Short),
            "unix" => Ok(Self::Unix),
            "free" => Ok(Self::Free),
            other => Err(format!("unknown date input notation {other:?}")),
        }
    }
}

const NAIVE_DATETIME_LAYOUTS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const FREE_DATETIME_LAYOUTS: &[&str] = &[
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%d %B %Y %H:%M:%S",
    "%d %B %Y %H:%M",
    "%B %d, %Y %H:%M:%S",
    "%B %d, %Y %H:%M",
];

const FREE_DATE_LAYOUTS: &[&str] = &["%Y/%m/%d", "%d %B %Y", "%d %b %Y", "%B %d, %Y", "%b %d, %Y"];

pub fn parse(input: &str, notation: InputNotation, zone: Tz) -> DateResult<DateTime<Utc>> {
    let value = input.trim();
    if value.is_empty() {
        return Err(DateError::EmptyInput);
    }

    let parsed = match notation {
        InputNotation::Iso => parse_iso(value, zone),
        InputNotation::Short => parse_short(value, zone),
        InputNotation::Unix => parse_unix(value),
        InputNotation::Free => parse_iso(value, zone)
            .or_else(|| parse_free(value, zone))
            .or_else(|| parse_short(value, zone)),
    };

    parsed.ok_or_else(|| DateError::InvalidDate {
        input: value.to_string(),
        example: notation.placeholder(),
    })
}

/// Offset-bearing timestamps are absolute; date-time without an offset is
/// local to `zone`; a bare date is UTC midnight.
fn parse_iso(value: &str, zone: Tz) -> Option<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Some(instant.with_timezone(&Utc));
    }
    if let Some(naive) = NAIVE_DATETIME_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(value, layout).ok())
    {
        return resolve_local(zone, naive);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(chrono::NaiveTime::MIN).and_utc())
}

fn parse_free(value: &str, zone: Tz) -> Option<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_rfc2822(value) {
        return Some(instant.with_timezone(&Utc));
    }
    if let Some(naive) = FREE_DATETIME_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(value, layout).ok())
    {
        return resolve_local(zone, naive);
    }
    FREE_DATE_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDate::parse_from_str(value, layout).ok())
        .and_then(|date| resolve_local(zone, date.and_time(chrono::NaiveTime::MIN)))
}

fn parse_short(value: &str, zone: Tz) -> Option<DateTime<Utc>> {
    let mut parts = value.split('/').map(str::trim);
    let (Some(day), Some(month), Some(year), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return None;
    };
    let date = NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)?;
    resolve_local(zone, date.and_time(chrono::NaiveTime::MIN))
}

fn parse_unix(value: &str) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(value.parse().ok()?, 0)
}

/// Maps a wall-clock time in `zone` to an instant. Ambiguous times take the
/// earlier instant; times skipped by a forward transition move past the gap.
pub(crate) fn resolve_local(zone: Tz, naive: NaiveDateTime) -> Option<DateTime<Utc>> {
    if let Some(local) = zone.from_local_datetime(&naive).earliest() {
        return Some(local.with_timezone(&Utc));
    }
    let shifted = naive.checked_add_signed(TimeDelta::hours(1))?;
    zone.from_local_datetime(&shifted)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
}
