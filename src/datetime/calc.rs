use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeDelta, Utc};
use chrono_tz::Tz;

use super::error::{DateError, DateResult};
use super::parse::resolve_local;

const MS_PER_SECOND: i64 = 1000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Years,
    Months,
    Days,
    Hours,
    Minutes,
    Seconds,
}

impl Unit {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Years => "years",
            Self::Months => "months",
            Self::Days => "days",
            Self::Hours => "hours",
            Self::Minutes => "minutes",
            Self::Seconds => "seconds",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Unit {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim().to_ascii_lowercase();
        let singular = value.strip_suffix('s').unwrap_or(&value);
        match singular {
            "year" => Ok(Self::Years),
            "month" => Ok(Self::Months),
            "day" => Ok(Self::Days),
            "hour" => Ok(Self::Hours),
            "minute" => Ok(Self::Minutes),
            "second" => Ok(Self::Seconds),
            _ => Err(format!("unknown time unit {value:?}")),
        }
    }
}

/// Adds `amount` of `unit` to the wall-clock fields of `base` in `zone`.
///
/// Month and year changes keep the day-of-month and let it overflow into the
/// following month, so Jan 31 plus one month lands on Mar 3 (Mar 2 in leap
/// years) rather than being clamped.
pub fn shift(base: DateTime<Utc>, amount: i64, unit: Unit, zone: Tz) -> DateResult<DateTime<Utc>> {
    let local = base.with_timezone(&zone).naive_local();
    let shifted = match unit {
        Unit::Years => add_months(local, amount.checked_mul(12).ok_or(DateError::OutOfRange)?),
        Unit::Months => add_months(local, amount),
        Unit::Days => TimeDelta::try_days(amount).and_then(|delta| local.checked_add_signed(delta)),
        Unit::Hours => {
            TimeDelta::try_hours(amount).and_then(|delta| local.checked_add_signed(delta))
        }
        Unit::Minutes => {
            TimeDelta::try_minutes(amount).and_then(|delta| local.checked_add_signed(delta))
        }
        Unit::Seconds => {
            TimeDelta::try_seconds(amount).and_then(|delta| local.checked_add_signed(delta))
        }
    }
    .ok_or(DateError::OutOfRange)?;

    tracing::debug!(%unit, amount, from = %local, to = %shifted, "shifted date");
    resolve_local(zone, shifted).ok_or(DateError::OutOfRange)
}

fn add_months(local: NaiveDateTime, months: i64) -> Option<NaiveDateTime> {
    let total = i64::from(local.year())
        .checked_mul(12)?
        .checked_add(i64::from(local.month0()))?
        .checked_add(months)?;
    let year = i32::try_from(total.div_euclid(12)).ok()?;
    let month0 = u32::try_from(total.rem_euclid(12)).ok()?;
    let first = NaiveDate::from_ymd_opt(year, month0 + 1, 1)?;
    let date = first.checked_add_signed(TimeDelta::try_days(i64::from(local.day0()))?)?;
    Some(date.and_time(local.time()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateDifference {
    pub total_ms: i64,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl fmt::Display for DateDifference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} days, {} hours, {} minutes, {} seconds",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

/// Absolute distance between two instants, split into whole units.
pub fn difference(start: DateTime<Utc>, end: DateTime<Utc>) -> DateDifference {
    let total_ms = (end - start).num_milliseconds().abs();
    DateDifference {
        total_ms,
        days: total_ms / MS_PER_DAY,
        hours: total_ms % MS_PER_DAY / MS_PER_HOUR,
        minutes: total_ms % MS_PER_HOUR / MS_PER_MINUTE,
        seconds: total_ms % MS_PER_MINUTE / MS_PER_SECOND,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(value: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(value)
            .expect("valid rfc3339")
            .with_timezone(&Utc)
    }

    #[test]
    fn difference_decomposes_into_units() {
        let diff = difference(utc("2023-01-01T00:00:00Z"), utc("2023-01-02T01:01:01Z"));
        assert_eq!((diff.days, diff.hours, diff.minutes, diff.seconds), (1, 1, 1, 1));
        assert_eq!(diff.total_ms, 90_061_000);
    }

    #[test]
    fn difference_is_absolute() {
        let forward = difference(utc("2023-01-01T00:00:00Z"), utc("2023-03-01T12:00:00Z"));
        let backward = difference(utc("2023-03-01T12:00:00Z"), utc("2023-01-01T00:00:00Z"));
        assert_eq!(forward, backward);
        assert_eq!(forward.days, 59);
        assert_eq!(forward.hours, 12);
    }

    #[test]
    fn month_overflow_rolls_into_following_month() {
        let base = utc("2023-01-31T10:00:00Z");
        assert_eq!(
            shift(base, 1, Unit::Months, Tz::UTC).unwrap(),
            utc("2023-03-03T10:00:00Z")
        );
        assert_eq!(
            shift(utc("2024-01-31T10:00:00Z"), 1, Unit::Months, Tz::UTC).unwrap(),
            utc("2024-03-02T10:00:00Z")
        );
    }

    #[test]
    fn leap_day_plus_one_year_rolls_to_march() {
        assert_eq!(
            shift(utc("2024-02-29T00:00:00Z"), 1, Unit::Years, Tz::UTC).unwrap(),
            utc("2025-03-01T00:00:00Z")
        );
    }

    #[test]
    fn negative_amounts_subtract() {
        let base = utc("2023-03-15T00:00:00Z");
        assert_eq!(
            shift(base, -3, Unit::Months, Tz::UTC).unwrap(),
            utc("2022-12-15T00:00:00Z")
        );
        assert_eq!(
            shift(base, -90, Unit::Minutes, Tz::UTC).unwrap(),
            utc("2023-03-14T22:30:00Z")
        );
    }

    #[test]
    fn day_shift_keeps_wall_clock_across_dst() {
        let base = utc("2023-03-11T17:00:00Z");
        let shifted = shift(base, 1, Unit::Days, Tz::America__New_York).unwrap();
        assert_eq!(shifted, utc("2023-03-12T16:00:00Z"));
    }

    #[test]
    fn unit_accepts_singular_and_plural() {
        assert_eq!("day".parse::<Unit>().unwrap(), Unit::Days);
        assert_eq!("Months".parse::<Unit>().unwrap(), Unit::Months);
        assert!("fortnight".parse::<Unit>().is_err());
    }

    #[test]
    fn overflow_is_reported() {
        let base = utc("2023-01-01T00:00:00Z");
        assert_eq!(
            shift(base, i64::MAX, Unit::Years, Tz::UTC),
            Err(DateError::OutOfRange)
        );
    }
}
