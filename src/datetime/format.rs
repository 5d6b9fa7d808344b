use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, SecondsFormat, Timelike, Utc};
use chrono_tz::Tz;

const DAYS_BEFORE_ABSOLUTE: i64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputNotation {
    /// `2023-04-15T12:30:45.000Z`, always UTC.
    Iso,
    /// `DD/MM/YYYY`.
    Short,
    /// `15 April 2023, 12:30:45`.
    Long,
    /// `5 minutes ago`, relative to the context's "now".
    Relative,
    /// Whole seconds since the epoch.
    Unix,
    /// A template with `YYYY MM DD HH mm ss` tokens.
    Custom(String),
}

impl OutputNotation {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Iso => "iso",
            Self::Short => "short",
            Self::Long => "long",
            Self::Relative => "relative",
            Self::Unix => "unix",
            Self::Custom(_) => "custom",
        }
    }
}

impl fmt::Display for OutputNotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputNotation {
    type Err = String;

    /// Parses the fixed notations; `custom` starts with the default
    /// `DD/MM/YYYY HH:mm:ss` template.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "iso" => Ok(Self::Iso),
            "short" => Ok(Self::Short),
            "long" => Ok(Self::Long),
            "relative" => Ok(Self::Relative),
            "unix" => Ok(Self::Unix),
            "custom" => Ok(Self::Custom(DEFAULT_TEMPLATE.to_string())),
            other => Err(format!("unknown date output notation {other:?}")),
        }
    }
}

pub const DEFAULT_TEMPLATE: &str = "DD/MM/YYYY HH:mm:ss";

pub fn format(
    instant: DateTime<Utc>,
    notation: &OutputNotation,
    zone: Tz,
    now: DateTime<Utc>,
) -> String {
    let local = instant.with_timezone(&zone);
    match notation {
        OutputNotation::Iso => iso(instant),
        OutputNotation::Short => local.format("%d/%m/%Y").to_string(),
        OutputNotation::Long => local.format("%d %B %Y, %H:%M:%S").to_string(),
        OutputNotation::Relative => relative(instant, zone, now),
        OutputNotation::Unix => instant.timestamp().to_string(),
        OutputNotation::Custom(template) if template.is_empty() => iso(instant),
        OutputNotation::Custom(template) => apply_template(template, &local),
    }
}

pub fn iso(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Substitutes the first occurrence of each token, in the fixed order
/// `YYYY MM DD HH mm ss`. Repeated tokens keep their literal text.
pub fn apply_template(template: &str, local: &DateTime<Tz>) -> String {
    let substitutions = [
        ("YYYY", local.year().to_string()),
        ("MM", format!("{:02}", local.month())),
        ("DD", format!("{:02}", local.day())),
        ("HH", format!("{:02}", local.hour())),
        ("mm", format!("{:02}", local.minute())),
        ("ss", format!("{:02}", local.second())),
    ];
    substitutions
        .iter()
        .fold(template.to_string(), |text, (token, value)| {
            text.replacen(token, value, 1)
        })
}

fn relative(instant: DateTime<Utc>, zone: Tz, now: DateTime<Utc>) -> String {
    let diff_ms = (now - instant).num_milliseconds();
    let future = diff_ms < 0;
    let seconds = round_div(diff_ms.abs(), 1000);
    let minutes = round_div(seconds, 60);
    let hours = round_div(minutes, 60);
    let days = round_div(hours, 24);

    let (count, unit) = if seconds < 60 {
        (seconds, "second")
    } else if minutes < 60 {
        (minutes, "minute")
    } else if hours < 24 {
        (hours, "hour")
    } else if days < DAYS_BEFORE_ABSOLUTE {
        (days, "day")
    } else {
        let local = instant.with_timezone(&zone);
        return format!("{}/{}/{}", local.day(), local.month(), local.year());
    };

    let plural = if count == 1 { "" } else { "s" };
    if future {
        format!("in {count} {unit}{plural}")
    } else {
        format!("{count} {unit}{plural} ago")
    }
}

/// Rounds half up, matching `Math.round` for non-negative input.
fn round_div(value: i64, divisor: i64) -> i64 {
    (value + divisor / 2) / divisor
}
