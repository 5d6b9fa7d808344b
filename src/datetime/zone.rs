use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use super::error::{DateError, DateResult};

/// Zones offered as quick choices; any IANA name is accepted.
pub const COMMON_ZONES: &[(&str, &str)] = &[
    ("UTC", "UTC"),
    ("Asia/Ho_Chi_Minh", "Vietnam (UTC+7)"),
    ("Asia/Tokyo", "Tokyo (UTC+9)"),
    ("Europe/London", "London (UTC+0/+1)"),
    ("Europe/Paris", "Paris (UTC+1/+2)"),
    ("America/New_York", "New York (UTC-5/-4)"),
    ("America/Los_Angeles", "Los Angeles (UTC-8/-7)"),
    ("Australia/Sydney", "Sydney (UTC+10/+11)"),
];

pub fn resolve_zone(name: &str) -> DateResult<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| DateError::UnknownZone {
            zone: name.to_string(),
        })
}

/// Wall-clock rendering of `instant` in the named zone, 24-hour clock.
pub fn convert_zone(instant: DateTime<Utc>, target: &str) -> DateResult<String> {
    let zone = resolve_zone(target)?;
    Ok(instant
        .with_timezone(&zone)
        .format("%d/%m/%Y %H:%M:%S")
        .to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_common_zone_resolves() {
        for (name, _) in COMMON_ZONES {
            resolve_zone(name).expect("listed zone resolves");
        }
    }

    #[test]
    fn convert_zone_renders_wall_clock() {
        let instant = DateTime::parse_from_rfc3339("2023-07-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(
            convert_zone(instant, "Asia/Ho_Chi_Minh").unwrap(),
            "01/07/2023 19:00:00"
        );
        assert_eq!(
            convert_zone(instant, "Europe/London").unwrap(),
            "01/07/2023 13:00:00"
        );
    }

    #[test]
    fn unknown_zone_is_an_error() {
        let instant = Utc::now();
        assert!(matches!(
            convert_zone(instant, "Mars/Olympus"),
            Err(DateError::UnknownZone { .. })
        ));
    }
}
