pub mod calc;
pub mod error;
pub mod format;
pub mod parse;
pub mod zone;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

pub use calc::{difference, shift, DateDifference, Unit};
pub use error::{DateError, DateResult};
pub use format::{OutputNotation, DEFAULT_TEMPLATE};
pub use parse::InputNotation;
pub use zone::{convert_zone, resolve_zone, COMMON_ZONES};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateContext {
    pub zone: Tz,
    pub now: DateTime<Utc>,
}

impl DateContext {
    pub fn new(zone: Tz, now: DateTime<Utc>) -> Self {
        Self { zone, now }
    }

    pub fn current(zone: Tz) -> Self {
        Self::new(zone, Utc::now())
    }

    pub fn parse(&self, input: &str, notation: InputNotation) -> DateResult<DateTime<Utc>> {
        parse::parse(input, notation, self.zone)
    }

    pub fn format(&self, instant: DateTime<Utc>, notation: &OutputNotation) -> String {
        format::format(instant, notation, self.zone, self.now)
    }

    /// Parses `input` in one notation and renders it in another.
    pub fn convert(
        &self,
        input: &str,
        from: InputNotation,
        to: &OutputNotation,
    ) -> DateResult<String> {
        let instant = self.parse(input, from)?;
        tracing::debug!(%from, %to, %instant, "converting date");
        Ok(self.format(instant, to))
    }

    /// Free-form base date shifted by `amount` units; negative subtracts.
    pub fn shift(&self, base: &str, amount: i64, unit: Unit) -> DateResult<DateTime<Utc>> {
        let instant = self.parse(base, InputNotation::Free)?;
        calc::shift(instant, amount, unit, self.zone)
    }

    pub fn difference(&self, start: &str, end: &str) -> DateResult<DateDifference> {
        let start = self.parse(start, InputNotation::Free)?;
        let end = self.parse(end, InputNotation::Free)?;
        Ok(calc::difference(start, end))
    }

    pub fn convert_zone(&self, input: &str, target: &str) -> DateResult<String> {
        let instant = self.parse(input, InputNotation::Free)?;
        zone::convert_zone(instant, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> DateContext {
        let now = DateTime::parse_from_rfc3339("2023-04-15T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        DateContext::new(Tz::UTC, now)
    }

    #[test]
    fn convert_chains_parse_and_format() {
        let ctx = context();
        assert_eq!(
            ctx.convert("1681561845", InputNotation::Unix, &OutputNotation::Iso)
                .unwrap(),
            "2023-04-15T12:30:45.000Z"
        );
        assert_eq!(
            ctx.convert("15/04/2023", InputNotation::Short, &OutputNotation::Unix)
                .unwrap(),
            "1681516800"
        );
    }

    #[test]
    fn difference_reports_days_and_clock_parts() {
        let diff = context()
            .difference("2023-01-01T00:00:00Z", "2023-01-02T01:01:01Z")
            .unwrap();
        assert_eq!((diff.days, diff.hours, diff.minutes, diff.seconds), (1, 1, 1, 1));
    }

    #[test]
    fn invalid_inputs_surface_invalid_date() {
        let ctx = context();
        assert!(matches!(
            ctx.convert("not a date", InputNotation::Iso, &OutputNotation::Iso),
            Err(DateError::InvalidDate { .. })
        ));
        assert!(matches!(
            ctx.difference("2023-01-01", "soon"),
            Err(DateError::InvalidDate { .. })
        ));
    }

    #[test]
    fn shift_parses_free_form_base() {
        let shifted = context().shift("2023-01-31", 1, Unit::Days).unwrap();
        assert_eq!(format::iso(shifted), "2023-02-01T00:00:00.000Z");
    }
}
