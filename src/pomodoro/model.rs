use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    Running,
    Paused,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Work,
    ShortBreak,
    LongBreak,
}

impl Phase {
    pub const ALL: [Self; 3] = [Self::Work, Self::ShortBreak, Self::LongBreak];

    pub const fn id(self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::ShortBreak => "short-break",
            Self::LongBreak => "long-break",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Work => "Work",
            Self::ShortBreak => "Short break",
            Self::LongBreak => "Long break",
        }
    }

    pub const fn is_break(self) -> bool {
        !matches!(self, Self::Work)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Phase {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "work" => Ok(Self::Work),
            "short-break" | "shortbreak" | "short" => Ok(Self::ShortBreak),
            "long-break" | "longbreak" | "long" => Ok(Self::LongBreak),
            _ => Err(format!(
                "unknown phase {value:?}, expected work, short-break or long-break"
            )),
        }
    }
}

/// `MM:SS`; minutes are not wrapped into hours.
pub fn format_clock(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_pads_minutes_and_seconds() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(25 * 60), "25:00");
        assert_eq!(format_clock(61), "01:01");
        assert_eq!(format_clock(100 * 60 + 5), "100:05");
    }

    #[test]
    fn phases_parse_from_ids_and_aliases() {
        for phase in Phase::ALL {
            assert_eq!(phase.id().parse::<Phase>(), Ok(phase));
        }
        assert_eq!("LONG_BREAK".parse::<Phase>(), Ok(Phase::LongBreak));
        assert!("lunch".parse::<Phase>().is_err());
    }
}
