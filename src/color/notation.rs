use std::fmt;
use std::num::IntErrorKind;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use super::error::{ColorError, ColorResult};
use super::space::{Cmyk, Hsl, Hsv, Rgb};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notation {
    Hex,
    Rgb,
    Hsl,
    Cmyk,
    Hsv,
}

impl Notation {
    pub const ALL: [Notation; 5] = [
        Notation::Hex,
        Notation::Rgb,
        Notation::Hsl,
        Notation::Cmyk,
        Notation::Hsv,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Hex => "hex",
            Self::Rgb => "rgb",
            Self::Hsl => "hsl",
            Self::Cmyk => "cmyk",
            Self::Hsv => "hsv",
        }
    }

    pub const fn example(self) -> &'static str {
        match self {
            Self::Hex => "#FF0000 or #F00",
            Self::Rgb => "rgb(255, 0, 0) or 255, 0, 0",
            Self::Hsl => "hsl(360, 100%, 50%) or 360, 100, 50",
            Self::Cmyk => "cmyk(100%, 0%, 0%, 0%) or 100, 0, 0, 0",
            Self::Hsv => "hsv(360, 100%, 100%) or 360, 100, 100",
        }
    }
}

impl fmt::Display for Notation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Notation {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|notation| notation.name().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| format!("unknown color notation {value:?}"))
    }
}

/// A validated color literal, still in the notation it was written in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParsedColor {
    Hex(Rgb),
    Rgb(Rgb),
    Hsl(Hsl),
    Cmyk(Cmyk),
    Hsv(Hsv),
}

impl ParsedColor {
    pub const fn notation(&self) -> Notation {
        match self {
            Self::Hex(_) => Notation::Hex,
            Self::Rgb(_) => Notation::Rgb,
            Self::Hsl(_) => Notation::Hsl,
            Self::Cmyk(_) => Notation::Cmyk,
            Self::Hsv(_) => Notation::Hsv,
        }
    }
}

static HEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?i)#?([0-9a-f]{3}|[0-9a-f]{6})$").expect("valid hex regex"));
static RGB_FN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i)rgb\(\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)\s*\)$").expect("valid rgb regex")
});
static HSL_FN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i)hsl\(\s*(\d+)\s*,\s*(\d+)%?\s*,\s*(\d+)%?\s*\)$").expect("valid hsl regex")
});
static HSV_FN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i)hsv\(\s*(\d+)\s*,\s*(\d+)%?\s*,\s*(\d+)%?\s*\)$").expect("valid hsv regex")
});
static CMYK_FN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i)cmyk\(\s*(\d+)%?\s*,\s*(\d+)%?\s*,\s*(\d+)%?\s*,\s*(\d+)%?\s*\)$")
        .expect("valid cmyk regex")
});

pub fn parse(input: &str, notation: Notation) -> ColorResult<ParsedColor> {
    let value = input.trim();
    match notation {
        Notation::Hex => parse_hex(value).map(ParsedColor::Hex),
        Notation::Rgb => {
            let [r, g, b] = components(value, notation, &RGB_FN, false)?;
            Ok(ParsedColor::Rgb(Rgb::new(
                channel("r", r)?,
                channel("g", g)?,
                channel("b", b)?,
            )))
        }
        Notation::Hsl => {
            let [h, s, l] = components(value, notation, &HSL_FN, true)?;
            Ok(ParsedColor::Hsl(Hsl {
                h: bounded("h", h, 360)?,
                s: bounded("s", s, 100)?,
                l: bounded("l", l, 100)?,
            }))
        }
        Notation::Hsv => {
            let [h, s, v] = components(value, notation, &HSV_FN, true)?;
            Ok(ParsedColor::Hsv(Hsv {
                h: bounded("h", h, 360)?,
                s: bounded("s", s, 100)?,
                v: bounded("v", v, 100)?,
            }))
        }
        Notation::Cmyk => {
            let [c, m, y, k] = components(value, notation, &CMYK_FN, true)?;
            Ok(ParsedColor::Cmyk(Cmyk {
                c: bounded("c", c, 100)?,
                m: bounded("m", m, 100)?,
                y: bounded("y", y, 100)?,
                k: bounded("k", k, 100)?,
            }))
        }
    }
}

fn parse_hex(value: &str) -> ColorResult<Rgb> {
    let digits = HEX
        .captures(value)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| invalid(Notation::Hex, value))?;

    let expanded: String = if digits.len() == 3 {
        digits.chars().flat_map(|digit| [digit, digit]).collect()
    } else {
        digits.to_string()
    };
    let pair = |index: usize| {
        u8::from_str_radix(&expanded[index..index + 2], 16).map_err(|_| invalid(Notation::Hex, value))
    };
    Ok(Rgb::new(pair(0)?, pair(2)?, pair(4)?))
}

/// Extracts `N` integers from either the functional form (`rgb(...)`) or a
/// bare comma-separated list.
fn components<const N: usize>(
    value: &str,
    notation: Notation,
    functional: &Regex,
    allow_percent: bool,
) -> ColorResult<[i64; N]> {
    let raw: Vec<&str> = if value
        .get(..notation.name().len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(notation.name()))
    {
        let caps = functional
            .captures(value)
            .ok_or_else(|| invalid(notation, value))?;
        caps.iter()
            .skip(1)
            .flatten()
            .map(|m| m.as_str())
            .collect()
    } else {
        value
            .split(',')
            .map(|part| {
                let part = part.trim();
                if allow_percent {
                    part.strip_suffix('%').unwrap_or(part).trim_end()
                } else {
                    part
                }
            })
            .collect()
    };

    if raw.len() != N {
        return Err(invalid(notation, value));
    }

    let mut parsed = [0_i64; N];
    for (slot, text) in parsed.iter_mut().zip(raw) {
        // Oversized digits still fail the bounds check rather than the shape check.
        *slot = match text.parse::<i64>() {
            Ok(number) => number,
            Err(err) => match err.kind() {
                IntErrorKind::PosOverflow => i64::MAX,
                IntErrorKind::NegOverflow => i64::MIN,
                _ => return Err(invalid(notation, value)),
            },
        };
    }
    Ok(parsed)
}

fn channel(component: &'static str, value: i64) -> ColorResult<u8> {
    u8::try_from(value).map_err(|_| ColorError::OutOfRange {
        component,
        value,
        min: 0,
        max: 255,
    })
}

fn bounded(component: &'static str, value: i64, max: i64) -> ColorResult<f64> {
    if !(0..=max).contains(&value) {
        return Err(ColorError::OutOfRange {
            component,
            value,
            min: 0,
            max,
        });
    }
    Ok(value as f64)
}

fn invalid(notation: Notation, value: &str) -> ColorError {
    ColorError::InvalidFormat {
        notation,
        input: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_accepts_short_long_and_missing_hash() {
        assert_eq!(
            parse("#3B82F6", Notation::Hex).unwrap(),
            ParsedColor::Hex(Rgb::new(59, 130, 246))
        );
        assert_eq!(
            parse("3b82f6", Notation::Hex).unwrap(),
            ParsedColor::Hex(Rgb::new(59, 130, 246))
        );
        assert_eq!(
            parse("#f0a", Notation::Hex).unwrap(),
            ParsedColor::Hex(Rgb::new(255, 0, 170))
        );
    }

    #[test]
    fn hex_rejects_wrong_shapes() {
        for input in ["#12345", "#GGGGGG", "", "#1234567"] {
            let err = parse(input, Notation::Hex).expect_err("should reject");
            assert!(matches!(
                err,
                ColorError::InvalidFormat {
                    notation: Notation::Hex,
                    ..
                }
            ));
        }
    }

    #[test]
    fn rgb_accepts_functional_and_bare_forms() {
        let expected = ParsedColor::Rgb(Rgb::new(255, 10, 0));
        assert_eq!(parse("rgb(255, 10, 0)", Notation::Rgb).unwrap(), expected);
        assert_eq!(parse("RGB(255,10,0)", Notation::Rgb).unwrap(), expected);
        assert_eq!(parse(" 255 , 10 , 0 ", Notation::Rgb).unwrap(), expected);
    }

    #[test]
    fn rgb_reports_out_of_range_component() {
        let err = parse("256, 0, 0", Notation::Rgb).expect_err("256 is out of range");
        assert!(matches!(
            err,
            ColorError::OutOfRange {
                component: "r",
                value: 256,
                ..
            }
        ));
        let err = parse("0, -1, 0", Notation::Rgb).expect_err("negative is out of range");
        assert!(matches!(err, ColorError::OutOfRange { component: "g", .. }));
    }

    #[test]
    fn oversized_components_are_out_of_range() {
        let err = parse("99999999999999999999, 0, 0", Notation::Rgb).expect_err("too large");
        assert!(matches!(
            err,
            ColorError::OutOfRange {
                component: "r",
                max: 255,
                ..
            }
        ));
        let err = parse("hsl(0, 100%, 99999999999999999999%)", Notation::Hsl).expect_err("too large");
        assert!(matches!(
            err,
            ColorError::OutOfRange {
                component: "l",
                max: 100,
                ..
            }
        ));
    }

    #[test]
    fn rgb_rejects_wrong_arity_and_garbage() {
        assert!(matches!(
            parse("1, 2", Notation::Rgb),
            Err(ColorError::InvalidFormat { .. })
        ));
        assert!(matches!(
            parse("rgb(1, 2, x)", Notation::Rgb),
            Err(ColorError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn percent_signs_are_optional_for_hsl_hsv_and_cmyk() {
        let hsl = parse("hsl(217, 91%, 60%)", Notation::Hsl).unwrap();
        assert_eq!(hsl, parse("217, 91, 60", Notation::Hsl).unwrap());
        assert_eq!(hsl, parse("217, 91%, 60%", Notation::Hsl).unwrap());

        let cmyk = parse("cmyk(76%, 47%, 0%, 4%)", Notation::Cmyk).unwrap();
        assert_eq!(cmyk, parse("76, 47, 0, 4", Notation::Cmyk).unwrap());

        let hsv = parse("hsv(217, 76, 96)", Notation::Hsv).unwrap();
        assert_eq!(hsv.notation(), Notation::Hsv);
    }

    #[test]
    fn hue_and_percent_bounds_are_enforced() {
        assert!(matches!(
            parse("361, 50, 50", Notation::Hsl),
            Err(ColorError::OutOfRange { component: "h", .. })
        ));
        assert!(matches!(
            parse("hsv(10, 101%, 50%)", Notation::Hsv),
            Err(ColorError::OutOfRange { component: "s", .. })
        ));
        assert!(matches!(
            parse("0, 0, 0, 101", Notation::Cmyk),
            Err(ColorError::OutOfRange { component: "k", .. })
        ));
    }

    #[test]
    fn notation_parses_case_insensitively() {
        assert_eq!("CMYK".parse::<Notation>().unwrap(), Notation::Cmyk);
        assert!("lab".parse::<Notation>().is_err());
    }
}
