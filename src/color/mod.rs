pub mod error;
pub mod notation;
pub mod space;

pub use error::{ColorError, ColorResult};
pub use notation::{parse, Notation, ParsedColor};
pub use space::{Cmyk, Hsl, Hsv, Rgb};

/// One color shown in all five notations, rounded for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorValues {
    pub hex: String,
    pub rgb: Rgb,
    pub hsl: [u16; 3],
    pub cmyk: [u16; 4],
    pub hsv: [u16; 3],
}

impl ColorValues {
    pub fn from_rgb(rgb: Rgb) -> Self {
        Self {
            hex: rgb.to_hex(),
            rgb,
            hsl: space::rgb_to_hsl(rgb).rounded(),
            cmyk: space::rgb_to_cmyk(rgb).rounded(),
            hsv: space::rgb_to_hsv(rgb).rounded(),
        }
    }

    /// CSS-like text for one notation, suitable for pasting back as input.
    pub fn render(&self, notation: Notation) -> String {
        match notation {
            Notation::Hex => self.hex.clone(),
            Notation::Rgb => {
                let [r, g, b] = self.rgb.channels();
                format!("rgb({r}, {g}, {b})")
            }
            Notation::Hsl => {
                let [h, s, l] = self.hsl;
                format!("hsl({h}, {s}%, {l}%)")
            }
            Notation::Cmyk => {
                let [c, m, y, k] = self.cmyk;
                format!("cmyk({c}%, {m}%, {y}%, {k}%)")
            }
            Notation::Hsv => {
                let [h, s, v] = self.hsv;
                format!("hsv({h}, {s}%, {v}%)")
            }
        }
    }
}

impl ParsedColor {
    pub fn to_rgb(self) -> Rgb {
        match self {
            Self::Hex(rgb) | Self::Rgb(rgb) => rgb,
            Self::Hsl(hsl) => space::hsl_to_rgb(hsl),
            Self::Cmyk(cmyk) => space::cmyk_to_rgb(cmyk),
            Self::Hsv(hsv) => space::hsv_to_rgb(hsv),
        }
    }
}

pub fn convert(input: &str, notation: Notation) -> ColorResult<ColorValues> {
    let parsed = parse(input, notation)?;
    let rgb = parsed.to_rgb();
    tracing::debug!(%notation, ?rgb, "converted color");
    Ok(ColorValues::from_rgb(rgb))
}
