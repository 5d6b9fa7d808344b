#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Uppercase `#RRGGBB`.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    fn normalized(self) -> (f64, f64, f64) {
        (
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        )
    }
}

/// Hue in degrees, saturation and lightness in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

/// Hue in degrees, saturation and value in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

/// All four components in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cmyk {
    pub c: f64,
    pub m: f64,
    pub y: f64,
    pub k: f64,
}

impl Hsl {
    pub fn rounded(self) -> [u16; 3] {
        [round_hue(self.h), round_percent(self.s), round_percent(self.l)]
    }
}

impl Hsv {
    pub fn rounded(self) -> [u16; 3] {
        [round_hue(self.h), round_percent(self.s), round_percent(self.v)]
    }
}

impl Cmyk {
    pub fn rounded(self) -> [u16; 4] {
        [
            round_percent(self.c),
            round_percent(self.m),
            round_percent(self.y),
            round_percent(self.k),
        ]
    }
}

fn round_hue(h: f64) -> u16 {
    (h.round() as u16) % 360
}

fn round_percent(value: f64) -> u16 {
    value.round().clamp(0.0, 100.0) as u16
}

fn to_channel(unit: f64) -> u8 {
    (unit * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Picks the unscaled `(r, g, b)` for the 60 degree sector `h` falls into.
fn sector_triple(h: f64, c: f64, x: f64) -> (f64, f64, f64) {
    if h < 60.0 {
        (c, x, 0.0)
    } else if h < 120.0 {
        (x, c, 0.0)
    } else if h < 180.0 {
        (0.0, c, x)
    } else if h < 240.0 {
        (0.0, x, c)
    } else if h < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    }
}

fn chroma_to_rgb(h: f64, c: f64, m: f64) -> Rgb {
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let (r, g, b) = sector_triple(h, c, x);
    Rgb::new(to_channel(r + m), to_channel(g + m), to_channel(b + m))
}

pub fn hsl_to_rgb(hsl: Hsl) -> Rgb {
    let s = hsl.s / 100.0;
    let l = hsl.l / 100.0;
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    chroma_to_rgb(hsl.h, c, l - c / 2.0)
}

pub fn hsv_to_rgb(hsv: Hsv) -> Rgb {
    let s = hsv.s / 100.0;
    let v = hsv.v / 100.0;
    let c = v * s;
    chroma_to_rgb(hsv.h, c, v - c)
}

pub fn cmyk_to_rgb(cmyk: Cmyk) -> Rgb {
    let k = cmyk.k / 100.0;
    let channel = |ink: f64| to_channel((1.0 - ink / 100.0) * (1.0 - k));
    Rgb::new(channel(cmyk.c), channel(cmyk.m), channel(cmyk.y))
}

fn hue(r: f64, g: f64, b: f64, max: f64, delta: f64) -> f64 {
    if delta == 0.0 {
        return 0.0;
    }
    let sextant = if max == r {
        (g - b) / delta + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };
    (sextant * 60.0).rem_euclid(360.0)
}

pub fn rgb_to_hsl(rgb: Rgb) -> Hsl {
    let (r, g, b) = rgb.normalized();
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    let l = (max + min) / 2.0;
    let s = if delta == 0.0 {
        0.0
    } else {
        delta / (1.0 - (2.0 * l - 1.0).abs())
    };
    Hsl {
        h: hue(r, g, b, max, delta),
        s: s * 100.0,
        l: l * 100.0,
    }
}

pub fn rgb_to_hsv(rgb: Rgb) -> Hsv {
    let (r, g, b) = rgb.normalized();
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    let s = if max == 0.0 { 0.0 } else { delta / max };
    Hsv {
        h: hue(r, g, b, max, delta),
        s: s * 100.0,
        v: max * 100.0,
    }
}

pub fn rgb_to_cmyk(rgb: Rgb) -> Cmyk {
    let (r, g, b) = rgb.normalized();
    let k = 1.0 - r.max(g).max(b);
    if k >= 1.0 {
        return Cmyk {
            c: 0.0,
            m: 0.0,
            y: 0.0,
            k: 100.0,
        };
    }
    let ink = |channel: f64| (1.0 - channel - k) / (1.0 - k) * 100.0;
    Cmyk {
        c: ink(r),
        m: ink(g),
        y: ink(b),
        k: k * 100.0,
    }
}
