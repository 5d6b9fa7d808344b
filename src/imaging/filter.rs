use std::fmt;
use std::str::FromStr;

use image::{imageops, RgbaImage};

const BLUR_SIGMA: f32 = 5.0;

const SEPIA: [[f32; 3]; 3] = [
    [0.393, 0.769, 0.189],
    [0.349, 0.686, 0.168],
    [0.272, 0.534, 0.131],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelFilter {
    #[default]
    None,
    Grayscale,
    Sepia,
    Invert,
    Blur,
}

impl PixelFilter {
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Grayscale => "grayscale",
            Self::Sepia => "sepia",
            Self::Invert => "invert",
            Self::Blur => "blur",
        }
    }

    /// Rewrites `image` in place. Alpha is never touched.
    pub fn apply(self, image: &mut RgbaImage) {
        match self {
            Self::None => {}
            Self::Grayscale => map_rgb(image, |[r, g, b]| {
                let average = to_channel((r + g + b) / 3.0);
                [average; 3]
            }),
            Self::Sepia => map_rgb(image, |rgb| {
                SEPIA.map(|row| to_channel(row[0] * rgb[0] + row[1] * rgb[1] + row[2] * rgb[2]))
            }),
            Self::Invert => map_rgb(image, |rgb| rgb.map(|channel| to_channel(255.0 - channel))),
            Self::Blur => *image = imageops::blur(&*image, BLUR_SIGMA),
        }
    }
}

fn map_rgb<F>(image: &mut RgbaImage, mut transform: F)
where
    F: FnMut([f32; 3]) -> [u8; 3],
{
    for pixel in image.pixels_mut() {
        let [r, g, b, _] = pixel.0;
        let [nr, ng, nb] = transform([f32::from(r), f32::from(g), f32::from(b)]);
        pixel.0[0] = nr;
        pixel.0[1] = ng;
        pixel.0[2] = nb;
    }
}

fn to_channel(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

impl fmt::Display for PixelFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PixelFilter {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "grayscale" | "greyscale" => Ok(Self::Grayscale),
            "sepia" => Ok(Self::Sepia),
            "invert" => Ok(Self::Invert),
            "blur" => Ok(Self::Blur),
            other => Err(format!("unknown filter {other:?}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn single(pixel: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(1, 1, Rgba(pixel))
    }

    #[test]
    fn grayscale_averages_channels_and_keeps_alpha() {
        let mut image = single([10, 20, 60, 128]);
        PixelFilter::Grayscale.apply(&mut image);
        assert_eq!(image.get_pixel(0, 0).0, [30, 30, 30, 128]);
    }

    #[test]
    fn sepia_clamps_to_white() {
        let mut image = single([255, 255, 255, 255]);
        PixelFilter::Sepia.apply(&mut image);
        assert_eq!(image.get_pixel(0, 0).0, [255, 255, 239, 255]);
    }

    #[test]
    fn invert_flips_channels() {
        let mut image = single([0, 100, 255, 7]);
        PixelFilter::Invert.apply(&mut image);
        assert_eq!(image.get_pixel(0, 0).0, [255, 155, 0, 7]);
    }

    #[test]
    fn blur_preserves_dimensions() {
        let mut image = RgbaImage::from_pixel(40, 30, Rgba([200, 10, 10, 255]));
        PixelFilter::Blur.apply(&mut image);
        assert_eq!(image.dimensions(), (40, 30));
    }

    #[test]
    fn none_is_identity() {
        let mut image = single([1, 2, 3, 4]);
        PixelFilter::None.apply(&mut image);
        assert_eq!(image.get_pixel(0, 0).0, [1, 2, 3, 4]);
    }
}
