use std::fmt;
use std::str::FromStr;

use crate::geometry::PixelSize;

pub const SMALL_BOUNDS: PixelSize = PixelSize::new(640, 480);
pub const MEDIUM_BOUNDS: PixelSize = PixelSize::new(1280, 720);
pub const LARGE_BOUNDS: PixelSize = PixelSize::new(1920, 1080);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizeOption {
    #[default]
    Original,
    Small,
    Medium,
    Large,
    /// A zero axis means "unspecified".
    Custom {
        width: u32,
        height: u32,
        keep_aspect: bool,
    },
}

impl ResizeOption {
    pub fn target_size(self, original: PixelSize) -> PixelSize {
        match self {
            Self::Original => original,
            Self::Small => original.fit_within(SMALL_BOUNDS),
            Self::Medium => original.fit_within(MEDIUM_BOUNDS),
            Self::Large => original.fit_within(LARGE_BOUNDS),
            Self::Custom {
                width,
                height,
                keep_aspect: true,
            } => match (width, height) {
                (0, 0) => original,
                (width, 0) => original.with_width(width),
                (0, height) => original.with_height(height),
                (width, height) => original.scale_into(PixelSize::new(width, height)),
            },
            Self::Custom {
                width,
                height,
                keep_aspect: false,
            } => PixelSize::new(
                if width == 0 { original.width } else { width },
                if height == 0 { original.height } else { height },
            ),
        }
    }
}

impl fmt::Display for ResizeOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Original => f.write_str("original"),
            Self::Small => f.write_str("small"),
            Self::Medium => f.write_str("medium"),
            Self::Large => f.write_str("large"),
            Self::Custom {
                width,
                height,
                keep_aspect,
            } => {
                let lock = if *keep_aspect { "" } else { "!" };
                write!(f, "{width}x{height}{lock}")
            }
        }
    }
}

impl FromStr for ResizeOption {
    type Err = String;

    /// Accepts the preset names or `WxH`; a trailing `!` disables the
    /// aspect lock.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim().to_ascii_lowercase();
        match value.as_str() {
            "original" => return Ok(Self::Original),
            "small" => return Ok(Self::Small),
            "medium" => return Ok(Self::Medium),
            "large" => return Ok(Self::Large),
            _ => {}
        }

        let (dimensions, keep_aspect) = match value.strip_suffix('!') {
            Some(rest) => (rest, false),
            None => (value.as_str(), true),
        };
        let (width, height) = dimensions
            .split_once('x')
            .ok_or_else(|| format!("invalid size {value:?}, expected WxH"))?;
        let axis = |text: &str| -> Result<u32, String> {
            if text.is_empty() {
                return Ok(0);
            }
            text.parse()
                .map_err(|_| format!("invalid size {value:?}, expected WxH"))
        };
        Ok(Self::Custom {
            width: axis(width)?,
            height: axis(height)?,
            keep_aspect,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_shrink_only_when_needed() {
        let original = PixelSize::new(3000, 2000);
        assert_eq!(
            ResizeOption::Small.target_size(original),
            PixelSize::new(640, 427)
        );
        assert_eq!(
            ResizeOption::Large.target_size(PixelSize::new(800, 600)),
            PixelSize::new(800, 600)
        );
    }

    #[test]
    fn custom_with_aspect_lock_picks_binding_axis() {
        let original = PixelSize::new(1600, 900);
        let option: ResizeOption = "800x800".parse().unwrap();
        assert_eq!(option.target_size(original), PixelSize::new(800, 450));
        let option: ResizeOption = "x300".parse().unwrap();
        assert_eq!(option.target_size(original), PixelSize::new(533, 300));
    }

    #[test]
    fn custom_without_aspect_lock_stretches() {
        let option: ResizeOption = "800x800!".parse().unwrap();
        assert_eq!(
            option.target_size(PixelSize::new(1600, 900)),
            PixelSize::new(800, 800)
        );
        let option: ResizeOption = "0x100!".parse().unwrap();
        assert_eq!(
            option.target_size(PixelSize::new(1600, 900)),
            PixelSize::new(1600, 100)
        );
    }

    #[test]
    fn invalid_sizes_are_rejected() {
        assert!("huge".parse::<ResizeOption>().is_err());
        assert!("10xten".parse::<ResizeOption>().is_err());
    }
}
