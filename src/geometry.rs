/// Pixel dimensions and aspect-preserving fit math used by the imaging tools.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

impl PixelSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn aspect_ratio(self) -> f64 {
        f64::from(self.width) / f64::from(self.height.max(1))
    }

    /// Largest size with this aspect ratio inside `bounds`. Sizes already
    /// inside `bounds` are returned unchanged.
    pub fn fit_within(self, bounds: PixelSize) -> PixelSize {
        if self.width <= bounds.width && self.height <= bounds.height {
            return self;
        }
        let ratio = self.aspect_ratio();
        let width_scale = f64::from(self.width) / f64::from(bounds.width.max(1));
        let height_scale = f64::from(self.height) / f64::from(bounds.height.max(1));
        if width_scale > height_scale {
            PixelSize::new(bounds.width, scaled(f64::from(bounds.width) / ratio))
        } else {
            PixelSize::new(scaled(f64::from(bounds.height) * ratio), bounds.height)
        }
    }

    /// Size with this aspect ratio constrained by `bounds`, growing or
    /// shrinking as needed. Whichever axis would overshoot becomes binding.
    pub fn scale_into(self, bounds: PixelSize) -> PixelSize {
        let ratio = self.aspect_ratio();
        let target_ratio = f64::from(bounds.width) / f64::from(bounds.height.max(1));
        if target_ratio > ratio {
            PixelSize::new(scaled(f64::from(bounds.height) * ratio), bounds.height)
        } else {
            PixelSize::new(bounds.width, scaled(f64::from(bounds.width) / ratio))
        }
    }

    pub fn with_width(self, width: u32) -> PixelSize {
        PixelSize::new(width, scaled(f64::from(width) / self.aspect_ratio()))
    }

    pub fn with_height(self, height: u32) -> PixelSize {
        PixelSize::new(scaled(f64::from(height) * self.aspect_ratio()), height)
    }
}

fn scaled(value: f64) -> u32 {
    value.round().clamp(1.0, f64::from(u32::MAX)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_within_leaves_small_images_alone() {
        let size = PixelSize::new(600, 400);
        assert_eq!(size.fit_within(PixelSize::new(640, 480)), size);
    }

    #[test]
    fn fit_within_binds_the_overshooting_axis() {
        let wide = PixelSize::new(4000, 1000);
        assert_eq!(
            wide.fit_within(PixelSize::new(1920, 1080)),
            PixelSize::new(1920, 480)
        );
        let tall = PixelSize::new(1000, 3000);
        assert_eq!(
            tall.fit_within(PixelSize::new(1280, 720)),
            PixelSize::new(240, 720)
        );
    }

    #[test]
    fn scale_into_can_enlarge() {
        let size = PixelSize::new(100, 50);
        assert_eq!(
            size.scale_into(PixelSize::new(800, 600)),
            PixelSize::new(800, 400)
        );
        assert_eq!(
            size.scale_into(PixelSize::new(800, 200)),
            PixelSize::new(400, 200)
        );
    }

    #[test]
    fn single_axis_follows_ratio() {
        let size = PixelSize::new(1600, 900);
        assert_eq!(size.with_width(800), PixelSize::new(800, 450));
        assert_eq!(size.with_height(90), PixelSize::new(160, 90));
    }
}
