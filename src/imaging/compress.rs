use std::path::Path;

use super::error::ImagingResult;
use super::format::TargetFormat;
use super::pipeline::{encode, resized, DecodedImage};
use crate::geometry::PixelSize;

pub const DEFAULT_MAX_BYTES: u64 = 1024 * 1024;
pub const DEFAULT_MAX_DIMENSION: u32 = 1920;

const START_QUALITY: u8 = 90;
const QUALITY_STEP: u8 = 10;
const MIN_QUALITY: u8 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressOptions {
    pub max_bytes: u64,
    pub max_dimension: u32,
}

impl Default for CompressOptions {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_BYTES,
            max_dimension: DEFAULT_MAX_DIMENSION,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedImage {
    pub bytes: Vec<u8>,
    pub size: PixelSize,
    pub quality: u8,
    pub original_bytes: u64,
}

impl CompressedImage {
    pub fn compressed_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Rounded percentage saved relative to the source; negative when the
    /// output grew.
    pub fn savings_percent(&self) -> i64 {
        if self.original_bytes == 0 {
            return 0;
        }
        let original = self.original_bytes as f64;
        ((original - self.compressed_bytes() as f64) / original * 100.0).round() as i64
    }

    pub fn file_name(&self, source_name: &str) -> String {
        let stem = Path::new(source_name)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .filter(|stem| !stem.is_empty())
            .unwrap_or("image");
        format!("compressed-{stem}.{}", TargetFormat::Jpeg.extension())
    }
}

/// Shrinks into `max_dimension` square, then steps JPEG quality down until
/// the output fits `max_bytes` or the quality floor is reached.
pub fn compress(decoded: &DecodedImage, options: &CompressOptions) -> ImagingResult<CompressedImage> {
    let bounds = PixelSize::new(options.max_dimension, options.max_dimension);
    let size = decoded.size().fit_within(bounds);
    let canvas = resized(decoded.pixels(), size);

    let mut quality = START_QUALITY;
    let mut bytes = encode(canvas.clone(), TargetFormat::Jpeg, quality)?;
    while bytes.len() as u64 > options.max_bytes && quality > MIN_QUALITY {
        quality -= QUALITY_STEP;
        bytes = encode(canvas.clone(), TargetFormat::Jpeg, quality)?;
    }

    tracing::debug!(
        quality,
        original = decoded.source_bytes(),
        compressed = bytes.len(),
        "compressed image"
    );
    Ok(CompressedImage {
        bytes,
        size,
        quality,
        original_bytes: decoded.source_bytes(),
    })
}
