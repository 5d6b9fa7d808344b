use std::io::Cursor;
use std::path::Path;
use std::sync::mpsc;

use image::codecs::jpeg::JpegEncoder;
use image::{imageops, DynamicImage, ImageFormat, RgbaImage};

use super::error::{ImagingError, ImagingResult};
use super::filter::PixelFilter;
use super::format::{TargetFormat, DEFAULT_QUALITY};
use super::resize::ResizeOption;
use crate::geometry::PixelSize;

/// Output of the decode stage. Rendering is only reachable through this
/// type, so encoding can never start before decoding has finished.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pixels: RgbaImage,
    source_format: Option<ImageFormat>,
    source_bytes: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub format: TargetFormat,
    pub quality: u8,
    pub resize: ResizeOption,
    pub filter: PixelFilter,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            format: TargetFormat::Webp,
            quality: DEFAULT_QUALITY,
            resize: ResizeOption::Original,
            filter: PixelFilter::None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub bytes: Vec<u8>,
    pub format: TargetFormat,
    pub size: PixelSize,
}

impl EncodedImage {
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    /// `<stem>.<ext>` for the given source file name.
    pub fn file_name(&self, source_name: &str) -> String {
        let stem = Path::new(source_name)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .filter(|stem| !stem.is_empty())
            .unwrap_or("image");
        format!("{stem}.{}", self.format.extension())
    }
}

/// Stage 1: decode raw bytes. A MIME type, when known, pins the decoder;
/// otherwise the container is sniffed from the bytes.
pub fn decode(bytes: &[u8], mime_type: Option<&str>) -> ImagingResult<DecodedImage> {
    let declared = match mime_type {
        Some(mime) => Some(ImageFormat::from_mime_type(mime).ok_or_else(|| {
            ImagingError::UnsupportedFormat {
                name: mime.to_string(),
            }
        })?),
        None => None,
    };
    let source_format = declared.or_else(|| image::guess_format(bytes).ok());
    let image = match source_format {
        Some(format) => image::load_from_memory_with_format(bytes, format),
        None => image::load_from_memory(bytes),
    }
    .map_err(|source| ImagingError::Decode { source })?;

    let pixels = image.to_rgba8();
    if pixels.width() == 0 || pixels.height() == 0 {
        return Err(ImagingError::EmptyImage);
    }
    tracing::debug!(
        width = pixels.width(),
        height = pixels.height(),
        ?source_format,
        "decoded image"
    );
    Ok(DecodedImage {
        pixels,
        source_format,
        source_bytes: bytes.len() as u64,
    })
}

pub fn decode_file(path: &Path) -> ImagingResult<DecodedImage> {
    let bytes = std::fs::read(path).map_err(|source| ImagingError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    decode(&bytes, None)
}

/// A decode running on a worker thread.
#[derive(Debug)]
pub struct PendingDecode {
    receiver: mpsc::Receiver<ImagingResult<DecodedImage>>,
}

impl PendingDecode {
    pub fn spawn(bytes: Vec<u8>, mime_type: Option<String>) -> Self {
        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || {
            let result = decode(&bytes, mime_type.as_deref());
            let _ = tx.send(result);
        });
        Self { receiver: rx }
    }

    /// Blocks until decoding has completed.
    pub fn wait(self) -> ImagingResult<DecodedImage> {
        self.receiver
            .recv()
            .map_err(|_| ImagingError::WorkerDisconnected)?
    }

    /// Runs `next` with the decoded image once stage 1 has signalled
    /// completion.
    pub fn then<T, F>(self, next: F) -> ImagingResult<T>
    where
        F: FnOnce(DecodedImage) -> ImagingResult<T>,
    {
        next(self.wait()?)
    }
}

impl DecodedImage {
    pub fn size(&self) -> PixelSize {
        PixelSize::new(self.pixels.width(), self.pixels.height())
    }

    pub fn source_format(&self) -> Option<ImageFormat> {
        self.source_format
    }

    pub fn source_bytes(&self) -> u64 {
        self.source_bytes
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Stage 2: resize, filter, encode.
    pub fn render(&self, options: &RenderOptions) -> ImagingResult<EncodedImage> {
        let target = options.resize.target_size(self.size());
        if target.is_empty() {
            return Err(ImagingError::EmptyImage);
        }

        let mut canvas = resized(&self.pixels, target);
        options.filter.apply(&mut canvas);
        let bytes = encode(canvas, options.format, options.quality)?;

        tracing::debug!(
            format = %options.format,
            width = target.width,
            height = target.height,
            bytes = bytes.len(),
            "rendered image"
        );
        Ok(EncodedImage {
            bytes,
            format: options.format,
            size: target,
        })
    }
}

pub(crate) fn resized(pixels: &RgbaImage, target: PixelSize) -> RgbaImage {
    if pixels.dimensions() == (target.width, target.height) {
        return pixels.clone();
    }
    imageops::resize(
        pixels,
        target.width,
        target.height,
        imageops::FilterType::Triangle,
    )
}

/// Quality is clamped to 1..=100 and ignored by lossless containers.
pub(crate) fn encode(canvas: RgbaImage, format: TargetFormat, quality: u8) -> ImagingResult<Vec<u8>> {
    let encode_error = |source| ImagingError::Encode {
        format: format.name(),
        source,
    };
    let mut bytes = Vec::new();
    if format.is_lossy() {
        let rgb = DynamicImage::ImageRgba8(canvas).to_rgb8();
        JpegEncoder::new_with_quality(&mut bytes, quality.clamp(1, 100))
            .encode_image(&rgb)
            .map_err(encode_error)?;
        return Ok(bytes);
    }

    let mut cursor = Cursor::new(&mut bytes);
    DynamicImage::ImageRgba8(canvas)
        .write_to(&mut cursor, format.image_format())
        .map_err(encode_error)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let image = RgbaImage::from_pixel(width, height, Rgba([40, 120, 200, 255]));
        encode(image, TargetFormat::Png, DEFAULT_QUALITY).expect("png encodes")
    }

    #[test]
    fn decode_sniffs_container_without_mime() {
        let decoded = decode(&png_bytes(8, 4), None).expect("decodes");
        assert_eq!(decoded.size(), PixelSize::new(8, 4));
        assert_eq!(decoded.source_format(), Some(ImageFormat::Png));
    }

    #[test]
    fn decode_rejects_garbage_and_unknown_mime() {
        assert!(matches!(
            decode(b"definitely not an image", None),
            Err(ImagingError::Decode { .. })
        ));
        assert!(matches!(
            decode(&png_bytes(2, 2), Some("application/pdf")),
            Err(ImagingError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn render_resizes_filters_and_encodes_every_target() {
        let decoded = decode(&png_bytes(64, 32), Some("image/png")).expect("decodes");
        for format in TargetFormat::ALL {
            let options = RenderOptions {
                format,
                quality: 80,
                resize: ResizeOption::Custom {
                    width: 32,
                    height: 0,
                    keep_aspect: true,
                },
                filter: PixelFilter::Grayscale,
            };
            let encoded = decoded.render(&options).expect("renders");
            assert_eq!(encoded.size, PixelSize::new(32, 16));
            assert_eq!(
                image::guess_format(&encoded.bytes).expect("recognisable output"),
                format.image_format()
            );
        }
    }

    #[test]
    fn rendered_output_decodes_with_filter_applied() {
        let decoded = decode(&png_bytes(4, 4), None).expect("decodes");
        let options = RenderOptions {
            format: TargetFormat::Png,
            filter: PixelFilter::Invert,
            ..RenderOptions::default()
        };
        let encoded = decoded.render(&options).expect("renders");
        let again = decode(&encoded.bytes, Some(encoded.mime_type())).expect("decodes");
        assert_eq!(again.pixels().get_pixel(0, 0).0, [215, 135, 55, 255]);
    }

    #[test]
    fn pending_decode_runs_continuation_after_completion() {
        let pending = PendingDecode::spawn(png_bytes(10, 10), None);
        let encoded = pending
            .then(|decoded| decoded.render(&RenderOptions::default()))
            .expect("pipeline completes");
        assert_eq!(encoded.format, TargetFormat::Webp);
        assert_eq!(encoded.size, PixelSize::new(10, 10));
    }

    #[test]
    fn file_name_swaps_extension() {
        let encoded = EncodedImage {
            bytes: Vec::new(),
            format: TargetFormat::Jpeg,
            size: PixelSize::new(1, 1),
        };
        assert_eq!(encoded.file_name("holiday.photo.png"), "holiday.photo.jpg");
        assert_eq!(encoded.file_name(""), "image.jpg");
    }
}
