//! Image re-encoding and compression.
//!
//! Work is split into a decode stage producing [`DecodedImage`] and a render
//! stage on that value (resize, pixel filter, encode).

pub mod compress;
pub mod error;
pub mod filter;
pub mod format;
pub mod pipeline;
pub mod resize;

pub use compress::{compress, CompressOptions, CompressedImage};
pub use error::{ImagingError, ImagingResult};
pub use filter::PixelFilter;
pub use format::{format_file_size, TargetFormat, DEFAULT_QUALITY};
pub use pipeline::{decode, decode_file, DecodedImage, EncodedImage, PendingDecode, RenderOptions};
pub use resize::ResizeOption;

/// Decodes on a worker thread and renders once decoding has completed.
pub fn convert(
    bytes: Vec<u8>,
    mime_type: Option<String>,
    options: RenderOptions,
) -> ImagingResult<EncodedImage> {
    PendingDecode::spawn(bytes, mime_type).then(|decoded| decoded.render(&options))
}
