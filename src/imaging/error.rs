use thiserror::Error;

pub type ImagingResult<T> = std::result::Result<T, ImagingError>;

#[derive(Debug, Error)]
pub enum ImagingError {
    #[error("unsupported image format: {name}")]
    UnsupportedFormat { name: String },
    #[error("failed to decode image: {source}")]
    Decode {
        #[source]
        source: image::ImageError,
    },
    #[error("failed to encode {format} image: {source}")]
    Encode {
        format: &'static str,
        #[source]
        source: image::ImageError,
    },
    #[error("image has no pixels")]
    EmptyImage,
    #[error("failed to read image file {path}: {source}")]
    ReadFile {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("image decode worker stopped before producing a result")]
    WorkerDisconnected,
}
