use std::fmt;

use crate::clipboard::ClipboardError;
use crate::color::ColorError;
use crate::datetime::DateError;
use crate::file_convert::FileConvertError;
use crate::generator::GeneratorError;
use crate::imaging::ImagingError;
use crate::json_format::JsonFormatError;
use crate::pomodoro::PomodoroError;
use crate::regex_check::RegexCheckError;
use crate::storage::StorageError;
use thiserror::Error;

pub type AppResult<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Color(#[from] ColorError),
    #[error(transparent)]
    Date(#[from] DateError),
    #[error(transparent)]
    Imaging(#[from] ImagingError),
    #[error(transparent)]
    Generator(#[from] GeneratorError),
    #[error(transparent)]
    Json(#[from] JsonFormatError),
    #[error(transparent)]
    Regex(#[from] RegexCheckError),
    #[error(transparent)]
    FileConvert(#[from] FileConvertError),
    #[error(transparent)]
    Pomodoro(#[from] PomodoroError),
    #[error(transparent)]
    Clipboard(#[from] ClipboardError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("failed to read input: {0}")]
    Input(#[from] std::io::Error),
}

/// Broad category of a failure, as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidFormat,
    OutOfRange,
    EmptyAlphabet,
    InvalidDate,
    ParseFailure,
    PatternError,
    InvalidState,
    Io,
    External,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::InvalidFormat => "invalid format",
            Self::OutOfRange => "out of range",
            Self::EmptyAlphabet => "empty alphabet",
            Self::InvalidDate => "invalid date",
            Self::ParseFailure => "parse failure",
            Self::PatternError => "pattern error",
            Self::InvalidState => "invalid state",
            Self::Io => "i/o error",
            Self::External => "external tool error",
        };
        f.write_str(name)
    }
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Color(ColorError::InvalidFormat { .. }) => ErrorKind::InvalidFormat,
            Self::Color(ColorError::OutOfRange { .. }) => ErrorKind::OutOfRange,
            Self::Date(DateError::EmptyInput | DateError::InvalidDate { .. }) => ErrorKind::InvalidDate,
            Self::Date(DateError::OutOfRange) => ErrorKind::OutOfRange,
            Self::Date(DateError::UnknownZone { .. }) => ErrorKind::InvalidFormat,
            Self::Imaging(err) => match err {
                ImagingError::UnsupportedFormat { .. } => ErrorKind::InvalidFormat,
                ImagingError::Decode { .. } => ErrorKind::ParseFailure,
                ImagingError::EmptyImage => ErrorKind::OutOfRange,
                ImagingError::ReadFile { .. } => ErrorKind::Io,
                ImagingError::Encode { .. } | ImagingError::WorkerDisconnected => {
                    ErrorKind::External
                }
            },
            Self::Generator(GeneratorError::EmptyAlphabet | GeneratorError::NoNameParts) => {
                ErrorKind::EmptyAlphabet
            }
            Self::Generator(GeneratorError::InvalidRange { .. }) => ErrorKind::OutOfRange,
            Self::Json(JsonFormatError::ParseFailure { .. }) => ErrorKind::ParseFailure,
            Self::Json(JsonFormatError::Serialize { .. }) => ErrorKind::External,
            Self::Regex(RegexCheckError::PatternError { .. }) => ErrorKind::PatternError,
            Self::Regex(RegexCheckError::UnknownFlag { .. }) => ErrorKind::InvalidFormat,
            Self::FileConvert(err) => match err {
                FileConvertError::ExtensionMismatch { .. }
                | FileConvertError::UnknownConversion { .. } => ErrorKind::InvalidFormat,
                FileConvertError::ParseFailure { .. }
                | FileConvertError::NotRecordArray
                | FileConvertError::EmptyCsv => ErrorKind::ParseFailure,
                FileConvertError::ReadFile { .. } => ErrorKind::Io,
            },
            Self::Pomodoro(PomodoroError::InvalidTransition { .. }) => ErrorKind::InvalidState,
            Self::Pomodoro(PomodoroError::InvalidSettings { .. }) => ErrorKind::OutOfRange,
            Self::Clipboard(_) => ErrorKind::External,
            Self::Storage(_) | Self::Input(_) => ErrorKind::Io,
        }
    }
}
