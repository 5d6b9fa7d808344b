use thiserror::Error;

use super::notation::Notation;

pub type ColorResult<T> = std::result::Result<T, ColorError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("invalid {notation} color {input:?}, expected for example {}", .notation.example())]
    InvalidFormat { notation: Notation, input: String },
    #[error("{component} must be between {min} and {max}, got {value}")]
    OutOfRange {
        component: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
}
