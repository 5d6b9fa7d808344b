use thiserror::Error;

pub type GeneratorResult<T> = std::result::Result<T, GeneratorError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeneratorError {
    #[error("please select at least one character type")]
    EmptyAlphabet,
    #[error("please select first names, last names, or both")]
    NoNameParts,
    #[error("number range must be finite, got {min}..{max}")]
    InvalidRange { min: String, max: String },
}
