use thiserror::Error;

pub type DateResult<T> = std::result::Result<T, DateError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("please enter a date")]
    EmptyInput,
    #[error("invalid date: {input:?} (expected something like {example})")]
    InvalidDate {
        input: String,
        example: &'static str,
    },
    #[error("date arithmetic overflowed the supported range")]
    OutOfRange,
    #[error("unknown time zone: {zone:?}")]
    UnknownZone { zone: String },
}
