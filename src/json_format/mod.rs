use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::Value;
use thiserror::Error;

pub const DEFAULT_INDENT: usize = 2;
pub const MAX_INDENT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JsonFormatError {
    /// Carries the parser's own message.
    #[error("{message}")]
    ParseFailure { message: String },
    #[error("failed to write JSON: {message}")]
    Serialize { message: String },
}

pub type JsonFormatResult<T> = std::result::Result<T, JsonFormatError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Indent width in spaces, at most [`MAX_INDENT`]; zero means minified.
    Pretty(usize),
    Minified,
}

impl Default for Layout {
    fn default() -> Self {
        Self::Pretty(DEFAULT_INDENT)
    }
}

/// Re-serializes `input`, keeping key order. Blank input gives blank output.
pub fn format(input: &str, layout: Layout) -> JsonFormatResult<String> {
    if input.trim().is_empty() {
        return Ok(String::new());
    }
    let value = parse(input)?;
    match layout {
        Layout::Pretty(0) | Layout::Minified => serde_json::to_string(&value).map_err(serialize_error),
        Layout::Pretty(width) => pretty(&value, width.min(MAX_INDENT)),
    }
}

pub fn minify(input: &str) -> JsonFormatResult<String> {
    format(input, Layout::Minified)
}

pub fn parse(input: &str) -> JsonFormatResult<Value> {
    serde_json::from_str(input).map_err(|err| JsonFormatError::ParseFailure {
        message: err.to_string(),
    })
}

fn pretty(value: &Value, width: usize) -> JsonFormatResult<String> {
    let indent = " ".repeat(width);
    let mut out = Vec::new();
    let mut serializer =
        Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(indent.as_bytes()));
    value.serialize(&mut serializer).map_err(serialize_error)?;
    String::from_utf8(out).map_err(|err| JsonFormatError::Serialize {
        message: err.to_string(),
    })
}

fn serialize_error(err: serde_json::Error) -> JsonFormatError {
    JsonFormatError::Serialize {
        message: err.to_string(),
    }
}
