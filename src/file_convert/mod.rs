use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FileConvertError {
    #[error("expected a .{expected} file but got a .{found} file")]
    ExtensionMismatch { expected: &'static str, found: String },
    #[error("failed to parse {format}: {message}")]
    ParseFailure { format: &'static str, message: String },
    #[error("JSON must be an array of objects")]
    NotRecordArray,
    #[error("CSV file is empty")]
    EmptyCsv,
    #[error("unknown conversion {name:?}")]
    UnknownConversion { name: String },
    #[error("failed to read {path}: {source}")]
    ReadFile { path: PathBuf, source: io::Error },
}

pub type FileConvertResult<T> = std::result::Result<T, FileConvertError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    TxtToJson,
    JsonToCsv,
    CsvToJson,
    JsonToYaml,
    YamlToJson,
}

impl Conversion {
    pub const ALL: [Self; 5] = [
        Self::TxtToJson,
        Self::JsonToCsv,
        Self::CsvToJson,
        Self::JsonToYaml,
        Self::YamlToJson,
    ];

    pub const fn id(self) -> &'static str {
        match self {
            Self::TxtToJson => "txt-to-json",
            Self::JsonToCsv => "json-to-csv",
            Self::CsvToJson => "csv-to-json",
            Self::JsonToYaml => "json-to-yaml",
            Self::YamlToJson => "yaml-to-json",
        }
    }

    pub const fn source(self) -> &'static str {
        match self {
            Self::TxtToJson => "txt",
            Self::JsonToCsv | Self::JsonToYaml => "json",
            Self::CsvToJson => "csv",
            Self::YamlToJson => "yaml",
        }
    }

    pub const fn target(self) -> &'static str {
        match self {
            Self::TxtToJson | Self::CsvToJson | Self::YamlToJson => "json",
            Self::JsonToCsv => "csv",
            Self::JsonToYaml => "yaml",
        }
    }

    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::JsonToCsv => "text/csv",
            Self::JsonToYaml => "application/yaml",
            Self::TxtToJson | Self::CsvToJson | Self::YamlToJson => "application/json",
        }
    }

    fn accepts_extension(self, extension: &str) -> bool {
        extension == self.source() || (self == Self::YamlToJson && extension == "yml")
    }

    /// Converts already-loaded file contents.
    pub fn apply(self, input: &str) -> FileConvertResult<String> {
        let output = match self {
            Self::TxtToJson => txt_to_json(input),
            Self::JsonToCsv => json_to_csv(input),
            Self::CsvToJson => csv_to_json(input),
            Self::JsonToYaml => json_to_yaml(input),
            Self::YamlToJson => yaml_to_json(input),
        }?;
        tracing::debug!(conversion = self.id(), bytes = output.len(), "converted file");
        Ok(output)
    }
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Conversion {
    type Err = FileConvertError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|conversion| conversion.id() == normalized)
            .ok_or_else(|| FileConvertError::UnknownConversion {
                name: value.to_string(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedFile {
    /// Source name up to its first dot, with the target extension.
    pub name: String,
    pub contents: String,
    pub mime_type: &'static str,
}

/// Reads `path`, checks its extension against the conversion, and converts.
pub fn convert_file(conversion: Conversion, path: &Path) -> FileConvertResult<ConvertedFile> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    check_extension(conversion, file_name)?;

    let input = std::fs::read_to_string(path).map_err(|source| FileConvertError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    let contents = conversion.apply(&input)?;
    Ok(ConvertedFile {
        name: output_name(file_name, conversion),
        contents,
        mime_type: conversion.mime_type(),
    })
}

pub fn check_extension(conversion: Conversion, file_name: &str) -> FileConvertResult<()> {
    let found = file_name
        .rsplit_once('.')
        .map(|(_, extension)| extension.to_ascii_lowercase())
        .unwrap_or_default();
    if conversion.accepts_extension(&found) {
        return Ok(());
    }
    Err(FileConvertError::ExtensionMismatch {
        expected: conversion.source(),
        found,
    })
}

pub fn output_name(file_name: &str, conversion: Conversion) -> String {
    let stem = file_name.split('.').next().filter(|stem| !stem.is_empty());
    format!("{}.{}", stem.unwrap_or("converted"), conversion.target())
}

fn txt_to_json(input: &str) -> FileConvertResult<String> {
    let lines: Vec<Value> = input
        .split('\n')
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
        .map(|line| Value::String(line.to_string()))
        .collect();
    let mut document = Map::new();
    document.insert("lines".to_string(), Value::Array(lines));
    to_pretty_json(&Value::Object(document))
}

fn json_to_csv(input: &str) -> FileConvertResult<String> {
    let document = parse_json(input)?;
    let records = match &document {
        Value::Array(items) => items,
        _ => return Err(FileConvertError::NotRecordArray),
    };
    let Some(Value::Object(first)) = records.first() else {
        return Err(FileConvertError::NotRecordArray);
    };
    let headers: Vec<&String> = first.keys().collect();

    let mut rows = Vec::with_capacity(records.len() + 1);
    rows.push(
        headers
            .iter()
            .map(|header| escape_cell(header))
            .collect::<Vec<_>>()
            .join(","),
    );
    for record in records {
        let row = headers
            .iter()
            .map(|header| escape_cell(&cell_text(record.get(header.as_str()))))
            .collect::<Vec<_>>()
            .join(",");
        rows.push(row);
    }
    Ok(rows.join("\n"))
}

fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

fn escape_cell(cell: &str) -> String {
    if cell.contains(['"', ',', '\n']) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

/// Splits on bare commas; quoted cells are not recognised.
fn csv_to_json(input: &str) -> FileConvertResult<String> {
    let mut lines = input
        .split('\n')
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty());
    let header_line = lines.next().ok_or(FileConvertError::EmptyCsv)?;
    let headers: Vec<&str> = header_line.split(',').map(str::trim).collect();

    let records: Vec<Value> = lines
        .map(|line| {
            let cells: Vec<&str> = line.split(',').collect();
            let record: Map<String, Value> = headers
                .iter()
                .enumerate()
                .map(|(column, header)| {
                    let cell = cells.get(column).map(|cell| cell.trim()).unwrap_or_default();
                    (header.to_string(), Value::String(cell.to_string()))
                })
                .collect();
            Value::Object(record)
        })
        .collect();
    to_pretty_json(&Value::Array(records))
}

fn json_to_yaml(input: &str) -> FileConvertResult<String> {
    let document = parse_json(input)?;
    serde_yaml::to_string(&document).map_err(|err| FileConvertError::ParseFailure {
        format: "YAML",
        message: err.to_string(),
    })
}

fn yaml_to_json(input: &str) -> FileConvertResult<String> {
    let document: Value =
        serde_yaml::from_str(input).map_err(|err| FileConvertError::ParseFailure {
            format: "YAML",
            message: err.to_string(),
        })?;
    to_pretty_json(&document)
}

fn parse_json(input: &str) -> FileConvertResult<Value> {
    serde_json::from_str(input).map_err(|err| FileConvertError::ParseFailure {
        format: "JSON",
        message: err.to_string(),
    })
}

fn to_pretty_json(value: &Value) -> FileConvertResult<String> {
    serde_json::to_string_pretty(value).map_err(|err| FileConvertError::ParseFailure {
        format: "JSON",
        message: err.to_string(),
    })
}
