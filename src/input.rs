use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde_json::Value;

use crate::error::ImportError;

const PREVIEW_CHARS: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Text,
}

impl InputFormat {
    pub fn from_path(path: &Path) -> Result<Self, ImportError> {
        let name = path.to_string_lossy();
        if name.ends_with(".json") {
            Ok(Self::Json)
        } else if name.ends_with(".txt") {
            Ok(Self::Text)
        } else {
            Err(ImportError::UnsupportedFormat(path.to_path_buf()))
        }
    }
}

/// Parsed file contents before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum RawInput {
    Lines(Vec<String>),
    Json(Value),
}

impl RawInput {
    pub fn kind(&self) -> &'static str {
        match self {
            RawInput::Lines(_) => "lines",
            RawInput::Json(Value::Array(_)) => "array",
            RawInput::Json(Value::Object(_)) => "object",
            RawInput::Json(Value::String(_)) => "string",
            RawInput::Json(Value::Number(_)) => "number",
            RawInput::Json(Value::Bool(_)) => "bool",
            RawInput::Json(Value::Null) => "null",
        }
    }

    pub fn preview(&self) -> String {
        let rendered = match self {
            RawInput::Lines(lines) => format!("{lines:?}"),
            RawInput::Json(value) => value.to_string(),
        };
        rendered.chars().take(PREVIEW_CHARS).collect()
    }
}

pub fn read_input(path: &Path) -> Result<RawInput, ImportError> {
    let format = InputFormat::from_path(path)?;

    let raw = fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => ImportError::FileNotFound(path.to_path_buf()),
        _ => ImportError::Read {
            path: path.to_path_buf(),
            source,
        },
    })?;

    match format {
        InputFormat::Text => Ok(RawInput::Lines(parse_lines(&raw))),
        InputFormat::Json => serde_json::from_str(&raw)
            .map(RawInput::Json)
            .map_err(|source| ImportError::InvalidJson {
                path: path.to_path_buf(),
                source,
            }),
    }
}

fn parse_lines(raw: &str) -> Vec<String> {
    raw.split(['\n', '\r'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
