//! Turns the many accepted file shapes into one flat, ordered word list.
//!
//! Shapes are recognized in a fixed order:
//! - text lines, taken as-is
//! - arrays, element by element (string, then `keyword` field, then `word` field)
//! - objects holding a list, where the first list-valued entry wins
//! - objects without any list, whose keys are the words (frequency maps)
//!
//! Anything else yields nothing.

use serde_json::{Map, Value};

use crate::input::RawInput;

/// One entry of the normalized list.
///
/// `keyword`/`word` fields are taken without checking their type, so a
/// candidate may carry a non-string value. Those are dropped at insert time.
#[derive(Debug, Clone, PartialEq)]
pub enum Candidate {
    Text(String),
    NonText(Value),
}

impl Candidate {
    fn from_field(value: &Value) -> Self {
        match value {
            Value::String(text) => Candidate::Text(text.clone()),
            other => Candidate::NonText(other.clone()),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Candidate::Text(text) => Some(text.as_str()),
            Candidate::NonText(_) => None,
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum ArrayItem<'a> {
    Plain(&'a str),
    Keyword(&'a Value),
    Word(&'a Value),
    Unrecognized,
}

impl<'a> ArrayItem<'a> {
    pub fn classify(item: &'a Value) -> Self {
        match item {
            Value::String(text) => ArrayItem::Plain(text),
            Value::Object(fields) => {
                if let Some(keyword) = fields.get("keyword") {
                    ArrayItem::Keyword(keyword)
                } else if let Some(word) = fields.get("word") {
                    ArrayItem::Word(word)
                } else {
                    ArrayItem::Unrecognized
                }
            }
            _ => ArrayItem::Unrecognized,
        }
    }

    fn into_candidate(self) -> Option<Candidate> {
        match self {
            ArrayItem::Plain(text) => Some(Candidate::Text(text.to_string())),
            ArrayItem::Keyword(value) | ArrayItem::Word(value) => {
                Some(Candidate::from_field(value))
            }
            ArrayItem::Unrecognized => None,
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum RawShape<'a> {
    Lines(&'a [String]),
    Array(&'a [Value]),
    ListField { key: &'a str, items: &'a [Value] },
    KeyedMap(&'a Map<String, Value>),
    Scalar,
}

impl<'a> RawShape<'a> {
    pub fn classify(raw: &'a RawInput) -> Self {
        match raw {
            RawInput::Lines(lines) => RawShape::Lines(lines),
            RawInput::Json(Value::Array(items)) => RawShape::Array(items),
            RawInput::Json(Value::Object(map)) => map
                .iter()
                .find_map(|(key, value)| match value {
                    Value::Array(items) => Some(RawShape::ListField {
                        key: key.as_str(),
                        items: items.as_slice(),
                    }),
                    _ => None,
                })
                .unwrap_or(RawShape::KeyedMap(map)),
            RawInput::Json(_) => RawShape::Scalar,
        }
    }

    pub fn candidates(&self) -> Vec<Candidate> {
        match self {
            RawShape::Lines(lines) => lines.iter().cloned().map(Candidate::Text).collect(),
            RawShape::Array(items) => items
                .iter()
                .filter_map(|item| ArrayItem::classify(item).into_candidate())
                .collect(),
            RawShape::ListField { items, .. } => items
                .iter()
                .filter_map(Value::as_str)
                .map(|text| Candidate::Text(text.to_string()))
                .collect(),
            RawShape::KeyedMap(map) => map.keys().cloned().map(Candidate::Text).collect(),
            RawShape::Scalar => Vec::new(),
        }
    }
}

pub fn normalize(raw: &RawInput) -> Vec<Candidate> {
    let shape = RawShape::classify(raw);
    if let RawShape::ListField { key, .. } = &shape {
        tracing::debug!("Reading words from list field '{}'", key);
    }
    shape.candidates()
}
