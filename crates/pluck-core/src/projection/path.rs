//! Dotted field paths
//!
//! A [`FieldPath`] addresses a nested location inside a record, e.g.
//! `"user.address.city"`. Reading walks the record one segment at a time and
//! yields `None` as soon as a segment is missing. Writing walks the
//! destination, creating records for missing segments and replacing anything
//! that cannot be descended into.
//!
//! Numeric segments index into arrays (`"items.0.name"`).
//!
//! Copyright (c) 2025 Pluck Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use crate::types::Record;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Segment delimiter for dotted paths
pub const PATH_DELIMITER: char = '.';

/// A dotted path that failed to tokenize
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathError {
    pub path: String,
    pub message: String,
}

impl PathError {
    fn new(path: &str, message: impl Into<String>) -> Self {
        Self {
            path: path.to_string(),
            message: message.into(),
        }
    }
}

impl From<PathError> for Error {
    fn from(err: PathError) -> Self {
        Error::InvalidPath {
            path: err.path,
            message: err.message,
        }
    }
}

/// A parsed, non-empty dotted path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    raw: String,
    segments: Vec<String>,
}

impl FieldPath {
    /// Tokenize a dotted path into its segments
    pub fn parse(raw: &str) -> Result<Self> {
        Self::tokenize(raw).map_err(Error::from)
    }

    /// Tokenize, keeping the failure as a cloneable [`PathError`]
    pub fn tokenize(raw: &str) -> std::result::Result<Self, PathError> {
        if raw.is_empty() {
            return Err(PathError::new(raw, "path is empty"));
        }

        let mut segments = Vec::new();
        for (position, segment) in raw.split(PATH_DELIMITER).enumerate() {
            if segment.is_empty() {
                return Err(PathError::new(
                    raw,
                    format!("empty segment at position {}", position),
                ));
            }
            segments.push(segment.to_string());
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of segments; always at least one
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Resolve the path against `root`, returning `None` when any segment is missing
    pub fn resolve<'v>(&self, root: &'v Value) -> Option<&'v Value> {
        self.segments
            .iter()
            .try_fold(root, |current, segment| child(current, segment))
    }

    /// Set `value` at this path inside `root`, creating intermediate records
    pub fn assign(&self, root: &mut Record, value: Value) {
        let Some((last, parents)) = self.segments.split_last() else {
            return;
        };

        let mut container = Value::Object(std::mem::take(root));
        let mut current = &mut container;
        for segment in parents {
            current = slot(current, segment);
        }
        *slot(current, last) = value;

        if let Value::Object(map) = container {
            *root = map;
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for FieldPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

fn array_index(items: &[Value], segment: &str) -> Option<usize> {
    segment.parse::<usize>().ok().filter(|index| *index < items.len())
}

fn child<'v>(current: &'v Value, segment: &str) -> Option<&'v Value> {
    match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => array_index(items, segment).map(|index| &items[index]),
        _ => None,
    }
}

/// Return the slot for `segment` inside `current`, making room for it
///
/// Numeric segments descend into arrays, padding with `null` up to the index.
/// Records gain a `null` entry for missing keys. Any other value is replaced
/// by an empty record first.
fn slot<'v>(current: &'v mut Value, segment: &str) -> &'v mut Value {
    let index = segment.parse::<usize>().ok();

    match (current, index) {
        (Value::Array(items), Some(index)) => {
            if items.len() <= index {
                items.resize(index + 1, Value::Null);
            }
            &mut items[index]
        }
        (Value::Object(map), _) => map.entry(segment).or_insert(Value::Null),
        (other, _) => {
            *other = Value::Object(Record::new());
            slot(other, segment)
        }
    }
}
