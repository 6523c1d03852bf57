//! Core types shared across the projection engine
//!
//! Copyright (c) 2025 Pluck Team
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// A record is a JSON object: string keys mapped to arbitrary values
pub type Record = Map<String, Value>;

/// Classification of a value as seen by the projector
///
/// Used for diagnostics when a projection receives something that is not a
/// record. `Absent` stands for a read path that did not resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Object,
    Array,
    String,
    Number,
    Boolean,
    Null,
    Absent,
}

impl ValueKind {
    /// Classify a resolved value
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Object(_) => ValueKind::Object,
            Value::Array(_) => ValueKind::Array,
            Value::String(_) => ValueKind::String,
            Value::Number(_) => ValueKind::Number,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Null => ValueKind::Null,
        }
    }

    /// Classify a possibly unresolved value
    pub fn of_resolved(value: Option<&Value>) -> Self {
        value.map_or(ValueKind::Absent, Self::of)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Object => "object",
            ValueKind::Array => "array",
            ValueKind::String => "string",
            ValueKind::Number => "number",
            ValueKind::Boolean => "boolean",
            ValueKind::Null => "null",
            ValueKind::Absent => "absent",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
