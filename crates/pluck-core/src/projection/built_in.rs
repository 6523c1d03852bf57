//! Built-in scalar transforms
//!
//! Pre-configured transforms that can be referenced by name from a JSON
//! projector configuration. String transforms leave non-string values alone.
//!
//! Copyright (c) 2025 Pluck Team
//! Licensed under the Apache-2.0 license

use super::rule::Transform;
use serde_json::Value;

fn named<F>(name: &str, function: F) -> Transform
where
    F: Fn(&Value, &Value) -> anyhow::Result<Value> + Send + Sync + 'static,
{
    Transform::scalar(function).named(name)
}

fn map_string(value: &Value, f: impl Fn(&str) -> String) -> Value {
    match value {
        Value::String(s) => Value::String(f(s)),
        other => other.clone(),
    }
}

/// Return the value unchanged
pub fn identity() -> Transform {
    named("identity", |value, _| Ok(value.clone()))
}

/// Upper-case string values
pub fn uppercase() -> Transform {
    named("uppercase", |value, _| Ok(map_string(value, str::to_uppercase)))
}

/// Lower-case string values
pub fn lowercase() -> Transform {
    named("lowercase", |value, _| Ok(map_string(value, str::to_lowercase)))
}

/// Strip leading and trailing whitespace from string values
pub fn trim() -> Transform {
    named("trim", |value, _| Ok(map_string(value, |s| s.trim().to_string())))
}

/// All built-ins, keyed by the name used in configuration
pub fn all() -> Vec<(&'static str, Transform)> {
    vec![
        ("identity", identity()),
        ("uppercase", uppercase()),
        ("lowercase", lowercase()),
        ("trim", trim()),
    ]
}
