//! Field-mapping rules
//!
//! A [`Rule`] reads one field from the source record, optionally transforms
//! it, and writes it to a (possibly different) position in the destination.
//!
//! Copyright (c) 2025 Pluck Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use crate::types::{Record, ValueKind};
use super::path::{FieldPath, PathError};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Anything that can turn a record into a projected record
///
/// [`Projector`](super::Projector) implements this, which is what lets one
/// projector be nested inside another. Test doubles qualify too.
pub trait Projection: Send + Sync + fmt::Debug {
    /// Project `value`, which must be a record
    fn apply_to(&self, value: &Value) -> Result<Value>;
}

/// Caller-supplied scalar transform: `(value, source_record) -> value`
///
/// `value` is `None` when the rule's field is absent from the source, and
/// `Some(&Value::Null)` when it is present and explicitly `null`.
pub type ScalarFn = Arc<dyn Fn(Option<&Value>, &Value) -> anyhow::Result<Value> + Send + Sync>;

/// How a rule converts the value it reads
#[derive(Clone, Default)]
pub enum Transform {
    /// Copy the value unchanged
    #[default]
    Copy,
    /// Call a function with the value and the whole source record
    Scalar { name: Option<String>, function: ScalarFn },
    /// Run another projection over the value
    Nested(Arc<dyn Projection>),
}

impl Transform {
    /// Wrap a closure as a scalar transform; absent values arrive as `null`
    pub fn scalar<F>(function: F) -> Self
    where
        F: Fn(&Value, &Value) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        Self::scalar_resolved(move |value, source| function(value.unwrap_or(&Value::Null), source))
    }

    /// Wrap a closure that tells absent fields apart from explicit `null`
    pub fn scalar_resolved<F>(function: F) -> Self
    where
        F: Fn(Option<&Value>, &Value) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        Transform::Scalar {
            name: None,
            function: Arc::new(function),
        }
    }

    /// Name a scalar transform for logs; other variants are returned as is
    pub fn named(self, label: impl Into<String>) -> Self {
        match self {
            Transform::Scalar { function, .. } => Transform::Scalar {
                name: Some(label.into()),
                function,
            },
            other => other,
        }
    }

    /// Short label used in logs
    pub fn label(&self) -> &str {
        match self {
            Transform::Copy => "copy",
            Transform::Scalar { name: Some(name), .. } => name.as_str(),
            Transform::Scalar { name: None, .. } => "scalar",
            Transform::Nested(_) => "nested",
        }
    }

    /// Apply the transform to a resolved value
    ///
    /// `value` is `None` when the read path did not resolve. Copies write the
    /// absent sentinel (`null`); nested projections reject it.
    pub(crate) fn apply(&self, field: &str, value: Option<&Value>, source: &Value) -> Result<Value> {
        match self {
            Transform::Copy => Ok(value.cloned().unwrap_or(Value::Null)),
            Transform::Scalar { function, .. } => function(value, source).map_err(Error::Transform),
            Transform::Nested(projection) => match value {
                Some(value) => projection.apply_to(value).map_err(|err| err.at_path(field)),
                None => Err(Error::not_a_record(ValueKind::Absent, Some(field))),
            },
        }
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transform::Copy => f.write_str("Copy"),
            Transform::Scalar { name, .. } => f
                .debug_struct("Scalar")
                .field("name", name)
                .finish_non_exhaustive(),
            Transform::Nested(projection) => f.debug_tuple("Nested").field(projection).finish(),
        }
    }
}

/// A single field-mapping instruction
#[derive(Debug, Clone)]
pub struct Rule {
    /// Dotted path to read from the source record
    pub field: String,
    /// Dotted path to write in the destination (defaults to `field`)
    pub alias: Option<String>,
    /// Value conversion
    pub transform: Transform,
}

impl Rule {
    /// Create a plain copy rule for `field`
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            alias: None,
            transform: Transform::Copy,
        }
    }

    /// Write the value under a different path
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Transform the value with a scalar function
    pub fn transform<F>(mut self, function: F) -> Self
    where
        F: Fn(&Value, &Value) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        self.transform = Transform::scalar(function);
        self
    }

    /// Transform the value with a scalar function that sees absent fields as `None`
    pub fn transform_resolved<F>(mut self, function: F) -> Self
    where
        F: Fn(Option<&Value>, &Value) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        self.transform = Transform::scalar_resolved(function);
        self
    }

    /// Project the value with a nested projection
    pub fn nested<P>(mut self, projection: P) -> Self
    where
        P: Projection + 'static,
    {
        self.transform = Transform::Nested(Arc::new(projection));
        self
    }

    /// Project the value with an already shared projection
    pub fn nested_shared(mut self, projection: Arc<dyn Projection>) -> Self {
        self.transform = Transform::Nested(projection);
        self
    }

    /// Replace the transform outright
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Path written in the destination
    pub fn target(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.field)
    }

    /// Read, transform and write this rule's field
    pub(crate) fn apply(&self, paths: &RulePaths, source: &Value, destination: &mut Record) -> Result<()> {
        let read_path = paths.read()?;
        let write_path = paths.write()?;

        let resolved = read_path.resolve(source);
        if resolved.is_none() {
            log::debug!("Field '{}' not found in source, writing absent marker", self.field);
        }

        log::trace!(
            "Projecting '{}' -> '{}' ({})",
            read_path,
            write_path,
            self.transform.label()
        );

        let value = self.transform.apply(&self.field, resolved, source)?;
        write_path.assign(destination, value);
        Ok(())
    }
}

/// A rule's read and write paths, tokenized once when the projector is built
///
/// Malformed paths are kept as errors and reported when the rule runs.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RulePaths {
    read: std::result::Result<FieldPath, PathError>,
    write: std::result::Result<FieldPath, PathError>,
}

impl RulePaths {
    pub(crate) fn compile(rule: &Rule) -> Self {
        Self {
            read: FieldPath::tokenize(&rule.field),
            write: FieldPath::tokenize(rule.target()),
        }
    }

    fn read(&self) -> Result<&FieldPath> {
        self.read.as_ref().map_err(|err| err.clone().into())
    }

    fn write(&self) -> Result<&FieldPath> {
        self.write.as_ref().map_err(|err| err.clone().into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn apply(rule: &Rule, source: &Value, destination: &mut Record) -> Result<()> {
        rule.apply(&RulePaths::compile(rule), source, destination)
    }

    #[derive(Debug)]
    struct Constant(Value);

    impl Projection for Constant {
        fn apply_to(&self, _value: &Value) -> Result<Value> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_rule_defaults() {
        let rule = Rule::new("a.b");
        assert_eq!(rule.target(), "a.b");
        assert!(matches!(rule.transform, Transform::Copy));
        assert_eq!(rule.transform.label(), "copy");
    }

    #[test]
    fn test_rule_alias() {
        let rule = Rule::new("a").alias("nested.x");
        assert_eq!(rule.field, "a");
        assert_eq!(rule.target(), "nested.x");
    }

    #[test]
    fn test_apply_copy_and_absent() {
        let source = json!({"a": 1});
        let mut destination = Record::new();

        apply(&Rule::new("a"), &source, &mut destination).unwrap();
        apply(&Rule::new("missing").alias("m"), &source, &mut destination).unwrap();

        assert_eq!(Value::Object(destination), json!({"a": 1, "m": null}));
    }

    #[test]
    fn test_scalar_transform_sees_source() {
        let source = json!({"first": "Ada", "last": "Lovelace"});
        let rule = Rule::new("last").alias("full").transform(|value, source| {
            Ok(json!(format!(
                "{} {}",
                source["first"].as_str().unwrap_or_default(),
                value.as_str().unwrap_or_default()
            )))
        });

        let mut destination = Record::new();
        apply(&rule, &source, &mut destination).unwrap();
        assert_eq!(destination["full"], json!("Ada Lovelace"));
    }

    #[test]
    fn test_scalar_transform_receives_null_for_absent() {
        let rule = Rule::new("missing").transform(|value, _| Ok(json!(value.is_null())));
        let mut destination = Record::new();
        apply(&rule, &json!({}), &mut destination).unwrap();
        assert_eq!(destination["missing"], json!(true));
    }

    #[test]
    fn test_resolved_transform_tells_absent_from_null() {
        let rule = Rule::new("a").transform_resolved(|value, _| {
            Ok(json!(match value {
                None => "absent",
                Some(Value::Null) => "null",
                Some(_) => "value",
            }))
        });

        let mut destination = Record::new();
        apply(&rule, &json!({}), &mut destination).unwrap();
        assert_eq!(destination["a"], json!("absent"));

        apply(&rule, &json!({"a": null}), &mut destination).unwrap();
        assert_eq!(destination["a"], json!("null"));

        apply(&rule, &json!({"a": 0}), &mut destination).unwrap();
        assert_eq!(destination["a"], json!("value"));
    }

    #[test]
    fn test_named_scalar_label() {
        let transform = Transform::scalar(|v, _| Ok(v.clone())).named("echo");
        assert_eq!(transform.label(), "echo");
        assert_eq!(Transform::Copy.named("ignored").label(), "copy");
    }

    #[test]
    fn test_paths_are_compiled_once() {
        let rule = Rule::new("a.b").alias("x");
        let paths = RulePaths::compile(&rule);
        assert_eq!(paths.read().unwrap().segments(), &["a", "b"]);
        assert_eq!(paths.write().unwrap().as_str(), "x");

        let broken = RulePaths::compile(&Rule::new("a.").alias("x"));
        for _ in 0..2 {
            let err = broken.read().unwrap_err();
            assert_eq!(err.to_string(), "Invalid path 'a.': empty segment at position 1");
        }
        assert!(broken.write().is_ok());
    }

    #[test]
    fn test_nested_double_is_used() {
        let rule = Rule::new("child").nested(Constant(json!({"stub": true})));
        let mut destination = Record::new();
        apply(&rule, &json!({"child": {"x": 1}}), &mut destination).unwrap();
        assert_eq!(destination["child"], json!({"stub": true}));
    }

    #[test]
    fn test_nested_rejects_absent_value() {
        let rule = Rule::new("child").nested(Constant(json!({})));
        let mut destination = Record::new();
        let err = apply(&rule, &json!({}), &mut destination).unwrap_err();

        match err {
            Error::TypeMismatch { found, path, .. } => {
                assert_eq!(found, ValueKind::Absent);
                assert_eq!(path.as_deref(), Some("child"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(destination.is_empty());
    }

    #[test]
    fn test_nested_mismatch_reports_field() {
        #[derive(Debug)]
        struct RecordsOnly;

        impl Projection for RecordsOnly {
            fn apply_to(&self, value: &Value) -> Result<Value> {
                match value {
                    Value::Object(_) => Ok(value.clone()),
                    other => Err(Error::not_a_record(ValueKind::of(other), None)),
                }
            }
        }

        let rule = Rule::new("child").nested(RecordsOnly);
        let err = apply(&rule, &json!({"child": [1]}), &mut Record::new()).unwrap_err();
        assert_eq!(err.to_string(), "Type mismatch: expected 'object', got 'array' at 'child'");
    }

    #[test]
    fn test_invalid_paths_surface_on_apply() {
        let mut destination = Record::new();

        let err = apply(&Rule::new(""), &json!({}), &mut destination).unwrap_err();
        assert!(matches!(err, Error::InvalidPath { .. }));

        let rule = Rule::new("a").alias("x..y");
        let err = apply(&rule, &json!({"a": 1}), &mut destination).unwrap_err();
        assert!(matches!(err, Error::InvalidPath { ref path, .. } if path == "x..y"));
    }

    #[test]
    fn test_transform_debug_hides_function() {
        let transform = Transform::scalar(|v, _| Ok(v.clone()));
        assert_eq!(format!("{:?}", transform), "Scalar { name: None, .. }");
    }
}
