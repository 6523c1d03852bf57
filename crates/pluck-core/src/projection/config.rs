//! JSON configuration for projectors
//!
//! Projectors can be described declaratively:
//!
//! ```json
//! {
//!   "rules": [
//!     { "field": "a" },
//!     { "field": "b", "alias": "nested.y", "transform": "uppercase" },
//!     { "field": "child", "projector": { "rules": [ { "field": "id" } ] } }
//!   ]
//! }
//! ```
//!
//! Scalar transforms cannot be written in JSON, so `transform` names an entry
//! in a [`TransformRegistry`]. `attributes` is accepted in place of `rules`.
//!
//! Copyright (c) 2025 Pluck Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use crate::types::ValueKind;
use super::built_in;
use super::projector::Projector;
use super::rule::{Rule, Transform};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Key holding the rule set
pub const RULES_KEY: &str = "rules";
/// Legacy key for the rule set
pub const LEGACY_RULES_KEY: &str = "attributes";

/// Declarative projector configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectorConfig {
    #[serde(alias = "attributes")]
    pub rules: Vec<RuleConfig>,
}

/// Declarative rule configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Missing fields deserialize to an empty path, reported when projecting
    #[serde(default)]
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// Name of a registered scalar transform
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform: Option<String>,
    /// Nested projector applied to the field value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projector: Option<Box<ProjectorConfig>>,
}

impl ProjectorConfig {
    /// Check the overall shape of a raw configuration and deserialize it
    pub fn from_value(config: &Value) -> Result<Self> {
        let Value::Object(map) = config else {
            return Err(Error::configuration(format!(
                "Projector configuration must be an object, got '{}'",
                ValueKind::of(config)
            )));
        };

        if map.contains_key(RULES_KEY) && map.contains_key(LEGACY_RULES_KEY) {
            return Err(Error::configuration(format!(
                "Parameters '{}' and '{}' are mutually exclusive; use '{}'",
                RULES_KEY, LEGACY_RULES_KEY, RULES_KEY
            )));
        }

        let rules = map.get(RULES_KEY).or_else(|| map.get(LEGACY_RULES_KEY));
        if !matches!(rules, Some(Value::Array(_))) {
            return Err(Error::configuration(format!(
                "Parameter '{}' must be an array",
                RULES_KEY
            )));
        }

        serde_json::from_value(config.clone()).map_err(|err| Error::Configuration {
            message: format!("Invalid rule configuration: {}", err),
            source: Some(err.into()),
        })
    }

    /// Build a projector, resolving transform names through `registry`
    pub fn build(&self, registry: &TransformRegistry) -> Result<Projector> {
        let rules = self
            .rules
            .iter()
            .map(|rule| rule.build(registry))
            .collect::<Result<Vec<_>>>()?;

        Projector::new(rules)
    }
}

impl RuleConfig {
    /// Build a rule, resolving its transform
    pub fn build(&self, registry: &TransformRegistry) -> Result<Rule> {
        let transform = match (&self.transform, &self.projector) {
            (Some(_), Some(_)) => {
                return Err(Error::configuration(format!(
                    "Rule '{}' cannot have both 'transform' and 'projector'",
                    self.field
                )));
            }
            (Some(name), None) => registry.resolve(name)?,
            (None, Some(nested)) => Transform::Nested(Arc::new(nested.build(registry)?)),
            (None, None) => Transform::Copy,
        };

        let mut rule = Rule::new(self.field.clone()).with_transform(transform);
        rule.alias = self.alias.clone();
        Ok(rule)
    }
}

/// Named scalar transforms available to JSON configurations
#[derive(Debug, Clone, Default)]
pub struct TransformRegistry {
    transforms: HashMap<String, Transform>,
}

impl TransformRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in transforms
    pub fn with_built_ins() -> Self {
        let mut registry = Self::new();
        for (name, transform) in built_in::all() {
            registry.transforms.insert(name.to_string(), transform);
        }
        registry
    }

    /// Register a scalar transform under `name`, replacing any previous entry
    pub fn register<F>(&mut self, name: impl Into<String>, function: F) -> &mut Self
    where
        F: Fn(&Value, &Value) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        let name = name.into();
        let transform = Transform::scalar(function).named(name.clone());
        self.transforms.insert(name, transform);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.transforms.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.transforms.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    fn resolve(&self, name: &str) -> Result<Transform> {
        match self.transforms.get(name) {
            Some(transform) => Ok(transform.clone()),
            None => {
                log::warn!("Unknown transform '{}' referenced in projector configuration", name);
                Err(Error::configuration(format!(
                    "Unknown transform '{}' (available: {})",
                    name,
                    self.names().join(", ")
                )))
            }
        }
    }
}

impl Projector {
    /// Create a projector from a JSON configuration value
    pub fn from_config(config: &Value, registry: &TransformRegistry) -> Result<Self> {
        ProjectorConfig::from_value(config)?.build(registry)
    }

    /// Create a projector from JSON configuration text
    pub fn from_json_str(text: &str, registry: &TransformRegistry) -> Result<Self> {
        let config: Value = serde_json::from_str(text)?;
        Self::from_config(&config, registry)
    }
}
