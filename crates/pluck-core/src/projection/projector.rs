//! The projection engine
//!
//! A [`Projector`] owns an ordered, immutable set of [`Rule`]s and applies
//! them to one source record at a time. It keeps no state between calls, so
//! a single instance can be shared freely (including across threads and as
//! the nested transform of other projectors).
//!
//! Copyright (c) 2025 Pluck Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use crate::types::{Record, ValueKind};
use super::rule::{Projection, Rule, RulePaths};
use serde_json::Value;

/// Applies an ordered rule set to records
#[derive(Debug, Clone)]
pub struct Projector {
    rules: Vec<Rule>,
    paths: Vec<RulePaths>,
}

impl Projector {
    /// Create a projector from a rule set
    ///
    /// Fails with [`Error::Configuration`] when `rules` is empty. Rule paths
    /// are tokenized here, but a malformed path is only reported by the
    /// `project` calls that reach it.
    pub fn new(rules: Vec<Rule>) -> Result<Self> {
        if rules.is_empty() {
            return Err(Error::configuration("Parameter 'rules' must not be empty"));
        }

        let paths = rules.iter().map(RulePaths::compile).collect();
        Ok(Self { rules, paths })
    }

    /// Start building a projector rule by rule
    pub fn builder() -> ProjectorBuilder {
        ProjectorBuilder::default()
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Project `source` into a fresh record
    pub fn project(&self, source: &Value) -> Result<Value> {
        let mut destination = Record::new();
        self.project_into(source, &mut destination)?;
        Ok(Value::Object(destination))
    }

    /// Project `source` into an existing record
    ///
    /// Rules run in order. If a rule fails, the fields written by earlier
    /// rules stay in `destination`.
    pub fn project_into(&self, source: &Value, destination: &mut Record) -> Result<()> {
        if !source.is_object() {
            return Err(Error::not_a_record(ValueKind::of(source), None));
        }

        for (rule, paths) in self.rules.iter().zip(&self.paths) {
            rule.apply(paths, source, destination)?;
        }

        Ok(())
    }
}

impl Projection for Projector {
    fn apply_to(&self, value: &Value) -> Result<Value> {
        self.project(value)
    }
}

/// Builder for creating projectors
#[derive(Debug, Default)]
pub struct ProjectorBuilder {
    rules: Vec<Rule>,
}

impl ProjectorBuilder {
    /// Append a rule
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Append a plain copy rule for each field
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rules.extend(fields.into_iter().map(Rule::new));
        self
    }

    /// Append multiple rules
    pub fn rules<I>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = Rule>,
    {
        self.rules.extend(rules);
        self
    }

    /// Build the projector
    pub fn build(self) -> Result<Projector> {
        Projector::new(self.rules)
    }
}
