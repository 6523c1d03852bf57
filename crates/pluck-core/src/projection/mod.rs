//! Field projection engine
//!
//! This module projects a subset of fields out of a JSON record into a new
//! record, optionally renaming them into other (nested) positions and
//! transforming their values.
//!
//! # Module Organization
//!
//! - [`path`] - Dotted path tokenizing, reading and writing
//! - [`rule`] - Rules, transforms and the [`Projection`] trait
//! - [`projector`] - The [`Projector`] engine and its builder
//! - [`config`] - JSON configuration and the transform registry
//! - [`built_in`] - Named transforms available to configurations
//!
//! # Examples
//!
//! ```
//! use pluck_core::{Projector, Rule};
//! use serde_json::json;
//!
//! let projector = Projector::builder()
//!     .rule(Rule::new("a").alias("nested.x"))
//!     .rule(Rule::new("b").alias("nested.y").transform(|v, _| Ok(json!(format!("XX{}XX", v)))))
//!     .build()
//!     .unwrap();
//!
//! let output = projector.project(&json!({"a": 1, "b": 2, "c": 3})).unwrap();
//! assert_eq!(output, json!({"nested": {"x": 1, "y": "XX2XX"}}));
//! ```
//!
//! Projectors nest:
//!
//! ```
//! use pluck_core::{Projector, Rule};
//! use serde_json::json;
//!
//! let inner = Projector::builder().fields(["a", "b"]).build().unwrap();
//! let outer = Projector::builder()
//!     .rule(Rule::new("nested").nested(inner))
//!     .build()
//!     .unwrap();
//!
//! let output = outer.project(&json!({"nested": {"a": 1, "b": 2, "c": 3}})).unwrap();
//! assert_eq!(output, json!({"nested": {"a": 1, "b": 2}}));
//! ```
//!
//! Copyright (c) 2025 Pluck Team
//! Licensed under the Apache-2.0 license

pub mod path;
pub mod rule;
pub mod projector;
pub mod config;
pub mod built_in;


pub use path::FieldPath;
pub use rule::{Projection, Rule, ScalarFn, Transform};
pub use projector::{Projector, ProjectorBuilder};
pub use config::{ProjectorConfig, RuleConfig, TransformRegistry};
