//! Pluck Core - Declarative field projection for JSON records
//!
//! This crate whitelists, renames and transforms fields of a JSON record
//! according to a list of rules, producing a new record.
//!
//! # Main Components
//!
//! - **Error Handling**: Error types using `thiserror` and `anyhow`
//! - **Core Types**: Records and value classification
//! - **Projection Engine**: Rules, dotted paths and the [`Projector`]
//!
//! # Example
//!
//! ```
//! use pluck_core::{Projector, Result, Rule};
//! use serde_json::json;
//!
//! fn example() -> Result<()> {
//!     let projector = Projector::builder()
//!         .rule(Rule::new("a").alias("x"))
//!         .rule(Rule::new("b").alias("y"))
//!         .build()?;
//!
//!     let output = projector.project(&json!({"a": 1, "b": 2, "c": 3}))?;
//!     assert_eq!(output, json!({"x": 1, "y": 2}));
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

pub mod error;
pub mod types;
pub mod projection;

// Re-export main types for convenience
pub use error::{Error, Result};
pub use types::{Record, ValueKind};
pub use projection::{
    FieldPath, Projection, Projector, ProjectorBuilder, ProjectorConfig, Rule, RuleConfig,
    ScalarFn, Transform, TransformRegistry,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
