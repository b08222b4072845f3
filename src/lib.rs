//! # Intake
//!
//! Declarative filtering, coercion and validation of untrusted input for Rust services.
//!
//! ## Features
//!
//! - **Whitelist Filtering**: Undeclared keys never reach your code
//! - **Canonical Coercion**: `"36"` becomes `36`, `" Ada "` becomes `"Ada"`, RFC 3339 strings become timestamps
//! - **Mirrored Error Trees**: Every error sits at the same path as the value that caused it
//! - **Declaration Order**: Outputs and error projections keep the order fields were declared in
//! - **Composable Shapes**: Sequences and mappings nest to any depth
//! - **Custom Messages**: Swap the message renderer, keep the stable codes
//! - **Share Everywhere**: Schemas are immutable and `Send + Sync`
//!
//! ## Quick Start
//!
//! ```rust
//! use intake::prelude::*;
//! use serde_json::json;
//!
//! let schema = Schema::builder()
//!     .string("name", StringOptions::default())
//!     .integer("age", IntegerOptions { min: Some(0), ..Default::default() })
//!     .boolean("admin", BooleanOptions::default())
//!     .build();
//!
//! // Caller input arrives stringly typed and over-sharing
//! let outcome = schema.feed(json!({
//!     "name": "  Ada  ",
//!     "age": "36",
//!     "admin": "true",
//!     "role": "superuser"
//! }));
//!
//! assert!(outcome.success());
//! let record = outcome.value().and_then(Value::as_object).unwrap();
//! assert_eq!(record["name"], Value::from("Ada"));
//! assert_eq!(record["age"], Value::Integer(36));
//! assert_eq!(record["admin"], Value::Boolean(true));
//! assert!(!record.contains_key("role"));
//!
//! // Failures mirror the input shape, as codes and as prose
//! let outcome = schema.feed(json!({ "age": -1, "admin": false }));
//! assert!(!outcome.success());
//! assert_eq!(
//!     outcome.errors().unwrap().codes(),
//!     json!({ "name": "required", "age": "min" }),
//! );
//! assert_eq!(
//!     outcome.messages(&DefaultMessages),
//!     vec!["Name is required", "Age must be at least 0"],
//! );
//! ```

pub mod errors;
pub mod filters;
pub mod inflect;
pub mod outcome;
pub mod schema;
pub mod unit;
pub mod value;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Schema ===
    pub use crate::schema::{ElementBuilder, Schema, SchemaBuilder};

    // === Filters ===
    pub use crate::filters::{
        AnyFilter, AnyOptions, BooleanFilter, BooleanOptions, CommonOptions, DateFilter,
        DateOptions, DecimalFilter, DecimalOptions, Filter, FloatFilter, FloatOptions,
        IntegerFilter, IntegerOptions, MappingFilter, MappingOptions, Policy, SequenceFilter,
        SequenceOptions, StringFilter, StringOptions, TimeFilter, TimeOptions, UuidFilter,
        UuidOptions,
    };

    // === Outcomes ===
    pub use crate::outcome::{Feed, Invalid, Outcome};

    // === Errors ===
    pub use crate::errors::{
        DefaultMessages, ErrorArray, ErrorAtom, ErrorCode, ErrorContext, ErrorHash, ErrorNode,
        MessageRenderer,
    };

    // === Values ===
    pub use crate::value::{Object, Value};

    // === Units ===
    pub use crate::unit::Unit;

    // === External dependencies ===
    pub use chrono::{DateTime, NaiveDate, Utc};
    pub use indexmap::IndexMap;
    pub use rust_decimal::Decimal;
    pub use uuid::Uuid;
}
