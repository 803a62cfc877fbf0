//! # Schema Error Types
//!
//! Errors raised while accepting a schema. All of them are construction-time
//! failures: a schema that produces one of these never becomes a usable
//! `SchemaTree`, and the caller has to supply a corrected schema.
//!
//! ## Error Categories
//!
//! - **Graph shape**: dangling, conflicting, cyclic or disconnected references
//! - **Entity shape**: empty identifiers, reference column lists that cannot be joined
//! - **Loading**: file I/O and YAML/JSON parsing of a schema document

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SchemaError {
    #[error("Entity `{entity}` references undefined entity `{referenced}`")]
    DanglingReference { entity: String, referenced: String },

    #[error(
        "Entities `{entity}` and `{referenced}` reference each other; a reference edge may only be declared once"
    )]
    ConflictingReference { entity: String, referenced: String },

    #[error("Schema references form a cycle through entity `{entity}`")]
    Cyclic { entity: String },

    #[error("Schema is disconnected: entities {unreachable:?} cannot be reached from `{root}`")]
    Disconnected {
        root: String,
        unreachable: Vec<String>,
    },

    #[error("Reference from `{entity}` to `{referenced}` is malformed: {reason}")]
    MalformedReference {
        entity: String,
        referenced: String,
        reason: String,
    },

    #[error("Entity `{entity}` has an empty identifier")]
    EmptyIdentifier { entity: String },

    #[error("Failed to read schema file: {error}")]
    ConfigRead { error: String },

    #[error("Failed to parse schema: {error}")]
    ConfigParse { error: String },
}

impl SchemaError {
    /// Create a `MalformedReference` error for the `entity -> referenced` edge
    pub fn malformed_reference(
        entity: impl Into<String>,
        referenced: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        SchemaError::MalformedReference {
            entity: entity.into(),
            referenced: referenced.into(),
            reason: reason.into(),
        }
    }
}
