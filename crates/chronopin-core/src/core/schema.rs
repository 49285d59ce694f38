// crates/chronopin-core/src/core/schema.rs
// ============================================================================
// Module: Chronopin Resource Schema
// Description: Declarative field schemas for lifecycle-managed resources.
// Purpose: Describe field kinds, input/computed roles, and replacement triggers.
// Dependencies: crate::core::{record, time}, serde, thiserror, time
// ============================================================================

//! ## Overview
//! A resource schema declares the fields a resource exposes to the host
//! engine: which are caller inputs, which are computed outputs, which force
//! replacement when changed, and what value format an input must satisfy.
//! Caller configuration is untrusted and is validated against the schema at
//! the engine boundary before any lifecycle operation runs.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::record::FieldValue;
use crate::core::record::ResourceConfig;
use crate::core::time::parse_canonical;

// ============================================================================
// SECTION: Field Kinds
// ============================================================================

/// Value kinds a schema field may hold.
///
/// # Invariants
/// - Variants are stable for serialization and contract matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Signed 64-bit integer value.
    Integer,
    /// UTF-8 text value.
    Text,
    /// Map of text keys to text values.
    TextMap,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Integer => "integer",
            Self::Text => "text",
            Self::TextMap => "text map",
        };
        label.fmt(f)
    }
}

/// Value format constraints enforced on input fields at the engine boundary.
///
/// # Invariants
/// - Variants are stable for serialization and contract matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldFormat {
    /// No format constraint beyond the field kind.
    Any,
    /// Text value must parse as an offset-aware RFC3339 timestamp.
    Rfc3339Timestamp,
}

// ============================================================================
// SECTION: Field Specifications
// ============================================================================

/// Specification for a single schema field.
///
/// # Invariants
/// - A field with `input == false` can only be written by lifecycle handlers.
/// - `forces_replacement` is only meaningful for input fields.
/// - `format` is only enforced for input fields of kind [`FieldKind::Text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Value kind for the field.
    pub kind: FieldKind,
    /// Indicates whether callers may supply this field in configuration.
    pub input: bool,
    /// Indicates whether lifecycle handlers compute this field.
    pub computed: bool,
    /// Indicates whether a change to this input forces record replacement.
    pub forces_replacement: bool,
    /// Value format constraint applied to caller-supplied values.
    pub format: FieldFormat,
}

impl FieldSpec {
    /// Creates an output-only computed field.
    #[must_use]
    pub const fn computed(kind: FieldKind) -> Self {
        Self {
            kind,
            input: false,
            computed: true,
            forces_replacement: false,
            format: FieldFormat::Any,
        }
    }

    /// Creates an optional caller input field.
    #[must_use]
    pub const fn optional_input(kind: FieldKind, forces_replacement: bool) -> Self {
        Self {
            kind,
            input: true,
            computed: false,
            forces_replacement,
            format: FieldFormat::Any,
        }
    }

    /// Creates an optional caller input that is computed when absent.
    #[must_use]
    pub const fn optional_input_computed(kind: FieldKind, forces_replacement: bool) -> Self {
        Self {
            kind,
            input: true,
            computed: true,
            forces_replacement,
            format: FieldFormat::Any,
        }
    }

    /// Attaches a value format constraint to the field.
    #[must_use]
    pub const fn with_format(mut self, format: FieldFormat) -> Self {
        self.format = format;
        self
    }
}

// ============================================================================
// SECTION: Schema Errors
// ============================================================================

/// Configuration validation errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Configuration names a field the schema does not declare.
    #[error("unknown field: {field}")]
    UnknownField {
        /// Field name supplied by the caller.
        field: String,
    },
    /// Configuration assigns a field that is not a caller input.
    #[error("field is not an input: {field}")]
    NotInput {
        /// Field name supplied by the caller.
        field: String,
    },
    /// Configuration value kind does not match the schema field kind.
    #[error("field {field} expects {expected}, got {actual}")]
    KindMismatch {
        /// Field name supplied by the caller.
        field: String,
        /// Kind declared by the schema.
        expected: FieldKind,
        /// Kind of the supplied value.
        actual: FieldKind,
    },
    /// Configuration value fails the field's RFC3339 format constraint.
    #[error("field {field} is not a valid rfc3339 timestamp ({input}): {source}")]
    InvalidTimestamp {
        /// Field name supplied by the caller.
        field: String,
        /// Offending value supplied by the caller.
        input: String,
        /// Underlying parse diagnostic.
        #[source]
        source: time::error::Parse,
    },
}

// ============================================================================
// SECTION: Resource Schema
// ============================================================================

/// Declarative schema for a lifecycle-managed resource.
///
/// # Invariants
/// - Field names are unique within the schema.
/// - Validation is fail-closed: any undeclared or malformed input is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSchema {
    /// Field specifications keyed by field name.
    fields: BTreeMap<String, FieldSpec>,
}

impl ResourceSchema {
    /// Creates a schema from a field specification table.
    #[must_use]
    pub const fn new(fields: BTreeMap<String, FieldSpec>) -> Self {
        Self {
            fields,
        }
    }

    /// Returns the specification for a field, if declared.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.get(name)
    }

    /// Iterates over field names and specifications in name order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldSpec)> {
        self.fields.iter().map(|(name, spec)| (name.as_str(), spec))
    }

    /// Validates caller configuration against the schema.
    ///
    /// Empty text inputs are treated as absent and skip format validation;
    /// defaulting is the lifecycle handler's responsibility.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError`] for undeclared fields, assignments to
    /// non-input fields, kind mismatches, or format violations.
    pub fn validate_config(&self, config: &ResourceConfig) -> Result<(), SchemaError> {
        for (name, value) in &config.fields {
            let Some(spec) = self.fields.get(name) else {
                return Err(SchemaError::UnknownField {
                    field: name.clone(),
                });
            };
            if !spec.input {
                return Err(SchemaError::NotInput {
                    field: name.clone(),
                });
            }
            if value.kind() != spec.kind {
                return Err(SchemaError::KindMismatch {
                    field: name.clone(),
                    expected: spec.kind,
                    actual: value.kind(),
                });
            }
            validate_format(name, spec, value)?;
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Validates a single configuration value against the field's format.
fn validate_format(name: &str, spec: &FieldSpec, value: &FieldValue) -> Result<(), SchemaError> {
    match (spec.format, value) {
        (FieldFormat::Rfc3339Timestamp, FieldValue::Text(text)) if !text.is_empty() => {
            match parse_canonical(text) {
                Ok(_) => Ok(()),
                Err(source) => Err(SchemaError::InvalidTimestamp {
                    field: name.to_string(),
                    input: text.clone(),
                    source,
                }),
            }
        }
        _ => Ok(()),
    }
}
