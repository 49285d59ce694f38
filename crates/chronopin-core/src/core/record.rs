// crates/chronopin-core/src/core/record.rs
// ============================================================================
// Module: Chronopin Record State
// Description: Field values, caller configuration, and schema-bound record state.
// Purpose: Provide the single mutable record value lifecycle handlers operate on.
// Dependencies: crate::core::{identifiers, schema}, serde, thiserror
// ============================================================================

//! ## Overview
//! A record is the only durable value in Chronopin: an optional identity plus
//! a table of named field values, bound to the schema of the resource that
//! owns it. Every field write is validated against that schema and fails per
//! field, so a rejected write can be reported with the exact field name and
//! no partially written state is ever considered valid.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::identifiers::RecordId;
use crate::core::schema::FieldKind;
use crate::core::schema::ResourceSchema;

// ============================================================================
// SECTION: Field Values
// ============================================================================

/// Value held by a record field or supplied in caller configuration.
///
/// # Invariants
/// - The wire form is untagged; the JSON shape alone determines the variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Signed 64-bit integer value.
    Integer(i64),
    /// UTF-8 text value.
    Text(String),
    /// Map of text keys to text values.
    TextMap(BTreeMap<String, String>),
}

impl FieldValue {
    /// Returns the field kind of this value.
    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        match self {
            Self::Integer(_) => FieldKind::Integer,
            Self::Text(_) => FieldKind::Text,
            Self::TextMap(_) => FieldKind::TextMap,
        }
    }

    /// Returns the integer value when this is an integer field.
    #[must_use]
    pub const fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            Self::Text(_) | Self::TextMap(_) => None,
        }
    }

    /// Returns the text value when this is a text field.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            Self::Integer(_) | Self::TextMap(_) => None,
        }
    }

    /// Returns the map value when this is a text map field.
    #[must_use]
    pub const fn as_text_map(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            Self::TextMap(value) => Some(value),
            Self::Integer(_) | Self::Text(_) => None,
        }
    }
}

// ============================================================================
// SECTION: Caller Configuration
// ============================================================================

/// Caller-supplied desired configuration for a resource.
///
/// # Invariants
/// - Values are untrusted until validated against the resource schema.
/// - Absent fields are candidates for handler defaulting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceConfig {
    /// Desired input values keyed by field name.
    pub fields: BTreeMap<String, FieldValue>,
}

impl ResourceConfig {
    /// Creates an empty configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fields: BTreeMap::new(),
        }
    }

    /// Inserts a desired input value.
    pub fn insert(&mut self, field: impl Into<String>, value: FieldValue) {
        self.fields.insert(field.into(), value);
    }

    /// Returns the text value for a field, if present.
    #[must_use]
    pub fn text(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(FieldValue::as_text)
    }

    /// Returns the map value for a field, if present.
    #[must_use]
    pub fn text_map(&self, field: &str) -> Option<&BTreeMap<String, String>> {
        self.fields.get(field).and_then(FieldValue::as_text_map)
    }
}

// ============================================================================
// SECTION: Field Write Errors
// ============================================================================

/// Per-field record write failures.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum FieldWriteError {
    /// The schema does not declare the field.
    #[error("unknown field: {field}")]
    UnknownField {
        /// Field name that was written.
        field: String,
    },
    /// The value kind does not match the schema field kind.
    #[error("field {field} expects {expected}, got {actual}")]
    KindMismatch {
        /// Field name that was written.
        field: String,
        /// Kind declared by the schema.
        expected: FieldKind,
        /// Kind of the written value.
        actual: FieldKind,
    },
}

// ============================================================================
// SECTION: Record State
// ============================================================================

/// Schema-bound record state for a single resource instance.
///
/// # Invariants
/// - `id` is `None` exactly when the record is absent from tracking.
/// - Every value in `fields` satisfies the bound schema's kind for its name.
/// - The identity, once set, is only removed by deletion, never rewritten
///   with a different instant by lifecycle handlers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordState {
    /// Schema the record is bound to.
    schema: ResourceSchema,
    /// Record identity, absent until creation or import.
    id: Option<RecordId>,
    /// Field values keyed by field name.
    fields: BTreeMap<String, FieldValue>,
}

impl RecordState {
    /// Creates empty record state bound to a schema.
    #[must_use]
    pub const fn new(schema: ResourceSchema) -> Self {
        Self {
            schema,
            id: None,
            fields: BTreeMap::new(),
        }
    }

    /// Returns the record identity, if assigned.
    #[must_use]
    pub const fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    /// Assigns the record identity.
    pub fn set_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    /// Clears the identity and all field values.
    pub fn clear(&mut self) {
        self.id = None;
        self.fields.clear();
    }

    /// Returns the schema the record is bound to.
    #[must_use]
    pub const fn schema(&self) -> &ResourceSchema {
        &self.schema
    }

    /// Writes a field value, validating it against the bound schema.
    ///
    /// # Errors
    ///
    /// Returns [`FieldWriteError`] when the field is undeclared or the value
    /// kind does not match the schema.
    pub fn set(&mut self, field: &str, value: FieldValue) -> Result<(), FieldWriteError> {
        let Some(spec) = self.schema.field(field) else {
            return Err(FieldWriteError::UnknownField {
                field: field.to_string(),
            });
        };
        if value.kind() != spec.kind {
            return Err(FieldWriteError::KindMismatch {
                field: field.to_string(),
                expected: spec.kind,
                actual: value.kind(),
            });
        }
        self.fields.insert(field.to_string(), value);
        Ok(())
    }

    /// Returns the value for a field, if set.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Returns the integer value for a field, if set.
    #[must_use]
    pub fn integer(&self, field: &str) -> Option<i64> {
        self.fields.get(field).and_then(FieldValue::as_integer)
    }

    /// Returns the text value for a field, if set.
    #[must_use]
    pub fn text(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(FieldValue::as_text)
    }

    /// Returns the map value for a field, if set.
    #[must_use]
    pub fn text_map(&self, field: &str) -> Option<&BTreeMap<String, String>> {
        self.fields.get(field).and_then(FieldValue::as_text_map)
    }
}
