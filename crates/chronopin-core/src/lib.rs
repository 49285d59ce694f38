// crates/chronopin-core/src/lib.rs
// ============================================================================
// Module: Chronopin Core
// Description: Record model, resource schemas, timestamp codec, and lifecycle contract.
// Purpose: Define the contract surface a declarative-infrastructure host drives.
// Dependencies: serde, thiserror, time
// ============================================================================

//! ## Overview
//! Chronopin captures a static point in time as a schema-managed resource
//! record: the canonical RFC3339 rendering of the instant is the record's
//! immutable identity, and every other field is re-derived from that string
//! on each read. This crate defines the data model, the timestamp codec, the
//! host-facing lifecycle contract, and the replacement planner.
//! Invariants:
//! - Derived fields are a pure function of the identity string.
//! - An identity that fails to parse is an unrecoverable read error.
//! - Changes to replacement-forcing inputs plan destroy-then-create, never
//!   an in-place edit.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use interfaces::LifecycleError;
pub use interfaces::ResourceLifecycle;

pub use self::core::identifiers::RecordId;
pub use self::core::identifiers::ResourceTypeId;
pub use self::core::record::FieldValue;
pub use self::core::record::FieldWriteError;
pub use self::core::record::RecordState;
pub use self::core::record::ResourceConfig;
pub use self::core::schema::FieldFormat;
pub use self::core::schema::FieldKind;
pub use self::core::schema::FieldSpec;
pub use self::core::schema::ResourceSchema;
pub use self::core::schema::SchemaError;
pub use self::core::time::TimestampParts;
