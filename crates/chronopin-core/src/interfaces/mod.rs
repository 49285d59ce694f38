// crates/chronopin-core/src/interfaces/mod.rs
// ============================================================================
// Module: Chronopin Interfaces
// Description: Host-facing lifecycle contract for schema-driven resources.
// Purpose: Define the entry points an orchestration engine drives against a record.
// Dependencies: crate::core, thiserror, time
// ============================================================================

//! ## Overview
//! The lifecycle contract is the only boundary between Chronopin and the
//! host orchestration engine: four named entry points (create, read, delete,
//! import) implemented by stateless handler types with no side effects
//! beyond the record passed in. Handlers must be deterministic with respect
//! to their inputs and fail closed; errors propagate to the host unchanged,
//! with no local retry.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::identifiers::RecordId;
use crate::core::record::FieldWriteError;
use crate::core::record::RecordState;
use crate::core::record::ResourceConfig;
use crate::core::schema::ResourceSchema;
use crate::core::schema::SchemaError;

// ============================================================================
// SECTION: Lifecycle Errors
// ============================================================================

/// Lifecycle operation errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - Messages are surfaced verbatim to the host engine's user.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// Caller-supplied timestamp failed to parse at creation.
    #[error("error parsing rfc3339 ({input}): {source}")]
    Parse {
        /// Offending caller input.
        input: String,
        /// Underlying parse diagnostic.
        #[source]
        source: time::error::Parse,
    },
    /// Stored record identity failed to re-parse at read.
    #[error("error parsing record identity ({identity}): {source}")]
    CorruptIdentity {
        /// Identity string that no longer parses.
        identity: String,
        /// Underlying parse diagnostic.
        #[source]
        source: time::error::Parse,
    },
    /// A derived field could not be written into the record.
    #[error("error setting {field}: {source}")]
    FieldWrite {
        /// Field that failed to write.
        field: String,
        /// Underlying write rejection.
        #[source]
        source: FieldWriteError,
    },
    /// A derived field could not be rendered.
    #[error("error formatting {field}: {source}")]
    Format {
        /// Field that failed to render.
        field: String,
        /// Underlying formatting failure.
        #[source]
        source: time::error::Format,
    },
    /// Caller configuration was rejected by schema validation.
    #[error("invalid configuration: {0}")]
    Schema(#[from] SchemaError),
    /// Resource routing failed.
    #[error("resource error: {0}")]
    Resource(String),
}

// ============================================================================
// SECTION: Resource Lifecycle
// ============================================================================

/// Host-driven lifecycle contract for a schema-managed resource.
///
/// Handlers are stateless with respect to records: all durable state lives
/// in the [`RecordState`] passed to each call, and concurrent calls over
/// distinct records need no coordination.
pub trait ResourceLifecycle {
    /// Returns the resource schema.
    fn schema(&self) -> ResourceSchema;

    /// Creates the record: resolves inputs, assigns the identity, and
    /// populates derived fields via [`ResourceLifecycle::read`].
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError`] when an input is malformed or a derived
    /// field cannot be populated; the record is left without an accepted
    /// identity in the host's tracking.
    fn create(
        &self,
        config: &ResourceConfig,
        state: &mut RecordState,
    ) -> Result<(), LifecycleError>;

    /// Re-derives every output field from the record identity.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError`] when the identity no longer parses or a
    /// field write fails; no partially refreshed record is valid.
    fn read(&self, state: &mut RecordState) -> Result<(), LifecycleError>;

    /// Removes the record from tracking.
    ///
    /// The default succeeds unconditionally: resources with no external
    /// footprint only clear their own bookkeeping.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError`] when a resource with an external footprint
    /// fails to release it.
    fn delete(&self, state: &mut RecordState) -> Result<(), LifecycleError> {
        state.clear();
        Ok(())
    }

    /// Adopts a pre-existing identity verbatim and populates derived fields.
    ///
    /// The default is a passthrough: the identity is taken as supplied and
    /// [`ResourceLifecycle::read`] does the rest.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError`] when the supplied identity does not parse
    /// or a field write fails.
    fn import(&self, identity: RecordId, state: &mut RecordState) -> Result<(), LifecycleError> {
        state.set_id(identity);
        self.read(state)
    }
}
