// crates/chronopin-resources/src/static_time.rs
// ============================================================================
// Module: Static Time Resource
// Description: Lifecycle handler for a static point-in-time record.
// Purpose: Capture an instant once, pin it as the identity, and derive all fields from it.
// Dependencies: chronopin-core, time
// ============================================================================

//! ## Overview
//! The static-time resource resolves an instant exactly once at creation: a
//! caller-supplied RFC3339 value when present and non-empty, otherwise the
//! injected clock's current UTC instant. The canonical rendering of that
//! instant becomes the record identity, and every other field is re-derived
//! from the identity on each read. Any change to the `rfc3339` or `keepers`
//! inputs forces replacement; nothing is ever updated in place.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use chronopin_core::FieldFormat;
use chronopin_core::FieldKind;
use chronopin_core::FieldSpec;
use chronopin_core::FieldValue;
use chronopin_core::LifecycleError;
use chronopin_core::RecordId;
use chronopin_core::RecordState;
use chronopin_core::ResourceConfig;
use chronopin_core::ResourceLifecycle;
use chronopin_core::ResourceSchema;
use chronopin_core::core::time::decompose;
use chronopin_core::core::time::format_canonical;
use chronopin_core::core::time::format_rfc822;
use chronopin_core::core::time::format_rfc822z;
use chronopin_core::core::time::format_rfc850;
use chronopin_core::core::time::format_rfc1123;
use chronopin_core::core::time::format_rfc1123z;
use chronopin_core::core::time::format_unix_date;
use chronopin_core::core::time::parse_canonical;
use chronopin_core::core::time::truncate_to_seconds;

use crate::clock::Clock;
use crate::clock::SystemClock;

// ============================================================================
// SECTION: Resource Implementation
// ============================================================================

/// Lifecycle handler for static point-in-time records.
///
/// # Invariants
/// - The identity is assigned once at create or import and never rewritten.
/// - Derived fields are recomputed from the identity on every read; nothing
///   derived is trusted from prior state.
/// - The clock is consulted only when no `rfc3339` input is supplied.
pub struct StaticTimeResource {
    /// Clock used to default the timestamp when no input is supplied.
    clock: Box<dyn Clock + Send + Sync>,
}

impl StaticTimeResource {
    /// Resource type identifier used for registry routing.
    pub const TYPE_ID: &'static str = "static_time";

    /// Creates the resource with the operating-system clock.
    #[must_use]
    pub fn new() -> Self {
        Self {
            clock: Box::new(SystemClock),
        }
    }

    /// Creates the resource with an injected clock.
    #[must_use]
    pub fn with_clock(clock: impl Clock + Send + Sync + 'static) -> Self {
        Self {
            clock: Box::new(clock),
        }
    }
}

impl Default for StaticTimeResource {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceLifecycle for StaticTimeResource {
    fn schema(&self) -> ResourceSchema {
        static_time_schema()
    }

    fn create(
        &self,
        config: &ResourceConfig,
        state: &mut RecordState,
    ) -> Result<(), LifecycleError> {
        let timestamp = match config.text("rfc3339").filter(|input| !input.is_empty()) {
            Some(input) => parse_canonical(input).map_err(|source| LifecycleError::Parse {
                input: input.to_string(),
                source,
            })?,
            None => self.clock.now_utc(),
        };
        let timestamp = truncate_to_seconds(timestamp);

        let identity = render("rfc3339", format_canonical(timestamp))?;
        state.set_id(RecordId::new(identity));
        if let Some(keepers) = config.text_map("keepers") {
            write_field(state, "keepers", FieldValue::TextMap(keepers.clone()))?;
        }

        self.read(state)
    }

    fn read(&self, state: &mut RecordState) -> Result<(), LifecycleError> {
        let Some(id) = state.id() else {
            return Err(LifecycleError::Resource("record has no identity".to_string()));
        };
        let timestamp =
            parse_canonical(id.as_str()).map_err(|source| LifecycleError::CorruptIdentity {
                identity: id.to_string(),
                source,
            })?;
        let parts = decompose(timestamp);

        write_field(state, "day", FieldValue::Integer(i64::from(parts.day)))?;
        write_field(state, "hour", FieldValue::Integer(i64::from(parts.hour)))?;
        write_field(state, "minute", FieldValue::Integer(i64::from(parts.minute)))?;
        write_field(state, "month", FieldValue::Integer(i64::from(parts.month)))?;
        write_text(state, "rfc822", format_rfc822(timestamp))?;
        write_text(state, "rfc822z", format_rfc822z(timestamp))?;
        write_text(state, "rfc850", format_rfc850(timestamp))?;
        write_text(state, "rfc1123", format_rfc1123(timestamp))?;
        write_text(state, "rfc1123z", format_rfc1123z(timestamp))?;
        write_text(state, "rfc3339", format_canonical(timestamp))?;
        write_field(state, "second", FieldValue::Integer(i64::from(parts.second)))?;
        write_field(state, "unix", FieldValue::Integer(parts.unix))?;
        write_text(state, "unixdate", format_unix_date(timestamp))?;
        write_field(state, "year", FieldValue::Integer(i64::from(parts.year)))?;
        Ok(())
    }
}

// ============================================================================
// SECTION: Schema
// ============================================================================

/// Builds the static-time resource schema.
fn static_time_schema() -> ResourceSchema {
    ResourceSchema::new(BTreeMap::from([
        ("day".to_string(), FieldSpec::computed(FieldKind::Integer)),
        ("hour".to_string(), FieldSpec::computed(FieldKind::Integer)),
        ("keepers".to_string(), FieldSpec::optional_input(FieldKind::TextMap, true)),
        ("minute".to_string(), FieldSpec::computed(FieldKind::Integer)),
        ("month".to_string(), FieldSpec::computed(FieldKind::Integer)),
        ("rfc822".to_string(), FieldSpec::computed(FieldKind::Text)),
        ("rfc822z".to_string(), FieldSpec::computed(FieldKind::Text)),
        ("rfc850".to_string(), FieldSpec::computed(FieldKind::Text)),
        ("rfc1123".to_string(), FieldSpec::computed(FieldKind::Text)),
        ("rfc1123z".to_string(), FieldSpec::computed(FieldKind::Text)),
        (
            "rfc3339".to_string(),
            FieldSpec::optional_input_computed(FieldKind::Text, true)
                .with_format(FieldFormat::Rfc3339Timestamp),
        ),
        ("second".to_string(), FieldSpec::computed(FieldKind::Integer)),
        ("unix".to_string(), FieldSpec::computed(FieldKind::Integer)),
        ("unixdate".to_string(), FieldSpec::computed(FieldKind::Text)),
        ("year".to_string(), FieldSpec::computed(FieldKind::Integer)),
    ]))
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Writes a field value, naming the field in any failure.
fn write_field(
    state: &mut RecordState,
    field: &str,
    value: FieldValue,
) -> Result<(), LifecycleError> {
    state.set(field, value).map_err(|source| LifecycleError::FieldWrite {
        field: field.to_string(),
        source,
    })
}

/// Writes a rendered text field, naming the field in any failure.
fn write_text(
    state: &mut RecordState,
    field: &str,
    rendered: Result<String, time::error::Format>,
) -> Result<(), LifecycleError> {
    let value = render(field, rendered)?;
    write_field(state, field, FieldValue::Text(value))
}

/// Unwraps a rendering result, naming the field in any failure.
fn render(
    field: &str,
    rendered: Result<String, time::error::Format>,
) -> Result<String, LifecycleError> {
    rendered.map_err(|source| LifecycleError::Format {
        field: field.to_string(),
        source,
    })
}
