// crates/chronopin-resources/tests/static_lifecycle.rs
// ============================================================================
// Module: Static Time Lifecycle Tests
// Description: Exercises create, read, delete, and import on the static-time resource.
// Purpose: Verify identity pinning, field derivation, and failure behavior end to end.
// ============================================================================

//! ## Overview
//! Lifecycle tests for the static-time resource: identity assignment from
//! explicit and defaulted inputs, re-derivation on read, hard failures on
//! malformed inputs and corrupted identities, and no-op deletion.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::collections::BTreeMap;

use chronopin_core::FieldValue;
use chronopin_core::LifecycleError;
use chronopin_core::RecordId;
use chronopin_core::RecordState;
use chronopin_core::ResourceConfig;
use chronopin_core::ResourceLifecycle;
use chronopin_core::core::time::parse_canonical;
use chronopin_resources::FixedClock;
use chronopin_resources::StaticTimeResource;
use time::OffsetDateTime;
use time::macros::datetime;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Builds a resource whose clock is pinned to the given instant.
fn resource_at(instant: OffsetDateTime) -> StaticTimeResource {
    StaticTimeResource::with_clock(FixedClock::new(instant))
}

/// Builds empty state bound to the resource's schema.
fn state_for(resource: &StaticTimeResource) -> RecordState {
    RecordState::new(resource.schema())
}

/// Builds a configuration with a single rfc3339 input.
fn timestamp_config(input: &str) -> ResourceConfig {
    let mut config = ResourceConfig::new();
    config.insert("rfc3339", FieldValue::Text(input.to_string()));
    config
}

/// Builds a single-entry keepers map value.
fn keepers_value(key: &str, value: &str) -> FieldValue {
    FieldValue::TextMap(BTreeMap::from([(key.to_string(), value.to_string())]))
}

// ============================================================================
// SECTION: Creation
// ============================================================================

#[test]
fn create_with_explicit_timestamp_pins_identity_and_derives_fields() {
    let resource = StaticTimeResource::new();
    let mut state = state_for(&resource);
    resource.create(&timestamp_config("2020-02-29T16:00:00Z"), &mut state).unwrap();

    assert_eq!(state.id(), Some(&RecordId::from("2020-02-29T16:00:00Z")));
    assert_eq!(state.integer("day"), Some(29));
    assert_eq!(state.integer("hour"), Some(16));
    assert_eq!(state.integer("minute"), Some(0));
    assert_eq!(state.integer("month"), Some(2));
    assert_eq!(state.integer("second"), Some(0));
    assert_eq!(state.integer("year"), Some(2020));
    assert_eq!(state.integer("unix"), Some(1_582_992_000));
    assert_eq!(state.text("rfc3339"), Some("2020-02-29T16:00:00Z"));
    assert_eq!(state.text("unixdate"), Some("Sat Feb 29 16:00:00 UTC 2020"));
    assert_eq!(state.text("rfc822"), Some("29 Feb 20 16:00 UTC"));
    assert_eq!(state.text("rfc822z"), Some("29 Feb 20 16:00 +0000"));
    assert_eq!(state.text("rfc850"), Some("Saturday, 29-Feb-20 16:00:00 UTC"));
    assert_eq!(state.text("rfc1123"), Some("Sat, 29 Feb 2020 16:00:00 UTC"));
    assert_eq!(state.text("rfc1123z"), Some("Sat, 29 Feb 2020 16:00:00 +0000"));
}

#[test]
fn create_without_input_uses_the_clock() {
    let resource = resource_at(datetime!(2021-06-01 08:30:15 UTC));
    let mut state = state_for(&resource);
    resource.create(&ResourceConfig::new(), &mut state).unwrap();

    assert_eq!(state.id(), Some(&RecordId::from("2021-06-01T08:30:15Z")));
    assert_eq!(state.integer("year"), Some(2021));
    assert_eq!(state.integer("month"), Some(6));
    assert_eq!(state.integer("day"), Some(1));
}

#[test]
fn create_with_system_clock_is_near_now() {
    let resource = StaticTimeResource::new();
    let mut state = state_for(&resource);
    resource.create(&ResourceConfig::new(), &mut state).unwrap();

    let identity = state.id().unwrap().as_str().to_string();
    let created = parse_canonical(&identity).unwrap();
    let delta = OffsetDateTime::now_utc() - created;
    assert!(delta.whole_seconds().abs() < 60, "identity {identity} is not near now");
    assert!(created.offset().is_utc());
}

#[test]
fn create_treats_empty_input_as_absent() {
    let resource = resource_at(datetime!(2021-06-01 08:30:15 UTC));
    let mut state = state_for(&resource);
    resource.create(&timestamp_config(""), &mut state).unwrap();
    assert_eq!(state.id(), Some(&RecordId::from("2021-06-01T08:30:15Z")));
}

#[test]
fn create_truncates_fractional_seconds_in_the_identity() {
    let resource = StaticTimeResource::new();
    let mut state = state_for(&resource);
    resource.create(&timestamp_config("2020-02-29T16:00:00.500Z"), &mut state).unwrap();
    assert_eq!(state.id(), Some(&RecordId::from("2020-02-29T16:00:00Z")));
}

#[test]
fn create_preserves_nonzero_offsets() {
    let resource = StaticTimeResource::new();
    let mut state = state_for(&resource);
    resource.create(&timestamp_config("2020-02-29T16:00:00+07:00"), &mut state).unwrap();

    assert_eq!(state.id(), Some(&RecordId::from("2020-02-29T16:00:00+07:00")));
    assert_eq!(state.integer("hour"), Some(16));
    assert_eq!(state.integer("unix"), Some(1_582_966_800));
    assert_eq!(state.text("rfc1123"), Some("Sat, 29 Feb 2020 16:00:00 +0700"));
    assert_eq!(state.text("rfc822z"), Some("29 Feb 20 16:00 +0700"));
}

#[test]
fn create_with_malformed_input_fails_and_leaves_the_record_absent() {
    let resource = StaticTimeResource::new();
    let mut state = state_for(&resource);
    let err = resource.create(&timestamp_config("not-a-time"), &mut state).unwrap_err();

    assert!(matches!(err, LifecycleError::Parse { .. }));
    assert!(err.to_string().starts_with("error parsing rfc3339 (not-a-time)"));
    assert!(state.id().is_none());
    assert_eq!(state.get("unix"), None);
}

#[test]
fn create_persists_keepers_without_affecting_outputs() {
    let resource = StaticTimeResource::new();

    let mut plain = state_for(&resource);
    resource.create(&timestamp_config("2020-02-29T16:00:00Z"), &mut plain).unwrap();

    let mut config = timestamp_config("2020-02-29T16:00:00Z");
    config.insert("keepers", keepers_value("a", "1"));
    let mut kept = state_for(&resource);
    resource.create(&config, &mut kept).unwrap();

    let expected = BTreeMap::from([("a".to_string(), "1".to_string())]);
    assert_eq!(kept.text_map("keepers"), Some(&expected));
    assert_eq!(kept.id(), plain.id());
    for field in ["day", "hour", "minute", "month", "second", "unix", "year"] {
        assert_eq!(kept.integer(field), plain.integer(field), "{field}");
    }
}

// ============================================================================
// SECTION: Read
// ============================================================================

#[test]
fn read_is_idempotent() {
    let resource = StaticTimeResource::new();
    let mut state = state_for(&resource);
    resource.create(&timestamp_config("2020-02-29T16:00:00Z"), &mut state).unwrap();

    let first = state.clone();
    resource.read(&mut state).unwrap();
    assert_eq!(state, first);
}

#[test]
fn read_fails_on_a_corrupted_identity() {
    let resource = StaticTimeResource::new();
    let mut state = state_for(&resource);
    state.set_id(RecordId::from("not-a-time"));
    let err = resource.read(&mut state).unwrap_err();

    assert!(matches!(err, LifecycleError::CorruptIdentity { .. }));
    assert!(err.to_string().starts_with("error parsing record identity (not-a-time)"));
}

#[test]
fn read_fails_without_an_identity() {
    let resource = StaticTimeResource::new();
    let mut state = state_for(&resource);
    let err = resource.read(&mut state).unwrap_err();
    assert!(matches!(err, LifecycleError::Resource(_)));
}

// ============================================================================
// SECTION: Delete and Import
// ============================================================================

#[test]
fn delete_always_succeeds_and_clears_the_record() {
    let resource = StaticTimeResource::new();
    let mut state = state_for(&resource);
    resource.create(&timestamp_config("2020-02-29T16:00:00Z"), &mut state).unwrap();

    resource.delete(&mut state).unwrap();
    assert!(state.id().is_none());
    assert_eq!(state.get("unix"), None);
}

#[test]
fn import_adopts_an_identity_verbatim() {
    let resource = StaticTimeResource::new();
    let mut state = state_for(&resource);
    resource.import(RecordId::from("2021-01-01T00:00:00Z"), &mut state).unwrap();

    assert_eq!(state.id(), Some(&RecordId::from("2021-01-01T00:00:00Z")));
    assert_eq!(state.integer("year"), Some(2021));
    assert_eq!(state.integer("month"), Some(1));
    assert_eq!(state.integer("day"), Some(1));
    assert_eq!(state.text("rfc3339"), Some("2021-01-01T00:00:00Z"));
}

#[test]
fn import_of_an_invalid_identity_fails_as_corrupt() {
    let resource = StaticTimeResource::new();
    let mut state = state_for(&resource);
    let err = resource.import(RecordId::from("not-a-time"), &mut state).unwrap_err();
    assert!(matches!(err, LifecycleError::CorruptIdentity { .. }));
}
