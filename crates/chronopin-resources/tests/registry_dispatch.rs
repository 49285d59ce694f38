// crates/chronopin-resources/tests/registry_dispatch.rs
// ============================================================================
// Module: Registry Dispatch Tests
// Description: Exercises lifecycle routing and validation through the registry.
// Purpose: Verify type-id routing, boundary validation, and replacement planning.
// ============================================================================

//! ## Overview
//! Registry tests: built-in registration, duplicate and unknown type
//! handling, configuration validation before create, and the full
//! plan/destroy/create replacement walkthrough a host engine drives.

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
use chronopin_core::ResourceTypeId;
use chronopin_core::runtime::PlanAction;
use chronopin_resources::ResourceRegistry;
use chronopin_resources::StaticTimeResource;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns the built-in static-time type identifier.
fn static_time() -> ResourceTypeId {
    ResourceTypeId::from(StaticTimeResource::TYPE_ID)
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
// SECTION: Registration and Routing
// ============================================================================

#[test]
fn builtin_registry_creates_and_reads_static_time() {
    let registry = ResourceRegistry::with_builtin_resources().unwrap();
    let type_id = static_time();
    let mut state = registry.new_state(&type_id).unwrap();

    registry.create(&type_id, &timestamp_config("2020-02-29T16:00:00Z"), &mut state).unwrap();
    assert_eq!(state.id(), Some(&RecordId::from("2020-02-29T16:00:00Z")));

    registry.read(&type_id, &mut state).unwrap();
    assert_eq!(state.integer("unix"), Some(1_582_992_000));
}

#[test]
fn registry_rejects_duplicate_registration() {
    let mut registry = ResourceRegistry::with_builtin_resources().unwrap();
    let err = registry
        .register_resource(StaticTimeResource::TYPE_ID, StaticTimeResource::new())
        .unwrap_err();
    assert!(matches!(err, LifecycleError::Resource(_)));
    assert!(err.to_string().contains("already registered"));
}

#[test]
fn registry_rejects_unknown_type_ids() {
    let registry = ResourceRegistry::with_builtin_resources().unwrap();
    let type_id = ResourceTypeId::from("rotating_time");
    let err = registry.schema(&type_id).unwrap_err();
    assert!(matches!(err, LifecycleError::Resource(_)));
    assert!(err.to_string().contains("not registered"));
}

#[test]
fn new_state_is_bound_to_the_resource_schema() {
    let registry = ResourceRegistry::with_builtin_resources().unwrap();
    let mut state = registry.new_state(&static_time()).unwrap();
    assert!(state.set("no_such_field", FieldValue::Integer(1)).is_err());
}

// ============================================================================
// SECTION: Boundary Validation
// ============================================================================

#[test]
fn create_rejects_undeclared_configuration_fields() {
    let registry = ResourceRegistry::with_builtin_resources().unwrap();
    let type_id = static_time();
    let mut state = registry.new_state(&type_id).unwrap();

    let mut config = ResourceConfig::new();
    config.insert("interval", FieldValue::Text("24h".to_string()));
    let err = registry.create(&type_id, &config, &mut state).unwrap_err();
    assert!(matches!(err, LifecycleError::Schema(_)));
    assert!(state.id().is_none());
}

#[test]
fn create_rejects_assignment_of_computed_fields() {
    let registry = ResourceRegistry::with_builtin_resources().unwrap();
    let type_id = static_time();
    let mut state = registry.new_state(&type_id).unwrap();

    let mut config = ResourceConfig::new();
    config.insert("unix", FieldValue::Integer(0));
    let err = registry.create(&type_id, &config, &mut state).unwrap_err();
    assert!(matches!(err, LifecycleError::Schema(_)));
}

#[test]
fn validate_rejects_malformed_timestamps_before_apply() {
    let registry = ResourceRegistry::with_builtin_resources().unwrap();
    let err = registry.validate(&static_time(), &timestamp_config("not-a-time")).unwrap_err();
    assert!(matches!(err, LifecycleError::Schema(_)));
    assert!(err.to_string().contains("not-a-time"));
}

// ============================================================================
// SECTION: Replacement Planning
// ============================================================================

#[test]
fn plan_is_noop_when_nothing_changed() {
    let registry = ResourceRegistry::with_builtin_resources().unwrap();
    let type_id = static_time();
    let mut state = registry.new_state(&type_id).unwrap();

    let mut config = timestamp_config("2020-02-29T16:00:00Z");
    config.insert("keepers", keepers_value("a", "1"));
    registry.create(&type_id, &config, &mut state).unwrap();

    let plan = registry.plan(&type_id, &state, &config).unwrap();
    assert_eq!(plan.action, PlanAction::Noop);
}

#[test]
fn keepers_change_forces_replacement() {
    let registry = ResourceRegistry::with_builtin_resources().unwrap();
    let type_id = static_time();
    let mut state = registry.new_state(&type_id).unwrap();

    let mut config = timestamp_config("2020-02-29T16:00:00Z");
    config.insert("keepers", keepers_value("a", "1"));
    registry.create(&type_id, &config, &mut state).unwrap();

    let mut desired = timestamp_config("2020-02-29T16:00:00Z");
    desired.insert("keepers", keepers_value("a", "2"));
    let plan = registry.plan(&type_id, &state, &desired).unwrap();
    assert_eq!(plan.action, PlanAction::Replace);
    assert_eq!(plan.forcing_fields, vec!["keepers".to_string()]);
}

#[test]
fn replacement_walkthrough_assigns_a_new_identity() {
    let registry = ResourceRegistry::with_builtin_resources().unwrap();
    let type_id = static_time();
    let mut state = registry.new_state(&type_id).unwrap();

    registry.create(&type_id, &timestamp_config("2020-02-29T16:00:00Z"), &mut state).unwrap();
    let old_identity = state.id().cloned().unwrap();

    let desired = timestamp_config("2021-01-01T00:00:00Z");
    let plan = registry.plan(&type_id, &state, &desired).unwrap();
    assert_eq!(plan.action, PlanAction::Replace);
    assert_eq!(plan.forcing_fields, vec!["rfc3339".to_string()]);

    registry.delete(&type_id, &mut state).unwrap();
    assert!(state.id().is_none());

    registry.create(&type_id, &desired, &mut state).unwrap();
    let new_identity = state.id().cloned().unwrap();
    assert_ne!(new_identity, old_identity);
    assert_eq!(new_identity, RecordId::from("2021-01-01T00:00:00Z"));
}

#[test]
fn persisted_state_round_trips_through_the_wire_form() {
    let registry = ResourceRegistry::with_builtin_resources().unwrap();
    let type_id = static_time();
    let mut state = registry.new_state(&type_id).unwrap();
    registry.create(&type_id, &timestamp_config("2020-02-29T16:00:00Z"), &mut state).unwrap();

    let wire = serde_json::to_string(&state).unwrap();
    let mut restored: RecordState = serde_json::from_str(&wire).unwrap();
    assert_eq!(restored, state);

    registry.read(&type_id, &mut restored).unwrap();
    assert_eq!(restored, state);
}

#[test]
fn import_through_the_registry_populates_fields() {
    let registry = ResourceRegistry::with_builtin_resources().unwrap();
    let type_id = static_time();
    let mut state = registry.new_state(&type_id).unwrap();

    registry.import(&type_id, RecordId::from("2021-01-01T00:00:00Z"), &mut state).unwrap();
    assert_eq!(state.integer("year"), Some(2021));
    assert_eq!(state.integer("month"), Some(1));
    assert_eq!(state.integer("day"), Some(1));
}
