// crates/chronopin-resources/examples/minimal.rs
// ============================================================================
// Module: Chronopin Minimal Example
// Description: Minimal end-to-end static-time lifecycle using the registry.
// Purpose: Demonstrate create, plan, read, and delete as a host engine would drive them.
// Dependencies: chronopin-core, chronopin-resources
// ============================================================================

//! ## Overview
//! Drives the static-time resource through a full lifecycle with a fixed
//! clock: create a pinned record, plan an unchanged configuration (no-op),
//! plan a keepers change (forced replacement), and delete.

use std::collections::BTreeMap;

use chronopin_core::FieldValue;
use chronopin_core::ResourceConfig;
use chronopin_core::ResourceTypeId;
use chronopin_core::runtime::PlanAction;
use chronopin_resources::FixedClock;
use chronopin_resources::ResourceRegistry;
use chronopin_resources::StaticTimeResource;
use time::macros::datetime;

/// Error type for example preconditions.
#[derive(Debug)]
struct ExampleError(&'static str);

impl std::fmt::Display for ExampleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for ExampleError {}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let clock = FixedClock::new(datetime!(2020-02-29 16:00:00 UTC));
    let mut registry = ResourceRegistry::new();
    registry.register_resource(StaticTimeResource::TYPE_ID, StaticTimeResource::with_clock(clock))?;

    let type_id = ResourceTypeId::from(StaticTimeResource::TYPE_ID);
    let mut state = registry.new_state(&type_id)?;

    let mut config = ResourceConfig::new();
    config.insert(
        "keepers",
        FieldValue::TextMap(BTreeMap::from([("deploy".to_string(), "v1".to_string())])),
    );
    registry.create(&type_id, &config, &mut state)?;

    let unchanged = registry.plan(&type_id, &state, &config)?;
    if unchanged.action != PlanAction::Noop {
        return Err(Box::new(ExampleError("unchanged configuration must plan a no-op")));
    }

    let mut rotated = ResourceConfig::new();
    rotated.insert(
        "keepers",
        FieldValue::TextMap(BTreeMap::from([("deploy".to_string(), "v2".to_string())])),
    );
    let replacement = registry.plan(&type_id, &state, &rotated)?;
    if replacement.action != PlanAction::Replace {
        return Err(Box::new(ExampleError("keepers change must force replacement")));
    }

    registry.read(&type_id, &mut state)?;
    let _ = (state.integer("unix"), state.text("unixdate"));

    registry.delete(&type_id, &mut state)?;
    Ok(())
}
