// crates/chronopin-core/src/runtime/plan.rs
// ============================================================================
// Module: Chronopin Replacement Planner
// Description: Change planning between recorded state and desired configuration.
// Purpose: Decide create, in-place update, or forced replacement before apply.
// Dependencies: crate::core, serde
// ============================================================================

//! ## Overview
//! A record moves between exactly two states: absent and present. The
//! planner compares recorded state with the caller's desired configuration
//! and decides which lifecycle transition the host must drive. Any change to
//! an input that forces replacement yields destroy-then-create, never an
//! in-place edit, and the plan names every field that forced it.
//!
//! Absence of an optional input that is also computed (a defaulted value) is
//! not a change; removal of a plain optional input is.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::record::RecordState;
use crate::core::record::ResourceConfig;
use crate::core::schema::ResourceSchema;

// ============================================================================
// SECTION: Plan Types
// ============================================================================

/// Lifecycle transition the host must drive for a record.
///
/// # Invariants
/// - Variants are stable for serialization and contract matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanAction {
    /// No record exists; create one.
    Create,
    /// Recorded state already matches the desired configuration.
    Noop,
    /// Inputs changed without forcing replacement; update in place.
    Update,
    /// A replacement-forcing input changed; destroy then create.
    Replace,
}

/// Planned transition with the fields that forced replacement.
///
/// # Invariants
/// - `forcing_fields` is non-empty exactly when `action` is
///   [`PlanAction::Replace`], listed in schema field order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangePlan {
    /// Transition the host must drive.
    pub action: PlanAction,
    /// Input fields whose changes forced replacement.
    pub forcing_fields: Vec<String>,
}

// ============================================================================
// SECTION: Planning
// ============================================================================

/// Plans the transition from recorded state to the desired configuration.
#[must_use]
pub fn plan_change(
    schema: &ResourceSchema,
    state: &RecordState,
    desired: &ResourceConfig,
) -> ChangePlan {
    if state.id().is_none() {
        return ChangePlan {
            action: PlanAction::Create,
            forcing_fields: Vec::new(),
        };
    }

    let mut forcing_fields = Vec::new();
    let mut updated = false;
    for (field, spec) in schema.fields() {
        if !spec.input {
            continue;
        }
        let changed = match desired.fields.get(field) {
            Some(value) => state.get(field) != Some(value),
            None => !spec.computed && state.get(field).is_some(),
        };
        if !changed {
            continue;
        }
        if spec.forces_replacement {
            forcing_fields.push(field.to_string());
        } else {
            updated = true;
        }
    }

    if !forcing_fields.is_empty() {
        return ChangePlan {
            action: PlanAction::Replace,
            forcing_fields,
        };
    }
    ChangePlan {
        action: if updated { PlanAction::Update } else { PlanAction::Noop },
        forcing_fields: Vec::new(),
    }
}
