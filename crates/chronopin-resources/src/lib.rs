// crates/chronopin-resources/src/lib.rs
// ============================================================================
// Module: Chronopin Resources
// Description: Built-in lifecycle resources and registry utilities.
// Purpose: Provide the static-time resource aligned with Chronopin core.
// Dependencies: chronopin-core, time
// ============================================================================

//! ## Overview
//! This crate ships the built-in static-time resource and a registry
//! implementation that routes lifecycle operations by resource type
//! identifier. Resources are deterministic with respect to their inputs; the
//! only wall-clock read lives behind an injectable [`Clock`].
//! Invariants:
//! - Lifecycle operations are routed via [`ResourceRegistry`] by type id.
//! - Caller configuration is validated against the resource schema before
//!   creation and fails closed on invalid inputs.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod clock;
pub mod registry;
pub mod static_time;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use clock::Clock;
pub use clock::FixedClock;
pub use clock::SystemClock;
pub use registry::ResourceRegistry;
pub use static_time::StaticTimeResource;
