// crates/chronopin-resources/src/clock.rs
// ============================================================================
// Module: Resource Clock
// Description: Wall-clock abstraction for timestamp defaulting.
// Purpose: Keep lifecycle handlers deterministic under an injected clock.
// Dependencies: time
// ============================================================================

//! ## Overview
//! The core model never reads wall-clock time; the only consumer of "now" is
//! the static-time resource's defaulting path, and that reads it through
//! this trait. Hosts and tests inject [`FixedClock`] to make creation
//! deterministic and replayable.

// ============================================================================
// SECTION: Imports
// ============================================================================

use time::OffsetDateTime;

// ============================================================================
// SECTION: Clock Contract
// ============================================================================

/// Source of the current instant for timestamp defaulting.
pub trait Clock {
    /// Returns the current instant in UTC.
    fn now_utc(&self) -> OffsetDateTime;
}

// ============================================================================
// SECTION: Clock Implementations
// ============================================================================

/// Clock backed by the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// Clock that always returns one fixed instant.
///
/// # Invariants
/// - The reported instant never changes for the life of the value.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    /// Instant reported by every call.
    instant: OffsetDateTime,
}

impl FixedClock {
    /// Creates a clock pinned to the given instant.
    #[must_use]
    pub const fn new(instant: OffsetDateTime) -> Self {
        Self {
            instant,
        }
    }
}

impl Clock for FixedClock {
    fn now_utc(&self) -> OffsetDateTime {
        self.instant
    }
}
