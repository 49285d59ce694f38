// crates/chronopin-core/src/core/time.rs
// ============================================================================
// Module: Chronopin Timestamp Codec
// Description: Canonical RFC3339 parsing and the fixed set of record renderings.
// Purpose: Keep every derived field a pure function of the canonical identity string.
// Dependencies: serde, time
// ============================================================================

//! ## Overview
//! The record identity is an offset-aware RFC3339 string at whole-second
//! precision. This module is the single place that parses that string and
//! renders an instant into the record's output formats: numeric components,
//! unix epoch seconds, and the five legacy date-time renderings. All
//! functions are pure; nothing here reads wall-clock time.
//!
//! Legacy renderings carry a zone label: `UTC` when the offset is zero,
//! otherwise the signed numeric offset (for example `+0700`).

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use time::Duration;
use time::OffsetDateTime;
use time::UtcOffset;
use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;

// ============================================================================
// SECTION: Rendering Layouts
// ============================================================================

/// Date-time portion of the unixdate rendering, before zone label and year.
const UNIX_DATE_STEM: &[BorrowedFormatItem<'static>] = format_description!(
    "[weekday repr:short] [month repr:short] [day padding:space] [hour]:[minute]:[second]"
);

/// Date-time portion of the rfc822 rendering, before the zone label.
const RFC822_STEM: &[BorrowedFormatItem<'static>] =
    format_description!("[day] [month repr:short] [year repr:last_two] [hour]:[minute]");

/// Complete rfc822z rendering with a numeric offset.
const RFC822Z_ITEMS: &[BorrowedFormatItem<'static>] = format_description!(
    "[day] [month repr:short] [year repr:last_two] [hour]:[minute] [offset_hour sign:mandatory][offset_minute]"
);

/// Date-time portion of the rfc850 rendering, before the zone label.
const RFC850_STEM: &[BorrowedFormatItem<'static>] = format_description!(
    "[weekday], [day]-[month repr:short]-[year repr:last_two] [hour]:[minute]:[second]"
);

/// Date-time portion of the rfc1123 rendering, before the zone label.
const RFC1123_STEM: &[BorrowedFormatItem<'static>] = format_description!(
    "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second]"
);

/// Complete rfc1123z rendering with a numeric offset.
const RFC1123Z_ITEMS: &[BorrowedFormatItem<'static>] = format_description!(
    "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] [offset_hour sign:mandatory][offset_minute]"
);

// ============================================================================
// SECTION: Canonical Form
// ============================================================================

/// Parses the canonical offset-aware RFC3339 form.
///
/// # Errors
///
/// Returns the underlying parse diagnostic when the input is not a valid
/// RFC3339 timestamp.
pub fn parse_canonical(input: &str) -> Result<OffsetDateTime, time::error::Parse> {
    OffsetDateTime::parse(input, &Rfc3339)
}

/// Formats an instant in the canonical RFC3339 form.
///
/// # Errors
///
/// Returns a formatting error when the instant cannot be represented in
/// RFC3339 (for example a year outside 0..=9999).
pub fn format_canonical(instant: OffsetDateTime) -> Result<String, time::error::Format> {
    instant.format(&Rfc3339)
}

/// Drops sub-second precision from an instant.
///
/// The canonical identity is second-precision; creation truncates before
/// formatting so the identity round-trips losslessly.
#[must_use]
pub fn truncate_to_seconds(instant: OffsetDateTime) -> OffsetDateTime {
    instant - Duration::nanoseconds(i64::from(instant.nanosecond()))
}

// ============================================================================
// SECTION: Numeric Decomposition
// ============================================================================

/// Numeric components of a record instant, local to its offset.
///
/// # Invariants
/// - Components are a pure function of the instant; `unix` is epoch seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimestampParts {
    /// Day of month (1-31).
    pub day: u8,
    /// Hour of day (0-23).
    pub hour: u8,
    /// Minute of hour (0-59).
    pub minute: u8,
    /// Month of year (1-12).
    pub month: u8,
    /// Second of minute (0-59).
    pub second: u8,
    /// Calendar year.
    pub year: i32,
    /// Unix epoch seconds.
    pub unix: i64,
}

/// Decomposes an instant into its numeric components.
#[must_use]
pub fn decompose(instant: OffsetDateTime) -> TimestampParts {
    TimestampParts {
        day: instant.day(),
        hour: instant.hour(),
        minute: instant.minute(),
        month: u8::from(instant.month()),
        second: instant.second(),
        year: instant.year(),
        unix: instant.unix_timestamp(),
    }
}

// ============================================================================
// SECTION: Legacy Renderings
// ============================================================================

/// Renders the unixdate form, for example `Sat Feb 29 16:00:00 UTC 2020`.
///
/// # Errors
///
/// Returns a formatting error when a component cannot be rendered.
pub fn format_unix_date(instant: OffsetDateTime) -> Result<String, time::error::Format> {
    let stem = instant.format(UNIX_DATE_STEM)?;
    let zone = zone_label(instant.offset());
    let year = instant.year();
    Ok(format!("{stem} {zone} {year:04}"))
}

/// Renders the rfc822 form, for example `29 Feb 20 16:00 UTC`.
///
/// # Errors
///
/// Returns a formatting error when a component cannot be rendered.
pub fn format_rfc822(instant: OffsetDateTime) -> Result<String, time::error::Format> {
    let stem = instant.format(RFC822_STEM)?;
    let zone = zone_label(instant.offset());
    Ok(format!("{stem} {zone}"))
}

/// Renders the rfc822z form, for example `29 Feb 20 16:00 +0000`.
///
/// # Errors
///
/// Returns a formatting error when a component cannot be rendered.
pub fn format_rfc822z(instant: OffsetDateTime) -> Result<String, time::error::Format> {
    instant.format(RFC822Z_ITEMS)
}

/// Renders the rfc850 form, for example `Saturday, 29-Feb-20 16:00:00 UTC`.
///
/// # Errors
///
/// Returns a formatting error when a component cannot be rendered.
pub fn format_rfc850(instant: OffsetDateTime) -> Result<String, time::error::Format> {
    let stem = instant.format(RFC850_STEM)?;
    let zone = zone_label(instant.offset());
    Ok(format!("{stem} {zone}"))
}

/// Renders the rfc1123 form, for example `Sat, 29 Feb 2020 16:00:00 UTC`.
///
/// # Errors
///
/// Returns a formatting error when a component cannot be rendered.
pub fn format_rfc1123(instant: OffsetDateTime) -> Result<String, time::error::Format> {
    let stem = instant.format(RFC1123_STEM)?;
    let zone = zone_label(instant.offset());
    Ok(format!("{stem} {zone}"))
}

/// Renders the rfc1123z form, for example `Sat, 29 Feb 2020 16:00:00 +0000`.
///
/// # Errors
///
/// Returns a formatting error when a component cannot be rendered.
pub fn format_rfc1123z(instant: OffsetDateTime) -> Result<String, time::error::Format> {
    instant.format(RFC1123Z_ITEMS)
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns the zone label for an offset: `UTC` at zero, else signed `hhmm`.
fn zone_label(offset: UtcOffset) -> String {
    if offset.is_utc() {
        return "UTC".to_string();
    }
    let sign = if offset.is_negative() { '-' } else { '+' };
    let hours = offset.whole_hours().unsigned_abs();
    let minutes = offset.minutes_past_hour().unsigned_abs();
    format!("{sign}{hours:02}{minutes:02}")
}
