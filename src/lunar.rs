//! Mean-synodic moon age ("PhaseClock")
//!
//! Converts a UTC instant into a continuous lunar age in civil days since
//! New Moon. The model anchors a mean synodic month to one known full moon
//! (2026-01-03 10:04 UTC, age ≈ 14.77 d) rather than computing a true
//! ephemeris, which keeps the math to a single modulo and is accurate to
//! well under a day over the widget's lifetime.
//!
//! Both render hosts (the live clock widget and the batch share-image
//! generator) derive phase from these exact constants, so they agree
//! bit-for-bit on phase for a given instant.

use chrono::{DateTime, TimeZone, Utc};

/// Mean synodic month length in days.
pub const SYNODIC_MONTH: f64 = 29.530588853;

/// Lunar age at the reference full moon, in days.
pub const AGE_AT_REFERENCE: f64 = 14.77;

/// The reference full moon: 2026-01-03 19:04 JST, i.e. 10:04 UTC.
pub fn reference_full_moon() -> DateTime<Utc> {
    // Infallible for this literal date.
    Utc.with_ymd_and_hms(2026, 1, 3, 10, 4, 0).unwrap()
}

/// Age of the Moon in days since New, in `[0, SYNODIC_MONTH)`.
///
/// Total over all representable instants; dates before the reference epoch
/// produce a negative day offset, so the wrap must be a floored modulo
/// (`rem_euclid`), not a truncated one.
pub fn moon_age(instant: DateTime<Utc>) -> f64 {
    let diff_ms = instant
        .signed_duration_since(reference_full_moon())
        .num_milliseconds() as f64;
    let diff_days = diff_ms / 86_400_000.0;
    let age = (AGE_AT_REFERENCE + diff_days).rem_euclid(SYNODIC_MONTH);
    debug_assert!(age.is_finite(), "lunar age must be finite");
    age
}

/// Normalize an age in days to a phase in `[0, 1)`.
///
/// 0 and 1 are New Moon, 0.5 is Full Moon.
pub fn phase_from_age(age_days: f64) -> f64 {
    (age_days / SYNODIC_MONTH).rem_euclid(1.0)
}

/// Convenience: instant → normalized phase.
pub fn moon_phase(instant: DateTime<Utc>) -> f64 {
    phase_from_age(moon_age(instant))
}
