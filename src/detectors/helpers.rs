//! Common threshold checks shared across detector modules.
//!
//! All comparisons are exact `f64` comparisons against the stated multipliers;
//! no extra tolerance is applied at the boundaries.

use crate::{DashboardError, Result};

// ============================================================
// THRESHOLDS
// ============================================================

/// Body is doji-like: |body| <= close * DOJI_FACTOR
pub const DOJI_FACTOR: f64 = 0.1;
/// Shadow is long: shadow > |body| * SHADOW_FACTOR
pub const SHADOW_FACTOR: f64 = 2.0;

// ============================================================
// HELPER FUNCTIONS
// ============================================================

/// Body is small relative to the closing price.
/// A zero body is a doji for any non-negative close.
#[inline]
pub fn is_doji(body_size: f64, close: f64, factor: f64) -> bool {
    body_size <= close * factor
}

/// Shadow strictly exceeds `factor` times the body size.
/// With a zero body any positive shadow qualifies.
#[inline]
pub fn is_shadow_long(shadow: f64, body_size: f64, factor: f64) -> bool {
    shadow > body_size * factor
}

/// Shadow is no longer than the body.
#[inline]
pub fn is_shadow_short(shadow: f64, body_size: f64) -> bool {
    shadow <= body_size
}

/// Current signed body engulfs the previous one in the opposite direction.
/// `bullish` selects a down-then-up pair, otherwise up-then-down.
#[inline]
pub fn is_engulfing(prev_body: f64, body: f64, bullish: bool) -> bool {
    let opposite = if bullish {
        prev_body < 0.0 && body > 0.0
    } else {
        prev_body > 0.0 && body < 0.0
    };
    opposite && body.abs() > prev_body.abs()
}

/// Reject factors that would make a threshold meaningless.
pub fn check_factor(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(DashboardError::InvalidFactor { field, value });
    }
    Ok(())
}
