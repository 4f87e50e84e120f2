//! Single-bar candlestick pattern detectors: Doji, Hammer, Shooting Star.
//!
//! Each check reads only the derived geometry of the bar under test.

use super::helpers::{self, check_factor, is_doji, is_shadow_long, is_shadow_short};
use crate::{OHLCVExt, Pattern, PatternAnnotation, PatternDetector, Result, OHLCV};

impl_with_defaults!(DojiDetector, HammerDetector, ShootingStarDetector);

// ============================================================
// DOJI
// ============================================================

/// Doji - open and close nearly equal relative to the closing price
#[derive(Debug, Clone, Copy)]
pub struct DojiDetector {
    pub doji_factor: f64,
}

impl Default for DojiDetector {
    fn default() -> Self {
        Self {
            doji_factor: helpers::DOJI_FACTOR,
        }
    }
}

impl PatternDetector for DojiDetector {
    fn pattern(&self) -> Pattern {
        Pattern::Doji
    }

    fn min_bars(&self) -> usize {
        1
    }

    fn detect<T: OHLCV>(&self, bars: &[T], index: usize) -> Option<PatternAnnotation> {
        let bar = bars.get(index)?;

        is_doji(bar.body_size(), bar.close(), self.doji_factor)
            .then(|| PatternAnnotation::new(self.pattern(), index))
    }

    fn validate_config(&self) -> Result<()> {
        check_factor("doji_factor", self.doji_factor)
    }
}

// ============================================================
// HAMMER FAMILY
// ============================================================

/// Hammer - long lower wick, upper wick no longer than the body
#[derive(Debug, Clone, Copy)]
pub struct HammerDetector {
    pub shadow_factor: f64,
}

impl Default for HammerDetector {
    fn default() -> Self {
        Self {
            shadow_factor: helpers::SHADOW_FACTOR,
        }
    }
}

impl PatternDetector for HammerDetector {
    fn pattern(&self) -> Pattern {
        Pattern::Hammer
    }

    fn min_bars(&self) -> usize {
        1
    }

    fn detect<T: OHLCV>(&self, bars: &[T], index: usize) -> Option<PatternAnnotation> {
        let bar = bars.get(index)?;
        let body = bar.body_size();

        if !is_shadow_long(bar.lower_shadow(), body, self.shadow_factor) {
            return None;
        }
        if !is_shadow_short(bar.upper_shadow(), body) {
            return None;
        }

        Some(PatternAnnotation::new(self.pattern(), index))
    }

    fn validate_config(&self) -> Result<()> {
        check_factor("shadow_factor", self.shadow_factor)
    }
}

/// Shooting Star - mirror of the Hammer: long upper wick, short lower wick
#[derive(Debug, Clone, Copy)]
pub struct ShootingStarDetector {
    pub shadow_factor: f64,
}

impl Default for ShootingStarDetector {
    fn default() -> Self {
        Self {
            shadow_factor: helpers::SHADOW_FACTOR,
        }
    }
}

impl PatternDetector for ShootingStarDetector {
    fn pattern(&self) -> Pattern {
        Pattern::ShootingStar
    }

    fn min_bars(&self) -> usize {
        1
    }

    fn detect<T: OHLCV>(&self, bars: &[T], index: usize) -> Option<PatternAnnotation> {
        let bar = bars.get(index)?;
        let body = bar.body_size();

        if !is_shadow_long(bar.upper_shadow(), body, self.shadow_factor) {
            return None;
        }
        if !is_shadow_short(bar.lower_shadow(), body) {
            return None;
        }

        Some(PatternAnnotation::new(self.pattern(), index))
    }

    fn validate_config(&self) -> Result<()> {
        check_factor("shadow_factor", self.shadow_factor)
    }
}
