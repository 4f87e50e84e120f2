//! Two-bar candlestick pattern detectors: Bullish and Bearish Engulfing.
//!
//! Both compare the signed body of the bar under test with the bar right before it.

#![allow(clippy::default_constructed_unit_structs)]

use super::helpers::is_engulfing;
use crate::{OHLCVExt, Pattern, PatternAnnotation, PatternDetector, OHLCV};

impl_with_defaults!(BullishEngulfingDetector, BearishEngulfingDetector);

// ============================================================
// ENGULFING PATTERNS
// ============================================================

/// Bullish Engulfing - an up bar whose body outsizes the preceding down bar's body
#[derive(Debug, Clone, Copy, Default)]
pub struct BullishEngulfingDetector;

impl PatternDetector for BullishEngulfingDetector {
    fn pattern(&self) -> Pattern {
        Pattern::BullishEngulfing
    }

    fn min_bars(&self) -> usize {
        2
    }

    fn detect<T: OHLCV>(&self, bars: &[T], index: usize) -> Option<PatternAnnotation> {
        if index < 1 {
            return None;
        }
        let prev = bars.get(index - 1)?;
        let curr = bars.get(index)?;

        is_engulfing(prev.body(), curr.body(), true)
            .then(|| PatternAnnotation::new(self.pattern(), index))
    }
}

/// Bearish Engulfing - a down bar whose body outsizes the preceding up bar's body
#[derive(Debug, Clone, Copy, Default)]
pub struct BearishEngulfingDetector;

impl PatternDetector for BearishEngulfingDetector {
    fn pattern(&self) -> Pattern {
        Pattern::BearishEngulfing
    }

    fn min_bars(&self) -> usize {
        2
    }

    fn detect<T: OHLCV>(&self, bars: &[T], index: usize) -> Option<PatternAnnotation> {
        if index < 1 {
            return None;
        }
        let prev = bars.get(index - 1)?;
        let curr = bars.get(index)?;

        is_engulfing(prev.body(), curr.body(), false)
            .then(|| PatternAnnotation::new(self.pattern(), index))
    }
}
