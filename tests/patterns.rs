//! Integration tests for candlestick pattern detection.

use proptest::prelude::*;
use tickerlens::prelude::*;

/// Simple test bar structure
#[derive(Debug, Clone, Copy)]
struct TestBar {
    o: f64,
    h: f64,
    l: f64,
    c: f64,
}

impl TestBar {
    fn new(o: f64, h: f64, l: f64, c: f64) -> Self {
        Self { o, h, l, c }
    }

    fn flat(price: f64) -> Self {
        Self::new(price, price, price, price)
    }
}

impl OHLCV for TestBar {
    fn open(&self) -> f64 {
        self.o
    }

    fn high(&self) -> f64 {
        self.h
    }

    fn low(&self) -> f64 {
        self.l
    }

    fn close(&self) -> f64 {
        self.c
    }

    fn volume(&self) -> f64 {
        1000.0
    }
}

/// Wide-bodied bar with short wicks that matches nothing by itself
fn plain(o: f64, c: f64) -> TestBar {
    TestBar::new(o, o.max(c) + 1.0, o.min(c) - 1.0, c)
}

fn scan(bars: &[TestBar]) -> Vec<PatternAnnotation> {
    detect_patterns(bars).collect()
}

// ============================================================
// SEQUENCE LENGTH
// ============================================================

#[test]
fn test_short_sequences_are_empty() {
    assert!(scan(&[]).is_empty());
    assert!(scan(&[TestBar::flat(10.0)]).is_empty());
    assert!(scan(&[TestBar::flat(10.0), TestBar::flat(10.0)]).is_empty());
}

#[test]
fn test_degenerate_sequence_is_all_doji() {
    let bars = vec![TestBar::flat(42.0); 6];
    let annotations = scan(&bars);
    let expected: Vec<_> = (2..6).map(|i| PatternAnnotation::new(Pattern::Doji, i)).collect();
    assert_eq!(annotations, expected);
}

// ============================================================
// SINGLE BAR PATTERNS
// ============================================================

#[test]
fn test_flat_third_bar_is_doji() {
    let bars = [plain(100.0, 130.0), plain(130.0, 100.0), TestBar::flat(100.0)];
    assert_eq!(scan(&bars), vec![PatternAnnotation::new(Pattern::Doji, 2)]);
}

#[test]
fn test_hammer() {
    // body 2 at close 2 is not a doji (0.2), lower wick 10, upper wick 1
    let bars = [
        plain(100.0, 130.0),
        plain(130.0, 100.0),
        TestBar::new(0.0, 3.0, -10.0, 2.0),
    ];
    assert_eq!(scan(&bars), vec![PatternAnnotation::new(Pattern::Hammer, 2)]);
}

#[test]
fn test_shooting_star() {
    // body 2 at close 2, upper wick 10, lower wick 0
    let bars = [
        plain(100.0, 130.0),
        plain(130.0, 100.0),
        TestBar::new(0.0, 12.0, 0.0, 2.0),
    ];
    assert_eq!(
        scan(&bars),
        vec![PatternAnnotation::new(Pattern::ShootingStar, 2)]
    );
}

#[test]
fn test_doji_wins_over_hammer() {
    // Satisfies both Doji (body 0.5 <= 10.05) and Hammer (lower 30 > 1, upper 0)
    let bar = TestBar::new(100.0, 100.5, 70.0, 100.5);
    let bars = [plain(100.0, 130.0), plain(130.0, 100.0), bar];
    assert_eq!(scan(&bars), vec![PatternAnnotation::new(Pattern::Doji, 2)]);
}

// ============================================================
// TWO BAR PATTERNS
// ============================================================

#[test]
fn test_bullish_engulfing() {
    // bar 1 body -10, bar 2 body +15
    let bars = [plain(95.0, 100.0), plain(100.0, 90.0), plain(90.0, 105.0)];
    assert_eq!(
        scan(&bars),
        vec![PatternAnnotation::new(Pattern::BullishEngulfing, 2)]
    );
}

#[test]
fn test_bearish_engulfing() {
    let bars = [plain(95.0, 90.0), plain(90.0, 100.0), plain(100.0, 85.0)];
    assert_eq!(
        scan(&bars),
        vec![PatternAnnotation::new(Pattern::BearishEngulfing, 2)]
    );
}

#[test]
fn test_engulfing_needs_larger_body() {
    let bars = [plain(95.0, 100.0), plain(100.0, 85.0), plain(85.0, 100.0)];
    assert!(scan(&bars).is_empty());
}

fn engulfing_only() -> PatternEngine {
    EngineBuilder::new()
        .add(BuiltinDetector::BullishEngulfing(
            BullishEngulfingDetector::with_defaults(),
        ))
        .add(BuiltinDetector::BearishEngulfing(
            BearishEngulfingDetector::with_defaults(),
        ))
        .build()
        .unwrap()
}

#[test]
fn test_hammer_wins_over_bullish_engulfing() {
    // bar 1 body -2; bar 2 body +3, lower wick 8, upper wick 0.5
    let bars = [
        plain(20.0, 25.0),
        TestBar::new(10.0, 10.5, 7.5, 8.0),
        TestBar::new(8.0, 11.5, 0.0, 11.0),
    ];

    assert_eq!(
        engulfing_only().scan(&bars),
        vec![PatternAnnotation::new(Pattern::BullishEngulfing, 2)]
    );
    assert_eq!(scan(&bars), vec![PatternAnnotation::new(Pattern::Hammer, 2)]);
}

#[test]
fn test_shooting_star_wins_over_bearish_engulfing() {
    // bar 1 body +2; bar 2 body -3, upper wick 8, lower wick 0.5
    let bars = [
        plain(20.0, 25.0),
        TestBar::new(8.0, 10.5, 7.5, 10.0),
        TestBar::new(11.0, 19.0, 7.5, 8.0),
    ];

    assert_eq!(
        engulfing_only().scan(&bars),
        vec![PatternAnnotation::new(Pattern::BearishEngulfing, 2)]
    );
    assert_eq!(
        scan(&bars),
        vec![PatternAnnotation::new(Pattern::ShootingStar, 2)]
    );
}

#[test]
fn test_engulfing_on_index_one_is_not_reported() {
    // bars 0/1 form a bullish engulfing pair, but index 1 is never evaluated
    let bars = [plain(100.0, 85.0), plain(85.0, 105.0), plain(105.0, 125.0)];
    assert!(scan(&bars).is_empty());
}

// ============================================================
// ENGINE API
// ============================================================

#[test]
fn test_engine_subset_keeps_priority_of_registration() {
    let engine = EngineBuilder::new()
        .add(BuiltinDetector::BullishEngulfing(
            BullishEngulfingDetector::with_defaults(),
        ))
        .build()
        .unwrap();

    let bars = vec![TestBar::flat(10.0); 4];
    assert!(engine.scan(&bars).is_empty());
}

#[test]
fn test_annotations_serialize_with_display_names() {
    let annotation = PatternAnnotation::new(Pattern::ShootingStar, 7);
    let json = serde_json::to_value(annotation).unwrap();
    assert_eq!(json["pattern"], "Shooting Star");
    assert_eq!(json["bar_index"], 7);
}

#[test]
fn test_detection_does_not_touch_input() {
    let bars = vec![plain(95.0, 100.0), plain(100.0, 90.0), plain(90.0, 105.0)];
    let before: Vec<(f64, f64, f64, f64)> = bars.iter().map(|b| (b.o, b.h, b.l, b.c)).collect();
    let _ = scan(&bars);
    let after: Vec<(f64, f64, f64, f64)> = bars.iter().map(|b| (b.o, b.h, b.l, b.c)).collect();
    assert_eq!(before, after);
}

// ============================================================
// PROPERTIES
// ============================================================

fn arb_bar() -> impl Strategy<Value = TestBar> {
    (1.0f64..500.0, 0.0f64..50.0, 0.0f64..50.0, -40.0f64..40.0).prop_map(
        |(open, up, down, delta)| {
            let close = (open + delta).max(0.01);
            let high = open.max(close) + up;
            let low = (open.min(close) - down).max(0.0);
            TestBar::new(open, high, low, close)
        },
    )
}

proptest! {
    #[test]
    fn prop_short_sequences_empty(bars in prop::collection::vec(arb_bar(), 0..3)) {
        prop_assert!(scan(&bars).is_empty());
    }

    #[test]
    fn prop_at_most_one_per_bar_in_order(bars in prop::collection::vec(arb_bar(), 0..60)) {
        let annotations = scan(&bars);
        prop_assert!(annotations.len() <= bars.len().saturating_sub(2));
        prop_assert!(annotations.iter().all(|a| a.bar_index >= 2 && a.bar_index < bars.len()));
        prop_assert!(annotations.windows(2).all(|w| w[0].bar_index < w[1].bar_index));
    }

    #[test]
    fn prop_idempotent(bars in prop::collection::vec(arb_bar(), 0..60)) {
        prop_assert_eq!(scan(&bars), scan(&bars));
    }

    #[test]
    fn prop_matches_scan_at(bars in prop::collection::vec(arb_bar(), 3..40)) {
        let engine = PatternEngine::default();
        let grouped = engine.scan_grouped(&bars);
        for (i, slot) in grouped.iter().enumerate() {
            prop_assert_eq!(*slot, engine.scan_at(&bars, i).map(|a| a.pattern));
        }
    }
}
