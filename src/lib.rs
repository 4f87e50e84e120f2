//! # tickerlens
//!
//! Core of an equity price dashboard: candlestick pattern annotations over OHLC
//! bars, key-metric display cards from sparse company records, keyword news
//! sentiment, and per-session watchlists with community insights.
//!
//! ## Quick Start
//!
//! ```rust
//! use tickerlens::prelude::*;
//!
//! let bars = vec![
//!     Bar::new(1, 100.0, 101.0, 99.0, 100.5, 1_000.0),
//!     Bar::new(2, 100.5, 102.0, 90.0, 91.0, 1_000.0),
//!     Bar::new(3, 91.0, 91.0, 91.0, 91.0, 1_000.0),
//! ];
//!
//! let annotations: Vec<_> = detect_patterns(&bars).collect();
//! assert_eq!(annotations, vec![PatternAnnotation::new(Pattern::Doji, 2)]);
//!
//! let metrics = derive_key_metrics(&CompanyInfo::default());
//! assert_eq!(metrics.get(MetricLabel::MarketCap), "N/A");
//! ```

use std::{iter::FusedIterator, sync::OnceLock};

pub mod analysis;
pub mod chart;
pub mod config;
pub mod dashboard;
pub mod detectors;
pub mod export;
pub mod market;
pub mod metrics;
pub mod news;
pub mod sentiment;
pub mod session;

pub use market::Bar;

pub mod prelude {
    pub use crate::{
        // Analysis
        analysis::{comparison_series, price_summary, ComparisonPoint, ComparisonSeries, PriceSummary},
        // Chart overlay
        chart::{pattern_markers, volume_colors, ChartMarker, ChartOverlay, VolumeColor},
        // Config
        config::DashboardConfig,
        // Dashboard
        dashboard::{Dashboard, DashboardReport, SymbolReport},
        // Detectors
        detectors::*,
        // Market data
        market::{parse_symbols, Bar, HistoryPeriod, MarketDataProvider},
        // Metrics
        metrics::{derive_key_metrics, CompanyInfo, KeyMetrics, MetricLabel, MetricsFormatter},
        // News + sentiment
        news::{extract_news_items, news_with_sentiment, NewsItem, NewsOptions, NewsSource},
        sentiment::{analyze_sentiment, Sentiment},
        // Session
        session::{Insight, InsightSentiment, Session},
        // Core
        detect_patterns,
        scan_parallel,
        BuiltinDetector,
        DashboardError,
        Direction,
        EngineBuilder,
        OHLCVExt,
        Pattern,
        PatternAnnotation,
        PatternDetector,
        PatternEngine,
        PatternIterator,
        Result,
        ScanResult,
        OHLCV,
    };
}

// ============================================================
// ERRORS
// ============================================================

pub type Result<T> = std::result::Result<T, DashboardError>;

/// Errors surfaced by the dashboard layer.
///
/// Pattern detection and metric formatting never fail; these cover the
/// adapters, session rules, configuration and CSV export.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("Provider error for {symbol}: {reason}")]
    Provider { symbol: String, reason: String },

    #[error("News error for {symbol}: {reason}")]
    News { symbol: String, reason: String },

    #[error("Invalid stock symbol: {0}")]
    InvalidSymbol(String),

    #[error("Unable to fetch data for: {}", .0.join(", "))]
    NoData(Vec<String>),

    #[error("User name is empty")]
    EmptyUserName,

    #[error("Sign in to share insights")]
    NotSignedIn,

    #[error("Insight text is empty")]
    EmptyInsight,

    #[error("Insight {0} not found")]
    InsightNotFound(uuid::Uuid),

    #[error("Only {author} can delete this insight")]
    NotAuthor { author: String },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("{field} = {value} must be a finite, non-negative factor")]
    InvalidFactor { field: &'static str, value: f64 },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

// ============================================================
// OHLCV TRAITS
// ============================================================

/// Core OHLCV data trait
pub trait OHLCV {
    fn open(&self) -> f64;
    fn high(&self) -> f64;
    fn low(&self) -> f64;
    fn close(&self) -> f64;
    fn volume(&self) -> f64;

    fn timestamp(&self) -> Option<i64> {
        None
    }
}

/// Derived candle geometry. Always computed from the bar's own prices, never stored.
pub trait OHLCVExt: OHLCV {
    /// Signed real body: positive for an up bar, negative for a down bar.
    #[inline]
    fn body(&self) -> f64 {
        self.close() - self.open()
    }

    /// Absolute size of the real body.
    #[inline]
    fn body_size(&self) -> f64 {
        self.body().abs()
    }

    #[inline]
    fn range(&self) -> f64 {
        self.high() - self.low()
    }

    #[inline]
    fn upper_shadow(&self) -> f64 {
        self.high() - self.open().max(self.close())
    }

    #[inline]
    fn lower_shadow(&self) -> f64 {
        self.open().min(self.close()) - self.low()
    }

    #[inline]
    fn is_bullish(&self) -> bool {
        self.body() > 0.0
    }

    #[inline]
    fn is_bearish(&self) -> bool {
        self.body() < 0.0
    }
}

impl<T: OHLCV> OHLCVExt for T {}

// ============================================================
// PATTERNS
// ============================================================

/// Candlestick patterns recognised by the detector, in evaluation priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Pattern {
    #[serde(rename = "Doji")]
    Doji,
    #[serde(rename = "Hammer")]
    Hammer,
    #[serde(rename = "Shooting Star")]
    ShootingStar,
    #[serde(rename = "Bullish Engulfing")]
    BullishEngulfing,
    #[serde(rename = "Bearish Engulfing")]
    BearishEngulfing,
}

impl Pattern {
    pub const ALL: [Pattern; 5] = [
        Pattern::Doji,
        Pattern::Hammer,
        Pattern::ShootingStar,
        Pattern::BullishEngulfing,
        Pattern::BearishEngulfing,
    ];

    /// Display label used on chart markers
    pub fn name(self) -> &'static str {
        match self {
            Pattern::Doji => "Doji",
            Pattern::Hammer => "Hammer",
            Pattern::ShootingStar => "Shooting Star",
            Pattern::BullishEngulfing => "Bullish Engulfing",
            Pattern::BearishEngulfing => "Bearish Engulfing",
        }
    }

    /// Returns the typical/expected direction of this pattern.
    pub fn typical_direction(self) -> Direction {
        match self {
            Pattern::Doji => Direction::Neutral,
            Pattern::Hammer | Pattern::BullishEngulfing => Direction::Bullish,
            Pattern::ShootingStar | Pattern::BearishEngulfing => Direction::Bearish,
        }
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Direction/bias of a pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Direction {
    Bullish,
    Neutral,
    Bearish,
}

impl Direction {
    #[inline]
    pub fn is_bullish(self) -> bool {
        matches!(self, Direction::Bullish)
    }

    #[inline]
    pub fn is_bearish(self) -> bool {
        matches!(self, Direction::Bearish)
    }
}

/// A detected pattern anchored to the bar it was found on. Copy, no allocations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PatternAnnotation {
    pub pattern: Pattern,
    pub bar_index: usize,
}

impl PatternAnnotation {
    pub fn new(pattern: Pattern, bar_index: usize) -> Self {
        Self { pattern, bar_index }
    }
}

// ============================================================
// PATTERN DETECTOR TRAIT
// ============================================================

/// First bar index the engine evaluates. Bars 0 and 1 are never annotated.
pub const FIRST_SCANNED_BAR: usize = 2;

/// Per-pattern detector over a bar slice
pub trait PatternDetector: Send + Sync {
    fn pattern(&self) -> Pattern;

    /// Number of bars (ending at `index`) the check reads. Must not exceed
    /// `FIRST_SCANNED_BAR + 1`, so every scanned bar has enough history.
    fn min_bars(&self) -> usize;

    fn detect<T: OHLCV>(&self, bars: &[T], index: usize) -> Option<PatternAnnotation>;

    fn validate_config(&self) -> Result<()> {
        Ok(())
    }
}

// ============================================================
// BUILTIN DETECTORS - generated via macro
// ============================================================

use detectors::*;

/// Macro to generate BuiltinDetector enum without boilerplate
macro_rules! define_builtin_detectors {
    (
        $(
            $variant:ident($detector:ty)
        ),* $(,)?
    ) => {
        /// All builtin detectors - enum dispatch, no vtable
        #[derive(Debug, Clone, Copy)]
        pub enum BuiltinDetector {
            $($variant($detector)),*
        }

        impl BuiltinDetector {
            #[inline]
            pub fn detect<T: OHLCV>(&self, bars: &[T], index: usize) -> Option<PatternAnnotation> {
                match self {
                    $(Self::$variant(d) => PatternDetector::detect(d, bars, index)),*
                }
            }

            #[inline]
            pub fn pattern(&self) -> Pattern {
                match self {
                    $(Self::$variant(d) => PatternDetector::pattern(d)),*
                }
            }

            #[inline]
            pub fn min_bars(&self) -> usize {
                match self {
                    $(Self::$variant(d) => PatternDetector::min_bars(d)),*
                }
            }

            pub fn validate_config(&self) -> Result<()> {
                match self {
                    $(Self::$variant(d) => PatternDetector::validate_config(d)),*
                }
            }
        }
    };
}

define_builtin_detectors! {
    // Single bar
    Doji(DojiDetector),
    Hammer(HammerDetector),
    ShootingStar(ShootingStarDetector),

    // Two bar
    BullishEngulfing(BullishEngulfingDetector),
    BearishEngulfing(BearishEngulfingDetector),
}

/// Generate an array of `BuiltinDetector` variants using `Default::default()` for each inner type.
macro_rules! builtin_defaults {
  ($($variant:ident),* $(,)?) => {
    [$(BuiltinDetector::$variant(Default::default())),*]
  };
}

/// Default detectors in priority order.
fn default_detectors() -> [BuiltinDetector; 5] {
    builtin_defaults![Doji, Hammer, ShootingStar, BullishEngulfing, BearishEngulfing]
}

// ============================================================
// PATTERN ENGINE
// ============================================================

/// Ordered detector list. The first detector that matches a bar claims it.
#[derive(Debug, Clone)]
pub struct PatternEngine {
    detectors: Vec<BuiltinDetector>,
}

impl Default for PatternEngine {
    fn default() -> Self {
        Self {
            detectors: default_detectors().to_vec(),
        }
    }
}

impl PatternEngine {
    /// Registered detectors, in priority order
    pub fn detectors(&self) -> &[BuiltinDetector] {
        &self.detectors
    }

    /// Classify a single bar. `None` when the bar is not eligible or nothing matches.
    pub fn scan_at<T: OHLCV>(&self, bars: &[T], index: usize) -> Option<PatternAnnotation> {
        if index < FIRST_SCANNED_BAR || index >= bars.len() {
            return None;
        }

        self.detectors.iter().find_map(|d| {
            debug_assert!(d.min_bars() <= FIRST_SCANNED_BAR + 1);
            d.detect(bars, index)
        })
    }

    /// Scan all bars and return a flat list of annotations.
    pub fn scan<T: OHLCV>(&self, bars: &[T]) -> Vec<PatternAnnotation> {
        self.iter(bars).collect()
    }

    /// Scan and return the matched pattern (if any) for every bar index.
    pub fn scan_grouped<T: OHLCV>(&self, bars: &[T]) -> Vec<Option<Pattern>> {
        let mut grouped = vec![None; bars.len()];
        for annotation in self.iter(bars) {
            grouped[annotation.bar_index] = Some(annotation.pattern);
        }
        grouped
    }

    /// Lazy, restartable pass over the bars in ascending index order.
    pub fn iter<'a, T: OHLCV>(&'a self, bars: &'a [T]) -> PatternIterator<'a, T> {
        PatternIterator::new(self, bars)
    }

    fn validate(&self) -> Result<()> {
        for d in &self.detectors {
            d.validate_config()?;
        }
        Ok(())
    }
}

fn default_engine() -> &'static PatternEngine {
    static ENGINE: OnceLock<PatternEngine> = OnceLock::new();
    ENGINE.get_or_init(PatternEngine::default)
}

/// Detect Doji, Hammer, Shooting Star and Engulfing patterns with the default thresholds.
///
/// Bars at index 0 and 1 are never annotated, so sequences shorter than three
/// bars yield nothing. Each bar gets at most one annotation.
pub fn detect_patterns<T: OHLCV>(bars: &[T]) -> PatternIterator<'_, T> {
    default_engine().iter(bars)
}

// ============================================================
// PATTERN ITERATOR
// ============================================================

/// Iterator over annotations, one scan of the bars
pub struct PatternIterator<'a, T: OHLCV> {
    engine: &'a PatternEngine,
    bars: &'a [T],
    current: usize,
}

impl<'a, T: OHLCV> PatternIterator<'a, T> {
    fn new(engine: &'a PatternEngine, bars: &'a [T]) -> Self {
        Self {
            engine,
            bars,
            current: FIRST_SCANNED_BAR,
        }
    }
}

impl<T: OHLCV> Clone for PatternIterator<'_, T> {
    fn clone(&self) -> Self {
        Self {
            engine: self.engine,
            bars: self.bars,
            current: self.current,
        }
    }
}

impl<T: OHLCV> Iterator for PatternIterator<'_, T> {
    type Item = PatternAnnotation;

    fn next(&mut self) -> Option<Self::Item> {
        while self.current < self.bars.len() {
            let index = self.current;
            self.current += 1;

            if let Some(annotation) = self.engine.scan_at(self.bars, index) {
                return Some(annotation);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.bars.len().saturating_sub(self.current);
        (0, Some(remaining))
    }
}

impl<T: OHLCV> FusedIterator for PatternIterator<'_, T> {}

// ============================================================
// BUILDER
// ============================================================

/// Builder for creating PatternEngine instances
#[derive(Debug, Clone, Default)]
pub struct EngineBuilder {
    detectors: Vec<BuiltinDetector>,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add all builtin patterns with default thresholds, in priority order
    pub fn with_all_defaults(mut self) -> Self {
        self.detectors.extend(default_detectors());
        self
    }

    /// Append a detector; it ranks below everything added before it
    #[allow(clippy::should_implement_trait)]
    pub fn add(mut self, detector: BuiltinDetector) -> Self {
        self.detectors.push(detector);
        self
    }

    /// Add with config validation
    pub fn add_checked(mut self, detector: BuiltinDetector) -> Result<Self> {
        detector.validate_config()?;
        self.detectors.push(detector);
        Ok(self)
    }

    /// Build the engine
    pub fn build(self) -> Result<PatternEngine> {
        let engine = PatternEngine {
            detectors: self.detectors,
        };
        engine.validate()?;
        Ok(engine)
    }
}

// ============================================================
// PARALLEL SCANNING
// ============================================================

use rayon::prelude::*;

/// Annotations for a single instrument
#[derive(Debug, Clone, serde::Serialize)]
pub struct ScanResult {
    pub symbol: String,
    pub annotations: Vec<PatternAnnotation>,
}

/// Parallel scanning of multiple instruments. Results keep the input order.
pub fn scan_parallel<'a, T, I>(engine: &PatternEngine, instruments: I) -> Vec<ScanResult>
where
    T: OHLCV + Sync + 'a,
    I: IntoParallelIterator<Item = (&'a str, &'a [T])>,
{
    instruments
        .into_par_iter()
        .map(|(symbol, bars)| {
            let annotations = engine.scan(bars);
            log::debug!("{}: {} pattern(s) over {} bars", symbol, annotations.len(), bars.len());
            ScanResult {
                symbol: symbol.to_string(),
                annotations,
            }
        })
        .collect()
}

// ============================================================
// TESTS
// ============================================================
