//! Price summaries and cross-symbol comparison series.

use serde::Serialize;

use crate::{Bar, OHLCV};

/// Latest close against the previous close
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceSummary {
    pub current_price: f64,
    pub change: f64,
    pub change_pct: f64,
}

/// Summary of the last two bars. `None` with fewer than two bars or a zero previous close.
pub fn price_summary<T: OHLCV>(bars: &[T]) -> Option<PriceSummary> {
    let [.., prev, last] = bars else {
        return None;
    };
    let previous = prev.close();
    if previous == 0.0 {
        return None;
    }

    let current_price = last.close();
    let change = current_price - previous;
    Some(PriceSummary {
        current_price,
        change,
        change_pct: change / previous * 100.0,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComparisonPoint {
    pub timestamp: i64,
    /// Percentage change from the first close of the series
    pub change_pct: f64,
}

/// One symbol's normalized line on the comparison chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonSeries {
    pub symbol: String,
    pub points: Vec<ComparisonPoint>,
}

/// Normalize closes to percentage change from the first bar.
///
/// `None` for an empty series or when the first close is zero.
pub fn comparison_series(symbol: &str, bars: &[Bar]) -> Option<ComparisonSeries> {
    let initial = bars.first()?.close;
    if initial == 0.0 {
        return None;
    }

    let points = bars
        .iter()
        .map(|bar| ComparisonPoint {
            timestamp: bar.timestamp,
            change_pct: (bar.close - initial) / initial * 100.0,
        })
        .collect();

    Some(ComparisonSeries {
        symbol: symbol.to_string(),
        points,
    })
}
