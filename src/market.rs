//! Market data model and the provider seam.
//!
//! The provider is the network boundary (a market-data API in production, a
//! mock in tests). Everything downstream works on the plain [`Bar`] sequence
//! and [`CompanyInfo`] record it returns.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{metrics::CompanyInfo, DashboardError, Result, OHLCV};

// ============================================================
// BAR
// ============================================================

/// One trading period. `timestamp` is Unix seconds at the period open.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    pub fn new(timestamp: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

impl OHLCV for Bar {
    fn open(&self) -> f64 {
        self.open
    }

    fn high(&self) -> f64 {
        self.high
    }

    fn low(&self) -> f64 {
        self.low
    }

    fn close(&self) -> f64 {
        self.close
    }

    fn volume(&self) -> f64 {
        self.volume
    }

    fn timestamp(&self) -> Option<i64> {
        Some(self.timestamp)
    }
}

// ============================================================
// HISTORY PERIOD
// ============================================================

/// Look-back window requested from the provider
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum HistoryPeriod {
    OneDay,
    OneMonth,
    ThreeMonths,
    SixMonths,
    #[default]
    OneYear,
    TwoYears,
    FiveYears,
}

impl HistoryPeriod {
    /// Periods offered in the period selector. `OneDay` is only used to probe symbols.
    pub const SELECTABLE: [HistoryPeriod; 6] = [
        HistoryPeriod::OneMonth,
        HistoryPeriod::ThreeMonths,
        HistoryPeriod::SixMonths,
        HistoryPeriod::OneYear,
        HistoryPeriod::TwoYears,
        HistoryPeriod::FiveYears,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HistoryPeriod::OneDay => "1d",
            HistoryPeriod::OneMonth => "1mo",
            HistoryPeriod::ThreeMonths => "3mo",
            HistoryPeriod::SixMonths => "6mo",
            HistoryPeriod::OneYear => "1y",
            HistoryPeriod::TwoYears => "2y",
            HistoryPeriod::FiveYears => "5y",
        }
    }
}

impl fmt::Display for HistoryPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HistoryPeriod {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "1d" => Ok(HistoryPeriod::OneDay),
            "1mo" => Ok(HistoryPeriod::OneMonth),
            "3mo" => Ok(HistoryPeriod::ThreeMonths),
            "6mo" => Ok(HistoryPeriod::SixMonths),
            "1y" => Ok(HistoryPeriod::OneYear),
            "2y" => Ok(HistoryPeriod::TwoYears),
            "5y" => Ok(HistoryPeriod::FiveYears),
            other => Err(DashboardError::InvalidConfig(format!(
                "unknown history period '{other}'"
            ))),
        }
    }
}

impl Serialize for HistoryPeriod {
    fn serialize<S: serde::Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
        self.as_str().serialize(s)
    }
}

impl<'de> Deserialize<'de> for HistoryPeriod {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        let value = String::deserialize(d)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}

// ============================================================
// PROVIDER
// ============================================================

/// Source of price history and company metadata.
pub trait MarketDataProvider {
    /// Time-ordered bars for `symbol` over `period`.
    fn history(&self, symbol: &str, period: HistoryPeriod) -> Result<Vec<Bar>>;

    /// Sparse company record for `symbol`.
    fn company_info(&self, symbol: &str) -> Result<CompanyInfo>;
}

impl<P: MarketDataProvider + ?Sized> MarketDataProvider for &P {
    fn history(&self, symbol: &str, period: HistoryPeriod) -> Result<Vec<Bar>> {
        (**self).history(symbol, period)
    }

    fn company_info(&self, symbol: &str) -> Result<CompanyInfo> {
        (**self).company_info(symbol)
    }
}

// ============================================================
// SYMBOL INPUT
// ============================================================

/// Trim and upper-case a ticker. `None` when nothing is left.
pub fn normalize_symbol(raw: &str) -> Option<String> {
    let symbol = raw.trim().to_uppercase();
    (!symbol.is_empty()).then_some(symbol)
}

/// Parse comma-separated ticker input such as `"aapl, msft,,GOOGL"`.
///
/// Duplicates are dropped, first occurrence keeps its position. When nothing
/// usable remains, `defaults` is returned.
pub fn parse_symbols(input: &str, defaults: &[String]) -> Vec<String> {
    let mut symbols: Vec<String> = Vec::new();
    for symbol in input.split(',').filter_map(normalize_symbol) {
        if !symbols.contains(&symbol) {
            symbols.push(symbol);
        }
    }

    if symbols.is_empty() {
        defaults.to_vec()
    } else {
        symbols
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_symbols() {
        let defaults = vec!["AAPL".to_string()];
        assert_eq!(
            parse_symbols(" msft, googl ,,MSFT", &defaults),
            vec!["MSFT".to_string(), "GOOGL".to_string()]
        );
        assert_eq!(parse_symbols("", &defaults), defaults);
        assert_eq!(parse_symbols(" , ", &defaults), defaults);
    }

    #[test]
    fn test_normalize_symbol() {
        assert_eq!(normalize_symbol("  tsla "), Some("TSLA".to_string()));
        assert_eq!(normalize_symbol("   "), None);
    }

    #[test]
    fn test_period_round_trip() {
        for period in HistoryPeriod::SELECTABLE {
            assert_eq!(period.as_str().parse::<HistoryPeriod>().unwrap(), period);
        }
        assert_eq!(HistoryPeriod::default(), HistoryPeriod::OneYear);
        assert!("10y".parse::<HistoryPeriod>().is_err());

        let json = serde_json::to_string(&HistoryPeriod::SixMonths).unwrap();
        assert_eq!(json, "\"6mo\"");
        let back: HistoryPeriod = serde_json::from_str("\"2y\"").unwrap();
        assert_eq!(back, HistoryPeriod::TwoYears);
    }

    #[test]
    fn test_bar_is_ohlcv() {
        let bar = Bar::new(1_700_000_000, 10.0, 12.0, 9.0, 11.0, 500.0);
        assert_eq!(bar.timestamp(), Some(1_700_000_000));
        assert_eq!(OHLCV::close(&bar), 11.0);
        assert_eq!(OHLCV::volume(&bar), 500.0);
    }
}
