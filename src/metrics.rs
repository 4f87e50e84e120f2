//! Key-metric display cards derived from a sparse company record.
//!
//! Formatting is total: a missing, null or non-numeric field renders as
//! [`NOT_AVAILABLE`] and never aborts the rest of the record.

use std::fmt;

use serde::{ser::SerializeMap, Deserialize, Serialize};
use serde_json::Value;

/// Fallback text for a metric that cannot be shown
pub const NOT_AVAILABLE: &str = "N/A";

const BILLION: f64 = 1_000_000_000.0;
const MILLION: f64 = 1_000_000.0;

// ============================================================
// COMPANY INFO
// ============================================================

/// Company metadata as returned by the market-data provider.
///
/// Every field is kept as raw JSON so that a malformed value only blanks its
/// own card. Keys follow the provider's camelCase naming.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompanyInfo {
    pub long_name: Option<Value>,
    pub sector: Option<Value>,
    pub industry: Option<Value>,
    pub market_cap: Option<Value>,
    #[serde(rename = "trailingPE")]
    pub trailing_pe: Option<Value>,
    pub trailing_eps: Option<Value>,
    pub total_revenue: Option<Value>,
    pub fifty_two_week_high: Option<Value>,
    pub fifty_two_week_low: Option<Value>,
    pub volume: Option<Value>,
    pub dividend_yield: Option<Value>,
}

impl CompanyInfo {
    /// Build from an arbitrary JSON document. Anything that is not an object yields an empty record.
    pub fn from_json(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }

    pub fn long_name(&self) -> Option<&str> {
        text(&self.long_name)
    }

    pub fn sector(&self) -> Option<&str> {
        text(&self.sector)
    }

    pub fn industry(&self) -> Option<&str> {
        text(&self.industry)
    }
}

fn text(value: &Option<Value>) -> Option<&str> {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.as_str()),
        _ => None,
    }
}

/// Coerce a raw field to a finite number.
///
/// JSON numbers and numeric strings coerce; null, booleans, containers,
/// unparseable strings and non-finite values count as absent.
pub fn coerce_number(value: Option<&Value>) -> Option<f64> {
    let number = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    number.is_finite().then_some(number)
}

// ============================================================
// KEY METRICS
// ============================================================

/// Metric card labels, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricLabel {
    MarketCap,
    PeRatio,
    Eps,
    Revenue,
    FiftyTwoWeekHigh,
    FiftyTwoWeekLow,
    Volume,
    DividendYield,
}

impl MetricLabel {
    pub const ALL: [MetricLabel; 8] = [
        MetricLabel::MarketCap,
        MetricLabel::PeRatio,
        MetricLabel::Eps,
        MetricLabel::Revenue,
        MetricLabel::FiftyTwoWeekHigh,
        MetricLabel::FiftyTwoWeekLow,
        MetricLabel::Volume,
        MetricLabel::DividendYield,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MetricLabel::MarketCap => "Market Cap",
            MetricLabel::PeRatio => "P/E Ratio",
            MetricLabel::Eps => "EPS",
            MetricLabel::Revenue => "Revenue",
            MetricLabel::FiftyTwoWeekHigh => "52 Week High",
            MetricLabel::FiftyTwoWeekLow => "52 Week Low",
            MetricLabel::Volume => "Volume",
            MetricLabel::DividendYield => "Dividend Yield",
        }
    }
}

impl fmt::Display for MetricLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Exactly eight label/value pairs in [`MetricLabel::ALL`] order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMetrics {
    values: [String; 8],
}

impl KeyMetrics {
    pub fn get(&self, label: MetricLabel) -> &str {
        let position = MetricLabel::ALL
            .iter()
            .position(|l| *l == label)
            .unwrap_or_default();
        &self.values[position]
    }

    pub fn iter(&self) -> impl Iterator<Item = (MetricLabel, &str)> + '_ {
        MetricLabel::ALL
            .into_iter()
            .zip(self.values.iter().map(String::as_str))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Serialize for KeyMetrics {
    fn serialize<S: serde::Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = s.serialize_map(Some(self.values.len()))?;
        for (label, value) in self.iter() {
            map.serialize_entry(label.label(), value)?;
        }
        map.end()
    }
}

// ============================================================
// FORMATTER
// ============================================================

/// Turns raw numbers into card text with a fixed currency marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsFormatter {
    currency: String,
}

impl Default for MetricsFormatter {
    fn default() -> Self {
        Self::new("$")
    }
}

impl MetricsFormatter {
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
        }
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// `$2.50B`, `$12.34M`, or `$123,456.78` below a million.
    pub fn large_number(&self, value: Option<f64>) -> String {
        match value {
            None => NOT_AVAILABLE.to_string(),
            Some(v) if v >= BILLION => format!("{}{:.2}B", self.currency, v / BILLION),
            Some(v) if v >= MILLION => format!("{}{:.2}M", self.currency, v / MILLION),
            Some(v) => format!("{}{}", self.currency, group_thousands(v, 2)),
        }
    }

    /// Currency-prefixed, two decimals.
    pub fn price(&self, value: Option<f64>) -> String {
        match value {
            Some(v) => format!("{}{:.2}", self.currency, v),
            None => NOT_AVAILABLE.to_string(),
        }
    }

    /// Two decimals, no prefix. Zero is shown as missing.
    pub fn ratio(&self, value: Option<f64>) -> String {
        match reported(value) {
            Some(v) => format!("{v:.2}"),
            None => NOT_AVAILABLE.to_string(),
        }
    }

    /// Earnings per share: currency-prefixed ratio. Zero is shown as missing.
    pub fn eps(&self, value: Option<f64>) -> String {
        match reported(value) {
            Some(v) => format!("{}{:.2}", self.currency, v),
            None => NOT_AVAILABLE.to_string(),
        }
    }

    /// Rounded whole shares with thousands separators.
    pub fn volume(&self, value: Option<f64>) -> String {
        match value {
            Some(v) => group_thousands(v.round(), 0),
            None => NOT_AVAILABLE.to_string(),
        }
    }

    /// Fraction rendered as a percentage: `0.0275` -> `2.75%`.
    pub fn percentage(&self, value: Option<f64>) -> String {
        match value {
            Some(v) => format!("{:.2}%", v * 100.0),
            None => NOT_AVAILABLE.to_string(),
        }
    }

    pub fn derive(&self, info: &CompanyInfo) -> KeyMetrics {
        let num = |field: &Option<Value>| coerce_number(field.as_ref());

        KeyMetrics {
            values: [
                self.large_number(num(&info.market_cap)),
                self.ratio(num(&info.trailing_pe)),
                self.eps(num(&info.trailing_eps)),
                self.large_number(num(&info.total_revenue)),
                self.price(num(&info.fifty_two_week_high)),
                self.price(num(&info.fifty_two_week_low)),
                self.volume(num(&info.volume)),
                self.percentage(num(&info.dividend_yield)),
            ],
        }
    }
}

/// Derive the eight key-metric cards with the default `$` formatter.
pub fn derive_key_metrics(info: &CompanyInfo) -> KeyMetrics {
    MetricsFormatter::default().derive(info)
}

// NOTE: the upstream dashboard tests ratio fields for truthiness, so a
// reported 0.00 P/E or EPS is indistinguishable from a missing one. Kept for
// compatibility; likely an upstream bug.
fn reported(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0)
}

/// Fixed-decimal rendering with `,` between thousands groups.
pub fn group_thousands(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (formatted.as_str(), None),
    };

    let mut out = String::with_capacity(formatted.len() + int_part.len() / 3 + 1);
    if value < 0.0 {
        out.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac_part) = frac_part {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}
