//! CSV download of the historical data table.

use std::io;

use chrono::DateTime;
use serde::Serialize;

use crate::{Bar, DashboardError, Result};

const HEADER: [&str; 6] = ["Date", "Open", "High", "Low", "Close", "Volume"];

/// One row of the download, columns in [`HEADER`] order
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct HistoryRow {
    date: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
}

impl From<&Bar> for HistoryRow {
    fn from(bar: &Bar) -> Self {
        // Out of chrono's range: keep the raw number
        let date = DateTime::from_timestamp(bar.timestamp, 0)
            .map(|dt| dt.date_naive().format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| bar.timestamp.to_string());

        Self {
            date,
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            volume: bar.volume,
        }
    }
}

/// Download file name for a symbol's history
pub fn csv_file_name(symbol: &str) -> String {
    format!("{}_historical_data.csv", symbol.trim().to_uppercase())
}

/// Render bars as CSV, one row per bar, dates as `YYYY-MM-DD` (UTC).
///
/// The header row is always written, even for an empty history.
pub fn history_csv(bars: &[Bar]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::with_capacity(64 * (bars.len() + 1)));

    writer.write_record(HEADER)?;
    for bar in bars {
        writer.serialize(HistoryRow::from(bar))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| DashboardError::Io(e.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|e| DashboardError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
}
