//! Per-request assembly of everything the dashboard page shows.
//!
//! Fetching goes through the provider and news source one symbol at a time;
//! pattern scanning for all fetched symbols then runs in parallel.

use serde::Serialize;

use crate::{
    analysis::{comparison_series, price_summary, ComparisonSeries, PriceSummary},
    chart::ChartOverlay,
    config::DashboardConfig,
    market::{parse_symbols, Bar, HistoryPeriod, MarketDataProvider},
    metrics::{CompanyInfo, KeyMetrics, MetricsFormatter, NOT_AVAILABLE},
    news::{news_with_sentiment, NewsItem, NewsSource},
    scan_parallel, DashboardError, PatternAnnotation, PatternEngine, Result,
};

/// Everything shown for one symbol
#[derive(Debug, Clone, Serialize)]
pub struct SymbolReport {
    pub symbol: String,
    pub name: String,
    pub sector: String,
    pub industry: String,
    pub price: Option<PriceSummary>,
    pub annotations: Vec<PatternAnnotation>,
    pub overlay: ChartOverlay,
    pub key_metrics: KeyMetrics,
    pub news: Vec<NewsItem>,
    pub bars: Vec<Bar>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub period: HistoryPeriod,
    pub symbols: Vec<SymbolReport>,
    /// Present whenever more than one symbol was requested
    pub comparison: Option<Vec<ComparisonSeries>>,
    /// Requested symbols whose data could not be fetched
    pub skipped: Vec<String>,
}

struct Fetched {
    symbol: String,
    bars: Vec<Bar>,
    info: CompanyInfo,
    news: Vec<NewsItem>,
}

pub struct Dashboard<P, N> {
    provider: P,
    news: N,
    engine: PatternEngine,
    formatter: MetricsFormatter,
    config: DashboardConfig,
}

impl<P: MarketDataProvider, N: NewsSource> Dashboard<P, N> {
    pub fn new(provider: P, news: N, config: DashboardConfig) -> Self {
        Self {
            provider,
            news,
            engine: PatternEngine::default(),
            formatter: MetricsFormatter::new(config.currency_symbol.clone()),
            config,
        }
    }

    /// Replace the pattern engine (e.g. one built with a subset of detectors)
    pub fn with_engine(mut self, engine: PatternEngine) -> Self {
        self.engine = engine;
        self
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Build the report for raw symbol input (comma separated) over `period`.
    pub fn report_for_input(&self, input: &str, period: HistoryPeriod) -> Result<DashboardReport> {
        let symbols = parse_symbols(input, &self.config.default_symbols);
        self.report(&symbols, period)
    }

    /// Build the report for already-parsed symbols.
    ///
    /// Symbols whose history or company record cannot be fetched are skipped
    /// and listed in [`DashboardReport::skipped`]. Fails only when nothing at
    /// all could be fetched.
    pub fn report(&self, symbols: &[String], period: HistoryPeriod) -> Result<DashboardReport> {
        let news_options = self.config.news_options();
        let mut fetched = Vec::with_capacity(symbols.len());
        let mut skipped = Vec::new();

        for symbol in symbols {
            match self.fetch(symbol, period) {
                Ok((bars, info)) => fetched.push(Fetched {
                    symbol: symbol.clone(),
                    news: news_with_sentiment(&self.news, symbol, &news_options),
                    bars,
                    info,
                }),
                Err(e) => {
                    log::warn!("{symbol}: skipped: {e}");
                    skipped.push(symbol.clone());
                }
            }
        }

        if fetched.is_empty() {
            return Err(DashboardError::NoData(symbols.to_vec()));
        }

        let instruments: Vec<(&str, &[Bar])> = fetched
            .iter()
            .map(|f| (f.symbol.as_str(), f.bars.as_slice()))
            .collect();
        let scans = scan_parallel(&self.engine, instruments);

        let comparison = (symbols.len() > 1).then(|| {
            fetched
                .iter()
                .filter_map(|f| comparison_series(&f.symbol, &f.bars))
                .collect()
        });

        let reports = fetched
            .into_iter()
            .zip(scans)
            .map(|(f, scan)| self.symbol_report(f, scan.annotations))
            .collect();

        Ok(DashboardReport {
            period,
            symbols: reports,
            comparison,
            skipped,
        })
    }

    fn fetch(&self, symbol: &str, period: HistoryPeriod) -> Result<(Vec<Bar>, CompanyInfo)> {
        let bars = self.provider.history(symbol, period)?;
        if bars.is_empty() {
            return Err(DashboardError::InvalidSymbol(symbol.to_string()));
        }
        let info = self.provider.company_info(symbol)?;
        Ok((bars, info))
    }

    fn symbol_report(&self, fetched: Fetched, annotations: Vec<PatternAnnotation>) -> SymbolReport {
        let Fetched {
            symbol,
            bars,
            info,
            news,
        } = fetched;

        SymbolReport {
            name: info.long_name().unwrap_or(&symbol).to_string(),
            sector: info.sector().unwrap_or(NOT_AVAILABLE).to_string(),
            industry: info.industry().unwrap_or(NOT_AVAILABLE).to_string(),
            price: price_summary(&bars),
            overlay: ChartOverlay::new(&bars, &annotations),
            key_metrics: self.formatter.derive(&info),
            annotations,
            news,
            bars,
            symbol,
        }
    }
}
