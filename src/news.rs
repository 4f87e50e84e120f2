//! News extraction and sentiment tagging.
//!
//! A [`NewsSource`] hands back the main text of a symbol's news page. Items
//! are recovered from that text with simple heuristics: paragraphs long
//! enough to be a story that mention a relative or clock timestamp.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{
    sentiment::{analyze_sentiment, Sentiment},
    Result,
};

/// Conventional news page for a ticker.
pub fn news_page_url(symbol: &str) -> String {
    format!("https://finance.yahoo.com/quote/{}/news", symbol.trim().to_uppercase())
}

/// Fetches the extracted text of a symbol's news page.
pub trait NewsSource {
    /// `Ok(None)` when the page could not be downloaded or had no main text.
    fn fetch_text(&self, symbol: &str) -> Result<Option<String>>;
}

impl<N: NewsSource + ?Sized> NewsSource for &N {
    fn fetch_text(&self, symbol: &str) -> Result<Option<String>> {
        (**self).fetch_text(symbol)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub summary: String,
    /// The timestamp phrase as it appeared (lower-cased), e.g. `"3 hours ago"`
    pub timestamp: String,
    pub sentiment: Sentiment,
}

/// Extraction limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewsOptions {
    /// Maximum number of items kept
    pub limit: usize,
    /// A section must be strictly longer than this (in characters, trimmed)
    pub min_section_len: usize,
}

impl Default for NewsOptions {
    fn default() -> Self {
        Self {
            limit: 5,
            min_section_len: 50,
        }
    }
}

fn tag_regex() -> &'static Regex {
    static TAG: OnceLock<Regex> = OnceLock::new();
    TAG.get_or_init(|| Regex::new(r"<.*?>").expect("valid tag regex"))
}

fn timestamp_regex() -> &'static Regex {
    static TIMESTAMP: OnceLock<Regex> = OnceLock::new();
    TIMESTAMP.get_or_init(|| {
        Regex::new(r"\d{1,2}:\d{2}|\d{1,2} hours ago|yesterday|\d{1,2} days ago")
            .expect("valid timestamp regex")
    })
}

/// Remove anything that looks like an HTML tag. Tags do not span lines.
///
/// For adapters that only have raw markup; [`extract_news_items`] expects
/// already-extracted text and keeps `<` and `>` as written.
pub fn strip_html(raw: &str) -> String {
    tag_regex().replace_all(raw, "").into_owned()
}

/// Split page text on blank lines and keep the sections that read like news.
///
/// Sections are kept in page order until `options.limit` is reached. The
/// title is the section's first line; the summary is the whole section.
pub fn extract_news_items(text: &str, options: &NewsOptions) -> Vec<NewsItem> {
    let mut items = Vec::new();

    for section in text.split("\n\n") {
        if items.len() >= options.limit {
            break;
        }
        if section.trim().chars().count() <= options.min_section_len {
            continue;
        }

        let lowered = section.to_lowercase();
        let Some(timestamp) = timestamp_regex().find(&lowered) else {
            continue;
        };

        items.push(NewsItem {
            title: section.split('\n').next().unwrap_or_default().to_string(),
            summary: section.to_string(),
            timestamp: timestamp.as_str().to_string(),
            sentiment: analyze_sentiment(section),
        });
    }

    log::debug!("extracted {} news item(s)", items.len());
    items
}

/// Fetch, extract and sentiment-tag news for `symbol`.
///
/// Fetch failures are logged and yield an empty list so the rest of the
/// dashboard still renders.
pub fn news_with_sentiment<N: NewsSource>(
    source: &N,
    symbol: &str,
    options: &NewsOptions,
) -> Vec<NewsItem> {
    match source.fetch_text(symbol) {
        Ok(Some(text)) => extract_news_items(&text, options),
        Ok(None) => {
            log::debug!("{symbol}: no news page text");
            Vec::new()
        }
        Err(e) => {
            log::warn!("{symbol}: error fetching news: {e}");
            Vec::new()
        }
    }
}
