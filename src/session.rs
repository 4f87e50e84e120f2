//! Per-visitor session context: sign-in name, watchlist, and the community
//! insights shared on each symbol.
//!
//! A [`Session`] is plain owned data passed into whatever handles a request;
//! nothing here is process-global.

use std::{
    collections::{BTreeSet, HashMap},
    fmt,
};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    market::{normalize_symbol, HistoryPeriod, MarketDataProvider},
    DashboardError, Result,
};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Author's stance attached to an insight
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InsightSentiment {
    #[serde(rename = "Very Bearish")]
    VeryBearish,
    #[serde(rename = "Bearish")]
    Bearish,
    #[default]
    #[serde(rename = "Neutral")]
    Neutral,
    #[serde(rename = "Bullish")]
    Bullish,
    #[serde(rename = "Very Bullish")]
    VeryBullish,
}

impl InsightSentiment {
    /// Slider order, most bearish first
    pub const ALL: [InsightSentiment; 5] = [
        InsightSentiment::VeryBearish,
        InsightSentiment::Bearish,
        InsightSentiment::Neutral,
        InsightSentiment::Bullish,
        InsightSentiment::VeryBullish,
    ];

    pub fn label(self) -> &'static str {
        match self {
            InsightSentiment::VeryBearish => "Very Bearish",
            InsightSentiment::Bearish => "Bearish",
            InsightSentiment::Neutral => "Neutral",
            InsightSentiment::Bullish => "Bullish",
            InsightSentiment::VeryBullish => "Very Bullish",
        }
    }
}

impl fmt::Display for InsightSentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    pub id: Uuid,
    pub user: String,
    pub text: String,
    pub sentiment: InsightSentiment,
    /// Local time the insight was shared, `%Y-%m-%d %H:%M:%S`
    pub timestamp: String,
    pub likes: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    user_name: Option<String>,
    watchlist: BTreeSet<String>,
    insights: HashMap<String, Vec<Insight>>,
    comparison: Option<Vec<String>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    // ===========================================
    // Profile
    // ===========================================

    pub fn sign_in(&mut self, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DashboardError::EmptyUserName);
        }
        log::info!("{name} signed in");
        self.user_name = Some(name.to_string());
        Ok(())
    }

    pub fn sign_out(&mut self) {
        self.user_name = None;
    }

    pub fn user_name(&self) -> Option<&str> {
        self.user_name.as_deref()
    }

    // ===========================================
    // Watchlist
    // ===========================================

    /// Add a symbol after checking the provider knows it.
    ///
    /// Returns `Ok(false)` if it was already watched. A provider error or an
    /// empty one-day history means the symbol is invalid.
    pub fn add_to_watchlist<P: MarketDataProvider>(
        &mut self,
        provider: &P,
        symbol: &str,
    ) -> Result<bool> {
        let symbol =
            normalize_symbol(symbol).ok_or_else(|| DashboardError::InvalidSymbol(symbol.to_string()))?;
        if self.watchlist.contains(&symbol) {
            return Ok(false);
        }

        match provider.history(&symbol, HistoryPeriod::OneDay) {
            Ok(bars) if !bars.is_empty() => Ok(self.watchlist.insert(symbol)),
            Ok(_) => Err(DashboardError::InvalidSymbol(symbol)),
            Err(e) => {
                log::warn!("{symbol}: watchlist probe failed: {e}");
                Err(DashboardError::InvalidSymbol(symbol))
            }
        }
    }

    /// Add a symbol already known to be valid (e.g. one that is on screen).
    pub fn watch(&mut self, symbol: &str) -> bool {
        normalize_symbol(symbol).is_some_and(|s| self.watchlist.insert(s))
    }

    pub fn remove_from_watchlist(&mut self, symbol: &str) -> bool {
        let removed = normalize_symbol(symbol).is_some_and(|s| self.watchlist.remove(&s));
        if removed {
            if let Some(comparison) = &mut self.comparison {
                comparison.retain(|s| self.watchlist.contains(s));
            }
        }
        removed
    }

    pub fn is_watched(&self, symbol: &str) -> bool {
        normalize_symbol(symbol).is_some_and(|s| self.watchlist.contains(&s))
    }

    /// Watched symbols in sorted order
    pub fn watchlist(&self) -> impl Iterator<Item = &str> {
        self.watchlist.iter().map(String::as_str)
    }

    /// Queue watched symbols for the comparison view. Unwatched symbols are ignored.
    ///
    /// Returns the symbols that will be compared.
    pub fn compare_selected(&mut self, selected: &[&str]) -> &[String] {
        let symbols: Vec<String> = selected
            .iter()
            .filter_map(|s| normalize_symbol(s))
            .filter(|s| self.watchlist.contains(s))
            .collect();
        self.comparison.insert(symbols)
    }

    /// Symbols queued by [`Session::compare_selected`], if any
    pub fn comparison(&self) -> Option<&[String]> {
        self.comparison.as_deref().filter(|c| !c.is_empty())
    }

    // ===========================================
    // Insights
    // ===========================================

    /// Share an insight on `symbol` as the signed-in user.
    pub fn share_insight(
        &mut self,
        symbol: &str,
        text: &str,
        sentiment: InsightSentiment,
    ) -> Result<&Insight> {
        let user = self
            .user_name
            .clone()
            .ok_or(DashboardError::NotSignedIn)?;
        if text.trim().is_empty() {
            return Err(DashboardError::EmptyInsight);
        }
        let symbol =
            normalize_symbol(symbol).ok_or_else(|| DashboardError::InvalidSymbol(symbol.to_string()))?;

        let insight = Insight {
            id: Uuid::new_v4(),
            user,
            text: text.to_string(),
            sentiment,
            timestamp: chrono::Local::now().format(TIMESTAMP_FORMAT).to_string(),
            likes: 0,
        };
        log::debug!("{}: insight {} shared by {}", symbol, insight.id, insight.user);

        let list = self.insights.entry(symbol).or_default();
        list.push(insight);
        Ok(&list[list.len() - 1])
    }

    /// Insights on `symbol`, newest first
    pub fn insights(&self, symbol: &str) -> impl Iterator<Item = &Insight> {
        normalize_symbol(symbol)
            .and_then(|s| self.insights.get(&s))
            .into_iter()
            .flat_map(|list| list.iter().rev())
    }

    /// Add a like. Anyone may like, signed in or not. Returns the new count.
    pub fn like_insight(&mut self, symbol: &str, id: Uuid) -> Result<u32> {
        let insight = self
            .insights_mut(symbol)
            .and_then(|list| list.iter_mut().find(|i| i.id == id))
            .ok_or(DashboardError::InsightNotFound(id))?;
        insight.likes = insight.likes.saturating_add(1);
        Ok(insight.likes)
    }

    /// Delete an insight. Only its author, while signed in, may do so.
    pub fn delete_insight(&mut self, symbol: &str, id: Uuid) -> Result<Insight> {
        let user = self
            .user_name
            .clone()
            .ok_or(DashboardError::NotSignedIn)?;
        let list = self
            .insights_mut(symbol)
            .ok_or(DashboardError::InsightNotFound(id))?;
        let position = list
            .iter()
            .position(|i| i.id == id)
            .ok_or(DashboardError::InsightNotFound(id))?;

        if list[position].user != user {
            return Err(DashboardError::NotAuthor {
                author: list[position].user.clone(),
            });
        }
        Ok(list.remove(position))
    }

    fn insights_mut(&mut self, symbol: &str) -> Option<&mut Vec<Insight>> {
        let symbol = normalize_symbol(symbol)?;
        self.insights.get_mut(&symbol)
    }
}
