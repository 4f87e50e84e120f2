//! Keyword-count sentiment for news text.

use std::{collections::HashSet, fmt};

use serde::{Deserialize, Serialize};

const POSITIVE_WORDS: [&str; 14] = [
    "surge",
    "gain",
    "up",
    "rise",
    "positive",
    "profit",
    "growth",
    "strong",
    "bullish",
    "outperform",
    "beat",
    "exceeded",
    "higher",
    "increase",
];

const NEGATIVE_WORDS: [&str; 12] = [
    "drop",
    "down",
    "fall",
    "negative",
    "loss",
    "weak",
    "bearish",
    "underperform",
    "miss",
    "lower",
    "decrease",
    "concern",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
        }
    }

    /// Colour used when the label is rendered
    pub fn color(self) -> &'static str {
        match self {
            Sentiment::Positive => "green",
            Sentiment::Negative => "red",
            Sentiment::Neutral => "gray",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify text by counting distinct positive and negative keywords.
///
/// Tokens are lower-cased and split on whitespace only, so punctuation stays
/// attached (`"gain,"` does not count). Ties are neutral.
pub fn analyze_sentiment(text: &str) -> Sentiment {
    let lowered = text.to_lowercase();
    let words: HashSet<&str> = lowered.split_whitespace().collect();

    let positive = POSITIVE_WORDS.iter().filter(|w| words.contains(*w)).count();
    let negative = NEGATIVE_WORDS.iter().filter(|w| words.contains(*w)).count();

    match positive.cmp(&negative) {
        std::cmp::Ordering::Greater => Sentiment::Positive,
        std::cmp::Ordering::Less => Sentiment::Negative,
        std::cmp::Ordering::Equal => Sentiment::Neutral,
    }
}
