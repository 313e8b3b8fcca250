//! Deterministic bag-of-words headline sentiment.
//!
//! Text is lower-cased and split on non-word characters (anything other than
//! ASCII letters, digits and `_`). Each token is checked against a positive and
//! a negative [`Lexicon`] list:
//!
//! - `raw_score = (positive - negative) / (positive + negative)`
//! - `confidence = min((positive + negative) / 5, 1)`
//! - `raw_score > 0.3` is bullish, `< -0.3` bearish, anything else neutral
//!
//! Labels are decided on the unrounded ratio; both reported figures are
//! rounded to two places.

use std::collections::HashSet;

use crate::{round2, SentimentLabel, SentimentScore, TickerRecord};

const LABEL_THRESHOLD: f64 = 0.3;

/// Sentiment-bearing tokens at which confidence saturates.
const CONFIDENCE_SATURATION: f64 = 5.0;

const POSITIVE_WORDS: [&str; 30] = [
    "surge", "soar", "rally", "gain", "jump", "rise", "climb", "beat", "exceed", "strong",
    "bullish", "upgrade", "buy", "outperform", "record", "high", "growth", "profit", "revenue",
    "success", "breakthrough", "innovation", "partnership", "demand", "boost", "momentum",
    "optimistic", "positive", "upside", "breakout",
];

const NEGATIVE_WORDS: [&str; 31] = [
    "drop", "fall", "plunge", "sink", "decline", "slide", "crash", "miss", "weak", "bearish",
    "downgrade", "sell", "underperform", "low", "loss", "concern", "risk", "warning", "delay",
    "issue", "problem", "lawsuit", "investigation", "cut", "layoff", "disappointing", "negative",
    "downside", "fear", "worry", "slump",
];

/// Immutable positive/negative word lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexicon {
    positive: HashSet<String>,
    negative: HashSet<String>,
}

impl Lexicon {
    pub fn new<P, N>(positive: P, negative: N) -> Self
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
        N: IntoIterator,
        N::Item: AsRef<str>,
    {
        let normalize = |word: &str| word.trim().to_lowercase();
        Self {
            positive: positive.into_iter().map(|w| normalize(w.as_ref())).collect(),
            negative: negative.into_iter().map(|w| normalize(w.as_ref())).collect(),
        }
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::new(POSITIVE_WORDS, NEGATIVE_WORDS)
    }
}

/// Pure scorer over an injected [`Lexicon`].
#[derive(Debug, Clone, Default)]
pub struct SentimentScorer {
    lexicon: Lexicon,
}

impl SentimentScorer {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    pub fn score(&self, text: &str) -> SentimentScore {
        let lowered = text.to_lowercase();
        let (positive, negative) = lowered
            .split(|ch: char| !(ch.is_ascii_alphanumeric() || ch == '_'))
            .filter(|token| !token.is_empty())
            .fold((0u32, 0u32), |(positive, negative), token| {
                (
                    positive + u32::from(self.lexicon.positive.contains(token)),
                    negative + u32::from(self.lexicon.negative.contains(token)),
                )
            });

        let total = positive + negative;
        if total == 0 {
            return SentimentScore::NEUTRAL;
        }

        let ratio = (f64::from(positive) - f64::from(negative)) / f64::from(total);
        let confidence = (f64::from(total) / CONFIDENCE_SATURATION).min(1.0);
        let label = if ratio > LABEL_THRESHOLD {
            SentimentLabel::Bullish
        } else if ratio < -LABEL_THRESHOLD {
            SentimentLabel::Bearish
        } else {
            SentimentLabel::Neutral
        };

        SentimentScore {
            raw_score: round2(ratio),
            label,
            confidence: round2(confidence),
        }
    }

    /// Attaches `headlines` to `ticker` and scores their concatenation.
    pub fn enrich(&self, ticker: &mut TickerRecord, headlines: Vec<String>) {
        ticker.sentiment = Some(self.score(&headlines.join(" ")));
        ticker.headlines = headlines;
        ticker.needs_fetch = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Priority, Symbol};

    fn scorer() -> SentimentScorer {
        SentimentScorer::default()
    }

    fn words(positive: usize, negative: usize) -> String {
        let mut tokens = vec!["gain"; positive];
        tokens.extend(vec!["loss"; negative]);
        tokens.join(" ")
    }

    #[test]
    fn empty_and_signal_free_text_is_neutral_zero() {
        assert_eq!(scorer().score(""), SentimentScore::NEUTRAL);
        assert_eq!(
            scorer().score("Quarterly filing published on schedule"),
            SentimentScore::NEUTRAL
        );
    }

    #[test]
    fn scoring_is_repeatable() {
        let text = "Nvidia shares surge on record data center demand despite export risk";
        assert_eq!(scorer().score(text), scorer().score(text));
    }

    #[test]
    fn punctuation_and_case_split_tokens() {
        let score = scorer().score("SURGE!!! Rally, (boost)... crash?");
        assert_eq!(score.raw_score, 0.5);
        assert_eq!(score.label, SentimentLabel::Bullish);
        assert_eq!(score.confidence, 0.8);
    }

    #[test]
    fn exactly_positive_threshold_is_neutral() {
        // (13 - 7) / 20 = 0.3
        let score = scorer().score(&words(13, 7));
        assert_eq!(score.raw_score, 0.3);
        assert_eq!(score.label, SentimentLabel::Neutral);
    }

    #[test]
    fn above_positive_threshold_is_bullish() {
        // (2 - 1) / 3 = 0.33
        let score = scorer().score(&words(2, 1));
        assert_eq!(score.raw_score, 0.33);
        assert_eq!(score.label, SentimentLabel::Bullish);
    }

    #[test]
    fn exactly_negative_threshold_is_neutral() {
        let score = scorer().score(&words(7, 13));
        assert_eq!(score.raw_score, -0.3);
        assert_eq!(score.label, SentimentLabel::Neutral);
    }

    #[test]
    fn below_negative_threshold_is_bearish() {
        let score = scorer().score(&words(1, 2));
        assert_eq!(score.raw_score, -0.33);
        assert_eq!(score.label, SentimentLabel::Bearish);
    }

    #[test]
    fn confidence_grows_with_signal_and_saturates() {
        assert_eq!(scorer().score(&words(1, 1)).confidence, 0.4);
        assert_eq!(scorer().score(&words(4, 1)).confidence, 1.0);
        assert_eq!(scorer().score(&words(9, 3)).confidence, 1.0);
    }

    #[test]
    fn token_order_does_not_matter() {
        assert_eq!(
            scorer().score("plunge rally gain"),
            scorer().score("gain plunge rally")
        );
    }

    #[test]
    fn injected_lexicon_replaces_defaults() {
        let custom = SentimentScorer::new(Lexicon::new(["Moon"], ["rug"]));
        assert_eq!(custom.score("to the moon").label, SentimentLabel::Bullish);
        assert_eq!(custom.score("surge surge surge"), SentimentScore::NEUTRAL);
    }

    #[test]
    fn enrichment_marks_ticker_fetched() {
        let mut ticker = TickerRecord::pending(
            Symbol::parse("AMD").expect("valid"),
            "Advanced Micro Devices",
            Priority::Normal,
        );

        scorer().enrich(
            &mut ticker,
            vec![
                String::from("AMD shares jump on strong guidance"),
                String::from("Analysts upgrade AMD"),
            ],
        );

        assert!(!ticker.needs_fetch);
        assert_eq!(ticker.headlines.len(), 2);
        let sentiment = ticker.sentiment.expect("scored");
        assert_eq!(sentiment.label, SentimentLabel::Bullish);
        assert_eq!(sentiment.raw_score, 1.0);
        assert_eq!(sentiment.confidence, 0.6);
    }
}
