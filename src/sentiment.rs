//! Headline sentiment scoring.
//!
//! Scores are VADER compound values: a single polarity in `[-1, 1]` where
//! positive means favorable. The lexicon is used as shipped, with no
//! finance-specific adjustments.

use vader_sentiment::SentimentIntensityAnalyzer;

/// Anything that can turn a headline into a compound score.
pub trait SentimentScorer {
    fn compound(&self, text: &str) -> f64;
}

pub struct VaderScorer {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl VaderScorer {
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }
}

impl Default for VaderScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentScorer for VaderScorer {
    fn compound(&self, text: &str) -> f64 {
        if text.trim().is_empty() {
            return 0.0;
        }
        let scores = self.analyzer.polarity_scores(text);
        sanitize(scores.get("compound").copied().unwrap_or(0.0))
    }
}

/// Keep a score numeric and inside `[-1, 1]`.
pub fn sanitize(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(-1.0, 1.0)
    }
}
