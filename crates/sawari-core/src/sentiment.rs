//! Lexicon-based sentiment scoring.
//!
//! Tokenises the text, counts hits against fixed positive/negative word
//! sets, and maps the resulting polarity to a label. The scorer is
//! infallible by design: text with no sentiment-bearing tokens (empty
//! input included) comes back as neutral with the floor confidence.

use std::collections::HashSet;

use once_cell::sync::Lazy;

use crate::record::{Sentiment, SentimentLabel};

// ─── Lexicons ────────────────────────────────────────────────────────────────

static POSITIVE_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
  HashSet::from([
    "good", "great", "excellent", "amazing", "awesome", "best", "better",
    "nice", "love", "loved", "happy", "glad", "thanks", "thank", "smooth",
    "fast", "quick", "clean", "comfortable", "convenient", "reliable",
    "punctual", "efficient", "affordable", "cheap", "improved",
    "improvement", "upgrade", "upgraded", "new", "modern", "safe",
    "helpful", "friendly", "easy", "spacious", "frequent", "timely",
    "wonderful", "fantastic", "superb", "appreciate", "praise",
  ])
});

static NEGATIVE_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
  HashSet::from([
    "bad", "worst", "worse", "terrible", "horrible", "awful", "poor",
    "hate", "hated", "angry", "sad", "delay", "delayed", "delays", "late",
    "cancelled", "canceled", "cancellation", "breakdown", "broken",
    "crowded", "overcrowded", "packed", "jam", "jammed", "stuck",
    "accident", "crash", "derailed", "strike", "protest", "dirty",
    "filthy", "unsafe", "dangerous", "expensive", "overpriced", "rude",
    "slow", "problem", "problems", "issue", "issues", "fail", "failed",
    "failure", "nightmare", "mess", "chaos", "harassment",
  ])
});

// ─── Scorer ──────────────────────────────────────────────────────────────────

const POSITIVE_THRESHOLD: f64 = 0.1;
const NEGATIVE_THRESHOLD: f64 = -0.1;

/// Score the sentiment of `text`.
///
/// Polarity is `(pos - neg) / (pos + neg)` over lexicon hits, so it always
/// lands in [-1, 1]. Confidence is `min(|polarity| + 0.5, 1.0)`.
pub fn score_sentiment(text: &str) -> Sentiment {
  let lower = text.to_lowercase();

  let mut positive = 0usize;
  let mut negative = 0usize;
  for token in lower.split(|c: char| !c.is_alphabetic()) {
    if token.chars().count() <= 2 {
      continue;
    }
    if POSITIVE_WORDS.contains(token) {
      positive += 1;
    } else if NEGATIVE_WORDS.contains(token) {
      negative += 1;
    }
  }

  let hits = positive + negative;
  let polarity = if hits == 0 {
    0.0
  } else {
    (positive as f64 - negative as f64) / hits as f64
  };

  let label = if polarity > POSITIVE_THRESHOLD {
    SentimentLabel::Positive
  } else if polarity < NEGATIVE_THRESHOLD {
    SentimentLabel::Negative
  } else {
    SentimentLabel::Neutral
  };

  Sentiment {
    label,
    score: polarity,
    confidence: (polarity.abs() + 0.5).min(1.0),
  }
}
