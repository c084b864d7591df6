//! Canonical record types — the unified shape every ingested text item is
//! normalised into.
//!
//! Records are created once at ingestion time and are immutable thereafter.
//! Re-inserting a record with an id already in the store is a no-op.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

// ─── Source ──────────────────────────────────────────────────────────────────

/// Where a record originally came from. The kebab-case tag doubles as the
/// namespace prefix of the record id, so ids can never collide across
/// sources.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Source {
  DiscussionPost,
  DiscussionComment,
  NewsArticle,
  ScrapedHeadline,
  #[default]
  Unknown,
}

impl Source {
  /// The tag stored in the `source` column and prefixed onto record ids.
  pub fn tag(self) -> &'static str {
    match self {
      Self::DiscussionPost => "discussion-post",
      Self::DiscussionComment => "discussion-comment",
      Self::NewsArticle => "news-article",
      Self::ScrapedHeadline => "scraped-headline",
      Self::Unknown => "unknown",
    }
  }
}

// ─── Transport type ──────────────────────────────────────────────────────────

/// The closed set of transport modes a record can classify as.
/// `Bus` is the fallback when no keyword matches.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumIter,
  EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TransportType {
  #[default]
  Bus,
  Metro,
  Train,
  Auto,
  Taxi,
}

// ─── Sentiment ───────────────────────────────────────────────────────────────

/// The closed set of sentiment polarity labels.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SentimentLabel {
  Positive,
  Negative,
  #[default]
  Neutral,
}

impl SentimentLabel {
  /// Fixed label → score mapping, used when only a label is available
  /// (e.g. replaying an artifact row that never stored its raw polarity).
  pub fn fixed_score(self) -> f64 {
    match self {
      Self::Positive => 0.5,
      Self::Negative => -0.5,
      Self::Neutral => 0.0,
    }
  }
}

/// A full sentiment call: label plus the continuous polarity it was derived
/// from and the confidence of the call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
  pub label:      SentimentLabel,
  /// Lexicon polarity in [-1, 1].
  pub score:      f64,
  /// Certainty of the call in [0, 1].
  pub confidence: f64,
}

// ─── CanonicalRecord ─────────────────────────────────────────────────────────

/// One ingested text item with its derived tags. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalRecord {
  /// `{source-tag}_{suffix}`; suffix is the native id or a content hash.
  pub id:              String,
  pub text:            String,
  /// Ingestion time when the source provides no native timestamp.
  pub created_at:      DateTime<Utc>,
  pub source:          Source,
  /// Free-form location, `"City, State"` or a bare name; `"India"` when
  /// nothing was detected.
  pub region:          String,
  pub transport_type:  TransportType,
  pub sentiment_label: SentimentLabel,
  pub sentiment_score: f64,
  pub confidence:      f64,
}

// ─── Region split ────────────────────────────────────────────────────────────

/// Split a region string into `(city, state)`.
///
/// City is the segment before the first comma, state the segment after it,
/// both trimmed. A comma-less region is both its own city and state.
pub fn split_region(region: &str) -> (&str, &str) {
  match region.split_once(',') {
    Some((city, state)) => (city.trim(), state.trim()),
    None => (region, region),
  }
}

/// The aggregation key for a region: its trailing comma-separated segment,
/// trimmed, or the whole string when there is no comma.
pub fn derived_state(region: &str) -> &str {
  match region.rsplit_once(',') {
    Some((_, state)) => state.trim(),
    None => region,
  }
}
