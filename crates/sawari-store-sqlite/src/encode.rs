//! Encoding and decoding helpers between Rust domain types and the
//! plain-text representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings; closed enums as their
//! lowercase/kebab-case tags.

use chrono::{DateTime, Utc};
use sawari_core::record::{
  CanonicalRecord, SentimentLabel, Source, TransportType,
};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Source ──────────────────────────────────────────────────────────────────

pub fn encode_source(s: Source) -> &'static str { s.tag() }

pub fn decode_source(s: &str) -> Result<Source> {
  match s {
    "discussion-post" => Ok(Source::DiscussionPost),
    "discussion-comment" => Ok(Source::DiscussionComment),
    "news-article" => Ok(Source::NewsArticle),
    "scraped-headline" => Ok(Source::ScrapedHeadline),
    "unknown" => Ok(Source::Unknown),
    other => Err(Error::UnknownTag {
      column: "source",
      value:  other.to_owned(),
    }),
  }
}

// ─── TransportType ───────────────────────────────────────────────────────────

pub fn encode_transport(t: TransportType) -> &'static str {
  match t {
    TransportType::Bus => "bus",
    TransportType::Metro => "metro",
    TransportType::Train => "train",
    TransportType::Auto => "auto",
    TransportType::Taxi => "taxi",
  }
}

pub fn decode_transport(s: &str) -> Result<TransportType> {
  s.parse().map_err(|_| Error::UnknownTag {
    column: "transport_type",
    value:  s.to_owned(),
  })
}

// ─── SentimentLabel ──────────────────────────────────────────────────────────

pub fn encode_sentiment(label: SentimentLabel) -> &'static str {
  match label {
    SentimentLabel::Positive => "positive",
    SentimentLabel::Negative => "negative",
    SentimentLabel::Neutral => "neutral",
  }
}

pub fn decode_sentiment(s: &str) -> Result<SentimentLabel> {
  s.parse().map_err(|_| Error::UnknownTag {
    column: "sentiment",
    value:  s.to_owned(),
  })
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `records` row.
pub struct RawRecordRow {
  pub id:              String,
  pub text:            String,
  pub created_at:      String,
  pub source:          String,
  pub region:          String,
  pub transport_type:  String,
  pub sentiment:       String,
  pub sentiment_score: f64,
  pub confidence:      f64,
}

impl RawRecordRow {
  pub fn into_record(self) -> Result<CanonicalRecord> {
    Ok(CanonicalRecord {
      id:              self.id,
      text:            self.text,
      created_at:      decode_dt(&self.created_at)?,
      source:          decode_source(&self.source)?,
      region:          self.region,
      transport_type:  decode_transport(&self.transport_type)?,
      sentiment_label: decode_sentiment(&self.sentiment)?,
      sentiment_score: self.sentiment_score,
      confidence:      self.confidence,
    })
  }
}
