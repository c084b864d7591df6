//! Normalisation of source-specific raw items into [`CanonicalRecord`]s.
//!
//! Each source shape is a variant of the closed [`RawItem`] enum carrying
//! exactly the fields the normaliser needs, so normalisation is an
//! exhaustive match rather than defensive field probing.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

use crate::{
  Error, Result,
  classify::{classify_region, classify_transport, mentions_transport},
  record::{CanonicalRecord, Source},
  sentiment::score_sentiment,
};

/// Comments with a body shorter than this many characters are dropped.
const MIN_COMMENT_CHARS: usize = 20;

// ─── RawItem ─────────────────────────────────────────────────────────────────

/// One raw item as fetched from a source, before normalisation.
#[derive(Debug, Clone)]
pub enum RawItem {
  /// A discussion-forum post: title plus optional self-text body.
  DiscussionPost {
    /// Native id assigned by the forum.
    id:          String,
    title:       String,
    body:        String,
    /// Native creation time as epoch seconds, when present.
    created_utc: Option<i64>,
  },

  /// A comment under a discussion post.
  DiscussionComment {
    id:          String,
    body:        String,
    created_utc: Option<i64>,
  },

  /// A news article from a feed API.
  NewsArticle {
    url:          String,
    title:        String,
    description:  Option<String>,
    published_at: Option<DateTime<Utc>>,
  },

  /// A headline scraped from a topic page. The page itself carries the
  /// location; there is no native timestamp.
  ScrapedHeadline { text: String, location: String },
}

impl RawItem {
  /// The source tag this item normalises under.
  pub fn source(&self) -> Source {
    match self {
      Self::DiscussionPost { .. } => Source::DiscussionPost,
      Self::DiscussionComment { .. } => Source::DiscussionComment,
      Self::NewsArticle { .. } => Source::NewsArticle,
      Self::ScrapedHeadline { .. } => Source::ScrapedHeadline,
    }
  }
}

// ─── Normalisation ───────────────────────────────────────────────────────────

/// Normalise one raw item into a canonical record.
///
/// Returns `Ok(None)` for intentional drops (a comment below the length
/// floor, a headline without any transport keyword) and
/// [`Error::MalformedRecord`] when the assembled text is empty. `now` is
/// the ingestion timestamp, used wherever the source provides none.
pub fn normalize(
  item: RawItem,
  now: DateTime<Utc>,
) -> Result<Option<CanonicalRecord>> {
  let source = item.source();

  let (id, text, created_at, region) = match item {
    RawItem::DiscussionPost { id, title, body, created_utc } => {
      let text = format!("{title} {body}");
      let created_at = epoch_or(created_utc, now);
      let region = classify_region(&text).to_owned();
      (format!("{}_{id}", source.tag()), text, created_at, region)
    }

    RawItem::DiscussionComment { id, body, created_utc } => {
      if body.chars().count() < MIN_COMMENT_CHARS {
        return Ok(None);
      }
      let created_at = epoch_or(created_utc, now);
      let region = classify_region(&body).to_owned();
      (format!("{}_{id}", source.tag()), body, created_at, region)
    }

    RawItem::NewsArticle { url, title, description, published_at } => {
      let text = format!("{title} {}", description.unwrap_or_default());
      let created_at = published_at.unwrap_or(now);
      let region = classify_region(&text).to_owned();
      (
        format!("{}_{}", source.tag(), content_hash(&url)),
        text,
        created_at,
        region,
      )
    }

    RawItem::ScrapedHeadline { text, location } => {
      if !mentions_transport(&text) {
        return Ok(None);
      }
      (
        format!("{}_{}", source.tag(), content_hash(&text)),
        text,
        now,
        location,
      )
    }
  };

  if text.trim().is_empty() {
    return Err(Error::MalformedRecord {
      source_tag: source.tag(),
      item_id:    Some(id),
      reason:     "empty text".to_owned(),
    });
  }

  let sentiment = score_sentiment(&text);

  Ok(Some(CanonicalRecord {
    id,
    transport_type: classify_transport(&text),
    sentiment_label: sentiment.label,
    sentiment_score: sentiment.score,
    confidence: sentiment.confidence,
    text,
    created_at,
    source,
    region,
  }))
}

/// SHA-256 prefix of `input`, hex-encoded. Stable across runs, so the
/// same article URL or headline text always yields the same record id.
fn content_hash(input: &str) -> String {
  let digest = Sha256::digest(input.as_bytes());
  hex::encode(&digest[..8])
}

fn epoch_or(secs: Option<i64>, fallback: DateTime<Utc>) -> DateTime<Utc> {
  secs
    .and_then(|s| DateTime::from_timestamp(s, 0))
    .unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;
  use crate::record::{SentimentLabel, TransportType};

  fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
  }

  #[test]
  fn headline_round_trip() {
    let record = normalize(
      RawItem::ScrapedHeadline {
        text:     "Delhi metro is great today".into(),
        location: "Delhi".into(),
      },
      now(),
    )
    .unwrap()
    .unwrap();

    assert_eq!(record.transport_type, TransportType::Metro);
    assert_eq!(record.sentiment_label, SentimentLabel::Positive);
    assert_eq!(record.region, "Delhi");
    assert_eq!(record.created_at, now());
    assert!(record.id.starts_with("scraped-headline_"));
  }

  #[test]
  fn headline_without_transport_keyword_is_dropped() {
    let result = normalize(
      RawItem::ScrapedHeadline {
        text:     "Festival season begins across the city".into(),
        location: "Mumbai, Maharashtra".into(),
      },
      now(),
    )
    .unwrap();
    assert!(result.is_none());
  }

  #[test]
  fn headline_id_is_stable() {
    let make = || {
      normalize(
        RawItem::ScrapedHeadline {
          text:     "Metro fares revised".into(),
          location: "Delhi".into(),
        },
        now(),
      )
      .unwrap()
      .unwrap()
    };
    assert_eq!(make().id, make().id);
  }

  #[test]
  fn comment_length_boundary() {
    let comment = |body: &str| RawItem::DiscussionComment {
      id:          "c1".into(),
      body:        body.into(),
      created_utc: None,
    };

    // 19 characters: dropped.
    let nineteen = "a".repeat(19);
    assert!(normalize(comment(&nineteen), now()).unwrap().is_none());

    // 20 characters: kept.
    let twenty = "a".repeat(20);
    let record = normalize(comment(&twenty), now()).unwrap().unwrap();
    assert_eq!(record.id, "discussion-comment_c1");
    assert_eq!(record.text, twenty);
  }

  #[test]
  fn post_concatenates_title_and_body() {
    let record = normalize(
      RawItem::DiscussionPost {
        id:          "p1".into(),
        title:       "Mumbai local trains".into(),
        body:        "running late again".into(),
        created_utc: Some(1_700_000_000),
      },
      now(),
    )
    .unwrap()
    .unwrap();

    assert_eq!(record.text, "Mumbai local trains running late again");
    assert_eq!(record.region, "Mumbai, Maharashtra");
    assert_eq!(record.transport_type, TransportType::Train);
    assert_eq!(record.created_at.timestamp(), 1_700_000_000);
  }

  #[test]
  fn post_without_native_timestamp_uses_ingestion_time() {
    let record = normalize(
      RawItem::DiscussionPost {
        id:          "p2".into(),
        title:       "Bus fares in Pune going up".into(),
        body:        String::new(),
        created_utc: None,
      },
      now(),
    )
    .unwrap()
    .unwrap();
    assert_eq!(record.created_at, now());
  }

  #[test]
  fn empty_post_is_malformed() {
    let err = normalize(
      RawItem::DiscussionPost {
        id:          "p3".into(),
        title:       String::new(),
        body:        "  ".into(),
        created_utc: None,
      },
      now(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::MalformedRecord { .. }));
  }

  #[test]
  fn news_article_tolerates_missing_description() {
    let record = normalize(
      RawItem::NewsArticle {
        url:          "https://news.example/metro-opens".into(),
        title:        "Chennai metro phase two opens".into(),
        description:  None,
        published_at: Some(now()),
      },
      Utc::now(),
    )
    .unwrap()
    .unwrap();

    assert!(record.id.starts_with("news-article_"));
    assert_eq!(record.region, "Chennai, Tamil Nadu");
    assert_eq!(record.created_at, now());
  }
}
