//! Near-duplicate collapse over canonical records.
//!
//! The key is deliberately coarse: the lowercased, trimmed text truncated
//! to its first 100 characters. Texts that diverge only after the prefix
//! still count as duplicates. This matches the behaviour the aggregates
//! were tuned against, so it is preserved as-is rather than upgraded to a
//! similarity measure.

use std::collections::HashSet;

use crate::record::CanonicalRecord;

/// Prefix length of the dedup key, in characters (not bytes, so
/// multi-byte scripts never split).
const KEY_PREFIX_CHARS: usize = 100;

/// The normalised key two records are compared under.
pub fn dedup_key(text: &str) -> String {
  text.trim().to_lowercase().chars().take(KEY_PREFIX_CHARS).collect()
}

/// Remove near-duplicates, keeping the first occurrence of each key.
/// Order-preserving and idempotent. Source and id play no part: two
/// records with the same key are duplicates no matter where they came
/// from.
pub fn dedup(records: Vec<CanonicalRecord>) -> Vec<CanonicalRecord> {
  let mut seen = HashSet::new();
  records
    .into_iter()
    .filter(|record| seen.insert(dedup_key(&record.text)))
    .collect()
}

#[cfg(test)]
mod tests {
  use chrono::Utc;

  use super::*;
  use crate::record::{CanonicalRecord, SentimentLabel, Source, TransportType};

  fn record(id: &str, text: &str) -> CanonicalRecord {
    CanonicalRecord {
      id:              id.into(),
      text:            text.into(),
      created_at:      Utc::now(),
      source:          Source::Unknown,
      region:          "India".into(),
      transport_type:  TransportType::Bus,
      sentiment_label: SentimentLabel::Neutral,
      sentiment_score: 0.0,
      confidence:      0.5,
    }
  }

  #[test]
  fn first_seen_survives_case_insensitively() {
    let records = vec![
      record("a", "Bus delay in Mumbai today"),
      record("b", "BUS DELAY IN MUMBAI TODAY"),
      record("c", "Metro strike in Delhi"),
    ];

    let result = dedup(records);
    assert_eq!(result.len(), 2);
    assert_eq!(result[0].id, "a");
    assert_eq!(result[1].id, "c");
  }

  #[test]
  fn dedup_is_idempotent() {
    let records = vec![
      record("a", "Bus delay in Mumbai today"),
      record("b", "bus delay in mumbai today  "),
      record("c", "Metro strike in Delhi"),
      record("d", "Auto fares revised in Pune"),
    ];

    let once = dedup(records);
    let twice = dedup(once.clone());
    assert_eq!(once, twice);
  }

  #[test]
  fn texts_diverging_after_prefix_are_duplicates() {
    let prefix = "x".repeat(100);
    let records = vec![
      record("a", &format!("{prefix} first tail")),
      record("b", &format!("{prefix} completely different tail")),
    ];

    let result = dedup(records);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].id, "a");
  }

  #[test]
  fn key_counts_characters_not_bytes() {
    // 100 three-byte characters; the key must keep all of them.
    let text: String = "म".repeat(100);
    assert_eq!(dedup_key(&text).chars().count(), 100);
  }

  #[test]
  fn different_sources_still_collide() {
    let mut a = record("news-article_1", "Metro line extension approved");
    a.source = Source::NewsArticle;
    let mut b = record("scraped-headline_2", "Metro line extension approved");
    b.source = Source::ScrapedHeadline;

    assert_eq!(dedup(vec![a, b]).len(), 1);
  }
}
