//! Per-state rollup of canonical records.
//!
//! Two passes over different inputs merge into the same buckets, keyed by
//! derived state:
//!
//! 1. a per-record pass over the recent-record window, building the
//!    transport breakdown;
//! 2. a per-region pass over the store's raw `GROUP BY region` counts,
//!    accumulating message and sentiment totals.
//!
//! Raw regions sharing a derived state merge into one output row. States
//! are compared case-sensitively; regions differing only in casing land
//! in separate buckets. That mirrors the behaviour the downstream
//! consumers were built against and is kept verbatim.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::record::{
  CanonicalRecord, SentimentLabel, TransportType, derived_state,
};

/// How many recent records the per-record breakdown pass runs over.
pub const AGGREGATION_WINDOW: usize = 10_000;

// ─── Breakdown types ─────────────────────────────────────────────────────────

/// Record counts per transport tag.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
pub struct TransportBreakdown {
  pub bus:   u64,
  pub metro: u64,
  pub train: u64,
  pub auto:  u64,
  pub taxi:  u64,
}

impl TransportBreakdown {
  pub fn count(&self, transport: TransportType) -> u64 {
    match transport {
      TransportType::Bus => self.bus,
      TransportType::Metro => self.metro,
      TransportType::Train => self.train,
      TransportType::Auto => self.auto,
      TransportType::Taxi => self.taxi,
    }
  }

  fn count_mut(&mut self, transport: TransportType) -> &mut u64 {
    match transport {
      TransportType::Bus => &mut self.bus,
      TransportType::Metro => &mut self.metro,
      TransportType::Train => &mut self.train,
      TransportType::Auto => &mut self.auto,
      TransportType::Taxi => &mut self.taxi,
    }
  }

  /// Total records seen across all five tags.
  pub fn total(&self) -> u64 {
    TransportType::iter().map(|t| self.count(t)).sum()
  }
}

/// Record counts per sentiment label.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
pub struct SentimentBreakdown {
  pub positive: u64,
  pub negative: u64,
  pub neutral:  u64,
}

impl SentimentBreakdown {
  pub fn count(&self, label: SentimentLabel) -> u64 {
    match label {
      SentimentLabel::Positive => self.positive,
      SentimentLabel::Negative => self.negative,
      SentimentLabel::Neutral => self.neutral,
    }
  }
}

// ─── Inputs ──────────────────────────────────────────────────────────────────

/// One row of the store's raw per-region rollup, grouped by the region
/// string exactly as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRegionCounts {
  pub region:         String,
  pub total_messages: u64,
  pub positive_count: u64,
  pub negative_count: u64,
  pub neutral_count:  u64,
}

// ─── Output ──────────────────────────────────────────────────────────────────

/// The aggregate over all records whose region derives to `state`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionSummary {
  pub state:               String,
  /// `(positive - negative) / total`; rows with zero messages are never
  /// emitted, so the division is always defined.
  pub sentiment_score:     f64,
  pub total_messages:      u64,
  pub transport_breakdown: TransportBreakdown,
  pub sentiment_breakdown: SentimentBreakdown,
}

// ─── Aggregation ─────────────────────────────────────────────────────────────

#[derive(Default)]
struct Bucket {
  total:     u64,
  positive:  u64,
  negative:  u64,
  neutral:   u64,
  breakdown: TransportBreakdown,
}

/// Roll `records` and `region_counts` up into per-state summaries.
///
/// Output order is bucket insertion order: states first seen in the
/// record pass, then states contributed only by count rows. Buckets whose
/// merged total is zero (a state seen in the breakdown window but absent
/// from the count rollup) are excluded.
pub fn aggregate(
  records: &[CanonicalRecord],
  region_counts: &[RawRegionCounts],
) -> Vec<RegionSummary> {
  let mut order: Vec<String> = Vec::new();
  let mut buckets: HashMap<String, Bucket> = HashMap::new();

  for record in records {
    let state = derived_state(&record.region);
    let bucket = bucket_entry(&mut buckets, &mut order, state);
    *bucket.breakdown.count_mut(record.transport_type) += 1;
  }

  for row in region_counts {
    let state = derived_state(&row.region);
    let bucket = bucket_entry(&mut buckets, &mut order, state);
    bucket.total += row.total_messages;
    bucket.positive += row.positive_count;
    bucket.negative += row.negative_count;
    bucket.neutral += row.neutral_count;
  }

  order
    .into_iter()
    .filter_map(|state| {
      let bucket = buckets.remove(&state)?;
      if bucket.total == 0 {
        return None;
      }
      let score = (bucket.positive as f64 - bucket.negative as f64)
        / bucket.total as f64;
      Some(RegionSummary {
        state,
        sentiment_score: score,
        total_messages: bucket.total,
        transport_breakdown: bucket.breakdown,
        sentiment_breakdown: SentimentBreakdown {
          positive: bucket.positive,
          negative: bucket.negative,
          neutral:  bucket.neutral,
        },
      })
    })
    .collect()
}

/// Fetch the bucket for `state`, recording first-seen order on insert.
fn bucket_entry<'a>(
  buckets: &'a mut HashMap<String, Bucket>,
  order: &mut Vec<String>,
  state: &str,
) -> &'a mut Bucket {
  use std::collections::hash_map::Entry;

  match buckets.entry(state.to_owned()) {
    Entry::Occupied(entry) => entry.into_mut(),
    Entry::Vacant(entry) => {
      order.push(state.to_owned());
      entry.insert(Bucket::default())
    }
  }
}

#[cfg(test)]
mod tests {
  use chrono::Utc;

  use super::*;
  use crate::record::Source;

  fn record(region: &str, transport: TransportType) -> CanonicalRecord {
    CanonicalRecord {
      id:              format!("unknown_{region}_{transport}"),
      text:            "test".into(),
      created_at:      Utc::now(),
      source:          Source::Unknown,
      region:          region.into(),
      transport_type:  transport,
      sentiment_label: SentimentLabel::Neutral,
      sentiment_score: 0.0,
      confidence:      0.5,
    }
  }

  fn counts(region: &str, total: u64, pos: u64, neg: u64, neu: u64) -> RawRegionCounts {
    RawRegionCounts {
      region:         region.into(),
      total_messages: total,
      positive_count: pos,
      negative_count: neg,
      neutral_count:  neu,
    }
  }

  #[test]
  fn raw_regions_sharing_a_state_merge() {
    let records = vec![
      record("Mumbai, Maharashtra", TransportType::Train),
      record("Mumbai, Maharashtra", TransportType::Bus),
      record("Pune, Maharashtra", TransportType::Auto),
    ];
    let rows = vec![
      counts("Mumbai, Maharashtra", 3, 1, 1, 1),
      counts("Pune, Maharashtra", 3, 1, 1, 1),
    ];

    let summaries = aggregate(&records, &rows);
    assert_eq!(summaries.len(), 1);

    let s = &summaries[0];
    assert_eq!(s.state, "Maharashtra");
    assert_eq!(s.total_messages, 6);
    assert_eq!(s.sentiment_score, 0.0);
    assert_eq!(s.sentiment_breakdown.positive, 2);
    assert_eq!(s.sentiment_breakdown.negative, 2);
    assert_eq!(s.transport_breakdown.train, 1);
    assert_eq!(s.transport_breakdown.bus, 1);
    assert_eq!(s.transport_breakdown.auto, 1);
    assert_eq!(s.transport_breakdown.total(), 3);
  }

  #[test]
  fn zero_total_buckets_are_excluded() {
    // A state visible in the breakdown window but with no count rows must
    // not produce an output row.
    let records = vec![record("Jaipur, Rajasthan", TransportType::Bus)];
    let summaries = aggregate(&records, &[]);
    assert!(summaries.is_empty());
  }

  #[test]
  fn count_only_states_are_included() {
    let rows = vec![counts("Delhi", 4, 3, 1, 0)];
    let summaries = aggregate(&[], &rows);
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].state, "Delhi");
    assert_eq!(summaries[0].sentiment_score, 0.5);
    assert_eq!(summaries[0].transport_breakdown.total(), 0);
  }

  #[test]
  fn comma_less_region_is_its_own_state() {
    let records = vec![record("India", TransportType::Metro)];
    let rows = vec![counts("India", 1, 0, 0, 1)];

    let summaries = aggregate(&records, &rows);
    assert_eq!(summaries[0].state, "India");
    assert_eq!(summaries[0].transport_breakdown.metro, 1);
  }

  #[test]
  fn states_differing_in_case_stay_separate() {
    let rows = vec![
      counts("Mumbai, Maharashtra", 2, 1, 0, 1),
      counts("mumbai, maharashtra", 1, 0, 1, 0),
    ];

    let summaries = aggregate(&[], &rows);
    assert_eq!(summaries.len(), 2);
  }

  #[test]
  fn output_follows_insertion_order() {
    let records = vec![
      record("Kolkata, West Bengal", TransportType::Metro),
      record("Delhi", TransportType::Bus),
    ];
    let rows = vec![
      counts("Delhi", 1, 1, 0, 0),
      counts("Kolkata, West Bengal", 1, 0, 1, 0),
      counts("Chennai, Tamil Nadu", 1, 0, 0, 1),
    ];

    let states: Vec<_> = aggregate(&records, &rows)
      .into_iter()
      .map(|s| s.state)
      .collect();
    assert_eq!(states, ["West Bengal", "Delhi", "Tamil Nadu"]);
  }

  #[test]
  fn summary_serialises_with_api_field_names() {
    let rows = vec![counts("Delhi", 2, 1, 1, 0)];
    let json = serde_json::to_value(&aggregate(&[], &rows)[0]).unwrap();

    assert_eq!(json["state"], "Delhi");
    assert_eq!(json["totalMessages"], 2);
    assert_eq!(json["sentimentScore"], 0.0);
    assert_eq!(json["transportBreakdown"]["bus"], 0);
    assert_eq!(json["sentimentBreakdown"]["positive"], 1);
  }
}
