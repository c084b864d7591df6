//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{TimeZone, Utc};
use sawari_core::{
  record::{CanonicalRecord, SentimentLabel, Source, TransportType},
  store::RecordStore,
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn record(
  id: &str,
  region: &str,
  label: SentimentLabel,
  transport: TransportType,
  at_secs: i64,
) -> CanonicalRecord {
  CanonicalRecord {
    id:              id.into(),
    text:            format!("record {id}"),
    created_at:      Utc.timestamp_opt(at_secs, 0).unwrap(),
    source:          Source::ScrapedHeadline,
    region:          region.into(),
    transport_type:  transport,
    sentiment_label: label,
    sentiment_score: label.fixed_score(),
    confidence:      0.5,
  }
}

// ─── Inserts ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_is_idempotent_on_id() {
  let s = store().await;
  let r = record(
    "scraped-headline_1",
    "Delhi",
    SentimentLabel::Neutral,
    TransportType::Metro,
    1000,
  );

  assert!(s.insert_record(&r).await.unwrap());
  assert!(!s.insert_record(&r).await.unwrap());

  // Re-insert with different text must not change the stored row.
  let mut altered = r.clone();
  altered.text = "changed".into();
  assert!(!s.insert_record(&altered).await.unwrap());

  let fetched = s.recent_records(10).await.unwrap();
  assert_eq!(fetched.len(), 1);
  assert_eq!(fetched[0].text, r.text);
}

#[tokio::test]
async fn record_round_trips_through_columns() {
  let s = store().await;
  let r = record(
    "news-article_abcd",
    "Mumbai, Maharashtra",
    SentimentLabel::Negative,
    TransportType::Train,
    1_700_000_000,
  );

  s.insert_record(&r).await.unwrap();
  let fetched = s.recent_records(1).await.unwrap();
  assert_eq!(fetched, vec![r]);
}

// ─── Recent records ──────────────────────────────────────────────────────────

#[tokio::test]
async fn recent_records_orders_newest_first_and_limits() {
  let s = store().await;
  for (i, at) in [(1, 1000), (2, 3000), (3, 2000)] {
    let r = record(
      &format!("scraped-headline_{i}"),
      "Delhi",
      SentimentLabel::Neutral,
      TransportType::Bus,
      at,
    );
    s.insert_record(&r).await.unwrap();
  }

  let recent = s.recent_records(2).await.unwrap();
  assert_eq!(recent.len(), 2);
  assert_eq!(recent[0].id, "scraped-headline_2");
  assert_eq!(recent[1].id, "scraped-headline_3");
}

#[tokio::test]
async fn recent_records_tolerates_huge_limits() {
  let s = store().await;
  let r = record(
    "scraped-headline_1",
    "Delhi",
    SentimentLabel::Neutral,
    TransportType::Bus,
    1000,
  );
  s.insert_record(&r).await.unwrap();

  let recent = s.recent_records(usize::MAX).await.unwrap();
  assert_eq!(recent.len(), 1);
}

#[tokio::test]
async fn empty_store_reads_are_empty() {
  let s = store().await;
  assert!(s.recent_records(100).await.unwrap().is_empty());
  assert!(s.region_raw_counts().await.unwrap().is_empty());
}

// ─── Raw region counts ───────────────────────────────────────────────────────

#[tokio::test]
async fn region_raw_counts_groups_by_raw_region() {
  let s = store().await;
  let rows = [
    ("a", "Mumbai, Maharashtra", SentimentLabel::Positive),
    ("b", "Mumbai, Maharashtra", SentimentLabel::Negative),
    ("c", "Mumbai, Maharashtra", SentimentLabel::Neutral),
    ("d", "Delhi", SentimentLabel::Positive),
  ];
  for (id, region, label) in rows {
    let r = record(
      &format!("discussion-post_{id}"),
      region,
      label,
      TransportType::Bus,
      1000,
    );
    s.insert_record(&r).await.unwrap();
  }

  let counts = s.region_raw_counts().await.unwrap();
  assert_eq!(counts.len(), 2);

  // Ordered by total descending.
  assert_eq!(counts[0].region, "Mumbai, Maharashtra");
  assert_eq!(counts[0].total_messages, 3);
  assert_eq!(counts[0].positive_count, 1);
  assert_eq!(counts[0].negative_count, 1);
  assert_eq!(counts[0].neutral_count, 1);

  assert_eq!(counts[1].region, "Delhi");
  assert_eq!(counts[1].total_messages, 1);
}

// ─── Summary refresh ─────────────────────────────────────────────────────────

#[tokio::test]
async fn refresh_merges_raw_regions_into_states() {
  let s = store().await;
  let rows = [
    ("a", "Mumbai, Maharashtra", SentimentLabel::Positive, TransportType::Train),
    ("b", "Pune, Maharashtra", SentimentLabel::Negative, TransportType::Auto),
    ("c", "Pune, Maharashtra", SentimentLabel::Positive, TransportType::Bus),
    ("d", "Delhi", SentimentLabel::Neutral, TransportType::Metro),
  ];
  for (id, region, label, transport) in rows {
    let r = record(
      &format!("discussion-comment_{id}"),
      region,
      label,
      transport,
      1000,
    );
    s.insert_record(&r).await.unwrap();
  }

  let summaries = s.refresh_region_summaries().await.unwrap();
  assert_eq!(summaries.len(), 2);

  let maha = summaries
    .iter()
    .find(|s| s.state == "Maharashtra")
    .unwrap();
  assert_eq!(maha.total_messages, 3);
  assert_eq!(maha.sentiment_breakdown.positive, 2);
  assert_eq!(maha.sentiment_breakdown.negative, 1);
  assert_eq!(maha.transport_breakdown.train, 1);
  assert_eq!(maha.transport_breakdown.auto, 1);
  assert_eq!(maha.transport_breakdown.bus, 1);
  assert!((maha.sentiment_score - 1.0 / 3.0).abs() < 1e-12);

  let delhi = summaries.iter().find(|s| s.state == "Delhi").unwrap();
  assert_eq!(delhi.total_messages, 1);
  assert_eq!(delhi.sentiment_score, 0.0);
}

#[tokio::test]
async fn refresh_on_empty_store_writes_nothing() {
  let s = store().await;
  let summaries = s.refresh_region_summaries().await.unwrap();
  assert!(summaries.is_empty());
}

#[tokio::test]
async fn refresh_is_a_full_rewrite() {
  let s = store().await;
  let r = record(
    "scraped-headline_x",
    "Kochi, Kerala",
    SentimentLabel::Positive,
    TransportType::Metro,
    1000,
  );
  s.insert_record(&r).await.unwrap();
  s.refresh_region_summaries().await.unwrap();

  // A second refresh after more data must replace, not accumulate.
  let r2 = record(
    "scraped-headline_y",
    "Kochi, Kerala",
    SentimentLabel::Negative,
    TransportType::Bus,
    2000,
  );
  s.insert_record(&r2).await.unwrap();
  let summaries = s.refresh_region_summaries().await.unwrap();

  let kerala = summaries.iter().find(|s| s.state == "Kerala").unwrap();
  assert_eq!(kerala.total_messages, 2);
  assert_eq!(kerala.transport_breakdown.metro, 1);
  assert_eq!(kerala.transport_breakdown.bus, 1);
}
