//! [`SqliteStore`] — the SQLite implementation of [`RecordStore`].

use std::{future::Future, path::Path};

use chrono::Utc;
use sawari_core::{
  aggregate::{AGGREGATION_WINDOW, RawRegionCounts, RegionSummary, aggregate},
  record::CanonicalRecord,
  store::RecordStore,
};

use crate::{
  Error, Result,
  encode::{
    RawRecordRow, encode_dt, encode_sentiment, encode_source,
    encode_transport,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Sawari record store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Recompute the full per-state aggregation and rewrite the
  /// `region_summaries` cache in one transaction.
  ///
  /// The breakdown pass runs over the recent-record window; the count
  /// pass over the live per-region rollup. Returns the summaries that
  /// were written.
  pub async fn refresh_region_summaries(&self) -> Result<Vec<RegionSummary>> {
    let records = self.recent_records(AGGREGATION_WINDOW).await?;
    let counts = self.region_raw_counts().await?;
    let summaries = aggregate(&records, &counts);

    let rows = summaries.clone();
    let updated_at = encode_dt(Utc::now());
    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM region_summaries", [])?;
        for summary in &rows {
          tx.execute(
            "INSERT INTO region_summaries (
               state, total_messages,
               positive_count, negative_count, neutral_count,
               bus_count, metro_count, train_count, auto_count, taxi_count,
               sentiment_score, last_updated
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            rusqlite::params![
              summary.state,
              summary.total_messages,
              summary.sentiment_breakdown.positive,
              summary.sentiment_breakdown.negative,
              summary.sentiment_breakdown.neutral,
              summary.transport_breakdown.bus,
              summary.transport_breakdown.metro,
              summary.transport_breakdown.train,
              summary.transport_breakdown.auto,
              summary.transport_breakdown.taxi,
              summary.sentiment_score,
              updated_at,
            ],
          )?;
        }
        tx.commit()?;
        Ok(())
      })
      .await?;

    Ok(summaries)
  }
}

// ─── RecordStore impl ────────────────────────────────────────────────────────

impl RecordStore for SqliteStore {
  type Error = Error;

  fn insert_record(
    &self,
    record: &CanonicalRecord,
  ) -> impl Future<Output = Result<bool>> + Send + '_ {
    let id = record.id.clone();
    let text = record.text.clone();
    let created_at = encode_dt(record.created_at);
    let source = encode_source(record.source).to_owned();
    let region = record.region.clone();
    let transport = encode_transport(record.transport_type).to_owned();
    let sentiment = encode_sentiment(record.sentiment_label).to_owned();
    let score = record.sentiment_score;
    let confidence = record.confidence;

    async move {
      let changed = self
        .conn
        .call(move |conn| {
          let changed = conn.execute(
            "INSERT OR IGNORE INTO records (
               id, text, created_at, source, region,
               transport_type, sentiment, sentiment_score, confidence
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            rusqlite::params![
              id, text, created_at, source, region, transport, sentiment,
              score, confidence,
            ],
          )?;
          Ok(changed)
        })
        .await?;

      Ok(changed > 0)
    }
  }

  async fn recent_records(&self, limit: usize) -> Result<Vec<CanonicalRecord>> {
    // Limits beyond i64 range saturate rather than wrap.
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);

    let raws: Vec<RawRecordRow> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT id, text, created_at, source, region,
                  transport_type, sentiment, sentiment_score, confidence
           FROM records
           ORDER BY created_at DESC
           LIMIT ?1",
        )?;

        let rows = stmt
          .query_map(rusqlite::params![limit], |row| {
            Ok(RawRecordRow {
              id:              row.get(0)?,
              text:            row.get(1)?,
              created_at:      row.get(2)?,
              source:          row.get(3)?,
              region:          row.get(4)?,
              transport_type:  row.get(5)?,
              sentiment:       row.get(6)?,
              sentiment_score: row.get(7)?,
              confidence:      row.get(8)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawRecordRow::into_record).collect()
  }

  async fn region_raw_counts(&self) -> Result<Vec<RawRegionCounts>> {
    let rows: Vec<(String, i64, i64, i64, i64)> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT
             region,
             COUNT(*) AS total_messages,
             SUM(CASE WHEN sentiment = 'positive' THEN 1 ELSE 0 END),
             SUM(CASE WHEN sentiment = 'negative' THEN 1 ELSE 0 END),
             SUM(CASE WHEN sentiment = 'neutral'  THEN 1 ELSE 0 END)
           FROM records
           GROUP BY region
           ORDER BY total_messages DESC",
        )?;

        let rows = stmt
          .query_map([], |row| {
            Ok((
              row.get(0)?,
              row.get(1)?,
              row.get(2)?,
              row.get(3)?,
              row.get(4)?,
            ))
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
      })
      .await?;

    Ok(
      rows
        .into_iter()
        .map(|(region, total, pos, neg, neu)| RawRegionCounts {
          region,
          total_messages: total as u64,
          positive_count: pos as u64,
          negative_count: neg as u64,
          neutral_count:  neu as u64,
        })
        .collect(),
    )
  }
}
