//! The batch runner: fetch from every source, normalise, dedup, write
//! the artifact, persist, and refresh the aggregation cache.

use std::{collections::BTreeMap, path::Path, time::Duration};

use anyhow::Context as _;
use chrono::Utc;
use sawari_core::{dedup::dedup, normalize, record::CanonicalRecord, store::RecordStore as _};
use sawari_store_sqlite::SqliteStore;
use tracing::Instrument as _;
use uuid::Uuid;

use crate::{artifact, settings::CollectConfig, sources};

const USER_AGENT: &str = "IndianTransportMonitor/1.0";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// ─── Collect ─────────────────────────────────────────────────────────────────

/// Run one ingestion batch end to end. Every source failure degrades to
/// a smaller batch; only artifact I/O and aggregation refresh abort the
/// run.
pub async fn run_collect(cfg: &CollectConfig) -> anyhow::Result<()> {
  let run_id = Uuid::new_v4();
  let span = tracing::info_span!("batch", %run_id);
  collect_inner(cfg).instrument(span).await
}

async fn collect_inner(cfg: &CollectConfig) -> anyhow::Result<()> {
  let client = reqwest::Client::builder()
    .user_agent(USER_AGENT)
    .timeout(REQUEST_TIMEOUT)
    .build()
    .context("building http client")?;

  let now = Utc::now();
  let mut raw = Vec::new();

  raw.extend(
    sources::discussions::collect(&client, &cfg.subreddits, cfg.batch_limit)
      .await,
  );

  if let Some(key) = &cfg.news_api_key {
    match sources::news::fetch(&client, key, now).await {
      Ok(mut articles) => raw.append(&mut articles),
      Err(e) => {
        tracing::warn!("news feed unavailable: {e}");
      }
    }
  }

  raw.extend(sources::scrape::collect(&client, &cfg.scrape_sites).await);
  tracing::info!("fetched {} raw items", raw.len());

  let mut records = Vec::new();
  for item in raw {
    match normalize::normalize(item, now) {
      Ok(Some(record)) => records.push(record),
      Ok(None) => {}
      Err(e) => {
        tracing::warn!("dropping malformed item: {e}");
      }
    }
  }
  let records = dedup(records);
  log_batch_summary(&records);

  artifact::write(&cfg.artifact_path, &records)?;
  tracing::info!(
    "wrote {} records to {:?}",
    records.len(),
    cfg.artifact_path
  );

  // A dark store is not fatal; the artifact alone still captures the
  // batch and can be replayed later.
  match SqliteStore::open(&cfg.db_path).await {
    Ok(store) => {
      persist(&store, &records).await?;
    }
    Err(e) => {
      tracing::error!("store unavailable, keeping artifact only: {e}");
    }
  }

  Ok(())
}

// ─── Replay ──────────────────────────────────────────────────────────────────

/// Load an artifact and push it through the same insert + refresh path
/// as a live batch.
pub async fn run_replay(cfg: &CollectConfig, file: &Path) -> anyhow::Result<()> {
  let run_id = Uuid::new_v4();
  let span = tracing::info_span!("replay", %run_id);
  replay_inner(cfg, file).instrument(span).await
}

async fn replay_inner(cfg: &CollectConfig, file: &Path) -> anyhow::Result<()> {
  let records = artifact::read(file)?;
  tracing::info!("replaying {} records from {file:?}", records.len());

  let store = SqliteStore::open(&cfg.db_path)
    .await
    .with_context(|| format!("opening store at {:?}", cfg.db_path))?;
  persist(&store, &records).await?;

  Ok(())
}

// ─── Persistence ─────────────────────────────────────────────────────────────

/// Insert a record set and refresh the region summaries. Re-inserted ids
/// count as duplicates, per-record failures are logged and skipped.
/// Returns `(inserted, duplicates)`.
async fn persist(
  store: &SqliteStore,
  records: &[CanonicalRecord],
) -> anyhow::Result<(usize, usize)> {
  let mut inserted = 0;
  let mut duplicates = 0;

  for record in records {
    match store.insert_record(record).await {
      Ok(true) => inserted += 1,
      Ok(false) => duplicates += 1,
      Err(e) => {
        tracing::warn!("failed to insert {}: {e}", record.id);
      }
    }
  }

  let summaries = store
    .refresh_region_summaries()
    .await
    .context("refreshing region summaries")?;
  tracing::info!(
    inserted,
    duplicates,
    states = summaries.len(),
    "batch persisted"
  );

  Ok((inserted, duplicates))
}

fn log_batch_summary(records: &[CanonicalRecord]) {
  let mut by_source: BTreeMap<&str, usize> = BTreeMap::new();
  let mut by_sentiment: BTreeMap<String, usize> = BTreeMap::new();
  for record in records {
    *by_source.entry(record.source.tag()).or_default() += 1;
    *by_sentiment
      .entry(record.sentiment_label.to_string())
      .or_default() += 1;
  }
  tracing::info!(
    total = records.len(),
    ?by_source,
    ?by_sentiment,
    "batch normalised"
  );
}
