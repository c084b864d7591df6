//! The batch artifact: a pretty-printed JSON array of the deduplicated
//! records from one collection run.
//!
//! The same document feeds the `replay` subcommand. Replayed rows may
//! omit `sentimentScore`/`confidence` (older artifacts stored only the
//! label); the loader fills them from the label via the fixed mapping.

use std::{fs, path::Path};

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sawari_core::record::{
  CanonicalRecord, SentimentLabel, Source, TransportType,
};
use serde::{Deserialize, Serialize};

/// Confidence assigned to rows that never stored one.
const DEFAULT_CONFIDENCE: f64 = 0.5;

// ─── Row shape ───────────────────────────────────────────────────────────────

/// One artifact row. Matches [`CanonicalRecord`] except that the derived
/// numeric fields are optional on the way in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactRecord {
  pub id:              String,
  pub text:            String,
  pub created_at:      DateTime<Utc>,
  #[serde(default)]
  pub source:          Source,
  #[serde(default = "default_region")]
  pub region:          String,
  #[serde(default)]
  pub transport_type:  TransportType,
  #[serde(default)]
  pub sentiment_label: SentimentLabel,
  #[serde(default)]
  pub sentiment_score: Option<f64>,
  #[serde(default)]
  pub confidence:      Option<f64>,
}

fn default_region() -> String { "India".to_owned() }

impl ArtifactRecord {
  /// Promote a row to a canonical record, filling missing numeric fields
  /// from the label.
  pub fn into_record(self) -> CanonicalRecord {
    let label = self.sentiment_label;
    CanonicalRecord {
      id:              self.id,
      text:            self.text,
      created_at:      self.created_at,
      source:          self.source,
      region:          self.region,
      transport_type:  self.transport_type,
      sentiment_label: label,
      sentiment_score: self.sentiment_score.unwrap_or_else(|| label.fixed_score()),
      confidence:      self.confidence.unwrap_or(DEFAULT_CONFIDENCE),
    }
  }
}

impl From<CanonicalRecord> for ArtifactRecord {
  fn from(record: CanonicalRecord) -> Self {
    Self {
      id:              record.id,
      text:            record.text,
      created_at:      record.created_at,
      source:          record.source,
      region:          record.region,
      transport_type:  record.transport_type,
      sentiment_label: record.sentiment_label,
      sentiment_score: Some(record.sentiment_score),
      confidence:      Some(record.confidence),
    }
  }
}

// ─── File I/O ────────────────────────────────────────────────────────────────

/// Write the record set as a pretty-printed JSON array.
pub fn write(path: &Path, records: &[CanonicalRecord]) -> anyhow::Result<()> {
  let rows: Vec<ArtifactRecord> =
    records.iter().cloned().map(ArtifactRecord::from).collect();
  let json = serde_json::to_string_pretty(&rows)
    .context("serialising batch artifact")?;
  fs::write(path, json)
    .with_context(|| format!("writing artifact to {path:?}"))?;
  Ok(())
}

/// Load an artifact back into canonical records.
pub fn read(path: &Path) -> anyhow::Result<Vec<CanonicalRecord>> {
  let json = fs::read_to_string(path)
    .with_context(|| format!("reading artifact from {path:?}"))?;
  let rows: Vec<ArtifactRecord> =
    serde_json::from_str(&json).context("parsing batch artifact")?;
  Ok(rows.into_iter().map(ArtifactRecord::into_record).collect())
}
