//! Handler for `GET /records`.

use std::sync::Arc;

use axum::{Json, extract::State};
use sawari_core::{
  record::{CanonicalRecord, split_region},
  store::RecordStore,
};
use serde::Serialize;

/// How many records one response carries at most.
const RECORD_LIMIT: usize = 100;

/// A canonical record as served to clients: the record fields plus the
/// raw region echoed as `location` and its city/state split.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordView {
  #[serde(flatten)]
  pub record:   CanonicalRecord,
  pub location: String,
  pub state:    String,
  pub city:     String,
}

impl From<CanonicalRecord> for RecordView {
  fn from(record: CanonicalRecord) -> Self {
    let (city, state) = split_region(&record.region);
    Self {
      location: record.region.clone(),
      state: state.to_owned(),
      city: city.to_owned(),
      record,
    }
  }
}

/// `GET /records` — the 100 most recent records, newest first.
///
/// A dark store degrades to an empty array; this endpoint never 500s.
pub async fn handler<S>(State(store): State<Arc<S>>) -> Json<Vec<RecordView>>
where
  S: RecordStore,
{
  let records = match store.recent_records(RECORD_LIMIT).await {
    Ok(records) => records,
    Err(e) => {
      tracing::warn!("record store unavailable, serving empty records: {e}");
      Vec::new()
    }
  };

  Json(records.into_iter().map(RecordView::from).collect())
}
