//! Handler for `GET /regions`.

use std::sync::Arc;

use axum::{Json, extract::State};
use sawari_core::{
  aggregate::{AGGREGATION_WINDOW, RegionSummary, aggregate},
  store::RecordStore,
};

/// `GET /regions` — per-state summaries recomputed from the current
/// record set on every request.
///
/// The transport breakdown runs over the recent-record window; the
/// sentiment totals come from the store's raw per-region rollup. A dark
/// store degrades to an empty array; this endpoint never 500s.
pub async fn handler<S>(State(store): State<Arc<S>>) -> Json<Vec<RegionSummary>>
where
  S: RecordStore,
{
  let records = match store.recent_records(AGGREGATION_WINDOW).await {
    Ok(records) => records,
    Err(e) => {
      tracing::warn!("record store unavailable, serving empty regions: {e}");
      return Json(Vec::new());
    }
  };

  let counts = match store.region_raw_counts().await {
    Ok(counts) => counts,
    Err(e) => {
      tracing::warn!("region rollup unavailable, serving empty regions: {e}");
      return Json(Vec::new());
    }
  };

  Json(aggregate(&records, &counts))
}
