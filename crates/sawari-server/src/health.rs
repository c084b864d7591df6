//! Liveness and readiness handlers.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};
use sawari_core::store::RecordStore;
use serde_json::{Value, json};

/// How many records the readiness probe counts up to.
const COUNT_PROBE_LIMIT: usize = 1000;

/// `GET /health` — liveness. Always 200; a dark store is reported as
/// `"disconnected"` in the body, never as an error status.
pub async fn liveness<S>(State(store): State<Arc<S>>) -> Json<Value>
where
  S: RecordStore,
{
  let database = match store.recent_records(1).await {
    Ok(_) => "connected",
    Err(e) => {
      tracing::warn!("health probe failed: {e}");
      "disconnected"
    }
  };

  Json(json!({
    "status": "healthy",
    "service": "transport-sentiment-api",
    "database": database,
  }))
}

/// `GET /status` — readiness. 200 only when the store answers and holds
/// records; 500 with a reason otherwise. Never panics.
pub async fn readiness<S>(
  State(store): State<Arc<S>>,
) -> (StatusCode, Json<Value>)
where
  S: RecordStore,
{
  let probe = match store.recent_records(1).await {
    Ok(probe) => probe,
    Err(e) => {
      tracing::warn!("status probe failed: {e}");
      return (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
          "status": "API is running!",
          "database": "error",
          "error": e.to_string(),
        })),
      );
    }
  };

  if probe.is_empty() {
    return (
      StatusCode::INTERNAL_SERVER_ERROR,
      Json(json!({
        "status": "API is running!",
        "database": "disconnected",
        "totalRecords": 0,
      })),
    );
  }

  let total = match store.recent_records(COUNT_PROBE_LIMIT).await {
    Ok(records) => records.len(),
    Err(e) => {
      tracing::warn!("status count failed: {e}");
      return (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
          "status": "API is running!",
          "database": "error",
          "error": e.to_string(),
        })),
      );
    }
  };

  (
    StatusCode::OK,
    Json(json!({
      "status": "API is running!",
      "database": "connected",
      "totalRecords": total,
    })),
  )
}
