//! JSON read API for the Sawari transport-sentiment monitor.
//!
//! Exposes an axum [`Router`] backed by any
//! [`sawari_core::store::RecordStore`]. The data endpoints never fail: a
//! dark store degrades to empty arrays with a logged warning, and only
//! the health endpoints surface the outage.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", sawari_server::api_router(store.clone()))
//! ```

pub mod health;
pub mod records;
pub mod regions;

use std::{path::PathBuf, sync::Arc};

use axum::{Router, routing::get};
use sawari_core::store::RecordStore;
use serde::Deserialize;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `SAWARI_*` environment variables. Every field has a default, so a
/// bare environment still runs.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:    String,
  #[serde(default = "default_port")]
  pub port:    u16,
  #[serde(default = "default_db_path")]
  pub db_path: PathBuf,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:    default_host(),
      port:    default_port(),
      db_path: default_db_path(),
    }
  }
}

fn default_host() -> String { "127.0.0.1".to_owned() }
fn default_port() -> u16 { 5000 }
fn default_db_path() -> PathBuf { PathBuf::from("sawari.db") }

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router
/// regardless of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: RecordStore + 'static,
{
  Router::new()
    .route("/records", get(records::handler::<S>))
    .route("/regions", get(regions::handler::<S>))
    .route("/health", get(health::liveness::<S>))
    .route("/status", get(health::readiness::<S>))
    .with_state(store)
}

// ─── Integration tests ───────────────────────────────────────────────────────
