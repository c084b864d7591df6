//! Error types for the collectors.

use thiserror::Error;

/// A source fetch that could not produce raw items. The batch runner
/// logs these per source and carries on; no source failure ever aborts
/// a run.
#[derive(Debug, Error)]
pub enum SourceError {
  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("{url} returned status {status}")]
  Status { url: String, status: u16 },
}

pub type Result<T, E = SourceError> = std::result::Result<T, E>;
