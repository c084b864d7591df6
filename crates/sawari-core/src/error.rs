//! Error types for `sawari-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A raw item carried no usable text. The batch runner logs these and
  /// moves on; they never abort a run.
  #[error("malformed {source_tag} item {item_id:?}: {reason}")]
  MalformedRecord {
    source_tag: &'static str,
    item_id:    Option<String>,
    reason:     String,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
