//! Error type for `sawari-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A stored enum tag column held a value outside its closed set.
  #[error("unknown {column} tag: {value:?}")]
  UnknownTag { column: &'static str, value: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
