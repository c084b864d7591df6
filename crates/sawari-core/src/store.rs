//! The `RecordStore` trait — the persistence gateway contract.
//!
//! Implemented by storage backends (e.g. `sawari-store-sqlite`). The
//! collectors and the query API depend on this abstraction, not on any
//! concrete backend. A backend that cannot serve is reported through
//! `Self::Error`; the calling layer decides whether to degrade to empty
//! data (reads) or skip the write.

use std::future::Future;

use crate::{aggregate::RawRegionCounts, record::CanonicalRecord};

/// Abstraction over a canonical-record store.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait RecordStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Insert a record, idempotent on `id`.
  ///
  /// Returns `true` if the record was inserted and `false` if a record
  /// with the same id was already present. A duplicate id is success,
  /// never an error.
  fn insert_record(
    &self,
    record: &CanonicalRecord,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// The `limit` most recent records, newest first by `created_at`.
  fn recent_records(
    &self,
    limit: usize,
  ) -> impl Future<Output = Result<Vec<CanonicalRecord>, Self::Error>> + Send + '_;

  /// Message and sentiment counts grouped by the raw `region` string,
  /// most messages first.
  fn region_raw_counts(
    &self,
  ) -> impl Future<Output = Result<Vec<RawRegionCounts>, Self::Error>> + Send + '_;
}
