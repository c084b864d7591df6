//! SQL schema for the Sawari SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated
//! on `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Canonical records are immutable once inserted.
-- Duplicate ids are ignored, never updated.
CREATE TABLE IF NOT EXISTS records (
    id              TEXT PRIMARY KEY,  -- '{source-tag}_{suffix}'
    text            TEXT NOT NULL,
    created_at      TEXT NOT NULL,     -- ISO 8601 UTC
    source          TEXT NOT NULL DEFAULT 'unknown',
    region          TEXT NOT NULL DEFAULT 'India',
    transport_type  TEXT NOT NULL DEFAULT 'bus',
    sentiment       TEXT NOT NULL DEFAULT 'neutral',
    sentiment_score REAL NOT NULL DEFAULT 0.0,
    confidence      REAL NOT NULL DEFAULT 0.5
);

-- Materialised per-state aggregation cache, rewritten wholesale by each
-- refresh. Never edited row-by-row.
CREATE TABLE IF NOT EXISTS region_summaries (
    state           TEXT PRIMARY KEY,
    total_messages  INTEGER NOT NULL DEFAULT 0,
    positive_count  INTEGER NOT NULL DEFAULT 0,
    negative_count  INTEGER NOT NULL DEFAULT 0,
    neutral_count   INTEGER NOT NULL DEFAULT 0,
    bus_count       INTEGER NOT NULL DEFAULT 0,
    metro_count     INTEGER NOT NULL DEFAULT 0,
    train_count     INTEGER NOT NULL DEFAULT 0,
    auto_count      INTEGER NOT NULL DEFAULT 0,
    taxi_count      INTEGER NOT NULL DEFAULT 0,
    sentiment_score REAL NOT NULL DEFAULT 0.0,
    last_updated    TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS records_created_idx   ON records(created_at);
CREATE INDEX IF NOT EXISTS records_sentiment_idx ON records(sentiment);
CREATE INDEX IF NOT EXISTS records_region_idx    ON records(region);
CREATE INDEX IF NOT EXISTS records_transport_idx ON records(transport_type);

PRAGMA user_version = 1;
";
