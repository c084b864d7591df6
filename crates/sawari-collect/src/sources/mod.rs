//! Source fetchers: discussion threads, news feed, scraped headlines.
//!
//! Each fetcher returns typed results; the per-source loops here log
//! failures and continue, so a single dark source never aborts a run.
//! All loops keep at least one second between consecutive requests to
//! the same host.

pub mod discussions;
pub mod news;
pub mod scrape;
