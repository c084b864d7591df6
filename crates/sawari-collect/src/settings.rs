//! Collector configuration, deserialised from `config.toml` and
//! `SAWARI_*` environment variables. Every field has a working default,
//! so a bare environment still collects from the public sources (the
//! news feed is skipped unless a key is configured).

use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct CollectConfig {
  #[serde(default = "default_db_path")]
  pub db_path:       PathBuf,
  /// Where the deduplicated batch artifact is written after each run.
  #[serde(default = "default_artifact_path")]
  pub artifact_path: PathBuf,
  #[serde(default = "default_subreddits")]
  pub subreddits:    Vec<String>,
  /// NewsAPI key; the news source is skipped silently when absent.
  #[serde(default)]
  pub news_api_key:  Option<String>,
  /// Overall discussion-post budget, shared across subreddits.
  #[serde(default = "default_batch_limit")]
  pub batch_limit:   usize,
  #[serde(default = "default_scrape_sites")]
  pub scrape_sites:  Vec<ScrapeSite>,
}

/// A topic page to scrape headlines from, with its pre-assigned
/// location.
#[derive(Debug, Clone, Deserialize)]
pub struct ScrapeSite {
  pub url:      String,
  pub location: String,
}

impl Default for CollectConfig {
  fn default() -> Self {
    Self {
      db_path:       default_db_path(),
      artifact_path: default_artifact_path(),
      subreddits:    default_subreddits(),
      news_api_key:  None,
      batch_limit:   default_batch_limit(),
      scrape_sites:  default_scrape_sites(),
    }
  }
}

fn default_db_path() -> PathBuf { PathBuf::from("sawari.db") }

fn default_artifact_path() -> PathBuf { PathBuf::from("data.json") }

fn default_batch_limit() -> usize { 50 }

fn default_subreddits() -> Vec<String> {
  [
    "india",
    "mumbai",
    "delhi",
    "bangalore",
    "chennai",
    "kolkata",
    "hyderabad",
    "pune",
    "ahmedabad",
    "jaipur",
    "lucknow",
    "kochi",
    "IndianRailways",
    "DelhiMetro",
    "MumbaiTrains",
  ]
  .into_iter()
  .map(str::to_owned)
  .collect()
}

fn default_scrape_sites() -> Vec<ScrapeSite> {
  vec![
    ScrapeSite {
      url:      "https://www.hindustantimes.com/topic/mumbai-traffic"
        .to_owned(),
      location: "Mumbai, Maharashtra".to_owned(),
    },
    ScrapeSite {
      url:      "https://timesofindia.indiatimes.com/topic/delhi-metro"
        .to_owned(),
      location: "Delhi".to_owned(),
    },
  ]
}
