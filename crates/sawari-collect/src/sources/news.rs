//! News-article fetcher, backed by the NewsAPI `everything` endpoint.

use chrono::{DateTime, Utc};
use reqwest::Client;
use sawari_core::normalize::RawItem;
use serde::Deserialize;

use crate::error::{Result, SourceError};

const ENDPOINT: &str = "https://newsapi.org/v2/everything";
const QUERY: &str =
  "india transport OR mumbai metro OR delhi bus OR bangalore traffic";
const PAGE_SIZE: usize = 50;

// ─── Wire types ──────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct NewsResponse {
  #[serde(default)]
  articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Article {
  url:          String,
  #[serde(default)]
  title:        Option<String>,
  #[serde(default)]
  description:  Option<String>,
  #[serde(default)]
  published_at: Option<DateTime<Utc>>,
}

// ─── Fetching ────────────────────────────────────────────────────────────────

/// Fetch today's transport articles. English only, newest first.
pub async fn fetch(
  client: &Client,
  api_key: &str,
  now: DateTime<Utc>,
) -> Result<Vec<RawItem>> {
  let resp = client
    .get(ENDPOINT)
    .query(&[
      ("apiKey", api_key),
      ("q", QUERY),
      ("language", "en"),
      ("sortBy", "publishedAt"),
      ("pageSize", &PAGE_SIZE.to_string()),
      ("from", &now.format("%Y-%m-%d").to_string()),
    ])
    .send()
    .await?;

  if !resp.status().is_success() {
    return Err(SourceError::Status {
      url:    ENDPOINT.to_owned(),
      status: resp.status().as_u16(),
    });
  }

  let news: NewsResponse = resp.json().await?;
  Ok(
    news
      .articles
      .into_iter()
      .map(|article| RawItem::NewsArticle {
        url:          article.url,
        title:        article.title.unwrap_or_default(),
        description:  article.description,
        published_at: article.published_at,
      })
      .collect(),
  )
}
