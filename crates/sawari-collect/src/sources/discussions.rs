//! Discussion-thread fetcher, backed by the public Reddit JSON search
//! endpoint.
//!
//! For each configured subreddit: one search request for transport
//! threads from the past day, then one request per returned post for its
//! top comments (up to three; short ones are dropped later by the
//! normaliser).

use std::time::Duration;

use reqwest::Client;
use sawari_core::normalize::RawItem;
use serde::Deserialize;

use crate::error::{Result, SourceError};

const SEARCH_QUERY: &str = "transport OR bus OR metro OR train OR traffic";
const COMMENTS_PER_POST: usize = 3;
/// Politeness delay between consecutive requests to the same host.
const REQUEST_DELAY: Duration = Duration::from_secs(1);

// ─── Wire types ──────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct Listing {
  data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
  children: Vec<Child>,
}

#[derive(Debug, Deserialize)]
struct Child {
  data: ChildData,
}

/// Post and comment payloads share one shape; comments carry `body`,
/// posts carry `title`/`selftext`. "load more" stubs carry neither and
/// are skipped.
#[derive(Debug, Deserialize)]
struct ChildData {
  id:          String,
  #[serde(default)]
  title:       Option<String>,
  #[serde(default)]
  selftext:    Option<String>,
  #[serde(default)]
  body:        Option<String>,
  #[serde(default)]
  created_utc: Option<f64>,
  #[serde(default)]
  permalink:   Option<String>,
}

// ─── Fetching ────────────────────────────────────────────────────────────────

/// Collect posts and top comments from every configured subreddit.
///
/// Per-subreddit failures are logged and skipped; the remaining
/// subreddits still run. `batch_limit` is the overall post budget,
/// shared evenly across subreddits.
pub async fn collect(
  client: &Client,
  subreddits: &[String],
  batch_limit: usize,
) -> Vec<RawItem> {
  let per_sub = (batch_limit / subreddits.len().max(1)).max(1);
  let mut items = Vec::new();

  for subreddit in subreddits {
    match fetch_subreddit(client, subreddit, per_sub).await {
      Ok(mut fetched) => items.append(&mut fetched),
      Err(e) => {
        tracing::warn!("skipping r/{subreddit}: {e}");
      }
    }
    tokio::time::sleep(REQUEST_DELAY).await;
  }

  items
}

async fn fetch_subreddit(
  client: &Client,
  subreddit: &str,
  limit: usize,
) -> Result<Vec<RawItem>> {
  let url = format!("https://www.reddit.com/r/{subreddit}/search.json");
  let resp = client
    .get(&url)
    .query(&[
      ("q", SEARCH_QUERY),
      ("restrict_sr", "1"),
      ("t", "day"),
      ("limit", &limit.to_string()),
    ])
    .send()
    .await?;

  if !resp.status().is_success() {
    return Err(SourceError::Status {
      url,
      status: resp.status().as_u16(),
    });
  }

  let listing: Listing = resp.json().await?;
  let mut items = Vec::new();

  for child in listing.data.children {
    let post = child.data;
    items.push(RawItem::DiscussionPost {
      id:          post.id.clone(),
      title:       post.title.clone().unwrap_or_default(),
      body:        post.selftext.clone().unwrap_or_default(),
      created_utc: post.created_utc.map(|s| s as i64),
    });

    if let Some(permalink) = &post.permalink {
      tokio::time::sleep(REQUEST_DELAY).await;
      match fetch_comments(client, permalink).await {
        Ok(mut comments) => items.append(&mut comments),
        Err(e) => {
          tracing::warn!("skipping comments of {permalink}: {e}");
        }
      }
    }
  }

  Ok(items)
}

async fn fetch_comments(
  client: &Client,
  permalink: &str,
) -> Result<Vec<RawItem>> {
  let url = format!("https://www.reddit.com{permalink}.json");
  let resp = client
    .get(&url)
    .query(&[("limit", COMMENTS_PER_POST.to_string())])
    .send()
    .await?;

  if !resp.status().is_success() {
    return Err(SourceError::Status {
      url,
      status: resp.status().as_u16(),
    });
  }

  // The thread endpoint returns a two-element array: the post listing,
  // then the comment listing.
  let listings: Vec<Listing> = resp.json().await?;
  Ok(
    listings
      .into_iter()
      .nth(1)
      .map(|comments| comment_items(comments))
      .unwrap_or_default(),
  )
}

fn comment_items(listing: Listing) -> Vec<RawItem> {
  listing
    .data
    .children
    .into_iter()
    .filter_map(|child| {
      let comment = child.data;
      let body = comment.body?;
      Some(RawItem::DiscussionComment {
        id: comment.id,
        body,
        created_utc: comment.created_utc.map(|s| s as i64),
      })
    })
    .take(COMMENTS_PER_POST)
    .collect()
}
