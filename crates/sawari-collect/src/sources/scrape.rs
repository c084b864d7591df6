//! Headline scraper for configured topic pages.
//!
//! Pulls the first few `h1`–`h3` heading texts out of each page. The
//! extraction is coarse but deterministic: strip the heading markup with
//! regexes, fold whitespace, and let the normaliser's keyword filter
//! decide what survives.

use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use sawari_core::normalize::RawItem;

use crate::{
  error::{Result, SourceError},
  settings::ScrapeSite,
};

const HEADLINES_PER_PAGE: usize = 10;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
/// Politeness delay between sites.
const SITE_DELAY: Duration = Duration::from_secs(2);
const BROWSER_USER_AGENT: &str =
  "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

static HEADING_RE: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"(?is)<h[1-3][^>]*>(.*?)</h[1-3]>").expect("valid regex")
});
static TAG_RE: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"(?is)<[^>]+>").expect("valid regex"));
static WS_RE: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

// ─── Fetching ────────────────────────────────────────────────────────────────

/// Scrape every configured site. Per-site failures are logged and
/// skipped; the remaining sites still run.
pub async fn collect(client: &Client, sites: &[ScrapeSite]) -> Vec<RawItem> {
  let mut items = Vec::new();

  for site in sites {
    match fetch_site(client, site).await {
      Ok(mut fetched) => items.append(&mut fetched),
      Err(e) => {
        tracing::warn!("skipping {}: {e}", site.url);
      }
    }
    tokio::time::sleep(SITE_DELAY).await;
  }

  items
}

async fn fetch_site(client: &Client, site: &ScrapeSite) -> Result<Vec<RawItem>> {
  let resp = client
    .get(&site.url)
    .header(reqwest::header::USER_AGENT, BROWSER_USER_AGENT)
    .timeout(REQUEST_TIMEOUT)
    .send()
    .await?;

  if !resp.status().is_success() {
    return Err(SourceError::Status {
      url:    site.url.clone(),
      status: resp.status().as_u16(),
    });
  }

  let html = resp.text().await?;
  Ok(
    extract_headlines(&html)
      .into_iter()
      .map(|text| RawItem::ScrapedHeadline {
        text,
        location: site.location.clone(),
      })
      .collect(),
  )
}

/// Pull up to [`HEADLINES_PER_PAGE`] heading texts out of `html`.
fn extract_headlines(html: &str) -> Vec<String> {
  HEADING_RE
    .captures_iter(html)
    .filter_map(|caps| {
      let inner = TAG_RE.replace_all(&caps[1], "");
      let text = WS_RE.replace_all(inner.trim(), " ").into_owned();
      (!text.is_empty()).then_some(text)
    })
    .take(HEADLINES_PER_PAGE)
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn extracts_heading_text_and_strips_markup() {
    let html = r#"
      <html><body>
        <h1>Mumbai <em>local train</em> services hit</h1>
        <div><h2 class="headline">
          Metro   fares
          revised
        </h2></div>
        <h3></h3>
        <p>Not a heading</p>
      </body></html>
    "#;

    let headlines = extract_headlines(html);
    assert_eq!(
      headlines,
      ["Mumbai local train services hit", "Metro fares revised"]
    );
  }

  #[test]
  fn caps_at_ten_headlines() {
    let html: String =
      (0..15).map(|i| format!("<h2>Headline {i}</h2>")).collect();
    assert_eq!(extract_headlines(&html).len(), HEADLINES_PER_PAGE);
  }

  #[test]
  fn empty_page_yields_nothing() {
    assert!(extract_headlines("<html><body></body></html>").is_empty());
  }
}
