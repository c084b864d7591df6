//! Keyword classifiers for transport mode and region.
//!
//! Both classifiers are deterministic, case-insensitive substring matches
//! against fixed lexicons. There is no scoring and no ambiguity: the first
//! matching entry wins, and a miss always resolves to the documented
//! fallback (`bus` / `"India"`), never an error.

use crate::record::TransportType;

// ─── Transport mode ──────────────────────────────────────────────────────────

/// Ordered keyword sets. The match must short-circuit in exactly this
/// order: metro → train → auto → taxi, with bus as the fallback.
/// Devanagari variants sit in the same sets as their Latin forms.
const METRO_KEYWORDS: &[&str] = &["metro", "मेट्रो", "subway", "dmrc"];
const TRAIN_KEYWORDS: &[&str] =
  &["train", "ट्रेन", "railway", "irctc", "local train"];
const AUTO_KEYWORDS: &[&str] =
  &["auto", "ऑटो", "rickshaw", "three wheeler"];
const TAXI_KEYWORDS: &[&str] = &["taxi", "टैक्सी", "cab", "ola", "uber"];

/// Classify `text` into a transport mode.
///
/// Empty or keyword-less text classifies as [`TransportType::Bus`].
pub fn classify_transport(text: &str) -> TransportType {
  let lower = text.to_lowercase();
  let contains_any =
    |keywords: &[&str]| keywords.iter().any(|k| lower.contains(k));

  if contains_any(METRO_KEYWORDS) {
    TransportType::Metro
  } else if contains_any(TRAIN_KEYWORDS) {
    TransportType::Train
  } else if contains_any(AUTO_KEYWORDS) {
    TransportType::Auto
  } else if contains_any(TAXI_KEYWORDS) {
    TransportType::Taxi
  } else {
    TransportType::Bus
  }
}

// ─── Region ──────────────────────────────────────────────────────────────────

/// City name → `"City, State"` lexicon, checked in order; first match wins.
const CITY_REGIONS: &[(&str, &str)] = &[
  ("mumbai", "Mumbai, Maharashtra"),
  ("delhi", "Delhi"),
  ("bangalore", "Bangalore, Karnataka"),
  ("bengaluru", "Bangalore, Karnataka"),
  ("chennai", "Chennai, Tamil Nadu"),
  ("kolkata", "Kolkata, West Bengal"),
  ("hyderabad", "Hyderabad, Telangana"),
  ("pune", "Pune, Maharashtra"),
  ("ahmedabad", "Ahmedabad, Gujarat"),
  ("jaipur", "Jaipur, Rajasthan"),
  ("lucknow", "Lucknow, Uttar Pradesh"),
  ("kochi", "Kochi, Kerala"),
  ("gurgaon", "Gurgaon, Haryana"),
  ("noida", "Noida, Delhi"),
  ("chandigarh", "Chandigarh, Punjab"),
];

/// Detect a region from free text. Runs only at ingestion, for sources
/// that carry no explicit location of their own.
pub fn classify_region(text: &str) -> &'static str {
  let lower = text.to_lowercase();
  for (city, region) in CITY_REGIONS {
    if lower.contains(city) {
      return region;
    }
  }
  "India"
}

// ─── Headline filter ─────────────────────────────────────────────────────────

/// Keywords that mark a scraped headline as transport-related. Headlines
/// matching none of these are dropped before normalisation.
const TRANSPORT_KEYWORDS: &[&str] = &[
  "bus",
  "metro",
  "train",
  "railway",
  "transport",
  "traffic",
  "auto rickshaw",
  "taxi",
  "uber",
  "ola",
  "bmtc",
  "best",
  "dtc",
  "dmrc",
  "irctc",
  "local train",
  "city bus",
];

/// Whether `text` mentions any transport keyword (case-insensitive).
pub fn mentions_transport(text: &str) -> bool {
  let lower = text.to_lowercase();
  TRANSPORT_KEYWORDS.iter().any(|k| lower.contains(k))
}
