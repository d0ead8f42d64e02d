//! Client for the external video store (a PostgREST-style row API) and the
//! public object-storage URL convention.
//!
//! One `StoreClient` is constructed in `main` and injected into the app;
//! there is no module-level handle. Every row is decoded into the typed
//! catalog shape at the load boundary; nothing downstream touches raw rows.

use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::constants::constants;

#[derive(Debug, Error)]
pub enum StoreError {
  /// Store unreachable, timed out, or returned a non-success status.
  #[error("store fetch failed: {0}")]
  FetchFailure(String),
  /// A stored row could not be decoded (malformed category encoding).
  #[error("malformed store row: {0}")]
  ParseFailure(String),
  /// A like-increment write was rejected.
  #[error("like update failed: {0}")]
  UpdateFailure(String),
}

/// A raw row as the store returns it. `categories` is a JSON-encoded string
/// array column; `catalog::decode_row` parses it.
#[derive(Debug, Clone, Deserialize)]
pub struct VideoRow {
  pub id: i64,
  pub file_name: String,
  pub title: String,
  pub description: String,
  pub categories: String,
  #[serde(default)]
  pub external_link: Option<String>,
  #[serde(default)]
  pub likes: Option<i64>,
  #[serde(default)]
  pub created_at: Option<String>,
}

#[derive(Clone)]
pub struct StoreClient {
  http: Client,
  base_url: String,
  anon_key: String,
}

impl StoreClient {
  pub fn new(base_url: &str, anon_key: &str) -> Result<Self, StoreError> {
    // A hung request would otherwise leave the pending indicator up forever.
    let http = Client::builder()
      .timeout(Duration::from_secs(constants().request_timeout_secs))
      .build()
      .map_err(|e| StoreError::FetchFailure(e.to_string()))?;
    Ok(Self {
      http,
      base_url: base_url.trim_end_matches('/').to_string(),
      anon_key: anon_key.to_string(),
    })
  }

  /// Public playback URL for a stored file name. This is the only place the
  /// join happens; `videoUrl` is derived, never persisted.
  pub fn video_url(&self, file_name: &str) -> String {
    format!("{}{}/{}", self.base_url, constants().storage_public_path, file_name)
  }

  /// Bulk read of the whole video table. No filter is pushed down; category
  /// filtering happens client-side.
  pub async fn fetch_videos(&self) -> Result<Vec<VideoRow>, StoreError> {
    let url = format!("{}/rest/v1/{}?select=*", self.base_url, constants().videos_table);
    debug!(url = %url, "fetching video rows");
    let response = self
      .http
      .get(&url)
      .header("apikey", &self.anon_key)
      .header("Authorization", format!("Bearer {}", self.anon_key))
      .send()
      .await
      .map_err(|e| StoreError::FetchFailure(e.to_string()))?;
    if !response.status().is_success() {
      return Err(StoreError::FetchFailure(format!("store returned {}", response.status())));
    }
    response.json::<Vec<VideoRow>>().await.map_err(|e| StoreError::ParseFailure(e.to_string()))
  }

  /// Single-row update of the `likes` counter.
  pub async fn update_likes(&self, id: i64, likes: i64) -> Result<(), StoreError> {
    let url = format!("{}/rest/v1/{}?id=eq.{}", self.base_url, constants().videos_table, id);
    debug!(id, likes, "updating like counter");
    let response = self
      .http
      .patch(&url)
      .header("apikey", &self.anon_key)
      .header("Authorization", format!("Bearer {}", self.anon_key))
      .json(&serde_json::json!({ "likes": likes }))
      .send()
      .await
      .map_err(|e| StoreError::UpdateFailure(e.to_string()))?;
    if !response.status().is_success() {
      return Err(StoreError::UpdateFailure(format!("store returned {}", response.status())));
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn video_url_joins_base_and_file_name() {
    let store = StoreClient::new("https://example.supabase.co", "anon").unwrap();
    assert_eq!(
      store.video_url("clip.mp4"),
      "https://example.supabase.co/storage/v1/object/public/videos/clip.mp4"
    );
  }

  #[test]
  fn video_url_tolerates_trailing_slash_in_base() {
    let store = StoreClient::new("https://example.supabase.co/", "anon").unwrap();
    assert_eq!(
      store.video_url("clip.mp4"),
      "https://example.supabase.co/storage/v1/object/public/videos/clip.mp4"
    );
  }
}
