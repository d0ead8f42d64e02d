//! The loaded video catalog: one validated entity shape, decoded once at the
//! store boundary.

use tracing::info;

use crate::store::{StoreClient, StoreError, VideoRow};

/// A catalog entry. `video_url` is derived from the stored file name at
/// decode time and never written back.
#[derive(Debug, Clone)]
pub struct Video {
  pub id: i64,
  pub title: String,
  pub description: String,
  /// Ordered as stored. Duplicates are allowed; filtering is a membership
  /// test, so they have no effect.
  pub categories: Vec<String>,
  pub file_name: String,
  pub video_url: String,
  pub external_link: Option<String>,
  pub likes: i64,
  pub created_at: Option<String>,
}

/// Decode one raw row into a `Video`. The `categories` column is a
/// JSON-encoded string array; a malformed encoding fails the whole load,
/// since a defaulted category list would corrupt filter behavior.
pub fn decode_row(store: &StoreClient, row: VideoRow) -> Result<Video, StoreError> {
  let categories: Vec<String> = serde_json::from_str(&row.categories)
    .map_err(|e| StoreError::ParseFailure(format!("video {}: categories: {}", row.id, e)))?;
  let video_url = store.video_url(&row.file_name);
  Ok(Video {
    id: row.id,
    title: row.title,
    description: row.description,
    categories,
    video_url,
    file_name: row.file_name,
    external_link: row.external_link,
    likes: row.likes.unwrap_or(0),
    created_at: row.created_at,
  })
}

/// Fetch and decode the full catalog. Invoked once when the feed starts.
pub async fn load(store: &StoreClient) -> Result<Vec<Video>, StoreError> {
  let rows = store.fetch_videos().await?;
  let videos = rows.into_iter().map(|row| decode_row(store, row)).collect::<Result<Vec<_>, _>>()?;
  info!(count = videos.len(), "catalog loaded");
  Ok(videos)
}

/// Unique categories across the catalog, in first-seen order so the filter
/// pane renders stably.
pub fn all_categories(videos: &[Video]) -> Vec<String> {
  let mut seen: Vec<String> = Vec::new();
  for video in videos {
    for category in &video.categories {
      if !seen.iter().any(|c| c == category) {
        seen.push(category.clone());
      }
    }
  }
  seen
}

#[cfg(test)]
mod tests {
  use super::*;

  fn store() -> StoreClient {
    StoreClient::new("https://example.supabase.co", "anon").unwrap()
  }

  fn row(id: i64, categories: &str) -> VideoRow {
    VideoRow {
      id,
      file_name: format!("clip-{id}.mp4"),
      title: format!("Clip {id}"),
      description: "A short clip".to_string(),
      categories: categories.to_string(),
      external_link: None,
      likes: None,
      created_at: None,
    }
  }

  #[test]
  fn decode_parses_categories_and_derives_url() {
    let video = decode_row(&store(), row(7, r#"["food","travel"]"#)).unwrap();
    assert_eq!(video.categories, vec!["food", "travel"]);
    assert_eq!(video.video_url, store().video_url("clip-7.mp4"));
  }

  #[test]
  fn decode_defaults_missing_likes_to_zero() {
    let video = decode_row(&store(), row(1, "[]")).unwrap();
    assert_eq!(video.likes, 0);
  }

  #[test]
  fn decode_rejects_malformed_categories() {
    let err = decode_row(&store(), row(3, "food,travel")).unwrap_err();
    assert!(matches!(err, StoreError::ParseFailure(_)));
  }

  #[test]
  fn decode_keeps_category_order_and_duplicates() {
    let video = decode_row(&store(), row(2, r#"["b","a","b"]"#)).unwrap();
    assert_eq!(video.categories, vec!["b", "a", "b"]);
  }

  #[test]
  fn all_categories_first_seen_order() {
    let videos = vec![
      decode_row(&store(), row(1, r#"["a","b"]"#)).unwrap(),
      decode_row(&store(), row(2, r#"["b","c"]"#)).unwrap(),
    ];
    assert_eq!(all_categories(&videos), vec!["a", "b", "c"]);
  }

  #[test]
  fn all_categories_empty_catalog() {
    assert!(all_categories(&[]).is_empty());
  }
}
