//! Device-local like tracking.
//!
//! The liked-id set mirrors the browser-localStorage convention: one file
//! holding a JSON array of video ids, scoped to this device, read once at
//! startup and rewritten after each successful like. Ids are added exactly
//! once and never removed.

use directories::ProjectDirs;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::catalog::Video;
use crate::feed::Feed;
use crate::store::StoreError;

pub struct LikedStore {
  path: Option<PathBuf>,
  ids: HashSet<i64>,
}

impl LikedStore {
  /// Open the store at its platform data-dir location.
  pub fn open() -> Self {
    let path = ProjectDirs::from("", "", "inspo").map(|dirs| dirs.data_dir().join("liked.json"));
    match path {
      Some(path) => Self::at(path),
      None => Self { path: None, ids: HashSet::new() },
    }
  }

  /// Open the store at an explicit path.
  pub fn at(path: PathBuf) -> Self {
    let ids = Self::read_ids(&path);
    Self { path: Some(path), ids }
  }

  fn read_ids(path: &Path) -> HashSet<i64> {
    let Ok(content) = std::fs::read_to_string(path) else {
      return HashSet::new();
    };
    match serde_json::from_str::<Vec<i64>>(&content) {
      Ok(ids) => ids.into_iter().collect(),
      Err(e) => {
        warn!(path = %path.display(), err = %e, "liked-id file unreadable, starting empty");
        HashSet::new()
      }
    }
  }

  pub fn contains(&self, id: i64) -> bool {
    self.ids.contains(&id)
  }

  /// Record a confirmed like and persist the set.
  pub fn insert(&mut self, id: i64) {
    if !self.ids.insert(id) {
      return;
    }
    let Some(ref path) = self.path else { return };
    let mut ids: Vec<i64> = self.ids.iter().copied().collect();
    ids.sort_unstable();
    if let Some(dir) = path.parent() {
      let _ = std::fs::create_dir_all(dir);
    }
    if let Ok(content) = serde_json::to_string(&ids)
      && let Err(e) = std::fs::write(path, content)
    {
      warn!(path = %path.display(), err = %e, "failed to persist liked-id set");
    }
  }
}

/// Decide whether a like may be dispatched for `video`. Returns the id and
/// the counter value to write, or `None` when this device already liked it.
pub fn like_request(liked: &LikedStore, video: &Video) -> Option<(i64, i64)> {
  if liked.contains(video.id) {
    return None;
  }
  Some((video.id, video.likes + 1))
}

/// Apply the outcome of a like update. Local state changes only after the
/// store confirmed the write; a failed update leaves both the in-memory
/// counter and the liked-id set untouched so a retry stays possible.
pub fn apply_like_result(
  feed: &mut Feed,
  liked: &mut LikedStore,
  id: i64,
  new_likes: i64,
  result: Result<(), StoreError>,
) -> Result<(), StoreError> {
  result?;
  feed.apply_likes(id, new_likes);
  liked.insert(id);
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn temp_store(name: &str) -> LikedStore {
    let path = std::env::temp_dir().join(format!("inspo-liked-test-{}-{}.json", name, std::process::id()));
    let _ = std::fs::remove_file(&path);
    LikedStore::at(path)
  }

  fn video(id: i64, likes: i64) -> Video {
    Video {
      id,
      title: String::new(),
      description: String::new(),
      categories: Vec::new(),
      file_name: format!("clip-{id}.mp4"),
      video_url: String::new(),
      external_link: None,
      likes,
      created_at: None,
    }
  }

  #[test]
  fn like_request_increments_once_then_dedups() {
    let mut liked = temp_store("dedup");
    let mut feed = Feed::new();
    feed.set_catalog(vec![video(5, 3)]);

    let (id, new_likes) = like_request(&liked, feed.current().unwrap()).unwrap();
    assert_eq!((id, new_likes), (5, 4));
    apply_like_result(&mut feed, &mut liked, id, new_likes, Ok(())).unwrap();

    assert_eq!(feed.current().unwrap().likes, 4);
    assert!(liked.contains(5));
    // Second attempt is a no-op before anything is dispatched.
    assert!(like_request(&liked, feed.current().unwrap()).is_none());
  }

  #[test]
  fn failed_update_leaves_local_state_untouched() {
    let mut liked = temp_store("failed");
    let mut feed = Feed::new();
    feed.set_catalog(vec![video(5, 3)]);

    let (id, new_likes) = like_request(&liked, feed.current().unwrap()).unwrap();
    let result = apply_like_result(
      &mut feed,
      &mut liked,
      id,
      new_likes,
      Err(StoreError::UpdateFailure("rejected".to_string())),
    );
    assert!(result.is_err());
    assert_eq!(feed.current().unwrap().likes, 3);
    assert!(!liked.contains(5));
    // Not blocked by a false-positive dedup entry; a retry is permitted.
    assert!(like_request(&liked, feed.current().unwrap()).is_some());
  }

  #[test]
  fn liked_set_survives_reopen() {
    let path = std::env::temp_dir().join(format!("inspo-liked-test-reopen-{}.json", std::process::id()));
    let _ = std::fs::remove_file(&path);
    {
      let mut liked = LikedStore::at(path.clone());
      liked.insert(1);
      liked.insert(2);
    }
    let reopened = LikedStore::at(path.clone());
    assert!(reopened.contains(1));
    assert!(reopened.contains(2));
    assert!(!reopened.contains(3));
    let _ = std::fs::remove_file(&path);
  }
}
