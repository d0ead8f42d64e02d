//! Feed state: the loaded catalog, the active category filter, and the
//! cyclic cursor into the filtered view.
//!
//! The catalog is owned here as a single sequence; the filtered view is a
//! list of indices into it (never a copy), so a like applied by id is
//! visible regardless of the active filter.

use rand::Rng;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::catalog::Video;
use crate::constants::constants;

pub struct Feed {
  videos: Vec<Video>,
  /// Indices into `videos` matching the active category. Full range when no
  /// filter is active.
  filtered_indices: Vec<usize>,
  /// Cursor into `filtered_indices`. Always in range while the filtered
  /// view is non-empty; reset to 0 on every filter change.
  cursor: usize,
  active_category: Option<String>,
  /// When the cycle-complete notice was shown. Wraps that land while the
  /// notice is still visible are coalesced.
  cycle_notice_at: Option<Instant>,
}

impl Feed {
  pub fn new() -> Self {
    Self {
      videos: Vec::new(),
      filtered_indices: Vec::new(),
      cursor: 0,
      active_category: None,
      cycle_notice_at: None,
    }
  }

  /// Replace the catalog (after a load). Clears the filter and resets the
  /// cursor.
  pub fn set_catalog(&mut self, videos: Vec<Video>) {
    self.videos = videos;
    self.active_category = None;
    self.filtered_indices = (0..self.videos.len()).collect();
    self.cursor = 0;
    self.cycle_notice_at = None;
  }

  pub fn is_empty(&self) -> bool {
    self.filtered_indices.is_empty()
  }

  pub fn filtered_len(&self) -> usize {
    self.filtered_indices.len()
  }

  pub fn active_category(&self) -> Option<&str> {
    self.active_category.as_deref()
  }

  /// Cursor position within the filtered view, for the "3/12" indicator.
  pub fn position(&self) -> usize {
    self.cursor
  }

  /// Select a category, toggling it off if it's already active. Matching is
  /// a case-sensitive exact membership test. The cursor resets to 0 either
  /// way. Zero matches leave an empty view, which downstream renders as "no
  /// content", not an error.
  pub fn select_category(&mut self, name: &str) {
    if self.active_category.as_deref() == Some(name) {
      self.reset();
      return;
    }
    self.active_category = Some(name.to_string());
    self.filtered_indices = self
      .videos
      .iter()
      .enumerate()
      .filter(|(_, video)| video.categories.iter().any(|c| c == name))
      .map(|(i, _)| i)
      .collect();
    self.cursor = 0;
    debug!(category = name, matches = self.filtered_indices.len(), "category selected");
  }

  /// Clear the filter and restore the full catalog, cursor at 0.
  pub fn reset(&mut self) {
    self.active_category = None;
    self.filtered_indices = (0..self.videos.len()).collect();
    self.cursor = 0;
  }

  /// Advance the cursor cyclically. Returns `true` when a fresh
  /// cycle-complete notice was emitted (wrap to 0 with no notice showing).
  pub fn advance(&mut self) -> bool {
    if self.filtered_indices.is_empty() {
      return false;
    }
    self.cursor = (self.cursor + 1) % self.filtered_indices.len();
    if self.cursor == 0 && !self.cycle_notice_visible() {
      self.cycle_notice_at = Some(Instant::now());
      debug!("feed cycle complete");
      return true;
    }
    false
  }

  /// Jump to a uniformly random position. No-op on an empty view.
  pub fn jump_random(&mut self) {
    if self.filtered_indices.is_empty() {
      return;
    }
    self.cursor = rand::thread_rng().gen_range(0..self.filtered_indices.len());
  }

  pub fn current(&self) -> Option<&Video> {
    self.filtered_indices.get(self.cursor).map(|&i| &self.videos[i])
  }

  /// Update the like counter for a specific video id. Applied by id, not by
  /// cursor: a like confirmed after the user moved on still lands on the
  /// video it was issued for.
  pub fn apply_likes(&mut self, id: i64, likes: i64) {
    if let Some(video) = self.videos.iter_mut().find(|v| v.id == id) {
      video.likes = likes;
    }
  }

  pub fn cycle_notice_visible(&self) -> bool {
    self
      .cycle_notice_at
      .is_some_and(|t| t.elapsed() < Duration::from_secs(constants().cycle_notice_secs))
  }

  /// Drop the notice once its display window has passed. Called every frame.
  pub fn expire_notice(&mut self) {
    if let Some(t) = self.cycle_notice_at
      && t.elapsed() >= Duration::from_secs(constants().cycle_notice_secs)
    {
      self.cycle_notice_at = None;
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn video(id: i64, categories: &[&str]) -> Video {
    Video {
      id,
      title: format!("Clip {id}"),
      description: String::new(),
      categories: categories.iter().map(|s| s.to_string()).collect(),
      file_name: format!("clip-{id}.mp4"),
      video_url: format!("https://example/videos/clip-{id}.mp4"),
      external_link: None,
      likes: 0,
      created_at: None,
    }
  }

  fn feed(videos: Vec<Video>) -> Feed {
    let mut feed = Feed::new();
    feed.set_catalog(videos);
    feed
  }

  #[test]
  fn select_category_filters_in_catalog_order() {
    let mut feed = feed(vec![video(1, &["a", "b"]), video(2, &["b"]), video(3, &["c"])]);
    feed.select_category("b");
    assert_eq!(feed.filtered_len(), 2);
    assert_eq!(feed.current().unwrap().id, 1);
    assert!(!feed.advance());
    assert_eq!(feed.current().unwrap().id, 2);
  }

  #[test]
  fn selecting_active_category_again_restores_full_catalog() {
    let mut feed = feed(vec![video(1, &["a"]), video(2, &["b"]), video(3, &["b"])]);
    feed.select_category("b");
    feed.advance();
    feed.select_category("b");
    assert_eq!(feed.active_category(), None);
    assert_eq!(feed.filtered_len(), 3);
    assert_eq!(feed.position(), 0);
    assert_eq!(feed.current().unwrap().id, 1);
  }

  #[test]
  fn category_match_is_case_sensitive_and_exact() {
    let mut feed = feed(vec![video(1, &["Food"]), video(2, &["food"]), video(3, &["food "])]);
    feed.select_category("food");
    assert_eq!(feed.filtered_len(), 1);
    assert_eq!(feed.current().unwrap().id, 2);
  }

  #[test]
  fn category_with_no_matches_yields_empty_view() {
    let mut feed = feed(vec![video(1, &["a"])]);
    feed.select_category("z");
    assert!(feed.is_empty());
    assert!(feed.current().is_none());
  }

  #[test]
  fn advance_wraps_and_signals_cycle_complete_once() {
    let mut feed = feed(vec![video(1, &[]), video(2, &[]), video(3, &[])]);
    let mut signals = 0;
    for _ in 0..3 {
      if feed.advance() {
        signals += 1;
      }
    }
    assert_eq!(feed.position(), 0);
    assert_eq!(signals, 1);
    assert!(feed.cycle_notice_visible());
  }

  #[test]
  fn wraps_while_notice_visible_are_coalesced() {
    let mut feed = feed(vec![video(1, &[]), video(2, &[])]);
    let mut signals = 0;
    for _ in 0..6 {
      if feed.advance() {
        signals += 1;
      }
    }
    // Three wraps within the notice window, only the first one signals.
    assert_eq!(signals, 1);
  }

  #[test]
  fn advance_on_empty_view_is_a_noop() {
    let mut feed = feed(vec![]);
    assert!(!feed.advance());
    assert!(feed.current().is_none());

    let mut feed = empty_filtered_feed();
    assert!(!feed.advance());
    assert_eq!(feed.position(), 0);
  }

  fn empty_filtered_feed() -> Feed {
    let mut feed = feed(vec![video(1, &["a"])]);
    feed.select_category("nope");
    feed
  }

  #[test]
  fn jump_random_stays_in_range_and_noops_on_empty() {
    let mut feed = feed(vec![video(1, &[]), video(2, &[]), video(3, &[])]);
    for _ in 0..50 {
      feed.jump_random();
      assert!(feed.position() < 3);
    }
    let mut empty = empty_filtered_feed();
    empty.jump_random();
    assert!(empty.current().is_none());
  }

  #[test]
  fn apply_likes_targets_id_not_cursor() {
    let mut feed = feed(vec![video(1, &["a"]), video(2, &["b"])]);
    feed.select_category("b");
    feed.apply_likes(1, 9);
    feed.reset();
    assert_eq!(feed.current().unwrap().likes, 9);
  }

  #[test]
  fn concrete_filter_and_cycle_scenario() {
    let mut feed = feed(vec![video(1, &["a", "b"]), video(2, &["b"]), video(3, &["c"])]);
    feed.select_category("b");
    assert_eq!(feed.filtered_len(), 2);
    assert_eq!(feed.position(), 0);
    assert_eq!(feed.current().unwrap().id, 1);
    assert!(!feed.advance());
    assert_eq!(feed.current().unwrap().id, 2);
    assert!(feed.advance());
    assert_eq!(feed.current().unwrap().id, 1);
  }
}
