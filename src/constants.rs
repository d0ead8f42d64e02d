//! Application constants loaded from `constants.ron` at compile time.
//!
//! The RON file is embedded via `include_str!` so it's always available —
//! no runtime file I/O. Parsed once on first access via `LazyLock`.

use serde::Deserialize;
use std::sync::LazyLock;

/// All tuneable application constants.
#[derive(Debug, Deserialize)]
pub struct Constants {
  // External video store
  pub videos_table: String,
  pub storage_public_path: String,
  pub request_timeout_secs: u64,

  // Feed
  pub cycle_notice_secs: u64,
  pub error_dismiss_secs: u64,

  // Gestures
  pub expand_threshold: f32,
  pub swipe_threshold: f32,
  pub cell_width_px: f32,
  pub cell_height_px: f32,
}

static CONSTANTS: LazyLock<Constants> = LazyLock::new(|| {
  // Safety: the RON file is embedded at compile time; if it's malformed this is a build-time error.
  ron::from_str(include_str!("../constants.ron")).expect("constants.ron must be valid RON (embedded at compile time)")
});

/// Returns a reference to the parsed application constants.
pub fn constants() -> &'static Constants {
  &CONSTANTS
}
