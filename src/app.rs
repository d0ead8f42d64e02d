use anyhow::Result;
use ratatui::widgets::ListState;
use std::time::{Duration, Instant};
use tokio::sync::oneshot;
use tracing::{error, info};

use crate::catalog::{self, Video, all_categories};
use crate::config::Config;
use crate::constants::constants;
use crate::feed::Feed;
use crate::likes::{self, LikedStore};
use crate::player::Player;
use crate::store::{StoreClient, StoreError};
use crate::surface::{Readiness, Surface, SurfaceAction, SurfaceEvent};
use crate::theme::THEMES;

// --- Types ---

pub type LoadResult = Result<Vec<Video>, StoreError>;
/// Outcome of a like update: the video id it was issued for, the counter
/// value written, and the store's verdict.
pub type LikeResult = (i64, i64, Result<(), StoreError>);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
  Feed,
  Categories,
}

/// In-flight async task receivers.
#[derive(Default)]
pub(crate) struct AsyncTasks {
  pub(crate) load_rx: Option<oneshot::Receiver<LoadResult>>,
  pub(crate) like_rx: Option<oneshot::Receiver<LikeResult>>,
}

/// Mouse drag tracking: press origin and latest position, in terminal cells.
#[derive(Debug, Clone, Copy)]
pub struct DragState {
  pub origin: (u16, u16),
  pub last: (u16, u16),
}

// --- App State ---

pub struct App {
  pub mode: AppMode,
  pub theme_index: usize,
  pub store: StoreClient,
  pub feed: Feed,
  /// Unique categories across the catalog, first-seen order.
  pub categories: Vec<String>,
  pub category_state: ListState,
  pub liked: LikedStore,
  pub player: Player,
  /// One surface per displayed video; `None` while nothing is shown.
  pub surface: Option<Surface>,
  /// Persistent mute preference, threaded into each fresh surface.
  pub muted: bool,
  pub loading_catalog: bool,
  pub last_error: Option<String>,
  pub status_message: Option<String>,
  /// Informational message, lower priority than status/error.
  pub info_message: Option<String>,
  pub should_quit: bool,
  pub drag: Option<DragState>,
  tasks: AsyncTasks,
  /// When the last error was set, for auto-dismiss.
  error_time: Option<Instant>,
}

impl App {
  pub fn new(store: StoreClient) -> Self {
    let config = Config::load();
    let theme_index =
      if let Some(ref name) = config.theme_name { THEMES.iter().position(|t| t.name == name).unwrap_or(0) } else { 0 };
    let muted = config.muted.unwrap_or(false);

    Self {
      mode: AppMode::Feed,
      theme_index,
      store,
      feed: Feed::new(),
      categories: Vec::new(),
      category_state: ListState::default(),
      liked: LikedStore::open(),
      player: Player::new(),
      surface: None,
      muted,
      loading_catalog: false,
      last_error: None,
      status_message: None,
      info_message: None,
      should_quit: false,
      drag: None,
      tasks: AsyncTasks::default(),
      error_time: None,
    }
  }

  pub fn theme(&self) -> &'static crate::theme::Theme {
    &THEMES[self.theme_index]
  }

  pub fn next_theme(&mut self) {
    self.theme_index = (self.theme_index + 1) % THEMES.len();
    self.save_config();
  }

  pub fn like_pending(&self) -> bool {
    self.tasks.like_rx.is_some()
  }

  /// Set an error message with auto-dismiss tracking.
  pub fn set_error(&mut self, msg: String) {
    self.last_error = Some(msg);
    self.error_time = Some(Instant::now());
  }

  /// Clear the current error message and its expiry timer.
  pub fn clear_error(&mut self) {
    self.last_error = None;
    self.error_time = None;
  }

  /// Clear stale error messages after the dismiss window.
  pub fn expire_error(&mut self) {
    if let Some(t) = self.error_time
      && t.elapsed() >= Duration::from_secs(constants().error_dismiss_secs)
    {
      self.last_error = None;
      self.error_time = None;
    }
  }

  fn save_config(&self) {
    let config = Config { theme_name: Some(self.theme().name.to_string()), muted: Some(self.muted) };
    config.save();
  }

  // --- Async task plumbing ---

  /// Kick off the one-time catalog load.
  pub fn trigger_load(&mut self) {
    self.loading_catalog = true;
    self.status_message = Some("Loading videos…".to_string());

    let store = self.store.clone();
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
      let _ = tx.send(catalog::load(&store).await);
    });
    self.tasks.load_rx = Some(rx);
  }

  /// Dispatch a like for the displayed video, unless this device already
  /// liked it or another like is still in flight.
  pub fn trigger_like(&mut self) {
    if self.tasks.like_rx.is_some() {
      return;
    }
    let Some(video) = self.feed.current() else { return };
    let Some((id, new_likes)) = likes::like_request(&self.liked, video) else {
      self.info_message = Some("Already liked.".to_string());
      return;
    };
    self.clear_error();
    self.status_message = Some("Liking…".to_string());

    let store = self.store.clone();
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
      let result = store.update_likes(id, new_likes).await;
      let _ = tx.send((id, new_likes, result));
    });
    self.tasks.like_rx = Some(rx);
  }

  pub async fn check_pending(&mut self) -> Result<()> {
    if let Some(mut rx) = self.tasks.load_rx.take() {
      match rx.try_recv() {
        Ok(result) => {
          self.loading_catalog = false;
          self.status_message = None;
          match result {
            Ok(videos) => {
              self.categories = all_categories(&videos);
              if self.categories.is_empty() {
                self.category_state.select(None);
              } else {
                self.category_state.select(Some(0));
              }
              self.feed.set_catalog(videos);
              if self.feed.is_empty() {
                self.info_message = Some("No videos available.".to_string());
              } else {
                self.show_current().await?;
              }
            }
            Err(e) => {
              // The feed stays empty; the UI renders the empty affordance.
              error!(err = %e, "catalog load failed");
              self.set_error(format!("Could not load videos: {e}"));
            }
          }
        }
        Err(oneshot::error::TryRecvError::Empty) => {
          self.tasks.load_rx = Some(rx);
        }
        Err(oneshot::error::TryRecvError::Closed) => {
          self.loading_catalog = false;
          self.status_message = None;
          self.set_error("Load task failed.".to_string());
        }
      }
    }

    if let Some(mut rx) = self.tasks.like_rx.take() {
      match rx.try_recv() {
        Ok((id, new_likes, result)) => {
          self.status_message = None;
          match likes::apply_like_result(&mut self.feed, &mut self.liked, id, new_likes, result) {
            Ok(()) => info!(id, likes = new_likes, "like confirmed"),
            Err(e) => {
              error!(id, err = %e, "like rejected");
              self.set_error("Like was not applied. Try again.".to_string());
            }
          }
        }
        Err(oneshot::error::TryRecvError::Empty) => {
          self.tasks.like_rx = Some(rx);
        }
        Err(oneshot::error::TryRecvError::Closed) => {
          self.status_message = None;
          self.set_error("Like task failed.".to_string());
        }
      }
    }

    // First status line from mpv means it decoded enough to play.
    if self.player.check_status()
      && let Some(ref mut surface) = self.surface
      && surface.readiness == Readiness::Loading
    {
      let _ = surface.handle(SurfaceEvent::MediaReady);
    }

    Ok(())
  }

  // --- Feed operations ---

  /// Start playback of the video under the cursor with a fresh surface.
  pub async fn show_current(&mut self) -> Result<()> {
    let Some(video) = self.feed.current() else {
      self.surface = None;
      self.player.stop().await?;
      return Ok(());
    };
    let url = video.video_url.clone();
    let title = video.title.clone();

    if let Err(e) = self.player.play(&url, self.muted).await {
      self.set_error(format!("Playback error: {}", e));
      let _ = self.player.stop().await;
      self.surface = None;
      return Ok(());
    }
    info!(title = %title, "now showing");
    self.surface = Some(Surface::new(self.muted));
    Ok(())
  }

  pub async fn advance_feed(&mut self) -> Result<()> {
    if self.feed.is_empty() {
      return Ok(());
    }
    self.feed.advance();
    self.show_current().await
  }

  /// Jump to a random video ("inspire me").
  pub async fn jump_random(&mut self) -> Result<()> {
    if self.feed.is_empty() {
      return Ok(());
    }
    self.feed.jump_random();
    self.show_current().await
  }

  /// Toggle the category at `index` in the filter pane.
  pub async fn toggle_category(&mut self, index: usize) -> Result<()> {
    let Some(name) = self.categories.get(index).cloned() else { return Ok(()) };
    self.feed.select_category(&name);
    self.sync_after_filter().await
  }

  /// Clear the filter and show the full catalog again.
  pub async fn reset_filter(&mut self) -> Result<()> {
    self.feed.reset();
    self.sync_after_filter().await
  }

  async fn sync_after_filter(&mut self) -> Result<()> {
    if self.feed.is_empty() {
      if self.player.is_playing() {
        self.player.stop().await?;
      }
      self.surface = None;
      self.info_message = Some(match self.feed.active_category() {
        Some(category) => format!("No videos in \"{category}\"."),
        None => "No videos available.".to_string(),
      });
      Ok(())
    } else {
      self.info_message = None;
      self.show_current().await
    }
  }

  // --- Surface events ---

  /// Run one event through the surface state machine and carry out the
  /// resulting action.
  pub async fn apply_surface_event(&mut self, event: SurfaceEvent) -> Result<()> {
    let Some(ref mut surface) = self.surface else { return Ok(()) };
    match surface.handle(event) {
      Some(SurfaceAction::SetPause(paused)) => {
        if let Err(e) = self.player.set_pause(paused).await {
          self.set_error(format!("Pause error: {}", e));
        }
      }
      Some(SurfaceAction::SetMute(muted)) => {
        self.muted = muted;
        self.save_config();
        if let Err(e) = self.player.set_mute(muted).await {
          self.set_error(format!("Mute error: {}", e));
        }
      }
      Some(SurfaceAction::SetFullscreen(fullscreen)) => {
        if let Err(e) = self.player.set_fullscreen(fullscreen).await {
          self.set_error(format!("Fullscreen error: {}", e));
        }
      }
      Some(SurfaceAction::Advance) => {
        self.advance_feed().await?;
      }
      None => {}
    }
    Ok(())
  }
}
