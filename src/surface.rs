//! Per-video playback surface state.
//!
//! A small state machine driven by enumerated events, independent of the
//! terminal event dispatch that feeds it. One surface exists per displayed
//! video; switching videos discards it and builds a fresh one, carrying only
//! the persistent mute preference across.

use crate::constants::constants;

/// Media readiness. Transport controls stay inert until the backend reports
/// playback has started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Readiness {
  #[default]
  Loading,
  Ready,
}

/// Events driving the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceEvent {
  /// The media backend decoded enough to play.
  MediaReady,
  TogglePlay,
  ToggleMute,
  ToggleFullscreen,
  /// Toggle the info panel without a drag (keyboard affordance).
  ToggleExpand,
  /// Pointer drag in progress, offsets in pixel units from the press origin.
  Drag { dx: f32, dy: f32 },
  /// Pointer released at the given offsets.
  Release { dx: f32, dy: f32 },
}

/// Side effects the caller must carry out after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceAction {
  SetPause(bool),
  SetMute(bool),
  SetFullscreen(bool),
  /// A swipe past the exit threshold: move the feed cursor forward.
  Advance,
}

#[derive(Debug)]
pub struct Surface {
  pub readiness: Readiness,
  pub playing: bool,
  pub muted: bool,
  pub fullscreen: bool,
  pub expanded: bool,
  /// Horizontal drag offset in pixel units, for render feedback while a
  /// drag is in progress. Snaps back to 0 on release.
  pub drag_x: f32,
}

impl Surface {
  pub fn new(muted: bool) -> Self {
    Self {
      readiness: Readiness::Loading,
      // Playback autostarts; the flag tracks the backend's pause state.
      playing: true,
      muted,
      fullscreen: false,
      expanded: false,
      drag_x: 0.0,
    }
  }

  /// Apply one event. Each toggle flips exactly one flag; the returned
  /// action tells the caller what to forward to the media backend or feed.
  pub fn handle(&mut self, event: SurfaceEvent) -> Option<SurfaceAction> {
    match event {
      SurfaceEvent::MediaReady => {
        self.readiness = Readiness::Ready;
        None
      }
      SurfaceEvent::TogglePlay => {
        if self.readiness == Readiness::Loading {
          return None;
        }
        self.playing = !self.playing;
        Some(SurfaceAction::SetPause(!self.playing))
      }
      SurfaceEvent::ToggleMute => {
        if self.readiness == Readiness::Loading {
          return None;
        }
        self.muted = !self.muted;
        Some(SurfaceAction::SetMute(self.muted))
      }
      SurfaceEvent::ToggleFullscreen => {
        if self.readiness == Readiness::Loading {
          return None;
        }
        self.fullscreen = !self.fullscreen;
        Some(SurfaceAction::SetFullscreen(self.fullscreen))
      }
      SurfaceEvent::ToggleExpand => {
        self.expanded = !self.expanded;
        None
      }
      SurfaceEvent::Drag { dx, dy } => {
        self.drag_x = dx;
        if dy < -constants().expand_threshold && !self.expanded {
          self.expanded = true;
        } else if dy > constants().expand_threshold && self.expanded {
          self.expanded = false;
        }
        None
      }
      SurfaceEvent::Release { dx, dy: _ } => {
        self.drag_x = 0.0;
        if dx < constants().swipe_threshold {
          return Some(SurfaceAction::Advance);
        }
        // Short of the threshold the surface snaps back, no state change.
        None
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn ready_surface() -> Surface {
    let mut surface = Surface::new(false);
    assert_eq!(surface.handle(SurfaceEvent::MediaReady), None);
    surface
  }

  #[test]
  fn transport_is_inert_while_loading() {
    let mut surface = Surface::new(false);
    assert_eq!(surface.handle(SurfaceEvent::TogglePlay), None);
    assert_eq!(surface.handle(SurfaceEvent::ToggleMute), None);
    assert_eq!(surface.handle(SurfaceEvent::ToggleFullscreen), None);
    assert!(surface.playing && !surface.muted && !surface.fullscreen);
  }

  #[test]
  fn each_toggle_flips_exactly_one_flag() {
    let mut surface = ready_surface();

    assert_eq!(surface.handle(SurfaceEvent::TogglePlay), Some(SurfaceAction::SetPause(true)));
    assert!(!surface.playing && !surface.muted && !surface.fullscreen && !surface.expanded);

    assert_eq!(surface.handle(SurfaceEvent::ToggleMute), Some(SurfaceAction::SetMute(true)));
    assert!(!surface.playing && surface.muted && !surface.fullscreen && !surface.expanded);

    assert_eq!(surface.handle(SurfaceEvent::ToggleFullscreen), Some(SurfaceAction::SetFullscreen(true)));
    assert!(!surface.playing && surface.muted && surface.fullscreen && !surface.expanded);
  }

  #[test]
  fn vertical_drag_past_threshold_toggles_expansion() {
    let mut surface = ready_surface();
    assert_eq!(surface.handle(SurfaceEvent::Drag { dx: 0.0, dy: -30.0 }), None);
    assert!(!surface.expanded);
    assert_eq!(surface.handle(SurfaceEvent::Drag { dx: 0.0, dy: -51.0 }), None);
    assert!(surface.expanded);
    assert_eq!(surface.handle(SurfaceEvent::Drag { dx: 0.0, dy: 51.0 }), None);
    assert!(!surface.expanded);
  }

  #[test]
  fn release_past_swipe_threshold_requests_advance() {
    let mut surface = ready_surface();
    assert_eq!(surface.handle(SurfaceEvent::Drag { dx: -120.0, dy: 0.0 }), None);
    assert_eq!(
      surface.handle(SurfaceEvent::Release { dx: -120.0, dy: 0.0 }),
      Some(SurfaceAction::Advance)
    );
    assert_eq!(surface.drag_x, 0.0);
  }

  #[test]
  fn release_short_of_threshold_snaps_back() {
    let mut surface = ready_surface();
    assert_eq!(surface.handle(SurfaceEvent::Drag { dx: -80.0, dy: 0.0 }), None);
    assert_eq!(surface.handle(SurfaceEvent::Release { dx: -80.0, dy: 0.0 }), None);
    assert_eq!(surface.drag_x, 0.0);
    assert!(surface.playing && !surface.expanded);
  }

  #[test]
  fn rightward_release_never_advances() {
    let mut surface = ready_surface();
    assert_eq!(surface.handle(SurfaceEvent::Release { dx: 120.0, dy: 0.0 }), None);
  }

  #[test]
  fn fresh_surface_carries_mute_preference() {
    assert!(Surface::new(true).muted);
    assert!(!Surface::new(false).muted);
  }
}
