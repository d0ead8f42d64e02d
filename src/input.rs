use anyhow::{Context, Result};
use ratatui::crossterm::event::{self, KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::app::{App, AppMode, DragState};
use crate::constants::constants;
use crate::surface::SurfaceEvent;

// --- Helpers ---

/// Convert a drag from terminal cells into pixel units using the configured
/// cell-size estimates, so the surface thresholds stay toolkit-independent.
pub fn drag_offset_px(origin: (u16, u16), pos: (u16, u16)) -> (f32, f32) {
  let dx = (pos.0 as f32 - origin.0 as f32) * constants().cell_width_px;
  let dy = (pos.1 as f32 - origin.1 as f32) * constants().cell_height_px;
  (dx, dy)
}

// --- Event Handling ---

pub async fn handle_key_event(app: &mut App, key: event::KeyEvent) -> Result<()> {
  if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
    app.should_quit = true;
    return Ok(());
  }

  if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('t') {
    app.next_theme();
    return Ok(());
  }

  if key.code == KeyCode::Char('q') {
    app.should_quit = true;
    return Ok(());
  }

  match app.mode {
    AppMode::Feed => handle_feed_key(app, key).await.context("Failed to handle feed key event")?,
    AppMode::Categories => handle_categories_key(app, key).await.context("Failed to handle category key event")?,
  }
  Ok(())
}

async fn handle_feed_key(app: &mut App, key: event::KeyEvent) -> Result<()> {
  match key.code {
    KeyCode::Char(' ') => {
      app.apply_surface_event(SurfaceEvent::TogglePlay).await?;
    }
    KeyCode::Char('m') => {
      app.apply_surface_event(SurfaceEvent::ToggleMute).await?;
    }
    KeyCode::Char('f') => {
      app.apply_surface_event(SurfaceEvent::ToggleFullscreen).await?;
    }
    KeyCode::Char('e') => {
      app.apply_surface_event(SurfaceEvent::ToggleExpand).await?;
    }
    KeyCode::Char('n') | KeyCode::Char('j') | KeyCode::Right => {
      app.advance_feed().await?;
    }
    KeyCode::Char('i') => {
      app.jump_random().await?;
    }
    KeyCode::Char('l') => {
      app.trigger_like();
    }
    KeyCode::Char('a') => {
      app.reset_filter().await?;
    }
    KeyCode::Char('c') | KeyCode::Tab => {
      if !app.categories.is_empty() {
        app.mode = AppMode::Categories;
      }
    }
    KeyCode::Esc => {
      app.should_quit = true;
    }
    _ => {}
  }
  Ok(())
}

async fn handle_categories_key(app: &mut App, key: event::KeyEvent) -> Result<()> {
  match key.code {
    KeyCode::Enter => {
      if let Some(selected) = app.category_state.selected() {
        app.toggle_category(selected).await?;
      }
    }
    KeyCode::Char('a') => {
      app.reset_filter().await?;
    }
    KeyCode::Down | KeyCode::Char('j') => {
      let count = app.categories.len();
      if count > 0 {
        let i = app.category_state.selected().map_or(0, |i| (i + 1) % count);
        app.category_state.select(Some(i));
      }
    }
    KeyCode::Up | KeyCode::Char('k') => {
      let count = app.categories.len();
      if count > 0 {
        let i =
          app.category_state.selected().map_or(0, |i| if i == 0 { count.saturating_sub(1) } else { i.saturating_sub(1) });
        app.category_state.select(Some(i));
      }
    }
    KeyCode::Esc | KeyCode::Tab => {
      app.mode = AppMode::Feed;
    }
    _ => {}
  }
  Ok(())
}

/// Mouse drags on the feed area feed the surface gesture machine; everything
/// else is ignored.
pub async fn handle_mouse_event(app: &mut App, mouse: MouseEvent) -> Result<()> {
  match mouse.kind {
    MouseEventKind::Down(MouseButton::Left) => {
      app.drag = Some(DragState { origin: (mouse.column, mouse.row), last: (mouse.column, mouse.row) });
    }
    MouseEventKind::Drag(MouseButton::Left) => {
      if let Some(ref mut drag) = app.drag {
        drag.last = (mouse.column, mouse.row);
        let (dx, dy) = drag_offset_px(drag.origin, drag.last);
        app.apply_surface_event(SurfaceEvent::Drag { dx, dy }).await?;
      }
    }
    MouseEventKind::Up(MouseButton::Left) => {
      if let Some(drag) = app.drag.take() {
        let (dx, dy) = drag_offset_px(drag.origin, (mouse.column, mouse.row));
        app.apply_surface_event(SurfaceEvent::Release { dx, dy }).await?;
      }
    }
    _ => {}
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn drag_offset_scales_cells_to_pixels() {
    let (dx, dy) = drag_offset_px((40, 10), (28, 10));
    assert_eq!(dx, -12.0 * constants().cell_width_px);
    assert_eq!(dy, 0.0);
  }

  #[test]
  fn leftward_swipe_of_a_dozen_cells_passes_the_exit_threshold() {
    let (dx, _) = drag_offset_px((40, 10), (28, 10));
    assert!(dx < constants().swipe_threshold);
  }

  #[test]
  fn short_vertical_drag_stays_under_expand_threshold() {
    let (_, dy) = drag_offset_px((40, 10), (40, 12));
    assert!(dy.abs() < constants().expand_threshold.abs());
    let (_, dy) = drag_offset_px((40, 10), (40, 6));
    assert!(dy < -constants().expand_threshold);
  }
}
