use ratatui::{
  Frame,
  layout::{Alignment, Constraint, Layout, Rect},
  style::{Modifier, Style, Stylize},
  text::{Line, Span},
  widgets::{Block, List, ListItem, Padding, Paragraph, Wrap},
};

use crate::app::{App, AppMode};
use crate::surface::Readiness;
use crate::theme::Theme;

// --- Helpers ---

/// Truncate a string to `max_width` display columns (double-width CJK
/// aware), appending "…" if truncated.
fn truncate_str(s: &str, max_width: usize) -> String {
  use unicode_width::UnicodeWidthChar;
  let total: usize = s.chars().map(|c| c.width().unwrap_or(0)).sum();
  if total <= max_width {
    return s.to_string();
  }
  let mut width = 0;
  let mut truncated = String::new();
  for c in s.chars() {
    let w = c.width().unwrap_or(0);
    if width + w > max_width.saturating_sub(1) {
      break;
    }
    width += w;
    truncated.push(c);
  }
  format!("{}…", truncated)
}

/// Render a store timestamp as a short date, falling back to the raw value.
fn short_date(raw: &str) -> String {
  match chrono::DateTime::parse_from_rfc3339(raw) {
    Ok(date) => date.format("%b %e, %Y").to_string(),
    Err(_) => raw.to_string(),
  }
}

// --- UI Rendering ---

pub fn ui(frame: &mut Frame, app: &mut App) {
  let theme = app.theme();

  frame.render_widget(Block::default().style(Style::default().bg(theme.bg)), frame.area());

  let [header_area, main_area, status_area, footer_area] =
    Layout::vertical([Constraint::Length(1), Constraint::Min(3), Constraint::Length(1), Constraint::Length(1)])
      .areas(frame.area());

  render_header(frame, theme, header_area);

  let [categories_area, feed_area] =
    Layout::horizontal([Constraint::Length(26), Constraint::Min(20)]).areas(main_area);
  render_categories(frame, app, categories_area);
  render_feed(frame, app, feed_area);

  render_status(frame, app, status_area);
  render_footer(frame, app, footer_area);
}

fn render_header(frame: &mut Frame, theme: &Theme, area: Rect) {
  let left = Line::from(Span::styled(" ✦ inspo ", Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)));
  frame.render_widget(left, area);

  let version = format!("v{} ", env!("CARGO_PKG_VERSION"));
  let right = Line::from(Span::styled(&version, Style::default().fg(theme.muted)));
  let right_area =
    Rect { x: area.x + area.width.saturating_sub(version.len() as u16), width: version.len() as u16, ..area };
  frame.render_widget(right, right_area);
}

fn render_categories(frame: &mut Frame, app: &mut App, area: Rect) {
  let theme = app.theme();
  let focused = app.mode == AppMode::Categories;
  let border_color = if focused { theme.accent } else { theme.border };
  let active = app.feed.active_category().map(|c| c.to_string());

  let inner_w = area.width.saturating_sub(4) as usize;
  let items: Vec<ListItem> = app
    .categories
    .iter()
    .enumerate()
    .map(|(i, category)| {
      let is_active = active.as_deref() == Some(category.as_str());
      let marker = if is_active { "● " } else { "  " };
      let fg = if is_active { theme.accent } else { theme.fg };
      let bg = if i % 2 == 1 { theme.stripe_bg } else { theme.bg };
      let line = Line::from(vec![
        Span::styled(marker, Style::default().fg(theme.accent)),
        Span::styled(truncate_str(category, inner_w.saturating_sub(2)), Style::default().fg(fg)),
      ]);
      ListItem::new(line).bg(bg)
    })
    .collect();

  let title = match active {
    Some(ref category) => format!(" Categories — {} ", truncate_str(category, 12)),
    None => " Categories ".to_string(),
  };

  let list = List::new(items)
    .block(
      Block::bordered()
        .title(title)
        .title_style(Style::default().fg(border_color).add_modifier(Modifier::BOLD))
        .border_type(ratatui::widgets::BorderType::Rounded)
        .border_style(Style::default().fg(border_color)),
    )
    .highlight_symbol("▶ ")
    .highlight_style(Style::default().fg(theme.highlight_fg).bg(theme.highlight_bg).add_modifier(Modifier::BOLD));

  frame.render_stateful_widget(list, area, &mut app.category_state);
}

fn render_feed(frame: &mut Frame, app: &mut App, area: Rect) {
  if app.loading_catalog {
    render_placeholder(frame, app.theme(), area, "⏳ Loading videos…");
    return;
  }
  if app.feed.is_empty() {
    let text = match app.feed.active_category() {
      Some(category) => format!("No videos in \"{}\".", category),
      None => "No videos available.".to_string(),
    };
    render_placeholder(frame, app.theme(), area, &text);
    return;
  }

  render_video_panel(frame, app, area);

  if app.feed.cycle_notice_visible() {
    render_cycle_notice(frame, app.theme(), area);
  }
}

fn render_placeholder(frame: &mut Frame, theme: &Theme, area: Rect, text: &str) {
  let lines = vec![Line::from(""), Line::from(Span::styled(text.to_string(), Style::default().fg(theme.muted)))];
  let paragraph = Paragraph::new(lines).alignment(Alignment::Center).block(
    Block::bordered()
      .border_type(ratatui::widgets::BorderType::Rounded)
      .border_style(Style::default().fg(theme.border)),
  );
  frame.render_widget(paragraph, area);
}

fn render_video_panel(frame: &mut Frame, app: &mut App, area: Rect) {
  let theme = app.theme();
  let Some(video) = app.feed.current() else { return };

  let position = format!("{}/{}", app.feed.position() + 1, app.feed.filtered_len());
  let panel_title = Line::from(vec![
    Span::styled(" Now Playing ", Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)),
    Span::styled(format!("[{}] ", position), Style::default().fg(theme.muted)),
  ]);
  let panel_block = Block::bordered()
    .title(panel_title)
    .border_type(ratatui::widgets::BorderType::Rounded)
    .border_style(Style::default().fg(theme.border))
    .padding(Padding::horizontal(1));

  let Some(ref surface) = app.surface else {
    frame.render_widget(panel_block, area);
    return;
  };

  if surface.readiness == Readiness::Loading {
    let lines = vec![Line::from(""), Line::from(Span::styled("◌ Buffering…", Style::default().fg(theme.muted)))];
    let paragraph = Paragraph::new(lines).alignment(Alignment::Center).block(panel_block);
    frame.render_widget(paragraph, area);
    return;
  }

  let inner_w = area.width.saturating_sub(4) as usize;
  let liked = app.liked.contains(video.id);
  let heart = if liked { "♥" } else { "♡" };
  let like_style = if liked { Style::default().fg(theme.accent) } else { Style::default().fg(theme.muted) };

  let mut lines = vec![
    Line::from(""),
    Line::from(Span::styled(
      truncate_str(&video.title, inner_w),
      Style::default().fg(theme.fg).add_modifier(Modifier::BOLD),
    )),
  ];

  let mut meta = vec![Span::styled(format!("{} {}", heart, video.likes), like_style)];
  if app.like_pending() {
    meta.push(Span::styled("  (liking…)", Style::default().fg(theme.muted)));
  }
  if let Some(ref created) = video.created_at {
    meta.push(Span::styled(format!("   {}", short_date(created)), Style::default().fg(theme.muted)));
  }
  lines.push(Line::from(meta));
  lines.push(Line::from(""));

  if surface.expanded {
    if !video.categories.is_empty() {
      lines.push(Line::from(vec![
        Span::styled("Categories  ", Style::default().fg(theme.muted)),
        Span::styled(video.categories.join(", "), Style::default().fg(theme.fg)),
      ]));
      lines.push(Line::from(""));
    }
    for text_line in video.description.lines() {
      lines.push(Line::from(Span::styled(text_line.to_string(), Style::default().fg(theme.fg))));
    }
    if let Some(ref link) = video.external_link {
      lines.push(Line::from(""));
      lines.push(Line::from(Span::styled(
        truncate_str(link, inner_w),
        Style::default().fg(theme.accent).add_modifier(Modifier::UNDERLINED),
      )));
    }
  } else {
    lines.push(Line::from(Span::styled(
      truncate_str(&video.description, inner_w),
      Style::default().fg(theme.muted),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("⠿ drag up or press e for details", Style::default().fg(theme.muted))));
  }

  lines.push(Line::from(""));
  let mut flags = vec![Span::styled(
    if surface.playing { "▶ playing" } else { "⏸ paused" },
    Style::default().fg(theme.status),
  )];
  if surface.muted {
    flags.push(Span::styled("  muted", Style::default().fg(theme.muted)));
  }
  if surface.fullscreen {
    flags.push(Span::styled("  fullscreen", Style::default().fg(theme.muted)));
  }
  if surface.drag_x < 0.0 {
    flags.push(Span::styled("  ← swipe to skip", Style::default().fg(theme.accent)));
  }
  lines.push(Line::from(flags));

  let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true }).block(panel_block);
  frame.render_widget(paragraph, area);
}

fn render_cycle_notice(frame: &mut Frame, theme: &Theme, area: Rect) {
  let text = " ↺ You've seen every video — starting over ";
  let width = (text.chars().count() as u16).min(area.width);
  let notice_area = Rect {
    x: area.x + (area.width.saturating_sub(width)) / 2,
    y: area.y + area.height.saturating_sub(2),
    width,
    height: 1,
  };
  let line = Line::from(Span::styled(text, Style::default().fg(theme.bg).bg(theme.notice).add_modifier(Modifier::BOLD)));
  frame.render_widget(line, notice_area);
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
  let theme = app.theme();
  let (text, style) = if let Some(msg) = &app.status_message {
    (format!(" ⏳ {}", msg), Style::default().fg(theme.status))
  } else if let Some(err) = &app.last_error {
    (format!(" ⚠  {}", err), Style::default().fg(theme.error))
  } else if let Some(info) = &app.info_message {
    (format!(" ℹ {}", info), Style::default().fg(theme.muted))
  } else {
    match app.player.last_status() {
      Some(status) => (format!(" ♪ {}", status), Style::default().fg(theme.status)),
      None => (" Ready".to_string(), Style::default().fg(theme.muted)),
    }
  };
  frame.render_widget(Paragraph::new(text).style(style), area);
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
  let theme = app.theme();
  let has_video = app.surface.is_some();
  let keys: Vec<(&str, &str)> = match app.mode {
    AppMode::Feed => {
      let mut k: Vec<(&str, &str)> = Vec::new();
      if has_video {
        let pause_label = if app.surface.as_ref().is_some_and(|s| s.playing) { "Pause" } else { "Resume" };
        k.push(("Space", pause_label));
        k.push(("n", "Next"));
        k.push(("i", "Inspire me"));
        k.push(("l", "Like"));
        k.push(("m", "Mute"));
        k.push(("f", "Fullscreen"));
      }
      k.push(("c", "Categories"));
      k.push(("q", "Quit"));
      k
    }
    AppMode::Categories => {
      vec![("j/k", "Navigate"), ("Enter", "Select"), ("a", "All"), ("Esc", "Back")]
    }
  };

  let spans: Vec<Span> = keys
    .iter()
    .enumerate()
    .flat_map(|(i, (key, action))| {
      let mut s = vec![
        Span::styled(format!(" {} ", key), Style::default().fg(theme.key_fg).bg(theme.key_bg)),
        Span::styled(format!(" {} ", action), Style::default().fg(theme.muted)),
      ];
      if i < keys.len() - 1 {
        s.push(Span::raw("  "));
      }
      s
    })
    .collect();

  frame.render_widget(Line::from(spans), area);

  let theme_label = format!("{} ", theme.name);
  let right = Line::from(Span::styled(&theme_label, Style::default().fg(theme.muted)));
  let right_area =
    Rect { x: area.x + area.width.saturating_sub(theme_label.len() as u16), width: theme_label.len() as u16, ..area };
  frame.render_widget(right, right_area);
}
