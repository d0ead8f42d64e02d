use ratatui::style::Color;

/// A UI color palette, cycled with Ctrl+T and persisted in prefs.
pub struct Theme {
  pub name: &'static str,
  pub bg: Color,
  pub fg: Color,
  pub muted: Color,
  pub accent: Color,
  pub border: Color,
  pub status: Color,
  pub error: Color,
  pub notice: Color,
  pub highlight_fg: Color,
  pub highlight_bg: Color,
  pub stripe_bg: Color,
  pub key_fg: Color,
  pub key_bg: Color,
}

pub const THEMES: [Theme; 3] = [
  Theme {
    name: "charcoal",
    bg: Color::Rgb(18, 18, 22),
    fg: Color::Rgb(220, 220, 225),
    muted: Color::Rgb(130, 130, 140),
    accent: Color::Rgb(222, 253, 62),
    border: Color::Rgb(60, 60, 70),
    status: Color::Rgb(140, 190, 250),
    error: Color::Rgb(240, 110, 110),
    notice: Color::Rgb(250, 210, 120),
    highlight_fg: Color::Rgb(18, 18, 22),
    highlight_bg: Color::Rgb(222, 253, 62),
    stripe_bg: Color::Rgb(26, 26, 32),
    key_fg: Color::Rgb(18, 18, 22),
    key_bg: Color::Rgb(130, 130, 140),
  },
  Theme {
    name: "paper",
    bg: Color::Rgb(246, 243, 236),
    fg: Color::Rgb(40, 38, 35),
    muted: Color::Rgb(140, 134, 124),
    accent: Color::Rgb(175, 70, 40),
    border: Color::Rgb(200, 194, 182),
    status: Color::Rgb(70, 110, 160),
    error: Color::Rgb(180, 60, 50),
    notice: Color::Rgb(150, 110, 30),
    highlight_fg: Color::Rgb(246, 243, 236),
    highlight_bg: Color::Rgb(175, 70, 40),
    stripe_bg: Color::Rgb(238, 234, 225),
    key_fg: Color::Rgb(246, 243, 236),
    key_bg: Color::Rgb(140, 134, 124),
  },
  Theme {
    name: "midnight",
    bg: Color::Rgb(10, 14, 26),
    fg: Color::Rgb(200, 210, 230),
    muted: Color::Rgb(100, 110, 135),
    accent: Color::Rgb(120, 200, 255),
    border: Color::Rgb(45, 55, 85),
    status: Color::Rgb(120, 200, 255),
    error: Color::Rgb(250, 120, 130),
    notice: Color::Rgb(255, 205, 100),
    highlight_fg: Color::Rgb(10, 14, 26),
    highlight_bg: Color::Rgb(120, 200, 255),
    stripe_bg: Color::Rgb(16, 21, 36),
    key_fg: Color::Rgb(10, 14, 26),
    key_bg: Color::Rgb(100, 110, 135),
  },
];
