mod app;
mod catalog;
mod config;
mod constants;
mod feed;
mod input;
mod likes;
mod player;
mod store;
mod surface;
mod theme;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use directories::ProjectDirs;
use ratatui::{
  DefaultTerminal,
  crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
  crossterm::execute,
};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use app::App;
use store::StoreClient;

// --- CLI ---

#[derive(Parser, Debug)]
#[command(author, version = env!("CARGO_PKG_VERSION"), about, long_about = None)]
struct Args {
  /// Base URL of the external video store (falls back to $INSPO_STORE_URL)
  #[arg(long)]
  store_url: Option<String>,
  /// Anonymous API key for the store (falls back to $INSPO_STORE_KEY)
  #[arg(long)]
  store_key: Option<String>,
}

// --- Logging ---

/// File-based logging; the terminal itself belongs to the UI.
fn init_tracing() -> Option<tracing_appender::non_blocking::WorkerGuard> {
  let proj_dirs = ProjectDirs::from("", "", "inspo")?;
  let log_dir = proj_dirs.data_dir().join("logs");
  std::fs::create_dir_all(&log_dir).ok()?;
  let file_appender = tracing_appender::rolling::daily(log_dir, "inspo.log");
  let (writer, guard) = tracing_appender::non_blocking(file_appender);
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("inspo=info")))
    .with_writer(writer)
    .with_ansi(false)
    .init();
  Some(guard)
}

// --- Main ---

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();
  let _log_guard = init_tracing();

  let store_url = args
    .store_url
    .or_else(|| std::env::var("INSPO_STORE_URL").ok())
    .context("No store URL. Pass --store-url or set INSPO_STORE_URL")?;
  let store_key = args
    .store_key
    .or_else(|| std::env::var("INSPO_STORE_KEY").ok())
    .context("No store key. Pass --store-key or set INSPO_STORE_KEY")?;
  let store = StoreClient::new(&store_url, &store_key)?;

  let default_hook = std::panic::take_hook();
  std::panic::set_hook(Box::new(move |info| {
    let _ = execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();
    default_hook(info);
  }));

  let mut terminal = ratatui::init();
  execute!(std::io::stdout(), EnableMouseCapture).context("Failed to enable mouse capture")?;
  let result = run(&mut terminal, store).await;
  let _ = execute!(std::io::stdout(), DisableMouseCapture);
  ratatui::restore();
  result
}

async fn run(terminal: &mut DefaultTerminal, store: StoreClient) -> Result<()> {
  let mut app = App::new(store);
  app.trigger_load();

  loop {
    app.check_pending().await?;
    app.expire_error();
    app.feed.expire_notice();

    terminal.draw(|frame| ui::ui(frame, &mut app))?;

    if event::poll(Duration::from_millis(100))? {
      match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
          input::handle_key_event(&mut app, key).await?;
        }
        Event::Mouse(mouse) => {
          input::handle_mouse_event(&mut app, mouse).await?;
        }
        _ => {}
      }
    }

    if app.should_quit {
      break;
    }
  }

  app.player.stop().await?;
  Ok(())
}
