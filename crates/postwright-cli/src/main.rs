//! `postwright`: command-line client for the Postwright content assistant.
//!
//! # Usage
//!
//! ```text
//! postwright strategy "B2B SaaS onboarding" --save
//! postwright post "what we learned migrating to Rust" --style lessons-learned
//! postwright carousel "five negotiation mistakes" --images ./slides
//! postwright times fintech --timezone Europe/London
//! postwright library browse
//! ```

mod app;
mod client;
mod commands;
mod ui;

use std::{
  io,
  path::{Path, PathBuf},
  time::Duration,
};

use anyhow::{Context, Result};
use app::{Action, App};
use clap::{Parser, Subcommand, ValueEnum};
use client::{ApiClient, ApiConfig};
use crossterm::{
  event::{self, Event},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use postwright_core::{KindFilter, PostStyle, Rating};
use ratatui::{Terminal, backend::CrosstermBackend};
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

const DEFAULT_URL: &str = "http://localhost:8080";
const DEFAULT_TIMEZONE: &str = "America/New_York";

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "postwright", about = "LinkedIn content assistant", version)]
struct Args {
  /// Path to a TOML config file (url, timezone).
  #[arg(short, long, value_name = "FILE", global = true)]
  config: Option<PathBuf>,

  /// Base URL of the postwright server (default: http://localhost:8080).
  #[arg(long, env = "POSTWRIGHT_URL", global = true)]
  url: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Draft a one-week content strategy for a topic.
  Strategy {
    topic: String,
    /// Save the result to the library.
    #[arg(long)]
    save:  bool,
  },
  /// Write a post from an idea.
  Post {
    idea:  String,
    #[arg(long, default_value_t = PostStyle::default())]
    style: PostStyle,
    /// Save the result to the library.
    #[arg(long)]
    save:  bool,
  },
  /// Plan a five-slide carousel.
  Carousel {
    topic:  String,
    /// Also generate an image for every slide into this directory.
    #[arg(long, value_name = "DIR")]
    images: Option<PathBuf>,
  },
  /// Suggest posting times for an industry.
  Times {
    industry: String,
    /// IANA timezone of the target audience.
    #[arg(long)]
    timezone: Option<String>,
  },
  /// Profile tools.
  Profile {
    #[command(subcommand)]
    command: ProfileCommand,
  },
  /// Saved content.
  Library {
    #[command(subcommand)]
    command: LibraryCommand,
  },
}

#[derive(Subcommand, Debug)]
enum ProfileCommand {
  /// Rewrite a profile bio.
  Optimize {
    bio:  Option<String>,
    /// Read the bio from a file instead.
    #[arg(long, conflicts_with = "bio")]
    file: Option<PathBuf>,
  },
  /// Enhance a headshot.
  Enhance {
    image: PathBuf,
    #[arg(long)]
    out:   Option<PathBuf>,
  },
  /// Generate a 16:9 profile banner.
  Banner {
    theme: String,
    #[arg(long)]
    out:   Option<PathBuf>,
  },
}

#[derive(Subcommand, Debug)]
enum LibraryCommand {
  /// List saved records, newest first.
  List {
    #[arg(long, default_value_t = KindFilter::All)]
    kind: KindFilter,
  },
  /// Rate a record.
  Rate { id: String, rating: RatingArg },
  /// Delete a record.
  Delete {
    id:  String,
    /// Skip the confirmation prompt.
    #[arg(long)]
    yes: bool,
  },
  /// Browse the library interactively.
  Browse,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum RatingArg {
  Good,
  Bad,
  /// Clear the rating.
  None,
}

impl From<RatingArg> for Option<Rating> {
  fn from(arg: RatingArg) -> Self {
    match arg {
      RatingArg::Good => Some(Rating::Good),
      RatingArg::Bad => Some(Rating::Bad),
      RatingArg::None => None,
    }
  }
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url:      String,
  /// Default target timezone for `times`.
  #[serde(default)]
  timezone: String,
}

fn load_config_file(path: Option<&Path>) -> Result<ConfigFile> {
  let Some(path) = path else { return Ok(ConfigFile::default()) };
  let raw = std::fs::read_to_string(path)
    .with_context(|| format!("reading config file {}", path.display()))?;
  toml::from_str(&raw).context("parsing config file")
}

/// Flag (or env) first, then the config file, then `default`.
fn pick(flag: Option<String>, file: &str, default: &str) -> String {
  flag
    .or_else(|| (!file.is_empty()).then(|| file.to_owned()))
    .unwrap_or_else(|| default.to_owned())
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_writer(io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();
  let file_cfg = load_config_file(args.config.as_deref())?;

  let client = ApiClient::new(ApiConfig {
    base_url: pick(args.url, &file_cfg.url, DEFAULT_URL),
  })?;

  match args.command {
    Command::Strategy { topic, save } => commands::strategy(&client, &topic, save).await,
    Command::Post { idea, style, save } => commands::post(&client, &idea, style, save).await,
    Command::Carousel { topic, images } => {
      commands::carousel(&client, &topic, images.as_deref()).await
    }
    Command::Times { industry, timezone } => {
      let target = pick(timezone, &file_cfg.timezone, DEFAULT_TIMEZONE);
      commands::times(&client, &industry, &target).await
    }
    Command::Profile { command } => match command {
      ProfileCommand::Optimize { bio, file } => {
        commands::optimize_profile(&client, bio, file.as_deref()).await
      }
      ProfileCommand::Enhance { image, out } => commands::enhance(&client, &image, out).await,
      ProfileCommand::Banner { theme, out } => commands::banner(&client, &theme, out).await,
    },
    Command::Library { command } => match command {
      LibraryCommand::List { kind } => commands::list(&client, kind).await,
      LibraryCommand::Rate { id, rating } => commands::rate(&client, &id, rating.into()).await,
      LibraryCommand::Delete { id, yes } => commands::delete(&client, &id, yes).await,
      LibraryCommand::Browse => browse(client).await,
    },
  }
}

// ─── Library browser ──────────────────────────────────────────────────────────

async fn browse(client: ApiClient) -> Result<()> {
  // Load before touching the terminal so errors print normally.
  let records = client.list_records(KindFilter::All).await?;
  let mut app = App::new(records);

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  // Run the event loop; restore terminal even on error.
  let run_result = run_event_loop(&mut terminal, &mut app, &client).await;

  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

async fn run_event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App,
  client: &ApiClient,
) -> Result<()> {
  loop {
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    // Poll for an event, yielding control to tokio while waiting.
    let maybe_event = tokio::task::block_in_place(|| {
      if event::poll(Duration::from_millis(50))? {
        Ok::<_, io::Error>(Some(event::read()?))
      } else {
        Ok(None)
      }
    })?;

    let Some(Event::Key(key)) = maybe_event else { continue };
    match app.handle_key(key) {
      None => {}
      Some(Action::Quit) => break,
      Some(Action::Rate { id, rating }) => match client.rate(&id, rating).await {
        Ok(()) => app.rated(&id, rating),
        Err(e) => app.failed(&e),
      },
      Some(Action::Delete { id }) => match client.delete(&id).await {
        Ok(()) => app.deleted(&id),
        Err(e) => app.failed(&e),
      },
    }
  }

  Ok(())
}
