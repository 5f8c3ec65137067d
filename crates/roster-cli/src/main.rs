//! `roster`: a line-oriented shell over the contact screen controller.
//!
//! # Usage
//!
//! ```
//! roster --store ~/contacts.db
//! roster --config roster.toml
//! ```
//!
//! Type `help` at the prompt for the command list. Logs go to stderr and are
//! filtered with `RUST_LOG`.

mod command;
mod render;

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::{Context as _, Result};
use clap::Parser;
use command::{Command, HELP};
use roster_core::{ContactEvent, UiState};
use roster_state::{ContactStateController, ControllerConfig};
use roster_store_sqlite::SqliteContactDao;
use serde::Deserialize;
use tokio::io::{AsyncBufReadExt as _, BufReader};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

const DEFAULT_STORE_PATH: &str = "~/.local/share/roster/contacts.db";
const IN_MEMORY: &str = ":memory:";

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "roster", version, about = "Keep a small list of contacts")]
struct Args {
  /// Path to a TOML config file (store_path, stop_timeout_ms).
  #[arg(short, long, value_name = "FILE", default_value = "roster.toml")]
  config: PathBuf,

  /// SQLite database to use; `:memory:` keeps nothing on exit.
  #[arg(long, value_name = "PATH")]
  store: Option<String>,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Settings merged from the config file and `ROSTER_*` variables.
#[derive(Deserialize, Debug)]
struct RosterConfig {
  store_path:      String,
  stop_timeout_ms: u64,
}

fn load_config(args: &Args) -> Result<RosterConfig> {
  let mut builder = config::Config::builder()
    .set_default("store_path", DEFAULT_STORE_PATH)?
    .set_default("stop_timeout_ms", ControllerConfig::default().stop_timeout_ms)?
    .add_source(config::File::from(args.config.clone()).required(false))
    .add_source(config::Environment::with_prefix("ROSTER"));

  // The flag overrides both the file and the environment.
  if let Some(store) = &args.store {
    builder = builder.set_override("store_path", store.as_str())?;
  }

  builder
    .build()
    .context("failed to read config")?
    .try_deserialize()
    .context("failed to deserialise RosterConfig")
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let args = Args::parse();
  let cfg = load_config(&args)?;
  tracing::debug!(?cfg, "loaded config");

  let dao = open_store(&cfg.store_path).await?;
  let controller = ContactStateController::new(
    Arc::new(dao),
    ControllerConfig {
      stop_timeout_ms: cfg.stop_timeout_ms,
    },
  );

  let result = run_shell(&controller).await;
  controller.shutdown().await;
  result
}

async fn open_store(store_path: &str) -> Result<SqliteContactDao> {
  if store_path == IN_MEMORY {
    return SqliteContactDao::open_in_memory()
      .await
      .context("failed to open in-memory store");
  }

  let path = expand_tilde(Path::new(store_path));
  if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("failed to create {}", parent.display()))?;
  }

  tracing::info!(path = %path.display(), "opening contact store");
  SqliteContactDao::open(&path)
    .await
    .with_context(|| format!("failed to open store at {path:?}"))
}

// ─── Shell ────────────────────────────────────────────────────────────────────

/// Read commands until `quit` or end of input, redrawing on every snapshot.
async fn run_shell(controller: &ContactStateController<SqliteContactDao>) -> Result<()> {
  let mut view = controller.state();
  let mut lines = BufReader::new(tokio::io::stdin()).lines();

  println!("{HELP}\n");
  print!("{}", render::screen(&view.current()));

  loop {
    tokio::select! {
      line = lines.next_line() => {
        let Some(line) = line.context("reading stdin")? else {
          break;
        };
        match Command::parse(&line) {
          Ok(Command::Quit) => break,
          Ok(command) => dispatch(controller, &view.current(), command)?,
          Err(e) => eprintln!("{e}"),
        }
      }
      state = view.changed() => match state {
        Some(state) => print!("{}", render::screen(&state)),
        None => break,
      },
    }
  }
  Ok(())
}

fn dispatch(
  controller: &ContactStateController<SqliteContactDao>,
  current: &UiState,
  command: Command,
) -> Result<()> {
  match command {
    Command::Event(event) => controller.handle_event(event),
    Command::Delete(id) => match current.contacts.iter().find(|c| c.id == Some(id)) {
      Some(contact) => controller.handle_event(ContactEvent::DeleteContact(contact.clone())),
      None => eprintln!("no contact with id {id} on screen"),
    },
    Command::List => print!("{}", render::screen(current)),
    Command::Json => {
      println!(
        "{}",
        serde_json::to_string_pretty(current).context("serialising snapshot")?
      );
    }
    Command::Help => println!("{HELP}"),
    Command::Quit => {}
  }
  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
