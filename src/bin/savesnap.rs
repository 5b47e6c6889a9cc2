//! savesnap -- back up and restore the game save on demand.
//!
//! Usage: savesnap [--data-root <path>] [--workdir <path>] [--bell]
//!
//! Reads one command per line from stdin: `b` (F1) backs up, `r` (F5)
//! restores, `q` (Ctrl+Q) quits.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use savesnap::dispatch::{run_dispatch, BellFeedback, LineActionSource, NoFeedback};
use savesnap::{Engine, SaveLayout};

#[derive(Parser)]
#[command(name = "savesnap")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// User data directory containing the game's save root
    /// (defaults to the platform roaming data directory)
    #[arg(long)]
    data_root: Option<PathBuf>,

    /// Directory that holds the backup slots (defaults to the current directory)
    #[arg(long)]
    workdir: Option<PathBuf>,

    /// Ring the terminal bell after each successful backup or restore
    #[arg(long)]
    bell: bool,
}

fn main() -> anyhow::Result<()> {
    // Log to stderr; stdout only carries the banner and the bell.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let data_root = match cli.data_root {
        Some(path) => path,
        None => savesnap::paths::user_data_root()?,
    };
    let workdir = match cli.workdir {
        Some(path) => path,
        None => std::env::current_dir().context("failed to read the current directory")?,
    };

    let layout = SaveLayout::resolve(&data_root, &workdir);
    layout
        .ensure_slot_dirs()
        .context("failed to prepare backup directories")?;
    let engine = Engine::new(layout);

    let layout = engine.layout();
    info!(
        save = %layout.save.display(),
        backup = %layout.backup.display(),
        previous_backup = %layout.previous_backup.display(),
        "savesnap ready"
    );
    println!("\t >> b / F1: backup   r / F5: restore   q / Ctrl+Q: quit <<");

    let mut source = LineActionSource::new(std::io::stdin().lock());

    let outcome = if cli.bell {
        run_dispatch(&engine, &mut source, &mut BellFeedback::new(std::io::stdout()))
    } else {
        run_dispatch(&engine, &mut source, &mut NoFeedback)
    };
    outcome.context("action source failed")?;

    Ok(())
}
