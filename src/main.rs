// SPDX-License-Identifier: MIT
//
// mini — a small modal terminal text editor.
//
// This binary wires the crates together:
//
//   mini-term   → raw mode, key decoding, escape encoding
//   mini-editor → rows, highlighting, modes, prompts, search, frames
//
// Each keypress flows through:
//
//   stdin → KeyReader → Editor::dispatch → Document/Cursor mutation
//   Editor::refresh_screen → Frame::render → stdout
//
// Layout:
//
//   ┌──────────────────────────────┐
//   │ text area                    │  ← rows - 2
//   ├──────────────────────────────┤
//   │ status bar (INVERSE)         │  ← 1 row
//   ├──────────────────────────────┤
//   │ message bar / prompt         │  ← 1 row
//   └──────────────────────────────┘

mod logging;

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use mini_editor::{Config, Editor};
use mini_term::reader::KeyReader;
use mini_term::terminal::{self, Size, Terminal};
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(name = "mini", version, about = "A small modal terminal text editor")]
struct Args {
    /// File to edit. Created on first save if it doesn't exist.
    file: Option<PathBuf>,

    /// Config file [default: $XDG_CONFIG_HOME/mini/config.toml]
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Columns per tab stop, overriding the config file.
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
    tab_stop: Option<u16>,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("mini: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    let mut config = load_config(args.config.as_deref())?;
    if let Some(n) = args.tab_stop {
        config.tab_stop = usize::from(n);
    }
    let log_file = logging::init_logging(&config.log_level).context("initialize logging failed")?;
    info!(log_file = %log_file.display(), ?config, "starting");

    if !terminal::is_tty() {
        bail!("stdin is not a terminal");
    }

    let mut term = Terminal::new();
    term.enter().context("enter raw mode failed")?;
    let result = edit(args.file.as_deref(), config, term.size());
    // Restore before anything is printed to stderr.
    let restored = term.leave();

    if let Err(e) = &result {
        error!(error = %format!("{e:#}"), "exiting on error");
    }
    result?;
    restored.context("restore terminal failed")
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let Some(path) = path.map(Path::to_path_buf).or_else(Config::default_path) else {
        return Ok(Config::default());
    };
    Config::load(&path).context("load config failed")
}

fn edit(file: Option<&Path>, config: Config, size: Size) -> Result<()> {
    let mut editor = Editor::new(
        config,
        size,
        Box::new(KeyReader::stdin()),
        Box::new(io::stdout()),
    );
    if let Some(path) = file {
        editor
            .open_file(path)
            .with_context(|| format!("open {} failed", path.display()))?;
    }
    editor.run().context("editor loop failed")
}
