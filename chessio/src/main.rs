//! chessio - play chess in the terminal through the `chess-io` bridge.
//!
//! Commands are read line by line from stdin and forwarded to a bridge
//! running in its own task. The board and any notices raised by the engine
//! are printed after each command.

use std::path::{Path, PathBuf};

use anyhow::Context;
use chess::{ChessBoard, ChessRules, JsonSaveFile};
use chess_io::{Bridge, BridgeError, BridgeHandle, PersistenceGateway, PersistenceMode};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod view;

use commands::{parse_command, resolve_save_path, Command, HELP};
use view::TerminalView;

#[derive(Parser)]
#[command(name = "chessio", about = "Terminal chess on top of the chess-io bridge")]
struct Cli {
    /// Start from this FEN instead of the standard position.
    #[arg(long, value_name = "FEN")]
    fen: Option<String>,

    /// Load a saved game before reading commands.
    #[arg(long, value_name = "PATH", conflicts_with = "fen")]
    load: Option<PathBuf>,

    /// Allow saving but refuse to load games.
    #[arg(long, conflicts_with = "load")]
    save_only: bool,

    /// Disable saving and loading entirely.
    #[arg(long, conflicts_with_all = ["load", "save_only"])]
    no_persistence: bool,
}

impl Cli {
    fn persistence_mode(&self) -> Option<PersistenceMode> {
        if self.no_persistence {
            None
        } else if self.save_only {
            Some(PersistenceMode::SaveOnly)
        } else {
            Some(PersistenceMode::ReadWrite)
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_dir = config::get_log_dir();
    std::fs::create_dir_all(&log_dir).ok();
    let file_appender = tracing_appender::rolling::daily(&log_dir, config::LOG_FILE_PREFIX);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tracing::info!("chessio starting up");

    let board = match &cli.fen {
        Some(fen) => ChessBoard::from_fen(fen).context("invalid --fen")?,
        None => ChessBoard::classical(),
    };

    let view = TerminalView::stdout();
    let mut bridge = Bridge::with_board(ChessRules::new(), board, view.update_hook());
    if let Some(mode) = cli.persistence_mode() {
        let gateway = PersistenceGateway::new(JsonSaveFile::new()).with_mode(mode);
        bridge = bridge.with_persistence(gateway);
    }
    let handle = chess_io::spawn(bridge);
    for reaction in view.reactions() {
        handle.add_reaction(reaction).await?;
    }

    let save_dir = chess_io::config::get_save_dir();
    if cli.persistence_mode().is_some() {
        if let Err(e) = std::fs::create_dir_all(&save_dir) {
            tracing::warn!("Cannot create save directory {:?}: {}", save_dir, e);
        }
    }

    println!("chessio - type `help` for commands");
    println!("Saves: {}", save_dir.display());
    println!("Debug logs: {}/{}.YYYY-MM-DD", log_dir.display(), config::LOG_FILE_PREFIX);

    if let Some(path) = &cli.load {
        load(&handle, &view, &resolve_save_path(path, &save_dir)).await?;
    }
    if !view.present() {
        print_board(&handle).await?;
    }

    run(&handle, &view, &save_dir).await?;

    handle.shutdown().await;
    tracing::info!("chessio shutting down");
    Ok(())
}

async fn run(
    handle: &BridgeHandle<ChessBoard>,
    view: &TerminalView,
    save_dir: &Path,
) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        view.prompt();
        let Some(line) = lines.next_line().await? else {
            break;
        };

        match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Empty) => {}
            Ok(Command::Help) => view.notice(HELP),
            Ok(Command::Submit(input)) => {
                let name = input.name();
                handle.submit(input).await?;
                if !view.present() {
                    tracing::debug!("{} rejected", name);
                    view.notice(format!("{} not accepted in this position.", name));
                }
            }
            Ok(Command::Save(path)) => {
                let target = path
                    .map(|p| resolve_save_path(&p, save_dir))
                    .unwrap_or_default();
                match handle.save(&target).await {
                    Ok(()) => {
                        let saved = handle.last_save_path().await?.unwrap_or(target);
                        view.notice(format!("Saved to {}", saved.display()));
                    }
                    Err(BridgeError::Closed) => anyhow::bail!("bridge stopped"),
                    Err(e) => view.notice(format!("Save failed: {}", e)),
                }
            }
            Ok(Command::Load(path)) => {
                load(handle, view, &resolve_save_path(&path, save_dir)).await?;
            }
            Err(e) => view.notice(e.to_string()),
        }
        view.present();
    }

    Ok(())
}

/// Bridge errors are shown to the user; only a dead bridge is fatal.
async fn load(
    handle: &BridgeHandle<ChessBoard>,
    view: &TerminalView,
    path: &Path,
) -> anyhow::Result<()> {
    match handle.load(path).await {
        Ok(()) => view.notice(format!("Loaded {}", path.display())),
        Err(BridgeError::Closed) => anyhow::bail!("bridge stopped"),
        Err(e) => view.notice(format!("Load failed: {}", e)),
    }
    Ok(())
}

async fn print_board(handle: &BridgeHandle<ChessBoard>) -> anyhow::Result<()> {
    let board = handle.board().await?;
    let display = chess::DisplayBoard::from_fen(&board.fen())?;
    println!("\n{}", display.render(board.checked_king()));
    Ok(())
}
