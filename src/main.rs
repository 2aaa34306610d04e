//! reelplay - video player screen in your terminal
//!
//! # Usage
//!
//! ```bash
//! # Open the sample video
//! reelplay
//!
//! # Open a source, resuming at 1:30
//! reelplay play http://example.com/movie.mp4 --title "Movie" --resume 90
//!
//! # CLI mode (for automation)
//! reelplay simulate --duration 120 load tick:30 seek:-10 --json
//! ```

use std::io::stdout;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEvent, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use reelplay::app::PlayerScreen;
use reelplay::cli::{Cli, Command, ExitCode, Output, PlayCmd, SAMPLE_DURATION_SECS};
use reelplay::commands;
use reelplay::config::Config;
use reelplay::player::{PlaybackController, SimulatedEngine, TerminalDevice};
use reelplay::ui;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match cli.config.as_deref() {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };

    init_tracing(&cli, &config)?;

    if cli.is_cli_mode() {
        let exit_code = run_cli(cli, &config);
        std::process::exit(exit_code.into());
    }

    let cmd = match cli.command {
        Some(Command::Play(cmd)) => cmd,
        _ => PlayCmd::default(),
    };
    run_tui(cmd, &config).await
}

/// Logs go to stderr in CLI mode and to a file while the player screen owns
/// the terminal. `RUST_LOG` overrides the default filter.
fn init_tracing(cli: &Cli, config: &Config) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("reelplay=debug")
        } else {
            EnvFilter::new("reelplay=info")
        }
    });

    if cli.is_cli_mode() {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
        return Ok(());
    }

    let Some(path) = config.log_path() else {
        // Nowhere to write without corrupting the screen
        return Ok(());
    };
    let file = open_log_file(&path)?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn open_log_file(path: &Path) -> Result<std::fs::File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))
}

/// Run CLI command and return exit code
fn run_cli(cli: Cli, config: &Config) -> ExitCode {
    let output = Output::new(&cli);

    match cli.command {
        Some(Command::Simulate(cmd)) => commands::simulate_cmd(cmd, config, &output),
        Some(Command::Config(cmd)) => commands::config_cmd(cmd, config, &output),
        // Handled by is_cli_mode check
        Some(Command::Play(_)) | None => ExitCode::Success,
    }
}

// =============================================================================
// Player Screen
// =============================================================================

/// Open the player screen and run it until the user backs out
async fn run_tui(cmd: PlayCmd, config: &Config) -> Result<()> {
    let duration = cmd
        .duration
        .filter(|d| d.is_finite() && *d > 0.0)
        .unwrap_or(SAMPLE_DURATION_SECS);

    let mut options = config.player_options();
    options.resume_at = cmd.resume;
    if cmd.paused {
        options.autoplay = false;
    }

    let player = PlaybackController::with_options(
        SimulatedEngine::new(duration),
        TerminalDevice::stdout(),
        options,
    );
    let mut screen = PlayerScreen::new(cmd.title(), cmd.uri(), player, config.seek_step());

    enable_raw_mode()?;
    // Entering the screen switches to the alternate screen
    screen.mount();

    let result = run_event_loop(&mut screen, Duration::from_millis(config.tick_millis.max(16))).await;

    screen.back();
    disable_raw_mode()?;

    result
}

/// Main event loop - ticks the engine, applies key presses, redraws
async fn run_event_loop(
    screen: &mut PlayerScreen<TerminalDevice<std::io::Stdout>>,
    tick: Duration,
) -> Result<()> {
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    terminal.clear()?;

    let (key_tx, mut key_rx) = mpsc::unbounded_channel::<KeyEvent>();
    let reader = tokio::task::spawn_blocking(move || read_keys(key_tx));

    let mut ticker = tokio::time::interval(tick);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    while screen.running {
        terminal.draw(|frame| ui::render(frame, screen))?;

        tokio::select! {
            _ = ticker.tick() => screen.on_tick(tick.as_secs_f64()),
            key = key_rx.recv() => match key {
                Some(key) => {
                    screen.handle_key(key);
                }
                None => break,
            },
        }
    }

    drop(key_rx);
    reader.await??;
    terminal.show_cursor()?;
    Ok(())
}

/// Forward key presses until the receiver goes away
fn read_keys(tx: mpsc::UnboundedSender<KeyEvent>) -> Result<()> {
    const POLL: Duration = Duration::from_millis(50);

    while !tx.is_closed() {
        if !event::poll(POLL)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            // Only handle key press events (ignore releases on Windows)
            if key.kind == KeyEventKind::Press && tx.send(key).is_err() {
                break;
            }
        }
    }
    Ok(())
}
