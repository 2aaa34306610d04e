//! CLI - Command Line Interface for reelplay
//!
//! Every player-screen action is scriptable through `simulate`. All output
//! is JSON-parseable.
//!
//! # Examples
//!
//! ```bash
//! # Open the player screen
//! reelplay play http://example.com/movie.mp4 --title "Big Buck Bunny"
//!
//! # Drive the controller headlessly
//! reelplay simulate --duration 120 load tick:30 seek:-10 mute zoom
//! ```

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Source opened when no URI is given
pub const SAMPLE_URI: &str =
    "http://commondatastorage.googleapis.com/gtv-videos-bucket/sample/BigBuckBunny.mp4";

/// Duration of the sample source, in seconds
pub const SAMPLE_DURATION_SECS: f64 = 596.0;

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for CLI operations (semantic for scripting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// General error
    Error = 1,
    /// Invalid arguments
    InvalidArgs = 2,
    /// Simulation ended with a media failure
    PlaybackFailed = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> std::process::ExitCode {
        std::process::ExitCode::from(code as u8)
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// reelplay - video player screen in your terminal
///
/// Run without arguments to open the sample video.
/// Use subcommands for scriptable automation.
#[derive(Parser, Debug)]
#[command(
    name = "reelplay",
    version,
    about = "Video playback controller with a terminal player screen",
    after_help = "EXAMPLES:\n\
                  reelplay                                   Play the sample video\n\
                  reelplay play URI --title Movie            Play a source\n\
                  reelplay simulate load tick:30 seek:-10    Script the controller\n\
                  reelplay config --path                     Show config location"
)]
pub struct Cli {
    /// Output format as JSON (default for non-TTY)
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Debug-level logging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Path to config file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run (omit to open the sample video)
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// True unless the player screen will be opened
    pub fn is_cli_mode(&self) -> bool {
        !matches!(self.command, None | Some(Command::Play(_)))
    }

    /// Check if JSON output should be used
    pub fn should_json(&self) -> bool {
        self.json || !std::io::stdout().is_terminal()
    }
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Open the player screen
    #[command(visible_alias = "p")]
    Play(PlayCmd),

    /// Run playback steps headlessly and print the final state
    #[command(visible_alias = "sim")]
    Simulate(SimulateCmd),

    /// Show the effective configuration
    Config(ConfigCmd),
}

/// Open the player screen for a source
#[derive(Args, Debug, Default)]
pub struct PlayCmd {
    /// Source URI
    pub uri: Option<String>,

    /// Title shown in the top bar
    #[arg(long, short = 't')]
    pub title: Option<String>,

    /// Source duration in seconds
    #[arg(long, short = 'D')]
    pub duration: Option<f64>,

    /// Resume position in seconds
    #[arg(long, short = 'r')]
    pub resume: Option<f64>,

    /// Start paused regardless of config
    #[arg(long)]
    pub paused: bool,
}

impl PlayCmd {
    pub fn uri(&self) -> &str {
        self.uri.as_deref().unwrap_or(SAMPLE_URI)
    }

    /// Title, defaulting to the last path segment of the URI
    pub fn title(&self) -> String {
        if let Some(title) = &self.title {
            return title.clone();
        }
        self.uri()
            .rsplit('/')
            .next()
            .filter(|s| !s.is_empty())
            .unwrap_or("Untitled")
            .to_string()
    }
}

/// Run playback steps against a headless controller
#[derive(Args, Debug)]
pub struct SimulateCmd {
    /// Source duration in seconds
    #[arg(long, short = 'D', default_value_t = SAMPLE_DURATION_SECS)]
    pub duration: f64,

    /// Resume position in seconds
    #[arg(long, short = 'r')]
    pub resume: Option<f64>,

    /// Start paused regardless of config
    #[arg(long)]
    pub paused: bool,

    /// Steps, e.g. `load tick:5 seek:-10 mute buffer:on`
    #[arg(required = true)]
    pub steps: Vec<String>,
}

impl SimulateCmd {
    /// Parse all steps, stopping at the first bad one
    pub fn parse_steps(&self) -> Result<Vec<Step>, StepError> {
        self.steps.iter().map(|s| s.parse()).collect()
    }
}

/// Show the effective configuration
#[derive(Args, Debug)]
pub struct ConfigCmd {
    /// Only print the config file path
    #[arg(long)]
    pub path: bool,

    /// Write the effective configuration to the config file path
    #[arg(long, conflicts_with = "path")]
    pub init: bool,
}

// =============================================================================
// Simulation Steps
// =============================================================================

/// One scripted intent or media event
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Play,
    Pause,
    Toggle,
    SeekBy(f64),
    SeekTo(f64),
    Mute,
    Volume(f64),
    Brightness(f64),
    Zoom,
    Controls,
    /// Engine starts loading the source
    Load,
    /// Advance the engine clock
    Tick(f64),
    /// Engine runs out of data
    Stall,
    /// Engine is fed again
    Feed,
    /// Raw buffering event
    Buffer(bool),
    /// Raw progress event
    Progress { current: f64, seekable: Option<f64> },
    Fail(String),
    OpenTracks,
    CloseTracks { applied: bool },
    Exit,
}

/// Errors parsing a step
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StepError {
    #[error("Unknown step: {0}")]
    Unknown(String),
    #[error("Invalid value in step '{step}': {value}")]
    InvalidValue { step: String, value: String },
}

fn parse_number(step: &str, value: &str) -> Result<f64, StepError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| StepError::InvalidValue {
            step: step.to_string(),
            value: value.to_string(),
        })
}

/// Parse `HH:MM:SS` or `MM:SS` to seconds; `None` on overflow
fn parse_timestamp(s: &str) -> Option<f64> {
    let parts: Vec<&str> = s.split(':').collect();
    if !(2..=3).contains(&parts.len()) {
        return None;
    }
    parts
        .iter()
        .try_fold(0u64, |total, part| {
            let value: u64 = part.parse().ok()?;
            total.checked_mul(60)?.checked_add(value)
        })
        .map(|secs| secs as f64)
}

impl FromStr for Step {
    type Err = StepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (name, arg) = match s.split_once(':') {
            Some((name, arg)) => (name.to_lowercase(), Some(arg)),
            None => (s.to_lowercase(), None),
        };

        let invalid = |value: &str| StepError::InvalidValue {
            step: name.clone(),
            value: value.to_string(),
        };

        match (name.as_str(), arg) {
            ("play", None) => Ok(Step::Play),
            ("pause", None) => Ok(Step::Pause),
            ("toggle", None) => Ok(Step::Toggle),
            ("mute", None) => Ok(Step::Mute),
            ("zoom", None) => Ok(Step::Zoom),
            ("controls", None) => Ok(Step::Controls),
            ("load", None) => Ok(Step::Load),
            ("stall", None) => Ok(Step::Stall),
            ("feed", None) => Ok(Step::Feed),
            ("exit", None) => Ok(Step::Exit),
            ("tracks", None) => Ok(Step::OpenTracks),
            ("tracks", Some("apply")) => Ok(Step::CloseTracks { applied: true }),
            ("tracks", Some("cancel")) => Ok(Step::CloseTracks { applied: false }),
            ("seek", Some(arg)) => {
                if let Some(delta) = arg.strip_prefix('+') {
                    Ok(Step::SeekBy(parse_number(&name, delta)?))
                } else if let Some(delta) = arg.strip_prefix('-') {
                    Ok(Step::SeekBy(-parse_number(&name, delta)?))
                } else if let Some(secs) = parse_timestamp(arg) {
                    Ok(Step::SeekTo(secs))
                } else {
                    Ok(Step::SeekTo(parse_number(&name, arg)?))
                }
            }
            ("volume", Some(arg)) => Ok(Step::Volume(parse_number(&name, arg)?)),
            ("brightness", Some(arg)) => Ok(Step::Brightness(parse_number(&name, arg)?)),
            ("tick", Some(arg)) => Ok(Step::Tick(parse_number(&name, arg)?)),
            ("buffer", Some(arg)) => match arg {
                "on" | "true" => Ok(Step::Buffer(true)),
                "off" | "false" => Ok(Step::Buffer(false)),
                other => Err(invalid(other)),
            },
            ("progress", Some(arg)) => match arg.split_once('/') {
                Some((current, seekable)) => Ok(Step::Progress {
                    current: parse_number(&name, current)?,
                    seekable: Some(parse_number(&name, seekable)?),
                }),
                None => Ok(Step::Progress {
                    current: parse_number(&name, arg)?,
                    seekable: None,
                }),
            },
            ("fail", arg) => Ok(Step::Fail(
                arg.filter(|m| !m.is_empty())
                    .unwrap_or("media load failed")
                    .to_string(),
            )),
            (_, Some(arg)) if is_known(&name) => Err(invalid(arg)),
            (_, None) if is_known(&name) => Err(invalid("")),
            _ => Err(StepError::Unknown(s.to_string())),
        }
    }
}

fn is_known(name: &str) -> bool {
    matches!(
        name,
        "play"
            | "pause"
            | "toggle"
            | "mute"
            | "zoom"
            | "controls"
            | "load"
            | "stall"
            | "feed"
            | "exit"
            | "tracks"
            | "seek"
            | "volume"
            | "brightness"
            | "tick"
            | "buffer"
            | "progress"
    )
}

// =============================================================================
// JSON Output Types
// =============================================================================

/// Generic JSON output wrapper with status
#[derive(Debug, Serialize)]
pub struct JsonOutput<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub exit_code: i32,
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

impl<T: Serialize> JsonOutput<T> {
    /// Create success output with data
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            exit_code: 0,
        }
    }

    /// Create error output (no data)
    pub fn error_msg(msg: impl Into<String>, code: ExitCode) -> JsonOutput<()> {
        JsonOutput::<()> {
            data: None,
            error: Some(msg.into()),
            exit_code: code.into(),
        }
    }
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Output handler for consistent formatting
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.should_json(),
            quiet: cli.quiet,
        }
    }

    /// Print success data
    pub fn print<T: Serialize>(&self, data: T) -> anyhow::Result<()> {
        if self.json {
            let output = JsonOutput::success(data);
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
        Ok(())
    }

    /// Print error and return exit code
    pub fn error(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        let msg = msg.into();
        if self.json {
            let output = JsonOutput::<()>::error_msg(&msg, code);
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                eprintln!("{}", json);
            }
        } else if !self.quiet {
            eprintln!("Error: {}", msg);
        }
        code
    }

    /// Print info message (suppressed in quiet mode)
    pub fn info(&self, msg: impl std::fmt::Display) {
        if !self.quiet && !self.json {
            eprintln!("{}", msg);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
