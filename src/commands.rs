//! CLI Command Handlers
//!
//! Each handler takes CLI args and Output, returns ExitCode.

use serde::Serialize;

use crate::cli::{ConfigCmd, ExitCode, Output, SimulateCmd, Step};
use crate::config::Config;
use crate::models::{PlaybackSnapshot, ProgressUpdate};
use crate::player::{
    DeviceCall, HeadlessDevice, PlaybackController, PlayerError, PlayerOptions, SimulatedEngine,
};

// =============================================================================
// Simulation
// =============================================================================

/// A step the controller refused
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedStep {
    /// Position of the step in the script
    pub index: usize,
    pub step: String,
    pub reason: String,
}

/// Final state of a simulation run
#[derive(Debug, Serialize)]
pub struct SimulationReport {
    pub snapshot: PlaybackSnapshot,
    pub device_calls: Vec<DeviceCall>,
    pub engine: SimulatedEngine,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rejected: Vec<RejectedStep>,
}

/// Run `steps` against a fresh controller
///
/// The controller is entered before the first step and exited after the
/// last one (unless a step already exited it). Rejected intents are
/// collected, not fatal.
pub fn run_steps(steps: &[Step], duration: f64, options: PlayerOptions) -> SimulationReport {
    let mut player = PlaybackController::with_options(
        SimulatedEngine::new(duration),
        HeadlessDevice::new(),
        options,
    );
    let mut rejected = Vec::new();

    player.enter();
    for (index, step) in steps.iter().enumerate() {
        if let Err(e) = apply_step(&mut player, step) {
            tracing::debug!(index, ?step, "step rejected: {}", e);
            rejected.push(RejectedStep {
                index,
                step: format!("{:?}", step),
                reason: e.to_string(),
            });
        }
    }
    player.exit();

    SimulationReport {
        snapshot: player.snapshot(),
        device_calls: player.device().calls().to_vec(),
        engine: player.engine().clone(),
        rejected,
    }
}

fn apply_step(
    player: &mut PlaybackController<SimulatedEngine, HeadlessDevice>,
    step: &Step,
) -> Result<(), PlayerError> {
    match step {
        Step::Play => player.play()?,
        Step::Pause => player.pause(),
        Step::Toggle => player.toggle_play()?,
        Step::SeekBy(delta) => {
            player.seek_relative(*delta)?;
        }
        Step::SeekTo(target) => {
            player.seek_absolute(*target)?;
        }
        Step::Mute => player.toggle_mute(),
        Step::Volume(v) => player.set_volume(*v),
        Step::Brightness(v) => player.set_brightness(*v),
        Step::Zoom => player.toggle_zoom(),
        Step::Controls => player.toggle_controls_visibility(),
        Step::Load => {
            player.engine_mut().load();
            player.drain_events();
        }
        Step::Tick(secs) => {
            player.engine_mut().tick(*secs);
            player.drain_events();
        }
        Step::Stall => {
            player.engine_mut().stall();
            player.drain_events();
        }
        Step::Feed => {
            player.engine_mut().resume_feed();
            player.drain_events();
        }
        Step::Buffer(on) => player.on_buffering_changed(*on),
        Step::Progress { current, seekable } => {
            let seekable = seekable.unwrap_or_else(|| player.duration());
            player.on_progress(ProgressUpdate::new(*current, seekable));
        }
        Step::Fail(msg) => {
            player.engine_mut().fail(msg.clone());
            player.drain_events();
        }
        Step::OpenTracks => player.open_track_menu(),
        Step::CloseTracks { applied } => player.close_track_menu(*applied),
        Step::Exit => player.exit(),
    }
    Ok(())
}

pub fn simulate_cmd(cmd: SimulateCmd, config: &Config, output: &Output) -> ExitCode {
    let steps = match cmd.parse_steps() {
        Ok(steps) => steps,
        Err(e) => return output.error(e.to_string(), ExitCode::InvalidArgs),
    };
    if !(cmd.duration.is_finite() && cmd.duration >= 0.0) {
        return output.error(
            format!("Invalid duration: {}", cmd.duration),
            ExitCode::InvalidArgs,
        );
    }

    let mut options = config.player_options();
    options.resume_at = cmd.resume;
    if cmd.paused {
        options.autoplay = false;
    }

    output.info(format!("Running {} steps", steps.len()));
    let report = run_steps(&steps, cmd.duration, options);
    let failed = report.snapshot.error.is_some();

    if let Err(e) = output.print(&report) {
        return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
    }

    if failed {
        ExitCode::PlaybackFailed
    } else {
        ExitCode::Success
    }
}

// =============================================================================
// Config Command
// =============================================================================

pub fn config_cmd(cmd: ConfigCmd, config: &Config, output: &Output) -> ExitCode {
    #[derive(Serialize)]
    struct ConfigPath {
        path: Option<String>,
    }

    let result = if cmd.init {
        let Some(path) = Config::path() else {
            return output.error("No config directory on this platform", ExitCode::Error);
        };
        if let Err(e) = config.save_to(&path) {
            return output.error(format!("Failed to write config: {}", e), ExitCode::Error);
        }
        tracing::info!(path = %path.display(), "wrote config");
        output.print(ConfigPath {
            path: Some(path.display().to_string()),
        })
    } else if cmd.path {
        output.print(ConfigPath {
            path: Config::path().map(|p| p.display().to_string()),
        })
    } else {
        output.print(config)
    };

    match result {
        Ok(()) => ExitCode::Success,
        Err(e) => output.error(format!("Failed to serialize: {}", e), ExitCode::Error),
    }
}

// =============================================================================
// Tests
// =============================================================================
