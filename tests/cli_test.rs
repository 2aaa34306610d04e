//! CLI Command Tests
//!
//! Argument parsing, step scripts and headless simulation runs.
//! Covers the JSON report shape.

// =============================================================================
// CLI Argument Parsing Tests
// =============================================================================

mod cli_parsing {
    use clap::Parser;
    use reelplay::cli::{Cli, Command, SAMPLE_DURATION_SECS, SAMPLE_URI};

    #[test]
    fn test_no_args_is_tui_mode() {
        let cli = Cli::parse_from::<_, &str>([]);
        assert!(!cli.is_cli_mode());
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_play_is_tui_mode() {
        let cli = Cli::parse_from(["reelplay", "play", "http://x/movie.mp4", "--resume", "90"]);
        assert!(!cli.is_cli_mode());
        match cli.command {
            Some(Command::Play(cmd)) => {
                assert_eq!(cmd.uri(), "http://x/movie.mp4");
                assert_eq!(cmd.title(), "movie.mp4");
                assert_eq!(cmd.resume, Some(90.0));
                assert!(!cmd.paused);
            }
            _ => panic!("Expected Play command"),
        }
    }

    #[test]
    fn test_play_defaults_to_sample() {
        let cli = Cli::parse_from(["reelplay", "p", "--title", "Bunny", "--paused"]);
        match cli.command {
            Some(Command::Play(cmd)) => {
                assert_eq!(cmd.uri(), SAMPLE_URI);
                assert_eq!(cmd.title(), "Bunny");
                assert!(cmd.paused);
            }
            _ => panic!("Expected Play command"),
        }
    }

    #[test]
    fn test_simulate_command() {
        let cli = Cli::parse_from([
            "reelplay", "simulate", "-D", "120", "load", "tick:30", "seek:-10", "--json",
        ]);
        assert!(cli.is_cli_mode());
        assert!(cli.json);
        match cli.command {
            Some(Command::Simulate(cmd)) => {
                assert_eq!(cmd.duration, 120.0);
                assert_eq!(cmd.steps, vec!["load", "tick:30", "seek:-10"]);
            }
            _ => panic!("Expected Simulate command"),
        }
    }

    #[test]
    fn test_simulate_default_duration() {
        let cli = Cli::parse_from(["reelplay", "sim", "load"]);
        match cli.command {
            Some(Command::Simulate(cmd)) => assert_eq!(cmd.duration, SAMPLE_DURATION_SECS),
            _ => panic!("Expected Simulate command"),
        }
    }

    #[test]
    fn test_simulate_requires_steps() {
        assert!(Cli::try_parse_from(["reelplay", "simulate"]).is_err());
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["reelplay", "config", "--path", "-q", "-v", "-c", "/tmp/x.toml"]);
        assert!(cli.quiet);
        assert!(cli.verbose);
        assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("/tmp/x.toml")));
        match cli.command {
            Some(Command::Config(cmd)) => assert!(cmd.path),
            _ => panic!("Expected Config command"),
        }
    }

    #[test]
    fn test_config_init_flag() {
        let cli = Cli::parse_from(["reelplay", "config", "--init"]);
        match cli.command {
            Some(Command::Config(cmd)) => assert!(cmd.init && !cmd.path),
            _ => panic!("Expected Config command"),
        }
        assert!(Cli::try_parse_from(["reelplay", "config", "--init", "--path"]).is_err());
    }
}

// =============================================================================
// Step Parsing Tests
// =============================================================================

mod step_parsing {
    use reelplay::cli::{Step, StepError};

    #[test]
    fn test_seek_with_hours() {
        assert_eq!("seek:1:00:05".parse::<Step>(), Ok(Step::SeekTo(3605.0)));
    }

    #[test]
    fn test_progress_without_seekable() {
        assert_eq!(
            "progress:101".parse::<Step>(),
            Ok(Step::Progress {
                current: 101.0,
                seekable: None
            })
        );
        assert_eq!(
            "fail:codec error: bad frame".parse::<Step>(),
            Ok(Step::Fail("codec error: bad frame".to_string()))
        );
    }

    #[test]
    fn test_case_insensitive_names() {
        assert_eq!("PLAY".parse::<Step>(), Ok(Step::Play));
        assert_eq!("Zoom".parse::<Step>(), Ok(Step::Zoom));
    }

    #[test]
    fn test_missing_argument() {
        assert!(matches!(
            "tick".parse::<Step>(),
            Err(StepError::InvalidValue { .. })
        ));
        assert!(matches!(
            "tracks:maybe".parse::<Step>(),
            Err(StepError::InvalidValue { .. })
        ));
    }
}

// =============================================================================
// Simulation Tests
// =============================================================================

mod simulation {
    use reelplay::cli::Step;
    use reelplay::commands::run_steps;
    use reelplay::player::DeviceCall;
    use reelplay::{Orientation, PlaybackStatus, PlayerOptions, ResizeMode};

    fn script(steps: &[&str]) -> Vec<Step> {
        steps.iter().map(|s| s.parse::<Step>().unwrap()).collect()
    }

    #[test]
    fn test_watch_and_rewind() {
        let report = run_steps(
            &script(&["load", "tick:30", "seek:-10"]),
            120.0,
            PlayerOptions::default(),
        );

        assert_eq!(report.snapshot.status, PlaybackStatus::Playing);
        assert_eq!(report.snapshot.position_seconds, 20.0);
        assert_eq!(report.snapshot.duration_seconds, 120.0);
        assert_eq!(report.engine.seeks(), &[20.0]);
        assert!(report.rejected.is_empty());
    }

    #[test]
    fn test_resume_option_seeks_on_load() {
        let options = PlayerOptions {
            resume_at: Some(45.0),
            ..PlayerOptions::default()
        };
        let report = run_steps(&script(&["load", "tick:5"]), 120.0, options);

        assert_eq!(report.engine.seeks(), &[45.0]);
        assert_eq!(report.snapshot.position_seconds, 50.0);
    }

    #[test]
    fn test_paused_start_does_not_advance() {
        let options = PlayerOptions {
            autoplay: false,
            ..PlayerOptions::default()
        };
        let report = run_steps(&script(&["load", "tick:10", "play", "tick:3"]), 60.0, options);

        assert_eq!(report.snapshot.status, PlaybackStatus::Playing);
        assert_eq!(report.snapshot.position_seconds, 3.0);
    }

    #[test]
    fn test_device_calls_bracket_the_run() {
        let report = run_steps(
            &script(&["load", "toggle", "toggle", "mute", "zoom", "buffer:on", "buffer:off"]),
            60.0,
            PlayerOptions::default(),
        );

        assert_eq!(
            report.device_calls,
            vec![
                DeviceCall::LockOrientation(Orientation::Landscape),
                DeviceCall::Fullscreen(true),
                DeviceCall::LockOrientation(Orientation::Portrait),
                DeviceCall::Fullscreen(false),
            ]
        );
        assert!(report.snapshot.muted);
        assert_eq!(report.snapshot.zoom, ResizeMode::None);
    }

    #[test]
    fn test_track_menu_script() {
        let report = run_steps(
            &script(&["load", "tick:4", "tracks", "tick:10", "tracks:cancel", "tick:1"]),
            60.0,
            PlayerOptions::default(),
        );

        assert!(!report.snapshot.track_menu_visible);
        assert_eq!(report.snapshot.status, PlaybackStatus::Playing);
        assert_eq!(report.snapshot.position_seconds, 5.0);
    }

    #[test]
    fn test_stall_mid_playback() {
        let report = run_steps(
            &script(&["load", "tick:2", "stall", "tick:5", "pause", "feed"]),
            60.0,
            PlayerOptions::default(),
        );

        assert_eq!(report.snapshot.status, PlaybackStatus::Paused);
        assert_eq!(report.snapshot.position_seconds, 2.0);
        assert!(report.engine.is_paused());
    }

    #[test]
    fn test_report_serializes() {
        let report = run_steps(&script(&["load", "tick:1"]), 10.0, PlayerOptions::default());
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["snapshot"]["status"], "playing");
        assert_eq!(json["snapshot"]["position_seconds"], 1.0);
        assert_eq!(json["device_calls"][0]["call"], "lock_orientation");
        assert!(json.get("rejected").is_none());
        assert!(json["snapshot"].get("error").is_none());
    }
}
