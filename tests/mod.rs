//! Integration tests for reelplay
//!
//! Tests are organized by component:
//! - controller_test: Playback controller state machine and device effects
//! - cli_test: Argument parsing, step scripts, headless simulation
//! - ui_test: Player screen rendering

// Note: Each test file is a separate integration test crate
// Tests are run individually by cargo, not via mod.rs
