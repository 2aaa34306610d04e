//! Media engine seam
//!
//! [`MediaEngine`] is the media element the player screen drives: it takes
//! commands (seek, paused, muted, volume, resize mode) and queues events
//! (load, buffering, progress, failure) for the controller to pull.

use std::collections::VecDeque;

use serde::Serialize;

use crate::models::{LoadInfo, ProgressUpdate, ResizeMode};

/// Event emitted by the media engine
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    Loaded(LoadInfo),
    Buffering(bool),
    Progress(ProgressUpdate),
    Failed(String),
}

/// The media element behind the player screen
pub trait MediaEngine {
    /// Jump to an absolute position in seconds
    fn seek(&mut self, seconds: f64);
    fn set_paused(&mut self, paused: bool);
    fn set_muted(&mut self, muted: bool);
    fn set_volume(&mut self, volume: f64);
    fn set_resize_mode(&mut self, mode: ResizeMode);

    /// Next queued event, oldest first
    fn poll_event(&mut self) -> Option<MediaEvent> {
        None
    }
}

/// Deterministic engine with a virtual clock
///
/// Nothing is decoded. `tick` advances the clock while the engine is loaded,
/// unpaused, fed and healthy, and queues a progress event whenever the
/// clock moves. The clock holds at the end of the source; pausing stays the
/// controller's call.
#[derive(Debug, Clone, Serialize)]
pub struct SimulatedEngine {
    duration: f64,
    position: f64,
    paused: bool,
    muted: bool,
    volume: f64,
    resize_mode: ResizeMode,
    loaded: bool,
    stalled: bool,
    failed: bool,
    /// Every seek target received, in order
    seeks: Vec<f64>,
    #[serde(skip)]
    events: VecDeque<MediaEvent>,
}

impl SimulatedEngine {
    /// Create an engine for a source of `duration` seconds
    pub fn new(duration: f64) -> Self {
        Self {
            duration: duration.max(0.0),
            position: 0.0,
            paused: false,
            muted: false,
            volume: 1.0,
            resize_mode: ResizeMode::default(),
            loaded: false,
            stalled: false,
            failed: false,
            seeks: Vec::new(),
            events: VecDeque::new(),
        }
    }

    /// Start loading the source
    ///
    /// Queues the buffering bracket around the load event, like a network
    /// source filling its first buffer.
    pub fn load(&mut self) {
        if self.loaded || self.failed {
            return;
        }
        self.loaded = true;
        self.events.push_back(MediaEvent::Buffering(true));
        self.events.push_back(MediaEvent::Loaded(LoadInfo {
            duration: self.duration,
        }));
        self.events.push_back(MediaEvent::Buffering(false));
    }

    /// Advance the clock by `dt` seconds, holding at the end
    pub fn tick(&mut self, dt: f64) {
        if !self.loaded || self.paused || self.stalled || self.failed {
            return;
        }
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }
        let next = (self.position + dt).min(self.duration);
        if next == self.position {
            return;
        }
        self.position = next;
        self.events.push_back(MediaEvent::Progress(ProgressUpdate::new(
            self.position,
            self.duration,
        )));
    }

    /// Starve the engine of data
    pub fn stall(&mut self) {
        if self.stalled || self.failed {
            return;
        }
        self.stalled = true;
        self.events.push_back(MediaEvent::Buffering(true));
    }

    /// Resume feeding the engine after a stall
    pub fn resume_feed(&mut self) {
        if !self.stalled || self.failed {
            return;
        }
        self.stalled = false;
        self.events.push_back(MediaEvent::Buffering(false));
    }

    /// Fail the source
    pub fn fail(&mut self, message: impl Into<String>) {
        if self.failed {
            return;
        }
        self.failed = true;
        self.events.push_back(MediaEvent::Failed(message.into()));
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn resize_mode(&self) -> ResizeMode {
        self.resize_mode
    }

    pub fn seeks(&self) -> &[f64] {
        &self.seeks
    }

    /// Events queued but not yet pulled
    pub fn pending(&self) -> usize {
        self.events.len()
    }
}

impl MediaEngine for SimulatedEngine {
    fn seek(&mut self, seconds: f64) {
        self.seeks.push(seconds);
        self.position = seconds.clamp(0.0, self.duration);
    }

    fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn set_volume(&mut self, volume: f64) {
        self.volume = volume;
    }

    fn set_resize_mode(&mut self, mode: ResizeMode) {
        self.resize_mode = mode;
    }

    fn poll_event(&mut self) -> Option<MediaEvent> {
        self.events.pop_front()
    }
}
