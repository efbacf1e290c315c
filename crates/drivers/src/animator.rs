//! Frame-driven scatter-surface animator.
//!
//! Each frame regenerates the selected pattern at the current tick and
//! replaces the sink's points and height map (or, on the heatmap fallback,
//! its intensity grid). Pattern and resolution changes are picked up by the
//! next frame; a pattern change also rewinds time to 0.

use crate::lifecycle::{Lifecycle, RunState};
use crate::Driver;
use serde_json::{json, Value};
use std::time::Duration;
use surface_stream_core::config::DemoConfig;
use surface_stream_core::error::SurfaceError;
use surface_stream_core::generator::{generate, SurfaceFrame};
use surface_stream_core::grid::validate_resolution;
use surface_stream_core::pattern::Pattern;
use surface_stream_core::sink::{SurfaceLayer, SurfaceTarget};

/// Log a progress line every this many frames.
const LOG_EVERY: u64 = 30;

/// Mutable animation parameters, owned by one [`SurfaceAnimator`].
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationState {
    pub run: RunState,
    /// Tick of the next frame; reset to 0 on pattern change.
    pub time: u64,
    pub pattern: Pattern,
    pub resolution: usize,
}

impl AnimationState {
    pub fn is_running(&self) -> bool {
        self.run == RunState::Running
    }
}

/// Result of one frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The animator is paused; nothing was generated.
    Idle,
    /// The frame for `time` reached the sink.
    Rendered { time: u64 },
    /// The sink refused the frame for `time`; the loop keeps going.
    Rejected { time: u64 },
}

/// Animated scatter-surface driver.
#[derive(Debug)]
pub struct SurfaceAnimator {
    lifecycle: Lifecycle,
    time: u64,
    pattern: Pattern,
    resolution: usize,
    target: SurfaceTarget,
    show_points: bool,
    show_surface: bool,
    rejected: u64,
}

impl SurfaceAnimator {
    /// Creates an idle animator at time 0.
    ///
    /// Returns `SurfaceError::InvalidResolution` if `resolution` is outside `2..=MAX_RESOLUTION`.
    pub fn new(
        pattern: Pattern,
        resolution: usize,
        target: SurfaceTarget,
    ) -> Result<Self, SurfaceError> {
        Ok(Self {
            lifecycle: Lifecycle::default(),
            time: 0,
            pattern,
            resolution: validate_resolution(resolution)?,
            target,
            show_points: true,
            show_surface: true,
            rejected: 0,
        })
    }

    pub fn from_config(config: &DemoConfig, target: SurfaceTarget) -> Result<Self, SurfaceError> {
        Self::new(config.pattern, config.resolution, target)
    }

    /// Snapshot of the current parameters.
    pub fn state(&self) -> AnimationState {
        AnimationState {
            run: self.lifecycle.state(),
            time: self.time,
            pattern: self.pattern,
            resolution: self.resolution,
        }
    }

    /// Selects a pattern and rewinds time so the next frame is its `time = 0` frame.
    pub fn set_pattern(&mut self, pattern: Pattern) {
        self.pattern = pattern;
        self.time = 0;
    }

    /// Parses and selects a pattern by name. Unknown names leave state untouched.
    pub fn set_pattern_name(&mut self, name: &str) -> Result<(), SurfaceError> {
        let pattern = name.parse()?;
        self.set_pattern(pattern);
        Ok(())
    }

    /// Changes the grid resolution without touching time.
    pub fn set_resolution(&mut self, resolution: usize) -> Result<(), SurfaceError> {
        self.resolution = validate_resolution(resolution)?;
        Ok(())
    }

    /// Shows or hides a layer and forwards the change to a surface sink.
    pub fn set_layer_visible(
        &mut self,
        layer: SurfaceLayer,
        visible: bool,
    ) -> Result<(), SurfaceError> {
        match layer {
            SurfaceLayer::Points => self.show_points = visible,
            SurfaceLayer::Surface => self.show_surface = visible,
        }
        match &mut self.target {
            SurfaceTarget::Surface(sink) => sink.set_layer_visible(layer, visible),
            SurfaceTarget::Heatmap(_) => Ok(()),
        }
    }

    pub fn is_layer_visible(&self, layer: SurfaceLayer) -> bool {
        match layer {
            SurfaceLayer::Points => self.show_points,
            SurfaceLayer::Surface => self.show_surface,
        }
    }

    /// Frames the sink has refused so far.
    pub fn rejected_frames(&self) -> u64 {
        self.rejected
    }

    pub fn target(&self) -> &SurfaceTarget {
        &self.target
    }

    /// Frame callback. While running, renders the frame for the current tick
    /// and advances time by one; while idle, does nothing.
    pub fn on_frame(&mut self) -> FrameOutcome {
        if !self.lifecycle.is_running() {
            return FrameOutcome::Idle;
        }
        let time = self.time;
        let outcome = self.render(time);
        self.time = self.time.wrapping_add(1);
        if self.time % LOG_EVERY == 0 {
            log::debug!("surface frame {} pattern {}", self.time, self.pattern);
        }
        outcome
    }

    /// Re-pushes immediately without advancing time: the current tick while
    /// running, tick 0 while idle.
    pub fn refresh(&mut self) -> FrameOutcome {
        let time = if self.lifecycle.is_running() {
            self.time
        } else {
            0
        };
        self.render(time)
    }

    /// Ends the animator's life and hands back its sink.
    pub fn dispose(self) -> SurfaceTarget {
        self.target
    }

    fn render(&mut self, time: u64) -> FrameOutcome {
        let pushed = generate(self.pattern, self.resolution, time)
            .and_then(|frame| push_frame(&mut self.target, &frame));
        match pushed {
            Ok(()) => FrameOutcome::Rendered { time },
            Err(e) => {
                self.rejected += 1;
                log::warn!("surface frame {time} dropped: {e}");
                FrameOutcome::Rejected { time }
            }
        }
    }
}

fn push_frame(target: &mut SurfaceTarget, frame: &SurfaceFrame) -> Result<(), SurfaceError> {
    match target {
        SurfaceTarget::Surface(sink) => sink.set_frame(&frame.points, &frame.heights),
        SurfaceTarget::Heatmap(sink) => sink.set_intensities(&frame.intensities),
    }
}

impl Driver for SurfaceAnimator {
    fn play(&mut self, _now: Duration) -> bool {
        let started = self.lifecycle.play();
        if started {
            log::info!("surface animation started ({})", self.pattern);
        }
        started
    }

    fn pause(&mut self) -> bool {
        let stopped = self.lifecycle.pause();
        if stopped {
            log::info!("surface animation paused at frame {}", self.time);
        }
        stopped
    }

    fn is_running(&self) -> bool {
        self.lifecycle.is_running()
    }

    fn poll(&mut self, _now: Duration) -> usize {
        match self.on_frame() {
            FrameOutcome::Idle => 0,
            FrameOutcome::Rendered { .. } | FrameOutcome::Rejected { .. } => 1,
        }
    }

    fn params(&self) -> Value {
        json!({
            "pattern": self.pattern.name(),
            "resolution": self.resolution,
            "time": self.time,
            "running": self.lifecycle.is_running(),
            "show_points": self.show_points,
            "show_surface": self.show_surface,
        })
    }

    fn param_schema(&self) -> Value {
        let config = DemoConfig::param_schema();
        json!({
            "pattern": config["pattern"],
            "resolution": config["resolution"],
        })
    }
}
