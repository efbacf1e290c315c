//! Frame-driven ring-wave animator.
//!
//! On a 3D-capable host each frame replaces the sink's points with the ring
//! wave at the current tick. On the heatmap fallback the static sinc map is
//! pushed once at construction and frames are no-ops.

use crate::animator::FrameOutcome;
use crate::lifecycle::Lifecycle;
use crate::Driver;
use serde_json::{json, Value};
use std::time::Duration;
use surface_stream_core::config::DemoConfig;
use surface_stream_core::error::SurfaceError;
use surface_stream_core::ring::{ring_wave, sinc_field, validate_frequency, FALLBACK_RESOLUTION};
use surface_stream_core::sink::SurfaceTarget;

#[derive(Debug)]
pub struct RingAnimator {
    lifecycle: Lifecycle,
    time: u64,
    frequency: f64,
    target: SurfaceTarget,
}

impl RingAnimator {
    /// Creates an idle animator. A heatmap target receives the sinc map now.
    pub fn new(frequency: f64, mut target: SurfaceTarget) -> Result<Self, SurfaceError> {
        let frequency = validate_frequency(frequency)?;
        if let SurfaceTarget::Heatmap(sink) = &mut target {
            sink.set_intensities(&sinc_field(FALLBACK_RESOLUTION)?)?;
        }
        Ok(Self {
            lifecycle: Lifecycle::default(),
            time: 0,
            frequency,
            target,
        })
    }

    pub fn from_config(config: &DemoConfig, target: SurfaceTarget) -> Result<Self, SurfaceError> {
        Self::new(config.frequency, target)
    }

    /// Takes effect on the next frame.
    pub fn set_frequency(&mut self, frequency: f64) -> Result<(), SurfaceError> {
        self.frequency = validate_frequency(frequency)?;
        Ok(())
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    pub fn time(&self) -> u64 {
        self.time
    }

    pub fn on_frame(&mut self) -> FrameOutcome {
        if !self.lifecycle.is_running() {
            return FrameOutcome::Idle;
        }
        let SurfaceTarget::Surface(sink) = &mut self.target else {
            return FrameOutcome::Idle;
        };
        let time = self.time;
        self.time = self.time.wrapping_add(1);
        match ring_wave(self.frequency, time).and_then(|points| sink.set_points(&points)) {
            Ok(()) => FrameOutcome::Rendered { time },
            Err(e) => {
                log::warn!("ring frame {time} dropped: {e}");
                FrameOutcome::Rejected { time }
            }
        }
    }

    pub fn dispose(self) -> SurfaceTarget {
        self.target
    }
}

impl Driver for RingAnimator {
    fn play(&mut self, _now: Duration) -> bool {
        self.lifecycle.play()
    }

    fn pause(&mut self) -> bool {
        self.lifecycle.pause()
    }

    fn is_running(&self) -> bool {
        self.lifecycle.is_running()
    }

    fn poll(&mut self, _now: Duration) -> usize {
        match self.on_frame() {
            FrameOutcome::Idle => 0,
            _ => 1,
        }
    }

    fn params(&self) -> Value {
        json!({
            "frequency": self.frequency,
            "time": self.time,
            "running": self.lifecycle.is_running(),
        })
    }

    fn param_schema(&self) -> Value {
        json!({ "frequency": DemoConfig::param_schema()["frequency"] })
    }
}
