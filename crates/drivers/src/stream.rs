//! Interval-driven stream appender.
//!
//! Appends one noisy sine sample per fixed period and scrolls the sink's
//! x-axis so the newest `window_back` samples stay in view. The host supplies
//! a monotonic clock reading to [`StreamDriver::advance`]; the driver owns its
//! next deadline, so pausing simply disarms it. A clock jump larger than
//! [`MAX_CATCH_UP`] periods is not replayed: the backlog is dropped and the
//! schedule restarts from `now`.

use crate::lifecycle::Lifecycle;
use crate::Driver;
use serde_json::{json, Value};
use std::time::Duration;
use surface_stream_core::config::DemoConfig;
use surface_stream_core::error::SurfaceError;
use surface_stream_core::prng::Xorshift64;
use surface_stream_core::sample::StreamPoint;
use surface_stream_core::sink::SeriesSink;

const WAVE_RATE: f64 = 0.1;
const WAVE_AMPLITUDE: f64 = 50.0;
const NOISE_AMPLITUDE: f64 = 30.0;

/// Most ticks a single [`StreamDriver::advance`] call will fire.
pub const MAX_CATCH_UP: usize = 50;

/// Real-time series driver over a [`SeriesSink`].
#[derive(Debug)]
pub struct StreamDriver<S: SeriesSink> {
    sink: S,
    lifecycle: Lifecycle,
    period: Duration,
    next_due: Option<Duration>,
    counter: u64,
    window_back: u64,
    window_ahead: u64,
    rng: Xorshift64,
    rejected: u64,
}

impl<S: SeriesSink> StreamDriver<S> {
    /// Creates an idle driver.
    ///
    /// Returns `SurfaceError::InvalidConfig` if `config` fails validation.
    pub fn new(sink: S, config: &DemoConfig) -> Result<Self, SurfaceError> {
        config.validate()?;
        Ok(Self {
            sink,
            lifecycle: Lifecycle::default(),
            period: Duration::from_millis(config.stream_period_ms),
            next_due: None,
            counter: 0,
            window_back: config.window_back,
            window_ahead: config.window_ahead,
            rng: Xorshift64::new(config.seed),
            rejected: 0,
        })
    }

    /// x value the next appended point will get; equals points appended since
    /// the last [`clear`](Self::clear).
    pub fn counter(&self) -> u64 {
        self.counter
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Ticks whose `add` the sink refused.
    pub fn rejected_ticks(&self) -> u64 {
        self.rejected
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Ends the driver's life and hands back its sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Fires every tick due at or before `now`, oldest first, and returns how
    /// many fired. Does nothing while paused.
    ///
    /// At most [`MAX_CATCH_UP`] ticks fire per call; periods missed beyond
    /// that are skipped and the next tick is due one period after `now`.
    pub fn advance(&mut self, now: Duration) -> usize {
        let mut fired = 0;
        while let Some(due) = self.next_due {
            if due > now {
                break;
            }
            if fired == MAX_CATCH_UP {
                let skipped = (now - due).as_nanos() / self.period.as_nanos() + 1;
                log::warn!("stream fell behind, skipping {skipped} periods");
                self.next_due = Some(now + self.period);
                break;
            }
            self.tick();
            self.next_due = Some(due + self.period);
            fired += 1;
        }
        fired
    }

    /// Appends one point. A refused `add` is logged and leaves the counter
    /// untouched, so the series stays gap-free.
    fn tick(&mut self) {
        if !self.lifecycle.is_running() {
            return;
        }
        let x = self.counter;
        let point = StreamPoint::new(x as f64, self.sample(x));
        if let Err(e) = self.sink.add(&[point]) {
            self.rejected += 1;
            log::warn!("stream point {x} dropped: {e}");
            return;
        }
        self.counter += 1;
        let min = self.counter as f64 - self.window_back as f64;
        let max = self.counter as f64 + self.window_ahead as f64;
        if let Err(e) = self.sink.set_visible_range(min, max) {
            log::warn!("stream axis update failed: {e}");
        }
    }

    /// Empties the series and restarts x at 0. The schedule is unaffected.
    pub fn clear(&mut self) -> Result<(), SurfaceError> {
        self.sink.clear()?;
        self.counter = 0;
        Ok(())
    }

    fn sample(&mut self, x: u64) -> f64 {
        (x as f64 * WAVE_RATE).sin() * WAVE_AMPLITUDE + self.rng.next_centered() * NOISE_AMPLITUDE
    }
}

impl<S: SeriesSink> Driver for StreamDriver<S> {
    /// Arms the first tick one period after `now`.
    fn play(&mut self, now: Duration) -> bool {
        if !self.lifecycle.play() {
            return false;
        }
        self.next_due = Some(now + self.period);
        log::info!("streaming started every {:?}", self.period);
        true
    }

    fn pause(&mut self) -> bool {
        if !self.lifecycle.pause() {
            return false;
        }
        self.next_due = None;
        log::info!("streaming paused after {} points", self.counter);
        true
    }

    fn is_running(&self) -> bool {
        self.lifecycle.is_running()
    }

    fn poll(&mut self, now: Duration) -> usize {
        self.advance(now)
    }

    fn params(&self) -> Value {
        json!({
            "stream_period_ms": self.period.as_millis() as u64,
            "window_back": self.window_back,
            "window_ahead": self.window_ahead,
            "counter": self.counter,
            "running": self.lifecycle.is_running(),
        })
    }

    fn param_schema(&self) -> Value {
        let config = DemoConfig::param_schema();
        json!({
            "stream_period_ms": config["stream_period_ms"],
            "window_back": config["window_back"],
            "window_ahead": config["window_ahead"],
            "seed": config["seed"],
        })
    }
}
