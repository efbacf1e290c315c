#![deny(unsafe_code)]
//! Drivers: the control loops that advance time, regenerate data, and push it
//! into rendering sinks.
//!
//! Every driver is host-paced. The host calls [`Driver::poll`] from its frame
//! callback or timer; nothing here spawns threads or sleeps. Only one tick of
//! a driver is ever in flight because `poll` takes `&mut self` and completes
//! the tick (generate + push) before returning.

pub mod animator;
pub mod lifecycle;
pub mod ring;
pub mod stream;

#[cfg(test)]
mod testing;

pub use animator::{AnimationState, FrameOutcome, SurfaceAnimator};
pub use lifecycle::{Lifecycle, RunState};
pub use ring::RingAnimator;
pub use stream::StreamDriver;

use serde_json::Value;
use std::time::Duration;

/// Common play/pause surface shared by every driver.
///
/// Object safe, so a host can hold `Vec<Box<dyn Driver>>` and poll them all
/// from one callback.
pub trait Driver {
    /// Starts ticking. Returns `false` if already running.
    fn play(&mut self, now: Duration) -> bool;

    /// Stops ticking. Returns `false` if already idle. No tick fires after
    /// this returns until the next `play`.
    fn pause(&mut self) -> bool;

    fn is_running(&self) -> bool;

    /// Runs whatever ticks are due at `now` and returns how many fired.
    fn poll(&mut self, now: Duration) -> usize;

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Schema describing the parameters in [`params`](Driver::params).
    fn param_schema(&self) -> Value;
}
