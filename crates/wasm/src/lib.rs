#![deny(unsafe_code)]
//! WASM bindings: command-style controllers a browser page calls from its UI
//! handlers and `requestAnimationFrame`/timer callbacks.
//!
//! Sinks here are in-memory buffers; the page reads them after each tick and
//! hands the arrays to whatever chart widget it uses.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use surface_stream_core::config::DemoConfig;
use surface_stream_core::error::SurfaceError;
use surface_stream_core::field::{HeightField, IntensityField};
use surface_stream_core::sample::{StreamPoint, SurfaceSample};
use surface_stream_core::sink::{
    negotiate, Capabilities, HeatmapSink, SeriesSink, SurfaceLayer, SurfaceSink,
};
use surface_stream_drivers::{Driver, FrameOutcome, StreamDriver, SurfaceAnimator};
use wasm_bindgen::prelude::*;

#[derive(Debug, Default)]
struct FrameBuffer {
    points: Vec<f64>,
    field: Vec<f64>,
    resolution: usize,
}

impl FrameBuffer {
    fn store_field(&mut self, field: &HeightField) {
        self.field.clear();
        self.field.extend_from_slice(field.data());
        self.resolution = field.resolution();
    }
}

#[derive(Clone, Default)]
struct SharedBuffer(Rc<RefCell<FrameBuffer>>);

impl SurfaceSink for SharedBuffer {
    fn set_points(&mut self, points: &[SurfaceSample]) -> Result<(), SurfaceError> {
        let mut buf = self.0.borrow_mut();
        buf.points.clear();
        buf.points
            .extend(points.iter().flat_map(|p| [p.x, p.y, p.z]));
        Ok(())
    }

    fn set_heights(&mut self, heights: &HeightField) -> Result<(), SurfaceError> {
        self.0.borrow_mut().store_field(heights);
        Ok(())
    }
}

impl HeatmapSink for SharedBuffer {
    fn set_intensities(&mut self, intensities: &IntensityField) -> Result<(), SurfaceError> {
        self.0.borrow_mut().store_field(intensities);
        Ok(())
    }
}

fn js_err(e: SurfaceError) -> JsError {
    JsError::new(&e.to_string())
}

/// Animated scatter-surface controller.
#[wasm_bindgen]
pub struct ScatterSurface {
    animator: SurfaceAnimator,
    buffer: SharedBuffer,
}

#[wasm_bindgen]
impl ScatterSurface {
    /// `webgl` reports whether the host can draw 3D; without it frames carry
    /// intensities for a 2D heatmap instead of heights.
    #[wasm_bindgen(constructor)]
    pub fn new(pattern: &str, resolution: usize, webgl: bool) -> Result<ScatterSurface, JsError> {
        let buffer = SharedBuffer::default();
        let (surface, heatmap) = (buffer.clone(), buffer.clone());
        let target = negotiate(
            Capabilities { surface_3d: webgl },
            move || Ok(Box::new(surface) as Box<dyn SurfaceSink>),
            move || Ok(Box::new(heatmap) as Box<dyn HeatmapSink>),
        )
        .map_err(js_err)?;
        let config = DemoConfig {
            pattern: pattern.parse().map_err(js_err)?,
            resolution,
            ..DemoConfig::default()
        };
        let mut animator = SurfaceAnimator::from_config(&config, target).map_err(js_err)?;
        animator.refresh();
        Ok(Self { animator, buffer })
    }

    #[wasm_bindgen(js_name = setPattern)]
    pub fn set_pattern(&mut self, name: &str) -> Result<(), JsError> {
        self.animator.set_pattern_name(name).map_err(js_err)
    }

    #[wasm_bindgen(js_name = setResolution)]
    pub fn set_resolution(&mut self, resolution: usize) -> Result<(), JsError> {
        self.animator.set_resolution(resolution).map_err(js_err)
    }

    #[wasm_bindgen(js_name = showPoints)]
    pub fn show_points(&mut self, visible: bool) -> Result<(), JsError> {
        self.animator
            .set_layer_visible(SurfaceLayer::Points, visible)
            .map_err(js_err)
    }

    #[wasm_bindgen(js_name = showSurface)]
    pub fn show_surface(&mut self, visible: bool) -> Result<(), JsError> {
        self.animator
            .set_layer_visible(SurfaceLayer::Surface, visible)
            .map_err(js_err)
    }

    pub fn play(&mut self) -> bool {
        self.animator.play(Duration::ZERO)
    }

    pub fn pause(&mut self) -> bool {
        self.animator.pause()
    }

    /// Frame callback; returns true if new data is in the buffers.
    pub fn frame(&mut self) -> bool {
        matches!(self.animator.on_frame(), FrameOutcome::Rendered { .. })
    }

    /// Re-renders now; used after parameter changes while paused.
    pub fn refresh(&mut self) -> bool {
        matches!(self.animator.refresh(), FrameOutcome::Rendered { .. })
    }

    /// Flattened `[x, y, z, ...]` scatter points.
    pub fn points(&self) -> Vec<f64> {
        self.buffer.0.borrow().points.clone()
    }

    /// Column-major heights (or intensities on the heatmap fallback).
    pub fn field(&self) -> Vec<f64> {
        self.buffer.0.borrow().field.clone()
    }

    /// Resolution of the data currently in [`field`](Self::field).
    #[wasm_bindgen(js_name = fieldResolution)]
    pub fn field_resolution(&self) -> usize {
        self.buffer.0.borrow().resolution
    }

    pub fn time(&self) -> u64 {
        self.animator.state().time
    }
}

/// Holds only the points the page has not drained yet.
#[derive(Debug, Default)]
struct SeriesBuffer {
    pending: Vec<StreamPoint>,
    range: (f64, f64),
}

impl SeriesSink for SeriesBuffer {
    fn add(&mut self, points: &[StreamPoint]) -> Result<(), SurfaceError> {
        self.pending.extend_from_slice(points);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), SurfaceError> {
        self.pending.clear();
        Ok(())
    }

    fn set_visible_range(&mut self, min: f64, max: f64) -> Result<(), SurfaceError> {
        self.range = (min, max);
        Ok(())
    }
}

/// Page clock reading to a `Duration`. Negative, NaN, and infinite readings
/// clamp to zero.
fn millis(ms: f64) -> Duration {
    if !ms.is_finite() || ms <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(ms / 1000.0).unwrap_or(Duration::ZERO)
}

/// Real-time stream controller driven by the page's clock in milliseconds.
#[wasm_bindgen]
pub struct Stream {
    driver: StreamDriver<SeriesBuffer>,
}

#[wasm_bindgen]
impl Stream {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64, period_ms: u64) -> Result<Stream, JsError> {
        let config = DemoConfig {
            seed,
            stream_period_ms: period_ms,
            ..DemoConfig::default()
        };
        let driver = StreamDriver::new(SeriesBuffer::default(), &config).map_err(js_err)?;
        Ok(Self { driver })
    }

    pub fn play(&mut self, now_ms: f64) -> bool {
        self.driver.play(millis(now_ms))
    }

    pub fn pause(&mut self) -> bool {
        self.driver.pause()
    }

    /// Timer callback; returns the number of points appended.
    pub fn advance(&mut self, now_ms: f64) -> usize {
        self.driver.advance(millis(now_ms))
    }

    /// Flattened `[x, y, ...]` points appended since the last drain.
    pub fn drain(&mut self) -> Vec<f64> {
        std::mem::take(&mut self.driver.sink_mut().pending)
            .into_iter()
            .flat_map(|p| [p.x, p.y])
            .collect()
    }

    #[wasm_bindgen(js_name = rangeMin)]
    pub fn range_min(&self) -> f64 {
        self.driver.sink().range.0
    }

    #[wasm_bindgen(js_name = rangeMax)]
    pub fn range_max(&self) -> f64 {
        self.driver.sink().range.1
    }

    /// Drops undrained points and restarts x at 0.
    pub fn clear(&mut self) -> Result<(), JsError> {
        self.driver.clear().map_err(js_err)
    }
}

// Only success paths are exercised natively: building a `JsError` needs a
// JS host.
#[cfg(test)]
mod tests {
    use super::*;
    use surface_stream_core::generator::generate;
    use surface_stream_core::pattern::Pattern;

    fn surface(pattern: &str, resolution: usize, webgl: bool) -> ScatterSurface {
        match ScatterSurface::new(pattern, resolution, webgl) {
            Ok(s) => s,
            Err(_) => panic!("could not build {pattern} at {resolution}"),
        }
    }

    fn stream() -> Stream {
        match Stream::new(42, 100) {
            Ok(s) => s,
            Err(_) => panic!("could not build stream"),
        }
    }

    fn xs(flat: &[f64]) -> Vec<f64> {
        flat.chunks(2).map(|p| p[0]).collect()
    }

    #[test]
    fn new_surface_shows_time_zero_frame() {
        let s = surface("wave", 4, true);
        let expected = generate(Pattern::Wave, 4, 0).unwrap();
        assert_eq!(s.field(), expected.heights.data());
        assert_eq!(s.points().len(), 16 * 3);
        assert_eq!(s.field_resolution(), 4);
        assert_eq!(s.time(), 0);
    }

    #[test]
    fn frames_only_render_while_playing() {
        let mut s = surface("ripple", 5, true);
        assert!(!s.frame());
        assert!(s.play());
        assert!(s.frame());
        assert!(s.frame());
        assert_eq!(s.time(), 2);
        assert!(s.pause());
        assert!(!s.frame());
    }

    #[test]
    fn without_webgl_field_carries_intensities() {
        let mut s = surface("saddle", 5, false);
        assert!(s.points().is_empty());
        assert!(s.set_resolution(7).is_ok());
        assert!(s.refresh());
        let expected = generate(Pattern::Saddle, 7, 0).unwrap();
        assert_eq!(s.field(), expected.intensities.data());
        assert_eq!(s.field_resolution(), 7);
    }

    #[test]
    fn drain_hands_out_each_point_once() {
        let mut st = stream();
        st.play(0.0);
        assert_eq!(st.advance(300.0), 3);
        assert_eq!(xs(&st.drain()), vec![0.0, 1.0, 2.0]);
        assert!(st.drain().is_empty());
        st.advance(400.0);
        assert_eq!(xs(&st.drain()), vec![3.0]);
        assert_eq!((st.range_min(), st.range_max()), (4.0 - 100.0, 4.0 + 10.0));
    }

    #[test]
    fn clear_drops_undrained_points_and_restarts_x() {
        let mut st = stream();
        st.play(0.0);
        st.advance(200.0);
        st.drain();
        st.advance(500.0);
        assert!(st.clear().is_ok());
        assert!(st.drain().is_empty());
        st.advance(700.0);
        assert_eq!(xs(&st.drain()), vec![0.0, 1.0]);
    }

    #[test]
    fn paused_stream_appends_nothing() {
        let mut st = stream();
        st.play(0.0);
        st.advance(100.0);
        assert!(st.pause());
        assert_eq!(st.advance(10_000.0), 0);
        assert_eq!(xs(&st.drain()), vec![0.0]);
    }

    #[test]
    fn odd_clock_readings_clamp_to_zero() {
        assert_eq!(millis(f64::NAN), Duration::ZERO);
        assert_eq!(millis(f64::INFINITY), Duration::ZERO);
        assert_eq!(millis(-5.0), Duration::ZERO);
        assert_eq!(millis(1500.0), Duration::from_millis(1500));
    }
}
