//! Line-oriented sinks that print pushed data to a writer.

use serde_json::json;
use std::io::Write;
use surface_stream_core::error::SurfaceError;
use surface_stream_core::field::HeightField;
use surface_stream_core::sample::{StreamPoint, SurfaceSample};
use surface_stream_core::sink::{SeriesSink, SurfaceSink};

fn rejected(e: std::io::Error) -> SurfaceError {
    SurfaceError::SinkRejected(e.to_string())
}

/// Prints one JSON object per height-map push.
pub struct JsonLinesSurface<W: Write> {
    out: W,
    frame: u64,
    points: usize,
}

impl<W: Write> JsonLinesSurface<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            frame: 0,
            points: 0,
        }
    }

    fn write_frame(&mut self, points: usize, heights: &HeightField) -> Result<(), SurfaceError> {
        let (min, max) = heights.min_max();
        let line = json!({
            "frame": self.frame,
            "points": points,
            "resolution": heights.resolution(),
            "min": min,
            "max": max,
            "heights": heights.to_columns(),
        });
        writeln!(self.out, "{line}").map_err(rejected)?;
        self.frame += 1;
        Ok(())
    }
}

impl<W: Write> SurfaceSink for JsonLinesSurface<W> {
    fn set_points(&mut self, points: &[SurfaceSample]) -> Result<(), SurfaceError> {
        self.points = points.len();
        Ok(())
    }

    fn set_heights(&mut self, heights: &HeightField) -> Result<(), SurfaceError> {
        self.write_frame(self.points, heights)
    }

    /// One line per frame; a failed write leaves the recorded point count as is.
    fn set_frame(
        &mut self,
        points: &[SurfaceSample],
        heights: &HeightField,
    ) -> Result<(), SurfaceError> {
        self.write_frame(points.len(), heights)?;
        self.points = points.len();
        Ok(())
    }
}

/// Prints stream points and axis updates as text or JSON lines.
pub struct TextSeries<W: Write> {
    out: W,
    json: bool,
}

impl<W: Write> TextSeries<W> {
    pub fn new(out: W, json: bool) -> Self {
        Self { out, json }
    }
}

impl<W: Write> SeriesSink for TextSeries<W> {
    fn add(&mut self, points: &[StreamPoint]) -> Result<(), SurfaceError> {
        for p in points {
            if self.json {
                writeln!(self.out, "{}", json!({"x": p.x, "y": p.y})).map_err(rejected)?;
            } else {
                writeln!(self.out, "{}\t{:.4}", p.x, p.y).map_err(rejected)?;
            }
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<(), SurfaceError> {
        Ok(())
    }

    fn set_visible_range(&mut self, min: f64, max: f64) -> Result<(), SurfaceError> {
        log::trace!("visible range [{min}, {max}]");
        Ok(())
    }
}
