//! Rendering sinks: the external consumers drivers push generated data into.
//!
//! Sinks are chosen once, at construction time, by [`negotiate`]. If the host
//! cannot draw 3D surfaces, the drivers push intensity fields into a
//! [`HeatmapSink`] instead.

use crate::error::SurfaceError;
use crate::field::{HeightField, IntensityField};
use crate::sample::{StreamPoint, SurfaceSample};
use serde::{Deserialize, Serialize};

/// Toggleable layer of a scatter-surface view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceLayer {
    Points,
    Surface,
}

/// 3D scatter + mesh consumer.
pub trait SurfaceSink {
    /// Replaces the scatter points.
    fn set_points(&mut self, points: &[SurfaceSample]) -> Result<(), SurfaceError>;

    /// Replaces the mesh height map.
    fn set_heights(&mut self, heights: &HeightField) -> Result<(), SurfaceError>;

    /// Replaces points and mesh together; drivers push every frame through
    /// this.
    ///
    /// The default pushes points, then heights, so a failing `set_heights`
    /// leaves the new points over the previous mesh. Sinks that can stage
    /// should override this to apply both or neither.
    fn set_frame(
        &mut self,
        points: &[SurfaceSample],
        heights: &HeightField,
    ) -> Result<(), SurfaceError> {
        self.set_points(points)?;
        self.set_heights(heights)
    }

    /// Shows or hides a layer. Sinks without layers ignore this.
    fn set_layer_visible(&mut self, _layer: SurfaceLayer, _visible: bool) -> Result<(), SurfaceError> {
        Ok(())
    }
}

/// Degraded 2D consumer used when 3D rendering is unavailable.
pub trait HeatmapSink {
    /// Replaces the displayed intensity grid.
    fn set_intensities(&mut self, intensities: &IntensityField) -> Result<(), SurfaceError>;
}

/// 2D time-series consumer.
pub trait SeriesSink {
    /// Appends one or more points.
    fn add(&mut self, points: &[StreamPoint]) -> Result<(), SurfaceError>;

    /// Removes every point.
    fn clear(&mut self) -> Result<(), SurfaceError>;

    /// Sets the visible x-axis window.
    fn set_visible_range(&mut self, min: f64, max: f64) -> Result<(), SurfaceError>;
}

/// What the host can render, checked once before any sink is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    pub surface_3d: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self { surface_3d: true }
    }
}

/// The sink a surface driver pushes into.
pub enum SurfaceTarget {
    Surface(Box<dyn SurfaceSink>),
    Heatmap(Box<dyn HeatmapSink>),
}

impl SurfaceTarget {
    /// True if this is the degraded heatmap target.
    pub fn is_fallback(&self) -> bool {
        matches!(self, SurfaceTarget::Heatmap(_))
    }
}

impl std::fmt::Debug for SurfaceTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SurfaceTarget::Surface(_) => f.write_str("SurfaceTarget::Surface"),
            SurfaceTarget::Heatmap(_) => f.write_str("SurfaceTarget::Heatmap"),
        }
    }
}

/// Builds the surface sink if the host supports it, otherwise the heatmap.
///
/// Only the selected constructor runs; its error is returned as is.
pub fn negotiate<S, H>(
    caps: Capabilities,
    make_surface: S,
    make_heatmap: H,
) -> Result<SurfaceTarget, SurfaceError>
where
    S: FnOnce() -> Result<Box<dyn SurfaceSink>, SurfaceError>,
    H: FnOnce() -> Result<Box<dyn HeatmapSink>, SurfaceError>,
{
    if caps.surface_3d {
        Ok(SurfaceTarget::Surface(make_surface()?))
    } else {
        log::info!("3D surface unavailable, falling back to heatmap");
        Ok(SurfaceTarget::Heatmap(make_heatmap()?))
    }
}
