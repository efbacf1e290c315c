//! Recording sinks shared by the driver tests.

use std::cell::RefCell;
use std::rc::Rc;
use surface_stream_core::error::SurfaceError;
use surface_stream_core::field::{HeightField, IntensityField};
use surface_stream_core::sample::{StreamPoint, SurfaceSample};
use surface_stream_core::sink::{HeatmapSink, SeriesSink, SurfaceLayer, SurfaceSink};

#[derive(Debug, Default)]
pub struct Recorded {
    pub points: Vec<SurfaceSample>,
    pub heights: Option<HeightField>,
    pub height_pushes: usize,
    pub intensities: Option<IntensityField>,
    pub intensity_pushes: usize,
    pub visibility: Vec<(SurfaceLayer, bool)>,
    /// Number of upcoming pushes to refuse.
    pub reject_next: usize,
    /// Number of upcoming height-map pushes to refuse.
    pub reject_heights_next: usize,
}

impl Recorded {
    fn take_rejection(&mut self) -> Result<(), SurfaceError> {
        if self.reject_next > 0 {
            self.reject_next -= 1;
            return Err(SurfaceError::SinkRejected("test rejection".into()));
        }
        Ok(())
    }

    fn take_height_rejection(&mut self) -> Result<(), SurfaceError> {
        if self.reject_heights_next > 0 {
            self.reject_heights_next -= 1;
            return Err(SurfaceError::SinkRejected("test mesh rejection".into()));
        }
        Ok(())
    }
}

/// Surface sink that stages a whole frame: a refused frame changes nothing.
pub struct RecordingSurface(Rc<RefCell<Recorded>>);

impl RecordingSurface {
    pub fn new() -> (Self, Rc<RefCell<Recorded>>) {
        let log = Rc::new(RefCell::new(Recorded::default()));
        (Self(Rc::clone(&log)), log)
    }
}

impl SurfaceSink for RecordingSurface {
    fn set_points(&mut self, points: &[SurfaceSample]) -> Result<(), SurfaceError> {
        let mut log = self.0.borrow_mut();
        log.take_rejection()?;
        log.points = points.to_vec();
        Ok(())
    }

    fn set_heights(&mut self, heights: &HeightField) -> Result<(), SurfaceError> {
        let mut log = self.0.borrow_mut();
        log.take_height_rejection()?;
        log.heights = Some(heights.clone());
        log.height_pushes += 1;
        Ok(())
    }

    fn set_frame(
        &mut self,
        points: &[SurfaceSample],
        heights: &HeightField,
    ) -> Result<(), SurfaceError> {
        let mut log = self.0.borrow_mut();
        log.take_rejection()?;
        log.take_height_rejection()?;
        log.points = points.to_vec();
        log.heights = Some(heights.clone());
        log.height_pushes += 1;
        Ok(())
    }

    fn set_layer_visible(&mut self, layer: SurfaceLayer, visible: bool) -> Result<(), SurfaceError> {
        self.0.borrow_mut().visibility.push((layer, visible));
        Ok(())
    }
}

pub struct RecordingHeatmap(Rc<RefCell<Recorded>>);

impl RecordingHeatmap {
    pub fn new() -> (Self, Rc<RefCell<Recorded>>) {
        let log = Rc::new(RefCell::new(Recorded::default()));
        (Self(Rc::clone(&log)), log)
    }
}

impl HeatmapSink for RecordingHeatmap {
    fn set_intensities(&mut self, intensities: &IntensityField) -> Result<(), SurfaceError> {
        let mut log = self.0.borrow_mut();
        log.take_rejection()?;
        log.intensities = Some(intensities.clone());
        log.intensity_pushes += 1;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct RecordingSeries {
    pub points: Vec<StreamPoint>,
    pub range: Option<(f64, f64)>,
    pub clears: usize,
    pub reject_next: usize,
}

impl SeriesSink for RecordingSeries {
    fn add(&mut self, points: &[StreamPoint]) -> Result<(), SurfaceError> {
        if self.reject_next > 0 {
            self.reject_next -= 1;
            return Err(SurfaceError::SinkRejected("test rejection".into()));
        }
        self.points.extend_from_slice(points);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), SurfaceError> {
        self.points.clear();
        self.clears += 1;
        Ok(())
    }

    fn set_visible_range(&mut self, min: f64, max: f64) -> Result<(), SurfaceError> {
        self.range = Some((min, max));
        Ok(())
    }
}
