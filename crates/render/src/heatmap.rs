//! A [`HeatmapSink`] that writes every pushed field as a numbered PNG.

use std::path::{Path, PathBuf};
use surface_stream_core::error::SurfaceError;
use surface_stream_core::field::IntensityField;
use surface_stream_core::sink::HeatmapSink;

use crate::snapshot::write_png;

/// Writes `frame_00000.png`, `frame_00001.png`, ... into a directory.
#[derive(Debug)]
pub struct PngHeatmapSink {
    dir: PathBuf,
    frames: usize,
}

impl PngHeatmapSink {
    /// Creates the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, SurfaceError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| SurfaceError::Io(e.to_string()))?;
        Ok(Self { dir, frames: 0 })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Frames written so far.
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Path of frame `index`.
    pub fn frame_path(&self, index: usize) -> PathBuf {
        self.dir.join(format!("frame_{index:05}.png"))
    }
}

impl HeatmapSink for PngHeatmapSink {
    fn set_intensities(&mut self, intensities: &IntensityField) -> Result<(), SurfaceError> {
        let path = self.frame_path(self.frames);
        write_png(intensities, &path).map_err(|e| SurfaceError::SinkRejected(e.to_string()))?;
        log::debug!("wrote {}", path.display());
        self.frames += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use surface_stream_core::generator::generate;
    use surface_stream_core::pattern::Pattern;

    #[test]
    fn each_push_writes_next_frame() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = PngHeatmapSink::new(dir.path().join("frames")).unwrap();
        for t in 0..3 {
            let frame = generate(Pattern::Wave, 8, t).unwrap();
            sink.set_intensities(&frame.intensities).unwrap();
        }
        assert_eq!(sink.frames(), 3);
        for i in 0..3 {
            assert!(sink.frame_path(i).is_file(), "frame {i} missing");
        }
        assert!(!sink.frame_path(3).exists());
    }
}
