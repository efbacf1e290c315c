//! Square scalar grid indexed `[column][row]`.
//!
//! A `GridField` stores `resolution * resolution` f64 values in column-major
//! layout, so each column is a contiguous slice. That matches the
//! column-ordered height maps surface sinks consume. Values are not clamped;
//! each pattern owns its own range.

use crate::error::SurfaceError;
use crate::grid::validate_resolution;

/// A square 2D scalar field in column-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct GridField {
    resolution: usize,
    data: Vec<f64>,
}

/// Per-cell surface heights (`y` values on the grid).
pub type HeightField = GridField;

/// Per-cell coloring scalar, computed alongside but independent of height.
pub type IntensityField = GridField;

impl GridField {
    /// Creates a zero-filled field.
    ///
    /// Returns `SurfaceError::InvalidResolution` if `resolution` is outside `2..=MAX_RESOLUTION`, or
    /// `SurfaceError::InvalidConfig` if the cell count overflows `usize`.
    pub fn new(resolution: usize) -> Result<Self, SurfaceError> {
        let len = cell_count(resolution)?;
        Ok(Self {
            resolution,
            data: vec![0.0; len],
        })
    }

    /// Creates a field from a column-major buffer, validating its length.
    pub fn from_data(resolution: usize, data: Vec<f64>) -> Result<Self, SurfaceError> {
        let expected = cell_count(resolution)?;
        if data.len() != expected {
            return Err(SurfaceError::DimensionMismatch {
                expected,
                got: data.len(),
            });
        }
        Ok(Self { resolution, data })
    }

    /// Cells per side.
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Read-only access to the column-major data.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Mutable access to the column-major data.
    pub fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Value at `(column, row)`.
    ///
    /// # Panics
    ///
    /// Panics if either index is `>= resolution`.
    pub fn get(&self, column: usize, row: usize) -> f64 {
        assert!(
            column < self.resolution && row < self.resolution,
            "cell ({column}, {row}) out of bounds for resolution {}",
            self.resolution
        );
        self.data[column * self.resolution + row]
    }

    /// The contiguous slice holding one column, or `None` past the edge.
    pub fn column(&self, column: usize) -> Option<&[f64]> {
        if column >= self.resolution {
            return None;
        }
        let start = column * self.resolution;
        Some(&self.data[start..start + self.resolution])
    }

    /// Iterates over columns in order.
    pub fn columns(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.data.chunks_exact(self.resolution)
    }

    /// Nested `[column][row]` copy, the shape height-map sinks expect.
    pub fn to_columns(&self) -> Vec<Vec<f64>> {
        self.columns().map(<[f64]>::to_vec).collect()
    }

    /// Iterates over all cells yielding `(column, row, value)` in column-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.data.iter().enumerate().map(|(i, &v)| {
            let column = i / self.resolution;
            let row = i % self.resolution;
            (column, row, v)
        })
    }

    /// Smallest and largest value in the field.
    pub fn min_max(&self) -> (f64, f64) {
        self.data
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }

    /// True if no cell is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|v| v.is_finite())
    }
}

pub(crate) fn cell_count(resolution: usize) -> Result<usize, SurfaceError> {
    validate_resolution(resolution)?;
    resolution
        .checked_mul(resolution)
        .ok_or_else(|| SurfaceError::InvalidConfig(format!("resolution {resolution} too large")))
}
