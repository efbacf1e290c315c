//! Ring-wave point cloud for the standalone 3D animation.
//!
//! A fixed 15x15 lattice centered near the origin whose heights follow a
//! damped radial wave. Unlike [`generate`](crate::generate) this has no
//! resolution or pattern; only the wave frequency is adjustable.

use crate::error::SurfaceError;
use crate::field::IntensityField;
use crate::generator::TIME_WRAP;
use crate::grid::grid_coordinate;
use crate::sample::SurfaceSample;

/// Lattice points per side.
pub const RING_SIZE: usize = 15;
/// World spacing between lattice points.
pub const RING_SPACING: f64 = 0.5;
/// Phase advance per tick.
pub const RING_PHASE_PER_TICK: f64 = 0.02;
/// Frequency slider bounds.
pub const MIN_FREQUENCY: f64 = 0.1;
pub const MAX_FREQUENCY: f64 = 5.0;

const DAMPING: f64 = 0.3;
const AMPLITUDE: f64 = 2.0;

/// Rejects frequencies outside the slider range.
pub fn validate_frequency(frequency: f64) -> Result<f64, SurfaceError> {
    if !(MIN_FREQUENCY..=MAX_FREQUENCY).contains(&frequency) {
        return Err(SurfaceError::InvalidConfig(format!(
            "frequency {frequency} outside [{MIN_FREQUENCY}, {MAX_FREQUENCY}]"
        )));
    }
    Ok(frequency)
}

/// Samples the ring wave at tick `time`.
pub fn ring_wave(frequency: f64, time: u64) -> Result<Vec<SurfaceSample>, SurfaceError> {
    let frequency = validate_frequency(frequency)?;
    let phase = (time % TIME_WRAP) as f64 * RING_PHASE_PER_TICK;
    let half = RING_SIZE as f64 / 2.0;

    let points = (0..RING_SIZE)
        .flat_map(|i| (0..RING_SIZE).map(move |j| (i, j)))
        .map(|(i, j)| {
            let x = (i as f64 - half) * RING_SPACING;
            let z = (j as f64 - half) * RING_SPACING;
            let r = x.hypot(z);
            let y = (r * frequency - phase).sin() * (-r * DAMPING).exp() * AMPLITUDE;
            SurfaceSample::new(x, y, z)
        })
        .collect();
    Ok(points)
}

/// Grid size of the static fallback heatmap.
pub const FALLBACK_RESOLUTION: usize = 25;

/// Static radial `sin(r) / r` map over `[-5, 5]`, shown in place of the ring
/// wave when 3D rendering is unavailable. The origin takes the limit value 1.
pub fn sinc_field(resolution: usize) -> Result<IntensityField, SurfaceError> {
    let mut field = IntensityField::new(resolution)?;
    let values = (0..resolution)
        .flat_map(|column| (0..resolution).map(move |row| (column, row)))
        .map(|(column, row)| {
            let r = grid_coordinate(column, resolution).hypot(grid_coordinate(row, resolution));
            if r == 0.0 {
                1.0
            } else {
                r.sin() / r
            }
        });
    for (cell, value) in field.data_mut().iter_mut().zip(values) {
        *cell = value;
    }
    Ok(field)
}
