//! Mapping from grid cells to the fixed `[-5, 5] x [-5, 5]` world domain.

use crate::error::SurfaceError;

/// Smallest usable resolution; spacing divides by `resolution - 1`.
pub const MIN_RESOLUTION: usize = 2;
/// Largest accepted resolution. A frame costs O(resolution²) and must fit
/// well inside one display refresh.
pub const MAX_RESOLUTION: usize = 1024;
/// Lower edge of the world domain on both axes.
pub const DOMAIN_MIN: f64 = -5.0;
/// Upper edge of the world domain on both axes.
pub const DOMAIN_MAX: f64 = 5.0;

const DOMAIN_SPAN: f64 = DOMAIN_MAX - DOMAIN_MIN;

/// Rejects resolutions outside `MIN_RESOLUTION..=MAX_RESOLUTION`.
pub fn validate_resolution(resolution: usize) -> Result<usize, SurfaceError> {
    if !(MIN_RESOLUTION..=MAX_RESOLUTION).contains(&resolution) {
        return Err(SurfaceError::InvalidResolution(resolution.to_string()));
    }
    Ok(resolution)
}

/// World coordinate of grid index `index` at the given resolution.
///
/// Index 0 maps to exactly -5 and index `resolution - 1` to exactly 5.
/// Callers must pass a validated resolution.
pub fn grid_coordinate(index: usize, resolution: usize) -> f64 {
    DOMAIN_MIN + (index as f64 / (resolution - 1) as f64) * DOMAIN_SPAN
}

/// Distance between neighbouring cells, used by surface sinks for mesh spacing.
pub fn grid_step(resolution: usize) -> Result<f64, SurfaceError> {
    let resolution = validate_resolution(resolution)?;
    Ok(DOMAIN_SPAN / (resolution - 1) as f64)
}
