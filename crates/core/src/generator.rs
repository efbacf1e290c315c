//! Procedural surface generator.
//!
//! [`generate`] is a pure function of `(pattern, resolution, time)`: it samples
//! the selected pattern on a `resolution x resolution` grid spanning
//! `[-5, 5]` on both axes and returns the scatter points, the height field
//! for the surface mesh, and a parallel intensity field for coloring.

use crate::error::SurfaceError;
use crate::field::{cell_count, GridField, HeightField, IntensityField};
use crate::grid::grid_coordinate;
use crate::pattern::Pattern;
use crate::sample::SurfaceSample;
use glam::{DMat2, DVec2};

/// Phase advance per tick.
pub const PHASE_PER_TICK: f64 = 0.1;
/// Ticks are reduced modulo this before becoming a phase, keeping trig
/// arguments bounded for indefinitely running animations.
pub const TIME_WRAP: u64 = 1 << 32;
/// Lower bound of the `dataset` pattern.
pub const DATASET_MIN: f64 = 0.005;
/// Upper bound of the `dataset` pattern.
pub const DATASET_MAX: f64 = 0.045;

const DATASET_CENTER: f64 = 0.025;
const DATASET_SCALE: f64 = 0.008;
const POINT_JITTER: f64 = 0.02;

/// One regenerated surface: scatter points plus the mesh and color fields.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceFrame {
    pub resolution: usize,
    /// Column-ordered points, `resolution * resolution` of them.
    pub points: Vec<SurfaceSample>,
    pub heights: HeightField,
    pub intensities: IntensityField,
}

/// Height and intensity for a single cell.
#[derive(Debug, Clone, Copy)]
struct Cell {
    height: f64,
    intensity: f64,
}

impl Cell {
    fn same(value: f64) -> Self {
        Self {
            height: value,
            intensity: value,
        }
    }
}

/// Phase for a tick count.
pub fn phase_at(time: u64) -> f64 {
    (time % TIME_WRAP) as f64 * PHASE_PER_TICK
}

/// Samples `pattern` on the grid at tick `time`.
///
/// Returns `SurfaceError::InvalidResolution` if `resolution` is outside `2..=MAX_RESOLUTION`.
pub fn generate(
    pattern: Pattern,
    resolution: usize,
    time: u64,
) -> Result<SurfaceFrame, SurfaceError> {
    let len = cell_count(resolution)?;
    let phase = phase_at(time);

    let mut points = Vec::with_capacity(len);
    let mut heights = Vec::with_capacity(len);
    let mut intensities = Vec::with_capacity(len);

    for column in 0..resolution {
        let x = grid_coordinate(column, resolution);
        for row in 0..resolution {
            let z = grid_coordinate(row, resolution);
            let cell = sample(pattern, x, z, phase);
            points.push(SurfaceSample::new(x, cell.height + point_jitter(x, z), z));
            heights.push(cell.height);
            intensities.push(cell.intensity);
        }
    }

    Ok(SurfaceFrame {
        resolution,
        points,
        heights: GridField::from_data(resolution, heights)?,
        intensities: GridField::from_data(resolution, intensities)?,
    })
}

/// Fixed positional offset applied to scatter points only, so points sit
/// slightly off the mesh.
pub fn point_jitter(x: f64, z: f64) -> f64 {
    (x * 10.0 + z * 10.0).sin() * POINT_JITTER
}

fn sample(pattern: Pattern, x: f64, z: f64, phase: f64) -> Cell {
    match pattern {
        Pattern::Dataset => Cell::same(dataset(x, z, phase)),
        Pattern::Wave => Cell::same((x - phase).sin() * (z - phase).cos()),
        Pattern::Gaussian => Cell::same(gaussian(x, z, phase)),
        Pattern::Saddle => {
            let height = saddle(x, z, phase);
            Cell {
                height,
                intensity: height.abs(),
            }
        }
        Pattern::Ripple => {
            let r = x.hypot(z);
            Cell::same((r * 2.0 - phase * 2.0).sin() / (r + 1.0) * 3.0)
        }
    }
}

fn bump(dx: f64, dz: f64, spread: f64) -> f64 {
    (-(dx * dx + dz * dz) / spread).exp()
}

fn dataset(x: f64, z: f64, phase: f64) -> f64 {
    let wave1 = (x * 0.7 + phase * 0.5).sin() * (z * 0.5 - phase * 0.3).cos();
    let wave2 = (x * 1.3 - z * 0.8 + phase * 0.7).sin() * 0.3;
    let wave3 = (x * 0.4 + z * 0.6 - phase * 0.4).cos() * 0.4;

    let drift = phase * 0.3;
    let peak1 = bump(x - 2.0 - drift.sin(), z - 1.0 - drift.cos(), 3.0) * 0.8;
    let peak2 = bump(x + 1.0, z + 2.0, 4.0) * 0.6;
    let peak3 = bump(x - 3.5, z + 3.5, 2.0) * 0.5;

    let ridge1 = (-(x + z * 0.5 - (phase * 0.2).sin() * 2.0).powi(2) / 5.0).exp() * 0.7;
    let ridge2 = (-(x * 0.3 - z + 1.0).powi(2) / 4.0).exp() * 0.5;

    let gradient = (x + z) * 0.008 + (phase * 0.1).sin() * 0.005;

    let combined = wave1 * 0.2
        + wave2
        + wave3 * 0.15
        + peak1
        + peak2
        + peak3
        + ridge1
        + ridge2
        + gradient;

    let mut y = DATASET_CENTER + combined * DATASET_SCALE;
    y += (x * 8.0 + z * 7.0).sin() * 0.001;
    y += (x * 12.0 - z * 11.0 + phase * 2.0).cos() * 0.0005;
    y.clamp(DATASET_MIN, DATASET_MAX)
}

fn gaussian(x: f64, z: f64, phase: f64) -> f64 {
    let offset1 = phase.sin() * 2.0;
    let offset2 = phase.cos() * 2.0;
    bump(x - offset1, z - offset1, 8.0)
        + 0.5 * bump(x - 2.0 - offset2, z - 2.0 + offset2, 4.0)
        + 0.7 * bump(x + 2.0 + offset1, z + 1.0 - offset1, 6.0)
}

fn saddle(x: f64, z: f64, phase: f64) -> f64 {
    let rotated = DMat2::from_angle(phase) * DVec2::new(x, z);
    (rotated.x * rotated.x - rotated.y * rotated.y) / 25.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::MAX_RESOLUTION;
    use approx::assert_abs_diff_eq;

    #[test]
    fn wave_corner_matches_closed_form() {
        let frame = generate(Pattern::Wave, 4, 0).unwrap();
        let expected = (-5.0_f64).sin() * (-5.0_f64).cos();
        assert_abs_diff_eq!(frame.heights.get(0, 0), expected, epsilon = 1e-12);
        assert_abs_diff_eq!(frame.heights.get(0, 0), 0.272, epsilon = 5e-3);
    }

    #[test]
    fn saddle_at_time_zero_is_unrotated() {
        let frame = generate(Pattern::Saddle, 10, 0).unwrap();
        for (column, row, y) in frame.heights.iter() {
            let x = grid_coordinate(column, 10);
            let z = grid_coordinate(row, 10);
            assert_abs_diff_eq!(y, (x * x - z * z) / 25.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn saddle_intensity_is_absolute_height() {
        let frame = generate(Pattern::Saddle, 6, 7).unwrap();
        for (h, i) in frame
            .heights
            .data()
            .iter()
            .zip(frame.intensities.data().iter())
        {
            assert_eq!(h.abs(), *i);
        }
    }

    #[test]
    fn non_saddle_intensity_equals_height() {
        for pattern in [
            Pattern::Dataset,
            Pattern::Wave,
            Pattern::Gaussian,
            Pattern::Ripple,
        ] {
            let frame = generate(pattern, 5, 3).unwrap();
            assert_eq!(frame.heights, frame.intensities, "{pattern}");
        }
    }

    #[test]
    fn ripple_center_at_time_zero_is_zero() {
        // r = 0 at the center of an odd grid: sin(0) / 1 * 3
        let frame = generate(Pattern::Ripple, 5, 0).unwrap();
        assert_abs_diff_eq!(frame.heights.get(2, 2), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn gaussian_peaks_near_first_center_at_time_zero() {
        // phase 0: first bump sits at the origin with weight 1
        let frame = generate(Pattern::Gaussian, 11, 0).unwrap();
        let center = frame.heights.get(5, 5);
        assert!(center > 1.0, "center height {center}");
        assert!(center > frame.heights.get(0, 10));
    }

    #[test]
    fn points_carry_jitter_but_heights_do_not() {
        let frame = generate(Pattern::Wave, 5, 2).unwrap();
        for (i, p) in frame.points.iter().enumerate() {
            let (column, row) = (i / 5, i % 5);
            assert_eq!(p.x, grid_coordinate(column, 5));
            assert_eq!(p.z, grid_coordinate(row, 5));
            let mesh = frame.heights.get(column, row);
            assert_abs_diff_eq!(p.y - mesh, point_jitter(p.x, p.z), epsilon = 1e-12);
        }
    }

    #[test]
    fn resolution_below_two_is_rejected() {
        assert!(matches!(
            generate(Pattern::Wave, 1, 0),
            Err(SurfaceError::InvalidResolution(_))
        ));
    }

    #[test]
    fn oversized_resolution_is_an_error_not_a_panic() {
        for resolution in [MAX_RESOLUTION + 1, u32::MAX as usize, usize::MAX] {
            assert!(matches!(
                generate(Pattern::Wave, resolution, 0),
                Err(SurfaceError::InvalidResolution(_))
            ));
        }
    }

    #[test]
    fn largest_resolution_is_accepted() {
        let frame = generate(Pattern::Ripple, MAX_RESOLUTION, 0).unwrap();
        assert_eq!(frame.heights.data().len(), MAX_RESOLUTION * MAX_RESOLUTION);
    }

    #[test]
    fn generate_is_deterministic() {
        let a = generate(Pattern::Dataset, 12, 99).unwrap();
        let b = generate(Pattern::Dataset, 12, 99).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn huge_time_stays_finite() {
        for pattern in Pattern::ALL {
            let frame = generate(pattern, 4, u64::MAX).unwrap();
            assert!(frame.heights.is_finite(), "{pattern}");
            assert!(frame.points.iter().all(SurfaceSample::is_finite));
        }
    }

    #[test]
    fn phase_wraps_at_time_wrap() {
        assert_eq!(phase_at(TIME_WRAP), 0.0);
        assert_eq!(phase_at(TIME_WRAP + 10), phase_at(10));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn any_pattern() -> impl Strategy<Value = Pattern> {
            prop::sample::select(Pattern::ALL.to_vec())
        }

        proptest! {
            #[test]
            fn fields_are_square_and_finite(
                pattern in any_pattern(),
                resolution in 2_usize..=40,
                time in any::<u64>(),
            ) {
                let frame = generate(pattern, resolution, time).unwrap();
                prop_assert_eq!(frame.points.len(), resolution * resolution);
                prop_assert_eq!(frame.heights.data().len(), resolution * resolution);
                prop_assert_eq!(frame.intensities.data().len(), resolution * resolution);
                prop_assert!(frame.heights.is_finite());
                prop_assert!(frame.intensities.is_finite());
                prop_assert!(frame.points.iter().all(SurfaceSample::is_finite));
            }

            #[test]
            fn dataset_stays_in_band(resolution in 2_usize..=32, time in any::<u64>()) {
                let frame = generate(Pattern::Dataset, resolution, time).unwrap();
                for &y in frame.heights.data() {
                    prop_assert!((DATASET_MIN..=DATASET_MAX).contains(&y), "y = {}", y);
                }
            }

            #[test]
            fn grid_spans_full_domain(pattern in any_pattern(), resolution in 2_usize..=64) {
                let frame = generate(pattern, resolution, 0).unwrap();
                let first = frame.points[0];
                let last = frame.points[frame.points.len() - 1];
                prop_assert_eq!((first.x, first.z), (-5.0, -5.0));
                prop_assert_eq!((last.x, last.z), (5.0, 5.0));
            }
        }
    }
}
