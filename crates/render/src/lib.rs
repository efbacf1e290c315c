#![deny(unsafe_code)]
//! CPU-side rendering of grid fields.
//!
//! This is the degraded path used when a host cannot draw 3D surfaces: fields
//! become grayscale RGBA buffers ([`pixel`]) and, with the `png` feature,
//! image files ([`snapshot`]) or a numbered frame sequence ([`heatmap`]).

pub mod pixel;

#[cfg(feature = "png")]
pub mod heatmap;
#[cfg(feature = "png")]
pub mod snapshot;
