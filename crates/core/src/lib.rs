#![deny(unsafe_code)]
//! Core types for the surface-stream demo engine.
//!
//! Provides the procedural field [`generate`](generator::generate) function,
//! the `GridField` type, `Pattern` selection, the rendering sink traits the
//! drivers push into, the `Xorshift64` PRNG, and JSON parameter helpers.

pub mod config;
pub mod error;
pub mod field;
pub mod generator;
pub mod grid;
pub mod params;
pub mod pattern;
pub mod prng;
pub mod ring;
pub mod sample;
pub mod sink;

pub use config::DemoConfig;
pub use error::SurfaceError;
pub use field::{GridField, HeightField, IntensityField};
pub use generator::{generate, SurfaceFrame};
pub use pattern::Pattern;
pub use prng::Xorshift64;
pub use sample::{StreamPoint, SurfaceSample};
pub use sink::{Capabilities, HeatmapSink, SeriesSink, SurfaceLayer, SurfaceSink, SurfaceTarget};
