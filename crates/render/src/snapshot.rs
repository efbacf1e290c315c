//! PNG output of a [`GridField`].
//!
//! Feature-gated behind `png` (default on) so wasm builds can depend on this
//! crate without pulling in `image`.

use std::path::Path;
use surface_stream_core::error::SurfaceError;
use surface_stream_core::field::GridField;

use crate::pixel::field_to_rgba;

/// Writes a field as a grayscale PNG.
///
/// Returns `SurfaceError::InvalidConfig` if the resolution overflows `u32`,
/// or `SurfaceError::Io` on write failure.
pub fn write_png(field: &GridField, path: &Path) -> Result<(), SurfaceError> {
    let side = u32::try_from(field.resolution())
        .map_err(|_| SurfaceError::InvalidConfig("field too large for PNG".into()))?;
    let img = image::RgbaImage::from_raw(side, side, field_to_rgba(field))
        .ok_or_else(|| SurfaceError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| SurfaceError::Io(e.to_string()))
}
