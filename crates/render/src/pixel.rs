//! Pure-computation pixel buffer conversion from a [`GridField`].
//!
//! Always available (no feature gate) so the PNG path and a browser
//! `ImageData` path share one conversion.

use surface_stream_core::field::GridField;

/// Maps a field to grayscale RGBA8, normalized so the field minimum is black
/// and the maximum is white. A flat field renders mid-gray.
///
/// Pixel `(px, py)` shows cell `(column = px, row = py)`, so the image's
/// x-axis runs along world x and its y-axis along world z. The buffer length
/// is `resolution * resolution * 4`.
pub fn field_to_rgba(field: &GridField) -> Vec<u8> {
    let n = field.resolution();
    let (lo, hi) = field.min_max();
    let span = hi - lo;
    let mut buf = Vec::with_capacity(n * n * 4);
    for row in 0..n {
        for column in 0..n {
            let v = field.get(column, row);
            let t = if span > 0.0 { (v - lo) / span } else { 0.5 };
            let g = (t.clamp(0.0, 1.0) * 255.0).round() as u8;
            buf.extend_from_slice(&[g, g, g, 255]);
        }
    }
    buf
}
