//! Pure-computation pixel buffer conversion from a [`Surface`].
//!
//! This module is always available (no feature gate) so that the `png`
//! snapshot path and any embedding host can share the same conversion.

use fx_engine_core::surface::Surface;

/// Converts a surface to an RGBA8 pixel buffer.
///
/// Each pixel's components are clamped to [0, 1] and quantized to a byte
/// with rounding. The buffer length is `width * height * 4`.
pub fn surface_to_rgba8(surface: &Surface) -> Vec<u8> {
    surface
        .data()
        .iter()
        .flat_map(|px| {
            let q = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
            [q(px.r), q(px.g), q(px.b), q(px.a)]
        })
        .collect()
}
