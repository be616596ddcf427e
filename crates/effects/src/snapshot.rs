//! CPU-side PNG rendering of a [`Surface`].
//!
//! Feature-gated behind `png` (default on) so embedding hosts can depend on
//! the registry without pulling in the `image` crate. The pixel buffer
//! conversion itself lives in [`crate::pixel`] (always available).

use fx_engine_core::error::EffectError;
use fx_engine_core::surface::Surface;
use std::path::Path;

use crate::pixel::surface_to_rgba8;

/// Writes a surface as a PNG image.
///
/// Returns `EffectError::InvalidDimensions` if the surface dimensions
/// overflow `u32`, or `EffectError::Io` on write failure.
pub fn write_png(surface: &Surface, path: &Path) -> Result<(), EffectError> {
    let rgba = surface_to_rgba8(surface);
    let w = u32::try_from(surface.width()).map_err(|_| EffectError::InvalidDimensions)?;
    let h = u32::try_from(surface.height()).map_err(|_| EffectError::InvalidDimensions)?;
    let img = image::RgbaImage::from_raw(w, h, rgba)
        .ok_or_else(|| EffectError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| EffectError::Io(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fx_engine_core::Rgba;

    #[test]
    fn write_png_round_trip() {
        let surface = Surface::new(16, 16, Rgba::opaque(0.1, 0.1, 0.1)).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.png");

        write_png(&surface, &path).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.width(), 16);
        assert_eq!(img.height(), 16);
    }

    #[test]
    fn write_png_to_bad_path_reports_io_error() {
        let surface = Surface::new(4, 4, Rgba::WHITE).unwrap();
        let result = write_png(&surface, Path::new("/nonexistent-dir/out.png"));
        assert!(matches!(result, Err(EffectError::Io(_))));
    }
}
