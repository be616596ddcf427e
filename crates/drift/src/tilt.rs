//! Pure pointer-to-tilt math for 3D card hover.
//!
//! Maps a pointer position over a card rectangle to the rotation, depth,
//! and glare-highlight placement a host applies as a perspective transform.
//! Everything here is stateless; the easing between tilt states is the
//! host's concern.

use crate::NodeRect;
use glam::DVec2;

/// Degrees of rotation at the card edge.
const MAX_ROTATION_DEG: f64 = 20.0;
/// Depth translation cap in pixels.
const MAX_DEPTH_PX: f64 = 50.0;

/// A computed card transform: rotations in degrees, depth in pixels, and
/// the glare highlight center in percent of the card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardTilt {
    pub rotate_x: f64,
    pub rotate_y: f64,
    pub translate_z: f64,
    pub glare: DVec2,
}

impl CardTilt {
    /// The flat resting transform a card eases back to on pointer leave.
    pub fn level() -> Self {
        Self {
            rotate_x: 0.0,
            rotate_y: 0.0,
            translate_z: 0.0,
            glare: DVec2::new(50.0, 50.0),
        }
    }
}

/// Computes the tilt for a pointer over (or near) a card.
///
/// The pointer offset is normalized to [-0.5, 0.5] per axis and clamped
/// there, so a pointer dragged past the edge holds the full tilt instead of
/// growing without bound. The glare highlight mirrors the pointer in
/// percent coordinates.
pub fn card_tilt(pointer: DVec2, rect: NodeRect) -> CardTilt {
    let dx = ((pointer.x - rect.center.x) / rect.size.x).clamp(-0.5, 0.5);
    let dy = ((pointer.y - rect.center.y) / rect.size.y).clamp(-0.5, 0.5);
    CardTilt {
        rotate_x: dy * MAX_ROTATION_DEG,
        rotate_y: -dx * MAX_ROTATION_DEG,
        translate_z: ((dx + dy).abs() * MAX_DEPTH_PX).min(MAX_DEPTH_PX),
        glare: DVec2::new((dx + 0.5) * 100.0, (dy + 0.5) * 100.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card() -> NodeRect {
        NodeRect {
            center: DVec2::new(100.0, 100.0),
            size: DVec2::new(200.0, 100.0),
        }
    }

    #[test]
    fn centered_pointer_is_level() {
        let t = card_tilt(DVec2::new(100.0, 100.0), card());
        assert_eq!(t, CardTilt::level());
    }

    #[test]
    fn bottom_right_corner_gives_full_depth() {
        let t = card_tilt(DVec2::new(200.0, 150.0), card());
        assert!((t.rotate_x - 10.0).abs() < 1e-9);
        assert!((t.rotate_y + 10.0).abs() < 1e-9);
        assert!((t.translate_z - 50.0).abs() < 1e-9);
        assert!((t.glare.x - 100.0).abs() < 1e-9);
        assert!((t.glare.y - 100.0).abs() < 1e-9);
    }

    #[test]
    fn opposing_corner_offsets_cancel_depth() {
        // Top-right: dx and dy cancel, so the card rotates without diving.
        let t = card_tilt(DVec2::new(200.0, 50.0), card());
        assert!((t.rotate_x + 10.0).abs() < 1e-9);
        assert!((t.rotate_y + 10.0).abs() < 1e-9);
        assert!(t.translate_z.abs() < 1e-9);
    }

    #[test]
    fn pointer_past_the_edge_clamps_to_full_tilt() {
        let inside = card_tilt(DVec2::new(200.0, 100.0), card());
        let outside = card_tilt(DVec2::new(5000.0, 100.0), card());
        assert_eq!(inside, outside);
    }

    #[test]
    fn glare_mirrors_pointer_in_percent() {
        let t = card_tilt(DVec2::new(50.0, 125.0), card());
        assert!((t.glare.x - 25.0).abs() < 1e-9);
        assert!((t.glare.y - 75.0).abs() < 1e-9);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn outputs_stay_bounded_for_any_pointer(
                px in -1e4_f64..1e4,
                py in -1e4_f64..1e4,
            ) {
                let t = card_tilt(DVec2::new(px, py), card());
                prop_assert!(t.rotate_x.abs() <= 10.0 + 1e-9);
                prop_assert!(t.rotate_y.abs() <= 10.0 + 1e-9);
                prop_assert!((0.0..=50.0).contains(&t.translate_z));
                prop_assert!((0.0..=100.0).contains(&t.glare.x));
                prop_assert!((0.0..=100.0).contains(&t.glare.y));
            }
        }
    }
}
