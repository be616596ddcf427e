//! A single orbiting star and its per-frame motion laws.
//!
//! Particles are created once, then mutated every frame. All randomized
//! construction parameters come from the field's PRNG, in a fixed draw
//! order, so a seed fully determines the population.

use fx_engine_core::{Rgba, Xorshift64};
use glam::DVec2;

/// Opacity falls off linearly over this many units of orbit radius,
/// independent of the configured maximum orbit.
const ALPHA_FALLOFF: f64 = 255.0;

/// Which motion law applies this frame, derived from the field's mode and
/// collapse flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Regime {
    /// Idle orbit at the resting radius.
    Rest,
    /// Idle orbit pulled inward toward the hover ring.
    Collapse,
    /// Dispersal toward the per-particle scatter target at half spin rate.
    Expand,
    /// Convergence back to the original resting radius.
    Return,
}

/// One star in the particle field.
///
/// The radius, angular parameters, color, and the three target offsets are
/// fixed at creation; position and rotation mutate every frame.
#[derive(Debug, Clone)]
pub struct Particle {
    orbit_radius: f64,
    position: DVec2,
    previous_position: DVec2,
    angular_speed: f64,
    rotation: f64,
    previous_rotation: f64,
    start_rotation: f64,
    rest_y: f64,
    original_y: f64,
    hover_y: f64,
    expand_y: f64,
    color: Rgba,
}

impl Particle {
    /// Samples a new particle below `center`.
    ///
    /// The orbit radius is the mean of a near draw in [1, max_orbit/2 + 1)
    /// and a far draw in [max_orbit, max_orbit * 1.5), which lands it in
    /// [1, 1.5 * max_orbit]. The particle starts vertically stacked below
    /// center at that radius.
    pub(crate) fn spawn(index: usize, center: DVec2, max_orbit: f64, rng: &mut Xorshift64) -> Self {
        let near = rng.next_range(0.0, max_orbit / 2.0) + 1.0;
        let far = rng.next_range(0.0, max_orbit / 2.0) + max_orbit;
        let orbit_radius = (near + far) / 2.0;

        let angular_speed = (rng.next_range(0.0, 2.5).floor() + 1.5).to_radians();
        let start_rotation = (rng.next_range(0.0, 360.0).floor() + 1.0).to_radians();

        let collapse_bonus = (orbit_radius - max_orbit * 0.7).max(0.0);
        let expand_y = center.y - 10.0 * (index % 100) as f64 + rng.next_range(0.0, 20.0).floor() + 1.0;

        let rest_y = center.y + orbit_radius;
        let position = DVec2::new(center.x, rest_y);

        Self {
            orbit_radius,
            position,
            previous_position: position,
            angular_speed,
            rotation: 0.0,
            previous_rotation: start_rotation,
            start_rotation,
            rest_y,
            original_y: rest_y,
            hover_y: center.y + max_orbit / 2.0 + collapse_bonus,
            expand_y,
            color: Rgba::WHITE.with_alpha(1.0 - orbit_radius / ALPHA_FALLOFF),
        }
    }

    /// Applies one frame of the motion state machine at compressed time `t`.
    ///
    /// The radial laws are intentionally asymmetric per regime: rest decays
    /// outward drift linearly and damps inward drift, collapse approaches
    /// the hover ring exponentially from above, expansion creeps toward the
    /// scatter target (holding position when already past it), and return
    /// converges on the original radius until it snaps and re-anchors.
    pub(crate) fn advance_motion(&mut self, t: f64, regime: Regime) {
        let y = &mut self.position.y;
        match regime {
            Regime::Rest => {
                self.rotation = self.start_rotation + t * self.angular_speed;
                if *y > self.rest_y {
                    *y -= 2.5;
                }
                if *y < self.rest_y - 4.0 {
                    *y += (self.rest_y - *y) / 10.0;
                }
            }
            Regime::Collapse => {
                self.rotation = self.start_rotation + t * self.angular_speed;
                if *y > self.hover_y {
                    *y -= (self.hover_y - *y) / -5.0;
                }
                if *y < self.hover_y - 4.0 {
                    *y += 2.5;
                }
            }
            Regime::Expand => {
                self.rotation = self.start_rotation + t * (self.angular_speed / 2.0);
                if *y > self.expand_y {
                    *y -= (self.expand_y - *y).floor() / -80.0;
                }
            }
            Regime::Return => {
                self.rotation = self.start_rotation + t * self.angular_speed;
                if (*y - self.original_y).abs() > 2.0 {
                    *y += (self.original_y - *y) / 50.0;
                } else {
                    *y = self.original_y;
                    self.rest_y = self.original_y;
                }
            }
        }
    }

    /// Commits this frame's position and rotation as the next frame's trail
    /// anchor.
    pub(crate) fn commit_frame(&mut self) {
        self.previous_position = self.position;
        self.previous_rotation = self.rotation;
    }

    /// The fixed distance-like parameter controlling resting offset and
    /// opacity.
    pub fn orbit_radius(&self) -> f64 {
        self.orbit_radius
    }

    /// Current unrotated position.
    pub fn position(&self) -> DVec2 {
        self.position
    }

    /// Last committed unrotated position.
    pub fn previous_position(&self) -> DVec2 {
        self.previous_position
    }

    /// Current orbital angle in radians.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Last committed orbital angle in radians.
    pub fn previous_rotation(&self) -> f64 {
        self.previous_rotation
    }

    /// Angular velocity in radians per time unit.
    pub fn angular_speed(&self) -> f64 {
        self.angular_speed
    }

    /// Resting y target for the idle regime.
    pub fn rest_y(&self) -> f64 {
        self.rest_y
    }

    /// Hover-ring y target for the collapse regime.
    pub fn hover_y(&self) -> f64 {
        self.hover_y
    }

    /// Scatter y target for the expansion regime.
    pub fn expand_y(&self) -> f64 {
        self.expand_y
    }

    /// The y the particle was created at; the return regime converges here.
    pub fn original_y(&self) -> f64 {
        self.original_y
    }

    /// Fixed render color (white with radius-derived alpha).
    pub fn color(&self) -> Rgba {
        self.color
    }
}
