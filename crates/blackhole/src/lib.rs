#![deny(unsafe_code)]
//! Black-hole particle field effect.
//!
//! A fixed population of stars orbits a center point. Each frame the field
//! composites a low-alpha veil over the surface (so previous frames persist
//! as fading trails), advances every star through one of four motion
//! regimes, and strokes a short segment from the star's previous rotated
//! position to its current one. Because the rotation frame itself advances
//! between frames, the straight segments accumulate into curved orbital
//! trails.
//!
//! Pointer hover pulls the idle orbit into a tighter ring; activation
//! disperses the stars toward per-star scatter targets at half spin rate.
//! The reverse transition (return to the resting orbit) is implemented and
//! queryable even though the standard entrance choreography never plays it.

mod entrance;
mod particle;

pub use entrance::{EntranceEvent, EntranceSequence, EntranceState};
pub use particle::Particle;

use fx_engine_core::params::{param_f64, param_usize};
use fx_engine_core::{Effect, EffectError, Rgba, Surface, Xorshift64};
use glam::DVec2;
use serde_json::{json, Value};

use particle::Regime;

/// Default star population.
pub const DEFAULT_PARTICLE_COUNT: usize = 2500;
/// Default maximum orbit constant; also sets the hover ring at half this.
pub const DEFAULT_MAX_ORBIT: f64 = 255.0;

/// One internal time unit per this many elapsed milliseconds. Every consumer
/// of time divides real elapsed milliseconds by this before use; angular and
/// radial rates are calibrated against the compressed unit.
pub const TIME_UNIT_MS: f64 = 50.0;

/// Opaque near-black the surface is cleared to at construction.
const BACKGROUND: Rgba = Rgba::opaque(25.0 / 255.0, 25.0 / 255.0, 25.0 / 255.0);
/// Per-frame fade veil; the 0.2 alpha is what length-limits the trails.
const VEIL: Rgba = Rgba {
    r: 25.0 / 255.0,
    g: 25.0 / 255.0,
    b: 25.0 / 255.0,
    a: 0.2,
};

/// Top-level animation mode. Collapse is a sub-state of `Idle`, tracked
/// separately so hover can toggle it without disturbing the mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Stars orbit at their resting radius (or the hover ring while
    /// collapsing).
    Idle,
    /// Stars disperse toward their scatter targets at half spin rate.
    Expanding,
    /// Stars converge back onto their original resting radius.
    Returning,
}

/// Tunable construction parameters.
#[derive(Debug, Clone, Copy)]
pub struct BlackholeParams {
    /// Number of stars, fixed for the field's lifetime.
    pub particle_count: usize,
    /// Maximum orbit constant; orbit radii land in [1, 1.5 * max_orbit].
    pub max_orbit: f64,
}

impl Default for BlackholeParams {
    fn default() -> Self {
        Self {
            particle_count: DEFAULT_PARTICLE_COUNT,
            max_orbit: DEFAULT_MAX_ORBIT,
        }
    }
}

impl BlackholeParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        Self {
            particle_count: param_usize(params, "particle_count", DEFAULT_PARTICLE_COUNT),
            max_orbit: param_f64(params, "max_orbit", DEFAULT_MAX_ORBIT),
        }
    }
}

/// The black-hole particle field.
///
/// Owns the star population, the shared geometry (center, max orbit), the
/// mode flags, and the raster surface. Mode changes requested by pointer
/// handlers take effect on the next [`advance`](Effect::advance) call.
pub struct ParticleField {
    surface: Surface,
    center: DVec2,
    max_orbit: f64,
    particles: Vec<Particle>,
    mode: Mode,
    collapsing: bool,
    stopped: bool,
}

impl ParticleField {
    /// Creates a field with all stars stacked below center at their orbit
    /// radius, on a surface cleared to the opaque background.
    ///
    /// Returns `EffectError::InvalidDimensions` for a zero-sized surface and
    /// `EffectError::InvalidParam` for a non-finite or non-positive
    /// `max_orbit`.
    pub fn new(
        width: usize,
        height: usize,
        seed: u64,
        params: BlackholeParams,
    ) -> Result<Self, EffectError> {
        if !params.max_orbit.is_finite() || params.max_orbit <= 0.0 {
            return Err(EffectError::InvalidParam {
                name: "max_orbit".into(),
                reason: "must be finite and positive".into(),
            });
        }
        let surface = Surface::new(width, height, BACKGROUND)?;
        let center = DVec2::new(width as f64 / 2.0, height as f64 / 2.0);
        let mut rng = Xorshift64::new(seed);
        let particles = (0..params.particle_count)
            .map(|i| Particle::spawn(i, center, params.max_orbit, &mut rng))
            .collect();
        Ok(Self {
            surface,
            center,
            max_orbit: params.max_orbit,
            particles,
            mode: Mode::Idle,
            collapsing: false,
            stopped: false,
        })
    }

    /// Creates a field from a JSON params object (`particle_count`,
    /// `max_orbit`).
    pub fn from_json(
        width: usize,
        height: usize,
        seed: u64,
        json_params: &Value,
    ) -> Result<Self, EffectError> {
        Self::new(width, height, seed, BlackholeParams::from_json(json_params))
    }

    /// Pointer entered the trigger zone: pull the idle orbit inward.
    /// Ignored while expanding.
    pub fn pointer_enter(&mut self) {
        if self.mode != Mode::Expanding {
            self.collapsing = true;
        }
    }

    /// Pointer left the trigger zone: release the collapse pull. Ignored
    /// while expanding; calling with the pull already released is a no-op.
    pub fn pointer_leave(&mut self) {
        if self.mode != Mode::Expanding {
            self.collapsing = false;
        }
    }

    /// Activation trigger: disperse the stars. Forces the collapse pull off.
    pub fn activate(&mut self) {
        self.collapsing = false;
        self.mode = Mode::Expanding;
    }

    /// Reverse transition: converge stars back onto their original orbit.
    pub fn restore(&mut self) {
        self.collapsing = false;
        self.mode = Mode::Returning;
    }

    /// Current mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Whether the idle orbit is currently pulled toward the hover ring.
    pub fn is_collapsing(&self) -> bool {
        self.collapsing
    }

    /// Orbit center in surface coordinates.
    pub fn center(&self) -> DVec2 {
        self.center
    }

    /// Maximum orbit constant the field was built with.
    pub fn max_orbit(&self) -> f64 {
        self.max_orbit
    }

    /// Queryable snapshot of the star population.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// True once every star in returning mode has snapped back onto its
    /// original radius.
    pub fn is_settled(&self) -> bool {
        self.particles
            .iter()
            .all(|p| p.position().y == p.original_y())
    }

    fn regime(&self) -> Regime {
        match (self.mode, self.collapsing) {
            (Mode::Expanding, _) => Regime::Expand,
            (Mode::Returning, _) => Regime::Return,
            (Mode::Idle, true) => Regime::Collapse,
            (Mode::Idle, false) => Regime::Rest,
        }
    }
}

impl Effect for ParticleField {
    fn advance(&mut self, elapsed_ms: f64) -> Result<(), EffectError> {
        if self.stopped {
            return Ok(());
        }
        // Absolute time, deliberately not clamped: a delayed frame jumps
        // motion forward instead of slowing it down.
        let t = elapsed_ms / TIME_UNIT_MS;
        self.surface.fill(VEIL);
        let regime = self.regime();
        for p in &mut self.particles {
            p.advance_motion(t, regime);
            let from = rotate_about(self.center, p.previous_position(), p.previous_rotation());
            let to = rotate_about(self.center, p.position(), p.rotation());
            self.surface.stroke_line(from, to, p.color());
            p.commit_frame();
        }
        Ok(())
    }

    fn surface(&self) -> &Surface {
        &self.surface
    }

    fn params(&self) -> Value {
        json!({
            "particle_count": self.particles.len(),
            "max_orbit": self.max_orbit,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "particle_count": {
                "type": "integer",
                "default": DEFAULT_PARTICLE_COUNT,
                "description": "Number of stars in the field"
            },
            "max_orbit": {
                "type": "number",
                "default": DEFAULT_MAX_ORBIT,
                "description": "Maximum orbit constant; radii land in [1, 1.5 * max_orbit]"
            },
        })
    }

    fn stop(&mut self) {
        self.stopped = true;
    }

    fn is_stopped(&self) -> bool {
        self.stopped
    }
}

/// Rotates `point` by `angle` radians about `center`, in the surface's
/// y-down coordinate convention.
fn rotate_about(center: DVec2, point: DVec2, angle: f64) -> DVec2 {
    let (sin, cos) = angle.sin_cos();
    let d = point - center;
    center + DVec2::new(cos * d.x - sin * d.y, sin * d.x + cos * d.y)
}
