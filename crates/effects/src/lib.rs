#![deny(unsafe_code)]
//! Effect registry: maps effect names to implementations and provides
//! CPU-side snapshot rendering.
//!
//! This crate sits between `fx-engine-core` (which defines the `Effect`
//! trait) and the individual effect crates (`fx-engine-blackhole`,
//! `fx-engine-drift`). The CLI depends on this crate so dispatch logic
//! lives in one place.

pub mod pixel;

#[cfg(feature = "png")]
pub mod snapshot;

use fx_engine_core::error::EffectError;
use fx_engine_core::surface::Surface;
use fx_engine_core::Effect;
use serde_json::Value;

/// All available effect names.
const EFFECT_NAMES: &[&str] = &["blackhole", "drift"];

/// Enumeration of all available effects.
///
/// Wraps each implementation and delegates `Effect` trait methods. Use
/// [`EffectKind::from_name`] for string-based construction (CLI, embedding
/// hosts).
pub enum EffectKind {
    /// Black-hole particle field.
    Blackhole(fx_engine_blackhole::ParticleField),
    /// Spring-physics drift world.
    Drift(fx_engine_drift::DriftWorld),
}

impl EffectKind {
    /// Constructs an effect by name.
    ///
    /// Returns `EffectError::UnknownEffect` if the name is not recognized.
    pub fn from_name(
        name: &str,
        width: usize,
        height: usize,
        seed: u64,
        params: &Value,
    ) -> Result<Self, EffectError> {
        match name {
            "blackhole" => Ok(EffectKind::Blackhole(
                fx_engine_blackhole::ParticleField::from_json(width, height, seed, params)?,
            )),
            "drift" => Ok(EffectKind::Drift(fx_engine_drift::DriftWorld::from_json(
                width, height, seed, params,
            )?)),
            _ => Err(EffectError::UnknownEffect(name.to_string())),
        }
    }

    /// Returns a slice of all recognized effect names.
    pub fn list_effects() -> &'static [&'static str] {
        EFFECT_NAMES
    }

    /// Fires a named trigger on the wrapped effect.
    ///
    /// Triggers are the host-facing inputs that are not part of the frame
    /// loop: `pointer-enter`, `pointer-leave`, `activate`, and `restore`
    /// for the black hole; `bounce` for drift. Returns false if the effect
    /// has no such trigger.
    pub fn trigger(&mut self, name: &str) -> bool {
        match (self, name) {
            (EffectKind::Blackhole(e), "pointer-enter") => e.pointer_enter(),
            (EffectKind::Blackhole(e), "pointer-leave") => e.pointer_leave(),
            (EffectKind::Blackhole(e), "activate") => e.activate(),
            (EffectKind::Blackhole(e), "restore") => e.restore(),
            (EffectKind::Drift(e), "bounce") => e.micro_bounce(),
            _ => return false,
        }
        true
    }
}

impl Effect for EffectKind {
    fn advance(&mut self, elapsed_ms: f64) -> Result<(), EffectError> {
        match self {
            EffectKind::Blackhole(e) => e.advance(elapsed_ms),
            EffectKind::Drift(e) => e.advance(elapsed_ms),
        }
    }

    fn surface(&self) -> &Surface {
        match self {
            EffectKind::Blackhole(e) => e.surface(),
            EffectKind::Drift(e) => e.surface(),
        }
    }

    fn params(&self) -> Value {
        match self {
            EffectKind::Blackhole(e) => e.params(),
            EffectKind::Drift(e) => e.params(),
        }
    }

    fn param_schema(&self) -> Value {
        match self {
            EffectKind::Blackhole(e) => e.param_schema(),
            EffectKind::Drift(e) => e.param_schema(),
        }
    }

    fn stop(&mut self) {
        match self {
            EffectKind::Blackhole(e) => e.stop(),
            EffectKind::Drift(e) => e.stop(),
        }
    }

    fn is_stopped(&self) -> bool {
        match self {
            EffectKind::Blackhole(e) => e.is_stopped(),
            EffectKind::Drift(e) => e.is_stopped(),
        }
    }
}
