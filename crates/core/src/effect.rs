//! The core `Effect` trait that every fx-engine visual effect implements.
//!
//! The trait is object-safe so effects can be driven as `dyn Effect` by a
//! host frame loop that switches between effects at runtime.

use crate::error::EffectError;
use crate::surface::Surface;
use serde_json::Value;

/// Core trait for frame-driven visual effects.
///
/// An effect owns its particle/element state and a [`Surface`] it repaints
/// on every [`advance`](Effect::advance) call. The host owns frame
/// scheduling: it calls `advance` once per display refresh with the elapsed
/// wall-clock time since the effect started. Elapsed time is absolute, not a
/// per-frame delta — a late frame makes motion jump forward rather than
/// slow down.
///
/// This trait is **object-safe**: `Box<dyn Effect>` and `&dyn Effect` work
/// for runtime dispatch.
pub trait Effect {
    /// Advances the effect to `elapsed_ms` milliseconds since start and
    /// repaints the surface.
    ///
    /// A stopped effect ignores the call and returns `Ok(())`.
    fn advance(&mut self, elapsed_ms: f64) -> Result<(), EffectError>;

    /// The continuously updated raster output.
    fn surface(&self) -> &Surface;

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Schema describing all available parameters, their types and defaults.
    fn param_schema(&self) -> Value;

    /// Halts the effect. Idempotent: stopping a stopped effect is a no-op.
    fn stop(&mut self);

    /// Whether [`stop`](Effect::stop) has been called.
    fn is_stopped(&self) -> bool;
}
