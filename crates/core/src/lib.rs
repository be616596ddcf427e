#![deny(unsafe_code)]
//! Core types and traits for the fx-engine animation system.
//!
//! Provides the [`Effect`] trait implemented by every visual effect, the
//! software [`Surface`] raster with alpha compositing, the [`Rgba`] color
//! type, the [`Xorshift64`] PRNG, the deterministic [`Timeline`] scheduler,
//! the reproducible [`Take`] description, and parameter helpers.

pub mod color;
pub mod effect;
pub mod error;
pub mod params;
pub mod prng;
pub mod surface;
pub mod take;
pub mod timeline;

pub use color::Rgba;
pub use effect::Effect;
pub use error::EffectError;
pub use prng::Xorshift64;
pub use surface::Surface;
pub use take::Take;
pub use timeline::Timeline;
