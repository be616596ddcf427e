//! Reproducible description of a recorded animation run.
//!
//! A [`Take`] captures everything needed to replay an effect: effect name,
//! surface dimensions, parameters, PRNG seed, frame count, and the interval
//! between simulated frames. Two identical `Take` values fed to the same
//! binary produce bit-identical surfaces.

use crate::error::EffectError;
use serde::{Deserialize, Serialize};

/// Default simulated frame interval: 60 frames per second.
pub const DEFAULT_FRAME_MS: f64 = 1000.0 / 60.0;

/// Reproducible specification for an animation run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Take {
    pub effect: String,
    pub width: usize,
    pub height: usize,
    pub params: serde_json::Value,
    pub seed: u64,
    pub frames: usize,
    pub frame_ms: f64,
}

impl Take {
    /// Creates a new Take with empty params, zero frames, and the default
    /// 60 fps frame interval.
    pub fn new(effect: &str, width: usize, height: usize, seed: u64) -> Self {
        Self {
            effect: effect.to_string(),
            width,
            height,
            params: serde_json::Value::Object(serde_json::Map::new()),
            seed,
            frames: 0,
            frame_ms: DEFAULT_FRAME_MS,
        }
    }

    /// Validates dimensions (non-zero, non-overflowing) and the frame
    /// interval (finite and positive).
    pub fn validate(&self) -> Result<(), EffectError> {
        if self.width == 0 || self.height == 0 {
            return Err(EffectError::InvalidDimensions);
        }
        self.width
            .checked_mul(self.height)
            .ok_or(EffectError::InvalidDimensions)?;
        if !self.frame_ms.is_finite() || self.frame_ms <= 0.0 {
            return Err(EffectError::InvalidParam {
                name: "frame_ms".into(),
                reason: "must be finite and positive".into(),
            });
        }
        Ok(())
    }

    /// Elapsed milliseconds at frame `i` (frame 0 is at time 0).
    pub fn elapsed_at(&self, frame: usize) -> f64 {
        frame as f64 * self.frame_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_defaults() {
        let t = Take::new("blackhole", 800, 600, 42);
        assert_eq!(t.effect, "blackhole");
        assert_eq!(t.width, 800);
        assert_eq!(t.height, 600);
        assert_eq!(t.seed, 42);
        assert_eq!(t.frames, 0);
        assert!((t.frame_ms - DEFAULT_FRAME_MS).abs() < 1e-12);
        assert_eq!(t.params, serde_json::json!({}));
    }

    #[test]
    fn validate_accepts_reasonable_take() {
        let t = Take::new("drift", 400, 400, 1);
        assert!(t.validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_width() {
        let mut t = Take::new("blackhole", 0, 100, 1);
        t.width = 0;
        assert!(matches!(t.validate(), Err(EffectError::InvalidDimensions)));
    }

    #[test]
    fn validate_rejects_overflowing_area() {
        let mut t = Take::new("blackhole", 1, 1, 1);
        t.width = usize::MAX;
        t.height = 2;
        assert!(matches!(t.validate(), Err(EffectError::InvalidDimensions)));
    }

    #[test]
    fn validate_rejects_non_positive_frame_interval() {
        let mut t = Take::new("blackhole", 100, 100, 1);
        t.frame_ms = 0.0;
        assert!(matches!(
            t.validate(),
            Err(EffectError::InvalidParam { .. })
        ));
        t.frame_ms = f64::NAN;
        assert!(t.validate().is_err());
    }

    #[test]
    fn elapsed_at_scales_linearly() {
        let mut t = Take::new("blackhole", 100, 100, 1);
        t.frame_ms = 50.0;
        assert_eq!(t.elapsed_at(0), 0.0);
        assert_eq!(t.elapsed_at(3), 150.0);
    }

    #[test]
    fn json_round_trip() {
        let mut t = Take::new("blackhole", 1920, 1080, 8_675_309);
        t.params = serde_json::json!({"particle_count": 100, "max_orbit": 128});
        t.frames = 600;
        let json = serde_json::to_string_pretty(&t).unwrap();
        let back: Take = serde_json::from_str(&json).unwrap();
        assert_eq!(t, back);
    }

    #[test]
    fn json_contains_expected_keys() {
        let t = Take::new("drift", 64, 64, 9);
        let v: serde_json::Value = serde_json::to_value(&t).unwrap();
        for key in ["effect", "width", "height", "params", "seed", "frames", "frame_ms"] {
            assert!(v.get(key).is_some(), "missing key {key}");
        }
    }
}
