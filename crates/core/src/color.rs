//! RGBA color type and source-over compositing for the fx-engine.
//!
//! Effects paint translucent strokes and veils over previous frames, so the
//! color type carries an alpha channel and knows how to composite itself over
//! a destination pixel. Components are `f64` in [0, 1] throughout; hex
//! serialization quantizes to 8 bits, which is all the formats carry anyway.

use crate::error::EffectError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An sRGB color with straight (non-premultiplied) alpha, components in [0, 1].
///
/// Serializes as `"#rrggbb"` when fully opaque and `"#rrggbbaa"` otherwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    /// Opaque white, the base particle color before alpha falloff.
    pub const WHITE: Rgba = Rgba {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };

    /// Creates an opaque color from components in [0, 1].
    pub const fn opaque(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Returns this color with its alpha replaced by `a`, clamped to [0, 1].
    pub fn with_alpha(self, a: f64) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Parses `"#rrggbb"` or `"#rrggbbaa"` (leading `#` optional, case
    /// insensitive).
    ///
    /// Returns `EffectError::InvalidColor` for any other shape.
    pub fn from_hex(hex: &str) -> Result<Rgba, EffectError> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 && hex.len() != 8 {
            return Err(EffectError::InvalidColor(format!(
                "expected 6 or 8 hex digits, got {}",
                hex.len()
            )));
        }
        let byte = |range: std::ops::Range<usize>, channel: &str| {
            u8::from_str_radix(&hex[range], 16).map_err(|e| {
                EffectError::InvalidColor(format!("invalid {channel} component: {e}"))
            })
        };
        let r = byte(0..2, "red")?;
        let g = byte(2..4, "green")?;
        let b = byte(4..6, "blue")?;
        let a = if hex.len() == 8 { byte(6..8, "alpha")? } else { 255 };
        Ok(Rgba {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: a as f64 / 255.0,
        })
    }

    /// Converts to a hex string, 8-bit quantized with rounding. Opaque colors
    /// render as `"#rrggbb"`, translucent ones as `"#rrggbbaa"`.
    pub fn to_hex(self) -> String {
        let q = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        let (r, g, b, a) = (q(self.r), q(self.g), q(self.b), q(self.a));
        if a == 255 {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }

    /// Composites `self` over `dst` with the source-over operator.
    ///
    /// Both colors use straight alpha. A fully transparent result collapses
    /// to transparent black rather than dividing by zero.
    pub fn over(self, dst: Rgba) -> Rgba {
        let sa = self.a.clamp(0.0, 1.0);
        let da = dst.a.clamp(0.0, 1.0);
        let out_a = sa + da * (1.0 - sa);
        if out_a <= 0.0 {
            return Rgba {
                r: 0.0,
                g: 0.0,
                b: 0.0,
                a: 0.0,
            };
        }
        let blend =
            |sc: f64, dc: f64| (sc * sa + dc * da * (1.0 - sa)) / out_a;
        Rgba {
            r: blend(self.r, dst.r),
            g: blend(self.g, dst.g),
            b: blend(self.b, dst.b),
            a: out_a,
        }
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rgba::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
