use crate::foundation::error::{HeroError, HeroResult};

pub use kurbo::{Affine, Size, Vec2};

/// Absolute 0-based frame index on the scheduler clock.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Frame clock rate of the shared scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Default for Fps {
    fn default() -> Self {
        Self { num: 60, den: 1 }
    }
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> HeroResult<Self> {
        if den == 0 {
            return Err(HeroError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(HeroError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Frames per second as a float.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Duration of one frame in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// Convert a frame count to seconds.
    pub fn frames_to_secs(self, frames: u64) -> f64 {
        // Multiply before dividing so long-running clocks stay exact on whole seconds.
        (frames as f64) * f64::from(self.den) / f64::from(self.num)
    }

    /// Convert seconds to frames, rounding down. Negative input yields 0.
    pub fn secs_to_frames_floor(self, secs: f64) -> u64 {
        (secs * self.as_f64()).floor().max(0.0) as u64
    }

    /// Convert seconds to frames, rounding up. Negative input yields 0.
    pub fn secs_to_frames_ceil(self, secs: f64) -> u64 {
        (secs * self.as_f64()).ceil().max(0.0) as u64
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red channel (premultiplied).
    pub r: u8,
    /// Green channel (premultiplied).
    pub g: u8,
    /// Blue channel (premultiplied).
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent black.
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Convert straight (non-premultiplied) RGBA8 to premultiplied RGBA8.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    /// Parse `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(s: &str) -> HeroResult<Self> {
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| HeroError::validation(format!("color '{s}' must start with '#'")))?;
        if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
            return Err(HeroError::validation(format!(
                "color '{s}' must be #rrggbb or #rrggbbaa"
            )));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| HeroError::validation(format!("color '{s}' has invalid hex digits")))
        };
        let a = if hex.len() == 8 { channel(6)? } else { 255 };
        Ok(Self::from_straight_rgba(channel(0)?, channel(2)?, channel(4)?, a))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
