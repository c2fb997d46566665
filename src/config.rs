//! Scene tuning knobs. Every field defaults to the shipped choreography, so an
//! empty JSON object is a valid configuration.

use std::path::Path;

use rand::Rng;

use crate::{
    animation::ease::Ease,
    foundation::core::{Fps, Rgba8Premul},
    foundation::error::{HeroError, HeroResult},
};

/// Half-open sampling band `[min, max)`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Band {
    pub min: f64,
    pub max: f64,
}

impl Band {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn sample<R: Rng + ?Sized>(self, rng: &mut R) -> f64 {
        if self.max > self.min {
            rng.gen_range(self.min..self.max)
        } else {
            self.min
        }
    }

    pub fn contains(self, v: f64) -> bool {
        v >= self.min && (v < self.max || (self.min == self.max && v == self.min))
    }

    fn validate(self, name: &str) -> HeroResult<()> {
        if !(self.min.is_finite() && self.max.is_finite()) || self.min > self.max {
            return Err(HeroError::validation(format!(
                "{name}: band must be finite with min <= max"
            )));
        }
        Ok(())
    }
}

/// Top-level configuration for a hero scene.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub fps: Fps,
    /// Viewport width used by the fish until a live viewport is attached.
    pub viewport_width: f64,
    pub fish_count: usize,
    /// Fixed seed for reproducible jitter; `None` seeds from the OS.
    pub seed: Option<u64>,
    pub entrance: EntranceConfig,
    pub ambient: AmbientConfig,
    pub school: SchoolConfig,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            fps: Fps::default(),
            viewport_width: 1440.0,
            fish_count: 10,
            seed: None,
            entrance: EntranceConfig::default(),
            ambient: AmbientConfig::default(),
            school: SchoolConfig::default(),
        }
    }
}

impl MotionConfig {
    pub fn from_json_str(s: &str) -> HeroResult<Self> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| HeroError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> HeroResult<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .map_err(|e| HeroError::config(format!("read '{}': {e}", path.display())))?;
        Self::from_json_str(&s)
    }

    pub fn validate(&self) -> HeroResult<()> {
        Fps::new(self.fps.num, self.fps.den)?;
        if !(self.viewport_width.is_finite() && self.viewport_width > 0.0) {
            return Err(HeroError::validation("viewport_width must be > 0"));
        }
        self.entrance.validate()?;
        self.ambient.validate()?;
        self.school.validate()
    }
}

fn positive(v: f64, name: &str) -> HeroResult<()> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(HeroError::validation(format!("{name} must be > 0")))
    }
}

fn finite(v: f64, name: &str) -> HeroResult<()> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(HeroError::validation(format!("{name} must be finite")))
    }
}

/// One step of the entrance reveal.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RevealStep {
    /// Starting vertical offset; the step settles at 0.
    pub rise: f64,
    pub duration: f64,
    /// How far the step starts before the previous one ends.
    pub overlap: f64,
    /// Starting blur radius; 0 disables the blur track's effect.
    pub blur_px: f64,
}

impl Default for RevealStep {
    fn default() -> Self {
        Self {
            rise: 0.0,
            duration: 1.0,
            overlap: 0.0,
            blur_px: 0.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EntranceConfig {
    pub ease: Ease,
    pub heading: RevealStep,
    pub subtext: RevealStep,
    pub cta: RevealStep,
}

impl Default for EntranceConfig {
    fn default() -> Self {
        Self {
            ease: Ease::OutQuart,
            heading: RevealStep {
                rise: 40.0,
                duration: 1.1,
                overlap: 0.0,
                blur_px: 6.0,
            },
            subtext: RevealStep {
                rise: 20.0,
                duration: 0.9,
                overlap: 0.6,
                blur_px: 0.0,
            },
            cta: RevealStep {
                rise: 10.0,
                duration: 0.8,
                overlap: 0.5,
                blur_px: 0.0,
            },
        }
    }
}

impl EntranceConfig {
    fn validate(&self) -> HeroResult<()> {
        for (name, step) in [
            ("entrance.heading", &self.heading),
            ("entrance.subtext", &self.subtext),
            ("entrance.cta", &self.cta),
        ] {
            positive(step.duration, &format!("{name}.duration"))?;
            finite(step.rise, &format!("{name}.rise"))?;
            finite(step.overlap, &format!("{name}.overlap"))?;
            if !(step.blur_px.is_finite() && step.blur_px >= 0.0) {
                return Err(HeroError::validation(format!("{name}.blur_px must be >= 0")));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AmbientConfig {
    pub ease: Ease,
    /// Heading glow pulse.
    pub glow_radius_px: f64,
    pub glow_color: String,
    pub glow_period: f64,
    /// Island parallax sway (both islands, in lockstep).
    pub sway_lift: f64,
    pub sway_period: f64,
    /// Boat bob, relative to its resting position.
    pub bob_lift: f64,
    pub bob_tilt_deg: f64,
    pub bob_period: f64,
    /// Boat drift, relative to its resting position.
    pub drift_shift: f64,
    pub drift_period: f64,
}

impl Default for AmbientConfig {
    fn default() -> Self {
        Self {
            ease: Ease::InOutSine,
            glow_radius_px: 24.0,
            glow_color: "#2eb3ff".to_string(),
            glow_period: 2.2,
            sway_lift: 6.0,
            sway_period: 3.0,
            bob_lift: -10.0,
            bob_tilt_deg: -2.0,
            bob_period: 2.4,
            drift_shift: 12.0,
            drift_period: 7.0,
        }
    }
}

impl AmbientConfig {
    pub fn glow_rgba(&self) -> HeroResult<Rgba8Premul> {
        Rgba8Premul::from_hex(&self.glow_color)
    }

    fn validate(&self) -> HeroResult<()> {
        self.glow_rgba()?;
        positive(self.glow_period, "ambient.glow_period")?;
        positive(self.sway_period, "ambient.sway_period")?;
        positive(self.bob_period, "ambient.bob_period")?;
        positive(self.drift_period, "ambient.drift_period")?;
        for (name, v) in [
            ("ambient.glow_radius_px", self.glow_radius_px),
            ("ambient.sway_lift", self.sway_lift),
            ("ambient.bob_lift", self.bob_lift),
            ("ambient.bob_tilt_deg", self.bob_tilt_deg),
            ("ambient.drift_shift", self.drift_shift),
        ] {
            finite(v, name)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SchoolConfig {
    pub ease: Ease,
    /// Off-screen-left spawn x.
    pub spawn_x: f64,
    /// Distance past the right viewport edge where a crossing ends.
    pub exit_margin: f64,
    pub baseline_top: f64,
    pub lane_spacing: f64,
    /// Lanes sharing a baseline band repeat every `lane_bands` slots.
    pub lane_bands: usize,
    pub baseline_jitter: Band,
    pub opacity: Band,
    pub scale: Band,
    pub stagger: Band,
    pub traverse_secs: Band,
    /// Vertical wander applied on every respawn, relative to the baseline.
    pub respawn_wander: Band,
    pub wiggle_deg: f64,
    pub wiggle_secs: f64,
    pub wiggle_repeats: u32,
}

impl Default for SchoolConfig {
    fn default() -> Self {
        Self {
            ease: Ease::InOutSine,
            spawn_x: -200.0,
            exit_margin: 200.0,
            baseline_top: 120.0,
            lane_spacing: 40.0,
            lane_bands: 5,
            baseline_jitter: Band::new(0.0, 40.0),
            opacity: Band::new(0.85, 1.0),
            scale: Band::new(0.7, 1.5),
            stagger: Band::new(0.0, 2.0),
            traverse_secs: Band::new(10.0, 16.0),
            respawn_wander: Band::new(-30.0, 30.0),
            wiggle_deg: 4.0,
            wiggle_secs: 0.6,
            wiggle_repeats: 10,
        }
    }
}

impl SchoolConfig {
    fn validate(&self) -> HeroResult<()> {
        if self.lane_bands == 0 {
            return Err(HeroError::validation("school.lane_bands must be > 0"));
        }
        for (name, band) in [
            ("school.baseline_jitter", self.baseline_jitter),
            ("school.opacity", self.opacity),
            ("school.scale", self.scale),
            ("school.stagger", self.stagger),
            ("school.traverse_secs", self.traverse_secs),
            ("school.respawn_wander", self.respawn_wander),
        ] {
            band.validate(name)?;
        }
        if self.stagger.min < 0.0 {
            return Err(HeroError::validation("school.stagger must be >= 0"));
        }
        positive(self.traverse_secs.min, "school.traverse_secs.min")?;
        positive(self.wiggle_secs, "school.wiggle_secs")?;
        for (name, v) in [
            ("school.spawn_x", self.spawn_x),
            ("school.exit_margin", self.exit_margin),
            ("school.baseline_top", self.baseline_top),
            ("school.lane_spacing", self.lane_spacing),
            ("school.wiggle_deg", self.wiggle_deg),
        ] {
            finite(v, name)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
