use crate::scene::target::TargetState;

/// Animatable numeric property of a target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Prop {
    /// Horizontal offset.
    X,
    /// Vertical offset.
    Y,
    /// Rotation in degrees around the target's pivot.
    Rotation,
    /// Uniform scale.
    Scale,
    Opacity,
    /// Gaussian blur radius in px.
    Blur,
    /// Glow (text-shadow) radius in px.
    Glow,
}

impl Prop {
    pub fn read(self, state: &TargetState) -> f64 {
        match self {
            Self::X => state.translate.x,
            Self::Y => state.translate.y,
            Self::Rotation => state.rotation_deg,
            Self::Scale => state.scale,
            Self::Opacity => state.opacity,
            Self::Blur => state.blur_px,
            Self::Glow => state.glow_px,
        }
    }

    pub fn write(self, state: &mut TargetState, v: f64) {
        match self {
            Self::X => state.translate.x = v,
            Self::Y => state.translate.y = v,
            Self::Rotation => state.rotation_deg = v,
            Self::Scale => state.scale = v,
            Self::Opacity => state.opacity = v.clamp(0.0, 1.0),
            Self::Blur => state.blur_px = v.max(0.0),
            Self::Glow => state.glow_px = v.max(0.0),
        }
    }
}

/// End value of a track: absolute, or relative to the value the property has
/// when the tween first becomes active (`+=12`, `-=10`).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum PropValue {
    Abs(f64),
    Rel(f64),
}

impl PropValue {
    pub fn resolve(self, start: f64) -> f64 {
        match self {
            Self::Abs(v) => v,
            Self::Rel(d) => start + d,
        }
    }
}

/// One property transition inside a tween.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Track {
    pub prop: Prop,
    /// Explicit start value; `None` reads the live value when the tween starts.
    pub from: Option<f64>,
    pub to: PropValue,
}

/// A track with both endpoints fixed, bound to one target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ResolvedTrack {
    pub(crate) prop: Prop,
    pub(crate) from: f64,
    pub(crate) to: f64,
}

impl ResolvedTrack {
    pub(crate) fn resolve(track: &Track, state: &TargetState) -> Self {
        let live = track.prop.read(state);
        let from = track.from.unwrap_or(live);
        Self {
            prop: track.prop,
            from,
            to: track.to.resolve(from),
        }
    }

    pub(crate) fn value_at(&self, eased: f64) -> f64 {
        self.from + (self.to - self.from) * eased
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/prop.rs"]
mod tests;
