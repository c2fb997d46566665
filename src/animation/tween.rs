use crate::{
    animation::ease::Ease,
    animation::prop::{Prop, PropValue, Track},
    foundation::error::{HeroError, HeroResult},
    scene::registry::TargetId,
};

/// How many times a tween plays after its first pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Repeat {
    /// `Count(n)` plays `1 + n` iterations.
    Count(u32),
    /// Never completes on its own.
    Infinite,
}

/// Declarative description of a tween before it is scheduled.
#[derive(Clone, Debug, PartialEq)]
pub struct TweenSpec {
    pub targets: Vec<TargetId>,
    pub tracks: Vec<Track>,
    /// Seconds per iteration.
    pub duration: f64,
    /// Seconds between scheduling and the first active frame.
    pub delay: f64,
    /// `None` falls back to the scheduler/timeline default.
    pub ease: Option<Ease>,
    pub repeat: Repeat,
    /// Alternate direction every iteration.
    pub yoyo: bool,
    /// Write explicit `from` values as soon as the tween is scheduled.
    pub immediate_render: bool,
}

/// Sampled position inside a tween at some local time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Phase {
    /// Direction-adjusted, un-eased progress in `[0, 1]`.
    pub progress: f64,
    /// Zero-based iteration index.
    pub iteration: u64,
    pub done: bool,
}

impl TweenSpec {
    /// Tween from each property's live value to the given end values.
    pub fn to(targets: impl IntoIterator<Item = TargetId>, duration: f64) -> Self {
        Self {
            targets: targets.into_iter().collect(),
            tracks: Vec::new(),
            duration,
            delay: 0.0,
            ease: None,
            repeat: Repeat::Count(0),
            yoyo: false,
            immediate_render: false,
        }
    }

    /// Tween with explicit start values rendered immediately on scheduling.
    pub fn from_to(targets: impl IntoIterator<Item = TargetId>, duration: f64) -> Self {
        Self {
            immediate_render: true,
            ..Self::to(targets, duration)
        }
    }

    pub fn prop(mut self, prop: Prop, to: f64) -> Self {
        self.tracks.push(Track {
            prop,
            from: None,
            to: PropValue::Abs(to),
        });
        self
    }

    pub fn prop_by(mut self, prop: Prop, delta: f64) -> Self {
        self.tracks.push(Track {
            prop,
            from: None,
            to: PropValue::Rel(delta),
        });
        self
    }

    pub fn prop_from_to(mut self, prop: Prop, from: f64, to: f64) -> Self {
        self.tracks.push(Track {
            prop,
            from: Some(from),
            to: PropValue::Abs(to),
        });
        self
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = Some(ease);
        self
    }

    pub fn delay(mut self, secs: f64) -> Self {
        self.delay = secs;
        self
    }

    pub fn repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn yoyo(mut self, yoyo: bool) -> Self {
        self.yoyo = yoyo;
        self
    }

    pub fn is_loop(&self) -> bool {
        self.repeat == Repeat::Infinite
    }

    /// Total active time, `None` for infinite loops.
    pub fn total_duration(&self) -> Option<f64> {
        match self.repeat {
            Repeat::Count(n) => Some(self.duration * (f64::from(n) + 1.0)),
            Repeat::Infinite => None,
        }
    }

    pub fn validate(&self) -> HeroResult<()> {
        if !(self.duration.is_finite() && self.duration > 0.0) {
            return Err(HeroError::animation("tween duration must be finite and > 0"));
        }
        if !(self.delay.is_finite() && self.delay >= 0.0) {
            return Err(HeroError::animation("tween delay must be finite and >= 0"));
        }
        if self.tracks.is_empty() {
            return Err(HeroError::animation("tween must animate at least one property"));
        }
        Ok(())
    }

    /// Map local time (seconds since the tween became active) to a phase.
    pub fn phase(&self, local: f64) -> Phase {
        let d = self.duration;
        if local <= 0.0 {
            return Phase {
                progress: 0.0,
                iteration: 0,
                done: false,
            };
        }

        if let Repeat::Count(n) = self.repeat {
            let iterations = u64::from(n) + 1;
            if local >= d * iterations as f64 {
                let last = iterations - 1;
                let progress = if self.yoyo && last % 2 == 1 { 0.0 } else { 1.0 };
                return Phase {
                    progress,
                    iteration: last,
                    done: true,
                };
            }
        }

        let iteration = (local / d).floor() as u64;
        let frac = ((local - iteration as f64 * d) / d).clamp(0.0, 1.0);
        let progress = if self.yoyo && iteration % 2 == 1 {
            1.0 - frac
        } else {
            frac
        };
        Phase {
            progress,
            iteration,
            done: false,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
