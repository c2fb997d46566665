use crate::{
    animation::ease::Ease,
    animation::tween::TweenSpec,
    foundation::error::{HeroError, HeroResult},
    runtime::scheduler::{Scheduler, TaskHandle},
    scene::registry::TargetRegistry,
};

/// Placement of a timeline child relative to what came before it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Position {
    /// Starts when the previous child ends.
    Sequential,
    /// Starts `d` seconds after the previous child's end; negative overlaps it.
    Offset(f64),
    /// Absolute start time from the timeline origin.
    At(f64),
}

#[derive(Clone, Debug)]
struct Child {
    spec: TweenSpec,
    start: f64,
}

/// An ordered/overlapping chain of one-shot tweens.
#[derive(Clone, Debug, Default)]
pub struct Timeline {
    default_ease: Option<Ease>,
    children: Vec<Child>,
    cursor: f64,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ease applied to children that do not set one.
    pub fn with_default_ease(mut self, ease: Ease) -> Self {
        self.default_ease = Some(ease);
        self
    }

    pub fn add(mut self, spec: TweenSpec, position: Position) -> HeroResult<Self> {
        spec.validate()?;
        let Some(len) = spec.total_duration() else {
            return Err(HeroError::animation(
                "timeline children must have a finite duration",
            ));
        };
        let anchor = match position {
            Position::Sequential => self.cursor,
            Position::Offset(d) => self.cursor + d,
            Position::At(t) => t,
        };
        let start = anchor.max(0.0) + spec.delay;
        self.cursor = start + len;
        self.children.push(Child { spec, start });
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Start offset of each child, in insertion order.
    pub fn start_times(&self) -> Vec<f64> {
        self.children.iter().map(|c| c.start).collect()
    }

    /// Time at which the last child finishes.
    pub fn total_duration(&self) -> f64 {
        self.children
            .iter()
            .map(|c| c.start + c.spec.total_duration().unwrap_or(0.0))
            .fold(0.0, f64::max)
    }

    /// Schedule every child as a delayed tween. Children with no targets are
    /// dropped without moving the others.
    pub fn schedule<C: Clone>(
        self,
        scheduler: &mut Scheduler<C>,
        registry: &mut TargetRegistry,
    ) -> Vec<TaskHandle> {
        let default_ease = self.default_ease;
        let mut handles = Vec::with_capacity(self.children.len());
        for Child { mut spec, start } in self.children {
            if spec.targets.is_empty() {
                tracing::debug!(start, "timeline child has no targets, skipped");
                continue;
            }
            spec.delay = start;
            if spec.ease.is_none() {
                spec.ease = default_ease;
            }
            match scheduler.schedule_tween(registry, spec, None) {
                Ok(h) => handles.push(h),
                Err(err) => tracing::warn!(%err, "timeline child rejected"),
            }
        }
        handles
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
