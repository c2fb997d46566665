use crate::{
    animation::prop::Prop,
    animation::tween::{Repeat, TweenSpec},
    config::AmbientConfig,
    foundation::core::Vec2,
    foundation::error::HeroResult,
    runtime::scheduler::{Scheduler, TaskHandle},
    scene::registry::{TargetId, TargetRegistry},
};

/// Targets driven by the ambient loops.
#[derive(Clone, Copy, Debug, Default)]
pub struct AmbientTargets {
    pub heading: Option<TargetId>,
    pub island_left: Option<TargetId>,
    pub island_right: Option<TargetId>,
    pub boat: Option<TargetId>,
}

/// The running ambient loops. Any of them may be absent when its target is.
#[derive(Clone, Debug, Default)]
pub struct AmbientLoops {
    pub glow: Option<TaskHandle>,
    pub sway: Option<TaskHandle>,
    pub bob: Option<TaskHandle>,
    pub drift: Option<TaskHandle>,
}

impl AmbientLoops {
    pub fn handles(&self) -> impl Iterator<Item = &TaskHandle> {
        [&self.glow, &self.sway, &self.bob, &self.drift]
            .into_iter()
            .flatten()
    }

    pub fn len(&self) -> usize {
        self.handles().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cancel the whole group. Returns how many loops were stopped.
    pub fn cancel_all(&self) -> usize {
        self.handles().filter(|h| h.cancel()).count()
    }
}

fn forever(spec: TweenSpec, cfg: &AmbientConfig) -> TweenSpec {
    spec.ease(cfg.ease).yoyo(true).repeat(Repeat::Infinite)
}

/// Start the four yoyo loops. Bob and drift share the boat but touch disjoint
/// properties, so they compose without overwriting each other.
pub fn start_ambient_loops<C: Clone>(
    scheduler: &mut Scheduler<C>,
    registry: &mut TargetRegistry,
    cfg: &AmbientConfig,
    targets: AmbientTargets,
) -> HeroResult<AmbientLoops> {
    let mut loops = AmbientLoops::default();

    if let Some(heading) = targets.heading {
        let color = cfg.glow_rgba()?;
        if let Some(state) = registry.get_mut(heading) {
            state.glow_color = color;
        }
        let spec = TweenSpec::to([heading], cfg.glow_period).prop(Prop::Glow, cfg.glow_radius_px);
        loops.glow = Some(scheduler.schedule_tween(registry, forever(spec, cfg), None)?);
    }

    let islands: Vec<TargetId> = [targets.island_left, targets.island_right]
        .into_iter()
        .flatten()
        .collect();
    if !islands.is_empty() {
        let spec = TweenSpec::to(islands, cfg.sway_period).prop(Prop::Y, cfg.sway_lift);
        loops.sway = Some(scheduler.schedule_tween(registry, forever(spec, cfg), None)?);
    }

    if let Some(boat) = targets.boat {
        // Bob pivots around the hull's center.
        if let Some(state) = registry.get_mut(boat) {
            state.pivot = Vec2::new(0.5, 0.5);
        }
        let bob = TweenSpec::to([boat], cfg.bob_period)
            .prop_by(Prop::Y, cfg.bob_lift)
            .prop(Prop::Rotation, cfg.bob_tilt_deg);
        loops.bob = Some(scheduler.schedule_tween(registry, forever(bob, cfg), None)?);

        let drift = TweenSpec::to([boat], cfg.drift_period).prop_by(Prop::X, cfg.drift_shift);
        loops.drift = Some(scheduler.schedule_tween(registry, forever(drift, cfg), None)?);
    }

    tracing::debug!(loops = loops.len(), "ambient loops started");
    Ok(loops)
}

#[cfg(test)]
#[path = "../../tests/unit/choreo/ambient.rs"]
mod tests;
