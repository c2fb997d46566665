use crate::{
    animation::prop::Prop,
    animation::timeline::{Position, Timeline},
    animation::tween::TweenSpec,
    config::EntranceConfig,
    foundation::error::HeroResult,
    runtime::scheduler::{Scheduler, TaskHandle},
    scene::registry::{TargetId, TargetRegistry},
};

/// Targets animated by the entrance sequence.
#[derive(Clone, Copy, Debug, Default)]
pub struct EntranceTargets {
    pub heading: Option<TargetId>,
    pub subtext: Option<TargetId>,
    pub cta: Option<TargetId>,
}

/// Scheduled entrance sequence.
#[derive(Clone, Debug)]
pub struct Entrance {
    /// Handles of the tweens that were actually scheduled.
    pub handles: Vec<TaskHandle>,
    /// Nominal start offsets of heading, subtext and CTA.
    pub start_times: [f64; 3],
    pub total_duration: f64,
}

impl Entrance {
    pub fn is_finished(&self) -> bool {
        self.handles.iter().all(|h| !h.is_live())
    }
}

fn one(id: Option<TargetId>) -> Vec<TargetId> {
    id.into_iter().collect()
}

/// Lay out the heading -> subtext -> CTA reveal without scheduling it.
pub fn entrance_timeline(cfg: &EntranceConfig, targets: EntranceTargets) -> HeroResult<Timeline> {
    let h = &cfg.heading;
    let s = &cfg.subtext;
    let c = &cfg.cta;

    Timeline::new()
        .with_default_ease(cfg.ease)
        .add(
            TweenSpec::from_to(one(targets.heading), h.duration)
                .prop_from_to(Prop::Y, h.rise, 0.0)
                .prop_from_to(Prop::Opacity, 0.0, 1.0)
                .prop_from_to(Prop::Blur, h.blur_px, 0.0),
            Position::Sequential,
        )?
        .add(
            TweenSpec::from_to(one(targets.subtext), s.duration)
                .prop_from_to(Prop::Y, s.rise, 0.0)
                .prop_from_to(Prop::Opacity, 0.0, 1.0),
            Position::Offset(-s.overlap),
        )?
        .add(
            TweenSpec::from_to(one(targets.cta), c.duration)
                .prop_from_to(Prop::Y, c.rise, 0.0)
                .prop_from_to(Prop::Opacity, 0.0, 1.0),
            Position::Offset(-c.overlap),
        )
}

/// Build and start the one-shot entrance. Missing targets simply drop their
/// tween; the remaining ones keep their nominal start times.
pub fn run_entrance<C: Clone>(
    scheduler: &mut Scheduler<C>,
    registry: &mut TargetRegistry,
    cfg: &EntranceConfig,
    targets: EntranceTargets,
) -> HeroResult<Entrance> {
    let timeline = entrance_timeline(cfg, targets)?;
    let starts = timeline.start_times();
    let start_times = [starts[0], starts[1], starts[2]];
    let total_duration = timeline.total_duration();
    let handles = timeline.schedule(scheduler, registry);
    tracing::debug!(
        scheduled = handles.len(),
        total_duration,
        "entrance timeline started"
    );
    Ok(Entrance {
        handles,
        start_times,
        total_duration,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/choreo/entrance.rs"]
mod tests;
