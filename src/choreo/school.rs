//! The fish school: a fixed arena of autonomous swimmers.
//!
//! Each agent is a small state machine driven by scheduler events rather than
//! completion callbacks:
//!
//! ```text
//! Idle --launch--> Traversing --arrive--> Respawning --> Traversing ...
//! ```
//!
//! A launch is a randomized stagger call; an arrival is the traversal tween
//! completing. Every traversal is paired with a bounded tail wiggle and the two
//! are always restarted together.

use rand::{SeedableRng, rngs::StdRng};

use crate::{
    animation::prop::Prop,
    animation::tween::{Repeat, TweenSpec},
    config::SchoolConfig,
    foundation::core::Vec2,
    runtime::scheduler::{Scheduler, SchedulerEvent, TaskHandle},
    scene::registry::{TargetId, TargetRegistry},
    scene::viewport::Viewport,
};

/// Cue attached to school tasks so their completions can be routed back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchoolCue {
    /// Stagger delay elapsed; start the first crossing.
    Launch { lane: usize },
    /// Traversal of the given generation finished.
    Arrive { lane: usize, generation: u64 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum AgentState {
    /// Waiting for the stagger call, or parked after its target went away.
    Idle,
    Traversing,
    /// Between arriving off-screen-right and the next crossing.
    Respawning,
}

/// One autonomous swimmer.
#[derive(Clone, Debug)]
pub struct FishAgent {
    pub lane: usize,
    pub target: TargetId,
    pub baseline_y: f64,
    /// Where the current crossing starts.
    pub spawn: Vec2,
    /// Duration of the current crossing.
    pub traverse_secs: f64,
    /// Crossing end x, read from the viewport when the crossing began.
    pub exit_x: f64,
    /// Incremented once per respawn.
    pub generation: u64,
    pub state: AgentState,
    launch: Option<TaskHandle>,
    traverse: Option<TaskHandle>,
    wiggle: Option<TaskHandle>,
}

impl FishAgent {
    pub fn launch_handle(&self) -> Option<&TaskHandle> {
        self.launch.as_ref()
    }

    pub fn traverse_handle(&self) -> Option<&TaskHandle> {
        self.traverse.as_ref()
    }

    pub fn wiggle_handle(&self) -> Option<&TaskHandle> {
        self.wiggle.as_ref()
    }

    fn cancel_all(&mut self) -> usize {
        [self.launch.take(), self.traverse.take(), self.wiggle.take()]
            .into_iter()
            .flatten()
            .filter(|h| h.cancel())
            .count()
    }
}

/// Owns the agent arena and the jitter source.
pub struct FishSchool {
    cfg: SchoolConfig,
    rng: StdRng,
    slots: Vec<Option<FishAgent>>,
}

impl FishSchool {
    /// `seed = None` draws from OS entropy.
    pub fn new(cfg: SchoolConfig, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            cfg,
            rng,
            slots: Vec::new(),
        }
    }

    pub fn config(&self) -> &SchoolConfig {
        &self.cfg
    }

    /// Lane-indexed arena; `None` for slots that were skipped.
    pub fn slots(&self) -> &[Option<FishAgent>] {
        &self.slots
    }

    pub fn agent(&self, lane: usize) -> Option<&FishAgent> {
        self.slots.get(lane)?.as_ref()
    }

    pub fn agents(&self) -> impl Iterator<Item = &FishAgent> {
        self.slots.iter().flatten()
    }

    /// Baseline band start for a lane: every `lane_bands`-th lane shares one.
    pub fn lane_floor(&self, lane: usize) -> f64 {
        self.cfg.baseline_top + (lane % self.cfg.lane_bands) as f64 * self.cfg.lane_spacing
    }

    /// Place every mounted fish off-screen-left and queue its staggered
    /// launch. Missing or destroyed slots are skipped without error.
    #[tracing::instrument(skip_all, fields(slots = slots.len()))]
    pub fn start(
        &mut self,
        scheduler: &mut Scheduler<SchoolCue>,
        registry: &mut TargetRegistry,
        slots: &[Option<TargetId>],
    ) -> Vec<TaskHandle> {
        self.halt();
        self.slots = Vec::with_capacity(slots.len());
        let mut handles = Vec::new();

        for (lane, slot) in slots.iter().enumerate() {
            let Some(target) = slot.filter(|id| registry.is_alive(*id)) else {
                tracing::debug!(lane, "fish slot has no mounted target, skipped");
                self.slots.push(None);
                continue;
            };

            let cfg = &self.cfg;
            let baseline_y = self.lane_floor(lane) + cfg.baseline_jitter.sample(&mut self.rng);
            let opacity = cfg.opacity.sample(&mut self.rng);
            let scale = cfg.scale.sample(&mut self.rng);
            registry.set(
                target,
                &[
                    (Prop::X, cfg.spawn_x),
                    (Prop::Y, baseline_y),
                    (Prop::Opacity, opacity),
                    (Prop::Scale, scale),
                ],
            );

            let delay = cfg.stagger.sample(&mut self.rng);
            let launch = scheduler.schedule_call(delay, Some(SchoolCue::Launch { lane }));
            handles.push(launch.clone());

            self.slots.push(Some(FishAgent {
                lane,
                target,
                baseline_y,
                spawn: Vec2::new(cfg.spawn_x, baseline_y),
                traverse_secs: 0.0,
                exit_x: cfg.spawn_x,
                generation: 0,
                state: AgentState::Idle,
                launch: Some(launch),
                traverse: None,
                wiggle: None,
            }));
        }

        tracing::debug!(scheduled = self.agents().count(), "fish school started");
        handles
    }

    /// Route one scheduler event. Returns handles of any tasks it started.
    pub fn handle_event(
        &mut self,
        scheduler: &mut Scheduler<SchoolCue>,
        registry: &mut TargetRegistry,
        viewport: &dyn Viewport,
        event: &SchedulerEvent<SchoolCue>,
    ) -> Vec<TaskHandle> {
        match event.cue {
            Some(SchoolCue::Launch { lane }) => {
                let Some(agent) = self.slots.get_mut(lane).and_then(Option::as_mut) else {
                    return Vec::new();
                };
                if agent.state != AgentState::Idle {
                    return Vec::new();
                }
                agent.launch = None;
                self.swim(lane, scheduler, registry, viewport)
            }
            Some(SchoolCue::Arrive { lane, generation }) => {
                if !self.respawn(lane, generation, registry) {
                    return Vec::new();
                }
                self.swim(lane, scheduler, registry, viewport)
            }
            None => Vec::new(),
        }
    }

    /// Traversing -> Respawning: jump back off-screen-left with fresh vertical
    /// wander around the baseline.
    fn respawn(&mut self, lane: usize, generation: u64, registry: &mut TargetRegistry) -> bool {
        let Some(agent) = self.slots.get_mut(lane).and_then(Option::as_mut) else {
            return false;
        };
        if agent.state != AgentState::Traversing || agent.generation != generation {
            return false;
        }
        agent.state = AgentState::Respawning;
        agent.traverse = None;

        let y = agent.baseline_y + self.cfg.respawn_wander.sample(&mut self.rng);
        agent.spawn = Vec2::new(self.cfg.spawn_x, y);
        agent.generation += 1;
        registry.set(agent.target, &[(Prop::X, self.cfg.spawn_x), (Prop::Y, y)]);
        tracing::debug!(lane, generation = agent.generation, y, "fish respawned");
        true
    }

    /// Start a crossing plus its tail wiggle.
    fn swim(
        &mut self,
        lane: usize,
        scheduler: &mut Scheduler<SchoolCue>,
        registry: &mut TargetRegistry,
        viewport: &dyn Viewport,
    ) -> Vec<TaskHandle> {
        let Some(agent) = self.slots.get_mut(lane).and_then(Option::as_mut) else {
            return Vec::new();
        };
        // A bounded wiggle has usually finished by now and cancel() is a no-op
        // for it. One still running is cut here so wiggles never stack.
        if let Some(old) = agent.wiggle.take() {
            old.cancel();
        }
        if !registry.is_alive(agent.target) {
            tracing::debug!(lane, "fish target destroyed, agent parked");
            agent.cancel_all();
            agent.state = AgentState::Idle;
            return Vec::new();
        }

        let cfg = &self.cfg;
        let secs = cfg.traverse_secs.sample(&mut self.rng);
        let exit_x = viewport.width() + cfg.exit_margin;
        agent.traverse_secs = secs;
        agent.exit_x = exit_x;

        registry.set(agent.target, &[(Prop::Rotation, 0.0)]);
        let crossing = TweenSpec::from_to([agent.target], secs)
            .prop_from_to(Prop::X, agent.spawn.x, exit_x)
            .ease(cfg.ease);
        let wiggle = TweenSpec::to([agent.target], cfg.wiggle_secs)
            .prop(Prop::Rotation, cfg.wiggle_deg)
            .ease(cfg.ease)
            .yoyo(true)
            .repeat(Repeat::Count(cfg.wiggle_repeats));

        let cue = SchoolCue::Arrive {
            lane,
            generation: agent.generation,
        };
        let mut started = Vec::with_capacity(2);
        for (spec, cue) in [(crossing, Some(cue)), (wiggle, None)] {
            match scheduler.schedule_tween(registry, spec, cue) {
                Ok(h) => started.push(h),
                Err(err) => {
                    tracing::warn!(lane, %err, "fish tween rejected, agent parked");
                    for h in &started {
                        h.cancel();
                    }
                    agent.state = AgentState::Idle;
                    return Vec::new();
                }
            }
        }

        agent.traverse = Some(started[0].clone());
        agent.wiggle = Some(started[1].clone());
        agent.state = AgentState::Traversing;
        started
    }

    /// Cancel every agent task and park all agents. Returns how many tasks were
    /// still live.
    pub fn halt(&mut self) -> usize {
        let mut canceled = 0;
        for agent in self.slots.iter_mut().flatten() {
            canceled += agent.cancel_all();
            agent.state = AgentState::Idle;
        }
        canceled
    }
}

#[cfg(test)]
#[path = "../../tests/unit/choreo/school.rs"]
mod tests;
