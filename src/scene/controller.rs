//! Mount/unmount lifecycle of the hero scene.
//!
//! The controller owns the registry, the scheduler and the fish school, starts
//! the entrance, the ambient loops and the school on mount, and tears every one
//! of them down on unmount. Partial mounts are normal: a missing role only
//! drops the animations that need it.

use crate::{
    choreo::ambient::{AmbientLoops, AmbientTargets, start_ambient_loops},
    choreo::entrance::{Entrance, EntranceTargets, run_entrance},
    choreo::school::{AgentState, FishSchool, SchoolCue},
    config::MotionConfig,
    foundation::core::FrameIndex,
    foundation::error::HeroResult,
    runtime::scheduler::Scheduler,
    runtime::teardown::TeardownSet,
    scene::registry::{TargetId, TargetRegistry},
    scene::target::{Role, SceneTargets, TargetState},
    scene::viewport::Viewport,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum ScenePhase {
    Created,
    Mounted,
    Unmounted,
}

/// What a mount actually started.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct MountReport {
    pub entrance_tweens: usize,
    pub ambient_loops: usize,
    /// Fish whose launch was queued.
    pub fish_scheduled: usize,
    /// Fixed roles that had no live target and were skipped.
    pub missing_roles: Vec<Role>,
    pub missing_fish: usize,
}

/// Serializable view of one target at a point in time.
#[derive(Clone, Debug, serde::Serialize)]
pub struct TargetSnapshot {
    pub role: Role,
    pub state: TargetState,
    /// Element transform as `[a, b, c, d, e, f]`.
    pub affine: [f64; 6],
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct AgentSnapshot {
    pub lane: usize,
    pub state: AgentState,
    pub generation: u64,
    pub traverse_secs: f64,
    pub exit_x: f64,
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct SceneSnapshot {
    pub frame: FrameIndex,
    pub time: f64,
    pub phase: ScenePhase,
    pub live_tasks: usize,
    pub targets: Vec<TargetSnapshot>,
    pub agents: Vec<AgentSnapshot>,
}

const FIXED_ROLES: [Role; 6] = [
    Role::Heading,
    Role::Subtext,
    Role::Cta,
    Role::IslandLeft,
    Role::IslandRight,
    Role::Boat,
];

pub struct SceneController {
    config: MotionConfig,
    phase: ScenePhase,
    registry: TargetRegistry,
    scheduler: Scheduler<SchoolCue>,
    school: FishSchool,
    viewport: Box<dyn Viewport>,
    teardown: TeardownSet,
    entrance: Option<Entrance>,
    ambient: AmbientLoops,
}

impl SceneController {
    pub fn new(config: MotionConfig, viewport: impl Viewport + 'static) -> HeroResult<Self> {
        config.validate()?;
        Ok(Self {
            scheduler: Scheduler::new(config.fps),
            school: FishSchool::new(config.school.clone(), config.seed),
            viewport: Box::new(viewport),
            phase: ScenePhase::Created,
            registry: TargetRegistry::new(),
            teardown: TeardownSet::new(),
            entrance: None,
            ambient: AmbientLoops::default(),
            config,
        })
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    pub fn phase(&self) -> ScenePhase {
        self.phase
    }

    pub fn registry(&self) -> &TargetRegistry {
        &self.registry
    }

    /// Element registration happens here, before [`SceneController::on_mount`].
    pub fn registry_mut(&mut self) -> &mut TargetRegistry {
        &mut self.registry
    }

    pub fn scheduler(&self) -> &Scheduler<SchoolCue> {
        &self.scheduler
    }

    pub fn school(&self) -> &FishSchool {
        &self.school
    }

    pub fn entrance(&self) -> Option<&Entrance> {
        self.entrance.as_ref()
    }

    pub fn ambient(&self) -> &AmbientLoops {
        &self.ambient
    }

    /// Handles still tracked for teardown.
    pub fn tracked_tasks(&self) -> usize {
        self.teardown.len()
    }

    pub fn now(&self) -> f64 {
        self.scheduler.now()
    }

    fn live(&self, targets: &SceneTargets, role: Role) -> Option<TargetId> {
        targets.get(role).filter(|id| self.registry.is_alive(*id))
    }

    /// Start the entrance, the ambient loops and the fish school. Runs at most
    /// once; later calls are logged and ignored.
    #[tracing::instrument(skip_all, fields(phase = ?self.phase))]
    pub fn on_mount(&mut self, targets: &SceneTargets) -> MountReport {
        if self.phase != ScenePhase::Created {
            tracing::warn!("scene already mounted or torn down, mount ignored");
            return MountReport::default();
        }
        self.phase = ScenePhase::Mounted;

        let mut report = MountReport {
            missing_roles: FIXED_ROLES
                .into_iter()
                .filter(|r| self.live(targets, *r).is_none())
                .collect(),
            ..MountReport::default()
        };
        if !report.missing_roles.is_empty() {
            tracing::debug!(missing = ?report.missing_roles, "mounting with missing roles");
        }

        let entrance_targets = EntranceTargets {
            heading: self.live(targets, Role::Heading),
            subtext: self.live(targets, Role::Subtext),
            cta: self.live(targets, Role::Cta),
        };
        match run_entrance(
            &mut self.scheduler,
            &mut self.registry,
            &self.config.entrance,
            entrance_targets,
        ) {
            Ok(entrance) => {
                report.entrance_tweens = entrance.handles.len();
                self.teardown.track_all(entrance.handles.iter().cloned());
                self.entrance = Some(entrance);
            }
            Err(err) => tracing::warn!(%err, "entrance not started"),
        }

        let ambient_targets = AmbientTargets {
            heading: self.live(targets, Role::Heading),
            island_left: self.live(targets, Role::IslandLeft),
            island_right: self.live(targets, Role::IslandRight),
            boat: self.live(targets, Role::Boat),
        };
        match start_ambient_loops(
            &mut self.scheduler,
            &mut self.registry,
            &self.config.ambient,
            ambient_targets,
        ) {
            Ok(loops) => {
                report.ambient_loops = loops.len();
                self.teardown.track_all(loops.handles().cloned());
                self.ambient = loops;
            }
            Err(err) => tracing::warn!(%err, "ambient loops not started"),
        }

        let slots = targets.fish_slots(self.config.fish_count);
        let launches = self
            .school
            .start(&mut self.scheduler, &mut self.registry, &slots);
        report.fish_scheduled = launches.len();
        report.missing_fish = slots.len() - launches.len();
        self.teardown.track_all(launches);

        tracing::info!(
            entrance = report.entrance_tweens,
            ambient = report.ambient_loops,
            fish = report.fish_scheduled,
            "scene mounted"
        );
        report
    }

    /// Stop every animation the scene started. Targets stay registered until
    /// the host destroys them; nothing writes to them after this returns.
    /// Returns how many live tasks were canceled; repeated calls return 0.
    #[tracing::instrument(skip_all, fields(phase = ?self.phase))]
    pub fn on_unmount(&mut self) -> usize {
        match self.phase {
            ScenePhase::Unmounted => return 0,
            ScenePhase::Created => {
                self.phase = ScenePhase::Unmounted;
                self.teardown.cancel_all();
                return 0;
            }
            ScenePhase::Mounted => {}
        }
        self.phase = ScenePhase::Unmounted;

        let mut canceled = self.teardown.cancel_all();
        canceled += self.school.halt();
        let stray = self.scheduler.cancel_all();
        if stray > 0 {
            tracing::warn!(stray, "untracked tasks canceled at teardown");
        }
        canceled += stray;

        tracing::info!(canceled, "scene unmounted");
        canceled
    }

    /// Advance one frame and route completions to the fish school. Does
    /// nothing unless mounted. Returns the number of events handled.
    pub fn tick(&mut self) -> usize {
        if self.phase != ScenePhase::Mounted {
            return 0;
        }
        let events = self.scheduler.tick(&mut self.registry);
        for ev in &events {
            let started = self.school.handle_event(
                &mut self.scheduler,
                &mut self.registry,
                self.viewport.as_ref(),
                ev,
            );
            self.teardown.track_all(started);
        }
        self.teardown.prune();
        events.len()
    }

    /// Tick as many whole frames as fit in `secs`.
    pub fn advance(&mut self, secs: f64) -> usize {
        let frames = self.config.fps.secs_to_frames_floor(secs + 1e-9);
        (0..frames).map(|_| self.tick()).sum()
    }

    pub fn snapshot(&self) -> SceneSnapshot {
        let targets = self
            .registry
            .iter()
            .map(|(id, role, state)| {
                let size = self.registry.size(id).unwrap_or_default();
                TargetSnapshot {
                    role,
                    state: *state,
                    affine: state.to_affine(size).as_coeffs(),
                }
            })
            .collect();
        let agents = self
            .school
            .agents()
            .map(|a| AgentSnapshot {
                lane: a.lane,
                state: a.state,
                generation: a.generation,
                traverse_secs: a.traverse_secs,
                exit_x: a.exit_x,
            })
            .collect();

        SceneSnapshot {
            frame: self.scheduler.frame(),
            time: self.scheduler.now(),
            phase: self.phase,
            live_tasks: self.scheduler.live_count(),
            targets,
            agents,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/controller.rs"]
mod tests;
