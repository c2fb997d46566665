use std::{cell::Cell, rc::Rc};

use crate::{
    animation::ease::Ease,
    animation::prop::ResolvedTrack,
    animation::tween::TweenSpec,
    foundation::core::{Fps, FrameIndex},
    foundation::error::HeroResult,
    scene::registry::{TargetId, TargetRegistry},
};

/// Identifier of a scheduled task, unique per scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct TaskId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum TaskKind {
    /// One-shot tween (possibly with a bounded repeat).
    Tween,
    /// Tween with infinite repeat.
    Loop,
    /// Delayed one-shot call.
    Call,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum TaskStatus {
    /// Scheduled, delay not yet elapsed.
    Pending,
    Active,
    Completed,
    Canceled,
}

/// Cheap shared handle to a scheduled task.
///
/// The status outlives the task itself, so a handle can still be inspected
/// after the scheduler has released the task.
#[derive(Clone, Debug)]
pub struct TaskHandle {
    id: TaskId,
    kind: TaskKind,
    status: Rc<Cell<TaskStatus>>,
}

impl TaskHandle {
    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn kind(&self) -> TaskKind {
        self.kind
    }

    pub fn status(&self) -> TaskStatus {
        self.status.get()
    }

    /// Pending or active.
    pub fn is_live(&self) -> bool {
        matches!(self.status(), TaskStatus::Pending | TaskStatus::Active)
    }

    /// Cancel the task before the next tick. Returns `true` only when this call
    /// actually stopped a live task; finished or canceled tasks are left alone.
    pub fn cancel(&self) -> bool {
        if !self.is_live() {
            return false;
        }
        self.status.set(TaskStatus::Canceled);
        true
    }

    fn set(&self, status: TaskStatus) {
        self.status.set(status);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    /// A tween finished its last iteration.
    Completed,
    /// A scheduled call fired.
    Fired,
}

/// Completion notice produced by [`Scheduler::tick`].
#[derive(Clone, Debug)]
pub struct SchedulerEvent<C> {
    pub handle: TaskHandle,
    pub kind: EventKind,
    pub cue: Option<C>,
}

struct Task<C> {
    handle: TaskHandle,
    /// First frame on which the task runs.
    start_frame: u64,
    cue: Option<C>,
    body: Body,
}

enum Body {
    Tween {
        spec: TweenSpec,
        ease: Ease,
        resolved: Option<Vec<(TargetId, Vec<ResolvedTrack>)>>,
    },
    Call,
}

/// Single-threaded, frame-driven scheduler shared by every animation in a scene.
///
/// Time is derived from the frame counter (`frame * den / num`) rather than
/// accumulated, so loops do not drift. Within one tick tasks run in
/// registration order.
pub struct Scheduler<C> {
    fps: Fps,
    frame: FrameIndex,
    default_ease: Ease,
    next_id: u64,
    tasks: Vec<Task<C>>,
}

impl<C: Clone> Scheduler<C> {
    pub fn new(fps: Fps) -> Self {
        Self {
            fps,
            frame: FrameIndex(0),
            default_ease: Ease::default(),
            next_id: 0,
            tasks: Vec::new(),
        }
    }

    pub fn fps(&self) -> Fps {
        self.fps
    }

    pub fn frame(&self) -> FrameIndex {
        self.frame
    }

    /// Seconds since the scheduler was created.
    pub fn now(&self) -> f64 {
        self.fps.frames_to_secs(self.frame.0)
    }

    /// Tasks that are still pending or active.
    pub fn live_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.handle.is_live()).count()
    }

    /// Frame on which something `delay` seconds from now starts. Float noise
    /// in summed offsets must not push a start off its frame boundary.
    fn start_frame(&self, delay: f64) -> u64 {
        self.frame.0 + self.fps.secs_to_frames_ceil(delay - 1e-9)
    }

    fn next_handle(&mut self, kind: TaskKind) -> TaskHandle {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        TaskHandle {
            id,
            kind,
            status: Rc::new(Cell::new(TaskStatus::Pending)),
        }
    }

    /// Schedule a tween. `from_to` specs write their start values right away.
    pub fn schedule_tween(
        &mut self,
        registry: &mut TargetRegistry,
        spec: TweenSpec,
        cue: Option<C>,
    ) -> HeroResult<TaskHandle> {
        spec.validate()?;
        if spec.immediate_render {
            for &id in &spec.targets {
                if let Some(state) = registry.get_mut(id) {
                    for track in &spec.tracks {
                        if let Some(from) = track.from {
                            track.prop.write(state, from);
                        }
                    }
                }
            }
        }

        let kind = if spec.is_loop() {
            TaskKind::Loop
        } else {
            TaskKind::Tween
        };
        let handle = self.next_handle(kind);
        let ease = spec.ease.unwrap_or(self.default_ease);
        let start_frame = self.start_frame(spec.delay);
        self.tasks.push(Task {
            handle: handle.clone(),
            start_frame,
            cue,
            body: Body::Tween {
                spec,
                ease,
                resolved: None,
            },
        });
        Ok(handle)
    }

    /// Schedule a one-shot call `delay` seconds from now.
    pub fn schedule_call(&mut self, delay: f64, cue: Option<C>) -> TaskHandle {
        let delay = if delay.is_finite() { delay.max(0.0) } else { 0.0 };
        let handle = self.next_handle(TaskKind::Call);
        let start_frame = self.start_frame(delay);
        self.tasks.push(Task {
            handle: handle.clone(),
            start_frame,
            cue,
            body: Body::Call,
        });
        handle
    }

    /// Advance one frame and apply every live task.
    pub fn tick(&mut self, registry: &mut TargetRegistry) -> Vec<SchedulerEvent<C>> {
        self.frame = FrameIndex(self.frame.0 + 1);
        let frame = self.frame.0;
        let fps = self.fps;

        self.tasks.retain(|t| t.handle.status() != TaskStatus::Canceled);

        let mut events = Vec::new();
        for task in &mut self.tasks {
            if frame < task.start_frame {
                continue;
            }
            match &mut task.body {
                Body::Call => {
                    task.handle.set(TaskStatus::Completed);
                    events.push(SchedulerEvent {
                        handle: task.handle.clone(),
                        kind: EventKind::Fired,
                        cue: task.cue.clone(),
                    });
                }
                Body::Tween {
                    spec,
                    ease,
                    resolved,
                } => {
                    let bound = resolved.get_or_insert_with(|| {
                        task.handle.set(TaskStatus::Active);
                        spec.targets
                            .iter()
                            .filter_map(|&id| {
                                let state = registry.get(id)?;
                                let tracks = spec
                                    .tracks
                                    .iter()
                                    .map(|tr| ResolvedTrack::resolve(tr, state))
                                    .collect();
                                Some((id, tracks))
                            })
                            .collect()
                    });

                    let phase = spec.phase(fps.frames_to_secs(frame - task.start_frame));
                    let eased = ease.apply(phase.progress);
                    for (id, tracks) in bound.iter() {
                        // Destroyed targets are skipped, never written.
                        let Some(state) = registry.get_mut(*id) else {
                            continue;
                        };
                        for tr in tracks {
                            tr.prop.write(state, tr.value_at(eased));
                        }
                    }

                    if phase.done {
                        task.handle.set(TaskStatus::Completed);
                        events.push(SchedulerEvent {
                            handle: task.handle.clone(),
                            kind: EventKind::Completed,
                            cue: task.cue.clone(),
                        });
                    }
                }
            }
        }

        self.tasks.retain(|t| t.handle.is_live());
        events
    }

    /// Tick as many whole frames as fit in `secs`, collecting events in order.
    pub fn advance(&mut self, registry: &mut TargetRegistry, secs: f64) -> Vec<SchedulerEvent<C>> {
        let frames = self.fps.secs_to_frames_floor(secs + 1e-9);
        let mut events = Vec::new();
        for _ in 0..frames {
            events.extend(self.tick(registry));
        }
        events
    }

    /// Cancel every live task. Returns how many were actually canceled.
    pub fn cancel_all(&mut self) -> usize {
        let canceled = self.tasks.iter().filter(|t| t.handle.cancel()).count();
        self.tasks.clear();
        tracing::trace!(canceled, frame = self.frame.0, "scheduler drained");
        canceled
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/scheduler.rs"]
mod tests;
