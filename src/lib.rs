//! Animation choreography for a decorative ocean hero scene.
//!
//! Everything runs on one frame-driven [`Scheduler`] and writes into a
//! [`TargetRegistry`] of element states that a rendering layer reads back:
//!
//! - a one-shot staggered entrance (heading, subtext, CTA)
//! - infinite ambient yoyo loops (heading glow, island sway, boat bob and drift)
//! - a school of autonomous fish that cross the viewport forever
//!
//! [`SceneController`] starts all three on mount and cancels them as a group on
//! unmount.
#![forbid(unsafe_code)]

pub mod animation;
pub mod choreo;
pub mod config;
pub mod foundation;
pub mod runtime;
pub mod scene;

pub use crate::animation::ease::Ease;
pub use crate::animation::prop::{Prop, PropValue};
pub use crate::animation::timeline::{Position, Timeline};
pub use crate::animation::tween::{Repeat, TweenSpec};
pub use crate::choreo::ambient::{AmbientLoops, AmbientTargets, start_ambient_loops};
pub use crate::choreo::entrance::{Entrance, EntranceTargets, entrance_timeline, run_entrance};
pub use crate::choreo::school::{AgentState, FishAgent, FishSchool, SchoolCue};
pub use crate::config::{
    AmbientConfig, Band, EntranceConfig, MotionConfig, RevealStep, SchoolConfig,
};
pub use crate::foundation::core::{Affine, Fps, FrameIndex, Rgba8Premul, Size, Vec2};
pub use crate::foundation::error::{HeroError, HeroResult};
pub use crate::runtime::scheduler::{
    EventKind, Scheduler, SchedulerEvent, TaskHandle, TaskId, TaskKind, TaskStatus,
};
pub use crate::runtime::teardown::TeardownSet;
pub use crate::scene::controller::{
    AgentSnapshot, MountReport, SceneController, ScenePhase, SceneSnapshot, TargetSnapshot,
};
pub use crate::scene::registry::{TargetId, TargetRegistry};
pub use crate::scene::target::{Role, SceneTargets, TargetState};
pub use crate::scene::viewport::{FixedViewport, ResizableViewport, Viewport};
