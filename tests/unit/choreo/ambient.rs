use super::*;
use crate::foundation::core::{Fps, Rgba8Premul, Size};
use crate::runtime::scheduler::{TaskKind, TaskStatus};
use crate::scene::target::Role;

fn full_rig() -> (Scheduler<()>, TargetRegistry, AmbientTargets) {
    let mut reg = TargetRegistry::new();
    let targets = AmbientTargets {
        heading: Some(reg.spawn(Role::Heading, Size::new(900.0, 160.0))),
        island_left: Some(reg.spawn(Role::IslandLeft, Size::new(600.0, 220.0))),
        island_right: Some(reg.spawn(Role::IslandRight, Size::new(600.0, 220.0))),
        boat: Some(reg.spawn(Role::Boat, Size::new(260.0, 120.0))),
    };
    (Scheduler::new(Fps::new(20, 1).unwrap()), reg, targets)
}

#[test]
fn four_infinite_loops_start() {
    let (mut sched, mut reg, targets) = full_rig();
    let loops = start_ambient_loops(&mut sched, &mut reg, &AmbientConfig::default(), targets)
        .unwrap();
    assert_eq!(loops.len(), 4);
    assert!(loops.handles().all(|h| h.kind() == TaskKind::Loop));
    assert_eq!(
        reg.get(targets.heading.unwrap()).unwrap().glow_color,
        Rgba8Premul::from_hex("#2eb3ff").unwrap()
    );
}

#[test]
fn loops_keep_running_across_long_spans() {
    let (mut sched, mut reg, targets) = full_rig();
    let loops = start_ambient_loops(&mut sched, &mut reg, &AmbientConfig::default(), targets)
        .unwrap();
    let mut t = 0.0;
    for span in [1.0, 13.7, 600.0, 3600.0] {
        sched.advance(&mut reg, span);
        t += span;
        assert!(
            loops.handles().all(|h| h.status() == TaskStatus::Active),
            "loop stopped by t={t}"
        );
    }
}

#[test]
fn islands_sway_in_lockstep_within_bounds() {
    let (mut sched, mut reg, targets) = full_rig();
    start_ambient_loops(&mut sched, &mut reg, &AmbientConfig::default(), targets).unwrap();
    let left = targets.island_left.unwrap();
    let right = targets.island_right.unwrap();
    for _ in 0..200 {
        sched.tick(&mut reg);
        let l = reg.get(left).unwrap().translate.y;
        let r = reg.get(right).unwrap().translate.y;
        assert_eq!(l, r);
        assert!((0.0..=6.0).contains(&l));
    }
    // Half period: fully raised. Full period: back home.
    let mut sched2 = Scheduler::<()>::new(Fps::new(20, 1).unwrap());
    let (_, mut reg2, t2) = full_rig();
    start_ambient_loops(&mut sched2, &mut reg2, &AmbientConfig::default(), t2).unwrap();
    sched2.advance(&mut reg2, 3.0);
    assert_eq!(reg2.get(t2.island_left.unwrap()).unwrap().translate.y, 6.0);
    sched2.advance(&mut reg2, 3.0);
    assert_eq!(reg2.get(t2.island_left.unwrap()).unwrap().translate.y, 0.0);
}

#[test]
fn bob_and_drift_touch_disjoint_properties() {
    let (mut sched, mut reg, targets) = full_rig();
    let boat = targets.boat.unwrap();
    start_ambient_loops(&mut sched, &mut reg, &AmbientConfig::default(), targets).unwrap();

    sched.advance(&mut reg, 2.4);
    let s = *reg.get(boat).unwrap();
    assert_eq!(s.translate.y, -10.0);
    assert_eq!(s.rotation_deg, -2.0);
    assert!(s.translate.x > 0.0 && s.translate.x < 12.0);
    assert_eq!(s.pivot, Vec2::new(0.5, 0.5));

    sched.advance(&mut reg, 4.6);
    let s = *reg.get(boat).unwrap();
    assert_eq!(s.translate.x, 12.0);
}

#[test]
fn missing_targets_drop_only_their_loops() {
    let (mut sched, mut reg, targets) = full_rig();
    let partial = AmbientTargets {
        boat: None,
        island_right: None,
        ..targets
    };
    let loops =
        start_ambient_loops(&mut sched, &mut reg, &AmbientConfig::default(), partial).unwrap();
    assert!(loops.glow.is_some());
    assert!(loops.sway.is_some());
    assert!(loops.bob.is_none() && loops.drift.is_none());
    assert_eq!(loops.cancel_all(), 2);
    assert_eq!(loops.cancel_all(), 0);
}
