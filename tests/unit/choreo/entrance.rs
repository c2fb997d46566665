use super::*;
use crate::foundation::core::{Fps, Size};
use crate::runtime::scheduler::TaskStatus;
use crate::scene::target::Role;

struct Rig {
    sched: Scheduler<()>,
    reg: TargetRegistry,
    targets: EntranceTargets,
}

fn rig() -> Rig {
    let mut reg = TargetRegistry::new();
    let targets = EntranceTargets {
        heading: Some(reg.spawn(Role::Heading, Size::new(900.0, 160.0))),
        subtext: Some(reg.spawn(Role::Subtext, Size::new(700.0, 60.0))),
        cta: Some(reg.spawn(Role::Cta, Size::new(360.0, 48.0))),
    };
    Rig {
        sched: Scheduler::new(Fps::new(100, 1).unwrap()),
        reg,
        targets,
    }
}

#[test]
fn start_offsets_follow_negative_overlaps() {
    let mut r = rig();
    let e = run_entrance(
        &mut r.sched,
        &mut r.reg,
        &EntranceConfig::default(),
        r.targets,
    )
    .unwrap();
    assert_eq!(e.handles.len(), 3);
    assert!((e.start_times[0] - 0.0).abs() < 1e-9);
    assert!((e.start_times[1] - 0.5).abs() < 1e-9);
    assert!((e.start_times[2] - 0.9).abs() < 1e-9);
    // 1.1 + (0.9 - 0.6) + (0.8 - 0.5)
    assert!((e.total_duration - 1.7).abs() < 1e-9);
}

#[test]
fn everything_is_hidden_before_its_turn() {
    let mut r = rig();
    run_entrance(
        &mut r.sched,
        &mut r.reg,
        &EntranceConfig::default(),
        r.targets,
    )
    .unwrap();
    let heading = r.reg.get(r.targets.heading.unwrap()).unwrap();
    assert_eq!(heading.opacity, 0.0);
    assert_eq!(heading.translate.y, 40.0);
    assert_eq!(heading.blur_px, 6.0);
    let cta = r.reg.get(r.targets.cta.unwrap()).unwrap();
    assert_eq!(cta.opacity, 0.0);
    assert_eq!(cta.translate.y, 10.0);
}

#[test]
fn subtext_waits_for_its_offset_then_everything_settles() {
    let mut r = rig();
    let e = run_entrance(
        &mut r.sched,
        &mut r.reg,
        &EntranceConfig::default(),
        r.targets,
    )
    .unwrap();

    r.sched.advance(&mut r.reg, 0.45);
    assert_eq!(e.handles[0].status(), TaskStatus::Active);
    assert_eq!(e.handles[1].status(), TaskStatus::Pending);
    assert_eq!(r.reg.get(r.targets.subtext.unwrap()).unwrap().opacity, 0.0);

    r.sched.advance(&mut r.reg, 0.1);
    assert_eq!(e.handles[1].status(), TaskStatus::Active);

    r.sched.advance(&mut r.reg, 1.3);
    assert!(e.is_finished());
    for id in [r.targets.heading, r.targets.subtext, r.targets.cta] {
        let s = r.reg.get(id.unwrap()).unwrap();
        assert_eq!(s.opacity, 1.0);
        assert_eq!(s.translate.y, 0.0);
        assert_eq!(s.blur_px, 0.0);
    }
    assert_eq!(r.sched.live_count(), 0);
}

#[test]
fn missing_heading_keeps_remaining_schedule() {
    let mut r = rig();
    let targets = EntranceTargets {
        heading: None,
        ..r.targets
    };
    let e = run_entrance(&mut r.sched, &mut r.reg, &EntranceConfig::default(), targets).unwrap();
    assert_eq!(e.handles.len(), 2);
    assert!((e.start_times[1] - 0.5).abs() < 1e-9);

    r.sched.advance(&mut r.reg, 0.45);
    assert_eq!(e.handles[0].status(), TaskStatus::Pending);
}

#[test]
fn subtext_and_cta_start_on_exact_frames_at_60fps() {
    let mut r = rig();
    r.sched = Scheduler::new(Fps::default());
    let e = run_entrance(
        &mut r.sched,
        &mut r.reg,
        &EntranceConfig::default(),
        r.targets,
    )
    .unwrap();

    let mut tick_to = |frame: u64| {
        while r.sched.frame().0 < frame {
            r.sched.tick(&mut r.reg);
        }
    };
    tick_to(29);
    assert_eq!(e.handles[1].status(), TaskStatus::Pending);
    tick_to(30);
    assert_eq!(e.handles[1].status(), TaskStatus::Active);
    tick_to(53);
    assert_eq!(e.handles[2].status(), TaskStatus::Pending);
    tick_to(54);
    assert_eq!(e.handles[2].status(), TaskStatus::Active);
}
