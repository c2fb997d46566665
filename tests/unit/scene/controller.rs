use super::*;
use crate::foundation::core::Size;
use crate::runtime::scheduler::TaskStatus;
use crate::scene::viewport::FixedViewport;

fn controller(fish_count: usize) -> SceneController {
    let config = MotionConfig {
        fish_count,
        seed: Some(7),
        ..MotionConfig::default()
    };
    SceneController::new(config, FixedViewport(1280.0)).unwrap()
}

fn mount_all(ctl: &mut SceneController, skip: &[Role]) -> SceneTargets {
    let mut roles = FIXED_ROLES.to_vec();
    roles.extend((0..ctl.config().fish_count).map(Role::Fish));
    let mut targets = SceneTargets::new();
    for role in roles.into_iter().filter(|r| !skip.contains(r)) {
        let id = ctl.registry_mut().spawn(role, Size::new(100.0, 40.0));
        targets.insert(role, id);
    }
    targets
}

#[test]
fn full_mount_reports_everything_started() {
    let mut ctl = controller(3);
    let targets = mount_all(&mut ctl, &[]);
    let report = ctl.on_mount(&targets);
    assert_eq!(report.entrance_tweens, 3);
    assert_eq!(report.ambient_loops, 4);
    assert_eq!(report.fish_scheduled, 3);
    assert!(report.missing_roles.is_empty());
    assert_eq!(report.missing_fish, 0);
    assert_eq!(ctl.phase(), ScenePhase::Mounted);
    assert_eq!(ctl.tracked_tasks(), 10);
}

#[test]
fn missing_roles_are_reported_not_fatal() {
    let mut ctl = controller(2);
    let targets = mount_all(&mut ctl, &[Role::Cta, Role::Boat, Role::Fish(1)]);
    let report = ctl.on_mount(&targets);
    assert_eq!(report.entrance_tweens, 2);
    assert_eq!(report.ambient_loops, 2);
    assert_eq!(report.fish_scheduled, 1);
    assert_eq!(report.missing_fish, 1);
    assert_eq!(report.missing_roles, vec![Role::Cta, Role::Boat]);
}

#[test]
fn destroyed_before_mount_counts_as_missing() {
    let mut ctl = controller(0);
    let targets = mount_all(&mut ctl, &[]);
    let heading = targets.get(Role::Heading).unwrap();
    ctl.registry_mut().destroy(heading);
    let report = ctl.on_mount(&targets);
    assert_eq!(report.missing_roles, vec![Role::Heading]);
    assert_eq!(report.entrance_tweens, 2);
    assert_eq!(report.ambient_loops, 3);
}

#[test]
fn second_mount_is_ignored() {
    let mut ctl = controller(2);
    let targets = mount_all(&mut ctl, &[]);
    ctl.on_mount(&targets);
    let live = ctl.scheduler().live_count();
    assert_eq!(ctl.on_mount(&targets), MountReport::default());
    assert_eq!(ctl.scheduler().live_count(), live);
}

#[test]
fn unmount_cancels_everything_once() {
    let mut ctl = controller(4);
    let targets = mount_all(&mut ctl, &[]);
    ctl.on_mount(&targets);
    ctl.advance(3.0);

    let loops: Vec<_> = ctl.ambient().handles().cloned().collect();
    let live = ctl.scheduler().live_count();
    assert!(live > 0);

    assert_eq!(ctl.on_unmount(), live);
    assert_eq!(ctl.on_unmount(), 0);
    assert_eq!(ctl.phase(), ScenePhase::Unmounted);
    assert_eq!(ctl.scheduler().live_count(), 0);
    assert!(loops.iter().all(|h| h.status() == TaskStatus::Canceled));

    let revisions: Vec<_> = targets
        .iter()
        .map(|(_, id)| ctl.registry().revision(id))
        .collect();
    assert_eq!(ctl.advance(5.0), 0);
    let after: Vec<_> = targets
        .iter()
        .map(|(_, id)| ctl.registry().revision(id))
        .collect();
    assert_eq!(revisions, after);
    assert_eq!(ctl.on_mount(&targets), MountReport::default());
}

#[test]
fn unmount_before_mount_is_a_no_op() {
    let mut ctl = controller(1);
    let targets = mount_all(&mut ctl, &[]);
    assert_eq!(ctl.on_unmount(), 0);
    assert_eq!(ctl.on_mount(&targets), MountReport::default());
    assert_eq!(ctl.scheduler().live_count(), 0);
}

#[test]
fn tracked_set_shrinks_as_one_shots_finish() {
    let mut ctl = controller(0);
    let targets = mount_all(&mut ctl, &[]);
    ctl.on_mount(&targets);
    assert_eq!(ctl.tracked_tasks(), 7);
    ctl.advance(2.0);
    assert!(ctl.entrance().unwrap().is_finished());
    assert_eq!(ctl.tracked_tasks(), 4);
}

#[test]
fn snapshot_lists_targets_and_agents() {
    let mut ctl = controller(2);
    let targets = mount_all(&mut ctl, &[]);
    ctl.on_mount(&targets);
    ctl.advance(0.5);

    let snap = ctl.snapshot();
    assert_eq!(snap.phase, ScenePhase::Mounted);
    assert_eq!(snap.frame, FrameIndex(30));
    assert_eq!(snap.targets.len(), 8);
    assert_eq!(snap.agents.len(), 2);
    assert!(snap.live_tasks > 0);

    let json = serde_json::to_value(&snap).unwrap();
    assert!(json["targets"][0]["affine"].is_array());
}
