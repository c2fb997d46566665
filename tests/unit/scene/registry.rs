use super::*;

fn fish_size() -> Size {
    Size::new(48.0, 24.0)
}

#[test]
fn destroyed_handles_never_resolve_again() {
    let mut reg = TargetRegistry::new();
    let a = reg.spawn(Role::Fish(0), fish_size());
    assert!(reg.destroy(a));
    assert!(!reg.destroy(a));
    assert!(reg.get(a).is_none());

    // Slot reuse bumps the generation, so the old handle stays dead.
    let b = reg.spawn(Role::Fish(1), fish_size());
    assert_ne!(a, b);
    assert!(reg.get(a).is_none());
    assert_eq!(reg.role(b), Some(Role::Fish(1)));
}

#[test]
fn set_counts_mutations_and_ignores_stale_handles() {
    let mut reg = TargetRegistry::new();
    let boat = reg.spawn(Role::Boat, Size::new(260.0, 120.0));
    assert_eq!(reg.revision(boat), Some(0));
    assert!(reg.set(boat, &[(Prop::X, 12.0), (Prop::Rotation, -2.0)]));
    assert_eq!(reg.revision(boat), Some(1));
    let s = reg.get(boat).unwrap();
    assert_eq!(s.translate.x, 12.0);
    assert_eq!(s.rotation_deg, -2.0);

    reg.destroy(boat);
    assert!(!reg.set(boat, &[(Prop::X, 0.0)]));
}

#[test]
fn clear_invalidates_every_handle() {
    let mut reg = TargetRegistry::new();
    let ids: Vec<_> = (0..3).map(|i| reg.spawn(Role::Fish(i), fish_size())).collect();
    assert_eq!(reg.len(), 3);
    assert_eq!(reg.clear(), 3);
    assert!(reg.is_empty());
    assert!(ids.iter().all(|id| !reg.is_alive(*id)));
    assert_eq!(reg.clear(), 0);
}
