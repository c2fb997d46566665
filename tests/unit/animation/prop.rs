use super::*;

#[test]
fn relative_tracks_resolve_against_live_value() {
    let mut state = TargetState::default();
    Prop::Y.write(&mut state, 30.0);

    let bob = Track {
        prop: Prop::Y,
        from: None,
        to: PropValue::Rel(-10.0),
    };
    let r = ResolvedTrack::resolve(&bob, &state);
    assert_eq!(r.from, 30.0);
    assert_eq!(r.to, 20.0);
    assert_eq!(r.value_at(0.5), 25.0);
}

#[test]
fn explicit_from_overrides_live_value() {
    let mut state = TargetState::default();
    Prop::X.write(&mut state, 500.0);

    let swim = Track {
        prop: Prop::X,
        from: Some(-200.0),
        to: PropValue::Abs(1640.0),
    };
    let r = ResolvedTrack::resolve(&swim, &state);
    assert_eq!(r.from, -200.0);
    assert_eq!(r.value_at(1.0), 1640.0);
}

#[test]
fn writes_clamp_visual_ranges() {
    let mut state = TargetState::default();
    Prop::Opacity.write(&mut state, 1.4);
    Prop::Blur.write(&mut state, -2.0);
    assert_eq!(Prop::Opacity.read(&state), 1.0);
    assert_eq!(Prop::Blur.read(&state), 0.0);
}
