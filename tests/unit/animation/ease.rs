use super::*;

const ALL: [Ease; 13] = [
    Ease::Linear,
    Ease::InQuad,
    Ease::OutQuad,
    Ease::InOutQuad,
    Ease::InCubic,
    Ease::OutCubic,
    Ease::InOutCubic,
    Ease::InQuart,
    Ease::OutQuart,
    Ease::InOutQuart,
    Ease::InSine,
    Ease::OutSine,
    Ease::InOutSine,
];

#[test]
fn endpoints_are_stable() {
    for ease in ALL {
        assert_eq!(ease.apply(0.0), 0.0, "{ease:?}");
        assert_eq!(ease.apply(1.0), 1.0, "{ease:?}");
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in ALL {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b, "{ease:?}");
        assert!(b < c, "{ease:?}");
    }
}

#[test]
fn in_out_sine_is_symmetric_about_midpoint() {
    let mid = Ease::InOutSine.apply(0.5);
    assert!((mid - 0.5).abs() < 1e-12);
    let a = Ease::InOutSine.apply(0.2);
    let b = Ease::InOutSine.apply(0.8);
    assert!((a + b - 1.0).abs() < 1e-12);
}

#[test]
fn decelerate_front_loads_motion() {
    assert!(Ease::OutCubic.apply(0.5) > 0.8);
    assert_eq!(Ease::OutQuart.apply(0.5), 0.9375);
    assert!(Ease::OutQuart.apply(0.5) > Ease::OutCubic.apply(0.5));
}

#[test]
fn quart_family_meets_at_midpoint() {
    assert_eq!(Ease::InQuart.apply(0.5), 0.0625);
    assert_eq!(Ease::InOutQuart.apply(0.5), 0.5);
    let a = Ease::InOutQuart.apply(0.3);
    let b = Ease::InOutQuart.apply(0.7);
    assert!((a + b - 1.0).abs() < 1e-12);
}

#[test]
fn out_of_range_progress_is_clamped() {
    assert_eq!(Ease::OutCubic.apply(-1.0), 0.0);
    assert_eq!(Ease::InOutSine.apply(2.0), 1.0);
}
