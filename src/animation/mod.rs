//! Tween building blocks: easing curves, animatable properties, tween specs
//! and relative-position timelines.

pub mod ease;
pub mod prop;
pub mod timeline;
pub mod tween;
