//! Scene-side model: targets, the registry holding them, viewport metrics and
//! the lifecycle controller.

pub mod controller;
pub mod registry;
pub mod target;
pub mod viewport;
