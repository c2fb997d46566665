//! The shared frame scheduler and group cancellation.

pub mod scheduler;
pub mod teardown;
