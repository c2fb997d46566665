//! The hero choreography: one-shot entrance, ambient loops and the fish school.

pub mod ambient;
pub mod entrance;
pub mod school;
