/// Time base, colors and the kurbo geometry re-exports.
pub mod core;
/// Crate error type.
pub mod error;
