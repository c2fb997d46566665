/// Convenience result type used across hero-motion.
pub type HeroResult<T> = Result<T, HeroError>;

/// Top-level error taxonomy used by the public APIs.
///
/// Scene choreography itself never fails: missing targets, repeated teardown and
/// stale cancels are silent no-ops. Errors only surface while building tween
/// specs or loading configuration.
#[derive(thiserror::Error, Debug)]
pub enum HeroError {
    /// Invalid user-provided values.
    #[error("validation error: {0}")]
    Validation(String),

    /// Malformed tween or timeline definitions.
    #[error("animation error: {0}")]
    Animation(String),

    /// Configuration could not be read.
    #[error("config error: {0}")]
    Config(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HeroError {
    /// Build a [`HeroError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`HeroError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`HeroError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`HeroError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
