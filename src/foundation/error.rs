/// Convenience result type used across shotframe.
pub type ShotframeResult<T> = Result<T, ShotframeError>;

/// Top-level error taxonomy for fallible APIs.
///
/// Layout diagnostics are not errors in this sense; they are collected as
/// [`crate::LayoutError`] values on a [`crate::LayoutPass`].
#[derive(thiserror::Error, Debug)]
pub enum ShotframeError {
    /// Invalid caller-provided data (fonts, sizes, frames).
    #[error("validation error: {0}")]
    Validation(String),

    /// Project file is missing required structure.
    #[error("project error: {0}")]
    Project(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ShotframeError {
    /// Build a [`ShotframeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ShotframeError::Project`] value.
    pub fn project(msg: impl Into<String>) -> Self {
        Self::Project(msg.into())
    }

    /// Build a [`ShotframeError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
