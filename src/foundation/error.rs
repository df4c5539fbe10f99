/// Convenience result type used across the crate.
pub type AvatarResult<T> = Result<T, AvatarError>;

/// Top-level error taxonomy used by rendering and export APIs.
#[derive(thiserror::Error, Debug)]
pub enum AvatarError {
    /// A design id outside the closed set of background variants.
    #[error("invalid design: {0}")]
    InvalidDesign(String),

    /// Malformed render parameters or image data.
    #[error("validation error: {0}")]
    Validation(String),

    /// No usable font could be resolved for a text pass.
    #[error("font error: {0}")]
    Font(String),

    /// The PNG codec failed to serialize or parse a raster.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Backend invariant failures while executing a render plan.
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AvatarError {
    /// Build a [`AvatarError::InvalidDesign`] value.
    pub fn invalid_design(id: impl Into<String>) -> Self {
        Self::InvalidDesign(id.into())
    }

    /// Build a [`AvatarError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`AvatarError::Font`] value.
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    /// Build a [`AvatarError::Encoding`] value.
    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding(msg.into())
    }

    /// Build a [`AvatarError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
