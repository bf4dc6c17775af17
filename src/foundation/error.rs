/// Convenience result type used across genstudio.
pub type StudioResult<T> = Result<T, StudioError>;

/// Top-level error taxonomy used by the compositor and studio APIs.
#[derive(thiserror::Error, Debug)]
pub enum StudioError {
    /// Non-positive (or backend-unrepresentable) canvas width or height.
    #[error("invalid dimension: {width}x{height} (each side must be in 1..={max})")]
    InvalidDimension {
        /// Requested width.
        width: i64,
        /// Requested height.
        height: i64,
        /// Largest side the raster backend accepts.
        max: u32,
    },

    /// A palette with no colors.
    #[error("invalid palette: a palette needs at least one color")]
    InvalidPalette,

    /// A palette name that is not in the built-in table.
    #[error("unknown palette '{0}'")]
    UnknownPalette(String),

    /// A shape mode name other than `blob` or `spiky`.
    #[error("unknown shape mode '{0}'")]
    UnknownMode(String),

    /// Invalid user-provided data outside the dedicated variants above.
    #[error("validation error: {0}")]
    Validation(String),

    /// Internal failures while rasterizing or compositing.
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StudioError {
    /// Build a [`StudioError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`StudioError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
