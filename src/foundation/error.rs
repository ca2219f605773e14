/// Convenience result type used across themeframe.
pub type ThemeFrameResult<T> = Result<T, ThemeFrameError>;

/// Top-level error taxonomy.
///
/// Compositing itself never fails: missing elements and degenerate geometry degrade to empty
/// buffers. Errors only surface at IO and construction boundaries.
#[derive(thiserror::Error, Debug)]
pub enum ThemeFrameError {
    /// Invalid caller-provided data (buffer sizes, options).
    #[error("validation error: {0}")]
    Validation(String),

    /// The element source could not be loaded or parsed.
    #[error("element source error: {0}")]
    Source(String),

    /// A persistent cache store failed to read or write an entry.
    #[error("cache error: {0}")]
    Cache(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ThemeFrameError {
    /// Build a [`ThemeFrameError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ThemeFrameError::Source`] value.
    pub fn source(msg: impl Into<String>) -> Self {
        Self::Source(msg.into())
    }

    /// Build a [`ThemeFrameError::Cache`] value.
    pub fn cache(msg: impl Into<String>) -> Self {
        Self::Cache(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
