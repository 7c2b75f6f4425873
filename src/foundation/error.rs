/// Convenience result type used across the engine.
pub type AlertResult<T> = Result<T, AlertError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Unmatched tiers and missing template values are deliberately absent: the
/// former is the [`crate::Composition::Suppressed`] outcome and the latter
/// substitutes an empty string.
#[derive(thiserror::Error, Debug)]
pub enum AlertError {
    /// A layout import could not be parsed or had the wrong shape.
    #[error("malformed import: {0}")]
    MalformedImport(String),

    /// Tier, layout, or settings data violates an invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AlertError {
    /// Build an [`AlertError::MalformedImport`] value.
    pub fn malformed_import(msg: impl Into<String>) -> Self {
        Self::MalformedImport(msg.into())
    }

    /// Build an [`AlertError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build an [`AlertError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
