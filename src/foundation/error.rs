/// Convenience result type used across Brandpost.
pub type BrandpostResult<T> = Result<T, BrandpostError>;

/// Top-level error taxonomy used by editor APIs.
///
/// Geometry never fails: drag mapping and document setters clamp instead of erroring.
#[derive(thiserror::Error, Debug)]
pub enum BrandpostError {
    /// Invalid user-provided document or configuration data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Picked image bytes could not be decoded or addressed.
    #[error("asset error: {0}")]
    Asset(String),

    /// The backing store could not be read or written.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// Rasterization or PNG encoding failed.
    #[error("export failed, try again: {0}")]
    Export(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BrandpostError {
    /// Build a [`BrandpostError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`BrandpostError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`BrandpostError::Persistence`] value.
    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }

    /// Build a [`BrandpostError::Export`] value.
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    /// Build a [`BrandpostError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
