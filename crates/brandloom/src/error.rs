//! Error taxonomy for the engine.
//!
//! Generators never fail on unusual numbers. Only structurally invalid input
//! (a malformed color string, a parameter rejected by strict validation) or a
//! failed export surfaces as an error.

/// Convenience result type used across brandloom.
pub type BrandloomResult<T> = Result<T, BrandloomError>;

/// Top-level error type.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum BrandloomError {
    /// A color string was not of the form `#RRGGBB`.
    #[error("invalid color format {input:?}: {reason}")]
    InvalidColorFormat { input: String, reason: String },

    /// A parameter was rejected by strict validation.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Serializing or rasterizing a scene failed.
    #[error("export failed: {0}")]
    ExportFailed(String),
}

impl BrandloomError {
    /// Build a [`BrandloomError::InvalidColorFormat`] value.
    pub fn invalid_color(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidColorFormat {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Build a [`BrandloomError::InvalidParameter`] value.
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    /// Build a [`BrandloomError::ExportFailed`] value.
    pub fn export_failed(msg: impl Into<String>) -> Self {
        Self::ExportFailed(msg.into())
    }
}
