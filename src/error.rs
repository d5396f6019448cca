//! Error types for ts-explorer operations.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in ts-explorer operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A supplied parameter's value or shape does not match the contract
    /// (unknown method name, zero window, degenerate seasonal frequency, empty series).
    #[error("{0}")]
    ParameterType(String),

    /// A date-dependent operation was invoked on a series whose index is not date/time typed.
    #[error("{0}")]
    IndexType(String),

    /// I/O error (file operations, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),

    /// Style configuration could not be parsed.
    #[error("Config error: {0}")]
    Config(#[from] serde_yaml_ng::Error),

    /// Invalid dimensions for framebuffer or figure.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Data length mismatch between paired arrays.
    #[error("Data length mismatch: x has {x_len} elements, y has {y_len} elements")]
    DataLengthMismatch {
        /// Length of x data.
        x_len: usize,
        /// Length of y data.
        y_len: usize,
    },

    /// Empty data provided where non-empty is required.
    #[error("Empty data provided")]
    EmptyData,

    /// Color parsing error.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// Scale domain error (e.g., degenerate domain).
    #[error("Scale domain error: {0}")]
    ScaleDomain(String),

    /// Rendering error.
    #[error("Rendering error: {0}")]
    Rendering(String),
}

impl Error {
    /// Shorthand for [`Error::ParameterType`].
    pub(crate) fn parameter(msg: impl Into<String>) -> Self {
        Self::ParameterType(msg.into())
    }

    /// Returns true for [`Error::ParameterType`].
    #[must_use]
    pub fn is_parameter_type(&self) -> bool {
        matches!(self, Self::ParameterType(_))
    }

    /// Returns true for [`Error::IndexType`].
    #[must_use]
    pub fn is_index_type(&self) -> bool {
        matches!(self, Self::IndexType(_))
    }
}
