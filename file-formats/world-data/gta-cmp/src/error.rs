//! Error types for CMP parsing and writing

use gta_data::{DataError, FieldError};
use thiserror::Error;

/// Errors that can occur when working with CMP files
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CmpError {
    /// A section's declared size runs past the end of the input
    #[error(
        "Truncated input in {section} at offset {offset}: needed {needed} bytes, {available} available"
    )]
    TruncatedInput {
        section: &'static str,
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// A section cannot be split into its records
    #[error("Corrupt {section} section: {message}")]
    CorruptSection {
        section: &'static str,
        message: String,
    },

    /// Header sizes do not add up
    #[error("Malformed header: {0}")]
    MalformedHeader(String),

    /// A grid cell or column refers to something that does not exist
    #[error("Invalid {what} reference {index} (only {len} present)")]
    InvalidReference {
        what: &'static str,
        index: usize,
        len: usize,
    },

    /// A column holds more blocks than a cell has levels
    #[error("Column {index} holds {levels} blocks, at most 6 fit")]
    ColumnTooTall { index: usize, levels: usize },

    /// Coordinates outside the 256×256 grid
    #[error("Cell ({x}, {y}) is outside the map")]
    OutOfBounds { x: usize, y: usize },

    /// Record serialization failed
    #[error("Failed to encode {section}: {message}")]
    Encode {
        section: &'static str,
        message: String,
    },

    /// Field accessor failure
    #[error(transparent)]
    Field(#[from] FieldError),
}

impl From<DataError> for CmpError {
    fn from(err: DataError) -> Self {
        match err {
            DataError::TruncatedInput {
                section,
                offset,
                needed,
                available,
            } => Self::TruncatedInput {
                section,
                offset,
                needed,
                available,
            },
            DataError::CorruptSection { section, message } => {
                Self::CorruptSection { section, message }
            }
            DataError::Encode { section, message } => Self::Encode { section, message },
            DataError::Field(e) => Self::Field(e),
        }
    }
}

/// Type alias for Results from CMP operations
pub type Result<T> = std::result::Result<T, CmpError>;
