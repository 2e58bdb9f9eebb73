//! Error types for style parsing and writing

use gta_data::{DataError, FieldError};
use thiserror::Error;

/// Errors that can occur when working with style files
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StyleError {
    /// The leading version word is neither 290 nor 336
    #[error("Unsupported style version {0}")]
    UnsupportedVersion(u32),

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

    /// Tiles are packed four to a row
    #[error("Cannot pack {0} tiles, the count must be a multiple of 4")]
    InvalidTileCount(usize),

    /// A tile buffer is not 64×64 bytes
    #[error("Tile holds {0} bytes, expected 4096")]
    InvalidTileSize(usize),

    /// An index names something that does not exist
    #[error("Invalid {what} reference {index} (only {len} present)")]
    InvalidReference {
        what: &'static str,
        index: usize,
        len: usize,
    },

    /// Colour data of one layout paired with the other layout's header
    #[error("{0} colour data does not match the style version")]
    VersionMismatch(&'static str),

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

impl StyleError {
    pub(crate) fn corrupt(section: &'static str, message: impl Into<String>) -> Self {
        Self::CorruptSection {
            section,
            message: message.into(),
        }
    }
}

impl From<DataError> for StyleError {
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

/// Result type for style operations
pub type Result<T> = std::result::Result<T, StyleError>;
