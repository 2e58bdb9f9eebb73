//! Errors shared by the container codecs

use thiserror::Error;

use crate::field::FieldError;

/// Structural failures raised while walking a container's sections
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    /// A section needs more bytes than the input still holds
    #[error(
        "Truncated input in {section} at offset {offset}: needed {needed} bytes, {available} available"
    )]
    TruncatedInput {
        /// Section being read
        section: &'static str,
        /// Absolute offset the read started at
        offset: usize,
        /// Bytes the read required
        needed: usize,
        /// Bytes left in the input
        available: usize,
    },

    /// A section's contents cannot be split into its records
    #[error("Corrupt {section} section: {message}")]
    CorruptSection {
        /// Section being read
        section: &'static str,
        /// What went wrong
        message: String,
    },

    /// A record could not be serialized
    #[error("Failed to encode {section}: {message}")]
    Encode {
        /// Section being written
        section: &'static str,
        /// What went wrong
        message: String,
    },

    /// A field accessor failed
    #[error(transparent)]
    Field(#[from] FieldError),
}

impl DataError {
    /// Shorthand for a [`DataError::CorruptSection`]
    pub fn corrupt(section: &'static str, message: impl Into<String>) -> Self {
        Self::CorruptSection {
            section,
            message: message.into(),
        }
    }
}

/// Result type for shared binary helpers
pub type Result<T> = std::result::Result<T, DataError>;
