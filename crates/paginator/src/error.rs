//! Error types for the paginator.
//!
//! Only two things can go wrong: a boundary field cannot be read off a record
//! while building a page, or an incoming cursor token cannot be decoded.
//! Everything else (empty records, zero limits, missing cursors) is defined behavior.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

/// The error type for all pagination operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaginationError {
    /// The boundary field does not exist on the record, or the record is not
    /// struct-like.
    #[error("boundary field '{field}' not found on record")]
    FieldNotFound { field: String },

    /// The cursor token is not valid base64 or does not hold a cursor payload.
    #[error("invalid pagination cursor '{cursor}': {message}")]
    Decode { cursor: String, message: String },
}

impl PaginationError {
    pub(crate) fn field_not_found(field: impl Into<String>) -> Self {
        Self::FieldNotFound {
            field: field.into(),
        }
    }

    pub(crate) fn decode(cursor: impl Into<String>, message: impl ToString) -> Self {
        Self::Decode {
            cursor: cursor.into(),
            message: message.to_string(),
        }
    }

    /// Returns true if this is a cursor decoding error.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }

    /// Returns true if this is a missing boundary field error.
    pub fn is_field_not_found(&self) -> bool {
        matches!(self, Self::FieldNotFound { .. })
    }
}

/// Result type alias for pagination operations.
pub type PaginationResult<T> = Result<T, PaginationError>;
