//! # Error Types
//!
//! One error enum per concern, unified under [`CoreError`].
//!
//! - [`FormatError`]: a profile could not be imported.
//! - [`ValidationError`]: a form or employee constraint was violated.
//! - [`StoreError`]: the redb database or a record codec failed.

use thiserror::Error;

/// Errors raised while importing a character profile.
#[derive(Debug, Error)]
pub enum FormatError {
    /// The input is not syntactically valid JSON.
    #[error("invalid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// The top-level JSON value is not an object.
    #[error("character data must be a JSON object")]
    NotAnObject,

    /// A required field is absent, null or blank.
    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    /// A field is present but has the wrong type or an unknown value.
    #[error("invalid character field: {0}")]
    InvalidField(#[source] serde_json::Error),

    /// The profile could not be serialized.
    #[error("failed to serialize character: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// A constraint on user-supplied data was violated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is blank.
    #[error("{field} is required")]
    Required {
        /// Human-readable field label.
        field: &'static str,
    },

    /// A field exceeds its maximum length (in characters).
    #[error("{field} must be at most {max} characters (got {actual})")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },

    /// A keyword slot index is past the end of the slot list.
    #[error("{field} slot {index} is out of range ({slots} slots)")]
    SlotOutOfRange {
        field: &'static str,
        index: usize,
        slots: usize,
    },
}

/// Failures of the persistent storage layer.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("commit error: {0}")]
    Commit(#[from] redb::CommitError),

    /// A stored employee record could not be encoded or decoded.
    #[error("record codec error: {0}")]
    Codec(#[from] postcard::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Top-level error for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result alias used across the core crate.
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages_name_the_field() {
        let err = ValidationError::Required {
            field: "Character name",
        };
        assert_eq!(err.to_string(), "Character name is required");

        let err = ValidationError::TooLong {
            field: "Phone",
            max: 15,
            actual: 20,
        };
        assert_eq!(err.to_string(), "Phone must be at most 15 characters (got 20)");
    }

    #[test]
    fn core_error_is_transparent() {
        let err = CoreError::from(FormatError::MissingField("name"));
        assert_eq!(err.to_string(), "missing required field 'name'");
    }
}
