//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Errors decoding a record from its JSON form.
///
/// `position` is the record's index in the input array.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("record {position}: expected an object")]
    NotAnObject { position: usize },

    #[error("record {position}: missing field '{field}'")]
    MissingField { position: usize, field: String },

    #[error("record {position}: invalid id {value}, expected an integer")]
    InvalidId { position: usize, value: String },

    #[error("record {position}: invalid parent {value}, expected an integer or \"{sentinel}\"")]
    InvalidParent {
        position: usize,
        value: String,
        sentinel: String,
    },
}
