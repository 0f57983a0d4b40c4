//! Error types shared by the ranking engine, the track loader and the
//! configuration layer.

use std::io;

/// Result type used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A record lacks a field the requested operation needs.
    #[error("record {record} has no field `{field}`")]
    MissingField { field: String, record: String },

    /// A field holds a value that cannot be compared or subtracted as required.
    #[error("field `{field}` of record {record} holds {found}, expected {expected}")]
    TypeMismatch {
        field: String,
        record: String,
        found: &'static str,
        expected: &'static str,
    },

    #[error("unknown sort method `{0}`")]
    UnknownSortMethod(String),

    #[error("unknown audio feature `{0}`")]
    UnknownFeature(String),

    #[error("mood profile `{0}` names no feature targets")]
    EmptyMoodProfile(String),

    #[error("mood profile `{mood}` has a non-finite target for `{feature}`")]
    InvalidTarget { mood: String, feature: String },

    #[error("track id `{0}` appears more than once")]
    DuplicateTrackId(String),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether the error comes from the records themselves rather than from
    /// the request or the environment.
    pub fn is_record_error(&self) -> bool {
        matches!(self, Error::MissingField { .. } | Error::TypeMismatch { .. })
    }
}

/// Human readable label for the record at `index`, used in error messages.
pub(crate) fn record_label(index: usize, id: &str) -> String {
    format!("#{index} (id `{id}`)")
}
