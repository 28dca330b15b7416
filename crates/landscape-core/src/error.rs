//! Error taxonomy for object interchange.
//!
//! Codec errors carry the index and byte offset of the offending record.
//! All of them abort the current operation; only `InsufficientNeighbors`
//! is meant to be handled per feature by the caller.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for interchange operations.
pub type Result<T> = std::result::Result<T, ObjectError>;

#[derive(Error, Debug)]
pub enum ObjectError {
    /// Stream ended inside a record.
    #[error("record {index} at byte {offset} is truncated: {available} of {expected} bytes present")]
    TruncatedRecord {
        index: usize,
        offset: usize,
        available: usize,
        expected: usize,
    },

    /// Name length byte (or name to encode) outside 1..=131.
    #[error("record {index} at byte {offset} has name length {length}, expected 1..=131")]
    InvalidNameLength {
        index: usize,
        offset: usize,
        length: usize,
    },

    /// Name bytes are not ASCII.
    #[error("record {index} at byte {offset} has a non-ASCII name")]
    InvalidName { index: usize, offset: usize },

    /// Name to encode exceeds the fixed field.
    #[error("record {index} at byte {offset}: name `{name}` is {length} bytes, limit is 131")]
    NameTooLong {
        index: usize,
        offset: usize,
        name: String,
        length: usize,
    },

    /// Fewer than two usable neighbors for chain orientation.
    #[error("point {index} has {available} usable neighbors, need at least 2")]
    InsufficientNeighbors { index: usize, available: usize },

    /// Terrain header missing or malformed.
    #[error("landscape origin unavailable from {}: {reason}", path.display())]
    OriginUnavailable { path: PathBuf, reason: String },

    /// Object file could not be created or replaced.
    #[error("cannot write {}: {source}", path.display())]
    DestinationWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Input file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    SourceRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Interchange or Overpass document at a path failed to parse.
    #[error("invalid document {}: {source}", path.display())]
    Document {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Object field that JSON cannot represent (NaN or infinite).
    #[error("object {index} has non-finite {field}")]
    NonFiniteValue { index: usize, field: &'static str },

    /// In-memory JSON (de)serialization failure.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Projection backend failure.
    #[error("projection error: {0}")]
    Projection(String),

    /// Invalid configuration or option combination.
    #[error("configuration error: {0}")]
    Config(String),
}
