//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Detail of why a single record line failed to decode
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RecordError {
    #[error("expected {expected} fields after the record tag, found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("field {index} is not an integer: {value:?}")]
    NonNumeric { index: usize, value: String },

    #[error("event line has {count} trailing fields, which cannot form (type, value) pairs")]
    UnpairedEvent { count: usize },
}

/// Errors that can occur while parsing the record stream of a trace
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed record at line {line_number}: {source} (line was {line:?})")]
    MalformedRecord {
        /// 1-based line number in the trace file (the header is line 1)
        line_number: u64,
        /// Full text of the offending line
        line: String,
        source: RecordError,
    },

    #[error("internal invariant violation: {0}")]
    InternalInvariantViolation(String),
}

/// Errors that can occur while parsing the trace header line
#[derive(Error, Debug, PartialEq, Eq)]
pub enum HeaderError {
    #[error("missing or misplaced {token:?} token in header {line:?}")]
    MissingToken { token: &'static str, line: String },

    #[error("header date {value:?} does not match DD/MM/YYYY HH:MM")]
    BadDate { value: String },

    #[error("header {element} is not an integer: {value:?}")]
    BadNumber {
        element: &'static str,
        value: String,
    },

    #[error("header declares {declared} {element}, found {found}")]
    CountMismatch {
        element: &'static str,
        declared: usize,
        found: usize,
    },
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
