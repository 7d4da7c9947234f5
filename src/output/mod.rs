//! Output writers for parse results.
//!
//! Persistence of the full tables to a columnar/binary container is the
//! caller's business; this module covers the two lightweight artifacts the
//! CLI produces itself:
//! - A JSON summary of one parse run
//! - Plain CSV dumps of the three tables

pub mod csv;
pub mod json;

// Re-export main types and functions
pub use csv::write_tables_csv;
pub use json::{read_summary, write_summary, KindCounts, ParseSummary};
