//! CLI command implementations.

pub mod header;
pub mod parse;

// Re-export main types and functions
pub use header::execute_header;
pub use parse::{execute_parse, read_header_line, ParseArgs};
