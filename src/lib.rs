//! prv-tables
//!
//! Streaming parser that turns Paraver `.prv` execution traces (the textual
//! logs produced by HPC performance instrumentation) into three typed
//! tables: STATE, EVENT and COMMUNICATION records.
//!
//! This crate provides the core implementation for the `prv-tables` CLI
//! tool and a library API:
//!
//! ```no_run
//! use prv_tables::{parse_file, ParserConfig};
//!
//! let tables = parse_file("trace.prv", &ParserConfig::default())?;
//! println!("{} state rows", tables.states.num_rows());
//! # Ok::<(), prv_tables::ParseError>(())
//! ```

pub mod commands;
pub mod output;
pub mod parser;
pub mod table;
pub mod utils;

// Re-export the main entry points
pub use parser::{parse_file, parse_header, TraceHeader, TraceTables};
pub use table::Table;
pub use utils::config::ParserConfig;
pub use utils::error::{HeaderError, ParseError};
