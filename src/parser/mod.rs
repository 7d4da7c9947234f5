//! Trace parsing: chunked reading, record decoding, and the header grammar.
//!
//! This module handles:
//! - Byte-budgeted chunked reading of trace files
//! - Classifying and decoding STATE/EVENT/COMM lines
//! - Accumulating decoded rows in growable buffers
//! - Parsing the `#Paraver` header line

pub mod buffer;
pub mod chunk;
pub mod header;
pub mod record;
pub mod stream;

// Re-export main types and functions
pub use buffer::RecordBuffer;
pub use chunk::ChunkReader;
pub use header::{parse_header, TaskPlacement, TraceHeader};
pub use record::{decode_comm, decode_event, decode_state, RecordKind};
pub use stream::{parse_batches, parse_file, TraceTables};
