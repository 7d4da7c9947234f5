//! Stream parser orchestrating the full record pipeline.
//!
//! Drives the chunked reader, classifies and decodes every line, accumulates
//! decoded rows into one growable buffer per record kind, and reshapes the
//! buffers into the three output tables once the file is exhausted. The
//! whole pipeline is single-threaded and owns its buffers exclusively for
//! the duration of one parse.

use crate::parser::buffer::RecordBuffer;
use crate::parser::chunk::ChunkReader;
use crate::parser::record::{decode_comm, decode_event, decode_state, RecordKind};
use crate::table::Table;
use crate::utils::config::{
    ParserConfig, COL_COMM_RECORD, COL_EVENT_RECORD, COL_STATE_RECORD, EVENT_ROWS_PER_LINE_HINT,
};
use crate::utils::error::ParseError;
use log::{debug, info, warn};
use std::io;
use std::path::Path;
use std::time::Instant;

/// The three tables produced from one trace file
#[derive(Debug)]
pub struct TraceTables {
    pub states: Table,
    pub events: Table,
    pub comms: Table,
    /// Lines whose record tag matched no known kind (skipped, not an error)
    pub skipped_lines: u64,
}

/// Parse a trace file into STATE, EVENT and COMM tables
///
/// **Public** - main entry point of the crate
///
/// # Arguments
/// * `path` - Trace file; line 1 must be the header, lines 2..N records
/// * `config` - Batch, pre-allocation and micro-batch tuning
///
/// # Errors
/// * `ParseError::Io` - the file cannot be opened or a read fails
/// * `ParseError::MalformedRecord` - a data line violates its kind's
///   contract; fatal for the whole parse, no partial output
pub fn parse_file(path: impl AsRef<Path>, config: &ParserConfig) -> Result<TraceTables, ParseError> {
    let reader = ChunkReader::open(path, config.max_batch_bytes)?;
    parse_batches(reader, config)
}

/// Parse any iterator of line batches into the three tables
///
/// **Public** - core of `parse_file`, also the seam the integration tests
/// use to exercise batch-boundary behavior directly.
pub fn parse_batches(
    batches: impl Iterator<Item = io::Result<Vec<String>>>,
    config: &ParserConfig,
) -> Result<TraceTables, ParseError> {
    let start_time = Instant::now();

    // Pre-allocation: the initial element estimate is split evenly across
    // the three kinds and rounded down to whole rows.
    let per_kind = config.initial_elements / 3;
    let state_step = config.micro_batch_lines * COL_STATE_RECORD.len();
    let event_step = config.micro_batch_lines * COL_EVENT_RECORD.len() * EVENT_ROWS_PER_LINE_HINT;
    let comm_step = config.micro_batch_lines * COL_COMM_RECORD.len();

    let mut states =
        RecordBuffer::with_capacity(whole_rows(per_kind, COL_STATE_RECORD.len()), state_step);
    let mut events =
        RecordBuffer::with_capacity(whole_rows(per_kind, COL_EVENT_RECORD.len()), event_step);
    let mut comms =
        RecordBuffer::with_capacity(whole_rows(per_kind, COL_COMM_RECORD.len()), comm_step);

    // The header is line 1; data lines are numbered from 2.
    let mut line_number: u64 = 1;
    let mut skipped_lines: u64 = 0;

    for batch in batches {
        let batch = batch?;

        for micro_batch in batch.chunks(config.micro_batch_lines.max(1)) {
            for line in micro_batch {
                line_number += 1;
                match RecordKind::classify(line) {
                    Some(RecordKind::State) => {
                        let row = decode_state(line)
                            .map_err(|source| malformed(line_number, line, source))?;
                        states.append(&row);
                    }
                    Some(RecordKind::Event) => {
                        let rows = decode_event(line)
                            .map_err(|source| malformed(line_number, line, source))?;
                        events.append(&rows);
                    }
                    Some(RecordKind::Comm) => {
                        let row = decode_comm(line)
                            .map_err(|source| malformed(line_number, line, source))?;
                        comms.append(&row);
                    }
                    // Unknown tags are skipped for forward-compatibility.
                    None => skipped_lines += 1,
                }
            }

            // Amortize growth between micro-batches so the per-line path
            // never reallocates: reserve one micro-batch worst case.
            states.ensure_headroom(state_step);
            events.ensure_headroom(event_step);
            comms.ensure_headroom(comm_step);
        }
    }

    if skipped_lines > 0 {
        warn!(
            "Skipped {} line(s) with unrecognized record tags",
            skipped_lines
        );
    }

    debug!(
        "Buffer capacities at finalize (elements): state {}, event {}, comm {}",
        states.capacity(),
        events.capacity(),
        comms.capacity()
    );

    let tables = TraceTables {
        states: Table::from_flat(COL_STATE_RECORD, states.finalize())?,
        events: Table::from_flat(COL_EVENT_RECORD, events.finalize())?,
        comms: Table::from_flat(COL_COMM_RECORD, comms.finalize())?,
        skipped_lines,
    };

    info!(
        "Parsed {} state, {} event, {} comm rows in {:.3}s",
        tables.states.num_rows(),
        tables.events.num_rows(),
        tables.comms.num_rows(),
        start_time.elapsed().as_secs_f64()
    );

    Ok(tables)
}

/// Round an element budget down to whole rows of the given width
///
/// **Private** - pre-allocation helper
fn whole_rows(elements: usize, width: usize) -> usize {
    elements - elements % width
}

/// Wrap a decoder error with the offending line and its position
///
/// **Private** - error context helper
fn malformed(
    line_number: u64,
    line: &str,
    source: crate::utils::error::RecordError,
) -> ParseError {
    ParseError::MalformedRecord {
        line_number,
        line: line.to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_config() -> ParserConfig {
        ParserConfig {
            max_batch_bytes: 64,
            initial_elements: 30,
            micro_batch_lines: 2,
        }
    }

    fn batches_of(lines: &[&str], per_batch: usize) -> Vec<io::Result<Vec<String>>> {
        lines
            .chunks(per_batch)
            .map(|chunk| Ok(chunk.iter().map(|l| l.to_string()).collect()))
            .collect()
    }

    #[test]
    fn test_parse_batches_counts_each_kind() {
        let lines = [
            "1:1:1:1:1:0:100:1",
            "2:1:1:1:1:100:40:3:41:7",
            "3:1:1:1:1:10:20:2:1:2:1:30:40:1024:99",
            "1:2:1:1:1:100:200:5",
        ];
        let tables = parse_batches(batches_of(&lines, 2).into_iter(), &tiny_config()).unwrap();
        assert_eq!(tables.states.num_rows(), 2);
        assert_eq!(tables.events.num_rows(), 2);
        assert_eq!(tables.comms.num_rows(), 1);
        assert_eq!(tables.skipped_lines, 0);
    }

    #[test]
    fn test_unknown_tags_are_skipped_and_counted() {
        let lines = ["c:1:2:3", "", "1:1:1:1:1:0:100:1", "9:9:9"];
        let tables = parse_batches(batches_of(&lines, 4).into_iter(), &tiny_config()).unwrap();
        assert_eq!(tables.states.num_rows(), 1);
        assert_eq!(tables.skipped_lines, 3);
    }

    #[test]
    fn test_malformed_record_reports_line_number() {
        let lines = ["1:1:1:1:1:0:100:1", "1:1:1:bad:1:0:100:1"];
        let err = parse_batches(batches_of(&lines, 1).into_iter(), &tiny_config()).unwrap_err();
        match err {
            ParseError::MalformedRecord { line_number, line, .. } => {
                // Header is line 1, so the second data line is line 3.
                assert_eq!(line_number, 3);
                assert_eq!(line, "1:1:1:bad:1:0:100:1");
            }
            other => panic!("expected MalformedRecord, got {other:?}"),
        }
    }

    #[test]
    fn test_io_error_is_propagated() {
        let batches = vec![Err(io::Error::new(io::ErrorKind::Other, "disk gone"))];
        let err = parse_batches(batches.into_iter(), &tiny_config()).unwrap_err();
        assert!(matches!(err, ParseError::Io(_)));
    }
}
