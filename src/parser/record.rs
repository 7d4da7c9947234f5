//! Line classification and per-kind record decoders.
//!
//! Every data line in a .prv trace is a `:`-separated list of integers whose
//! first field is a one-character record tag. The decoders here are pure
//! functions from one line of text to the fixed-width numeric row(s) for its
//! kind. They perform no I/O and hold no state.

use crate::utils::config::{COL_COMM_RECORD, COL_EVENT_RECORD, COL_STATE_RECORD};
use crate::utils::error::RecordError;

/// Record tags as they appear at the start of a trace line
pub const STATE_RECORD: u8 = b'1';
pub const EVENT_RECORD: u8 = b'2';
pub const COMM_RECORD: u8 = b'3';

/// The closed set of record kinds a trace line can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    State,
    Event,
    Comm,
}

impl RecordKind {
    /// Classify a line by its leading tag character
    ///
    /// Returns `None` for empty lines and for tags outside the known set;
    /// unknown tags are tolerated for forward-compatibility and the caller
    /// decides whether to count or log them.
    pub fn classify(line: &str) -> Option<RecordKind> {
        match line.as_bytes().first()? {
            &STATE_RECORD => Some(RecordKind::State),
            &EVENT_RECORD => Some(RecordKind::Event),
            &COMM_RECORD => Some(RecordKind::Comm),
            _ => None,
        }
    }

    /// Number of columns in one output row of this kind
    pub fn width(self) -> usize {
        match self {
            RecordKind::State => COL_STATE_RECORD.len(),
            RecordKind::Event => COL_EVENT_RECORD.len(),
            RecordKind::Comm => COL_COMM_RECORD.len(),
        }
    }
}

/// Decode a STATE line into its 7-column row
///
/// **Public** - used by the stream parser and directly testable
///
/// # Errors
/// * `RecordError::FieldCount` - field count after the tag is not 7
/// * `RecordError::NonNumeric` - a field does not parse as an integer
pub fn decode_state(line: &str) -> Result<[i64; 7], RecordError> {
    let fields = parse_fields(line)?;
    fixed_row::<7>(&fields)
}

/// Decode a COMM line into its 14-column row
///
/// # Errors
/// * `RecordError::FieldCount` - field count after the tag is not 14
/// * `RecordError::NonNumeric` - a field does not parse as an integer
pub fn decode_comm(line: &str) -> Result<[i64; 14], RecordError> {
    let fields = parse_fields(line)?;
    fixed_row::<14>(&fields)
}

/// Decode an EVENT line into a flat sequence of 7-column rows
///
/// One EVENT line can carry several events: the first five fields form a
/// shared prefix `{cpu_id, appl_id, task_id, thread_id, time}` and every
/// following `(event_t, event_v)` pair becomes its own output row with that
/// prefix replicated. Pair order in the line is preserved in the output.
///
/// The returned vector's length is always a multiple of 7.
///
/// # Errors
/// * `RecordError::FieldCount` - fewer than the 5 prefix fields present
/// * `RecordError::UnpairedEvent` - trailing field count is odd
/// * `RecordError::NonNumeric` - a field does not parse as an integer
pub fn decode_event(line: &str) -> Result<Vec<i64>, RecordError> {
    let fields = parse_fields(line)?;
    if fields.len() < 5 {
        return Err(RecordError::FieldCount {
            expected: COL_EVENT_RECORD.len(),
            found: fields.len(),
        });
    }

    let (prefix, trailing) = fields.split_at(5);
    if trailing.len() % 2 != 0 {
        return Err(RecordError::UnpairedEvent {
            count: trailing.len(),
        });
    }

    let mut rows = Vec::with_capacity((trailing.len() / 2) * COL_EVENT_RECORD.len());
    for pair in trailing.chunks_exact(2) {
        rows.extend_from_slice(prefix);
        rows.extend_from_slice(pair);
    }
    Ok(rows)
}

/// Split a line on `:`, drop the tag field, and parse the rest as integers
///
/// **Private** - shared by all decoders
fn parse_fields(line: &str) -> Result<Vec<i64>, RecordError> {
    line.trim_end()
        .split(':')
        .skip(1)
        .enumerate()
        .map(|(index, field)| {
            field.parse::<i64>().map_err(|_| RecordError::NonNumeric {
                index: index + 1,
                value: field.to_string(),
            })
        })
        .collect()
}

/// Check the field count and copy into a fixed-width row
///
/// **Private** - shared by the STATE and COMM decoders
fn fixed_row<const N: usize>(fields: &[i64]) -> Result<[i64; N], RecordError> {
    if fields.len() != N {
        return Err(RecordError::FieldCount {
            expected: N,
            found: fields.len(),
        });
    }
    let mut row = [0i64; N];
    row.copy_from_slice(fields);
    Ok(row)
}
