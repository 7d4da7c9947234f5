//! Configuration and constants for the parser.

const MB: usize = 1024 * 1024;
const GB: usize = 1024 * MB;

/// Default byte budget for one batch of lines read from the trace file
pub const DEFAULT_MAX_BATCH_BYTES: usize = 2 * GB;

/// Default total number of i64 elements pre-allocated across the three
/// record buffers
pub const DEFAULT_INITIAL_ELEMENTS: usize = 40_000_000;

/// Default number of lines processed between buffer headroom checks
pub const DEFAULT_MICRO_BATCH_LINES: usize = 200_000;

// EVENT lines can pack many (type, value) pairs, so their worst-case row
// expansion is estimated with this multiplier when sizing headroom.
pub const EVENT_ROWS_PER_LINE_HINT: usize = 10;

// Column schemas for the three record kinds. Field order is fixed by the
// Paraver .prv format and must never be reordered.
pub const COL_STATE_RECORD: &[&str] = &[
    "cpu_id",
    "appl_id",
    "task_id",
    "thread_id",
    "time_ini",
    "time_fi",
    "state",
];

pub const COL_EVENT_RECORD: &[&str] = &[
    "cpu_id",
    "appl_id",
    "task_id",
    "thread_id",
    "time",
    "event_t",
    "event_v",
];

pub const COL_COMM_RECORD: &[&str] = &[
    "cpu_send_id",
    "ptask_send_id",
    "task_send_id",
    "thread_send_id",
    "lsend",
    "psend",
    "cpu_recv_id",
    "ptask_recv_id",
    "task_recv_id",
    "thread_recv_id",
    "lrecv",
    "precv",
    "size",
    "tag",
];

/// Tuning knobs for one parse run
///
/// All values are explicit construction-time inputs; nothing is read from
/// the environment inside the parser itself.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Byte budget per batch read from disk
    pub max_batch_bytes: usize,

    /// Total i64 elements pre-allocated, split evenly across record kinds
    pub initial_elements: usize,

    /// Lines between headroom checks on the record buffers
    pub micro_batch_lines: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_batch_bytes: DEFAULT_MAX_BATCH_BYTES,
            initial_elements: DEFAULT_INITIAL_ELEMENTS,
            micro_batch_lines: DEFAULT_MICRO_BATCH_LINES,
        }
    }
}
