//! Byte-budgeted chunked reading of trace files.
//!
//! Trace files routinely run into the tens of gigabytes, so lines are read
//! in batches bounded by a byte budget rather than a line count: EVENT lines
//! can be arbitrarily long and a byte cap is what actually bounds peak
//! memory. A batch always holds whole lines; a line is never split across
//! batch boundaries.

use log::debug;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Lazy iterator of line batches over one trace file
///
/// The first line of the file (the `#Paraver` header) is read and discarded
/// at open time; iteration yields only data lines. Each yielded batch is
/// non-empty and the iterator ends cleanly at EOF.
pub struct ChunkReader {
    reader: BufReader<File>,
    max_batch_bytes: usize,
    done: bool,
}

impl ChunkReader {
    /// Open a trace file and position past its header line
    ///
    /// # Errors
    /// Returns the underlying `io::Error` if the file cannot be opened or
    /// the header line cannot be read.
    pub fn open(path: impl AsRef<Path>, max_batch_bytes: usize) -> io::Result<Self> {
        let path = path.as_ref();
        debug!("Opening trace file: {}", path.display());

        let file = File::open(path)?;
        let mut reader = BufReader::new(file);

        // Discard the header line; the header parser reads it separately.
        let mut header = String::new();
        reader.read_line(&mut header)?;

        Ok(Self {
            reader,
            max_batch_bytes: max_batch_bytes.max(1),
            done: false,
        })
    }
}

impl Iterator for ChunkReader {
    type Item = io::Result<Vec<String>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut batch = Vec::new();
        let mut bytes_read = 0usize;

        loop {
            let mut line = String::new();
            match self.reader.read_line(&mut line) {
                Ok(0) => {
                    self.done = true;
                    break;
                }
                Ok(n) => {
                    bytes_read += n;
                    // Strip the line terminator; decoders see bare fields.
                    while line.ends_with('\n') || line.ends_with('\r') {
                        line.pop();
                    }
                    batch.push(line);
                    // The budget caps when we stop, not line length: the
                    // line that crosses the budget still lands whole in
                    // this batch.
                    if bytes_read >= self.max_batch_bytes {
                        break;
                    }
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }

        if batch.is_empty() {
            None
        } else {
            debug!("Read batch: {} lines, {} bytes", batch.len(), bytes_read);
            Some(Ok(batch))
        }
    }
}
