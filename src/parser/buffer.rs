//! Growable typed buffer for decoded record values.
//!
//! The number of records in a trace is unknown up front: file size does not
//! predict record count and EVENT lines expand into a variable number of
//! rows. `RecordBuffer` therefore pre-allocates a large flat `i64` array and
//! grows it by a configured increment, keeping an exact used-length counter
//! separate from the capacity.
//!
//! Growth is always an explicit capacity check before the write, never a
//! recovered out-of-space error, so it stays a visible and testable branch.

/// Resizable flat buffer of `i64` values for one record kind
///
/// Invariant: `len() <= capacity()` at all times, and a grow never discards
/// any part of the used prefix.
#[derive(Debug)]
pub struct RecordBuffer {
    data: Vec<i64>,
    used: usize,
    growth_step: usize,
}

impl RecordBuffer {
    /// Create a buffer with `initial_capacity` zeroed elements
    ///
    /// `growth_step` is the minimum number of elements added on each grow;
    /// a zero step is bumped to one so growth always makes progress.
    pub fn with_capacity(initial_capacity: usize, growth_step: usize) -> Self {
        Self {
            data: vec![0; initial_capacity],
            used: 0,
            growth_step: growth_step.max(1),
        }
    }

    /// Number of elements written so far
    pub fn len(&self) -> usize {
        self.used
    }

    pub fn is_empty(&self) -> bool {
        self.used == 0
    }

    /// Currently allocated capacity in elements
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Free elements remaining before the next grow
    pub fn headroom(&self) -> usize {
        self.data.len() - self.used
    }

    /// Append a slice of values, growing first if it does not fit
    pub fn append(&mut self, values: &[i64]) {
        let needed = self.used + values.len();
        if needed > self.data.len() {
            self.grow_to(needed);
        }
        self.data[self.used..needed].copy_from_slice(values);
        self.used = needed;
    }

    /// Grow proactively so at least `min_free` elements are writable
    ///
    /// Called between micro-batches to keep reallocation off the per-line
    /// hot path.
    pub fn ensure_headroom(&mut self, min_free: usize) {
        if self.headroom() < min_free {
            self.grow_to(self.used + min_free);
        }
    }

    /// Consume the buffer and return exactly the used prefix
    pub fn finalize(mut self) -> Vec<i64> {
        self.data.truncate(self.used);
        self.data
    }

    /// Extend the allocation so `min_total` elements fit
    ///
    /// Adds `growth_step` elements, doubling the step until a single
    /// pathologically large append fits; the used prefix is preserved by
    /// `Vec::resize`.
    fn grow_to(&mut self, min_total: usize) {
        let mut step = self.growth_step;
        while self.data.len() + step < min_total {
            step *= 2;
        }
        self.data.resize(self.data.len() + step, 0);
    }
}
