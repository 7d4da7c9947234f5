//! Row/column tables built from finalized record buffers.
//!
//! A `Table` is the only artifact the parser hands back to callers: a
//! row-major `i64` matrix with a fixed column-name schema. Building one is
//! a reshape, never a copy per cell, and never reorders, deduplicates, or
//! filters rows.

use crate::utils::error::ParseError;

/// Immutable named table of `i64` values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    columns: &'static [&'static str],
    data: Vec<i64>,
    rows: usize,
}

impl Table {
    /// Reshape a finalized flat buffer into a table under a column schema
    ///
    /// **Public** - called by the stream parser after buffer finalization
    ///
    /// # Errors
    /// `ParseError::InternalInvariantViolation` if the flat length is not a
    /// multiple of the column count. The decoders only ever emit whole rows,
    /// so this indicates a bug in the pipeline rather than bad input, and it
    /// must fail loudly instead of truncating or padding.
    pub fn from_flat(
        columns: &'static [&'static str],
        data: Vec<i64>,
    ) -> Result<Table, ParseError> {
        if data.len() % columns.len() != 0 {
            return Err(ParseError::InternalInvariantViolation(format!(
                "buffer holds {} values, not a multiple of the {}-column schema",
                data.len(),
                columns.len()
            )));
        }
        let rows = data.len() / columns.len();
        Ok(Table {
            columns,
            data,
            rows,
        })
    }

    /// Column names, in storage order
    pub fn columns(&self) -> &'static [&'static str] {
        self.columns
    }

    pub fn num_rows(&self) -> usize {
        self.rows
    }

    pub fn num_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// One row as a slice, in input order
    ///
    /// # Panics
    /// Panics if `index >= num_rows()`, like slice indexing.
    pub fn row(&self, index: usize) -> &[i64] {
        let width = self.columns.len();
        &self.data[index * width..(index + 1) * width]
    }

    /// Iterator over all rows, preserving input order
    pub fn rows(&self) -> impl Iterator<Item = &[i64]> {
        self.data.chunks_exact(self.columns.len())
    }

    /// Iterator over one named column, or `None` for an unknown name
    pub fn column(&self, name: &str) -> Option<impl Iterator<Item = i64> + '_> {
        let offset = self.columns.iter().position(|c| *c == name)?;
        let width = self.columns.len();
        Some(self.data.iter().skip(offset).step_by(width).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLS: &[&str] = &["a", "b", "c"];

    #[test]
    fn test_reshape() {
        let table = Table::from_flat(COLS, vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(table.num_rows(), 2);
        assert_eq!(table.num_cols(), 3);
        assert_eq!(table.row(0), &[1, 2, 3]);
        assert_eq!(table.row(1), &[4, 5, 6]);
    }

    #[test]
    fn test_empty_table() {
        let table = Table::from_flat(COLS, vec![]).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.num_rows(), 0);
    }

    #[test]
    fn test_invariant_violation() {
        let err = Table::from_flat(COLS, vec![1, 2, 3, 4]).unwrap_err();
        assert!(matches!(err, ParseError::InternalInvariantViolation(_)));
    }

    #[test]
    fn test_column_access() {
        let table = Table::from_flat(COLS, vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(table.column("b").unwrap().collect::<Vec<_>>(), vec![2, 5]);
        assert!(table.column("missing").is_none());
    }

    #[test]
    fn test_rows_iterator_order() {
        let table = Table::from_flat(COLS, vec![9, 8, 7, 6, 5, 4]).unwrap();
        let rows: Vec<_> = table.rows().collect();
        assert_eq!(rows, vec![&[9, 8, 7][..], &[6, 5, 4][..]]);
    }
}
