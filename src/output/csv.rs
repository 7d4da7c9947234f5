//! Plain CSV dump of the output tables.
//!
//! Every cell is a decimal integer and column names contain no separators,
//! so no quoting or escaping is needed.

use crate::parser::stream::TraceTables;
use crate::table::Table;
use crate::utils::error::OutputError;
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write the three tables as `state.csv`, `event.csv` and `comm.csv`
///
/// **Public** - called by the parse command when `--csv-dir` is given
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::InvalidPath` - the directory cannot be created
pub fn write_tables_csv(tables: &TraceTables, dir: impl AsRef<Path>) -> Result<(), OutputError> {
    let dir = dir.as_ref();

    std::fs::create_dir_all(dir).map_err(|e| {
        OutputError::InvalidPath(format!("Cannot create directory {}: {}", dir.display(), e))
    })?;

    write_table_csv(&tables.states, &dir.join("state.csv"))?;
    write_table_csv(&tables.events, &dir.join("event.csv"))?;
    write_table_csv(&tables.comms, &dir.join("comm.csv"))?;

    info!("CSV tables written to: {}", dir.display());
    Ok(())
}

/// Write one table: a header row, then one line per row
///
/// **Private** - internal helper
fn write_table_csv(table: &Table, path: &Path) -> Result<(), OutputError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "{}", table.columns().join(","))?;
    for row in table.rows() {
        let mut first = true;
        for value in row {
            if !first {
                write!(writer, ",")?;
            }
            write!(writer, "{}", value)?;
            first = false;
        }
        writeln!(writer)?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::config::COL_STATE_RECORD;

    #[test]
    fn test_csv_shape() {
        let table = Table::from_flat(
            COL_STATE_RECORD,
            vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14],
        )
        .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.csv");
        write_table_csv(&table, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], COL_STATE_RECORD.join(","));
        assert_eq!(lines[1], "1,2,3,4,5,6,7");
        assert_eq!(lines[2], "8,9,10,11,12,13,14");
    }
}
