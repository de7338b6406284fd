//! CSV export functionality

use std::io::Write;

use serde::Serialize;

use crate::error::{MyBudgetError, MyBudgetResult};

/// Write `rows` as CSV with a header taken from the field names
///
/// An empty slice writes nothing, not even a header.
pub fn write_csv_rows<R: Serialize, W: Write>(rows: &[R], writer: W) -> MyBudgetResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for row in rows {
        csv_writer
            .serialize(row)
            .map_err(|e| MyBudgetError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| MyBudgetError::Export(e.to_string()))
}
