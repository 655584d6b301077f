use std::path::PathBuf;

use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};
use serde_json::Value;
use thiserror::Error;

use crate::normalize::Table;

/// Write-stage failures. Recovered by the caller, never fatal to the run.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("workbook error: {0}")]
    Workbook(#[from] XlsxError),
}

/// Destination for tabular rows. Returns the number of data rows written;
/// whether a failure aborts anything is the caller's decision.
pub trait TabularSink {
    fn write(&mut self, table: &Table) -> Result<usize, SinkError>;
}

/// Writes one worksheet: a header row from the column names, then one row
/// per record, no index column.
pub struct XlsxSink {
    path: PathBuf,
}

impl XlsxSink {
    pub fn new(path: impl Into<PathBuf>) -> XlsxSink {
        XlsxSink { path: path.into() }
    }
}

impl TabularSink for XlsxSink {
    fn write(&mut self, table: &Table) -> Result<usize, SinkError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        for (col, name) in table.columns.iter().enumerate() {
            worksheet.write_string(0, col as u16, name)?;
        }

        for (idx, row) in table.rows.iter().enumerate() {
            for (col, cell) in row.iter().enumerate() {
                write_cell(worksheet, (idx + 1) as u32, col as u16, cell)?;
            }
        }

        workbook.save(&self.path)?;
        Ok(table.rows.len())
    }
}

/// Scalars map onto native cell types; nested values are serialized to
/// compact JSON since a cell cannot hold structure.
fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &Value,
) -> Result<(), XlsxError> {
    match value {
        Value::Null => {}
        Value::Bool(b) => {
            worksheet.write_boolean(row, col, *b)?;
        }
        Value::Number(n) => match n.as_f64() {
            Some(f) => {
                worksheet.write_number(row, col, f)?;
            }
            // u64 values beyond f64 range keep their digits as text.
            None => {
                worksheet.write_string(row, col, n.to_string())?;
            }
        },
        Value::String(s) => {
            worksheet.write_string(row, col, s)?;
        }
        nested => {
            worksheet.write_string(row, col, nested.to_string())?;
        }
    }
    Ok(())
}
