//! Error taxonomy for workbook building.

use std::path::PathBuf;

use polars::prelude::PolarsError;
use rust_xlsxwriter::XlsxError;
use thiserror::Error;

/// Result type for workbook building.
pub type BookResult<T> = std::result::Result<T, EvidenceBookError>;

/// Errors raised while resolving inputs, loading CSVs or writing the workbook.
#[derive(Debug, Error)]
pub enum EvidenceBookError {
    /// Malformed command-line sheet specification.
    #[error("{0}")]
    Usage(String),

    /// Declared input path is not an existing file.
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// CSV parse failure.
    #[error("Failed to read CSV {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },

    /// Dataset has more rows than one worksheet holds.
    #[error("Sheet {sheet_name:?} has {n_rows} data rows; Excel allows at most {n_rows_max}")]
    SheetTooLarge {
        sheet_name: String,
        n_rows: usize,
        n_rows_max: usize,
    },

    /// Dataset has more columns than one worksheet holds.
    #[error("Sheet {sheet_name:?} has {n_cols} columns; Excel allows at most {n_cols_max}")]
    SheetTooWide {
        sheet_name: String,
        n_cols: usize,
        n_cols_max: usize,
    },

    /// Workbook serialization failure.
    #[error("xlsx write error: {0}")]
    Xlsx(#[from] XlsxError),

    /// Filesystem failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Write attempted after the workbook was saved.
    #[error("Cannot write after close().")]
    WriterClosed,
}

impl EvidenceBookError {
    /// Build a usage error from any message.
    pub fn usage(msg: impl Into<String>) -> Self {
        Self::Usage(msg.into())
    }
}
