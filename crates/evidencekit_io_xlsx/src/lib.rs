//! `evidencekit_io_xlsx` v1:
//! CSV-to-XLSX evidence workbook kernel.
//!
//! Modules:
//! - `conf`       : constants and default presets
//! - `spec`       : datasets, styled sheets, options and reports
//! - `error`      : error taxonomy
//! - `util`       : pure helper functions
//! - `reader`     : CSV loading
//! - `dictionary` : field dictionary derivation
//! - `styler`     : deterministic sheet styling
//! - `writer`     : workbook serialization
//! - `book`       : end-to-end build
pub mod book;
pub mod conf;
pub mod dictionary;
pub mod error;
pub mod reader;
pub mod spec;
pub mod styler;
pub mod util;
pub mod writer;

pub use book::{build_workbook, load_datasets, resolve_sheet_inputs, write_workbook};
pub use conf::{
    C_COLOR_BRAND, C_SHEET_NAME_FIELD_DICTIONARY, N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX,
    N_NROWS_EXCEL_MAX, derive_default_sheet_style,
};
pub use dictionary::{build_dictionary, derive_field_records};
pub use error::{BookResult, EvidenceBookError};
pub use reader::read_csv_dataset;
pub use spec::{
    EnumCellValue, SpecCellFormat, SpecColumn, SpecCsvReadOptions, SpecDataset, SpecFieldRecord,
    SpecSheetCell, SpecSheetInput, SpecSheetStyle, SpecSheetSummary, SpecStyledSheet,
    SpecWorkbookReport,
};
pub use styler::{style_sheet, style_sheet_with};
pub use util::{parse_sheet_spec, validate_sheet_name};
pub use writer::XlsxWriter;
