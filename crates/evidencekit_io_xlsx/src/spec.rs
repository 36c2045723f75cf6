//! Shared workbook specification models.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

////////////////////////////////////////////////////////////////////////////////
// #region CellFormatSpecification

/// Cell format specification.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SpecCellFormat {
    /// Bold style.
    pub bold: Option<bool>,
    /// Horizontal alignment.
    pub align: Option<String>,
    /// Vertical alignment.
    pub valign: Option<String>,
    /// Text wrap.
    pub text_wrap: Option<bool>,

    /// Border style for all sides.
    pub border: Option<i64>,
    /// Border color for all sides.
    pub border_color: Option<String>,

    /// Solid background fill color.
    pub bg_color: Option<String>,
    /// Font color.
    pub font_color: Option<String>,
}

impl SpecCellFormat {
    /// Return a new format by overlaying `patch` onto `self`.
    pub fn with_(&self, patch: SpecCellFormat) -> SpecCellFormat {
        self.merge(&patch)
    }

    /// Merge two formats with right-side non-`None` overwrite semantics.
    pub fn merge(&self, other: &SpecCellFormat) -> SpecCellFormat {
        SpecCellFormat {
            bold: other.bold.or(self.bold),
            align: other.align.clone().or_else(|| self.align.clone()),
            valign: other.valign.clone().or_else(|| self.valign.clone()),
            text_wrap: other.text_wrap.or(self.text_wrap),
            border: other.border.or(self.border),
            border_color: other
                .border_color
                .clone()
                .or_else(|| self.border_color.clone()),
            bg_color: other.bg_color.clone().or_else(|| self.bg_color.clone()),
            font_color: other.font_color.clone().or_else(|| self.font_color.clone()),
        }
    }
}

/// Style preset consumed by the sheet styler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecSheetStyle {
    /// Format of every row-1 cell.
    pub fmt_header: SpecCellFormat,
    /// Format of column-1 cells below the header.
    pub fmt_first_col: SpecCellFormat,
    /// Format of all remaining cells.
    pub fmt_body: SpecCellFormat,
    /// Minimum final column width.
    pub width_cell_min: usize,
    /// Maximum final column width.
    pub width_cell_max: usize,
    /// Width padding added to the longest text.
    pub width_cell_padding: usize,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region CellValues

/// Scalar value held by a dataset column or a worksheet cell.
#[derive(Debug, Clone, PartialEq)]
pub enum EnumCellValue {
    /// Missing/blank value.
    None,
    /// Text value.
    String(String),
    /// Integer value.
    Integer(i64),
    /// Floating-point value.
    Number(f64),
    /// Boolean value.
    Boolean(bool),
}

impl EnumCellValue {
    /// Text shown for this value; missing values render as `""`.
    pub fn to_display_text(&self) -> String {
        match self {
            Self::None => String::new(),
            Self::String(val) => val.clone(),
            Self::Integer(val) => val.to_string(),
            Self::Number(val) => format!("{val:?}"),
            Self::Boolean(val) => if *val { "True" } else { "False" }.to_string(),
        }
    }
}

impl From<&str> for EnumCellValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for EnumCellValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Datasets

static CELL_VALUE_MISSING: EnumCellValue = EnumCellValue::None;

/// One named column of a dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecColumn {
    /// Column header text.
    pub name: String,
    /// Column values, top to bottom.
    pub values: Vec<EnumCellValue>,
}

impl SpecColumn {
    pub fn new(name: impl Into<String>, values: Vec<EnumCellValue>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

/// In-memory table: ordered columns, ordered rows.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecDataset {
    /// Columns in declared order.
    pub columns: Vec<SpecColumn>,
}

impl SpecDataset {
    pub fn new(columns: Vec<SpecColumn>) -> Self {
        Self { columns }
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Number of data rows (longest column).
    pub fn height(&self) -> usize {
        self.columns
            .iter()
            .map(|col| col.values.len())
            .max()
            .unwrap_or(0)
    }

    /// Column names in declared order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|col| col.name.as_str()).collect()
    }

    /// Value at (`row_idx`, `col_idx`); out-of-range cells read as missing.
    pub fn value(&self, row_idx: usize, col_idx: usize) -> &EnumCellValue {
        self.columns
            .get(col_idx)
            .and_then(|col| col.values.get(row_idx))
            .unwrap_or(&CELL_VALUE_MISSING)
    }
}

/// One row of the generated field dictionary.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SpecFieldRecord {
    /// Column name, verbatim.
    pub field_name: String,
    /// Placeholder description.
    pub description: String,
    /// Sheet where the column name was first seen.
    pub appears_in: String,
    /// Truncated first non-blank value.
    pub sample: String,
}

/// One `--sheet NAME=PATH` declaration after parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecSheetInput {
    /// Sheet name as given.
    pub name: String,
    /// Input path as given (not yet expanded).
    pub path: PathBuf,
}

/// CSV loading options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecCsvReadOptions {
    /// Rows inspected for type inference; `None` scans the whole file.
    pub infer_schema_length: Option<usize>,
    /// Field separator byte.
    pub separator: u8,
}

impl Default for SpecCsvReadOptions {
    fn default() -> Self {
        Self {
            infer_schema_length: None,
            separator: b',',
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region StyledSheet

/// One worksheet cell: value plus visual attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecSheetCell {
    /// Cell value.
    pub value: EnumCellValue,
    /// Cell format.
    pub format: SpecCellFormat,
}

/// Worksheet grid ready for styling and serialization.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecStyledSheet {
    /// Sheet name in the workbook.
    pub sheet_name: String,
    /// Row-major cell grid; row 0 is the header.
    pub grid: Vec<Vec<SpecSheetCell>>,
    /// Column widths keyed by zero-based column index.
    pub widths_by_col: BTreeMap<usize, usize>,
    /// Zero-based `(row, col)` freeze point.
    pub freeze_panes: Option<(usize, usize)>,
}

impl SpecStyledSheet {
    /// Copy dataset header and rows into an unstyled grid.
    pub fn from_dataset(sheet_name: impl Into<String>, dataset: &SpecDataset) -> Self {
        let n_width = dataset.width();
        let n_height = dataset.height();

        let mut grid = Vec::with_capacity(n_height + 1);
        grid.push(
            dataset
                .columns
                .iter()
                .map(|col| SpecSheetCell {
                    value: EnumCellValue::String(col.name.clone()),
                    format: SpecCellFormat::default(),
                })
                .collect::<Vec<_>>(),
        );
        for n_idx_row in 0..n_height {
            grid.push(
                (0..n_width)
                    .map(|n_idx_col| SpecSheetCell {
                        value: dataset.value(n_idx_row, n_idx_col).clone(),
                        format: SpecCellFormat::default(),
                    })
                    .collect(),
            );
        }

        Self {
            sheet_name: sheet_name.into(),
            grid,
            widths_by_col: BTreeMap::new(),
            freeze_panes: None,
        }
    }

    /// Number of grid rows, header included.
    pub fn height(&self) -> usize {
        self.grid.len()
    }

    /// Width of the widest grid row.
    pub fn width(&self) -> usize {
        self.grid.iter().map(Vec::len).max().unwrap_or(0)
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ReportSpecification

/// Per-sheet summary written into the workbook report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecSheetSummary {
    /// Sheet name in workbook.
    pub sheet_name: String,
    /// Grid rows, header included.
    pub n_rows: usize,
    /// Grid columns.
    pub n_cols: usize,
}

/// Report of one workbook build.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecWorkbookReport {
    /// Absolute output path.
    pub path_file_out: PathBuf,
    /// Sheets in workbook order.
    pub sheets: Vec<SpecSheetSummary>,
}

impl SpecWorkbookReport {
    /// Sheet names in workbook order.
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets
            .iter()
            .map(|sheet| sheet.sheet_name.as_str())
            .collect()
    }
}

impl fmt::Display for SpecWorkbookReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c_sheets = self
            .sheets
            .iter()
            .map(|sheet| format!("{}({}x{})", sheet.sheet_name, sheet.n_rows, sheet.n_cols))
            .collect::<Vec<_>>()
            .join(" ");
        write!(
            f,
            "[XLSX] file={} sheets={} {c_sheets}",
            self.path_file_out.display(),
            self.sheets.len()
        )
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
