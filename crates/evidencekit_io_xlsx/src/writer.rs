//! XLSX writer kernel that serializes styled sheets into one workbook.

use std::collections::BTreeMap;
use std::path::PathBuf;

use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{BookResult, EvidenceBookError};
use crate::spec::{EnumCellValue, SpecCellFormat, SpecSheetSummary, SpecStyledSheet};

/// Stateful workbook writer.
///
/// Sheets are buffered in memory until [`Self::close`] persists the workbook.
pub struct XlsxWriter {
    path_file_out: PathBuf,
    workbook: Workbook,
    l_sheets: Vec<SpecSheetSummary>,
    if_closed: bool,
}

impl XlsxWriter {
    /// Create writer bound to an output path.
    pub fn new(path_file_out: PathBuf) -> Self {
        Self {
            path_file_out,
            workbook: Workbook::new(),
            l_sheets: Vec::new(),
            if_closed: false,
        }
    }

    /// Summaries of sheets written so far, in workbook order.
    pub fn report(&self) -> Vec<SpecSheetSummary> {
        self.l_sheets.clone()
    }

    /// Append one styled sheet to the workbook.
    pub fn write_sheet(&mut self, sheet: &SpecStyledSheet) -> BookResult<()> {
        if self.if_closed {
            return Err(EvidenceBookError::WriterClosed);
        }

        let worksheet = self.workbook.add_worksheet();
        worksheet.set_name(&sheet.sheet_name)?;

        // Identical specs share one rust_xlsxwriter format.
        let mut dict_formats: BTreeMap<&SpecCellFormat, Format> = BTreeMap::new();
        for (n_idx_row, row) in sheet.grid.iter().enumerate() {
            for (n_idx_col, cell) in row.iter().enumerate() {
                let format = dict_formats
                    .entry(&cell.format)
                    .or_insert_with(|| derive_rust_xlsx_format(&cell.format));
                write_cell_with_format(worksheet, n_idx_row, n_idx_col, &cell.value, format)?;
            }
        }

        for (n_idx_col, n_width) in &sheet.widths_by_col {
            worksheet.set_column_width(cast_col_num(*n_idx_col)?, *n_width as f64)?;
        }
        if let Some((n_row_freeze, n_col_freeze)) = sheet.freeze_panes {
            worksheet.set_freeze_panes(cast_row_num(n_row_freeze)?, cast_col_num(n_col_freeze)?)?;
        }

        debug!(
            sheet = %sheet.sheet_name,
            n_formats = dict_formats.len(),
            "wrote sheet"
        );
        self.l_sheets.push(SpecSheetSummary {
            sheet_name: sheet.sheet_name.clone(),
            n_rows: sheet.height(),
            n_cols: sheet.width(),
        });
        Ok(())
    }

    /// Flush workbook to disk. Idempotent.
    ///
    /// The workbook is serialized into a temporary file next to the target and
    /// renamed over it, so a failed save leaves no partial output behind.
    pub fn close(&mut self) -> BookResult<()> {
        if self.if_closed {
            return Ok(());
        }

        let path_dir_out = match self.path_file_out.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let mut file_tmp = NamedTempFile::new_in(&path_dir_out)?;
        self.workbook.save_to_writer(file_tmp.as_file_mut())?;
        file_tmp
            .persist(&self.path_file_out)
            .map_err(|err| EvidenceBookError::Io(err.error))?;

        self.if_closed = true;
        info!(
            path = %self.path_file_out.display(),
            n_sheets = self.l_sheets.len(),
            "saved workbook"
        );
        Ok(())
    }
}

fn write_cell_with_format(
    worksheet: &mut Worksheet,
    row_idx: usize,
    col_idx: usize,
    value: &EnumCellValue,
    format: &Format,
) -> BookResult<()> {
    let n_row = cast_row_num(row_idx)?;
    let n_col = cast_col_num(col_idx)?;
    match value {
        EnumCellValue::None => {
            worksheet.write_blank(n_row, n_col, format)?;
        }
        EnumCellValue::String(val) => {
            worksheet.write_string_with_format(n_row, n_col, val, format)?;
        }
        EnumCellValue::Integer(val) => {
            worksheet.write_number_with_format(n_row, n_col, *val as f64, format)?;
        }
        EnumCellValue::Number(val) => {
            if val.is_finite() {
                worksheet.write_number_with_format(n_row, n_col, *val, format)?;
            } else {
                worksheet.write_string_with_format(n_row, n_col, val.to_string(), format)?;
            }
        }
        EnumCellValue::Boolean(val) => {
            worksheet.write_boolean_with_format(n_row, n_col, *val, format)?;
        }
    }
    Ok(())
}

fn derive_rust_xlsx_format(spec: &SpecCellFormat) -> Format {
    let mut format = Format::new();

    if spec.bold.unwrap_or(false) {
        format = format.set_bold();
    }

    if let Some(val) = &spec.align
        && let Some(align) = derive_format_align(val)
    {
        format = format.set_align(align);
    }
    if let Some(val) = &spec.valign
        && let Some(align) = derive_format_align(val)
    {
        format = format.set_align(align);
    }
    if spec.text_wrap.unwrap_or(false) {
        format = format.set_text_wrap();
    }

    if let Some(val) = &spec.bg_color {
        format = format.set_background_color(val.as_str());
    }
    if let Some(val) = &spec.font_color {
        format = format.set_font_color(val.as_str());
    }

    if let Some(val) = spec.border {
        format = format.set_border(derive_format_border(val));
    }
    if let Some(val) = &spec.border_color {
        format = format.set_border_color(val.as_str());
    }

    format
}

fn derive_format_border(border: i64) -> FormatBorder {
    match border {
        1 => FormatBorder::Thin,
        2 => FormatBorder::Medium,
        3 => FormatBorder::Dashed,
        4 => FormatBorder::Dotted,
        5 => FormatBorder::Thick,
        6 => FormatBorder::Double,
        7 => FormatBorder::Hair,
        _ => FormatBorder::None,
    }
}

fn derive_format_align(align: &str) -> Option<FormatAlign> {
    let value = align.trim().to_ascii_lowercase();
    match value.as_str() {
        "general" => Some(FormatAlign::General),
        "left" => Some(FormatAlign::Left),
        "center" => Some(FormatAlign::Center),
        "right" => Some(FormatAlign::Right),
        "top" => Some(FormatAlign::Top),
        "bottom" => Some(FormatAlign::Bottom),
        "vcenter" | "vertical_center" => Some(FormatAlign::VerticalCenter),
        _ => None,
    }
}

fn cast_row_num(value: usize) -> BookResult<u32> {
    u32::try_from(value)
        .map_err(|_| EvidenceBookError::usage(format!("row index overflow: {value}")))
}

fn cast_col_num(value: usize) -> BookResult<u16> {
    u16::try_from(value)
        .map_err(|_| EvidenceBookError::usage(format!("column index overflow: {value}")))
}
