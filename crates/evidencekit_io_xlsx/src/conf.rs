//! Workbook constants and default preset factories.

use crate::spec::{SpecCellFormat, SpecSheetStyle};

/// Excel worksheet maximum row count (header included).
pub const N_NROWS_EXCEL_MAX: usize = 1_048_576;
/// Excel worksheet maximum column count.
pub const N_NCOLS_EXCEL_MAX: usize = 16_384;
/// Excel sheet name maximum length.
pub const N_LEN_EXCEL_SHEET_NAME_MAX: usize = 31;
/// Characters not allowed in sheet names.
pub const TUP_EXCEL_ILLEGAL: [char; 7] = ['*', ':', '?', '/', '\\', '[', ']'];

/// Brand color used for header fill and first-column text.
pub const C_COLOR_BRAND: &str = "#003A70";
/// Thin border color applied to every styled cell.
pub const C_COLOR_BORDER: &str = "#D9D9D9";
/// Header text color.
pub const C_COLOR_HEADER_FONT: &str = "#FFFFFF";
/// Body text color.
pub const C_COLOR_BODY_FONT: &str = "#000000";

/// Thin border style code (see `writer::derive_format_border`).
pub const N_BORDER_THIN: i64 = 1;

/// Lower bound of an auto-fitted column width.
pub const N_WIDTH_CELL_MIN: usize = 10;
/// Upper bound of an auto-fitted column width.
pub const N_WIDTH_CELL_MAX: usize = 60;
/// Padding added to the longest text before clamping.
pub const N_WIDTH_CELL_PADDING: usize = 2;

/// Name of the generated dictionary sheet.
pub const C_SHEET_NAME_FIELD_DICTIONARY: &str = "field_dictionary";
/// Placeholder written into every dictionary `description` cell.
pub const C_FIELD_DESCRIPTION_PLACEHOLDER: &str = "See project schema and evidence contracts.";
/// Maximum sample length, in characters.
pub const N_LEN_FIELD_SAMPLE_MAX: usize = 160;
/// Dictionary columns, in output order.
pub const TUP_FIELD_DICTIONARY_COLUMNS: [&str; 4] =
    ["field_name", "description", "appears_in", "sample"];

/// Build the default sheet style preset used by [`crate::styler::style_sheet`].
pub fn derive_default_sheet_style() -> SpecSheetStyle {
    let cfg_base_fmt_spec = SpecCellFormat {
        border: Some(N_BORDER_THIN),
        border_color: Some(C_COLOR_BORDER.to_string()),
        valign: Some("top".to_string()),
        text_wrap: Some(true),
        ..Default::default()
    };

    SpecSheetStyle {
        fmt_header: cfg_base_fmt_spec.with_(SpecCellFormat {
            bg_color: Some(C_COLOR_BRAND.to_string()),
            font_color: Some(C_COLOR_HEADER_FONT.to_string()),
            bold: Some(true),
            align: Some("center".to_string()),
            valign: Some("vcenter".to_string()),
            ..Default::default()
        }),
        fmt_first_col: cfg_base_fmt_spec.with_(SpecCellFormat {
            font_color: Some(C_COLOR_BRAND.to_string()),
            bold: Some(true),
            ..Default::default()
        }),
        fmt_body: cfg_base_fmt_spec.with_(SpecCellFormat {
            font_color: Some(C_COLOR_BODY_FONT.to_string()),
            bold: Some(false),
            ..Default::default()
        }),
        width_cell_min: N_WIDTH_CELL_MIN,
        width_cell_max: N_WIDTH_CELL_MAX,
        width_cell_padding: N_WIDTH_CELL_PADDING,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_style_header_overrides_base_alignment() {
        let style = derive_default_sheet_style();

        assert_eq!(style.fmt_header.align.as_deref(), Some("center"));
        assert_eq!(style.fmt_header.valign.as_deref(), Some("vcenter"));
        assert_eq!(style.fmt_header.text_wrap, Some(true));
        assert_eq!(style.fmt_header.border_color.as_deref(), Some(C_COLOR_BORDER));

        assert_eq!(style.fmt_first_col.bg_color, None);
        assert_eq!(style.fmt_first_col.font_color.as_deref(), Some(C_COLOR_BRAND));
        assert_eq!(style.fmt_body.bold, Some(false));
        assert_eq!(style.fmt_body.valign.as_deref(), Some("top"));
    }
}
