//! Deterministic visual formatting of a rendered worksheet grid.

use tracing::debug;

use crate::conf::derive_default_sheet_style;
use crate::spec::{SpecSheetStyle, SpecStyledSheet};
use crate::util::{calculate_column_width, derive_display_width};

/// Style `sheet` in place with the default preset.
pub fn style_sheet(sheet: &mut SpecStyledSheet) {
    style_sheet_with(sheet, &derive_default_sheet_style());
}

/// Style `sheet` in place with an explicit preset.
///
/// Row 0 receives the header format, column 0 below the header the
/// first-column format, every other cell the body format. Column widths are
/// auto-fitted from display text and the header row is frozen. Empty grids
/// are left untouched.
pub fn style_sheet_with(sheet: &mut SpecStyledSheet, style: &SpecSheetStyle) {
    let n_height = sheet.height();
    let n_width = sheet.width();
    if n_height == 0 || n_width == 0 {
        debug!(sheet = %sheet.sheet_name, "skip styling of empty sheet");
        return;
    }

    let mut l_width_by_col = vec![0usize; n_width];
    for (n_idx_row, row) in sheet.grid.iter_mut().enumerate() {
        for (n_idx_col, cell) in row.iter_mut().enumerate() {
            l_width_by_col[n_idx_col] =
                usize::max(l_width_by_col[n_idx_col], derive_display_width(&cell.value));

            let fmt_role = if n_idx_row == 0 {
                &style.fmt_header
            } else if n_idx_col == 0 {
                &style.fmt_first_col
            } else {
                &style.fmt_body
            };
            cell.format = cell.format.merge(fmt_role);
        }
    }

    sheet.widths_by_col = l_width_by_col
        .into_iter()
        .enumerate()
        .map(|(n_idx_col, n_width_recorded)| {
            (
                n_idx_col,
                calculate_column_width(
                    n_width_recorded,
                    style.width_cell_min,
                    style.width_cell_max,
                    style.width_cell_padding,
                ),
            )
        })
        .collect();
    sheet.freeze_panes = Some((1, 0));

    debug!(
        sheet = %sheet.sheet_name,
        n_rows = n_height,
        n_cols = n_width,
        "styled sheet"
    );
}
