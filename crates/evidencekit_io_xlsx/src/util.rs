//! Stateless helper utilities shared by the reader, dictionary, styler and writer.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::conf::{C_SHEET_NAME_FIELD_DICTIONARY, N_LEN_EXCEL_SHEET_NAME_MAX, TUP_EXCEL_ILLEGAL};
use crate::error::{BookResult, EvidenceBookError};
use crate::spec::{EnumCellValue, SpecSheetInput};

////////////////////////////////////////////////////////////////////////////////
// #region SheetSpecParsing

/// Parse one `NAME=PATH` sheet declaration.
///
/// Splits on the first `=`; both sides are trimmed and must be non-empty.
pub fn parse_sheet_spec(spec: &str) -> BookResult<SpecSheetInput> {
    let Some((c_name, c_path)) = spec.split_once('=') else {
        return Err(EvidenceBookError::usage(format!(
            "Invalid --sheet spec: {spec}. Expected NAME=/path/to/file.csv"
        )));
    };

    let c_name = c_name.trim();
    let c_path = c_path.trim();
    if c_name.is_empty() || c_path.is_empty() {
        return Err(EvidenceBookError::usage(format!(
            "Invalid --sheet spec: {spec}"
        )));
    }

    Ok(SpecSheetInput {
        name: c_name.to_string(),
        path: PathBuf::from(c_path),
    })
}

/// Parse all sheet declarations and check the resulting sheet names.
pub fn parse_sheet_specs(specs: &[String]) -> BookResult<Vec<SpecSheetInput>> {
    if specs.is_empty() {
        return Err(EvidenceBookError::usage(
            "At least one --sheet is required.",
        ));
    }

    let mut set_names_seen = BTreeSet::new();
    let mut l_inputs = Vec::with_capacity(specs.len());
    for spec in specs {
        let input = parse_sheet_spec(spec)?;
        validate_sheet_name(&input.name).map_err(EvidenceBookError::Usage)?;
        // Excel compares sheet names case-insensitively.
        let c_name_key = input.name.to_lowercase();
        if c_name_key == C_SHEET_NAME_FIELD_DICTIONARY {
            return Err(EvidenceBookError::usage(format!(
                "Sheet name {:?} is reserved for the generated dictionary.",
                input.name
            )));
        }
        if !set_names_seen.insert(c_name_key) {
            return Err(EvidenceBookError::usage(format!(
                "Duplicate sheet name: {:?}",
                input.name
            )));
        }
        l_inputs.push(input);
    }

    Ok(l_inputs)
}

/// Check a sheet name against Excel naming rules without altering it.
pub fn validate_sheet_name(name: &str) -> Result<(), String> {
    let n_len = name.chars().count();
    if n_len > N_LEN_EXCEL_SHEET_NAME_MAX {
        return Err(format!(
            "Sheet name {name:?} has {n_len} characters; Excel allows at most {N_LEN_EXCEL_SHEET_NAME_MAX}."
        ));
    }
    if let Some(chr) = name.chars().find(|chr| TUP_EXCEL_ILLEGAL.contains(chr)) {
        return Err(format!(
            "Sheet name {name:?} contains illegal character {chr:?}."
        ));
    }
    if name.starts_with('\'') || name.ends_with('\'') {
        return Err(format!(
            "Sheet name {name:?} must not start or end with an apostrophe."
        ));
    }
    Ok(())
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region TextAndWidth

/// Display length of one cell value, in characters.
pub fn derive_display_width(value: &EnumCellValue) -> usize {
    match value {
        EnumCellValue::None => 0,
        EnumCellValue::String(s) => s.chars().count(),
        _ => value.to_display_text().chars().count(),
    }
}

/// Keep at most `n_chars_max` leading characters of `text`.
pub fn truncate_chars(text: &str, n_chars_max: usize) -> String {
    text.chars().take(n_chars_max).collect()
}

/// Final column width: `clamp(width_recorded + padding, min, max)`.
pub fn calculate_column_width(
    width_recorded: usize,
    width_cell_min: usize,
    width_cell_max: usize,
    width_cell_padding: usize,
) -> usize {
    let n_min = usize::max(1, width_cell_min);
    let n_max = usize::min(255, usize::max(n_min, width_cell_max));
    usize::min(n_max, usize::max(n_min, width_recorded + width_cell_padding))
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region PathResolution

/// Expand a leading `~` to the user's home directory.
pub fn expand_user_path(path: &Path) -> PathBuf {
    match path.to_str() {
        Some(c_path) => PathBuf::from(shellexpand::tilde(c_path).into_owned()),
        None => path.to_path_buf(),
    }
}

/// Expand `~` and make `path` absolute against the current directory.
///
/// Does not require the path to exist.
pub fn resolve_absolute_path(path: &Path) -> std::io::Result<PathBuf> {
    std::path::absolute(expand_user_path(path))
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
