//! End-to-end evidence workbook build: load, summarize, style, save.

use std::path::Path;

use indexmap::IndexMap;
use tracing::info;

use crate::conf::C_SHEET_NAME_FIELD_DICTIONARY;
use crate::dictionary::build_dictionary;
use crate::error::{BookResult, EvidenceBookError};
use crate::reader::{read_csv_dataset, validate_dataset_fits_sheet};
use crate::spec::{
    SpecCsvReadOptions, SpecDataset, SpecSheetInput, SpecStyledSheet, SpecWorkbookReport,
};
use crate::styler::style_sheet;
use crate::util::{parse_sheet_specs, resolve_absolute_path};
use crate::writer::XlsxWriter;

/// Parse raw `NAME=PATH` declarations in command-line order.
pub fn resolve_sheet_inputs(specs: &[String]) -> BookResult<Vec<SpecSheetInput>> {
    parse_sheet_specs(specs)
}

/// Load every declared CSV, keyed by sheet name in declaration order.
///
/// Fails on the first input that is missing or cannot be parsed.
pub fn load_datasets(
    inputs: &[SpecSheetInput],
    options: &SpecCsvReadOptions,
) -> BookResult<IndexMap<String, SpecDataset>> {
    let mut datasets = IndexMap::with_capacity(inputs.len());
    for input in inputs {
        let path_input = resolve_absolute_path(&input.path)?;
        if !path_input.is_file() {
            return Err(EvidenceBookError::InputNotFound(path_input));
        }

        let dataset = read_csv_dataset(&path_input, options)?;
        validate_dataset_fits_sheet(&input.name, &dataset)?;
        info!(sheet = %input.name, path = %path_input.display(), "registered input");
        datasets.insert(input.name.clone(), dataset);
    }
    Ok(datasets)
}

/// Write the dictionary sheet followed by every dataset sheet, each styled.
///
/// Parent directories of `path_file_out` are created; the returned report
/// carries the absolute output path.
pub fn write_workbook(
    datasets: &IndexMap<String, SpecDataset>,
    path_file_out: &Path,
) -> BookResult<SpecWorkbookReport> {
    let path_file_out = resolve_absolute_path(path_file_out)?;
    if let Some(parent) = path_file_out.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let df_dictionary = build_dictionary(datasets);
    let l_sheets = std::iter::once((C_SHEET_NAME_FIELD_DICTIONARY, &df_dictionary))
        .chain(datasets.iter().map(|(name, dataset)| (name.as_str(), dataset)));

    let mut writer = XlsxWriter::new(path_file_out.clone());
    for (sheet_name, dataset) in l_sheets {
        let mut sheet = SpecStyledSheet::from_dataset(sheet_name, dataset);
        style_sheet(&mut sheet);
        writer.write_sheet(&sheet)?;
    }
    writer.close()?;

    Ok(SpecWorkbookReport {
        path_file_out,
        sheets: writer.report(),
    })
}

/// Load all inputs, then build and save the workbook.
///
/// Nothing is written unless every input loads successfully.
pub fn build_workbook(
    inputs: &[SpecSheetInput],
    path_file_out: &Path,
) -> BookResult<SpecWorkbookReport> {
    let datasets = load_datasets(inputs, &SpecCsvReadOptions::default())?;
    let report = write_workbook(&datasets, path_file_out)?;
    info!("{report}");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use calamine::{Data, Reader, Xlsx, open_workbook};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    fn write_text(path: &Path, txt: &str) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent");
        }
        std::fs::write(path, txt).expect("write text");
    }

    fn create_inputs(tmp: &TempDir) -> Vec<SpecSheetInput> {
        let path_people = tmp.path().join("people.csv");
        let path_orders = tmp.path().join("orders.csv");
        write_text(&path_people, "name,age\nAda,36\nBob,41\n");
        write_text(&path_orders, "order_id,name\no-1,Ada\n");

        resolve_sheet_inputs(&[
            format!("people={}", path_people.display()),
            format!("orders={}", path_orders.display()),
        ])
        .expect("valid specs")
    }

    fn read_rows(path: &Path, sheet_name: &str) -> Vec<Vec<String>> {
        let mut workbook: Xlsx<_> = open_workbook(path).expect("open xlsx");
        let range = workbook.worksheet_range(sheet_name).expect("range");
        range
            .rows()
            .map(|row| {
                row.iter()
                    .map(|cell| match cell {
                        Data::Empty => String::new(),
                        other => other.to_string(),
                    })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_build_workbook_end_to_end() {
        let tmp = TempDir::new().expect("tempdir");
        let inputs = create_inputs(&tmp);
        let path_out = tmp.path().join("nested/dir/evidence.xlsx");

        let report = build_workbook(&inputs, &path_out).expect("build workbook");
        assert!(path_out.is_file());
        assert!(report.path_file_out.is_absolute());
        assert_eq!(
            report.sheet_names(),
            vec!["field_dictionary", "people", "orders"]
        );

        let workbook: Xlsx<_> = open_workbook(&path_out).expect("open xlsx");
        assert_eq!(
            workbook.sheet_names(),
            vec!["field_dictionary", "people", "orders"]
        );

        let l_rows = read_rows(&path_out, "field_dictionary");
        let l_summary: Vec<(&str, &str, &str)> = l_rows
            .iter()
            .map(|row| (row[0].as_str(), row[2].as_str(), row[3].as_str()))
            .collect();
        assert_eq!(
            l_summary,
            vec![
                ("field_name", "appears_in", "sample"),
                ("age", "people", "36"),
                ("name", "people", "Ada"),
                ("order_id", "orders", "o-1"),
            ]
        );

        let l_rows = read_rows(&path_out, "people");
        assert_eq!(l_rows[0], vec!["name", "age"]);
        assert_eq!(l_rows.len(), 3);
    }

    #[test]
    fn test_dictionary_sheet_is_styled() {
        let tmp = TempDir::new().expect("tempdir");
        let inputs = create_inputs(&tmp);
        let datasets = load_datasets(&inputs, &SpecCsvReadOptions::default()).expect("load");

        let mut sheet =
            SpecStyledSheet::from_dataset(C_SHEET_NAME_FIELD_DICTIONARY, &build_dictionary(&datasets));
        style_sheet(&mut sheet);

        assert_eq!(sheet.freeze_panes, Some((1, 0)));
        assert_eq!(sheet.widths_by_col.get(&0), Some(&12));
        assert_eq!(sheet.widths_by_col.get(&1), Some(&44));
    }

    #[test]
    fn test_missing_input_produces_no_output() {
        let tmp = TempDir::new().expect("tempdir");
        let path_out = tmp.path().join("out.xlsx");
        let inputs = vec![SpecSheetInput {
            name: "a".to_string(),
            path: PathBuf::from("/no/such/file.csv"),
        }];

        let err = build_workbook(&inputs, &path_out).expect_err("missing input");
        assert!(matches!(err, EvidenceBookError::InputNotFound(_)));
        assert!(err.to_string().starts_with("Input file not found:"));
        assert!(!path_out.exists());
    }

    #[test]
    fn test_second_input_failure_writes_nothing() {
        let tmp = TempDir::new().expect("tempdir");
        let path_ok = tmp.path().join("ok.csv");
        write_text(&path_ok, "a\n1\n");
        let path_out = tmp.path().join("out.xlsx");
        let inputs = vec![
            SpecSheetInput {
                name: "ok".to_string(),
                path: path_ok,
            },
            SpecSheetInput {
                name: "gone".to_string(),
                path: tmp.path().join("gone.csv"),
            },
        ];

        assert!(build_workbook(&inputs, &path_out).is_err());
        assert!(!path_out.exists());
    }

    #[test]
    fn test_directory_input_is_not_found() {
        let tmp = TempDir::new().expect("tempdir");
        let inputs = vec![SpecSheetInput {
            name: "dir".to_string(),
            path: tmp.path().to_path_buf(),
        }];

        let err = load_datasets(&inputs, &SpecCsvReadOptions::default()).expect_err("dir");
        assert!(matches!(err, EvidenceBookError::InputNotFound(_)));
    }

    #[test]
    fn test_rebuild_overwrites_existing_output() {
        let tmp = TempDir::new().expect("tempdir");
        let inputs = create_inputs(&tmp);
        let path_out = tmp.path().join("evidence.xlsx");

        build_workbook(&inputs, &path_out).expect("first build");
        build_workbook(&inputs[..1], &path_out).expect("second build");

        let workbook: Xlsx<_> = open_workbook(&path_out).expect("open xlsx");
        assert_eq!(workbook.sheet_names(), vec!["field_dictionary", "people"]);
    }
}
