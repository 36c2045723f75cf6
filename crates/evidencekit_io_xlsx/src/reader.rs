//! CSV loading into in-memory datasets.

use std::path::Path;

use polars::prelude::{AnyValue, CsvParseOptions, CsvReadOptions, DataFrame, SerReader};
use tracing::info;

use crate::conf::{N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX};
use crate::error::{BookResult, EvidenceBookError};
use crate::spec::{EnumCellValue, SpecColumn, SpecCsvReadOptions, SpecDataset};

/// Parse one CSV file (first row = header) into a dataset.
///
/// Column order is preserved; numeric and boolean columns keep their type.
pub fn read_csv_dataset(path: &Path, options: &SpecCsvReadOptions) -> BookResult<SpecDataset> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(options.infer_schema_length)
        .with_parse_options(CsvParseOptions::default().with_separator(options.separator))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(|reader| reader.finish())
        .map_err(|err| EvidenceBookError::Csv {
            path: path.to_path_buf(),
            source: err,
        })?;

    let dataset = derive_dataset_from_dataframe(&df).map_err(|err| EvidenceBookError::Csv {
        path: path.to_path_buf(),
        source: err,
    })?;
    info!(
        path = %path.display(),
        n_rows = dataset.height(),
        n_cols = dataset.width(),
        "loaded csv"
    );
    Ok(dataset)
}

/// Check that a dataset fits one worksheet below a single header row.
pub fn validate_dataset_fits_sheet(sheet_name: &str, dataset: &SpecDataset) -> BookResult<()> {
    let n_rows_max = N_NROWS_EXCEL_MAX - 1;
    if dataset.height() > n_rows_max {
        return Err(EvidenceBookError::SheetTooLarge {
            sheet_name: sheet_name.to_string(),
            n_rows: dataset.height(),
            n_rows_max,
        });
    }
    if dataset.width() > N_NCOLS_EXCEL_MAX {
        return Err(EvidenceBookError::SheetTooWide {
            sheet_name: sheet_name.to_string(),
            n_cols: dataset.width(),
            n_cols_max: N_NCOLS_EXCEL_MAX,
        });
    }
    Ok(())
}

fn derive_dataset_from_dataframe(df: &DataFrame) -> polars::prelude::PolarsResult<SpecDataset> {
    let n_height = df.height();
    let mut l_columns = Vec::with_capacity(df.width());

    for col in df.get_columns() {
        let mut l_values = Vec::with_capacity(n_height);
        for n_idx_row in 0..n_height {
            l_values.push(derive_cell_value_from_any_value(col.get(n_idx_row)?));
        }
        l_columns.push(SpecColumn::new(col.name().as_str(), l_values));
    }

    Ok(SpecDataset::new(l_columns))
}

fn derive_cell_value_from_any_value(value: AnyValue<'_>) -> EnumCellValue {
    match value {
        AnyValue::Null => EnumCellValue::None,
        AnyValue::String(val) => EnumCellValue::String(val.to_string()),
        AnyValue::StringOwned(val) => EnumCellValue::String(val.to_string()),
        AnyValue::Boolean(val) => EnumCellValue::Boolean(val),
        AnyValue::UInt32(val) => EnumCellValue::Integer(i64::from(val)),
        AnyValue::UInt64(val) => match i64::try_from(val) {
            Ok(val) => EnumCellValue::Integer(val),
            Err(_) => EnumCellValue::Number(val as f64),
        },
        AnyValue::Int32(val) => EnumCellValue::Integer(i64::from(val)),
        AnyValue::Int64(val) => EnumCellValue::Integer(val),
        AnyValue::Float32(val) => EnumCellValue::Number(f64::from(val)),
        AnyValue::Float64(val) => EnumCellValue::Number(val),
        _ => EnumCellValue::String(value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    fn write_csv(dir: &TempDir, name: &str, txt: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, txt).expect("write csv");
        path
    }

    #[test]
    fn test_read_csv_keeps_column_order_and_types() {
        let tmp = TempDir::new().expect("tempdir");
        let path = write_csv(
            &tmp,
            "people.csv",
            "name,age,score,active\nAda,36,1.5,true\nBob,,2.25,false\n",
        );

        let dataset = read_csv_dataset(&path, &SpecCsvReadOptions::default()).expect("read");
        assert_eq!(dataset.column_names(), vec!["name", "age", "score", "active"]);
        assert_eq!(dataset.height(), 2);
        assert_eq!(dataset.value(0, 0), &EnumCellValue::from("Ada"));
        assert_eq!(dataset.value(0, 1), &EnumCellValue::Integer(36));
        assert_eq!(dataset.value(1, 1), &EnumCellValue::None);
        assert_eq!(dataset.value(1, 2), &EnumCellValue::Number(2.25));
        assert_eq!(dataset.value(0, 3), &EnumCellValue::Boolean(true));
    }

    #[test]
    fn test_read_header_only_csv_has_zero_rows() {
        let tmp = TempDir::new().expect("tempdir");
        let path = write_csv(&tmp, "empty.csv", "a,b\n");

        let dataset = read_csv_dataset(&path, &SpecCsvReadOptions::default()).expect("read");
        assert_eq!(dataset.column_names(), vec!["a", "b"]);
        assert_eq!(dataset.height(), 0);
    }

    #[test]
    fn test_read_late_non_numeric_value_keeps_column_as_text() {
        let tmp = TempDir::new().expect("tempdir");
        let mut txt = String::from("id,zip\n");
        for n_idx in 0..10_050 {
            txt.push_str(&format!("{n_idx},{n_idx}\n"));
        }
        txt.push_str("x,A1B2C3\n");
        let path = write_csv(&tmp, "late.csv", &txt);

        let dataset = read_csv_dataset(&path, &SpecCsvReadOptions::default()).expect("read");
        assert_eq!(dataset.height(), 10_051);
        assert_eq!(dataset.value(0, 0), &EnumCellValue::from("0"));
        assert_eq!(dataset.value(10_050, 0), &EnumCellValue::from("x"));
        assert_eq!(dataset.value(10_050, 1), &EnumCellValue::from("A1B2C3"));
    }

    #[test]
    fn test_read_integral_float_keeps_decimal_text() {
        let tmp = TempDir::new().expect("tempdir");
        let path = write_csv(&tmp, "score.csv", "score\n1.0\n2.5\n");

        let dataset = read_csv_dataset(&path, &SpecCsvReadOptions::default()).expect("read");
        assert_eq!(dataset.value(0, 0), &EnumCellValue::Number(1.0));
        assert_eq!(dataset.value(0, 0).to_display_text(), "1.0");
    }

    #[test]
    fn test_read_missing_file_is_csv_error() {
        let tmp = TempDir::new().expect("tempdir");
        let err = read_csv_dataset(&tmp.path().join("nope.csv"), &SpecCsvReadOptions::default())
            .expect_err("missing file");
        assert!(matches!(err, EvidenceBookError::Csv { .. }));
    }

    #[test]
    fn test_validate_dataset_fits_sheet() {
        let dataset = SpecDataset::new(vec![SpecColumn::new("a", vec![EnumCellValue::None; 3])]);
        assert!(validate_dataset_fits_sheet("a", &dataset).is_ok());
    }
}
