//! Field dictionary derivation across all loaded sheets.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use tracing::debug;

use crate::conf::{
    C_FIELD_DESCRIPTION_PLACEHOLDER, N_LEN_FIELD_SAMPLE_MAX, TUP_FIELD_DICTIONARY_COLUMNS,
};
use crate::spec::{EnumCellValue, SpecColumn, SpecDataset, SpecFieldRecord};
use crate::util::truncate_chars;

/// Collect one record per distinct column name, attributed to the first sheet
/// (in mapping order) that declares it, sorted by `(field_name, appears_in)`.
pub fn derive_field_records(datasets: &IndexMap<String, SpecDataset>) -> Vec<SpecFieldRecord> {
    let mut set_field_names_seen: BTreeSet<&str> = BTreeSet::new();
    let mut l_records = Vec::new();

    for (sheet_name, dataset) in datasets {
        for col in &dataset.columns {
            if !set_field_names_seen.insert(col.name.as_str()) {
                continue;
            }
            l_records.push(SpecFieldRecord {
                field_name: col.name.clone(),
                description: C_FIELD_DESCRIPTION_PLACEHOLDER.to_string(),
                appears_in: sheet_name.clone(),
                sample: derive_column_sample(col),
            });
        }
    }

    l_records.sort_by(|a, b| {
        a.field_name
            .cmp(&b.field_name)
            .then_with(|| a.appears_in.cmp(&b.appears_in))
    });
    debug!(n_fields = l_records.len(), "derived field dictionary");
    l_records
}

/// Build the `field_dictionary` dataset.
///
/// Columns are `field_name, description, appears_in, sample`, one row per
/// record from [`derive_field_records`].
pub fn build_dictionary(datasets: &IndexMap<String, SpecDataset>) -> SpecDataset {
    let l_records = derive_field_records(datasets);

    let mut l_values_by_col: [Vec<EnumCellValue>; 4] = Default::default();
    for record in l_records {
        l_values_by_col[0].push(EnumCellValue::String(record.field_name));
        l_values_by_col[1].push(EnumCellValue::String(record.description));
        l_values_by_col[2].push(EnumCellValue::String(record.appears_in));
        l_values_by_col[3].push(EnumCellValue::String(record.sample));
    }

    SpecDataset::new(
        TUP_FIELD_DICTIONARY_COLUMNS
            .iter()
            .zip(l_values_by_col)
            .map(|(c_name, values)| SpecColumn::new(*c_name, values))
            .collect(),
    )
}

/// First value whose trimmed text is non-empty, truncated to the sample cap.
fn derive_column_sample(col: &SpecColumn) -> String {
    col.values
        .iter()
        .map(EnumCellValue::to_display_text)
        .find_map(|c_text| {
            let c_trimmed = c_text.trim();
            if c_trimmed.is_empty() {
                None
            } else {
                Some(truncate_chars(c_trimmed, N_LEN_FIELD_SAMPLE_MAX))
            }
        })
        .unwrap_or_default()
}
