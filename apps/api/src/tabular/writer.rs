//! Export — writes the enhanced CSV the operator downloads.
//!
//! Original columns are carried through untouched; the generated columns are
//! appended after them, in a fixed order.

use anyhow::anyhow;

use crate::errors::AppError;
use crate::generation::generator::GeneratedMeta;
use crate::tabular::reader::InputTable;

pub const EXPORT_FILENAME: &str = "output_with_meta.csv";

/// Appended columns, in export order.
pub const APPENDED_HEADERS: [&str; 5] = [
    "Detected Intent",
    "Generated Meta Title",
    "Generated Meta Description",
    "Title Char Count",
    "Description Char Count",
];

/// Serializes the input table plus one generated row per input row.
///
/// `rows` must be in input order and the same length as `table.rows`; the
/// batch pipeline guarantees both.
pub fn write_csv(table: &InputTable, rows: &[GeneratedMeta]) -> Result<Vec<u8>, AppError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let header: Vec<&str> = table
        .headers
        .iter()
        .map(String::as_str)
        .chain(APPENDED_HEADERS)
        .collect();
    writer
        .write_record(&header)
        .map_err(|e| AppError::Internal(anyhow!("failed to write export header: {e}")))?;

    for (input, meta) in table.rows.iter().zip(rows) {
        let mut record: Vec<String> = input.cells.clone();
        // Short rows are padded so the output stays rectangular.
        record.resize(table.headers.len(), String::new());
        record.push(meta.intent.as_str().to_string());
        record.push(meta.meta_title.clone());
        record.push(meta.meta_description.clone());
        record.push(meta.title_char_count.to_string());
        record.push(meta.description_char_count.to_string());

        writer
            .write_record(&record)
            .map_err(|e| AppError::Internal(anyhow!("failed to write export row: {e}")))?;
    }

    writer
        .into_inner()
        .map_err(|e| AppError::Internal(anyhow!("failed to finish export: {e}")))
}
