//! Upload parsing — turns an uploaded CSV into page records.
//!
//! The five recognized columns are all optional; a missing column or cell
//! coerces to the empty string. Unknown columns are preserved verbatim so the
//! export can carry them through unchanged. Row order is processing order.
//!
//! Any read error is fatal for the run and reported with its cause before
//! generation starts.

use csv::ReaderBuilder;

use crate::errors::AppError;
use crate::models::record::PageRecord;

pub const COL_TITLE: &str = "Title 1";
pub const COL_EXISTING_DESCRIPTION: &str = "Existing Description";
pub const COL_PRIMARY_KW: &str = "Primary KW";
pub const COL_SECONDARY_KW: &str = "Secondary KW";
pub const COL_TERTIARY_KW: &str = "Tertiary KW";

/// One parsed upload: original headers and cells verbatim, plus the
/// recognized fields extracted per row.
#[derive(Debug, Clone)]
pub struct InputTable {
    pub headers: Vec<String>,
    pub rows: Vec<InputRow>,
}

#[derive(Debug, Clone)]
pub struct InputRow {
    /// The row's original cells, in header order (short rows stay short).
    pub cells: Vec<String>,
    pub record: PageRecord,
}

impl InputTable {
    pub fn records(&self) -> Vec<PageRecord> {
        self.rows.iter().map(|r| r.record.clone()).collect()
    }
}

/// Parses uploaded CSV bytes. Fails fast on malformed input.
pub fn parse_csv(bytes: &[u8]) -> Result<InputTable, AppError> {
    if bytes.is_empty() {
        return Err(AppError::Parse("uploaded file is empty".to_string()));
    }

    let mut reader = ReaderBuilder::new().flexible(true).from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| AppError::Parse(format!("could not read header row: {e}")))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let column = |name: &str| headers.iter().position(|h| h == name);
    let title_idx = column(COL_TITLE);
    let desc_idx = column(COL_EXISTING_DESCRIPTION);
    let primary_idx = column(COL_PRIMARY_KW);
    let secondary_idx = column(COL_SECONDARY_KW);
    let tertiary_idx = column(COL_TERTIARY_KW);

    let mut rows = Vec::new();
    for (line, result) in reader.records().enumerate() {
        let raw = result.map_err(|e| AppError::Parse(format!("row {}: {e}", line + 1)))?;
        let cells: Vec<String> = raw.iter().map(|c| c.to_string()).collect();

        let field = |idx: Option<usize>| {
            idx.and_then(|i| cells.get(i))
                .map(|c| c.trim().to_string())
                .unwrap_or_default()
        };

        rows.push(InputRow {
            record: PageRecord {
                title: field(title_idx),
                existing_description: field(desc_idx),
                primary_kw: field(primary_idx),
                secondary_kw: field(secondary_idx),
                tertiary_kw: field(tertiary_idx),
            },
            cells,
        });
    }

    Ok(InputTable { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_CSV: &str = "\
Title 1,Existing Description,Primary KW,Secondary KW,Tertiary KW
Acme Laptops,Buy the best gaming laptop,gaming laptop,RTX graphics,fast SSD
My Blog,how to get started,,,
";

    #[test]
    fn test_parses_all_recognized_columns() {
        let table = parse_csv(FULL_CSV.as_bytes()).unwrap();
        assert_eq!(table.rows.len(), 2);

        let first = &table.rows[0].record;
        assert_eq!(first.title, "Acme Laptops");
        assert_eq!(first.existing_description, "Buy the best gaming laptop");
        assert_eq!(first.primary_kw, "gaming laptop");
        assert_eq!(first.secondary_kw, "RTX graphics");
        assert_eq!(first.tertiary_kw, "fast SSD");

        let second = &table.rows[1].record;
        assert_eq!(second.title, "My Blog");
        assert_eq!(second.primary_kw, "");
    }

    #[test]
    fn test_missing_columns_coerce_to_empty_strings() {
        let csv = "Title 1\nOnly Titles Here\n";
        let table = parse_csv(csv.as_bytes()).unwrap();
        let record = &table.rows[0].record;
        assert_eq!(record.title, "Only Titles Here");
        assert_eq!(record.existing_description, "");
        assert_eq!(record.primary_kw, "");
    }

    #[test]
    fn test_unknown_columns_are_preserved_in_cells() {
        let csv = "URL,Title 1\nhttps://example.com,Acme\n";
        let table = parse_csv(csv.as_bytes()).unwrap();
        assert_eq!(table.headers, vec!["URL", "Title 1"]);
        assert_eq!(table.rows[0].cells, vec!["https://example.com", "Acme"]);
        assert_eq!(table.rows[0].record.title, "Acme");
    }

    #[test]
    fn test_short_rows_are_tolerated() {
        let csv = "Title 1,Primary KW\nAcme\n";
        let table = parse_csv(csv.as_bytes()).unwrap();
        assert_eq!(table.rows[0].record.title, "Acme");
        assert_eq!(table.rows[0].record.primary_kw, "");
    }

    #[test]
    fn test_cell_whitespace_is_trimmed_in_records() {
        let csv = "Title 1,Primary KW\n  Acme  ,  widgets \n";
        let table = parse_csv(csv.as_bytes()).unwrap();
        assert_eq!(table.rows[0].record.title, "Acme");
        assert_eq!(table.rows[0].record.primary_kw, "widgets");
    }

    #[test]
    fn test_empty_upload_is_a_parse_error() {
        let err = parse_csv(b"").unwrap_err();
        assert!(matches!(err, AppError::Parse(_)));
    }

    #[test]
    fn test_undecodable_bytes_are_a_parse_error_with_cause() {
        let mut bytes = b"Title 1,Primary KW\n".to_vec();
        bytes.extend_from_slice(&[0xff, 0xfe, b'\n']);
        let err = parse_csv(&bytes).unwrap_err();
        match err {
            AppError::Parse(msg) => assert!(msg.contains("row 1"), "cause missing: {msg}"),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_row_order_is_preserved() {
        let csv = "Title 1\nfirst\nsecond\nthird\n";
        let table = parse_csv(csv.as_bytes()).unwrap();
        let titles: Vec<&str> = table.rows.iter().map(|r| r.record.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
    }
}
