// AssetLookup - core/catalog.rs
//
// CSV inventory -> lookup catalog.
// Core layer: accepts CSV text, never touches the filesystem or network.
//
// The parse is all-or-nothing: any validation failure returns an error and
// no partially populated catalog ever escapes this module.

use crate::core::model::{AssetRecord, LookupMode};
use crate::util::constants::{
    HEADER_ASSET_TAG, HEADER_ASSET_TYPE, HEADER_MODEL_NAME, HEADER_SERIAL_NUMBER,
    REQUIRED_HEADERS,
};
use crate::util::error::CatalogError;
use crate::util::logging::preview;
use std::collections::HashMap;
use std::sync::Arc;

/// Options controlling how CSV text is read and indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogOptions {
    /// Whether a Serial Number index is built for fallback lookups.
    pub mode: LookupMode,

    /// Honour RFC 4180 double-quoted fields. When false every comma splits,
    /// quotes included.
    pub quoting: bool,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self {
            mode: LookupMode::default(),
            quoting: true,
        }
    }
}

/// Normalise a raw key or query for case-insensitive matching.
pub fn normalise_key(raw: &str) -> String {
    raw.trim().to_uppercase()
}

// =============================================================================
// Catalog
// =============================================================================

/// In-memory lookup tables built from one CSV load.
///
/// Both indexes share the same `Arc<AssetRecord>` values. The serial index is
/// only populated when the catalog was built with
/// `LookupMode::AssetTagThenSerial`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Catalog {
    mode: LookupMode,
    by_asset_tag: HashMap<String, Arc<AssetRecord>>,
    by_serial_number: HashMap<String, Arc<AssetRecord>>,
    rows_read: usize,
}

impl Catalog {
    /// A catalog with no records, used before the first load and after any
    /// failed load.
    pub fn empty(mode: LookupMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    pub fn mode(&self) -> LookupMode {
        self.mode
    }

    /// Number of distinct asset tags (duplicates collapse to one record).
    pub fn len(&self) -> usize {
        self.by_asset_tag.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_asset_tag.is_empty() && self.by_serial_number.is_empty()
    }

    /// Number of non-blank data rows read, including rows whose tag was
    /// later overwritten by a duplicate.
    pub fn rows_read(&self) -> usize {
        self.rows_read
    }

    /// Look up by an already normalised Asset Tag key.
    pub fn by_asset_tag(&self, key: &str) -> Option<&Arc<AssetRecord>> {
        self.by_asset_tag.get(key)
    }

    /// Look up by an already normalised Serial Number key.
    pub fn by_serial_number(&self, key: &str) -> Option<&Arc<AssetRecord>> {
        self.by_serial_number.get(key)
    }

    fn insert(&mut self, record: AssetRecord) {
        let record = Arc::new(record);

        let tag_key = normalise_key(&record.asset_tag);
        if self
            .by_asset_tag
            .insert(tag_key, Arc::clone(&record))
            .is_some()
        {
            tracing::debug!(asset_tag = %record.asset_tag, "Duplicate asset tag; later row wins");
        }

        if self.mode.serial_fallback() {
            let serial_key = normalise_key(&record.serial_number);
            self.by_serial_number.insert(serial_key, record);
        }

        self.rows_read += 1;
    }
}

// =============================================================================
// Header resolution
// =============================================================================

/// Positions of the required columns within a row.
#[derive(Debug, Clone, Copy)]
struct ColumnIndices {
    asset_tag: usize,
    serial_number: usize,
    model_name: usize,
    asset_type: usize,
}

impl ColumnIndices {
    /// Find every required header, reporting all missing ones at once.
    /// The first occurrence wins when a header name repeats.
    fn locate(headers: &[&str]) -> Result<Self, CatalogError> {
        let find = |name: &str| headers.iter().position(|h| *h == name);

        let missing: Vec<&'static str> = REQUIRED_HEADERS
            .iter()
            .copied()
            .filter(|name| find(name).is_none())
            .collect();

        match (
            find(HEADER_ASSET_TAG),
            find(HEADER_SERIAL_NUMBER),
            find(HEADER_MODEL_NAME),
            find(HEADER_ASSET_TYPE),
        ) {
            (Some(asset_tag), Some(serial_number), Some(model_name), Some(asset_type)) => {
                Ok(Self {
                    asset_tag,
                    serial_number,
                    model_name,
                    asset_type,
                })
            }
            _ => Err(CatalogError::MissingHeaders { missing }),
        }
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Parse CSV text into a fresh catalog.
///
/// The text is trimmed (including a leading UTF-8 BOM) and every carriage
/// return is removed before reading. The first line is the header row; its
/// field count is the count every data row must match. Whitespace-only
/// lines are skipped but still count toward reported line numbers.
pub fn parse_catalog(csv_text: &str, options: &CatalogOptions) -> Result<Catalog, CatalogError> {
    let cleaned = csv_text
        .trim_start_matches('\u{feff}')
        .trim()
        .replace('\r', "");

    if cleaned.split('\n').count() < 2 {
        return Err(CatalogError::EmptyOrHeaderOnly);
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(options.quoting)
        .from_reader(cleaned.as_bytes());
    let mut rows = reader.records();

    let header_row = match rows.next() {
        Some(row) => row.map_err(|source| CatalogError::Csv { source })?,
        None => return Err(CatalogError::EmptyOrHeaderOnly),
    };
    let headers: Vec<&str> = header_row.iter().map(str::trim).collect();
    let expected = headers.len();
    let columns = ColumnIndices::locate(&headers)?;

    tracing::debug!(
        columns = expected,
        mode = ?options.mode,
        quoting = options.quoting,
        "CSV header validated"
    );

    let mut catalog = Catalog::empty(options.mode);

    for row in rows {
        let row = row.map_err(|source| CatalogError::Csv { source })?;
        let start = record_start(&cleaned, &row);

        if is_blank_line(&cleaned, start) {
            continue;
        }

        if row.len() != expected {
            let line = line_number(&cleaned, start);
            let raw = row.iter().collect::<Vec<_>>().join(",");
            tracing::debug!(row = line, content = preview(&raw), "Corrupted row");
            tracing::warn!(
                row = line,
                expected,
                found = row.len(),
                "Row has an inconsistent column count; discarding CSV"
            );
            return Err(CatalogError::RowCorrupted {
                row: line,
                expected,
                found: row.len(),
            });
        }

        let field = |idx: usize| row.get(idx).unwrap_or_default().trim().to_string();

        catalog.insert(AssetRecord {
            asset_tag: field(columns.asset_tag),
            serial_number: field(columns.serial_number),
            model_name: field(columns.model_name),
            asset_type: field(columns.asset_type),
        });
    }

    tracing::debug!(
        records = catalog.len(),
        rows = catalog.rows_read(),
        "Catalog built"
    );

    Ok(catalog)
}

/// Byte offset of the first character of `row` in `text`.
///
/// The csv reader silently consumes empty lines between records, so its
/// position can point at them; step past any leading newlines.
fn record_start(text: &str, row: &csv::StringRecord) -> usize {
    let from = row
        .position()
        .map_or(0, |p| usize::try_from(p.byte()).unwrap_or(usize::MAX))
        .min(text.len());
    from + text.as_bytes()[from..]
        .iter()
        .take_while(|b| **b == b'\n')
        .count()
}

/// 1-based line number of the byte at `offset`, counting every line.
fn line_number(text: &str, offset: usize) -> u64 {
    let newlines = text.as_bytes()[..offset.min(text.len())]
        .iter()
        .filter(|b| **b == b'\n')
        .count();
    newlines as u64 + 1
}

/// Blank means the raw line is whitespace only. A quoted empty field
/// (`""`) is content, not a blank line.
fn is_blank_line(text: &str, offset: usize) -> bool {
    text.get(offset..)
        .and_then(|rest| rest.split('\n').next())
        .map_or(true, |line| line.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::LookupMode;

    const HEADER: &str = "Asset Tag,Serial Number,Model Name,Asset Type";

    fn parse(text: &str) -> Result<Catalog, CatalogError> {
        parse_catalog(text, &CatalogOptions::default())
    }

    #[test]
    fn test_parse_single_row() {
        let catalog = parse(&format!("{HEADER}\nAB-01,SN-99,ThinkPad,Laptop")).unwrap();
        assert_eq!(catalog.len(), 1);
        let record = catalog.by_asset_tag("AB-01").unwrap();
        assert_eq!(record.serial_number, "SN-99");
        assert_eq!(record.model_name, "ThinkPad");
        assert_eq!(record.asset_type, "Laptop");
    }

    #[test]
    fn test_keys_uppercased_values_keep_case() {
        let catalog = parse(&format!("{HEADER}\nab-01,sn-99x,ThinkPad,Laptop")).unwrap();
        let record = catalog.by_asset_tag("AB-01").unwrap();
        assert_eq!(record.asset_tag, "ab-01");
        assert_eq!(record.serial_number, "sn-99x");
        assert!(catalog.by_asset_tag("ab-01").is_none());
        assert!(catalog.by_serial_number("SN-99X").is_some());
    }

    #[test]
    fn test_fields_and_headers_trimmed() {
        let text = " Asset Tag , Serial Number,Model Name ,Asset Type\r\n  AB-01 , SN-99,X1 Carbon , Laptop \r\n";
        let catalog = parse(text).unwrap();
        let record = catalog.by_asset_tag("AB-01").unwrap();
        assert_eq!(record.asset_tag, "AB-01");
        assert_eq!(record.model_name, "X1 Carbon");
        assert_eq!(record.asset_type, "Laptop");
    }

    #[test]
    fn test_leading_bom_ignored() {
        let catalog = parse(&format!("\u{feff}{HEADER}\nAB-01,SN-99,ThinkPad,Laptop")).unwrap();
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_empty_input_rejected() {
        assert!(matches!(parse(""), Err(CatalogError::EmptyOrHeaderOnly)));
        assert!(matches!(parse("  \n \r\n"), Err(CatalogError::EmptyOrHeaderOnly)));
    }

    #[test]
    fn test_header_only_rejected() {
        assert!(matches!(
            parse(&format!("{HEADER}\n\n")),
            Err(CatalogError::EmptyOrHeaderOnly)
        ));
    }

    #[test]
    fn test_missing_headers_listed() {
        let result = parse("Asset Tag,Model Name\nAB-01,ThinkPad");
        match result {
            Err(CatalogError::MissingHeaders { missing }) => {
                assert_eq!(missing, vec!["Serial Number", "Asset Type"]);
            }
            other => panic!("expected MissingHeaders, got {other:?}"),
        }
    }

    #[test]
    fn test_headers_are_case_sensitive() {
        let result = parse("asset tag,Serial Number,Model Name,Asset Type\nAB-01,SN,M,T");
        assert!(matches!(result, Err(CatalogError::MissingHeaders { .. })));
    }

    #[test]
    fn test_column_order_and_extra_columns() {
        let text = "Location,Asset Type,Model Name,Asset Tag,Serial Number\n\
                    Leeds,Monitor,P2422H,MN-7,CN0X\n";
        let catalog = parse(text).unwrap();
        let record = catalog.by_asset_tag("MN-7").unwrap();
        assert_eq!(record.asset_type, "Monitor");
        assert_eq!(record.model_name, "P2422H");
        assert_eq!(record.serial_number, "CN0X");
    }

    #[test]
    fn test_repeated_header_uses_first_column() {
        let text = "Asset Tag,Serial Number,Model Name,Asset Type,Asset Tag\nA1,S1,M1,T1,A2";
        let catalog = parse(text).unwrap();
        assert!(catalog.by_asset_tag("A1").is_some());
        assert!(catalog.by_asset_tag("A2").is_none());
    }

    #[test]
    fn test_corrupted_row_discards_everything() {
        let text = format!("{HEADER}\nAB-01,SN-1,ThinkPad,Laptop\nAB-02,SN-2,Laptop\nAB-03,SN-3,M,T");
        match parse(&text) {
            Err(CatalogError::RowCorrupted {
                row,
                expected,
                found,
            }) => {
                assert_eq!(row, 3);
                assert_eq!(expected, 4);
                assert_eq!(found, 3);
            }
            other => panic!("expected RowCorrupted, got {other:?}"),
        }
    }

    #[test]
    fn test_blank_lines_skipped() {
        let text = format!("{HEADER}\nAB-01,SN-1,ThinkPad,Laptop\n\n   \nAB-02,SN-2,P2422H,Monitor");
        let catalog = parse(&text).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.rows_read(), 2);
    }

    #[test]
    fn test_corrupted_row_counts_blank_lines() {
        let text = format!("{HEADER}\nA1,S1,M1,T1\n\n\nBAD,ROW");
        for quoting in [true, false] {
            let options = CatalogOptions {
                quoting,
                ..Default::default()
            };
            match parse_catalog(&text, &options) {
                Err(CatalogError::RowCorrupted { row, expected, found }) => {
                    assert_eq!(row, 5, "quoting = {quoting}");
                    assert_eq!(expected, 4);
                    assert_eq!(found, 2);
                }
                other => panic!("expected RowCorrupted, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_corrupted_row_after_whitespace_and_crlf_lines() {
        let text = format!("{HEADER}\r\nA1,S1,M1,T1\r\n   \r\n\r\nA2,S2,M2,T2\r\nBAD\r\n");
        assert!(matches!(
            parse(&text),
            Err(CatalogError::RowCorrupted { row: 6, found: 1, .. })
        ));
    }

    #[test]
    fn test_quoted_empty_line_is_not_blank() {
        assert!(matches!(
            parse(&format!("{HEADER}\nA1,S1,M1,T1\n\"\"")),
            Err(CatalogError::RowCorrupted { row: 3, found: 1, .. })
        ));
    }

    #[test]
    fn test_line_helpers() {
        let text = "h\n\n\nrow";
        assert_eq!(line_number(text, 0), 1);
        assert_eq!(line_number(text, 4), 4);
        assert!(is_blank_line(text, 2));
        assert!(!is_blank_line(text, 4));
        assert!(is_blank_line(text, text.len()));
    }

    #[test]
    fn test_duplicate_tag_last_row_wins() {
        let text = format!("{HEADER}\nAB-01,SN-1,Old,Laptop\nab-01,SN-2,New,Laptop");
        let catalog = parse(&text).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.rows_read(), 2);
        let record = catalog.by_asset_tag("AB-01").unwrap();
        assert_eq!(record.model_name, "New");
        assert_eq!(record.asset_tag, "ab-01");
    }

    #[test]
    fn test_both_indexes_share_records() {
        let catalog = parse(&format!("{HEADER}\nAB-01,SN-99,ThinkPad,Laptop")).unwrap();
        let by_tag = catalog.by_asset_tag("AB-01").unwrap();
        let by_serial = catalog.by_serial_number("SN-99").unwrap();
        assert!(Arc::ptr_eq(by_tag, by_serial));
    }

    #[test]
    fn test_asset_tag_only_mode_skips_serial_index() {
        let options = CatalogOptions {
            mode: LookupMode::AssetTagOnly,
            ..Default::default()
        };
        let catalog =
            parse_catalog(&format!("{HEADER}\nAB-01,SN-99,ThinkPad,Laptop"), &options).unwrap();
        assert_eq!(catalog.mode(), LookupMode::AssetTagOnly);
        assert!(catalog.by_asset_tag("AB-01").is_some());
        assert!(catalog.by_serial_number("SN-99").is_none());
    }

    #[test]
    fn test_parse_is_idempotent() {
        let text = format!("{HEADER}\nAB-01,SN-1,ThinkPad,Laptop\nMN-7,CN0X,P2422H,Monitor");
        assert_eq!(parse(&text).unwrap(), parse(&text).unwrap());
    }

    #[test]
    fn test_quoted_comma_with_quoting() {
        let text = format!("{HEADER}\nAB-01,SN-1,\"Latitude 5440, 14in\",Laptop");
        let catalog = parse(&text).unwrap();
        assert_eq!(
            catalog.by_asset_tag("AB-01").unwrap().model_name,
            "Latitude 5440, 14in"
        );
    }

    #[test]
    fn test_quoted_comma_with_literal_split() {
        let options = CatalogOptions {
            quoting: false,
            ..Default::default()
        };
        let text = format!("{HEADER}\nAB-01,SN-1,\"Latitude 5440, 14in\",Laptop");
        assert!(matches!(
            parse_catalog(&text, &options),
            Err(CatalogError::RowCorrupted { row: 2, found: 5, .. })
        ));
    }

    #[test]
    fn test_normalise_key() {
        assert_eq!(normalise_key("  ab-01\t"), "AB-01");
        assert_eq!(normalise_key(""), "");
    }
}
