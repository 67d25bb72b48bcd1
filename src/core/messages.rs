// AssetLookup - core/messages.rs
//
// User-facing status text for load and lookup outcomes.
// Shared by the desktop window and headless mode so both say the same thing.

use crate::core::model::{LookupMode, TemplateKind};
use crate::core::resolver::Resolution;
use crate::util::constants::{EMPTY_QUERY_TEXT, EMPTY_TABLE_TEXT, REQUIRED_HEADERS};
use crate::util::error::{AssetLookupError, CatalogError};

/// Status line after a successful load.
pub fn load_succeeded(records: usize) -> String {
    if records == 0 {
        "\u{26a0} CSV loaded but contains no records.".to_string()
    } else {
        format!("\u{2705} Data loaded successfully! ({records} records)")
    }
}

/// Status line after a failed load.
pub fn load_failed(error: &AssetLookupError) -> String {
    match error {
        AssetLookupError::Fetch(e) => format!("\u{274c} Data loading failed: {e}"),
        AssetLookupError::Catalog(e) => catalog_failed(e),
        AssetLookupError::Config(e) => format!("\u{274c} Configuration error: {e}"),
    }
}

fn catalog_failed(error: &CatalogError) -> String {
    match error {
        CatalogError::EmptyOrHeaderOnly => {
            "\u{274c} Failed to parse CSV. Check columns, format, or ensure it's not empty."
                .to_string()
        }
        CatalogError::MissingHeaders { missing } => format!(
            "\u{274c} Failed to parse CSV: Missing required headers ({}). Expected: {}.",
            missing.join(", "),
            REQUIRED_HEADERS.join(", ")
        ),
        CatalogError::RowCorrupted { row, .. } => format!(
            "\u{274c} Failed to parse data. Row {row} is corrupted (inconsistent columns)."
        ),
        CatalogError::Csv { source } => format!("\u{274c} Failed to parse CSV: {source}"),
    }
}

/// Text for the output panes when a lookup does not produce templates.
///
/// Returns `None` for `Found`; the panes then hold the rendered templates.
pub fn pane_text(resolution: &Resolution, mode: LookupMode) -> Option<String> {
    match resolution {
        Resolution::Found { .. } => None,
        Resolution::EmptyTable => Some(EMPTY_TABLE_TEXT.to_string()),
        Resolution::EmptyQuery => Some(EMPTY_QUERY_TEXT.to_string()),
        Resolution::NotFound { query } => Some(not_found(query, mode)),
    }
}

/// Status line for a lookup. `None` leaves the current status untouched.
pub fn lookup_status(resolution: &Resolution) -> Option<String> {
    match resolution {
        Resolution::Found { record, matched_by } => Some(format!(
            "\u{2705} Found match by {matched_by}: {}",
            record.asset_tag
        )),
        Resolution::NotFound { .. } => Some(String::new()),
        Resolution::EmptyTable | Resolution::EmptyQuery => None,
    }
}

pub fn not_found(query: &str, mode: LookupMode) -> String {
    if mode.serial_fallback() {
        format!("Error: \"{query}\" not found as Asset Tag OR Serial Number.")
    } else {
        format!("Error: \"{query}\" not found as Asset Tag.")
    }
}

pub fn copied(kind: TemplateKind) -> String {
    format!(
        "\u{2705} Successfully copied text from the {} template!",
        kind.label()
    )
}

/// Whether a status line reports success (and may be cleared by Clear).
pub fn is_success(status: &str) -> bool {
    status.starts_with('\u{2705}')
}
