// AssetLookup - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.
// Header names and user-facing message text live here too so the core,
// app, and ui layers never disagree on wording.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "AssetLookup";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "AssetLookup";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// CSV source
// =============================================================================

/// CSV source used when neither the CLI nor config.toml names one.
pub const DEFAULT_CSV_SOURCE: &str = "yourdata.csv";

/// Hard upper bound on the size of a CSV source in bytes.
///
/// An inventory export is a few MB at most; anything larger is almost
/// certainly the wrong file and would only stall the loader.
pub const MAX_SOURCE_BYTES: u64 = 64 * 1024 * 1024; // 64 MiB

/// Default HTTP request timeout for URL sources (seconds).
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Minimum user-configurable HTTP timeout (seconds).
pub const MIN_FETCH_TIMEOUT_SECS: u64 = 1;

/// Maximum user-configurable HTTP timeout (seconds).
pub const MAX_FETCH_TIMEOUT_SECS: u64 = 300;

// =============================================================================
// CSV columns
// =============================================================================

pub const HEADER_ASSET_TAG: &str = "Asset Tag";
pub const HEADER_SERIAL_NUMBER: &str = "Serial Number";
pub const HEADER_MODEL_NAME: &str = "Model Name";
pub const HEADER_ASSET_TYPE: &str = "Asset Type";

/// Headers that must all be present in the first CSV row, in display order.
pub const REQUIRED_HEADERS: [&str; 4] = [
    HEADER_ASSET_TAG,
    HEADER_SERIAL_NUMBER,
    HEADER_MODEL_NAME,
    HEADER_ASSET_TYPE,
];

// =============================================================================
// Templates
// =============================================================================

/// Asset type (compared lowercase) that adds the "JC Removed" line to the
/// Returned template.
pub const LAPTOP_ASSET_TYPE: &str = "laptop";

// =============================================================================
// Messages
// =============================================================================

/// Placeholder shown in both output panes when no lookup result is displayed.
pub const PROMPT_TEXT: &str = "Enter Asset Tag or Serial Number and click Lookup.";

/// Output pane text after the CSV source could not be fetched.
pub const FATAL_LOAD_TEXT: &str = "Fatal Error: Could not load data file.";

/// Output pane text when a lookup is attempted with no records loaded.
pub const EMPTY_TABLE_TEXT: &str =
    "Error: Data has not loaded or is empty. Check data loading status.";

/// Output pane text when the query is blank.
pub const EMPTY_QUERY_TEXT: &str = "Please enter an Asset Tag or Serial Number.";

/// How long a "copied" confirmation stays in the status bar (ms).
pub const COPY_MESSAGE_DURATION_MS: u64 = 3_000;

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Maximum length of a CSV line included in debug output.
pub const DEBUG_MAX_LINE_PREVIEW: usize = 200;

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
