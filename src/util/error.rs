// AssetLookup - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// All errors preserve the causal chain for diagnostic logging.
//
// Lookup misses (no records, blank query, unknown key) are not errors;
// they are `Resolution` variants in core::resolver.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all AssetLookup operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum AssetLookupError {
    /// The CSV source could not be read or downloaded.
    Fetch(FetchError),

    /// The CSV text was read but could not be turned into a catalog.
    Catalog(CatalogError),

    /// Configuration loading or validation failed.
    Config(ConfigError),
}

impl fmt::Display for AssetLookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetch(e) => write!(f, "Fetch error: {e}"),
            Self::Catalog(e) => write!(f, "CSV error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
        }
    }
}

impl std::error::Error for AssetLookupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Fetch(e) => Some(e),
            Self::Catalog(e) => Some(e),
            Self::Config(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Fetch errors
// ---------------------------------------------------------------------------

/// Errors obtaining the raw CSV text.
#[derive(Debug)]
pub enum FetchError {
    /// Local file could not be read.
    Io { path: PathBuf, source: io::Error },

    /// The HTTP request itself failed (DNS, connect, TLS, timeout, body).
    Request { url: String, source: reqwest::Error },

    /// The response body could not be read to the end.
    Body { url: String, source: io::Error },

    /// The server answered with a non-success status.
    HttpStatus { url: String, status: u16 },

    /// The source exceeds `MAX_SOURCE_BYTES`. For bodies of unknown length
    /// `size` is the byte count read when the limit tripped.
    TooLarge { size: u64, max: u64 },
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Cannot read '{}': {source}", path.display())
            }
            Self::Request { url, source } => write!(f, "Request to '{url}' failed: {source}"),
            Self::Body { url, source } => {
                write!(f, "Reading response from '{url}' failed: {source}")
            }
            Self::HttpStatus { url, status } => write!(
                f,
                "HTTP error! Status: {status} from '{url}'. \
                 Ensure the file is being served by a reachable web server."
            ),
            Self::TooLarge { size, max } => write!(
                f,
                "CSV source is {size} bytes, exceeds maximum of {max} bytes"
            ),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Request { source, .. } => Some(source),
            Self::Body { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<FetchError> for AssetLookupError {
    fn from(e: FetchError) -> Self {
        Self::Fetch(e)
    }
}

// ---------------------------------------------------------------------------
// Catalog errors
// ---------------------------------------------------------------------------

/// Errors turning CSV text into a lookup catalog.
///
/// Every variant means the whole parse was discarded; no partial catalog is
/// ever produced.
#[derive(Debug)]
pub enum CatalogError {
    /// Fewer than two lines after trimming (no data under the header).
    EmptyOrHeaderOnly,

    /// One or more required column headers are absent.
    MissingHeaders { missing: Vec<&'static str> },

    /// A data row has a different field count from the header row.
    /// `row` is the 1-based line number, the header being line 1.
    RowCorrupted {
        row: u64,
        expected: usize,
        found: usize,
    },

    /// The CSV reader itself failed.
    Csv { source: csv::Error },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyOrHeaderOnly => {
                write!(f, "CSV is empty or contains only a header row")
            }
            Self::MissingHeaders { missing } => {
                write!(f, "Missing required headers: {}", missing.join(", "))
            }
            Self::RowCorrupted {
                row,
                expected,
                found,
            } => write!(
                f,
                "Row {row} has {found} columns, expected {expected} (inconsistent columns)"
            ),
            Self::Csv { source } => write!(f, "CSV read error: {source}"),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Csv { source } => Some(source),
            _ => None,
        }
    }
}

impl From<CatalogError> for AssetLookupError {
    fn from(e: CatalogError) -> Self {
        Self::Catalog(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for AssetLookupError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for AssetLookup results.
pub type Result<T> = std::result::Result<T, AssetLookupError>;
