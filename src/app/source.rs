// AssetLookup - app/source.rs
//
// Where the CSV text comes from: a local file or an http(s) URL.

use crate::platform;
use crate::util::constants;
use crate::util::error::FetchError;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// A CSV inventory location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CsvSource {
    File(PathBuf),
    Url(String),
}

impl CsvSource {
    /// Interpret a CLI or config value. Anything starting with `http://` or
    /// `https://` (any case) is a URL; everything else is a path.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Url(trimmed.to_string())
        } else {
            Self::File(PathBuf::from(trimmed))
        }
    }

    /// Read or download the raw CSV text.
    pub fn fetch(&self, options: &FetchOptions) -> Result<String, FetchError> {
        match self {
            Self::File(path) => {
                let size = platform::fs::file_size(path).map_err(|source| FetchError::Io {
                    path: path.clone(),
                    source,
                })?;
                if size > options.max_bytes {
                    return Err(FetchError::TooLarge {
                        size,
                        max: options.max_bytes,
                    });
                }
                platform::fs::read_file_lossy(path).map_err(|source| FetchError::Io {
                    path: path.clone(),
                    source,
                })
            }
            Self::Url(url) => platform::http::fetch_text(url, options.timeout, options.max_bytes),
        }
    }
}

impl Default for CsvSource {
    fn default() -> Self {
        Self::File(PathBuf::from(constants::DEFAULT_CSV_SOURCE))
    }
}

impl fmt::Display for CsvSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

/// Limits applied while fetching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    pub timeout: Duration,
    pub max_bytes: u64,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(constants::DEFAULT_FETCH_TIMEOUT_SECS),
            max_bytes: constants::MAX_SOURCE_BYTES,
        }
    }
}
