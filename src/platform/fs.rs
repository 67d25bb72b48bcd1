// AssetLookup - platform/fs.rs
//
// Filesystem helpers for local CSV sources.

use std::io;
use std::path::Path;

/// Size of a file in bytes, without reading it.
pub fn file_size(path: &Path) -> io::Result<u64> {
    Ok(std::fs::metadata(path)?.len())
}

/// Read the full content of a file as a string.
///
/// For files with invalid UTF-8 (e.g. a Windows-1252 export from Excel),
/// uses lossy conversion rather than failing the whole load.
pub fn read_file_lossy(path: &Path) -> io::Result<String> {
    let bytes = std::fs::read(path)?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(e) => {
            tracing::debug!(path = %path.display(), "CSV is not valid UTF-8; using lossy conversion");
            Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
        }
    }
}
