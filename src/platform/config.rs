// AssetLookup - platform/config.rs
//
// Platform-specific configuration directory resolution and config.toml
// loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for AssetLookup configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/assetlookup/ or %APPDATA%\AssetLookup\config\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");

            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }

    /// Location of config.toml: one level above the config directory so the
    /// user-visible path is %APPDATA%\AssetLookup\config.toml.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir
            .parent()
            .unwrap_or(&self.config_dir)
            .join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility -- a newer
/// config file can be used with an older binary without crashing.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[source]` section.
    pub source: SourceSection,
    /// `[lookup]` section.
    pub lookup: LookupSection,
    /// `[csv]` section.
    pub csv: CsvSection,
    /// `[network]` section.
    pub network: NetworkSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[source]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct SourceSection {
    /// CSV file path or http(s) URL.
    pub csv: Option<String>,
}

/// `[lookup]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LookupSection {
    /// Fall back to Serial Number when no Asset Tag matches.
    pub serial_fallback: Option<bool>,
}

/// `[csv]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct CsvSection {
    /// Honour double-quoted fields.
    pub quoting: Option<bool>,
}

/// `[network]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct NetworkSection {
    /// HTTP timeout for URL sources.
    pub timeout_seconds: Option<u64>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// Invalid values produce warnings and fall back to defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// CSV source; `None` means the built-in default.
    pub csv_source: Option<String>,
    /// Serial Number fallback on Asset Tag miss.
    pub serial_fallback: bool,
    /// Quoted-field support.
    pub quoting: bool,
    /// HTTP timeout in seconds.
    pub fetch_timeout_secs: u64,
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            csv_source: None,
            serial_fallback: true,
            quoting: true,
            fetch_timeout_secs: constants::DEFAULT_FETCH_TIMEOUT_SECS,
            log_level: None,
        }
    }
}

/// Load and validate `config.toml` from the resolved platform location.
pub fn load_config(paths: &PlatformPaths) -> (AppConfig, Vec<ConfigError>) {
    load_config_file(&paths.config_file())
}

/// Load and validate a specific config file.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// If the file does not exist, returns defaults with no warnings (first-run).
/// If the file is unreadable or unparseable, returns defaults with the error
/// as a warning so the application still starts.
pub fn load_config_file(config_path: &Path) -> (AppConfig, Vec<ConfigError>) {
    let mut warnings: Vec<ConfigError> = Vec::new();

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), warnings);
    }

    let content = match std::fs::read_to_string(config_path) {
        Ok(c) => c,
        Err(e) => {
            warnings.push(ConfigError::Io {
                path: config_path.to_path_buf(),
                source: e,
            });
            return (AppConfig::default(), warnings);
        }
    };

    let raw: RawConfig = match toml::from_str(&content) {
        Ok(r) => r,
        Err(e) => {
            warnings.push(ConfigError::TomlParse {
                path: config_path.to_path_buf(),
                source: e,
            });
            return (AppConfig::default(), warnings);
        }
    };

    tracing::info!(path = %config_path.display(), "Loaded config.toml");

    let mut config = AppConfig::default();

    // -- Source: csv --
    if let Some(ref source) = raw.source.csv {
        if source.trim().is_empty() {
            warnings.push(ConfigError::ValueOutOfRange {
                field: "[source] csv".to_string(),
                value: source.clone(),
                expected: format!(
                    "a file path or http(s) URL. Using default ({})",
                    constants::DEFAULT_CSV_SOURCE
                ),
            });
        } else {
            config.csv_source = Some(source.trim().to_string());
        }
    }

    // -- Lookup / CSV switches --
    if let Some(fallback) = raw.lookup.serial_fallback {
        config.serial_fallback = fallback;
    }
    if let Some(quoting) = raw.csv.quoting {
        config.quoting = quoting;
    }

    // -- Network: timeout_seconds --
    if let Some(secs) = raw.network.timeout_seconds {
        if (constants::MIN_FETCH_TIMEOUT_SECS..=constants::MAX_FETCH_TIMEOUT_SECS).contains(&secs)
        {
            config.fetch_timeout_secs = secs;
        } else {
            warnings.push(ConfigError::ValueOutOfRange {
                field: "[network] timeout_seconds".to_string(),
                value: secs.to_string(),
                expected: format!(
                    "{}-{}. Using default ({})",
                    constants::MIN_FETCH_TIMEOUT_SECS,
                    constants::MAX_FETCH_TIMEOUT_SECS,
                    constants::DEFAULT_FETCH_TIMEOUT_SECS,
                ),
            });
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            warnings.push(ConfigError::ValueOutOfRange {
                field: "[logging] level".to_string(),
                value: level.clone(),
                expected: "error, warn, info, debug, trace. Using default (info)".to_string(),
            });
        }
    }

    (config, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_config(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(constants::CONFIG_FILE_NAME);
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let (config, warnings) = load_config_file(&dir.path().join("absent.toml"));
        assert_eq!(config, AppConfig::default());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_full_config_applied() {
        let (_dir, path) = write_config(
            r#"
            [source]
            csv = " https://intranet.example/assets.csv "

            [lookup]
            serial_fallback = false

            [csv]
            quoting = false

            [network]
            timeout_seconds = 5

            [logging]
            level = "DEBUG"
            "#,
        );
        let (config, warnings) = load_config_file(&path);
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
        assert_eq!(
            config.csv_source.as_deref(),
            Some("https://intranet.example/assets.csv")
        );
        assert!(!config.serial_fallback);
        assert!(!config.quoting);
        assert_eq!(config.fetch_timeout_secs, 5);
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_out_of_range_values_fall_back() {
        let (_dir, path) = write_config(
            r#"
            [source]
            csv = "   "

            [network]
            timeout_seconds = 0

            [logging]
            level = "loud"
            "#,
        );
        let (config, warnings) = load_config_file(&path);
        assert_eq!(warnings.len(), 3);
        assert!(warnings
            .iter()
            .all(|w| matches!(w, ConfigError::ValueOutOfRange { .. })));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_unparseable_file_warns() {
        let (_dir, path) = write_config("[lookup\nserial_fallback = ");
        let (config, warnings) = load_config_file(&path);
        assert_eq!(config, AppConfig::default());
        assert!(matches!(warnings.as_slice(), [ConfigError::TomlParse { .. }]));
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let (_dir, path) = write_config("[ui]\ntheme = \"dark\"\n[lookup]\nserial_fallback = true\n");
        let (config, warnings) = load_config_file(&path);
        assert!(warnings.is_empty());
        assert!(config.serial_fallback);
    }
}
