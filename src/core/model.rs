// AssetLookup - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies.
//
// These types are the shared vocabulary across all layers.

use serde::{Deserialize, Serialize};

// =============================================================================
// Asset record
// =============================================================================

/// One inventory row: the four columns the templates need.
///
/// Values are trimmed but keep the case they had in the CSV; only the
/// lookup keys are normalised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetRecord {
    pub asset_tag: String,
    pub serial_number: String,
    pub model_name: String,
    pub asset_type: String,
}

// =============================================================================
// Lookup mode
// =============================================================================

/// Which keys a catalog is indexed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LookupMode {
    /// Asset Tag only; a miss is final.
    AssetTagOnly,

    /// Asset Tag first, then Serial Number on a miss.
    #[default]
    AssetTagThenSerial,
}

impl LookupMode {
    /// Build the mode from the `serial_fallback` switch.
    pub fn from_serial_fallback(enabled: bool) -> Self {
        if enabled {
            Self::AssetTagThenSerial
        } else {
            Self::AssetTagOnly
        }
    }

    pub fn serial_fallback(&self) -> bool {
        matches!(self, Self::AssetTagThenSerial)
    }
}

// =============================================================================
// Matched-by
// =============================================================================

/// The key a successful lookup matched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchedBy {
    AssetTag,
    SerialNumber,
}

impl MatchedBy {
    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            MatchedBy::AssetTag => crate::util::constants::HEADER_ASSET_TAG,
            MatchedBy::SerialNumber => crate::util::constants::HEADER_SERIAL_NUMBER,
        }
    }
}

impl std::fmt::Display for MatchedBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Template kind
// =============================================================================

/// The two ticket templates rendered for every match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    Issued,
    Returned,
}

impl TemplateKind {
    pub fn label(&self) -> &'static str {
        match self {
            TemplateKind::Issued => "Issued",
            TemplateKind::Returned => "Returned",
        }
    }
}

// =============================================================================
// Load progress (for UI updates)
// =============================================================================

/// Progress messages sent from the load thread to the UI thread.
#[derive(Debug)]
pub enum LoadProgress {
    /// Fetch started for the named source.
    Started { source: String },

    /// Raw CSV text is in hand; parsing begins.
    Fetched { bytes: usize },

    /// Catalog built successfully.
    Completed {
        catalog: crate::core::catalog::Catalog,
        loaded_at: chrono::DateTime<chrono::Utc>,
        duration: std::time::Duration,
    },

    /// Fetch or parse failed. The catalog must be reset to empty.
    Failed {
        error: crate::util::error::AssetLookupError,
    },

    /// Load was superseded or cancelled before completion.
    Cancelled,
}
