// AssetLookup - core/resolver.rs
//
// Free-text query -> catalog record.
// Core layer: pure lookup, no I/O.

use crate::core::catalog::{normalise_key, Catalog};
use crate::core::model::{AssetRecord, MatchedBy};
use std::sync::Arc;

/// Outcome of resolving one query against a catalog.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// A record matched on the given key.
    Found {
        record: Arc<AssetRecord>,
        matched_by: MatchedBy,
    },

    /// Neither index holds the normalised query. `query` is the trimmed
    /// input as typed.
    NotFound { query: String },

    /// The catalog has no records (not loaded, failed, or empty CSV).
    EmptyTable,

    /// The query is blank after trimming.
    EmptyQuery,
}

impl Resolution {
    pub fn record(&self) -> Option<&AssetRecord> {
        match self {
            Resolution::Found { record, .. } => Some(record.as_ref()),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Found { .. })
    }
}

/// Resolve a query: Asset Tag first, then Serial Number when the catalog was
/// built with serial fallback.
///
/// The empty-catalog check comes before query validation, so a blank query
/// against an unloaded catalog reports `EmptyTable`.
pub fn resolve(query: &str, catalog: &Catalog) -> Resolution {
    if catalog.is_empty() {
        return Resolution::EmptyTable;
    }

    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Resolution::EmptyQuery;
    }

    let key = normalise_key(trimmed);

    if let Some(record) = catalog.by_asset_tag(&key) {
        tracing::debug!(key = %key, "Matched by asset tag");
        return Resolution::Found {
            record: Arc::clone(record),
            matched_by: MatchedBy::AssetTag,
        };
    }

    if catalog.mode().serial_fallback() {
        if let Some(record) = catalog.by_serial_number(&key) {
            tracing::debug!(key = %key, "Matched by serial number");
            return Resolution::Found {
                record: Arc::clone(record),
                matched_by: MatchedBy::SerialNumber,
            };
        }
    }

    tracing::debug!(key = %key, "No match");
    Resolution::NotFound {
        query: trimmed.to_string(),
    }
}
