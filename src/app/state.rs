// AssetLookup - app/state.rs
//
// Application state management. Holds the live catalog, the query, the two
// output panes, and the status line.
// Owned by the eframe::App implementation; panels only read and set fields
// and call the methods below, so every behaviour here is testable without
// a window.

use crate::app::loader::LoadOptions;
use crate::app::source::CsvSource;
use crate::core::catalog::Catalog;
use crate::core::messages;
use crate::core::model::{LoadProgress, TemplateKind};
use crate::core::resolver::{self, Resolution};
use crate::core::template::{self, RenderedTemplates};
use crate::util::constants::{COPY_MESSAGE_DURATION_MS, FATAL_LOAD_TEXT, PROMPT_TEXT};
use crate::util::error::AssetLookupError;
use chrono::{DateTime, Utc};
use std::time::{Duration, Instant};

/// Top-level application state.
#[derive(Debug)]
pub struct AppState {
    /// Where the catalog is loaded from.
    pub source: CsvSource,

    /// Parse and fetch settings for every load.
    pub load_options: LoadOptions,

    /// The live catalog. Replaced wholesale by each load.
    pub catalog: Catalog,

    /// When the current catalog finished loading (None until a load succeeds).
    pub loaded_at: Option<DateTime<Utc>>,

    /// Whether a load is currently in progress.
    pub load_in_progress: bool,

    /// Query text field contents.
    pub query: String,

    /// Issued pane text.
    pub issued_output: String,

    /// Returned pane text.
    pub returned_output: String,

    /// Templates of the last successful lookup; `Some` enables the copy buttons.
    pub templates: Option<RenderedTemplates>,

    /// Status line text.
    pub status_message: String,

    /// When set, `status_message` is cleared once this instant passes.
    pub status_expires_at: Option<Instant>,

    /// A panel requested a (re)load of this source.
    pub pending_load: Option<CsvSource>,

    /// Whether to show the About dialog.
    pub show_about: bool,

}

impl AppState {
    /// Create initial state. The first load is queued immediately.
    pub fn new(source: CsvSource, load_options: LoadOptions) -> Self {
        Self {
            pending_load: Some(source.clone()),
            source,
            catalog: Catalog::empty(load_options.catalog.mode),
            load_options,
            loaded_at: None,
            load_in_progress: false,
            query: String::new(),
            issued_output: PROMPT_TEXT.to_string(),
            returned_output: PROMPT_TEXT.to_string(),
            templates: None,
            status_message: String::new(),
            status_expires_at: None,
            show_about: false,
        }
    }

    /// Whether the copy buttons should be enabled.
    pub fn can_copy(&self) -> bool {
        self.templates.is_some()
    }

    /// Lookups (button or Enter) wait until any running load finishes.
    pub fn can_lookup(&self) -> bool {
        !self.load_in_progress
    }

    // -------------------------------------------------------------------------
    // Loading
    // -------------------------------------------------------------------------

    /// Apply one message from the loader thread.
    pub fn apply_progress(&mut self, msg: LoadProgress) {
        match msg {
            LoadProgress::Started { source } => {
                self.load_in_progress = true;
                self.set_status(format!("Loading {source}..."));
            }
            LoadProgress::Fetched { bytes } => {
                self.set_status(format!("Parsing {bytes} bytes..."));
            }
            LoadProgress::Completed {
                catalog, loaded_at, ..
            } => self.load_completed(catalog, loaded_at),
            LoadProgress::Failed { error } => self.load_failed(&error),
            LoadProgress::Cancelled => {
                self.load_in_progress = false;
            }
        }
    }

    /// Install a freshly loaded catalog and reset the panes.
    pub fn load_completed(&mut self, catalog: Catalog, loaded_at: DateTime<Utc>) {
        self.load_in_progress = false;
        self.set_status(messages::load_succeeded(catalog.len()));
        self.catalog = catalog;
        self.loaded_at = Some(loaded_at);
        self.set_panes(PROMPT_TEXT.to_string(), PROMPT_TEXT.to_string(), None);
    }

    /// Drop the catalog after a failed load. The app stays usable: the
    /// user can Reload or open another file.
    pub fn load_failed(&mut self, error: &AssetLookupError) {
        self.load_in_progress = false;
        self.catalog = Catalog::empty(self.load_options.catalog.mode);
        self.loaded_at = None;
        self.set_status(messages::load_failed(error));

        let pane = match error {
            AssetLookupError::Fetch(_) => FATAL_LOAD_TEXT,
            _ => PROMPT_TEXT,
        };
        self.set_panes(pane.to_string(), pane.to_string(), None);
    }

    // -------------------------------------------------------------------------
    // Lookup
    // -------------------------------------------------------------------------

    /// Resolve the current query and update panes and status.
    pub fn perform_lookup(&mut self) -> Resolution {
        let resolution = resolver::resolve(&self.query, &self.catalog);

        match messages::pane_text(&resolution, self.catalog.mode()) {
            Some(text) => self.set_panes(text.clone(), text, None),
            None => {
                if let Some(record) = resolution.record() {
                    let rendered = template::render(record);
                    self.set_panes(
                        rendered.issued.clone(),
                        rendered.returned.clone(),
                        Some(rendered),
                    );
                }
            }
        }

        if let Some(status) = messages::lookup_status(&resolution) {
            self.set_status(status);
        }

        resolution
    }

    /// Reset the query and panes; drop a success message but keep errors.
    pub fn clear_fields(&mut self) {
        self.query.clear();
        self.set_panes(PROMPT_TEXT.to_string(), PROMPT_TEXT.to_string(), None);
        if messages::is_success(&self.status_message) {
            self.status_message.clear();
            self.status_expires_at = None;
        }
    }

    // -------------------------------------------------------------------------
    // Clipboard
    // -------------------------------------------------------------------------

    /// Text to place on the clipboard for `kind`, if a template is showing.
    /// Sets a short-lived confirmation message.
    pub fn copy_text(&mut self, kind: TemplateKind, now: Instant) -> Option<String> {
        let text = self.templates.as_ref()?.get(kind).to_string();
        self.status_message = messages::copied(kind);
        self.status_expires_at = Some(now + Duration::from_millis(COPY_MESSAGE_DURATION_MS));
        Some(text)
    }

    /// Clear an expired status message. Returns true if it was cleared.
    pub fn expire_status(&mut self, now: Instant) -> bool {
        match self.status_expires_at {
            Some(at) if now >= at => {
                self.status_message.clear();
                self.status_expires_at = None;
                true
            }
            _ => false,
        }
    }

    fn set_status(&mut self, message: String) {
        self.status_message = message;
        self.status_expires_at = None;
    }

    fn set_panes(&mut self, issued: String, returned: String, templates: Option<RenderedTemplates>) {
        self.issued_output = issued;
        self.returned_output = returned;
        self.templates = templates;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::{parse_catalog, CatalogOptions};
    use crate::core::model::LookupMode;
    use crate::util::constants::{EMPTY_QUERY_TEXT, EMPTY_TABLE_TEXT};
    use crate::util::error::{CatalogError, FetchError};

    const CSV: &str = "Asset Tag,Serial Number,Model Name,Asset Type\n\
                       AB-01,SN-99,ThinkPad,Laptop\n\
                       MN-07,CN0X42,P2422H,Monitor";

    fn loaded_state() -> AppState {
        let mut state = AppState::new(CsvSource::default(), LoadOptions::default());
        let catalog = parse_catalog(CSV, &CatalogOptions::default()).unwrap();
        state.load_completed(catalog, Utc::now());
        state
    }

    #[test]
    fn test_new_state_queues_initial_load() {
        let state = AppState::new(CsvSource::default(), LoadOptions::default());
        assert_eq!(state.pending_load, Some(CsvSource::default()));
        assert_eq!(state.issued_output, PROMPT_TEXT);
        assert!(!state.can_copy());
    }

    #[test]
    fn test_load_completed_reports_count() {
        let state = loaded_state();
        assert_eq!(
            state.status_message,
            "\u{2705} Data loaded successfully! (2 records)"
        );
        assert!(state.loaded_at.is_some());
        assert!(!state.load_in_progress);
        assert!(state.can_lookup());
    }

    #[test]
    fn test_lookup_blocked_while_loading() {
        let mut state = loaded_state();
        state.apply_progress(LoadProgress::Started {
            source: CsvSource::default().to_string(),
        });
        assert!(!state.can_lookup());
        state.load_failed(&AssetLookupError::Catalog(CatalogError::EmptyOrHeaderOnly));
        assert!(state.can_lookup());
    }

    #[test]
    fn test_lookup_found_fills_panes() {
        let mut state = loaded_state();
        state.query = "ab-01".to_string();
        assert!(state.perform_lookup().is_found());
        assert!(state.issued_output.starts_with("Facilities: Laptop Issued"));
        assert!(state.returned_output.contains("JC Removed: Y"));
        assert!(state.can_copy());
        assert_eq!(
            state.status_message,
            "\u{2705} Found match by Asset Tag: AB-01"
        );
    }

    #[test]
    fn test_lookup_by_serial_reports_key() {
        let mut state = loaded_state();
        state.query = "cn0x42".to_string();
        state.perform_lookup();
        assert_eq!(
            state.status_message,
            "\u{2705} Found match by Serial Number: MN-07"
        );
        assert!(!state.returned_output.contains("JC Removed"));
    }

    #[test]
    fn test_lookup_not_found_clears_status_and_copy() {
        let mut state = loaded_state();
        state.query = "ab-01".to_string();
        state.perform_lookup();
        state.query = " zz-9 ".to_string();
        state.perform_lookup();
        assert_eq!(
            state.issued_output,
            "Error: \"zz-9\" not found as Asset Tag OR Serial Number."
        );
        assert_eq!(state.issued_output, state.returned_output);
        assert!(state.status_message.is_empty());
        assert!(!state.can_copy());
    }

    #[test]
    fn test_lookup_empty_query() {
        let mut state = loaded_state();
        state.query = "   ".to_string();
        assert_eq!(state.perform_lookup(), Resolution::EmptyQuery);
        assert_eq!(state.issued_output, EMPTY_QUERY_TEXT);
    }

    #[test]
    fn test_lookup_before_load() {
        let mut state = AppState::new(CsvSource::default(), LoadOptions::default());
        state.query = "AB-01".to_string();
        assert_eq!(state.perform_lookup(), Resolution::EmptyTable);
        assert_eq!(state.returned_output, EMPTY_TABLE_TEXT);
    }

    #[test]
    fn test_fetch_failure_empties_catalog() {
        let mut state = loaded_state();
        let error = AssetLookupError::Fetch(FetchError::HttpStatus {
            url: "http://host/yourdata.csv".to_string(),
            status: 404,
        });
        state.apply_progress(LoadProgress::Failed { error });
        assert!(state.catalog.is_empty());
        assert_eq!(state.issued_output, FATAL_LOAD_TEXT);
        assert!(state.status_message.contains("Data loading failed"));
        assert!(state.status_message.contains("404"));
    }

    #[test]
    fn test_parse_failure_keeps_prompt() {
        let mut state = loaded_state();
        let error = AssetLookupError::Catalog(CatalogError::RowCorrupted {
            row: 4,
            expected: 4,
            found: 5,
        });
        state.load_failed(&error);
        assert!(state.catalog.is_empty());
        assert_eq!(state.issued_output, PROMPT_TEXT);
        assert!(state.status_message.contains("Row 4 is corrupted"));
    }

    #[test]
    fn test_failed_load_keeps_lookup_mode() {
        let options = LoadOptions {
            catalog: CatalogOptions {
                mode: LookupMode::AssetTagOnly,
                ..Default::default()
            },
            ..Default::default()
        };
        let mut state = AppState::new(CsvSource::default(), options);
        state.load_failed(&AssetLookupError::Catalog(CatalogError::EmptyOrHeaderOnly));
        assert_eq!(state.catalog.mode(), LookupMode::AssetTagOnly);
    }

    #[test]
    fn test_copy_and_expiry() {
        let mut state = loaded_state();
        let now = Instant::now();
        assert!(state.copy_text(TemplateKind::Issued, now).is_none());

        state.query = "MN-07".to_string();
        state.perform_lookup();
        let copied = state.copy_text(TemplateKind::Returned, now).unwrap();
        assert_eq!(copied, state.returned_output);
        assert!(state.status_message.contains("Returned template"));

        assert!(!state.expire_status(now));
        assert!(state.expire_status(now + Duration::from_millis(COPY_MESSAGE_DURATION_MS)));
        assert!(state.status_message.is_empty());
    }

    #[test]
    fn test_clear_drops_success_message_only() {
        let mut state = loaded_state();
        state.query = "AB-01".to_string();
        state.perform_lookup();
        state.clear_fields();
        assert!(state.query.is_empty());
        assert!(state.status_message.is_empty());
        assert_eq!(state.issued_output, PROMPT_TEXT);
        assert!(!state.can_copy());

        state.load_failed(&AssetLookupError::Catalog(CatalogError::EmptyOrHeaderOnly));
        let error_status = state.status_message.clone();
        state.clear_fields();
        assert_eq!(state.status_message, error_status);
    }
}
