// AssetLookup - app/loader.rs
//
// Catalog load lifecycle. Fetch + parse run on a background thread and
// report to the UI thread via an mpsc channel.
//
// Architecture:
//   - `LoadManager` lives on the UI thread; `run_load` runs on a background thread.
//   - An `Arc<AtomicBool>` cancel flag lets a newer load (or shutdown)
//     supersede a running one. A cancelled load never delivers a catalog.
//   - The UI thread is the only owner of the live `Catalog`; the loader
//     hands over a finished value and keeps nothing.
//   - One attempt per load, no retries.

use crate::app::source::{CsvSource, FetchOptions};
use crate::core::catalog::{self, Catalog, CatalogOptions};
use crate::core::model::LoadProgress;
use crate::util::error::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::time::Instant;

/// Everything a load needs besides the source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    pub catalog: CatalogOptions,
    pub fetch: FetchOptions,
}

/// Fetch and parse synchronously. Used by headless mode and the loader thread.
pub fn load_catalog(source: &CsvSource, options: &LoadOptions) -> Result<Catalog> {
    let text = source.fetch(&options.fetch)?;
    let catalog = catalog::parse_catalog(&text, &options.catalog)?;
    Ok(catalog)
}

// =============================================================================
// LoadManager
// =============================================================================

/// Manages a load operation on a background thread.
pub struct LoadManager {
    /// Channel receiver for the UI to poll progress messages.
    pub progress_rx: Option<mpsc::Receiver<LoadProgress>>,

    /// Cancel flag shared with the background thread.
    cancel_flag: Option<Arc<AtomicBool>>,
}

impl LoadManager {
    pub fn new() -> Self {
        Self {
            progress_rx: None,
            cancel_flag: None,
        }
    }

    /// Start loading `source`. Any load already running is cancelled first.
    pub fn start_load(&mut self, source: CsvSource, options: LoadOptions) {
        self.cancel_load();

        let (tx, rx) = mpsc::channel();
        let cancel = Arc::new(AtomicBool::new(false));

        self.progress_rx = Some(rx);
        self.cancel_flag = Some(Arc::clone(&cancel));

        tracing::info!(source = %source, "Load started");

        std::thread::spawn(move || {
            run_load(source, options, tx, cancel);
        });
    }

    /// Request cancellation of the running load.
    pub fn cancel_load(&mut self) {
        if let Some(flag) = &self.cancel_flag {
            flag.store(true, Ordering::SeqCst);
        }
        self.cancel_flag = None;
    }

    /// Poll for progress messages without blocking. Returns all pending messages.
    pub fn poll_progress(&self) -> Vec<LoadProgress> {
        let mut messages = Vec::new();
        if let Some(ref rx) = self.progress_rx {
            while let Ok(msg) = rx.try_recv() {
                messages.push(msg);
            }
        }
        messages
    }
}

impl Default for LoadManager {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Background load pipeline
// =============================================================================

/// Fetch -> parse -> deliver. Checks `cancel` after each blocking step.
fn run_load(
    source: CsvSource,
    options: LoadOptions,
    tx: mpsc::Sender<LoadProgress>,
    cancel: Arc<AtomicBool>,
) {
    macro_rules! send {
        ($msg:expr) => {
            if tx.send($msg).is_err() {
                return; // Receiver dropped (UI closed); exit quietly.
            }
        };
    }

    macro_rules! check_cancel {
        () => {
            if cancel.load(Ordering::SeqCst) {
                tracing::info!(source = %source, "Load cancelled");
                send!(LoadProgress::Cancelled);
                return;
            }
        };
    }

    let started = Instant::now();
    send!(LoadProgress::Started {
        source: source.to_string(),
    });

    let text = match source.fetch(&options.fetch) {
        Ok(text) => text,
        Err(e) => {
            check_cancel!();
            tracing::error!(source = %source, error = %e, "Fetch failed");
            send!(LoadProgress::Failed { error: e.into() });
            return;
        }
    };

    check_cancel!();
    send!(LoadProgress::Fetched { bytes: text.len() });

    let result = catalog::parse_catalog(&text, &options.catalog);

    check_cancel!();
    match result {
        Ok(catalog) => {
            let duration = started.elapsed();
            tracing::info!(
                source = %source,
                records = catalog.len(),
                rows = catalog.rows_read(),
                duration_ms = duration.as_millis() as u64,
                "Load complete"
            );
            send!(LoadProgress::Completed {
                catalog,
                loaded_at: chrono::Utc::now(),
                duration,
            });
        }
        Err(e) => {
            tracing::warn!(source = %source, error = %e, "CSV rejected");
            send!(LoadProgress::Failed { error: e.into() });
        }
    }
}
