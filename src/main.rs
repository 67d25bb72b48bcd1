// AssetLookup - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. config.toml loading
// 3. Logging initialisation (debug mode support)
// 4. Headless lookups (--query) or eframe GUI launch
//
// No windows_subsystem attribute: headless mode writes to the console.

mod gui;

// Re-export modules from the library crate so that `gui.rs` can use
// `crate::app::...`, `crate::ui::...` etc.
pub use assetlookup::app;
pub use assetlookup::core;
pub use assetlookup::platform;
pub use assetlookup::ui;
pub use assetlookup::util;

use crate::app::headless;
use crate::app::loader::LoadOptions;
use crate::app::source::{CsvSource, FetchOptions};
use crate::core::catalog::CatalogOptions;
use crate::core::model::LookupMode;
use clap::Parser;
use std::time::Duration;

/// AssetLookup - Asset Tag / Serial Number lookup.
///
/// Loads an inventory CSV and renders the Issued and Returned ticket text
/// for a matching asset.
#[derive(Parser, Debug)]
#[command(name = "AssetLookup", version, about)]
struct Cli {
    /// CSV file path or http(s) URL (default: config.toml, then yourdata.csv).
    source: Option<String>,

    /// Look up this Asset Tag or Serial Number and print the templates
    /// instead of opening the window. May be repeated.
    #[arg(short = 'q', long = "query")]
    query: Vec<String>,

    /// Print one JSON object per query (headless mode only).
    #[arg(long = "json", requires = "query")]
    json: bool,

    /// Match Asset Tags only; never fall back to Serial Number.
    #[arg(long = "asset-tag-only")]
    asset_tag_only: bool,

    /// Split every comma, ignoring double quotes.
    #[arg(long = "literal-split")]
    literal_split: bool,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    // Config first: it may set the log level.
    let platform_paths = platform::config::PlatformPaths::resolve();
    let (config, config_warnings) = platform::config::load_config(&platform_paths);

    util::logging::init(cli.debug, config.log_level.as_deref());

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "AssetLookup starting"
    );

    for warning in &config_warnings {
        tracing::warn!(error = %warning, "Config warning");
    }

    // CLI argument > config.toml > built-in default.
    let source = cli
        .source
        .as_deref()
        .or(config.csv_source.as_deref())
        .map(CsvSource::parse)
        .unwrap_or_default();

    let load_options = LoadOptions {
        catalog: CatalogOptions {
            mode: if cli.asset_tag_only {
                LookupMode::AssetTagOnly
            } else {
                LookupMode::from_serial_fallback(config.serial_fallback)
            },
            quoting: config.quoting && !cli.literal_split,
        },
        fetch: FetchOptions {
            timeout: Duration::from_secs(config.fetch_timeout_secs),
            ..Default::default()
        },
    };

    tracing::debug!(source = %source, options = ?load_options, "Load options resolved");

    if !cli.query.is_empty() {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        match headless::run(&source, &load_options, &cli.query, cli.json, &mut out) {
            Ok(exit) => std::process::exit(exit.code()),
            Err(e) => {
                tracing::error!(error = %e, "Failed to write results");
                std::process::exit(headless::HeadlessExit::LoadFailed.code());
            }
        }
    }

    let state = app::state::AppState::new(source, load_options);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!(
                "{} v{}",
                util::constants::APP_NAME,
                util::constants::APP_VERSION
            ))
            .with_inner_size(ui::theme::WINDOW_SIZE)
            .with_min_inner_size(ui::theme::WINDOW_MIN_SIZE),
        ..Default::default()
    };

    let result = eframe::run_native(
        util::constants::APP_NAME,
        native_options,
        Box::new(move |_cc| Ok(Box::new(gui::AssetLookupApp::new(state)))),
    );

    if let Err(e) = result {
        tracing::error!(error = %e, "Failed to launch GUI");
        eprintln!("Error: Failed to launch AssetLookup GUI: {e}");
        std::process::exit(1);
    }
}
