// AssetLookup - app/headless.rs
//
// Command-line lookups without a window: load once, resolve each query,
// print the status line and both templates (or one JSON object per query).
//
// Results go to the supplied writer (stdout in main.rs); diagnostics go
// through tracing to stderr.

use crate::app::loader::{self, LoadOptions};
use crate::app::source::CsvSource;
use crate::core::catalog::Catalog;
use crate::core::messages;
use crate::core::model::{AssetRecord, LookupMode, MatchedBy};
use crate::core::resolver::{self, Resolution};
use crate::core::template::{self, RenderedTemplates};
use serde::Serialize;
use std::io::{self, Write};

/// Process exit status for a headless run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadlessExit {
    /// Every query matched a record.
    AllFound,
    /// At least one query did not match.
    SomeNotFound,
    /// The catalog could not be loaded.
    LoadFailed,
}

impl HeadlessExit {
    pub fn code(&self) -> i32 {
        match self {
            HeadlessExit::AllFound => 0,
            HeadlessExit::SomeNotFound => 1,
            HeadlessExit::LoadFailed => 2,
        }
    }
}

/// One query's result in `--json` mode.
#[derive(Debug, Serialize)]
struct JsonLookup<'a> {
    query: &'a str,
    status: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    matched_by: Option<MatchedBy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    record: Option<&'a AssetRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    templates: Option<RenderedTemplates>,
}

/// Load failure in `--json` mode.
#[derive(Debug, Serialize)]
struct JsonLoadFailure {
    status: &'static str,
    source: String,
    message: String,
}

/// Load `source`, then resolve and print every query.
pub fn run<W: Write>(
    source: &CsvSource,
    options: &LoadOptions,
    queries: &[String],
    json: bool,
    out: &mut W,
) -> io::Result<HeadlessExit> {
    let catalog = match loader::load_catalog(source, options) {
        Ok(catalog) => catalog,
        Err(e) => {
            tracing::error!(source = %source, error = %e, "Load failed");
            let message = messages::load_failed(&e);
            if json {
                let failure = JsonLoadFailure {
                    status: "load_failed",
                    source: source.to_string(),
                    message,
                };
                writeln!(out, "{}", to_json(&failure)?)?;
            } else {
                writeln!(out, "{message}")?;
            }
            return Ok(HeadlessExit::LoadFailed);
        }
    };

    tracing::info!(source = %source, records = catalog.len(), "Catalog loaded");
    if !json {
        writeln!(out, "{}", messages::load_succeeded(catalog.len()))?;
    }

    run_queries(&catalog, queries, json, out)
}

/// Resolve and print every query against an already loaded catalog.
pub fn run_queries<W: Write>(
    catalog: &Catalog,
    queries: &[String],
    json: bool,
    out: &mut W,
) -> io::Result<HeadlessExit> {
    let mut exit = HeadlessExit::AllFound;

    for query in queries {
        let resolution = resolver::resolve(query, catalog);
        if !resolution.is_found() {
            exit = HeadlessExit::SomeNotFound;
        }

        if json {
            write_json(query, &resolution, catalog.mode(), out)?;
        } else {
            write_plain(&resolution, catalog.mode(), out)?;
        }
    }

    Ok(exit)
}

fn write_plain<W: Write>(
    resolution: &Resolution,
    mode: LookupMode,
    out: &mut W,
) -> io::Result<()> {
    writeln!(out)?;
    match resolution.record() {
        Some(record) => {
            if let Some(status) = messages::lookup_status(resolution) {
                writeln!(out, "{status}")?;
            }
            let rendered = template::render(record);
            writeln!(out, "\n--- Issued ---\n{}", rendered.issued)?;
            writeln!(out, "\n--- Returned ---\n{}", rendered.returned)?;
        }
        None => {
            if let Some(text) = messages::pane_text(resolution, mode) {
                writeln!(out, "{text}")?;
            }
        }
    }
    Ok(())
}

fn write_json<W: Write>(
    query: &str,
    resolution: &Resolution,
    mode: LookupMode,
    out: &mut W,
) -> io::Result<()> {
    let (status, matched_by) = match resolution {
        Resolution::Found { matched_by, .. } => ("found", Some(*matched_by)),
        Resolution::NotFound { .. } => ("not_found", None),
        Resolution::EmptyTable => ("empty_table", None),
        Resolution::EmptyQuery => ("empty_query", None),
    };
    let message = messages::lookup_status(resolution)
        .filter(|s| !s.is_empty())
        .or_else(|| messages::pane_text(resolution, mode))
        .unwrap_or_default();
    let record = resolution.record();

    let line = JsonLookup {
        query,
        status,
        message,
        matched_by,
        record,
        templates: record.map(template::render),
    };
    writeln!(out, "{}", to_json(&line)?)
}

fn to_json<T: Serialize>(value: &T) -> io::Result<String> {
    serde_json::to_string(value).map_err(io::Error::from)
}
