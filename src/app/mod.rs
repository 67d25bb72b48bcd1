// AssetLookup - app/mod.rs
//
// Application layer: orchestration, state management, catalog loading.
// Dependencies: core layer, platform (for fetching sources).
// Must NOT depend on: ui.

pub mod headless;
pub mod loader;
pub mod source;
pub mod state;
