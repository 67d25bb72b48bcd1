// AssetLookup - platform/mod.rs
//
// Platform abstraction layer.
// Dependencies: standard library, directories, reqwest, util.
// Must NOT depend on: core, app, ui.

pub mod config;
pub mod fs;
pub mod http;
