// AssetLookup - core/mod.rs
//
// Core business logic layer.
// Dependencies: standard library, csv, serde, util.
// Must NOT depend on: ui, platform, app, or any I/O crate directly.

pub mod catalog;
pub mod messages;
pub mod model;
pub mod resolver;
pub mod template;
