// AssetLookup - ui/theme.rs
//
// Colour scheme and layout constants.
// No dependencies on app state or business logic.

use egui::Color32;

/// Status line colour for a success message.
pub const STATUS_OK: Color32 = Color32::from_rgb(34, 197, 94); // Green 500

/// Status line colour for a failure message.
pub const STATUS_ERROR: Color32 = Color32::from_rgb(248, 113, 113); // Red 400

/// Status line colour for a warning message.
pub const STATUS_WARN: Color32 = Color32::from_rgb(217, 119, 6); // Amber 600

/// Colour for a status line, keyed off its leading marker glyph.
pub fn status_colour(message: &str, default: Color32) -> Color32 {
    match message.chars().next() {
        Some('\u{2705}') => STATUS_OK,
        Some('\u{274c}') => STATUS_ERROR,
        Some('\u{26a0}') => STATUS_WARN,
        _ => default,
    }
}

/// Layout constants.
pub const QUERY_FIELD_WIDTH: f32 = 280.0;
pub const OUTPUT_PANE_ROWS: usize = 8;
pub const WINDOW_SIZE: [f32; 2] = [820.0, 480.0];
pub const WINDOW_MIN_SIZE: [f32; 2] = [560.0, 360.0];
