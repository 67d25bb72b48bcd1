// AssetLookup - ui/panels/output.rs
//
// The Issued and Returned panes, side by side, each with a Copy button.
// Copy buttons stay disabled unless the panes hold rendered templates.

use crate::app::state::AppState;
use crate::core::model::TemplateKind;
use crate::ui::theme;
use std::time::Instant;

/// Render both output panes.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.columns(2, |columns| {
        pane(&mut columns[0], state, TemplateKind::Issued);
        pane(&mut columns[1], state, TemplateKind::Returned);
    });
}

fn pane(ui: &mut egui::Ui, state: &mut AppState, kind: TemplateKind) {
    ui.horizontal(|ui| {
        ui.strong(format!("{} Template", kind.label()));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let copy = ui.add_enabled(state.can_copy(), egui::Button::new("Copy"));
            if copy.clicked() {
                if let Some(text) = state.copy_text(kind, Instant::now()) {
                    ui.ctx().copy_text(text);
                    tracing::debug!(template = kind.label(), "Copied to clipboard");
                }
            }
        });
    });

    let text = match kind {
        TemplateKind::Issued => state.issued_output.as_str(),
        TemplateKind::Returned => state.returned_output.as_str(),
    };

    // Read-only but selectable: a `&str` buffer cannot be edited.
    let mut buffer = text;
    ui.add(
        egui::TextEdit::multiline(&mut buffer)
            .font(egui::TextStyle::Monospace)
            .desired_rows(theme::OUTPUT_PANE_ROWS)
            .desired_width(f32::INFINITY),
    );
}
