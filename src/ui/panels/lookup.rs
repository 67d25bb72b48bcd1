// AssetLookup - ui/panels/lookup.rs
//
// Query row: text field (Enter submits), Lookup and Clear buttons.

use crate::app::state::AppState;
use crate::ui::theme;

/// Render the query row.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.label("Asset Tag / Serial Number:");

        let response = ui.add(
            egui::TextEdit::singleline(&mut state.query)
                .hint_text("e.g. AB-01")
                .desired_width(theme::QUERY_FIELD_WIDTH),
        );
        let submitted = state.can_lookup()
            && response.lost_focus()
            && ui.input(|i| i.key_pressed(egui::Key::Enter));

        let clicked = ui
            .add_enabled(state.can_lookup(), egui::Button::new("Lookup"))
            .clicked();

        if submitted || clicked {
            state.perform_lookup();
            response.request_focus();
        }

        if ui.button("Clear").clicked() {
            state.clear_fields();
            response.request_focus();
        }
    });
}
