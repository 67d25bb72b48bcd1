// AssetLookup - gui.rs
//
// Top-level eframe::App implementation.
// Wires together the panels and manages the load lifecycle.

use crate::app::loader::LoadManager;
use crate::app::source::CsvSource;
use crate::app::state::AppState;
use crate::ui;
use std::time::Instant;

/// The AssetLookup application.
pub struct AssetLookupApp {
    pub state: AppState,
    pub load_manager: LoadManager,
}

impl AssetLookupApp {
    /// Create a new application instance with the given state.
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            load_manager: LoadManager::new(),
        }
    }
}

impl eframe::App for AssetLookupApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Poll for load progress
        let messages = self.load_manager.poll_progress();
        let had_messages = !messages.is_empty();
        for msg in messages {
            self.state.apply_progress(msg);
        }
        if had_messages || self.state.load_in_progress {
            ctx.request_repaint();
        }

        // Expire the "copied" confirmation.
        self.state.expire_status(Instant::now());
        if let Some(at) = self.state.status_expires_at {
            ctx.request_repaint_after(at.saturating_duration_since(Instant::now()));
        }

        // pending_load: startup, Reload, or Open CSV.
        if let Some(source) = self.state.pending_load.take() {
            self.state.source = source.clone();
            self.state.load_in_progress = true;
            self.load_manager.start_load(source, self.state.load_options);
        }

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open CSV\u{2026}").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .set_title("Open asset inventory CSV")
                            .add_filter("CSV files", &["csv"])
                            .add_filter("All files", &["*"])
                            .pick_file()
                        {
                            tracing::info!(path = %path.display(), "CSV chosen via dialog");
                            self.state.pending_load = Some(CsvSource::File(path));
                        }
                        ui.close_menu();
                    }
                    if ui.button("Reload").clicked() {
                        self.state.pending_load = Some(self.state.source.clone());
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.menu_button("Help", |ui| {
                    if ui.button("About").clicked() {
                        self.state.show_about = true;
                        ui.close_menu();
                    }
                });
            });
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if self.state.load_in_progress {
                    ui.spinner();
                }
                let default_colour = ui.style().visuals.text_color();
                ui.colored_label(
                    ui::theme::status_colour(&self.state.status_message, default_colour),
                    &self.state.status_message,
                );

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if let Some(at) = self.state.loaded_at {
                        ui.label(
                            egui::RichText::new(format!(
                                "{} records \u{00b7} {} \u{00b7} {}",
                                self.state.catalog.len(),
                                self.state.source,
                                at.with_timezone(&chrono::Local).format("%H:%M:%S")
                            ))
                            .weak(),
                        );
                    } else {
                        ui.label(egui::RichText::new(self.state.source.to_string()).weak());
                    }
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(4.0);
            ui::panels::lookup::render(ui, &mut self.state);
            ui.add_space(8.0);
            ui.separator();
            ui.add_space(4.0);
            ui::panels::output::render(ui, &mut self.state);
        });

        ui::panels::about::render(ctx, &mut self.state);
    }
}
