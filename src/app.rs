use std::path::PathBuf;
use std::time::Duration;

use eframe::egui;

use crate::config::AppConfig;
use crate::state::{is_supported_upload, AppState, Tab};
use crate::ui::{ask, panels, tables};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct CrossrefApp {
    pub state: AppState,
}

impl CrossrefApp {
    pub fn new(config: AppConfig) -> Self {
        Self {
            state: AppState::new(config),
        }
    }

    /// Files dropped onto the window count as uploads.
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped: Vec<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|f| f.path.clone())
                .collect()
        });
        if let Some(path) = dropped.iter().find(|p| is_supported_upload(p)) {
            self.state.upload(path);
        } else if !dropped.is_empty() {
            self.state.status_message = Some("Error: unsupported file type".to_string());
        }
    }
}

impl eframe::App for CrossrefApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_dropped_files(ctx);
        if self.state.poll_chat() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Nothing to filter: show the error and stop ----
        if let Some(message) = self.state.blocking_error.clone() {
            egui::CentralPanel::default().show(ctx, |ui| {
                panels::blocking_error(ui, &mut self.state, &message);
            });
            return;
        }

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: tabs ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.state.tab, Tab::Comparison, "Comparison");
                ui.selectable_value(&mut self.state.tab, Tab::Dataset, "Dataset");
                ui.selectable_value(&mut self.state.tab, Tab::Ask, "Ask the data");
            });
            ui.separator();

            match self.state.tab {
                Tab::Comparison => tables::comparison_view(ui, &mut self.state),
                Tab::Dataset => tables::dataset_view(ui, &self.state),
                Tab::Ask => ask::ask_view(ui, &mut self.state),
            }
        });
    }
}
