use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::export::EXPORT_FILE_NAME;
use crate::data::loader::SUPPORTED_EXTENSIONS;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(dataset) = state.dataset.clone() else {
        ui.label("No dataset loaded.");
        return;
    };

    // ---- Base brand ----
    ui.strong("Base brand");
    let current_base = state.base_column.clone();
    let mut new_base = None;
    egui::ComboBox::from_id_salt("base_brand")
        .selected_text(RichText::new(&current_base).color(state.brand_colors.color_for(&current_base)))
        .show_ui(ui, |ui: &mut Ui| {
            for col in &dataset.columns {
                if ui.selectable_label(current_base == *col, col).clicked() {
                    new_base = Some(col.clone());
                }
            }
        });
    if let Some(col) = new_base.filter(|c| *c != current_base) {
        state.set_base_column(&col);
    }
    ui.separator();

    // ---- Models of the base brand ----
    let n_selected = state.selected_models.len();
    let n_total = state.base_values.len();
    ui.strong(format!("{current_base} models  ({n_selected}/{n_total})"));
    ui.add(
        egui::TextEdit::singleline(&mut state.model_search)
            .hint_text("Search models…")
            .desired_width(f32::INFINITY),
    );
    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.select_visible_models();
        }
        if ui.small_button("None").clicked() {
            state.clear_models();
        }
    });

    let mut toggled_model = None;
    ScrollArea::vertical()
        .id_salt("model_list")
        .max_height(280.0)
        .auto_shrink([false, true])
        .show(ui, |ui: &mut Ui| {
            for value in state.visible_base_values() {
                let mut checked = state.selected_models.contains(value);
                if ui.checkbox(&mut checked, value.as_str()).changed() {
                    toggled_model = Some(value.clone());
                }
            }
        });
    if let Some(model) = toggled_model {
        state.toggle_model(&model);
    }
    ui.separator();

    // ---- Competitor brands ----
    let n_selected = state.selected_competitors.len();
    let n_total = state.competitor_columns.len();
    egui::CollapsingHeader::new(
        RichText::new(format!("Competitor brands  ({n_selected}/{n_total})")).strong(),
    )
    .id_salt("competitors")
    .default_open(true)
    .show(ui, |ui: &mut Ui| {
        ui.horizontal(|ui: &mut Ui| {
            if ui.small_button("All").clicked() {
                state.select_all_competitors();
            }
            if ui.small_button("None").clicked() {
                state.select_no_competitors();
            }
        });

        let mut toggled = None;
        for col in &state.competitor_columns {
            let mut checked = state.selected_competitors.contains(col);
            let text = RichText::new(col).color(state.brand_colors.color_for(col));
            if ui.checkbox(&mut checked, text).changed() {
                toggled = Some(col.clone());
            }
        }
        if let Some(col) = toggled {
            state.toggle_competitor(&col);
        }
    });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Upload spreadsheet…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
            if ui.button("Export CSV…").clicked() {
                save_file_dialog(state);
                ui.close_menu();
            }
            ui.separator();
            if ui.button("Quit").clicked() {
                ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} rows × {} brands from {}",
                ds.len(),
                ds.columns.len(),
                state.source().unwrap_or("unknown source")
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            let color = if msg.starts_with("Error") {
                Color32::RED
            } else {
                ui.visuals().text_color()
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// Blocking error screen
// ---------------------------------------------------------------------------

/// Shown instead of every filter control when no usable dataset exists.
pub fn blocking_error(ui: &mut Ui, state: &mut AppState, message: &str) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.add_space(ui.available_height() * 0.3);
        ui.heading(RichText::new("No data available").color(Color32::RED));
        ui.add_space(8.0);
        ui.label(message);
        ui.add_space(12.0);
        ui.label("Upload a spreadsheet to continue (or drop one onto this window).");
        if ui.button("Upload spreadsheet…").clicked() {
            open_file_dialog(state);
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open cross-reference spreadsheet")
        .add_filter("Supported files", SUPPORTED_EXTENSIONS)
        .add_filter("Excel / ODS", &["xlsx", "xlsm", "xlsb", "xls", "ods"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.upload(&path);
    }
}

pub fn save_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export comparison")
        .set_file_name(EXPORT_FILE_NAME)
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        state.export_to(&path);
    }
}
