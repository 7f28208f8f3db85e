use std::hash::Hash;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::BrandColors;
use crate::data::compare::ComparisonOutcome;
use crate::data::model::Table;
use crate::state::AppState;
use crate::ui::panels;

const ROW_HEIGHT: f32 = 20.0;

// ---------------------------------------------------------------------------
// Generic table widget
// ---------------------------------------------------------------------------

/// Draw `table` with brand-coloured headers. With `scroll` the body gets its
/// own virtualised scroll area; without it the table takes its full height.
pub fn table_view(ui: &mut Ui, id: impl Hash, table: &Table, colors: &BrandColors, scroll: bool) {
    grid(
        ui,
        id,
        &table.columns,
        table.rows.len(),
        |r, c| table.rows[r][c].clone(),
        colors,
        scroll,
    );
}

/// Only visible rows call `cell(row, col)`.
fn grid(
    ui: &mut Ui,
    id: impl Hash,
    columns: &[String],
    n_rows: usize,
    cell: impl Fn(usize, usize) -> String,
    colors: &BrandColors,
    scroll: bool,
) {
    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .vscroll(scroll)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .columns(Column::auto().at_least(90.0).clip(true), columns.len())
            .header(ROW_HEIGHT + 4.0, |mut header| {
                for col in columns {
                    header.col(|ui: &mut Ui| {
                        ui.label(RichText::new(col).strong().color(colors.color_for(col)));
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, n_rows, |mut row| {
                    let r = row.index();
                    for c in 0..columns.len() {
                        row.col(|ui: &mut Ui| {
                            ui.label(cell(r, c));
                        });
                    }
                });
            });
    });
}

// ---------------------------------------------------------------------------
// Comparison tab
// ---------------------------------------------------------------------------

pub fn comparison_view(ui: &mut Ui, state: &mut AppState) {
    let mut export_clicked = false;

    match &state.outcome {
        None => {}
        Some(Err(e)) => {
            ui.label(RichText::new(format!("Error: {e}")).color(Color32::RED));
        }
        Some(Ok(ComparisonOutcome::EmptySelection)) => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Select models and competitor brands in the sidebar to compare.");
            });
        }
        Some(Ok(ComparisonOutcome::NoMatch)) => {
            ui.label(
                RichText::new("⚠ No competitor data for the selected models.")
                    .color(Color32::YELLOW),
            );
        }
        Some(Ok(ComparisonOutcome::Ready(result))) => {
            ui.horizontal(|ui: &mut Ui| {
                ui.label(format!(
                    "{} model(s), {} matching row(s)",
                    result.per_model.len(),
                    result.export.len()
                ));
                if ui.button("⬇ Export CSV").clicked() {
                    export_clicked = true;
                }
            });
            ui.separator();

            ScrollArea::vertical()
                .id_salt("comparison_scroll")
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    for (model, table) in &result.per_model {
                        ui.strong(format!("{}: {model}", state.base_column));
                        if table.is_empty() {
                            ui.label(
                                RichText::new("⚠ No competitor data for this model.")
                                    .color(Color32::YELLOW),
                            );
                        } else {
                            table_view(ui, model, table, &state.brand_colors, false);
                        }
                        ui.add_space(12.0);
                    }
                });
        }
    }

    if export_clicked {
        panels::save_file_dialog(state);
    }
}

// ---------------------------------------------------------------------------
// Dataset tab
// ---------------------------------------------------------------------------

pub fn dataset_view(ui: &mut Ui, state: &AppState) {
    let Some(ds) = &state.dataset else {
        return;
    };
    ui.label(format!("{} rows", ds.len()));
    ui.separator();
    ScrollArea::horizontal()
        .id_salt("dataset_scroll")
        .show(ui, |ui: &mut Ui| {
            grid(
                ui,
                "dataset",
                &ds.columns,
                ds.len(),
                |r, c| ds.rows[r][c].display_text(),
                &state.brand_colors,
                true,
            );
        });
}
