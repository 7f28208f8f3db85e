use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Ask tab – free-text questions about the dataset
// ---------------------------------------------------------------------------

pub fn ask_view(ui: &mut Ui, state: &mut AppState) {
    if state.chat.assistant.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("Set OPENAI_API_KEY (or pass --api-key) to ask questions about the dataset.");
        });
        return;
    }

    ui.label(format!(
        "Questions are answered from the first {} rows of the dataset.",
        state.config.preview_rows
    ));
    ui.separator();

    let pending = state.chat.is_pending();
    let mut submit = false;
    ui.horizontal(|ui: &mut Ui| {
        let response = ui.add_enabled(
            !pending,
            egui::TextEdit::singleline(&mut state.chat.question)
                .hint_text("e.g. Which Titus model matches TNB 100?")
                .desired_width(ui.available_width() - 80.0),
        );
        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            submit = true;
        }
        if ui.add_enabled(!pending, egui::Button::new("Ask")).clicked() {
            submit = true;
        }
    });
    if submit {
        state.submit_question();
    }

    if state.chat.is_pending() {
        ui.horizontal(|ui: &mut Ui| {
            ui.spinner();
            ui.label("Thinking…");
        });
    }
    ui.separator();

    ScrollArea::vertical()
        .id_salt("chat_history")
        .auto_shrink([false, false])
        .stick_to_bottom(true)
        .show(ui, |ui: &mut Ui| {
            for entry in &state.chat.history {
                ui.label(RichText::new(&entry.question).strong());
                match &entry.answer {
                    Ok(answer) => {
                        ui.label(answer);
                    }
                    Err(e) => {
                        ui.label(RichText::new(format!("Chat error: {e}")).color(Color32::RED));
                    }
                }
                ui.add_space(8.0);
            }
        });
}
