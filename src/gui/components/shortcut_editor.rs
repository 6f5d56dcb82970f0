//! Add/edit dialog for shortcut entries

use eframe::egui;

use crate::controller::SettingsController;
use crate::gui::constants::*;
use crate::shortcuts::{FormMode, ShortcutForm};

/// Renders the modal editor while the form is open. Submission goes through
/// the controller so a valid entry is persisted in the same step.
pub fn ui(ctx: &egui::Context, controller: &mut SettingsController, form: &mut ShortcutForm) {
    if !form.is_open() {
        return;
    }

    let title = match form.mode {
        FormMode::Editing(_) => "Edit Shortcut",
        _ => "Add Shortcut",
    };

    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            ui.label("Title:");
            ui.text_edit_singleline(&mut form.title);

            ui.label("URL:");
            ui.text_edit_singleline(&mut form.url);

            ui.label("Icon (optional):");
            ui.text_edit_singleline(&mut form.icon);

            if let Some(err) = form.error {
                ui.add_space(ITEM_SPACING / 2.0);
                ui.colored_label(ERROR_COLOR, err.to_string());
            }

            ui.add_space(ITEM_SPACING);

            ui.horizontal(|ui| {
                if ui.button("Save").clicked() {
                    // On rejection the form stays open and shows its error
                    let _ = controller.submit_shortcut(form);
                }
                if ui.button("Cancel").clicked() {
                    form.cancel();
                }
            });
        });
}
