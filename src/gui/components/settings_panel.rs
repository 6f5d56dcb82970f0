//! Settings panel: every control binds to one preference field
//!
//! Controls call the controller's setters directly, so each interaction
//! persists and applies its side effect in one step. Active/inactive
//! highlighting is re-derived from state every frame, which keeps exactly
//! one option per group marked active.

use eframe::egui;

use crate::controller::{SettingsController, font_family};
use crate::gui::components::shortcut_editor;
use crate::gui::constants::*;
use crate::shortcuts::ShortcutForm;
use crate::state::{PreferenceState, Theme, TimeFormat};

enum RowAction {
    Edit(usize),
    Delete(usize),
}

pub struct SettingsPanel {
    pub open: bool,
    focus_buffer: String,
    form: ShortcutForm,
}

impl SettingsPanel {
    pub fn new() -> Self {
        Self {
            open: false,
            focus_buffer: String::new(),
            form: ShortcutForm::new(),
        }
    }

    /// Gear-button toggle. Opening re-syncs the focus edit buffer from state.
    pub fn toggle(&mut self, state: &PreferenceState) {
        self.open = !self.open;
        if self.open {
            self.focus_buffer = state.focus.clone();
        } else {
            self.form.cancel();
        }
    }

    pub fn dismiss(&mut self) {
        self.open = false;
        self.form.cancel();
    }

    /// True while the add/edit dialog is up; outside clicks must not
    /// dismiss the panel underneath it.
    pub fn editing_shortcut(&self) -> bool {
        self.form.is_open()
    }

    /// Draws the panel (when open) and returns its rect for the outside
    /// click test in the app loop.
    pub fn ui(
        &mut self,
        ctx: &egui::Context,
        controller: &mut SettingsController,
    ) -> Option<egui::Rect> {
        if !self.open {
            return None;
        }

        let mut open = self.open;
        let response = egui::Window::new("Settings")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-SECTION_SPACING, 48.0))
            .show(ctx, |ui| self.contents(ui, controller));
        self.open = open;

        shortcut_editor::ui(ctx, controller, &mut self.form);

        response.map(|inner| inner.response.rect)
    }

    fn contents(&mut self, ui: &mut egui::Ui, controller: &mut SettingsController) {
        ui.set_min_width(280.0);

        ui.group(|ui| {
            ui.label(egui::RichText::new("Appearance").strong());
            ui.add_space(ITEM_SPACING);

            ui.horizontal(|ui| {
                ui.label("Theme:");
                for (theme, label) in [
                    (Theme::System, "System"),
                    (Theme::Light, "Light"),
                    (Theme::Dark, "Dark"),
                ] {
                    let active = controller.state().theme == theme;
                    if ui.selectable_label(active, label).clicked() {
                        controller.set_theme(ui.ctx(), theme);
                    }
                }
            });

            ui.horizontal(|ui| {
                ui.label("Font:");
                // Compare resolved families, not raw ids: an unknown
                // persisted id falls back to proportional and must light
                // up the Sans option rather than none
                let current = font_family(&controller.state().font);
                for (font, label) in [("sans", "Sans"), ("mono", "Mono")] {
                    let active = current == font_family(font);
                    if ui.selectable_label(active, label).clicked() {
                        controller.set_font(ui.ctx(), font);
                    }
                }
            });

            let mut stars = controller.state().stars;
            if ui.checkbox(&mut stars, "Starfield background").changed() {
                controller.toggle_stars();
            }
        });

        ui.add_space(SECTION_SPACING);

        ui.group(|ui| {
            ui.label(egui::RichText::new("Clock").strong());
            ui.add_space(ITEM_SPACING);

            ui.horizontal(|ui| {
                ui.label("Format:");
                for (format, label) in [
                    (TimeFormat::TwelveHour, "12h"),
                    (TimeFormat::TwentyFourHour, "24h"),
                ] {
                    let active = controller.state().time_format == format;
                    if ui.selectable_label(active, label).clicked() {
                        controller.set_time_format(format);
                    }
                }
            });

            let mut seconds = controller.state().show_seconds;
            if ui.checkbox(&mut seconds, "Show seconds").changed() {
                controller.toggle_seconds();
            }
        });

        ui.add_space(SECTION_SPACING);

        ui.group(|ui| {
            ui.label(egui::RichText::new("Focus of the day").strong());
            ui.add_space(ITEM_SPACING);
            if ui.text_edit_singleline(&mut self.focus_buffer).changed() {
                controller.set_focus(self.focus_buffer.clone());
            }
        });

        ui.add_space(SECTION_SPACING);

        ui.group(|ui| {
            ui.label(egui::RichText::new("Shortcuts").strong());
            ui.add_space(ITEM_SPACING);

            let mut action = None;
            for (idx, entry) in controller.state().shortcuts.iter().enumerate() {
                ui.horizontal(|ui| {
                    ui.label(&entry.title);
                    ui.label(
                        egui::RichText::new(&entry.url)
                            .small()
                            .color(MUTED_COLOR),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("\u{1F5D1}").clicked() {
                            action = Some(RowAction::Delete(idx));
                        }
                        if ui.small_button("\u{270F}").clicked() {
                            action = Some(RowAction::Edit(idx));
                        }
                    });
                });
            }

            if controller.state().shortcuts.is_empty() {
                ui.label(
                    egui::RichText::new("(No shortcuts yet)")
                        .italics()
                        .weak(),
                );
            }

            match action {
                Some(RowAction::Edit(idx)) => {
                    let entry = controller.state().shortcuts[idx].clone();
                    self.form.open_edit(idx, &entry);
                }
                Some(RowAction::Delete(idx)) => controller.delete_shortcut(idx),
                None => {}
            }

            ui.add_space(ITEM_SPACING / 2.0);
            if ui.button("\u{2795} Add shortcut").clicked() {
                self.form.open_add();
            }
        });
    }
}

impl Default for SettingsPanel {
    fn default() -> Self {
        Self::new()
    }
}
