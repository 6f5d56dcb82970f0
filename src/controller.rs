//! Settings mutation entry points
//!
//! Every change to `PreferenceState` goes through one of these methods, and
//! each follows the same protocol: assign the field, kick off a background
//! save of the full state, then apply the immediate visual side effect.
//! There is no deferred or batched save.

use eframe::egui;
use tracing::info;

use crate::shortcuts::ShortcutForm;
use crate::state::{PreferenceState, Theme, TimeFormat};
use crate::sync::StateSync;

pub struct SettingsController {
    state: PreferenceState,
    sync: StateSync,
}

impl SettingsController {
    pub fn new(state: PreferenceState, sync: StateSync) -> Self {
        Self { state, sync }
    }

    pub fn state(&self) -> &PreferenceState {
        &self.state
    }

    /// Apply theme and font to the egui context without mutating anything.
    /// Called once at startup after load, and again on explicit changes.
    pub fn apply_visuals(&self, ctx: &egui::Context) {
        apply_theme(ctx, self.state.theme);
        apply_font(ctx, &self.state.font);
    }

    pub fn set_theme(&mut self, ctx: &egui::Context, theme: Theme) {
        self.state.theme = theme;
        self.persist();
        apply_theme(ctx, theme);
    }

    pub fn set_font(&mut self, ctx: &egui::Context, font: &str) {
        self.state.font = font.to_string();
        self.persist();
        apply_font(ctx, font);
    }

    pub fn set_time_format(&mut self, format: TimeFormat) {
        self.state.time_format = format;
        self.persist();
        // The clock re-renders next frame; no other side effect
    }

    pub fn toggle_seconds(&mut self) {
        self.state.show_seconds = !self.state.show_seconds;
        self.persist();
    }

    pub fn toggle_stars(&mut self) {
        self.state.stars = !self.state.stars;
        self.persist();
    }

    pub fn set_focus(&mut self, focus: String) {
        self.state.focus = focus;
        self.persist();
    }

    /// Apply the form to the shortcut list. Persists only on a valid
    /// submission; a rejected form issues no save at all.
    pub fn submit_shortcut(&mut self, form: &mut ShortcutForm) -> bool {
        if form.submit(&mut self.state.shortcuts) {
            self.persist();
            true
        } else {
            false
        }
    }

    /// Remove the entry at `index`, shifting later entries left.
    /// Immediate and unconfirmed; recoverable only by re-adding.
    pub fn delete_shortcut(&mut self, index: usize) {
        if index < self.state.shortcuts.len() {
            let removed = self.state.shortcuts.remove(index);
            info!(title = %removed.title, "Shortcut deleted");
            self.persist();
        }
    }

    fn persist(&self) {
        let _ = self.sync.save(&self.state);
    }
}

fn apply_theme(ctx: &egui::Context, theme: Theme) {
    let preference = match theme {
        Theme::System => egui::ThemePreference::System,
        Theme::Light => egui::ThemePreference::Light,
        Theme::Dark => egui::ThemePreference::Dark,
    };
    ctx.set_theme(preference);
}

fn apply_font(ctx: &egui::Context, font: &str) {
    let family = font_family(font);
    ctx.all_styles_mut(|style| {
        for font_id in style.text_styles.values_mut() {
            font_id.family = family.clone();
        }
    });
}

/// Known family identifiers; anything else falls back to proportional
pub fn font_family(id: &str) -> egui::FontFamily {
    match id {
        "mono" => egui::FontFamily::Monospace,
        _ => egui::FontFamily::Proportional,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ShortcutEntry;
    use crate::store::MemoryStore;
    use serde_json::json;
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    struct Fixture {
        _rt: tokio::runtime::Runtime,
        store: Arc<MemoryStore>,
        controller: SettingsController,
    }

    fn fixture(state: PreferenceState) -> Fixture {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let store = Arc::new(MemoryStore::new());
        let sync = StateSync::new(store.clone(), rt.handle().clone());
        Fixture {
            _rt: rt,
            store,
            controller: SettingsController::new(state, sync),
        }
    }

    fn wait_for_saves(store: &MemoryStore, expected: usize) {
        let deadline = Instant::now() + Duration::from_secs(2);
        while store.save_count() < expected {
            assert!(Instant::now() < deadline, "timed out waiting for save");
            std::thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(store.save_count(), expected);
    }

    #[test]
    fn test_set_theme_persists_and_is_idempotent() {
        let ctx = egui::Context::default();
        let mut fx = fixture(PreferenceState::default());

        fx.controller.set_theme(&ctx, Theme::Dark);
        let after_first = ctx.options(|options| options.theme_preference);
        fx.controller.set_theme(&ctx, Theme::Dark);
        let after_second = ctx.options(|options| options.theme_preference);

        assert_eq!(after_first, egui::ThemePreference::Dark);
        assert_eq!(after_first, after_second);
        assert_eq!(fx.controller.state().theme, Theme::Dark);
        wait_for_saves(&fx.store, 2);
        assert_eq!(fx.store.get("theme"), Some(json!("dark")));
    }

    #[test]
    fn test_toggles_flip_rather_than_set() {
        let mut fx = fixture(PreferenceState::default());

        fx.controller.toggle_seconds();
        assert!(!fx.controller.state().show_seconds);
        fx.controller.toggle_seconds();
        assert!(fx.controller.state().show_seconds);

        fx.controller.toggle_stars();
        assert!(!fx.controller.state().stars);

        wait_for_saves(&fx.store, 3);
    }

    #[test]
    fn test_submit_shortcut_add_saves_once() {
        let mut fx = fixture(PreferenceState::default());
        let mut form = ShortcutForm::new();
        form.open_add();
        form.title = "GitHub".to_string();
        form.url = "https://github.com".to_string();
        form.icon = "github-logo".to_string();

        assert!(fx.controller.submit_shortcut(&mut form));
        assert_eq!(
            fx.controller.state().shortcuts,
            vec![ShortcutEntry {
                title: "GitHub".to_string(),
                url: "https://github.com".to_string(),
                icon: "github-logo".to_string(),
            }]
        );
        wait_for_saves(&fx.store, 1);
    }

    #[test]
    fn test_rejected_submission_issues_no_save() {
        let mut fx = fixture(PreferenceState::default());
        let mut form = ShortcutForm::new();
        form.open_add();
        form.url = "https://github.com".to_string();

        // Invalid submissions never reach the persistence path, so the
        // count is exact without waiting
        assert!(!fx.controller.submit_shortcut(&mut form));
        assert!(fx.controller.state().shortcuts.is_empty());
        assert_eq!(fx.store.save_count(), 0);
    }

    #[test]
    fn test_delete_shifts_left_and_saves() {
        let mut state = PreferenceState::default();
        for (title, url) in [
            ("A", "https://a.example"),
            ("B", "https://b.example"),
            ("C", "https://c.example"),
        ] {
            state.shortcuts.push(ShortcutEntry {
                title: title.to_string(),
                url: url.to_string(),
                icon: "link".to_string(),
            });
        }
        let mut fx = fixture(state);

        fx.controller.delete_shortcut(0);
        let titles: Vec<&str> = fx
            .controller
            .state()
            .shortcuts
            .iter()
            .map(|s| s.title.as_str())
            .collect();
        assert_eq!(titles, ["B", "C"]);
        wait_for_saves(&fx.store, 1);

        // Out-of-range delete is a no-op with no save
        fx.controller.delete_shortcut(10);
        assert_eq!(fx.controller.state().shortcuts.len(), 2);
        assert_eq!(fx.store.save_count(), 1);
    }

    #[test]
    fn test_set_focus_persists_text() {
        let mut fx = fixture(PreferenceState::default());
        fx.controller.set_focus("ship the release".to_string());
        wait_for_saves(&fx.store, 1);
        assert_eq!(fx.store.get("focus"), Some(json!("ship the release")));
    }

    #[test]
    fn test_font_family_fallback() {
        assert_eq!(font_family("mono"), egui::FontFamily::Monospace);
        assert_eq!(font_family("sans"), egui::FontFamily::Proportional);
        assert_eq!(font_family("comic-sans"), egui::FontFamily::Proportional);
    }

    #[test]
    fn test_unknown_font_id_selects_the_sans_option() {
        // The settings panel marks an option active when its resolved
        // family matches the persisted id's, so an unknown id lights up
        // Sans rather than leaving the group with no active option
        assert_eq!(font_family("fira-code"), font_family("sans"));
        assert_ne!(font_family("fira-code"), font_family("mono"));
    }
}
