//! Dashboard window implemented with egui/eframe

pub mod components;
pub mod constants;

use std::time::Duration;

use anyhow::{Result, anyhow};
use chrono::{Local, Timelike};
use eframe::{CreationContext, NativeOptions, egui};
use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::info;

use crate::clock;
use crate::controller::{SettingsController, font_family};
use crate::quotes::QuoteRotation;
use crate::weather::WeatherService;
use components::{settings_panel::SettingsPanel, weather_chip};
use constants::*;

struct VistaApp {
    controller: SettingsController,
    weather: WeatherService,
    quotes: QuoteRotation,
    panel: SettingsPanel,
    gear_rect: egui::Rect,
}

impl VistaApp {
    fn new(cc: &CreationContext<'_>, controller: SettingsController, weather: WeatherService) -> Self {
        info!("Initializing dashboard");
        controller.apply_visuals(&cc.egui_ctx);

        Self {
            controller,
            weather,
            quotes: QuoteRotation::new(),
            panel: SettingsPanel::new(),
            gear_rect: egui::Rect::NOTHING,
        }
    }

    fn draw_starfield(&self, ui: &egui::Ui) {
        let rect = ui.max_rect();
        let painter = ui.painter();
        let mut rng = StdRng::seed_from_u64(STAR_SEED);
        for _ in 0..STAR_COUNT {
            let pos = egui::pos2(
                rect.left() + rng.random::<f32>() * rect.width(),
                rect.top() + rng.random::<f32>() * rect.height(),
            );
            let radius = 0.4 + rng.random::<f32>() * 1.1;
            painter.circle_filled(pos, radius, STAR_COLOR);
        }
    }

    fn draw_clock(&self, ui: &mut egui::Ui, now: &chrono::DateTime<Local>) {
        let state = self.controller.state();
        let family = font_family(&state.font);
        let color = ui.visuals().strong_text_color();

        let mut job = egui::text::LayoutJob::default();
        job.append(
            &clock::format_time(now, state.time_format),
            0.0,
            egui::TextFormat {
                font_id: egui::FontId::new(CLOCK_SIZE, family.clone()),
                color,
                ..Default::default()
            },
        );
        if state.show_seconds {
            job.append(
                &clock::format_seconds(now),
                0.0,
                egui::TextFormat {
                    font_id: egui::FontId::new(SECONDS_SIZE, family),
                    color: MUTED_COLOR,
                    ..Default::default()
                },
            );
        }
        ui.label(job);
    }

    fn draw_shortcuts(&self, ui: &mut egui::Ui) {
        let shortcuts = &self.controller.state().shortcuts;
        if shortcuts.is_empty() {
            return;
        }

        ui.add_space(SECTION_SPACING * 2.0);
        ui.horizontal_wrapped(|ui| {
            ui.spacing_mut().item_spacing.x = ITEM_SPACING;
            for entry in shortcuts {
                let chip = format!("{} {}", icon_glyph(&entry.icon), entry.title);
                if ui.button(chip).clicked() {
                    ui.ctx().open_url(egui::OpenUrl::new_tab(&entry.url));
                }
            }
        });
    }
}

impl eframe::App for VistaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Local::now();

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.controller.state().stars && ctx.theme() == egui::Theme::Dark {
                self.draw_starfield(ui);
            }

            // Top row: weather chip and the settings toggle, right-aligned
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                let gear = ui.button("\u{2699}");
                self.gear_rect = gear.rect;
                if gear.clicked() {
                    self.panel.toggle(self.controller.state());
                }
                ui.add_space(ITEM_SPACING);
                weather_chip::ui(ui, &self.weather);
            });

            ui.add_space((ui.available_height() * 0.18).max(0.0));

            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new(clock::greeting(now.hour()))
                        .size(GREETING_SIZE)
                        .strong(),
                );

                let focus = &self.controller.state().focus;
                if !focus.is_empty() {
                    ui.add_space(ITEM_SPACING / 2.0);
                    ui.label(
                        egui::RichText::new(focus)
                            .size(FOCUS_SIZE)
                            .italics()
                            .color(MUTED_COLOR),
                    );
                }

                ui.add_space(ITEM_SPACING);
                self.draw_clock(ui, &now);

                ui.add_space(ITEM_SPACING / 2.0);
                ui.label(egui::RichText::new(clock::format_date(&now)).size(DATE_SIZE));

                ui.add_space(SECTION_SPACING * 2.0);
                ui.label(
                    egui::RichText::new(self.quotes.current(now.hour()))
                        .size(QUOTE_SIZE)
                        .weak()
                        .italics(),
                );

                self.draw_shortcuts(ui);
            });
        });

        let panel_rect = self.panel.ui(ctx, &mut self.controller);

        // Outside click dismisses the panel, unless the shortcut dialog is up
        if self.panel.open && !self.panel.editing_shortcut() {
            let pressed_at = ctx.input(|input| {
                if input.pointer.any_pressed() {
                    input.pointer.interact_pos()
                } else {
                    None
                }
            });
            if let Some(pos) = pressed_at {
                let inside_panel = panel_rect.is_some_and(|rect| rect.contains(pos));
                if !inside_panel && !self.gear_rect.contains(pos) {
                    self.panel.dismiss();
                }
            }
        }

        ctx.request_repaint_after(Duration::from_millis(CLOCK_TICK_MS));
    }
}

/// Map a stored icon identifier to a glyph; unknown ids fall back to a link
fn icon_glyph(icon: &str) -> &'static str {
    match icon {
        "github-logo" | "code" => "\u{1F4BB}",
        "mail" => "\u{2709}",
        "calendar" => "\u{1F4C5}",
        "music" => "\u{1F3B5}",
        "news" => "\u{1F4F0}",
        "book" | "docs" => "\u{1F4D6}",
        "chat" => "\u{1F4AC}",
        _ => "\u{1F517}",
    }
}

pub fn run_gui(controller: SettingsController, weather: WeatherService) -> Result<()> {
    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([WINDOW_WIDTH, WINDOW_HEIGHT])
            .with_min_inner_size([WINDOW_MIN_WIDTH, WINDOW_MIN_HEIGHT])
            .with_title("Vista"),
        ..Default::default()
    };

    eframe::run_native(
        "Vista",
        options,
        Box::new(move |cc| Ok(Box::new(VistaApp::new(cc, controller, weather)))),
    )
    .map_err(|err| anyhow!("Failed to launch dashboard: {err}"))
}
