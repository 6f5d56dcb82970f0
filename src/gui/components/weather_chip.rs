//! Weather chip in the dashboard's top row

use eframe::egui;

use crate::gui::constants::*;
use crate::weather::{WeatherService, WeatherState};

pub fn ui(ui: &mut egui::Ui, weather: &WeatherService) {
    match weather.state() {
        WeatherState::Loading => {
            ui.add(egui::Spinner::new().size(14.0));
            ui.colored_label(MUTED_COLOR, "Fetching weather");
        }
        WeatherState::Ready(current) => {
            ui.label(format!(
                "{} {:.0}\u{00B0}  {}",
                current.icon(),
                current.temperature_c,
                current.label()
            ));
        }
        WeatherState::Failed(err) => {
            ui.colored_label(ERROR_COLOR, err.to_string());
            if err.offers_retry() && ui.small_button("Retry").clicked() {
                weather.retry();
            }
        }
    }
}
