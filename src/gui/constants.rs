//! GUI-specific constants for layout, text sizes, colors and intervals

use egui;

/// Dashboard window dimensions
pub const WINDOW_WIDTH: f32 = 960.0;
pub const WINDOW_HEIGHT: f32 = 600.0;
pub const WINDOW_MIN_WIDTH: f32 = 640.0;
pub const WINDOW_MIN_HEIGHT: f32 = 420.0;

/// Layout spacing
pub const SECTION_SPACING: f32 = 15.0;
pub const ITEM_SPACING: f32 = 8.0;

/// Text sizes
pub const CLOCK_SIZE: f32 = 96.0;
pub const SECONDS_SIZE: f32 = 40.0;
pub const GREETING_SIZE: f32 = 28.0;
pub const FOCUS_SIZE: f32 = 17.0;
pub const DATE_SIZE: f32 = 18.0;
pub const QUOTE_SIZE: f32 = 15.0;

/// Status colors
pub const ERROR_COLOR: egui::Color32 = egui::Color32::from_rgb(220, 90, 90);
pub const MUTED_COLOR: egui::Color32 = egui::Color32::from_gray(140);

/// Starfield decoration
pub const STAR_COUNT: usize = 140;
pub const STAR_SEED: u64 = 0x5EED;
pub const STAR_COLOR: egui::Color32 = egui::Color32::from_gray(170);

/// Repaint cadence keeping the seconds display live
pub const CLOCK_TICK_MS: u64 = 250;
