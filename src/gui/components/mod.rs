pub mod settings_panel;
pub mod shortcut_editor;
pub mod weather_chip;
