//! In-memory preference state
//!
//! `PreferenceState` is the live copy of every user-configurable setting.
//! The store owns the durable copy; this struct is a cache with
//! write-through-on-mutation semantics (see `controller`).

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::constants::{shortcuts, store};

/// Flat key-value form of the state as held by the store
pub type Snapshot = HashMap<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Follow the platform light/dark preference
    System,
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeFormat {
    #[serde(rename = "12h")]
    TwelveHour,
    #[serde(rename = "24h")]
    TwentyFourHour,
}

/// A user-defined named link shown as a chip on the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortcutEntry {
    pub title: String,
    pub url: String,
    #[serde(default = "fallback_icon")]
    pub icon: String,
}

fn fallback_icon() -> String {
    shortcuts::FALLBACK_ICON.to_string()
}

fn default_font() -> String {
    "sans".to_string()
}

/// Every user-configurable setting, with hardcoded defaults.
/// Constructed once at startup and kept live for the window's lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct PreferenceState {
    pub theme: Theme,
    pub font: String,
    pub time_format: TimeFormat,
    pub show_seconds: bool,
    pub stars: bool,
    pub focus: String,
    pub shortcuts: Vec<ShortcutEntry>,
}

impl Default for PreferenceState {
    fn default() -> Self {
        Self {
            theme: Theme::System,
            font: default_font(),
            time_format: TimeFormat::TwelveHour,
            show_seconds: true,
            stars: true,
            focus: String::new(),
            shortcuts: Vec::new(),
        }
    }
}

impl PreferenceState {
    /// Build state from a persisted snapshot: defaults overridden
    /// field-by-field by the recognized, correctly-typed keys present.
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let mut state = Self::default();
        state.merge_snapshot(snapshot);
        state
    }

    /// Merge a snapshot over the current state. Absent keys keep their
    /// current value; values of the wrong shape are ignored with a warning
    /// rather than clobbering a working default.
    pub fn merge_snapshot(&mut self, snapshot: &Snapshot) {
        for (key, value) in snapshot {
            match key.as_str() {
                store::KEY_THEME => merge_field(&mut self.theme, key, value),
                store::KEY_FONT => merge_field(&mut self.font, key, value),
                store::KEY_TIME_FORMAT => merge_field(&mut self.time_format, key, value),
                store::KEY_SHOW_SECONDS => merge_field(&mut self.show_seconds, key, value),
                store::KEY_STARS => merge_field(&mut self.stars, key, value),
                store::KEY_FOCUS => merge_field(&mut self.focus, key, value),
                store::KEY_SHORTCUTS => merge_field(&mut self.shortcuts, key, value),
                _ => debug!(key = %key, "ignoring unrecognized key in persisted state"),
            }
        }
    }

    /// Serialize the full recognized key set. Every save writes all keys,
    /// never a partial subset, so the last completed save is always a
    /// consistent whole.
    pub fn to_snapshot(&self) -> Snapshot {
        let mut snapshot = Snapshot::new();
        snapshot.insert(store::KEY_THEME.into(), json_value(&self.theme));
        snapshot.insert(store::KEY_FONT.into(), json_value(&self.font));
        snapshot.insert(store::KEY_TIME_FORMAT.into(), json_value(&self.time_format));
        snapshot.insert(store::KEY_SHOW_SECONDS.into(), json_value(&self.show_seconds));
        snapshot.insert(store::KEY_STARS.into(), json_value(&self.stars));
        snapshot.insert(store::KEY_FOCUS.into(), json_value(&self.focus));
        snapshot.insert(store::KEY_SHORTCUTS.into(), json_value(&self.shortcuts));
        snapshot
    }
}

fn merge_field<T: DeserializeOwned>(slot: &mut T, key: &str, value: &Value) {
    match serde_json::from_value::<T>(value.clone()) {
        Ok(parsed) => *slot = parsed,
        Err(err) => warn!(key, error = %err, "persisted value has unexpected shape, keeping default"),
    }
}

fn json_value<T: Serialize>(field: &T) -> Value {
    // All state fields are plain serde types; serialization cannot fail
    serde_json::to_value(field).unwrap_or(Value::Null)
}
