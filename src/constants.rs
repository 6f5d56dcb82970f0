//! Application-wide constants
//!
//! Magic numbers and string literals used throughout the application,
//! providing a single source of truth for constant values.

/// Persistent store layout
pub mod store {
    /// Directory under the platform config dir holding the state file
    pub const APP_DIR: &str = "vista";

    /// State file name (flat JSON object keyed by the names below)
    pub const FILENAME: &str = "state.json";

    /// Recognized keys in the persisted snapshot
    pub const KEY_THEME: &str = "theme";
    pub const KEY_FONT: &str = "font";
    pub const KEY_TIME_FORMAT: &str = "time_format";
    pub const KEY_SHOW_SECONDS: &str = "show_seconds";
    pub const KEY_STARS: &str = "stars";
    pub const KEY_FOCUS: &str = "focus";
    pub const KEY_SHORTCUTS: &str = "shortcuts";
}

/// Day-part boundaries (local hour, half-open ranges)
pub mod day_part {
    /// Morning starts at 05:00
    pub const MORNING_START: u32 = 5;

    /// Afternoon starts at 12:00
    pub const AFTERNOON_START: u32 = 12;

    /// Evening starts at 17:00
    pub const EVENING_START: u32 = 17;

    /// Night starts at 22:00 (runs through to MORNING_START)
    pub const NIGHT_START: u32 = 22;
}

/// Weather fetch chain
pub mod weather {
    /// IP geolocation endpoint returning `{ latitude, longitude }`
    pub const GEOLOCATION_URL: &str = "https://ipapi.co/json/";

    /// Open-Meteo current conditions endpoint (lat/lon appended as query)
    pub const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

    /// Timeout for the geolocation round trip
    pub const GEOLOCATION_TIMEOUT_SECS: u64 = 8;

    /// How long a resolved position may be reused
    pub const POSITION_CACHE_SECS: u64 = 600;

    /// Interval between automatic refreshes
    pub const REFRESH_INTERVAL_SECS: u64 = 600;
}

/// Shortcut entries
pub mod shortcuts {
    /// Icon identifier used when the form leaves the icon blank
    pub const FALLBACK_ICON: &str = "link";
}
