use serde::{Deserialize, Serialize};

/// Persisted application settings. Field names in the JSON file are the
/// PascalCase keys the settings file has always used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(rename = "IntervalMinutes")]
    pub interval_minutes: u32,
    #[serde(rename = "DisplaySeconds")]
    pub display_seconds: u32,
    #[serde(rename = "PlaySound")]
    pub play_sound: bool,
    #[serde(rename = "StartWithWindows", default)]
    pub start_with_windows: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            interval_minutes: 30,
            display_seconds: 5,
            play_sound: true,
            start_with_windows: false,
        }
    }
}
