//! Scene configuration (window, world seeds, flight tuning). Loaded from rotorcity.ron at startup.

use serde::{Deserialize, Serialize};

/// Startup settings. Loaded from `rotorcity.ron` in the current directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Window width in logical pixels.
    #[serde(default = "default_window_width")]
    pub window_width: u32,
    /// Window height in logical pixels.
    #[serde(default = "default_window_height")]
    pub window_height: u32,
    /// Seed for building colours and heights.
    #[serde(default = "default_city_seed")]
    pub city_seed: u64,
    /// Seed for dropped box colours.
    #[serde(default = "default_vehicle_seed")]
    pub vehicle_seed: u64,
    /// Target speed applied by the movement keys (units per update).
    #[serde(default = "default_vehicle_speed")]
    pub vehicle_speed: f32,
    /// Initial free-orbit camera angles (yaw, pitch) in degrees.
    #[serde(default)]
    pub camera_angles: Option<(f32, f32)>,
    /// Run this many frames without a window, then exit. 0 opens a window.
    #[serde(default)]
    pub headless_frames: u32,
    /// Simulated frame rate for headless runs.
    #[serde(default = "default_headless_rate")]
    pub headless_rate_hz: f64,
    /// Log draw statistics every this many frames (0 = never).
    #[serde(default = "default_stats_every")]
    pub stats_every: u64,
}

fn default_window_width() -> u32 {
    1280
}
fn default_window_height() -> u32 {
    720
}
fn default_city_seed() -> u64 {
    0x5EED
}
fn default_vehicle_seed() -> u64 {
    7
}
fn default_vehicle_speed() -> f32 {
    0.5
}
fn default_headless_rate() -> f64 {
    60.0
}
fn default_stats_every() -> u64 {
    600
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            window_width: default_window_width(),
            window_height: default_window_height(),
            city_seed: default_city_seed(),
            vehicle_seed: default_vehicle_seed(),
            vehicle_speed: default_vehicle_speed(),
            camera_angles: None,
            headless_frames: 0,
            headless_rate_hz: default_headless_rate(),
            stats_every: default_stats_every(),
        }
    }
}

impl SceneConfig {
    /// Load config from `rotorcity.ron`. If the file is missing or invalid, returns default config.
    pub fn load() -> Self {
        let path = config_path();
        if let Ok(data) = std::fs::read_to_string(&path) {
            match Self::parse(&data) {
                Ok(c) => {
                    log::info!("Loaded config from {:?}", path);
                    return c;
                }
                Err(e) => log::warn!("Invalid config at {:?}: {}, using defaults", path, e),
            }
        }
        Self::default()
    }

    /// Parse a RON document; missing fields take their defaults.
    pub fn parse(data: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(data)
    }

    /// Aspect ratio of the configured window.
    pub fn aspect(&self) -> f32 {
        self.window_width as f32 / self.window_height.max(1) as f32
    }
}

fn config_path() -> std::path::PathBuf {
    std::env::current_dir().unwrap_or_else(|_| std::path::PathBuf::from(".")).join("rotorcity.ron")
}
