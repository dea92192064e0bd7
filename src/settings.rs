//! Simulation settings and preferences
//!
//! Persisted in LocalStorage on the web, or as a JSON file natively.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Environment variable naming a native settings file
pub const SETTINGS_PATH_VAR: &str = "WRAP_CHIMES_SETTINGS";

/// Settings errors
#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    /// IO error
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Parse or serialization error
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Values that would break the simulation
    #[error("Invalid settings: {0}")]
    Invalid(String),
}

/// Which axis a drag is measured against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BasisMode {
    /// Horizontal axis: drag along x sizes, drag along y sets speed
    Fixed,
    /// Axis from the drag origin to the picked target (fixed when nothing is picked)
    #[default]
    TargetRelative,
}

/// Collision tone settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChimeSettings {
    /// Whether launched circles chime on collision
    pub enabled: bool,
    /// Keys spanned between the largest and smallest radius
    pub num_keys: f32,
    /// Key for a collider at `max_radius`
    pub initial_key: f32,
    /// Radius mapped to the lowest key
    pub max_radius: f32,
    /// Snap to whole keys
    pub quantize: bool,
    /// Tone gain (0.0 - 1.0)
    pub gain: f32,
    /// Tone length in seconds
    pub duration: f32,
}

impl Default for ChimeSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            num_keys: CHIME_NUM_KEYS,
            initial_key: CHIME_INITIAL_KEY,
            max_radius: MAX_CIRCLE_SIZE,
            quantize: true,
            gain: CHIME_GAIN,
            duration: CHIME_DURATION,
        }
    }
}

/// Simulation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Milliseconds between pipeline passes
    pub tick_interval_ms: u32,

    // === Topology ===
    /// Collide across surface edges (minimum image)
    pub wrap_collisions: bool,
    /// Pick targets across surface edges
    pub wrap_picking: bool,

    // === Gesture ===
    pub basis: BasisMode,
    /// Radius when the pointer is released without dragging
    pub default_circle_size: f32,
    /// Drag speed (pixels) when released without dragging
    pub default_circle_speed: f32,
    pub min_circle_size: f32,
    pub max_circle_size: f32,
    /// Drag pixels per pixel/tick of launch speed
    pub pixels_per_speed: f32,

    // === Cleanup ===
    /// Entities with health strictly below this are removed
    pub removal_threshold: f32,

    // === Audio ===
    pub chime: ChimeSettings,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_interval_ms: TICK_INTERVAL_MS,

            wrap_collisions: true,
            wrap_picking: true,

            basis: BasisMode::TargetRelative,
            default_circle_size: DEFAULT_CIRCLE_SIZE,
            default_circle_speed: DEFAULT_CIRCLE_SPEED,
            min_circle_size: MIN_CIRCLE_SIZE,
            max_circle_size: MAX_CIRCLE_SIZE,
            pixels_per_speed: PIXELS_PER_SPEED,

            removal_threshold: 0.0,

            chime: ChimeSettings::default(),
            muted: false,
        }
    }
}

impl Settings {
    /// Check ranges the simulation relies on
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.tick_interval_ms == 0 {
            return Err(SettingsError::Invalid("tick_interval_ms must be positive".into()));
        }
        if !(self.min_circle_size > 0.0) {
            return Err(SettingsError::Invalid("min_circle_size must be positive".into()));
        }
        if !(self.min_circle_size <= self.default_circle_size
            && self.default_circle_size <= self.max_circle_size)
        {
            return Err(SettingsError::Invalid(format!(
                "circle sizes out of order: min {} default {} max {}",
                self.min_circle_size, self.default_circle_size, self.max_circle_size
            )));
        }
        if !(self.pixels_per_speed > 0.0) {
            return Err(SettingsError::Invalid("pixels_per_speed must be positive".into()));
        }
        if !(self.chime.max_radius > 0.0) {
            return Err(SettingsError::Invalid("chime.max_radius must be positive".into()));
        }
        if !(self.chime.duration > 0.0) {
            return Err(SettingsError::Invalid("chime.duration must be positive".into()));
        }
        Ok(())
    }

    /// Parse and validate settings JSON (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Toggle a setting from a keyboard shortcut.
    ///
    /// `m` mute, `c` chimes, `w` wraparound for collisions and picking,
    /// `b` drag basis. Returns whether anything changed.
    pub fn apply_hotkey(&mut self, key: &str) -> bool {
        match key.to_ascii_lowercase().as_str() {
            "m" => self.muted = !self.muted,
            "c" => self.chime.enabled = !self.chime.enabled,
            "w" => {
                let wrap = !self.wrap_collisions;
                self.wrap_collisions = wrap;
                self.wrap_picking = wrap;
            }
            "b" => {
                self.basis = match self.basis {
                    BasisMode::Fixed => BasisMode::TargetRelative,
                    BasisMode::TargetRelative => BasisMode::Fixed,
                }
            }
            _ => return false,
        }
        true
    }

    /// Effective chime gain (respects mute)
    pub fn effective_gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.chime.gain.clamp(0.0, 1.0)
        }
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn save_to_path(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "wrap_chimes_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = self.to_json() {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Load from the file named by `WRAP_CHIMES_SETTINGS`, else defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(SETTINGS_PATH_VAR) else {
            log::info!("Using default settings");
            return Self::default();
        };
        match Self::load_from_path(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path);
                settings
            }
            Err(e) => {
                log::warn!("{}; using default settings", e);
                Self::default()
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        let Ok(path) = std::env::var(SETTINGS_PATH_VAR) else {
            return;
        };
        if let Err(e) = self.save_to_path(&path) {
            log::warn!("Failed to save settings: {}", e);
        }
    }
}
