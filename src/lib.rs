//! Wrap Chimes - drag-to-launch circles on a wrapping canvas
//!
//! Core modules:
//! - `sim`: Entity registry, components, gesture interpreter and the fixed system pipeline
//! - `renderer`: Render sink trait, draw command recording, Canvas 2D backend
//! - `audio`: Collision chimes (radius to pitch) and audio sinks
//! - `settings`: Data-driven configuration

pub mod audio;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{BasisMode, ChimeSettings, Settings, SettingsError};

/// Simulation configuration constants
pub mod consts {
    /// Timer interval between pipeline passes (~60 Hz)
    pub const TICK_INTERVAL_MS: u32 = 17;

    /// Guard for divisions by a distance or by a squared basis length
    pub const MIN_DISTANCE: f32 = 1e-4;

    /// Health given to every assembled entity
    pub const SPAWN_HEALTH: f32 = 1.0;

    /// Gesture defaults (pixels)
    pub const DEFAULT_CIRCLE_SIZE: f32 = 10.0;
    pub const DEFAULT_CIRCLE_SPEED: f32 = 20.0;
    pub const MIN_CIRCLE_SIZE: f32 = 2.0;
    pub const MAX_CIRCLE_SIZE: f32 = 100.0;
    /// Drag pixels per unit of launch speed (pixels/tick)
    pub const PIXELS_PER_SPEED: f32 = 20.0;

    /// Chime keyboard: key 49 is A4 (440 Hz)
    pub const CHIME_NUM_KEYS: f32 = 48.0;
    pub const CHIME_INITIAL_KEY: f32 = 16.0;
    pub const CHIME_GAIN: f32 = 0.2;
    /// Tone length in seconds
    pub const CHIME_DURATION: f32 = 0.2;
}
