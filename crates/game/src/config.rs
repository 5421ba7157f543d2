//! Landscape configuration (grid, camera, colours, script). Loaded from
//! `landscape.ron` at startup.

use engine_core::{parse_hex_color, Vec3};
use ripple::{DEFAULT_GRID_COLS, DEFAULT_GRID_ROWS, DEFAULT_GRID_SPACING};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("could not serialise config: {0}")]
    Serialize(#[from] ron::Error),
    #[error("could not write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Something the external UI does at a given frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScriptedEvent {
    /// Press and release at a window pixel.
    Click { frame: u64, x: f32, y: f32 },
    /// Press at `from`, move to `to` over `steps` frames, then release.
    Drag { frame: u64, from: (f32, f32), to: (f32, f32), steps: u64 },
    /// New base particle colour (`#rrggbb`).
    BaseColor { frame: u64, color: String },
    /// New ripple colour (`#rrggbb`).
    RippleColor { frame: u64, color: String },
    /// New ripple strength, 1..=20.
    Strength { frame: u64, value: u32 },
    /// Restart the scene from defaults.
    Reset { frame: u64 },
}

impl ScriptedEvent {
    /// First frame the event touches.
    pub fn frame(&self) -> u64 {
        match self {
            ScriptedEvent::Click { frame, .. }
            | ScriptedEvent::Drag { frame, .. }
            | ScriptedEvent::BaseColor { frame, .. }
            | ScriptedEvent::RippleColor { frame, .. }
            | ScriptedEvent::Strength { frame, .. }
            | ScriptedEvent::Reset { frame } => *frame,
        }
    }
}

/// Landscape settings. Every field has a default, so a partial file works.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LandscapeConfig {
    #[serde(default = "default_grid_rows")]
    pub grid_rows: usize,
    #[serde(default = "default_grid_cols")]
    pub grid_cols: usize,
    #[serde(default = "default_grid_spacing")]
    pub grid_spacing: f32,
    /// Render surface width in pixels.
    #[serde(default = "default_viewport_width")]
    pub viewport_width: u32,
    /// Render surface height in pixels.
    #[serde(default = "default_viewport_height")]
    pub viewport_height: u32,
    #[serde(default = "default_camera_position")]
    pub camera_position: [f32; 3],
    #[serde(default)]
    pub camera_target: [f32; 3],
    /// Vertical field of view in degrees.
    #[serde(default = "default_camera_fov")]
    pub camera_fov: f32,
    /// Initial base particle colour, applied without a transition.
    #[serde(default = "default_base_color")]
    pub base_color: String,
    #[serde(default = "default_ripple_color")]
    pub ripple_color: String,
    #[serde(default = "default_ripple_strength")]
    pub ripple_strength: u32,
    /// World units between wake ripples while dragging.
    #[serde(default = "default_drag_spacing")]
    pub drag_spacing: f32,
    /// UI panels as `[x, y, width, height]`; clicks inside them are ignored.
    #[serde(default = "default_chrome")]
    pub chrome: Vec<[f32; 4]>,
    /// Number of frames to simulate.
    #[serde(default = "default_frames")]
    pub frames: u64,
    /// Seconds per frame.
    #[serde(default = "default_frame_delta")]
    pub frame_delta: f32,
    /// Write a PNG every N frames (0 = never).
    #[serde(default)]
    pub snapshot_every: u64,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Extra clicks at random screen positions, per second.
    #[serde(default)]
    pub random_clicks_per_second: f32,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_events")]
    pub events: Vec<ScriptedEvent>,
}

fn default_grid_rows() -> usize {
    DEFAULT_GRID_ROWS
}
fn default_grid_cols() -> usize {
    DEFAULT_GRID_COLS
}
fn default_grid_spacing() -> f32 {
    DEFAULT_GRID_SPACING
}
fn default_viewport_width() -> u32 {
    1280
}
fn default_viewport_height() -> u32 {
    720
}
fn default_camera_position() -> [f32; 3] {
    [0.0, 20.0, 40.0]
}
fn default_camera_fov() -> f32 {
    50.0
}
fn default_base_color() -> String {
    "#ffffff".to_string()
}
fn default_ripple_color() -> String {
    "#00ffff".to_string()
}
fn default_ripple_strength() -> u32 {
    5
}
fn default_drag_spacing() -> f32 {
    input::DEFAULT_DRAG_SPACING
}
fn default_chrome() -> Vec<[f32; 4]> {
    // colour pickers + strength slider panel, top-left
    vec![[20.0, 20.0, 180.0, 200.0]]
}
fn default_frames() -> u64 {
    600
}
fn default_frame_delta() -> f32 {
    1.0 / 60.0
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("snapshots")
}
fn default_seed() -> u64 {
    0x5eed
}
fn default_events() -> Vec<ScriptedEvent> {
    vec![
        ScriptedEvent::Click { frame: 10, x: 640.0, y: 420.0 },
        ScriptedEvent::Drag { frame: 90, from: (400.0, 500.0), to: (900.0, 450.0), steps: 40 },
        ScriptedEvent::BaseColor { frame: 180, color: "#ff40c0".to_string() },
        ScriptedEvent::Strength { frame: 240, value: 15 },
        ScriptedEvent::Click { frame: 250, x: 520.0, y: 380.0 },
        ScriptedEvent::Click { frame: 262, x: 760.0, y: 380.0 },
        ScriptedEvent::RippleColor { frame: 360, color: "#ffaa00".to_string() },
        ScriptedEvent::Click { frame: 370, x: 640.0, y: 600.0 },
    ]
}

impl Default for LandscapeConfig {
    fn default() -> Self {
        Self {
            grid_rows: default_grid_rows(),
            grid_cols: default_grid_cols(),
            grid_spacing: default_grid_spacing(),
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
            camera_position: default_camera_position(),
            camera_target: [0.0; 3],
            camera_fov: default_camera_fov(),
            base_color: default_base_color(),
            ripple_color: default_ripple_color(),
            ripple_strength: default_ripple_strength(),
            drag_spacing: default_drag_spacing(),
            chrome: default_chrome(),
            frames: default_frames(),
            frame_delta: default_frame_delta(),
            snapshot_every: 0,
            output_dir: default_output_dir(),
            random_clicks_per_second: 0.0,
            seed: default_seed(),
            events: default_events(),
        }
    }
}

impl LandscapeConfig {
    /// Load config from `landscape.ron`. If the file is missing or invalid, returns default config.
    pub fn load() -> Self {
        let path = config_path();
        if !path.exists() {
            log::info!("No config at {:?}, using defaults", path);
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("{}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Load from an explicit path, surfacing any error.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        ron::from_str(&data).map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }

    /// Save current config to `landscape.ron`.
    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let path = config_path();
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let text = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?;
        std::fs::write(path, text).map_err(|source| ConfigError::Write { path: path.to_path_buf(), source })
    }

    pub fn base_color(&self) -> Vec3 {
        color_or(&self.base_color, default_base_color(), "base_color")
    }

    pub fn ripple_color(&self) -> Vec3 {
        color_or(&self.ripple_color, default_ripple_color(), "ripple_color")
    }
}

/// Parse a colour from config, falling back to `fallback` with a warning.
pub fn color_or(text: &str, fallback: String, field: &str) -> Vec3 {
    match parse_hex_color(text) {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Config {field}: {e}, using {fallback}");
            parse_hex_color(&fallback).unwrap_or(Vec3::ONE)
        }
    }
}

fn config_path() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join("landscape.ron")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_fills_defaults() {
        let cfg: LandscapeConfig = ron::from_str("(grid_rows: 10, ripple_strength: 12)").unwrap();
        assert_eq!(cfg.grid_rows, 10);
        assert_eq!(cfg.grid_cols, DEFAULT_GRID_COLS);
        assert_eq!(cfg.ripple_strength, 12);
        assert_eq!(cfg.events, default_events());
    }

    #[test]
    fn events_parse_from_ron() {
        let text = r##"(
            events: [
                Click(frame: 3, x: 10.0, y: 20.0),
                Drag(frame: 5, from: (0.0, 0.0), to: (50.0, 0.0), steps: 4),
                BaseColor(frame: 9, color: "#ff0000"),
                Reset(frame: 12),
            ],
        )"##;
        let cfg: LandscapeConfig = ron::from_str(text).unwrap();
        assert_eq!(cfg.events.len(), 4);
        assert_eq!(cfg.events[1].frame(), 5);
        assert_eq!(cfg.events[3], ScriptedEvent::Reset { frame: 12 });
    }

    #[test]
    fn bad_colour_falls_back() {
        let cfg = LandscapeConfig { ripple_color: "teal".to_string(), ..Default::default() };
        assert_eq!(cfg.ripple_color(), engine_core::CYAN);
        assert_eq!(cfg.base_color(), engine_core::WHITE);
    }

    #[test]
    fn load_from_reports_errors() {
        let missing = LandscapeConfig::load_from("/definitely/not/here.ron");
        assert!(matches!(missing, Err(ConfigError::Io { .. })));

        let path = std::env::temp_dir().join("landscape-config-test-invalid.ron");
        std::fs::write(&path, "(grid_rows: \"many\")").unwrap();
        let invalid = LandscapeConfig::load_from(&path);
        assert!(matches!(invalid, Err(ConfigError::Parse { .. })));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn save_to_writes_and_reports_failures() {
        let path = std::env::temp_dir().join("landscape-config-test-save.ron");
        let cfg = LandscapeConfig { grid_rows: 7, ..Default::default() };
        cfg.save_to(&path).unwrap();
        assert_eq!(LandscapeConfig::load_from(&path).unwrap().grid_rows, 7);
        let _ = std::fs::remove_file(&path);

        let unwritable = std::env::temp_dir().join("landscape-no-such-dir").join("out.ron");
        assert!(matches!(cfg.save_to(&unwritable), Err(ConfigError::Write { .. })));
    }

    #[test]
    fn round_trips_through_ron() {
        let cfg = LandscapeConfig::default();
        let text = ron::ser::to_string_pretty(&cfg, ron::ser::PrettyConfig::default()).unwrap();
        let back: LandscapeConfig = ron::from_str(&text).unwrap();
        assert_eq!(back.events, cfg.events);
        assert_eq!(back.output_dir, cfg.output_dir);
    }
}
