use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::geometry::DEFAULT_PICK_RADIUS;
use crate::mask::{MaskStyle, DEFAULT_CIRCLE_SEGMENTS, DEFAULT_DIM_ALPHA};
use crate::wheel::{
    WheelOptions, DEFAULT_GRADIENT_STEPS, DEFAULT_SECTOR_COUNT, DEFAULT_SECTOR_OVERLAP_DEGREES,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConfigPathError {
    MissingHomeDirectory,
}

const APP_DIR: &str = "gamut-mask";
const APP_CONFIG_FILE: &str = "config.json";

pub const DEFAULT_MAX_MASKS: usize = 3;
pub const DEFAULT_VALUE: f64 = 100.0;
pub const DEFAULT_SCALE_MIN: f64 = 0.2;
pub const DEFAULT_SCALE_MAX: f64 = 1.8;

/// Engine settings from `config.json`. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub max_masks: usize,
    pub pick_radius: f64,
    pub sector_count: u32,
    pub gradient_steps: u32,
    pub sector_overlap_degrees: f64,
    pub default_value: f64,
    pub scale_min: f64,
    pub scale_max: f64,
    pub circle_segments: usize,
    pub dim_alpha: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_masks: DEFAULT_MAX_MASKS,
            pick_radius: DEFAULT_PICK_RADIUS,
            sector_count: DEFAULT_SECTOR_COUNT,
            gradient_steps: DEFAULT_GRADIENT_STEPS,
            sector_overlap_degrees: DEFAULT_SECTOR_OVERLAP_DEGREES,
            default_value: DEFAULT_VALUE,
            scale_min: DEFAULT_SCALE_MIN,
            scale_max: DEFAULT_SCALE_MAX,
            circle_segments: DEFAULT_CIRCLE_SEGMENTS,
            dim_alpha: DEFAULT_DIM_ALPHA,
        }
    }
}

impl EngineConfig {
    pub fn wheel_options(&self) -> WheelOptions {
        WheelOptions {
            sector_count: self.sector_count,
            gradient_steps: self.gradient_steps,
            sector_overlap_degrees: self.sector_overlap_degrees,
        }
    }

    pub fn mask_style(&self) -> MaskStyle {
        MaskStyle {
            dim_alpha: self.dim_alpha,
            ..MaskStyle::default()
        }
    }

    /// Slider-side clamp for mask scale; the editor itself accepts any
    /// positive factor.
    pub fn clamp_scale(&self, scale: f64) -> f64 {
        scale.clamp(self.scale_min, self.scale_max.max(self.scale_min))
    }
}

pub fn load_engine_config() -> EngineConfig {
    let (xdg_config_home, home) = config_env_dirs();
    load_engine_config_with(xdg_config_home.as_deref(), home.as_deref())
}

fn load_engine_config_with(xdg_config_home: Option<&Path>, home: Option<&Path>) -> EngineConfig {
    let path = match app_config_path(APP_DIR, APP_CONFIG_FILE, xdg_config_home, home) {
        Ok(p) => p,
        Err(_) => return EngineConfig::default(),
    };
    if !path.exists() {
        return EngineConfig::default();
    }
    match std::fs::read_to_string(&path) {
        Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|err| {
            tracing::warn!(?err, ?path, "failed to parse config.json; using defaults");
            EngineConfig::default()
        }),
        Err(err) => {
            tracing::warn!(?err, ?path, "failed to read config.json; using defaults");
            EngineConfig::default()
        }
    }
}

pub(crate) fn config_env_dirs() -> (Option<PathBuf>, Option<PathBuf>) {
    (
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

pub(crate) fn app_config_path(
    app_dir: &str,
    file_name: &str,
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    let mut path = config_root(xdg_config_home, home)?;
    path.push(app_dir);
    path.push(file_name);
    Ok(path)
}

fn config_root(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    if let Some(xdg) = xdg_config_home.filter(|path| !path.as_os_str().is_empty()) {
        return Ok(xdg.to_path_buf());
    }

    let home = home.ok_or(ConfigPathError::MissingHomeDirectory)?;
    Ok(home.join(".config"))
}
