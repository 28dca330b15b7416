//! Tool configuration.
//!
//! Parsed from an optional TOML file; every field has a default so an
//! empty file (or no file) is a valid configuration. The value is passed
//! explicitly to each component.
//!
//! ```toml
//! condor_dir = "C:/Program Files/Condor2/"
//! utm_zone = 33
//!
//! [orientation]
//! neighbor_count = 8
//! proximity_threshold = 100.0
//!
//! [templates]
//! power_tower = "Powertower.c3d"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::{ObjectError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LandscapeConfig {
    /// Simulator install directory containing `Landscapes/`.
    pub condor_dir: PathBuf,
    /// UTM zone used to project surveyed features.
    pub utm_zone: u8,
    /// Tile edge length in meters.
    pub tile_size_m: f64,
    /// Heightmap samples per tile edge.
    pub tile_samples: u32,
    pub orientation: OrientationConfig,
    pub templates: TemplateConfig,
}

impl Default for LandscapeConfig {
    fn default() -> Self {
        Self {
            condor_dir: PathBuf::from(DEFAULT_CONDOR_DIR),
            utm_zone: DEFAULT_UTM_ZONE,
            tile_size_m: DEFAULT_TILE_SIZE_M,
            tile_samples: DEFAULT_TILE_SAMPLES,
            orientation: OrientationConfig::default(),
            templates: TemplateConfig::default(),
        }
    }
}

/// Chain orientation inference parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrientationConfig {
    pub neighbor_count: usize,
    /// Meters.
    pub proximity_threshold: f64,
}

impl Default for OrientationConfig {
    fn default() -> Self {
        Self {
            neighbor_count: DEFAULT_NEIGHBOR_COUNT,
            proximity_threshold: DEFAULT_PROXIMITY_THRESHOLD,
        }
    }
}

/// Object template names assigned to imported features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    pub wind_generator: String,
    pub power_tower: String,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            wind_generator: DEFAULT_WIND_GENERATOR_TEMPLATE.to_string(),
            power_tower: DEFAULT_POWER_TOWER_TEMPLATE.to_string(),
        }
    }
}

impl LandscapeConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| ObjectError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ObjectError::SourceRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=60).contains(&self.utm_zone) {
            return Err(ObjectError::Config(format!(
                "utm_zone {} outside 1..=60",
                self.utm_zone
            )));
        }
        if self.tile_samples == 0 || self.tile_size_m.is_nan() || self.tile_size_m <= 0.0 {
            return Err(ObjectError::Config(
                "tile_samples and tile_size_m must be positive".to_string(),
            ));
        }
        if self.orientation.neighbor_count < MIN_CHAIN_NEIGHBORS {
            return Err(ObjectError::Config(format!(
                "orientation.neighbor_count must be at least {MIN_CHAIN_NEIGHBORS}"
            )));
        }
        Ok(())
    }

    /// Directory holding a landscape's files.
    pub fn landscape_dir(&self, name: &str) -> PathBuf {
        self.condor_dir.join("Landscapes").join(name)
    }

    /// Terrain file of a landscape (`<name>.trn`).
    pub fn trn_path(&self, name: &str) -> PathBuf {
        self.landscape_dir(name).join(format!("{name}.trn"))
    }

    /// Object file of a landscape (`<name>.obj`).
    pub fn obj_path(&self, name: &str) -> PathBuf {
        self.landscape_dir(name).join(format!("{name}.obj"))
    }
}
