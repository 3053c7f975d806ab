//! Mapper configuration loaded from `.stellar_mapper.json`
//!
//! Every field has a default, so a partial file is valid. CLI flags are
//! applied on top by the binary.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{MapperError, Result, ResultExt};
use crate::core::models::{GenerationParams, InclusionFlags};

/// Default config file name looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = ".stellar_mapper.json";

/// Configuration for a mapping run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapperConfig {
    /// Maximum jump distance in parsecs
    #[serde(default = "default_jump_distance")]
    pub jump_distance: f64,
    #[serde(default)]
    pub include_low_mass: bool,
    #[serde(default)]
    pub include_white_dwarf: bool,
    #[serde(default)]
    pub include_brown_dwarf: bool,
    /// Distance (parsecs) under which two systems are treated as coincident
    #[serde(default = "default_coincidence_tolerance")]
    pub coincidence_tolerance: f64,
}

fn default_jump_distance() -> f64 {
    10.0
}

fn default_coincidence_tolerance() -> f64 {
    mapper_delaunay::DEFAULT_TOLERANCE
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            jump_distance: default_jump_distance(),
            include_low_mass: false,
            include_white_dwarf: false,
            include_brown_dwarf: false,
            coincidence_tolerance: default_coincidence_tolerance(),
        }
    }
}

impl MapperConfig {
    /// Load and validate a config file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(MapperError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = fs::read_to_string(path)?;
        let config: MapperConfig = serde_json::from_str(&content)
            .map_err(MapperError::from)
            .context(format!("parsing {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values no generation run can use
    pub fn validate(&self) -> Result<()> {
        if !self.jump_distance.is_finite() || self.jump_distance <= 0.0 {
            return Err(MapperError::invalid_config(format!(
                "jump_distance must be a positive number of parsecs, got {}",
                self.jump_distance
            )));
        }
        if !self.coincidence_tolerance.is_finite() || self.coincidence_tolerance < 0.0 {
            return Err(MapperError::invalid_config(format!(
                "coincidence_tolerance must be zero or positive, got {}",
                self.coincidence_tolerance
            )));
        }
        Ok(())
    }

    pub fn inclusion(&self) -> InclusionFlags {
        InclusionFlags {
            include_low_mass: self.include_low_mass,
            include_white_dwarf: self.include_white_dwarf,
            include_brown_dwarf: self.include_brown_dwarf,
        }
    }

    pub fn generation_params(&self) -> GenerationParams {
        GenerationParams::new(self.jump_distance).with_inclusion(self.inclusion())
    }
}
