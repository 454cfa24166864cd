//! Runtime tuning
//!
//! Every field defaults to the matching constant in [`crate::consts`]; a JSON
//! file can override any subset of them.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightConfig {
    /// Fixed physics step (seconds)
    pub physics_dt: f32,
    /// Maximum physics steps per frame
    pub max_substeps: u32,
    /// Force along the facing on the launch tick
    pub launch_force: f32,
    /// Collision radius of the craft
    pub craft_radius: f32,
    /// Minimum play time between ads (seconds)
    pub ad_cooldown_secs: f64,
    /// Override for the per-user data directory
    pub save_dir: Option<PathBuf>,
    /// Level catalog to load instead of the built-in one
    pub levels_path: Option<PathBuf>,
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self {
            physics_dt: SIM_DT,
            max_substeps: MAX_SUBSTEPS,
            launch_force: LAUNCH_FORCE,
            craft_radius: CRAFT_RADIUS,
            ad_cooldown_secs: AD_COOLDOWN_SECS,
            save_dir: None,
            levels_path: None,
        }
    }
}

impl FlightConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.physics_dt > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "physics_dt must be positive, got {}",
                self.physics_dt
            )));
        }
        if self.max_substeps == 0 {
            return Err(Error::InvalidConfig("max_substeps must be at least 1".into()));
        }
        if !(self.launch_force > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "launch_force must be positive, got {}",
                self.launch_force
            )));
        }
        if !(self.craft_radius > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "craft_radius must be positive, got {}",
                self.craft_radius
            )));
        }
        if self.ad_cooldown_secs < 0.0 {
            return Err(Error::InvalidConfig("ad_cooldown_secs must not be negative".into()));
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: FlightConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from a file, falling back to defaults if it is missing or bad
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path.display());
                    return config;
                }
                Err(e) => log::warn!("Ignoring config {}: {}", path.display(), e),
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => log::warn!("Could not read config {}: {}", path.display(), e),
        }

        log::info!("Using default config");
        Self::default()
    }
}
