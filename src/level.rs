//! Level definitions and the level catalog
//!
//! Scene indices follow the progression: 0 is the title screen, `1..=n` are
//! the playable levels, and anything past the last level is the completion
//! screen.

use std::f32::consts::FRAC_PI_2;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::FlightConfig;
use crate::error::{Error, Result};
use crate::sim::{Attractor, Body, BodyCategory, SessionSetup, Shape};

/// Catalog compiled into the binary
const BUILTIN_LEVELS: &str = include_str!("../assets/levels.json");

fn default_facing() -> f32 {
    FRAC_PI_2
}

/// One playable level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelDef {
    pub name: String,
    pub craft_start: Vec2,
    /// Initial nose heading (radians); points up by default
    #[serde(default = "default_facing")]
    pub craft_facing: f32,
    /// Tutorial text; its presence blocks aiming until dismissed
    #[serde(default)]
    pub tutorial: Option<String>,
    #[serde(default)]
    pub attractors: Vec<Attractor>,
    pub bodies: Vec<Body>,
}

impl LevelDef {
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| Error::InvalidLevel {
            level: self.name.clone(),
            reason,
        };

        if !self.craft_start.is_finite() {
            return Err(invalid("craft start is not finite".into()));
        }
        for (i, a) in self.attractors.iter().enumerate() {
            if !(a.strength.is_finite() && a.strength > 0.0) {
                return Err(invalid(format!(
                    "attractor {} has non-positive strength {}",
                    i, a.strength
                )));
            }
            if !a.position.is_finite() {
                return Err(invalid(format!("attractor {} position is not finite", i)));
            }
        }
        for (i, body) in self.bodies.iter().enumerate() {
            match body.shape {
                Shape::Circle { radius, .. } if !(radius > 0.0) => {
                    return Err(invalid(format!("body {} has radius {}", i, radius)));
                }
                Shape::Rect { min, max } if min.x > max.x || min.y > max.y => {
                    return Err(invalid(format!("body {} has inverted bounds", i)));
                }
                _ => {}
            }
        }
        if !self
            .bodies
            .iter()
            .any(|b| b.category == BodyCategory::Goal)
        {
            return Err(invalid("no docking target".into()));
        }
        Ok(())
    }

    /// Build a flight session setup for this level
    pub fn session_setup(&self, level_index: i32, config: &FlightConfig) -> SessionSetup {
        SessionSetup {
            level_index,
            craft_start: self.craft_start,
            craft_facing: self.craft_facing,
            craft_radius: config.craft_radius,
            launch_force: config.launch_force,
            attractors: self.attractors.clone(),
            bodies: self.bodies.clone(),
            tutorial_overlay: self.tutorial.is_some(),
        }
    }
}

/// What lives at a scene index
#[derive(Debug, Clone, Copy)]
pub enum Scene<'a> {
    Title,
    Level { index: i32, def: &'a LevelDef },
    Completion,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelCatalog {
    levels: Vec<LevelDef>,
}

impl LevelCatalog {
    pub fn new(levels: Vec<LevelDef>) -> Result<Self> {
        for level in &levels {
            level.validate()?;
        }
        Ok(Self { levels })
    }

    /// The catalog shipped with the game
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_LEVELS)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let catalog: LevelCatalog = serde_json::from_str(json)?;
        Self::new(catalog.levels)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&json)?;
        log::info!("Loaded {} levels from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Load the catalog at `path`, falling back to the built-in one if the
    /// file is missing or invalid
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            match Self::load(path) {
                Ok(catalog) => return Ok(catalog),
                Err(e) => log::warn!("Ignoring level catalog {}: {}", path.display(), e),
            }
        }
        log::info!("Using built-in level catalog");
        Self::builtin()
    }

    pub fn levels(&self) -> &[LevelDef] {
        &self.levels
    }

    /// Number of playable levels
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Scene index of the completion screen
    pub fn completion_index(&self) -> i32 {
        self.levels.len() as i32 + 1
    }

    pub fn scene(&self, index: i32) -> Scene<'_> {
        if index <= 0 {
            return Scene::Title;
        }
        match self.levels.get(index as usize - 1) {
            Some(def) => Scene::Level { index, def },
            None => Scene::Completion,
        }
    }
}
