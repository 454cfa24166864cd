//! Slingshot - a gravity-assist flight puzzle
//!
//! Core modules:
//! - `sim`: Deterministic simulation (gravity, craft state machine, outcome resolution)
//! - `input`: Single-pointer gesture boundary
//! - `level`: Level definitions and the level catalog
//! - `persistence`: Versioned on-disk progress record
//! - `progress`: Progress tracker (current level, saving, level loads)
//! - `services`: Telemetry / ad / scene-loading collaborators
//! - `game`: Session context tying the above together
//! - `config`: Data-driven tuning

pub mod config;
pub mod error;
pub mod game;
pub mod input;
pub mod level;
pub mod persistence;
pub mod progress;
pub mod services;
pub mod sim;

pub use config::FlightConfig;
pub use error::{Error, Result};
pub use game::Game;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (50 Hz physics)
    pub const SIM_DT: f32 = 1.0 / 50.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Force applied along the craft's facing for the single launch tick
    pub const LAUNCH_FORCE: f32 = 250.0;
    /// Collision radius of the craft
    pub const CRAFT_RADIUS: f32 = 0.25;

    /// Minimum play time between two ads (3 minutes)
    pub const AD_COOLDOWN_SECS: f64 = 3.0 * 60.0;

    /// Scene index of the title/splash screen
    pub const TITLE_SCENE: i32 = 0;
    /// First playable level
    pub const FIRST_LEVEL: i32 = 1;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Unit vector for a heading angle (radians, counter-clockwise from +x)
#[inline]
pub fn heading_to_vec(heading: f32) -> Vec2 {
    Vec2::new(heading.cos(), heading.sin())
}

/// Heading angle of a direction vector, `None` for the zero vector
#[inline]
pub fn vec_to_heading(dir: Vec2) -> Option<f32> {
    if dir == Vec2::ZERO {
        None
    } else {
        Some(dir.y.atan2(dir.x))
    }
}
