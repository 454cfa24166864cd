//! Attractor registry
//!
//! Gravity sources are fixed point masses. Each carries a single strength
//! (standard gravitational parameter), so G and the body mass never appear
//! separately.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A planetary body pulling on the craft
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Attractor {
    pub position: Vec2,
    /// Pre-combined G * mass, always > 0
    pub strength: f32,
}

impl Attractor {
    pub fn new(position: Vec2, strength: f32) -> Self {
        Self { position, strength }
    }
}

/// Read-only snapshot of the attractors active in a level
///
/// Taken once when the flight session starts; the set cannot change mid-flight.
#[derive(Debug, Clone, Default)]
pub struct AttractorRegistry {
    attractors: Vec<Attractor>,
}

impl AttractorRegistry {
    /// Snapshot the given attractors, in order
    pub fn snapshot(attractors: &[Attractor]) -> Self {
        Self {
            attractors: attractors.to_vec(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attractor> {
        self.attractors.iter()
    }

    pub fn len(&self) -> usize {
        self.attractors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attractors.is_empty()
    }
}
