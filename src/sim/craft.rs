//! The controllable craft and its flight phase

use std::f32::consts::FRAC_PI_2;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::{heading_to_vec, normalize_angle, vec_to_heading};

/// Flight phase of the craft
///
/// Moves forward only: Idle -> Aiming -> Boosting -> Coasting -> Resolved.
/// Boosting may skip straight to Resolved if a collision lands before the
/// launch impulse tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlightPhase {
    /// Stationary at level start, waiting for a pointer contact
    Idle,
    /// Pointer held, craft tracks the pointer
    Aiming,
    /// Released; launch impulse pending for the next physics tick
    Boosting,
    /// Free gravity flight
    Coasting,
    /// Outcome decided; craft frozen
    Resolved,
}

impl FlightPhase {
    /// Whether the gravity integrator runs in this phase
    pub fn is_in_flight(self) -> bool {
        matches!(self, FlightPhase::Boosting | FlightPhase::Coasting)
    }
}

/// The craft being flown
///
/// Motion is only changed through the crate-internal mutators, which refuse
/// to touch a Resolved craft.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Craft {
    position: Vec2,
    velocity: Vec2,
    /// Heading of the nose (radians, counter-clockwise from +x)
    facing: f32,
    radius: f32,
    phase: FlightPhase,
}

impl Craft {
    pub fn new(position: Vec2, facing: f32, radius: f32) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            facing: normalize_angle(facing),
            radius,
            phase: FlightPhase::Idle,
        }
    }

    pub fn phase(&self) -> FlightPhase {
        self.phase
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn facing(&self) -> f32 {
        self.facing
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Unit vector along the nose
    pub fn forward(&self) -> Vec2 {
        heading_to_vec(self.facing)
    }

    /// Sprite rotation about z for a sprite whose local up is the nose
    pub fn rotation_z(&self) -> f32 {
        normalize_angle(self.facing - FRAC_PI_2)
    }

    /// Point the nose at a world position; keeps the current facing if the
    /// target sits exactly on the craft
    pub(crate) fn look_at(&mut self, target: Vec2) {
        if self.phase == FlightPhase::Resolved {
            return;
        }
        if let Some(heading) = vec_to_heading(target - self.position) {
            self.facing = heading;
        }
    }

    /// Align the nose with the velocity; zero speed keeps the last facing
    pub(crate) fn align_to_velocity(&mut self) {
        if self.phase != FlightPhase::Resolved && self.velocity.length() > 0.0 {
            if let Some(heading) = vec_to_heading(self.velocity) {
                self.facing = heading;
            }
        }
    }

    /// Add a velocity change; refused unless in flight
    pub(crate) fn apply_impulse(&mut self, delta_v: Vec2) -> bool {
        if !self.phase.is_in_flight() {
            return false;
        }
        self.velocity += delta_v;
        true
    }

    /// Move along the current velocity; refused unless in flight
    pub(crate) fn advance(&mut self, dt: f32) -> bool {
        if !self.phase.is_in_flight() {
            return false;
        }
        self.position += self.velocity * dt;
        true
    }

    /// Advance the phase. Backward edges and edges out of Resolved are refused.
    pub(crate) fn transition(&mut self, next: FlightPhase) -> bool {
        use FlightPhase::*;
        let allowed = matches!(
            (self.phase, next),
            (Idle, Aiming)
                | (Aiming, Boosting)
                | (Boosting, Coasting)
                | (Boosting, Resolved)
                | (Coasting, Resolved)
        );
        if allowed {
            self.phase = next;
        } else {
            log::debug!("Refused craft transition {:?} -> {:?}", self.phase, next);
        }
        allowed
    }

    /// Stop all motion and lock the craft in Resolved
    pub(crate) fn freeze(&mut self) {
        self.velocity = Vec2::ZERO;
        self.phase = FlightPhase::Resolved;
    }
}
