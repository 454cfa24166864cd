//! Flight session: one craft, one level, at most one outcome
//!
//! The host drives two callbacks on the same thread:
//! - [`FlightSession::on_frame`] samples the pointer and owns the
//!   Idle -> Aiming -> Boosting edges
//! - [`FlightSession::on_physics_tick`] applies the launch impulse, runs the
//!   gravity integrator and checks for collisions
//!
//! Only the physics tick moves the craft. The launch impulse is guarded by the
//! Boosting -> Coasting transition, so it fires once no matter how many
//! frames or ticks observe the Boosting phase.

use glam::Vec2;

use super::attractor::{Attractor, AttractorRegistry};
use super::collision::{Body, BodyCategory, first_contact};
use super::craft::{Craft, FlightPhase};
use super::gravity;
use super::outcome::{Cue, Outcome, OutcomeKind, Presentation};
use crate::input::{PointerContact, PointerPhase};

/// Things the host should react to (audio, animation, UI)
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// The tutorial overlay was dismissed by a tap
    TutorialDismissed,
    /// The craft was released; play the launch animation and cue
    Launched { facing: f32, cue: Cue },
    /// The flight ended; show the presentation and menu
    Resolved {
        outcome: Outcome,
        presentation: Presentation,
    },
}

/// Everything a session needs, resolved by the host up front
#[derive(Debug, Clone)]
pub struct SessionSetup {
    pub level_index: i32,
    pub craft_start: Vec2,
    pub craft_facing: f32,
    pub craft_radius: f32,
    pub launch_force: f32,
    pub attractors: Vec<Attractor>,
    pub bodies: Vec<Body>,
    pub tutorial_overlay: bool,
}

/// State of a single attempt at a level
#[derive(Debug, Clone)]
pub struct FlightSession {
    level_index: i32,
    craft: Craft,
    registry: AttractorRegistry,
    bodies: Vec<Body>,
    tutorial_overlay: bool,
    launch_force: f32,
    outcome: Option<Outcome>,
    time_ticks: u64,
    events: Vec<SessionEvent>,
}

impl FlightSession {
    pub fn new(setup: SessionSetup) -> Self {
        Self {
            level_index: setup.level_index,
            craft: Craft::new(setup.craft_start, setup.craft_facing, setup.craft_radius),
            registry: AttractorRegistry::snapshot(&setup.attractors),
            bodies: setup.bodies,
            tutorial_overlay: setup.tutorial_overlay,
            launch_force: setup.launch_force,
            outcome: None,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    pub fn level_index(&self) -> i32 {
        self.level_index
    }

    pub fn craft(&self) -> &Craft {
        &self.craft
    }

    pub fn phase(&self) -> FlightPhase {
        self.craft.phase()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn has_tutorial_overlay(&self) -> bool {
        self.tutorial_overlay
    }

    pub fn attractors(&self) -> &AttractorRegistry {
        &self.registry
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Physics ticks run while in flight
    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    /// Take the events emitted since the last call
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Frame callback: react to this frame's pointer contact (world space)
    pub fn on_frame(&mut self, contact: Option<PointerContact>) {
        let Some(contact) = contact else {
            return;
        };

        // Input is only read before launch
        if !matches!(self.craft.phase(), FlightPhase::Idle | FlightPhase::Aiming) {
            return;
        }

        if self.tutorial_overlay {
            if contact.phase == PointerPhase::Ended {
                self.tutorial_overlay = false;
                self.events.push(SessionEvent::TutorialDismissed);
                log::debug!("Tutorial overlay dismissed");
            }
            return;
        }

        if self.craft.phase() == FlightPhase::Idle {
            self.craft.transition(FlightPhase::Aiming);
        }
        self.craft.look_at(contact.position);

        if contact.phase == PointerPhase::Ended && self.craft.transition(FlightPhase::Boosting) {
            log::info!(
                "Level {}: launched at heading {:.3}",
                self.level_index,
                self.craft.facing()
            );
            self.events.push(SessionEvent::Launched {
                facing: self.craft.facing(),
                cue: Cue::Launch,
            });
        }
    }

    /// Physics callback: one fixed step. Returns the outcome if this step
    /// resolved the flight.
    pub fn on_physics_tick(&mut self, dt: f32) -> Option<Outcome> {
        if !self.craft.phase().is_in_flight() {
            return None;
        }
        self.time_ticks += 1;

        if self.craft.phase() == FlightPhase::Boosting
            && self.craft.transition(FlightPhase::Coasting)
        {
            let boost = self.craft.forward() * self.launch_force * dt;
            self.craft.apply_impulse(boost);
        }

        gravity::integrate(&mut self.craft, &self.registry, dt);

        let (body, contact) =
            first_contact(self.craft.position(), self.craft.radius(), &self.bodies)?;
        let category = body.category;
        log::debug!(
            "Level {}: {:?} contact at ({:.2}, {:.2}), depth {:.3}",
            self.level_index,
            category,
            contact.point.x,
            contact.point.y,
            contact.penetration
        );
        self.resolve(category)
    }

    /// Collision reported by the host's own collision engine
    ///
    /// Ignored before launch and after the flight has resolved.
    pub fn on_collision(&mut self, category: BodyCategory) -> Option<Outcome> {
        match self.craft.phase() {
            FlightPhase::Boosting | FlightPhase::Coasting => self.resolve(category),
            FlightPhase::Resolved => {
                log::debug!(
                    "Level {}: ignoring {:?} contact after resolution",
                    self.level_index,
                    category
                );
                None
            }
            FlightPhase::Idle | FlightPhase::Aiming => {
                log::debug!(
                    "Level {}: ignoring {:?} contact before launch",
                    self.level_index,
                    category
                );
                None
            }
        }
    }

    fn resolve(&mut self, category: BodyCategory) -> Option<Outcome> {
        if self.outcome.is_some() {
            return None;
        }

        let kind = OutcomeKind::classify(category);
        self.craft.freeze();

        let outcome = Outcome {
            kind,
            level_index: self.level_index,
        };
        self.outcome = Some(outcome);
        self.events.push(SessionEvent::Resolved {
            outcome,
            presentation: Presentation::for_outcome(kind),
        });
        log::info!(
            "Level {}: flight resolved as {:?} after {} ticks",
            self.level_index,
            kind,
            self.time_ticks
        );
        Some(outcome)
    }
}
