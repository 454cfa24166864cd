//! Deterministic simulation module
//!
//! All flight logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Stable iteration order (declaration order of attractors and bodies)
//! - No rendering, audio or platform dependencies

pub mod attractor;
pub mod collision;
pub mod craft;
pub mod gravity;
pub mod outcome;
pub mod session;

pub use attractor::{Attractor, AttractorRegistry};
pub use collision::{Body, BodyCategory, CollisionResult, Shape, craft_body_collision, first_contact};
pub use craft::{Craft, FlightPhase};
pub use gravity::{attractor_force, integrate, net_force};
pub use outcome::{Cue, MenuAction, MenuButton, MenuSpec, Outcome, OutcomeKind, Presentation};
pub use session::{FlightSession, SessionEvent, SessionSetup};
