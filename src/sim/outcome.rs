//! Outcome classification and the end-of-flight menu
//!
//! Every body category maps to exactly one outcome. The two failure outcomes
//! share the same menu; docking swaps the title and the top button label.

use serde::{Deserialize, Serialize};

use super::collision::BodyCategory;

/// How a flight ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutcomeKind {
    OutOfBounds,
    Destroyed,
    Docked,
}

impl OutcomeKind {
    /// Total, mutually exclusive mapping from body category
    pub fn classify(category: BodyCategory) -> Self {
        match category {
            BodyCategory::Boundary => OutcomeKind::OutOfBounds,
            BodyCategory::Obstacle => OutcomeKind::Destroyed,
            BodyCategory::Goal => OutcomeKind::Docked,
        }
    }
}

/// Result of one flight session; created once, never modified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub kind: OutcomeKind,
    pub level_index: i32,
}

/// Action bound to a menu button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Load whatever level the tracker currently points at (retry, or the
    /// next level after a dock)
    LoadCurrentLevel,
    /// Persist progress and leave to the title
    SaveAndQuit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuButton {
    pub label: &'static str,
    pub action: MenuAction,
}

/// The overlay shown once a flight resolves
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuSpec {
    pub title: &'static str,
    pub top: MenuButton,
    pub bottom: MenuButton,
}

impl MenuSpec {
    pub fn for_outcome(kind: OutcomeKind) -> Self {
        let (title, top_label) = match kind {
            OutcomeKind::Docked => ("Success!", "Next Level"),
            OutcomeKind::OutOfBounds | OutcomeKind::Destroyed => ("Ship Lost", "Retry level"),
        };
        Self {
            title,
            top: MenuButton {
                label: top_label,
                action: MenuAction::LoadCurrentLevel,
            },
            bottom: MenuButton {
                label: "Save and Quit",
                action: MenuAction::SaveAndQuit,
            },
        }
    }
}

/// Sound cues the host should play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Launch,
    OutOfBounds,
    Explosion,
    Docked,
}

/// Presentation side effects of a resolved flight
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    pub cue: Cue,
    /// Play the craft's destruction animation
    pub destruction_animation: bool,
    /// Hide the craft and play the docking animation on the goal
    pub docking_animation: bool,
    pub menu: MenuSpec,
}

impl Presentation {
    pub fn for_outcome(kind: OutcomeKind) -> Self {
        let cue = match kind {
            OutcomeKind::OutOfBounds => Cue::OutOfBounds,
            OutcomeKind::Destroyed => Cue::Explosion,
            OutcomeKind::Docked => Cue::Docked,
        };
        Self {
            cue,
            destruction_animation: kind == OutcomeKind::Destroyed,
            docking_animation: kind == OutcomeKind::Docked,
            menu: MenuSpec::for_outcome(kind),
        }
    }
}
