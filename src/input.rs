//! Pointer input boundary
//!
//! The game reads one pointer contact per frame. Extra touches are ignored;
//! only the first contact counts.

use glam::Vec2;

/// Phase of a pointer contact within a gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Began,
    Moved,
    Ended,
}

/// A single pointer contact sampled this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerContact {
    pub position: Vec2,
    pub phase: PointerPhase,
}

impl PointerContact {
    pub fn new(position: Vec2, phase: PointerPhase) -> Self {
        Self { position, phase }
    }

    /// The contact the game reacts to: the first one, if any
    pub fn primary(contacts: &[PointerContact]) -> Option<PointerContact> {
        contacts.first().copied()
    }

    /// Same contact with its position mapped into world space
    pub fn to_world(self, projection: &ScreenProjection) -> Self {
        Self {
            position: projection.screen_to_world(self.position),
            phase: self.phase,
        }
    }
}

/// Orthographic screen-to-world mapping
///
/// Screen space has its origin at the top-left with y growing down; world
/// space is centred on the camera with y growing up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenProjection {
    /// Screen size in pixels
    pub viewport: Vec2,
    /// World position at the centre of the screen
    pub camera_center: Vec2,
    /// World units per pixel
    pub world_per_pixel: f32,
}

impl ScreenProjection {
    pub fn new(viewport: Vec2, camera_center: Vec2, world_per_pixel: f32) -> Self {
        Self {
            viewport,
            camera_center,
            world_per_pixel,
        }
    }

    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        let from_center = screen - self.viewport / 2.0;
        // Negate Y (screen coords are flipped)
        self.camera_center + Vec2::new(from_center.x, -from_center.y) * self.world_per_pixel
    }
}
