//! Collision bodies and overlap tests
//!
//! The craft is a circle. Level bodies are circles (planets, stations) or
//! axis-aligned rectangles (out-of-bounds zones). Every body carries exactly
//! one category, which decides the outcome of touching it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// What touching a body means for the flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyCategory {
    /// Edge of the playfield; the craft is lost
    Boundary,
    /// Planet, asteroid or debris; the craft is destroyed
    Obstacle,
    /// Docking station; the level is complete
    Goal,
}

/// Collision geometry of a level body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    Circle { center: Vec2, radius: f32 },
    Rect { min: Vec2, max: Vec2 },
}

impl Shape {
    /// Closest point of the shape to `point` (the point itself if inside)
    pub fn closest_point(&self, point: Vec2) -> Vec2 {
        match *self {
            Shape::Circle { center, radius } => {
                let offset = point - center;
                if offset.length_squared() <= radius * radius {
                    point
                } else {
                    center + offset.normalize_or_zero() * radius
                }
            }
            Shape::Rect { min, max } => point.clamp(min, max),
        }
    }
}

/// A collidable body handed to the session at construction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub category: BodyCategory,
    pub shape: Shape,
}

impl Body {
    pub fn new(category: BodyCategory, shape: Shape) -> Self {
        Self { category, shape }
    }
}

/// Result of testing the craft against a body
#[derive(Debug, Clone, Copy)]
pub struct CollisionResult {
    /// Whether the craft overlaps the body
    pub hit: bool,
    /// Closest point on the body to the craft centre
    pub point: Vec2,
    /// Overlap depth (0 on a miss)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Test a circle (the craft) against a body
pub fn craft_body_collision(craft_pos: Vec2, craft_radius: f32, body: &Body) -> CollisionResult {
    let closest = body.shape.closest_point(craft_pos);
    let dist = (craft_pos - closest).length();

    if dist <= craft_radius {
        CollisionResult {
            hit: true,
            point: closest,
            penetration: craft_radius - dist,
        }
    } else {
        CollisionResult::miss()
    }
}

/// First body, in declaration order, that the craft overlaps, with the contact
pub fn first_contact<'a>(
    craft_pos: Vec2,
    craft_radius: f32,
    bodies: &'a [Body],
) -> Option<(&'a Body, CollisionResult)> {
    bodies.iter().find_map(|body| {
        let result = craft_body_collision(craft_pos, craft_radius, body);
        result.hit.then_some((body, result))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_contact() {
        let planet = Body::new(
            BodyCategory::Obstacle,
            Shape::Circle {
                center: Vec2::ZERO,
                radius: 2.0,
            },
        );

        let result = craft_body_collision(Vec2::new(2.2, 0.0), 0.25, &planet);
        assert!(result.hit);
        assert!((result.point - Vec2::new(2.0, 0.0)).length() < 1e-6);
        assert!((result.penetration - 0.05).abs() < 1e-5);

        assert!(!craft_body_collision(Vec2::new(3.0, 0.0), 0.25, &planet).hit);
    }

    #[test]
    fn test_rect_contact_inside_and_edge() {
        let zone = Body::new(
            BodyCategory::Boundary,
            Shape::Rect {
                min: Vec2::new(10.0, -10.0),
                max: Vec2::new(20.0, 10.0),
            },
        );

        assert!(craft_body_collision(Vec2::new(15.0, 0.0), 0.25, &zone).hit);
        assert!(craft_body_collision(Vec2::new(9.8, 0.0), 0.25, &zone).hit);
        assert!(!craft_body_collision(Vec2::new(9.0, 0.0), 0.25, &zone).hit);
    }

    #[test]
    fn test_first_contact_uses_declaration_order() {
        let bodies = [
            Body::new(
                BodyCategory::Goal,
                Shape::Circle {
                    center: Vec2::ZERO,
                    radius: 1.0,
                },
            ),
            Body::new(
                BodyCategory::Obstacle,
                Shape::Circle {
                    center: Vec2::new(0.5, 0.0),
                    radius: 1.0,
                },
            ),
        ];
        let (body, contact) = first_contact(Vec2::new(0.2, 0.0), 0.25, &bodies).unwrap();
        assert_eq!(body.category, BodyCategory::Goal);
        // Craft centre is inside the goal, so the contact point is the centre itself
        assert_eq!(contact.point, Vec2::new(0.2, 0.0));
        assert!((contact.penetration - 0.25).abs() < 1e-6);
        assert!(first_contact(Vec2::new(9.0, 9.0), 0.25, &bodies).is_none());
    }
}
