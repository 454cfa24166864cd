//! Gravity integrator
//!
//! Inverse-square pull from every attractor, integrated with semi-implicit
//! Euler: velocity first, then position with the new velocity. The craft has
//! unit mass, so the summed force is applied directly as acceleration.

use glam::Vec2;

use super::attractor::{Attractor, AttractorRegistry};
use super::craft::Craft;

/// Pull of a single attractor on a point
///
/// Returns zero when the point coincides with the attractor.
#[inline]
pub fn attractor_force(attractor: &Attractor, point: Vec2) -> Vec2 {
    let d = attractor.position - point;
    let r2 = d.length_squared();
    if r2 == 0.0 {
        return Vec2::ZERO;
    }
    attractor.strength * (d / r2.sqrt()) / r2
}

/// Net force from all attractors at a point (superposition)
pub fn net_force(registry: &AttractorRegistry, point: Vec2) -> Vec2 {
    registry
        .iter()
        .fold(Vec2::ZERO, |acc, a| acc + attractor_force(a, point))
}

/// Advance the craft one fixed step under gravity
///
/// No-op unless the craft is in flight. Returns the force that was applied.
pub fn integrate(craft: &mut Craft, registry: &AttractorRegistry, dt: f32) -> Vec2 {
    if !craft.phase().is_in_flight() {
        return Vec2::ZERO;
    }

    let force = net_force(registry, craft.position());
    craft.apply_impulse(force * dt);
    craft.advance(dt);
    craft.align_to_velocity();
    force
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::craft::FlightPhase;
    use proptest::prelude::*;

    fn coasting_craft(position: Vec2) -> Craft {
        let mut craft = Craft::new(position, 0.0, 0.25);
        craft.transition(FlightPhase::Aiming);
        craft.transition(FlightPhase::Boosting);
        craft.transition(FlightPhase::Coasting);
        craft
    }

    #[test]
    fn test_single_attractor_unit_pull() {
        let registry = AttractorRegistry::snapshot(&[Attractor::new(Vec2::ZERO, 100.0)]);
        let mut craft = coasting_craft(Vec2::new(10.0, 0.0));

        let force = integrate(&mut craft, &registry, 0.02);
        assert!((force.x + 1.0).abs() < 1e-6);
        assert!(force.y.abs() < 1e-6);
        assert!((force.length() - 1.0).abs() < 1e-6);

        // Semi-implicit: position moved with the updated velocity
        assert!((craft.velocity().x + 0.02).abs() < 1e-6);
        assert!((craft.position().x - (10.0 - 0.02 * 0.02)).abs() < 1e-6);
    }

    #[test]
    fn test_symmetric_attractors_cancel() {
        let registry = AttractorRegistry::snapshot(&[
            Attractor::new(Vec2::new(-5.0, 0.0), 50.0),
            Attractor::new(Vec2::new(5.0, 0.0), 50.0),
        ]);
        assert!(net_force(&registry, Vec2::ZERO).length() < 1e-6);

        // Off-centre along the axis: the nearer body wins
        let f = net_force(&registry, Vec2::new(1.0, 0.0));
        assert!(f.x > 0.0);
    }

    #[test]
    fn test_coincident_attractor_contributes_nothing() {
        let registry = AttractorRegistry::snapshot(&[
            Attractor::new(Vec2::new(3.0, 4.0), 1000.0),
            Attractor::new(Vec2::new(3.0, 0.0), 16.0),
        ]);
        let f = net_force(&registry, Vec2::new(3.0, 4.0));
        assert!(f.is_finite());
        assert!((f - Vec2::new(0.0, -1.0)).length() < 1e-6);
    }

    #[test]
    fn test_integrate_is_noop_outside_flight() {
        let registry = AttractorRegistry::snapshot(&[Attractor::new(Vec2::ZERO, 100.0)]);
        let mut craft = Craft::new(Vec2::new(10.0, 0.0), 0.4, 0.25);
        assert_eq!(integrate(&mut craft, &registry, 0.02), Vec2::ZERO);
        assert_eq!(craft.position(), Vec2::new(10.0, 0.0));
        assert_eq!(craft.facing(), 0.4);
    }

    #[test]
    fn test_facing_follows_velocity() {
        let registry = AttractorRegistry::snapshot(&[Attractor::new(Vec2::new(0.0, -10.0), 100.0)]);
        let mut craft = coasting_craft(Vec2::ZERO);
        integrate(&mut craft, &registry, 0.02);
        assert!((craft.facing() + std::f32::consts::FRAC_PI_2).abs() < 1e-5);
    }

    proptest! {
        #[test]
        fn prop_net_force_is_sum_of_contributions(
            bodies in prop::collection::vec(((-50.0f32..50.0), (-50.0f32..50.0), (1.0f32..500.0)), 0..6),
            px in -50.0f32..50.0,
            py in -50.0f32..50.0,
        ) {
            let point = Vec2::new(px, py);
            let attractors: Vec<Attractor> = bodies
                .iter()
                .map(|&(x, y, s)| Attractor::new(Vec2::new(x, y), s))
                .filter(|a| a.position.distance(point) > 0.5)
                .collect();
            let registry = AttractorRegistry::snapshot(&attractors);

            let expected = attractors.iter().fold(Vec2::ZERO, |acc, a| {
                let d = a.position - point;
                acc + a.strength * d.normalize() / d.length_squared()
            });
            let got = net_force(&registry, point);
            let tolerance = 1e-3 * expected.length().max(1.0);
            prop_assert!((got - expected).length() <= tolerance);
        }
    }
}
