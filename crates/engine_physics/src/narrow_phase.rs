//! Sphere-sphere narrow phase and impulse resolution.

use crate::body::Body;
use crate::config::MassModel;

/// Normals shorter than this are treated as coincident centres.
pub const MIN_NORMAL_LENGTH: f32 = 1e-6;

/// Inverse masses at or below this magnitude count as a mass of zero under
/// [`MassModel::Legacy`].
pub const MASS_EPSILON: f32 = 1e-4;

/// Outcome of resolving one candidate pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The spheres do not touch.
    Separated,
    /// The spheres touch but are already moving apart along the normal.
    Receding,
    /// Centres coincide, or neither body can move. Nothing was changed.
    Degenerate,
    /// Positions and velocities were corrected.
    Resolved,
}

impl Resolution {
    /// Returns `true` if the pair was corrected.
    #[must_use]
    pub fn is_resolved(self) -> bool {
        self == Resolution::Resolved
    }
}

/// The mass [`MassModel::Legacy`] assigns to a body.
#[must_use]
pub fn mass_of(inv_mass: f32) -> f32 {
    if inv_mass.abs() > MASS_EPSILON {
        1.0 / inv_mass
    } else {
        0.0
    }
}

/// The combined inverse-mass term shared by the impulse and the positional
/// correction.
#[must_use]
pub fn combined_inverse_mass(a: &Body, b: &Body, model: MassModel) -> f32 {
    match model {
        MassModel::Legacy => 1.0 / (mass_of(a.inv_mass) + mass_of(b.inv_mass)),
        MassModel::InverseMassWeighted => 1.0 / (a.inv_mass + b.inv_mass),
    }
}

/// Test two bodies as spheres and, if they overlap and approach, push them
/// apart and exchange momentum along the contact normal.
///
/// The normal points from `b` to `a`. The bounce is perfectly elastic;
/// `restitution` is not read.
pub fn resolve(a: &mut Body, b: &mut Body, model: MassModel) -> Resolution {
    let min_dist = a.radius + b.radius;
    let offset = a.position - b.position;
    if offset.length_squared() >= min_dist * min_dist {
        return Resolution::Separated;
    }

    let dist = offset.length();
    if dist < MIN_NORMAL_LENGTH {
        return Resolution::Degenerate;
    }
    let n = offset / dist;

    let i1 = a.velocity.dot(n);
    let i2 = b.velocity.dot(n);
    if i1 > 0.0 && i2 < 0.0 {
        return Resolution::Receding;
    }

    let im = combined_inverse_mass(a, b, model);
    if !im.is_finite() || im <= 0.0 {
        return Resolution::Degenerate;
    }

    let impulse = n * (2.0 * (i2 - i1)) * im;
    let depth = (min_dist - dist) * im;

    a.position += n * depth * a.inv_mass;
    a.velocity += impulse * a.inv_mass;
    b.position -= n * depth * b.inv_mass;
    b.velocity -= impulse * b.inv_mass;

    Resolution::Resolved
}

#[cfg(test)]
mod tests {
    use engine_math::Vec3;

    use super::*;

    const EPS: f32 = 1e-5;

    fn ball(x: f32, vx: f32) -> Body {
        Body::sphere(1.0)
            .with_position(Vec3::new(x, 0.0, 0.0))
            .with_velocity(Vec3::new(vx, 0.0, 0.0))
    }

    #[test]
    fn test_spheres_apart_are_untouched() {
        // Bounds overlap on every axis but the centres are 2.4 apart.
        let mut a = Body::sphere(1.0).with_position(Vec3::new(1.0, 1.0, 1.0) * 0.8);
        let mut b = Body::sphere(1.0).with_position(Vec3::new(-1.0, -1.0, -1.0) * 0.8);
        a.velocity = -Vec3::ONE;
        b.velocity = Vec3::ONE;
        let (before_a, before_b) = (a, b);

        assert_eq!(resolve(&mut a, &mut b, MassModel::Legacy), Resolution::Separated);
        assert_eq!(a, before_a);
        assert_eq!(b, before_b);
    }

    #[test]
    fn test_equal_masses_swap_normal_velocities() {
        let mut a = ball(-0.5, 1.0);
        let mut b = ball(0.5, -1.0);
        let momentum = a.momentum() + b.momentum();

        assert_eq!(resolve(&mut a, &mut b, MassModel::Legacy), Resolution::Resolved);
        assert!((a.velocity.x + 1.0).abs() < EPS);
        assert!((b.velocity.x - 1.0).abs() < EPS);
        assert!((a.momentum() + b.momentum()).abs_diff_eq(momentum, EPS));

        // Each body is pushed back by half the overlap.
        assert!((a.position.x + 1.0).abs() < EPS);
        assert!((b.position.x - 1.0).abs() < EPS);
    }

    #[test]
    fn test_tangential_velocity_is_kept() {
        let mut a = ball(-0.5, 1.0);
        let mut b = ball(0.5, 0.0);
        a.velocity.y = 3.0;

        assert!(resolve(&mut a, &mut b, MassModel::Legacy).is_resolved());
        assert!((a.velocity.y - 3.0).abs() < EPS);
        assert!(a.velocity.x.abs() < EPS);
        assert!((b.velocity.x - 1.0).abs() < EPS);
    }

    #[test]
    fn test_receding_pair_is_skipped() {
        // `a` sits on the +x side and moves further +x, `b` moves -x.
        let mut a = ball(0.5, 1.0);
        let mut b = ball(-0.5, -1.0);
        let (before_a, before_b) = (a, b);

        assert_eq!(resolve(&mut a, &mut b, MassModel::Legacy), Resolution::Receding);
        assert_eq!(a, before_a);
        assert_eq!(b, before_b);
    }

    #[test]
    fn test_coincident_centres_are_skipped() {
        let mut a = ball(0.0, 1.0);
        let mut b = ball(0.0, -1.0);
        assert_eq!(resolve(&mut a, &mut b, MassModel::Legacy), Resolution::Degenerate);
        assert_eq!(a.velocity.x, 1.0);
        assert_eq!(b.velocity.x, -1.0);
    }

    #[test]
    fn test_two_static_bodies_are_skipped() {
        let mut a = ball(-0.5, 0.0).with_inv_mass(0.0);
        let mut b = ball(0.5, 0.0).with_inv_mass(0.0);
        for model in [MassModel::Legacy, MassModel::InverseMassWeighted] {
            assert_eq!(resolve(&mut a, &mut b, model), Resolution::Degenerate);
        }
        assert!(a.position.is_finite() && b.position.is_finite());
    }

    #[test]
    fn test_legacy_model_treats_zero_inverse_mass_as_massless() {
        let mut a = ball(-0.5, 1.0).with_inv_mass(0.5);
        let mut b = ball(0.5, 0.0).with_inv_mass(0.0);

        assert!(resolve(&mut a, &mut b, MassModel::Legacy).is_resolved());
        // im = 1 / (2 + 0), so `a` only loses half its normal velocity.
        assert!((a.velocity.x - 0.5).abs() < EPS);
        assert_eq!(b.velocity.x, 0.0);
        assert_eq!(b.position.x, 0.5);
    }

    #[test]
    fn test_weighted_model_treats_zero_inverse_mass_as_immovable() {
        let mut a = ball(-0.5, 1.0).with_inv_mass(0.5);
        let mut b = ball(0.5, 0.0).with_inv_mass(0.0);

        assert!(resolve(&mut a, &mut b, MassModel::InverseMassWeighted).is_resolved());
        // Bounces off a wall.
        assert!((a.velocity.x + 1.0).abs() < EPS);
        assert!((a.position.x + 1.5).abs() < EPS);
        assert_eq!(b.velocity.x, 0.0);
        assert_eq!(b.position.x, 0.5);
    }

    #[test]
    fn test_models_agree_for_unit_masses() {
        let a = ball(-0.4, 2.0);
        let b = ball(0.4, -0.5);
        assert_eq!(
            combined_inverse_mass(&a, &b, MassModel::Legacy),
            combined_inverse_mass(&a, &b, MassModel::InverseMassWeighted)
        );
    }

    #[test]
    fn test_mass_of() {
        assert_eq!(mass_of(0.5), 2.0);
        assert_eq!(mass_of(0.0), 0.0);
        assert_eq!(mass_of(MASS_EPSILON / 2.0), 0.0);
    }
}
