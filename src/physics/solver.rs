//! Collision resolution: velocity updates for one side of a detected contact.
//!
//! Each function resolves body `a` against body `b` and returns `a`'s new
//! velocity. Callers resolve the other side with the contact data swapped.

use crate::math::{Direction, Position, Velocity};

use super::body::Body;
use super::contact::BodyCollision;
use super::shape::{Segment, Triangle};

/// Contact points closer than this to a segment endpoint count as corner hits.
const CORNER_EPSILON: f64 = 1e-9;

/// Mass-weighted elastic exchange along the line between sphere centers.
///
/// Only the normal component of `a`'s velocity changes.
pub fn sphere_bounce_of_sphere(
    a: &Body,
    a_offset: Position,
    b: &Body,
    b_offset: Position,
) -> Velocity {
    let total_mass = a.mass + b.mass;
    if total_mass.value() <= 0.0 {
        return a.velocity;
    }
    let normal = ((b.position + b_offset) - (a.position + a_offset)).normalize();
    let approach_a = a.velocity.dot(normal);
    let approach_b = b.velocity.dot(normal);
    let share = (b.mass / total_mass).value();
    a.velocity - normal * ((approach_a - approach_b) * (2.0 * share))
}

/// Reflect `a` off the plane of a static triangle.
pub fn sphere_bounce_of_static_triangle(a: &Body, b: &Body, triangle: &Triangle) -> Velocity {
    let normal = triangle.normal().normalize();
    reflect(a.velocity, normal, restitution(a, b))
}

/// Reflect `a` off a static segment on the XZ plane.
///
/// Hits on an endpoint are a fully elastic bounce along the center-to-corner
/// normal; elasticity only scales reflections off the span. `collision` must
/// be seen from `a`: its second contact point is relative to `b`'s origin.
pub fn circle_bounce_of_static_segment(
    a: &Body,
    a_offset: Position,
    b: &Body,
    b_offset: Position,
    segment: &Segment,
    collision: &BodyCollision,
) -> Velocity {
    let touch = collision.contact_points[1];
    let on_corner = [segment.point_a, segment.point_b]
        .into_iter()
        .any(|endpoint| touch.xz().abs_diff_eq((b_offset + endpoint).xz(), CORNER_EPSILON));

    if on_corner {
        let corner = (b.position + touch).xz();
        let center = (a.position + a_offset).xz();
        let normal = Direction::from_xz(corner - center, 0.0).normalize();
        return reflect(a.velocity, normal, 2.0);
    }
    reflect(a.velocity, segment.normal_xz().normalize(), restitution(a, b))
}

/// Velocity after removing `restitution` times its component along `normal`.
///
/// A restitution of 2 mirrors the velocity, 1 cancels the normal part.
#[inline]
pub fn reflect(velocity: Velocity, normal: Direction, restitution: f64) -> Velocity {
    velocity - normal * (velocity.dot(normal) * restitution)
}

/// `1 + e_a * e_b`: full reflection for perfectly elastic pairs, no bounce at
/// zero elasticity.
#[inline]
fn restitution(a: &Body, b: &Body) -> f64 {
    1.0 + (a.elasticity * b.elasticity).value()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{kilograms, meters, ratio, seconds};
    use crate::physics::body::BodyPart;
    use crate::physics::shape::Shape;

    fn sphere(position: Position, velocity: Velocity) -> Body {
        Body::sphere(position, meters(0.5)).with_velocity(velocity)
    }

    fn bounce_pair(a: &Body, b: &Body) -> (Velocity, Velocity) {
        (
            sphere_bounce_of_sphere(a, Position::ZERO, b, Position::ZERO),
            sphere_bounce_of_sphere(b, Position::ZERO, a, Position::ZERO),
        )
    }

    fn segment_contact(touch: Position) -> BodyCollision {
        BodyCollision {
            time_to_impact: seconds(0.0),
            contact_points: [Position::ZERO, touch],
            between_body_parts: [0, 0],
        }
    }

    fn wall(position: Position, point_b: Position) -> (Body, Segment) {
        let segment = Segment {
            point_a: Position::ZERO,
            point_b,
        };
        let body = Body::new(position, BodyPart::new(Shape::Segment(segment)));
        (body, segment)
    }

    #[test]
    fn test_head_on_spheres_exchange_velocities() {
        let a = sphere(Position::ZERO, Velocity::new(1.0, 0.0, 0.0));
        let b = sphere(Position::new(1.0, 0.0, 0.0), Velocity::new(-1.0, 0.0, 0.0));
        let (va, vb) = bounce_pair(&a, &b);
        assert_eq!(va, b.velocity);
        assert_eq!(vb, a.velocity);
    }

    #[test]
    fn test_moving_sphere_stops_against_resting_one() {
        let a = sphere(Position::ZERO, Velocity::new(1.0, 0.0, 0.0));
        let b = sphere(Position::new(1.0, 0.0, 0.0), Velocity::ZERO);
        let (va, vb) = bounce_pair(&a, &b);
        assert_eq!(va, Velocity::ZERO);
        assert_eq!(vb, Velocity::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_oblique_bounce_keeps_tangent() {
        let a = sphere(Position::ZERO, Velocity::new(1.0, 1.0, 0.0));
        let b = sphere(Position::new(1.0, 0.0, 0.0), Velocity::ZERO);
        let (va, vb) = bounce_pair(&a, &b);
        assert_eq!(va, Velocity::new(0.0, 1.0, 0.0));
        assert_eq!(vb, Velocity::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_heavier_sphere_keeps_moving() {
        let a = sphere(Position::ZERO, Velocity::new(1.0, 0.0, 0.0)).with_mass(kilograms(3.0));
        let b = sphere(Position::new(1.0, 0.0, 0.0), Velocity::ZERO);
        let (va, vb) = bounce_pair(&a, &b);
        assert!(va.abs_diff_eq(Velocity::new(0.5, 0.0, 0.0), 1e-12));
        assert!(vb.abs_diff_eq(Velocity::new(1.5, 0.0, 0.0), 1e-12));
        let before = 3.0 * 1.0;
        let after = 3.0 * va.x() + vb.x();
        assert!((before - after).abs() < 1e-12);
    }

    #[test]
    fn test_sphere_bounces_off_triangle() {
        let triangle = Triangle {
            p1: Position::ZERO,
            p2: Position::new(0.0, 0.0, 4.0),
            p3: Position::new(3.0, 0.0, 0.0),
        };
        let floor = Body::new(Position::ZERO, BodyPart::new(Shape::Triangle(triangle)));

        let falling = sphere(Position::new(1.0, 0.5, 1.0), Velocity::new(0.0, -1.0, 0.0));
        assert_eq!(
            sphere_bounce_of_static_triangle(&falling, &floor, &triangle),
            Velocity::new(0.0, 1.0, 0.0)
        );

        let diagonal = sphere(Position::new(1.0, 0.5, 1.0), Velocity::new(1.0, -1.0, 1.0));
        assert_eq!(
            sphere_bounce_of_static_triangle(&diagonal, &floor, &triangle),
            Velocity::new(1.0, 1.0, 1.0)
        );
    }

    #[test]
    fn test_inelastic_triangle_absorbs_normal_velocity() {
        let triangle = Triangle {
            p1: Position::ZERO,
            p2: Position::new(0.0, 0.0, 4.0),
            p3: Position::new(3.0, 0.0, 0.0),
        };
        let floor = Body::new(Position::ZERO, BodyPart::new(Shape::Triangle(triangle)))
            .with_elasticity(ratio(0.0));
        let ball = sphere(Position::new(1.0, 0.5, 1.0), Velocity::new(1.0, -1.0, 0.0));
        let resolved = sphere_bounce_of_static_triangle(&ball, &floor, &triangle);
        assert!(resolved.abs_diff_eq(Velocity::new(1.0, 0.0, 0.0), 1e-12));
    }

    #[test]
    fn test_circle_bounces_off_segment_span() {
        let (body, segment) = wall(Position::new(-1.0, 0.0, 0.0), Position::new(2.0, 0.0, 0.0));
        let circle = sphere(Position::new(0.0, 0.0, 1.0), Velocity::new(1.0, 0.0, -1.0));
        let resolved = circle_bounce_of_static_segment(
            &circle,
            Position::ZERO,
            &body,
            Position::ZERO,
            &segment,
            &segment_contact(Position::new(1.0, 0.0, 0.0)),
        );
        assert_eq!(resolved, Velocity::new(1.0, 0.0, 1.0));
    }

    #[test]
    fn test_circle_bounces_off_long_segment() {
        let (body, segment) = wall(Position::ZERO, Position::new(20.0, 0.0, 0.0));
        let circle = sphere(Position::new(10.0, 0.0, 1.0), Velocity::new(-1.0, 0.0, -1.0));
        let resolved = circle_bounce_of_static_segment(
            &circle,
            Position::ZERO,
            &body,
            Position::ZERO,
            &segment,
            &segment_contact(Position::new(10.0, 0.0, 0.0)),
        );
        assert_eq!(resolved, Velocity::new(-1.0, 0.0, 1.0));
    }

    #[test]
    fn test_circle_bounces_off_segment_from_below() {
        let (body, segment) = wall(Position::new(1.0, 0.0, 0.0), Position::new(-2.0, 0.0, 0.0));
        let circle = sphere(Position::new(0.0, 0.0, -1.0), Velocity::new(0.0, 0.0, 1.0));
        let resolved = circle_bounce_of_static_segment(
            &circle,
            Position::ZERO,
            &body,
            Position::ZERO,
            &segment,
            &segment_contact(Position::new(-1.0, 0.0, 0.0)),
        );
        assert_eq!(resolved, Velocity::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_corner_hit_uses_point_normal() {
        // Circle approaches the corner at 45 degrees along the segment's axis.
        let (body, segment) = wall(Position::ZERO, Position::new(-2.0, 0.0, 0.0));
        let circle = sphere(
            Position::new(0.5_f64.sqrt() / 2.0, 0.0, 0.5_f64.sqrt() / 2.0),
            Velocity::new(-1.0, 0.0, 0.0),
        );
        let resolved = circle_bounce_of_static_segment(
            &circle,
            Position::ZERO,
            &body,
            Position::ZERO,
            &segment,
            &segment_contact(Position::ZERO),
        );
        // Line normal would flip z; the corner normal deflects along +z.
        assert!(resolved.abs_diff_eq(Velocity::new(0.0, 0.0, 1.0), 1e-12));
    }

    #[test]
    fn test_corner_hit_ignores_elasticity() {
        let (body, segment) = wall(Position::ZERO, Position::new(-2.0, 0.0, 0.0));
        let body = body.with_elasticity(ratio(0.9));
        let circle = sphere(
            Position::new(0.5_f64.sqrt() / 2.0, 0.0, 0.5_f64.sqrt() / 2.0),
            Velocity::new(-1.0, 0.0, 0.0),
        )
        .with_elasticity(ratio(0.5));
        let resolved = circle_bounce_of_static_segment(
            &circle,
            Position::ZERO,
            &body,
            Position::ZERO,
            &segment,
            &segment_contact(Position::ZERO),
        );
        assert!(resolved.abs_diff_eq(Velocity::new(0.0, 0.0, 1.0), 1e-12));
    }

    #[test]
    fn test_reflect_restitution_scale() {
        let normal = Direction::new(0.0, 0.0, 1.0);
        let velocity = Velocity::new(2.0, 0.0, -3.0);
        assert_eq!(reflect(velocity, normal, 2.0), Velocity::new(2.0, 0.0, 3.0));
        assert_eq!(reflect(velocity, normal, 1.0), Velocity::new(2.0, 0.0, 0.0));
    }
}
