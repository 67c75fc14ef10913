//! Narrowphase collision detection: swept tests between body parts.
//!
//! Every test runs in the frame of the second body: its velocity is
//! subtracted from the first body's, so the second part is stationary and
//! only the first one sweeps. Circle-vs-segment tests live on the XZ plane;
//! heights are ignored there.

use glam::DVec2;

use crate::error::{PhysicsError, PhysicsResult};
use crate::math::{meters, Direction, Length, Position, Time, Velocity};

use super::body::{Body, BodyPart};
use super::contact::{BodyCollision, CollisionData};
use super::shape::{Segment, Shape, Sphere, Triangle};

/// Slack used by the bounding-box checks on the XZ plane.
const BOUNDS_EPSILON: f64 = 1e-9;
/// Below this the movement line and the segment line count as parallel.
const PARALLEL_EPSILON: f64 = 1e-12;

/// A shape placed on its body.
#[derive(Debug, Clone, Copy)]
pub struct PlacedPart<'a, S> {
    pub body: &'a Body,
    pub offset: Position,
    pub shape: S,
}

impl<'a, S> PlacedPart<'a, S> {
    pub fn new(body: &'a Body, part: &BodyPart, shape: S) -> Self {
        Self {
            body,
            offset: part.relative_position,
            shape,
        }
    }

    /// World-space origin of the part.
    pub fn origin(&self) -> Position {
        self.body.position + self.offset
    }
}

/// Earliest contact between any part of `body_a` and any part of `body_b`
/// within `duration`.
///
/// Ties keep the first part pair in iteration order. Fails only when two part
/// shapes have no swept test.
pub fn collision_between_bodies(
    body_a: &Body,
    body_b: &Body,
    duration: Time,
) -> PhysicsResult<Option<BodyCollision>> {
    let mut earliest: Option<BodyCollision> = None;

    for (i, part_a) in body_a.parts().iter().enumerate() {
        for (k, part_b) in body_b.parts().iter().enumerate() {
            let Some(data) = collision_between_parts(body_a, part_a, body_b, part_b, duration)?
            else {
                continue;
            };
            let candidate = BodyCollision::new(data, [i, k]);
            match earliest {
                Some(current) if current.time_to_impact <= candidate.time_to_impact => {}
                _ => earliest = Some(candidate),
            }
        }
    }

    Ok(earliest)
}

/// Dispatch a single part pair to its swept test.
pub fn collision_between_parts(
    body_a: &Body,
    part_a: &BodyPart,
    body_b: &Body,
    part_b: &BodyPart,
    duration: Time,
) -> PhysicsResult<Option<CollisionData>> {
    let data = match (part_a.shape, part_b.shape) {
        (Shape::Sphere(a), Shape::Sphere(b)) => sphere_vs_sphere(
            PlacedPart::new(body_a, part_a, a),
            PlacedPart::new(body_b, part_b, b),
            duration,
        ),
        (Shape::Sphere(a), Shape::Segment(b)) => circle_vs_segment(
            PlacedPart::new(body_a, part_a, a),
            PlacedPart::new(body_b, part_b, b),
            duration,
        ),
        (Shape::Segment(a), Shape::Sphere(b)) => segment_vs_circle(
            PlacedPart::new(body_a, part_a, a),
            PlacedPart::new(body_b, part_b, b),
            duration,
        ),
        (Shape::Sphere(a), Shape::Triangle(b)) => sphere_vs_triangle(
            PlacedPart::new(body_a, part_a, a),
            PlacedPart::new(body_b, part_b, b),
            duration,
        ),
        (Shape::Triangle(a), Shape::Sphere(b)) => triangle_vs_sphere(
            PlacedPart::new(body_a, part_a, a),
            PlacedPart::new(body_b, part_b, b),
            duration,
        ),
        (first, second) => {
            return Err(PhysicsError::UnsupportedShapePair {
                first: first.kind(),
                second: second.kind(),
            })
        }
    };
    Ok(data)
}

/// Velocity of `a` with `b` considered stationary.
#[inline]
fn relative_velocity(a: &Body, b: &Body) -> Velocity {
    a.velocity - b.velocity
}

/// Swept sphere against sphere ("pool hall" closest-approach test).
pub fn sphere_vs_sphere(
    a: PlacedPart<'_, Sphere>,
    b: PlacedPart<'_, Sphere>,
    duration: Time,
) -> Option<CollisionData> {
    let velocity = relative_velocity(a.body, b.body);
    let center_a = a.origin();
    let center_b = b.origin();
    let time_to_impact = time_until_touch(
        center_a,
        a.shape.radius + b.shape.radius,
        velocity,
        center_b,
        duration,
    )?;

    let normal = (center_b - (center_a + velocity * time_to_impact)).normalize();
    Some(CollisionData {
        time_to_impact,
        contact_points: [
            a.offset + normal * a.shape.radius,
            b.offset - normal * b.shape.radius,
        ],
    })
}

/// Time until a point sweeping along `velocity` first comes within
/// `radius_sum` of the stationary `target`, if that happens within
/// `duration`.
fn time_until_touch(
    center: Position,
    radius_sum: Length,
    velocity: Velocity,
    target: Position,
    duration: Time,
) -> Option<Time> {
    if velocity.is_zero() || duration.value() <= 0.0 {
        return None;
    }

    let towards = target - center;
    let gap = towards.magnitude() - radius_sum;
    let translation: Position = velocity * duration;
    if !(gap.value() * gap.value() < translation.magnitude_squared()) {
        return None;
    }

    let closing: Length = translation.normalize().dot(towards);
    if closing.value() <= 0.0 {
        return None;
    }

    let radius_sum_squared = radius_sum.squared().value();
    let closest_squared = towards.magnitude_squared() - closing.value() * closing.value();
    if closest_squared >= radius_sum_squared {
        return None;
    }

    let distance_till_touch = closing - meters((radius_sum_squared - closest_squared).sqrt());
    let travel = translation.magnitude();
    if travel < distance_till_touch {
        return None;
    }

    let share = (distance_till_touch / travel).value().max(0.0);
    Some(duration * share)
}

/// Swept circle against a stationary segment on the XZ plane.
pub fn circle_vs_segment(
    a: PlacedPart<'_, Sphere>,
    b: PlacedPart<'_, Segment>,
    duration: Time,
) -> Option<CollisionData> {
    let velocity = relative_velocity(a.body, b.body);
    let planar_velocity = velocity.xz();
    if planar_velocity == DVec2::ZERO || duration.value() <= 0.0 {
        return None;
    }

    let radius = a.shape.radius.value();
    let segment_origin = b.origin();
    let pa = (segment_origin + b.shape.point_a).xz();
    let pb = (segment_origin + b.shape.point_b).xz();
    if pa.distance_squared(pb) <= BOUNDS_EPSILON * BOUNDS_EPSILON {
        return None;
    }

    let circle = Circle {
        center: a.origin().xz(),
        offset: a.offset,
        radius: a.shape.radius,
        velocity: planar_velocity,
        anchor: b.body.position.xz(),
    };
    let v = planar_velocity * duration.value();
    let c = circle.center;
    let c2 = c + v;
    let d = closest_point_on_line(pa, pb, c);

    let Some(i) = lines_intersection(c, c2, pa, pb) else {
        return circle.against_corner(nearest_point(pa, pb, c), duration);
    };

    let length_cd = c.distance(d);
    if length_cd <= BOUNDS_EPSILON {
        return circle.against_corner(nearest_point(pa, pb, c), duration);
    }
    if (d - c).dot(v) <= 0.0 {
        // Receding from the line: only the endpoints can still be reached.
        return earliest(
            circle.against_corner(pa, duration),
            circle.against_corner(pb, duration),
        );
    }

    let within_radius = |p: DVec2, q: DVec2| p.distance(q) < radius;
    let reachable = (within_bounds(pa, pb, i) && within_bounds(c, c2, i))
        || closest_point_on_segment(pa, pb, c2).is_some_and(|p| within_radius(p, c2))
        || closest_point_on_segment(c, c2, pa).is_some_and(|p| within_radius(p, pa))
        || closest_point_on_segment(c, c2, pb).is_some_and(|p| within_radius(p, pb))
        || within_radius(nearest_point(pa, pb, c2), c2);
    if !reachable {
        return None;
    }

    let length_ci = c.distance(i);
    let overshoot = length_ci / length_cd * radius;
    let length_cp = (length_ci - overshoot).max(0.0);
    if v.length() < length_cp {
        return None;
    }

    let p = c + v.normalize() * length_cp;
    let e = closest_point_on_line(pa, pb, p);
    if !within_bounds(pa, pb, e) {
        return circle.against_corner(nearest_point(pa, pb, e), duration);
    }

    Some(CollisionData {
        time_to_impact: Time::new(length_cp / planar_velocity.length()),
        contact_points: [
            circle.offset + Position::from_xz(e - p, 0.0),
            Position::from_xz(e - circle.anchor, 0.0),
        ],
    })
}

/// [`circle_vs_segment`] with the sides swapped.
pub fn segment_vs_circle(
    a: PlacedPart<'_, Segment>,
    b: PlacedPart<'_, Sphere>,
    duration: Time,
) -> Option<CollisionData> {
    circle_vs_segment(b, a, duration).map(CollisionData::swapped)
}

/// Swept sphere against the face of a stationary triangle.
pub fn sphere_vs_triangle(
    a: PlacedPart<'_, Sphere>,
    b: PlacedPart<'_, Triangle>,
    duration: Time,
) -> Option<CollisionData> {
    let velocity = relative_velocity(a.body, b.body);
    if velocity.is_zero() || duration.value() <= 0.0 {
        return None;
    }

    let triangle_origin = b.origin();
    let p1 = triangle_origin + b.shape.p1;
    let p2 = triangle_origin + b.shape.p2;
    let p3 = triangle_origin + b.shape.p3;
    let normal: Direction = b.shape.normal().normalize();
    if normal.is_zero() {
        return None;
    }

    let translation: Position = velocity * duration;
    if translation.normalize().dot(-normal).value() <= 0.0 {
        return None;
    }

    // Point of the sphere that meets the plane first.
    let leading_offset = -(normal * a.shape.radius);
    let leading = a.origin() + leading_offset;
    let fraction = (normal.dot(p1 - leading) / normal.dot(translation)).value();
    if !(0.0..1.0).contains(&fraction) {
        return None;
    }

    let crossing = leading + translation * fraction;
    if !inside_triangle(p1, p2, p3, crossing) {
        return None;
    }

    Some(CollisionData {
        time_to_impact: duration * fraction,
        contact_points: [a.offset + leading_offset, crossing - b.body.position],
    })
}

/// [`sphere_vs_triangle`] with the sides swapped.
pub fn triangle_vs_sphere(
    a: PlacedPart<'_, Triangle>,
    b: PlacedPart<'_, Sphere>,
    duration: Time,
) -> Option<CollisionData> {
    sphere_vs_triangle(b, a, duration).map(CollisionData::swapped)
}

/// Moving circle flattened onto the XZ plane.
struct Circle {
    center: DVec2,
    offset: Position,
    radius: Length,
    velocity: DVec2,
    /// XZ position of the segment's body origin.
    anchor: DVec2,
}

impl Circle {
    /// Circle against a single segment endpoint.
    fn against_corner(&self, corner: DVec2, duration: Time) -> Option<CollisionData> {
        let center = Position::from_xz(self.center, 0.0);
        let corner_position = Position::from_xz(corner, 0.0);
        let velocity = Velocity::from_xz(self.velocity, 0.0);
        let time_to_impact =
            time_until_touch(center, self.radius, velocity, corner_position, duration)?;

        let normal = (corner_position - (center + velocity * time_to_impact)).normalize();
        Some(CollisionData {
            time_to_impact,
            contact_points: [
                self.offset + normal * self.radius,
                Position::from_xz(corner - self.anchor, 0.0),
            ],
        })
    }
}

fn earliest(a: Option<CollisionData>, b: Option<CollisionData>) -> Option<CollisionData> {
    match (a, b) {
        (Some(a), Some(b)) if b.time_to_impact < a.time_to_impact => Some(b),
        (Some(a), _) => Some(a),
        (None, b) => b,
    }
}

fn within_bounds(p1: DVec2, p2: DVec2, point: DVec2) -> bool {
    let min = p1.min(p2) - DVec2::splat(BOUNDS_EPSILON);
    let max = p1.max(p2) + DVec2::splat(BOUNDS_EPSILON);
    point.cmpge(min).all() && point.cmple(max).all()
}

fn nearest_point(p1: DVec2, p2: DVec2, to: DVec2) -> DVec2 {
    if p1.distance_squared(to) <= p2.distance_squared(to) {
        p1
    } else {
        p2
    }
}

/// Intersection of the infinite lines through `p1 p2` and `q1 q2`.
fn lines_intersection(p1: DVec2, p2: DVec2, q1: DVec2, q2: DVec2) -> Option<DVec2> {
    let a1 = p2.y - p1.y;
    let b1 = p1.x - p2.x;
    let c1 = a1 * p1.x + b1 * p1.y;
    let a2 = q2.y - q1.y;
    let b2 = q1.x - q2.x;
    let c2 = a2 * q1.x + b2 * q1.y;

    let det = a1 * b2 - a2 * b1;
    if det.abs() < PARALLEL_EPSILON {
        return None;
    }
    Some(DVec2::new(
        (b2 * c1 - b1 * c2) / det,
        (a1 * c2 - a2 * c1) / det,
    ))
}

/// Foot of the perpendicular from `point` onto the line through `p1 p2`.
fn closest_point_on_line(p1: DVec2, p2: DVec2, point: DVec2) -> DVec2 {
    let along = p2 - p1;
    let length_squared = along.length_squared();
    if length_squared == 0.0 {
        return point;
    }
    p1 + along * ((point - p1).dot(along) / length_squared)
}

fn closest_point_on_segment(p1: DVec2, p2: DVec2, point: DVec2) -> Option<DVec2> {
    let foot = closest_point_on_line(p1, p2, point);
    within_bounds(p1, p2, foot).then_some(foot)
}

/// Barycentric containment test, edges included.
fn inside_triangle(p1: Position, p2: Position, p3: Position, point: Position) -> bool {
    let v0 = (p2 - p1).as_dvec3();
    let v1 = (p3 - p1).as_dvec3();
    let v2 = (point - p1).as_dvec3();
    let d00 = v0.dot(v0);
    let d01 = v0.dot(v1);
    let d11 = v1.dot(v1);
    let d20 = v2.dot(v0);
    let d21 = v2.dot(v1);
    let denom = d00 * d11 - d01 * d01;
    if denom == 0.0 {
        return false;
    }
    let gamma = (d11 * d20 - d01 * d21) / denom;
    let beta = (d00 * d21 - d01 * d20) / denom;
    let alpha = 1.0 - gamma - beta;
    let unit = 0.0..=1.0;
    unit.contains(&alpha) && unit.contains(&beta) && unit.contains(&gamma)
}
