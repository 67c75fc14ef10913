//! Motion integration. Every transform consumes the body and returns the
//! updated one.

use crate::math::{AccelerationVector, Speed, Time, Velocity};

use super::body::Body;

impl Body {
    /// Advance the position along the current velocity.
    pub fn moved(mut self, duration: Time) -> Self {
        self.position += self.velocity * duration;
        self
    }

    /// Integrate a constant acceleration over `delta`.
    pub fn accelerated(mut self, acceleration: AccelerationVector, delta: Time) -> Self {
        self.velocity += acceleration * delta;
        self
    }

    /// Reduce speed by `dampening * delta`. The body slows down to a stop but
    /// never reverses.
    pub fn dampened(mut self, delta: Time) -> Self {
        let speed = self.velocity.magnitude();
        let reduced = speed - self.dampening * delta;
        self.velocity = if reduced.value() <= 0.0 {
            Velocity::ZERO
        } else {
            self.velocity.normalize() * reduced
        };
        self
    }

    /// Apply gravity when the body opted in.
    pub fn with_gravity(self, gravity: AccelerationVector, delta: Time) -> Self {
        if self.gravity_applies {
            self.accelerated(gravity, delta)
        } else {
            self
        }
    }

    pub fn stopped(mut self) -> Self {
        self.velocity = Velocity::ZERO;
        self
    }
}

/// Shrink `acceleration` so that integrating it over `delta` does not push the
/// speed above `max_speed`.
///
/// A body already faster than `max_speed` keeps its speed; the result only
/// redirects it.
pub fn tune_acceleration_to_not_exceed_velocity(
    max_speed: Speed,
    delta: Time,
    velocity: Velocity,
    acceleration: AccelerationVector,
) -> AccelerationVector {
    if delta.value() <= 0.0 {
        return acceleration;
    }
    let candidate = velocity + acceleration * delta;
    let cap = max_speed.max(velocity.magnitude());
    if candidate.magnitude() <= cap {
        return acceleration;
    }
    let capped = candidate.normalize() * cap;
    (capped - velocity) / delta
}
