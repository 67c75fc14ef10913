//! Shared setup helpers for gamda benchmarks.
//!
//! ## Running
//!
//!   cargo bench --manifest-path benchmarks/Cargo.toml --bench physics
//!
//! Filter by group:
//!   cargo bench --manifest-path benchmarks/Cargo.toml --bench physics -- narrowphase

use gamda::ecs::factories;
use gamda::{meters, Body, Entities, Entity, EntityId, Position, Velocity};

/// Half-width of the benchmark pitch, in meters.
pub const PITCH_HALF_WIDTH: f64 = 40.0;

/// Four walls enclosing a square pitch centered on the origin.
pub fn pitch_walls() -> Vec<Entity> {
    let h = PITCH_HALF_WIDTH;
    let corners = [
        Position::new(-h, 0.0, -h),
        Position::new(h, 0.0, -h),
        Position::new(h, 0.0, h),
        Position::new(-h, 0.0, h),
    ];
    (0..corners.len())
        .map(|i| factories::wall(corners[i], corners[(i + 1) % corners.len()]))
        .collect()
}

/// `n` balls on a grid inside the pitch, each moving diagonally so that
/// neighbours keep running into each other and into the walls.
pub fn setup_pitch(n: usize) -> anyhow::Result<(Entities, Vec<EntityId>)> {
    let cols = (n as f64).sqrt().ceil().max(1.0) as usize;
    let spacing = (2.0 * PITCH_HALF_WIDTH - 4.0) / cols as f64;

    let balls = (0..n).map(|i| {
        let x = -PITCH_HALF_WIDTH + 2.0 + (i % cols) as f64 * spacing;
        let z = -PITCH_HALF_WIDTH + 2.0 + (i / cols) as f64 * spacing;
        let sign = if i % 2 == 0 { 1.0 } else { -1.0 };
        factories::ball(Position::new(x, 0.0, z))
            .map_body(|body| body.with_velocity(Velocity::new(3.0 * sign, 0.0, 2.0)))
    });

    let mut entities = Entities::new();
    let ids = entities.store_many(balls)?;
    entities.store_many(pitch_walls())?;
    Ok((entities, ids))
}

/// Two unit-radius spheres `gap` meters apart, closing at 2 m/s.
pub fn closing_spheres(gap: f64) -> (Body, Body) {
    let a = Body::sphere(Position::ZERO, meters(1.0)).with_velocity(Velocity::new(1.0, 0.0, 0.0));
    let b = Body::sphere(Position::new(2.0 + gap, 0.0, 0.0), meters(1.0))
        .with_velocity(Velocity::new(-1.0, 0.0, 0.0));
    (a, b)
}
