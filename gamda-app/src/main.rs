use gamda::ecs::factories;
use gamda::{
    seconds, Entities, EntityId, PhysicsConfig, PhysicsWorld, Position, Time, Velocity,
};

const TICK: Time = seconds(1.0 / 60.0);
const TICKS: usize = 600;
const HALF_WIDTH: f64 = 20.0;
const HALF_LENGTH: f64 = 30.0;

struct Pitch {
    entities: Entities,
    ball: EntityId,
    players: Vec<EntityId>,
}

impl Pitch {
    fn kickoff() -> anyhow::Result<Self> {
        let mut entities = Entities::new();

        let corners = [
            Position::new(-HALF_WIDTH, 0.0, -HALF_LENGTH),
            Position::new(HALF_WIDTH, 0.0, -HALF_LENGTH),
            Position::new(HALF_WIDTH, 0.0, HALF_LENGTH),
            Position::new(-HALF_WIDTH, 0.0, HALF_LENGTH),
        ];
        for (i, &from) in corners.iter().enumerate() {
            let to = corners[(i + 1) % corners.len()];
            entities.store_entity(factories::wall(from, to))?;
        }

        let ball = entities.store_entity(
            factories::ball(Position::ZERO)
                .map_body(|body| body.with_velocity(Velocity::new(7.0, 0.0, 12.0))),
        )?;

        let players = entities.store_many([
            factories::character(Position::new(-5.0, 0.0, -10.0))
                .map_body(|body| body.with_velocity(Velocity::new(2.0, 0.0, 6.0))),
            factories::character(Position::new(5.0, 0.0, 10.0))
                .map_body(|body| body.with_velocity(Velocity::new(-3.0, 0.0, -4.0))),
        ])?;

        Ok(Self {
            entities,
            ball,
            players,
        })
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let world = PhysicsWorld::new(PhysicsConfig::default());
    let Pitch {
        mut entities,
        ball,
        players,
    } = Pitch::kickoff()?;

    let mut collisions = 0;
    for tick in 0..TICKS {
        let outcome = world.step(entities, TICK)?;
        collisions += outcome.report.collisions_resolved;
        if outcome.report.truncated {
            log::warn!(
                "tick {tick}: {} left unsimulated",
                outcome.report.unsimulated
            );
        }
        for event in &outcome.events {
            log::info!("tick {tick}: {event:?}");
        }
        entities = outcome.entities;

        if tick % 60 == 0 {
            if let Some(body) = entities.get(ball).and_then(|e| e.body()) {
                log::info!(
                    "tick {tick}: ball at {:?} moving {:?}",
                    body.position,
                    body.velocity
                );
            }
        }
    }

    for id in players {
        if let Some(body) = entities.get(id).and_then(|e| e.body()) {
            log::info!("player {id} stopped at {:?}", body.position);
        }
    }
    log::info!("{TICKS} ticks, {collisions} collisions");
    Ok(())
}
