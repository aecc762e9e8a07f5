use rand::Rng;

use super::entity::{CELL_WIDTH, Entity, GameObject, LANES, sprites};

/// Enemies wrap around once they have travelled this far.
pub const ENEMY_WRAP_WIDTH: f64 = 1010.0;

/// A bug crawling along one of the stone lanes.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub entity: Entity,
    speed: f64,
}

impl Enemy {
    pub fn new(lane_y: f64, speed: f64) -> Self {
        Self {
            entity: Entity::new(0.0, lane_y, sprites::ENEMY_BUG),
            speed,
        }
    }

    /// Spawn at the left edge of a random lane with a speed in [1, 2).
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let speed = rng.random_range(1.0..2.0);
        let lane = LANES[rng.random_range(0..LANES.len())];
        Self::new(lane, speed)
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }
}

impl GameObject for Enemy {
    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn update(&mut self, dt: f64) {
        self.entity.x = (self.entity.x + CELL_WIDTH * dt * self.speed) % ENEMY_WRAP_WIDTH;
    }
}
