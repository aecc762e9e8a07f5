use super::entity::{CELL_HEIGHT, CELL_WIDTH, Entity, GameObject, sprites};

/// Rocks travel this many lane cells per second.
pub const ROCK_SPEED: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Left,
    Right,
}

impl Direction {
    pub fn get_name(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// A rock thrown by the player. It flies in a straight line and never
/// removes itself; the thrower prunes it once it leaves the field.
#[derive(Debug, Clone)]
pub struct Rock {
    pub entity: Entity,
    direction: Direction,
}

impl Rock {
    /// Start a rock at the thrower's current position.
    pub fn thrown_from(thrower: &Entity, direction: Direction) -> Self {
        Self {
            entity: Entity::new(thrower.x, thrower.y, sprites::ROCK),
            direction,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_out_of_bounds(&self) -> bool {
        !self.entity.is_inside_field()
    }
}

impl GameObject for Rock {
    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn update(&mut self, dt: f64) {
        match self.direction {
            Direction::Up => self.entity.y -= CELL_HEIGHT * dt * ROCK_SPEED,
            Direction::Left => self.entity.x -= CELL_WIDTH * dt * ROCK_SPEED,
            Direction::Right => self.entity.x += CELL_WIDTH * dt * ROCK_SPEED,
        }
    }
}
