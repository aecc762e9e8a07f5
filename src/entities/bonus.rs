use rand::Rng;

use super::entity::{CELL_WIDTH, Entity, GameObject, LANES, sprites};

/// Number of lane columns a bonus can appear in.
pub const BONUS_COLUMNS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GemColor {
    Blue,
    Green,
    Orange,
}

impl GemColor {
    pub const ALL: [GemColor; 3] = [GemColor::Blue, GemColor::Green, GemColor::Orange];

    pub fn sprite(&self) -> &'static str {
        match self {
            GemColor::Blue => sprites::GEM_BLUE,
            GemColor::Green => sprites::GEM_GREEN,
            GemColor::Orange => sprites::GEM_ORANGE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BonusKind {
    Gem(GemColor),
    Life,
}

/// A static pickup sitting on a lane cell until the player walks over it.
#[derive(Debug, Clone)]
pub struct Bonus {
    pub entity: Entity,
    kind: BonusKind,
}

impl Bonus {
    pub fn new(x: f64, y: f64, kind: BonusKind) -> Self {
        let sprite = match kind {
            BonusKind::Gem(color) => color.sprite(),
            BonusKind::Life => sprites::HEART,
        };
        Self {
            entity: Entity::new(x, y, sprite),
            kind,
        }
    }

    /// A gem of random colour on a random lane cell.
    pub fn spawn_gem<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let (x, y) = random_cell(rng);
        let color = GemColor::ALL[rng.random_range(0..GemColor::ALL.len())];
        Self::new(x, y, BonusKind::Gem(color))
    }

    /// An extra life on a random lane cell.
    pub fn spawn_life<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let (x, y) = random_cell(rng);
        Self::new(x, y, BonusKind::Life)
    }

    pub fn kind(&self) -> BonusKind {
        self.kind
    }
}

impl GameObject for Bonus {
    fn entity(&self) -> &Entity {
        &self.entity
    }
}

fn random_cell<R: Rng + ?Sized>(rng: &mut R) -> (f64, f64) {
    let column = rng.random_range(0..BONUS_COLUMNS);
    let lane = LANES[rng.random_range(0..LANES.len())];
    (column as f64 * CELL_WIDTH, lane)
}
