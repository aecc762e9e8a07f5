use tracing::{debug, trace};

use super::bonus::{Bonus, BonusKind, GemColor};
use super::entity::{
    AssetResolver, CELL_HEIGHT, CELL_WIDTH, Entity, FIELD_HEIGHT, FIELD_WIDTH, GameObject,
    RenderSurface, sprites,
};
use super::projectile::{Direction, Rock};
use crate::input::{Action, InputHandler, InputResponse};

pub const STARTING_LIVES: u32 = 3;
/// Where the player reappears after losing a life.
pub const RESPAWN_POSITION: (f64, f64) = (205.0, 404.0);
/// Where a dead player is parked, far away from anything it could touch.
pub const OFF_FIELD_POSITION: (f64, f64) = (-2000.0, -2000.0);

const HUD_ICON_SCALE: f64 = 0.3;
const HUD_LEFT: f64 = 5.0;
const HUD_GEM_ROW: f64 = 35.0;
const HUD_HEART_ROW: f64 = 540.0;

/// The character crossing the field.
///
/// Alive players move one lane cell at a time and throw collected gems as
/// rocks. Losing the last life makes the player dead for good: it is parked
/// off the field and ignores every further request.
#[derive(Debug, Clone)]
pub struct Player {
    pub entity: Entity,
    lives: u32,
    /// Used as a stack, the most recently collected gem is thrown first.
    gems: Vec<GemColor>,
    rocks: Vec<Rock>,
    dead: bool,
}

impl Player {
    pub fn new(sprite: &'static str, x: f64, y: f64) -> Self {
        Self {
            entity: Entity::new(x, y, sprite),
            lives: STARTING_LIVES,
            gems: Vec::new(),
            rocks: Vec::new(),
            dead: false,
        }
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn gems(&self) -> &[GemColor] {
        &self.gems
    }

    pub fn rocks(&self) -> &[Rock] {
        &self.rocks
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// Fold a collected bonus into the player's state.
    pub fn add_bonus(&mut self, bonus: &Bonus) {
        if self.dead {
            return;
        }
        match bonus.kind() {
            BonusKind::Life => self.lives += 1,
            BonusKind::Gem(color) => self.gems.push(color),
        }
        debug!(kind = ?bonus.kind(), lives = self.lives, gems = self.gems.len(), "bonus collected");
    }

    /// Move one row up. There is no guard against leaving the top edge,
    /// that is how the player reaches the water.
    pub fn move_up(&mut self) -> bool {
        if self.dead {
            return false;
        }
        self.entity.y -= CELL_HEIGHT;
        true
    }

    pub fn move_down(&mut self) -> bool {
        let candidate = self.entity.y + CELL_HEIGHT;
        if !self.dead && candidate > 0.0 && candidate < FIELD_HEIGHT {
            self.entity.y = candidate;
            return true;
        }
        false
    }

    pub fn move_left(&mut self) -> bool {
        let candidate = self.entity.x - CELL_WIDTH;
        if !self.dead && candidate > 0.0 && candidate < FIELD_WIDTH {
            self.entity.x = candidate;
            return true;
        }
        false
    }

    pub fn move_right(&mut self) -> bool {
        let candidate = self.entity.x + CELL_WIDTH;
        if !self.dead && candidate > 0.0 && candidate < FIELD_WIDTH {
            self.entity.x = candidate;
            return true;
        }
        false
    }

    /// Spend the last collected gem on a rock flying in `direction`.
    /// Returns false, and changes nothing, when there is no gem to spend.
    pub fn throw(&mut self, direction: Direction) -> bool {
        if self.dead {
            return false;
        }
        match self.gems.pop() {
            Some(_) => {
                self.rocks.push(Rock::thrown_from(&self.entity, direction));
                true
            }
            None => false,
        }
    }

    /// Remove a rock, e.g. after it hit something.
    pub fn remove_rock(&mut self, index: usize) -> Rock {
        self.rocks.remove(index)
    }

    /// Lose a life. Respawns at the start tile while lives remain,
    /// otherwise the player dies for good.
    pub fn die(&mut self) {
        if self.dead {
            trace!("die() on a dead player ignored");
            return;
        }
        assert!(self.lives > 0, "alive player must have lives left");

        self.lives -= 1;
        if self.lives > 0 {
            (self.entity.x, self.entity.y) = RESPAWN_POSITION;
            debug!(lives = self.lives, "player respawned");
        } else {
            self.dead = true;
            (self.entity.x, self.entity.y) = OFF_FIELD_POSITION;
            debug!("player is out of lives");
        }
    }

    fn render_icons(
        surface: &mut dyn RenderSurface,
        assets: &dyn AssetResolver,
        sprite: &str,
        count: usize,
        row: f64,
    ) {
        let Some(size) = assets.size(sprite) else {
            return;
        };
        let width = size.width * HUD_ICON_SCALE;
        let height = size.height * HUD_ICON_SCALE;
        for i in 0..count {
            surface.draw_scaled(sprite, HUD_LEFT + i as f64 * width, row, width, height);
        }
    }
}

impl GameObject for Player {
    fn entity(&self) -> &Entity {
        &self.entity
    }

    /// Advance thrown rocks and drop the ones that left the field.
    fn update(&mut self, dt: f64) {
        for rock in &mut self.rocks {
            rock.update(dt);
        }
        self.rocks.retain(|rock| !rock.is_out_of_bounds());
    }

    /// Draw the character, then one small gem per held gem and one small
    /// heart per remaining life.
    fn render(&self, surface: &mut dyn RenderSurface, assets: &dyn AssetResolver) {
        self.entity.render(surface);
        Self::render_icons(surface, assets, sprites::GEM_GREEN, self.gems.len(), HUD_GEM_ROW);
        Self::render_icons(surface, assets, sprites::HEART, self.lives as usize, HUD_HEART_ROW);
    }
}

impl InputHandler for Player {
    fn handle_input(&mut self, action: Action) -> InputResponse {
        match action {
            Action::Up => {
                self.move_up();
            }
            Action::Down => {
                self.move_down();
            }
            Action::Left => {
                self.move_left();
            }
            Action::Right => {
                self.move_right();
            }
            Action::ThrowUp => {
                self.throw(Direction::Up);
            }
            Action::ThrowLeft => {
                self.throw(Direction::Left);
            }
            Action::ThrowRight => {
                self.throw(Direction::Right);
            }
            Action::Start => return InputResponse::Ignored,
        }
        InputResponse::Handled
    }
}
