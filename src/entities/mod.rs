mod bonus;
mod enemy;
mod entity;
mod player;
mod projectile;
mod selector;

// Re-export all public types
pub use bonus::{BONUS_COLUMNS, Bonus, BonusKind, GemColor};
pub use enemy::{ENEMY_WRAP_WIDTH, Enemy};
pub use entity::{
    AssetResolver, CELL_HEIGHT, CELL_WIDTH, Entity, FIELD_HEIGHT, FIELD_WIDTH, GameObject, LANES,
    RenderSurface, SpriteSize, sprites,
};
pub use player::{OFF_FIELD_POSITION, Player, RESPAWN_POSITION, STARTING_LIVES};
pub use projectile::{Direction, ROCK_SPEED, Rock};
pub use selector::{PlayerSelector, SEAT_ROW};
