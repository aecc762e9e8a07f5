use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::entities::{
    AssetResolver, Bonus, CELL_HEIGHT, CELL_WIDTH, Enemy, Entity, GameObject, Player,
    PlayerSelector, RenderSurface,
};
use crate::input::{InputDispatcher, InputResponse};

/// Horizontal reach within which a bug catches the player.
const ENEMY_REACH: f64 = CELL_WIDTH * 0.7;
/// Horizontal reach within which the player picks up a bonus.
const BONUS_REACH: f64 = CELL_WIDTH * 0.5;
/// Horizontal reach within which a rock squashes a bug.
const ROCK_REACH: f64 = CELL_WIDTH * 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Selecting,
    Playing,
    GameOver,
}

/// Everything one game session owns: the selector (and through it the
/// active player), the input dispatcher, enemies, bonuses and the spawn RNG.
pub struct World {
    config: GameConfig,
    seed: u64,
    rng: StdRng,
    selector: PlayerSelector,
    dispatcher: InputDispatcher,
    enemies: Vec<Enemy>,
    bonuses: Vec<Bonus>,
    /// Seconds since the last spawn of each kind
    enemy_timer: f64,
    bonus_timer: f64,
}

impl World {
    pub fn new(config: GameConfig) -> Self {
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        info!(seed, "world created");
        Self {
            config,
            seed,
            rng: StdRng::seed_from_u64(seed),
            selector: PlayerSelector::new(),
            dispatcher: InputDispatcher::default(),
            enemies: Vec::new(),
            bonuses: Vec::new(),
            enemy_timer: 0.0,
            bonus_timer: 0.0,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn phase(&self) -> Phase {
        match self.selector.active_player() {
            None => Phase::Selecting,
            Some(player) if player.is_dead() => Phase::GameOver,
            Some(_) => Phase::Playing,
        }
    }

    pub fn selector(&self) -> &PlayerSelector {
        &self.selector
    }

    pub fn dispatcher(&self) -> &InputDispatcher {
        &self.dispatcher
    }

    pub fn player(&self) -> Option<&Player> {
        self.selector.active_player()
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn bonuses(&self) -> &[Bonus] {
        &self.bonuses
    }

    pub fn add_enemy(&mut self, enemy: Enemy) {
        self.enemies.push(enemy);
    }

    pub fn add_bonus(&mut self, bonus: Bonus) {
        self.bonuses.push(bonus);
    }

    /// Deliver a key-up event to whoever owns input.
    pub fn handle_key(&mut self, key_code: u16) -> Option<InputResponse> {
        self.dispatcher.dispatch(key_code, &mut self.selector)
    }

    /// Advance the simulation by `dt` seconds. Nothing moves until a
    /// character is chosen, and nothing moves after it has died.
    pub fn update(&mut self, dt: f64) {
        if self.phase() != Phase::Playing {
            return;
        }

        for enemy in &mut self.enemies {
            enemy.update(dt);
        }
        if let Some(player) = self.selector.active_player_mut() {
            player.update(dt);
        }

        self.run_spawner(dt);
        self.resolve_collisions();

        if self.phase() == Phase::GameOver {
            info!("game over");
        }
    }

    fn run_spawner(&mut self, dt: f64) {
        self.enemy_timer += dt;
        let enemy_interval = self.config.enemy_interval.as_secs_f64();
        if self.enemy_timer >= enemy_interval {
            self.enemy_timer -= enemy_interval;
            if self.enemies.len() < self.config.max_enemies {
                let enemy = Enemy::spawn(&mut self.rng);
                debug!(lane = enemy.entity.y, speed = enemy.speed(), "enemy spawned");
                self.enemies.push(enemy);
            }
        }

        self.bonus_timer += dt;
        let bonus_interval = self.config.bonus_interval.as_secs_f64();
        if self.bonus_timer >= bonus_interval {
            self.bonus_timer -= bonus_interval;
            if self.bonuses.len() < self.config.max_bonuses {
                let bonus = if self.rng.random_bool(self.config.life_chance) {
                    Bonus::spawn_life(&mut self.rng)
                } else {
                    Bonus::spawn_gem(&mut self.rng)
                };
                let occupied = self
                    .bonuses
                    .iter()
                    .any(|b| b.entity.position() == bonus.entity.position());
                if !occupied {
                    debug!(kind = ?bonus.kind(), x = bonus.entity.x, y = bonus.entity.y, "bonus spawned");
                    self.bonuses.push(bonus);
                }
            }
        }
    }

    fn resolve_collisions(&mut self) {
        let Some(player) = self.selector.active_player_mut() else {
            return;
        };

        // Rocks squash bugs, both disappear
        let mut rock_idx = 0;
        while rock_idx < player.rocks().len() {
            let rock = &player.rocks()[rock_idx].entity;
            let hit = self
                .enemies
                .iter()
                .position(|e| overlaps(rock, &e.entity, ROCK_REACH));
            match hit {
                Some(enemy_idx) => {
                    self.enemies.remove(enemy_idx);
                    player.remove_rock(rock_idx);
                    debug!("rock hit a bug");
                }
                None => rock_idx += 1,
            }
        }

        // A bug touching the player costs a life and clears the lanes
        if self
            .enemies
            .iter()
            .any(|e| overlaps(&player.entity, &e.entity, ENEMY_REACH))
        {
            player.die();
            self.enemies.clear();
            self.enemy_timer = 0.0;
            return;
        }

        let entity = player.entity.clone();
        let mut collected = Vec::new();
        self.bonuses.retain(|bonus| {
            let touching = overlaps(&entity, &bonus.entity, BONUS_REACH);
            if touching {
                collected.push(bonus.clone());
            }
            !touching
        });
        for bonus in &collected {
            player.add_bonus(bonus);
        }
    }

    /// Draw the current phase: the selector while choosing, the field otherwise.
    pub fn render(&self, surface: &mut dyn RenderSurface, assets: &dyn AssetResolver) {
        let Some(player) = self.selector.active_player() else {
            self.selector.render(surface, assets);
            return;
        };

        for bonus in &self.bonuses {
            bonus.render(surface, assets);
        }
        for enemy in &self.enemies {
            enemy.render(surface, assets);
        }
        for rock in player.rocks() {
            rock.render(surface, assets);
        }
        player.render(surface, assets);
    }
}

/// Same lane and within `reach` horizontally.
fn overlaps(a: &Entity, b: &Entity, reach: f64) -> bool {
    (a.x - b.x).abs() < reach && (a.y - b.y).abs() < CELL_HEIGHT / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{BonusKind, GemColor, RESPAWN_POSITION};
    use crate::input::key_codes;
    use std::time::Duration;

    fn quiet_config() -> GameConfig {
        // Spawners never fire within a test
        GameConfig {
            seed: Some(1),
            enemy_interval: Duration::from_secs(3600),
            bonus_interval: Duration::from_secs(3600),
            ..GameConfig::default()
        }
    }

    fn playing_world() -> World {
        let mut world = World::new(quiet_config());
        world.handle_key(key_codes::ENTER);
        world
    }

    #[test]
    fn test_world_starts_selecting() {
        let mut world = World::new(quiet_config());
        assert_eq!(world.phase(), Phase::Selecting);
        assert!(world.player().is_none());

        world.add_enemy(Enemy::new(60.0, 1.0));
        world.update(1.0);
        assert_eq!(world.enemies()[0].entity.x, 0.0);
    }

    #[test]
    fn test_start_enters_playing() {
        let world = playing_world();
        assert_eq!(world.phase(), Phase::Playing);
        assert_eq!(world.player().map(|p| p.entity.x), Some(205.0));
    }

    #[test]
    fn test_player_collects_bonus() {
        let mut world = playing_world();
        // Player stands at (205, 404); move up two rows onto lane 226
        world.handle_key(key_codes::ARROW_UP);
        world.handle_key(key_codes::ARROW_UP);
        world.add_bonus(Bonus::new(202.0, 226.0, BonusKind::Gem(GemColor::Green)));
        world.add_bonus(Bonus::new(404.0, 226.0, BonusKind::Life));

        world.update(0.0);
        let player = world.player().unwrap();
        assert_eq!(player.gems(), &[GemColor::Green]);
        assert_eq!(player.lives(), 3);
        assert_eq!(world.bonuses().len(), 1);
    }

    #[test]
    fn test_enemy_contact_costs_a_life() {
        let mut world = playing_world();
        world.handle_key(key_codes::ARROW_UP);
        world.handle_key(key_codes::ARROW_UP);
        let mut enemy = Enemy::new(226.0, 1.0);
        enemy.entity.x = 190.0;
        world.add_enemy(enemy);

        world.update(0.0);
        let player = world.player().unwrap();
        assert_eq!(player.lives(), 2);
        assert_eq!(player.entity.position(), RESPAWN_POSITION);
        assert!(world.enemies().is_empty());
    }

    #[test]
    fn test_rock_squashes_enemy() {
        let mut world = playing_world();
        world.handle_key(key_codes::ARROW_UP);
        world.handle_key(key_codes::ARROW_UP);
        world.add_bonus(Bonus::new(202.0, 226.0, BonusKind::Gem(GemColor::Blue)));
        world.update(0.0);

        world.handle_key(key_codes::D);
        let mut enemy = Enemy::new(226.0, 0.0);
        enemy.entity.x = 404.0;
        world.add_enemy(enemy);

        // Rock travels 303 units per second to the right
        for _ in 0..10 {
            world.update(0.1);
        }
        assert!(world.enemies().is_empty());
        assert!(world.player().unwrap().rocks().is_empty());
        assert_eq!(world.player().unwrap().lives(), 3);
    }

    #[test]
    fn test_game_over_freezes_world() {
        let mut world = playing_world();
        for _ in 0..3 {
            world.handle_key(key_codes::ARROW_UP);
            world.handle_key(key_codes::ARROW_UP);
            let mut enemy = Enemy::new(226.0, 0.0);
            enemy.entity.x = 205.0;
            world.add_enemy(enemy);
            world.update(0.0);
        }
        assert_eq!(world.phase(), Phase::GameOver);

        world.add_enemy(Enemy::new(60.0, 1.0));
        world.update(1.0);
        assert_eq!(world.enemies()[0].entity.x, 0.0);
    }

    #[test]
    fn test_spawner_respects_interval_and_cap() {
        let mut world = World::new(GameConfig {
            seed: Some(5),
            enemy_interval: Duration::from_secs(1),
            max_enemies: 2,
            bonus_interval: Duration::from_secs(3600),
            ..GameConfig::default()
        });
        world.handle_key(key_codes::ENTER);

        world.update(0.5);
        assert!(world.enemies().is_empty());
        world.update(0.5);
        assert_eq!(world.enemies().len(), 1);
        for _ in 0..5 {
            world.update(1.0);
        }
        assert_eq!(world.enemies().len(), 2);
    }

    #[test]
    fn test_same_seed_same_world() {
        let config = GameConfig {
            seed: Some(11),
            enemy_interval: Duration::from_millis(100),
            bonus_interval: Duration::from_millis(100),
            ..GameConfig::default()
        };
        let mut a = World::new(config.clone());
        let mut b = World::new(config);
        a.handle_key(key_codes::ENTER);
        b.handle_key(key_codes::ENTER);
        for _ in 0..5 {
            a.update(0.1);
            b.update(0.1);
        }
        let lanes = |w: &World| w.enemies().iter().map(|e| e.entity.y).collect::<Vec<_>>();
        assert_eq!(lanes(&a), lanes(&b));
        assert_eq!(a.bonuses().len(), b.bonuses().len());
    }
}
