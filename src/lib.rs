// Library exports for testing
pub use app::App;
pub use config::{Cli, GameConfig};
pub use entities::{
    Bonus, BonusKind, Direction, Enemy, Entity, GameObject, GemColor, Player, PlayerSelector,
    Rock,
};
pub use input::{Action, InputDispatcher, InputHandler, InputOwner, InputResponse, KeyBindings};
pub use world::{Phase, World};

pub mod app;
pub mod config;
pub mod entities;
pub mod input;
pub mod renderer;
pub mod world;
