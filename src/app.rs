use color_eyre::Result;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::time::{Duration, Instant};
use tracing::info;

use crate::config::GameConfig;
use crate::input::{InputManager, RawInput};
use crate::renderer::GameRenderer;
use crate::world::World;

/// Longest frame delta handed to the simulation, so a stalled terminal
/// does not teleport the bugs.
const MAX_FRAME_DT: f64 = 0.1;

/// The main application: drives frames and feeds key events to the world.
pub struct App {
    running: bool,
    tick: Duration,
    last_frame_time: Instant,
    world: World,
    input_manager: InputManager,
    renderer: GameRenderer,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: GameConfig, reports_key_release: bool) -> Self {
        let tick = config.tick;
        // The world holds the selector, so input has an owner before the
        // first event is read.
        let world = World::new(config);
        Self {
            running: true,
            tick,
            last_frame_time: Instant::now(),
            world,
            input_manager: InputManager::new(reports_key_release),
            renderer: GameRenderer::new(),
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
        info!(seed = self.world.seed(), "game loop started");
        while self.running {
            terminal.draw(|frame| self.renderer.render(frame, &self.world))?;

            for input in self.input_manager.poll_events()? {
                match input {
                    RawInput::Quit => self.running = false,
                    RawInput::KeyUp(code) => {
                        self.world.handle_key(code);
                    }
                }
            }

            let now = Instant::now();
            let dt = now
                .duration_since(self.last_frame_time)
                .as_secs_f64()
                .min(MAX_FRAME_DT);
            self.last_frame_time = now;
            self.world.update(dt);

            std::thread::sleep(self.tick);
        }
        info!(phase = ?self.world.phase(), "game loop finished");
        Ok(())
    }
}
