use tracing::{debug, trace};

use super::entity::{AssetResolver, CELL_WIDTH, Entity, GameObject, RenderSurface, sprites};
use super::player::Player;
use crate::input::{Action, InputHandler, InputResponse};

/// Row the roster stands on, which is also the start row of the game.
pub const SEAT_ROW: f64 = 404.0;
const FIRST_SEAT_X: f64 = 2.0;
const INITIAL_CURSOR: usize = 2;

const ROSTER: [(&str, f64); 5] = [
    (sprites::CHAR_CAT_GIRL, 2.0),
    (sprites::CHAR_HORN_GIRL, 103.0),
    (sprites::CHAR_BOY, 205.0),
    (sprites::CHAR_PINK_GIRL, 306.0),
    (sprites::CHAR_PRINCESS_GIRL, 407.0),
];

/// Character selection shown before play starts.
///
/// Holds one ready-made [`Player`] per skin and a cursor over them. Once
/// the selection is committed the chosen roster entry becomes the active
/// player and the selector stops taking input.
#[derive(Debug, Clone)]
pub struct PlayerSelector {
    pub entity: Entity,
    roster: Vec<Player>,
    cursor: usize,
    committed: bool,
}

impl Default for PlayerSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerSelector {
    pub fn new() -> Self {
        let roster = ROSTER
            .iter()
            .map(|&(sprite, x)| Player::new(sprite, x, SEAT_ROW))
            .collect();
        let mut selector = Self {
            entity: Entity::new(0.0, SEAT_ROW, sprites::SELECTOR),
            roster,
            cursor: INITIAL_CURSOR,
            committed: false,
        };
        (selector.entity.x, selector.entity.y) = selector.highlight_position();
        selector
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_committed(&self) -> bool {
        self.committed
    }

    pub fn roster(&self) -> &[Player] {
        &self.roster
    }

    pub fn player(&self, index: usize) -> &Player {
        &self.roster[index]
    }

    pub fn player_mut(&mut self, index: usize) -> &mut Player {
        &mut self.roster[index]
    }

    /// The chosen player, once the selection is committed.
    pub fn active_player(&self) -> Option<&Player> {
        self.committed.then(|| &self.roster[self.cursor])
    }

    pub fn active_player_mut(&mut self) -> Option<&mut Player> {
        if self.committed {
            Some(&mut self.roster[self.cursor])
        } else {
            None
        }
    }

    /// Where the selection highlight is drawn for the current cursor.
    pub fn highlight_position(&self) -> (f64, f64) {
        (FIRST_SEAT_X + CELL_WIDTH * self.cursor as f64, SEAT_ROW)
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
        self.sync_highlight();
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.roster.len() - 1 {
            self.cursor += 1;
        }
        self.sync_highlight();
    }

    /// Commit the current choice. Returns the roster index of the active
    /// player, or `None` when the selection was already committed.
    pub fn start(&mut self) -> Option<usize> {
        if self.committed {
            trace!("selection already committed");
            return None;
        }
        self.committed = true;
        debug!(index = self.cursor, sprite = self.roster[self.cursor].entity.sprite(), "character selected");
        Some(self.cursor)
    }

    fn sync_highlight(&mut self) {
        debug_assert!(self.cursor < self.roster.len());
        (self.entity.x, self.entity.y) = self.highlight_position();
    }
}

impl GameObject for PlayerSelector {
    fn entity(&self) -> &Entity {
        &self.entity
    }

    /// Draw the highlight under the cursor, then every candidate at its seat.
    fn render(&self, surface: &mut dyn RenderSurface, _assets: &dyn AssetResolver) {
        let (x, y) = self.highlight_position();
        surface.draw(self.entity.sprite(), x, y);
        for player in &self.roster {
            player.entity.render(surface);
        }
    }
}

impl InputHandler for PlayerSelector {
    fn handle_input(&mut self, action: Action) -> InputResponse {
        if self.committed {
            return InputResponse::Ignored;
        }
        match action {
            Action::Left => self.move_left(),
            Action::Right => self.move_right(),
            Action::Start => {
                return match self.start() {
                    Some(index) => InputResponse::Commit(index),
                    None => InputResponse::Ignored,
                };
            }
            _ => return InputResponse::Ignored,
        }
        InputResponse::Handled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::entity::testing::{RecordingSurface, TileAssets};

    #[test]
    fn test_selector_new() {
        let selector = PlayerSelector::new();
        assert_eq!(selector.roster().len(), 5);
        assert_eq!(selector.cursor(), 2);
        assert!(!selector.is_committed());
        assert!(selector.active_player().is_none());

        let seats: Vec<_> = selector.roster().iter().map(|p| p.entity.x).collect();
        assert_eq!(seats, vec![2.0, 103.0, 205.0, 306.0, 407.0]);
        assert!(selector.roster().iter().all(|p| p.entity.y == SEAT_ROW));
    }

    #[test]
    fn test_cursor_clamps_left() {
        let mut selector = PlayerSelector::new();
        for _ in 0..10 {
            selector.move_left();
        }
        assert_eq!(selector.cursor(), 0);
        assert_eq!(selector.highlight_position(), (2.0, SEAT_ROW));
    }

    #[test]
    fn test_cursor_clamps_right() {
        let mut selector = PlayerSelector::new();
        for _ in 0..10 {
            selector.move_right();
        }
        assert_eq!(selector.cursor(), 4);
        assert_eq!(selector.highlight_position(), (406.0, SEAT_ROW));
    }

    #[test]
    fn test_right_then_left_returns() {
        let mut selector = PlayerSelector::new();
        selector.move_right();
        selector.move_left();
        assert_eq!(selector.cursor(), 2);
    }

    #[test]
    fn test_start_commits_once() {
        let mut selector = PlayerSelector::new();
        selector.move_left();
        assert_eq!(selector.start(), Some(1));
        assert!(selector.is_committed());
        assert_eq!(
            selector.active_player().map(|p| p.entity.sprite()),
            Some(sprites::CHAR_HORN_GIRL)
        );

        assert_eq!(selector.start(), None);
        assert_eq!(selector.cursor(), 1);
    }

    #[test]
    fn test_committed_selector_ignores_input() {
        let mut selector = PlayerSelector::new();
        assert_eq!(selector.handle_input(Action::Start), InputResponse::Commit(2));
        assert_eq!(selector.handle_input(Action::Right), InputResponse::Ignored);
        assert_eq!(selector.cursor(), 2);
    }

    #[test]
    fn test_unsupported_actions_are_ignored() {
        let mut selector = PlayerSelector::new();
        for action in [Action::Up, Action::Down, Action::ThrowUp, Action::ThrowLeft] {
            assert_eq!(selector.handle_input(action), InputResponse::Ignored);
        }
        assert_eq!(selector.cursor(), 2);
        assert!(!selector.is_committed());
    }

    #[test]
    fn test_render_draws_highlight_and_roster() {
        let mut selector = PlayerSelector::new();
        selector.move_right();
        let mut surface = RecordingSurface::default();
        selector.render(&mut surface, &TileAssets);

        assert_eq!(surface.draws.len(), 6);
        assert_eq!(surface.draws[0].sprite, sprites::SELECTOR);
        assert_eq!((surface.draws[0].x, surface.draws[0].y), (305.0, SEAT_ROW));
    }
}
