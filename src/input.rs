use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, trace};

use crate::entities::PlayerSelector;

/// Named actions an input owner may support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Left,
    Up,
    Right,
    Down,
    ThrowLeft,
    ThrowRight,
    ThrowUp,
    Start,
}

impl Action {
    pub const ALL: [Action; 8] = [
        Action::Left,
        Action::Up,
        Action::Right,
        Action::Down,
        Action::ThrowLeft,
        Action::ThrowRight,
        Action::ThrowUp,
        Action::Start,
    ];

    pub fn get_name(&self) -> &'static str {
        match self {
            Action::Left => "left",
            Action::Up => "up",
            Action::Right => "right",
            Action::Down => "down",
            Action::ThrowLeft => "throwLeft",
            Action::ThrowRight => "throwRight",
            Action::ThrowUp => "throwUp",
            Action::Start => "start",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.get_name() == name)
    }
}

/// What an input owner did with an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResponse {
    /// The owner does not support the action; nothing changed.
    Ignored,
    Handled,
    /// The selection was committed to the roster entry at this index.
    Commit(usize),
}

/// An entity that can receive named actions.
pub trait InputHandler {
    fn handle_input(&mut self, action: Action) -> InputResponse;
}

/// Browser-style key codes of the keys the game listens to.
pub mod key_codes {
    pub const ENTER: u16 = 13;
    pub const ARROW_LEFT: u16 = 37;
    pub const ARROW_UP: u16 = 38;
    pub const ARROW_RIGHT: u16 = 39;
    pub const ARROW_DOWN: u16 = 40;
    pub const A: u16 = 65;
    pub const D: u16 = 68;
    pub const S: u16 = 83;
}

/// Fixed key code to action table.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<u16, Action>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let bindings = [
            (key_codes::ARROW_LEFT, Action::Left),
            (key_codes::ARROW_UP, Action::Up),
            (key_codes::ARROW_RIGHT, Action::Right),
            (key_codes::ARROW_DOWN, Action::Down),
            (key_codes::A, Action::ThrowLeft),
            (key_codes::D, Action::ThrowRight),
            (key_codes::S, Action::ThrowUp),
            (key_codes::ENTER, Action::Start),
        ];
        Self {
            bindings: bindings.into_iter().collect(),
        }
    }
}

impl KeyBindings {
    pub fn resolve(&self, key_code: u16) -> Option<Action> {
        self.bindings.get(&key_code).copied()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Who currently receives dispatched actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOwner {
    Selector,
    /// The roster entry at this index, once the selection is committed.
    Player(usize),
}

/// Routes key-up events to the current input owner.
///
/// Focus starts on the selector and moves to the chosen player exactly
/// once, when the selector reports a commit.
#[derive(Debug, Clone)]
pub struct InputDispatcher {
    bindings: KeyBindings,
    owner: InputOwner,
}

impl Default for InputDispatcher {
    fn default() -> Self {
        Self::new(KeyBindings::default())
    }
}

impl InputDispatcher {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            owner: InputOwner::Selector,
        }
    }

    pub fn owner(&self) -> InputOwner {
        self.owner
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    /// Forward the action bound to `key_code` to the current owner.
    ///
    /// Unmapped key codes are dropped and return `None` without reaching
    /// any handler.
    pub fn dispatch(
        &mut self,
        key_code: u16,
        selector: &mut PlayerSelector,
    ) -> Option<InputResponse> {
        let Some(action) = self.bindings.resolve(key_code) else {
            trace!(key_code, "unbound key dropped");
            return None;
        };

        let response = match self.owner {
            InputOwner::Selector => selector.handle_input(action),
            InputOwner::Player(index) => selector.player_mut(index).handle_input(action),
        };

        match response {
            InputResponse::Commit(index) => {
                assert_eq!(
                    self.owner,
                    InputOwner::Selector,
                    "input focus can only move once"
                );
                debug!(index, "input focus moved to player");
                self.owner = InputOwner::Player(index);
            }
            InputResponse::Ignored => trace!(action = action.get_name(), "action ignored"),
            InputResponse::Handled => {}
        }
        Some(response)
    }
}

/// Something read from the terminal this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawInput {
    KeyUp(u16),
    Quit,
}

/// Polls terminal events and turns them into key-up codes.
///
/// Terminals that cannot report key releases fire on press instead.
pub struct InputManager {
    reports_release: bool,
    pending: Vec<RawInput>,
}

impl InputManager {
    pub fn new(reports_release: bool) -> Self {
        Self {
            reports_release,
            pending: Vec::new(),
        }
    }

    /// Drain every available event without blocking.
    pub fn poll_events(&mut self) -> color_eyre::Result<Vec<RawInput>> {
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key_event) = event::read()? {
                self.handle_key_event(key_event);
            }
        }
        Ok(std::mem::take(&mut self.pending))
    }

    fn handle_key_event(&mut self, key_event: KeyEvent) {
        // Quit works on press regardless of release reporting
        if key_event.kind == KeyEventKind::Press && is_quit(&key_event) {
            self.pending.push(RawInput::Quit);
            return;
        }

        let fires = match key_event.kind {
            KeyEventKind::Release => self.reports_release,
            KeyEventKind::Press => !self.reports_release,
            KeyEventKind::Repeat => false,
        };
        if fires && let Some(code) = key_code_for(key_event.code) {
            self.pending.push(RawInput::KeyUp(code));
        }
    }
}

fn is_quit(key_event: &KeyEvent) -> bool {
    matches!(
        key_event.code,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
    ) || (key_event.code == KeyCode::Char('c')
        && key_event.modifiers.contains(KeyModifiers::CONTROL))
}

/// Translate a terminal key into the numeric code the bindings expect.
pub fn key_code_for(code: KeyCode) -> Option<u16> {
    match code {
        KeyCode::Enter => Some(key_codes::ENTER),
        KeyCode::Left => Some(key_codes::ARROW_LEFT),
        KeyCode::Up => Some(key_codes::ARROW_UP),
        KeyCode::Right => Some(key_codes::ARROW_RIGHT),
        KeyCode::Down => Some(key_codes::ARROW_DOWN),
        KeyCode::Char(c) => match c.to_ascii_uppercase() {
            'A' => Some(key_codes::A),
            'D' => Some(key_codes::D),
            'S' => Some(key_codes::S),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_names_round_trip() {
        for action in Action::ALL {
            assert_eq!(Action::from_name(action.get_name()), Some(action));
        }
        assert_eq!(Action::from_name("jump"), None);
    }

    #[test]
    fn test_default_bindings() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.len(), 8);
        assert_eq!(bindings.resolve(37), Some(Action::Left));
        assert_eq!(bindings.resolve(38), Some(Action::Up));
        assert_eq!(bindings.resolve(39), Some(Action::Right));
        assert_eq!(bindings.resolve(40), Some(Action::Down));
        assert_eq!(bindings.resolve(65), Some(Action::ThrowLeft));
        assert_eq!(bindings.resolve(68), Some(Action::ThrowRight));
        assert_eq!(bindings.resolve(83), Some(Action::ThrowUp));
        assert_eq!(bindings.resolve(13), Some(Action::Start));
        assert_eq!(bindings.resolve(999), None);
    }

    #[test]
    fn test_unmapped_key_is_dropped() {
        let mut dispatcher = InputDispatcher::default();
        let mut selector = PlayerSelector::new();
        assert_eq!(dispatcher.dispatch(999, &mut selector), None);
        assert_eq!(selector.cursor(), 2);
        assert_eq!(dispatcher.owner(), InputOwner::Selector);
    }

    #[test]
    fn test_start_moves_focus_to_selected_player() {
        let mut dispatcher = InputDispatcher::default();
        let mut selector = PlayerSelector::new();

        assert_eq!(
            dispatcher.dispatch(key_codes::ENTER, &mut selector),
            Some(InputResponse::Commit(2))
        );
        assert_eq!(dispatcher.owner(), InputOwner::Player(2));

        // Subsequent actions reach the player, not the selector
        dispatcher.dispatch(key_codes::ARROW_LEFT, &mut selector);
        assert_eq!(selector.cursor(), 2);
        assert_eq!(selector.player(2).entity.x, 104.0);
    }

    #[test]
    fn test_second_start_does_not_reseat_focus() {
        let mut dispatcher = InputDispatcher::default();
        let mut selector = PlayerSelector::new();
        dispatcher.dispatch(key_codes::ENTER, &mut selector);
        assert_eq!(
            dispatcher.dispatch(key_codes::ENTER, &mut selector),
            Some(InputResponse::Ignored)
        );
        assert_eq!(dispatcher.owner(), InputOwner::Player(2));
    }

    #[test]
    fn test_key_code_translation() {
        assert_eq!(key_code_for(KeyCode::Enter), Some(13));
        assert_eq!(key_code_for(KeyCode::Left), Some(37));
        assert_eq!(key_code_for(KeyCode::Char('a')), Some(65));
        assert_eq!(key_code_for(KeyCode::Char('D')), Some(68));
        assert_eq!(key_code_for(KeyCode::Char('s')), Some(83));
        assert_eq!(key_code_for(KeyCode::Char('x')), None);
        assert_eq!(key_code_for(KeyCode::Tab), None);
    }

    #[test]
    fn test_key_events_fire_on_release_when_reported() {
        let mut manager = InputManager::new(true);
        manager.handle_key_event(KeyEvent::new_with_kind(
            KeyCode::Left,
            KeyModifiers::NONE,
            KeyEventKind::Press,
        ));
        assert!(manager.pending.is_empty());
        manager.handle_key_event(KeyEvent::new_with_kind(
            KeyCode::Left,
            KeyModifiers::NONE,
            KeyEventKind::Release,
        ));
        assert_eq!(manager.pending, vec![RawInput::KeyUp(37)]);
    }

    #[test]
    fn test_key_events_fire_on_press_without_release_reports() {
        let mut manager = InputManager::new(false);
        manager.handle_key_event(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        manager.handle_key_event(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE));
        assert_eq!(manager.pending, vec![RawInput::KeyUp(13), RawInput::Quit]);
    }
}
