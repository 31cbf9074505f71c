use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Direction, Input, Player};

/// Maps terminal key presses to game input symbols.
///
/// Arrow keys steer player one, WASD steers player two, digits pick menu
/// entries and `P` toggles pause. Every other key is `Input::Other`, which
/// dismissal screens accept as "any key".
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> Input {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Input::Quit;
        }

        match key.code {
            // Player one - Arrow keys
            KeyCode::Up => Input::Steer(Player::One, Direction::Up),
            KeyCode::Down => Input::Steer(Player::One, Direction::Down),
            KeyCode::Left => Input::Steer(Player::One, Direction::Left),
            KeyCode::Right => Input::Steer(Player::One, Direction::Right),

            // Player two - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => Input::Steer(Player::Two, Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => Input::Steer(Player::Two, Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => Input::Steer(Player::Two, Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => Input::Steer(Player::Two, Direction::Right),

            // Menu entries
            KeyCode::Char(c @ '1'..='4') => Input::Choice(c as u8 - b'0'),

            // Controls
            KeyCode::Char('p') | KeyCode::Char('P') => Input::Pause,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Input::Quit,

            _ => Input::Other,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_arrow_keys_steer_player_one() {
        let handler = InputHandler::new();

        assert_eq!(
            handler.handle_key_event(key(KeyCode::Up)),
            Input::Steer(Player::One, Direction::Up)
        );
        assert_eq!(
            handler.handle_key_event(key(KeyCode::Down)),
            Input::Steer(Player::One, Direction::Down)
        );
        assert_eq!(
            handler.handle_key_event(key(KeyCode::Left)),
            Input::Steer(Player::One, Direction::Left)
        );
        assert_eq!(
            handler.handle_key_event(key(KeyCode::Right)),
            Input::Steer(Player::One, Direction::Right)
        );
    }

    #[test]
    fn test_wasd_steers_player_two() {
        let handler = InputHandler::new();

        assert_eq!(
            handler.handle_key_event(key(KeyCode::Char('w'))),
            Input::Steer(Player::Two, Direction::Up)
        );
        assert_eq!(
            handler.handle_key_event(key(KeyCode::Char('a'))),
            Input::Steer(Player::Two, Direction::Left)
        );
        assert_eq!(
            handler.handle_key_event(key(KeyCode::Char('s'))),
            Input::Steer(Player::Two, Direction::Down)
        );
        assert_eq!(
            handler.handle_key_event(KeyEvent::new(KeyCode::Char('D'), KeyModifiers::SHIFT)),
            Input::Steer(Player::Two, Direction::Right)
        );
    }

    #[test]
    fn test_menu_digits() {
        let handler = InputHandler::new();

        for (c, n) in [('1', 1), ('2', 2), ('3', 3), ('4', 4)] {
            assert_eq!(handler.handle_key_event(key(KeyCode::Char(c))), Input::Choice(n));
        }
        assert_eq!(handler.handle_key_event(key(KeyCode::Char('5'))), Input::Other);
    }

    #[test]
    fn test_pause_key() {
        let handler = InputHandler::new();
        assert_eq!(handler.handle_key_event(key(KeyCode::Char('p'))), Input::Pause);
        assert_eq!(handler.handle_key_event(key(KeyCode::Char('P'))), Input::Pause);
    }

    #[test]
    fn test_quit_keys() {
        let handler = InputHandler::new();

        assert_eq!(handler.handle_key_event(key(KeyCode::Char('q'))), Input::Quit);
        assert_eq!(handler.handle_key_event(key(KeyCode::Esc)), Input::Quit);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handler.handle_key_event(ctrl_c), Input::Quit);
    }

    #[test]
    fn test_unknown_key_is_any_key() {
        let handler = InputHandler::new();
        assert_eq!(handler.handle_key_event(key(KeyCode::Char('x'))), Input::Other);
        assert_eq!(handler.handle_key_event(key(KeyCode::Enter)), Input::Other);
    }
}
