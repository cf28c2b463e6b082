//! Keyboard mapping from terminal key events to game actions

use crate::settings::Settings;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, ModifierKeyCode};
use voxtris::{Action, Direction};

/// What the front end should do for a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Game(Action),
    Quit,
}

/// Key bindings configuration - supports multiple keys per action
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: Vec<(Vec<KeyCode>, Command)>,
}

impl KeyBindings {
    /// Parse a key string into KeyCode
    fn parse_key(s: &str) -> Option<KeyCode> {
        let code = match s.to_lowercase().as_str() {
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "space" => KeyCode::Char(' '),
            "enter" => KeyCode::Enter,
            "tab" => KeyCode::Tab,
            "esc" | "escape" => KeyCode::Esc,
            "shift" => KeyCode::Modifier(ModifierKeyCode::LeftShift),
            "ctrl" | "control" => KeyCode::Modifier(ModifierKeyCode::LeftControl),
            "alt" => KeyCode::Modifier(ModifierKeyCode::LeftAlt),
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => {
                        tracing::warn!("Unknown key name in settings: {:?}", s);
                        return None;
                    }
                }
            }
        };
        Some(code)
    }

    /// Parse a list of key strings into KeyCodes, dropping unknown names
    fn parse_keys(keys: &[String]) -> Vec<KeyCode> {
        keys.iter().filter_map(|s| Self::parse_key(s)).collect()
    }

    /// Create keybindings from settings
    pub fn from_settings(settings: &Settings) -> Self {
        let keys = &settings.keys;
        let game = |action| Command::Game(action);
        let bindings = vec![
            (&keys.move_left, game(Action::Move(Direction::Left))),
            (&keys.move_right, game(Action::Move(Direction::Right))),
            (&keys.move_forward, game(Action::Move(Direction::Forward))),
            (&keys.move_backward, game(Action::Move(Direction::Backward))),
            (&keys.soft_drop, game(Action::Move(Direction::Down))),
            (&keys.hard_drop, game(Action::HardDrop)),
            (&keys.rotate, game(Action::Rotate)),
            (&keys.pause, game(Action::Pause)),
            (&keys.restart, game(Action::Restart)),
            (&keys.quit, Command::Quit),
        ];
        Self {
            bindings: bindings
                .into_iter()
                .map(|(names, command)| (Self::parse_keys(names), command))
                .collect(),
        }
    }

    /// Map a key press to a command; first binding wins
    pub fn command_for(&self, key: KeyEvent) -> Option<Command> {
        // Ctrl+C always quits
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Command::Quit);
        }

        let code = normalize_key(key.code);
        self.bindings
            .iter()
            .find(|(codes, _)| codes.contains(&code))
            .map(|(_, command)| *command)
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// Normalize key codes for consistent handling
fn normalize_key(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_default_wasd_layout() {
        let keys = KeyBindings::default();
        let check = |code, action| assert_eq!(keys.command_for(press(code)), Some(Command::Game(action)));
        check(KeyCode::Char('a'), Action::Move(Direction::Left));
        check(KeyCode::Char('d'), Action::Move(Direction::Right));
        check(KeyCode::Char('w'), Action::Move(Direction::Forward));
        check(KeyCode::Char('s'), Action::Move(Direction::Backward));
        check(KeyCode::Char('q'), Action::Rotate);
        check(KeyCode::Char('e'), Action::Rotate);
        check(KeyCode::Char(' '), Action::HardDrop);
        check(KeyCode::Char('p'), Action::Pause);
        check(KeyCode::Char('r'), Action::Restart);
        assert_eq!(keys.command_for(press(KeyCode::Esc)), Some(Command::Quit));
        assert_eq!(keys.command_for(press(KeyCode::Char('z'))), None);
    }

    #[test]
    fn test_default_arrow_keys() {
        let keys = KeyBindings::default();
        let check = |code, action| assert_eq!(keys.command_for(press(code)), Some(Command::Game(action)));
        check(KeyCode::Left, Action::Move(Direction::Left));
        check(KeyCode::Right, Action::Move(Direction::Right));
        check(KeyCode::Up, Action::Move(Direction::Forward));
        check(KeyCode::Down, Action::Move(Direction::Down));
        check(KeyCode::Char('x'), Action::Move(Direction::Down));
    }

    #[test]
    fn test_uppercase_and_ctrl_c() {
        let keys = KeyBindings::default();
        assert_eq!(
            keys.command_for(press(KeyCode::Char('A'))),
            Some(Command::Game(Action::Move(Direction::Left)))
        );
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(keys.command_for(ctrl_c), Some(Command::Quit));
    }

    #[test]
    fn test_custom_bindings_and_unknown_names() {
        let mut settings = Settings::default();
        settings.keys.hard_drop = vec!["Enter".to_string(), "nonsense".to_string()];
        let keys = KeyBindings::from_settings(&settings);
        assert_eq!(
            keys.command_for(press(KeyCode::Enter)),
            Some(Command::Game(Action::HardDrop))
        );
        assert_eq!(keys.command_for(press(KeyCode::Char(' '))), None);
    }
}
