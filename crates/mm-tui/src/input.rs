//! Input handling - convert key events to commands

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use hashbrown::HashMap;
use mm_core::action::Command;

/// Convert a key event to a game command using the default bindings.
///
/// Answer keys are not handled here; they only mean something while a
/// question is on screen, see `answer_index`.
pub fn key_to_command(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Command::Quit),
            _ => None,
        };
    }

    match key.code {
        // Arrow keys
        KeyCode::Up => Some(Command::Forward),
        KeyCode::Left => Some(Command::TurnLeft),
        KeyCode::Right => Some(Command::TurnRight),
        KeyCode::Down => Some(Command::TurnAround),

        // WASD
        KeyCode::Char('w') | KeyCode::Char('W') => Some(Command::Forward),
        KeyCode::Char('a') | KeyCode::Char('A') => Some(Command::TurnLeft),
        KeyCode::Char('d') | KeyCode::Char('D') => Some(Command::TurnRight),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(Command::TurnAround),

        KeyCode::Char('z') => Some(Command::Regenerate), // z : new maze
        KeyCode::Char('q') => Some(Command::Quit),

        _ => None,
    }
}

/// Choice index for an answer key: `1`-`9` or `a`-`i`
pub fn answer_index(key: KeyEvent) -> Option<usize> {
    match key.code {
        KeyCode::Char(c @ '1'..='9') => Some(c as usize - '1' as usize),
        KeyCode::Char(c @ 'a'..='i') => Some(c as usize - 'a' as usize),
        _ => None,
    }
}

/// Label shown next to choice `index` in the question overlay
pub fn answer_label(index: usize) -> char {
    char::from_digit(index as u32 + 1, 10).unwrap_or('?')
}

/// Parse a key name from a `BIND=` line: a single character or one of
/// `up`, `down`, `left`, `right`, `space`, `enter`, `esc`, `tab`.
pub fn parse_key(name: &str) -> Option<KeyCode> {
    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(KeyCode::Char(c));
    }
    match name.to_lowercase().as_str() {
        "up" => Some(KeyCode::Up),
        "down" => Some(KeyCode::Down),
        "left" => Some(KeyCode::Left),
        "right" => Some(KeyCode::Right),
        "space" => Some(KeyCode::Char(' ')),
        "enter" => Some(KeyCode::Enter),
        "esc" => Some(KeyCode::Esc),
        "tab" => Some(KeyCode::Tab),
        _ => None,
    }
}

/// User key bindings layered over the defaults
#[derive(Debug, Clone, Default)]
pub struct Keymap {
    bindings: HashMap<KeyCode, Command>,
}

impl Keymap {
    /// Build from `BIND=key:command` pairs; returns the entries that were rejected
    pub fn from_bindings(bindings: &HashMap<String, String>) -> (Self, Vec<String>) {
        let mut keymap = Self::default();
        let mut rejected = Vec::new();

        for (key, command) in bindings {
            match (parse_key(key), Command::from_name(command)) {
                (Some(code), Some(cmd)) => {
                    keymap.bindings.insert(code, cmd);
                }
                _ => rejected.push(format!("{key}:{command}")),
            }
        }
        rejected.sort();

        (keymap, rejected)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Bound command for a key, falling back to the defaults
    pub fn command_for(&self, key: KeyEvent) -> Option<Command> {
        if !key.modifiers.contains(KeyModifiers::CONTROL)
            && let Some(&command) = self.bindings.get(&key.code)
        {
            return Some(command);
        }
        key_to_command(key)
    }
}
