#![warn(clippy::all, clippy::pedantic)]

//! Key mapping from terminal events to engine commands.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// The discrete commands the engine consumes. Every key event maps to at
/// most one of these; nothing is buffered or queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    Rotate,
    TogglePause,
    Restart,
}

/// Map a key event to an engine command. Unknown keys map to nothing and
/// are dropped by the caller, matching the engine's silent-reject policy.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<Command> {
    match key.code {
        KeyCode::Left => Some(Command::MoveLeft),
        KeyCode::Right => Some(Command::MoveRight),
        KeyCode::Down => Some(Command::SoftDrop),
        KeyCode::Up => Some(Command::Rotate),
        KeyCode::Char(' ') => Some(Command::HardDrop),
        KeyCode::Char('p' | 'P') => Some(Command::TogglePause),
        KeyCode::Char('r' | 'R') => Some(Command::Restart),
        _ => None,
    }
}

/// Quit is handled by the outer loop, not the engine.
#[must_use]
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q' | 'Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
