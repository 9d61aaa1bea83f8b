//! Key mapping for terminal play.
//!
//! The match is turn-based, so there is no held-key handling: every key press
//! maps to at most one command.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Commands the frame loop understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    CursorUp,
    CursorDown,
    CursorLeft,
    CursorRight,
    /// Pick the cell under the cursor.
    Pick,
    /// Choose action N (zero-based) for the selected unit.
    ChooseAction(usize),
    /// Back navigation: cancel the pending action or drop the selection.
    Cancel,
    EndTurn,
    Quit,
}

/// Maps a key event to a command, if any.
pub fn map_key(key: KeyEvent) -> Option<Command> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Command::Quit);
    }
    match key.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Command::CursorUp),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Command::CursorDown),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Command::CursorLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Command::CursorRight),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Command::Pick),
        KeyCode::Char(c @ '1'..='4') => {
            Some(Command::ChooseAction(c as usize - '1' as usize))
        }
        KeyCode::Esc | KeyCode::Backspace => Some(Command::Cancel),
        KeyCode::Char('e') | KeyCode::Char('E') => Some(Command::EndTurn),
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(Command::Quit),
        _ => None,
    }
}
