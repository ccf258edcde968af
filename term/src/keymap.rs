use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use minesweep_core::{Direction, InputEvent};

/// Maps a key press to a game event, `None` for key releases.
pub fn map_key(key: KeyEvent) -> Option<InputEvent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(match key.code {
            // raw mode swallows SIGINT, and ^D stands for end of input
            KeyCode::Char('c' | 'd') => InputEvent::Quit,
            _ => InputEvent::Ignored,
        });
    }

    Some(match key.code {
        KeyCode::Char('w' | 'W') | KeyCode::Up => InputEvent::Move(Direction::Up),
        KeyCode::Char('s' | 'S') | KeyCode::Down => InputEvent::Move(Direction::Down),
        KeyCode::Char('a' | 'A') | KeyCode::Left => InputEvent::Move(Direction::Left),
        KeyCode::Char('d' | 'D') | KeyCode::Right => InputEvent::Move(Direction::Right),
        KeyCode::Char('f' | 'F') => InputEvent::ToggleFlag,
        KeyCode::Char(' ') | KeyCode::Enter => InputEvent::Open,
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => InputEvent::Quit,
        _ => InputEvent::Ignored,
    })
}

/// Whether a key dismisses the end-of-game screen.
pub fn is_acknowledge(key: KeyEvent) -> bool {
    key.kind != KeyEventKind::Release
        && (matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q'))
            || (key.modifiers.contains(KeyModifiers::CONTROL)
                && matches!(key.code, KeyCode::Char('c' | 'd'))))
}
