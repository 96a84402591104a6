//! Keyboard input handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::state::AppState;

/// Action resulting from key handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    None,
    Quit,
    /// Poll immediately, even while paused.
    Refresh,
}

/// Handles a key event and updates state.
pub fn handle_key(state: &mut AppState, key: KeyEvent) -> KeyAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return KeyAction::Quit;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,
        KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Char(' ') => {
            state.toggle_pause();
            KeyAction::None
        }
        KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Refresh,
        KeyCode::Char('+') | KeyCode::Char('=') => {
            state.grow_limit();
            KeyAction::None
        }
        KeyCode::Char('-') | KeyCode::Char('_') => {
            state.shrink_limit();
            KeyAction::None
        }
        KeyCode::Char('0') => {
            state.reset_limit();
            KeyAction::None
        }
        _ => KeyAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_quit_keys() {
        let mut state = AppState::default();
        assert_eq!(handle_key(&mut state, key(KeyCode::Char('q'))), KeyAction::Quit);
        assert_eq!(handle_key(&mut state, key(KeyCode::Esc)), KeyAction::Quit);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key(&mut state, ctrl_c), KeyAction::Quit);
    }

    #[test]
    fn test_plain_c_is_ignored() {
        let mut state = AppState::default();
        assert_eq!(handle_key(&mut state, key(KeyCode::Char('c'))), KeyAction::None);
    }

    #[test]
    fn test_pause_toggle() {
        let mut state = AppState::default();
        handle_key(&mut state, key(KeyCode::Char('p')));
        assert!(state.paused);
        handle_key(&mut state, key(KeyCode::Char(' ')));
        assert!(!state.paused);
    }

    #[test]
    fn test_refresh() {
        let mut state = AppState::default();
        assert_eq!(handle_key(&mut state, key(KeyCode::Char('r'))), KeyAction::Refresh);
    }

    #[test]
    fn test_limit_keys() {
        let mut state = AppState::new(Some(5));
        handle_key(&mut state, key(KeyCode::Char('+')));
        assert_eq!(state.row_limit, Some(6));
        handle_key(&mut state, key(KeyCode::Char('-')));
        handle_key(&mut state, key(KeyCode::Char('-')));
        assert_eq!(state.row_limit, Some(4));
        handle_key(&mut state, key(KeyCode::Char('0')));
        assert_eq!(state.row_limit, None);
    }
}
