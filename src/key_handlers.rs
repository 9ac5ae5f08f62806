use crate::chat_state::ChatState;
use crate::constants::SCROLL_STEP;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What the event loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Submit,
    CancelPending,
    Quit,
    /// Handled entirely on the chat state.
    Handled,
    Ignored,
}

/// Applies editing and scrolling keys to `state` and maps the rest to actions.
pub fn handle_key(key: KeyEvent, state: &mut ChatState) -> KeyAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Enter => KeyAction::Submit,
        KeyCode::Esc => KeyAction::Quit,
        KeyCode::Char('c') if ctrl => KeyAction::Quit,
        KeyCode::Char('x') if ctrl => KeyAction::CancelPending,
        KeyCode::Char('u') if ctrl => {
            state.scroll_up(SCROLL_STEP);
            KeyAction::Handled
        }
        KeyCode::Char('d') if ctrl => {
            state.scroll_down(SCROLL_STEP);
            KeyAction::Handled
        }
        KeyCode::Char(_) if ctrl => KeyAction::Ignored,
        KeyCode::Char(c) => {
            state.insert_char(c);
            KeyAction::Handled
        }
        KeyCode::Backspace => {
            state.backspace();
            KeyAction::Handled
        }
        KeyCode::PageUp | KeyCode::Up => {
            state.scroll_up(SCROLL_STEP);
            KeyAction::Handled
        }
        KeyCode::PageDown | KeyCode::Down => {
            state.scroll_down(SCROLL_STEP);
            KeyAction::Handled
        }
        KeyCode::End => {
            state.scroll_to_latest();
            KeyAction::Handled
        }
        _ => KeyAction::Ignored,
    }
}
