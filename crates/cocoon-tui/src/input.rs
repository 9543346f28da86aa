use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::App;
use crate::keymap::{KeyBinding, Keymap};

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    ScrollDown,
    ScrollUp,
    ScrollHalfPageDown,
    ScrollHalfPageUp,
    ScrollPageDown,
    ScrollPageUp,
    JumpToTop,
    JumpToBottom,
    /// First key of a sequence such as `gg`
    Pending(char),
    NextSection,
    PrevSection,
    /// Follow a nav link (index into the nav items)
    Navigate(usize),
    ToggleMenu,
    /// Menu cursor
    MenuUp,
    MenuDown,
    MenuSelect,
    Apply,
    ExitMode,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App, keymap: &Keymap) -> Action {
    let binding = KeyBinding::new(key.code, normalize_modifiers(key.code, key.modifiers));

    if app.menu_open {
        return handle_menu_mode(key, binding, keymap);
    }

    if let Some(action) = app
        .pending_key
        .and_then(|pending| keymap.complete_sequence(pending, &binding))
    {
        return action.clone();
    }
    if let Some(prefix) = keymap.sequence_prefix(&binding) {
        return Action::Pending(prefix);
    }

    if let Some(action) = keymap.get(&binding) {
        return action.clone();
    }

    match key.code {
        KeyCode::Char(c @ '1'..='9') => Action::Navigate(c as usize - '1' as usize),
        _ => Action::None,
    }
}

/// Key events while the navigation menu is open
fn handle_menu_mode(key: KeyEvent, binding: KeyBinding, keymap: &Keymap) -> Action {
    match key.code {
        KeyCode::Char(c @ '1'..='9') => return Action::Navigate(c as usize - '1' as usize),
        KeyCode::Esc => return Action::ToggleMenu,
        KeyCode::Enter => return Action::MenuSelect,
        KeyCode::Up => return Action::MenuUp,
        KeyCode::Down => return Action::MenuDown,
        _ => {}
    }

    match keymap.get(&binding) {
        Some(Action::Quit) => Action::Quit,
        Some(Action::ToggleMenu) => Action::ToggleMenu,
        Some(Action::ScrollDown) => Action::MenuDown,
        Some(Action::ScrollUp) => Action::MenuUp,
        _ => Action::None,
    }
}

/// Terminals report Shift on uppercase letters and '?'-style symbols
/// inconsistently; bindings for uppercase letters are stored with SHIFT.
fn normalize_modifiers(code: KeyCode, modifiers: KeyModifiers) -> KeyModifiers {
    match code {
        KeyCode::Char(c) if c.is_ascii_uppercase() => modifiers | KeyModifiers::SHIFT,
        KeyCode::BackTab => modifiers | KeyModifiers::SHIFT,
        _ => modifiers,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use cocoon_core::AppConfig;

    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    fn app() -> App {
        App::new(Arc::new(AppConfig::default()))
    }

    #[test]
    fn test_page_keys() {
        let app = app();
        let keymap = Keymap::default();
        let key = |code| handle_key_event(press(code, KeyModifiers::NONE), &app, &keymap);

        assert_eq!(key(KeyCode::Char('j')), Action::ScrollDown);
        assert_eq!(key(KeyCode::Down), Action::ScrollDown);
        assert_eq!(key(KeyCode::Tab), Action::NextSection);
        assert_eq!(key(KeyCode::Char('2')), Action::Navigate(1));
        assert_eq!(key(KeyCode::Char('m')), Action::ToggleMenu);
        assert_eq!(key(KeyCode::Char('x')), Action::None);
    }

    #[test]
    fn test_shifted_keys() {
        let app = app();
        let keymap = Keymap::default();

        // some terminals omit SHIFT on uppercase letters
        let bare = handle_key_event(press(KeyCode::Char('G'), KeyModifiers::NONE), &app, &keymap);
        assert_eq!(bare, Action::JumpToBottom);
        let shifted = handle_key_event(press(KeyCode::Char('G'), KeyModifiers::SHIFT), &app, &keymap);
        assert_eq!(shifted, Action::JumpToBottom);
        let back = handle_key_event(press(KeyCode::BackTab, KeyModifiers::NONE), &app, &keymap);
        assert_eq!(back, Action::PrevSection);
    }

    #[test]
    fn test_gg_sequence() {
        let mut app = app();
        let keymap = Keymap::default();
        let g = press(KeyCode::Char('g'), KeyModifiers::NONE);

        assert_eq!(handle_key_event(g, &app, &keymap), Action::Pending('g'));
        app.pending_key = Some('g');
        assert_eq!(handle_key_event(g, &app, &keymap), Action::JumpToTop);
    }

    #[test]
    fn test_menu_mode_keys() {
        let mut app = app();
        app.menu_open = true;
        let keymap = Keymap::default();
        let key = |code| handle_key_event(press(code, KeyModifiers::NONE), &app, &keymap);

        assert_eq!(key(KeyCode::Char('j')), Action::MenuDown);
        assert_eq!(key(KeyCode::Char('k')), Action::MenuUp);
        assert_eq!(key(KeyCode::Enter), Action::MenuSelect);
        assert_eq!(key(KeyCode::Esc), Action::ToggleMenu);
        assert_eq!(key(KeyCode::Char('3')), Action::Navigate(2));
        assert_eq!(key(KeyCode::Char('q')), Action::Quit);
        assert_eq!(key(KeyCode::Tab), Action::None);
    }
}
