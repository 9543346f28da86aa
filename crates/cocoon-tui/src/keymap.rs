//! Key bindings from the `[keymap]` config section.
//!
//! Bindings use Vim notation: `j`, `G` (Shift+g), `<C-d>`, `<S-Tab>`, `<CR>`.
//! A two-character binding such as `gg` is a sequence: the first key arms it
//! and the second completes it.

use std::collections::HashMap;

use cocoon_core::config::KeymapConfig;
use crossterm::event::{KeyCode, KeyModifiers};
use tracing::warn;

use crate::input::Action;

/// Key code plus modifiers, as stored in the keymap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn simple(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CONTROL)
    }

    pub fn shift(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::SHIFT)
    }

    /// The plain character this binding types, if any
    fn plain_char(&self) -> Option<char> {
        match self.code {
            KeyCode::Char(c) if self.modifiers == KeyModifiers::NONE => Some(c),
            _ => None,
        }
    }
}

/// Keys that work whatever the config says. Configured bindings win for
/// everything except Ctrl+C and Esc.
const FIXED_BINDINGS: [(KeyCode, KeyModifiers, Action); 9] = [
    (KeyCode::Up, KeyModifiers::NONE, Action::ScrollUp),
    (KeyCode::Down, KeyModifiers::NONE, Action::ScrollDown),
    (KeyCode::PageUp, KeyModifiers::NONE, Action::ScrollPageUp),
    (KeyCode::PageDown, KeyModifiers::NONE, Action::ScrollPageDown),
    (KeyCode::Char(' '), KeyModifiers::NONE, Action::ScrollPageDown),
    (KeyCode::Home, KeyModifiers::NONE, Action::JumpToTop),
    (KeyCode::End, KeyModifiers::NONE, Action::JumpToBottom),
    (KeyCode::Char('c'), KeyModifiers::CONTROL, Action::Quit),
    (KeyCode::Esc, KeyModifiers::NONE, Action::ExitMode),
];

/// Key-to-action lookup built once at startup
#[derive(Debug)]
pub struct Keymap {
    bindings: HashMap<KeyBinding, Action>,
    /// Two-key sequences, keyed by first then second character
    sequences: HashMap<(char, char), Action>,
}

impl Default for Keymap {
    fn default() -> Self {
        Self::from_config(&KeymapConfig::default())
    }
}

impl Keymap {
    pub fn from_config(config: &KeymapConfig) -> Self {
        let mut keymap = Self {
            bindings: HashMap::new(),
            sequences: HashMap::new(),
        };

        let configured = [
            (&config.quit, Action::Quit),
            (&config.scroll_down, Action::ScrollDown),
            (&config.scroll_up, Action::ScrollUp),
            (&config.scroll_half_down, Action::ScrollHalfPageDown),
            (&config.scroll_half_up, Action::ScrollHalfPageUp),
            (&config.scroll_page_down, Action::ScrollPageDown),
            (&config.scroll_page_up, Action::ScrollPageUp),
            (&config.jump_to_top, Action::JumpToTop),
            (&config.jump_to_bottom, Action::JumpToBottom),
            (&config.next_section, Action::NextSection),
            (&config.prev_section, Action::PrevSection),
            (&config.toggle_menu, Action::ToggleMenu),
            (&config.apply, Action::Apply),
        ];
        for (notation, action) in configured {
            keymap.bind(notation, action);
        }

        for (code, modifiers, action) in FIXED_BINDINGS {
            let binding = KeyBinding::new(code, modifiers);
            match action {
                Action::Quit | Action::ExitMode => {
                    keymap.bindings.insert(binding, action);
                }
                _ => {
                    keymap.bindings.entry(binding).or_insert(action);
                }
            }
        }

        keymap
    }

    fn bind(&mut self, notation: &str, action: Action) {
        if let Some(sequence) = parse_sequence(notation) {
            if let Some(existing) = self.sequences.get(&sequence) {
                warn!(notation, ?existing, ?action, "key sequence already bound, ignoring");
            } else {
                self.sequences.insert(sequence, action);
            }
            return;
        }

        let Some(binding) = parse_key_binding(notation) else {
            warn!(notation, ?action, "invalid key binding, ignoring");
            return;
        };
        if let Some(existing) = self.bindings.get(&binding) {
            warn!(notation, ?existing, ?action, "key already bound, ignoring");
        } else {
            self.bindings.insert(binding, action);
        }
    }

    /// Action bound to a single key
    pub fn get(&self, binding: &KeyBinding) -> Option<&Action> {
        self.bindings.get(binding)
    }

    /// The character to remember if `binding` arms a sequence
    pub fn sequence_prefix(&self, binding: &KeyBinding) -> Option<char> {
        let c = binding.plain_char()?;
        self.sequences.keys().any(|(first, _)| *first == c).then_some(c)
    }

    /// Action for `pending` followed by `binding`
    pub fn complete_sequence(&self, pending: char, binding: &KeyBinding) -> Option<&Action> {
        let second = binding.plain_char()?;
        self.sequences.get(&(pending, second))
    }
}

/// `gg`-style notation: exactly two plain lowercase characters
fn parse_sequence(notation: &str) -> Option<(char, char)> {
    let mut chars = notation.trim().chars();
    let (first, second) = (chars.next()?, chars.next()?);
    let plain = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit();
    (chars.next().is_none() && plain(first) && plain(second)).then_some((first, second))
}

/// Parse one key in Vim notation
///
/// `x`, `G`, `/`, `<C-x>`, `<S-Tab>`, `<A-x>`, `<CR>`, `<Esc>`, `<Space>`,
/// arrows, `<Home>`/`<End>`, `<PageUp>`/`<PageDown>` and `<F1>`..`<F12>`.
pub fn parse_key_binding(notation: &str) -> Option<KeyBinding> {
    let notation = notation.trim();

    if let Some(inner) = notation.strip_prefix('<').and_then(|s| s.strip_suffix('>')) {
        return parse_bracketed(inner);
    }

    let mut chars = notation.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    if c.is_ascii_uppercase() {
        Some(KeyBinding::shift(KeyCode::Char(c)))
    } else {
        Some(KeyBinding::simple(KeyCode::Char(c)))
    }
}

/// Contents of `<...>`: any number of `C-`/`S-`/`A-` prefixes, then a key name
fn parse_bracketed(inner: &str) -> Option<KeyBinding> {
    let mut modifiers = KeyModifiers::NONE;
    let mut rest = inner;

    loop {
        let (flag, tail) = match rest.get(..2) {
            Some("C-") | Some("c-") => (KeyModifiers::CONTROL, &rest[2..]),
            Some("S-") | Some("s-") => (KeyModifiers::SHIFT, &rest[2..]),
            Some("A-") | Some("a-") | Some("M-") | Some("m-") => (KeyModifiers::ALT, &rest[2..]),
            _ => break,
        };
        if tail.is_empty() {
            break;
        }
        modifiers |= flag;
        rest = tail;
    }

    let mut code = parse_key_name(rest)?;
    // Terminals report Shift+Tab as BackTab
    if code == KeyCode::Tab && modifiers.contains(KeyModifiers::SHIFT) {
        code = KeyCode::BackTab;
    }
    // Match what terminals send: Shift+g arrives as 'G', Ctrl+D as 'd'
    if let KeyCode::Char(c) = code {
        if modifiers == KeyModifiers::SHIFT {
            code = KeyCode::Char(c.to_ascii_uppercase());
        } else if !modifiers.is_empty() {
            code = KeyCode::Char(c.to_ascii_lowercase());
        }
    }
    Some(KeyBinding::new(code, modifiers))
}

fn parse_key_name(name: &str) -> Option<KeyCode> {
    let lower = name.to_ascii_lowercase();
    let code = match lower.as_str() {
        "cr" | "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "space" | "spc" => KeyCode::Char(' '),
        "bs" | "backspace" => KeyCode::Backspace,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" | "pgup" => KeyCode::PageUp,
        "pagedown" | "pgdn" => KeyCode::PageDown,
        _ => {
            if let Some(n) = lower.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
                return (1..=12).contains(&n).then_some(KeyCode::F(n));
            }
            let mut chars = name.chars();
            let c = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            KeyCode::Char(c)
        }
    };
    Some(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_keys() {
        assert_eq!(parse_key_binding("j"), Some(KeyBinding::simple(KeyCode::Char('j'))));
        assert_eq!(parse_key_binding("/"), Some(KeyBinding::simple(KeyCode::Char('/'))));
        assert_eq!(parse_key_binding("G"), Some(KeyBinding::shift(KeyCode::Char('G'))));
        assert_eq!(parse_key_binding("jk"), None);
        assert_eq!(parse_key_binding(""), None);
    }

    #[test]
    fn test_parse_bracketed() {
        assert_eq!(parse_key_binding("<C-d>"), Some(KeyBinding::ctrl(KeyCode::Char('d'))));
        assert_eq!(parse_key_binding("<C-D>"), Some(KeyBinding::ctrl(KeyCode::Char('d'))));
        assert_eq!(parse_key_binding("<CR>"), Some(KeyBinding::simple(KeyCode::Enter)));
        assert_eq!(parse_key_binding("<Space>"), Some(KeyBinding::simple(KeyCode::Char(' '))));
        assert_eq!(parse_key_binding("<S-Tab>"), Some(KeyBinding::shift(KeyCode::BackTab)));
        assert_eq!(parse_key_binding("<S-g>"), parse_key_binding("G"));
        assert_eq!(parse_key_binding("<F5>"), Some(KeyBinding::simple(KeyCode::F(5))));
        assert_eq!(parse_key_binding("<F13>"), None);
        assert_eq!(
            parse_key_binding("<C-A-x>"),
            Some(KeyBinding::new(
                KeyCode::Char('x'),
                KeyModifiers::CONTROL | KeyModifiers::ALT
            ))
        );
        assert_eq!(parse_key_binding("<Nope>"), None);
    }

    #[test]
    fn test_parse_sequence() {
        assert_eq!(parse_sequence("gg"), Some(('g', 'g')));
        assert_eq!(parse_sequence("g"), None);
        assert_eq!(parse_sequence("gG"), None);
        assert_eq!(parse_sequence("<C-d>"), None);
    }

    #[test]
    fn test_default_keymap() {
        let keymap = Keymap::default();
        let get = |binding| keymap.get(&binding).cloned();

        assert_eq!(get(KeyBinding::simple(KeyCode::Char('q'))), Some(Action::Quit));
        assert_eq!(get(KeyBinding::simple(KeyCode::Char('j'))), Some(Action::ScrollDown));
        assert_eq!(get(KeyBinding::ctrl(KeyCode::Char('d'))), Some(Action::ScrollHalfPageDown));
        assert_eq!(get(KeyBinding::simple(KeyCode::Tab)), Some(Action::NextSection));
        assert_eq!(get(KeyBinding::shift(KeyCode::BackTab)), Some(Action::PrevSection));
        assert_eq!(get(KeyBinding::simple(KeyCode::Enter)), Some(Action::Apply));
        assert_eq!(get(KeyBinding::simple(KeyCode::Char('g'))), None);

        let g = KeyBinding::simple(KeyCode::Char('g'));
        assert_eq!(keymap.sequence_prefix(&g), Some('g'));
        assert_eq!(keymap.complete_sequence('g', &g), Some(&Action::JumpToTop));
        assert_eq!(
            keymap.complete_sequence('g', &KeyBinding::simple(KeyCode::Char('j'))),
            None
        );
    }

    #[test]
    fn test_conflicting_binding_keeps_first() {
        let config = KeymapConfig {
            toggle_menu: "q".to_string(),
            ..KeymapConfig::default()
        };
        let keymap = Keymap::from_config(&config);
        assert_eq!(
            keymap.get(&KeyBinding::simple(KeyCode::Char('q'))),
            Some(&Action::Quit)
        );
    }

    #[test]
    fn test_fixed_bindings() {
        // Rebinding Space keeps the config's choice, Ctrl+C always quits
        let config = KeymapConfig {
            apply: "<Space>".to_string(),
            scroll_down: "<C-c>".to_string(),
            ..KeymapConfig::default()
        };
        let keymap = Keymap::from_config(&config);
        assert_eq!(
            keymap.get(&KeyBinding::simple(KeyCode::Char(' '))),
            Some(&Action::Apply)
        );
        assert_eq!(
            keymap.get(&KeyBinding::ctrl(KeyCode::Char('c'))),
            Some(&Action::Quit)
        );
        assert_eq!(
            keymap.get(&KeyBinding::simple(KeyCode::PageDown)),
            Some(&Action::ScrollPageDown)
        );
    }

    #[test]
    fn test_custom_sequence() {
        let config = KeymapConfig {
            jump_to_top: "tt".to_string(),
            ..KeymapConfig::default()
        };
        let keymap = Keymap::from_config(&config);
        let t = KeyBinding::simple(KeyCode::Char('t'));
        assert_eq!(keymap.sequence_prefix(&t), Some('t'));
        assert_eq!(keymap.sequence_prefix(&KeyBinding::simple(KeyCode::Char('g'))), None);
        assert_eq!(keymap.complete_sequence('t', &t), Some(&Action::JumpToTop));
    }
}
