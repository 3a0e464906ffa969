use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::input::KeyModifiers;

/// Matches key code and modifiers. Shift is ignored for characters, whose case already carries it.
pub fn key_event_matches(pattern: &KeyEvent, event: &KeyEvent) -> bool {
    if pattern.code != event.code {
        return false;
    }
    match pattern.code {
        KeyCode::Char(_) => {
            pattern.modifiers.ctrl == event.modifiers.ctrl
                && pattern.modifiers.alt == event.modifiers.alt
        }
        _ => pattern.modifiers == event.modifiers,
    }
}

/// Returns `true` if `event` matches any of `patterns`.
pub fn matches_any(patterns: &[KeyEvent], event: &KeyEvent) -> bool {
    patterns.iter().any(|p| key_event_matches(p, event))
}

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code)
}

pub fn key_char(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c))
}

pub fn key_ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c)).with_modifiers(KeyModifiers::ctrl())
}
