//! Backend-agnostic input events.
//!
//! Widgets in this crate never read the terminal themselves. The app converts whatever its
//! backend produces into an [`InputEvent`] (see the `crossterm` feature) and hands it to the
//! widget's `handle_event`.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyModifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl KeyModifiers {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::default()
        }
    }

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::default()
        }
    }

    /// Returns `true` when a chord modifier (ctrl or alt) is held.
    pub fn is_chord(&self) -> bool {
        self.ctrl || self.alt
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyCode {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    Esc,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyEvent {
    pub fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::none(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: KeyModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseEventKind {
    Down(MouseButton),
    Up(MouseButton),
    ScrollUp,
    ScrollDown,
}

/// A mouse event in absolute terminal coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MouseEvent {
    pub x: u16,
    pub y: u16,
    pub kind: MouseEventKind,
    pub modifiers: KeyModifiers,
}

impl MouseEvent {
    /// A plain left-button press at `(x, y)`. This is what the widgets treat as a click.
    pub fn click(x: u16, y: u16) -> Self {
        Self {
            x,
            y,
            kind: MouseEventKind::Down(MouseButton::Left),
            modifiers: KeyModifiers::none(),
        }
    }

    pub fn scroll_down(x: u16, y: u16) -> Self {
        Self {
            x,
            y,
            kind: MouseEventKind::ScrollDown,
            modifiers: KeyModifiers::none(),
        }
    }

    pub fn scroll_up(x: u16, y: u16) -> Self {
        Self {
            x,
            y,
            kind: MouseEventKind::ScrollUp,
            modifiers: KeyModifiers::none(),
        }
    }

    pub fn is_click(&self) -> bool {
        self.kind == MouseEventKind::Down(MouseButton::Left)
    }

    pub fn position(&self) -> ratatui::layout::Position {
        ratatui::layout::Position::new(self.x, self.y)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyEvent),
    Paste(String),
    Mouse(MouseEvent),
}

impl InputEvent {
    pub fn key(code: KeyCode) -> Self {
        InputEvent::Key(KeyEvent::new(code))
    }

    pub fn char(c: char) -> Self {
        InputEvent::Key(KeyEvent::new(KeyCode::Char(c)))
    }

    pub fn click(x: u16, y: u16) -> Self {
        InputEvent::Mouse(MouseEvent::click(x, y))
    }
}
