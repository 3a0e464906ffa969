use ratatui::buffer::Buffer;
use ratatui::layout::Constraint;
use ratatui::layout::Layout;
use ratatui::layout::Position;
use ratatui::layout::Rect;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Widget;
use unicode_width::UnicodeWidthChar;

use super::props::InputFieldProps;
use super::style::FieldStyle;
use crate::input::InputEvent;
use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::input::MouseEvent;
use crate::keymap;
use crate::render;
use crate::spinner;
use crate::theme::Theme;
use crate::theme::ThemeMode;

pub const CLEAR_LABEL: &str = "Clear input";
pub const CLEAR_GLYPH: &str = "×";
const REVEAL_GLYPH: &str = "◉";
const HIDE_GLYPH: &str = "○";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldAction {
    None,
    Redraw,
    /// The value the caller should store. Also delivered to the change callback.
    Changed(String),
}

/// The reveal toggle of a password field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevealAffordance {
    pub revealed: bool,
}

impl RevealAffordance {
    /// Accessibility label: what activating the toggle will do.
    pub fn label(&self) -> &'static str {
        if self.revealed {
            "Hide password"
        } else {
            "Show password"
        }
    }

    pub fn glyph(&self) -> &'static str {
        if self.revealed { HIDE_GLYPH } else { REVEAL_GLYPH }
    }
}

/// Helper or error line under the input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SupportingText<'a> {
    /// `{control id}-error` when invalid, `{control id}-helper` otherwise.
    pub id: Option<String>,
    pub text: &'a str,
    pub is_error: bool,
}

/// Derived state of an [`InputField`] for a given value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldView<'a> {
    pub control_id: Option<&'a str>,
    pub name: Option<&'a str>,
    pub label: Option<&'a str>,
    pub required: bool,
    /// Text drawn in the input: the value, or one mask glyph per character while masked.
    pub display: String,
    /// Set when the value is empty and a placeholder exists.
    pub placeholder: Option<&'a str>,
    /// The control refuses input (disabled or loading).
    pub input_disabled: bool,
    pub aria_invalid: bool,
    pub described_by: Option<String>,
    pub busy: bool,
    pub clear_visible: bool,
    pub reveal: Option<RevealAffordance>,
    pub supporting: Option<SupportingText<'a>>,
}

#[derive(Clone, Copy, Debug, Default)]
struct FieldHits {
    input: Option<Rect>,
    clear: Option<Rect>,
    reveal: Option<Rect>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Affordance {
    Spinner,
    Clear,
    Reveal,
}

struct Drawn {
    hits: FieldHits,
    offset: usize,
    cursor: Option<Position>,
}

/// A single-line text input with label, helper/error text and clear/reveal affordances.
///
/// The value is owned by the caller: pass it to `view`, `handle_event` and `render`, and store
/// the string carried by [`FieldAction::Changed`]. The field itself only keeps whether masked
/// text is revealed, the edit cursor and the horizontal scroll offset.
///
/// Variant and size change how the field is drawn, never how it behaves.
pub struct InputField {
    props: InputFieldProps,
    theme: Theme,
    custom_theme: bool,
    revealed: bool,
    /// Char index into the value; clamped whenever a value is seen.
    cursor: usize,
    offset: usize,
    tick: u64,
    hits: FieldHits,
    cursor_screen: Option<Position>,
    on_change: Option<Box<dyn FnMut(&str)>>,
}

impl Default for InputField {
    fn default() -> Self {
        Self::with_props(InputFieldProps::default())
    }
}

impl InputField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_props(props: InputFieldProps) -> Self {
        Self {
            theme: Theme::for_mode(ThemeMode::from_dark_flag(props.dark_mode)),
            custom_theme: false,
            props,
            revealed: false,
            cursor: usize::MAX,
            offset: 0,
            tick: 0,
            hits: FieldHits::default(),
            cursor_screen: None,
            on_change: None,
        }
    }

    pub fn props(&self) -> &InputFieldProps {
        &self.props
    }

    pub fn set_props(&mut self, props: InputFieldProps) {
        self.props = props;
        if !self.custom_theme {
            self.theme = Theme::for_mode(ThemeMode::from_dark_flag(self.props.dark_mode));
        }
    }

    /// Edits props in place, e.g. to flip `loading` or `invalid`.
    pub fn update_props(&mut self, f: impl FnOnce(&mut InputFieldProps)) {
        let mut props = self.props.clone();
        f(&mut props);
        self.set_props(props);
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.custom_theme = true;
    }

    /// Registers the change callback, replacing any previous one.
    pub fn on_change(&mut self, callback: impl FnMut(&str) + 'static) {
        self.on_change = Some(Box::new(callback));
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Advances the loading spinner by one frame.
    pub fn tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    /// Where the terminal cursor belongs after the last render, if the field accepts input.
    pub fn cursor_position(&self) -> Option<Position> {
        self.cursor_screen
    }

    pub fn clear_visible(&self, value: &str) -> bool {
        self.props.clearable && !value.is_empty() && !self.props.is_inert()
    }

    pub fn reveal_visible(&self) -> bool {
        self.props.is_password() && !self.props.is_inert()
    }

    pub fn view<'a>(&'a self, value: &str) -> FieldView<'a> {
        let props = &self.props;
        let control_id = props.control_id();
        let supporting_text = if props.invalid {
            props.error_message.as_deref()
        } else {
            props.helper_text.as_deref()
        };
        let supporting = supporting_text.map(|text| SupportingText {
            id: control_id.map(|id| {
                let suffix = if props.invalid { "error" } else { "helper" };
                format!("{id}-{suffix}")
            }),
            text,
            is_error: props.invalid,
        });
        FieldView {
            control_id,
            name: props.name.as_deref(),
            label: props.label.as_deref(),
            required: props.required,
            display: self.display(value),
            placeholder: props.placeholder.as_deref().filter(|_| value.is_empty()),
            input_disabled: props.is_inert(),
            aria_invalid: props.invalid,
            described_by: control_id.map(|id| format!("{id}-helper {id}-error")),
            busy: props.loading,
            clear_visible: self.clear_visible(value),
            reveal: self.reveal_visible().then_some(RevealAffordance {
                revealed: self.revealed,
            }),
            supporting,
        }
    }

    /// Handles one event against the current `value`.
    pub fn handle_event(&mut self, value: &str, event: InputEvent) -> FieldAction {
        self.cursor = self.cursor.min(char_len(value));
        if self.props.is_inert() {
            tracing::trace!(
                disabled = self.props.disabled,
                loading = self.props.loading,
                "field ignores input"
            );
            return FieldAction::None;
        }
        match event {
            InputEvent::Key(key) => self.handle_key(value, key),
            InputEvent::Paste(text) => {
                let text: String = text.chars().filter(|c| !matches!(c, '\r' | '\n')).collect();
                if text.is_empty() {
                    return FieldAction::None;
                }
                let next = self.insert_str(value, &text);
                self.emit(next)
            }
            InputEvent::Mouse(mouse) => self.handle_mouse(value, mouse),
        }
    }

    /// Emits an empty value, as the clear affordance does. No-op unless the affordance is visible.
    pub fn clear(&mut self, value: &str) -> FieldAction {
        if !self.clear_visible(value) {
            return FieldAction::None;
        }
        self.cursor = 0;
        self.offset = 0;
        self.emit(String::new())
    }

    /// Flips masked/revealed display. No-op unless the reveal affordance is visible.
    pub fn toggle_reveal(&mut self) -> FieldAction {
        if !self.reveal_visible() {
            return FieldAction::None;
        }
        self.revealed = !self.revealed;
        tracing::debug!(revealed = self.revealed, "password reveal toggled");
        FieldAction::Redraw
    }

    pub fn render(&mut self, value: &str, area: Rect, buf: &mut Buffer) {
        let theme = self.theme.clone();
        self.render_with_theme(value, area, buf, &theme);
    }

    pub fn render_with_theme(&mut self, value: &str, area: Rect, buf: &mut Buffer, theme: &Theme) {
        self.hits = FieldHits::default();
        self.cursor_screen = None;
        if area.width == 0 || area.height == 0 {
            return;
        }
        self.cursor = self.cursor.min(char_len(value));
        let style = FieldStyle::resolve(&self.props, theme);
        let view = self.view(value);
        let drawn = self.draw(&view, area, buf, &style);
        self.hits = drawn.hits;
        self.offset = drawn.offset;
        self.cursor_screen = drawn.cursor;
    }

    fn draw(&self, view: &FieldView<'_>, area: Rect, buf: &mut Buffer, style: &FieldStyle) -> Drawn {
        let mut constraints = Vec::with_capacity(3);
        if view.label.is_some() {
            constraints.push(Constraint::Length(1));
        }
        constraints.push(Constraint::Length(style.box_height()));
        if view.supporting.is_some() {
            constraints.push(Constraint::Length(1));
        }
        let rows = Layout::vertical(constraints).split(area);
        let mut rows = rows.iter().copied();

        if let Some(label) = view.label {
            if let Some(line) = rows.next() {
                let mut spans = vec![Span::styled(label, style.label)];
                if view.required {
                    spans.push(Span::styled(" *", style.required_marker));
                }
                render::render_spans_clipped(line.x, line.y, line.width, buf, &spans, style.label);
            }
        }

        let Some(box_rect) = rows.next() else {
            return Drawn {
                hits: FieldHits::default(),
                offset: self.offset,
                cursor: None,
            };
        };
        let drawn = self.draw_box(view, box_rect, buf, style);

        if let (Some(line), Some(supporting)) = (rows.next(), view.supporting.as_ref()) {
            render::render_str_clipped(
                line.x,
                line.y,
                line.width,
                buf,
                supporting.text,
                style.supporting,
            );
        }
        drawn
    }

    fn draw_box(&self, view: &FieldView<'_>, rect: Rect, buf: &mut Buffer, style: &FieldStyle) -> Drawn {
        buf.set_style(rect, style.fill);
        let inner = if style.bordered {
            let block = Block::bordered().border_style(style.border);
            let inner = block.inner(rect);
            block.render(rect, buf);
            inner
        } else {
            rect
        };
        let content = Rect::new(
            inner.x + style.pad_x.min(inner.width),
            inner.y,
            inner.width.saturating_sub(style.pad_x * 2),
            inner.height.min(1),
        );
        let mut hits = FieldHits::default();
        if content.width == 0 || content.height == 0 {
            return Drawn {
                hits,
                offset: self.offset,
                cursor: None,
            };
        }

        let mut affordances = Vec::new();
        if view.busy {
            affordances.push((Affordance::Spinner, spinner::frame(self.tick)));
        }
        if view.clear_visible {
            affordances.push((Affordance::Clear, CLEAR_GLYPH));
        }
        if let Some(reveal) = view.reveal {
            affordances.push((Affordance::Reveal, reveal.glyph()));
        }
        let reserved: u16 = affordances
            .iter()
            .map(|(_, g)| render::str_width(g) as u16 + 1)
            .sum();
        let text_width = content.width.saturating_sub(reserved);

        let mut x = content.x + text_width;
        for (kind, glyph) in affordances {
            x += 1;
            let w = render::str_width(glyph) as u16;
            let glyph_rect = Rect::new(x, content.y, w, 1).intersection(content);
            render::render_str_clipped(x, content.y, glyph_rect.width, buf, glyph, style.affordance);
            match kind {
                Affordance::Clear => hits.clear = Some(glyph_rect),
                Affordance::Reveal => hits.reveal = Some(glyph_rect),
                Affordance::Spinner => {}
            }
            x += w;
        }

        let text_rect = Rect::new(content.x, content.y, text_width, 1);
        hits.input = Some(text_rect);
        if let Some(placeholder) = view.placeholder {
            render::render_str_clipped(
                text_rect.x,
                text_rect.y,
                text_rect.width,
                buf,
                placeholder,
                style.placeholder,
            );
            return Drawn {
                hits,
                offset: 0,
                cursor: (!view.input_disabled && text_width > 0)
                    .then(|| Position::new(text_rect.x, text_rect.y)),
            };
        }

        let chars: Vec<char> = view.display.chars().collect();
        let cursor = self.cursor.min(chars.len());
        let offset = scroll_offset(&chars, self.offset, cursor, text_width as usize);
        let visible: String = chars[offset..].iter().collect();
        render::render_str_clipped(text_rect.x, text_rect.y, text_rect.width, buf, &visible, style.text);

        let cursor_col = cols(&chars[offset..cursor]) as u16;
        let cursor = (!view.input_disabled && cursor_col < text_width)
            .then(|| Position::new(text_rect.x + cursor_col, text_rect.y));
        Drawn {
            hits,
            offset,
            cursor,
        }
    }

    fn handle_key(&mut self, value: &str, key: KeyEvent) -> FieldAction {
        if keymap::matches_any(&self.props.bindings.clear, &key) {
            return self.clear(value);
        }
        if keymap::matches_any(&self.props.bindings.reveal, &key) {
            return self.toggle_reveal();
        }
        let len = char_len(value);
        match key.code {
            KeyCode::Char(c) => {
                if key.modifiers.is_chord() {
                    return FieldAction::None;
                }
                let next = self.insert_str(value, c.encode_utf8(&mut [0; 4]));
                self.emit(next)
            }
            KeyCode::Backspace => {
                if self.cursor == 0 {
                    return FieldAction::None;
                }
                let start = byte_index_from_char_index(value, self.cursor - 1);
                let end = byte_index_from_char_index(value, self.cursor);
                let mut next = value.to_string();
                next.replace_range(start..end, "");
                self.cursor -= 1;
                self.emit(next)
            }
            KeyCode::Delete => {
                if self.cursor >= len {
                    return FieldAction::None;
                }
                let start = byte_index_from_char_index(value, self.cursor);
                let end = byte_index_from_char_index(value, self.cursor + 1);
                let mut next = value.to_string();
                next.replace_range(start..end, "");
                self.emit(next)
            }
            KeyCode::Left => self.move_cursor_to(self.cursor.saturating_sub(1)),
            KeyCode::Right => self.move_cursor_to((self.cursor + 1).min(len)),
            KeyCode::Home => self.move_cursor_to(0),
            KeyCode::End => self.move_cursor_to(len),
            KeyCode::Enter
            | KeyCode::Tab
            | KeyCode::Esc
            | KeyCode::Up
            | KeyCode::Down
            | KeyCode::PageUp
            | KeyCode::PageDown => FieldAction::None,
        }
    }

    fn handle_mouse(&mut self, value: &str, mouse: MouseEvent) -> FieldAction {
        if !mouse.is_click() {
            return FieldAction::None;
        }
        let pos = mouse.position();
        if self.hits.clear.is_some_and(|r| r.contains(pos)) {
            return self.clear(value);
        }
        if self.hits.reveal.is_some_and(|r| r.contains(pos)) {
            return self.toggle_reveal();
        }
        match self.hits.input {
            Some(rect) if rect.contains(pos) => {
                let chars: Vec<char> = self.display(value).chars().collect();
                let offset = self.offset.min(chars.len());
                let target = (pos.x - rect.x) as usize;
                let mut col = 0usize;
                let mut index = offset;
                for ch in &chars[offset..] {
                    let w = ch.width().unwrap_or(0);
                    if col + w > target {
                        break;
                    }
                    col += w;
                    index += 1;
                }
                self.move_cursor_to(index)
            }
            _ => FieldAction::None,
        }
    }

    fn move_cursor_to(&mut self, cursor: usize) -> FieldAction {
        if self.cursor == cursor {
            return FieldAction::None;
        }
        self.cursor = cursor;
        FieldAction::Redraw
    }

    fn insert_str(&mut self, value: &str, text: &str) -> String {
        let at = byte_index_from_char_index(value, self.cursor);
        let mut next = value.to_string();
        next.insert_str(at, text);
        self.cursor += char_len(text);
        next
    }

    fn emit(&mut self, next: String) -> FieldAction {
        // Length only: the value may be a password.
        tracing::debug!(len = char_len(&next), "field value changed");
        if let Some(callback) = self.on_change.as_mut() {
            callback(&next);
        }
        FieldAction::Changed(next)
    }

    fn display(&self, value: &str) -> String {
        if self.props.is_password() && !self.revealed {
            std::iter::repeat_n(self.props.mask_char, char_len(value)).collect()
        } else {
            value.to_string()
        }
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn cols(chars: &[char]) -> usize {
    chars.iter().map(|c| c.width().unwrap_or(0)).sum()
}

/// First visible char so that `cursor` stays inside `width` columns, moving as little as
/// possible from `previous`.
fn scroll_offset(chars: &[char], previous: usize, cursor: usize, width: usize) -> usize {
    if width == 0 {
        return cursor;
    }
    let mut offset = previous.min(cursor);
    while offset < cursor && cols(&chars[offset..cursor]) >= width {
        offset += 1;
    }
    offset
}

fn byte_index_from_char_index(s: &str, char_idx: usize) -> usize {
    match s.char_indices().nth(char_idx) {
        Some((i, _)) => i,
        None => s.len(),
    }
}
