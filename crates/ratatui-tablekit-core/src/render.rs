//! Width-aware text drawing shared by the widgets.
//!
//! Everything here counts terminal columns (via `unicode-width`), not bytes or chars, so wide
//! glyphs are never split across a clip edge.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Span;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

const TAB_COLS: usize = 4;

/// Draws `input` at `(x, y)` using at most `max_cols` columns. Returns the columns written.
///
/// Tabs expand to spaces; a wide glyph that would cross `max_cols` is dropped rather than cut.
pub fn render_str_clipped(
    x: u16,
    y: u16,
    max_cols: u16,
    buf: &mut Buffer,
    input: &str,
    style: Style,
) -> u16 {
    let mut cursor = ClipCursor::new(x, y, max_cols);
    for ch in input.chars() {
        if !cursor.put(buf, ch, style) {
            break;
        }
    }
    cursor.written
}

/// Draws spans in sequence, falling back to `fallback_style` for unstyled spans.
pub fn render_spans_clipped(
    x: u16,
    y: u16,
    max_cols: u16,
    buf: &mut Buffer,
    spans: &[Span<'_>],
    fallback_style: Style,
) -> u16 {
    let mut cursor = ClipCursor::new(x, y, max_cols);
    for span in spans {
        let style = if span.style == Style::default() {
            fallback_style
        } else {
            span.style
        };
        for ch in span.content.chars() {
            if !cursor.put(buf, ch, style) {
                return cursor.written;
            }
        }
    }
    cursor.written
}

/// Draws `input` right-aligned inside `area`'s first line.
pub fn render_str_right(area: Rect, buf: &mut Buffer, input: &str, style: Style) {
    let w = str_width(input).min(area.width as usize) as u16;
    render_str_clipped(area.x + area.width - w, area.y, w, buf, input, style);
}

/// Draws `input` centered inside `area`'s middle line.
pub fn render_str_centered(area: Rect, buf: &mut Buffer, input: &str, style: Style) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let w = str_width(input).min(area.width as usize) as u16;
    let x = area.x + (area.width - w) / 2;
    let y = area.y + area.height / 2;
    render_str_clipped(x, y, w, buf, input, style);
}

pub fn str_width(input: &str) -> usize {
    input
        .chars()
        .map(|ch| if ch == '\t' { TAB_COLS } else { ch.width().unwrap_or(0) })
        .sum()
}

/// Returns the prefix of `input` that fits in `max_cols`, with tabs expanded.
pub fn slice_by_cols(input: &str, max_cols: usize) -> String {
    if UnicodeWidthStr::width(input) <= max_cols && !input.contains('\t') {
        return input.to_string();
    }
    let mut out = String::new();
    let mut cols = 0usize;
    for ch in input.chars() {
        let (piece, w) = if ch == '\t' {
            (" ".repeat(TAB_COLS), TAB_COLS)
        } else {
            (ch.to_string(), ch.width().unwrap_or(0))
        };
        if cols + w > max_cols {
            break;
        }
        out.push_str(&piece);
        cols += w;
    }
    out
}

/// Shortens `input` to `max_cols`, ending in `…` when something was cut.
pub fn truncate_with_ellipsis(input: &str, max_cols: usize) -> String {
    if str_width(input) <= max_cols {
        return input.to_string();
    }
    if max_cols == 0 {
        return String::new();
    }
    let mut out = slice_by_cols(input, max_cols - 1);
    out.push('…');
    out
}

struct ClipCursor {
    x: u16,
    y: u16,
    max_cols: u16,
    written: u16,
}

impl ClipCursor {
    fn new(x: u16, y: u16, max_cols: u16) -> Self {
        Self {
            x,
            y,
            max_cols,
            written: 0,
        }
    }

    /// Writes one char; returns `false` once the clip width is exhausted.
    fn put(&mut self, buf: &mut Buffer, ch: char, style: Style) -> bool {
        if ch == '\t' {
            for _ in 0..TAB_COLS {
                if !self.put(buf, ' ', style) {
                    return false;
                }
            }
            return true;
        }
        let w = ch.width().unwrap_or(0) as u16;
        if w == 0 {
            return true;
        }
        if self.written + w > self.max_cols {
            return false;
        }
        let mut tmp = [0u8; 4];
        if let Some(cell) = buf.cell_mut((self.x + self.written, self.y)) {
            cell.set_style(style);
            cell.set_symbol(ch.encode_utf8(&mut tmp));
        }
        if w == 2 {
            if let Some(cell) = buf.cell_mut((self.x + self.written + 1, self.y)) {
                cell.set_style(style);
                cell.set_symbol("");
            }
        }
        self.written += w;
        true
    }
}

#[cfg(test)]
pub(crate) fn buffer_line(buf: &Buffer, y: u16) -> String {
    let area = buf.area;
    (area.x..area.x + area.width)
        .map(|x| buf.cell((x, y)).map(|c| c.symbol()).unwrap_or(" "))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clips_without_splitting_wide_glyphs() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 5, 1));
        let written = render_str_clipped(0, 0, 3, &mut buf, "你好", Style::default());
        assert_eq!(written, 2);
        assert!(buffer_line(&buf, 0).starts_with("你"));
    }

    #[test]
    fn tabs_expand_to_spaces() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 6, 1));
        let spans = vec![Span::raw("\t1")];
        render_spans_clipped(0, 0, 6, &mut buf, &spans, Style::default());
        assert!(buffer_line(&buf, 0).starts_with("    1"));
    }

    #[test]
    fn ellipsis_only_when_cut() {
        assert_eq!(truncate_with_ellipsis("abc", 3), "abc");
        assert_eq!(truncate_with_ellipsis("abcdef", 4), "abc…");
        assert_eq!(truncate_with_ellipsis("abcdef", 0), "");
    }

    #[test]
    fn centered_text_lands_in_middle_row() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 7, 3));
        render_str_centered(Rect::new(0, 0, 7, 3), &mut buf, "abc", Style::default());
        assert_eq!(buffer_line(&buf, 1), "  abc  ");
    }
}
