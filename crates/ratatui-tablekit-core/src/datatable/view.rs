use std::collections::HashSet;

use ratatui::buffer::Buffer;
use ratatui::layout::Constraint;
use ratatui::layout::Layout;
use ratatui::layout::Position;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Widget;

use super::column::Alignment;
use super::column::Column;
use super::model::GridView;
use super::model::HeaderCell;
use super::model::LiveRegion;
use super::model::RowView;
use super::model::TableView;
use super::row::TableRow;
use super::selection::RowSelection;
use super::sort::SortState;
use super::sort::sort_order;
use crate::error::TableError;
use crate::input::InputEvent;
use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::input::MouseEvent;
use crate::input::MouseEventKind;
use crate::keymap;
use crate::render;
use crate::spinner;
use crate::theme::Theme;
use crate::theme::ThemeMode;

const CHECKBOX_WIDTH: u16 = 3;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TableAction {
    None,
    Redraw,
    Sorted(SortState),
    SelectionChanged,
}

/// What happens to sort and selection state when [`DataTable::set_data`] replaces the rows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DataRefresh {
    /// Start over: caller order, empty selection.
    #[default]
    Reset,
    /// Keep the active sort (re-applied to the new rows) and keep selected rows that still
    /// exist, refreshed to their new values.
    Retain,
}

/// Key bindings for [`DataTable`]. Mouse clicks are handled separately via the last render.
#[derive(Clone, Debug)]
pub struct TableBindings {
    pub up: Vec<KeyEvent>,
    pub down: Vec<KeyEvent>,
    pub page_up: Vec<KeyEvent>,
    pub page_down: Vec<KeyEvent>,
    pub top: Vec<KeyEvent>,
    pub bottom: Vec<KeyEvent>,
    pub prev_column: Vec<KeyEvent>,
    pub next_column: Vec<KeyEvent>,
    pub sort: Vec<KeyEvent>,
    pub toggle_row: Vec<KeyEvent>,
    pub toggle_all: Vec<KeyEvent>,
    pub clear_selection: Vec<KeyEvent>,
}

impl Default for TableBindings {
    fn default() -> Self {
        Self {
            up: vec![keymap::key(KeyCode::Up), keymap::key_char('k')],
            down: vec![keymap::key(KeyCode::Down), keymap::key_char('j')],
            page_up: vec![keymap::key(KeyCode::PageUp), keymap::key_ctrl('u')],
            page_down: vec![keymap::key(KeyCode::PageDown), keymap::key_ctrl('d')],
            top: vec![keymap::key(KeyCode::Home), keymap::key_char('g')],
            bottom: vec![keymap::key(KeyCode::End), keymap::key_char('G')],
            prev_column: vec![keymap::key(KeyCode::Left), keymap::key_char('h')],
            next_column: vec![keymap::key(KeyCode::Right), keymap::key_char('l')],
            sort: vec![keymap::key(KeyCode::Enter), keymap::key_char('s')],
            toggle_row: vec![keymap::key_char(' ')],
            toggle_all: vec![keymap::key_char('a')],
            clear_selection: vec![keymap::key(KeyCode::Esc)],
        }
    }
}

/// Options for [`DataTable`].
#[derive(Clone, Debug)]
pub struct DataTableOptions {
    /// Show checkboxes and allow row selection.
    pub selectable: bool,
    /// Pick the dark palette. Ignored once a custom theme is set with [`DataTable::set_theme`].
    pub dark_mode: bool,
    pub refresh: DataRefresh,
    pub col_gap: u16,
    pub loading_text: String,
    pub empty_text: String,
    pub bindings: TableBindings,
}

impl Default for DataTableOptions {
    fn default() -> Self {
        Self {
            selectable: false,
            dark_mode: false,
            refresh: DataRefresh::default(),
            col_gap: 1,
            loading_text: "Loading...".to_string(),
            empty_text: "No data available".to_string(),
            bindings: TableBindings::default(),
        }
    }
}

/// Styles for one render, resolved from the theme in a single place.
#[derive(Clone, Copy)]
struct TableStyles {
    base: Style,
    header: Style,
    indicator: Style,
    selected: Style,
    cursor: Style,
    muted: Style,
    border: Style,
}

impl TableStyles {
    fn resolve(theme: &Theme) -> Self {
        let base = theme.surface.patch(theme.text_primary);
        Self {
            base,
            header: theme.header,
            indicator: theme.header.patch(theme.text_muted),
            selected: base.patch(theme.selected_row),
            cursor: base.patch(theme.cursor_row),
            muted: base.patch(theme.text_muted),
            border: base.patch(theme.border),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum HitTarget {
    SelectAll,
    Header(usize),
    RowCheckbox(usize),
    Row(usize),
}

#[derive(Clone, Debug, Default)]
struct HitMap {
    select_all: Option<Rect>,
    headers: Vec<(Rect, usize)>,
    rows: Vec<RowHit>,
}

#[derive(Clone, Copy, Debug)]
struct RowHit {
    area: Rect,
    checkbox: Option<Rect>,
    position: usize,
}

impl HitMap {
    /// Resolves a click to exactly one target. Checkboxes win over the row they sit in, so a
    /// checkbox click never also counts as a row click.
    fn target_at(&self, pos: Position) -> Option<HitTarget> {
        if self.select_all.is_some_and(|r| r.contains(pos)) {
            return Some(HitTarget::SelectAll);
        }
        if let Some((_, col)) = self.headers.iter().find(|(r, _)| r.contains(pos)) {
            return Some(HitTarget::Header(*col));
        }
        let row = self.rows.iter().find(|h| h.area.contains(pos))?;
        if row.checkbox.is_some_and(|r| r.contains(pos)) {
            Some(HitTarget::RowCheckbox(row.position))
        } else {
            Some(HitTarget::Row(row.position))
        }
    }
}

/// A sortable, selectable table over a caller-owned snapshot of rows.
///
/// The table never changes the rows it is given. Sorting reorders an internal index, and the
/// selection stores copies of selected rows matched by [`TableRow::row_id`]. Every selection
/// change calls the registered callback (see [`DataTable::on_selection_change`]) with the full
/// selection in the order rows were selected, before the triggering call returns.
///
/// The table is UI-agnostic: drive it from your app loop with `handle_event` and `render`.
pub struct DataTable<T: TableRow + Clone> {
    options: DataTableOptions,
    theme: Theme,
    custom_theme: bool,
    columns: Vec<Column<T>>,
    rows: Vec<T>,
    order: Vec<usize>,
    sort: Option<SortState>,
    selection: RowSelection<T>,
    loading: bool,
    cursor: Option<usize>,
    header_focus: Option<usize>,
    scroll: usize,
    body_height: usize,
    tick: u64,
    hits: HitMap,
    on_selection_change: Option<Box<dyn FnMut(&[T])>>,
}

impl<T: TableRow + Clone> Default for DataTable<T> {
    fn default() -> Self {
        Self::with_options(DataTableOptions::default())
    }
}

impl<T: TableRow + Clone> DataTable<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: DataTableOptions) -> Self {
        Self {
            theme: Theme::for_mode(ThemeMode::from_dark_flag(options.dark_mode)),
            custom_theme: false,
            options,
            columns: Vec::new(),
            rows: Vec::new(),
            order: Vec::new(),
            sort: None,
            selection: RowSelection::new(),
            loading: false,
            cursor: None,
            header_focus: None,
            scroll: 0,
            body_height: 0,
            tick: 0,
            hits: HitMap::default(),
            on_selection_change: None,
        }
    }

    pub fn options(&self) -> &DataTableOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: DataTableOptions) {
        self.options = options;
        if !self.custom_theme {
            self.theme = Theme::for_mode(ThemeMode::from_dark_flag(self.options.dark_mode));
        }
    }

    pub fn set_selectable(&mut self, selectable: bool) {
        self.options.selectable = selectable;
    }

    pub fn set_dark_mode(&mut self, dark: bool) {
        self.options.dark_mode = dark;
        if !self.custom_theme {
            self.theme = Theme::for_mode(ThemeMode::from_dark_flag(dark));
        }
    }

    /// Overrides the light/dark palette picked from `dark_mode`.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.custom_theme = true;
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Registers the selection-changed callback, replacing any previous one.
    pub fn on_selection_change(&mut self, callback: impl FnMut(&[T]) + 'static) {
        self.on_selection_change = Some(Box::new(callback));
    }

    /// Sets the columns. Keys must be unique.
    ///
    /// An active sort is re-applied through the new column with the same key, or dropped when
    /// that column is gone or not sortable.
    pub fn set_columns(&mut self, columns: Vec<Column<T>>) -> Result<(), TableError> {
        let mut seen = HashSet::new();
        for c in &columns {
            if !seen.insert(c.key.as_str()) {
                return Err(TableError::DuplicateColumnKey(c.key.clone()));
            }
        }
        self.columns = columns;
        if let Some(state) = self.sort.as_ref() {
            let still_sortable = self
                .columns
                .iter()
                .any(|c| c.key == state.column && c.sortable);
            let anchor = self.cursor_row_id();
            if still_sortable {
                self.order = (0..self.rows.len()).collect();
                self.reapply_sort();
                self.restore_cursor(anchor);
            } else {
                tracing::debug!(column = %state.column, "sort dropped with its column");
                self.clear_sort();
            }
        }
        self.header_focus = self
            .header_focus
            .filter(|_| !self.columns.is_empty())
            .map(|i| i.min(self.columns.len() - 1));
        Ok(())
    }

    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    /// Replaces the dataset. See [`DataRefresh`] for what happens to sort and selection.
    pub fn set_data(&mut self, rows: Vec<T>) {
        self.rows = rows;
        self.order = (0..self.rows.len()).collect();
        let changed = match self.options.refresh {
            DataRefresh::Reset => {
                self.sort = None;
                self.selection.clear()
            }
            DataRefresh::Retain => {
                self.reapply_sort();
                // Survivors are replaced by their new values, so any non-empty selection is
                // reported again even when nothing was pruned.
                let had_selection = !self.selection.is_empty();
                self.selection.retain_present(&self.rows);
                had_selection
            }
        };
        tracing::debug!(
            rows = self.rows.len(),
            refresh = ?self.options.refresh,
            selection_changed = changed,
            "table data replaced"
        );
        self.cursor = self
            .cursor
            .filter(|_| !self.rows.is_empty())
            .map(|c| c.min(self.rows.len() - 1));
        self.clamp_scroll();
        if changed {
            self.notify_selection();
        }
    }

    /// Rows as supplied by the caller, never reordered.
    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    /// Rows in display order.
    pub fn sorted_rows(&self) -> impl Iterator<Item = &T> + '_ {
        self.order.iter().map(|&i| &self.rows[i])
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Advances the loading spinner by one frame.
    pub fn tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    pub fn sort_state(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    /// Activates the header of the column at `index`, as a click would.
    ///
    /// Returns the new sort state, or `None` for unknown or non-sortable columns.
    pub fn activate_header(&mut self, index: usize) -> Option<SortState> {
        let column = self.columns.get(index)?;
        if !column.sortable {
            tracing::trace!(column = %column.key, "ignoring click on non-sortable header");
            return None;
        }
        let anchor = self.cursor_row_id();
        let next = SortState::next(self.sort.as_ref(), &column.key);
        sort_order(&mut self.order, &self.rows, column, next.direction);
        tracing::debug!(column = %next.column, direction = ?next.direction, "table sorted");
        self.sort = Some(next.clone());
        self.header_focus = Some(index);
        self.restore_cursor(anchor);
        Some(next)
    }

    /// Sorts by the column with `key`, following the same cycle as header clicks.
    pub fn sort_by(&mut self, key: &str) -> Result<SortState, TableError> {
        let index = self
            .columns
            .iter()
            .position(|c| c.key == key)
            .ok_or_else(|| TableError::UnknownColumn(key.to_string()))?;
        self.activate_header(index)
            .ok_or_else(|| TableError::ColumnNotSortable(key.to_string()))
    }

    /// Back to the caller's order.
    pub fn clear_sort(&mut self) {
        let anchor = self.cursor_row_id();
        self.sort = None;
        self.order = (0..self.rows.len()).collect();
        self.restore_cursor(anchor);
    }

    pub fn selected_rows(&self) -> &[T] {
        self.selection.rows()
    }

    pub fn is_selected(&self, row: &T) -> bool {
        self.selection.contains(row)
    }

    /// True iff every row is selected (and there is at least one row).
    pub fn select_all_checked(&self) -> bool {
        !self.rows.is_empty() && self.selection.len() == self.rows.len()
    }

    /// Toggles the row shown at display `position`. No-op unless the table is selectable.
    pub fn toggle_row_at(&mut self, position: usize) -> bool {
        if !self.options.selectable {
            return false;
        }
        let Some(&index) = self.order.get(position) else {
            return false;
        };
        let selected = self.selection.toggle(&self.rows[index]);
        tracing::debug!(id = ?self.rows[index].row_id(), selected, "row selection toggled");
        self.notify_selection();
        true
    }

    /// Toggles the row with `id`. No-op unless the table is selectable and the row exists.
    pub fn toggle_row(&mut self, id: &T::Id) -> bool {
        let position = self
            .order
            .iter()
            .position(|&i| &self.rows[i].row_id() == id);
        match position {
            Some(p) => self.toggle_row_at(p),
            None => false,
        }
    }

    /// Header select-all: selects every row (in display order) unless all are already
    /// selected, in which case it clears the selection.
    pub fn toggle_all(&mut self) -> bool {
        if !self.options.selectable || self.rows.is_empty() {
            return false;
        }
        if self.select_all_checked() {
            self.selection.clear();
        } else {
            self.selection
                .select_all(self.order.iter().map(|&i| &self.rows[i]));
        }
        tracing::debug!(selected = self.selection.len(), "select-all toggled");
        self.notify_selection();
        true
    }

    pub fn clear_selection(&mut self) -> bool {
        if !self.selection.clear() {
            return false;
        }
        self.notify_selection();
        true
    }

    /// Keyboard cursor, as a display position.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn set_cursor(&mut self, cursor: Option<usize>) {
        self.cursor = cursor
            .filter(|_| !self.rows.is_empty())
            .map(|c| c.min(self.rows.len() - 1));
        self.ensure_cursor_visible();
    }

    /// Header column focused for keyboard sorting.
    pub fn header_focus(&self) -> Option<usize> {
        self.header_focus
    }

    /// Derives what the next render will show.
    pub fn view(&self) -> TableView<'_, T> {
        if self.loading {
            return TableView::Loading {
                region: LiveRegion::busy(),
                label: &self.options.loading_text,
                frame: spinner::frame(self.tick),
            };
        }
        if self.rows.is_empty() {
            return TableView::Empty {
                region: LiveRegion::polite(),
                message: &self.options.empty_text,
            };
        }
        let headers = self
            .columns
            .iter()
            .map(|c| HeaderCell {
                key: &c.key,
                title: &c.title,
                sortable: c.sortable,
                aria_sort: SortState::aria_for(self.sort.as_ref(), &c.key),
            })
            .collect();
        let rows = self
            .order
            .iter()
            .enumerate()
            .map(|(position, &i)| {
                let row = &self.rows[i];
                RowView {
                    position,
                    row,
                    selected: self.selection.contains(row),
                    cursor: self.cursor == Some(position),
                    cells: self.columns.iter().map(|c| c.value(row).to_string()).collect(),
                }
            })
            .collect();
        TableView::Grid(GridView {
            selectable: self.options.selectable,
            select_all_checked: self.select_all_checked(),
            headers,
            rows,
        })
    }

    pub fn handle_event(&mut self, event: InputEvent) -> TableAction {
        if self.loading || self.rows.is_empty() {
            tracing::trace!(loading = self.loading, "table has no interactive content");
            return TableAction::None;
        }
        match event {
            InputEvent::Key(key) => self.handle_key(key),
            InputEvent::Mouse(mouse) => self.handle_mouse(mouse),
            InputEvent::Paste(_) => TableAction::None,
        }
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer) {
        let theme = self.theme.clone();
        self.render_with_theme(area, buf, &theme);
    }

    pub fn render_with_theme(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        self.hits = HitMap::default();
        if area.width == 0 || area.height == 0 {
            return;
        }
        let styles = TableStyles::resolve(theme);
        buf.set_style(area, styles.base);

        self.body_height = area.height.saturating_sub(1) as usize;
        self.ensure_cursor_visible();

        let hits = match self.view() {
            TableView::Loading { label, frame, .. } => {
                let text = format!("{frame} {label}");
                render::render_str_centered(area, buf, &text, styles.muted);
                HitMap::default()
            }
            TableView::Empty { message, .. } => {
                let block = Block::bordered()
                    .border_type(BorderType::Plain)
                    .border_style(styles.border);
                let inner = block.inner(area);
                block.render(area, buf);
                render::render_str_centered(inner, buf, message, styles.muted);
                HitMap::default()
            }
            TableView::Grid(grid) => self.render_grid(&grid, area, buf, styles),
        };
        self.hits = hits;
    }

    fn render_grid(
        &self,
        grid: &GridView<'_, T>,
        area: Rect,
        buf: &mut Buffer,
        styles: TableStyles,
    ) -> HitMap {
        let mut hits = HitMap::default();
        let (checkbox_x, col_rects) = self.column_layout(area);

        let header = Rect::new(area.x, area.y, area.width, 1);
        buf.set_style(header, styles.header);
        if let Some(x) = checkbox_x {
            let rect = Rect::new(x, header.y, CHECKBOX_WIDTH, 1);
            render::render_str_clipped(
                rect.x,
                rect.y,
                rect.width,
                buf,
                checkbox_glyph(grid.select_all_checked),
                styles.header,
            );
            hits.select_all = Some(rect);
        }
        for (i, (cell, x_rect)) in grid.headers.iter().zip(col_rects.iter()).enumerate() {
            let rect = Rect::new(x_rect.x, header.y, x_rect.width, 1);
            render_header_cell(cell, rect, buf, styles);
            hits.headers.push((rect, i));
        }

        let visible = grid.rows.iter().skip(self.scroll).take(self.body_height);
        for (line, row) in visible.enumerate() {
            let y = area.y + 1 + line as u16;
            let row_rect = Rect::new(area.x, y, area.width, 1);
            let style = if row.cursor {
                styles.cursor
            } else if row.selected {
                styles.selected
            } else {
                styles.base
            };
            buf.set_style(row_rect, style);

            let checkbox = checkbox_x.map(|x| Rect::new(x, y, CHECKBOX_WIDTH, 1));
            if let Some(cb) = checkbox {
                render::render_str_clipped(
                    cb.x,
                    cb.y,
                    cb.width,
                    buf,
                    checkbox_glyph(row.selected),
                    style,
                );
            }
            for ((text, column), x_rect) in row.cells.iter().zip(&self.columns).zip(&col_rects) {
                let rect = Rect::new(x_rect.x, y, x_rect.width, 1);
                render_aligned(rect, buf, text, column.align, style);
            }
            hits.rows.push(RowHit {
                area: row_rect,
                checkbox,
                position: row.position,
            });
        }
        hits
    }

    /// X positions of the checkbox column (if any) and of each data column.
    fn column_layout(&self, area: Rect) -> (Option<u16>, Vec<Rect>) {
        let mut constraints = Vec::with_capacity(self.columns.len() + 1);
        if self.options.selectable {
            constraints.push(Constraint::Length(CHECKBOX_WIDTH));
        }
        constraints.extend(self.columns.iter().map(|c| match c.width {
            Some(w) => Constraint::Length(w),
            None => Constraint::Fill(1),
        }));
        let line = Rect::new(area.x, area.y, area.width, 1);
        let rects = Layout::horizontal(constraints)
            .spacing(self.options.col_gap)
            .split(line);
        if self.options.selectable {
            (rects.first().map(|r| r.x), rects[1..].to_vec())
        } else {
            (None, rects.to_vec())
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> TableAction {
        let b = &self.options.bindings;
        let page = self.body_height.saturating_sub(1).max(1) as isize;
        let motion = if keymap::matches_any(&b.up, &key) {
            Some(-1)
        } else if keymap::matches_any(&b.down, &key) {
            Some(1)
        } else if keymap::matches_any(&b.page_up, &key) {
            Some(-page)
        } else if keymap::matches_any(&b.page_down, &key) {
            Some(page)
        } else if keymap::matches_any(&b.top, &key) {
            Some(isize::MIN / 2)
        } else if keymap::matches_any(&b.bottom, &key) {
            Some(isize::MAX / 2)
        } else {
            None
        };
        if let Some(delta) = motion {
            return self.move_cursor_by(delta);
        }

        if keymap::matches_any(&b.prev_column, &key) {
            return self.move_header_focus(-1);
        }
        if keymap::matches_any(&b.next_column, &key) {
            return self.move_header_focus(1);
        }
        if keymap::matches_any(&b.sort, &key) {
            let target = self
                .header_focus
                .or_else(|| self.columns.iter().position(|c| c.sortable));
            return match target.and_then(|i| self.activate_header(i)) {
                Some(state) => TableAction::Sorted(state),
                None => TableAction::None,
            };
        }
        if keymap::matches_any(&b.toggle_row, &key) {
            let position = self.cursor.unwrap_or(0);
            if self.cursor.is_none() {
                self.cursor = Some(0);
            }
            return selection_action(self.toggle_row_at(position));
        }
        if keymap::matches_any(&b.toggle_all, &key) {
            return selection_action(self.toggle_all());
        }
        if keymap::matches_any(&b.clear_selection, &key) && self.options.selectable {
            return selection_action(self.clear_selection());
        }
        TableAction::None
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> TableAction {
        match mouse.kind {
            MouseEventKind::ScrollDown => return self.scroll_by(1),
            MouseEventKind::ScrollUp => return self.scroll_by(-1),
            _ if !mouse.is_click() => return TableAction::None,
            _ => {}
        }
        match self.hits.target_at(mouse.position()) {
            Some(HitTarget::SelectAll) => selection_action(self.toggle_all()),
            Some(HitTarget::Header(i)) => match self.activate_header(i) {
                Some(state) => TableAction::Sorted(state),
                None => TableAction::None,
            },
            Some(HitTarget::RowCheckbox(p)) | Some(HitTarget::Row(p)) => {
                self.cursor = Some(p);
                if self.toggle_row_at(p) {
                    TableAction::SelectionChanged
                } else {
                    TableAction::Redraw
                }
            }
            None => TableAction::None,
        }
    }

    fn move_cursor_by(&mut self, delta: isize) -> TableAction {
        if self.rows.is_empty() {
            return TableAction::None;
        }
        let last = self.rows.len().saturating_sub(1) as isize;
        let current = self.cursor.map(|c| c as isize).unwrap_or(-1);
        let next = current.saturating_add(delta).clamp(0, last) as usize;
        if self.cursor == Some(next) {
            return TableAction::None;
        }
        self.cursor = Some(next);
        self.ensure_cursor_visible();
        TableAction::Redraw
    }

    fn move_header_focus(&mut self, delta: isize) -> TableAction {
        if self.columns.is_empty() {
            return TableAction::None;
        }
        let last = self.columns.len() as isize - 1;
        let next = match self.header_focus {
            Some(i) => (i as isize + delta).clamp(0, last) as usize,
            None => 0,
        };
        if self.header_focus == Some(next) {
            return TableAction::None;
        }
        self.header_focus = Some(next);
        TableAction::Redraw
    }

    fn scroll_by(&mut self, delta: isize) -> TableAction {
        let before = self.scroll;
        self.scroll = (self.scroll as isize + delta).max(0) as usize;
        self.clamp_scroll();
        if self.scroll == before {
            TableAction::None
        } else {
            TableAction::Redraw
        }
    }

    fn ensure_cursor_visible(&mut self) {
        if let Some(c) = self.cursor {
            if c < self.scroll {
                self.scroll = c;
            } else if self.body_height > 0 && c >= self.scroll + self.body_height {
                self.scroll = c + 1 - self.body_height;
            }
        }
        self.clamp_scroll();
    }

    fn clamp_scroll(&mut self) {
        let max = self.rows.len().saturating_sub(self.body_height);
        self.scroll = self.scroll.min(max);
    }

    fn reapply_sort(&mut self) {
        let Some(state) = self.sort.clone() else {
            return;
        };
        match self.columns.iter().find(|c| c.key == state.column) {
            Some(column) => sort_order(&mut self.order, &self.rows, column, state.direction),
            None => self.sort = None,
        }
    }

    fn cursor_row_id(&self) -> Option<T::Id> {
        let index = *self.order.get(self.cursor?)?;
        Some(self.rows[index].row_id())
    }

    /// Puts the cursor back on the row it was on before a reorder.
    fn restore_cursor(&mut self, anchor: Option<T::Id>) {
        let Some(id) = anchor else {
            return;
        };
        self.cursor = self
            .order
            .iter()
            .position(|&i| self.rows[i].row_id() == id);
        self.ensure_cursor_visible();
    }

    fn notify_selection(&mut self) {
        if let Some(callback) = self.on_selection_change.as_mut() {
            callback(self.selection.rows());
        }
    }
}

fn selection_action(changed: bool) -> TableAction {
    if changed {
        TableAction::SelectionChanged
    } else {
        TableAction::None
    }
}

fn checkbox_glyph(checked: bool) -> &'static str {
    if checked { "[x]" } else { "[ ]" }
}

fn render_header_cell(cell: &HeaderCell<'_>, rect: Rect, buf: &mut Buffer, styles: TableStyles) {
    let indicator = cell.indicator();
    let reserve = if indicator.is_empty() {
        0
    } else {
        render::str_width(indicator) + 1
    };
    let title = render::truncate_with_ellipsis(cell.title, (rect.width as usize).saturating_sub(reserve));
    let mut spans = vec![Span::styled(title, styles.header)];
    if !indicator.is_empty() {
        spans.push(Span::styled(" ", styles.header));
        spans.push(Span::styled(indicator, styles.indicator));
    }
    render::render_spans_clipped(rect.x, rect.y, rect.width, buf, &spans, styles.header);
}

fn render_aligned(rect: Rect, buf: &mut Buffer, text: &str, align: Alignment, style: Style) {
    let text = render::truncate_with_ellipsis(text, rect.width as usize);
    match align {
        Alignment::Left => {
            render::render_str_clipped(rect.x, rect.y, rect.width, buf, &text, style);
        }
        Alignment::Right => render::render_str_right(rect, buf, &text, style),
        Alignment::Center => render::render_str_centered(rect, buf, &text, style),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datatable::row::Record;
    use crate::datatable::row::RowKey;
    use crate::datatable::sort::AriaSort;
    use crate::datatable::sort::SortDirection;
    use crate::datatable::value::CellValue;
    use crate::render::buffer_line;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn people() -> Vec<Record> {
        vec![
            Record::new(1).with("name", "John Doe").with("age", 30).with("status", "Active"),
            Record::new(2).with("name", "Jane Smith").with("age", 25).with("status", "Inactive"),
            Record::new(3).with("name", "Bob Johnson").with("age", 40).with("status", "Active"),
        ]
    }

    fn columns() -> Vec<Column<Record>> {
        vec![
            Column::field("name", "Name").sortable(),
            Column::field("age", "Age").sortable(),
            Column::field("status", "Status"),
        ]
    }

    fn table(selectable: bool) -> DataTable<Record> {
        let mut t = DataTable::with_options(DataTableOptions {
            selectable,
            ..Default::default()
        });
        t.set_columns(columns()).unwrap();
        t.set_data(people());
        t
    }

    fn ids(rows: &[Record]) -> Vec<RowKey> {
        rows.iter().map(TableRow::row_id).collect()
    }

    fn display_ids(t: &DataTable<Record>) -> Vec<RowKey> {
        t.sorted_rows().map(TableRow::row_id).collect()
    }

    fn recorder(t: &mut DataTable<Record>) -> Rc<RefCell<Vec<Vec<RowKey>>>> {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        t.on_selection_change(move |rows| sink.borrow_mut().push(ids(rows)));
        calls
    }

    #[test]
    fn rejects_duplicate_column_keys() {
        let mut t: DataTable<Record> = DataTable::new();
        let err = t
            .set_columns(vec![Column::field("a", "A"), Column::field("a", "Again")])
            .unwrap_err();
        assert_eq!(err, TableError::DuplicateColumnKey("a".into()));
        assert!(t.columns().is_empty());
    }

    #[test]
    fn sort_by_reports_unknown_and_unsortable_columns() {
        let mut t = table(false);
        assert_eq!(t.sort_by("nope"), Err(TableError::UnknownColumn("nope".into())));
        assert_eq!(
            t.sort_by("status"),
            Err(TableError::ColumnNotSortable("status".into()))
        );
        assert!(t.sort_state().is_none());
    }

    #[test]
    fn non_sortable_header_click_is_ignored() {
        let mut t = table(false);
        assert_eq!(t.activate_header(2), None);
        assert_eq!(display_ids(&t), ids(&people()));
    }

    #[test]
    fn clear_sort_restores_caller_order() {
        let mut t = table(false);
        t.sort_by("age").unwrap();
        t.clear_sort();
        assert!(t.sort_state().is_none());
        assert_eq!(display_ids(&t), ids(&people()));
    }

    #[test]
    fn sorting_leaves_caller_rows_untouched() {
        let mut t = table(false);
        t.sort_by("age").unwrap();
        t.sort_by("age").unwrap();
        assert_eq!(t.rows(), people().as_slice());
        assert_eq!(t.sorted_rows().count(), 3);
    }

    #[test]
    fn toggles_are_noops_when_not_selectable() {
        let mut t = table(false);
        let calls = recorder(&mut t);
        assert!(!t.toggle_row_at(0));
        assert!(!t.toggle_all());
        assert!(t.selected_rows().is_empty());
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn select_all_is_derived_from_membership() {
        let mut t = table(true);
        t.toggle_all();
        assert!(t.select_all_checked());
        t.toggle_row(&RowKey::Int(2));
        assert!(!t.select_all_checked());
        // Not fully selected any more, so the next activation selects everything again.
        t.toggle_all();
        assert_eq!(t.selected_rows().len(), 3);
    }

    #[test]
    fn select_all_uses_display_order() {
        let mut t = table(true);
        let calls = recorder(&mut t);
        t.sort_by("age").unwrap();
        t.toggle_all();
        assert_eq!(
            calls.borrow().last().unwrap(),
            &[RowKey::Int(2), RowKey::Int(1), RowKey::Int(3)]
        );
    }

    #[test]
    fn reset_refresh_drops_sort_and_selection() {
        let mut t = table(true);
        let calls = recorder(&mut t);
        t.sort_by("age").unwrap();
        t.toggle_row_at(0);
        t.set_data(people());
        assert!(t.sort_state().is_none());
        assert!(t.selected_rows().is_empty());
        assert_eq!(calls.borrow().last().unwrap(), &Vec::<RowKey>::new());
    }

    #[test]
    fn retain_refresh_prunes_missing_rows_and_resorts() {
        let mut t = DataTable::with_options(DataTableOptions {
            selectable: true,
            refresh: DataRefresh::Retain,
            ..Default::default()
        });
        t.set_columns(columns()).unwrap();
        t.set_data(people());
        let calls = recorder(&mut t);
        t.sort_by("age").unwrap();
        t.toggle_row(&RowKey::Int(1));
        t.toggle_row(&RowKey::Int(3));

        let next = vec![
            Record::new(3).with("age", 10),
            Record::new(4).with("age", 50),
            Record::new(2).with("age", 20),
        ];
        t.set_data(next);

        assert_eq!(t.sort_state(), Some(&SortState::ascending("age")));
        assert_eq!(
            display_ids(&t),
            [RowKey::Int(3), RowKey::Int(2), RowKey::Int(4)]
        );
        assert_eq!(ids(t.selected_rows()), [RowKey::Int(3)]);
        assert_eq!(t.selected_rows()[0].get("age").to_string(), "10");
        assert_eq!(calls.borrow().last().unwrap(), &[RowKey::Int(3)]);
    }

    #[test]
    fn keyboard_drives_cursor_sort_and_selection() {
        let mut t = table(true);
        let calls = recorder(&mut t);
        t.render(Rect::new(0, 0, 40, 6), &mut Buffer::empty(Rect::new(0, 0, 40, 6)));

        assert_eq!(t.handle_event(InputEvent::key(KeyCode::Down)), TableAction::Redraw);
        assert_eq!(t.cursor(), Some(0));
        t.handle_event(InputEvent::char(' '));
        assert_eq!(calls.borrow().last().unwrap(), &[RowKey::Int(1)]);

        // Focus "Age" and sort; the cursor follows row 1 to its new position.
        t.handle_event(InputEvent::key(KeyCode::Right));
        t.handle_event(InputEvent::key(KeyCode::Right));
        let action = t.handle_event(InputEvent::char('s'));
        assert_eq!(action, TableAction::Sorted(SortState::ascending("age")));
        assert_eq!(t.cursor(), Some(1));

        t.handle_event(InputEvent::char('a'));
        assert_eq!(calls.borrow().last().unwrap().len(), 3);
        t.handle_event(InputEvent::key(KeyCode::Esc));
        assert!(calls.borrow().last().unwrap().is_empty());
    }

    #[test]
    fn checkbox_click_toggles_once() {
        let mut t = table(true);
        let calls = recorder(&mut t);
        let area = Rect::new(0, 0, 40, 6);
        let mut buf = Buffer::empty(area);
        t.render(area, &mut buf);

        // Row 1 checkbox sits at x=0..3 on the first body line.
        let action = t.handle_event(InputEvent::Mouse(MouseEvent::click(1, 1)));
        assert_eq!(action, TableAction::SelectionChanged);
        assert_eq!(calls.borrow().len(), 1);
        assert_eq!(ids(t.selected_rows()), [RowKey::Int(1)]);

        // Clicking elsewhere on the same row toggles it back.
        t.handle_event(InputEvent::Mouse(MouseEvent::click(20, 1)));
        assert_eq!(calls.borrow().len(), 2);
        assert!(t.selected_rows().is_empty());
    }

    #[test]
    fn header_click_sorts_and_draws_indicator() {
        let mut t = table(false);
        let area = Rect::new(0, 0, 40, 5);
        let mut buf = Buffer::empty(area);
        t.render(area, &mut buf);
        assert!(buffer_line(&buf, 0).contains("Age ↕"));

        let age_x = t.hits.headers[1].0.x;
        t.handle_event(InputEvent::Mouse(MouseEvent::click(age_x, 0)));
        t.render(area, &mut buf);
        assert!(buffer_line(&buf, 0).contains("Age ▲"));
        assert!(buffer_line(&buf, 1).contains("Jane Smith"));
    }

    #[test]
    fn wheel_scrolls_long_tables() {
        let mut t: DataTable<Record> = DataTable::new();
        t.set_columns(vec![Column::field("n", "N")]).unwrap();
        t.set_data((0..20).map(|i| Record::new(i).with("n", i)).collect());
        let area = Rect::new(0, 0, 10, 5);
        let mut buf = Buffer::empty(area);
        t.render(area, &mut buf);
        assert_eq!(
            t.handle_event(InputEvent::Mouse(MouseEvent::scroll_down(1, 2))),
            TableAction::Redraw
        );
        t.render(area, &mut buf);
        assert_eq!(buffer_line(&buf, 1).trim(), "1");

        t.handle_event(InputEvent::Mouse(MouseEvent::scroll_up(1, 2)));
        t.render(area, &mut buf);
        assert_eq!(buffer_line(&buf, 1).trim(), "0");
        assert_eq!(
            t.handle_event(InputEvent::Mouse(MouseEvent::scroll_up(1, 2))),
            TableAction::None
        );
    }

    fn numbered(n: i64) -> DataTable<Record> {
        let mut t = DataTable::new();
        t.set_columns(vec![
            Column::field("n", "N").sortable(),
            Column::field("name", "Name").sortable(),
        ])
        .unwrap();
        t.set_data(
            (0..n)
                .map(|i| Record::new(i).with("n", i).with("name", format!("n{i}")))
                .collect(),
        );
        let area = Rect::new(0, 0, 20, 5);
        t.render(area, &mut Buffer::empty(area));
        t
    }

    #[test]
    fn jumps_work_before_any_cursor_exists() {
        let mut t = numbered(10);
        assert_eq!(t.handle_event(InputEvent::key(KeyCode::End)), TableAction::Redraw);
        assert_eq!(t.cursor(), Some(9));

        let mut t = numbered(10);
        t.handle_event(InputEvent::key(KeyCode::PageDown));
        assert_eq!(t.cursor(), Some(2));

        let mut t = numbered(10);
        t.handle_event(InputEvent::key(KeyCode::Down));
        assert_eq!(t.cursor(), Some(0));
        t.handle_event(InputEvent::key(KeyCode::Home));
        assert_eq!(t.cursor(), Some(0));

        let mut t = numbered(0);
        assert_eq!(t.handle_event(InputEvent::key(KeyCode::End)), TableAction::None);
        assert_eq!(t.cursor(), None);
    }

    #[test]
    fn replacing_the_sorted_column_with_a_non_sortable_one_drops_the_sort() {
        let mut t = numbered(10);
        t.sort_by("n").unwrap();
        t.sort_by("n").unwrap();
        t.set_columns(vec![Column::new("n", "N", |r: &Record| r.get("name"))])
            .unwrap();

        assert!(t.sort_state().is_none());
        let view = t.view();
        let grid = view.grid().unwrap();
        assert_eq!(grid.headers[0].aria_sort, AriaSort::None);
        let first: Vec<&str> = grid.rows.iter().take(2).map(|r| r.cells[0].as_str()).collect();
        assert_eq!(first, ["n0", "n1"]);
    }

    #[test]
    fn replacing_the_sorted_column_resorts_through_the_new_selector() {
        let mut t = numbered(3);
        t.handle_event(InputEvent::key(KeyCode::Down));
        t.sort_by("n").unwrap();
        t.sort_by("n").unwrap();
        assert_eq!(display_ids(&t)[0], RowKey::Int(2));
        assert_eq!(t.cursor(), Some(2));

        // Same key, now reading a field that orders the rows the other way round.
        t.set_columns(vec![
            Column::new("n", "N", |r: &Record| match r.get("n") {
                CellValue::Int(v) => CellValue::Int(-v),
                other => other,
            })
            .sortable(),
        ])
        .unwrap();

        assert_eq!(
            t.sort_state().map(|s| s.direction),
            Some(SortDirection::Descending)
        );
        assert_eq!(
            display_ids(&t),
            [RowKey::Int(0), RowKey::Int(1), RowKey::Int(2)]
        );
        // The cursor stays on row 0.
        assert_eq!(t.cursor(), Some(0));
    }

    #[test]
    fn retain_refresh_reports_refreshed_values_without_pruning() {
        let mut t = DataTable::with_options(DataTableOptions {
            selectable: true,
            refresh: DataRefresh::Retain,
            ..Default::default()
        });
        t.set_columns(columns()).unwrap();
        t.set_data(people());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        t.on_selection_change(move |rows: &[Record]| {
            sink.borrow_mut()
                .push(rows.iter().map(|r| r.get("age").to_string()).collect::<Vec<_>>());
        });
        t.toggle_row(&RowKey::Int(1));

        let mut next = people();
        next[0].set("age", 31);
        t.set_data(next);
        assert_eq!(seen.borrow().last().unwrap(), &["31"]);

        // Nothing selected: a refresh stays silent.
        t.clear_selection();
        let calls = seen.borrow().len();
        t.set_data(people());
        assert_eq!(seen.borrow().len(), calls);
    }

    #[test]
    fn events_are_ignored_while_loading() {
        let mut t = table(true);
        t.set_loading(true);
        assert_eq!(t.handle_event(InputEvent::char('a')), TableAction::None);
        assert!(t.selected_rows().is_empty());
    }
}
