//! The table's derived view: what a render shows, independent of how it is drawn.
//!
//! [`super::DataTable::view`] recomputes this from the caller's data plus local sort and
//! selection state. Nothing here is stored; `select_all_checked` in particular is derived from
//! the selection size on every call.

use super::sort::AriaSort;

/// Accessibility label of the header select-all checkbox.
pub const SELECT_ALL_LABEL: &str = "Select all rows";

/// Live-region attributes for status areas (loading, empty).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LiveRegion {
    /// `aria-busy`
    pub busy: bool,
    /// `aria-live="polite"`
    pub polite: bool,
}

impl LiveRegion {
    pub fn busy() -> Self {
        Self {
            busy: true,
            polite: true,
        }
    }

    pub fn polite() -> Self {
        Self {
            busy: false,
            polite: true,
        }
    }
}

/// One of three mutually exclusive rendering states, checked in this order.
#[derive(Debug)]
pub enum TableView<'a, T> {
    Loading {
        region: LiveRegion,
        label: &'a str,
        frame: &'static str,
    },
    Empty {
        region: LiveRegion,
        message: &'a str,
    },
    Grid(GridView<'a, T>),
}

impl<'a, T> TableView<'a, T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, TableView::Loading { .. })
    }

    pub fn is_empty_state(&self) -> bool {
        matches!(self, TableView::Empty { .. })
    }

    pub fn grid(&self) -> Option<&GridView<'a, T>> {
        match self {
            TableView::Grid(g) => Some(g),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct GridView<'a, T> {
    /// Whether checkboxes (header and per row) are shown.
    pub selectable: bool,
    pub select_all_checked: bool,
    pub headers: Vec<HeaderCell<'a>>,
    /// Every row, in display (sorted) order.
    pub rows: Vec<RowView<'a, T>>,
}

impl<T> GridView<'_, T> {
    pub fn row_refs(&self) -> Vec<&T> {
        self.rows.iter().map(|r| r.row).collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderCell<'a> {
    pub key: &'a str,
    pub title: &'a str,
    pub sortable: bool,
    pub aria_sort: AriaSort,
}

impl HeaderCell<'_> {
    /// Glyph drawn after the title: direction for the active column, a neutral marker for other
    /// sortable columns, nothing for the rest.
    pub fn indicator(&self) -> &'static str {
        if !self.sortable {
            return "";
        }
        match self.aria_sort {
            AriaSort::Ascending => "▲",
            AriaSort::Descending => "▼",
            AriaSort::None => "↕",
        }
    }
}

#[derive(Debug)]
pub struct RowView<'a, T> {
    /// Position in display order (0-based).
    pub position: usize,
    pub row: &'a T,
    /// `aria-selected`
    pub selected: bool,
    pub cursor: bool,
    /// Cell text per column, in column order.
    pub cells: Vec<String>,
}

impl<T> RowView<'_, T> {
    pub fn checkbox_label(&self) -> String {
        format!("Select row {}", self.position + 1)
    }
}
