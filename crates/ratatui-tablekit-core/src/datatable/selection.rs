//! Identity-based row selection.
//!
//! The selection keeps full row values in the order they were selected, and matches rows by
//! [`TableRow::row_id`] rather than by position or reference, so it stays correct when the
//! table is re-sorted.

use std::collections::HashSet;

use super::row::TableRow;

#[derive(Clone, Debug)]
pub struct RowSelection<T> {
    rows: Vec<T>,
}

impl<T> Default for RowSelection<T> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

impl<T: TableRow + Clone> RowSelection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected rows, in insertion order.
    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn contains(&self, row: &T) -> bool {
        self.contains_id(&row.row_id())
    }

    pub fn contains_id(&self, id: &T::Id) -> bool {
        self.rows.iter().any(|r| &r.row_id() == id)
    }

    /// Removes `row` if selected, appends it otherwise. Returns `true` if it ends up selected.
    pub fn toggle(&mut self, row: &T) -> bool {
        let id = row.row_id();
        if let Some(pos) = self.rows.iter().position(|r| r.row_id() == id) {
            self.rows.remove(pos);
            false
        } else {
            self.rows.push(row.clone());
            true
        }
    }

    /// Replaces the selection with `rows`, in the given order.
    pub fn select_all<'a>(&mut self, rows: impl IntoIterator<Item = &'a T>)
    where
        T: 'a,
    {
        self.rows = rows.into_iter().cloned().collect();
    }

    /// Clears the selection. Returns `true` if anything was selected.
    pub fn clear(&mut self) -> bool {
        let had_any = !self.rows.is_empty();
        self.rows.clear();
        had_any
    }

    /// Drops entries whose id is absent from `rows` and refreshes the survivors to the values
    /// found there. Insertion order is kept. Returns `true` if an entry was dropped.
    pub fn retain_present(&mut self, rows: &[T]) -> bool {
        let before = self.rows.len();
        let present: HashSet<T::Id> = rows.iter().map(TableRow::row_id).collect();
        self.rows.retain(|r| present.contains(&r.row_id()));
        for selected in &mut self.rows {
            let id = selected.row_id();
            if let Some(fresh) = rows.iter().find(|r| r.row_id() == id) {
                *selected = fresh.clone();
            }
        }
        self.rows.len() != before
    }
}
