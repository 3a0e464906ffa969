use std::fmt;
use std::sync::Arc;

use super::row::Record;
use super::value::CellValue;

/// Horizontal alignment for column content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

type Selector<T> = Arc<dyn Fn(&T) -> CellValue + Send + Sync>;

/// Column configuration for [`super::DataTable`].
///
/// `key` identifies the column (sort state refers to it), `title` is the header label and the
/// selector plays the role of a field accessor into `T`.
///
/// ```ignore
/// let columns = vec![
///     Column::new("name", "Name", |u: &User| u.name.as_str().into()).sortable(),
///     Column::new("age", "Age", |u: &User| u.age.into()).sortable().align(Alignment::Right),
///     Column::new("status", "Status", |u: &User| u.status.as_str().into()),
/// ];
/// ```
pub struct Column<T> {
    pub key: String,
    pub title: String,
    pub sortable: bool,
    /// Fixed width in terminal columns; `None` shares the remaining space.
    pub width: Option<u16>,
    pub align: Alignment,
    selector: Selector<T>,
}

impl<T> Column<T> {
    pub fn new(
        key: impl Into<String>,
        title: impl Into<String>,
        selector: impl Fn(&T) -> CellValue + Send + Sync + 'static,
    ) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            sortable: false,
            width: None,
            align: Alignment::Left,
            selector: Arc::new(selector),
        }
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    pub fn value(&self, row: &T) -> CellValue {
        (self.selector)(row)
    }
}

impl Column<Record> {
    /// A column reading the [`Record`] field named like its key.
    pub fn field(key: impl Into<String>, title: impl Into<String>) -> Self {
        let key = key.into();
        let field = key.clone();
        Self::new(key, title, move |r: &Record| r.get(&field))
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            title: self.title.clone(),
            sortable: self.sortable,
            width: self.width,
            align: self.align,
            selector: Arc::clone(&self.selector),
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("title", &self.title)
            .field("sortable", &self.sortable)
            .field("width", &self.width)
            .field("align", &self.align)
            .finish_non_exhaustive()
    }
}
