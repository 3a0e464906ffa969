//! Sortable, selectable data table.
//!
//! [`DataTable`] renders caller-owned rows through a list of [`Column`]s. Sorting and selection
//! are local state; the caller learns about selection changes through
//! [`DataTable::on_selection_change`] and the [`TableAction`] returned from `handle_event`.
//!
//! ```ignore
//! let mut table = DataTable::with_options(DataTableOptions {
//!     selectable: true,
//!     ..Default::default()
//! });
//! table.set_columns(vec![
//!     Column::field("name", "Name").sortable(),
//!     Column::field("age", "Age").sortable().align(Alignment::Right),
//!     Column::field("status", "Status"),
//! ])?;
//! table.set_data(vec![
//!     Record::new(1).with("name", "John Doe").with("age", 30).with("status", "Active"),
//!     Record::new(2).with("name", "Jane Smith").with("age", 25).with("status", "Inactive"),
//! ]);
//! table.on_selection_change(|rows| println!("{} selected", rows.len()));
//! ```

mod column;
mod model;
mod row;
mod selection;
mod sort;
mod value;
mod view;

pub use column::Alignment;
pub use column::Column;
pub use model::GridView;
pub use model::HeaderCell;
pub use model::LiveRegion;
pub use model::RowView;
pub use model::SELECT_ALL_LABEL;
pub use model::TableView;
pub use row::Record;
pub use row::RowKey;
pub use row::TableRow;
pub use selection::RowSelection;
pub use sort::AriaSort;
pub use sort::SortDirection;
pub use sort::SortState;
pub use sort::sort_order;
pub use value::CellValue;
pub use view::DataRefresh;
pub use view::DataTable;
pub use view::DataTableOptions;
pub use view::TableAction;
pub use view::TableBindings;
