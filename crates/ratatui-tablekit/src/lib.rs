//! `ratatui-tablekit`: a sortable, selectable data table and a decorated input field for ratatui
//! apps.
//!
//! This facade re-exports [`ratatui_tablekit_core`]. Enable the `crossterm` feature to get
//! `crossterm_input` conversions for your event loop.
//!
//! ```ignore
//! use ratatui_tablekit::datatable::{Column, DataTable, DataTableOptions, Record};
//!
//! let mut table = DataTable::with_options(DataTableOptions { selectable: true, ..Default::default() });
//! table.set_columns(vec![Column::field("name", "Name").sortable()])?;
//! table.set_data(vec![Record::new(1).with("name", "John Doe")]);
//! ```

pub use ratatui_tablekit_core::datatable;
pub use ratatui_tablekit_core::error;
pub use ratatui_tablekit_core::input;
pub use ratatui_tablekit_core::input_field;
pub use ratatui_tablekit_core::keymap;
pub use ratatui_tablekit_core::render;
pub use ratatui_tablekit_core::spinner;
pub use ratatui_tablekit_core::theme;

#[cfg(feature = "crossterm")]
pub use ratatui_tablekit_core::crossterm_input;

pub use ratatui_tablekit_core::datatable::DataTable;
pub use ratatui_tablekit_core::error::TableError;
pub use ratatui_tablekit_core::input_field::InputField;
