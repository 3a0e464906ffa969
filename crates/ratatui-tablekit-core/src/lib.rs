//! `ratatui-tablekit-core` provides a sortable, selectable data table and a decorated text input
//! for terminal UIs built on ratatui.
//!
//! ## Design goals
//!
//! - Event-loop agnostic: you drive input + rendering from your app.
//! - No async runtime, no timers: spinners advance when you call `tick()`.
//! - The caller owns the data. The table never reorders or edits your rows, and the input field
//!   never stores its value; both report changes through callbacks and returned actions.
//!
//! ## Getting started
//!
//! Most users should depend on the facade crate `ratatui-tablekit`. Use this crate directly if
//! you only need the widgets.
//!
//! Useful entry points:
//! - [`datatable::DataTable`]: header sorting, row checkboxes, select-all, loading and empty
//!   states.
//! - [`input_field::InputField`]: label, helper/error text, clear button and password reveal.
//! - [`input::InputEvent`]: the backend-agnostic event both widgets consume. Enable the
//!   `crossterm` feature for [`crossterm_input`] conversions.
pub mod theme;

#[cfg(feature = "crossterm")]
pub mod crossterm_input;

pub mod error;
pub mod render;
pub mod spinner;

pub mod datatable;
pub mod input;
pub mod input_field;
pub mod keymap;
