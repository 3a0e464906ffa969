//! Single-line text input with label, helper/error text, clear and reveal affordances.
//!
//! ```ignore
//! let mut field = InputField::with_props(
//!     InputFieldProps::default()
//!         .with_label("Email")
//!         .with_placeholder("you@example.com")
//!         .with_helper_text("We never share it")
//!         .with_id("email")
//!         .clearable(),
//! );
//! if let FieldAction::Changed(next) = field.handle_event(&email, event) {
//!     email = next;
//! }
//! field.render(&email, area, buf);
//! ```

mod props;
mod style;
mod view;

pub use props::FieldBindings;
pub use props::FieldKind;
pub use props::InputFieldProps;
pub use props::Size;
pub use props::Variant;
pub use style::FieldStyle;
pub use view::CLEAR_GLYPH;
pub use view::CLEAR_LABEL;
pub use view::FieldAction;
pub use view::FieldView;
pub use view::InputField;
pub use view::RevealAffordance;
pub use view::SupportingText;
