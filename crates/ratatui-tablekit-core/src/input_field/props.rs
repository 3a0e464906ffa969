use crate::input::KeyEvent;
use crate::keymap;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FieldKind {
    #[default]
    Text,
    /// Masked text with a reveal affordance.
    Password,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Variant {
    Filled,
    #[default]
    Outlined,
    Ghost,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Size {
    Sm,
    #[default]
    Md,
    Lg,
}

#[derive(Clone, Debug)]
pub struct FieldBindings {
    pub clear: Vec<KeyEvent>,
    pub reveal: Vec<KeyEvent>,
}

impl Default for FieldBindings {
    fn default() -> Self {
        Self {
            clear: vec![keymap::key_ctrl('u')],
            reveal: vec![keymap::key_ctrl('r')],
        }
    }
}

/// Everything about an [`super::InputField`] except its value, which the caller owns and passes
/// to `view`, `handle_event` and `render`.
#[derive(Clone, Debug)]
pub struct InputFieldProps {
    pub label: Option<String>,
    pub placeholder: Option<String>,
    pub helper_text: Option<String>,
    /// Shown instead of the helper text while `invalid` is set.
    pub error_message: Option<String>,
    pub disabled: bool,
    pub invalid: bool,
    pub loading: bool,
    pub clearable: bool,
    pub required: bool,
    pub variant: Variant,
    pub size: Size,
    pub kind: FieldKind,
    pub name: Option<String>,
    pub id: Option<String>,
    pub mask_char: char,
    pub dark_mode: bool,
    pub bindings: FieldBindings,
}

impl Default for InputFieldProps {
    fn default() -> Self {
        Self {
            label: None,
            placeholder: None,
            helper_text: None,
            error_message: None,
            disabled: false,
            invalid: false,
            loading: false,
            clearable: false,
            required: false,
            variant: Variant::default(),
            size: Size::default(),
            kind: FieldKind::default(),
            name: None,
            id: None,
            mask_char: '•',
            dark_mode: false,
            bindings: FieldBindings::default(),
        }
    }
}

impl InputFieldProps {
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_helper_text(mut self, text: impl Into<String>) -> Self {
        self.helper_text = Some(text.into());
        self
    }

    pub fn with_error_message(mut self, text: impl Into<String>) -> Self {
        self.error_message = Some(text.into());
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_kind(mut self, kind: FieldKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    pub fn clearable(mut self) -> Self {
        self.clearable = true;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// The id of the input control: `id`, falling back to `name`.
    pub fn control_id(&self) -> Option<&str> {
        self.id.as_deref().or(self.name.as_deref())
    }

    pub fn is_password(&self) -> bool {
        self.kind == FieldKind::Password
    }

    /// Disabled or loading: no typing, clearing or revealing.
    pub fn is_inert(&self) -> bool {
        self.disabled || self.loading
    }
}
