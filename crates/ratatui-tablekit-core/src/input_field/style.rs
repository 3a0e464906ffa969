use ratatui::style::Modifier;
use ratatui::style::Style;

use super::props::InputFieldProps;
use super::props::Size;
use super::props::Variant;
use crate::theme::Theme;

/// Appearance of one render, resolved from the variant, size, state flags and theme.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldStyle {
    pub bordered: bool,
    pub border: Style,
    pub fill: Style,
    pub text: Style,
    pub placeholder: Style,
    pub label: Style,
    pub required_marker: Style,
    pub supporting: Style,
    pub affordance: Style,
    /// Horizontal padding inside the input box, in columns.
    pub pad_x: u16,
}

impl FieldStyle {
    pub fn resolve(props: &InputFieldProps, theme: &Theme) -> Self {
        let fill = match props.variant {
            Variant::Filled => theme.field_fill,
            Variant::Outlined | Variant::Ghost => Style::default(),
        };
        let pad_x = match props.size {
            Size::Sm => 0,
            Size::Md => 1,
            Size::Lg => 2,
        };
        let mut text = fill.patch(theme.text_primary);
        let mut border = theme.border;
        if props.invalid {
            border = theme.danger;
        }
        if props.disabled {
            text = text.patch(theme.text_muted).add_modifier(Modifier::DIM);
            border = theme.text_muted;
        }
        let label = if props.size == Size::Lg {
            theme.text_primary.add_modifier(Modifier::BOLD)
        } else {
            theme.text_primary
        };
        Self {
            bordered: props.variant == Variant::Outlined,
            border,
            fill,
            text,
            placeholder: fill.patch(theme.text_muted),
            label,
            required_marker: theme.danger,
            supporting: if props.invalid {
                theme.danger
            } else {
                theme.text_muted
            },
            affordance: fill.patch(theme.accent),
            pad_x,
        }
    }

    /// Rows taken by the input box itself.
    pub fn box_height(&self) -> u16 {
        if self.bordered { 3 } else { 1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_outlined_draws_a_border() {
        let theme = Theme::light();
        for (variant, bordered) in [
            (Variant::Outlined, true),
            (Variant::Filled, false),
            (Variant::Ghost, false),
        ] {
            let props = InputFieldProps::default().with_variant(variant);
            let style = FieldStyle::resolve(&props, &theme);
            assert_eq!(style.bordered, bordered);
            assert_eq!(style.box_height(), if bordered { 3 } else { 1 });
        }
    }

    #[test]
    fn invalid_uses_danger_for_border_and_supporting_text() {
        let theme = Theme::dark();
        let props = InputFieldProps {
            invalid: true,
            ..Default::default()
        };
        let style = FieldStyle::resolve(&props, &theme);
        assert_eq!(style.border, theme.danger);
        assert_eq!(style.supporting, theme.danger);
    }
}
