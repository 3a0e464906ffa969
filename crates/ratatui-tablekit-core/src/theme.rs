use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;

/// Light or dark palette. The table's `dark_mode` flag maps onto this.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn from_dark_flag(dark: bool) -> Self {
        if dark { ThemeMode::Dark } else { ThemeMode::Light }
    }
}

/// Shared palette for every widget in the crate.
#[derive(Clone, Debug)]
pub struct Theme {
    pub mode: ThemeMode,
    pub text_primary: Style,
    pub text_muted: Style,
    pub accent: Style,
    pub danger: Style,
    pub surface: Style,
    pub header: Style,
    pub selected_row: Style,
    pub cursor_row: Style,
    pub border: Style,
    pub field_fill: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

impl Theme {
    pub fn light() -> Self {
        Self {
            mode: ThemeMode::Light,
            text_primary: Style::default().fg(Color::Black),
            text_muted: Style::default().fg(Color::DarkGray),
            accent: Style::default().fg(Color::Blue),
            danger: Style::default().fg(Color::Red),
            surface: Style::default().bg(Color::White),
            header: Style::default()
                .fg(Color::DarkGray)
                .bg(Color::Gray)
                .add_modifier(Modifier::BOLD),
            selected_row: Style::default().fg(Color::Black).bg(Color::LightBlue),
            cursor_row: Style::default().add_modifier(Modifier::REVERSED),
            border: Style::default().fg(Color::Gray),
            field_fill: Style::default().bg(Color::Gray),
        }
    }

    pub fn dark() -> Self {
        Self {
            mode: ThemeMode::Dark,
            text_primary: Style::default().fg(Color::Gray),
            text_muted: Style::default().fg(Color::DarkGray),
            accent: Style::default().fg(Color::Cyan),
            danger: Style::default().fg(Color::LightRed),
            surface: Style::default().bg(Color::Black),
            header: Style::default()
                .fg(Color::Gray)
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
            selected_row: Style::default().fg(Color::White).bg(Color::Blue),
            cursor_row: Style::default().add_modifier(Modifier::REVERSED),
            border: Style::default().fg(Color::DarkGray),
            field_fill: Style::default().bg(Color::DarkGray),
        }
    }

    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
        }
    }
}
