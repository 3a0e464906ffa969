use std::io;
use std::time::Duration;

use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Constraint;
use ratatui::layout::Layout;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui_tablekit::crossterm_input::input_event_from_crossterm;
use ratatui_tablekit::input::InputEvent;
use ratatui_tablekit::input::KeyCode;
use ratatui_tablekit::input_field::FieldAction;
use ratatui_tablekit::input_field::FieldKind;
use ratatui_tablekit::input_field::InputField;
use ratatui_tablekit::input_field::InputFieldProps;
use ratatui_tablekit::input_field::Size;
use ratatui_tablekit::input_field::Variant;

struct Form {
    fields: Vec<(InputField, String)>,
    focus: usize,
}

impl Form {
    fn new() -> Self {
        let email = InputField::with_props(
            InputFieldProps::default()
                .with_label("Email")
                .with_id("email")
                .with_placeholder("you@example.com")
                .with_helper_text("We'll never share your email")
                .with_error_message("Please enter a valid email address")
                .required()
                .clearable(),
        );
        let password = InputField::with_props(
            InputFieldProps::default()
                .with_label("Password")
                .with_name("password")
                .with_kind(FieldKind::Password)
                .with_helper_text("Ctrl+R shows or hides it")
                .with_variant(Variant::Filled),
        );
        let search = InputField::with_props(
            InputFieldProps::default()
                .with_placeholder("Search...")
                .with_variant(Variant::Ghost)
                .with_size(Size::Sm)
                .clearable(),
        );
        Self {
            fields: vec![
                (email, String::new()),
                (password, String::new()),
                (search, String::from("ratatui")),
            ],
            focus: 0,
        }
    }

    fn revalidate_email(&mut self) {
        let (field, value) = &mut self.fields[0];
        let invalid = !value.is_empty() && !value.contains('@');
        field.update_props(|p| p.invalid = invalid);
    }
}

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    crossterm::execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut form = Form::new();
    let res = run(&mut terminal, &mut form);

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    res
}

fn run<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, form: &mut Form) -> io::Result<()> {
    loop {
        for (field, _) in &mut form.fields {
            field.tick();
        }
        terminal.draw(|f| {
            let block = Block::default()
                .title("InputField (Tab focus, Ctrl+U clear, Ctrl+R reveal, Ctrl+L loading, Ctrl+D disable, Esc quit)")
                .borders(Borders::ALL);
            let inner = block.inner(f.area());
            f.render_widget(block, f.area());

            let areas = Layout::vertical([
                Constraint::Length(5),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Fill(1),
            ])
            .spacing(1)
            .split(inner);
            let focus = form.focus;
            let mut cursor = None;
            for (i, ((field, value), area)) in form.fields.iter_mut().zip(areas.iter()).enumerate() {
                field.render(value, *area, f.buffer_mut());
                if i == focus {
                    cursor = field.cursor_position();
                }
            }
            if let Some(pos) = cursor {
                f.set_cursor_position(pos);
            }
        })?;

        if !crossterm::event::poll(Duration::from_millis(80))? {
            continue;
        }
        let Some(ev) = input_event_from_crossterm(crossterm::event::read()?) else {
            continue;
        };
        if let InputEvent::Key(key) = &ev {
            match key.code {
                KeyCode::Esc => return Ok(()),
                KeyCode::Tab => {
                    form.focus = (form.focus + 1) % form.fields.len();
                    continue;
                }
                KeyCode::Char('l') if key.modifiers.ctrl => {
                    let (field, _) = &mut form.fields[form.focus];
                    field.update_props(|p| p.loading = !p.loading);
                    continue;
                }
                KeyCode::Char('d') if key.modifiers.ctrl => {
                    let (field, _) = &mut form.fields[form.focus];
                    field.update_props(|p| p.disabled = !p.disabled);
                    continue;
                }
                _ => {}
            }
        }
        if let InputEvent::Mouse(mouse) = &ev {
            if mouse.is_click() {
                // Clicks go to whichever field was drawn there; focus follows.
                for i in 0..form.fields.len() {
                    let (field, value) = &mut form.fields[i];
                    let action = field.handle_event(value, ev.clone());
                    if action != FieldAction::None {
                        form.focus = i;
                        if let FieldAction::Changed(next) = action {
                            *value = next;
                        }
                    }
                }
                form.revalidate_email();
                continue;
            }
        }

        let focus = form.focus;
        let (field, value) = &mut form.fields[focus];
        if let FieldAction::Changed(next) = field.handle_event(value, ev) {
            *value = next;
        }
        if focus == 0 {
            form.revalidate_email();
        }
    }
}
