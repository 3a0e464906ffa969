use std::cell::RefCell;
use std::io;
use std::rc::Rc;
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
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui_tablekit::crossterm_input::input_event_from_crossterm;
use ratatui_tablekit::datatable::Alignment;
use ratatui_tablekit::datatable::Column;
use ratatui_tablekit::datatable::DataRefresh;
use ratatui_tablekit::datatable::DataTable;
use ratatui_tablekit::datatable::DataTableOptions;
use ratatui_tablekit::datatable::Record;
use ratatui_tablekit::datatable::TableAction;
use ratatui_tablekit::datatable::TableRow;
use ratatui_tablekit::input::InputEvent;
use ratatui_tablekit::input::KeyCode;

fn people() -> Vec<Record> {
    let names = [
        ("John Doe", 30, "Active"),
        ("Jane Smith", 25, "Inactive"),
        ("Bob Johnson", 40, "Active"),
        ("Alice Brown", 35, "Active"),
        ("Charlie Wilson", 28, "Inactive"),
        ("Diana Prince", 31, "Active"),
        ("Evan Lee", 25, "Pending"),
    ];
    names
        .iter()
        .enumerate()
        .map(|(i, (name, age, status))| {
            Record::new(i as i64 + 1)
                .with("name", *name)
                .with("age", *age)
                .with("status", *status)
        })
        .collect()
}

fn main() -> io::Result<()> {
    // Run with RUST_LOG=debug 2>table.log to watch sort/selection events.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    crossterm::execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut table = DataTable::with_options(DataTableOptions {
        selectable: true,
        refresh: DataRefresh::Retain,
        ..Default::default()
    });
    let columns = vec![
        Column::field("name", "Name").sortable(),
        Column::field("age", "Age").sortable().width(6).align(Alignment::Right),
        Column::field("status", "Status").width(10),
    ];
    if let Err(err) = table.set_columns(columns) {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, err));
    }
    table.set_data(people());

    let selected = Rc::new(RefCell::new(String::from("-")));
    let sink = Rc::clone(&selected);
    table.on_selection_change(move |rows| {
        let ids: Vec<String> = rows.iter().map(|r| r.row_id().to_string()).collect();
        *sink.borrow_mut() = if ids.is_empty() {
            "-".to_string()
        } else {
            ids.join(",")
        };
    });

    let res = run(&mut terminal, &mut table, &selected);

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    res
}

fn run<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    table: &mut DataTable<Record>,
    selected: &Rc<RefCell<String>>,
) -> io::Result<()> {
    let mut dark = false;
    loop {
        table.tick();
        terminal.draw(|f| {
            let block = Block::default()
                .title("DataTable (jk/↑↓ rows, hl/←→ + s sort, Space/a select, L loading, E empty, D dark, q)")
                .borders(Borders::ALL);
            let inner = block.inner(f.area());
            f.render_widget(block, f.area());

            let [table_area, status_area] =
                Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(inner);
            let buf = f.buffer_mut();
            table.render(table_area, buf);

            let sort = table
                .sort_state()
                .map(|s| format!("{} {:?}", s.column, s.direction))
                .unwrap_or_else(|| "-".to_string());
            let status = format!("sort={sort}  selected={}", selected.borrow());
            let span = Span::styled(status, table.theme().text_muted);
            buf.set_span(status_area.x, status_area.y, &span, status_area.width);
        })?;

        if !crossterm::event::poll(Duration::from_millis(80))? {
            continue;
        }
        let Some(ev) = input_event_from_crossterm(crossterm::event::read()?) else {
            continue;
        };
        if let InputEvent::Key(key) = &ev {
            match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Char('L') => {
                    table.set_loading(!table.is_loading());
                    continue;
                }
                KeyCode::Char('E') => {
                    let next = if table.rows().is_empty() {
                        people()
                    } else {
                        Vec::new()
                    };
                    table.set_data(next);
                    continue;
                }
                KeyCode::Char('D') => {
                    dark = !dark;
                    table.set_dark_mode(dark);
                    continue;
                }
                _ => {}
            }
        }
        match table.handle_event(ev) {
            TableAction::Sorted(state) => {
                tracing::info!(column = %state.column, direction = ?state.direction, "sorted");
            }
            TableAction::SelectionChanged | TableAction::Redraw | TableAction::None => {}
        }
    }
}
