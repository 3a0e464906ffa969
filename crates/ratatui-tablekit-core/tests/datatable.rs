use std::cell::RefCell;
use std::rc::Rc;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui_tablekit_core::datatable::Alignment;
use ratatui_tablekit_core::datatable::AriaSort;
use ratatui_tablekit_core::datatable::Column;
use ratatui_tablekit_core::datatable::DataTable;
use ratatui_tablekit_core::datatable::DataTableOptions;
use ratatui_tablekit_core::datatable::Record;
use ratatui_tablekit_core::datatable::RowKey;
use ratatui_tablekit_core::datatable::SortDirection;
use ratatui_tablekit_core::datatable::TableAction;
use ratatui_tablekit_core::datatable::TableRow;
use ratatui_tablekit_core::datatable::TableView;
use ratatui_tablekit_core::error::TableError;
use ratatui_tablekit_core::input::InputEvent;

type Calls = Rc<RefCell<Vec<Vec<RowKey>>>>;

fn people() -> Vec<Record> {
    vec![
        Record::new(1).with("name", "John Doe").with("age", 30).with("status", "Active"),
        Record::new(2).with("name", "Jane Smith").with("age", 25).with("status", "Inactive"),
        Record::new(3).with("name", "Bob Johnson").with("age", 40).with("status", "Active"),
    ]
}

fn columns() -> Vec<Column<Record>> {
    vec![
        Column::field("name", "Name").sortable(),
        Column::field("age", "Age").sortable().width(5).align(Alignment::Right),
        Column::field("status", "Status").width(10),
    ]
}

fn selectable_table() -> (DataTable<Record>, Calls) {
    let mut table = DataTable::with_options(DataTableOptions {
        selectable: true,
        ..Default::default()
    });
    table.set_columns(columns()).expect("unique keys");
    table.set_data(people());
    let calls: Calls = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&calls);
    table.on_selection_change(move |rows| {
        sink.borrow_mut()
            .push(rows.iter().map(TableRow::row_id).collect());
    });
    (table, calls)
}

fn ages(table: &DataTable<Record>) -> Vec<String> {
    table
        .sorted_rows()
        .map(|r| r.get("age").to_string())
        .collect()
}

fn keys(ids: &[i64]) -> Vec<RowKey> {
    ids.iter().copied().map(RowKey::Int).collect()
}

fn render(table: &mut DataTable<Record>, width: u16, height: u16) -> Vec<String> {
    let area = Rect::new(0, 0, width, height);
    let mut buf = Buffer::empty(area);
    table.render(area, &mut buf);
    (0..height)
        .map(|y| {
            (0..width)
                .map(|x| buf.cell((x, y)).map(|c| c.symbol()).unwrap_or(" "))
                .collect::<String>()
                .trim_end()
                .to_string()
        })
        .collect()
}

#[test]
fn header_activation_cycles_through_directions() {
    let (mut table, _) = selectable_table();

    let state = table.sort_by("age").expect("sortable");
    assert_eq!(state.direction, SortDirection::Ascending);
    assert_eq!(ages(&table), ["25", "30", "40"]);

    table.sort_by("age").expect("sortable");
    assert_eq!(ages(&table), ["40", "30", "25"]);

    let state = table.sort_by("name").expect("sortable");
    assert_eq!(state.direction, SortDirection::Ascending);
    let names: Vec<String> = table.sorted_rows().map(|r| r.get("name").to_string()).collect();
    assert_eq!(names, ["Bob Johnson", "Jane Smith", "John Doe"]);

    // The caller's data is never reordered.
    assert_eq!(table.rows(), people().as_slice());
}

#[test]
fn toggles_report_the_full_selection_in_insertion_order() {
    let (mut table, calls) = selectable_table();
    for id in [1, 2, 1] {
        assert!(table.toggle_row(&RowKey::Int(id)));
    }
    assert_eq!(*calls.borrow(), [keys(&[1]), keys(&[1, 2]), keys(&[2])]);
}

#[test]
fn select_all_then_clear() {
    let (mut table, calls) = selectable_table();
    assert!(!table.select_all_checked());

    table.toggle_all();
    assert_eq!(calls.borrow().last().cloned(), Some(keys(&[1, 2, 3])));
    assert!(table.select_all_checked());

    table.toggle_all();
    assert_eq!(calls.borrow().last().cloned(), Some(Vec::new()));
    assert!(!table.select_all_checked());
}

#[test]
fn selection_survives_resorting() {
    let (mut table, _) = selectable_table();
    table.toggle_row(&RowKey::Int(3));
    table.sort_by("age").expect("sortable");
    table.sort_by("age").expect("sortable");

    let view = table.view();
    let grid = view.grid().expect("grid");
    let selected: Vec<RowKey> = grid
        .rows
        .iter()
        .filter(|r| r.selected)
        .map(|r| r.row.row_id())
        .collect();
    assert_eq!(selected, keys(&[3]));
    let order: Vec<RowKey> = grid.row_refs().iter().map(|r| r.row_id()).collect();
    assert_eq!(order, keys(&[3, 1, 2]));
    assert_eq!(grid.rows[0].position, 0);
    assert!(grid.rows[0].selected);
}

#[test]
fn view_exposes_sort_and_selection_attributes() {
    let (mut table, _) = selectable_table();
    table.sort_by("age").expect("sortable");
    table.sort_by("age").expect("sortable");
    table.toggle_row(&RowKey::Int(2));

    let view = table.view();
    let grid = view.grid().expect("grid");
    let aria: Vec<AriaSort> = grid.headers.iter().map(|h| h.aria_sort).collect();
    assert_eq!(aria, [AriaSort::None, AriaSort::Descending, AriaSort::None]);
    assert_eq!(grid.headers[1].indicator(), "▼");
    assert_eq!(grid.headers[2].indicator(), "");
    assert!(grid.selectable);
    assert_eq!(grid.rows[2].checkbox_label(), "Select row 3");
    assert!(grid.rows[2].selected);
    assert_eq!(grid.rows[2].cells, ["Jane Smith", "25", "Inactive"]);
}

#[test]
fn loading_hides_the_grid_but_keeps_state() {
    let (mut table, _) = selectable_table();
    table.toggle_row(&RowKey::Int(1));
    table.set_loading(true);

    match table.view() {
        TableView::Loading { region, label, .. } => {
            assert!(region.busy);
            assert_eq!(label, "Loading...");
        }
        other => panic!("expected loading state, got {other:?}"),
    }
    let lines = render(&mut table, 30, 3).join("\n");
    assert!(lines.contains("Loading..."));
    assert!(!lines.contains("Name"));
    assert!(!lines.contains("[ ]"));

    table.set_loading(false);
    assert_eq!(table.selected_rows().len(), 1);
    assert!(table.view().grid().is_some());
}

#[test]
fn empty_dataset_shows_placeholder_unless_loading() {
    let mut table: DataTable<Record> = DataTable::new();
    table.set_columns(columns()).expect("unique keys");

    let view = table.view();
    assert!(view.is_empty_state());
    let lines = render(&mut table, 30, 5).join("\n");
    assert!(lines.contains("No data available"));
    assert!(!lines.contains("Name"));

    table.set_loading(true);
    assert!(table.view().is_loading());
}

#[test]
fn renders_header_checkboxes_and_aligned_cells() {
    let (mut table, _) = selectable_table();
    let lines = render(&mut table, 40, 5);

    assert!(lines[0].starts_with("[ ] Name ↕"));
    assert!(lines[0].contains("Age ↕ Status"));
    assert!(lines[1].starts_with("[ ] John Doe"));
    assert!(lines[1].contains("30 Active"));
    assert!(lines[2].contains("25 Inactive"));

    table.toggle_all();
    let lines = render(&mut table, 40, 5);
    assert!(lines[0].starts_with("[x]"));
    assert!(lines[1..4].iter().all(|l| l.starts_with("[x]")));
}

#[test]
fn clicks_resolve_to_exactly_one_target() {
    let (mut table, calls) = selectable_table();
    render(&mut table, 40, 5);

    // Header select-all checkbox.
    assert_eq!(
        table.handle_event(InputEvent::click(1, 0)),
        TableAction::SelectionChanged
    );
    assert_eq!(calls.borrow().len(), 1);
    assert!(table.select_all_checked());

    // Row checkbox: one notification, one toggle.
    table.handle_event(InputEvent::click(0, 2));
    assert_eq!(calls.borrow().len(), 2);
    assert_eq!(calls.borrow().last().cloned(), Some(keys(&[1, 3])));

    // Sortable header cell.
    match table.handle_event(InputEvent::click(5, 0)) {
        TableAction::Sorted(state) => assert_eq!(state.column, "name"),
        other => panic!("expected sort, got {other:?}"),
    }
    // Non-sortable header cell.
    assert_eq!(table.handle_event(InputEvent::click(31, 0)), TableAction::None);
    assert_eq!(calls.borrow().len(), 2);
}

#[test]
fn configuration_errors_are_reported() {
    let mut table: DataTable<Record> = DataTable::new();
    let err = table
        .set_columns(vec![Column::field("id", "ID"), Column::field("id", "Other")])
        .unwrap_err();
    assert_eq!(err.to_string(), "duplicate column key 'id'");

    table.set_columns(columns()).expect("unique keys");
    assert_eq!(
        table.sort_by("status"),
        Err(TableError::ColumnNotSortable("status".into()))
    );
}
