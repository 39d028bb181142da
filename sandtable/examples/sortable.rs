use std::time::Duration;

use sandtable::render::table_element;
use sandtable::{
    process_events, render_table, sort_by_column, Column, Event, Key, NumericMode, Screen,
    SortState, TableModel, Terminal,
};

fn main() -> std::io::Result<()> {
    let mut term = Terminal::new()?;

    let mut table = TableModel::new(vec![
        Column::new("Sample", "sample"),
        Column::new("Grain size", "grain"),
    ])
    .row(["Dune A", "10"])
    .row(["Dune B", "2"])
    .row(["Shoreline", "1"])
    .row(["Harbor", "12kg"]);

    let mut state = SortState::new();

    loop {
        let mut screen = Screen::new();
        screen.push_line("sandtable demo — click a header to sort, q to quit");
        screen.blank();
        render_table(&mut screen, &table, &state, "demo", None);

        let root = table_element(&table, "demo", None, |_| Vec::new());
        term.draw(screen.lines())?;

        let raw = term.poll(Some(Duration::from_millis(100)))?;
        for event in process_events(&raw, &root, screen.layout()) {
            match event {
                Event::Key {
                    key: Key::Char('q') | Key::Escape,
                    ..
                } => return Ok(()),
                Event::Click {
                    target: Some(target),
                    ..
                } => {
                    if let Some(col) = target
                        .strip_prefix("demo-th-")
                        .and_then(|s| s.parse::<usize>().ok())
                    {
                        let dir = state.click(col);
                        let _ = sort_by_column(
                            &mut table,
                            col,
                            dir.is_ascending(),
                            NumericMode::LenientPrefix,
                        );
                    }
                }
                _ => {}
            }
        }
    }
}
