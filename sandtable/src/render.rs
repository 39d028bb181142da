//! Line-oriented rendering.
//!
//! `Screen` accumulates display lines and records where identified spans
//! landed, producing the `LayoutResult` that hit testing runs against.

use crate::element::Element;
use crate::layout::{LayoutResult, Rect};
use crate::table::{SortState, TableModel};
use crate::text::{display_width, pad_to_width};

/// Gap between table columns.
const COLUMN_GAP: usize = 2;

/// A screen being built line by line.
#[derive(Debug, Default)]
pub struct Screen {
    lines: Vec<String>,
    layout: LayoutResult,
}

/// One segment of a line: optional element ID plus text.
pub struct Span<'a> {
    pub id: Option<&'a str>,
    pub text: &'a str,
}

impl<'a> Span<'a> {
    pub fn plain(text: &'a str) -> Self {
        Self { id: None, text }
    }

    pub fn tagged(id: &'a str, text: &'a str) -> Self {
        Self {
            id: Some(id),
            text,
        }
    }
}

impl Screen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current line count, i.e. the y coordinate of the next line.
    pub fn cursor(&self) -> u16 {
        self.lines.len() as u16
    }

    pub fn blank(&mut self) {
        self.lines.push(String::new());
    }

    pub fn push_line(&mut self, text: impl Into<String>) {
        self.lines.push(text.into());
    }

    /// Push a line and record a rect for it under the given ID.
    pub fn push_tagged(&mut self, id: impl Into<String>, text: impl Into<String>) {
        let text = text.into();
        let rect = Rect::new(0, self.cursor(), display_width(&text) as u16, 1);
        self.layout.insert(id.into(), rect);
        self.lines.push(text);
    }

    /// Push a line built from spans, recording a rect for each tagged span.
    pub fn push_spans(&mut self, spans: &[Span<'_>]) {
        let y = self.cursor();
        let mut line = String::new();
        let mut x = 0usize;

        for span in spans {
            let width = display_width(span.text);
            if let Some(id) = span.id {
                self.layout
                    .insert(id.to_string(), Rect::new(x as u16, y, width as u16, 1));
            }
            line.push_str(span.text);
            x += width;
        }

        self.lines.push(line);
    }

    /// Record a rect directly, without emitting a line.
    pub fn register(&mut self, id: impl Into<String>, rect: Rect) {
        self.layout.insert(id.into(), rect);
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn layout(&self) -> &LayoutResult {
        &self.layout
    }

    pub fn into_parts(self) -> (Vec<String>, LayoutResult) {
        (self.lines, self.layout)
    }
}

/// Element ID of a header cell.
pub fn header_cell_id(prefix: &str, column: usize) -> String {
    format!("{prefix}-th-{column}")
}

/// Element ID of a per-row action cell.
pub fn action_cell_id(prefix: &str, row: usize) -> String {
    format!("{prefix}-act-{row}")
}

/// Width of each column: widest of the header label (plus indicator slot)
/// and every cell in the column.
fn column_widths(table: &TableModel) -> Vec<usize> {
    let mut widths: Vec<usize> = table
        .columns
        .iter()
        .map(|c| display_width(&c.label) + 2)
        .collect();

    for row in &table.rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(display_width(cell.trim()));
            }
        }
    }

    widths
}

/// Render a table to the screen: header line with the active column's
/// direction glyph, a separator, one line per row. Header cells and action
/// cells are tagged so clicks resolve to them.
pub fn render_table(
    screen: &mut Screen,
    table: &TableModel,
    state: &SortState,
    prefix: &str,
    action_label: Option<&str>,
) {
    let widths = column_widths(table);
    let top = screen.cursor();

    // Header
    let mut header_cells: Vec<(String, String)> = Vec::new();
    for (i, col) in table.columns.iter().enumerate() {
        let label = match state.indicator(i) {
            Some(dir) => format!("{} {}", col.label, dir.indicator()),
            None => col.label.clone(),
        };
        header_cells.push((header_cell_id(prefix, i), pad_to_width(&label, widths[i])));
    }
    {
        let mut spans: Vec<Span<'_>> = Vec::new();
        let gap = " ".repeat(COLUMN_GAP);
        for (i, (id, text)) in header_cells.iter().enumerate() {
            if i > 0 {
                spans.push(Span::plain(&gap));
            }
            spans.push(Span::tagged(id, text));
        }
        let action_header = action_label.map(|label| pad_to_width("", label.len() + 2));
        if let Some(ah) = &action_header {
            spans.push(Span::plain(&gap));
            spans.push(Span::plain(ah));
        }
        screen.push_spans(&spans);
    }

    // Separator
    let total: usize = widths.iter().sum::<usize>()
        + COLUMN_GAP * widths.len().saturating_sub(1)
        + action_label.map_or(0, |l| COLUMN_GAP + l.len() + 2);
    screen.push_line("─".repeat(total));

    // Rows
    for (r, row) in table.rows.iter().enumerate() {
        let mut cells: Vec<String> = Vec::new();
        for (i, width) in widths.iter().enumerate() {
            let text = row.get(i).map(|c| c.trim()).unwrap_or("");
            cells.push(pad_to_width(text, *width));
        }

        let action_id = action_label.map(|_| action_cell_id(prefix, r));
        let action_text = action_label.map(|label| format!("[{label}]"));

        let mut spans: Vec<Span<'_>> = Vec::new();
        let gap = " ".repeat(COLUMN_GAP);
        for (i, text) in cells.iter().enumerate() {
            if i > 0 {
                spans.push(Span::plain(&gap));
            }
            spans.push(Span::plain(text));
        }
        if let (Some(id), Some(text)) = (&action_id, &action_text) {
            spans.push(Span::plain(&gap));
            spans.push(Span::tagged(id, text));
        }
        screen.push_spans(&spans);
    }

    // Container rect, so hit testing can descend into the cells
    let height = screen.cursor() - top;
    screen.register(
        format!("{prefix}-table"),
        Rect::new(0, top, total as u16, height),
    );
}

/// Build the element subtree matching `render_table`'s IDs: clickable header
/// cells carrying their column index, and (optionally) one clickable action
/// cell per row with attributes supplied by `action_attrs`.
pub fn table_element(
    table: &TableModel,
    prefix: &str,
    action_label: Option<&str>,
    action_attrs: impl Fn(usize) -> Vec<(String, String)>,
) -> Element {
    let mut root = Element::box_().id(format!("{prefix}-table"));

    for (i, col) in table.columns.iter().enumerate() {
        root = root.child(
            Element::text(col.label.clone())
                .id(header_cell_id(prefix, i))
                .clickable(true)
                .data("column", i.to_string()),
        );
    }

    if let Some(label) = action_label {
        for r in 0..table.rows.len() {
            let mut cell = Element::text(label)
                .id(action_cell_id(prefix, r))
                .clickable(true);
            for (key, value) in action_attrs(r) {
                cell = cell.data(key, value);
            }
            root = root.child(cell);
        }
    }

    root
}
