//! Application state and wiring.
//!
//! The view tree and screen are rebuilt every frame; the handler table is
//! built exactly once at startup and never rebound.

use sandtable::render::{action_cell_id, header_cell_id, table_element, Span};
use sandtable::{
    find_element, sort_by_column, Dispatcher, Element, Key, Modifiers, NumericMode, Rect, Screen,
    SortState, TableModel,
};

use crate::forms::{Field, FormModel};
use crate::modal::{DeleteModal, Modal};
use crate::samples::{fixtures, samples_table};
use crate::upload::UploadState;

pub const TABLE_PREFIX: &str = "samples";

/// Action-cell handler slots registered at setup. `on_submit` refuses to
/// grow the table past this, so every rendered Delete cell has a handler.
const MAX_ROWS: usize = 64;

/// Stand-in for the OS file picker: clicking the input cycles through these.
const PICKER_FILES: &[&str] = &[
    "/srv/uploads/field_notes.txt",
    "/srv/uploads/north_beach.xlsx",
    "/srv/uploads/summary.csv",
    "/srv/uploads/harbor_2025.XLS",
];

pub struct App {
    table: TableModel,
    sort: SortState,
    numeric_mode: NumericMode,
    upload: UploadState,
    picker_cursor: usize,
    form: FormModel,
    modal: Option<Modal>,
    focused_field: Option<String>,
    flash: Option<String>,
    root: Element,
    quit: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            table: samples_table(&fixtures()),
            sort: SortState::new(),
            numeric_mode: NumericMode::LenientPrefix,
            upload: UploadState::new(),
            picker_cursor: 0,
            form: FormModel::new(vec![
                Field::new("name", "Name", true),
                Field::new("location", "Location", true),
                Field::new("date", "Collection date", true),
                Field::new("notes", "Notes", false),
            ]),
            modal: None,
            focused_field: None,
            flash: None,
            root: Element::box_().id("root"),
            quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn table(&self) -> &TableModel {
        &self.table
    }

    pub fn sort_state(&self) -> &SortState {
        &self.sort
    }

    pub fn modal(&self) -> Option<&Modal> {
        self.modal.as_ref()
    }

    pub fn upload(&self) -> &UploadState {
        &self.upload
    }

    pub fn form(&self) -> &FormModel {
        &self.form
    }

    // ------------------------------------------------------------------
    // View
    // ------------------------------------------------------------------

    /// Rebuild the view tree and render it. While a modal is open only the
    /// modal's controls are part of the tree, so clicks elsewhere land on
    /// nothing.
    pub fn view(&mut self) -> Screen {
        let mut screen = Screen::new();

        match self.modal.clone() {
            Some(modal) => self.view_modal(&mut screen, &modal),
            None => self.view_page(&mut screen),
        }

        // Root rect spans everything drawn so far
        let width = screen
            .lines()
            .iter()
            .map(|l| sandtable::text::display_width(l))
            .max()
            .unwrap_or(0) as u16;
        let height = screen.cursor();
        screen.register("root", Rect::new(0, 0, width.max(1), height));

        screen
    }

    fn view_page(&mut self, screen: &mut Screen) {
        screen.push_line("Beach Sand Analysis — Samples");
        screen.blank();

        sandtable::render_table(screen, &self.table, &self.sort, TABLE_PREFIX, Some("Delete"));

        screen.blank();
        let upload_line = format!("[Choose file] {}", self.upload.label());
        screen.push_spans(&[
            Span::plain("Upload sieve data (.xlsx/.xls): "),
            Span::tagged("upload-input", &upload_line),
        ]);

        screen.blank();
        screen.push_line("Add a sample");
        let field_lines: Vec<(String, String)> = self
            .form
            .fields
            .iter()
            .map(|field| {
                let marker = if self.focused_field.as_deref() == Some(&field.id) {
                    "> "
                } else {
                    "  "
                };
                let feedback = if self.form.was_validated && !field.is_valid() {
                    "  (required)"
                } else {
                    ""
                };
                (
                    format!("field-{}", field.id),
                    format!("{marker}{}: {}{feedback}", field.label, field.value),
                )
            })
            .collect();
        for (id, line) in &field_lines {
            screen.push_tagged(id.clone(), line.clone());
        }

        screen.blank();
        screen.push_spans(&[
            Span::plain("  "),
            Span::tagged("form-submit", "[Submit]"),
            Span::plain("  "),
            Span::tagged("form-reset", "[Reset]"),
        ]);

        screen.blank();
        if let Some(flash) = &self.flash {
            screen.push_line(flash.clone());
        }
        screen.push_line("q to quit");

        // Matching element tree
        let rows = &self.table.rows;
        let table_tree = table_element(&self.table, TABLE_PREFIX, Some("Delete"), |row| {
            let id = rows[row].first().map(|c| c.trim()).unwrap_or("");
            let name = rows[row].get(1).map(String::as_str).unwrap_or("");
            vec![
                ("sample-id".to_string(), id.to_string()),
                ("sample-name".to_string(), name.to_string()),
            ]
        });

        let mut root = Element::box_().id("root").child(table_tree).child(
            Element::text(upload_line)
                .id("upload-input")
                .clickable(true),
        );
        for (id, line) in field_lines {
            root = root.child(Element::text(line).id(id).clickable(true));
        }
        root = root
            .child(Element::text("[Submit]").id("form-submit").clickable(true))
            .child(Element::text("[Reset]").id("form-reset").clickable(true));
        self.root = root;
    }

    fn view_modal(&mut self, screen: &mut Screen, modal: &Modal) {
        screen.push_line("Beach Sand Analysis — Samples");
        screen.blank();
        screen.push_line(modal.message());
        screen.blank();

        let mut root = Element::box_().id("root");
        if modal.is_confirm() {
            screen.push_spans(&[
                Span::plain("  "),
                Span::tagged("modal-cancel", "[Cancel]"),
                Span::plain("  "),
                Span::tagged("modal-ok", "[Ok]"),
            ]);
            root = root
                .child(Element::text("[Cancel]").id("modal-cancel").clickable(true))
                .child(Element::text("[Ok]").id("modal-ok").clickable(true));
        } else {
            screen.push_spans(&[
                Span::plain("  "),
                Span::tagged("modal-dismiss", "[Dismiss]"),
            ]);
            root = root.child(
                Element::text("[Dismiss]")
                    .id("modal-dismiss")
                    .clickable(true),
            );
        }
        self.root = root;
    }

    // ------------------------------------------------------------------
    // Handlers
    // ------------------------------------------------------------------

    pub fn on_header_click(&mut self, column: usize) {
        let direction = self.sort.click(column);
        if let Err(err) =
            sort_by_column(&mut self.table, column, direction.is_ascending(), self.numeric_mode)
        {
            log::error!("[app] sort failed: {err}");
            self.sort.reset();
        }
    }

    pub fn on_upload_click(&mut self) {
        let path = PICKER_FILES[self.picker_cursor % PICKER_FILES.len()];
        self.picker_cursor += 1;

        match self.upload.select(path) {
            Ok(()) => {
                self.flash = Some(format!("Selected {}", self.upload.label()));
            }
            Err(err) => {
                self.modal = Some(Modal::Notice {
                    message: err.to_string(),
                });
            }
        }
    }

    pub fn on_delete_click(&mut self, target: &str) {
        let Some(trigger) = find_element(&self.root, target).cloned() else {
            log::error!("[app] delete trigger {target} not in view tree");
            return;
        };

        match DeleteModal::from_trigger(&trigger) {
            Ok(modal) => self.modal = Some(Modal::Delete(modal)),
            Err(err) => log::error!("[app] {err}"),
        }
    }

    pub fn on_field_click(&mut self, field_id: &str) {
        if self.form.field(field_id).is_some() {
            self.focused_field = Some(field_id.to_string());
        }
    }

    pub fn on_submit(&mut self) {
        if !self.form.submit() {
            return;
        }

        if self.table.row_count() >= MAX_ROWS {
            log::warn!("[app] sample table full ({MAX_ROWS} rows), submit refused");
            self.modal = Some(Modal::Notice {
                message: format!("The sample list is full ({MAX_ROWS} rows)"),
            });
            return;
        }

        let next_id = self
            .table
            .rows
            .iter()
            .filter_map(|row| row.first().and_then(|c| c.trim().parse::<u32>().ok()))
            .max()
            .unwrap_or(0)
            + 1;

        let value = |form: &FormModel, id: &str| {
            form.field(id)
                .map(|f| f.value.trim().to_string())
                .unwrap_or_default()
        };
        let name = value(&self.form, "name");
        let location = value(&self.form, "location");
        let date = value(&self.form, "date");
        self.table.push_row(vec![
            next_id.to_string(),
            name.clone(),
            location,
            date,
            "—".to_string(),
        ]);

        log::info!("[app] sample \"{name}\" added as #{next_id}");
        self.flash = Some(format!("Sample \"{name}\" added"));
        self.form.reset();
        self.upload.clear();
        self.focused_field = None;
    }

    pub fn on_reset_click(&mut self) {
        self.modal = Some(Modal::ConfirmReset);
    }

    pub fn on_modal_accept(&mut self) {
        match self.modal.take() {
            Some(Modal::Delete(delete)) => self.perform_delete(&delete),
            Some(Modal::ConfirmReset) => {
                self.form.reset();
                self.focused_field = None;
                self.flash = Some("Form reset".to_string());
            }
            Some(Modal::Notice { .. }) | None => {}
        }
    }

    pub fn on_modal_decline(&mut self) {
        self.modal = None;
    }

    fn perform_delete(&mut self, delete: &DeleteModal) {
        let Some(id) = delete.action.strip_prefix("/delete/") else {
            log::error!("[app] malformed action path {}", delete.action);
            return;
        };

        let before = self.table.row_count();
        self.table
            .rows
            .retain(|row| row.first().map(|c| c.trim() != id).unwrap_or(true));

        if self.table.row_count() < before {
            log::info!("[app] {} removed sample \"{}\"", delete.action, delete.sample_name);
            self.flash = Some(format!("Deleted \"{}\"", delete.sample_name));
        } else {
            log::warn!("[app] {} matched no row", delete.action);
        }
    }

    // ------------------------------------------------------------------
    // Keyboard
    // ------------------------------------------------------------------

    pub fn on_key(&mut self, key: Key, modifiers: Modifiers) {
        if self.modal.is_some() {
            match key {
                Key::Enter | Key::Char('y') => self.on_modal_accept(),
                Key::Escape | Key::Char('n') => self.on_modal_decline(),
                _ => {}
            }
            return;
        }

        if let Some(field_id) = self.focused_field.clone() {
            match key {
                Key::Char(c) if !modifiers.ctrl && !modifiers.alt => {
                    if let Some(field) = self.form.field_mut(&field_id) {
                        field.value.push(c);
                    }
                }
                Key::Backspace => {
                    if let Some(field) = self.form.field_mut(&field_id) {
                        field.value.pop();
                    }
                }
                Key::Enter => {
                    self.focused_field = None;
                    self.on_submit();
                }
                Key::Escape => self.focused_field = None,
                _ => {}
            }
            return;
        }

        if matches!(key, Key::Char('q') | Key::Escape) {
            self.quit = true;
        }
    }
}

/// Build the handler registration table. Called once at startup; element
/// IDs are stable across frames so no rebinding ever happens.
pub fn setup(app: &App) -> Dispatcher<App> {
    let mut dispatcher = Dispatcher::new();

    for column in 0..app.table.column_count() {
        dispatcher = dispatcher.on(header_cell_id(TABLE_PREFIX, column), move |app: &mut App, _| {
            app.on_header_click(column)
        });
    }

    for row in 0..MAX_ROWS {
        let target = action_cell_id(TABLE_PREFIX, row);
        let id = target.clone();
        dispatcher = dispatcher.on(id, move |app: &mut App, _| app.on_delete_click(&target));
    }

    for field in &app.form.fields {
        let field_id = field.id.clone();
        dispatcher = dispatcher.on(format!("field-{}", field.id), move |app: &mut App, _| {
            app.on_field_click(&field_id)
        });
    }

    dispatcher
        .on("upload-input", |app: &mut App, _| app.on_upload_click())
        .on("form-submit", |app: &mut App, _| app.on_submit())
        .on("form-reset", |app: &mut App, _| app.on_reset_click())
        .on("modal-ok", |app: &mut App, _| app.on_modal_accept())
        .on("modal-cancel", |app: &mut App, _| app.on_modal_decline())
        .on("modal-dismiss", |app: &mut App, _| app.on_modal_decline())
}

#[cfg(test)]
mod tests {
    use sandtable::{Event, MouseButton, SortDirection};

    use super::*;

    fn click(target: &str) -> Event {
        Event::Click {
            target: Some(target.to_string()),
            x: 0,
            y: 0,
            button: MouseButton::Left,
        }
    }

    fn ready_app() -> (App, Dispatcher<App>) {
        let mut app = App::new();
        let dispatcher = setup(&app);
        app.view(); // build the initial tree
        (app, dispatcher)
    }

    fn column_values(app: &App, column: usize) -> Vec<String> {
        app.table()
            .column_values(column)
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    // ========================================================================
    // Header Clicks
    // ========================================================================

    #[test]
    fn test_header_click_sorts_ascending_first() {
        let (mut app, dispatcher) = ready_app();

        dispatcher.dispatch(&mut app, &click(&header_cell_id(TABLE_PREFIX, 4)));
        assert_eq!(
            column_values(&app, 4),
            vec!["0.27", "0.29", "0.31", "0.33", "0.35"]
        );
        assert_eq!(app.sort_state().indicator(4), Some(SortDirection::Ascending));
    }

    #[test]
    fn test_second_click_descends() {
        let (mut app, dispatcher) = ready_app();
        let header = header_cell_id(TABLE_PREFIX, 0);

        dispatcher.dispatch(&mut app, &click(&header));
        dispatcher.dispatch(&mut app, &click(&header));
        assert_eq!(column_values(&app, 0), vec!["5", "4", "3", "2", "1"]);
        assert_eq!(app.sort_state().indicator(0), Some(SortDirection::Descending));
    }

    #[test]
    fn test_switching_headers_restarts_ascending() {
        let (mut app, dispatcher) = ready_app();

        dispatcher.dispatch(&mut app, &click(&header_cell_id(TABLE_PREFIX, 0)));
        dispatcher.dispatch(&mut app, &click(&header_cell_id(TABLE_PREFIX, 0)));
        dispatcher.dispatch(&mut app, &click(&header_cell_id(TABLE_PREFIX, 1)));

        assert_eq!(app.sort_state().indicator(0), None);
        assert_eq!(app.sort_state().indicator(1), Some(SortDirection::Ascending));
        // Names ascending, case-folded
        assert_eq!(column_values(&app, 1)[0], "Breakwater fill");
    }

    // ========================================================================
    // Delete Flow
    // ========================================================================

    #[test]
    fn test_delete_click_populates_modal_from_trigger() {
        let (mut app, dispatcher) = ready_app();

        dispatcher.dispatch(&mut app, &click(&action_cell_id(TABLE_PREFIX, 1)));
        match app.modal() {
            Some(Modal::Delete(delete)) => {
                assert_eq!(delete.sample_name, "Harbor mouth");
                assert_eq!(delete.action, "/delete/2");
            }
            other => panic!("expected delete modal, got {other:?}"),
        }
    }

    #[test]
    fn test_delete_accept_removes_row() {
        let (mut app, dispatcher) = ready_app();

        dispatcher.dispatch(&mut app, &click(&action_cell_id(TABLE_PREFIX, 1)));
        dispatcher.dispatch(&mut app, &click("modal-ok"));

        assert!(app.modal().is_none());
        assert_eq!(app.table().row_count(), 4);
        assert!(!column_values(&app, 0).contains(&"2".to_string()));
    }

    #[test]
    fn test_delete_decline_keeps_row() {
        let (mut app, dispatcher) = ready_app();

        dispatcher.dispatch(&mut app, &click(&action_cell_id(TABLE_PREFIX, 1)));
        dispatcher.dispatch(&mut app, &click("modal-cancel"));

        assert!(app.modal().is_none());
        assert_eq!(app.table().row_count(), 5);
    }

    #[test]
    fn test_delete_follows_sorted_rows() {
        let (mut app, dispatcher) = ready_app();

        // Sort by D50 ascending; the top row is now the Harbor-mouth sample
        dispatcher.dispatch(&mut app, &click(&header_cell_id(TABLE_PREFIX, 4)));
        app.view(); // rebuild the tree the next click resolves against

        dispatcher.dispatch(&mut app, &click(&action_cell_id(TABLE_PREFIX, 0)));
        match app.modal() {
            Some(Modal::Delete(delete)) => assert_eq!(delete.action, "/delete/2"),
            other => panic!("expected delete modal, got {other:?}"),
        }
    }

    // ========================================================================
    // Upload
    // ========================================================================

    #[test]
    fn test_bad_extension_rejected_with_notice() {
        let (mut app, dispatcher) = ready_app();

        // First picker candidate is a .txt file
        dispatcher.dispatch(&mut app, &click("upload-input"));
        assert!(matches!(app.modal(), Some(Modal::Notice { .. })));
        assert_eq!(app.upload().selected(), None);
        assert_eq!(app.upload().label(), "No file chosen");
    }

    #[test]
    fn test_xlsx_accepted_after_dismissing_notice() {
        let (mut app, dispatcher) = ready_app();

        dispatcher.dispatch(&mut app, &click("upload-input"));
        dispatcher.dispatch(&mut app, &click("modal-dismiss"));
        assert!(app.modal().is_none());

        dispatcher.dispatch(&mut app, &click("upload-input"));
        assert!(app.modal().is_none());
        assert_eq!(app.upload().label(), "north_beach.xlsx");
        assert_eq!(
            app.upload().selected(),
            Some("/srv/uploads/north_beach.xlsx")
        );
    }

    // ========================================================================
    // Form Submit and Reset
    // ========================================================================

    #[test]
    fn test_invalid_submit_blocked_and_marked() {
        let (mut app, dispatcher) = ready_app();

        dispatcher.dispatch(&mut app, &click("form-submit"));
        assert!(app.form().was_validated);
        assert_eq!(app.table().row_count(), 5);
    }

    #[test]
    fn test_valid_submit_appends_row_and_resets() {
        let (mut app, dispatcher) = ready_app();
        app.form.field_mut("name").unwrap().value = "Spit end".into();
        app.form.field_mut("location").unwrap().value = "South Spit".into();
        app.form.field_mut("date").unwrap().value = "2025-08-27".into();

        dispatcher.dispatch(&mut app, &click("form-submit"));

        assert_eq!(app.table().row_count(), 6);
        let last = app.table().rows.last().unwrap();
        assert_eq!(last[0], "6");
        assert_eq!(last[1], "Spit end");
        assert!(!app.form().was_validated);
        assert!(app.form().fields.iter().all(|f| f.value.is_empty()));
    }

    #[test]
    fn test_submit_refused_when_table_full() {
        let (mut app, dispatcher) = ready_app();
        while app.table.row_count() < MAX_ROWS {
            let n = app.table.row_count() + 1;
            app.table.push_row(vec![
                n.to_string(),
                format!("Fill {n}"),
                "Flats".to_string(),
                "Jan 01, 2026".to_string(),
                "—".to_string(),
            ]);
        }
        app.form.field_mut("name").unwrap().value = "Overflow".into();
        app.form.field_mut("location").unwrap().value = "South Spit".into();
        app.form.field_mut("date").unwrap().value = "2026-01-02".into();

        dispatcher.dispatch(&mut app, &click("form-submit"));

        assert_eq!(app.table().row_count(), MAX_ROWS);
        assert!(matches!(app.modal(), Some(Modal::Notice { .. })));
        // Not consumed: the submit can be retried after a row is deleted
        assert_eq!(app.form().field("name").unwrap().value, "Overflow");
    }

    #[test]
    fn test_reset_requires_confirmation() {
        let (mut app, dispatcher) = ready_app();
        app.form.field_mut("name").unwrap().value = "draft".into();

        dispatcher.dispatch(&mut app, &click("form-reset"));
        assert!(matches!(app.modal(), Some(Modal::ConfirmReset)));

        // Decline: nothing lost
        dispatcher.dispatch(&mut app, &click("modal-cancel"));
        assert_eq!(app.form().field("name").unwrap().value, "draft");

        // Accept: cleared
        dispatcher.dispatch(&mut app, &click("form-reset"));
        dispatcher.dispatch(&mut app, &click("modal-ok"));
        assert!(app.form().field("name").unwrap().value.is_empty());
    }

    // ========================================================================
    // Keyboard
    // ========================================================================

    #[test]
    fn test_typing_into_focused_field() {
        let (mut app, dispatcher) = ready_app();

        dispatcher.dispatch(&mut app, &click("field-name"));
        app.on_key(Key::Char('A'), Modifiers::new());
        app.on_key(Key::Char('b'), Modifiers::new());
        app.on_key(Key::Backspace, Modifiers::new());
        assert_eq!(app.form().field("name").unwrap().value, "A");

        app.on_key(Key::Escape, Modifiers::new());
        // Blurred: q quits again
        app.on_key(Key::Char('q'), Modifiers::new());
        assert!(app.should_quit());
    }

    #[test]
    fn test_unknown_key_does_not_edit_field() {
        let (mut app, dispatcher) = ready_app();

        dispatcher.dispatch(&mut app, &click("field-name"));
        app.on_key(Key::Char('A'), Modifiers::new());
        app.on_key(Key::Unknown, Modifiers::new());
        assert_eq!(app.form().field("name").unwrap().value, "A");
    }

    #[test]
    fn test_open_modal_captures_keys() {
        let (mut app, dispatcher) = ready_app();

        dispatcher.dispatch(&mut app, &click("form-reset"));
        app.on_key(Key::Char('q'), Modifiers::new());
        assert!(!app.should_quit());

        // 'n' declines, as in any confirm prompt
        app.on_key(Key::Char('n'), Modifiers::new());
        assert!(app.modal().is_none());
    }

    #[test]
    fn test_dispatcher_covers_all_static_controls() {
        let (_, dispatcher) = ready_app();
        for id in [
            "upload-input",
            "form-submit",
            "form-reset",
            "modal-ok",
            "modal-cancel",
            "modal-dismiss",
            "field-name",
        ] {
            assert!(dispatcher.is_registered(id), "{id} not registered");
        }
    }
}
