use crate::animation::{DetailsPanel, Toast};
use crate::dispatch::{self, Intent};
use crate::focus::{FieldId, FocusManager};
use crate::input::{ClickClassifier, InputEvent};
use crate::layout::{self, Button, Point, ROW_HEIGHT};
use crate::models::{parse_id, parse_score, Record};
use crate::roster::RecordStore;
use crate::selection::SelectionSet;
use crate::store::RecordStorage;

pub const MSG_ADDED: &str = "Student added successfully!";
pub const MSG_UPDATED: &str = "Student updated successfully!";
pub const MSG_DELETED_ONE: &str = "Student deleted successfully!";
pub const MSG_DELETED_MANY: &str = "Students deleted successfully!";
pub const MSG_SAVED: &str = "Students saved successfully!";
pub const MSG_LOADED: &str = "Students loaded successfully!";

/// How long a clicked button is drawn pressed, in seconds.
pub const BUTTON_PRESS_TIME: f64 = 0.2;

pub struct App {
    pub records: RecordStore,
    pub selection: SelectionSet,
    pub focus: FocusManager,
    pub clicks: ClickClassifier,
    pub toast: Toast,
    pub details: DetailsPanel,
    pub scroll_offset: f32,
    pub pointer: Point,
    pub pressed: Option<(Button, f64)>,
    pub should_quit: bool,
    storage: Box<dyn RecordStorage>,
}

impl App {
    /// Creates the app and restores the records from `storage`.
    pub fn new(storage: Box<dyn RecordStorage>) -> Self {
        let records = storage.load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "initial load failed, starting empty");
            Vec::new()
        });
        tracing::info!(count = records.len(), "records loaded");
        Self::with_storage(records, storage)
    }

    pub fn with_storage(records: Vec<Record>, storage: Box<dyn RecordStorage>) -> Self {
        Self {
            records: RecordStore::new(records),
            selection: SelectionSet::default(),
            focus: FocusManager::default(),
            clicks: ClickClassifier::default(),
            toast: Toast::default(),
            details: DetailsPanel::default(),
            scroll_offset: 0.0,
            pointer: Point { x: 0.0, y: 0.0 },
            pressed: None,
            should_quit: false,
            storage,
        }
    }

    #[cfg(test)]
    pub fn with_records(records: Vec<Record>) -> Self {
        Self::with_storage(records, Box::new(testing::MemoryStorage::default()))
    }

    /// Applies one frame of input at time `now` (seconds) and returns the intents
    /// that were dispatched, in order.
    pub fn tick(&mut self, events: &[InputEvent], now: f64) -> Vec<Intent> {
        let mut applied = Vec::new();
        let mut pressed = false;
        for event in events {
            let intent = match event {
                InputEvent::PointerMoved { x, y } => {
                    self.pointer = Point { x: *x, y: *y };
                    None
                }
                InputEvent::PointerPressed if pressed => {
                    tracing::debug!("extra press in frame ignored");
                    None
                }
                InputEvent::PointerPressed => {
                    pressed = true;
                    let kind = self.clicks.classify(now);
                    Some(dispatch::resolve_click(self, self.pointer, kind))
                }
                InputEvent::PointerReleased => None,
                other => dispatch::key_intent(other),
            };
            if let Some(intent) = intent {
                self.apply(intent, now);
                applied.push(intent);
            }
        }
        applied
    }

    pub fn apply(&mut self, intent: Intent, now: f64) {
        if let Some(button) = pressed_button(intent) {
            self.pressed = Some((button, now));
        }
        match intent {
            Intent::AddRecord => self.add_record(now),
            Intent::EditRecord => self.edit_record(now),
            Intent::DeleteSelected => self.delete_selected(now),
            Intent::Save => {
                self.persist();
                self.toast.show(MSG_SAVED, now);
            }
            Intent::Load => self.load(now),
            Intent::SortBy(column) => {
                self.records.sort_by(column);
                tracing::debug!(?column, ascending = self.records.sort.ascending, "sorted");
            }
            Intent::SelectRow(id) => {
                let selected = self.selection.toggle(id);
                // dismiss the panel opened by the first press of the double click
                self.details.hide();
                tracing::debug!(id, selected, "selection toggled");
            }
            Intent::OpenDetails(id) => self.details.show(id, now),
            Intent::CloseDetails => self.details.hide(),
            Intent::FocusField(field) => self.focus.focus(field),
            Intent::ClearFocus => self.focus.focus_none(),
            Intent::TypeText(c) => {
                self.focus.type_char(c);
            }
            Intent::Backspace => {
                self.focus.backspace();
            }
            Intent::Cancel => {
                if self.details.is_visible() {
                    self.details.hide();
                } else {
                    self.should_quit = true;
                }
            }
            Intent::Scroll(rows) => self.scroll(rows),
            Intent::Quit => self.should_quit = true,
        }
    }

    /// Records eligible for the list, recomputed from the live store.
    pub fn visible_records(&self) -> Vec<&Record> {
        self.records.search(self.focus.text(FieldId::Search))
    }

    pub fn detail_record(&self) -> Option<&Record> {
        self.details.target().and_then(|id| self.records.find_by_id(id))
    }

    pub fn is_button_pressed(&self, button: Button, now: f64) -> bool {
        matches!(self.pressed, Some((b, at)) if b == button && now - at < BUTTON_PRESS_TIME)
    }

    fn add_record(&mut self, now: f64) {
        let name = self.focus.text(FieldId::Name);
        let Some(id) = parse_id(self.focus.text(FieldId::Id)) else {
            tracing::debug!("add rejected: invalid id");
            return;
        };
        if name.is_empty() {
            tracing::debug!("add rejected: empty name");
            return;
        }
        let record = Record::new(
            name,
            id,
            self.focus.text(FieldId::Grade),
            self.focus.text(FieldId::Department),
            parse_score(self.focus.text(FieldId::Score)),
        );
        tracing::info!(id, name = %record.name, "record added");
        self.records.add(record);
        for field in FieldId::EDITABLE {
            self.focus.clear(field);
        }
        self.toast.show(MSG_ADDED, now);
    }

    fn edit_record(&mut self, now: f64) {
        let Some(id) = parse_id(self.focus.text(FieldId::Id)) else {
            return;
        };
        let name = self.focus.text(FieldId::Name).to_string();
        let grade = self.focus.text(FieldId::Grade).to_string();
        let department = self.focus.text(FieldId::Department).to_string();
        let score = parse_score(self.focus.text(FieldId::Score));
        let Some(record) = self.records.find_by_id_mut(id) else {
            tracing::debug!(id, "edit ignored: no such id");
            return;
        };
        record.name = name;
        record.grade = grade;
        record.department = department;
        record.score = score;
        tracing::info!(id, "record updated");
        self.toast.show(MSG_UPDATED, now);
    }

    fn delete_selected(&mut self, now: f64) {
        if !self.selection.is_empty() {
            let count = self.selection.len();
            let selection = &self.selection;
            let removed = self.records.remove_where(|r| selection.contains(r.id));
            self.selection.clear();
            tracing::info!(count, removed, "selected records deleted");
            self.persist();
            self.toast.show(if count > 1 { MSG_DELETED_MANY } else { MSG_DELETED_ONE }, now);
        } else if let Some(id) = parse_id(self.focus.text(FieldId::Id)) {
            let removed = self.records.remove_by_id(id);
            tracing::info!(id, removed, "delete by id");
            self.persist();
            self.toast.show(MSG_DELETED_ONE, now);
        }
        self.drop_stale_details();
    }

    fn load(&mut self, now: f64) {
        let records = self.storage.load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "load failed");
            Vec::new()
        });
        tracing::info!(count = records.len(), "records loaded");
        self.records.replace_all(records);
        self.drop_stale_details();
        self.toast.show(MSG_LOADED, now);
    }

    fn persist(&self) {
        if let Err(e) = self.storage.save(self.records.records()) {
            tracing::warn!(error = %e, "save failed");
        }
    }

    fn drop_stale_details(&mut self) {
        if self.details.is_visible() && self.detail_record().is_none() {
            self.details.hide();
        }
    }

    fn scroll(&mut self, rows: i32) {
        let max = layout::max_scroll(self.visible_records().len());
        let current = self.scroll_offset.min(max);
        self.scroll_offset = (current + rows as f32 * ROW_HEIGHT).clamp(0.0, max);
    }
}

fn pressed_button(intent: Intent) -> Option<Button> {
    match intent {
        Intent::AddRecord => Some(Button::Add),
        Intent::EditRecord => Some(Button::Edit),
        Intent::DeleteSelected => Some(Button::Delete),
        Intent::Save => Some(Button::Save),
        Intent::Load => Some(Button::Load),
        _ => None,
    }
}


#[cfg(test)]
mod tests {
    use super::testing::MemoryStorage;
    use super::*;
    use crate::models::SortColumn;

    fn make_app(records: Vec<Record>) -> (App, MemoryStorage) {
        let storage = MemoryStorage::default();
        let app = App::with_storage(records, Box::new(storage.clone()));
        (app, storage)
    }

    fn fill(app: &mut App, fields: &[(FieldId, &str)]) {
        for (field, text) in fields {
            app.focus.set_text(*field, text);
        }
    }

    fn ids(app: &App) -> Vec<i64> {
        app.records.records().iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_add_clamps_score_and_toasts() {
        let (mut app, _) = make_app(vec![]);
        fill(&mut app, &[(FieldId::Name, "Ada"), (FieldId::Id, "1"), (FieldId::Score, "4.5")]);
        app.apply(Intent::AddRecord, 5.0);

        let rec = app.records.find_by_id(1).unwrap();
        assert_eq!(rec.name, "Ada");
        assert_eq!(rec.score, 4.0);
        assert!(app.toast.is_visible(5.0));
        assert_eq!(app.toast.message, MSG_ADDED);
    }

    #[test]
    fn test_add_clears_editable_fields_but_not_search() {
        let (mut app, _) = make_app(vec![]);
        fill(
            &mut app,
            &[
                (FieldId::Name, "Ada"),
                (FieldId::Id, "1"),
                (FieldId::Grade, "A"),
                (FieldId::Department, "CS"),
                (FieldId::Score, "3"),
                (FieldId::Search, "ad"),
            ],
        );
        app.apply(Intent::AddRecord, 0.0);
        for field in FieldId::EDITABLE {
            assert_eq!(app.focus.text(field), "");
        }
        assert_eq!(app.focus.text(FieldId::Search), "ad");
    }

    #[test]
    fn test_add_rejects_invalid_id_or_empty_name() {
        let (mut app, _) = make_app(vec![]);
        fill(&mut app, &[(FieldId::Name, "Ada"), (FieldId::Id, "-1")]);
        app.apply(Intent::AddRecord, 0.0);
        fill(&mut app, &[(FieldId::Name, ""), (FieldId::Id, "2")]);
        app.apply(Intent::AddRecord, 0.0);
        assert!(app.records.is_empty());
        assert!(!app.toast.is_visible(0.0));
        // rejected input is left in place
        assert_eq!(app.focus.text(FieldId::Id), "2");
    }

    #[test]
    fn test_add_does_not_persist() {
        let (mut app, storage) = make_app(vec![]);
        fill(&mut app, &[(FieldId::Name, "Ada"), (FieldId::Id, "1")]);
        app.apply(Intent::AddRecord, 0.0);
        assert_eq!(storage.saves.get(), 0);
    }

    #[test]
    fn test_edit_overwrites_with_score_default() {
        let (mut app, _) = make_app(vec![Record::new("Old", 3, "C", "Art", 2.0)]);
        fill(
            &mut app,
            &[
                (FieldId::Name, "New"),
                (FieldId::Id, "3"),
                (FieldId::Grade, ""),
                (FieldId::Department, "Math"),
                (FieldId::Score, "abc"),
            ],
        );
        app.apply(Intent::EditRecord, 1.0);
        let rec = app.records.find_by_id(3).unwrap();
        assert_eq!(rec.name, "New");
        assert_eq!(rec.grade, "");
        assert_eq!(rec.department, "Math");
        assert_eq!(rec.score, 0.0);
        assert_eq!(app.toast.message, MSG_UPDATED);
    }

    #[test]
    fn test_edit_unknown_id_is_silent() {
        let (mut app, _) = make_app(vec![Record::new("Old", 3, "C", "Art", 2.0)]);
        fill(&mut app, &[(FieldId::Name, "New"), (FieldId::Id, "4")]);
        app.apply(Intent::EditRecord, 1.0);
        assert_eq!(app.records.find_by_id(3).unwrap().name, "Old");
        assert!(!app.toast.is_visible(1.0));
    }

    #[test]
    fn test_edit_touches_first_duplicate_only() {
        let (mut app, _) = make_app(vec![
            Record::new("a", 7, "", "", 1.0),
            Record::new("b", 7, "", "", 1.0),
        ]);
        fill(&mut app, &[(FieldId::Name, "z"), (FieldId::Id, "7"), (FieldId::Score, "2")]);
        app.apply(Intent::EditRecord, 0.0);
        assert_eq!(app.records.records()[0].name, "z");
        assert_eq!(app.records.records()[1].name, "b");
    }

    #[test]
    fn test_delete_selected_removes_and_saves() {
        let (mut app, storage) = make_app(vec![
            Record::new("five", 5, "", "", 0.0),
            Record::new("eight", 8, "", "", 0.0),
            Record::new("nine", 9, "", "", 0.0),
        ]);
        app.apply(Intent::SelectRow(5), 0.0);
        app.apply(Intent::SelectRow(9), 0.0);
        app.apply(Intent::DeleteSelected, 1.0);

        assert_eq!(ids(&app), vec![8]);
        assert!(app.selection.is_empty());
        assert_eq!(storage.saves.get(), 1);
        assert_eq!(storage.data.borrow().len(), 1);
        assert_eq!(app.toast.message, MSG_DELETED_MANY);
    }

    #[test]
    fn test_delete_single_selected_uses_singular() {
        let (mut app, _) = make_app(vec![Record::new("five", 5, "", "", 0.0)]);
        app.apply(Intent::SelectRow(5), 0.0);
        app.apply(Intent::DeleteSelected, 0.0);
        assert_eq!(app.toast.message, MSG_DELETED_ONE);
    }

    #[test]
    fn test_delete_falls_back_to_id_field() {
        let (mut app, storage) = make_app(vec![
            Record::new("a", 1, "", "", 0.0),
            Record::new("b", 2, "", "", 0.0),
        ]);
        fill(&mut app, &[(FieldId::Id, "2")]);
        app.apply(Intent::DeleteSelected, 0.0);
        assert_eq!(ids(&app), vec![1]);
        assert_eq!(storage.saves.get(), 1);
        assert_eq!(app.toast.message, MSG_DELETED_ONE);
    }

    #[test]
    fn test_delete_unknown_id_still_saves_and_toasts() {
        let (mut app, storage) = make_app(vec![Record::new("a", 1, "", "", 0.0)]);
        fill(&mut app, &[(FieldId::Id, "99")]);
        app.apply(Intent::DeleteSelected, 0.0);
        assert_eq!(ids(&app), vec![1]);
        assert_eq!(storage.saves.get(), 1);
        assert!(app.toast.is_visible(0.0));
        assert_eq!(app.toast.message, MSG_DELETED_ONE);
    }

    #[test]
    fn test_delete_with_invalid_id_does_nothing() {
        let (mut app, storage) = make_app(vec![Record::new("a", 1, "", "", 0.0)]);
        fill(&mut app, &[(FieldId::Id, "-")]);
        app.apply(Intent::DeleteSelected, 0.0);
        assert_eq!(storage.saves.get(), 0);
        assert!(!app.toast.is_visible(0.0));
    }

    #[test]
    fn test_delete_closes_panel_on_removed_record() {
        let (mut app, _) = make_app(vec![Record::new("a", 1, "", "", 0.0)]);
        app.apply(Intent::OpenDetails(1), 0.0);
        fill(&mut app, &[(FieldId::Id, "1")]);
        app.apply(Intent::DeleteSelected, 0.1);
        assert!(!app.details.is_visible());
        assert_eq!(app.details.target(), None);
    }

    #[test]
    fn test_save_and_load_always_toast() {
        let storage = MemoryStorage {
            fail: true,
            ..Default::default()
        };
        let mut app = App::with_storage(vec![Record::new("a", 1, "", "", 0.0)], Box::new(storage));
        app.apply(Intent::Save, 0.0);
        assert_eq!(app.toast.message, MSG_SAVED);
        app.apply(Intent::Load, 0.0);
        assert_eq!(app.toast.message, MSG_LOADED);
        assert!(app.records.is_empty());
    }

    #[test]
    fn test_load_replaces_store() {
        let (mut app, storage) = make_app(vec![Record::new("a", 1, "", "", 0.0)]);
        *storage.data.borrow_mut() = vec![Record::new("b", 2, "", "", 1.0)];
        app.apply(Intent::Load, 0.0);
        assert_eq!(ids(&app), vec![2]);
    }

    #[test]
    fn test_selection_survives_sort_and_search() {
        let (mut app, _) = make_app(vec![
            Record::new("Zed", 7, "", "", 0.0),
            Record::new("Amy", 3, "", "", 0.0),
        ]);
        app.apply(Intent::SelectRow(7), 0.0);
        app.apply(Intent::SortBy(SortColumn::Name), 0.0);
        assert!(app.selection.contains(7));
        app.focus.set_text(FieldId::Search, "amy");
        assert_eq!(app.visible_records().len(), 1);
        assert!(app.selection.contains(7));
    }

    #[test]
    fn test_sort_twice_restores_ascending_order_of_distinct_keys() {
        let (mut app, _) = make_app(vec![
            Record::new("b", 2, "", "", 0.0),
            Record::new("a", 1, "", "", 0.0),
            Record::new("c", 3, "", "", 0.0),
        ]);
        app.apply(Intent::SortBy(SortColumn::Id), 0.0);
        let ascending = ids(&app);
        app.apply(Intent::SortBy(SortColumn::Id), 0.0);
        app.apply(Intent::SortBy(SortColumn::Id), 0.0);
        assert_eq!(ids(&app), ascending);
    }

    #[test]
    fn test_cancel_closes_panel_then_quits() {
        let (mut app, _) = make_app(vec![Record::new("a", 1, "", "", 0.0)]);
        app.apply(Intent::OpenDetails(1), 0.0);
        app.apply(Intent::Cancel, 0.1);
        assert!(!app.details.is_visible());
        assert!(!app.should_quit);
        app.apply(Intent::Cancel, 0.2);
        assert!(app.should_quit);
    }

    #[test]
    fn test_scroll_clamps() {
        let records = (0..20).map(|i| Record::new("r", i, "", "", 0.0)).collect();
        let (mut app, _) = make_app(records);
        app.apply(Intent::Scroll(-2), 0.0);
        assert_eq!(app.scroll_offset, 0.0);
        app.apply(Intent::Scroll(10), 0.0);
        assert_eq!(app.scroll_offset, layout::max_scroll(20));
    }

    #[test]
    fn test_button_press_feedback_expires() {
        let (mut app, _) = make_app(vec![]);
        app.apply(Intent::Save, 1.0);
        assert!(app.is_button_pressed(Button::Save, 1.1));
        assert!(!app.is_button_pressed(Button::Load, 1.1));
        assert!(!app.is_button_pressed(Button::Save, 1.3));
    }

    #[test]
    fn test_tick_double_click_selects_without_opening_panel() {
        let (mut app, _) = make_app(vec![Record::new("a", 1, "", "", 0.0)]);
        let row = layout::list_rows(1, 0.0)[0].rect.center();
        let move_to = InputEvent::PointerMoved { x: row.x, y: row.y };

        let first = app.tick(&[move_to, InputEvent::PointerPressed, InputEvent::PointerReleased], 1.0);
        assert_eq!(first, vec![Intent::OpenDetails(1)]);
        assert!(app.details.is_visible());

        let second = app.tick(&[InputEvent::PointerPressed], 1.1);
        assert_eq!(second, vec![Intent::SelectRow(1)]);
        assert!(app.selection.contains(1));
        assert!(!app.details.is_visible());
    }

    #[test]
    fn test_tick_typing_goes_to_focused_field() {
        let (mut app, _) = make_app(vec![]);
        let p = layout::field_rect(FieldId::Id).center();
        app.tick(
            &[
                InputEvent::PointerMoved { x: p.x, y: p.y },
                InputEvent::PointerPressed,
                InputEvent::Text('4'),
                InputEvent::Text('x'),
                InputEvent::Text('2'),
                InputEvent::Key(crate::input::Key::Backspace),
            ],
            0.0,
        );
        assert_eq!(app.focus.text(FieldId::Id), "4");
    }

    #[test]
    fn test_header_click_keeps_focus() {
        let (mut app, _) = make_app(vec![]);
        app.focus.focus(FieldId::Name);
        let p = layout::header_rect(SortColumn::Name).unwrap().center();
        app.tick(&[InputEvent::PointerMoved { x: p.x, y: p.y }, InputEvent::PointerPressed], 0.0);
        assert!(app.focus.is_focused(FieldId::Name));
        assert_eq!(app.records.sort.column, SortColumn::Name);
    }

    #[test]
    fn test_tick_header_press_soon_after_row_only_closes_panel() {
        let (mut app, _) = make_app(vec![Record::new("a", 1, "", "", 0.0)]);
        let row = layout::list_rows(1, 0.0)[0].rect.center();
        app.tick(&[InputEvent::PointerMoved { x: row.x, y: row.y }, InputEvent::PointerPressed], 1.0);
        assert!(app.details.is_visible());

        let header = layout::header_rect(SortColumn::Name).unwrap().center();
        let intents = app.tick(
            &[InputEvent::PointerMoved { x: header.x, y: header.y }, InputEvent::PointerPressed],
            1.2,
        );
        assert_eq!(intents, vec![Intent::CloseDetails]);
        assert!(!app.details.is_visible());
        assert_eq!(app.records.sort.column, SortColumn::None);
    }

    #[test]
    fn test_tick_handles_one_press_per_frame() {
        let (mut app, storage) = make_app(vec![]);
        let add = Button::Add.rect().center();
        let save = Button::Save.rect().center();
        let intents = app.tick(
            &[
                InputEvent::PointerMoved { x: add.x, y: add.y },
                InputEvent::PointerPressed,
                InputEvent::PointerReleased,
                InputEvent::PointerMoved { x: save.x, y: save.y },
                InputEvent::PointerPressed,
                InputEvent::PointerReleased,
            ],
            0.0,
        );
        assert_eq!(intents, vec![Intent::AddRecord]);
        assert_eq!(storage.saves.get(), 0);
    }
}
