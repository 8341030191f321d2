//! One record-management screen: a store plus the interaction state the
//! console keeps per entity kind. The presentation layer calls operations
//! here and renders the returned snapshots and notices; it never touches
//! the store directly.

use crate::error::{Result, TabulaError};
use crate::filter;
use crate::model::{FieldValue, Record, RecordId};
use crate::schema::EntitySchema;
use crate::store::EntityStore;
use crate::validate;

pub mod confirm;
pub mod edit;
pub mod form;
pub mod reorder;
pub mod selection;

pub use confirm::ConfirmationGate;
pub use edit::EditSession;
pub use form::CreationForm;
pub use reorder::ReorderController;
pub use selection::SelectionSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A user-facing message produced by an operation. The presentation layer
/// decides how to render each level.
#[derive(Debug, Clone)]
pub struct Notice {
    pub level: NoticeLevel,
    pub content: String,
}

impl Notice {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            content: content.into(),
        }
    }
}

/// What an operation did: the records it touched and the notices to show.
#[derive(Debug, Default)]
pub struct Outcome {
    pub affected: Vec<Record>,
    pub notices: Vec<Notice>,
}

impl Outcome {
    pub fn with_affected(mut self, records: Vec<Record>) -> Self {
        self.affected = records;
        self
    }

    pub fn with_notice(mut self, notice: Notice) -> Self {
        self.notices.push(notice);
        self
    }

    pub fn add_notice(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}

/// A collection screen. Constructed explicitly by the console with its
/// schema and starting records; state lives until the console is dropped.
///
/// The selection never holds an id that is absent from the store: deletes
/// prune it, and toggling an unknown id is ignored.
#[derive(Debug)]
pub struct Screen {
    schema: EntitySchema,
    store: EntityStore,
    query: String,
    edit: EditSession,
    selection: SelectionSet,
    gate: ConfirmationGate,
    reorder: ReorderController,
    form: CreationForm,
}

impl Screen {
    pub fn new(schema: EntitySchema, store: EntityStore) -> Self {
        Self {
            schema,
            store,
            query: String::new(),
            edit: EditSession::default(),
            selection: SelectionSet::default(),
            gate: ConfirmationGate::default(),
            reorder: ReorderController::default(),
            form: CreationForm::default(),
        }
    }

    pub fn empty(schema: EntitySchema) -> Self {
        Self::new(schema, EntityStore::new())
    }

    // --- Snapshots ---

    pub fn schema(&self) -> &EntitySchema {
        &self.schema
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// The filtered projection in store order.
    pub fn visible(&self) -> Vec<&Record> {
        filter::filter(self.store.records(), &self.schema, &self.query).collect()
    }

    /// Id of the 1-based row in the current projection.
    pub fn resolve_row(&self, row: usize) -> Option<RecordId> {
        if row == 0 {
            return None;
        }
        self.visible().get(row - 1).map(|r| r.id.clone())
    }

    pub fn record(&self, id: &RecordId) -> Option<&Record> {
        self.store.get(id)
    }

    pub fn edit(&self) -> &EditSession {
        &self.edit
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn gate(&self) -> &ConfirmationGate {
        &self.gate
    }

    pub fn form(&self) -> &CreationForm {
        &self.form
    }

    pub fn picked(&self) -> Option<&RecordId> {
        self.reorder.picked()
    }

    // --- Filtering ---

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    // --- Selection ---

    pub fn toggle_selection(&mut self, id: &RecordId) {
        if self.store.contains(id) {
            self.selection.toggle(id.clone());
        }
    }

    /// Adds every currently visible id to the selection. Hidden ids that
    /// were selected earlier stay selected.
    pub fn select_all_visible(&mut self) {
        let visible: Vec<RecordId> = self.visible().iter().map(|r| r.id.clone()).collect();
        self.selection.select_all(visible);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn is_all_selected(&self) -> bool {
        let visible = self.visible();
        self.selection.is_all_selected(visible.iter().map(|r| &r.id))
    }

    // --- Editing ---

    pub fn begin_edit(&mut self, id: &RecordId) -> Result<()> {
        let record = self
            .store
            .get(id)
            .ok_or_else(|| TabulaError::NotFound(id.clone()))?;
        self.edit.begin(record);
        Ok(())
    }

    /// Sets a field on the active edit draft. Fails on a field the schema
    /// does not know; does nothing while viewing.
    pub fn edit_field(&mut self, field: &str, value: FieldValue) -> Result<()> {
        if self.schema.field(field).is_none() {
            return Err(TabulaError::UnknownField(field.to_string()));
        }
        self.edit.set(field, value);
        Ok(())
    }

    /// Validates the draft and writes it through. On validation failure the
    /// session stays in place with the draft intact. When the edited record
    /// has meanwhile been deleted the session just returns to viewing.
    pub fn commit_edit(&mut self) -> Result<Outcome> {
        let (id, draft) = match (self.edit.editing_id(), self.edit.draft()) {
            (Some(id), Some(draft)) => (id.clone(), draft.clone()),
            _ => return Ok(Outcome::default()),
        };

        if !self.store.contains(&id) {
            self.edit.cancel();
            return Ok(Outcome::default());
        }

        validate::validate(&self.schema, &draft)?;

        self.edit.cancel();
        let record = self.store.update(&id, draft.into_fields())?;
        Ok(Outcome::default()
            .with_affected(vec![record])
            .with_notice(Notice::success(format!(
                "{} updated successfully!",
                self.schema.label
            ))))
    }

    pub fn cancel_edit(&mut self) {
        self.edit.cancel();
    }

    // --- Deleting ---

    /// Removes one record. A missing id is tolerated silently so a repeated
    /// delete never surfaces a failure.
    pub fn delete(&mut self, id: &RecordId) -> Outcome {
        match self.store.delete(id) {
            Ok(record) => {
                self.selection.remove(id);
                Outcome::default()
                    .with_affected(vec![record])
                    .with_notice(Notice::success(format!(
                        "{} deleted successfully!",
                        self.schema.label
                    )))
            }
            Err(_) => Outcome::default(),
        }
    }

    /// Snapshots the selection behind the confirmation gate. The outcome
    /// lists the records that a confirm would remove.
    pub fn request_delete_selected(&mut self) -> Result<Outcome> {
        if self.selection.is_empty() {
            return Err(TabulaError::EmptySelection);
        }
        let snapshot = self.selection.snapshot();
        let affected = snapshot
            .iter()
            .filter_map(|id| self.store.get(id).cloned())
            .collect();
        self.gate.request(snapshot);
        Ok(Outcome::default().with_affected(affected))
    }

    /// Applies the pending bulk delete in one step and clears the
    /// selection. No-op while the gate is idle.
    pub fn confirm_delete_selected(&mut self) -> Outcome {
        let Some(ids) = self.gate.confirm() else {
            return Outcome::default();
        };
        let removed = self.store.delete_many(&ids);
        self.selection.clear();
        Outcome::default()
            .with_affected(removed)
            .with_notice(Notice::success(format!(
                "Selected {} deleted successfully!",
                self.schema.plural
            )))
    }

    pub fn cancel_delete_selected(&mut self) {
        self.gate.cancel();
    }

    // --- Creating ---

    pub fn open_form(&mut self) {
        self.form.open(&self.schema);
    }

    pub fn set_form_field(&mut self, field: &str, value: FieldValue) -> Result<()> {
        if self.schema.field(field).is_none() {
            return Err(TabulaError::UnknownField(field.to_string()));
        }
        self.form.set(field, value);
        Ok(())
    }

    /// Validates the form draft and appends a new record. On validation
    /// failure the form stays open with the draft intact.
    pub fn submit_form(&mut self) -> Result<Outcome> {
        let Some(draft) = self.form.draft() else {
            return Ok(Outcome::default());
        };
        validate::validate(&self.schema, draft)?;

        let Some(draft) = self.form.take() else {
            return Ok(Outcome::default());
        };
        let record = self.store.create(draft.into_fields());
        Ok(Outcome::default()
            .with_affected(vec![record])
            .with_notice(Notice::success(format!(
                "{} added successfully!",
                self.schema.label
            ))))
    }

    pub fn discard_form(&mut self) {
        self.form.discard();
    }

    // --- Reordering ---

    /// Starts a move gesture. Ignored for entity kinds without manual
    /// ordering.
    pub fn pick_up(&mut self, id: RecordId) {
        if self.schema.reorderable {
            self.reorder.pick_up(id);
        }
    }

    pub fn drop_on(&mut self, target: &RecordId) {
        self.reorder.drop_on(&mut self.store, target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Fields;
    use crate::schema::{PRODUCTS, USERS};
    use crate::seed::fixtures;

    fn user(id: &str, name: &str, email: &str) -> Record {
        let mut fields = Fields::new();
        fields.insert("name".into(), FieldValue::text(name));
        fields.insert("email".into(), FieldValue::text(email));
        fields.insert("role".into(), FieldValue::text("Viewer"));
        fields.insert("status".into(), FieldValue::text("active"));
        Record::seeded(id, fields)
    }

    fn user_screen() -> Screen {
        let store = EntityStore::with_records(vec![
            user("1", "John Doe", "john@x.com"),
            user("2", "Jane Smith", "jane@x.com"),
        ])
        .unwrap();
        Screen::new(USERS.clone(), store)
    }

    fn id(s: &str) -> RecordId {
        RecordId::from(s)
    }

    #[test]
    fn search_narrows_the_projection_to_matches() {
        let mut screen = user_screen();
        screen.set_query("jane");

        let ids: Vec<&str> = screen.visible().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["2"]);
    }

    #[test]
    fn resolve_row_follows_the_projection() {
        let mut screen = user_screen();
        assert_eq!(screen.resolve_row(2), Some(id("2")));
        assert_eq!(screen.resolve_row(0), None);
        assert_eq!(screen.resolve_row(3), None);

        screen.set_query("jane");
        assert_eq!(screen.resolve_row(1), Some(id("2")));
    }

    #[test]
    fn selected_rows_are_deleted_on_confirm() {
        let mut screen = user_screen();
        screen.toggle_selection(&id("1"));
        screen.toggle_selection(&id("2"));

        screen.request_delete_selected().unwrap();
        assert!(screen.gate().is_pending());

        let outcome = screen.confirm_delete_selected();
        assert_eq!(outcome.affected.len(), 2);
        assert_eq!(
            outcome.notices[0].content,
            "Selected users deleted successfully!"
        );
        assert!(screen.store().is_empty());
        assert!(screen.selection().is_empty());
        assert!(!screen.gate().is_pending());
    }

    #[test]
    fn empty_selection_cannot_request_a_bulk_delete() {
        let mut screen = user_screen();
        let err = screen.request_delete_selected();
        assert!(matches!(err, Err(TabulaError::EmptySelection)));
        assert!(!screen.gate().is_pending());
    }

    #[test]
    fn cancel_keeps_the_rows_and_the_selection() {
        let mut screen = user_screen();
        screen.toggle_selection(&id("1"));
        screen.request_delete_selected().unwrap();

        screen.cancel_delete_selected();

        assert_eq!(screen.store().len(), 2);
        assert!(screen.selection().contains(&id("1")));
        assert!(!screen.gate().is_pending());
    }

    #[test]
    fn bulk_delete_reaches_hidden_selected_rows() {
        let mut screen = user_screen();
        screen.toggle_selection(&id("1"));
        screen.set_query("jane"); // hides row 1
        screen.select_all_visible(); // adds row 2

        screen.request_delete_selected().unwrap();
        let outcome = screen.confirm_delete_selected();

        assert_eq!(outcome.affected.len(), 2);
        assert!(screen.store().is_empty());
    }

    #[test]
    fn select_all_only_adds_what_is_visible() {
        let mut screen = user_screen();
        screen.set_query("jane");
        screen.select_all_visible();

        assert!(screen.is_all_selected());
        assert_eq!(screen.selection().len(), 1);

        screen.set_query("");
        assert!(!screen.is_all_selected());
    }

    #[test]
    fn toggle_ignores_ids_outside_the_store() {
        let mut screen = user_screen();
        screen.toggle_selection(&id("missing"));
        assert!(screen.selection().is_empty());
    }

    #[test]
    fn edit_commit_writes_the_draft_through() {
        let mut screen = user_screen();

        screen.begin_edit(&id("1")).unwrap();
        assert!(screen.edit().is_editing());

        screen.edit_field("name", FieldValue::text("X")).unwrap();
        let outcome = screen.commit_edit().unwrap();

        assert_eq!(outcome.notices[0].content, "User updated successfully!");
        assert_eq!(screen.record(&id("1")).unwrap().text("name"), "X");
        assert!(!screen.edit().is_editing());
    }

    #[test]
    fn begin_edit_unknown_id_fails() {
        let mut screen = user_screen();
        let err = screen.begin_edit(&id("missing"));
        assert!(matches!(err, Err(TabulaError::NotFound(_))));
    }

    #[test]
    fn edit_field_rejects_names_outside_the_schema() {
        let mut screen = user_screen();
        screen.begin_edit(&id("1")).unwrap();

        let err = screen.edit_field("price", FieldValue::number(1.0));
        assert!(matches!(err, Err(TabulaError::UnknownField(_))));
    }

    #[test]
    fn failed_validation_keeps_the_session_editing() {
        let mut screen = user_screen();
        screen.begin_edit(&id("1")).unwrap();
        screen.edit_field("name", FieldValue::text("  ")).unwrap();

        let err = screen.commit_edit();
        assert!(matches!(err, Err(TabulaError::Validation(_))));
        assert!(screen.edit().is_editing());
        assert_eq!(
            screen.edit().draft().and_then(|d| d.get("name")),
            Some(&FieldValue::text("  "))
        );
        assert_eq!(screen.record(&id("1")).unwrap().text("name"), "John Doe");
    }

    #[test]
    fn cancel_edit_leaves_the_record_alone() {
        let mut screen = user_screen();
        screen.begin_edit(&id("1")).unwrap();
        screen.edit_field("name", FieldValue::text("X")).unwrap();

        screen.cancel_edit();

        assert!(!screen.edit().is_editing());
        assert_eq!(screen.record(&id("1")).unwrap().text("name"), "John Doe");
    }

    #[test]
    fn commit_after_the_record_vanished_returns_to_viewing() {
        let mut screen = user_screen();
        screen.begin_edit(&id("1")).unwrap();
        screen.delete(&id("1"));

        let outcome = screen.commit_edit().unwrap();

        assert!(outcome.affected.is_empty());
        assert!(outcome.notices.is_empty());
        assert!(!screen.edit().is_editing());
        assert_eq!(screen.store().len(), 1);
    }

    #[test]
    fn deleting_twice_shows_no_failure() {
        let mut screen = user_screen();

        let first = screen.delete(&id("1"));
        assert_eq!(first.affected.len(), 1);
        assert_eq!(first.notices[0].content, "User deleted successfully!");

        let second = screen.delete(&id("1"));
        assert!(second.affected.is_empty());
        assert!(second.notices.is_empty());
        assert_eq!(screen.store().len(), 1);
    }

    #[test]
    fn delete_prunes_the_selection() {
        let mut screen = user_screen();
        screen.toggle_selection(&id("1"));

        screen.delete(&id("1"));

        assert!(screen.selection().is_empty());
    }

    #[test]
    fn submitting_a_valid_form_appends_and_closes() {
        let mut screen = user_screen();
        screen.open_form();
        screen
            .set_form_field("name", FieldValue::text("New User"))
            .unwrap();
        screen
            .set_form_field("email", FieldValue::text("new@x.com"))
            .unwrap();

        let outcome = screen.submit_form().unwrap();

        assert_eq!(outcome.notices[0].content, "User added successfully!");
        assert_eq!(screen.store().len(), 3);
        assert!(!screen.form().is_open());

        let created = &outcome.affected[0];
        assert_eq!(
            screen.store().records().last().map(|r| r.id.clone()),
            Some(created.id.clone())
        );
    }

    #[test]
    fn negative_price_is_rejected_and_the_draft_survives() {
        let mut screen = Screen::empty(PRODUCTS.clone());
        screen.open_form();
        screen
            .set_form_field("name", FieldValue::text("Product F"))
            .unwrap();
        screen
            .set_form_field("description", FieldValue::text("New"))
            .unwrap();
        screen
            .set_form_field("category", FieldValue::text("Misc"))
            .unwrap();
        screen
            .set_form_field("price", FieldValue::number(-5.0))
            .unwrap();

        let err = screen.submit_form();
        assert!(matches!(err, Err(TabulaError::Validation(_))));
        assert!(screen.store().is_empty());
        assert!(screen.form().is_open());
        assert_eq!(
            screen.form().draft().and_then(|d| d.get("price")),
            Some(&FieldValue::number(-5.0))
        );
    }

    #[test]
    fn submit_without_an_open_form_is_a_no_op() {
        let mut screen = user_screen();
        let outcome = screen.submit_form().unwrap();
        assert!(outcome.affected.is_empty());
        assert_eq!(screen.store().len(), 2);
    }

    #[test]
    fn gesture_moves_a_document_before_the_target() {
        let mut screen = fixtures::documents_screen();

        screen.pick_up(id("3"));
        screen.drop_on(&id("1"));

        let titles: Vec<&str> = screen
            .store()
            .records()
            .iter()
            .map(|r| r.text("title"))
            .collect();
        assert_eq!(
            titles,
            vec!["Design Specs", "Project Proposal", "Meeting Minutes"]
        );
        assert_eq!(screen.picked(), None);
    }

    #[test]
    fn non_reorderable_kinds_ignore_the_gesture() {
        let mut screen = user_screen();

        screen.pick_up(id("2"));
        assert_eq!(screen.picked(), None);

        screen.drop_on(&id("1"));
        let ids: Vec<&str> = screen
            .store()
            .records()
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids, vec!["1", "2"]);
    }
}
