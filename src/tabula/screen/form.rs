use crate::model::{Draft, FieldValue};
use crate::schema::EntitySchema;

/// Draft for a record that does not exist yet. An open form corresponds to
/// the add dialog being shown; submit and discard both close it.
#[derive(Debug, Clone, Default)]
pub struct CreationForm {
    draft: Option<Draft>,
}

impl CreationForm {
    pub fn is_open(&self) -> bool {
        self.draft.is_some()
    }

    /// Opens the form with every field at its schema default. Reopening a
    /// form that is already open starts over from defaults.
    pub fn open(&mut self, schema: &EntitySchema) {
        self.draft = Some(schema.blank_draft());
    }

    pub fn draft(&self) -> Option<&Draft> {
        self.draft.as_ref()
    }

    /// Sets a field on the draft. No-op while the form is closed.
    pub fn set(&mut self, field: &str, value: FieldValue) {
        if let Some(draft) = &mut self.draft {
            draft.set(field, value);
        }
    }

    /// Closes the form, handing the draft to the caller for submission.
    pub fn take(&mut self) -> Option<Draft> {
        self.draft.take()
    }

    pub fn discard(&mut self) {
        self.draft = None;
    }
}
