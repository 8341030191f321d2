use crate::model::{Draft, FieldValue, Record, RecordId};

/// In-place edit of a single record. At most one edit is active; beginning
/// an edit while another is active replaces the draft without committing it.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum EditSession {
    #[default]
    Viewing,
    Editing {
        id: RecordId,
        draft: Draft,
    },
}

impl EditSession {
    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Editing { .. })
    }

    pub fn editing_id(&self) -> Option<&RecordId> {
        match self {
            Self::Editing { id, .. } => Some(id),
            Self::Viewing => None,
        }
    }

    pub fn draft(&self) -> Option<&Draft> {
        match self {
            Self::Editing { draft, .. } => Some(draft),
            Self::Viewing => None,
        }
    }

    pub fn begin(&mut self, record: &Record) {
        *self = Self::Editing {
            id: record.id.clone(),
            draft: Draft::from_record(record),
        };
    }

    /// Mutates the draft. No-op while viewing.
    pub fn set(&mut self, field: &str, value: FieldValue) {
        if let Self::Editing { draft, .. } = self {
            draft.set(field, value);
        }
    }

    pub fn cancel(&mut self) {
        *self = Self::Viewing;
    }
}
