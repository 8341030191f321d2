use crate::model::RecordId;
use crate::store::EntityStore;

/// Turns a pick-up/drop gesture into one atomic position move. At most one
/// id is held at a time; a second pick-up replaces it without side effect.
#[derive(Debug, Clone, Default)]
pub struct ReorderController {
    picked: Option<RecordId>,
}

impl ReorderController {
    pub fn pick_up(&mut self, id: RecordId) {
        self.picked = Some(id);
    }

    pub fn picked(&self) -> Option<&RecordId> {
        self.picked.as_ref()
    }

    /// Drops the held id so it lands immediately before `target`. Dropping
    /// on itself or on an unknown id moves nothing. The held id is cleared
    /// either way.
    pub fn drop_on(&mut self, store: &mut EntityStore, target: &RecordId) {
        if let Some(picked) = self.picked.take() {
            store.reorder(&picked, target);
        }
    }
}
