use std::collections::BTreeSet;

use crate::model::RecordId;

/// Ids marked for bulk action. The set is independent of the current filter
/// so a selection survives query changes; select-all only ever adds what is
/// visible at the time.
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    ids: BTreeSet<RecordId>,
}

impl SelectionSet {
    pub fn toggle(&mut self, id: RecordId) {
        if !self.ids.remove(&id) {
            self.ids.insert(id);
        }
    }

    pub fn select_all<I: IntoIterator<Item = RecordId>>(&mut self, visible: I) {
        self.ids.extend(visible);
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn remove(&mut self, id: &RecordId) {
        self.ids.remove(id);
    }

    pub fn contains(&self, id: &RecordId) -> bool {
        self.ids.contains(id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn ids(&self) -> &BTreeSet<RecordId> {
        &self.ids
    }

    pub fn snapshot(&self) -> BTreeSet<RecordId> {
        self.ids.clone()
    }

    /// True iff every visible id is selected and there is at least one.
    pub fn is_all_selected<'a, I>(&self, visible: I) -> bool
    where
        I: IntoIterator<Item = &'a RecordId>,
    {
        let mut any = false;
        for id in visible {
            any = true;
            if !self.ids.contains(id) {
                return false;
            }
        }
        any
    }
}
