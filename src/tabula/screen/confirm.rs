use std::collections::BTreeSet;

use crate::model::RecordId;

/// Two-step commit for destructive bulk deletes: Idle -> Pending -> Idle.
/// The id snapshot is fixed at request time; selection changes made while
/// the gate is pending do not alter what a confirm will delete.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ConfirmationGate {
    #[default]
    Idle,
    Pending(BTreeSet<RecordId>),
}

impl ConfirmationGate {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }

    pub fn pending_ids(&self) -> Option<&BTreeSet<RecordId>> {
        match self {
            Self::Pending(ids) => Some(ids),
            Self::Idle => None,
        }
    }

    pub fn request(&mut self, ids: BTreeSet<RecordId>) {
        *self = Self::Pending(ids);
    }

    /// Hands back the snapshot when pending; None (and no-op) when idle.
    pub fn confirm(&mut self) -> Option<BTreeSet<RecordId>> {
        match std::mem::take(self) {
            Self::Pending(ids) => Some(ids),
            Self::Idle => None,
        }
    }

    pub fn cancel(&mut self) {
        *self = Self::Idle;
    }
}
