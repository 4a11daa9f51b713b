//! Immutable snapshot of the targets currently believed correct.

use std::collections::HashMap;

use crate::store::Target;

/// Ordered targets plus an `id → address` index.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    targets: Vec<Target>,
    by_id: HashMap<i64, String>,
}

impl Snapshot {
    /// The snapshot held before the first successful load.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(targets: Vec<Target>) -> Self {
        let by_id = targets
            .iter()
            .map(|t| (t.id, t.address.clone()))
            .collect();
        Self { targets, by_id }
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Address currently held for `id`, if any.
    pub fn address_of(&self, id: i64) -> Option<&str> {
        self.by_id.get(&id).map(String::as_str)
    }

    /// Whether `loaded` describes a different target set than this snapshot.
    ///
    /// A count mismatch is decisive on its own. With equal counts, any
    /// loaded id that is unknown here or maps to another address counts
    /// as a change. Order is ignored.
    pub fn differs_from(&self, loaded: &[Target]) -> bool {
        if self.targets.len() != loaded.len() {
            return true;
        }

        loaded
            .iter()
            .any(|t| self.address_of(t.id) != Some(t.address.as_str()))
    }
}
