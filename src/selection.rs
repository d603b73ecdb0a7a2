use std::collections::BTreeSet;

/// Record ids marked for batch deletion. Keyed by id, so membership survives
/// filtering and sorting.
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    ids: BTreeSet<i64>,
}

impl SelectionSet {
    /// Returns `true` if the id is selected after the toggle.
    pub fn toggle(&mut self, id: i64) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    pub fn contains(&self, id: i64) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.ids.iter().copied()
    }
}
