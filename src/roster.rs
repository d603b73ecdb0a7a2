use crate::models::{Record, SortColumn, SortState};

/// Insertion-ordered record collection. Sorting reorders the collection itself.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<Record>,
    pub sort: SortState,
}

impl RecordStore {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records,
            sort: SortState::default(),
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn add(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Removes every record carrying `id`; returns how many were removed.
    pub fn remove_by_id(&mut self, id: i64) -> usize {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        before - self.records.len()
    }

    pub fn remove_where<F: Fn(&Record) -> bool>(&mut self, pred: F) -> usize {
        let before = self.records.len();
        self.records.retain(|r| !pred(r));
        before - self.records.len()
    }

    pub fn find_by_id(&self, id: i64) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn find_by_id_mut(&mut self, id: i64) -> Option<&mut Record> {
        self.records.iter_mut().find(|r| r.id == id)
    }

    pub fn replace_all(&mut self, records: Vec<Record>) {
        self.records = records;
    }

    /// The visible sequence: the whole store, or the records matching `query`.
    /// Always computed fresh from the live collection.
    pub fn search(&self, query: &str) -> Vec<&Record> {
        if query.is_empty() {
            return self.records.iter().collect();
        }
        let q = query.to_lowercase();
        self.records.iter().filter(|r| r.matches(&q)).collect()
    }

    /// Toggles the sort state for `column` and reorders the collection in place.
    /// Descending flips the comparator, so equal keys keep their relative order.
    pub fn sort_by(&mut self, column: SortColumn) {
        self.sort.toggle(column);
        if column == SortColumn::None {
            return;
        }
        let ascending = self.sort.ascending;
        self.records.sort_by(|a, b| {
            if ascending {
                column.compare(a, b)
            } else {
                column.compare(b, a)
            }
        });
    }
}
