use std::cmp::Ordering;

pub const MAX_SCORE: f32 = 4.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub name: String,
    pub id: i64,
    pub grade: String,
    pub department: String,
    pub score: f32,
}

impl Record {
    pub fn new(name: &str, id: i64, grade: &str, department: &str, score: f32) -> Self {
        Self {
            name: name.to_string(),
            id,
            grade: grade.to_string(),
            department: department.to_string(),
            score,
        }
    }

    /// Case-insensitive substring match against the name or the decimal id.
    /// `query` must already be lowercase.
    pub fn matches(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(query) || self.id.to_string().contains(query)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortColumn {
    None,
    Id,
    Name,
    Grade,
    Department,
    Score,
}

impl SortColumn {
    pub fn label(self) -> &'static str {
        match self {
            SortColumn::None => "",
            SortColumn::Id => "ID",
            SortColumn::Name => "Name",
            SortColumn::Grade => "Grade",
            SortColumn::Department => "Department",
            SortColumn::Score => "Score",
        }
    }

    /// Natural ascending order of two records on this column.
    pub fn compare(self, a: &Record, b: &Record) -> Ordering {
        match self {
            SortColumn::None => Ordering::Equal,
            SortColumn::Id => a.id.cmp(&b.id),
            SortColumn::Name => a.name.cmp(&b.name),
            SortColumn::Grade => a.grade.cmp(&b.grade),
            SortColumn::Department => a.department.cmp(&b.department),
            SortColumn::Score => a.score.total_cmp(&b.score),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub column: SortColumn,
    pub ascending: bool,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            column: SortColumn::None,
            ascending: true,
        }
    }
}

impl SortState {
    /// Reselecting the active column flips direction; a new column starts ascending.
    pub fn toggle(&mut self, column: SortColumn) {
        if self.column == column {
            self.ascending = !self.ascending;
        } else {
            self.column = column;
            self.ascending = true;
        }
    }

    pub fn indicator(&self, column: SortColumn) -> Option<&'static str> {
        if column == SortColumn::None || self.column != column {
            return None;
        }
        Some(if self.ascending { " ^" } else { " v" })
    }
}

/// Parses the id field. `None` means the text is not a valid non-negative integer
/// and the calling operation must be rejected.
pub fn parse_id(text: &str) -> Option<i64> {
    text.trim().parse::<i64>().ok().filter(|id| *id >= 0)
}

/// Parses the score field from its longest leading numeric prefix, so `"3.5.2"`
/// reads as 3.5. No numeric prefix gives 0.0. Clamped to `[0, MAX_SCORE]`.
pub fn parse_score(text: &str) -> f32 {
    let text = text.trim_start();
    text.char_indices()
        .map(|(i, c)| i + c.len_utf8())
        .rev()
        .find_map(|end| text[..end].parse::<f32>().ok().filter(|v| v.is_finite()))
        .unwrap_or(0.0)
        .clamp(0.0, MAX_SCORE)
}
