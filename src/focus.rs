#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    Name,
    Id,
    Grade,
    Search,
    Department,
    Score,
}

impl FieldId {
    /// Hit-test order of the input fields.
    pub const ALL: [FieldId; 6] = [
        FieldId::Name,
        FieldId::Id,
        FieldId::Grade,
        FieldId::Search,
        FieldId::Department,
        FieldId::Score,
    ];

    /// Fields cleared after a successful add.
    pub const EDITABLE: [FieldId; 5] = [
        FieldId::Name,
        FieldId::Id,
        FieldId::Grade,
        FieldId::Department,
        FieldId::Score,
    ];

    fn index(self) -> usize {
        match self {
            FieldId::Name => 0,
            FieldId::Id => 1,
            FieldId::Grade => 2,
            FieldId::Search => 3,
            FieldId::Department => 4,
            FieldId::Score => 5,
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            FieldId::Name => "Name...",
            FieldId::Id => "ID...",
            FieldId::Grade => "Grade...",
            FieldId::Search => "Search name/id...",
            FieldId::Department => "Department...",
            FieldId::Score => "Score...",
        }
    }

    /// Whether `c` may be typed into this field. The id field takes digits and a
    /// leading minus, the score field digits and a decimal point.
    pub fn accepts(self, current: &str, c: char) -> bool {
        match self {
            FieldId::Id => c.is_ascii_digit() || (c == '-' && current.is_empty()),
            FieldId::Score => c.is_ascii_digit() || c == '.',
            _ => !c.is_control(),
        }
    }
}

/// Exclusive keyboard ownership plus the text of every input field.
#[derive(Debug, Clone, Default)]
pub struct FocusManager {
    focused: Option<FieldId>,
    texts: [String; 6],
}

impl FocusManager {
    pub fn focus(&mut self, field: FieldId) {
        self.focused = Some(field);
    }

    pub fn focus_none(&mut self) {
        self.focused = None;
    }

    pub fn focused(&self) -> Option<FieldId> {
        self.focused
    }

    pub fn is_focused(&self, field: FieldId) -> bool {
        self.focused == Some(field)
    }

    pub fn text(&self, field: FieldId) -> &str {
        &self.texts[field.index()]
    }

    pub fn set_text(&mut self, field: FieldId, text: &str) {
        self.texts[field.index()] = text.to_string();
    }

    pub fn clear(&mut self, field: FieldId) {
        self.texts[field.index()].clear();
    }

    /// Appends `c` to the focused field if its filter allows it.
    /// Returns `false` when nothing was typed.
    pub fn type_char(&mut self, c: char) -> bool {
        let Some(field) = self.focused else {
            return false;
        };
        let text = &mut self.texts[field.index()];
        if !field.accepts(text, c) {
            return false;
        }
        text.push(c);
        true
    }

    pub fn backspace(&mut self) -> bool {
        match self.focused {
            Some(field) => self.texts[field.index()].pop().is_some(),
            None => false,
        }
    }
}
