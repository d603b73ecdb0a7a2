//! Fixed geometry of the window in logical top-origin units, plus the list row
//! layout shared by drawing and hit-testing.

use crate::focus::FieldId;
use crate::models::SortColumn;

pub const SCREEN_W: f32 = 1000.0;
pub const SCREEN_H: f32 = 700.0;

pub const TOP_BAR_H: f32 = 205.0;

pub const LIST_BOX: Rect = Rect::new(20.0, 225.0, 960.0, 455.0);
pub const HEADER_Y: f32 = 245.0;
pub const HEADER_H: f32 = 25.0;

pub const ROW_HEIGHT: f32 = 24.0;
pub const ROW_BOX_H: f32 = 20.0;
pub const ROW_X: f32 = 25.0;
pub const ROW_W: f32 = 950.0;
const FIRST_ROW_Y: f32 = 273.0;
/// Rows are laid out only while their top edge lies strictly inside these bounds.
const ROW_CLIP_TOP: f32 = 253.0;
const ROW_CLIP_BOTTOM: f32 = 668.0;

pub const PANEL_W: f32 = 350.0;
pub const PANEL_REST_X: f32 = SCREEN_W - PANEL_W;
pub const PANEL_CLOSE: Rect = Rect::new(PANEL_REST_X + PANEL_W - 50.0, 25.0, 35.0, 35.0);

pub const TOAST_BOX: Rect = Rect::new(
    (SCREEN_W - 500.0) / 2.0,
    (SCREEN_H - 100.0) / 2.0,
    500.0,
    100.0,
);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Edge-inclusive containment.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.x + self.w && p.y >= self.y && p.y <= self.y + self.h
    }

    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.w / 2.0,
            y: self.y + self.h / 2.0,
        }
    }

    pub fn offset_y(&self, dy: f32) -> Rect {
        Rect::new(self.x, self.y + dy, self.w, self.h)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Add,
    Edit,
    Delete,
    Save,
    Load,
}

impl Button {
    pub const ALL: [Button; 5] = [
        Button::Add,
        Button::Edit,
        Button::Delete,
        Button::Save,
        Button::Load,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Button::Add => "Add",
            Button::Edit => "Edit",
            Button::Delete => "Delete",
            Button::Save => "Save",
            Button::Load => "Load",
        }
    }

    pub fn rect(self) -> Rect {
        let x = match self {
            Button::Add => 20.0,
            Button::Edit => 140.0,
            Button::Delete => 260.0,
            Button::Save => 380.0,
            Button::Load => 500.0,
        };
        Rect::new(x, 20.0, 100.0, 40.0)
    }
}

pub fn field_rect(field: FieldId) -> Rect {
    match field {
        FieldId::Name => Rect::new(20.0, 75.0, 200.0, 35.0),
        FieldId::Id => Rect::new(230.0, 75.0, 100.0, 35.0),
        FieldId::Grade => Rect::new(340.0, 75.0, 100.0, 35.0),
        FieldId::Search => Rect::new(450.0, 75.0, 510.0, 35.0),
        FieldId::Department => Rect::new(20.0, 120.0, 200.0, 35.0),
        FieldId::Score => Rect::new(230.0, 120.0, 100.0, 35.0),
    }
}

/// Column headers in hit-test order (right to left).
pub const HEADER_ORDER: [SortColumn; 5] = [
    SortColumn::Score,
    SortColumn::Grade,
    SortColumn::Department,
    SortColumn::Name,
    SortColumn::Id,
];

/// Header hit rectangle; also the left edge used for the column's cell text.
pub fn header_rect(column: SortColumn) -> Option<Rect> {
    let (x, w) = match column {
        SortColumn::Id => (30.0, 75.0),
        SortColumn::Name => (110.0, 235.0),
        SortColumn::Department => (350.0, 195.0),
        SortColumn::Grade => (550.0, 95.0),
        SortColumn::Score => (650.0, 150.0),
        SortColumn::None => return None,
    };
    Some(Rect::new(x, HEADER_Y, w, HEADER_H))
}

/// One on-screen row: its index into the visible sequence and its rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowSlot {
    pub index: usize,
    pub rect: Rect,
}

/// Number of rows that fit between the clip bounds at scroll offset zero.
pub fn row_capacity() -> usize {
    let mut n = 0;
    while FIRST_ROW_Y + n as f32 * ROW_HEIGHT < ROW_CLIP_BOTTOM {
        n += 1;
    }
    n
}

pub fn max_scroll(len: usize) -> f32 {
    len.saturating_sub(row_capacity()) as f32 * ROW_HEIGHT
}

/// Lays out `len` visible rows at `scroll` and keeps those inside the list bounds.
/// Every item is iterated; only clipped rows are returned.
pub fn list_rows(len: usize, scroll: f32) -> Vec<RowSlot> {
    let scroll = scroll.clamp(0.0, max_scroll(len));
    (0..len)
        .filter_map(|index| {
            let y = FIRST_ROW_Y + index as f32 * ROW_HEIGHT - scroll;
            (y > ROW_CLIP_TOP && y < ROW_CLIP_BOTTOM).then_some(RowSlot {
                index,
                rect: Rect::new(ROW_X, y, ROW_W, ROW_BOX_H),
            })
        })
        .collect()
}
