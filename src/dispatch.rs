//! Resolves pointer presses against an ordered chain of hit regions and turns
//! input events into intents. The first matching region consumes the click.

use crate::app::App;
use crate::focus::FieldId;
use crate::input::{ClickKind, InputEvent, Key};
use crate::layout::{self, Button, Point, Rect, HEADER_ORDER, PANEL_REST_X};
use crate::models::SortColumn;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    AddRecord,
    EditRecord,
    DeleteSelected,
    Save,
    Load,
    SortBy(SortColumn),
    SelectRow(i64),
    OpenDetails(i64),
    CloseDetails,
    FocusField(FieldId),
    ClearFocus,
    TypeText(char),
    Backspace,
    Cancel,
    Scroll(i32),
    Quit,
}

impl Intent {
    fn from_button(button: Button) -> Self {
        match button {
            Button::Add => Intent::AddRecord,
            Button::Edit => Intent::EditRecord,
            Button::Delete => Intent::DeleteSelected,
            Button::Save => Intent::Save,
            Button::Load => Intent::Load,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Area {
    Rect(Rect),
    /// Everything left of the given x.
    LeftOf(f32),
}

impl Area {
    pub fn contains(&self, p: Point) -> bool {
        match self {
            Area::Rect(r) => r.contains(p),
            Area::LeftOf(x) => p.x < *x,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickAction {
    ClosePanel,
    DismissPanel,
    Header(SortColumn),
    Button(Button),
    Field(FieldId),
    Row(i64),
}

impl ClickAction {
    pub fn intent(self, kind: ClickKind) -> Intent {
        match self {
            ClickAction::ClosePanel | ClickAction::DismissPanel => Intent::CloseDetails,
            ClickAction::Header(column) => Intent::SortBy(column),
            ClickAction::Button(button) => Intent::from_button(button),
            ClickAction::Field(field) => Intent::FocusField(field),
            ClickAction::Row(id) => match kind {
                ClickKind::Click => Intent::OpenDetails(id),
                ClickKind::DoubleClick => Intent::SelectRow(id),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRegion {
    pub area: Area,
    pub action: ClickAction,
}

impl HitRegion {
    fn rect(rect: Rect, action: ClickAction) -> Self {
        Self {
            area: Area::Rect(rect),
            action,
        }
    }
}

/// Builds the hit regions for the current state in priority order:
/// details panel, column headers, buttons, input fields, list rows.
pub fn hit_regions(app: &App) -> Vec<HitRegion> {
    let mut regions = Vec::new();

    if app.details.is_visible() {
        regions.push(HitRegion::rect(layout::PANEL_CLOSE, ClickAction::ClosePanel));
        regions.push(HitRegion {
            area: Area::LeftOf(PANEL_REST_X),
            action: ClickAction::DismissPanel,
        });
    }

    for column in HEADER_ORDER {
        if let Some(rect) = layout::header_rect(column) {
            regions.push(HitRegion::rect(rect, ClickAction::Header(column)));
        }
    }

    for button in Button::ALL {
        regions.push(HitRegion::rect(button.rect(), ClickAction::Button(button)));
    }

    for field in FieldId::ALL {
        regions.push(HitRegion::rect(layout::field_rect(field), ClickAction::Field(field)));
    }

    let visible = app.visible_records();
    for slot in layout::list_rows(visible.len(), app.scroll_offset) {
        regions.push(HitRegion::rect(slot.rect, ClickAction::Row(visible[slot.index].id)));
    }

    regions
}

/// First region containing `point`, if any. A double click in the dismiss area
/// lands on the row under it when there is one, since `SelectRow` also hides the
/// panel. Anything else in the dismiss area only closes the panel.
pub fn resolve(regions: &[HitRegion], point: Point, kind: ClickKind) -> Option<ClickAction> {
    let hit = regions.iter().find(|r| r.area.contains(point))?;
    if hit.action == ClickAction::DismissPanel && kind == ClickKind::DoubleClick {
        let row = regions
            .iter()
            .filter(|r| matches!(r.action, ClickAction::Row(_)))
            .find(|r| r.area.contains(point));
        if let Some(row) = row {
            return Some(row.action);
        }
    }
    Some(hit.action)
}

/// Resolves one press. A click that lands on nothing clears focus.
pub fn resolve_click(app: &App, point: Point, kind: ClickKind) -> Intent {
    let regions = hit_regions(app);
    match resolve(&regions, point, kind) {
        Some(action) => {
            let intent = action.intent(kind);
            tracing::debug!(?action, ?kind, ?intent, x = point.x, y = point.y, "click resolved");
            intent
        }
        None => Intent::ClearFocus,
    }
}

/// Maps a non-pointer event to its intent. Pointer events are handled by the app.
pub fn key_intent(event: &InputEvent) -> Option<Intent> {
    match *event {
        InputEvent::Text(c) => Some(Intent::TypeText(c)),
        InputEvent::Key(Key::Backspace) => Some(Intent::Backspace),
        InputEvent::Key(Key::Escape) => Some(Intent::Cancel),
        InputEvent::Key(Key::Quit) => Some(Intent::Quit),
        InputEvent::Scroll(rows) => Some(Intent::Scroll(rows)),
        _ => None,
    }
}

/// One line per region in priority order; used to inspect the dispatch chain.
pub fn describe_regions(regions: &[HitRegion]) -> String {
    regions
        .iter()
        .map(|r| {
            let area = match r.area {
                Area::Rect(rect) => format!("{}x{}+{}+{}", rect.w, rect.h, rect.x, rect.y),
                Area::LeftOf(x) => format!("x<{}", x),
            };
            format!("{:?} @ {}", r.action, area)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
