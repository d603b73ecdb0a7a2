use crate::app::App;
use crate::focus::FieldId;
use crate::layout::{
    self, Button, Rect, HEADER_ORDER, HEADER_Y, HEADER_H, LIST_BOX, PANEL_W, SCREEN_H, SCREEN_W,
    TOAST_BOX, TOP_BAR_H,
};
use crate::models::{Record, SortColumn, MAX_SCORE};
use crate::surface::{Rgb, Scene, SceneView};
use ratatui::Frame;

const BACKGROUND: Rgb = Rgb(0.08, 0.09, 0.11);
const TOP_BAR: Rgb = Rgb(0.12, 0.13, 0.16);
const BUTTON: Rgb = Rgb(0.2, 0.45, 0.75);
const BUTTON_PRESSED: Rgb = Rgb(0.13, 0.3, 0.55);
const FIELD: Rgb = Rgb(0.95, 0.95, 0.95);
const FIELD_FOCUSED: Rgb = Rgb(1.0, 1.0, 0.85);
const FIELD_BORDER: Rgb = Rgb(0.4, 0.4, 0.45);
const FIELD_BORDER_FOCUSED: Rgb = Rgb(0.95, 0.75, 0.2);
const FIELD_TEXT: Rgb = Rgb(0.05, 0.05, 0.05);
const PLACEHOLDER: Rgb = Rgb(0.55, 0.55, 0.55);
const LIST_BG: Rgb = Rgb(0.1, 0.11, 0.13);
const LIST_BORDER: Rgb = Rgb(0.3, 0.32, 0.36);
const HEADER_TEXT: Rgb = Rgb(0.95, 0.8, 0.3);
const ROW: Rgb = Rgb(0.14, 0.15, 0.18);
const ROW_SELECTED: Rgb = Rgb(0.2, 0.35, 0.7);
const ROW_TEXT: Rgb = Rgb(0.9, 0.9, 0.9);
const TOAST: Rgb = Rgb(0.15, 0.55, 0.25);
const PANEL: Rgb = Rgb(0.16, 0.17, 0.2);
const PANEL_HEADER: Rgb = Rgb(0.2, 0.35, 0.6);
const PANEL_LABEL: Rgb = Rgb(0.6, 0.65, 0.7);
const CLOSE: Rgb = Rgb(0.8, 0.25, 0.25);

/// Approximate glyph advance at scale 1, used to centre text.
const GLYPH_W: f32 = 10.0;
const PANEL_HEADER_H: f32 = 80.0;

pub fn draw(f: &mut Frame, app: &App, now: f64) {
    let scene = build_scene(app, now);
    f.render_widget(SceneView::new(&scene), f.area());
}

/// Builds the whole frame, back to front: controls, list, toast overlay and
/// finally the details panel.
pub fn build_scene(app: &App, now: f64) -> Scene {
    let mut scene = Scene::default();
    scene.fill_rect(Rect::new(0.0, 0.0, SCREEN_W, SCREEN_H), BACKGROUND, 1.0);
    scene.fill_rect(Rect::new(0.0, 0.0, SCREEN_W, TOP_BAR_H), TOP_BAR, 1.0);

    draw_buttons(&mut scene, app, now);
    draw_fields(&mut scene, app);
    draw_list(&mut scene, app);

    if app.toast.is_visible(now) {
        draw_toast(&mut scene, &app.toast.message, app.toast.alpha(now));
    }
    if let Some(record) = app.detail_record() {
        draw_details(&mut scene, record, app.details.progress(now));
    }
    scene
}

fn text_x_centered(rect: &Rect, text: &str, scale: f32) -> f32 {
    rect.center().x - text.chars().count() as f32 * GLYPH_W * scale / 2.0
}

fn draw_buttons(scene: &mut Scene, app: &App, now: f64) {
    for button in Button::ALL {
        let pressed = app.is_button_pressed(button, now);
        let (rect, color) = if pressed {
            (button.rect().offset_y(2.0), BUTTON_PRESSED)
        } else {
            (button.rect(), BUTTON)
        };
        scene.fill_rect(rect, color, 1.0);
        let label = button.label();
        scene.draw_text(
            text_x_centered(&rect, label, 1.0),
            rect.center().y,
            label,
            Rgb::WHITE,
            1.0,
            1.0,
        );
    }
}

fn draw_fields(scene: &mut Scene, app: &App) {
    for field in FieldId::ALL {
        let rect = layout::field_rect(field);
        let focused = app.focus.is_focused(field);
        let (fill, border) = if focused {
            (FIELD_FOCUSED, FIELD_BORDER_FOCUSED)
        } else {
            (FIELD, FIELD_BORDER)
        };
        scene.fill_rect(rect, fill, 1.0);
        scene.stroke_rect(rect, border);

        let text = app.focus.text(field);
        let (shown, color) = if text.is_empty() {
            (field.placeholder().to_string(), PLACEHOLDER)
        } else if focused {
            (format!("{}_", text), FIELD_TEXT)
        } else {
            (text.to_string(), FIELD_TEXT)
        };
        scene.draw_text(rect.x + 8.0, rect.center().y, &shown, color, 1.0, 1.0);
    }
}

fn draw_list(scene: &mut Scene, app: &App) {
    scene.fill_rect(LIST_BOX, LIST_BG, 1.0);
    scene.stroke_rect(LIST_BOX, LIST_BORDER);

    for column in HEADER_ORDER {
        let Some(rect) = layout::header_rect(column) else {
            continue;
        };
        let label = match app.records.sort.indicator(column) {
            Some(arrow) => format!("{}{}", column.label(), arrow),
            None => column.label().to_string(),
        };
        scene.draw_text(rect.x + 5.0, HEADER_Y + HEADER_H / 2.0, &label, HEADER_TEXT, 1.0, 1.0);
    }

    let visible = app.visible_records();
    for slot in layout::list_rows(visible.len(), app.scroll_offset) {
        let record = visible[slot.index];
        let color = if app.selection.contains(record.id) {
            ROW_SELECTED
        } else {
            ROW
        };
        scene.fill_rect(slot.rect, color, 1.0);
        let y = slot.rect.center().y;
        for column in HEADER_ORDER {
            if let Some(rect) = layout::header_rect(column) {
                scene.draw_text(rect.x + 5.0, y, &cell_text(record, column), ROW_TEXT, 1.0, 1.0);
            }
        }
    }
}

fn cell_text(record: &Record, column: SortColumn) -> String {
    match column {
        SortColumn::Id => record.id.to_string(),
        SortColumn::Name => record.name.clone(),
        SortColumn::Grade => record.grade.clone(),
        SortColumn::Department => record.department.clone(),
        SortColumn::Score => format!("{:.2}", record.score),
        SortColumn::None => String::new(),
    }
}

fn draw_toast(scene: &mut Scene, message: &str, alpha: f32) {
    scene.fill_rect(Rect::new(0.0, 0.0, SCREEN_W, SCREEN_H), Rgb::BLACK, 0.4 * alpha);
    scene.fill_rect(TOAST_BOX.offset_y(4.0), Rgb::BLACK, 0.5 * alpha);
    scene.fill_rect(TOAST_BOX, TOAST, alpha);
    scene.stroke_rect(TOAST_BOX, Rgb::WHITE);
    scene.draw_text(
        text_x_centered(&TOAST_BOX, message, 1.0),
        TOAST_BOX.center().y,
        message,
        Rgb::WHITE,
        1.0,
        alpha,
    );
}

fn draw_details(scene: &mut Scene, record: &Record, progress: f32) {
    let x = SCREEN_W - PANEL_W * progress;
    scene.fill_rect(Rect::new(0.0, 0.0, SCREEN_W, SCREEN_H), Rgb::BLACK, 0.3 * progress);
    scene.fill_rect(Rect::new(x, 0.0, PANEL_W, SCREEN_H), PANEL, 1.0);
    scene.fill_rect(Rect::new(x, 0.0, PANEL_W, PANEL_HEADER_H), PANEL_HEADER, 1.0);
    scene.draw_text(x + 20.0, PANEL_HEADER_H / 2.0, "Student Details", Rgb::WHITE, 1.2, 1.0);

    let close = Rect::new(x + PANEL_W - 50.0, 25.0, 35.0, 35.0);
    scene.fill_rect(close, CLOSE, 1.0);
    scene.draw_text(text_x_centered(&close, "X", 1.0), close.center().y, "X", Rgb::WHITE, 1.0, 1.0);

    let rows = [
        ("Name:", record.name.clone()),
        ("ID:", record.id.to_string()),
        ("Department:", record.department.clone()),
        ("Grade:", record.grade.clone()),
        ("Score:", format!("{:.2} / {:.2}", record.score, MAX_SCORE)),
    ];
    for (i, (label, value)) in rows.iter().enumerate() {
        let y = 130.0 + i as f32 * 70.0;
        scene.draw_text(x + 25.0, y, label, PANEL_LABEL, 1.0, 1.0);
        scene.draw_text(x + 25.0, y + 30.0, value, Rgb::WHITE, 1.1, 1.0);
    }
}
