//! Drawing surface: a list of rectangle and text commands in logical
//! coordinates, and a ratatui widget that rasterises them onto terminal cells.

use crate::layout::{Point, Rect, SCREEN_H, SCREEN_W};
use ratatui::buffer::{Buffer, Cell};
use ratatui::layout::Rect as CellArea;
use ratatui::style::Color;
use ratatui::widgets::Widget;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb(pub f32, pub f32, pub f32);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0.0, 0.0, 0.0);
    pub const WHITE: Rgb = Rgb(1.0, 1.0, 1.0);

    fn from_color(color: Color) -> Rgb {
        match color {
            Color::Rgb(r, g, b) => Rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0),
            Color::White => Rgb::WHITE,
            _ => Rgb::BLACK,
        }
    }

    fn to_color(self) -> Color {
        let c = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Color::Rgb(c(self.0), c(self.1), c(self.2))
    }

    fn blend_over(self, under: Rgb, alpha: f32) -> Rgb {
        let a = alpha.clamp(0.0, 1.0);
        Rgb(
            under.0 + (self.0 - under.0) * a,
            under.1 + (self.1 - under.1) * a,
            under.2 + (self.2 - under.2) * a,
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        rect: Rect,
        color: Rgb,
        alpha: f32,
    },
    StrokeRect {
        rect: Rect,
        color: Rgb,
    },
    Text {
        x: f32,
        y: f32,
        text: String,
        color: Rgb,
        scale: f32,
        alpha: f32,
    },
}

/// Ordered draw commands for one frame; later commands paint over earlier ones.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn fill_rect(&mut self, rect: Rect, color: Rgb, alpha: f32) {
        self.commands.push(DrawCommand::FillRect { rect, color, alpha });
    }

    pub fn stroke_rect(&mut self, rect: Rect, color: Rgb) {
        self.commands.push(DrawCommand::StrokeRect { rect, color });
    }

    pub fn draw_text(&mut self, x: f32, y: f32, text: &str, color: Rgb, scale: f32, alpha: f32) {
        self.commands.push(DrawCommand::Text {
            x,
            y,
            text: text.to_string(),
            color,
            scale,
            alpha,
        });
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// Renders a [`Scene`] into whatever cell area it is given, scaling the
/// logical window onto the grid.
pub struct SceneView<'a> {
    scene: &'a Scene,
}

impl<'a> SceneView<'a> {
    pub fn new(scene: &'a Scene) -> Self {
        Self { scene }
    }

    /// Logical point at the centre of a terminal cell.
    pub fn to_logical(area: CellArea, column: u16, row: u16) -> Point {
        let w = area.width.max(1) as f32;
        let h = area.height.max(1) as f32;
        Point {
            x: (column.saturating_sub(area.x) as f32 + 0.5) * SCREEN_W / w,
            y: (row.saturating_sub(area.y) as f32 + 0.5) * SCREEN_H / h,
        }
    }
}

struct Grid {
    area: CellArea,
    sx: f32,
    sy: f32,
}

impl Grid {
    fn new(area: CellArea) -> Self {
        Self {
            area,
            sx: area.width as f32 / SCREEN_W,
            sy: area.height as f32 / SCREEN_H,
        }
    }

    /// Cell indices along one axis whose centres fall inside `[start, start + len]`.
    /// A span too thin to cover any centre keeps the cell under its midpoint.
    fn span(start: f32, len: f32, scale: f32, cells: u16) -> std::ops::Range<u16> {
        let first = (start * scale - 0.5).ceil().max(0.0);
        let last = ((start + len) * scale - 0.5).floor();
        let (first, last) = if first > last {
            let mid = ((start + len / 2.0) * scale).floor().max(0.0);
            (mid, mid)
        } else {
            (first, last)
        };
        let end = (last + 1.0).min(cells as f32).max(0.0) as u16;
        (first.min(cells as f32) as u16)..end
    }

    fn cells(&self, rect: &Rect) -> (std::ops::Range<u16>, std::ops::Range<u16>) {
        (
            Self::span(rect.x, rect.w, self.sx, self.area.width),
            Self::span(rect.y, rect.h, self.sy, self.area.height),
        )
    }

    fn cell<'b>(&self, buf: &'b mut Buffer, col: u16, row: u16) -> Option<&'b mut Cell> {
        buf.cell_mut((self.area.x + col, self.area.y + row))
    }
}

impl Widget for SceneView<'_> {
    fn render(self, area: CellArea, buf: &mut Buffer) {
        let grid = Grid::new(area);
        for command in self.scene.commands() {
            match command {
                DrawCommand::FillRect { rect, color, alpha } => {
                    let (cols, rows) = grid.cells(rect);
                    for row in rows {
                        for col in cols.clone() {
                            if let Some(cell) = grid.cell(buf, col, row) {
                                let under = Rgb::from_color(cell.bg);
                                cell.bg = color.blend_over(under, *alpha).to_color();
                                if *alpha >= 1.0 {
                                    cell.set_char(' ');
                                } else {
                                    let fg = Rgb::from_color(cell.fg);
                                    cell.fg = color.blend_over(fg, *alpha).to_color();
                                }
                            }
                        }
                    }
                }
                DrawCommand::StrokeRect { rect, color } => {
                    let (cols, rows) = grid.cells(rect);
                    if cols.is_empty() || rows.is_empty() {
                        continue;
                    }
                    let (left, right) = (cols.start, cols.end - 1);
                    let (top, bottom) = (rows.start, rows.end - 1);
                    for row in rows.clone() {
                        for col in cols.clone() {
                            let symbol = match (col, row) {
                                _ if top == bottom => '─',
                                (c, r) if c == left && r == top => '┌',
                                (c, r) if c == right && r == top => '┐',
                                (c, r) if c == left && r == bottom => '└',
                                (c, r) if c == right && r == bottom => '┘',
                                (_, r) if r == top || r == bottom => '─',
                                (c, _) if c == left || c == right => '│',
                                _ => continue,
                            };
                            if let Some(cell) = grid.cell(buf, col, row) {
                                cell.set_char(symbol);
                                cell.fg = color.to_color();
                            }
                        }
                    }
                }
                DrawCommand::Text {
                    x,
                    y,
                    text,
                    color,
                    alpha,
                    ..
                } => {
                    let row = (y * grid.sy).floor();
                    let start = (x * grid.sx).floor();
                    if row < 0.0 || row >= area.height as f32 {
                        continue;
                    }
                    for (i, ch) in text.chars().enumerate() {
                        let col = start + i as f32;
                        if col < 0.0 {
                            continue;
                        }
                        if col >= area.width as f32 {
                            break;
                        }
                        if let Some(cell) = grid.cell(buf, col as u16, row as u16) {
                            let under = Rgb::from_color(cell.bg);
                            cell.set_char(ch);
                            cell.fg = color.blend_over(under, *alpha).to_color();
                        }
                    }
                }
            }
        }
    }
}
