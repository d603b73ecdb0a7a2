/// Maximum gap between two presses that still counts as a double click, in seconds.
pub const DOUBLE_CLICK_WINDOW: f64 = 0.3;

/// Normalised per-frame input. Positions are in logical top-origin units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerMoved { x: f32, y: f32 },
    PointerPressed,
    PointerReleased,
    Text(char),
    Key(Key),
    /// Wheel movement in list rows; positive scrolls towards later rows.
    Scroll(i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Backspace,
    Escape,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickKind {
    Click,
    DoubleClick,
}

/// Labels press edges as single or double clicks from the previous press time.
#[derive(Debug, Clone, Default)]
pub struct ClickClassifier {
    last_press: Option<f64>,
}

impl ClickClassifier {
    pub fn classify(&mut self, now: f64) -> ClickKind {
        let kind = match self.last_press {
            Some(prev) if now - prev <= DOUBLE_CLICK_WINDOW => ClickKind::DoubleClick,
            _ => ClickKind::Click,
        };
        self.last_press = Some(now);
        kind
    }
}
