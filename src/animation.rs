pub const TOAST_DURATION: f64 = 1.2;
pub const TOAST_FADE: f64 = 0.5;
pub const PANEL_SLIDE_DURATION: f64 = 0.3;

/// Smoothstep easing of a linear fraction in `[0, 1]`.
pub fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Transient notification; a new message replaces the one in flight.
#[derive(Debug, Clone, Default)]
pub struct Toast {
    pub message: String,
    shown_at: Option<f64>,
}

impl Toast {
    pub fn show(&mut self, message: &str, now: f64) {
        self.message = message.to_string();
        self.shown_at = Some(now);
    }

    pub fn is_visible(&self, now: f64) -> bool {
        match self.shown_at {
            Some(at) => now - at <= TOAST_DURATION,
            None => false,
        }
    }

    /// Opaque until the final `TOAST_FADE` seconds, then fades linearly to zero.
    pub fn alpha(&self, now: f64) -> f32 {
        let Some(at) = self.shown_at else {
            return 0.0;
        };
        let elapsed = now - at;
        if elapsed > TOAST_DURATION {
            0.0
        } else if elapsed > TOAST_DURATION - TOAST_FADE {
            ((TOAST_DURATION - elapsed) / TOAST_FADE) as f32
        } else {
            1.0
        }
    }
}

/// Sliding side panel showing one record, referenced by id.
#[derive(Debug, Clone, Default)]
pub struct DetailsPanel {
    target: Option<i64>,
    opened_at: f64,
}

impl DetailsPanel {
    /// Opens the panel on `id`. When already open only the target changes;
    /// the slide animation keeps running from when it first opened.
    pub fn show(&mut self, id: i64, now: f64) {
        if self.target.is_none() {
            self.opened_at = now;
        }
        self.target = Some(id);
    }

    pub fn hide(&mut self) {
        self.target = None;
    }

    pub fn is_visible(&self) -> bool {
        self.target.is_some()
    }

    pub fn target(&self) -> Option<i64> {
        self.target
    }

    pub fn progress(&self, now: f64) -> f32 {
        if self.target.is_none() {
            return 0.0;
        }
        let t = ((now - self.opened_at) / PANEL_SLIDE_DURATION) as f32;
        smoothstep(t)
    }
}
