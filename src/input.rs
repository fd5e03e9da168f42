use glam::Vec2;
use web_sys as web;

/// Pointer drag accumulated between frames; the frame loop drains it into the
/// orbit cameras.
#[derive(Default, Clone, Copy, Debug)]
pub struct DragState {
    pub active: bool,
    pub pointer_id: i32,
    pub last: Vec2,
    pub pending: Vec2,
}

impl DragState {
    pub fn begin(&mut self, pointer_id: i32, at: Vec2) {
        self.active = true;
        self.pointer_id = pointer_id;
        self.last = at;
    }

    /// Record movement of the dragging pointer; other pointers are ignored.
    pub fn move_to(&mut self, pointer_id: i32, at: Vec2) {
        if !self.active || pointer_id != self.pointer_id {
            return;
        }
        self.pending += at - self.last;
        self.last = at;
    }

    pub fn end(&mut self, pointer_id: i32) {
        if pointer_id == self.pointer_id {
            self.active = false;
        }
    }

    /// Movement since the last call, in canvas pixels.
    pub fn take(&mut self) -> Vec2 {
        std::mem::take(&mut self.pending)
    }
}

/// What a global key press does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    ToggleUi,
    TogglePause,
    ToggleFullscreen,
    ExitFullscreen,
}

pub fn key_action(key: &str) -> Option<KeyAction> {
    match key {
        "h" | "H" => Some(KeyAction::ToggleUi),
        " " => Some(KeyAction::TogglePause),
        "Enter" => Some(KeyAction::ToggleFullscreen),
        "Escape" => Some(KeyAction::ExitFullscreen),
        _ => None,
    }
}

// ---------------- Pointer helpers ----------------
#[inline]
pub fn pointer_canvas_px(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    let x_css = ev.client_x() as f32 - rect.left() as f32;
    let y_css = ev.client_y() as f32 - rect.top() as f32;
    css_to_canvas_px(
        Vec2::new(x_css, y_css),
        Vec2::new(rect.width() as f32, rect.height() as f32),
        Vec2::new(canvas.width() as f32, canvas.height() as f32),
    )
}

/// Scale a CSS-pixel position into canvas backing-store pixels.
#[inline]
pub fn css_to_canvas_px(css: Vec2, css_size: Vec2, canvas_size: Vec2) -> Vec2 {
    if css_size.x <= 0.0 || css_size.y <= 0.0 {
        return Vec2::ZERO;
    }
    css / css_size * canvas_size
}
