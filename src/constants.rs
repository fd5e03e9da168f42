// DOM ids and web-only tuning.

// Page elements
pub const CANVAS_ID: &str = "app-canvas";
pub const PANEL_ID: &str = "controls";
pub const HINT_ID: &str = "hint-overlay";

// Media elements
pub const MEDIA_CROSS_ORIGIN: &str = "anonymous";
pub const MEDIA_ACCEPT: &str = "video/*,image/*";
pub const HAVE_CURRENT_DATA: u16 = 2; // HTMLMediaElement.readyState

// Frame timing
pub const MAX_FRAME_DT_SEC: f32 = 0.1; // clamp long stalls (tab switches)

// Pass clear colours
pub const WAVE_CLEAR: wgpu::Color = wgpu::Color::BLACK;
pub const ASCII_CLEAR: wgpu::Color = wgpu::Color::BLACK;
