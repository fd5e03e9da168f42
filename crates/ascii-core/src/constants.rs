// Shared tuning constants used by the web frontend and the shading reference.

// Glyph atlas
pub const ATLAS_CELL_SIZE: u32 = 64; // px per square glyph cell
pub const ATLAS_FONT_RATIO: f32 = 40.0 / 64.0; // font px relative to cell size
pub const ATLAS_BASELINE_RATIO: f32 = 46.0 / 64.0; // baseline y relative to cell size
pub const ATLAS_FONT_FAMILY: &str = "Menlo, monospace";

/// Dense brightness ramp, darkest glyph first.
pub const DEFAULT_GLYPHS: &str =
    "`.-':_,^=;>▇<+!rc*/z?sLTv)J7(|Fi{C}fI31tlu[neoZ5Yxjya]2ESwqkP6h9d4VpOGbUAKXHm8RD#$Bg0MNWQ%&@";
/// Used whenever the configured glyph string is empty.
pub const FALLBACK_GLYPHS: &str = ".+#";

// Palette
pub const PALETTE_SIZE: usize = 5;
pub const PALETTE_THRESHOLDS: [f32; PALETTE_SIZE - 1] = [0.2, 0.4, 0.6, 0.8];
pub const DEFAULT_PALETTE: [&str; PALETTE_SIZE] =
    ["#ffd31b", "#ff911f", "#ff2975", "#f322ff", "#8c1eff"];

// Composition
pub const JITTER_WEIGHT: f32 = 0.01; // brightness added per unit of instance jitter
pub const DEFAULT_GAMMA: f32 = 0.8;
pub const GAMMA_MIN: f32 = 0.5;
pub const GAMMA_MAX: f32 = 7.0;
pub const GAMMA_STEP: f32 = 0.1;

// Instance grid
pub const GRID_ROWS: u32 = 50;
pub const GRID_MIN_COLUMNS: u32 = 2;
pub const QUAD_SIZE: f32 = 0.1;
pub const DEFAULT_SEED: u64 = 42;

// Cameras
pub const MAIN_CAMERA_Z: f32 = 3.8;
pub const MAIN_CAMERA_FAR: f32 = 1000.0;
pub const WAVE_CAMERA_Z: f32 = 5.8;
pub const WAVE_CAMERA_FAR: f32 = 400.0;
pub const CAMERA_FOVY_DEG: f32 = 70.0;
pub const CAMERA_NEAR: f32 = 0.01;
pub const ORBIT_DAMPING: f32 = 0.05; // fraction of remaining velocity removed per 1/60 s
pub const ORBIT_ROTATE_SPEED: f32 = 1.0;
pub const MAX_PIXEL_RATIO: f64 = 2.0;

// Wave slab geometry
pub const WAVE_PLANE_SIZE: f32 = 6.0;
pub const WAVE_THICKNESS: f32 = 0.3;
pub const WAVE_SEGMENTS: u32 = 120;
pub const WAVE_SPEED_Z_RATIO: f32 = 0.9; // second wave term runs slightly slower

// Wave defaults and control ranges
pub const WAVE_AMPLITUDE: f32 = 0.35;
pub const WAVE_FREQUENCY: f32 = 1.6;
pub const WAVE_SPEED: f32 = 1.2;
pub const WAVE_TWIST: f32 = 0.6;

// Wave lighting
pub const AMBIENT_INTENSITY: f32 = 0.05;
pub const SUN_INTENSITY: f32 = 1.5;
pub const SUN_DIRECTION: [f32; 3] = [1.0, 0.0, 0.866];
