pub mod atlas;
pub mod camera;
pub mod compose;
pub mod config;
pub mod constants;
pub mod grid;
pub mod palette;
pub mod params;
pub mod resource;
pub mod uniforms;
pub mod wave;

pub use atlas::*;
pub use camera::*;
pub use config::*;
pub use constants::*;
pub use grid::*;
pub use palette::*;
pub use params::*;
pub use resource::*;
pub use uniforms::*;
pub use wave::*;

// Shaders bundled as string constants
pub static ASCII_WGSL: &str = include_str!("../shaders/ascii.wgsl");
pub static WAVE_WGSL: &str = include_str!("../shaders/wave.wgsl");
