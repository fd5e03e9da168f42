//! Uniform blocks as laid out in the WGSL shaders (std140-compatible padding).

use glam::Mat4;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct AsciiUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub palette: [[f32; 4]; 5],
    pub video_scale: [f32; 2],
    pub gamma: f32,
    pub length: f32,
    pub char_index: f32,
    pub _pad: [f32; 3],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct WaveUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub sun_dir: [f32; 3],
    pub sun_intensity: f32,
    pub base_color: [f32; 3],
    pub ambient: f32,
}

impl WaveUniforms {
    pub fn new(view_proj: Mat4) -> Self {
        use crate::constants::{AMBIENT_INTENSITY, SUN_DIRECTION, SUN_INTENSITY};
        let sun = glam::Vec3::from(SUN_DIRECTION).normalize();
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            sun_dir: sun.to_array(),
            sun_intensity: SUN_INTENSITY,
            base_color: [1.0, 1.0, 1.0],
            ambient: AMBIENT_INTENSITY,
        }
    }
}
