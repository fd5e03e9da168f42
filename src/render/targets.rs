use super::helpers;

pub(crate) const WAVE_COLOR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

/// Offscreen targets for the wave scene.
///
/// The colour target is sampled by the ASCII pass as its source texture, so
/// any recreate must be followed by a rebind of the source bind group.
pub(crate) struct RenderTargets {
    pub(crate) color_tex: wgpu::Texture,
    pub(crate) color_view: wgpu::TextureView,
    pub(crate) depth_tex: wgpu::Texture,
    pub(crate) depth_view: wgpu::TextureView,
}

impl RenderTargets {
    pub(crate) fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let (color_tex, color_view) = helpers::create_color_texture_device(
            device,
            "wave_color",
            width,
            height,
            WAVE_COLOR_FORMAT,
            wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        );
        let (depth_tex, depth_view) = helpers::create_depth_texture(device, "wave_depth", width, height);
        Self {
            color_tex,
            color_view,
            depth_tex,
            depth_view,
        }
    }

    pub(crate) fn recreate(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        let next = Self::new(device, width, height);
        let old = std::mem::replace(self, next);
        old.color_tex.destroy();
        old.depth_tex.destroy();
    }
}
