use super::helpers;
use ascii_core::{AtlasImage, AtlasLayout, Dispose};

/// Glyph strip uploaded to the GPU, with the group-1 bind group that samples it.
pub(crate) struct AtlasTexture {
    texture: wgpu::Texture,
    pub(crate) bind_group: wgpu::BindGroup,
    pub(crate) layout: AtlasLayout,
}

impl AtlasTexture {
    pub(crate) fn bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("atlas_bgl"),
            entries: &[helpers::texture_entry(0), helpers::sampler_entry(1)],
        })
    }

    pub(crate) fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        bgl: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
        image: &AtlasImage,
    ) -> Self {
        let layout = image.layout;
        let (texture, view) = helpers::create_color_texture_device(
            device,
            "atlas_tex",
            layout.width(),
            layout.height(),
            wgpu::TextureFormat::Rgba8Unorm,
            wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        );
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &image.rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * layout.width()),
                rows_per_image: Some(layout.height()),
            },
            wgpu::Extent3d {
                width: layout.width(),
                height: layout.height(),
                depth_or_array_layers: 1,
            },
        );
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("atlas_bg"),
            layout: bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });
        Self {
            texture,
            bind_group,
            layout,
        }
    }
}

impl Dispose for AtlasTexture {
    fn dispose(self) {
        self.texture.destroy();
    }
}
