use ascii_core::{
    AsciiUniforms, AtlasImage, InstanceAttrs, QuadVertex, ResourceSlot, WaveMesh, WaveUniforms,
    WaveVertex,
};
use web_sys as web;

mod ascii;
mod atlas;
mod helpers;
mod source;
mod targets;
mod wave;

use ascii::{create_ascii_resources, AsciiResources};
use atlas::AtlasTexture;
use source::MediaTexture;
use targets::RenderTargets;
use wave::{create_wave_resources, WaveResources};

/// Which texture the ASCII pass samples.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceBinding {
    Wave,
    Media,
}

/// Wave scene data for one frame; absent when a media source is active.
pub struct WaveFrame<'f> {
    pub uniforms: WaveUniforms,
    pub vertices: &'f [WaveVertex],
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    targets: RenderTargets,
    sampler: wgpu::Sampler,
    ascii: AsciiResources,
    wave: WaveResources,
    atlas_bgl: wgpu::BindGroupLayout,
    atlas: ResourceSlot<AtlasTexture>,
    media: ResourceSlot<MediaTexture>,
    source: SourceBinding,
    source_bg: wgpu::BindGroup,
    width: u32,
    height: u32,
}

impl<'a> GpuState<'a> {
    pub async fn new(
        canvas: &'a web::HtmlCanvasElement,
        quad: &[QuadVertex],
        instances: &[InstanceAttrs],
        mesh: &WaveMesh,
        atlas_image: &AtlasImage,
    ) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!("[gpu] surface {width}x{height} {format:?}");

        let targets = RenderTargets::new(&device, width, height);
        let sampler = helpers::create_linear_sampler(&device, "linear_sampler");
        let atlas_bgl = AtlasTexture::bind_group_layout(&device);
        let ascii = create_ascii_resources(&device, format, &atlas_bgl, quad, instances);
        let wave = create_wave_resources(&device, mesh);
        let atlas = ResourceSlot::new(AtlasTexture::upload(
            &device,
            &queue,
            &atlas_bgl,
            &sampler,
            atlas_image,
        ));
        let media = ResourceSlot::new(MediaTexture::placeholder(&device, &queue));
        let source_bg = ascii.source_bind_group(&device, &targets.color_view, &sampler);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            targets,
            sampler,
            ascii,
            wave,
            atlas_bgl,
            atlas,
            media,
            source: SourceBinding::Wave,
            source_bg,
            width,
            height,
        })
    }

    /// Largest atlas strip the device accepts.
    pub fn max_texture_width(&self) -> u32 {
        self.device.limits().max_texture_dimension_2d
    }

    pub fn source(&self) -> SourceBinding {
        self.source
    }

    pub fn set_source(&mut self, source: SourceBinding) {
        if self.source != source {
            self.source = source;
            self.rebind_source();
        }
    }

    /// Upload a freshly rasterized atlas; the previous texture is released.
    pub fn install_atlas(&mut self, image: &AtlasImage) {
        let next = AtlasTexture::upload(
            &self.device,
            &self.queue,
            &self.atlas_bgl,
            &self.sampler,
            image,
        );
        let generation = self.atlas.install(next);
        let layout = self.atlas.get().layout;
        log::info!(
            "[atlas] installed {} glyphs at {}px (generation {generation})",
            layout.length,
            layout.cell_size
        );
    }

    /// Copy the element's current frame, reallocating when its size changes.
    pub fn upload_media(&mut self, source: wgpu::ExternalImageSource, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if !self.media.get().matches(width, height) {
            let generation = self
                .media
                .install(MediaTexture::new(&self.device, width, height));
            log::info!("[media] texture {width}x{height} (generation {generation})");
            if self.source == SourceBinding::Media {
                self.rebind_source();
            }
        }
        self.media.get().copy_from(&self.queue, source);
    }

    /// Drop the media texture back to the placeholder when its element is released.
    pub fn release_media(&mut self) {
        self.media
            .install(MediaTexture::placeholder(&self.device, &self.queue));
        if self.source == SourceBinding::Media {
            self.rebind_source();
        }
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.targets.recreate(&self.device, width, height);
            if self.source == SourceBinding::Wave {
                self.rebind_source();
            }
            log::info!("[gpu] resized to {width}x{height}");
        }
    }

    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    pub fn render(
        &mut self,
        uniforms: &AsciiUniforms,
        wave: Option<WaveFrame<'_>>,
    ) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });

        if let Some(w) = wave {
            self.queue
                .write_buffer(&self.wave.uniform_buffer, 0, bytemuck::bytes_of(&w.uniforms));
            self.queue
                .write_buffer(&self.wave.vertex_buffer, 0, bytemuck::cast_slice(w.vertices));
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("wave_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.color_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(crate::constants::WAVE_CLEAR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.wave.pipeline);
            rpass.set_bind_group(0, &self.wave.bind_group, &[]);
            rpass.set_vertex_buffer(0, self.wave.vertex_buffer.slice(..));
            rpass.set_index_buffer(self.wave.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..self.wave.index_count, 0, 0..1);
        }

        self.queue
            .write_buffer(&self.ascii.uniform_buffer, 0, bytemuck::bytes_of(uniforms));
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("ascii_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(crate::constants::ASCII_CLEAR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.ascii.pipeline);
            rpass.set_bind_group(0, &self.source_bg, &[]);
            rpass.set_bind_group(1, &self.atlas.get().bind_group, &[]);
            rpass.set_vertex_buffer(0, self.ascii.quad_buffer.slice(..));
            rpass.set_vertex_buffer(1, self.ascii.instance_buffer.slice(..));
            rpass.draw(0..6, 0..self.ascii.instance_count);
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

impl<'a> GpuState<'a> {
    fn rebind_source(&mut self) {
        let view = match self.source {
            SourceBinding::Wave => &self.targets.color_view,
            SourceBinding::Media => &self.media.get().view,
        };
        self.source_bg = self.ascii.source_bind_group(&self.device, view, &self.sampler);
    }
}
