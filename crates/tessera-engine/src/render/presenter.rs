use anyhow::Result;
use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::device::Gpu;
use crate::surface::{Color, PixelSurface};

/// Composites the pixel surface onto the window, one frame at a time.
///
/// All GPU resources are created once at construction and sized to the
/// logical resolution; only the texture's contents ever change. There is no
/// resize path and no degraded fallback: if any resource cannot be created,
/// construction fails and the engine never starts.
pub struct Presenter {
    surface: PixelSurface,

    texture: wgpu::Texture,
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    quad_vbo: wgpu::Buffer,
    quad_ibo: wgpu::Buffer,
}

impl Presenter {
    /// Creates a presenter for a `width × height` logical pixel grid.
    pub fn new(gpu: &Gpu<'_>, width: u32, height: u32) -> Result<Self> {
        anyhow::ensure!(width >= 1 && height >= 1, "surface size must be at least 1x1");

        let surface = PixelSurface::new(width, height);
        let device = gpu.device();

        // Packed 0xAARRGGBB words are B,G,R,A bytes in memory (little
        // endian), which is exactly the Bgra8 texel layout; the per-frame
        // upload is therefore a plain cast with no channel shuffling. The
        // sRGB-ness mirrors the window surface so sampling and storing
        // round-trip the bytes unchanged.
        let format = if gpu.surface_format().is_srgb() {
            wgpu::TextureFormat::Bgra8UnormSrgb
        } else {
            wgpu::TextureFormat::Bgra8Unorm
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("tessera pixel-surface texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let texture_view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        // Nearest on both axes keeps hard pixel edges; the whole point of a
        // logical pixel grid is that no smoothing ever happens.
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("tessera pixel-surface sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("tessera blit shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/blit.wgsl").into()),
        });

        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("tessera blit bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("tessera blit bind group"),
            layout: &bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&texture_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("tessera blit pipeline layout"),
            bind_group_layouts: &[&bgl],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("tessera blit pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[QuadVertex::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: gpu.surface_format(),
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let quad_vbo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("tessera quad vbo"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let quad_ibo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("tessera quad ibo"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        let presenter = Self {
            surface,
            texture,
            pipeline,
            bind_group,
            quad_vbo,
            quad_ibo,
        };

        // Seed the texture so even a frame presented before the first
        // begin/end cycle shows the cleared surface.
        presenter.upload(gpu.queue());

        Ok(presenter)
    }

    /// Starts a frame by clearing the pixel surface to opaque black.
    ///
    /// Called exactly once per frame, before any draw calls.
    pub fn begin_frame(&mut self) {
        self.surface.clear();
    }

    /// Writes one pixel; out-of-bounds coordinates are ignored.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        self.surface.set_pixel(x, y, color);
    }

    /// Writes one opaque pixel from RGB components.
    #[inline]
    pub fn set_pixel_rgb(&mut self, x: i32, y: i32, r: u8, g: u8, b: u8) {
        self.surface.set_pixel_rgb(x, y, r, g, b);
    }

    /// Rasterizes a line onto the pixel surface.
    #[inline]
    pub fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Color) {
        self.surface.draw_line(x1, y1, x2, y2, color);
    }

    /// Finishes a frame: uploads the full surface buffer to the texture and
    /// records the one full-screen draw into `encoder`.
    pub fn end_frame(
        &self,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
    ) {
        self.upload(queue);

        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("tessera present pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.quad_vbo.slice(..));
        rpass.set_index_buffer(self.quad_ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, 0..1);
    }

    /// Read-only access to the pixel surface.
    pub fn surface(&self) -> &PixelSurface {
        &self.surface
    }

    /// Logical surface width in pixels.
    pub fn width(&self) -> u32 {
        self.surface.width()
    }

    /// Logical surface height in pixels.
    pub fn height(&self) -> u32 {
        self.surface.height()
    }

    // Full replace of the texture contents; no dirty-rect tracking, the
    // surface is cleared and redrawn every frame anyway.
    fn upload(&self, queue: &wgpu::Queue) {
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            bytemuck::cast_slice(self.surface.buffer()),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * self.surface.width()),
                rows_per_image: Some(self.surface.height()),
            },
            wgpu::Extent3d {
                width: self.surface.width(),
                height: self.surface.height(),
                depth_or_array_layers: 1,
            },
        );
    }
}

/// Static full-screen quad vertex: NDC position + texture coordinate.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct QuadVertex {
    pos: [f32; 2],
    uv: [f32; 2],
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x2];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

// Surface row 0 maps to the top of the window (+Y down in logical space).
const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { pos: [-1.0, 1.0], uv: [0.0, 0.0] },
    QuadVertex { pos: [1.0, 1.0], uv: [1.0, 0.0] },
    QuadVertex { pos: [1.0, -1.0], uv: [1.0, 1.0] },
    QuadVertex { pos: [-1.0, -1.0], uv: [0.0, 1.0] },
];

const QUAD_INDICES: [u16; 6] = [0, 1, 2, 2, 3, 0];
