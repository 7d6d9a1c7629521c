// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Immediate-mode 2D painter.
//!
//! Applications queue rectangles, lines and text between `begin_frame` and
//! `flush`; the painter batches everything into one vertex/index buffer
//! pair and renders the whole frame in a single pass, switching pipelines
//! only at solid/glyph boundaries. Coordinates are logical pixels with the
//! origin at the top-left corner; the vertex shader maps them to clip space
//! through a screen-size uniform.

use std::mem;
use std::ops::Range;

use mikra_core::math::{LinearRgba, Vec2};

use super::context::GpuContext;
use super::error::GraphicsError;
use super::shaders;
use super::text::FontAtlas;

fn round_up_to(v: u64, align: u64) -> u64 {
    debug_assert!(align.is_power_of_two());
    (v + (align - 1)) & !(align - 1)
}

/// GPU vertex format shared by the solid and glyph pipelines.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct Vertex {
    position: [f32; 2],
    uv: [f32; 2],
    color: [f32; 4],
}

impl Vertex {
    const ATTRS: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x2, 2 => Float32x4];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Uniform block mapping logical-pixel coordinates to clip space.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct ScreenUniform {
    size: [f32; 2],
    _pad: [f32; 2],
}

/// Which pipeline a run of indices belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BatchKind {
    Solid,
    Glyph,
}

/// A contiguous index range drawn with one pipeline.
#[derive(Debug)]
struct Batch {
    kind: BatchKind,
    indices: Range<u32>,
}

/// Batched 2D renderer over the shell's GPU context.
pub struct Painter {
    device: wgpu::Device,
    queue: wgpu::Queue,
    solid_pipeline: wgpu::RenderPipeline,
    glyph_pipeline: wgpu::RenderPipeline,
    screen_buffer: wgpu::Buffer,
    screen_bind_group: wgpu::BindGroup,
    atlas_bind_group: wgpu::BindGroup,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    vertex_capacity_bytes: u64,
    index_capacity_bytes: u64,
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    batches: Vec<Batch>,
    clear_color: LinearRgba,
    screen_size: (f32, f32),
    atlas: FontAtlas,
}

impl Painter {
    /// Builds the pipelines, bind groups and initial buffers.
    pub fn new(context: &GpuContext, atlas: FontAtlas, screen_size: (f32, f32)) -> Self {
        let device = context.device().clone();
        let queue = context.queue().clone();
        let surface_format = context.surface_format();

        let solid_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Painter Solid Shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::SOLID_WGSL.into()),
        });
        let glyph_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Painter Glyph Shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::GLYPH_WGSL.into()),
        });

        let screen_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Painter Screen Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let atlas_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Painter Atlas Bind Group Layout"),
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

        let screen_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Painter Screen Uniform Buffer"),
            size: mem::size_of::<ScreenUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let screen_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Painter Screen Bind Group"),
            layout: &screen_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: screen_buffer.as_entire_binding(),
            }],
        });

        let atlas_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Glyph Atlas Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        let atlas_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Painter Atlas Bind Group"),
            layout: &atlas_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(atlas.texture_view()),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&atlas_sampler),
                },
            ],
        });

        let solid_pipeline = Self::build_pipeline(
            &device,
            "Painter Solid Pipeline",
            &solid_shader,
            &[Some(&screen_layout)],
            surface_format,
        );
        let glyph_pipeline = Self::build_pipeline(
            &device,
            "Painter Glyph Pipeline",
            &glyph_shader,
            &[Some(&screen_layout), Some(&atlas_layout)],
            surface_format,
        );

        // Small initial buffers; they grow as frames demand.
        let initial_vb = 1024u64;
        let initial_ib = 1024u64;

        let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Painter Vertex Buffer"),
            size: initial_vb,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let index_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Painter Index Buffer"),
            size: initial_ib,
            usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            device,
            queue,
            solid_pipeline,
            glyph_pipeline,
            screen_buffer,
            screen_bind_group,
            atlas_bind_group,
            vertex_buffer,
            index_buffer,
            vertex_capacity_bytes: initial_vb,
            index_capacity_bytes: initial_ib,
            vertices: Vec::new(),
            indices: Vec::new(),
            batches: Vec::new(),
            clear_color: LinearRgba::BLACK,
            screen_size,
            atlas,
        }
    }

    fn build_pipeline(
        device: &wgpu::Device,
        label: &str,
        shader: &wgpu::ShaderModule,
        bind_group_layouts: &[Option<&wgpu::BindGroupLayout>],
        surface_format: wgpu::TextureFormat,
    ) -> wgpu::RenderPipeline {
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(label),
            bind_group_layouts,
            immediate_size: 0,
        });

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[Vertex::layout()],
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            multiview_mask: None,
            cache: None,
        })
    }

    /// Resets the frame's geometry and records the clear color.
    pub fn begin_frame(&mut self, clear: LinearRgba) {
        self.vertices.clear();
        self.indices.clear();
        self.batches.clear();
        self.clear_color = clear;
    }

    /// Current logical screen size in pixels.
    pub fn screen_size(&self) -> (f32, f32) {
        self.screen_size
    }

    /// Updates the logical screen size after a window resize.
    pub fn set_screen_size(&mut self, width: f32, height: f32) {
        self.screen_size = (width, height);
    }

    /// Queues an axis-aligned filled rectangle.
    pub fn rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: LinearRgba) {
        let rgba = color.to_array();
        self.push_quad(
            BatchKind::Solid,
            [
                ([x, y], [0.0, 0.0], rgba),
                ([x + width, y], [0.0, 0.0], rgba),
                ([x, y + height], [0.0, 0.0], rgba),
                ([x + width, y + height], [0.0, 0.0], rgba),
            ],
        );
    }

    /// Queues a solid line segment of the given thickness.
    pub fn line(&mut self, from: Vec2, to: Vec2, thickness: f32, color: LinearRgba) {
        self.gradient_line(from, to, thickness, color, color);
    }

    /// Queues a line whose color interpolates from one endpoint to the other.
    pub fn gradient_line(
        &mut self,
        from: Vec2,
        to: Vec2,
        thickness: f32,
        color_start: LinearRgba,
        color_end: LinearRgba,
    ) {
        let direction = to - from;
        if direction.length_squared() <= f32::EPSILON {
            return;
        }
        let normal = direction.normalize().perp() * (thickness * 0.5);

        let start = color_start.to_array();
        let end = color_end.to_array();
        self.push_quad(
            BatchKind::Solid,
            [
                ([from.x + normal.x, from.y + normal.y], [0.0, 0.0], start),
                ([to.x + normal.x, to.y + normal.y], [0.0, 0.0], end),
                ([from.x - normal.x, from.y - normal.y], [0.0, 0.0], start),
                ([to.x - normal.x, to.y - normal.y], [0.0, 0.0], end),
            ],
        );
    }

    /// Queues a connected line strip through `points`.
    pub fn polyline(&mut self, points: &[Vec2], thickness: f32, color: LinearRgba) {
        for pair in points.windows(2) {
            self.line(pair[0], pair[1], thickness, color);
        }
    }

    /// Queues a text run with its top-left corner at `(x, y)` and returns
    /// the advance width of the whole run.
    pub fn text(&mut self, text: &str, x: f32, y: f32, color: LinearRgba) -> f32 {
        let rgba = color.to_array();
        let baseline = y + self.atlas.ascent();
        let mut pen = x;

        for ch in text.chars() {
            let glyph = self.atlas.glyph(ch, &self.queue);
            if glyph.width > 0.0 && glyph.height > 0.0 {
                let left = pen + glyph.left;
                let top = baseline - glyph.top;
                self.push_quad(
                    BatchKind::Glyph,
                    [
                        ([left, top], glyph.uv_min, rgba),
                        ([left + glyph.width, top], [glyph.uv_max[0], glyph.uv_min[1]], rgba),
                        ([left, top + glyph.height], [glyph.uv_min[0], glyph.uv_max[1]], rgba),
                        ([left + glyph.width, top + glyph.height], glyph.uv_max, rgba),
                    ],
                );
            }
            pen += glyph.advance;
        }

        pen - x
    }

    /// The advance width `text` would occupy, without queuing anything.
    pub fn measure_text(&self, text: &str) -> f32 {
        self.atlas.measure(text)
    }

    fn push_quad(&mut self, kind: BatchKind, corners: [([f32; 2], [f32; 2], [f32; 4]); 4]) {
        let base = self.vertices.len() as u32;
        for (position, uv, color) in corners {
            self.vertices.push(Vertex { position, uv, color });
        }

        let start = self.indices.len() as u32;
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 1, base + 3]);
        let end = self.indices.len() as u32;

        match self.batches.last_mut() {
            Some(batch) if batch.kind == kind => batch.indices.end = end,
            _ => self.batches.push(Batch {
                kind,
                indices: start..end,
            }),
        }
    }

    /// Ensures the GPU buffers can hold at least `vb_bytes` / `ib_bytes`.
    fn ensure_capacity(&mut self, vb_bytes: u64, ib_bytes: u64) {
        if vb_bytes > self.vertex_capacity_bytes {
            // Grow to the next power of two to reduce realloc frequency.
            let new_size = vb_bytes.next_power_of_two().max(1024);
            self.vertex_buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("Painter Vertex Buffer (resized)"),
                size: new_size,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            self.vertex_capacity_bytes = new_size;
        }

        if ib_bytes > self.index_capacity_bytes {
            let new_size = ib_bytes.next_power_of_two().max(1024);
            self.index_buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("Painter Index Buffer (resized)"),
                size: new_size,
                usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            self.index_capacity_bytes = new_size;
        }
    }

    fn upload_geometry(&mut self) -> (u64, u64) {
        let vb_bytes = (self.vertices.len() * mem::size_of::<Vertex>()) as u64;
        let ib_bytes = (self.indices.len() * mem::size_of::<u32>()) as u64;

        let align = wgpu::COPY_BUFFER_ALIGNMENT;
        let vb_upload = round_up_to(vb_bytes, align);
        let ib_upload = round_up_to(ib_bytes, align);

        self.ensure_capacity(vb_upload, ib_upload);

        let v_raw = bytemuck::cast_slice(&self.vertices);
        if vb_upload == vb_bytes {
            self.queue.write_buffer(&self.vertex_buffer, 0, v_raw);
        } else {
            let mut padded = Vec::<u8>::with_capacity(vb_upload as usize);
            padded.extend_from_slice(v_raw);
            padded.resize(vb_upload as usize, 0);
            self.queue.write_buffer(&self.vertex_buffer, 0, &padded);
        }

        let i_raw = bytemuck::cast_slice(&self.indices);
        if ib_upload == ib_bytes {
            self.queue.write_buffer(&self.index_buffer, 0, i_raw);
        } else {
            let mut padded = Vec::<u8>::with_capacity(ib_upload as usize);
            padded.extend_from_slice(i_raw);
            padded.resize(ib_upload as usize, 0);
            self.queue.write_buffer(&self.index_buffer, 0, &padded);
        }

        (vb_bytes, ib_bytes)
    }

    /// Renders everything queued since `begin_frame` and presents the frame.
    pub fn flush(&mut self, context: &mut GpuContext) -> Result<(), GraphicsError> {
        let uniform = ScreenUniform {
            size: [self.screen_size.0, self.screen_size.1],
            _pad: [0.0, 0.0],
        };
        self.queue
            .write_buffer(&self.screen_buffer, 0, bytemuck::bytes_of(&uniform));

        let (vb_bytes, ib_bytes) = if self.vertices.is_empty() {
            (0, 0)
        } else {
            self.upload_geometry()
        };

        let frame = context.acquire_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Painter Command Encoder"),
            });

        {
            let clear = self.clear_color;
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Painter Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: clear.r as f64,
                            g: clear.g as f64,
                            b: clear.b as f64,
                            a: clear.a as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            if vb_bytes > 0 {
                pass.set_vertex_buffer(0, self.vertex_buffer.slice(..vb_bytes));
                pass.set_index_buffer(
                    self.index_buffer.slice(..ib_bytes),
                    wgpu::IndexFormat::Uint32,
                );
                pass.set_bind_group(0, &self.screen_bind_group, &[]);

                for batch in &self.batches {
                    match batch.kind {
                        BatchKind::Solid => pass.set_pipeline(&self.solid_pipeline),
                        BatchKind::Glyph => {
                            pass.set_pipeline(&self.glyph_pipeline);
                            pass.set_bind_group(1, &self.atlas_bind_group, &[]);
                        }
                    }
                    pass.draw_indexed(batch.indices.clone(), 0, 0..1);
                }
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        frame.present();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_up_respects_copy_alignment() {
        assert_eq!(round_up_to(0, 4), 0);
        assert_eq!(round_up_to(1, 4), 4);
        assert_eq!(round_up_to(4, 4), 4);
        assert_eq!(round_up_to(5, 4), 8);
    }

    #[test]
    fn vertex_layout_matches_struct_size() {
        let layout = Vertex::layout();
        assert_eq!(layout.array_stride, mem::size_of::<Vertex>() as u64);
        assert_eq!(layout.attributes.len(), 3);
    }
}
