//! Uploading [`TextGeometry`] buffers to wgpu.
//!
//! Attributes live in separate vertex buffers so the optional page buffer can
//! come and go without touching the others:
//!
//! | slot | location | attribute | format      |
//! |------|----------|-----------|-------------|
//! | 0    | 0        | position  | `Float32x2` |
//! | 1    | 1        | uv        | `Float32x2` |
//! | 2    | 2        | page      | `Float32`   |
//!
//! The page index is uploaded as a float to match `attribute float page` in
//! [`multipage_shader`](crate::shader::multipage_shader).

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::{geometry::TextGeometry, shader::ShaderOptions};

pub const POSITION_LOCATION: u32 = 0;
pub const UV_LOCATION: u32 = 1;
pub const PAGE_LOCATION: u32 = 2;

const POSITION_ATTRIBUTES: &[wgpu::VertexAttribute] = &[wgpu::VertexAttribute {
    offset: 0,
    shader_location: POSITION_LOCATION,
    format: wgpu::VertexFormat::Float32x2,
}];

const UV_ATTRIBUTES: &[wgpu::VertexAttribute] = &[wgpu::VertexAttribute {
    offset: 0,
    shader_location: UV_LOCATION,
    format: wgpu::VertexFormat::Float32x2,
}];

const PAGE_ATTRIBUTES: &[wgpu::VertexAttribute] = &[wgpu::VertexAttribute {
    offset: 0,
    shader_location: PAGE_LOCATION,
    format: wgpu::VertexFormat::Float32,
}];

/// Per-draw values packed for a host-written WGSL pipeline.
///
/// The generated GLSL declares these as separate uniforms
/// (`projectionMatrix`, `modelViewMatrix`, `color`, `opacity`). The alpha test
/// is baked into the shader source and has no slot here.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct TextUniforms {
    pub projection: [[f32; 4]; 4],
    pub model_view: [[f32; 4]; 4],
    /// Tint in rgb, opacity in a.
    pub color: [f32; 4],
}

impl TextUniforms {
    pub fn new(
        projection: &nalgebra::Matrix4<f32>,
        model_view: &nalgebra::Matrix4<f32>,
        options: &ShaderOptions,
    ) -> Self {
        let (r, g, b) = options.color.into_components();
        Self {
            projection: (*projection).into(),
            model_view: (*model_view).into(),
            color: [r, g, b, options.opacity],
        }
    }
}

/// GPU copies of the geometry buffers.
pub struct TextGpuBuffers {
    position: wgpu::Buffer,
    uv: wgpu::Buffer,
    page: Option<wgpu::Buffer>,
    index: wgpu::Buffer,
    index_count: u32,
}

impl TextGpuBuffers {
    /// Creates buffers holding the current contents of `geometry`.
    pub fn new<L>(device: &wgpu::Device, geometry: &TextGeometry<L>) -> Self {
        let vertex_usage = wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST;
        let index_usage = wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST;

        let init = |label: &str, contents: &[u8], usage| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents,
                usage,
            })
        };

        Self {
            position: init(
                "Text Position Buffer",
                bytemuck::cast_slice(geometry.positions()),
                vertex_usage,
            ),
            uv: init(
                "Text UV Buffer",
                bytemuck::cast_slice(geometry.uvs()),
                vertex_usage,
            ),
            page: geometry.pages().map(|pages| {
                init(
                    "Text Page Buffer",
                    bytemuck::cast_slice(&page_attributes(pages)),
                    vertex_usage,
                )
            }),
            index: init(
                "Text Index Buffer",
                bytemuck::cast_slice(geometry.indices()),
                index_usage,
            ),
            index_count: geometry.index_count() as u32,
        }
    }

    /// Copies the geometry's current buffers, growing GPU buffers as needed.
    ///
    /// The page buffer is dropped when the geometry is no longer multipage.
    pub fn update<L>(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        geometry: &TextGeometry<L>,
    ) {
        let vertex_usage = wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST;
        let index_usage = wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST;

        write_or_grow(
            device,
            queue,
            &mut self.position,
            "Text Position Buffer",
            vertex_usage,
            bytemuck::cast_slice(geometry.positions()),
        );
        write_or_grow(
            device,
            queue,
            &mut self.uv,
            "Text UV Buffer",
            vertex_usage,
            bytemuck::cast_slice(geometry.uvs()),
        );
        write_or_grow(
            device,
            queue,
            &mut self.index,
            "Text Index Buffer",
            index_usage,
            bytemuck::cast_slice(geometry.indices()),
        );

        match geometry.pages() {
            Some(pages) => {
                let pages = page_attributes(pages);
                if let Some(buffer) = self.page.as_mut() {
                    write_or_grow(
                        device,
                        queue,
                        buffer,
                        "Text Page Buffer",
                        vertex_usage,
                        bytemuck::cast_slice(&pages),
                    );
                } else {
                    self.page = Some(device.create_buffer_init(
                        &wgpu::util::BufferInitDescriptor {
                            label: Some("Text Page Buffer"),
                            contents: bytemuck::cast_slice(&pages),
                            usage: vertex_usage,
                        },
                    ));
                }
            }
            None => self.page = None,
        }

        self.index_count = geometry.index_count() as u32;
    }

    /// Vertex layouts for slots 0.. in the order [`Self::draw`] binds them.
    pub fn vertex_layouts(multipage: bool) -> Vec<wgpu::VertexBufferLayout<'static>> {
        let layout = |stride: usize, attributes| wgpu::VertexBufferLayout {
            array_stride: stride as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes,
        };

        let mut layouts = vec![
            layout(std::mem::size_of::<[f32; 2]>(), POSITION_ATTRIBUTES),
            layout(std::mem::size_of::<[f32; 2]>(), UV_ATTRIBUTES),
        ];
        if multipage {
            layouts.push(layout(std::mem::size_of::<f32>(), PAGE_ATTRIBUTES));
        }
        layouts
    }

    pub fn is_multipage(&self) -> bool {
        self.page.is_some()
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    /// Binds the buffers and issues one indexed draw.
    ///
    /// The pipeline must be created with [`Self::vertex_layouts`] for the same
    /// multipage setting.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        if self.index_count == 0 {
            return;
        }

        pass.set_vertex_buffer(0, self.position.slice(..));
        pass.set_vertex_buffer(1, self.uv.slice(..));
        if let Some(page) = &self.page {
            pass.set_vertex_buffer(2, page.slice(..));
        }
        pass.set_index_buffer(self.index.slice(..), wgpu::IndexFormat::Uint16);
        pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

/// Pages as the float attribute the shaders read.
fn page_attributes(pages: &[u32]) -> Vec<f32> {
    pages.iter().map(|&page| page as f32).collect()
}

fn write_or_grow(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    buffer: &mut wgpu::Buffer,
    label: &str,
    usage: wgpu::BufferUsages,
    bytes: &[u8],
) {
    if bytes.is_empty() {
        return;
    }

    let needed = bytes.len() as u64;
    if needed > buffer.size() {
        let new_capacity = needed.max(buffer.size() * 2);
        *buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: new_capacity.next_multiple_of(wgpu::COPY_BUFFER_ALIGNMENT),
            usage,
            mapped_at_creation: false,
        });
    }

    queue.write_buffer(buffer, 0, bytes);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_layout() {
        assert_eq!(std::mem::size_of::<TextUniforms>(), 144);
        assert_eq!(std::mem::size_of::<TextUniforms>() % 16, 0);
    }

    #[test]
    fn test_uniforms_from_options() {
        let options = ShaderOptions {
            opacity: 0.5,
            alpha_test: 0.25,
            ..Default::default()
        };
        let identity = nalgebra::Matrix4::<f32>::identity();
        let uniforms = TextUniforms::new(&identity, &identity, &options);

        assert_eq!(uniforms.color, [1.0, 1.0, 1.0, 0.5]);
        assert_eq!(uniforms.projection[0], [1.0, 0.0, 0.0, 0.0]);
        assert_eq!(uniforms.model_view[3], [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_vertex_layouts() {
        let single = TextGpuBuffers::vertex_layouts(false);
        assert_eq!(single.len(), 2);
        assert_eq!(single[0].array_stride, 8);
        assert_eq!(single[1].attributes[0].shader_location, UV_LOCATION);

        let multi = TextGpuBuffers::vertex_layouts(true);
        assert_eq!(multi.len(), 3);
        assert_eq!(multi[2].array_stride, 4);
        assert_eq!(multi[2].attributes[0].format, wgpu::VertexFormat::Float32);
        assert_eq!(multi[2].attributes[0].shader_location, PAGE_LOCATION);
    }

    #[test]
    fn test_page_attribute_matches_shader() {
        let shader =
            crate::shader::multipage_shader::<u32>(&ShaderOptions::default(), [0], false);
        assert!(shader.vertex_shader.contains("attribute float page;"));
        assert_eq!(PAGE_ATTRIBUTES[0].format, wgpu::VertexFormat::Float32);
        assert_eq!(page_attributes(&[0, 3, 3]), vec![0.0, 3.0, 3.0]);
    }
}
