//! The checkered floor primitive.
//!
//! A flat grid of alternately colored quads on the XZ plane, centered on the
//! origin. Built once at startup; drawn with its own flat-color pipeline.

use wgpu::util::DeviceExt;

use super::model::Vertex;

/// One floor vertex: position and flat color.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FloorVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl Vertex for FloorVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<FloorVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

const LIGHT_TILE: [f32; 3] = [0.8, 0.8, 0.8];
const DARK_TILE: [f32; 3] = [0.1, 0.1, 0.1];

/// Vertices and indices for a `tiles` x `tiles` checkerboard with quads of
/// `tile_size` world units, centered on the origin at y = 0.
pub fn checker_grid(tiles: u32, tile_size: f32) -> (Vec<FloorVertex>, Vec<u32>) {
    let mut vertices = Vec::with_capacity((tiles * tiles * 4) as usize);
    let mut indices = Vec::with_capacity((tiles * tiles * 6) as usize);
    let half = tiles as f32 * tile_size / 2.0;

    for row in 0..tiles {
        for col in 0..tiles {
            let color = if (row + col) % 2 == 0 {
                LIGHT_TILE
            } else {
                DARK_TILE
            };
            let x = col as f32 * tile_size - half;
            let z = row as f32 * tile_size - half;
            let base = vertices.len() as u32;
            for (dx, dz) in [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)] {
                vertices.push(FloorVertex {
                    position: [x + dx * tile_size, 0.0, z + dz * tile_size],
                    color,
                });
            }
            indices.extend_from_slice(&[base, base + 2, base + 1, base, base + 3, base + 2]);
        }
    }
    (vertices, indices)
}

/// The uploaded floor geometry.
#[derive(Debug)]
pub struct Floor {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub num_elements: u32,
}

impl Floor {
    pub fn new(device: &wgpu::Device, tiles: u32, tile_size: f32) -> Self {
        let (vertices, indices) = checker_grid(tiles, tile_size);
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Floor Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Floor Index Buffer"),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex_buffer,
            index_buffer,
            num_elements: indices.len() as u32,
        }
    }
}

pub trait DrawFloor<'a> {
    fn draw_floor(&mut self, floor: &'a Floor, uniforms: &'a wgpu::BindGroup);
}

impl<'a, 'b> DrawFloor<'b> for wgpu::RenderPass<'a>
where
    'b: 'a,
{
    fn draw_floor(&mut self, floor: &'b Floor, uniforms: &'b wgpu::BindGroup) {
        self.set_bind_group(0, uniforms, &[]);
        self.set_vertex_buffer(0, floor.vertex_buffer.slice(..));
        self.set_index_buffer(floor.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..floor.num_elements, 0, 0..1);
    }
}
