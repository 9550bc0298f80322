//! Flat-color pipeline for the checkered floor.

use cgmath::Matrix4;

use crate::{
    data_structures::{
        floor::FloorVertex,
        model::Vertex,
        texture::Texture,
    },
    pipelines::model::mk_render_pipeline,
};

/// The floor only needs the combined MVP.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FloorUniforms {
    mvp: [[f32; 4]; 4],
}

impl FloorUniforms {
    pub fn new(mvp: Matrix4<f32>) -> Self {
        Self { mvp: mvp.into() }
    }
}

pub fn mk_floor_pipeline(
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    uniform_layout: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline {
    let render_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Floor Pipeline Layout"),
        bind_group_layouts: &[Some(uniform_layout)],
        immediate_size: 0,
    });

    let shader = wgpu::ShaderModuleDescriptor {
        label: Some("Floor Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("floor_shader.wgsl").into()),
    };

    mk_render_pipeline(
        device,
        &render_pipeline_layout,
        config.format,
        Some(wgpu::BlendState {
            alpha: wgpu::BlendComponent::REPLACE,
            color: wgpu::BlendComponent::REPLACE,
        }),
        Some(Texture::DEPTH_FORMAT),
        &[FloorVertex::desc()],
        shader,
    )
}
