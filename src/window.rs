//! The per-frame render loop.
//!
//! [`World`] owns the GPU context, the viewer, the transform stack and the
//! two drawables (floor and model). Each frame computes the view and
//! projection matrices from the viewer, then draws each drawable inside its
//! own transform-stack scope with freshly written uniforms.

use std::{iter, path::Path, sync::Arc};

use bytemuck::Zeroable;
use cgmath::{Deg, Vector4};
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::{
    camera::{CameraController, Viewer},
    context::Context,
    data_structures::{
        floor::{DrawFloor, Floor},
        model::{DrawModel, Model},
    },
    pipelines::{
        floor::{FloorUniforms, mk_floor_pipeline},
        model::{ModelUniforms, mk_model_pipeline, mk_uniform_bind_group, mk_uniform_layout},
    },
    resources::{LoadSettings, load_model_or_empty},
    transform::MatrixStack,
};

const DEFAULT_VIEW_POINT: [f32; 3] = [50.0, 50.0, 50.0];
const DEFAULT_VIEW_CENTER: [f32; 3] = [0.0, 0.0, 0.0];
const DEFAULT_UP_VECTOR: [f32; 3] = [0.0, 1.0, 0.0];

// w = 0: the light direction is fixed in world space.
const LIGHT_POSITION: Vector4<f32> = Vector4::new(10.0, 10.0, 10.0, 0.0);
const LIGHT_INTENSITY: [f32; 3] = [1.0, 1.0, 1.0];

const FLOOR_TILES: u32 = 32;
const FLOOR_TILE_SIZE: f32 = 1.0;

pub struct World {
    pub ctx: Context,
    pub viewer: Viewer,
    pub controller: CameraController,
    pub clear_colour: wgpu::Color,
    transform: MatrixStack,
    model: Model,
    floor: Floor,
    model_pipeline: wgpu::RenderPipeline,
    floor_pipeline: wgpu::RenderPipeline,
    model_uniform_buffer: wgpu::Buffer,
    model_uniform_group: wgpu::BindGroup,
    floor_uniform_buffer: wgpu::Buffer,
    floor_uniform_group: wgpu::BindGroup,
}

impl World {
    /// Set up the GPU context, both pipelines and the drawables, then import
    /// the model. A broken asset leaves an empty model and the loop renders
    /// the floor alone.
    pub async fn new(window: Arc<Window>, model_path: &Path) -> anyhow::Result<Self> {
        let ctx = Context::new(window).await?;

        let viewer = Viewer::new(
            DEFAULT_VIEW_POINT,
            DEFAULT_VIEW_CENTER,
            DEFAULT_UP_VECTOR,
            Deg(45.0),
            ctx.aspect_ratio(),
        );
        let controller = CameraController::new(10.0, 10.0);

        let uniform_layout = mk_uniform_layout(&ctx.device, "drawable_uniform_layout");
        let model_pipeline = mk_model_pipeline(&ctx.device, &ctx.config, &uniform_layout);
        let floor_pipeline = mk_floor_pipeline(&ctx.device, &ctx.config, &uniform_layout);

        let model_uniform_buffer =
            ctx.device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Model Uniform Buffer"),
                    contents: bytemuck::cast_slice(&[ModelUniforms::zeroed()]),
                    usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                });
        let model_uniform_group = mk_uniform_bind_group(
            &ctx.device,
            &uniform_layout,
            &model_uniform_buffer,
            "model_uniform_group",
        );
        let floor_uniform_buffer =
            ctx.device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Floor Uniform Buffer"),
                    contents: bytemuck::cast_slice(&[FloorUniforms::zeroed()]),
                    usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                });
        let floor_uniform_group = mk_uniform_bind_group(
            &ctx.device,
            &uniform_layout,
            &floor_uniform_buffer,
            "floor_uniform_group",
        );

        let floor = Floor::new(&ctx.device, FLOOR_TILES, FLOOR_TILE_SIZE);
        let model =
            load_model_or_empty(model_path, &ctx.device, &ctx.queue, &LoadSettings::default())
                .await;

        Ok(Self {
            ctx,
            viewer,
            controller,
            clear_colour: wgpu::Color {
                r: 0.2,
                g: 0.2,
                b: 0.2,
                a: 1.0,
            },
            transform: MatrixStack::new(),
            model,
            floor,
            model_pipeline,
            floor_pipeline,
            model_uniform_buffer,
            model_uniform_group,
            floor_uniform_buffer,
            floor_uniform_group,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.ctx.resize(width, height);
        self.viewer.set_aspect_ratio(self.ctx.aspect_ratio());
    }

    /// Render one frame: view/projection from the viewer, then the floor and
    /// the model, each inside its own transform scope.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        self.ctx.window.request_redraw();

        let output = self.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let view_matrix = self.viewer.view_matrix();
        let projection = self.viewer.projection_matrix();
        let depth_before = self.transform.depth();

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_colour),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.ctx.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
                multiview_mask: None,
            });

            // Floor
            {
                let mut frame = self.transform.scope();
                frame.translate(0.0, 0.0, 0.0);
                let mvp = projection * view_matrix * frame.current();
                self.ctx.queue.write_buffer(
                    &self.floor_uniform_buffer,
                    0,
                    bytemuck::cast_slice(&[FloorUniforms::new(mvp)]),
                );
                render_pass.set_pipeline(&self.floor_pipeline);
                render_pass.draw_floor(&self.floor, &self.floor_uniform_group);
            }

            // Model
            {
                let frame = self.transform.scope();
                let uniforms = ModelUniforms::new(
                    frame.current(),
                    view_matrix,
                    projection,
                    LIGHT_POSITION,
                    LIGHT_INTENSITY,
                    &self.model.material,
                );
                self.ctx.queue.write_buffer(
                    &self.model_uniform_buffer,
                    0,
                    bytemuck::cast_slice(&[uniforms]),
                );
                render_pass.set_pipeline(&self.model_pipeline);
                render_pass.draw_model(&self.model, &self.model_uniform_group);
            }
        }

        debug_assert_eq!(depth_before, self.transform.depth());

        self.ctx.queue.submit(iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}
