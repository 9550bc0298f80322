use std::{path::Path, sync::Arc, time::Instant};

use modelview::window::World;
use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    window::Window,
};

const MODEL_PATH: &str = "assets/models/backpack/backpack.obj";

struct App {
    async_runtime: tokio::runtime::Runtime,
    world: Option<World>,
    last_time: Instant,
    orbiting: bool,
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let window_attributes = Window::default_attributes().with_title("modelview");
        let window = Arc::new(event_loop.create_window(window_attributes).unwrap());

        match self
            .async_runtime
            .block_on(World::new(window, Path::new(MODEL_PATH)))
        {
            Ok(world) => {
                world.ctx.window.request_redraw();
                self.world = Some(world);
            }
            Err(err) => {
                log::error!("failed to initialize the renderer: {err}");
                event_loop.exit();
            }
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        let world = match &mut self.world {
            Some(world) => world,
            None => return,
        };
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            if self.orbiting {
                world.controller.handle_mouse(dx, dy);
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let world = match &mut self.world {
            Some(world) => world,
            None => return,
        };

        world.controller.handle_window_events(&event);

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => world.resize(size.width, size.height),
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Right,
                ..
            } => {
                self.orbiting = state.is_pressed();
            }
            WindowEvent::RedrawRequested => {
                let dt = self.last_time.elapsed();
                self.last_time = Instant::now();
                world.controller.update(&mut world.viewer, dt);

                match world.render() {
                    Ok(_) => {}
                    // Reconfigure the surface if it's lost or outdated
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let size = world.ctx.window.inner_size();
                        world.resize(size.width, size.height);
                    }
                    Err(e) => {
                        log::error!("Unable to render {}", e);
                    }
                }
            }
            _ => {}
        }
    }
}

fn main() -> anyhow::Result<()> {
    if let Err(e) = env_logger::try_init() {
        println!("Warning: Could not initialize logger: {}", e);
    }

    let event_loop = EventLoop::new()?;
    let mut app = App {
        async_runtime: tokio::runtime::Runtime::new()?,
        world: None,
        last_time: Instant::now(),
        orbiting: false,
    };
    event_loop.run_app(&mut app)?;

    Ok(())
}
