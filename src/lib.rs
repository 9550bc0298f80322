//! modelview
//!
//! A small real-time rendering demo: a textured 3D model is imported from
//! disk (OBJ or glTF), uploaded to the GPU once, and drawn every frame above
//! a checkered floor with an orbiting first-person-style viewer.
//!
//! High-level modules
//! - `camera`: viewer state and the view/projection matrix construction
//! - `context`: central GPU context owning surface, device and queue
//! - `data_structures`: scene data, GPU meshes, textures and the floor
//! - `pipelines`: render pipeline definitions and uniform blocks
//! - `resources`: importers, scene conversion and the texture cache
//! - `transform`: model-transform stack with scoped push/pop
//! - `window`: the per-frame render loop
//!

pub mod camera;
pub mod context;
pub mod data_structures;
pub mod pipelines;
pub mod resources;
pub mod transform;
pub mod window;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath::*;
pub use winit::event::DeviceEvent;
pub use winit::event::WindowEvent;
