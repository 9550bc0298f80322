//! Render pipeline definitions and their uniform blocks.
//!
//! - `model` renders the imported model with phong shading and textures
//! - `floor` renders the flat-colored checkered floor

pub mod floor;
pub mod model;
