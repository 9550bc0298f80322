//! Core data types for the viewer.
//!
//! - `scene` holds importer-neutral scene data produced by the loaders
//! - `model` contains mesh, material and GPU resources for the loaded model
//! - `texture` contains the GPU texture wrapper and creation utilities
//! - `floor` is the checkered floor primitive

pub mod floor;
pub mod model;
pub mod scene;
pub mod texture;
