//! Texture loading and the per-load texture cache.

use std::{collections::HashMap, path::Path, rc::Rc};

use crate::data_structures::{
    model::SlotDefaults,
    scene::TextureKind,
    texture::Texture,
};

/// Error type for texture loading.
#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    #[error("failed to read texture file {path}: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode texture {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: image::ImageError,
    },
}

/// Bind group layout for the four material texture slots
/// (diffuse, specular, normal, height), each with its sampler.
pub fn material_texture_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    let mut entries = Vec::with_capacity(8);
    for index in 0..TextureKind::ALL.len() as u32 {
        entries.push(wgpu::BindGroupLayoutEntry {
            binding: 2 * index,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Texture {
                multisampled: false,
                view_dimension: wgpu::TextureViewDimension::D2,
                sample_type: wgpu::TextureSampleType::Float { filterable: true },
            },
            count: None,
        });
        entries.push(wgpu::BindGroupLayoutEntry {
            binding: 2 * index + 1,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
            count: None,
        });
    }
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &entries,
        label: Some("Model texture_bind_group_layout"),
    })
}

/// Decode an image file and upload it with mipmaps.
pub fn load_texture(
    path: &Path,
    is_normal_map: bool,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
) -> Result<Texture, TextureError> {
    let display = path.display().to_string();
    let bytes = std::fs::read(path).map_err(|source| TextureError::Unreadable {
        path: display.clone(),
        source,
    })?;
    let img = image::load_from_memory(&bytes).map_err(|source| TextureError::Decode {
        path: display.clone(),
        source,
    })?;
    Ok(Texture::from_image(
        device,
        queue,
        &img,
        Some(&display),
        is_normal_map,
    ))
}

/// Deduplicates texture uploads within one model load.
///
/// Keys are the path strings as they appear in the material, not resolved
/// paths or content hashes; two identical strings share one GPU texture.
/// The cache owns the textures for the duration of the load, meshes keep
/// shared `Rc` handles.
#[derive(Default)]
pub struct TextureCache {
    entries: HashMap<String, Rc<Texture>>,
}

impl TextureCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch or upload the texture at `path` (relative to `dir`).
    pub fn load(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        dir: &Path,
        path: &str,
        kind: TextureKind,
    ) -> Result<Rc<Texture>, TextureError> {
        if let Some(texture) = self.entries.get(path) {
            return Ok(Rc::clone(texture));
        }
        let texture = Rc::new(load_texture(
            &dir.join(path),
            kind == TextureKind::Normal,
            device,
            queue,
        )?);
        self.entries.insert(path.to_string(), Rc::clone(&texture));
        Ok(texture)
    }

    /// Like [`load`](Self::load), but a missing or corrupt file is not a hard
    /// error: the failure is logged and the slot's placeholder is registered
    /// under the path, so the model keeps rendering with a blank map.
    pub fn load_or_placeholder(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        dir: &Path,
        path: &str,
        kind: TextureKind,
        placeholders: &SlotDefaults,
    ) -> Rc<Texture> {
        match self.load(device, queue, dir, path, kind) {
            Ok(texture) => texture,
            Err(err) => {
                log::warn!("texture failed to load at path {path}: {err}");
                let fallback = Rc::clone(placeholders.get(kind));
                self.entries.insert(path.to_string(), Rc::clone(&fallback));
                fallback
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
