use anyhow::{anyhow, Result};
use glam::{Mat4, Quat, Vec3};
use gltf::{buffer::Data, Document};
use log::{info, warn};
use std::path::Path;
use crate::config::ModelConfig;
use crate::math::Aabb;

/// A named, clickable piece of the model with its world space bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelPart {
    pub name: String,
    pub bounds: Aabb,
}

impl ModelPart {
    pub fn new(name: impl Into<String>, bounds: Aabb) -> Self {
        Self {
            name: name.into(),
            bounds,
        }
    }
}

#[derive(Debug)]
pub struct ModelData {
    pub parts: Vec<ModelPart>,
    pub name: Option<String>,
}

impl ModelData {
    pub fn new(parts: Vec<ModelPart>, name: Option<String>) -> Self {
        Self { parts, name }
    }
}

pub struct GltfLoader {
    placement: Mat4,
}

impl GltfLoader {
    pub fn new(model: &ModelConfig) -> Self {
        Self {
            placement: Mat4::from_scale_rotation_translation(Vec3::splat(model.scale), Quat::IDENTITY, model.offset),
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<ModelData> {
        let path = path.as_ref();

        info!("Load from file: {:?}", path);

        let name = path.file_stem().and_then(|s| s.to_str()).ok_or(anyhow!("Invalid path!"))?;
        let ext = path.extension().and_then(|s| s.to_str()).map(|s| s.to_lowercase());
        if ext.as_deref() == Some("glb") {
            let mmap = crate::file::load_with_memory_mapping(path)?;
            return self.load_from_bytes(&mmap, name);
        }

        let (gltf, buffers, _images) = gltf::import(path)?;
        self.process_gltf(gltf, buffers, name)
    }

    pub fn load_from_bytes(&self, data: &[u8], name: &str) -> Result<ModelData> {
        info!("Load from memory");

        let (gltf, buffers, _images) = gltf::import_slice(data)?;
        self.process_gltf(gltf, buffers, name)
    }

    fn process_gltf(&self, gltf: Document, buffers: Vec<Data>, name: &str) -> Result<ModelData> {
        let mut parts = Vec::new();

        let scene = gltf.default_scene().or_else(|| gltf.scenes().next());
        if let Some(scene) = scene {
            for node in scene.nodes() {
                self.process_node(&node, &buffers, self.placement, &mut parts)?;
            }
        }

        if parts.is_empty() {
            return Err(anyhow!("Empty gltf file!"));
        }

        info!("Loaded successfully, found {} parts for {}", parts.len(), name);

        Ok(ModelData::new(parts, Some(name.to_owned())))
    }

    fn process_node(
        &self,
        node: &gltf::Node,
        buffers: &[Data],
        parent: Mat4,
        parts: &mut Vec<ModelPart>,
    ) -> Result<()> {
        let world = parent * Mat4::from_cols_array_2d(&node.transform().matrix());

        if let Some(mesh) = node.mesh() {
            let mut positions = Vec::new();
            for primitive in mesh.primitives() {
                let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));
                let primitive_positions = reader
                    .read_positions()
                    .ok_or_else(|| anyhow!("Missing position attributes!"))?;
                positions.extend(primitive_positions.map(|p| world.transform_point3(Vec3::from(p))));
            }

            let name = node
                .name()
                .or_else(|| mesh.name())
                .map(str::to_owned)
                .unwrap_or_else(|| format!("part_{}", node.index()));

            match Aabb::from_points(positions) {
                Some(bounds) => parts.push(ModelPart::new(name, bounds)),
                None => warn!("Mesh node {} has no vertices, skipped", name),
            }
        }

        for child in node.children() {
            self.process_node(&child, buffers, world, parts)?;
        }

        Ok(())
    }
}
