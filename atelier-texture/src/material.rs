use std::sync::Arc;
use image::RgbaImage;
use crate::descriptor::{MaterialDescriptor, Rgb};
use crate::texture_set::TextureSet;

pub const METALNESS: f32 = 0.1;
pub const METALLIC_METALNESS: f32 = 0.8;

/// Material parameters bound to one part by the host material system.
#[derive(Clone, Debug)]
pub struct SurfaceMaterial {
    pub color_map: Option<Arc<RgbaImage>>,
    pub color: Rgb,
    pub roughness: f32,
    pub metalness: f32,
    pub normal_map: Option<Arc<RgbaImage>>,
    pub roughness_map: Option<Arc<RgbaImage>>,
    pub metalness_map: Option<Arc<RgbaImage>>,
    pub ao_map: Option<Arc<RgbaImage>>,
    /// Repeat count of every map along u and v.
    pub map_repeat: [f32; 2],
}

impl SurfaceMaterial {
    pub fn from_descriptor(descriptor: &MaterialDescriptor, color_map: Option<Arc<RgbaImage>>, repeat: f32) -> Self {
        Self {
            color_map,
            color: descriptor.base_color,
            roughness: descriptor.finish.roughness(),
            metalness: if descriptor.metallic { METALLIC_METALNESS } else { METALNESS },
            normal_map: None,
            roughness_map: None,
            metalness_map: None,
            ao_map: None,
            map_repeat: [repeat, repeat],
        }
    }

    /// Fill the optional maps from a loaded texture set. The set's color map
    /// only replaces a missing synthesized one.
    pub fn with_texture_set(mut self, set: &TextureSet) -> Self {
        if self.color_map.is_none() {
            self.color_map = Some(Arc::clone(&set.color));
        }
        self.normal_map = set.normal.clone();
        self.roughness_map = set.roughness.clone();
        self.metalness_map = set.metalness.clone();
        self.ao_map = set.ambient_occlusion.clone();
        self
    }

    /// Same parameters and pixel-identical maps.
    pub fn looks_like(&self, other: &SurfaceMaterial) -> bool {
        fn same_map(a: &Option<Arc<RgbaImage>>, b: &Option<Arc<RgbaImage>>) -> bool {
            match (a, b) {
                (Some(a), Some(b)) => Arc::ptr_eq(a, b) || a.as_raw() == b.as_raw(),
                (None, None) => true,
                _ => false,
            }
        }

        self.color == other.color
            && self.roughness == other.roughness
            && self.metalness == other.metalness
            && self.map_repeat == other.map_repeat
            && same_map(&self.color_map, &other.color_map)
            && same_map(&self.normal_map, &other.normal_map)
            && same_map(&self.roughness_map, &other.roughness_map)
            && same_map(&self.metalness_map, &other.metalness_map)
            && same_map(&self.ao_map, &other.ao_map)
    }
}
