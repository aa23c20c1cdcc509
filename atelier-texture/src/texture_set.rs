use std::path::{Path, PathBuf};
use std::sync::Arc;
use image::RgbaImage;
use log::{debug, info};
use crate::cache::TextureCache;
use crate::TextureError;

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum MapKind {
    Color,
    Normal,
    Roughness,
    Metalness,
    AmbientOcclusion,
}

impl MapKind {
    pub fn file_name(&self) -> &'static str {
        match self {
            MapKind::Color => "color.png",
            MapKind::Normal => "normal.png",
            MapKind::Roughness => "roughness.png",
            MapKind::Metalness => "metalness.png",
            MapKind::AmbientOcclusion => "ao.png",
        }
    }
}

#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct TextureSetKey {
    pub set: String,
    pub map: MapKind,
}

/// Decoded PBR maps of one texture set.
#[derive(Clone, Debug)]
pub struct TextureSet {
    pub name: String,
    pub color: Arc<RgbaImage>,
    pub normal: Option<Arc<RgbaImage>>,
    pub roughness: Option<Arc<RgbaImage>>,
    pub metalness: Option<Arc<RgbaImage>>,
    pub ambient_occlusion: Option<Arc<RgbaImage>>,
}

/// Loads `<root>/<set>/<map>.png` texture sets through an injected cache.
pub struct TextureSetLoader {
    root: PathBuf,
    cache: TextureCache<TextureSetKey, RgbaImage>,
}

impl TextureSetLoader {
    pub fn new(root: impl Into<PathBuf>, cache: TextureCache<TextureSetKey, RgbaImage>) -> Self {
        Self {
            root: root.into(),
            cache,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn cache(&self) -> &TextureCache<TextureSetKey, RgbaImage> {
        &self.cache
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn load(&mut self, set: &str) -> Result<TextureSet, TextureError> {
        info!("Load texture set {:?} from {:?}", set, self.root);

        let color = self
            .load_map(set, MapKind::Color)?
            .ok_or_else(|| TextureError::MissingColorMap { set: set.to_owned() })?;

        Ok(TextureSet {
            name: set.to_owned(),
            color,
            normal: self.load_map(set, MapKind::Normal)?,
            roughness: self.load_map(set, MapKind::Roughness)?,
            metalness: self.load_map(set, MapKind::Metalness)?,
            ambient_occlusion: self.load_map(set, MapKind::AmbientOcclusion)?,
        })
    }

    fn load_map(&mut self, set: &str, map: MapKind) -> Result<Option<Arc<RgbaImage>>, TextureError> {
        let path = self.root.join(set).join(map.file_name());
        if !path.is_file() {
            debug!("Texture set {:?} has no {:?} map", set, map);
            return Ok(None);
        }

        let key = TextureSetKey { set: set.to_owned(), map };
        self.cache
            .get_or_try_insert_with(key, || Ok::<_, TextureError>(image::open(&path)?.to_rgba8()))
            .map(Some)
    }
}
