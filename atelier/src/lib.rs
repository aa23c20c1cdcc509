use std::path::Path;

mod app;
mod main_loop;

pub use app::{load_model, App};
pub use main_loop::FrameLoop;

// atelier-core
pub use atelier_core::{asset_loader, camera, collections, config, file, math};

// atelier-texture
pub use atelier_texture as texture;

// atelier-scene
pub use atelier_scene::*;

pub fn launch<A: App>(config_path: Option<&Path>) -> Result<FrameLoop<A>, anyhow::Error> {
    let main_loop = FrameLoop::new(config_path)?;
    Ok(main_loop)
}
