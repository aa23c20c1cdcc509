use std::path::Path;
use log::warn;
use atelier_core::asset_loader::GltfLoader;
use atelier_scene::{AnimationStep, Configurator};

pub trait App: Sized + 'static {
    fn init(configurator: &mut Configurator) -> Result<Self, anyhow::Error>;

    /// Called after the configurator advanced one frame. Return `false` to stop the loop.
    fn update(&mut self, configurator: &mut Configurator, step: AnimationStep, delta_time: f32) -> bool;
}

/// Load a glTF model and hand its parts to the configurator. A failure is
/// reported through the configurator's load state rather than returned.
pub fn load_model(configurator: &mut Configurator, path: impl AsRef<Path>) -> bool {
    let loader = GltfLoader::new(&configurator.config().model);
    match loader.load_from_file(path.as_ref()) {
        Ok(model) => configurator.on_model_loaded(model.parts).is_ok(),
        Err(e) => {
            warn!("Model {:?} could not be loaded", path.as_ref());
            configurator.on_model_load_failed(&e);
            false
        }
    }
}
