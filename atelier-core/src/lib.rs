pub mod log;
pub mod collections;
pub mod camera;
pub mod config;
pub mod file;
pub mod math;

pub mod asset_loader {
    mod gltf_loader;

    pub use gltf_loader::{GltfLoader, ModelData, ModelPart};
}
