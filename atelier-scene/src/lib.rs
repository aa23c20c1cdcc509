use derive_more::{Display, Error, From};
use atelier_texture::TextureError;

pub mod animator;
pub mod catalog;
pub mod configurator;
pub mod fitter;

pub use animator::{AnimationKind, AnimationStep, CameraAnimation, CameraAnimator};
pub use catalog::{display_name, Catalog};
pub use configurator::{Configurator, Highlight, LoadState};
pub use fitter::CameraFitter;

#[derive(Debug, Display, Error, From)]
pub enum ConfiguratorError {
    #[display("unknown part `{name}`")]
    #[from(ignore)]
    UnknownPart { name: String },
    #[display("unknown material `{name}`")]
    #[from(ignore)]
    UnknownMaterial { name: String },
    #[display("unknown pattern `{name}`")]
    #[from(ignore)]
    UnknownPattern { name: String },
    #[display("unknown stitching `{name}`")]
    #[from(ignore)]
    UnknownStitching { name: String },
    #[display("model is not loaded")]
    #[from(ignore)]
    ModelNotReady,
    #[display("model contains no parts")]
    #[from(ignore)]
    EmptyModel,
    #[display("catalog needs at least one material, pattern and stitching")]
    #[from(ignore)]
    EmptyCatalog,
    #[display("{_0}")]
    Texture(#[error(source)] TextureError),
}
