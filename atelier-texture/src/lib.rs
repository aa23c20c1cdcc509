//! Procedural surface textures and the materials built from them.
//!
//! Descriptor -> (SurfaceRequest) -> Synthesizer -> (SurfaceImage) -> SurfaceMaterial

use derive_more::{Display, Error, From};

pub mod canvas;
pub mod cache;
pub mod descriptor;
pub mod material;
pub mod synthesizer;
pub mod texture_set;

pub use cache::TextureCache;
pub use descriptor::{Finish, MaterialDescriptor, PatternDescriptor, PatternKind, Rgb, StitchKind, StitchingDescriptor};
pub use material::SurfaceMaterial;
pub use synthesizer::{SurfaceImage, SurfaceRequest, SurfaceRequestBuilder, SynthesisPass, Synthesizer, TextureKey};
pub use texture_set::{MapKind, TextureSet, TextureSetKey, TextureSetLoader};

#[derive(Debug, Display, Error, From)]
pub enum TextureError {
    #[display("invalid color `{value}`, expected #rrggbb")]
    #[from(ignore)]
    InvalidColor { value: String },
    #[display("unknown pattern `{name}`")]
    #[from(ignore)]
    UnknownPattern { name: String },
    #[display("unknown stitching `{name}`")]
    #[from(ignore)]
    UnknownStitching { name: String },
    #[display("texture set `{set}` has no color map")]
    #[from(ignore)]
    MissingColorMap { set: String },
    #[display("image codec failure: {_0}")]
    Image(#[error(source)] image::ImageError),
}
