//! Scene content layer: material presets, light rig, texture tag registry,
//! and the fixed desk-scene draw script.
//!
//! # Invariants
//! - The script is a flat sequence of draw commands; there is no scene graph.
//! - Transparent surfaces are emitted after the opaque surfaces of their
//!   object group so alpha blending composes correctly.
//! - Texture lookups by unknown tag return a sentinel and warn once per bank.

pub mod command;
pub mod lighting;
pub mod material;
pub mod script;
pub mod texture;

pub use command::{DrawCommand, ObjectTransform, ShapeKind};
pub use lighting::{LightRig, LightSource, MAX_LIGHTS};
pub use material::{MaterialBank, MaterialDef};
pub use script::{build_lights, desk_scene, update_rgb_light, REQUIRED_TEXTURES};
pub use texture::{TextureBank, INVALID_SLOT, MAX_TEXTURES};

/// Errors from scene registry operations.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("texture bank is full ({} slots)", MAX_TEXTURES)]
    TextureBankFull,
    #[error("texture tag already registered: {0}")]
    DuplicateTag(String),
}
