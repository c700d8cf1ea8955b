//! wgpu render backend for the desk scene.
//!
//! Owns the five basic meshes, the Phong pipeline, and the per-frame walk
//! over the scripted draw command list.
//!
//! # Invariants
//! - The renderer never mutates scene content; it only resolves texture tags
//!   through the bank, which may latch its warn-once flag.
//! - Draw order is the script's order. Transparency correctness relies on
//!   the script emitting transparent surfaces last.
//! - One pipeline serves every draw; untextured draws bind a white fallback.

mod gpu;
mod mesh;
mod shaders;

pub use gpu::{MAX_DRAWS, SceneRenderer};
