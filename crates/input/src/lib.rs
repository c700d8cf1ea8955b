//! Input model: physical keys mapped to logical actions through a swappable
//! keyboard layout.
//!
//! # Invariants
//! - The camera never sees raw window events, only `Action`s.
//! - Toggling the layout twice restores the original binding table.

pub mod action;
pub mod bindings;

pub use action::{Action, InputState, Key};
pub use bindings::{KeyBindings, Layout};
