//! Camera rig: a two-state machine over perspective fly navigation and an
//! orthographic orbit around the world origin.
//!
//! # Invariants
//! - `update` is a pure function of `(dt, InputState)` and rig state; no
//!   window handle or global state is touched.
//! - Orbit angles stay within [0, 360) degrees.
//! - Speed multipliers stay within [0.01, 10.0].

pub mod fly;
pub mod orbit;
pub mod rig;

pub use fly::FlyCamera;
pub use orbit::OrbitCamera;
pub use rig::{CameraFrame, CameraRig, ProjectionMode};
