use crate::fly::FlyCamera;
use crate::orbit::OrbitCamera;
use deskscape_input::{Action, InputState};
use glam::{Mat4, Vec3};

pub const DEFAULT_FOV_DEGREES: f32 = 80.0;
pub const DEFAULT_MOVE_SPEED: f32 = 20.0;
/// Half-extent of the orthographic frustum per pixel of window size.
pub const ORTHO_SCALE: f32 = 0.02;
/// Degrees of orbit per scaled second of held key input.
pub const ORBIT_RATE: f32 = 5.0;
pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 100.0;

const SCALE_MIN: f32 = 0.01;
const SCALE_MAX: f32 = 10.0;

/// Which projection the rig is navigating in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionMode {
    Perspective,
    Orthographic,
}

/// Per-frame camera output consumed by the renderer.
#[derive(Debug, Clone, Copy)]
pub struct CameraFrame {
    pub view: Mat4,
    pub projection: Mat4,
    /// World-space eye position, fed to the shader as the view position.
    pub eye: Vec3,
}

/// The camera context object: owns both navigation sub-states, the shared
/// speed multipliers, and the projection mode flag. Passed explicitly to the
/// frame loop; nothing here is process-global.
#[derive(Debug, Clone, Copy)]
pub struct CameraRig {
    mode: ProjectionMode,
    pub fly: FlyCamera,
    pub orbit: OrbitCamera,
    pub fov_degrees: f32,
    pub move_speed: f32,
    /// Mouse-look multiplier, adjusted by the vertical scroll axis.
    pub look_scale: f32,
    /// Key-movement (panning) multiplier, adjusted by the horizontal axis.
    pub pan_scale: f32,
    viewport: (f32, f32),
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new(1000.0, 800.0)
    }
}

impl CameraRig {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            mode: ProjectionMode::Perspective,
            fly: FlyCamera::default(),
            orbit: OrbitCamera::default(),
            fov_degrees: DEFAULT_FOV_DEGREES,
            move_speed: DEFAULT_MOVE_SPEED,
            look_scale: 1.0,
            pan_scale: 1.0,
            viewport: (width, height),
        }
    }

    pub fn mode(&self) -> ProjectionMode {
        self.mode
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = (width.max(1.0), height.max(1.0));
    }

    /// Switch projection mode. Switching always re-homes the viewpoint to
    /// the fixed default pose, even when the mode is unchanged.
    pub fn set_mode(&mut self, mode: ProjectionMode) {
        self.fly.reset();
        self.orbit.reset();
        self.mode = mode;
        tracing::debug!(?mode, "projection mode selected, camera re-homed");
    }

    /// Scroll input: the vertical axis tunes mouse-look speed, the
    /// horizontal axis tunes panning speed. Two independent multipliers,
    /// each clamped to [0.01, 10.0].
    pub fn apply_scroll(&mut self, dx: f32, dy: f32) {
        self.look_scale = (self.look_scale + dy).clamp(SCALE_MIN, SCALE_MAX);
        self.pan_scale = (self.pan_scale + dx).clamp(SCALE_MIN, SCALE_MAX);
    }

    /// Mouse delta in window coordinates. Only the perspective state owns a
    /// free look direction; the orbit view is fully determined by its angles.
    pub fn apply_mouse_delta(&mut self, dx: f32, dy: f32) {
        if self.mode == ProjectionMode::Perspective {
            self.fly.rotate(dx * self.look_scale, dy * self.look_scale);
        }
    }

    /// Advance the rig by `dt` seconds of held input and produce the view
    /// and projection matrices for the frame.
    pub fn update(&mut self, dt: f32, input: &InputState) -> CameraFrame {
        let step = dt * self.pan_scale;
        match self.mode {
            ProjectionMode::Perspective => self.update_perspective(step, input),
            ProjectionMode::Orthographic => self.update_orbit(step, input),
        }
    }

    fn update_perspective(&mut self, step: f32, input: &InputState) -> CameraFrame {
        let move_step = self.move_speed * step;
        if input.holds(Action::MoveForward) {
            self.fly.move_forward(move_step);
        }
        if input.holds(Action::MoveBackward) {
            self.fly.move_backward(move_step);
        }
        if input.holds(Action::MoveLeft) {
            self.fly.move_left(move_step);
        }
        if input.holds(Action::MoveRight) {
            self.fly.move_right(move_step);
        }
        if input.holds(Action::MoveUp) {
            self.fly.move_up(move_step);
        }
        if input.holds(Action::MoveDown) {
            self.fly.move_down(move_step);
        }

        let (width, height) = self.viewport;
        CameraFrame {
            view: self.fly.view_matrix(),
            projection: Mat4::perspective_rh(
                self.fov_degrees.to_radians(),
                width / height,
                NEAR_PLANE,
                FAR_PLANE,
            ),
            eye: self.fly.position,
        }
    }

    fn update_orbit(&mut self, step: f32, input: &InputState) -> CameraFrame {
        let angle_step = step * ORBIT_RATE;
        if input.holds(Action::MoveForward) {
            self.orbit.adjust_pitch(angle_step);
        }
        if input.holds(Action::MoveBackward) {
            self.orbit.adjust_pitch(-angle_step);
        }
        if input.holds(Action::MoveLeft) {
            self.orbit.adjust_yaw(-angle_step);
        }
        if input.holds(Action::MoveRight) {
            self.orbit.adjust_yaw(angle_step);
        }

        let (width, height) = self.viewport;
        CameraFrame {
            view: self.orbit.view_matrix(),
            projection: Mat4::orthographic_rh(
                -width * ORTHO_SCALE,
                width * ORTHO_SCALE,
                -height * ORTHO_SCALE,
                height * ORTHO_SCALE,
                NEAR_PLANE,
                FAR_PLANE,
            ),
            eye: self.orbit.eye(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fly::{DEFAULT_FRONT, DEFAULT_POSITION, DEFAULT_UP};

    fn holding(actions: &[Action]) -> InputState {
        let mut input = InputState::new();
        for &a in actions {
            input.set(a, true);
        }
        input
    }

    #[test]
    fn mode_switch_resets_to_default_pose() {
        let mut rig = CameraRig::default();
        rig.update(0.5, &holding(&[Action::MoveForward, Action::MoveLeft]));
        rig.apply_mouse_delta(120.0, -45.0);
        assert_ne!(rig.fly.position, DEFAULT_POSITION);

        rig.set_mode(ProjectionMode::Orthographic);
        assert_eq!(rig.fly.position, DEFAULT_POSITION);
        assert_eq!(rig.fly.front, DEFAULT_FRONT);
        assert_eq!(rig.fly.up, DEFAULT_UP);
        assert_eq!(rig.orbit.yaw, 0.0);
        assert_eq!(rig.orbit.pitch, 0.0);
    }

    #[test]
    fn reselecting_current_mode_still_resets() {
        let mut rig = CameraRig::default();
        rig.update(1.0, &holding(&[Action::MoveUp]));
        rig.set_mode(ProjectionMode::Perspective);
        assert_eq!(rig.fly.position, DEFAULT_POSITION);
    }

    #[test]
    fn scroll_scalars_clamped() {
        let mut rig = CameraRig::default();
        for _ in 0..100 {
            rig.apply_scroll(5.0, 5.0);
        }
        assert_eq!(rig.look_scale, 10.0);
        assert_eq!(rig.pan_scale, 10.0);

        for _ in 0..100 {
            rig.apply_scroll(-5.0, -5.0);
        }
        assert_eq!(rig.look_scale, 0.01);
        assert_eq!(rig.pan_scale, 0.01);
    }

    #[test]
    fn scroll_axes_are_independent() {
        let mut rig = CameraRig::default();
        rig.apply_scroll(0.0, 3.0);
        assert_eq!(rig.look_scale, 4.0);
        assert_eq!(rig.pan_scale, 1.0);

        rig.apply_scroll(-0.5, 0.0);
        assert_eq!(rig.look_scale, 4.0);
        assert_eq!(rig.pan_scale, 0.5);
    }

    #[test]
    fn orbit_angles_wrap_under_held_input() {
        let mut rig = CameraRig::default();
        rig.set_mode(ProjectionMode::Orthographic);
        // Push pitch below zero: it must land on 359.9, not a negative value.
        rig.update(0.1, &holding(&[Action::MoveBackward]));
        assert_eq!(rig.orbit.pitch, 359.9);
        // And yaw above 360 wraps to zero.
        rig.orbit.yaw = 359.9;
        rig.update(1.0, &holding(&[Action::MoveRight]));
        assert_eq!(rig.orbit.yaw, 0.0);
    }

    #[test]
    fn orbit_eye_matches_spherical_conversion() {
        let mut rig = CameraRig::default();
        rig.set_mode(ProjectionMode::Orthographic);
        let frame = rig.update(0.0, &InputState::new());
        assert!((frame.eye - Vec3::new(10.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn perspective_movement_scales_with_pan_multiplier() {
        let mut slow = CameraRig::default();
        let mut fast = CameraRig::default();
        fast.apply_scroll(4.0, 0.0);

        let input = holding(&[Action::MoveForward]);
        slow.update(0.1, &input);
        fast.update(0.1, &input);

        let slow_dist = (slow.fly.position - DEFAULT_POSITION).length();
        let fast_dist = (fast.fly.position - DEFAULT_POSITION).length();
        assert!(fast_dist > slow_dist * 4.9 && fast_dist < slow_dist * 5.1);
    }

    #[test]
    fn mouse_delta_ignored_in_orbit_mode() {
        let mut rig = CameraRig::default();
        rig.set_mode(ProjectionMode::Orthographic);
        let before = rig.fly.front;
        rig.apply_mouse_delta(500.0, 500.0);
        assert_eq!(rig.fly.front, before);
    }

    #[test]
    fn frame_matrices_are_finite_in_both_modes() {
        let mut rig = CameraRig::default();
        let frame = rig.update(0.016, &InputState::new());
        assert!(!frame.view.col(0).x.is_nan());
        assert!(!frame.projection.col(0).x.is_nan());

        rig.set_mode(ProjectionMode::Orthographic);
        let frame = rig.update(0.016, &InputState::new());
        assert!(!frame.view.col(0).x.is_nan());
        assert!(!frame.projection.col(0).x.is_nan());
    }
}
