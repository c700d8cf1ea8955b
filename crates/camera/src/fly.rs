use glam::{Mat4, Vec3};

/// Fixed home pose the rig returns to on every projection switch.
pub const DEFAULT_POSITION: Vec3 = Vec3::new(0.0, 5.0, 12.0);
pub const DEFAULT_FRONT: Vec3 = Vec3::new(0.0, -0.5, -2.0);
pub const DEFAULT_UP: Vec3 = Vec3::Y;

/// Degrees of look rotation per mouse unit before the user multiplier.
const LOOK_SENSITIVITY: f32 = 0.1;
const PITCH_LIMIT: f32 = 89.0;

/// First-person fly camera with position, front/up basis, and yaw/pitch.
///
/// Movement steps arrive pre-scaled by the rig (speed, dt, pan multiplier);
/// this type only owns orientation bookkeeping.
#[derive(Debug, Clone, Copy)]
pub struct FlyCamera {
    pub position: Vec3,
    pub front: Vec3,
    pub up: Vec3,
    yaw: f32,
    pitch: f32,
}

impl Default for FlyCamera {
    fn default() -> Self {
        let (yaw, pitch) = angles_from_front(DEFAULT_FRONT);
        Self {
            position: DEFAULT_POSITION,
            front: DEFAULT_FRONT,
            up: DEFAULT_UP,
            yaw,
            pitch,
        }
    }
}

/// Recover yaw/pitch (degrees) from a front vector so the first mouse delta
/// after a reset does not snap the view.
fn angles_from_front(front: Vec3) -> (f32, f32) {
    let f = front.normalize();
    let pitch = f.y.asin().to_degrees();
    let yaw = f.z.atan2(f.x).to_degrees();
    (yaw, pitch)
}

impl FlyCamera {
    /// Return to the fixed home pose.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn forward(&self) -> Vec3 {
        self.front.normalize()
    }

    pub fn right(&self) -> Vec3 {
        self.forward().cross(self.up).normalize()
    }

    pub fn move_forward(&mut self, step: f32) {
        self.position += self.forward() * step;
    }

    pub fn move_backward(&mut self, step: f32) {
        self.position -= self.forward() * step;
    }

    pub fn move_left(&mut self, step: f32) {
        self.position -= self.right() * step;
    }

    pub fn move_right(&mut self, step: f32) {
        self.position += self.right() * step;
    }

    pub fn move_up(&mut self, step: f32) {
        self.position += self.up * step;
    }

    pub fn move_down(&mut self, step: f32) {
        self.position -= self.up * step;
    }

    /// Apply a mouse delta (window coordinates, y down) scaled by the user
    /// look multiplier. Pitch is clamped to avoid the gimbal flip.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * LOOK_SENSITIVITY;
        self.pitch = (self.pitch - dy * LOOK_SENSITIVITY).clamp(-PITCH_LIMIT, PITCH_LIMIT);

        let yaw = self.yaw.to_radians();
        let pitch = self.pitch.to_radians();
        self.front = Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize();
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.forward(), self.up)
    }
}
