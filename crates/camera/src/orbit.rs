use glam::{Mat4, Vec3};

/// Distance of the orbit eye from the world origin.
pub const DEFAULT_RADIUS: f32 = 10.0;

/// Orbit camera used by the orthographic mode: the eye position is derived
/// every frame from yaw/pitch/radius and always looks at the world origin.
#[derive(Debug, Clone, Copy)]
pub struct OrbitCamera {
    pub yaw: f32,
    pub pitch: f32,
    pub radius: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            radius: DEFAULT_RADIUS,
        }
    }
}

/// Wrap an orbit angle into [0, 360): crossing the upper bound resets to 0,
/// crossing the lower bound resets to 359.9. The asymmetric reset avoids a
/// floating-point tie at exactly 360.
pub fn wrap_degrees(angle: f32) -> f32 {
    if angle > 360.0 {
        0.0
    } else if angle < 0.0 {
        359.9
    } else {
        angle
    }
}

impl OrbitCamera {
    pub fn reset(&mut self) {
        self.yaw = 0.0;
        self.pitch = 0.0;
    }

    pub fn adjust_yaw(&mut self, delta_degrees: f32) {
        self.yaw = wrap_degrees(self.yaw + delta_degrees);
    }

    pub fn adjust_pitch(&mut self, delta_degrees: f32) {
        self.pitch = wrap_degrees(self.pitch + delta_degrees);
    }

    /// Spherical-to-Cartesian conversion of yaw/pitch/radius.
    pub fn eye(&self) -> Vec3 {
        let yaw = self.yaw.to_radians();
        let pitch = self.pitch.to_radians();
        Vec3::new(
            yaw.cos() * pitch.cos() * self.radius,
            pitch.sin() * self.radius,
            yaw.sin() * pitch.cos() * self.radius,
        )
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), Vec3::ZERO, Vec3::Y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eye_at_zero_angles_sits_on_x_axis() {
        let orbit = OrbitCamera::default();
        let eye = orbit.eye();
        assert!((eye - Vec3::new(10.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn wrap_above_360_resets_to_zero() {
        assert_eq!(wrap_degrees(360.1), 0.0);
        assert_eq!(wrap_degrees(1000.0), 0.0);
    }

    #[test]
    fn wrap_below_zero_resets_to_359_9() {
        assert_eq!(wrap_degrees(-0.1), 359.9);
        assert_eq!(wrap_degrees(-1000.0), 359.9);
    }

    #[test]
    fn in_range_angles_pass_through() {
        assert_eq!(wrap_degrees(0.0), 0.0);
        assert_eq!(wrap_degrees(359.9), 359.9);
        assert_eq!(wrap_degrees(180.0), 180.0);
    }

    #[test]
    fn adjustments_stay_in_range() {
        let mut orbit = OrbitCamera::default();
        for _ in 0..500 {
            orbit.adjust_yaw(7.3);
            orbit.adjust_pitch(-4.1);
            assert!((0.0..360.0).contains(&orbit.yaw));
            assert!((0.0..360.0).contains(&orbit.pitch));
        }
    }

    #[test]
    fn view_looks_at_origin() {
        let orbit = OrbitCamera {
            yaw: 45.0,
            pitch: 30.0,
            radius: 10.0,
        };
        let view = orbit.view_matrix();
        // The origin must project onto the view axis at distance `radius`.
        let origin_in_view = view * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!((origin_in_view.z + orbit.radius).abs() < 1e-4);
        assert!(origin_in_view.x.abs() < 1e-4);
        assert!(origin_in_view.y.abs() < 1e-4);
    }
}
